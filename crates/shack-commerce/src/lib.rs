//! Ordering domain for Tony's Pizza Shack.
//!
//! This crate holds everything the online order flow needs:
//!
//! - **Catalog**: menu items, categories, pizza sizes and toppings
//! - **Cart**: line items with dedup of identical customizations, pricing
//! - **Session**: versioned order session persisted with a time-to-live
//! - **Checkout**: simulated idle / processing / success flow
//! - **Order**: the order screen controller wiring the above together
//!
//! # Example
//!
//! ```rust
//! use shack_cache::MemoryStore;
//! use shack_commerce::prelude::*;
//!
//! let store = KvSessionStore::new(MemoryStore::new(), SystemClock);
//! let mut page = OrderPage::open(Catalog::pizza_shack(), store, SystemClock);
//!
//! page.add_pizza(
//!     &ItemId::new("margherita"),
//!     &SizeId::new("lg"),
//!     [ToppingId::new("basil")],
//! )
//! .unwrap();
//! page.add_item(&ItemId::new("water")).unwrap();
//!
//! let pricing = page.pricing().unwrap();
//! assert_eq!(pricing.total.display(), "$27.00");
//! ```

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod clock;
pub mod error;
pub mod ids;
pub mod money;
pub mod order;
pub mod session;

pub use error::CommerceError;
pub use ids::*;
pub use money::Money;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::clock::{Clock, ManualClock, SystemClock};
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::Money;

    // Catalog
    pub use crate::catalog::{Catalog, MenuCategory, MenuItem, Restaurant, Size, Topping};

    // Cart
    pub use crate::cart::{
        unit_price, Cart, CartPricing, LineItem, LineItemPricing, OtherLine, PizzaCustomization,
        PizzaLine, SummaryLine,
    };

    // Session
    pub use crate::session::{KvSessionStore, OrderMode, OrderSession, SessionStore};

    // Checkout
    pub use crate::checkout::{CheckoutFlow, CheckoutStatus};
    pub use crate::order::OrderPage;
}
