//! Shopping cart module.
//!
//! Contains the line item store, the pizza customization engine and cart
//! pricing.

mod cart;
mod customization;
mod pricing;

pub use cart::{Cart, LineItem, OtherLine, PizzaLine, SummaryLine};
pub use customization::{unit_price, PizzaCustomization};
pub use pricing::{CartPricing, LineItemPricing, TAX_RATE_PERCENT};
