//! Menu catalog module.
//!
//! Contains the read-only reference data: menu items grouped into categories,
//! plus the size and topping tables pizzas are customized from.

mod data;
mod menu;

pub use data::{DEFAULT_SIZE, PIZZA_CATEGORY};
pub use menu::{Catalog, MenuCategory, MenuItem, Restaurant, Size, Topping};
