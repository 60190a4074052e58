//! Checkout module.
//!
//! The checkout is simulated: no payment or network call happens, only a
//! fixed processing delay before the order counts as placed.

mod flow;

pub use flow::{CheckoutFlow, CheckoutStatus, CHECKOUT_DELAY_MS};
