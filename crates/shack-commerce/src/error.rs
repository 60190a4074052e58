//! Commerce error types.

use thiserror::Error;

/// Errors that can occur in ordering operations.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommerceError {
    /// Menu item not found.
    #[error("Menu item not found: {0}")]
    ItemNotFound(String),

    /// Pizza size not found.
    #[error("Size not found: {0}")]
    SizeNotFound(String),

    /// Topping not found.
    #[error("Topping not found: {0}")]
    ToppingNotFound(String),

    /// Item cannot be customized as a pizza.
    #[error("Not a pizza: {0}")]
    NotAPizza(String),

    /// Line item not in cart.
    #[error("Line item not in cart: {0}")]
    LineNotFound(String),

    /// Checkout requested with nothing in the cart.
    #[error("Cannot check out an empty cart")]
    EmptyCart,

    /// Invalid checkout state transition.
    #[error("Invalid checkout transition from {from} to {to}")]
    InvalidCheckoutTransition { from: String, to: String },

    /// Arithmetic overflow.
    #[error("Arithmetic overflow in money calculation")]
    Overflow,
}
