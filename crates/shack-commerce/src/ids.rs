//! Newtype IDs for type-safe identifiers.
//!
//! Menu items, sizes and toppings are all keyed by short slugs such as
//! `"margherita"` or `"lg"`. Newtypes keep a size slug from being passed where
//! a topping slug is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to generate newtype ID structs.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from a string.
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume and return the inner string.
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(
    /// Identifier of a purchasable menu item.
    ItemId
);
define_id!(
    /// Identifier of a menu category.
    CategoryId
);
define_id!(
    /// Identifier of a pizza size.
    SizeId
);
define_id!(
    /// Identifier of a pizza topping.
    ToppingId
);
define_id!(
    /// Identifier of a cart line.
    ///
    /// For flat items this equals the item id; for pizzas it is the derived
    /// customization key.
    LineId
);
