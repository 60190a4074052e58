//! Cart pricing calculations.

use crate::cart::Cart;
use crate::catalog::Catalog;
use crate::error::CommerceError;
use crate::ids::LineId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Sales tax applied to the subtotal, in percent.
pub const TAX_RATE_PERCENT: i64 = 8;

/// Complete pricing breakdown for a cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartPricing {
    /// Sum of unit price times quantity over all lines.
    pub subtotal: Money,
    /// Tax on the subtotal, rounded to the cent.
    pub tax: Money,
    /// subtotal + tax.
    pub total: Money,
    /// Number of units in the cart.
    pub item_count: u64,
    /// Per-line-item pricing breakdown.
    pub line_items: Vec<LineItemPricing>,
}

impl CartPricing {
    /// Price the cart against the catalog's size and topping tables.
    ///
    /// Recomputed from scratch on every call. Returns an error only if the
    /// amounts overflow.
    pub fn calculate(cart: &Cart, catalog: &Catalog) -> Result<Self, CommerceError> {
        let line_items = cart
            .items()
            .iter()
            .map(|item| {
                let unit_price = item.unit_price(catalog)?;
                let subtotal = unit_price
                    .checked_mul(item.quantity())
                    .ok_or(CommerceError::Overflow)?;
                Ok(LineItemPricing {
                    line_id: item.id().clone(),
                    unit_price,
                    quantity: item.quantity(),
                    subtotal,
                })
            })
            .collect::<Result<Vec<_>, CommerceError>>()?;

        let subtotal =
            Money::try_sum(line_items.iter().map(|l| l.subtotal)).ok_or(CommerceError::Overflow)?;
        let tax = subtotal
            .percentage(TAX_RATE_PERCENT)
            .ok_or(CommerceError::Overflow)?;
        let total = subtotal.checked_add(tax).ok_or(CommerceError::Overflow)?;

        Ok(Self {
            subtotal,
            tax,
            total,
            item_count: cart.item_count(),
            line_items,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.line_items.is_empty()
    }
}

/// Pricing breakdown for a single line item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItemPricing {
    pub line_id: LineId,
    pub unit_price: Money,
    pub quantity: u32,
    /// unit_price * quantity.
    pub subtotal: Money,
}
