//! Money type for representing menu prices and order totals.
//!
//! Uses cents-based integer representation so that cart sums and the tax
//! line never accumulate floating-point error. The shop only trades in US
//! dollars, so no currency is carried.
//!
//! On the wire a `Money` is a JSON number of dollars (`16`, `3.5`), which is
//! the shape the persisted order session uses for prices.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul, Sub};

/// A monetary value in US cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Money {
    /// Amount in cents.
    pub cents: i64,
}

impl Money {
    /// Create a new Money value from cents.
    pub const fn new(cents: i64) -> Self {
        Self { cents }
    }

    /// Create a Money value from whole dollars.
    pub const fn dollars(dollars: i64) -> Self {
        Self::new(dollars * 100)
    }

    /// Create a Money value from a decimal dollar amount.
    ///
    /// ```
    /// use shack_commerce::money::Money;
    /// let price = Money::from_decimal(3.5);
    /// assert_eq!(price.cents, 350);
    /// ```
    pub fn from_decimal(amount: f64) -> Self {
        Self::new((amount * 100.0).round() as i64)
    }

    /// Like [`Money::from_decimal`], but `None` for amounts that are not
    /// finite or do not fit in `i64` cents.
    pub fn try_from_decimal(amount: f64) -> Option<Self> {
        let cents = (amount * 100.0).round();
        // i64::MAX as f64 rounds up to 2^63, which is itself out of range.
        if !cents.is_finite() || cents < i64::MIN as f64 || cents >= i64::MAX as f64 {
            return None;
        }
        Some(Self::new(cents as i64))
    }

    /// Zero dollars.
    pub const fn zero() -> Self {
        Self::new(0)
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.cents == 0
    }

    /// Check if this is negative.
    pub fn is_negative(&self) -> bool {
        self.cents < 0
    }

    /// Convert to a decimal dollar value.
    pub fn to_decimal(&self) -> f64 {
        self.cents as f64 / 100.0
    }

    /// Format as a display string (e.g., "$49.68", "-$2.00").
    pub fn display(&self) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        format!("{}${}", sign, Money::new(self.cents.abs()).display_amount())
    }

    /// Format with two decimals and no symbol (e.g., "49.68").
    pub fn display_amount(&self) -> String {
        let sign = if self.is_negative() { "-" } else { "" };
        let abs = self.cents.unsigned_abs();
        format!("{}{}.{:02}", sign, abs / 100, abs % 100)
    }

    /// Add another Money value, returning None on overflow.
    pub fn checked_add(&self, other: Money) -> Option<Money> {
        self.cents.checked_add(other.cents).map(Money::new)
    }

    /// Multiply by a quantity, returning None on overflow.
    pub fn checked_mul(&self, quantity: u32) -> Option<Money> {
        self.cents.checked_mul(i64::from(quantity)).map(Money::new)
    }

    /// Calculate a whole-number percentage of this amount, rounded half away
    /// from zero to the nearest cent.
    pub fn percentage(&self, percent: i64) -> Option<Money> {
        let scaled = self.cents.checked_mul(percent)?;
        let half = if scaled < 0 { -50 } else { 50 };
        Some(Money::new(scaled.checked_add(half)? / 100))
    }

    /// Sum an iterator of Money values, returning None on overflow.
    pub fn try_sum(iter: impl IntoIterator<Item = Money>) -> Option<Money> {
        iter.into_iter()
            .try_fold(Money::zero(), |acc, m| acc.checked_add(m))
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money::new(self.cents + other.cents)
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, other: Money) -> Money {
        Money::new(self.cents - other.cents)
    }
}

impl Mul<u32> for Money {
    type Output = Money;

    fn mul(self, quantity: u32) -> Money {
        Money::new(self.cents * i64::from(quantity))
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::zero(), Add::add)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.cents % 100 == 0 {
            serializer.serialize_i64(self.cents / 100)
        } else {
            serializer.serialize_f64(self.to_decimal())
        }
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let amount = f64::deserialize(deserializer)?;
        Money::try_from_decimal(amount)
            .ok_or_else(|| serde::de::Error::custom("money amount out of range"))
    }
}

/// Deserialize a price that must not be negative.
///
/// Use with `#[serde(deserialize_with = "...")]` on item and topping prices;
/// size deltas may be negative and use the plain impl.
pub fn deserialize_price<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Money, D::Error> {
    let money = Money::deserialize(deserializer)?;
    if money.is_negative() {
        return Err(serde::de::Error::custom("price must not be negative"));
    }
    Ok(money)
}
