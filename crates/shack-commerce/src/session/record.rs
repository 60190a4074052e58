//! Persisted session record.

use std::fmt;
use std::str::FromStr;

use crate::cart::LineItem;
use serde::{de, Deserialize, Deserializer, Serialize};

/// Record format version. Records with any other version are discarded.
pub const SESSION_VERSION: u32 = 1;

/// How the customer gets the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderMode {
    #[default]
    Pickup,
    Delivery,
}

impl OrderMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderMode::Pickup => "pickup",
            OrderMode::Delivery => "delivery",
        }
    }
}

impl fmt::Display for OrderMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pickup" | "pick-up" => Ok(OrderMode::Pickup),
            "delivery" => Ok(OrderMode::Delivery),
            other => Err(format!("unknown order mode: {other}")),
        }
    }
}

/// A saved order session.
///
/// Always written whole; there are no partial updates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSession {
    #[serde(deserialize_with = "whole_number")]
    pub version: u32,
    /// Epoch millis of the save. Fractional values are truncated on read.
    #[serde(deserialize_with = "epoch_millis")]
    pub updated_at: i64,
    pub mode: OrderMode,
    pub line_items: Vec<LineItem>,
    pub notes: String,
}

/// Borrowed view used when writing, so saving never clones the cart.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct OrderSessionRef<'a> {
    pub version: u32,
    pub updated_at: i64,
    pub mode: OrderMode,
    pub line_items: &'a [LineItem],
    pub notes: &'a str,
}

/// The fields checked before the body is trusted.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SessionHeader {
    pub version: f64,
    pub updated_at: f64,
}

/// Any JSON number with no fractional part that fits in `u32` (`1`, `1.0`).
fn whole_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let n = f64::deserialize(deserializer)?;
    if n.fract() != 0.0 || n < 0.0 || n > f64::from(u32::MAX) {
        return Err(de::Error::custom(format!("expected a whole number, got {n}")));
    }
    Ok(n as u32)
}

/// Any finite JSON number, truncated to whole milliseconds.
fn epoch_millis<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    let n = f64::deserialize(deserializer)?;
    if !n.is_finite() {
        return Err(de::Error::custom("timestamp must be finite"));
    }
    Ok(n.trunc() as i64)
}
