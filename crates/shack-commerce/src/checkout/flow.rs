//! Checkout flow state machine.

use std::time::Duration;

use crate::CommerceError;
use serde::{Deserialize, Serialize};

/// How long a simulated checkout stays in processing.
pub const CHECKOUT_DELAY_MS: i64 = 1_400;

/// State of the checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum CheckoutStatus {
    /// Building the order.
    Idle,
    /// Waiting out the processing delay.
    Processing {
        /// Epoch millis when checkout began.
        started_at: i64,
    },
    /// Order placed. Terminal until a new order is started.
    Success,
}

impl CheckoutStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutStatus::Idle => "idle",
            CheckoutStatus::Processing { .. } => "processing",
            CheckoutStatus::Success => "success",
        }
    }
}

/// Checkout flow state.
///
/// Time is passed in by the caller so the flow can be driven by any clock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckoutFlow {
    status: CheckoutStatus,
    delay_ms: i64,
}

impl Default for CheckoutFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckoutFlow {
    /// Create an idle flow with the standard delay.
    pub fn new() -> Self {
        Self::with_delay(CHECKOUT_DELAY_MS)
    }

    /// Create an idle flow with a custom processing delay.
    pub fn with_delay(delay_ms: i64) -> Self {
        Self {
            status: CheckoutStatus::Idle,
            delay_ms: delay_ms.max(0),
        }
    }

    pub fn status(&self) -> CheckoutStatus {
        self.status
    }

    /// Idle -> Processing.
    pub fn begin(&mut self, now: i64) -> Result<(), CommerceError> {
        match self.status {
            CheckoutStatus::Idle => {
                self.status = CheckoutStatus::Processing { started_at: now };
                Ok(())
            }
            other => Err(CommerceError::InvalidCheckoutTransition {
                from: other.as_str().to_string(),
                to: "processing".to_string(),
            }),
        }
    }

    /// Processing -> Success once the delay has elapsed.
    ///
    /// Returns true only on the call that performs the transition.
    pub fn poll(&mut self, now: i64) -> bool {
        match self.status {
            CheckoutStatus::Processing { started_at } if now - started_at >= self.delay_ms => {
                self.status = CheckoutStatus::Success;
                true
            }
            _ => false,
        }
    }

    /// Time left before a processing checkout completes.
    ///
    /// `None` unless processing.
    pub fn remaining(&self, now: i64) -> Option<Duration> {
        match self.status {
            CheckoutStatus::Processing { started_at } => {
                let left = (started_at + self.delay_ms - now).max(0);
                Some(Duration::from_millis(left as u64))
            }
            _ => None,
        }
    }

    /// Success -> Idle, for starting a new order.
    pub fn reset(&mut self) -> Result<(), CommerceError> {
        match self.status {
            CheckoutStatus::Success => {
                self.status = CheckoutStatus::Idle;
                Ok(())
            }
            other => Err(CommerceError::InvalidCheckoutTransition {
                from: other.as_str().to_string(),
                to: "idle".to_string(),
            }),
        }
    }

    pub fn is_processing(&self) -> bool {
        matches!(self.status, CheckoutStatus::Processing { .. })
    }

    pub fn is_complete(&self) -> bool {
        self.status == CheckoutStatus::Success
    }
}
