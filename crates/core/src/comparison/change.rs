//! Change between two values of the same metric.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Direction of a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    /// Current exceeds previous.
    Up,
    /// Current falls below previous.
    Down,
    /// No change.
    Flat,
}

/// A metric value next to its earlier-window counterpart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comparison {
    /// Value in the current window.
    pub current: Decimal,
    /// Value in the earlier window.
    pub previous: Decimal,
    /// Absolute change (current - previous).
    pub change: Decimal,
    /// Relative change in percent. Zero when the earlier value is zero;
    /// a change from nothing has no meaningful percentage.
    pub change_percent: Decimal,
    /// Direction of the change.
    pub trend: Trend,
}

impl Comparison {
    /// Compares a current value against its earlier counterpart.
    #[must_use]
    pub fn between(current: Decimal, previous: Decimal) -> Self {
        let change = current - previous;
        let change_percent = if previous.is_zero() {
            Decimal::ZERO
        } else {
            ((change / previous) * Decimal::ONE_HUNDRED).round_dp(2)
        };

        let trend = if change.is_zero() {
            Trend::Flat
        } else if change.is_sign_positive() {
            Trend::Up
        } else {
            Trend::Down
        };

        Self {
            current,
            previous,
            change,
            change_percent,
            trend,
        }
    }

    /// A comparison with no earlier data: previous mirrors current, so the
    /// change is zero and the trend flat.
    #[must_use]
    pub fn flat(current: Decimal) -> Self {
        Self::between(current, current)
    }
}
