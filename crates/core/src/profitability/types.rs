//! Profitability and break-even response types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Break-even analysis for a window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakEvenMetrics {
    /// What one occupied night contributes after variable costs and
    /// commission: `adr - variable_per_night - adr * avg_commission_rate`.
    pub contribution_per_night: Decimal,
    /// Occupancy needed to cover fixed costs, in percent.
    pub break_even_occupancy_percent: Decimal,
    /// Occupied nights needed in the window to cover its fixed costs.
    pub required_nights: Decimal,
    /// Occupied nights beyond (or short of, when negative) the break-even
    /// point.
    pub margin_of_safety_nights: Decimal,
    /// True when the contribution per night is zero or negative: every
    /// additional sold night loses money and no occupancy can break even.
    /// The ratio metrics report zero instead of negative or infinite
    /// garbage.
    pub is_impossible: bool,
}

impl BreakEvenMetrics {
    /// The all-zero, impossible-to-break-even shape used when there is
    /// nothing to compute from.
    #[must_use]
    pub fn unreachable() -> Self {
        Self {
            contribution_per_night: Decimal::ZERO,
            break_even_occupancy_percent: Decimal::ZERO,
            required_nights: Decimal::ZERO,
            margin_of_safety_nights: Decimal::ZERO,
            is_impossible: true,
        }
    }
}

/// Full profit-and-loss picture for a window.
///
/// The identity `net_profit = total_revenue - total_fixed_costs -
/// total_variable_costs - total_commissions` holds exactly on the reported
/// (rounded) figures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfitabilityMetrics {
    /// Room revenue attributable to the window.
    pub total_revenue: Decimal,
    /// Commission owed on that revenue.
    pub total_commissions: Decimal,
    /// Variable costs for the occupied nights.
    pub total_variable_costs: Decimal,
    /// Fixed costs for the window's calendar days.
    pub total_fixed_costs: Decimal,
    /// What remains of revenue after all three cost lines.
    pub net_profit: Decimal,
    /// Net profit as a percentage of revenue. Zero when revenue is zero.
    pub margin_percent: Decimal,
    /// Commission as a fraction of revenue (blended across channels).
    pub average_commission_rate: Decimal,
    /// Occupied room-nights in the window.
    pub occupied_nights: i64,
    /// Average daily rate: revenue per occupied night.
    pub adr: Decimal,
    /// Break-even analysis on the same inputs.
    pub break_even: BreakEvenMetrics,
}

impl ProfitabilityMetrics {
    /// The all-zero shape for a window with no usable data.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            total_revenue: Decimal::ZERO,
            total_commissions: Decimal::ZERO,
            total_variable_costs: Decimal::ZERO,
            total_fixed_costs: Decimal::ZERO,
            net_profit: Decimal::ZERO,
            margin_percent: Decimal::ZERO,
            average_commission_rate: Decimal::ZERO,
            occupied_nights: 0,
            adr: Decimal::ZERO,
            break_even: BreakEvenMetrics::unreachable(),
        }
    }
}
