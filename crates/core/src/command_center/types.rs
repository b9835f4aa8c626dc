//! Dashboard payload types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use innsight_shared::types::PropertyId;

use crate::comparison::Comparison;
use crate::engine::{CashMetrics, ChannelMetrics, DataHealth};
use crate::period::Period;
use crate::profitability::BreakEvenMetrics;

/// Which lever the owner should pull first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionCode {
    /// Costs exceed revenue; nothing else helps until they come down.
    CutCosts,
    /// Occupancy sits below break-even; price and direct demand come first.
    RaiseRates,
    /// Profitable and above break-even; reduce commission drag next.
    OptimizeChannels,
    /// Not enough data to recommend anything.
    NoData,
}

/// The recommended action with its rationale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendedAction {
    /// Action code, stable for programmatic consumers.
    pub code: ActionCode,
    /// One sentence carrying the numbers that triggered the code.
    pub reason: String,
}

/// The window the dashboard describes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PeriodOverview {
    /// Window the caller asked for.
    pub requested: Period,
    /// Window the metrics actually cover.
    pub effective: Period,
    /// Calendar days in the effective window.
    pub days: i64,
    /// Whether the effective window was derived from the data instead of
    /// the request.
    pub used_fallback: bool,
}

/// Headline metrics with period-over-period and year-over-year context.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthSnapshot {
    /// Room revenue against the preceding window.
    pub revenue: Comparison,
    /// Net profit against the preceding window.
    pub net_profit: Comparison,
    /// Net margin against the preceding window, in percent.
    pub margin_percent: Comparison,
    /// Occupancy against the preceding window, in percent.
    pub occupancy_percent: Comparison,
    /// Average daily rate against the preceding window.
    pub adr: Comparison,
    /// RevPAR against the preceding window.
    pub revpar: Comparison,
    /// Room revenue against the same window one year earlier.
    pub revenue_year_over_year: Comparison,
}

/// Break-even position for the period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakEvenPanel {
    /// The break-even analysis itself.
    pub metrics: BreakEvenMetrics,
    /// Occupancy actually achieved, in percent.
    pub actual_occupancy_percent: Decimal,
    /// Actual minus break-even occupancy, in percentage points. Zero when
    /// break-even is impossible.
    pub occupancy_gap_points: Decimal,
}

/// Economics of one occupied room-night.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UnitEconomics {
    /// Average daily rate.
    pub adr: Decimal,
    /// Variable cost per occupied night.
    pub variable_cost_per_night: Decimal,
    /// Fixed-cost share of one room-night.
    pub fixed_cost_per_room_night: Decimal,
    /// Commission per occupied night at the blended rate.
    pub commission_per_night: Decimal,
    /// ADR minus variable cost and commission.
    pub contribution_per_night: Decimal,
    /// Contribution minus the fixed-cost share.
    pub profit_per_night: Decimal,
}

/// Everything an owner needs on one screen.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandCenter {
    /// Property the dashboard describes.
    pub property_id: PropertyId,
    /// When this payload was assembled.
    pub generated_at: DateTime<Utc>,
    /// Currency code from the cost settings; empty when unknown.
    pub currency: String,
    /// The window the numbers cover.
    pub period: PeriodOverview,
    /// Headline metrics with comparisons.
    pub health: HealthSnapshot,
    /// Break-even position.
    pub break_even: BreakEvenPanel,
    /// Per-night unit economics.
    pub unit_economics: UnitEconomics,
    /// Channel mix, highest revenue first.
    pub channels: Vec<ChannelMetrics>,
    /// Cash picture for the period.
    pub cash: CashMetrics,
    /// Data coverage behind the numbers.
    pub data_health: DataHealth,
    /// The first lever to pull.
    pub action: RecommendedAction,
}

impl CommandCenter {
    /// The all-zero shape returned when the dashboard cannot be built.
    #[must_use]
    pub fn empty(property_id: PropertyId, requested: Period) -> Self {
        let flat = || Comparison::flat(Decimal::ZERO);
        Self {
            property_id,
            generated_at: Utc::now(),
            currency: String::new(),
            period: PeriodOverview {
                requested,
                effective: requested,
                days: requested.days(),
                used_fallback: false,
            },
            health: HealthSnapshot {
                revenue: flat(),
                net_profit: flat(),
                margin_percent: flat(),
                occupancy_percent: flat(),
                adr: flat(),
                revpar: flat(),
                revenue_year_over_year: flat(),
            },
            break_even: BreakEvenPanel {
                metrics: BreakEvenMetrics::unreachable(),
                actual_occupancy_percent: Decimal::ZERO,
                occupancy_gap_points: Decimal::ZERO,
            },
            unit_economics: UnitEconomics::default(),
            channels: Vec::new(),
            cash: CashMetrics::default(),
            data_health: DataHealth::default(),
            action: RecommendedAction {
                code: ActionCode::NoData,
                reason: "No data is available for this property and period.".to_string(),
            },
        }
    }
}
