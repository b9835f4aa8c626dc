//! Dashboard assembly.

use rust_decimal::Decimal;
use tracing::error;

use innsight_shared::types::PropertyId;

use crate::commission::CommissionPolicy;
use crate::comparison::Comparison;
use crate::data::PropertyStore;
use crate::engine::EngineState;
use crate::period::Period;
use crate::profitability::ProfitabilityMetrics;

use super::types::{
    ActionCode, BreakEvenPanel, CommandCenter, HealthSnapshot, PeriodOverview, RecommendedAction,
    UnitEconomics,
};

impl CommandCenter {
    /// Builds the full dashboard for a property and window.
    ///
    /// Never fails: a store failure logs at error level and yields the
    /// empty shape instead. Comparison windows derive from the effective
    /// period, so after a fallback the trends still describe the window
    /// actually shown.
    pub async fn build<S: PropertyStore>(
        store: &S,
        property_id: PropertyId,
        requested: Period,
        policy: CommissionPolicy,
    ) -> Self {
        match EngineState::initialize(store, property_id, requested, policy).await {
            Ok(state) => Self::assemble(&state),
            Err(e) => {
                error!(
                    error = %e,
                    property_id = %property_id,
                    "Dashboard build failed, returning empty shape"
                );
                Self::empty(property_id, requested)
            }
        }
    }

    fn assemble(state: &EngineState) -> Self {
        let effective = state.effective_period();
        let structure = state.structure_metrics();
        let profitability = state.profitability();

        // Earlier windows read from the already-loaded records; an empty
        // window compares against zeros rather than erroring or sliding.
        let previous = state.window_snapshot(effective.preceding());
        let year_earlier = state.window_snapshot(effective.year_earlier());

        let health = HealthSnapshot {
            revenue: Comparison::between(profitability.total_revenue, previous.total_revenue),
            net_profit: Comparison::between(profitability.net_profit, previous.net_profit),
            margin_percent: Comparison::between(
                profitability.margin_percent,
                previous.margin_percent,
            ),
            occupancy_percent: Comparison::between(
                structure.occupancy_percent,
                previous.occupancy_percent,
            ),
            adr: Comparison::between(structure.adr, previous.adr),
            revpar: Comparison::between(structure.revpar, previous.revpar),
            revenue_year_over_year: Comparison::between(
                profitability.total_revenue,
                year_earlier.total_revenue,
            ),
        };

        let break_even_metrics = profitability.break_even.clone();
        let occupancy_gap_points = if break_even_metrics.is_impossible {
            Decimal::ZERO
        } else {
            structure.occupancy_percent - break_even_metrics.break_even_occupancy_percent
        };

        let variable_cost_per_night = if profitability.occupied_nights == 0 {
            Decimal::ZERO
        } else {
            (profitability.total_variable_costs / Decimal::from(profitability.occupied_nights))
                .round_dp(2)
        };
        let fixed_cost_per_room_night = state.cost_model().fixed_per_room_day().round_dp(2);
        let contribution_per_night = break_even_metrics.contribution_per_night;
        let unit_economics = UnitEconomics {
            adr: profitability.adr,
            variable_cost_per_night,
            fixed_cost_per_room_night,
            commission_per_night: (profitability.adr * profitability.average_commission_rate)
                .round_dp(2),
            contribution_per_night,
            profit_per_night: contribution_per_night - fixed_cost_per_room_night,
        };

        let action = recommend(&profitability, structure.occupancy_percent);

        Self {
            property_id: state.property_id(),
            generated_at: chrono::Utc::now(),
            currency: state.currency().to_string(),
            period: PeriodOverview {
                requested: state.requested_period(),
                effective,
                days: effective.days(),
                used_fallback: state.is_using_fallback_period(),
            },
            health,
            break_even: BreakEvenPanel {
                metrics: break_even_metrics,
                actual_occupancy_percent: structure.occupancy_percent,
                occupancy_gap_points,
            },
            unit_economics,
            channels: state.channel_metrics(),
            cash: state.cash_metrics(),
            data_health: state.data_health(),
            action,
        }
    }
}

/// Picks the first lever to pull. First matching rule wins: no data, then
/// negative net profit, then occupancy below break-even, then channel mix.
fn recommend(profitability: &ProfitabilityMetrics, occupancy_percent: Decimal) -> RecommendedAction {
    if profitability.occupied_nights == 0 && profitability.total_revenue.is_zero() {
        return RecommendedAction {
            code: ActionCode::NoData,
            reason: "No reservation data falls in this period; import recent reports to see metrics."
                .to_string(),
        };
    }

    if profitability.net_profit < Decimal::ZERO {
        return RecommendedAction {
            code: ActionCode::CutCosts,
            reason: format!(
                "Net profit is {} for the period; costs exceed revenue, so cut fixed or variable costs first.",
                profitability.net_profit
            ),
        };
    }

    let break_even = &profitability.break_even;
    if !break_even.is_impossible
        && occupancy_percent < break_even.break_even_occupancy_percent
    {
        return RecommendedAction {
            code: ActionCode::RaiseRates,
            reason: format!(
                "Occupancy {occupancy_percent}% sits below the break-even {}%; push rates and direct demand before adding costs.",
                break_even.break_even_occupancy_percent
            ),
        };
    }

    RecommendedAction {
        code: ActionCode::OptimizeChannels,
        reason: format!(
            "The period is profitable at {occupancy_percent}% occupancy; shifting mix toward direct channels cuts commission costs further."
        ),
    }
}
