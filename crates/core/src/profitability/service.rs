//! Profit-and-loss computation.

use chrono::NaiveDate;
use rust_decimal::Decimal;

use innsight_shared::types::PropertyId;

use crate::commission::CommissionPolicy;
use crate::costs::{CommissionSettings, CostModel};
use crate::data::PropertyStore;
use crate::engine::{EngineError, EngineState};
use crate::period::Period;
use crate::proration::ProratedReservation;

use super::types::{BreakEvenMetrics, ProfitabilityMetrics};

/// Computes profitability for an arbitrary window without keeping an
/// engine around.
///
/// Initializes a throwaway engine under the default commission policy,
/// returns its P&L, and drops everything else. Callers that want more than
/// one metric family from the same window should initialize an
/// [`EngineState`] themselves instead of paying the load twice.
pub async fn calculate_profitability_metrics<S: PropertyStore>(
    store: &S,
    property: PropertyId,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<ProfitabilityMetrics, EngineError> {
    let period = Period::new(start, end)?;
    let state =
        EngineState::initialize(store, property, period, CommissionPolicy::default()).await?;
    Ok(state.profitability())
}

/// Stateless P&L calculations over a prorated reservation set.
pub struct ProfitabilityService;

impl ProfitabilityService {
    /// Computes the full P&L for one window.
    ///
    /// Components are rounded to cents first and the net derived from the
    /// rounded figures, so the reported identity is exact.
    #[must_use]
    pub fn calculate(
        actives: &[ProratedReservation],
        cost_model: &CostModel,
        policy: &CommissionPolicy,
        commissions: &CommissionSettings,
        period_days: i64,
    ) -> ProfitabilityMetrics {
        let occupied_nights: i64 = actives.iter().map(|p| p.nights_in_period).sum();

        let raw_revenue: Decimal = actives.iter().map(|p| p.revenue_in_period).sum();
        let raw_commissions: Decimal = actives
            .iter()
            .map(|p| {
                p.revenue_in_period * policy.resolve_rate(&p.reservation.source, commissions)
            })
            .sum();

        let variable_per_night = cost_model.variable_per_night(Self::average_period_nights(actives));

        let total_revenue = raw_revenue.round_dp(2);
        let total_commissions = raw_commissions.round_dp(2);
        let total_variable_costs =
            (variable_per_night * Decimal::from(occupied_nights)).round_dp(2);
        let total_fixed_costs = cost_model.period_fixed(period_days).round_dp(2);

        let net_profit =
            total_revenue - total_fixed_costs - total_variable_costs - total_commissions;

        let margin_percent = if total_revenue.is_zero() {
            Decimal::ZERO
        } else {
            ((net_profit / total_revenue) * Decimal::ONE_HUNDRED).round_dp(2)
        };

        let adr = if occupied_nights == 0 {
            Decimal::ZERO
        } else {
            (total_revenue / Decimal::from(occupied_nights)).round_dp(2)
        };

        let average_commission_rate = if total_revenue.is_zero() {
            Decimal::ZERO
        } else {
            (total_commissions / total_revenue).round_dp(4)
        };

        let break_even = Self::break_even(
            adr,
            variable_per_night,
            average_commission_rate,
            cost_model,
            period_days,
            occupied_nights,
        );

        ProfitabilityMetrics {
            total_revenue,
            total_commissions,
            total_variable_costs,
            total_fixed_costs,
            net_profit,
            margin_percent,
            average_commission_rate,
            occupied_nights,
            adr,
            break_even,
        }
    }

    /// Break-even analysis from per-night economics.
    #[must_use]
    pub fn break_even(
        adr: Decimal,
        variable_per_night: Decimal,
        avg_commission_rate: Decimal,
        cost_model: &CostModel,
        period_days: i64,
        occupied_nights: i64,
    ) -> BreakEvenMetrics {
        let contribution = adr - variable_per_night - adr * avg_commission_rate;
        if contribution <= Decimal::ZERO {
            return BreakEvenMetrics {
                contribution_per_night: contribution.round_dp(2),
                ..BreakEvenMetrics::unreachable()
            };
        }

        let room_count = Decimal::from(cost_model.room_count);
        let break_even_occupancy_percent =
            (cost_model.fixed_per_day / (contribution * room_count) * Decimal::ONE_HUNDRED)
                .round_dp(2);
        let required_nights = (cost_model.period_fixed(period_days) / contribution).round_dp(2);
        let margin_of_safety_nights = Decimal::from(occupied_nights) - required_nights;

        BreakEvenMetrics {
            contribution_per_night: contribution.round_dp(2),
            break_even_occupancy_percent,
            required_nights,
            margin_of_safety_nights,
            is_impossible: false,
        }
    }

    /// Average prorated nights per reservation in the set: the denominator
    /// that spreads one cleaning per reservation over the nights the set
    /// actually occupies. Stay nights outside the window do not dilute the
    /// charge. `None` when the set is empty.
    pub(crate) fn average_period_nights(actives: &[ProratedReservation]) -> Option<Decimal> {
        if actives.is_empty() {
            return None;
        }
        let total: i64 = actives.iter().map(|p| p.nights_in_period).sum();
        Some(Decimal::from(total) / Decimal::from(actives.len()))
    }
}
