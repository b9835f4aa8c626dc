//! Per-reservation profit and loss.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use innsight_shared::types::ReservationId;

use crate::profitability::ProfitabilityService;
use crate::proration::ProratedReservation;

use super::state::EngineState;

/// Row filters for the reservation economics table.
///
/// All filters are optional and combine with AND.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EconomicsFilter {
    /// Keep only reservations from this channel (trimmed, case-insensitive
    /// match on the recorded source).
    pub channel: Option<String>,
    /// Keep only reservations whose period P&L is negative.
    pub unprofitable_only: bool,
    /// Keep only reservations contributing at least this many nights.
    pub min_nights: Option<i64>,
}

/// One reservation's P&L within the period.
///
/// The variable side applies the period's per-night rate to the row's
/// nights, so the rows sum back to the aggregate P&L's variable block.
/// Only the fixed side differs from the aggregate: each row bears the
/// per-room-day rate times its nights, never the whole property's fixed
/// block.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationEconomics {
    /// Reservation this row describes.
    pub reservation_id: ReservationId,
    /// Guest display name.
    pub guest_name: String,
    /// Booking channel as recorded.
    pub channel: String,
    /// Arrival date.
    pub check_in: NaiveDate,
    /// Departure date.
    pub check_out: NaiveDate,
    /// Nights of the stay inside the period.
    pub nights_in_period: i64,
    /// Revenue attributable to the period.
    pub revenue: Decimal,
    /// Commission rate the channel resolves to.
    pub commission_rate: Decimal,
    /// Commission owed on the period revenue.
    pub commission: Decimal,
    /// Variable costs for the period nights at the period per-night rate.
    pub variable_costs: Decimal,
    /// Fixed-cost allocation for the period nights.
    pub fixed_costs: Decimal,
    /// Revenue minus commission, variable, and fixed costs.
    pub net_profit: Decimal,
    /// Net profit spread over the period nights. Zero when no nights.
    pub profit_per_night: Decimal,
    /// Net profit as a percentage of revenue. Zero when revenue is zero.
    pub margin_percent: Decimal,
    /// Whether the stay loses money over its period nights.
    pub is_unprofitable: bool,
}

/// Aggregate over a filtered set of economics rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EconomicsSummary {
    /// Rows that passed the filter.
    pub reservation_count: usize,
    /// Rows with negative net profit.
    pub unprofitable_count: usize,
    /// Period nights across the rows.
    pub total_nights: i64,
    /// Period revenue across the rows.
    pub total_revenue: Decimal,
    /// Period net profit across the rows.
    pub total_net_profit: Decimal,
    /// Net profit per occupied night. Zero when no nights.
    pub average_net_per_night: Decimal,
}

impl EngineState {
    /// Per-reservation P&L rows for the effective period, worst net profit
    /// first.
    #[must_use]
    pub fn reservation_economics(&self, filter: &EconomicsFilter) -> Vec<ReservationEconomics> {
        let channel = filter.channel.as_ref().map(|c| c.trim().to_lowercase());

        // The period rate, not a per-row one: filters must not change what
        // a night costs.
        let variable_per_night = self
            .cost_model
            .variable_per_night(ProfitabilityService::average_period_nights(&self.actives));

        let mut rows: Vec<ReservationEconomics> = self
            .actives
            .iter()
            .filter(|p| {
                channel
                    .as_ref()
                    .is_none_or(|want| p.reservation.source.trim().to_lowercase() == *want)
            })
            .filter(|p| filter.min_nights.is_none_or(|min| p.nights_in_period >= min))
            .map(|p| self.economics_row(p, variable_per_night))
            .filter(|row| !filter.unprofitable_only || row.is_unprofitable)
            .collect();
        rows.sort_by(|a, b| a.net_profit.cmp(&b.net_profit));
        rows
    }

    /// Aggregate P&L of the filtered rows.
    #[must_use]
    pub fn economics_summary(&self, filter: &EconomicsFilter) -> EconomicsSummary {
        let rows = self.reservation_economics(filter);

        let total_nights: i64 = rows.iter().map(|r| r.nights_in_period).sum();
        let total_revenue = rows.iter().map(|r| r.revenue).sum::<Decimal>().round_dp(2);
        let total_net_profit = rows
            .iter()
            .map(|r| r.net_profit)
            .sum::<Decimal>()
            .round_dp(2);
        let unprofitable_count = rows.iter().filter(|r| r.is_unprofitable).count();
        let average_net_per_night = if total_nights == 0 {
            Decimal::ZERO
        } else {
            (total_net_profit / Decimal::from(total_nights)).round_dp(2)
        };

        EconomicsSummary {
            reservation_count: rows.len(),
            unprofitable_count,
            total_nights,
            total_revenue,
            total_net_profit,
            average_net_per_night,
        }
    }

    fn economics_row(
        &self,
        p: &ProratedReservation,
        variable_per_night: Decimal,
    ) -> ReservationEconomics {
        let nights = Decimal::from(p.nights_in_period);
        let revenue = p.revenue_in_period.round_dp(2);
        let commission_rate = self
            .policy
            .resolve_rate(&p.reservation.source, &self.commissions);
        let commission = (p.revenue_in_period * commission_rate).round_dp(2);

        let variable_costs = (variable_per_night * nights).round_dp(2);
        let fixed_costs = (self.cost_model.fixed_per_room_day() * nights).round_dp(2);

        let net_profit = revenue - commission - variable_costs - fixed_costs;
        let profit_per_night = if p.nights_in_period == 0 {
            Decimal::ZERO
        } else {
            (net_profit / nights).round_dp(2)
        };
        let margin_percent = if revenue.is_zero() {
            Decimal::ZERO
        } else {
            (net_profit / revenue * Decimal::ONE_HUNDRED).round_dp(2)
        };

        ReservationEconomics {
            reservation_id: p.reservation.id,
            guest_name: p.reservation.guest_name.clone(),
            channel: p.reservation.source.clone(),
            check_in: p.reservation.check_in,
            check_out: p.reservation.check_out,
            nights_in_period: p.nights_in_period,
            revenue,
            commission_rate,
            commission,
            variable_costs,
            fixed_costs,
            net_profit,
            profit_per_night,
            margin_percent,
            is_unprofitable: net_profit < Decimal::ZERO,
        }
    }
}
