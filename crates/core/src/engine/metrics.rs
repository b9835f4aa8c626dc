//! Metric accessors over the engine snapshot.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::comparison::Comparison;
use crate::period::Period;
use crate::profitability::{ProfitabilityMetrics, ProfitabilityService};
use crate::proration::prorate_all;

use super::state::EngineState;

/// Occupancy and revenue structure of the period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructureMetrics {
    /// Sellable rooms.
    pub room_count: u32,
    /// Calendar days in the period.
    pub period_days: i64,
    /// Room-nights on offer: `room_count * period_days`.
    pub available_room_nights: i64,
    /// Room-nights actually sold (prorated into the period).
    pub occupied_room_nights: i64,
    /// Occupied share of available room-nights, in percent.
    pub occupancy_percent: Decimal,
    /// Average daily rate: revenue per occupied night.
    pub adr: Decimal,
    /// Revenue per available room-night.
    pub revpar: Decimal,
    /// Room revenue attributable to the period.
    pub total_revenue: Decimal,
    /// Taxes attributable to the period.
    pub total_taxes: Decimal,
    /// Reservations contributing at least one night to the period.
    pub reservation_count: usize,
    /// Average stay length of those reservations, in nights.
    pub average_stay_nights: Decimal,
    /// Average period revenue per contributing reservation.
    pub average_booking_value: Decimal,
}

/// Landing-page roll-up: the numbers an owner checks daily.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HomeMetrics {
    /// Occupancy for the period, in percent.
    pub occupancy_percent: Decimal,
    /// Average daily rate.
    pub adr: Decimal,
    /// Revenue per available room-night.
    pub revpar: Decimal,
    /// Room revenue for the period.
    pub total_revenue: Decimal,
    /// Net profit for the period.
    pub net_profit: Decimal,
    /// Room-nights sold in the period.
    pub nights_sold: i64,
    /// Confirmed revenue already on the books for the mirror window after
    /// the period.
    pub on_books_revenue: Decimal,
    /// Confirmed room-nights on the books for that window.
    pub on_books_nights: i64,
    /// Prorated revenue for the trailing 7 days against the 7 before.
    pub weekly_pace: Comparison,
}

/// Transaction-side cash picture for the period.
///
/// Voided transactions are excluded from every figure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CashMetrics {
    /// Configured cash on hand when tracking began.
    pub starting_balance: Decimal,
    /// Money in: sum of credits.
    pub inflows: Decimal,
    /// Money out: sum of debits.
    pub outflows: Decimal,
    /// Debits flagged as guest refunds.
    pub refunds: Decimal,
    /// Net effect of manual adjustments.
    pub adjustments_net: Decimal,
    /// Inflows minus outflows.
    pub net_cash_flow: Decimal,
    /// Starting balance plus every movement through the period end,
    /// including history before the period.
    pub balance_at_period_end: Decimal,
    /// Guest payments recorded on reservations touching the period.
    pub guest_payments_recorded: Decimal,
    /// Balance still owed on those reservations.
    pub outstanding_balance: Decimal,
}

/// One booking channel's slice of the period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelMetrics {
    /// Channel name as first recorded (trimmed). Blank sources group under
    /// `unknown`.
    pub channel: String,
    /// Reservations from this channel contributing to the period.
    pub reservation_count: usize,
    /// Room-nights sold through this channel.
    pub nights: i64,
    /// Revenue attributable to the period.
    pub revenue: Decimal,
    /// Share of total period revenue, in percent.
    pub revenue_share_percent: Decimal,
    /// Commission rate the channel resolves to.
    pub commission_rate: Decimal,
    /// Commission owed on the channel's revenue.
    pub commission_amount: Decimal,
    /// Revenue after commission.
    pub net_revenue: Decimal,
    /// Average daily rate within the channel.
    pub adr: Decimal,
    /// Whether the channel is commission-free.
    pub is_direct: bool,
}

/// Headline figures for an arbitrary window over the snapshot's records.
///
/// The comparison panels use this instead of initializing further engines,
/// so an earlier window with no data reads as zeros rather than sliding to
/// the latest data and comparing the period against itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowSnapshot {
    /// Room revenue attributable to the window.
    pub total_revenue: Decimal,
    /// Net profit for the window.
    pub net_profit: Decimal,
    /// Net margin in percent.
    pub margin_percent: Decimal,
    /// Occupancy in percent.
    pub occupancy_percent: Decimal,
    /// Average daily rate.
    pub adr: Decimal,
    /// Revenue per available room-night.
    pub revpar: Decimal,
}

impl EngineState {
    /// Occupancy and revenue structure of the effective period.
    #[must_use]
    pub fn structure_metrics(&self) -> StructureMetrics {
        let period_days = self.effective.days();
        let room_count = self.cost_model.room_count;
        let available_room_nights = i64::from(room_count) * period_days;
        let occupied_room_nights: i64 = self.actives.iter().map(|p| p.nights_in_period).sum();

        let total_revenue: Decimal = self
            .actives
            .iter()
            .map(|p| p.revenue_in_period)
            .sum::<Decimal>()
            .round_dp(2);
        let total_taxes: Decimal = self
            .actives
            .iter()
            .map(|p| p.taxes_in_period)
            .sum::<Decimal>()
            .round_dp(2);

        let reservation_count = self.actives.len();
        let occupancy_percent = (Decimal::from(occupied_room_nights)
            / Decimal::from(available_room_nights)
            * Decimal::ONE_HUNDRED)
            .round_dp(2);
        let adr = if occupied_room_nights == 0 {
            Decimal::ZERO
        } else {
            (total_revenue / Decimal::from(occupied_room_nights)).round_dp(2)
        };
        let revpar = (total_revenue / Decimal::from(available_room_nights)).round_dp(2);

        let (average_stay_nights, average_booking_value) = if reservation_count == 0 {
            (Decimal::ZERO, Decimal::ZERO)
        } else {
            let stay_total: i64 = self
                .actives
                .iter()
                .map(|p| p.reservation.stay_nights())
                .sum();
            (
                (Decimal::from(stay_total) / Decimal::from(reservation_count)).round_dp(2),
                (total_revenue / Decimal::from(reservation_count)).round_dp(2),
            )
        };

        StructureMetrics {
            room_count,
            period_days,
            available_room_nights,
            occupied_room_nights,
            occupancy_percent,
            adr,
            revpar,
            total_revenue,
            total_taxes,
            reservation_count,
            average_stay_nights,
            average_booking_value,
        }
    }

    /// The landing-page roll-up for the effective period.
    #[must_use]
    pub fn home_metrics(&self) -> HomeMetrics {
        let structure = self.structure_metrics();
        let profitability = self.profitability();

        let on_books = prorate_all(&self.reservations, &self.effective.following());
        let on_books_revenue: Decimal = on_books
            .iter()
            .map(|p| p.revenue_in_period)
            .sum::<Decimal>()
            .round_dp(2);
        let on_books_nights: i64 = on_books.iter().map(|p| p.nights_in_period).sum();

        // Pacing windows run through the same proration as every other
        // period-scoped figure, so a stay straddling the week boundary
        // splits instead of landing whole on one side.
        let recent = Period::last_days(7, self.effective.end());
        let weekly_pace = Comparison::between(
            self.window_revenue(recent),
            self.window_revenue(recent.preceding()),
        );

        HomeMetrics {
            occupancy_percent: structure.occupancy_percent,
            adr: structure.adr,
            revpar: structure.revpar,
            total_revenue: structure.total_revenue,
            net_profit: profitability.net_profit,
            nights_sold: structure.occupied_room_nights,
            on_books_revenue,
            on_books_nights,
            weekly_pace,
        }
    }

    /// The cash picture for the effective period.
    #[must_use]
    pub fn cash_metrics(&self) -> CashMetrics {
        let live = self.period_transactions.iter().filter(|t| !t.voided);

        let mut inflows = Decimal::ZERO;
        let mut outflows = Decimal::ZERO;
        let mut refunds = Decimal::ZERO;
        let mut adjustments_net = Decimal::ZERO;
        for t in live {
            inflows += t.credits;
            outflows += t.debits;
            if t.refund {
                refunds += t.debits;
            }
            if t.adjustment {
                adjustments_net += t.net_amount();
            }
        }

        let inflows = inflows.round_dp(2);
        let outflows = outflows.round_dp(2);

        let through_end: Decimal = self
            .transactions
            .iter()
            .filter(|t| !t.voided && t.occurred_on() <= self.effective.end())
            .map(|t| t.net_amount())
            .sum();
        let balance_at_period_end = (self.starting_cash_balance + through_end).round_dp(2);

        let guest_payments_recorded: Decimal = self
            .actives
            .iter()
            .map(|p| p.reservation.paid_amount)
            .sum::<Decimal>()
            .round_dp(2);
        let outstanding_balance: Decimal = self
            .actives
            .iter()
            .map(|p| p.reservation.balance_due)
            .sum::<Decimal>()
            .round_dp(2);

        CashMetrics {
            starting_balance: self.starting_cash_balance,
            inflows,
            outflows,
            refunds: refunds.round_dp(2),
            adjustments_net: adjustments_net.round_dp(2),
            net_cash_flow: inflows - outflows,
            balance_at_period_end,
            guest_payments_recorded,
            outstanding_balance,
        }
    }

    /// Channel mix for the effective period, highest revenue first.
    #[must_use]
    pub fn channel_metrics(&self) -> Vec<ChannelMetrics> {
        struct Group {
            channel: String,
            reservation_count: usize,
            nights: i64,
            revenue: Decimal,
        }

        let mut groups: BTreeMap<String, Group> = BTreeMap::new();
        for p in &self.actives {
            let trimmed = p.reservation.source.trim();
            let key = trimmed.to_lowercase();
            let group = groups.entry(key).or_insert_with(|| Group {
                channel: if trimmed.is_empty() {
                    "unknown".to_string()
                } else {
                    trimmed.to_string()
                },
                reservation_count: 0,
                nights: 0,
                revenue: Decimal::ZERO,
            });
            group.reservation_count += 1;
            group.nights += p.nights_in_period;
            group.revenue += p.revenue_in_period;
        }

        let total_revenue: Decimal = groups.values().map(|g| g.revenue).sum();

        let mut rows: Vec<ChannelMetrics> = groups
            .into_values()
            .map(|g| {
                let revenue = g.revenue.round_dp(2);
                let commission_rate = self.policy.resolve_rate(&g.channel, &self.commissions);
                let commission_amount = (g.revenue * commission_rate).round_dp(2);
                let revenue_share_percent = if total_revenue.is_zero() {
                    Decimal::ZERO
                } else {
                    (g.revenue / total_revenue * Decimal::ONE_HUNDRED).round_dp(2)
                };

                ChannelMetrics {
                    is_direct: self.policy.is_direct(&g.channel),
                    channel: g.channel,
                    reservation_count: g.reservation_count,
                    // Groups only form from prorated rows, so nights >= 1.
                    adr: (revenue / Decimal::from(g.nights)).round_dp(2),
                    nights: g.nights,
                    revenue,
                    revenue_share_percent,
                    commission_rate,
                    commission_amount,
                    net_revenue: revenue - commission_amount,
                }
            })
            .collect();
        rows.sort_by(|a, b| b.revenue.cmp(&a.revenue));
        rows
    }

    /// Full P&L for the effective period.
    #[must_use]
    pub fn profitability(&self) -> ProfitabilityMetrics {
        ProfitabilityService::calculate(
            &self.actives,
            &self.cost_model,
            &self.policy,
            &self.commissions,
            self.effective.days(),
        )
    }

    /// Headline figures for an arbitrary window, computed from the records
    /// already loaded. No store round-trip, no fallback.
    #[must_use]
    pub fn window_snapshot(&self, window: Period) -> WindowSnapshot {
        let actives = prorate_all(&self.reservations, &window);
        let profitability = ProfitabilityService::calculate(
            &actives,
            &self.cost_model,
            &self.policy,
            &self.commissions,
            window.days(),
        );

        let available = i64::from(self.cost_model.room_count) * window.days();
        let occupancy_percent = (Decimal::from(profitability.occupied_nights)
            / Decimal::from(available)
            * Decimal::ONE_HUNDRED)
            .round_dp(2);
        let revpar = (profitability.total_revenue / Decimal::from(available)).round_dp(2);

        WindowSnapshot {
            total_revenue: profitability.total_revenue,
            net_profit: profitability.net_profit,
            margin_percent: profitability.margin_percent,
            occupancy_percent,
            adr: profitability.adr,
            revpar,
        }
    }

    fn window_revenue(&self, window: Period) -> Decimal {
        prorate_all(&self.reservations, &window)
            .iter()
            .map(|p| p.revenue_in_period)
            .sum::<Decimal>()
            .round_dp(2)
    }
}
