//! Property-based tests for profitability and break-even.

use chrono::{Duration, NaiveDate, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::commission::CommissionPolicy;
use crate::costs::{CommissionSettings, CostModel, CostSettings, FixedCosts, VariableCosts};
use crate::data::{Reservation, ReservationStatus};
use crate::period::Period;
use crate::proration::prorate_all;
use innsight_shared::types::{PropertyId, ReservationId};

use super::service::ProfitabilityService;

const SOURCES: [&str; 5] = ["Booking.com", "direct", "Expedia", "Airbnb", "walk-in"];

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 1).unwrap()
}

/// Strategy for one stay: (check-in offset, nights, revenue, source index).
fn stay() -> impl Strategy<Value = (i64, i64, Decimal, usize)> {
    (
        0i64..60,
        1i64..=14,
        (100i64..5_000_000i64).prop_map(|cents| Decimal::new(cents, 2)),
        0usize..SOURCES.len(),
    )
}

/// Strategy for a reservation set of 0 to 20 stays.
fn stays() -> impl Strategy<Value = Vec<(i64, i64, Decimal, usize)>> {
    prop::collection::vec(stay(), 0..20)
}

/// Strategy for monthly fixed costs.
fn fixed_monthly() -> impl Strategy<Value = Decimal> {
    (0i64..20_000_00i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn build_reservations(seeds: &[(i64, i64, Decimal, usize)]) -> Vec<Reservation> {
    seeds
        .iter()
        .map(|(offset, nights, revenue, source)| {
            let check_in = base_date() + Duration::days(*offset);
            Reservation {
                id: ReservationId::new(),
                property_id: PropertyId::new(),
                guest_name: "Guest".into(),
                check_in,
                check_out: check_in + Duration::days(*nights),
                status: ReservationStatus::Confirmed,
                room_nights: *nights,
                room_revenue_total: *revenue,
                taxes_total: Decimal::ZERO,
                paid_amount: Decimal::ZERO,
                balance_due: Decimal::ZERO,
                source: SOURCES[*source].into(),
                source_category: None,
                created_at: Utc::now(),
            }
        })
        .collect()
}

fn model_with_fixed(room_count: u32, monthly: Decimal) -> CostModel {
    CostModel::resolve(&CostSettings {
        room_count,
        fixed: FixedCosts::Legacy {
            salaries: Decimal::ZERO,
            rent: monthly,
            utilities: Decimal::ZERO,
            other: Decimal::ZERO,
        },
        variable: VariableCosts::Legacy {
            cleaning_per_stay: Decimal::new(25, 0),
            laundry: Decimal::new(600, 0),
            amenities: Decimal::new(300, 0),
        },
        ..CostSettings::default()
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(150))]

    /// *For any* reservation set and cost level, the reported net profit
    /// SHALL equal revenue minus the three reported cost lines exactly.
    #[test]
    fn prop_identity_is_exact(
        seeds in stays(),
        monthly in fixed_monthly(),
        room_count in 1u32..40,
    ) {
        let period = Period::new(base_date(), base_date() + Duration::days(89)).unwrap();
        let reservations = build_reservations(&seeds);
        let actives = prorate_all(&reservations, &period);
        let model = model_with_fixed(room_count, monthly);

        let metrics = ProfitabilityService::calculate(
            &actives,
            &model,
            &CommissionPolicy::default(),
            &CommissionSettings::default(),
            period.days(),
        );

        prop_assert_eq!(
            metrics.net_profit,
            metrics.total_revenue
                - metrics.total_fixed_costs
                - metrics.total_variable_costs
                - metrics.total_commissions,
            "identity must hold on reported figures"
        );
    }

    /// *For any* positive contribution, raising fixed costs SHALL never
    /// lower the required nights or the break-even occupancy.
    #[test]
    fn prop_break_even_monotone_in_fixed_costs(
        adr in (50_00i64..500_00i64).prop_map(|c| Decimal::new(c, 2)),
        variable in (0i64..20_00i64).prop_map(|c| Decimal::new(c, 2)),
        rate in (0i64..30i64).prop_map(|p| Decimal::new(p, 2)),
        low in fixed_monthly(),
        bump in fixed_monthly(),
        room_count in 1u32..40,
    ) {
        let lower = model_with_fixed(room_count, low);
        let higher = model_with_fixed(room_count, low + bump);

        let at_low = ProfitabilityService::break_even(adr, variable, rate, &lower, 30, 0);
        let at_high = ProfitabilityService::break_even(adr, variable, rate, &higher, 30, 0);

        // ADR of at least 50 at a commission of at most 30% and variable of
        // at most 20 always leaves a positive contribution.
        prop_assert!(!at_low.is_impossible);
        prop_assert!(!at_high.is_impossible);
        prop_assert!(
            at_high.required_nights >= at_low.required_nights,
            "required nights fell from {} to {} as fixed costs rose",
            at_low.required_nights, at_high.required_nights
        );
        prop_assert!(
            at_high.break_even_occupancy_percent >= at_low.break_even_occupancy_percent,
            "break-even occupancy fell from {} to {} as fixed costs rose",
            at_low.break_even_occupancy_percent, at_high.break_even_occupancy_percent
        );
    }

    /// *For any* cost level, an empty window SHALL report zero revenue and
    /// zero ratio metrics while fixed costs still accrue.
    #[test]
    fn prop_empty_window_reports_zeroes(
        monthly in fixed_monthly(),
        room_count in 1u32..40,
    ) {
        let model = model_with_fixed(room_count, monthly);
        let metrics = ProfitabilityService::calculate(
            &[],
            &model,
            &CommissionPolicy::default(),
            &CommissionSettings::default(),
            30,
        );

        prop_assert_eq!(metrics.total_revenue, Decimal::ZERO);
        prop_assert_eq!(metrics.adr, Decimal::ZERO);
        prop_assert_eq!(metrics.margin_percent, Decimal::ZERO);
        prop_assert_eq!(metrics.total_fixed_costs, model.period_fixed(30).round_dp(2));
    }
}
