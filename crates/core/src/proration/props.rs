//! Property-based tests for proration.
//!
//! The two load-bearing guarantees: proration never manufactures nights or
//! revenue (conservation), and splitting a window into adjacent pieces
//! never loses a night (additivity).

use chrono::{Duration, NaiveDate, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::data::{Reservation, ReservationStatus};
use crate::period::Period;
use innsight_shared::types::{PropertyId, ReservationId};

use super::prorate;

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()
}

/// Strategy for a check-in date within two years of the base date.
fn check_in_offset() -> impl Strategy<Value = i64> {
    0i64..730
}

/// Strategy for stay lengths (1 to 30 nights).
fn stay_nights() -> impl Strategy<Value = i64> {
    1i64..=30
}

/// Strategy for positive stay revenue (0.01 to 100,000.00).
fn revenue() -> impl Strategy<Value = Decimal> {
    (1i64..10_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn make_reservation(check_in: NaiveDate, nights: i64, revenue: Decimal) -> Reservation {
    Reservation {
        id: ReservationId::new(),
        property_id: PropertyId::new(),
        guest_name: "Guest".into(),
        check_in,
        check_out: check_in + Duration::days(nights),
        status: ReservationStatus::Confirmed,
        room_nights: nights,
        room_revenue_total: revenue,
        taxes_total: Decimal::ZERO,
        paid_amount: Decimal::ZERO,
        balance_due: Decimal::ZERO,
        source: "direct".into(),
        source_category: None,
        created_at: Utc::now(),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// *For any* stay and window, the prorated share SHALL never exceed the
    /// stay's own nights, revenue, or a ratio of 1.
    #[test]
    fn prop_proration_conserves(
        check_in in check_in_offset(),
        nights in stay_nights(),
        amount in revenue(),
        window_start in 0i64..730,
        window_days in 1i64..120,
    ) {
        let reservation = make_reservation(base_date() + Duration::days(check_in), nights, amount);
        let start = base_date() + Duration::days(window_start);
        let period = Period::new(start, start + Duration::days(window_days - 1)).unwrap();

        if let Some(prorated) = prorate(&reservation, &period) {
            prop_assert!(prorated.nights_in_period >= 1);
            prop_assert!(
                prorated.nights_in_period <= nights,
                "{} nights prorated out of a {}-night stay",
                prorated.nights_in_period, nights
            );
            prop_assert!(prorated.ratio <= Decimal::ONE);
            prop_assert!(prorated.ratio > Decimal::ZERO);
            prop_assert!(
                prorated.revenue_in_period <= amount,
                "prorated revenue {} exceeds stay revenue {}",
                prorated.revenue_in_period, amount
            );
        }
    }

    /// *For any* stay fully inside the window, proration SHALL pass nights
    /// and revenue through exactly.
    #[test]
    fn prop_full_containment_is_identity(
        check_in in 30i64..700,
        nights in stay_nights(),
        amount in revenue(),
    ) {
        let check_in = base_date() + Duration::days(check_in);
        let reservation = make_reservation(check_in, nights, amount);
        let period = Period::new(
            check_in - Duration::days(5),
            check_in + Duration::days(nights + 5),
        ).unwrap();

        let prorated = prorate(&reservation, &period).unwrap();
        prop_assert_eq!(prorated.nights_in_period, nights);
        prop_assert_eq!(prorated.ratio, Decimal::ONE);
        prop_assert_eq!(prorated.revenue_in_period, amount);
    }

    /// *For any* stay and any split point, prorating into two adjacent
    /// windows SHALL yield exactly the nights of prorating into their union,
    /// and revenue within rounding distance.
    #[test]
    fn prop_adjacent_windows_are_additive(
        check_in in 100i64..600,
        nights in stay_nights(),
        amount in revenue(),
        split in 1i64..89,
    ) {
        let check_in = base_date() + Duration::days(check_in);
        let reservation = make_reservation(check_in, nights, amount);

        // A 90-day union that always contains the stay's possible overlap.
        let union_start = check_in - Duration::days(30);
        let union = Period::new(union_start, union_start + Duration::days(89)).unwrap();
        let left = Period::new(union_start, union_start + Duration::days(split - 1)).unwrap();
        let right = Period::new(union_start + Duration::days(split), union.end()).unwrap();

        let whole = prorate(&reservation, &union);
        let parts: Vec<_> = [left, right]
            .iter()
            .filter_map(|w| prorate(&reservation, w))
            .collect();

        let whole_nights = whole.as_ref().map_or(0, |p| p.nights_in_period);
        let part_nights: i64 = parts.iter().map(|p| p.nights_in_period).sum();
        prop_assert_eq!(part_nights, whole_nights, "night partition must be exact");

        let whole_revenue = whole.as_ref().map_or(Decimal::ZERO, |p| p.revenue_in_period);
        let part_revenue: Decimal = parts.iter().map(|p| p.revenue_in_period).sum();
        let drift = (part_revenue - whole_revenue).abs();
        prop_assert!(
            drift < dec!(0.000001),
            "revenue split drifted by {} ({} vs {})",
            drift, part_revenue, whole_revenue
        );
    }
}
