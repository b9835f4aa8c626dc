//! The overlap computation itself.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::data::Reservation;
use crate::period::Period;

/// A reservation's share attributable to one calculation window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProratedReservation {
    /// The reservation as stored, untouched.
    pub reservation: Reservation,
    /// Nights of the stay that fall inside the window.
    pub nights_in_period: i64,
    /// Revenue attributable to the window.
    pub revenue_in_period: Decimal,
    /// Taxes attributable to the window.
    pub taxes_in_period: Decimal,
    /// Fraction of the stay inside the window, in (0, 1].
    pub ratio: Decimal,
}

/// Prorates a reservation into a window.
///
/// Returns `None` for cancelled and no-show reservations and for stays
/// with no night inside the window. Nights are whole days between the
/// clamped bounds;
/// the checkout day itself is not a night. Monetary fields scale by
/// `nights_in_period / stay_nights`, so a fully contained stay passes its
/// revenue through unchanged.
#[must_use]
pub fn prorate(reservation: &Reservation, period: &Period) -> Option<ProratedReservation> {
    if !reservation.is_active() {
        return None;
    }

    let overlap_start = reservation.check_in.max(period.start());
    let overlap_end = reservation.check_out.min(period.end_exclusive());
    let nights_in_period = (overlap_end - overlap_start).num_days();
    if nights_in_period <= 0 {
        return None;
    }

    // stay_nights() is clamped to >= 1, and the overlap can never exceed
    // the stay span, so the ratio stays in (0, 1] without further guards.
    let ratio = Decimal::from(nights_in_period) / Decimal::from(reservation.stay_nights());

    Some(ProratedReservation {
        nights_in_period,
        revenue_in_period: reservation.room_revenue_total * ratio,
        taxes_in_period: reservation.taxes_total * ratio,
        ratio,
        reservation: reservation.clone(),
    })
}

/// Prorates every overlapping revenue-bearing reservation into the window.
#[must_use]
pub fn prorate_all(reservations: &[Reservation], period: &Period) -> Vec<ProratedReservation> {
    reservations
        .iter()
        .filter_map(|r| prorate(r, period))
        .collect()
}
