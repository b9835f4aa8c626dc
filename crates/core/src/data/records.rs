//! Property-management records the engine consumes.
//!
//! These are read-model rows as a store hands them over: already imported,
//! already deduplicated. The engine never mutates them.

use chrono::{DateTime, NaiveDate, Utc};
use innsight_shared::types::{ImportFileId, PropertyId, ReservationId, TransactionId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Lifecycle status of a reservation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    /// Booked and not yet arrived.
    Confirmed,
    /// Guest is currently in house.
    CheckedIn,
    /// Stay completed.
    CheckedOut,
    /// Cancelled before arrival.
    Cancelled,
    /// Guest never arrived.
    NoShow,
}

impl ReservationStatus {
    /// Returns true when reservations in this status count toward revenue,
    /// occupancy, and costs. Cancellations and no-shows never do.
    #[must_use]
    pub fn carries_revenue(self) -> bool {
        !matches!(self, Self::Cancelled | Self::NoShow)
    }
}

/// A reservation row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    /// Unique identifier.
    pub id: ReservationId,
    /// Property this reservation belongs to.
    pub property_id: PropertyId,
    /// Guest display name.
    pub guest_name: String,
    /// Arrival date.
    pub check_in: NaiveDate,
    /// Departure date.
    pub check_out: NaiveDate,
    /// Lifecycle status.
    pub status: ReservationStatus,
    /// Room-nights as stored by the property-management system. Kept for
    /// reference; night math derives from the stay dates, which survive
    /// import errors better than this denormalized column.
    pub room_nights: i64,
    /// Total room revenue for the whole stay, before taxes.
    pub room_revenue_total: Decimal,
    /// Total taxes for the whole stay.
    pub taxes_total: Decimal,
    /// Amount the guest has paid so far.
    pub paid_amount: Decimal,
    /// Amount still owed.
    pub balance_due: Decimal,
    /// Booking channel as recorded (free text, e.g. "Booking.com").
    pub source: String,
    /// Channel taxonomy label assigned at import, when present.
    pub source_category: Option<String>,
    /// When the booking was taken.
    pub created_at: DateTime<Utc>,
}

impl Reservation {
    /// Nights in the stay, derived from the dates, never less than 1.
    ///
    /// Same-day and inverted date pairs collapse to a single night so this
    /// is always a safe divisor.
    #[must_use]
    pub fn stay_nights(&self) -> i64 {
        (self.check_out - self.check_in).num_days().max(1)
    }

    /// Returns true when the reservation counts toward revenue and
    /// occupancy.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status.carries_revenue()
    }
}

/// A ledger transaction row.
///
/// Credits are money in, debits are money out; both are non-negative as
/// stored. Voided rows stay in the feed but are excluded from every cash
/// figure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier.
    pub id: TransactionId,
    /// Property this transaction belongs to.
    pub property_id: PropertyId,
    /// When the transaction occurred.
    pub occurred_at: DateTime<Utc>,
    /// Money in.
    pub credits: Decimal,
    /// Money out.
    pub debits: Decimal,
    /// Whether the row was voided after posting.
    pub voided: bool,
    /// Whether this is a refund to a guest.
    pub refund: bool,
    /// Whether this is a manual correction.
    pub adjustment: bool,
    /// Booking channel the transaction is attributed to, when known.
    pub channel: Option<String>,
    /// Free-text description.
    pub description: Option<String>,
}

impl Transaction {
    /// The calendar date this transaction occurred on.
    #[must_use]
    pub fn occurred_on(&self) -> NaiveDate {
        self.occurred_at.date_naive()
    }

    /// Signed cash movement: credits minus debits.
    #[must_use]
    pub fn net_amount(&self) -> Decimal {
        self.credits - self.debits
    }
}

/// Metadata for one imported report file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportFile {
    /// Unique identifier.
    pub id: ImportFileId,
    /// Property the file was imported for.
    pub property_id: PropertyId,
    /// Original file name.
    pub file_name: String,
    /// Report type as detected by the importer, when known.
    pub report_type: Option<String>,
    /// When the import ran.
    pub imported_at: DateTime<Utc>,
    /// Rows ingested from the file.
    pub row_count: i64,
    /// Parser summary captured at import time (per-section counts,
    /// warnings). Shape varies by report type.
    pub metadata: Option<serde_json::Value>,
}

/// Earliest and latest observed dates for one record family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    /// Earliest observed date.
    pub earliest: NaiveDate,
    /// Latest observed date.
    pub latest: NaiveDate,
}

/// Observed date extent of a property's data, per record family.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct DataDateRange {
    /// Extent of reservation stays (check-in through check-out).
    pub reservations: Option<DateRange>,
    /// Extent of transaction dates.
    pub transactions: Option<DateRange>,
}

impl DataDateRange {
    /// Earliest date observed in any record family.
    #[must_use]
    pub fn earliest(&self) -> Option<NaiveDate> {
        let reservations = self.reservations.map(|r| r.earliest);
        let transactions = self.transactions.map(|t| t.earliest);
        match (reservations, transactions) {
            (Some(r), Some(t)) => Some(r.min(t)),
            (one, other) => one.or(other),
        }
    }

    /// Latest date observed in any record family.
    #[must_use]
    pub fn latest(&self) -> Option<NaiveDate> {
        let reservations = self.reservations.map(|r| r.latest);
        let transactions = self.transactions.map(|t| t.latest);
        match (reservations, transactions) {
            (Some(r), Some(t)) => Some(r.max(t)),
            (one, other) => one.or(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn make_reservation(check_in: NaiveDate, check_out: NaiveDate) -> Reservation {
        Reservation {
            id: ReservationId::new(),
            property_id: PropertyId::new(),
            guest_name: "Ana Torres".into(),
            check_in,
            check_out,
            status: ReservationStatus::Confirmed,
            room_nights: 0,
            room_revenue_total: dec!(100),
            taxes_total: Decimal::ZERO,
            paid_amount: Decimal::ZERO,
            balance_due: dec!(100),
            source: "direct".into(),
            source_category: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_stay_nights_from_dates() {
        let r = make_reservation(d(2026, 3, 1), d(2026, 3, 4));
        assert_eq!(r.stay_nights(), 3);
    }

    #[test]
    fn test_stay_nights_never_below_one() {
        let same_day = make_reservation(d(2026, 3, 1), d(2026, 3, 1));
        assert_eq!(same_day.stay_nights(), 1);

        let inverted = make_reservation(d(2026, 3, 4), d(2026, 3, 1));
        assert_eq!(inverted.stay_nights(), 1);
    }

    #[test]
    fn test_cancelled_and_no_show_are_not_active() {
        let mut r = make_reservation(d(2026, 3, 1), d(2026, 3, 4));
        assert!(r.is_active());

        r.status = ReservationStatus::Cancelled;
        assert!(!r.is_active());

        r.status = ReservationStatus::NoShow;
        assert!(!r.is_active());
    }

    #[test]
    fn test_data_date_range_overall_bounds() {
        let range = DataDateRange {
            reservations: Some(DateRange {
                earliest: d(2026, 1, 5),
                latest: d(2026, 4, 10),
            }),
            transactions: Some(DateRange {
                earliest: d(2025, 12, 20),
                latest: d(2026, 3, 1),
            }),
        };
        assert_eq!(range.earliest(), Some(d(2025, 12, 20)));
        assert_eq!(range.latest(), Some(d(2026, 4, 10)));

        let empty = DataDateRange::default();
        assert_eq!(empty.earliest(), None);
        assert_eq!(empty.latest(), None);
    }
}
