//! In-memory store implementation.

use std::collections::HashMap;

use innsight_shared::{AppError, AppResult, types::PropertyId};

use crate::costs::CostSettings;

use super::records::{DataDateRange, DateRange, ImportFile, Reservation, Transaction};
use super::store::PropertyStore;

/// In-memory `PropertyStore`.
///
/// The primary test fixture, and a real option for embedders that already
/// hold a property's records. Build it up front with the `with_*` methods;
/// all reads afterwards are plain `&self` lookups.
///
/// Registered-but-empty properties return empty collections, modeling a
/// property that exists with no data yet. Unregistered properties return
/// `NotFound`, modeling a hard store failure.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    properties: HashMap<PropertyId, PropertyData>,
}

#[derive(Debug, Clone, Default)]
struct PropertyData {
    cost_settings: Option<CostSettings>,
    reservations: Vec<Reservation>,
    transactions: Vec<Transaction>,
    import_files: Vec<ImportFile>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a property with no records.
    #[must_use]
    pub fn with_property(mut self, property: PropertyId) -> Self {
        self.properties.entry(property).or_default();
        self
    }

    /// Saves cost settings for a property, registering it if needed.
    #[must_use]
    pub fn with_cost_settings(mut self, property: PropertyId, settings: CostSettings) -> Self {
        self.properties.entry(property).or_default().cost_settings = Some(settings);
        self
    }

    /// Adds reservations for a property, registering it if needed.
    #[must_use]
    pub fn with_reservations(mut self, property: PropertyId, rows: Vec<Reservation>) -> Self {
        self.properties
            .entry(property)
            .or_default()
            .reservations
            .extend(rows);
        self
    }

    /// Adds transactions for a property, registering it if needed.
    #[must_use]
    pub fn with_transactions(mut self, property: PropertyId, rows: Vec<Transaction>) -> Self {
        self.properties
            .entry(property)
            .or_default()
            .transactions
            .extend(rows);
        self
    }

    /// Adds import-file records for a property, registering it if needed.
    #[must_use]
    pub fn with_import_files(mut self, property: PropertyId, rows: Vec<ImportFile>) -> Self {
        self.properties
            .entry(property)
            .or_default()
            .import_files
            .extend(rows);
        self
    }

    fn data(&self, property: PropertyId) -> AppResult<&PropertyData> {
        self.properties
            .get(&property)
            .ok_or_else(|| AppError::NotFound(format!("property {property}")))
    }
}

impl PropertyStore for MemoryStore {
    async fn cost_settings(&self, property: PropertyId) -> AppResult<Option<CostSettings>> {
        Ok(self.data(property)?.cost_settings.clone())
    }

    async fn import_files(&self, property: PropertyId) -> AppResult<Vec<ImportFile>> {
        Ok(self.data(property)?.import_files.clone())
    }

    async fn all_reservations(&self, property: PropertyId) -> AppResult<Vec<Reservation>> {
        Ok(self.data(property)?.reservations.clone())
    }

    async fn property_reservations(&self, property: PropertyId) -> AppResult<Vec<Reservation>> {
        Ok(self.data(property)?.reservations.clone())
    }

    async fn transactions(&self, property: PropertyId) -> AppResult<Vec<Transaction>> {
        Ok(self.data(property)?.transactions.clone())
    }

    async fn data_date_range(&self, property: PropertyId) -> AppResult<DataDateRange> {
        let data = self.data(property)?;
        Ok(DataDateRange {
            reservations: stay_range(&data.reservations),
            transactions: transaction_range(&data.transactions),
        })
    }
}

// Ranges derive from the stored rows on every call; nothing is cached.

fn stay_range(rows: &[Reservation]) -> Option<DateRange> {
    let earliest = rows.iter().map(|r| r.check_in).min()?;
    let latest = rows.iter().map(|r| r.check_out).max()?;
    Some(DateRange { earliest, latest })
}

fn transaction_range(rows: &[Transaction]) -> Option<DateRange> {
    let earliest = rows.iter().map(Transaction::occurred_on).min()?;
    let latest = rows.iter().map(Transaction::occurred_on).max()?;
    Some(DateRange { earliest, latest })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::records::ReservationStatus;
    use chrono::{NaiveDate, TimeZone, Utc};
    use innsight_shared::types::{PropertyId, ReservationId, TransactionId};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn make_reservation(property: PropertyId, check_in: NaiveDate, nights: i64) -> Reservation {
        Reservation {
            id: ReservationId::new(),
            property_id: property,
            guest_name: "Guest".into(),
            check_in,
            check_out: check_in + chrono::Duration::days(nights),
            status: ReservationStatus::Confirmed,
            room_nights: nights,
            room_revenue_total: dec!(100) * Decimal::from(nights),
            taxes_total: Decimal::ZERO,
            paid_amount: Decimal::ZERO,
            balance_due: Decimal::ZERO,
            source: "direct".into(),
            source_category: None,
            created_at: Utc::now(),
        }
    }

    fn make_transaction(property: PropertyId, on: NaiveDate, credits: Decimal) -> Transaction {
        Transaction {
            id: TransactionId::new(),
            property_id: property,
            occurred_at: Utc
                .from_utc_datetime(&on.and_hms_opt(12, 0, 0).unwrap()),
            credits,
            debits: Decimal::ZERO,
            voided: false,
            refund: false,
            adjustment: false,
            channel: None,
            description: None,
        }
    }

    #[tokio::test]
    async fn test_unregistered_property_is_not_found() {
        let store = MemoryStore::new();
        let err = store.all_reservations(PropertyId::new()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_registered_empty_property_returns_empty_collections() {
        let property = PropertyId::new();
        let store = MemoryStore::new().with_property(property);

        assert!(store.cost_settings(property).await.unwrap().is_none());
        assert!(store.all_reservations(property).await.unwrap().is_empty());
        assert!(store.transactions(property).await.unwrap().is_empty());
        let range = store.data_date_range(property).await.unwrap();
        assert!(range.earliest().is_none());
    }

    #[tokio::test]
    async fn test_date_range_derives_from_stored_rows() {
        let property = PropertyId::new();
        let store = MemoryStore::new()
            .with_reservations(
                property,
                vec![
                    make_reservation(property, d(2026, 1, 10), 3),
                    make_reservation(property, d(2026, 2, 1), 2),
                ],
            )
            .with_transactions(
                property,
                vec![make_transaction(property, d(2025, 12, 30), dec!(50))],
            );

        let range = store.data_date_range(property).await.unwrap();
        assert_eq!(range.reservations.unwrap().earliest, d(2026, 1, 10));
        assert_eq!(range.reservations.unwrap().latest, d(2026, 2, 3));
        assert_eq!(range.transactions.unwrap().latest, d(2025, 12, 30));
        assert_eq!(range.earliest(), Some(d(2025, 12, 30)));
        assert_eq!(range.latest(), Some(d(2026, 2, 3)));
    }
}
