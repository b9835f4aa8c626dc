//! The data-access boundary.
//!
//! Everything the engine knows about a property enters through this trait.
//! Implementations are expected to hand back plain rows; filtering,
//! proration, and aggregation all happen engine-side. The engine never
//! caches results across calls, so repeated initializations always reflect
//! the store's current contents.

use std::future::Future;

use innsight_shared::{AppResult, types::PropertyId};

use crate::costs::CostSettings;

use super::records::{DataDateRange, ImportFile, Reservation, Transaction};

/// Read-only access to one property's records.
///
/// Methods return `impl Future + Send` so the engine can run loads
/// concurrently from multi-threaded runtimes; implementations write plain
/// `async fn`.
pub trait PropertyStore: Send + Sync {
    /// Loads the property's cost configuration, if any was ever saved.
    fn cost_settings(
        &self,
        property: PropertyId,
    ) -> impl Future<Output = AppResult<Option<CostSettings>>> + Send;

    /// Loads metadata for every report file imported for the property.
    fn import_files(
        &self,
        property: PropertyId,
    ) -> impl Future<Output = AppResult<Vec<ImportFile>>> + Send;

    /// Loads every reservation ever recorded for the property, all statuses
    /// included. The engine's period scoping and fallback derivation need
    /// the full history.
    fn all_reservations(
        &self,
        property: PropertyId,
    ) -> impl Future<Output = AppResult<Vec<Reservation>>> + Send;

    /// Loads the property's reservations for the lighter consumers (the
    /// pricing simulator and channel summaries), which never look at the
    /// period machinery.
    fn property_reservations(
        &self,
        property: PropertyId,
    ) -> impl Future<Output = AppResult<Vec<Reservation>>> + Send;

    /// Loads every ledger transaction recorded for the property.
    fn transactions(
        &self,
        property: PropertyId,
    ) -> impl Future<Output = AppResult<Vec<Transaction>>> + Send;

    /// Reports the observed date extent of the property's data. Only the
    /// fallback-period path asks for this.
    fn data_date_range(
        &self,
        property: PropertyId,
    ) -> impl Future<Output = AppResult<DataDateRange>> + Send;
}
