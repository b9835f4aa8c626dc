//! The immutable engine snapshot.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{info, warn};

use innsight_shared::types::PropertyId;

use crate::commission::CommissionPolicy;
use crate::costs::{CommissionSettings, CostModel, CostSettings};
use crate::data::{ImportFile, PropertyStore, Reservation, Transaction};
use crate::period::Period;
use crate::proration::{ProratedReservation, prorate_all};

use super::error::EngineError;

/// One property's records, loaded once and frozen.
///
/// `initialize` does all the fetching, period resolution, and cost-model
/// resolution up front; every metric afterwards is a pure `&self` read over
/// this snapshot. Nothing is refetched or recomputed, so two accessors
/// called at different times can never disagree about the underlying data.
#[derive(Debug, Clone)]
pub struct EngineState {
    pub(super) property_id: PropertyId,
    pub(super) requested: Period,
    pub(super) effective: Period,
    pub(super) used_fallback: bool,
    pub(super) policy: CommissionPolicy,
    pub(super) commissions: CommissionSettings,
    pub(super) currency: String,
    pub(super) starting_cash_balance: Decimal,
    pub(super) has_cost_settings: bool,
    pub(super) cost_model: CostModel,
    /// Every reservation ever recorded, all statuses.
    pub(super) reservations: Vec<Reservation>,
    /// Revenue-bearing reservations prorated into the effective period.
    pub(super) actives: Vec<ProratedReservation>,
    /// Every ledger transaction ever recorded.
    pub(super) transactions: Vec<Transaction>,
    /// Transactions dated within the effective period, voided included;
    /// cash aggregation filters voided rows itself.
    pub(super) period_transactions: Vec<Transaction>,
    pub(super) import_files: Vec<ImportFile>,
}

impl EngineState {
    /// Loads a property's records and freezes a calculation snapshot.
    ///
    /// Cost settings, import files, and the reservation history load
    /// concurrently; transactions follow. When neither a stay night nor a
    /// transaction falls inside `requested`, the effective period slides
    /// back to the latest window that holds data (see
    /// [`Self::is_using_fallback_period`]).
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Store`] when the store fails; an engine is
    /// never built on partial data.
    pub async fn initialize<S: PropertyStore>(
        store: &S,
        property_id: PropertyId,
        requested: Period,
        policy: CommissionPolicy,
    ) -> Result<Self, EngineError> {
        let (settings, import_files, reservations) = tokio::try_join!(
            store.cost_settings(property_id),
            store.import_files(property_id),
            store.all_reservations(property_id),
        )?;
        let transactions = store.transactions(property_id).await?;

        let has_cost_settings = settings.is_some();
        let settings = settings.unwrap_or_default();
        let cost_model = CostModel::resolve(&settings);

        let (effective, used_fallback) = resolve_effective_period(
            store,
            property_id,
            requested,
            &reservations,
            &transactions,
        )
        .await?;

        let actives = prorate_all(&reservations, &effective);
        let period_transactions: Vec<Transaction> = transactions
            .iter()
            .filter(|t| effective.contains(t.occurred_on()))
            .cloned()
            .collect();

        info!(
            property_id = %property_id,
            start = %effective.start(),
            end = %effective.end(),
            reservations = actives.len(),
            transactions = period_transactions.len(),
            has_cost_settings,
            "Engine initialized"
        );

        let CostSettings {
            commissions,
            currency,
            starting_cash_balance,
            ..
        } = settings;

        Ok(Self {
            property_id,
            requested,
            effective,
            used_fallback,
            policy,
            commissions,
            currency,
            starting_cash_balance,
            has_cost_settings,
            cost_model,
            reservations,
            actives,
            transactions,
            period_transactions,
            import_files,
        })
    }

    /// Property this snapshot was built for.
    #[must_use]
    pub const fn property_id(&self) -> PropertyId {
        self.property_id
    }

    /// The window metrics are actually computed over.
    #[must_use]
    pub const fn effective_period(&self) -> Period {
        self.effective
    }

    /// The window the caller originally asked for.
    #[must_use]
    pub const fn requested_period(&self) -> Period {
        self.requested
    }

    /// True when the effective period was derived from the data instead of
    /// the request.
    #[must_use]
    pub const fn is_using_fallback_period(&self) -> bool {
        self.used_fallback
    }

    /// Whether the property has saved cost settings. When false, the cost
    /// model is all zeros and cost-side metrics degrade accordingly.
    #[must_use]
    pub const fn has_cost_settings(&self) -> bool {
        self.has_cost_settings
    }

    /// The resolved cost model this snapshot calculates with.
    #[must_use]
    pub const fn cost_model(&self) -> &CostModel {
        &self.cost_model
    }

    /// Currency code carried by the cost settings. Display metadata only;
    /// no metric converts between currencies.
    #[must_use]
    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// The revenue-bearing reservations prorated into the effective period.
    #[must_use]
    pub fn prorated_reservations(&self) -> &[ProratedReservation] {
        &self.actives
    }
}

/// Resolves the window the engine will calculate over.
///
/// The requested window stands whenever any stay night or transaction falls
/// inside it. Otherwise the window slides to end at the newest data date,
/// keeping its length. Transactions anchor first: ledger dates keep flowing
/// even when reservation imports lag. The slid window is clamped so it
/// never starts before the earliest observed data; a property with no data
/// at all keeps the requested window un-flagged.
async fn resolve_effective_period<S: PropertyStore>(
    store: &S,
    property_id: PropertyId,
    requested: Period,
    reservations: &[Reservation],
    transactions: &[Transaction],
) -> Result<(Period, bool), EngineError> {
    if has_data_in(requested, reservations, transactions) {
        return Ok((requested, false));
    }

    let anchor = transactions
        .iter()
        .map(Transaction::occurred_on)
        .max()
        .or_else(|| latest_checkout(reservations));
    let Some(anchor) = anchor else {
        return Ok((requested, false));
    };

    let mut effective = Period::last_days(requested.days(), anchor);
    if let Some(earliest) = store.data_date_range(property_id).await?.earliest() {
        effective = effective.clamped_to(earliest);
    }

    warn!(
        property_id = %property_id,
        requested_start = %requested.start(),
        requested_end = %requested.end(),
        effective_start = %effective.start(),
        effective_end = %effective.end(),
        "No data in requested period, falling back to latest data window"
    );

    Ok((effective, true))
}

fn has_data_in(
    period: Period,
    reservations: &[Reservation],
    transactions: &[Transaction],
) -> bool {
    reservations
        .iter()
        .any(|r| r.is_active() && stay_intersects(r, period))
        || transactions.iter().any(|t| period.contains(t.occurred_on()))
}

// Night-level intersection, mirroring the proration overlap math: at least
// one occupied night inside the window. Same-day rows have no night and do
// not count.
fn stay_intersects(reservation: &Reservation, period: Period) -> bool {
    let overlap_start = reservation.check_in.max(period.start());
    let overlap_end = reservation.check_out.min(period.end_exclusive());
    overlap_end > overlap_start
}

fn latest_checkout(reservations: &[Reservation]) -> Option<NaiveDate> {
    reservations
        .iter()
        .filter(|r| r.is_active())
        .map(|r| r.check_out)
        .max()
}
