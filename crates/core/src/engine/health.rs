//! Data coverage and the confidence score.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::state::EngineState;

/// How much data stands behind the period's metrics.
///
/// The confidence score starts at 100 and takes additive deductions for
/// each gap: no reservations in the period takes 45, missing cost settings
/// 20, no transactions in the period 15, a fallback period 10, and no
/// recorded imports 10. A bare property bottoms out near zero; any single
/// gap stays above 50.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataHealth {
    /// Reservations ever recorded, all statuses.
    pub reservation_count: usize,
    /// Revenue-bearing reservations contributing nights to the period.
    pub reservations_in_period: usize,
    /// Ledger transactions ever recorded.
    pub transaction_count: usize,
    /// Transactions dated within the period.
    pub transactions_in_period: usize,
    /// Report files imported for the property.
    pub import_file_count: usize,
    /// When the most recent import ran.
    pub last_import_at: Option<DateTime<Utc>>,
    /// Whether cost settings are saved.
    pub has_cost_settings: bool,
    /// Whether the period slid to the latest data window.
    pub used_fallback_period: bool,
    /// 0 to 100; how trustworthy the period's metrics are.
    pub confidence: u8,
}

impl EngineState {
    /// Data coverage behind this snapshot's metrics.
    #[must_use]
    pub fn data_health(&self) -> DataHealth {
        let reservations_in_period = self.actives.len();
        let transactions_in_period = self.period_transactions.len();
        let import_file_count = self.import_files.len();
        let last_import_at = self.import_files.iter().map(|f| f.imported_at).max();

        let mut confidence: u8 = 100;
        if reservations_in_period == 0 {
            confidence = confidence.saturating_sub(45);
        }
        if !self.has_cost_settings {
            confidence = confidence.saturating_sub(20);
        }
        if transactions_in_period == 0 {
            confidence = confidence.saturating_sub(15);
        }
        if self.used_fallback {
            confidence = confidence.saturating_sub(10);
        }
        if import_file_count == 0 {
            confidence = confidence.saturating_sub(10);
        }

        DataHealth {
            reservation_count: self.reservations.len(),
            reservations_in_period,
            transaction_count: self.transactions.len(),
            transactions_in_period,
            import_file_count,
            last_import_at,
            has_cost_settings: self.has_cost_settings,
            used_fallback_period: self.used_fallback,
            confidence,
        }
    }
}
