//! Resolving stored cost configuration into usable rates.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::{CostCadence, CostItem, CostSettings, FixedCosts, VariableCosts};

/// Average days per month used by every monthly-to-daily conversion: 30.44,
/// the mean Gregorian month. Never 30 or 31.
pub const AVERAGE_MONTH_DAYS: Decimal = Decimal::from_parts(3044, 0, 0, false, 2);

/// Assumed average stay length (nights) when no occupancy data exists to
/// derive one.
// TODO: confirm the three-night assumption with ops; it predates the
// itemized cost model and has never been revisited.
pub const ASSUMED_STAY_NIGHTS: Decimal = Decimal::from_parts(3, 0, 0, false, 0);

/// Cost configuration resolved into per-day and per-night rates.
///
/// Resolution happens once, at engine initialization. Both stored shapes
/// collapse into the same fields here, so nothing downstream ever matches
/// on the configuration shape again. Rates keep full precision; rounding
/// happens at the response edge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostModel {
    /// Sellable rooms, clamped to at least 1 so per-room divisions are
    /// safe by construction.
    pub room_count: u32,
    /// Total fixed costs per month.
    pub fixed_monthly: Decimal,
    /// Fixed costs per calendar day.
    pub fixed_per_day: Decimal,
    /// Cleaning cost incurred once per stay.
    pub cleaning_per_stay: Decimal,
    /// Monthly pool of variable costs that are neither per-stay nor
    /// per-night.
    pub variable_monthly: Decimal,
    /// Variable cost per occupied night before the cleaning component:
    /// the monthly pool spread over available room-nights, plus any
    /// per-night items.
    pub variable_per_night_base: Decimal,
}

impl CostModel {
    /// Resolves stored settings into rates.
    #[must_use]
    pub fn resolve(settings: &CostSettings) -> Self {
        let room_count = settings.room_count.max(1);

        let fixed_monthly = match &settings.fixed {
            // Fixed entries are monthly by nature; items saved with another
            // cadence are a configuration error and do not count.
            FixedCosts::Itemized { items } => cadence_sum(items, CostCadence::Monthly),
            FixedCosts::Legacy {
                salaries,
                rent,
                utilities,
                other,
            } => salaries + rent + utilities + other,
        };

        let (cleaning_per_stay, variable_monthly, per_night_items) = match &settings.variable {
            VariableCosts::Itemized { items } => (
                cadence_sum(items, CostCadence::PerStay),
                cadence_sum(items, CostCadence::Monthly),
                cadence_sum(items, CostCadence::PerNight),
            ),
            VariableCosts::Legacy {
                cleaning_per_stay,
                laundry,
                amenities,
            } => (*cleaning_per_stay, laundry + amenities, Decimal::ZERO),
        };

        let fixed_per_day = fixed_monthly / AVERAGE_MONTH_DAYS;
        let variable_per_night_base =
            variable_monthly / AVERAGE_MONTH_DAYS / Decimal::from(room_count) + per_night_items;

        Self {
            room_count,
            fixed_monthly,
            fixed_per_day,
            cleaning_per_stay,
            variable_monthly,
            variable_per_night_base,
        }
    }

    /// Fixed costs attributable to a window of `days` calendar days.
    #[must_use]
    pub fn period_fixed(&self, days: i64) -> Decimal {
        self.fixed_per_day * Decimal::from(days)
    }

    /// Fixed cost per room per day: the allocation rate loaded onto an
    /// occupied night. Empty rooms keep their share; it is not shifted
    /// onto sold nights.
    #[must_use]
    pub fn fixed_per_room_day(&self) -> Decimal {
        self.fixed_per_day / Decimal::from(self.room_count)
    }

    /// Variable cost per occupied night, spreading the per-stay cleaning
    /// cost over the average nights per reservation in scope.
    ///
    /// With the average passed (clamped to at least one night), the nights
    /// in scope collectively bear exactly one cleaning per reservation.
    /// Callers with nothing to average fall back to the assumed three-night
    /// stay.
    #[must_use]
    pub fn variable_per_night(&self, avg_nights: Option<Decimal>) -> Decimal {
        let avg = avg_nights.map_or(ASSUMED_STAY_NIGHTS, |s| s.max(Decimal::ONE));
        self.variable_per_night_base + self.cleaning_per_stay / avg
    }
}

impl Default for CostModel {
    /// The all-zero model used when a property has no cost configuration.
    fn default() -> Self {
        Self::resolve(&CostSettings::default())
    }
}

fn cadence_sum(items: &[CostItem], cadence: CostCadence) -> Decimal {
    items
        .iter()
        .filter(|item| item.cadence == cadence)
        .map(|item| item.amount)
        .sum()
}
