//! Cost configuration records.
//!
//! Properties configure costs in one of two shapes: an itemized list of
//! named entries, or the fixed buckets from the old settings screen.
//! Both shapes survive in stored data; the engine resolves them into a
//! single `CostModel` once at load time.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How often a cost item recurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CostCadence {
    /// Fixed monthly amount (rent, insurance, salaries).
    Monthly,
    /// Incurred once per stay (cleaning, laundry turnover).
    PerStay,
    /// Incurred per occupied night (amenities, utility share).
    PerNight,
}

/// One named cost entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostItem {
    /// Display name.
    pub name: String,
    /// Amount per cadence unit.
    pub amount: Decimal,
    /// How often the amount recurs.
    pub cadence: CostCadence,
}

/// Fixed-cost configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum FixedCosts {
    /// Itemized entries; monthly-cadence items sum into the monthly total.
    Itemized {
        /// The configured entries.
        items: Vec<CostItem>,
    },
    /// The four named buckets from the legacy settings screen. All monthly.
    Legacy {
        /// Staff costs.
        salaries: Decimal,
        /// Rent or mortgage.
        rent: Decimal,
        /// Power, water, connectivity.
        utilities: Decimal,
        /// Everything else.
        other: Decimal,
    },
}

impl Default for FixedCosts {
    fn default() -> Self {
        Self::Legacy {
            salaries: Decimal::ZERO,
            rent: Decimal::ZERO,
            utilities: Decimal::ZERO,
            other: Decimal::ZERO,
        }
    }
}

/// Variable-cost configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum VariableCosts {
    /// Itemized entries of any cadence.
    Itemized {
        /// The configured entries.
        items: Vec<CostItem>,
    },
    /// The legacy fields: a per-stay cleaning cost plus two monthly pools.
    Legacy {
        /// Cleaning cost per stay.
        cleaning_per_stay: Decimal,
        /// Laundry, per month.
        laundry: Decimal,
        /// Guest amenities, per month.
        amenities: Decimal,
    },
}

impl Default for VariableCosts {
    fn default() -> Self {
        Self::Legacy {
            cleaning_per_stay: Decimal::ZERO,
            laundry: Decimal::ZERO,
            amenities: Decimal::ZERO,
        }
    }
}

/// Per-property commission configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommissionSettings {
    /// Property-level fallback rate, used when no channel match exists.
    pub default_rate: Option<Decimal>,
    /// Per-channel overrides, keyed by channel name. Keys are matched
    /// case-insensitively.
    #[serde(default)]
    pub overrides: HashMap<String, Decimal>,
}

/// Per-property cost configuration, as stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostSettings {
    /// Number of sellable rooms.
    pub room_count: u32,
    /// Cash on hand when tracking began; base for the running balance.
    #[serde(default)]
    pub starting_cash_balance: Decimal,
    /// Fixed-cost configuration.
    pub fixed: FixedCosts,
    /// Variable-cost configuration.
    pub variable: VariableCosts,
    /// Commission configuration.
    #[serde(default)]
    pub commissions: CommissionSettings,
    /// Currency code the amounts are stated in. Carried through to
    /// responses, never converted.
    pub currency: String,
}

impl Default for CostSettings {
    fn default() -> Self {
        Self {
            room_count: 1,
            starting_cash_balance: Decimal::ZERO,
            fixed: FixedCosts::default(),
            variable: VariableCosts::default(),
            commissions: CommissionSettings::default(),
            currency: "EUR".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_both_stored_shapes_deserialize() {
        let legacy: CostSettings = serde_json::from_str(
            r#"{
                "room_count": 8,
                "fixed": {"shape": "legacy", "salaries": "70000", "rent": "40000",
                          "utilities": "8000", "other": "2000"},
                "variable": {"shape": "legacy", "cleaning_per_stay": "25",
                             "laundry": "6000", "amenities": "3000"},
                "currency": "EUR"
            }"#,
        )
        .unwrap();
        assert!(matches!(
            legacy.fixed,
            FixedCosts::Legacy { salaries, rent, .. }
                if salaries == dec!(70000) && rent == dec!(40000)
        ));
        assert!(legacy.starting_cash_balance.is_zero());

        let itemized: CostSettings = serde_json::from_str(
            r#"{
                "room_count": 8,
                "fixed": {"shape": "itemized", "items": [
                    {"name": "Rent", "amount": "80000", "cadence": "monthly"}
                ]},
                "variable": {"shape": "itemized", "items": [
                    {"name": "Cleaning", "amount": "25", "cadence": "per_stay"}
                ]},
                "currency": "EUR"
            }"#,
        )
        .unwrap();
        assert!(matches!(itemized.variable, VariableCosts::Itemized { .. }));
        assert!(itemized.commissions.overrides.is_empty());
    }

    #[test]
    fn test_default_settings_are_zeroed() {
        let settings = CostSettings::default();
        assert_eq!(settings.room_count, 1);
        assert!(settings.starting_cash_balance.is_zero());
        assert!(matches!(
            settings.fixed,
            FixedCosts::Legacy { salaries, rent, utilities, other }
                if salaries.is_zero() && rent.is_zero()
                    && utilities.is_zero() && other.is_zero()
        ));
    }
}
