//! Cost configuration and allocation.
//!
//! - Stored configuration records, in both shapes properties have
//! - One-time resolution into the `CostModel` rates everything else reads

pub mod allocation;
pub mod types;

pub use allocation::{ASSUMED_STAY_NIGHTS, AVERAGE_MONTH_DAYS, CostModel};
pub use types::{
    CommissionSettings, CostCadence, CostItem, CostSettings, FixedCosts, VariableCosts,
};
