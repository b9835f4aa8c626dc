//! The owner dashboard aggregate.
//!
//! One call assembles everything the daily screen shows: headline metrics
//! with period-over-period and year-over-year context, break-even position,
//! unit economics, channel mix, cash, data health, and a single recommended
//! action. Building never fails; problems degrade to an empty shape.

pub mod service;
pub mod types;


pub use types::{
    ActionCode, BreakEvenPanel, CommandCenter, HealthSnapshot, PeriodOverview, RecommendedAction,
    UnitEconomics,
};
