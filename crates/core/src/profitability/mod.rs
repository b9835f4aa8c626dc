//! Profitability and break-even analysis.

pub mod service;
pub mod types;

#[cfg(test)]
mod props;

pub use service::{ProfitabilityService, calculate_profitability_metrics};
pub use types::{BreakEvenMetrics, ProfitabilityMetrics};
