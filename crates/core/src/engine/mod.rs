//! The calculation engine: load once, read many.
//!
//! [`EngineState::initialize`] pulls a property's records through the store
//! trait, resolves the calculation window (falling back to the latest data
//! window when the requested one is empty), and freezes a snapshot. Every
//! metric accessor is then a pure `&self` read.

pub mod economics;
pub mod error;
pub mod health;
pub mod metrics;
pub mod state;


pub use economics::{EconomicsFilter, EconomicsSummary, ReservationEconomics};
pub use error::EngineError;
pub use health::DataHealth;
pub use metrics::{CashMetrics, ChannelMetrics, HomeMetrics, StructureMetrics, WindowSnapshot};
pub use state::EngineState;
