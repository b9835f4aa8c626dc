//! Period-over-period comparisons.

pub mod change;

pub use change::{Comparison, Trend};
