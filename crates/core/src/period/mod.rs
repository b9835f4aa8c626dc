//! Calculation windows.

pub mod window;

pub use window::{InvalidPeriod, Period};
