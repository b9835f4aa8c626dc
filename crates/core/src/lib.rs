//! Core calculation logic for Innsight.
//!
//! This crate contains pure calculation logic with ZERO web or database
//! dependencies. Records enter through the `PropertyStore` trait; every
//! metric is derived in memory from a frozen snapshot.
//!
//! # Modules
//!
//! - `data` - Property-management records and the store boundary
//! - `period` - The calculation window and its derived windows
//! - `proration` - Splitting stays across window boundaries
//! - `costs` - Cost configuration and per-day/per-night allocation
//! - `commission` - Channel commission resolution
//! - `engine` - The load-once snapshot and its metric accessors
//! - `profitability` - P&L and break-even analysis
//! - `pricing` - Minimum viable rate simulation
//! - `comparison` - Period-over-period change helpers
//! - `command_center` - The aggregate owner dashboard

pub mod command_center;
pub mod commission;
pub mod comparison;
pub mod costs;
pub mod data;
pub mod engine;
pub mod period;
pub mod pricing;
pub mod profitability;
pub mod proration;
