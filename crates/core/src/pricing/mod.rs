//! Minimum-price simulation.

pub mod simulator;

pub use simulator::{ChannelPrice, MinimumPriceQuote, PricingService, calculate_minimum_price};
