//! Stay-to-period proration.
//!
//! Every period-scoped number in the engine flows through [`prorate`]:
//! occupancy, revenue, profitability, channel mix, and the command center
//! all scope reservations to a window with this one primitive, so they can
//! never disagree about what "in the period" means.

pub mod overlap;

#[cfg(test)]
mod props;

pub use overlap::{ProratedReservation, prorate, prorate_all};
