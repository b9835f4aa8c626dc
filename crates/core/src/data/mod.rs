//! Records the engine consumes and the boundary it consumes them through.

pub mod memory;
pub mod records;
pub mod store;

pub use memory::MemoryStore;
pub use records::{
    DataDateRange, DateRange, ImportFile, Reservation, ReservationStatus, Transaction,
};
pub use store::PropertyStore;
