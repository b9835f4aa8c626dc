//! Channel commission resolution.

pub mod policy;

pub use policy::CommissionPolicy;
