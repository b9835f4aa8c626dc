//! Engine composition errors.

use innsight_shared::AppError;
use thiserror::Error;

use crate::period::InvalidPeriod;

/// Errors surfaced while building an engine snapshot.
///
/// Everything downstream of a successful `initialize` is infallible; these
/// cover the two ways construction itself can fail.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The requested calculation window is malformed.
    #[error(transparent)]
    InvalidPeriod(#[from] InvalidPeriod),

    /// The store could not deliver the property's records.
    #[error(transparent)]
    Store(#[from] AppError),
}
