//! Result alias used across carto-core

use crate::error::CartoError;

pub type Result<T> = std::result::Result<T, CartoError>;

pub trait ResultExt<T> {
    /// Drop the error, logging it. Recoverable errors (a bad operator, a
    /// handle into another tree) warn; anything else is logged as an error.
    fn log_and_continue(self) -> Option<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn log_and_continue(self) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(err) if err.is_recoverable() => {
                tracing::warn!("Skipping: {}", err);
                None
            }
            Err(err) => {
                tracing::error!("{}", err);
                None
            }
        }
    }
}
