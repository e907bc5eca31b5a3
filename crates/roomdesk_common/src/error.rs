// --- File: crates/roomdesk_common/src/error.rs ---
use std::fmt;
use thiserror::Error;

/// The base error type for Roomdesk startup failures.
///
/// Booking outcomes are not errors at this level: a failed append is reported to the
/// caller inside a normal JSON payload. This type covers loading configuration,
/// binding the listener and running the server.
#[derive(Error, Debug)]
pub enum RoomdeskError {
    /// Missing or invalid configuration
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Socket or file I/O failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    InternalError(String),
}

pub fn config_error<T: fmt::Display>(message: T) -> RoomdeskError {
    RoomdeskError::ConfigError(message.to_string())
}

pub fn internal_error<T: fmt::Display>(message: T) -> RoomdeskError {
    RoomdeskError::InternalError(message.to_string())
}
