//! Logging bootstrap errors

use thiserror::Error;

/// Result alias for logging setup.
pub type LogResult<T> = Result<T, LogError>;

/// Errors raised while installing the global subscriber.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LogError {
    /// The filter directive could not be parsed.
    #[error("Invalid filter directive: {0}")]
    Filter(String),

    /// A global subscriber was already installed.
    #[error("A global tracing subscriber is already installed")]
    AlreadyInitialized,
}
