//! Future error types

use thiserror::Error;

/// Result type alias for future outcomes
pub type Result<T> = std::result::Result<T, FutureError>;

/// Errors carried in the outcome slot of a [`Future`](crate::Future).
///
/// A timed-out wait is not an error: bounded retrieval reports it
/// out-of-band as `None`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FutureError {
    #[error("Computation failed: {0}")]
    Computation(String),

    /// A panic caught at the task boundary
    #[error("Computation panicked: {0}")]
    Panicked(String),

    /// The background thread could not be started
    #[error("Failed to spawn computation thread: {0}")]
    Spawn(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl FutureError {
    /// Create a computation error from any displayable message
    pub fn computation(msg: impl Into<String>) -> Self {
        FutureError::Computation(msg.into())
    }

    /// Returns true if the computation panicked instead of returning
    pub fn is_panic(&self) -> bool {
        matches!(self, FutureError::Panicked(_))
    }
}

impl From<std::io::Error> for FutureError {
    fn from(err: std::io::Error) -> Self {
        FutureError::Computation(err.to_string())
    }
}

impl From<String> for FutureError {
    fn from(msg: String) -> Self {
        FutureError::Computation(msg)
    }
}

impl From<&str> for FutureError {
    fn from(msg: &str) -> Self {
        FutureError::Computation(msg.to_string())
    }
}
