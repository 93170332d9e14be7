/// Core error types for Cadence
use thiserror::Error;

/// Result type alias using `CoreError`
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error type for Cadence
#[derive(Error, Debug)]
pub enum CoreError {
    /// Invalid input supplied by the caller
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl CoreError {
    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
