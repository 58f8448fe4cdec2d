//! Error types for item-touch.

use thiserror::Error;

/// Errors that can occur while setting up item touch handling.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdapterError {
    /// A required collaborator was not supplied.
    #[error("invalid argument: {0} can not be absent")]
    InvalidArgument(&'static str),
}

impl AdapterError {
    /// Returns true if this error reports a missing or invalid argument.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }
}

/// Result type for item-touch operations.
pub type AdapterResult<T> = Result<T, AdapterError>;
