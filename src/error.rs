//! Error taxonomy for facade operations.
//!
//! Every failure a caller can observe falls into exactly one of these
//! variants. `NotFound` is always its own variant so callers never have to
//! string-match a message to detect a missing resource.

use thiserror::Error;

/// Errors produced by the facade and its resource services.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// A caller-supplied argument violated a precondition. Raised before any
    /// remote round-trip.
    #[error("validation error: {0}")]
    Validation(String),

    /// The remote confirmed the resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// A lifecycle transition found the entity already in the target state.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The remote reported a structured failure.
    #[error("remote API error (status {status}): {message}")]
    RemoteApi { status: u16, message: String },

    /// Anything else, including transport and decoding failures.
    #[error("unexpected error: {0}")]
    Unexpected(String),

    /// The facade was constructed with unusable configuration.
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl Error {
    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Error::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Error::Conflict(message.into())
    }

    pub fn remote(status: u16, message: impl Into<String>) -> Self {
        Error::RemoteApi {
            status,
            message: message.into(),
        }
    }

    pub fn unexpected(message: impl Into<String>) -> Self {
        Error::Unexpected(message.into())
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Error::Configuration(message.into())
    }

    /// Check if the remote signalled the resource is absent.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }

    /// Check if a lifecycle guard rejected the transition.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Error::Conflict(_))
    }

    /// Check if the error was raised before any network call.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}
