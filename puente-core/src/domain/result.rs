//! Result and error types for the core library

use thiserror::Error;

/// Core library error type
///
/// Domain errors carry stable variants so callers can branch without
/// inspecting upstream-specific strings.
#[derive(Error, Debug)]
pub enum Error {
    #[error("'{field}' {reason}")]
    Validation { field: String, reason: String },

    #[error("wrong credentials")]
    WrongCredentials,

    #[error("unauthorized provider")]
    UnauthorizedProvider,

    #[error("session key is invalid or expired")]
    SessionExpired,

    #[error("no client found with id '{0}'")]
    WrongClient(String),

    #[error("interaction '{0}' is not supported")]
    UnsupportedInteraction(String),

    #[error("gateway timed out after {0} attempts")]
    DeadlineExceeded(u32),

    #[error("upstream error: {0}")]
    Upstream(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("encryption error: {0}")]
    Encryption(String),

    #[error("cache error: {0}")]
    Cache(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a validation error with field-level detail
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a generic upstream error
    pub fn upstream(msg: impl Into<String>) -> Self {
        Self::Upstream(msg.into())
    }

    /// Whether this error means the caller's session key is no longer usable
    pub fn is_session_expired(&self) -> bool {
        matches!(self, Self::SessionExpired)
    }
}

/// Core library result type
pub type Result<T> = std::result::Result<T, Error>;
