// Central Error Type for the Client

use crate::domain::TaskId;
use thiserror::Error;

/// Client-level error type
#[derive(Error, Debug)]
pub enum SearchError {
    /// Raised locally, before any network call
    #[error("Validation error: {0}")]
    Domain(#[from] crate::domain::DomainError),

    /// Structured failure forwarded verbatim from the service
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Task {task_id} not published after {attempts} status checks")]
    TaskTimeout { task_id: TaskId, attempts: u32 },

    #[error("Key {key} not visible after {attempts} checks")]
    KeyTimeout { key: String, attempts: u32 },

    /// End of a browse sequence. Not a failure.
    #[error("No more hits")]
    NoMoreHits,

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl SearchError {
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::api(404, message)
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Api { status: 404, .. })
    }

    pub fn is_no_more_hits(&self) -> bool {
        matches!(self, Self::NoMoreHits)
    }

    /// Local validation and decode failures
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Domain(_))
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::TaskTimeout { .. } | Self::KeyTimeout { .. })
    }
}

/// Result type alias using SearchError
pub type Result<T> = std::result::Result<T, SearchError>;
