//! SDK Error Types

use hosted_search_core::SearchError;
use thiserror::Error;

/// SDK Result type
pub type Result<T> = std::result::Result<T, SdkError>;

/// Errors raised while building a client.
///
/// Calls made through a built client report [`SearchError`] directly.
#[derive(Debug, Error)]
pub enum SdkError {
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Search(#[from] SearchError),
}
