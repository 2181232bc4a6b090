//! Error types for favicon-dl
//!
//! Per-item network failures never show up here: the fetcher folds them into
//! [`FetchOutcome`](crate::types::FetchOutcome). The variants below describe
//! failures that either prevent a run from starting (configuration) or abort
//! it (faults raised by a fetcher or by the icon store during commit).

use thiserror::Error;

/// Result type alias for favicon-dl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for favicon-dl
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "icon_path")
        key: Option<String>,
    },

    /// Network error outside of per-item classification (e.g. client construction)
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The icon store rejected the bulk commit
    #[error("icon store error: {0}")]
    Store(String),

    /// Unexpected failure while processing an item; aborts the batch
    #[error("batch fault: {0}")]
    Fault(String),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Shorthand for a configuration error tied to a specific key
    pub fn config(key: &str, message: impl Into<String>) -> Self {
        Error::Config {
            message: message.into(),
            key: Some(key.to_string()),
        }
    }
}
