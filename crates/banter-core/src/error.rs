//! Error types for banter operations.

use thiserror::Error;

use crate::types::QuoteCategory;

/// Result type alias for banter operations.
pub type BanterResult<T> = Result<T, BanterError>;

/// Main error type for all banter operations.
#[derive(Error, Debug)]
pub enum BanterError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Quote store operation failed.
    #[error("Quote store error: {message}")]
    Store {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A reply pool that must never be empty came back empty.
    ///
    /// Raised when a random pick from the confused/annoyed/bored pool is
    /// required and the store has nothing to offer. This is a fatal
    /// configuration problem, not a per-message condition.
    #[error("The '{category}' quote pool is empty; no reply can be constructed")]
    EmptyPool { category: QuoteCategory },

    /// Transport delivery failed.
    #[error("Transport error: {message}")]
    Transport {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl BanterError {
    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Create a quote store error.
    pub fn store(message: impl Into<String>) -> Self {
        Self::Store {
            message: message.into(),
            source: None,
        }
    }

    /// Create a quote store error wrapping an underlying cause.
    pub fn store_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Store {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an empty-pool error for the given category.
    pub fn empty_pool(category: QuoteCategory) -> Self {
        Self::EmptyPool { category }
    }

    /// Create a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            source: None,
        }
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}
