//! Error types for ledger storage

use thiserror::Error;

/// Result type alias for ledger operations
pub type Result<T> = std::result::Result<T, LedgerError>;

#[derive(Error, Debug)]
pub enum LedgerError {
    /// Storage backend rejected the request
    #[error("Ledger backend error: {0}")]
    Backend(String),

    /// Transport-level HTTP failure (gist backend)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Blob content did not decode
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// File backend I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LedgerError {
    /// Create a new backend error
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}
