//! Error types for the Sleeper client

use thiserror::Error;

/// Result type alias for Sleeper API operations
pub type Result<T> = std::result::Result<T, SleeperError>;

#[derive(Error, Debug)]
pub enum SleeperError {
    /// Non-success response from the API
    #[error("Sleeper API error: {message}")]
    Api { message: String },

    /// Transport-level HTTP failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body did not decode
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Player-cache file access failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SleeperError {
    /// Create a new API error
    pub fn api(message: impl Into<String>) -> Self {
        Self::Api { message: message.into() }
    }
}
