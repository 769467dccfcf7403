//! Error types for the Hatchet client.

use thiserror::Error;

/// Errors that can occur when querying Hatchet.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Client could not be configured (missing token, bad URL, ...).
    #[error("configuration error: {0}")]
    Config(String),

    /// Transport-level HTTP error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Hatchet answered with a non-success status.
    #[error("Hatchet API returned {status}: {body}")]
    Api { status: u16, body: String },

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}
