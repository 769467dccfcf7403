//! Core domain errors.

use thiserror::Error;

/// Core domain errors for Hatchet MCP.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// Status string is not one of the known run statuses.
    #[error("Invalid status '{0}': expected one of queued, running, completed, succeeded, failed, cancelled")]
    InvalidStatus(String),

    /// Invalid input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
