//! Workflow run status.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Status of a workflow run as reported by Hatchet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    /// Waiting for a worker slot.
    Queued,
    /// Executing on a worker.
    Running,
    /// Finished successfully.
    Completed,
    /// Finished with an error.
    Failed,
    /// Cancelled before completion.
    Cancelled,
}

impl RunStatus {
    /// Every status, in the order they are reported in queue metrics.
    pub const ALL: [RunStatus; 5] = [
        Self::Queued,
        Self::Running,
        Self::Completed,
        Self::Failed,
        Self::Cancelled,
    ];

    /// Lowercase name used in tool input and output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Queued => "queued",
            Self::Running => "running",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Name used by the Hatchet REST API.
    pub fn as_wire(&self) -> &'static str {
        match self {
            Self::Queued => "QUEUED",
            Self::Running => "RUNNING",
            Self::Completed => "COMPLETED",
            Self::Failed => "FAILED",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// Decode a status as returned by the Hatchet REST API.
    ///
    /// Returns `None` for values this adapter does not know about, so a new
    /// upstream status never fails a whole listing.
    pub fn from_wire(value: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|s| s.as_wire().eq_ignore_ascii_case(value))
    }

    /// Parse a user-supplied status filter.
    ///
    /// Case-insensitive; `succeeded` is accepted as an alias of `completed`.
    pub fn parse_filter(value: &str) -> Result<Self, CoreError> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "queued" => Ok(Self::Queued),
            "running" => Ok(Self::Running),
            "completed" | "succeeded" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(CoreError::InvalidStatus(value.to_string())),
        }
    }

    /// Returns true if the run has finished, successfully or not.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Cancelled)
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
