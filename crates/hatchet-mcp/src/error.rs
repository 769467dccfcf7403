//! Errors surfaced to MCP clients as tool failures.

use serde_json::{json, Value};
use thiserror::Error;

use hatchet_client::ClientError;
use hatchet_core::CoreError;

/// A tool call that could not be answered.
#[derive(Debug, Error)]
pub enum ToolError {
    /// The caller's arguments were rejected before querying Hatchet.
    #[error(transparent)]
    Invalid(#[from] CoreError),

    /// Hatchet (or the connection to it) failed.
    #[error(transparent)]
    Upstream(#[from] ClientError),
}

impl ToolError {
    /// JSON body returned as the tool's error content.
    pub fn to_body(&self, run_id: Option<&str>) -> Value {
        match run_id {
            Some(id) => json!({ "error": self.to_string(), "run_id": id }),
            None => json!({ "error": self.to_string() }),
        }
    }
}
