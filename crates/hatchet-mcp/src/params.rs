//! Tool parameter types.
//!
//! Doc comments on fields become the argument descriptions MCP clients see.

use schemars::JsonSchema;
use serde::Deserialize;

use hatchet_core::{DEFAULT_LIMIT, DEFAULT_SINCE_HOURS};

fn default_since_hours() -> u32 {
    DEFAULT_SINCE_HOURS
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

/// Parameters for list_runs tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListRunsParams {
    /// Filter by workflow name (e.g. 'qa-workflow', 'embed-workflow').
    #[serde(default)]
    pub workflow_name: Option<String>,

    /// Filter by status: 'queued', 'running', 'completed' (or 'succeeded'), 'failed', 'cancelled'.
    #[serde(default)]
    pub status: Option<String>,

    /// How many hours back to search (default: 24).
    #[serde(default = "default_since_hours")]
    pub since_hours: u32,

    /// Maximum number of runs to return (default: 50, max: 1000).
    #[serde(default = "default_limit")]
    pub limit: u32,
}

impl Default for ListRunsParams {
    fn default() -> Self {
        Self {
            workflow_name: None,
            status: None,
            since_hours: DEFAULT_SINCE_HOURS,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Parameters for get_run_status and get_run_result tools.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct RunIdParams {
    /// The ID of the workflow run.
    pub run_id: String,
}

/// Parameters for get_queue_metrics tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct QueueMetricsParams {
    /// Optional workflow name to restrict the counts to.
    #[serde(default)]
    pub workflow_name: Option<String>,

    /// How many hours back to count (default: 24).
    #[serde(default = "default_since_hours")]
    pub since_hours: u32,
}

impl Default for QueueMetricsParams {
    fn default() -> Self {
        Self {
            workflow_name: None,
            since_hours: DEFAULT_SINCE_HOURS,
        }
    }
}

/// Parameters for search_runs tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchRunsParams {
    /// The metadata key to match (e.g. 'audit_id', 'patient_id', 'rule_id').
    pub metadata_key: String,

    /// The value the metadata key must have.
    pub metadata_value: String,

    /// Optional status filter: 'queued', 'running', 'completed', 'failed', 'cancelled'.
    #[serde(default)]
    pub status: Option<String>,

    /// How many hours back to search (default: 24).
    #[serde(default = "default_since_hours")]
    pub since_hours: u32,

    /// Maximum number of runs to return (default: 50, max: 1000).
    #[serde(default = "default_limit")]
    pub limit: u32,
}

impl SearchRunsParams {
    /// Search for one key/value pair with default window and limit.
    pub fn new(metadata_key: impl Into<String>, metadata_value: impl Into<String>) -> Self {
        Self {
            metadata_key: metadata_key.into(),
            metadata_value: metadata_value.into(),
            status: None,
            since_hours: DEFAULT_SINCE_HOURS,
            limit: DEFAULT_LIMIT,
        }
    }
}

/// Treat absent and blank optional strings the same.
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_list_runs_defaults() {
        let params: ListRunsParams = serde_json::from_value(json!({})).unwrap();
        assert_eq!(params.since_hours, 24);
        assert_eq!(params.limit, 50);
        assert!(params.workflow_name.is_none());
    }

    #[test]
    fn test_search_requires_key_and_value() {
        assert!(serde_json::from_value::<SearchRunsParams>(json!({"metadata_key": "audit_id"})).is_err());

        let params: SearchRunsParams = serde_json::from_value(json!({
            "metadata_key": "audit_id",
            "metadata_value": "a-1",
            "status": "failed"
        }))
        .unwrap();
        assert_eq!(params.status.as_deref(), Some("failed"));
        assert_eq!(params.limit, 50);
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("  ")), None);
        assert_eq!(non_blank(Some(" qa ")), Some("qa"));
        assert_eq!(non_blank(None), None);
    }
}
