//! Hatchet REST payloads and their conversion into domain types.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::{Map, Value};

use hatchet_core::{RunId, RunStatus, Workflow, WorkflowId, WorkflowRun};

use crate::api::RunResult;

// ============================================================================
// Envelopes
// ============================================================================

/// Paginated list envelope. Hatchet omits or nulls `rows` when empty.
#[derive(Debug, Deserialize)]
pub(crate) struct ListResponse<T> {
    pub rows: Option<Vec<T>>,
}

impl<T> ListResponse<T> {
    pub fn into_rows(self) -> Vec<T> {
        self.rows.unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApiMeta {
    pub id: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

// ============================================================================
// Workflows
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApiWorkflow {
    pub metadata: ApiMeta,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub versions: Option<Vec<ApiWorkflowVersion>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiWorkflowVersion {
    #[serde(default)]
    pub version: Option<String>,
}

impl From<ApiWorkflow> for Workflow {
    fn from(w: ApiWorkflow) -> Self {
        // Hatchet lists versions newest first.
        let version = w
            .versions
            .unwrap_or_default()
            .into_iter()
            .find_map(|v| v.version);

        Workflow {
            id: WorkflowId::new(w.metadata.id),
            name: w.name,
            description: w.description,
            version,
        }
    }
}

// ============================================================================
// Runs
// ============================================================================

/// Fields shared by run summaries in listings and the run detail payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ApiRun {
    pub metadata: ApiMeta,
    #[serde(default)]
    pub workflow_id: Option<String>,
    #[serde(default)]
    pub workflow_name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub finished_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub additional_metadata: Option<Map<String, Value>>,
    #[serde(default)]
    pub output: Option<Value>,
}

impl ApiRun {
    /// Split into the domain run and its output.
    pub fn into_parts(self) -> (WorkflowRun, Option<Value>) {
        let run = WorkflowRun {
            id: RunId::new(self.metadata.id),
            workflow_id: self.workflow_id.map(WorkflowId::new),
            workflow_name: self.workflow_name,
            status: self.status.as_deref().and_then(RunStatus::from_wire),
            created_at: self.created_at.or(self.metadata.created_at),
            started_at: self.started_at,
            finished_at: self.finished_at,
            additional_metadata: self.additional_metadata.unwrap_or_default(),
        };
        let output = self.output.filter(|v| !v.is_null());
        (run, output)
    }
}

impl From<ApiRun> for WorkflowRun {
    fn from(run: ApiRun) -> Self {
        run.into_parts().0
    }
}

/// Payload of the run detail endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiRunDetails {
    pub run: ApiRun,
}

impl From<ApiRunDetails> for RunResult {
    fn from(details: ApiRunDetails) -> Self {
        let (run, output) = details.run.into_parts();
        RunResult { run, output }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_workflow_conversion() {
        let api: ApiWorkflow = serde_json::from_value(json!({
            "metadata": {"id": "wf-1", "createdAt": "2026-01-01T00:00:00Z"},
            "name": "qa-workflow",
            "description": "QA checks",
            "versions": [{"version": "v3"}, {"version": "v2"}]
        }))
        .unwrap();

        let workflow: Workflow = api.into();
        assert_eq!(workflow.id.as_str(), "wf-1");
        assert_eq!(workflow.name, "qa-workflow");
        assert_eq!(workflow.description.as_deref(), Some("QA checks"));
        assert_eq!(workflow.version.as_deref(), Some("v3"));
    }

    #[test]
    fn test_run_summary_conversion() {
        let api: ApiRun = serde_json::from_value(json!({
            "metadata": {"id": "run-1", "createdAt": "2026-01-01T10:00:00Z"},
            "workflowId": "wf-1",
            "workflowName": "qa-workflow",
            "status": "FAILED",
            "startedAt": "2026-01-01T10:00:05Z",
            "finishedAt": null,
            "additionalMetadata": {"audit_id": "a-1"}
        }))
        .unwrap();

        let run: WorkflowRun = api.into();
        assert_eq!(run.id.as_str(), "run-1");
        assert_eq!(run.status, Some(RunStatus::Failed));
        // Falls back to the metadata timestamp.
        assert!(run.created_at.is_some());
        assert!(run.started_at.is_some());
        assert!(run.finished_at.is_none());
        assert!(run.has_metadata("audit_id", "a-1"));
    }

    #[test]
    fn test_unknown_status_is_kept_as_none() {
        let api: ApiRun = serde_json::from_value(json!({
            "metadata": {"id": "run-2"},
            "status": "EVICTED"
        }))
        .unwrap();

        let run: WorkflowRun = api.into();
        assert_eq!(run.status, None);
        assert!(run.additional_metadata.is_empty());
    }

    #[test]
    fn test_null_rows() {
        let list: ListResponse<ApiRun> = serde_json::from_value(json!({"rows": null})).unwrap();
        assert!(list.into_rows().is_empty());

        let list: ListResponse<ApiRun> = serde_json::from_value(json!({})).unwrap();
        assert!(list.into_rows().is_empty());
    }

    #[test]
    fn test_run_details_output() {
        let details: ApiRunDetails = serde_json::from_value(json!({
            "run": {
                "metadata": {"id": "run-3"},
                "status": "COMPLETED",
                "output": {"score": 0.9}
            },
            "tasks": []
        }))
        .unwrap();

        let result: RunResult = details.into();
        assert_eq!(result.run.status, Some(RunStatus::Completed));
        assert_eq!(result.output, Some(json!({"score": 0.9})));
    }
}
