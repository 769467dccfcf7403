//! Response types returned as tool content.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use hatchet_client::RunResult;
use hatchet_core::{QueueCounts, Workflow, WorkflowRun};

/// Workflow information returned by list_workflows.
#[derive(Debug, Serialize)]
pub struct WorkflowInfo {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub version: Option<String>,
}

impl From<Workflow> for WorkflowInfo {
    fn from(w: Workflow) -> Self {
        Self {
            id: w.id.into_inner(),
            name: w.name,
            description: w.description,
            version: w.version,
        }
    }
}

/// Run information returned by list_runs, search_runs and get_run_status.
#[derive(Debug, Serialize)]
pub struct RunInfo {
    pub id: String,
    pub workflow_id: Option<String>,
    pub workflow_name: Option<String>,
    pub status: Option<String>,
    pub created_at: Option<String>,
    pub started_at: Option<String>,
    pub finished_at: Option<String>,
    pub additional_metadata: Map<String, Value>,
}

fn timestamp(t: Option<DateTime<Utc>>) -> Option<String> {
    t.map(|t| t.to_rfc3339_opts(SecondsFormat::Millis, true))
}

impl From<WorkflowRun> for RunInfo {
    fn from(run: WorkflowRun) -> Self {
        Self {
            id: run.id.into_inner(),
            workflow_id: run.workflow_id.map(|id| id.into_inner()),
            workflow_name: run.workflow_name,
            status: run.status.map(|s| s.as_str().to_string()),
            created_at: timestamp(run.created_at),
            started_at: timestamp(run.started_at),
            finished_at: timestamp(run.finished_at),
            additional_metadata: run.additional_metadata,
        }
    }
}

/// Output of a run returned by get_run_result.
#[derive(Debug, Serialize)]
pub struct RunResultInfo {
    pub run_id: String,
    pub status: Option<String>,

    /// Whether the run has reached a terminal state.
    pub finished: bool,

    /// Run output; null until the run produces one.
    pub result: Option<Value>,
}

impl From<RunResult> for RunResultInfo {
    fn from(r: RunResult) -> Self {
        Self {
            run_id: r.run.id.into_inner(),
            status: r.run.status.map(|s| s.as_str().to_string()),
            finished: r.run.status.is_some_and(|s| s.is_terminal()),
            result: r.output,
        }
    }
}

/// Run counts returned by get_queue_metrics.
#[derive(Debug, Serialize)]
pub struct QueueMetrics {
    /// Workflow the counts are restricted to, or "all".
    pub workflow_name: String,
    pub time_range_hours: u32,

    /// Most runs sampled for the counts.
    pub sample_limit: u32,

    /// True when the sample hit its limit, so counts may be low.
    pub truncated: bool,

    pub counts: QueueCounts,
}
