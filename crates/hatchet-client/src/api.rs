//! The query surface the MCP tools depend on.

use async_trait::async_trait;
use serde_json::Value;

use hatchet_core::{RunFilter, RunId, Workflow, WorkflowRun};

use crate::error::ClientError;

/// A run together with its output.
#[derive(Debug, Clone, PartialEq)]
pub struct RunResult {
    pub run: WorkflowRun,

    /// Output of the run; `None` until the run has produced one.
    pub output: Option<Value>,
}

/// Read-only queries against a Hatchet tenant.
#[async_trait]
pub trait HatchetApi: Send + Sync {
    /// List every registered workflow.
    async fn list_workflows(&self) -> Result<Vec<Workflow>, ClientError>;

    /// List workflow runs matching a filter.
    async fn list_runs(&self, filter: &RunFilter) -> Result<Vec<WorkflowRun>, ClientError>;

    /// Get a single workflow run.
    async fn get_run(&self, run_id: &RunId) -> Result<WorkflowRun, ClientError>;

    /// Get a workflow run and its output.
    async fn get_run_result(&self, run_id: &RunId) -> Result<RunResult, ClientError>;
}
