//! Translation from tool arguments to Hatchet queries.
//!
//! All argument validation happens here, before any request is made.

use std::sync::Arc;

use chrono::Utc;

use hatchet_client::HatchetApi;
use hatchet_core::{CoreError, QueueCounts, RunFilter, RunId, RunStatus, WorkflowId, MAX_LIMIT};

use crate::error::ToolError;
use crate::params::{non_blank, ListRunsParams, QueueMetricsParams, SearchRunsParams};
use crate::response::{QueueMetrics, RunInfo, RunResultInfo, WorkflowInfo};

/// Read-only query operations over a Hatchet tenant.
#[derive(Clone)]
pub struct QueryService {
    api: Arc<dyn HatchetApi>,
}

impl QueryService {
    pub fn new(api: Arc<dyn HatchetApi>) -> Self {
        Self { api }
    }

    /// List every registered workflow.
    pub async fn list_workflows(&self) -> Result<Vec<WorkflowInfo>, ToolError> {
        let workflows = self.api.list_workflows().await?;
        Ok(workflows.into_iter().map(WorkflowInfo::from).collect())
    }

    /// List runs by workflow name, status and time window.
    pub async fn list_runs(&self, params: &ListRunsParams) -> Result<Vec<RunInfo>, ToolError> {
        let status = parse_status(params.status.as_deref())?;
        let filter = RunFilter::since_hours(params.since_hours, Utc::now())?
            .with_status(status)
            .with_limit(params.limit)?;

        let filter = match non_blank(params.workflow_name.as_deref()) {
            Some(name) => match self.resolve_workflow(name).await? {
                Some(ids) => filter.with_workflow_ids(ids),
                None => return Ok(Vec::new()),
            },
            None => filter,
        };

        let runs = self.api.list_runs(&filter).await?;
        Ok(runs.into_iter().map(RunInfo::from).collect())
    }

    /// Current state of a single run.
    pub async fn get_run_status(&self, run_id: &str) -> Result<RunInfo, ToolError> {
        let run_id = parse_run_id(run_id)?;
        Ok(self.api.get_run(&run_id).await?.into())
    }

    /// Output of a single run.
    pub async fn get_run_result(&self, run_id: &str) -> Result<RunResultInfo, ToolError> {
        let run_id = parse_run_id(run_id)?;
        Ok(self.api.get_run_result(&run_id).await?.into())
    }

    /// Count runs in the window by status.
    ///
    /// Counts are taken over at most [`MAX_LIMIT`] runs.
    pub async fn queue_metrics(&self, params: &QueueMetricsParams) -> Result<QueueMetrics, ToolError> {
        let filter = RunFilter::since_hours(params.since_hours, Utc::now())?.with_limit(MAX_LIMIT)?;
        let workflow_name = non_blank(params.workflow_name.as_deref());

        let metrics = |counts: QueueCounts| QueueMetrics {
            workflow_name: workflow_name.unwrap_or("all").to_string(),
            time_range_hours: params.since_hours,
            sample_limit: MAX_LIMIT,
            truncated: counts.total >= u64::from(MAX_LIMIT),
            counts,
        };

        let filter = match workflow_name {
            Some(name) => match self.resolve_workflow(name).await? {
                Some(ids) => filter.with_workflow_ids(ids),
                None => return Ok(metrics(QueueCounts::default())),
            },
            None => filter,
        };

        let runs = self.api.list_runs(&filter).await?;
        Ok(metrics(QueueCounts::tally(runs.iter().map(|r| r.status))))
    }

    /// Runs carrying a given additional-metadata key/value pair.
    pub async fn search_runs(&self, params: &SearchRunsParams) -> Result<Vec<RunInfo>, ToolError> {
        let key = params.metadata_key.trim();
        if key.is_empty() {
            return Err(CoreError::InvalidInput("metadata_key must not be empty".to_string()).into());
        }
        // Hatchet splits `key:value` on the first ':', so only the key must be colon-free.
        if key.contains(':') {
            return Err(CoreError::InvalidInput(format!(
                "metadata_key must not contain ':', got '{}'",
                key
            ))
            .into());
        }

        let status = parse_status(params.status.as_deref())?;
        let filter = RunFilter::since_hours(params.since_hours, Utc::now())?
            .with_status(status)
            .with_metadata(key, params.metadata_value.as_str())
            .with_limit(params.limit)?;

        let runs = self.api.list_runs(&filter).await?;
        Ok(runs.into_iter().map(RunInfo::from).collect())
    }

    /// Ids of the workflows named exactly `name`, or `None` if there are none.
    async fn resolve_workflow(&self, name: &str) -> Result<Option<Vec<WorkflowId>>, ToolError> {
        let ids: Vec<WorkflowId> = self
            .api
            .list_workflows()
            .await?
            .into_iter()
            .filter(|w| w.name == name)
            .map(|w| w.id)
            .collect();

        Ok(if ids.is_empty() { None } else { Some(ids) })
    }
}

fn parse_status(status: Option<&str>) -> Result<Option<RunStatus>, CoreError> {
    non_blank(status).map(RunStatus::parse_filter).transpose()
}

fn parse_run_id(run_id: &str) -> Result<RunId, CoreError> {
    let run_id = run_id.trim();
    if run_id.is_empty() {
        return Err(CoreError::InvalidInput("run_id must not be empty".to_string()));
    }
    Ok(RunId::new(run_id))
}
