//! HTTP client for the Hatchet REST API.

use async_trait::async_trait;
use chrono::SecondsFormat;
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use hatchet_core::{RunFilter, RunId, Workflow, WorkflowRun};

use crate::api::{HatchetApi, RunResult};
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::wire::{ApiRun, ApiRunDetails, ApiWorkflow, ListResponse};

/// Longest upstream error body passed through to callers.
const MAX_ERROR_BODY_CHARS: usize = 512;

/// HTTP client for one Hatchet tenant.
#[derive(Debug, Clone)]
pub struct HatchetClient {
    inner: reqwest::Client,
    base_url: Url,
    tenant_id: String,
    token: String,
}

impl HatchetClient {
    /// Create a new client from a resolved config.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let base_url = Url::parse(&config.server_url).map_err(|e| {
            ClientError::Config(format!("invalid server URL '{}': {}", config.server_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::Config(format!(
                "invalid server URL '{}'",
                config.server_url
            )));
        }

        let inner = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            inner,
            base_url,
            tenant_id: config.tenant_id.clone(),
            token: config.token.clone(),
        })
    }

    /// Build an endpoint URL, percent-encoding each path segment.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// GET an endpoint and decode its JSON body.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, String)],
    ) -> Result<T, ClientError> {
        debug!(url = %url, params = query.len(), "GET request");

        let response = self
            .inner
            .get(url.clone())
            .bearer_auth(&self.token)
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound(url.path().to_string()));
        }
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<unreadable body: {}>", e));
            return Err(ClientError::Api {
                status: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::Serialization(e.to_string()))
    }

    async fn fetch_run_details(&self, run_id: &RunId) -> Result<ApiRunDetails, ClientError> {
        let url = self.endpoint(&["api", "v1", "stable", "workflow-runs", run_id.as_str()]);
        self.get_json(url, &[]).await
    }
}

/// Query parameters for the run listing endpoint.
pub(crate) fn run_list_query(filter: &RunFilter) -> Vec<(&'static str, String)> {
    let mut query = vec![
        (
            "since",
            filter.since.to_rfc3339_opts(SecondsFormat::Secs, true),
        ),
        ("limit", filter.limit.to_string()),
        ("offset", filter.offset.to_string()),
        ("only_tasks", "false".to_string()),
    ];

    if let Some(until) = filter.until {
        query.push(("until", until.to_rfc3339_opts(SecondsFormat::Secs, true)));
    }
    for status in &filter.statuses {
        query.push(("statuses", status.as_wire().to_string()));
    }
    for id in &filter.workflow_ids {
        query.push(("workflow_ids", id.as_str().to_string()));
    }
    for pair in filter.metadata_query_values() {
        query.push(("additional_metadata", pair));
    }

    query
}

#[async_trait]
impl HatchetApi for HatchetClient {
    async fn list_workflows(&self) -> Result<Vec<Workflow>, ClientError> {
        let url = self.endpoint(&["api", "v1", "tenants", self.tenant_id.as_str(), "workflows"]);
        let list: ListResponse<ApiWorkflow> = self.get_json(url, &[]).await?;
        Ok(list.into_rows().into_iter().map(Workflow::from).collect())
    }

    async fn list_runs(&self, filter: &RunFilter) -> Result<Vec<WorkflowRun>, ClientError> {
        let url = self.endpoint(&[
            "api",
            "v1",
            "stable",
            "tenants",
            self.tenant_id.as_str(),
            "workflow-runs",
        ]);
        let list: ListResponse<ApiRun> = self.get_json(url, &run_list_query(filter)).await?;
        Ok(list.into_rows().into_iter().map(WorkflowRun::from).collect())
    }

    async fn get_run(&self, run_id: &RunId) -> Result<WorkflowRun, ClientError> {
        Ok(self.fetch_run_details(run_id).await?.run.into())
    }

    async fn get_run_result(&self, run_id: &RunId) -> Result<RunResult, ClientError> {
        Ok(self.fetch_run_details(run_id).await?.into())
    }
}
