//! MCP tool definitions and server handler.

use std::sync::Arc;

use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, Content, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler,
};
use serde::Serialize;
use tracing::{info, warn};

use hatchet_client::HatchetApi;

use crate::error::ToolError;
use crate::params::{ListRunsParams, QueueMetricsParams, RunIdParams, SearchRunsParams};
use crate::service::QueryService;

/// MCP server for read-only Hatchet queries.
#[derive(Clone)]
pub struct HatchetMcpServer {
    service: QueryService,
    tool_router: ToolRouter<Self>,
}

/// Render a value as the tool's text content.
fn success<T: Serialize>(value: &T) -> CallToolResult {
    let response = serde_json::to_string_pretty(value).unwrap_or_else(|_| "null".to_string());
    CallToolResult::success(vec![Content::text(response)])
}

/// Render a failed call, logging it first.
fn failure(tool: &str, err: &ToolError, run_id: Option<&str>) -> CallToolResult {
    match err {
        ToolError::Invalid(e) => info!(tool, error = %e, "Rejected tool arguments"),
        ToolError::Upstream(e) => warn!(tool, error = %e, "Hatchet query failed"),
    }
    let body = err.to_body(run_id);
    let response = serde_json::to_string_pretty(&body).unwrap_or_else(|_| "{}".to_string());
    CallToolResult::error(vec![Content::text(response)])
}

#[tool_router]
impl HatchetMcpServer {
    /// Create a new MCP server over the given Hatchet API.
    pub fn new(api: Arc<dyn HatchetApi>) -> Self {
        Self {
            service: QueryService::new(api),
            tool_router: Self::tool_router(),
        }
    }

    #[tool(description = "List all registered Hatchet workflows with their IDs, names, descriptions and versions.")]
    async fn list_workflows(&self) -> Result<CallToolResult, McpError> {
        match self.service.list_workflows().await {
            Ok(workflows) => {
                info!(workflow_count = workflows.len(), "Listed workflows via MCP");
                Ok(success(&workflows))
            }
            Err(e) => Ok(failure("list_workflows", &e, None)),
        }
    }

    #[tool(description = "List workflow runs with optional filters: workflow name, status \
                          (queued, running, completed, failed, cancelled), how many hours back \
                          to search (default 24) and a maximum count (default 50).")]
    async fn list_runs(
        &self,
        Parameters(params): Parameters<ListRunsParams>,
    ) -> Result<CallToolResult, McpError> {
        match self.service.list_runs(&params).await {
            Ok(runs) => {
                info!(
                    workflow = params.workflow_name.as_deref().unwrap_or("all"),
                    status = params.status.as_deref().unwrap_or("any"),
                    since_hours = params.since_hours,
                    run_count = runs.len(),
                    "Listed runs via MCP"
                );
                Ok(success(&runs))
            }
            Err(e) => Ok(failure("list_runs", &e, None)),
        }
    }

    #[tool(description = "Get the current status and timing details of a specific workflow run.")]
    async fn get_run_status(
        &self,
        Parameters(params): Parameters<RunIdParams>,
    ) -> Result<CallToolResult, McpError> {
        match self.service.get_run_status(&params.run_id).await {
            Ok(run) => {
                info!(run_id = %params.run_id, status = ?run.status, "Retrieved run status via MCP");
                Ok(success(&run))
            }
            Err(e) => Ok(failure("get_run_status", &e, Some(&params.run_id))),
        }
    }

    #[tool(description = "Get the output of a workflow run. The result is null while the run \
                          is still queued or running.")]
    async fn get_run_result(
        &self,
        Parameters(params): Parameters<RunIdParams>,
    ) -> Result<CallToolResult, McpError> {
        match self.service.get_run_result(&params.run_id).await {
            Ok(result) => {
                info!(run_id = %params.run_id, finished = result.finished, "Retrieved run result via MCP");
                Ok(success(&result))
            }
            Err(e) => Ok(failure("get_run_result", &e, Some(&params.run_id))),
        }
    }

    #[tool(description = "Get queue depth: counts of recent runs by status (queued, running, \
                          completed, failed, cancelled), optionally for a single workflow.")]
    async fn get_queue_metrics(
        &self,
        Parameters(params): Parameters<QueueMetricsParams>,
    ) -> Result<CallToolResult, McpError> {
        match self.service.queue_metrics(&params).await {
            Ok(metrics) => {
                info!(
                    workflow = %metrics.workflow_name,
                    total = metrics.counts.total,
                    in_flight = metrics.counts.in_flight(),
                    "Computed queue metrics via MCP"
                );
                Ok(success(&metrics))
            }
            Err(e) => Ok(failure("get_queue_metrics", &e, None)),
        }
    }

    #[tool(description = "Search workflow runs by an additional-metadata key/value pair \
                          (e.g. audit_id, audit_type, patient_id, application_id, rule_id), \
                          optionally filtered by status and time window.")]
    async fn search_runs(
        &self,
        Parameters(params): Parameters<SearchRunsParams>,
    ) -> Result<CallToolResult, McpError> {
        match self.service.search_runs(&params).await {
            Ok(runs) => {
                info!(
                    key = %params.metadata_key,
                    run_count = runs.len(),
                    "Searched runs via MCP"
                );
                Ok(success(&runs))
            }
            Err(e) => Ok(failure("search_runs", &e, None)),
        }
    }
}

#[tool_handler]
impl ServerHandler for HatchetMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: Default::default(),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: rmcp::model::Implementation {
                name: "hatchet-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: Some("Hatchet Debug Server".to_string()),
                website_url: None,
                icons: None,
            },
            instructions: Some(
                "Read-only access to Hatchet workflow runs. Use list_workflows to discover \
                 workflow names, list_runs or search_runs to find runs, get_run_status and \
                 get_run_result to inspect one run, and get_queue_metrics for queue depth."
                    .to_string(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::Value;

    use crate::service::tests::FakeHatchet;

    fn server(fake: FakeHatchet) -> HatchetMcpServer {
        HatchetMcpServer::new(Arc::new(fake))
    }

    fn body(result: &CallToolResult) -> Value {
        let text = result
            .content
            .first()
            .and_then(|c| c.as_text())
            .map(|t| t.text.clone())
            .expect("text content");
        serde_json::from_str(&text).unwrap()
    }

    #[test]
    fn test_registers_all_tools() {
        let mut names: Vec<String> = HatchetMcpServer::tool_router()
            .list_all()
            .into_iter()
            .map(|t| t.name.to_string())
            .collect();
        names.sort();

        assert_eq!(
            names,
            vec![
                "get_queue_metrics",
                "get_run_result",
                "get_run_status",
                "list_runs",
                "list_workflows",
                "search_runs",
            ]
        );
    }

    #[test]
    fn test_server_info() {
        let info = server(FakeHatchet::default()).get_info();
        assert_eq!(info.server_info.name, "hatchet-mcp");
        assert!(info.capabilities.tools.is_some());
    }

    #[tokio::test]
    async fn test_list_runs_tool() {
        let result = server(FakeHatchet::sample())
            .list_runs(Parameters(ListRunsParams {
                status: Some("queued".to_string()),
                ..Default::default()
            }))
            .await
            .unwrap();

        assert_ne!(result.is_error, Some(true));
        let runs = body(&result);
        assert_eq!(runs.as_array().unwrap().len(), 1);
        assert_eq!(runs[0]["id"], "r1");
        assert_eq!(runs[0]["additional_metadata"]["audit_id"], "a-1");
    }

    #[tokio::test]
    async fn test_invalid_status_is_tool_error() {
        let result = server(FakeHatchet::sample())
            .search_runs(Parameters(SearchRunsParams {
                status: Some("paused".to_string()),
                ..SearchRunsParams::new("audit_id", "a-1")
            }))
            .await
            .unwrap();

        assert_eq!(result.is_error, Some(true));
        assert!(body(&result)["error"].as_str().unwrap().contains("paused"));
    }

    #[tokio::test]
    async fn test_missing_run_reports_run_id() {
        let result = server(FakeHatchet::sample())
            .get_run_status(Parameters(RunIdParams {
                run_id: "nope".to_string(),
            }))
            .await
            .unwrap();

        assert_eq!(result.is_error, Some(true));
        assert_eq!(body(&result)["run_id"], "nope");
    }

    #[tokio::test]
    async fn test_queue_metrics_tool() {
        let result = server(FakeHatchet::sample())
            .get_queue_metrics(Parameters(QueueMetricsParams::default()))
            .await
            .unwrap();

        let metrics = body(&result);
        assert_eq!(metrics["workflow_name"], "all");
        assert_eq!(metrics["time_range_hours"], 24);
        assert_eq!(metrics["counts"]["total"], 4);
        assert_eq!(metrics["counts"]["cancelled"], 0);
    }

    #[tokio::test]
    async fn test_get_run_result_tool() {
        let result = server(FakeHatchet::sample())
            .get_run_result(Parameters(RunIdParams {
                run_id: "r4".to_string(),
            }))
            .await
            .unwrap();

        let value = body(&result);
        assert_eq!(value["run_id"], "r4");
        assert_eq!(value["status"], "completed");
        assert_eq!(value["result"]["chunks"], 12);
    }

    #[tokio::test]
    async fn test_upstream_failure_is_tool_error() {
        let result = server(FakeHatchet {
            fail_with: Some(500),
            ..FakeHatchet::sample()
        })
        .list_workflows()
        .await
        .unwrap();

        assert_eq!(result.is_error, Some(true));
        assert!(body(&result)["error"].as_str().unwrap().contains("500"));
    }
}
