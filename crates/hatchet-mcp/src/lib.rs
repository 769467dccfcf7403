//! Hatchet MCP server.
//!
//! Exposes read-only Hatchet queries as MCP tools:
//! - `list_workflows` - List registered workflows
//! - `list_runs` - List runs filtered by workflow, status and time window
//! - `get_run_status` - Get the current state of one run
//! - `get_run_result` - Get the output of one run
//! - `get_queue_metrics` - Count recent runs by status
//! - `search_runs` - Find runs by an additional-metadata key/value pair

pub mod error;
pub mod params;
pub mod response;
pub mod server;
pub mod service;
pub mod transport;

pub use error::ToolError;
pub use server::HatchetMcpServer;
pub use service::QueryService;
pub use transport::{create_mcp_router, serve_http, serve_stdio};
