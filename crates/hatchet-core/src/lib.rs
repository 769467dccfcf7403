//! Hatchet MCP Core Domain Types
//!
//! This crate contains pure domain types with no dependencies on:
//! - HTTP clients
//! - The MCP protocol
//! - Runtime specifics
//!
//! Everything the query tools reason about (workflows, runs, statuses,
//! filters, queue counts) is modelled here.

pub mod error;
pub mod filter;
pub mod ids;
pub mod metrics;
pub mod status;
pub mod workflow;

// Re-export commonly used types
pub use error::CoreError;
pub use filter::{RunFilter, DEFAULT_LIMIT, DEFAULT_SINCE_HOURS, MAX_LIMIT, MAX_SINCE_HOURS};
pub use ids::{RunId, WorkflowId};
pub use metrics::QueueCounts;
pub use status::RunStatus;
pub use workflow::{Workflow, WorkflowRun};
