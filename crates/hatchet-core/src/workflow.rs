//! Workflow and workflow run models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{RunId, RunStatus, WorkflowId};

/// A workflow registered with Hatchet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workflow {
    /// Workflow identifier.
    pub id: WorkflowId,

    /// Workflow name, unique within a tenant.
    pub name: String,

    /// Optional human-readable description.
    pub description: Option<String>,

    /// Latest version tag, when Hatchet reports one.
    pub version: Option<String>,
}

impl Workflow {
    /// Create a workflow with only id and name set.
    pub fn new(id: impl Into<WorkflowId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
            version: None,
        }
    }

    /// Builder method to set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A single execution of a workflow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowRun {
    /// Run identifier.
    pub id: RunId,

    /// Workflow this run belongs to.
    pub workflow_id: Option<WorkflowId>,

    /// Name of the workflow, if the listing carried it.
    pub workflow_name: Option<String>,

    /// Current status. `None` if Hatchet reported a status this adapter
    /// does not know about.
    pub status: Option<RunStatus>,

    /// When the run was created.
    pub created_at: Option<DateTime<Utc>>,

    /// When a worker started the run.
    pub started_at: Option<DateTime<Utc>>,

    /// When the run reached a terminal state.
    pub finished_at: Option<DateTime<Utc>>,

    /// Metadata attached by whoever triggered the run.
    pub additional_metadata: Map<String, Value>,
}

impl WorkflowRun {
    /// Create a run with only an id and status.
    pub fn new(id: impl Into<RunId>, status: RunStatus) -> Self {
        Self {
            id: id.into(),
            workflow_id: None,
            workflow_name: None,
            status: Some(status),
            created_at: None,
            started_at: None,
            finished_at: None,
            additional_metadata: Map::new(),
        }
    }

    /// Builder method to set the owning workflow.
    pub fn with_workflow(mut self, id: impl Into<WorkflowId>, name: impl Into<String>) -> Self {
        self.workflow_id = Some(id.into());
        self.workflow_name = Some(name.into());
        self
    }

    /// Builder method to add a metadata entry.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.additional_metadata.insert(key.into(), value.into());
        self
    }

    /// Returns true if the run's metadata has `key` set to `value`.
    ///
    /// Mirrors Hatchet's server-side `additional_metadata` matching, for
    /// `HatchetApi` implementations that filter runs in memory.
    /// Non-string metadata values are compared by their JSON rendering.
    pub fn has_metadata(&self, key: &str, value: &str) -> bool {
        match self.additional_metadata.get(key) {
            Some(Value::String(s)) => s == value,
            Some(other) => other.to_string() == value,
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_has_metadata() {
        let run = WorkflowRun::new("r1", RunStatus::Running)
            .with_metadata("audit_id", "a-1")
            .with_metadata("attempt", json!(2));

        assert!(run.has_metadata("audit_id", "a-1"));
        assert!(run.has_metadata("attempt", "2"));
        assert!(!run.has_metadata("audit_id", "a-2"));
        assert!(!run.has_metadata("missing", "a-1"));
    }
}
