//! Composed filter for listing workflow runs.

use chrono::{DateTime, Duration, Utc};

use crate::{CoreError, RunStatus, WorkflowId};

/// Default look-back window for run listings.
pub const DEFAULT_SINCE_HOURS: u32 = 24;

/// Longest look-back window a caller may request (one year).
pub const MAX_SINCE_HOURS: u32 = 24 * 365;

/// Default number of runs returned by a listing.
pub const DEFAULT_LIMIT: u32 = 50;

/// Largest page a single listing may request.
pub const MAX_LIMIT: u32 = 1000;

/// Filter passed to the run listing endpoint.
#[derive(Debug, Clone, PartialEq)]
pub struct RunFilter {
    /// Only runs created at or after this instant.
    pub since: DateTime<Utc>,

    /// Only runs created before this instant.
    pub until: Option<DateTime<Utc>>,

    /// Only runs in one of these statuses. Empty means any.
    pub statuses: Vec<RunStatus>,

    /// Only runs of these workflows. Empty means any.
    pub workflow_ids: Vec<WorkflowId>,

    /// Metadata pairs that must all match.
    pub additional_metadata: Vec<(String, String)>,

    /// Page size.
    pub limit: u32,

    /// Page offset.
    pub offset: u32,
}

impl RunFilter {
    /// Runs created in the `hours` before `now`, default page size.
    pub fn since_hours(hours: u32, now: DateTime<Utc>) -> Result<Self, CoreError> {
        validate_since_hours(hours)?;
        Ok(Self {
            since: now - Duration::hours(i64::from(hours)),
            until: None,
            statuses: Vec::new(),
            workflow_ids: Vec::new(),
            additional_metadata: Vec::new(),
            limit: DEFAULT_LIMIT,
            offset: 0,
        })
    }

    /// Builder method to restrict to a single status.
    pub fn with_status(mut self, status: Option<RunStatus>) -> Self {
        if let Some(status) = status {
            self.statuses.push(status);
        }
        self
    }

    /// Builder method to restrict to a set of workflows.
    pub fn with_workflow_ids(mut self, ids: Vec<WorkflowId>) -> Self {
        self.workflow_ids = ids;
        self
    }

    /// Builder method to require a metadata key/value pair.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.additional_metadata.push((key.into(), value.into()));
        self
    }

    /// Builder method to set the page size.
    pub fn with_limit(mut self, limit: u32) -> Result<Self, CoreError> {
        validate_limit(limit)?;
        self.limit = limit;
        Ok(self)
    }

    /// Metadata pairs in the `key:value` form the Hatchet API expects.
    pub fn metadata_query_values(&self) -> Vec<String> {
        self.additional_metadata
            .iter()
            .map(|(k, v)| format!("{}:{}", k, v))
            .collect()
    }
}

/// Check a look-back window in hours.
pub fn validate_since_hours(hours: u32) -> Result<(), CoreError> {
    if hours == 0 || hours > MAX_SINCE_HOURS {
        return Err(CoreError::InvalidInput(format!(
            "since_hours must be between 1 and {}, got {}",
            MAX_SINCE_HOURS, hours
        )));
    }
    Ok(())
}

/// Check a requested page size.
pub fn validate_limit(limit: u32) -> Result<(), CoreError> {
    if limit == 0 || limit > MAX_LIMIT {
        return Err(CoreError::InvalidInput(format!(
            "limit must be between 1 and {}, got {}",
            MAX_LIMIT, limit
        )));
    }
    Ok(())
}
