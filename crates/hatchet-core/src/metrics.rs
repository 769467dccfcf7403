//! Per-status run counts.

use serde::Serialize;

use crate::RunStatus;

/// Number of runs in each status over some sample.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct QueueCounts {
    pub queued: u64,
    pub running: u64,
    pub completed: u64,
    pub failed: u64,
    pub cancelled: u64,
    /// Every run seen, including runs with an unknown status.
    pub total: u64,
}

impl QueueCounts {
    /// Count one run.
    pub fn record(&mut self, status: Option<RunStatus>) {
        self.total += 1;
        match status {
            Some(RunStatus::Queued) => self.queued += 1,
            Some(RunStatus::Running) => self.running += 1,
            Some(RunStatus::Completed) => self.completed += 1,
            Some(RunStatus::Failed) => self.failed += 1,
            Some(RunStatus::Cancelled) => self.cancelled += 1,
            None => {}
        }
    }

    /// Count every status in an iterator.
    pub fn tally<I>(statuses: I) -> Self
    where
        I: IntoIterator<Item = Option<RunStatus>>,
    {
        let mut counts = Self::default();
        for status in statuses {
            counts.record(status);
        }
        counts
    }

    /// Runs still waiting or executing.
    pub fn in_flight(&self) -> u64 {
        self.queued + self.running
    }
}
