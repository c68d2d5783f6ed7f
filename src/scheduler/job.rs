//! Job records owned by the scheduler

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::crawl_engine::CrawlRequest;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct JobId(Uuid);

impl JobId {
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl JobStatus {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub id: JobId,
    pub request: CrawlRequest,
    pub status: JobStatus,
    pub created_at: DateTime<Utc>,
    /// Failed attempts so far; a successful attempt does not count
    pub attempts: u32,
    pub last_error: Option<String>,
    /// When the job reached a terminal status
    pub finished_at: Option<DateTime<Utc>>,
    /// Arrival order, breaks `created_at` ties
    pub(crate) seq: u64,
}

impl Job {
    pub(crate) fn new(request: CrawlRequest, created_at: DateTime<Utc>, seq: u64) -> Self {
        Self {
            id: JobId::new(),
            request,
            status: JobStatus::Pending,
            created_at,
            attempts: 0,
            last_error: None,
            finished_at: None,
            seq,
        }
    }

    pub(crate) fn priority_key(&self) -> (DateTime<Utc>, u64) {
        (self.created_at, self.seq)
    }

    pub(crate) fn finish(&mut self, status: JobStatus, now: DateTime<Utc>) {
        self.status = status;
        self.finished_at = Some(now);
    }
}

/// Point-in-time count of jobs per status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobStats {
    pub total: usize,
    pub pending: usize,
    pub processing: usize,
    pub completed: usize,
    pub failed: usize,
}

impl<'a> FromIterator<&'a Job> for JobStats {
    fn from_iter<I: IntoIterator<Item = &'a Job>>(jobs: I) -> Self {
        jobs.into_iter().fold(Self::default(), |mut stats, job| {
            stats.total += 1;
            match job.status {
                JobStatus::Pending => stats.pending += 1,
                JobStatus::Processing => stats.processing += 1,
                JobStatus::Completed => stats.completed += 1,
                JobStatus::Failed => stats.failed += 1,
            }
            stats
        })
    }
}
