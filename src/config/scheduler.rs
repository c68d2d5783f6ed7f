//! Retry and retention policy for the job scheduler

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::utils::{
    DEFAULT_CLEANUP_INTERVAL_SECS, DEFAULT_JOB_RETENTION_SECS, DEFAULT_MAX_ATTEMPTS,
    DEFAULT_RETRY_DELAY_SECS,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerConfig {
    /// A job is marked failed once this many attempts have failed
    pub max_attempts: u32,
    /// Wait before a failed job re-enters the pending pool
    pub retry_delay: Duration,
    /// Terminal jobs older than this are evicted
    pub retention: Duration,
    /// Period of the background eviction timer
    pub cleanup_interval: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_delay: Duration::from_secs(DEFAULT_RETRY_DELAY_SECS),
            retention: Duration::from_secs(DEFAULT_JOB_RETENTION_SECS),
            cleanup_interval: Duration::from_secs(DEFAULT_CLEANUP_INTERVAL_SECS),
        }
    }
}

impl SchedulerConfig {
    #[must_use]
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts.max(1);
        self
    }

    #[must_use]
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    #[must_use]
    pub fn with_retention(mut self, retention: Duration) -> Self {
        self.retention = retention;
        self
    }

    #[must_use]
    pub fn with_cleanup_interval(mut self, interval: Duration) -> Self {
        self.cleanup_interval = interval;
        self
    }
}
