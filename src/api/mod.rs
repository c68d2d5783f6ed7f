//! Operations exposed to a request/response layer
//!
//! `SeoService` validates input, creates the session record and hands the
//! crawl to the scheduler. Status and result queries read the session store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

use crate::crawl_engine::{CrawlRequest, PriorityBreakdown, ScanResult};
use crate::scheduler::{JobId, JobScheduler, JobStats};
use crate::session::{SessionRecord, SessionStatus, SessionStore, StoreError};
use crate::utils::{DEFAULT_SESSION_TTL_SECS, UrlValidationError, validate_seed_url};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] UrlValidationError),

    #[error("Session not found: {0}")]
    NotFound(String),

    #[error("Results not ready: session is {0}")]
    NotReady(SessionStatus),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Returned by `start_crawl`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlTicket {
    pub session_id: String,
    pub job_id: JobId,
    pub url: String,
}

/// Progress summary of one session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStatusView {
    pub session_id: String,
    pub url: String,
    pub status: SessionStatus,
    pub pages_processed: usize,
    /// Pages attempted so far: processed plus skipped
    pub total_pages: usize,
    pub error_count: usize,
    pub priority_breakdown: PriorityBreakdown,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl From<&SessionRecord> for SessionStatusView {
    fn from(record: &SessionRecord) -> Self {
        let (pages_processed, total_pages, error_count, priority_breakdown) =
            match &record.scan_data {
                Some(scan) => (
                    scan.pages_processed,
                    scan.attempted(),
                    scan.errors.len(),
                    scan.priority_breakdown(),
                ),
                None => (0, 0, 0, PriorityBreakdown::default()),
            };
        Self {
            session_id: record.id.clone(),
            url: record.url.clone(),
            status: record.status,
            pages_processed,
            total_pages,
            error_count,
            priority_breakdown,
            created_at: record.created_at,
            expires_at: record.expires_at,
        }
    }
}

#[derive(Clone)]
pub struct SeoService {
    scheduler: JobScheduler,
    store: Arc<dyn SessionStore>,
    session_ttl: Duration,
}

impl SeoService {
    #[must_use]
    pub fn new(scheduler: JobScheduler, store: Arc<dyn SessionStore>) -> Self {
        Self {
            scheduler,
            store,
            session_ttl: Duration::from_secs(DEFAULT_SESSION_TTL_SECS),
        }
    }

    #[must_use]
    pub fn with_session_ttl(mut self, ttl: Duration) -> Self {
        self.session_ttl = ttl;
        self
    }

    #[must_use]
    pub fn scheduler(&self) -> &JobScheduler {
        &self.scheduler
    }

    /// Validate `url`, open a session and queue its crawl
    ///
    /// Rejected URLs never create a session or a job.
    pub async fn start_crawl(&self, url: &str) -> Result<CrawlTicket, ApiError> {
        let mut seed = validate_seed_url(url)?;
        seed.set_fragment(None);
        let session_id = Uuid::new_v4().to_string();
        let now = Utc::now();
        let ttl = chrono::Duration::from_std(self.session_ttl).unwrap_or(chrono::Duration::MAX);
        let expires_at = now.checked_add_signed(ttl).unwrap_or(DateTime::<Utc>::MAX_UTC);

        self.store
            .insert(SessionRecord::new(
                session_id.clone(),
                seed.as_str(),
                now,
                expires_at,
            ))
            .await?;

        let job_id = self
            .scheduler
            .submit(CrawlRequest::new(seed.as_str(), session_id.clone()));

        Ok(CrawlTicket {
            session_id,
            job_id,
            url: seed.into(),
        })
    }

    pub async fn get_status(&self, session_id: &str) -> Result<SessionStatusView, ApiError> {
        let record = self.record(session_id).await?;
        Ok(SessionStatusView::from(&record))
    }

    /// Full aggregate, available once the session is completed
    pub async fn get_results(&self, session_id: &str) -> Result<ScanResult, ApiError> {
        let record = self.record(session_id).await?;
        match (record.status, record.scan_data) {
            (SessionStatus::Completed, Some(scan)) => Ok(scan),
            (status, _) => Err(ApiError::NotReady(status)),
        }
    }

    #[must_use]
    pub fn queue_stats(&self) -> JobStats {
        self.scheduler.stats()
    }

    async fn record(&self, session_id: &str) -> Result<SessionRecord, ApiError> {
        self.store
            .get(session_id)
            .await?
            .ok_or_else(|| ApiError::NotFound(session_id.to_string()))
    }
}
