//! Single-flight crawl job scheduler
//!
//! Jobs wait in a pending pool ordered by arrival. One worker task drains the
//! pool, running at most one crawl at a time; failed crawls return to the pool
//! after a fixed delay until the attempt ceiling is reached. The worker exits
//! when the pool is empty and is restarted by the next `submit`.

pub mod job;

use chrono::{DateTime, Utc};
use log::{debug, error, info, warn};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::config::SchedulerConfig;
use crate::crawl_engine::{CrawlRequest, Crawler, ScanResult};
use crate::session::{SessionStatus, SessionStore, SessionUpdate};

pub use job::{Job, JobId, JobStats, JobStatus};

#[derive(Debug, Default)]
struct JobTable {
    jobs: HashMap<JobId, Job>,
    next_seq: u64,
}

impl JobTable {
    /// Move the oldest pending job to `processing`
    fn claim_next(&mut self) -> Option<(JobId, CrawlRequest)> {
        let job = self
            .jobs
            .values_mut()
            .filter(|job| job.status == JobStatus::Pending)
            .min_by_key(|job| job.priority_key())?;
        job.status = JobStatus::Processing;
        Some((job.id, job.request.clone()))
    }

    fn has_pending(&self) -> bool {
        self.jobs
            .values()
            .any(|job| job.status == JobStatus::Pending)
    }
}

struct Inner {
    jobs: Mutex<JobTable>,
    processing: AtomicBool,
    crawler: Arc<dyn Crawler>,
    store: Arc<dyn SessionStore>,
    config: SchedulerConfig,
}

/// Cheap to clone; clones share the job table and the worker
#[derive(Clone)]
pub struct JobScheduler {
    inner: Arc<Inner>,
}

impl JobScheduler {
    #[must_use]
    pub fn new(
        crawler: Arc<dyn Crawler>,
        store: Arc<dyn SessionStore>,
        config: SchedulerConfig,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                jobs: Mutex::new(JobTable::default()),
                processing: AtomicBool::new(false),
                crawler,
                store,
                config,
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &SchedulerConfig {
        &self.inner.config
    }

    /// Enqueue a crawl and start the worker if it is idle
    ///
    /// Never blocks on the running crawl.
    pub fn submit(&self, request: CrawlRequest) -> JobId {
        let id = {
            let mut table = self.inner.jobs.lock();
            let seq = table.next_seq;
            table.next_seq += 1;
            let job = Job::new(request, Utc::now(), seq);
            let id = job.id;
            info!(
                target: "seo_crawler::scheduler",
                "Queued job {id} for {} (session {})",
                job.request.seed_url,
                job.request.session_id
            );
            table.jobs.insert(id, job);
            id
        };
        Inner::ensure_worker(&self.inner);
        id
    }

    #[must_use]
    pub fn stats(&self) -> JobStats {
        self.inner.jobs.lock().jobs.values().collect()
    }

    #[must_use]
    pub fn job(&self, id: JobId) -> Option<Job> {
        self.inner.jobs.lock().jobs.get(&id).cloned()
    }

    /// Whether the worker task is currently running
    #[must_use]
    pub fn is_processing(&self) -> bool {
        self.inner.processing.load(Ordering::SeqCst)
    }

    pub fn evict_stale(&self) -> usize {
        self.evict_stale_at(Utc::now())
    }

    /// Remove terminal jobs that finished more than the retention window before `now`
    ///
    /// Returns the number of jobs removed.
    pub fn evict_stale_at(&self, now: DateTime<Utc>) -> usize {
        let retention = chrono::Duration::from_std(self.inner.config.retention)
            .unwrap_or(chrono::Duration::MAX);
        let mut table = self.inner.jobs.lock();
        let initial_count = table.jobs.len();

        table.jobs.retain(|id, job| {
            let expired = job.status.is_terminal()
                && job
                    .finished_at
                    .and_then(|finished| finished.checked_add_signed(retention))
                    .is_some_and(|deadline| deadline <= now);
            if expired {
                debug!(
                    target: "seo_crawler::scheduler",
                    "Evicting job {id} ({:?}, finished {:?})",
                    job.status,
                    job.finished_at
                );
            }
            !expired
        });

        let evicted = initial_count - table.jobs.len();
        if evicted > 0 {
            debug!(target: "seo_crawler::scheduler", "Evicted {evicted} stale jobs");
        }
        evicted
    }

    /// Start background eviction task
    ///
    /// Runs `evict_stale` every `cleanup_interval`. Abort the returned handle
    /// to stop it.
    pub fn start_cleanup_task(&self) -> JoinHandle<()> {
        let scheduler = self.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(scheduler.inner.config.cleanup_interval);
            loop {
                interval.tick().await;
                scheduler.evict_stale();
            }
        })
    }
}

impl Inner {
    fn ensure_worker(this: &Arc<Self>) {
        if this
            .processing
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return;
        }

        match Handle::try_current() {
            Ok(handle) => {
                handle.spawn(Arc::clone(this).run_loop());
            }
            Err(_) => {
                warn!(
                    target: "seo_crawler::scheduler",
                    "No tokio runtime; job stays pending until the next submit"
                );
                this.processing.store(false, Ordering::SeqCst);
            }
        }
    }

    async fn run_loop(self: Arc<Self>) {
        loop {
            loop {
                let next = self.jobs.lock().claim_next();
                let Some((id, request)) = next else { break };
                self.execute(id, request).await;
            }

            self.processing.store(false, Ordering::SeqCst);

            // A submit may have landed between the last claim and the release
            let has_pending = self.jobs.lock().has_pending();
            if !has_pending
                || self
                    .processing
                    .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
                    .is_err()
            {
                break;
            }
        }
        debug!(target: "seo_crawler::scheduler", "Worker idle");
    }

    async fn execute(&self, id: JobId, request: CrawlRequest) {
        info!(
            target: "seo_crawler::scheduler",
            "Starting job {id} for {}",
            request.seed_url
        );

        let crawler = Arc::clone(&self.crawler);
        let session_id = request.session_id.clone();
        let seed_url = request.seed_url.clone();
        let outcome: Result<ScanResult, String> =
            match tokio::spawn(async move { crawler.run(&request).await }).await {
                Ok(Ok(result)) => Ok(result),
                Ok(Err(e)) => Err(e.to_string()),
                Err(e) => Err(format!("crawl task aborted: {e}")),
            };

        match outcome {
            Ok(result) => {
                if let Some(job) = self.jobs.lock().jobs.get_mut(&id) {
                    job.finish(JobStatus::Completed, Utc::now());
                }
                info!(
                    target: "seo_crawler::scheduler",
                    "Job {id} completed: {} pages processed, {} skipped",
                    result.pages_processed,
                    result.pages_skipped
                );
            }
            Err(reason) => self.handle_failure(id, &session_id, &seed_url, reason).await,
        }
    }

    async fn handle_failure(&self, id: JobId, session_id: &str, seed_url: &str, reason: String) {
        let exhausted = {
            let mut table = self.jobs.lock();
            let Some(job) = table.jobs.get_mut(&id) else {
                return;
            };
            job.attempts += 1;
            job.last_error = Some(reason.clone());
            let exhausted = job.attempts >= self.config.max_attempts;
            if exhausted {
                job.finish(JobStatus::Failed, Utc::now());
            }
            warn!(
                target: "seo_crawler::scheduler",
                "Job {id} attempt {} of {} failed: {reason}",
                job.attempts,
                self.config.max_attempts
            );
            exhausted
        };

        if exhausted {
            error!(target: "seo_crawler::scheduler", "Job {id} failed permanently");
            let update = SessionUpdate::status(SessionStatus::Failed)
                .with_scan_data(ScanResult::failed(seed_url, reason));
            if let Err(e) = self.store.update(session_id, update).await {
                warn!(
                    target: "seo_crawler::scheduler",
                    "Failed to mark session {session_id} failed: {e}"
                );
            }
            return;
        }

        // Stays `processing` through the delay so nothing else starts meanwhile
        tokio::time::sleep(self.config.retry_delay).await;

        if let Some(job) = self.jobs.lock().jobs.get_mut(&id) {
            job.status = JobStatus::Pending;
        }
    }
}
