//! Test utilities and fakes shared by the seo_crawler integration tests

#![allow(dead_code)]

use anyhow::anyhow;
use futures::FutureExt;
use futures::future::BoxFuture;
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use seo_crawler::{
    CrawlConfig, CrawlError, CrawlRequest, CrawlResult, Crawler, Headings, Job, JobId,
    JobScheduler, RawImage, RawPageFacts, RenderBackend, RenderError, RenderOptions,
    RenderSession, ScanResult, SessionRecord, SessionStore, SessionUpdate, StoreError,
};

pub const SEED: &str = "https://example.com/";

/// Absolute URL on the test site
pub fn url(path: &str) -> String {
    format!("https://example.com{path}")
}

/// Page facts with a title, a single H1, enough words and the given hrefs
pub fn page(title: &str, links: &[&str]) -> RawPageFacts {
    RawPageFacts {
        title: Some(title.to_string()),
        meta_description: None,
        headings: Headings {
            h1: vec![title.to_string()],
            ..Headings::default()
        },
        images: vec![RawImage {
            src: "/img/hero-banner.png".to_string(),
            alt: None,
        }],
        word_count: 450,
        links: links.iter().map(|l| (*l).to_string()).collect(),
    }
}

/// Default crawl configuration, with overrides applied by the caller
pub fn config() -> seo_crawler::CrawlConfigBuilder {
    CrawlConfig::builder().brand(Some("Example"))
}

#[derive(Debug, Clone)]
pub enum Outcome {
    Page(RawPageFacts),
    Timeout,
    NavigationError(String),
    Crash,
    Panic,
}

#[derive(Default)]
struct FakeState {
    pages: Mutex<HashMap<String, Outcome>>,
    renders: Mutex<Vec<String>>,
    opens: AtomicUsize,
    closes: AtomicUsize,
    failing_opens: AtomicUsize,
    render_delay: Mutex<Option<Duration>>,
}

/// Scripted render backend
///
/// Unknown URLs fail with a navigation error, like an unresolvable host.
#[derive(Clone, Default)]
pub struct FakeRenderer {
    state: Arc<FakeState>,
}

impl FakeRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(self, path: &str, facts: RawPageFacts) -> Self {
        self.state.pages.lock().insert(url(path), Outcome::Page(facts));
        self
    }

    pub fn outcome(self, path: &str, outcome: Outcome) -> Self {
        self.state.pages.lock().insert(url(path), outcome);
        self
    }

    pub fn fail_next_opens(self, count: usize) -> Self {
        self.state.failing_opens.store(count, Ordering::SeqCst);
        self
    }

    pub fn render_delay(self, delay: Duration) -> Self {
        *self.state.render_delay.lock() = Some(delay);
        self
    }

    pub fn renders(&self) -> Vec<String> {
        self.state.renders.lock().clone()
    }

    pub fn opens(&self) -> usize {
        self.state.opens.load(Ordering::SeqCst)
    }

    pub fn closes(&self) -> usize {
        self.state.closes.load(Ordering::SeqCst)
    }
}

impl RenderBackend for FakeRenderer {
    fn open(&self) -> BoxFuture<'_, anyhow::Result<Box<dyn RenderSession>>> {
        async move {
            let failing = self.state.failing_opens.load(Ordering::SeqCst);
            if failing > 0 {
                self.state.failing_opens.store(failing - 1, Ordering::SeqCst);
                return Err(anyhow!("browser launch failed"));
            }
            self.state.opens.fetch_add(1, Ordering::SeqCst);
            Ok(Box::new(FakeSession {
                state: Arc::clone(&self.state),
            }) as Box<dyn RenderSession>)
        }
        .boxed()
    }
}

struct FakeSession {
    state: Arc<FakeState>,
}

impl RenderSession for FakeSession {
    fn render<'a>(
        &'a mut self,
        url: &'a str,
        options: &'a RenderOptions,
    ) -> BoxFuture<'a, Result<RawPageFacts, RenderError>> {
        async move {
            let delay = *self.state.render_delay.lock();
            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            self.state.renders.lock().push(url.to_string());
            let outcome = self.state.pages.lock().get(url).cloned();
            match outcome {
                Some(Outcome::Page(facts)) => Ok(facts),
                Some(Outcome::Timeout) => Err(RenderError::Timeout(options.navigation_timeout)),
                Some(Outcome::NavigationError(msg)) => Err(RenderError::Navigation(msg)),
                Some(Outcome::Crash) => Err(RenderError::Session("browser crashed".into())),
                Some(Outcome::Panic) => panic!("renderer bug on {url}"),
                None => Err(RenderError::Navigation("net::ERR_NAME_NOT_RESOLVED".into())),
            }
        }
        .boxed()
    }

    fn close(self: Box<Self>) -> BoxFuture<'static, anyhow::Result<()>> {
        self.state.closes.fetch_add(1, Ordering::SeqCst);
        async { Ok(()) }.boxed()
    }
}

/// Session store that records every update and can be told to fail
#[derive(Default)]
pub struct RecordingStore {
    records: Mutex<HashMap<String, SessionRecord>>,
    updates: Mutex<Vec<(String, SessionUpdate)>>,
    fail_writes: bool,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every write fails with `StoreError::Unavailable`
    pub fn failing() -> Self {
        Self {
            fail_writes: true,
            ..Self::default()
        }
    }

    pub fn updates(&self) -> Vec<(String, SessionUpdate)> {
        self.updates.lock().clone()
    }

    pub fn record(&self, id: &str) -> Option<SessionRecord> {
        self.records.lock().get(id).cloned()
    }

    pub fn seed(&self, id: &str) {
        let now = chrono::Utc::now();
        self.records.lock().insert(
            id.to_string(),
            SessionRecord::new(id, SEED, now, now + chrono::Duration::hours(1)),
        );
    }
}

impl SessionStore for RecordingStore {
    fn get<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<Option<SessionRecord>, StoreError>> {
        async move { Ok(self.records.lock().get(id).cloned()) }.boxed()
    }

    fn insert(&self, record: SessionRecord) -> BoxFuture<'_, Result<(), StoreError>> {
        async move {
            if self.fail_writes {
                return Err(StoreError::Unavailable("disk full".into()));
            }
            self.records.lock().insert(record.id.clone(), record);
            Ok(())
        }
        .boxed()
    }

    fn update<'a>(
        &'a self,
        id: &'a str,
        update: SessionUpdate,
    ) -> BoxFuture<'a, Result<(), StoreError>> {
        async move {
            self.updates.lock().push((id.to_string(), update.clone()));
            if self.fail_writes {
                return Err(StoreError::Unavailable("disk full".into()));
            }
            let mut records = self.records.lock();
            let record = records
                .get_mut(id)
                .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
            update.apply(record);
            Ok(())
        }
        .boxed()
    }
}

/// Crawler returning scripted outcomes in call order
///
/// Once the script is exhausted every run succeeds with an empty aggregate.
#[derive(Default)]
pub struct ScriptedCrawler {
    outcomes: Mutex<VecDeque<CrawlResult<ScanResult>>>,
    calls: Mutex<Vec<CrawlRequest>>,
    delay: Duration,
    panics: AtomicUsize,
    running: AtomicUsize,
    max_running: AtomicUsize,
}

impl ScriptedCrawler {
    pub fn new(outcomes: Vec<CrawlResult<ScanResult>>) -> Self {
        Self {
            outcomes: Mutex::new(outcomes.into()),
            ..Self::default()
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// The first `count` runs panic instead of returning
    pub fn panicking(self, count: usize) -> Self {
        self.panics.store(count, Ordering::SeqCst);
        self
    }

    pub fn calls(&self) -> Vec<CrawlRequest> {
        self.calls.lock().clone()
    }

    pub fn max_running(&self) -> usize {
        self.max_running.load(Ordering::SeqCst)
    }
}

impl Crawler for ScriptedCrawler {
    fn run<'a>(&'a self, request: &'a CrawlRequest) -> BoxFuture<'a, CrawlResult<ScanResult>> {
        async move {
            self.calls.lock().push(request.clone());
            if self
                .panics
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok()
            {
                panic!("crawl of {} blew up", request.seed_url);
            }
            let running = self.running.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_running.fetch_max(running, Ordering::SeqCst);

            tokio::time::sleep(self.delay).await;

            self.running.fetch_sub(1, Ordering::SeqCst);
            let next = self.outcomes.lock().pop_front();
            next.unwrap_or_else(|| Ok(ScanResult::default()))
        }
        .boxed()
    }
}

pub fn transient() -> CrawlResult<ScanResult> {
    Err(CrawlError::RendererUnavailable("browser launch failed".into()))
}

/// Poll until job `id` reaches a terminal status
pub async fn wait_for_terminal(scheduler: &JobScheduler, id: JobId) -> Job {
    for _ in 0..100_000 {
        if let Some(job) = scheduler.job(id)
            && job.status.is_terminal()
        {
            return job;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("job {id} never finished");
}

/// Poll until the scheduler worker has gone idle
pub async fn wait_until_idle(scheduler: &JobScheduler) {
    for _ in 0..100_000 {
        let stats = scheduler.stats();
        if !scheduler.is_processing() && stats.pending == 0 && stats.processing == 0 {
            return;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    panic!("scheduler never went idle");
}
