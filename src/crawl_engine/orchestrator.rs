//! Main crawl orchestration logic
//!
//! Coordinates one bounded crawl:
//! - Render session lifecycle (opened at start, closed on every path)
//! - Breadth-first worklist traversal with depth and page ceilings
//! - Signal extraction and recommendation per page
//! - Periodic progress flushes to the session store

use chrono::Utc;
use futures::FutureExt;
use futures::future::BoxFuture;
use log::{debug, info, warn};
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use url::Url;

use super::crawl_types::{CrawlError, CrawlRequest, CrawlResult, Crawler};
use super::link_processor::CrawlState;
use super::progress::{NoOpProgress, ProgressReporter};
use super::report::ScanResult;
use crate::config::CrawlConfig;
use crate::page_extractor::extract_page_signal;
use crate::recommendation::RecommendationEngine;
use crate::renderer::{RenderBackend, RenderSession};
use crate::session::{SessionStatus, SessionStore, SessionUpdate};

/// Bounded SEO crawler
///
/// Holds only shared, immutable collaborators; every crawl owns its own
/// frontier and aggregate, so one instance can serve every job.
pub struct SeoCrawler {
    config: CrawlConfig,
    renderer: Arc<dyn RenderBackend>,
    store: Arc<dyn SessionStore>,
    engine: RecommendationEngine,
    progress: Arc<dyn ProgressReporter>,
}

impl SeoCrawler {
    #[must_use]
    pub fn new(
        config: CrawlConfig,
        renderer: Arc<dyn RenderBackend>,
        store: Arc<dyn SessionStore>,
    ) -> Self {
        let engine = RecommendationEngine::from_config(&config);
        Self {
            config,
            renderer,
            store,
            engine,
            progress: Arc::new(NoOpProgress),
        }
    }

    #[must_use]
    pub fn with_progress(mut self, progress: Arc<dyn ProgressReporter>) -> Self {
        self.progress = progress;
        self
    }

    #[must_use]
    pub fn config(&self) -> &CrawlConfig {
        &self.config
    }

    /// Run one crawl to completion
    ///
    /// Marks the session `scanning`, traverses, then persists the final
    /// aggregate as `completed`. Job-level failures leave the session
    /// `scanning` with a minimal error aggregate; the scheduler decides when
    /// the session becomes `failed`.
    pub async fn crawl(&self, request: &CrawlRequest) -> CrawlResult<ScanResult> {
        self.progress.report_started(&request.seed_url);

        let outcome = self.crawl_with_session(request).await;

        match outcome {
            Ok(mut result) => {
                result.finalize(Utc::now());
                self.persist(
                    &request.session_id,
                    SessionUpdate::status(SessionStatus::Completed).with_scan_data(result.clone()),
                )
                .await;
                self.progress.report_completed(&result);
                Ok(result)
            }
            Err(e) => {
                let reason = e.to_string();
                self.progress.report_error(&reason);
                self.persist(
                    &request.session_id,
                    SessionUpdate::status(SessionStatus::Scanning)
                        .with_scan_data(ScanResult::failed(&request.seed_url, reason)),
                )
                .await;
                Err(e)
            }
        }
    }

    async fn crawl_with_session(&self, request: &CrawlRequest) -> CrawlResult<ScanResult> {
        let seed = Url::parse(&request.seed_url)
            .map_err(|e| CrawlError::InvalidSeed(format!("{}: {e}", request.seed_url)))?;

        self.persist(
            &request.session_id,
            SessionUpdate::status(SessionStatus::Scanning),
        )
        .await;

        let mut session = self
            .renderer
            .open()
            .await
            .map_err(|e| CrawlError::RendererUnavailable(format!("{e:#}")))?;
        self.progress.report_renderer_ready();

        let outcome = AssertUnwindSafe(self.traverse(session.as_mut(), &seed, request))
            .catch_unwind()
            .await
            .unwrap_or_else(|_| Err(CrawlError::Other("traversal panicked".to_string())));

        // The session is released whatever the traversal outcome
        if let Err(e) = session.close().await {
            warn!(target: "seo_crawler::crawl", "Failed to close render session: {e:#}");
        }

        outcome
    }

    async fn traverse(
        &self,
        session: &mut dyn RenderSession,
        seed: &Url,
        request: &CrawlRequest,
    ) -> CrawlResult<ScanResult> {
        let render_options = self.config.render_options();
        let settings = self.config.extractor_settings();
        let max_pages = self.config.max_pages();
        let max_depth = self.config.max_depth();
        let expansion_depth = self.config.link_expansion_depth();

        let mut state = CrawlState::with_seed(seed.as_str());
        let mut result = ScanResult::default();

        while let Some(item) = state.next_unvisited() {
            if result.attempted() >= max_pages {
                info!(target: "seo_crawler::crawl", "Reached page limit of {max_pages}");
                break;
            }
            if item.depth >= max_depth {
                debug!(
                    target: "seo_crawler::crawl",
                    "Skipping {} beyond depth ceiling {max_depth}",
                    item.url
                );
                continue;
            }

            self.progress.report_page_started(&item.url, item.depth);

            let facts = match session.render(&item.url, &render_options).await {
                Ok(facts) => facts,
                Err(e) if e.is_fatal() => return Err(CrawlError::SessionLost(e.to_string())),
                Err(e) => {
                    let reason = e.to_string();
                    self.progress.report_page_skipped(&item.url, &reason);
                    result.record_error(item.url, reason);
                    continue;
                }
            };

            // Frontier URLs are normalized, so this only fails on corrupted state
            let page_url = match Url::parse(&item.url) {
                Ok(url) => url,
                Err(e) => {
                    result.record_error(item.url, format!("unparseable URL: {e}"));
                    continue;
                }
            };

            let signal = extract_page_signal(&page_url, seed, facts, &settings);

            let next_depth = item.depth + 1;
            if item.depth < expansion_depth && next_depth < max_depth {
                let added = state.enqueue_links(
                    &signal.internal_links,
                    next_depth,
                    self.config.links_per_page(),
                );
                debug!(
                    target: "seo_crawler::links",
                    "Found {} links on {}, {added} enqueued",
                    signal.internal_links.len(),
                    item.url
                );
            }

            let recommendation = self.engine.recommend(&signal);
            result.record_page(signal, recommendation);
            self.progress
                .report_page_processed(&item.url, result.pages_processed);

            if result.pages_processed % self.config.flush_every() == 0 {
                self.persist(
                    &request.session_id,
                    SessionUpdate::status(SessionStatus::Scanning).with_scan_data(result.clone()),
                )
                .await;
                self.progress.report_flushed(result.pages_processed);
            }
        }

        Ok(result)
    }

    /// Best-effort session write; failures are logged and swallowed
    async fn persist(&self, session_id: &str, update: SessionUpdate) {
        if let Err(e) = self.store.update(session_id, update).await {
            warn!(
                target: "seo_crawler::crawl",
                "Failed to update session {session_id}: {e}"
            );
        }
    }
}

impl Crawler for SeoCrawler {
    fn run<'a>(&'a self, request: &'a CrawlRequest) -> BoxFuture<'a, CrawlResult<ScanResult>> {
        self.crawl(request).boxed()
    }
}
