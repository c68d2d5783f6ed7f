//! Progress reporting abstraction for crawl operations
//!
//! Defines the `ProgressReporter` trait for lifecycle event reporting
//! and provides no-op and logging implementations.

use log::{debug, info, warn};

use super::report::ScanResult;

/// Trait for reporting crawl progress at key lifecycle events
///
/// Implementations can send updates to channels, log to console, update UI, etc.
pub trait ProgressReporter: Send + Sync {
    /// Report that a crawl has started from `seed`
    fn report_started(&self, seed: &str);

    /// Report that the render session is ready
    fn report_renderer_ready(&self);

    /// Report that a page is about to be rendered
    fn report_page_started(&self, url: &str, depth: u8);

    /// Report that a page was rendered and analyzed
    fn report_page_processed(&self, url: &str, processed: usize);

    /// Report that a page failed and was skipped
    fn report_page_skipped(&self, url: &str, reason: &str);

    /// Report that the partial aggregate was flushed to the session store
    fn report_flushed(&self, processed: usize);

    /// Report that the crawl has completed successfully
    fn report_completed(&self, result: &ScanResult);

    /// Report a job-level error
    fn report_error(&self, error: &str);
}

/// Progress reporter that does nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpProgress;

impl ProgressReporter for NoOpProgress {
    #[inline(always)]
    fn report_started(&self, _seed: &str) {}

    #[inline(always)]
    fn report_renderer_ready(&self) {}

    #[inline(always)]
    fn report_page_started(&self, _url: &str, _depth: u8) {}

    #[inline(always)]
    fn report_page_processed(&self, _url: &str, _processed: usize) {}

    #[inline(always)]
    fn report_page_skipped(&self, _url: &str, _reason: &str) {}

    #[inline(always)]
    fn report_flushed(&self, _processed: usize) {}

    #[inline(always)]
    fn report_completed(&self, _result: &ScanResult) {}

    #[inline(always)]
    fn report_error(&self, _error: &str) {}
}

/// Progress reporter writing to the `log` facade
#[derive(Debug, Clone, Copy, Default)]
pub struct LogProgress;

impl ProgressReporter for LogProgress {
    fn report_started(&self, seed: &str) {
        info!(target: "seo_crawler::progress", "Crawl started from {seed}");
    }

    fn report_renderer_ready(&self) {
        debug!(target: "seo_crawler::progress", "Render session ready");
    }

    fn report_page_started(&self, url: &str, depth: u8) {
        debug!(target: "seo_crawler::progress", "Rendering {url} (depth {depth})");
    }

    fn report_page_processed(&self, url: &str, processed: usize) {
        info!(target: "seo_crawler::progress", "[{processed}] Analyzed {url}");
    }

    fn report_page_skipped(&self, url: &str, reason: &str) {
        warn!(target: "seo_crawler::progress", "Skipped {url}: {reason}");
    }

    fn report_flushed(&self, processed: usize) {
        debug!(target: "seo_crawler::progress", "Flushed progress after {processed} pages");
    }

    fn report_completed(&self, result: &ScanResult) {
        info!(
            target: "seo_crawler::progress",
            "Crawl completed: {} processed, {} skipped",
            result.pages_processed,
            result.pages_skipped
        );
    }

    fn report_error(&self, error: &str) {
        warn!(target: "seo_crawler::progress", "Crawl failed: {error}");
    }
}
