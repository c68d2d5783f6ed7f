//! Session-wide crawl aggregate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::page_extractor::PageSignal;
use crate::recommendation::{Priority, Recommendation};

/// One successfully rendered page with its recommendation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageReport {
    #[serde(flatten)]
    pub signal: PageSignal,
    pub recommendation: Recommendation,
}

/// A URL that could not be rendered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlErrorEntry {
    pub url: String,
    pub reason: String,
}

/// Count of pages per recommendation priority
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityBreakdown {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResult {
    pub pages: Vec<PageReport>,
    /// Set when the crawl finishes: processed plus skipped
    pub total_pages: usize,
    pub pages_processed: usize,
    pub pages_skipped: usize,
    pub errors: Vec<CrawlErrorEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl ScanResult {
    /// Minimal aggregate persisted when a crawl fails before producing one
    #[must_use]
    pub fn failed(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            errors: vec![CrawlErrorEntry {
                url: url.into(),
                reason: reason.into(),
            }],
            ..Self::default()
        }
    }

    /// Pages that have used up a slot of the page ceiling
    #[must_use]
    pub fn attempted(&self) -> usize {
        self.pages_processed + self.pages_skipped
    }

    pub fn record_page(&mut self, signal: PageSignal, recommendation: Recommendation) {
        self.pages.push(PageReport {
            signal,
            recommendation,
        });
        self.pages_processed += 1;
    }

    pub fn record_error(&mut self, url: impl Into<String>, reason: impl Into<String>) {
        self.errors.push(CrawlErrorEntry {
            url: url.into(),
            reason: reason.into(),
        });
        self.pages_skipped += 1;
    }

    pub fn finalize(&mut self, now: DateTime<Utc>) {
        self.total_pages = self.attempted();
        self.completed_at = Some(now);
    }

    #[must_use]
    pub fn priority_breakdown(&self) -> PriorityBreakdown {
        self.pages
            .iter()
            .fold(PriorityBreakdown::default(), |mut acc, page| {
                match page.recommendation.priority {
                    Priority::High => acc.high += 1,
                    Priority::Medium => acc.medium += 1,
                    Priority::Low => acc.low += 1,
                }
                acc
            })
    }
}
