//! Crawl Engine Module
//!
//! This module contains the bounded crawler: the frontier, the per-crawl
//! aggregate and the orchestration that renders, analyzes and persists pages.

// Sub-modules
pub mod crawl_types;
pub mod link_processor;
pub mod orchestrator;
pub mod progress;
pub mod report;

// Re-export orchestration and progress types
pub use orchestrator::SeoCrawler;
pub use progress::{LogProgress, NoOpProgress, ProgressReporter};

// Re-export crawl types
pub use crawl_types::{CrawlError, CrawlQueue, CrawlRequest, CrawlResult, Crawler};
pub use link_processor::CrawlState;
pub use report::{CrawlErrorEntry, PageReport, PriorityBreakdown, ScanResult};
