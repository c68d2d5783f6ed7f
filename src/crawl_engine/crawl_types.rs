//! Core types and traits for crawl operations.
//!
//! This module contains the job-level error type, the frontier item, the
//! request consumed by the scheduler and the main `Crawler` trait.

use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::report::ScanResult;

/// Job-level crawl failure
///
/// Per-page failures never surface here; they are recorded in the
/// [`ScanResult`] error list and the traversal continues.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CrawlError {
    /// The render backend could not provide a session
    #[error("Renderer unavailable: {0}")]
    RendererUnavailable(String),

    /// The seed URL could not be parsed
    #[error("Invalid seed URL: {0}")]
    InvalidSeed(String),

    /// The render session died mid-crawl
    #[error("Render session lost: {0}")]
    SessionLost(String),

    #[error("Crawl error: {0}")]
    Other(String),
}

impl From<anyhow::Error> for CrawlError {
    fn from(err: anyhow::Error) -> Self {
        // Use {:#} to preserve full error chain with context
        Self::Other(format!("{err:#}"))
    }
}

/// Convenience alias for Result with `CrawlError`
pub type CrawlResult<T> = Result<T, CrawlError>;

/// Crawl request handed to the scheduler
///
/// Immutable once created, consumed by exactly one job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlRequest {
    pub seed_url: String,
    pub session_id: String,
}

impl CrawlRequest {
    #[must_use]
    pub fn new(seed_url: impl Into<String>, session_id: impl Into<String>) -> Self {
        Self {
            seed_url: seed_url.into(),
            session_id: session_id.into(),
        }
    }
}

/// A trait defining the interface for crawlers.
///
/// The scheduler owns one implementation and runs it once per job attempt.
pub trait Crawler: Send + Sync {
    /// Traverse from the request's seed and return the final aggregate.
    ///
    /// Errors only for job-level conditions, such as a render backend that
    /// cannot be acquired.
    fn run<'a>(&'a self, request: &'a CrawlRequest) -> BoxFuture<'a, CrawlResult<ScanResult>>;
}

/// Represents an item in the crawl frontier with URL and depth tracking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlQueue {
    pub url: String,
    pub depth: u8,
}
