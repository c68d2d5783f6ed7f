//! Rendering collaborator
//!
//! The crawler never talks to a browser directly. It opens one
//! [`RenderSession`] per crawl from a [`RenderBackend`], renders every page
//! through it, and closes it when the crawl ends, whatever the outcome.
//! [`ChromiumRenderer`] is the production backend; tests script their own.

pub mod chromium;
pub mod cleanup;
pub mod page_timeout;

use anyhow::Result;
use futures::future::BoxFuture;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use crate::config::BlockedResource;
use crate::page_extractor::RawPageFacts;

pub use chromium::ChromiumRenderer;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

/// Per-page rendering policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    pub blocked_resource_types: Vec<BlockedResource>,
    pub navigation_timeout: Duration,
    pub viewport: Viewport,
}

/// Failure to render a single URL
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("navigation timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("navigation failed: {0}")]
    Navigation(String),

    #[error("page fact extraction failed: {0}")]
    Extraction(String),

    /// The render session itself is unusable (browser crashed, connection lost)
    #[error("render session failed: {0}")]
    Session(String),
}

impl RenderError {
    /// Session failures abort the crawl; everything else only skips the page
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Session(_))
    }
}

/// Source of render sessions, shared by every crawl of a deployment
pub trait RenderBackend: Send + Sync {
    /// Acquire a session for one crawl
    fn open(&self) -> BoxFuture<'_, Result<Box<dyn RenderSession>>>;
}

/// A live rendering resource (one browser) owned by a single crawl
pub trait RenderSession: Send {
    fn render<'a>(
        &'a mut self,
        url: &'a str,
        options: &'a RenderOptions,
    ) -> BoxFuture<'a, Result<RawPageFacts, RenderError>>;

    /// Release the session; failures are reported, the session is gone either way
    fn close(self: Box<Self>) -> BoxFuture<'static, Result<()>>;
}
