//! Core configuration types for SEO crawling
//!
//! This module contains the main `CrawlConfig` struct and its associated types
//! that define the resource ceilings and rendering policy of a crawl.

use serde::{Deserialize, Serialize};

use super::builder::CrawlConfigBuilder;

/// Resource types suppressed while rendering a page.
///
/// Only the document itself (and the scripts that build it) are needed to
/// read titles, headings and links, so everything else is blocked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockedResource {
    Image,
    Stylesheet,
    Font,
    Media,
    WebSocket,
}

impl BlockedResource {
    /// The full blocking policy applied by default
    pub const ALL: [BlockedResource; 5] = [
        BlockedResource::Image,
        BlockedResource::Stylesheet,
        BlockedResource::Font,
        BlockedResource::Media,
        BlockedResource::WebSocket,
    ];
}

/// Main configuration struct for crawl operations
///
/// Deserialization goes through `CrawlConfigBuilder::build`, so missing
/// fields take their defaults and invalid ceilings are rejected.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "CrawlConfigBuilder")]
pub struct CrawlConfig {
    /// Global page ceiling (processed + skipped)
    pub(crate) max_pages: usize,

    /// Pages are visited only while their depth is beneath this ceiling
    pub(crate) max_depth: u8,

    /// Links found on pages at this depth or deeper are not expanded
    pub(crate) link_expansion_depth: u8,

    /// Internal links enqueued per page for the next level
    pub(crate) links_per_page: usize,

    /// Fan-out cap on `internal_links` recorded for each page
    pub(crate) max_internal_links: usize,

    /// Flush the partial aggregate every N processed pages
    pub(crate) flush_every: usize,

    /// Timeout in seconds for a single page navigation
    ///
    /// Default: 30 seconds
    pub(crate) navigation_timeout_secs: u64,

    pub(crate) blocked_resource_types: Vec<BlockedResource>,
    pub(crate) viewport_width: u32,
    pub(crate) viewport_height: u32,

    /// Word count at or above which a page has substantial content
    pub(crate) substantial_content_words: u64,

    /// Brand suffix for synthesized titles.
    ///
    /// `None` derives it from the seed host.
    pub(crate) brand: Option<String>,

    pub(crate) headless: bool,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self::builder().into_config()
    }
}
