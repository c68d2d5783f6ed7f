//! Getter methods for `CrawlConfig`
//!
//! This module provides all the accessor methods for retrieving configuration
//! values from a `CrawlConfig` instance.

use std::time::Duration;

use super::types::{BlockedResource, CrawlConfig};
use crate::page_extractor::ExtractorSettings;
use crate::renderer::{RenderOptions, Viewport};

impl CrawlConfig {
    #[must_use]
    pub fn max_pages(&self) -> usize {
        self.max_pages
    }

    #[must_use]
    pub fn max_depth(&self) -> u8 {
        self.max_depth
    }

    #[must_use]
    pub fn link_expansion_depth(&self) -> u8 {
        self.link_expansion_depth
    }

    #[must_use]
    pub fn links_per_page(&self) -> usize {
        self.links_per_page
    }

    #[must_use]
    pub fn max_internal_links(&self) -> usize {
        self.max_internal_links
    }

    #[must_use]
    pub fn flush_every(&self) -> usize {
        self.flush_every
    }

    #[must_use]
    pub fn navigation_timeout(&self) -> Duration {
        Duration::from_secs(self.navigation_timeout_secs)
    }

    #[must_use]
    pub fn blocked_resource_types(&self) -> &[BlockedResource] {
        &self.blocked_resource_types
    }

    #[must_use]
    pub fn substantial_content_words(&self) -> u64 {
        self.substantial_content_words
    }

    #[must_use]
    pub fn brand(&self) -> Option<&str> {
        self.brand.as_deref()
    }

    #[must_use]
    pub fn headless(&self) -> bool {
        self.headless
    }

    /// Rendering policy handed to the render backend for every page
    #[must_use]
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            blocked_resource_types: self.blocked_resource_types.clone(),
            navigation_timeout: self.navigation_timeout(),
            viewport: Viewport {
                width: self.viewport_width,
                height: self.viewport_height,
            },
        }
    }

    /// Normalization limits for the page-signal extractor
    #[must_use]
    pub fn extractor_settings(&self) -> ExtractorSettings {
        ExtractorSettings {
            max_internal_links: self.max_internal_links,
            substantial_content_words: self.substantial_content_words,
        }
    }
}
