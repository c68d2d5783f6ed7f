//! Fluent builder for `CrawlConfig`
//!
//! Every field has a default, so the builder only validates the relations
//! between ceilings when `build()` is called.

use crate::utils::{
    DEFAULT_FLUSH_EVERY, DEFAULT_LINK_EXPANSION_DEPTH, DEFAULT_LINKS_PER_PAGE, DEFAULT_MAX_DEPTH,
    DEFAULT_MAX_INTERNAL_LINKS, DEFAULT_MAX_PAGES, DEFAULT_NAVIGATION_TIMEOUT_SECS,
    DEFAULT_SUBSTANTIAL_CONTENT_WORDS, DEFAULT_VIEWPORT_HEIGHT, DEFAULT_VIEWPORT_WIDTH,
};
use anyhow::{Result, bail};
use serde::Deserialize;

use super::types::{BlockedResource, CrawlConfig};

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlConfigBuilder {
    pub(crate) max_pages: usize,
    pub(crate) max_depth: u8,
    pub(crate) link_expansion_depth: u8,
    pub(crate) links_per_page: usize,
    pub(crate) max_internal_links: usize,
    pub(crate) flush_every: usize,
    pub(crate) navigation_timeout_secs: u64,
    pub(crate) blocked_resource_types: Vec<BlockedResource>,
    pub(crate) viewport_width: u32,
    pub(crate) viewport_height: u32,
    pub(crate) substantial_content_words: u64,
    pub(crate) brand: Option<String>,
    pub(crate) headless: bool,
}

impl Default for CrawlConfigBuilder {
    fn default() -> Self {
        Self {
            max_pages: DEFAULT_MAX_PAGES,
            max_depth: DEFAULT_MAX_DEPTH,
            link_expansion_depth: DEFAULT_LINK_EXPANSION_DEPTH,
            links_per_page: DEFAULT_LINKS_PER_PAGE,
            max_internal_links: DEFAULT_MAX_INTERNAL_LINKS,
            flush_every: DEFAULT_FLUSH_EVERY,
            navigation_timeout_secs: DEFAULT_NAVIGATION_TIMEOUT_SECS,
            blocked_resource_types: BlockedResource::ALL.to_vec(),
            viewport_width: DEFAULT_VIEWPORT_WIDTH,
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,
            substantial_content_words: DEFAULT_SUBSTANTIAL_CONTENT_WORDS,
            brand: None,
            headless: true,
        }
    }
}

impl CrawlConfig {
    /// Create a builder for configuring a `CrawlConfig` with a fluent interface
    #[must_use]
    pub fn builder() -> CrawlConfigBuilder {
        CrawlConfigBuilder::default()
    }
}

impl CrawlConfigBuilder {
    #[must_use]
    pub fn max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    #[must_use]
    pub fn max_depth(mut self, depth: u8) -> Self {
        self.max_depth = depth;
        self
    }

    #[must_use]
    pub fn link_expansion_depth(mut self, depth: u8) -> Self {
        self.link_expansion_depth = depth;
        self
    }

    #[must_use]
    pub fn links_per_page(mut self, links: usize) -> Self {
        self.links_per_page = links;
        self
    }

    #[must_use]
    pub fn max_internal_links(mut self, links: usize) -> Self {
        self.max_internal_links = links;
        self
    }

    #[must_use]
    pub fn flush_every(mut self, pages: usize) -> Self {
        self.flush_every = pages;
        self
    }

    #[must_use]
    pub fn navigation_timeout_secs(mut self, secs: u64) -> Self {
        self.navigation_timeout_secs = secs;
        self
    }

    #[must_use]
    pub fn blocked_resource_types(mut self, types: Vec<BlockedResource>) -> Self {
        self.blocked_resource_types = types;
        self
    }

    #[must_use]
    pub fn viewport(mut self, width: u32, height: u32) -> Self {
        self.viewport_width = width;
        self.viewport_height = height;
        self
    }

    #[must_use]
    pub fn substantial_content_words(mut self, words: u64) -> Self {
        self.substantial_content_words = words;
        self
    }

    #[must_use]
    pub fn brand(mut self, brand: Option<impl Into<String>>) -> Self {
        self.brand = brand.map(Into::into).filter(|b: &String| !b.trim().is_empty());
        self
    }

    #[must_use]
    pub fn headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    /// Apply `SEO_*` environment overrides on top of the current values.
    ///
    /// Unparseable values are logged and ignored.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(v) = env_value::<usize>("SEO_MAX_PAGES") {
            self.max_pages = v;
        }
        if let Some(v) = env_value::<u8>("SEO_MAX_DEPTH") {
            self.max_depth = v;
        }
        if let Some(v) = env_value::<u64>("SEO_NAV_TIMEOUT_SECS") {
            self.navigation_timeout_secs = v;
        }
        if let Ok(brand) = std::env::var("SEO_BRAND") {
            self = self.brand(Some(brand));
        }
        self
    }

    pub fn build(mut self) -> Result<CrawlConfig> {
        self.brand = self.brand.filter(|b| !b.trim().is_empty());
        if self.max_pages == 0 {
            bail!("max_pages must be at least 1");
        }
        if self.max_depth == 0 {
            bail!("max_depth must be at least 1 so the seed can be visited");
        }
        if self.link_expansion_depth > self.max_depth {
            bail!(
                "link_expansion_depth ({}) cannot exceed max_depth ({})",
                self.link_expansion_depth,
                self.max_depth
            );
        }
        if self.links_per_page > self.max_internal_links {
            bail!(
                "links_per_page ({}) cannot exceed max_internal_links ({})",
                self.links_per_page,
                self.max_internal_links
            );
        }
        if self.flush_every == 0 {
            bail!("flush_every must be at least 1");
        }
        if self.navigation_timeout_secs == 0 {
            bail!("navigation_timeout_secs must be at least 1");
        }

        Ok(self.into_config())
    }

    pub(crate) fn into_config(self) -> CrawlConfig {
        CrawlConfig {
            max_pages: self.max_pages,
            max_depth: self.max_depth,
            link_expansion_depth: self.link_expansion_depth,
            links_per_page: self.links_per_page,
            max_internal_links: self.max_internal_links,
            flush_every: self.flush_every,
            navigation_timeout_secs: self.navigation_timeout_secs,
            blocked_resource_types: self.blocked_resource_types,
            viewport_width: self.viewport_width,
            viewport_height: self.viewport_height,
            substantial_content_words: self.substantial_content_words,
            brand: self.brand,
            headless: self.headless,
        }
    }
}

impl TryFrom<CrawlConfigBuilder> for CrawlConfig {
    type Error = anyhow::Error;

    fn try_from(builder: CrawlConfigBuilder) -> Result<Self> {
        builder.build()
    }
}

fn env_value<T: std::str::FromStr>(key: &str) -> Option<T> {
    let raw = std::env::var(key).ok()?;
    match raw.trim().parse::<T>() {
        Ok(v) => Some(v),
        Err(_) => {
            log::warn!("Ignoring {key}={raw:?}: not a valid value");
            None
        }
    }
}
