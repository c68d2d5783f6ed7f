//! Frontier management
//!
//! The frontier is a FIFO worklist of `{url, depth}` items. Every URL that
//! ever enters it is remembered, so self-links and duplicates discovered on
//! later pages are filtered before they are enqueued.

use log::debug;
use std::collections::{HashSet, VecDeque};

use super::crawl_types::CrawlQueue;
use crate::utils::normalize_url;

#[derive(Debug, Default)]
pub struct CrawlState {
    frontier: VecDeque<CrawlQueue>,
    seen: HashSet<String>,
    visited: HashSet<String>,
}

impl CrawlState {
    /// Frontier holding only the seed at depth 0
    #[must_use]
    pub fn with_seed(seed: &str) -> Self {
        let mut state = Self::default();
        state.push(seed, 0);
        state
    }

    /// Pop the next unvisited item and mark it visited
    pub fn next_unvisited(&mut self) -> Option<CrawlQueue> {
        while let Some(item) = self.frontier.pop_front() {
            if self.visited.insert(item.url.clone()) {
                return Some(item);
            }
        }
        None
    }

    /// Enqueue `url` at `depth` unless it was seen before
    ///
    /// Returns whether the URL was added.
    pub fn push(&mut self, url: &str, depth: u8) -> bool {
        let Ok(normalized) = normalize_url(url) else {
            debug!(target: "seo_crawler::links", "Dropping malformed link {url}");
            return false;
        };
        if !self.seen.insert(normalized.clone()) {
            return false;
        }
        self.frontier.push_back(CrawlQueue {
            url: normalized,
            depth,
        });
        true
    }

    /// Enqueue up to `limit` not-yet-seen links at `depth`
    ///
    /// Returns the number of links added.
    pub fn enqueue_links(&mut self, links: &[String], depth: u8, limit: usize) -> usize {
        let mut added = 0;
        for link in links {
            if added >= limit {
                break;
            }
            if self.push(link, depth) {
                added += 1;
            }
        }
        added
    }

    #[must_use]
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }
}
