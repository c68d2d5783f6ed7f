//! Shared configuration constants for the SEO crawler
//!
//! This module contains default values and configuration constants used
//! throughout the codebase to ensure consistency and avoid magic numbers.

/// Default page ceiling: 50 pages per crawl
///
/// Counts both processed and skipped pages, so a site full of broken links
/// still terminates after this many render attempts.
pub const DEFAULT_MAX_PAGES: usize = 50;

/// Default maximum crawl depth: 3 levels
///
/// Pages are only visited while their depth is beneath this ceiling.
pub const DEFAULT_MAX_DEPTH: u8 = 3;

/// Default link-expansion ceiling: 2
///
/// Links discovered on pages at this depth or deeper are not enqueued.
pub const DEFAULT_LINK_EXPANSION_DEPTH: u8 = 2;

/// Number of a page's internal links enqueued for the next depth level
pub const DEFAULT_LINKS_PER_PAGE: usize = 5;

/// Per-page fan-out cap applied while extracting internal links
pub const DEFAULT_MAX_INTERNAL_LINKS: usize = 10;

/// Flush the partial aggregate to the session store every N processed pages
pub const DEFAULT_FLUSH_EVERY: usize = 3;

/// Navigation timeout for a single page visit
pub const DEFAULT_NAVIGATION_TIMEOUT_SECS: u64 = 30;

/// Word count at which a page is considered to carry substantial content
pub const DEFAULT_SUBSTANTIAL_CONTENT_WORDS: u64 = 300;

/// Desktop viewport used for rendering
pub const DEFAULT_VIEWPORT_WIDTH: u32 = 1920;
pub const DEFAULT_VIEWPORT_HEIGHT: u32 = 1080;

/// Attempt ceiling for a crawl job
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Delay before a failed job re-enters the pending pool
pub const DEFAULT_RETRY_DELAY_SECS: u64 = 5;

/// How long terminal jobs stay visible before eviction
pub const DEFAULT_JOB_RETENTION_SECS: u64 = 5 * 60;

/// Interval of the background eviction timer
pub const DEFAULT_CLEANUP_INTERVAL_SECS: u64 = 60;

/// Lifetime of a session record in the session store
pub const DEFAULT_SESSION_TTL_SECS: u64 = 60 * 60;

/// Chrome user agent string
///
/// Updated: 2025-01-29 to Chrome 132 (current stable)
///
/// Reference: https://chromiumdash.appspot.com/schedule
pub const CHROME_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/132.0.6834.160 Safari/537.36";
