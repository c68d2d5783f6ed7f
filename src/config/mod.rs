//! Configuration module for SEO crawling
//!
//! This module provides the `CrawlConfig` struct and its builder for the
//! traversal ceilings and rendering policy, plus `SchedulerConfig` for the
//! retry and retention policy of the job scheduler.

// Sub-modules
pub mod builder;
pub mod getters;
pub mod scheduler;
pub mod types;

// Re-exports for public API
pub use builder::CrawlConfigBuilder;
pub use scheduler::SchedulerConfig;
pub use types::{BlockedResource, CrawlConfig};
