//! Browser and resource cleanup functionality
//!
//! Runs when a render session is closed, after every crawl.

use anyhow::Result;
use chromiumoxide::Browser;
use log::{debug, warn};
use std::path::PathBuf;
use tokio::task::JoinHandle;

/// Result of cleanup operations
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanupResult {
    /// All cleanup operations succeeded
    Success,
    /// Some cleanup operations failed, with error details
    PartialFailure(Vec<String>),
}

/// Close the browser, wait for its process, then remove its profile directory
pub async fn cleanup_browser_and_data(
    mut browser: Browser,
    chrome_data_dir: PathBuf,
) -> Result<CleanupResult> {
    let mut errors = Vec::new();

    debug!(target: "seo_crawler::cleanup", "Closing browser");
    if let Err(e) = browser.close().await {
        warn!(target: "seo_crawler::cleanup", "Failed to close browser: {e}");
        errors.push(format!("Browser close failed: {e}"));
    }

    // Wait for browser process to fully exit before touching its profile
    if let Err(e) = browser.wait().await {
        warn!(target: "seo_crawler::cleanup", "Failed to wait for browser exit: {e}");
        errors.push(format!("Browser wait failed: {e}"));
    }

    if let Err(e) = std::fs::remove_dir_all(&chrome_data_dir) {
        warn!(target: "seo_crawler::cleanup", "Failed to clean up Chrome data directory: {e}");
        errors.push(format!("Directory cleanup failed: {e}"));
    } else {
        debug!(target: "seo_crawler::cleanup", "Chrome data directory cleaned up successfully");
    }

    if errors.is_empty() {
        Ok(CleanupResult::Success)
    } else {
        Ok(CleanupResult::PartialFailure(errors))
    }
}

/// Abort the CDP handler task once the browser is gone
pub async fn stop_handler(handler_task: JoinHandle<()>) {
    handler_task.abort();
    if let Err(e) = handler_task.await
        && !e.is_cancelled()
    {
        warn!(target: "seo_crawler::cleanup", "Handler task failed during abort: {e}");
    }
}
