//! Chrome profile directory management
//!
//! Every crawl launches its own browser, and a profile directory can only be
//! held by one running Chrome, so each launch gets a fresh UUID-named
//! directory under the system temp dir.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// RAII wrapper for a Chrome profile directory
///
/// Removes the directory on drop unless `into_path()` is called.
#[derive(Debug)]
pub struct BrowserProfile {
    path: PathBuf,
    cleanup_on_drop: bool,
}

impl BrowserProfile {
    fn new(path: PathBuf) -> Self {
        Self {
            path,
            cleanup_on_drop: true,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Consume the profile and return the path, disabling auto-cleanup
    ///
    /// Use this once another owner (the render session) is responsible for
    /// removing the directory.
    pub fn into_path(mut self) -> PathBuf {
        self.cleanup_on_drop = false;
        std::mem::take(&mut self.path)
    }
}

impl Drop for BrowserProfile {
    fn drop(&mut self) {
        if self.cleanup_on_drop && self.path.exists() {
            info!("BrowserProfile cleanup: removing {}", self.path.display());
            if let Err(e) = std::fs::remove_dir_all(&self.path) {
                warn!("Failed to cleanup profile directory {}: {}", self.path.display(), e);
            }
        }
    }
}

/// Create a unique profile directory named `{prefix}_{uuid}`
pub fn create_unique_profile_with_prefix(prefix: &str) -> Result<BrowserProfile> {
    let uuid = Uuid::new_v4();
    let path = std::env::temp_dir().join(format!("{prefix}_{uuid}"));

    debug!("Creating unique Chrome profile: {}", path.display());

    // create_dir (not create_dir_all) fails if the directory already exists
    std::fs::create_dir(&path)
        .with_context(|| format!("Failed to create profile directory: {}", path.display()))?;

    Ok(BrowserProfile::new(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_is_removed_on_drop() {
        let profile = create_unique_profile_with_prefix("seo_crawler_test").unwrap();
        let path = profile.path().to_path_buf();
        assert!(path.exists());
        drop(profile);
        assert!(!path.exists());
    }

    #[test]
    fn into_path_keeps_directory() {
        let profile = create_unique_profile_with_prefix("seo_crawler_test").unwrap();
        let path = profile.into_path();
        assert!(path.exists());
        std::fs::remove_dir_all(&path).unwrap();
    }
}
