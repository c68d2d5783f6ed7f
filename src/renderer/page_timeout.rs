//! Timeout utilities for page operations
//!
//! Provides async timeout wrappers to prevent indefinite hangs during
//! page navigation and script evaluation.

use std::future::Future;
use std::time::Duration;

use super::RenderError;

/// Wrap an async page operation with an explicit timeout
///
/// # Arguments
/// * `operation` - The async Future to execute with a timeout
/// * `timeout` - Upper bound for the operation
/// * `operation_name` - Human-readable name for log messages
///
/// # Returns
/// * `Ok(T)` - Operation completed successfully
/// * `Err(RenderError::Timeout)` - The timeout was reached
/// * `Err(_)` - The operation's own error
pub async fn with_page_timeout<F, T>(
    operation: F,
    timeout: Duration,
    operation_name: &str,
) -> Result<T, RenderError>
where
    F: Future<Output = Result<T, RenderError>>,
{
    match tokio::time::timeout(timeout, operation).await {
        Ok(result) => result,
        Err(_) => {
            log::debug!("{operation_name} timeout after {} seconds", timeout.as_secs());
            Err(RenderError::Timeout(timeout))
        }
    }
}
