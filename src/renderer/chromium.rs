//! Headless Chromium render backend
//!
//! One browser per crawl, one tab per page. Requests for blocked resource
//! types are failed through the CDP Fetch domain before they reach the
//! network; the document and its scripts load normally.

use anyhow::{Context, Result};
use chromiumoxide::cdp::browser_protocol::emulation::SetDeviceMetricsOverrideParams;
use chromiumoxide::cdp::browser_protocol::fetch::{
    ContinueRequestParams, EnableParams, EventRequestPaused, FailRequestParams, RequestPattern,
    RequestStage,
};
use chromiumoxide::cdp::browser_protocol::network::{ErrorReason, ResourceType};
use chromiumoxide::{Browser, Page};
use futures::FutureExt;
use futures::StreamExt;
use futures::future::BoxFuture;
use log::{debug, trace, warn};
use std::path::PathBuf;
use tokio::task::JoinHandle;

use super::cleanup::{CleanupResult, cleanup_browser_and_data, stop_handler};
use super::page_timeout::with_page_timeout;
use super::{RenderBackend, RenderError, RenderOptions, RenderSession, Viewport};
use crate::browser_profile::create_unique_profile_with_prefix;
use crate::browser_setup::launch_browser;
use crate::config::BlockedResource;
use crate::page_extractor::RawPageFacts;
use crate::page_extractor::js_scripts::SEO_FACTS_SCRIPT;

const PROFILE_PREFIX: &str = "seo_crawler_chrome";

#[derive(Debug, Clone)]
pub struct ChromiumRenderer {
    headless: bool,
}

impl ChromiumRenderer {
    #[must_use]
    pub fn new(headless: bool) -> Self {
        Self { headless }
    }
}

impl Default for ChromiumRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}

impl RenderBackend for ChromiumRenderer {
    fn open(&self) -> BoxFuture<'_, Result<Box<dyn RenderSession>>> {
        let headless = self.headless;
        async move {
            let profile = create_unique_profile_with_prefix(PROFILE_PREFIX)?;
            let (browser, handler_task, _) =
                launch_browser(headless, profile.path().to_path_buf())
                    .await
                    .context("Failed to launch browser")?;

            // The session removes the directory from here on
            let data_dir = profile.into_path();

            Ok(Box::new(ChromiumSession {
                browser,
                handler_task,
                data_dir,
            }) as Box<dyn RenderSession>)
        }
        .boxed()
    }
}

pub struct ChromiumSession {
    browser: Browser,
    handler_task: JoinHandle<()>,
    data_dir: PathBuf,
}

impl RenderSession for ChromiumSession {
    fn render<'a>(
        &'a mut self,
        url: &'a str,
        options: &'a RenderOptions,
    ) -> BoxFuture<'a, Result<RawPageFacts, RenderError>> {
        async move {
            let page = self
                .browser
                .new_page("about:blank")
                .await
                .map_err(|e| RenderError::Session(e.to_string()))?;

            let interceptor = match block_resources(&page, &options.blocked_resource_types).await {
                Ok(handle) => handle,
                Err(e) => {
                    warn!("Resource blocking unavailable for {url}: {e}");
                    None
                }
            };

            if let Err(e) = set_viewport(&page, options.viewport).await {
                debug!("Failed to set viewport for {url}: {e}");
            }

            let outcome = load_and_extract(&page, url, options).await;

            if let Some(handle) = interceptor {
                handle.abort();
            }
            if let Err(e) = page.close().await {
                debug!("Failed to close tab for {url}: {e}");
            }

            outcome
        }
        .boxed()
    }

    fn close(self: Box<Self>) -> BoxFuture<'static, Result<()>> {
        let ChromiumSession {
            browser,
            handler_task,
            data_dir,
        } = *self;

        async move {
            // Browser must be closed before the handler loses its CDP connection
            match cleanup_browser_and_data(browser, data_dir).await? {
                CleanupResult::Success => debug!("Browser and data cleanup completed successfully"),
                CleanupResult::PartialFailure(errors) => {
                    warn!("Cleanup completed with failures: {errors:?}");
                }
            }
            stop_handler(handler_task).await;
            Ok(())
        }
        .boxed()
    }
}

async fn load_and_extract(
    page: &Page,
    url: &str,
    options: &RenderOptions,
) -> Result<RawPageFacts, RenderError> {
    with_page_timeout(
        async {
            page.goto(url)
                .await
                .map(|_| ())
                .map_err(|e| RenderError::Navigation(e.to_string()))
        },
        options.navigation_timeout,
        "Page navigation",
    )
    .await?;

    let value = with_page_timeout(
        async {
            page.evaluate(SEO_FACTS_SCRIPT)
                .await
                .map_err(|e| RenderError::Extraction(e.to_string()))?
                .into_value::<serde_json::Value>()
                .map_err(|e| RenderError::Extraction(e.to_string()))
        },
        options.navigation_timeout,
        "Fact extraction",
    )
    .await?;

    serde_json::from_value(value).map_err(|e| RenderError::Extraction(e.to_string()))
}

fn cdp_resource_type(resource: BlockedResource) -> ResourceType {
    match resource {
        BlockedResource::Image => ResourceType::Image,
        BlockedResource::Stylesheet => ResourceType::Stylesheet,
        BlockedResource::Font => ResourceType::Font,
        BlockedResource::Media => ResourceType::Media,
        BlockedResource::WebSocket => ResourceType::WebSocket,
    }
}

/// Pause every request and fail those of a blocked type.
///
/// Returns the task answering paused requests; it must be aborted once the
/// tab is done.
async fn block_resources(
    page: &Page,
    blocked: &[BlockedResource],
) -> Result<Option<JoinHandle<()>>> {
    if blocked.is_empty() {
        return Ok(None);
    }
    let blocked: Vec<ResourceType> = blocked.iter().copied().map(cdp_resource_type).collect();

    let mut paused = page
        .event_listener::<EventRequestPaused>()
        .await
        .context("Failed to listen for paused requests")?;

    page.execute(
        EnableParams::builder()
            .pattern(
                RequestPattern::builder()
                    .url_pattern("*")
                    .request_stage(RequestStage::Request)
                    .build(),
            )
            .build(),
    )
    .await
    .context("Failed to enable request interception")?;

    let page = page.clone();
    let handle = tokio::spawn(async move {
        while let Some(event) = paused.next().await {
            let outcome = if blocked.contains(&event.resource_type) {
                page.execute(FailRequestParams::new(
                    event.request_id.clone(),
                    ErrorReason::BlockedByClient,
                ))
                .await
                .map(|_| ())
            } else {
                page.execute(ContinueRequestParams::new(event.request_id.clone()))
                    .await
                    .map(|_| ())
            };
            if let Err(e) = outcome {
                trace!("Failed to answer paused request: {e}");
            }
        }
    });

    Ok(Some(handle))
}

async fn set_viewport(page: &Page, viewport: Viewport) -> Result<()> {
    page.execute(
        SetDeviceMetricsOverrideParams::builder()
            .width(i64::from(viewport.width))
            .height(i64::from(viewport.height))
            .device_scale_factor(1.0)
            .mobile(false)
            .build()
            .map_err(anyhow::Error::msg)?,
    )
    .await?;
    Ok(())
}
