// Command-line SEO audit
//
// Crawls one site through the job scheduler and prints the final scan result
// as JSON on stdout. Logs go to stderr; set RUST_LOG to change verbosity.

use anyhow::{Context, Result, bail};
use log::{LevelFilter, info};
use std::sync::Arc;
use std::time::Duration;

use seo_crawler::{
    ChromiumRenderer, CrawlConfig, InMemorySessionStore, JobScheduler, JobStatus, LogProgress,
    SchedulerConfig, SeoCrawler, SeoService,
};

const POLL_INTERVAL: Duration = Duration::from_millis(500);

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .filter_module("chromiumoxide::handler", LevelFilter::Off)
        .filter_module("chromiumoxide::conn", LevelFilter::Off)
        .init();

    let url = std::env::args()
        .nth(1)
        .context("usage: seo-crawler <url>")?;

    let config = CrawlConfig::builder().with_env_overrides().build()?;
    let store = Arc::new(InMemorySessionStore::new());
    let renderer = Arc::new(ChromiumRenderer::new(config.headless()));
    let crawler = Arc::new(
        SeoCrawler::new(config, renderer, store.clone()).with_progress(Arc::new(LogProgress)),
    );
    let scheduler = JobScheduler::new(crawler, store.clone(), SchedulerConfig::default());
    let service = SeoService::new(scheduler.clone(), store);

    let ticket = service.start_crawl(&url).await?;
    info!("Session {} started for {}", ticket.session_id, ticket.url);

    let job = loop {
        tokio::time::sleep(POLL_INTERVAL).await;
        match scheduler.job(ticket.job_id) {
            Some(job) if job.status.is_terminal() => break job,
            Some(_) => {}
            None => bail!("Job {} disappeared before finishing", ticket.job_id),
        }
    };

    if job.status == JobStatus::Failed {
        bail!(
            "Crawl failed after {} attempts: {}",
            job.attempts,
            job.last_error.unwrap_or_default()
        );
    }

    let results = service.get_results(&ticket.session_id).await?;
    println!("{}", serde_json::to_string_pretty(&results)?);
    Ok(())
}
