//! End-to-end tests of the service operations over a scripted renderer

use std::sync::Arc;
use std::time::Duration;

use seo_crawler::{
    ApiError, InMemorySessionStore, JobScheduler, JobStatus, SchedulerConfig, SeoCrawler,
    SeoService, SessionStatus,
};
use seo_crawler::utils::UrlValidationError;

mod common;
use common::{FakeRenderer, config, page, wait_for_terminal};

fn service(renderer: FakeRenderer) -> (SeoService, Arc<InMemorySessionStore>) {
    let store = Arc::new(InMemorySessionStore::new());
    let crawler = Arc::new(SeoCrawler::new(
        config().build().unwrap(),
        Arc::new(renderer),
        store.clone(),
    ));
    let scheduler = JobScheduler::new(
        crawler,
        store.clone(),
        SchedulerConfig::default().with_retry_delay(Duration::from_millis(10)),
    );
    (SeoService::new(scheduler, store.clone()), store)
}

#[tokio::test]
async fn test_disallowed_urls_create_no_session_or_job() {
    let (service, store) = service(FakeRenderer::new());

    for url in [
        "ftp://example.com/",
        "http://localhost:8080/",
        "http://127.0.0.1/",
        "http://10.1.2.3/admin",
        "http://192.168.0.1/",
        "http://169.254.169.254/latest/meta-data",
        "http://[::1]/",
        "not a url",
    ] {
        let err = service.start_crawl(url).await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidUrl(_)), "{url} was accepted");
    }

    assert_eq!(service.queue_stats().total, 0);
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_unsupported_scheme_is_reported() {
    let (service, _) = service(FakeRenderer::new());
    let err = service.start_crawl("ftp://example.com/").await.unwrap_err();
    assert_eq!(
        err,
        ApiError::InvalidUrl(UrlValidationError::UnsupportedScheme("ftp".into()))
    );
}

#[tokio::test]
async fn test_crawl_lifecycle_through_service() {
    let renderer = FakeRenderer::new()
        .page("/", page("Home", &["/about", "/gone"]))
        .page("/about", page("About", &[]));
    let (service, _) = service(renderer);

    let ticket = service.start_crawl("https://example.com/#intro").await.unwrap();
    assert_eq!(ticket.url, "https://example.com/");

    match service.get_results(&ticket.session_id).await {
        Err(ApiError::NotReady(_)) | Ok(_) => {}
        Err(other) => panic!("unexpected error {other}"),
    }

    let job = wait_for_terminal(service.scheduler(), ticket.job_id).await;
    assert_eq!(job.status, JobStatus::Completed);

    let status = service.get_status(&ticket.session_id).await.unwrap();
    assert_eq!(status.status, SessionStatus::Completed);
    assert_eq!(status.pages_processed, 2);
    assert_eq!(status.total_pages, 3);
    assert_eq!(status.error_count, 1);
    let breakdown = status.priority_breakdown;
    assert_eq!(breakdown.high + breakdown.medium + breakdown.low, 2);

    let results = service.get_results(&ticket.session_id).await.unwrap();
    assert_eq!(results.pages.len(), 2);
    assert_eq!(results.errors[0].url, "https://example.com/gone");
    assert_eq!(service.queue_stats().completed, 1);
}

#[tokio::test]
async fn test_results_withheld_for_failed_session() {
    let (service, _) = service(FakeRenderer::new().fail_next_opens(3));

    let ticket = service.start_crawl("https://example.com/").await.unwrap();
    let job = wait_for_terminal(service.scheduler(), ticket.job_id).await;
    assert_eq!(job.status, JobStatus::Failed);
    assert_eq!(job.attempts, 3);

    let status = service.get_status(&ticket.session_id).await.unwrap();
    assert_eq!(status.status, SessionStatus::Failed);
    assert_eq!(status.error_count, 1);

    assert_eq!(
        service.get_results(&ticket.session_id).await.unwrap_err(),
        ApiError::NotReady(SessionStatus::Failed)
    );
}

#[tokio::test(start_paused = true)]
async fn test_session_is_not_failed_while_job_retries() {
    let store = Arc::new(InMemorySessionStore::new());
    let renderer = FakeRenderer::new()
        .fail_next_opens(1)
        .page("/", page("Home", &[]));
    let crawler = Arc::new(SeoCrawler::new(
        config().build().unwrap(),
        Arc::new(renderer),
        store.clone(),
    ));
    let scheduler = JobScheduler::new(
        crawler,
        store.clone(),
        SchedulerConfig::default().with_retry_delay(Duration::from_millis(300)),
    );
    let service = SeoService::new(scheduler, store);

    let ticket = service.start_crawl("https://example.com/").await.unwrap();
    tokio::time::sleep(Duration::from_millis(100)).await;

    let job = service.scheduler().job(ticket.job_id).unwrap();
    assert_eq!(job.status, JobStatus::Processing);
    assert_eq!(job.attempts, 1);
    let during = service.get_status(&ticket.session_id).await.unwrap();
    assert_eq!(during.status, SessionStatus::Scanning);
    assert_eq!(during.error_count, 1);

    let job = wait_for_terminal(service.scheduler(), ticket.job_id).await;
    assert_eq!(job.status, JobStatus::Completed);
    let after = service.get_status(&ticket.session_id).await.unwrap();
    assert_eq!(after.status, SessionStatus::Completed);
    assert_eq!(after.error_count, 0);
    assert_eq!(after.pages_processed, 1);
}

#[tokio::test]
async fn test_unknown_session_is_not_found() {
    let (service, _) = service(FakeRenderer::new());
    assert_eq!(
        service.get_status("nope").await.unwrap_err(),
        ApiError::NotFound("nope".into())
    );
    assert!(matches!(
        service.get_results("nope").await,
        Err(ApiError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_expired_sessions_are_evicted() {
    let (service, store) = service(FakeRenderer::new().page("/", page("Home", &[])));
    let service = service.with_session_ttl(Duration::from_secs(60));

    let ticket = service.start_crawl("https://example.com/").await.unwrap();
    wait_for_terminal(service.scheduler(), ticket.job_id).await;

    let later = chrono::Utc::now() + chrono::Duration::minutes(2);
    assert_eq!(store.evict_expired(later).await, 1);
    assert_eq!(
        service.get_status(&ticket.session_id).await.unwrap_err(),
        ApiError::NotFound(ticket.session_id.clone())
    );
}
