pub mod api;
pub mod browser_profile;
pub mod browser_setup;
pub mod config;
pub mod crawl_engine;
pub mod page_extractor;
pub mod recommendation;
pub mod renderer;
pub mod scheduler;
pub mod session;
pub mod utils;

pub use api::{ApiError, CrawlTicket, SeoService, SessionStatusView};
pub use browser_setup::{download_managed_browser, find_browser_executable, launch_browser};
pub use config::{BlockedResource, CrawlConfig, CrawlConfigBuilder, SchedulerConfig};
pub use crawl_engine::{
    CrawlError, CrawlErrorEntry, CrawlRequest, CrawlResult, Crawler, LogProgress, NoOpProgress,
    PageReport, PriorityBreakdown, ProgressReporter, ScanResult, SeoCrawler,
};
pub use page_extractor::schema::*;
pub use page_extractor::{ExtractorSettings, extract_page_signal};
pub use recommendation::{ImageRecommendation, Priority, Recommendation, RecommendationEngine};
pub use renderer::{
    ChromiumRenderer, RenderBackend, RenderError, RenderOptions, RenderSession, Viewport,
};
pub use scheduler::{Job, JobId, JobScheduler, JobStats, JobStatus};
pub use session::{
    InMemorySessionStore, SessionRecord, SessionStatus, SessionStore, SessionUpdate, StoreError,
};
