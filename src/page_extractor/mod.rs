//! Page signal extraction.
//!
//! Render backends return [`RawPageFacts`]; this module turns them into the
//! canonical [`PageSignal`] consumed by the recommendation engine.

// Sub-modules
pub mod js_scripts;
pub mod schema;
pub mod signal;

// Re-exports for public API
pub use schema::{Headings, ImageSignal, PageSignal, RawImage, RawPageFacts};
pub use signal::{ExtractorSettings, extract_page_signal};
