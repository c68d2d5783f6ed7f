//! Session records and the store they live in
//!
//! A session is one user-initiated crawl-and-report lifecycle. The crawler
//! writes progress and the final aggregate into the session's record; status
//! queries read it concurrently.

pub mod memory;
pub mod store;
pub mod types;

pub use memory::InMemorySessionStore;
pub use store::{SessionStore, StoreError};
pub use types::{SessionRecord, SessionStatus, SessionUpdate};
