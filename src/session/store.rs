//! Session store contract

use futures::future::BoxFuture;
use thiserror::Error;

use super::types::{SessionRecord, SessionUpdate};

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Session not found: {0}")]
    NotFound(String),

    #[error("Session store unavailable: {0}")]
    Unavailable(String),
}

/// Key-value store of session records keyed by session id
///
/// Writes are whole-record merges; readers always observe a complete record.
pub trait SessionStore: Send + Sync {
    fn get<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<Option<SessionRecord>, StoreError>>;

    fn insert(&self, record: SessionRecord) -> BoxFuture<'_, Result<(), StoreError>>;

    /// Merge `update` into the record with `id`
    fn update<'a>(
        &'a self,
        id: &'a str,
        update: SessionUpdate,
    ) -> BoxFuture<'a, Result<(), StoreError>>;
}
