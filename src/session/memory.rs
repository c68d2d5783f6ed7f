//! In-process session store with expiry

use chrono::{DateTime, Utc};
use futures::FutureExt;
use futures::future::BoxFuture;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use super::store::{SessionStore, StoreError};
use super::types::{SessionRecord, SessionUpdate};

/// Initial capacity for the session `HashMap`
const SESSION_CACHE_INITIAL_CAPACITY: usize = 16;

/// Session store backed by a `HashMap`
///
/// Uses `tokio::sync::Mutex` for async-safe concurrent access. Clones share
/// the same table.
#[derive(Debug, Clone)]
pub struct InMemorySessionStore {
    sessions: Arc<Mutex<HashMap<String, SessionRecord>>>,
}

impl InMemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::with_capacity(
                SESSION_CACHE_INITIAL_CAPACITY,
            ))),
        }
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.lock().await.is_empty()
    }

    /// Remove records whose `expires_at` is at or before `now`
    ///
    /// Returns the number of records removed.
    pub async fn evict_expired(&self, now: DateTime<Utc>) -> usize {
        let mut sessions = self.sessions.lock().await;
        let initial_count = sessions.len();

        sessions.retain(|id, record| {
            let keep = !record.is_expired(now);
            if !keep {
                log::debug!(
                    target: "seo_crawler::session",
                    "Removing expired session {id}: {} (expired at {})",
                    record.status,
                    record.expires_at
                );
            }
            keep
        });

        let cleaned = initial_count - sessions.len();
        if cleaned > 0 {
            log::debug!(target: "seo_crawler::session", "Cleaned up {cleaned} sessions");
        }
        cleaned
    }

    /// Start background expiry task
    ///
    /// Spawns a tokio task that evicts expired sessions every `interval`.
    /// Abort the returned handle to stop it.
    pub fn start_cleanup_task(self: Arc<Self>, interval: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            loop {
                ticker.tick().await;
                self.evict_expired(Utc::now()).await;
            }
        })
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionStore for InMemorySessionStore {
    fn get<'a>(&'a self, id: &'a str) -> BoxFuture<'a, Result<Option<SessionRecord>, StoreError>> {
        async move { Ok(self.sessions.lock().await.get(id).cloned()) }.boxed()
    }

    fn insert(&self, record: SessionRecord) -> BoxFuture<'_, Result<(), StoreError>> {
        async move {
            self.sessions.lock().await.insert(record.id.clone(), record);
            Ok(())
        }
        .boxed()
    }

    fn update<'a>(
        &'a self,
        id: &'a str,
        update: SessionUpdate,
    ) -> BoxFuture<'a, Result<(), StoreError>> {
        async move {
            let mut sessions = self.sessions.lock().await;
            let record = sessions
                .get_mut(id)
                .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
            update.apply(record);
            Ok(())
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionStatus;

    fn record(id: &str, now: DateTime<Utc>, ttl_secs: i64) -> SessionRecord {
        SessionRecord::new(
            id,
            "https://example.com/",
            now,
            now + chrono::Duration::seconds(ttl_secs),
        )
    }

    #[tokio::test]
    async fn update_merges_into_existing_record() {
        let store = InMemorySessionStore::new();
        let now = Utc::now();
        store.insert(record("s1", now, 60)).await.unwrap();

        store
            .update("s1", SessionUpdate::status(SessionStatus::Scanning))
            .await
            .unwrap();

        let stored = store.get("s1").await.unwrap().unwrap();
        assert_eq!(stored.status, SessionStatus::Scanning);
        assert_eq!(stored.created_at, now);
    }

    #[tokio::test]
    async fn update_of_unknown_session_fails() {
        let store = InMemorySessionStore::new();
        let err = store
            .update("missing", SessionUpdate::status(SessionStatus::Failed))
            .await
            .unwrap_err();
        assert_eq!(err, StoreError::NotFound("missing".into()));
    }

    #[tokio::test]
    async fn evict_expired_removes_only_expired_records() {
        let store = InMemorySessionStore::new();
        let now = Utc::now();
        store.insert(record("short", now, 10)).await.unwrap();
        store.insert(record("long", now, 3600)).await.unwrap();

        let removed = store.evict_expired(now + chrono::Duration::seconds(60)).await;

        assert_eq!(removed, 1);
        assert!(store.get("short").await.unwrap().is_none());
        assert!(store.get("long").await.unwrap().is_some());
        assert_eq!(store.evict_expired(now + chrono::Duration::seconds(60)).await, 0);
    }
}
