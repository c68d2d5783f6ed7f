//! Session record types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::crawl_engine::ScanResult;

/// Lifecycle of a crawl-and-report session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Pending,
    Scanning,
    Completed,
    Failed,
}

impl SessionStatus {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

impl std::fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Scanning => "scanning",
            Self::Completed => "completed",
            Self::Failed => "failed",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: String,
    pub url: String,
    pub status: SessionStatus,
    #[serde(default)]
    pub scan_data: Option<ScanResult>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl SessionRecord {
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        url: impl Into<String>,
        created_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            status: SessionStatus::Pending,
            scan_data: None,
            created_at,
            expires_at,
        }
    }

    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Partial update of a session record
///
/// Provided fields replace the record's fields; `None` leaves them as they are.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionUpdate {
    pub status: Option<SessionStatus>,
    pub scan_data: Option<ScanResult>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl SessionUpdate {
    #[must_use]
    pub fn status(status: SessionStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_scan_data(mut self, scan_data: ScanResult) -> Self {
        self.scan_data = Some(scan_data);
        self
    }

    #[must_use]
    pub fn with_expires_at(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// Merge into `record`
    pub fn apply(self, record: &mut SessionRecord) {
        if let Some(status) = self.status {
            record.status = status;
        }
        if let Some(scan_data) = self.scan_data {
            record.scan_data = Some(scan_data);
        }
        if let Some(expires_at) = self.expires_at {
            record.expires_at = expires_at;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_preserves_unspecified_fields() {
        let now = Utc::now();
        let mut record = SessionRecord::new("s1", "https://example.com/", now, now);
        record.scan_data = Some(ScanResult::failed("https://example.com/", "boom"));

        SessionUpdate::status(SessionStatus::Scanning).apply(&mut record);

        assert_eq!(record.status, SessionStatus::Scanning);
        assert!(record.scan_data.is_some());
        assert_eq!(record.url, "https://example.com/");
    }
}
