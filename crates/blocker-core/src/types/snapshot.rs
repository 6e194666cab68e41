use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// One fetched text-list source: its URL and the raw decoded body
///
/// Content is an undifferentiated blob to be pattern-matched, not parsed
/// into lines or records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceSnapshot {
    /// Source URL the content was fetched from
    pub url: String,
    /// Raw decoded text content
    pub content: String,
}

impl SourceSnapshot {
    /// Create a snapshot entry
    #[must_use]
    pub fn new(url: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            content: content.into(),
        }
    }
}

/// In-memory snapshot of all synced text-list sources
///
/// `updated` is the wall-clock time at which this state was produced by a
/// successful sync; it is never retroactively altered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncState {
    /// When the snapshot was produced
    pub updated: DateTime<Utc>,
    /// Fetched sources in configured order
    pub data: Vec<SourceSnapshot>,
}

/// Persisted snapshot document: `data` holds one single-key map per source.
#[derive(Debug, Serialize, Deserialize)]
struct SnapshotDocument {
    updated: String,
    data: Vec<BTreeMap<String, String>>,
}

impl SyncState {
    /// Create a snapshot stamped with the current wall-clock time
    #[must_use]
    pub fn now(data: Vec<SourceSnapshot>) -> Self {
        Self {
            updated: Utc::now(),
            data,
        }
    }

    /// Returns true if the snapshot is older than `ttl`
    #[must_use]
    pub fn is_stale(&self, ttl: Duration) -> bool {
        let age = Utc::now().signed_duration_since(self.updated);
        age >= chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::MAX)
    }

    /// Returns true if the snapshot holds no source data
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Serialize to the persisted document form
    pub fn to_json(&self) -> crate::Result<String> {
        let doc = SnapshotDocument {
            updated: self.updated.to_rfc3339(),
            data: self
                .data
                .iter()
                .map(|s| BTreeMap::from([(s.url.clone(), s.content.clone())]))
                .collect(),
        };
        Ok(serde_json::to_string(&doc)?)
    }

    /// Parse a persisted document
    ///
    /// A missing or malformed `updated`/`data` field yields `None`, which
    /// callers treat as an absent snapshot (forcing a re-sync).
    #[must_use]
    pub fn from_json(raw: &str) -> Option<Self> {
        let doc: SnapshotDocument = serde_json::from_str(raw).ok()?;
        let updated = DateTime::parse_from_rfc3339(&doc.updated)
            .ok()?
            .with_timezone(&Utc);
        let data = doc
            .data
            .into_iter()
            .filter_map(|entry| {
                entry
                    .into_iter()
                    .next()
                    .map(|(url, content)| SourceSnapshot { url, content })
            })
            .collect();
        Some(Self { updated, data })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_roundtrip() {
        let state = SyncState::now(vec![
            SourceSnapshot::new("http://x/list", "bad.example.com\n"),
            SourceSnapshot::new("http://y/list", "10.0.0.1\n"),
        ]);
        let json = state.to_json().unwrap();
        let parsed = SyncState::from_json(&json).unwrap();
        assert_eq!(parsed.data, state.data);
        assert_eq!(parsed.updated.timestamp(), state.updated.timestamp());
    }

    #[test]
    fn test_wire_shape_single_key_maps() {
        let state = SyncState::now(vec![SourceSnapshot::new("http://x/list", "content")]);
        let json = state.to_json().unwrap();
        assert!(json.contains(r#""data":[{"http://x/list":"content"}]"#));
    }

    #[test]
    fn test_malformed_documents_are_absent() {
        assert!(SyncState::from_json("not json").is_none());
        assert!(SyncState::from_json(r#"{"data":[]}"#).is_none());
        assert!(SyncState::from_json(r#"{"updated":"yesterday","data":[]}"#).is_none());
        assert!(SyncState::from_json(r#"{"updated":"2024-01-01T00:00:00Z"}"#).is_none());
    }

    #[test]
    fn test_staleness() {
        let mut state = SyncState::now(Vec::new());
        assert!(!state.is_stale(Duration::from_secs(86_400)));
        state.updated = Utc::now() - chrono::Duration::days(2);
        assert!(state.is_stale(Duration::from_secs(86_400)));
    }
}
