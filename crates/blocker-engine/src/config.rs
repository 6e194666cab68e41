//! Engine configuration: zones, sources, and operational limits.

use blocker_core::{BlockerError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration for the lookup engine.
///
/// Zone and source lists come from external configuration; everything else
/// has serde defaults so a minimal file only needs `zones:` and `sources:`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// DNSBL zone names, probed in the given order
    #[serde(default)]
    pub zones: Vec<String>,

    /// Text blocklist source URLs, downloaded in batches
    #[serde(default)]
    pub sources: Vec<String>,

    /// Number of concurrent batches for downloads (default: 5)
    #[serde(default = "default_thread_count")]
    pub thread_count: usize,

    /// Maximum in-flight DNSBL zone queries (default: 10)
    #[serde(default = "default_max_in_flight")]
    pub max_in_flight: usize,

    /// Where the synced snapshot is persisted
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: PathBuf,

    /// Seconds before a synced snapshot is considered stale (default: 1 day)
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,

    /// Overall deadline for one DNSBL probe, in seconds
    #[serde(default = "default_probe_timeout_secs")]
    pub probe_timeout_secs: u64,

    /// Overall deadline for one sync run, in seconds
    #[serde(default = "default_sync_timeout_secs")]
    pub sync_timeout_secs: u64,

    /// Per-request HTTP timeout for source downloads, in seconds
    #[serde(default = "default_http_timeout_secs")]
    pub http_timeout_secs: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            zones: Vec::new(),
            sources: Vec::new(),
            thread_count: default_thread_count(),
            max_in_flight: default_max_in_flight(),
            snapshot_path: default_snapshot_path(),
            ttl_secs: default_ttl_secs(),
            probe_timeout_secs: default_probe_timeout_secs(),
            sync_timeout_secs: default_sync_timeout_secs(),
            http_timeout_secs: default_http_timeout_secs(),
        }
    }
}

impl EngineConfig {
    /// Load config from a YAML file, falling back to defaults when the file
    /// does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            serde_yaml::from_str(&content).map_err(|e| BlockerError::Config(e.to_string()))
        } else {
            Ok(Self::default())
        }
    }

    /// Snapshot freshness window
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    /// Overall DNSBL probe deadline
    #[must_use]
    pub const fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }

    /// Overall sync deadline
    #[must_use]
    pub const fn sync_timeout(&self) -> Duration {
        Duration::from_secs(self.sync_timeout_secs)
    }

    /// Per-request HTTP timeout
    #[must_use]
    pub const fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_secs)
    }
}

// Default value functions for serde.
const fn default_thread_count() -> usize {
    5
}

const fn default_max_in_flight() -> usize {
    10
}

fn default_snapshot_path() -> PathBuf {
    PathBuf::from("blocker_list.json")
}

const fn default_ttl_secs() -> u64 {
    86_400
}

const fn default_probe_timeout_secs() -> u64 {
    30
}

const fn default_sync_timeout_secs() -> u64 {
    120
}

const fn default_http_timeout_secs() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert!(config.zones.is_empty());
        assert!(config.sources.is_empty());
        assert_eq!(config.thread_count, 5);
        assert_eq!(config.ttl_secs, 86_400);
        assert_eq!(config.snapshot_path, PathBuf::from("blocker_list.json"));
    }

    #[test]
    fn test_minimal_yaml_uses_defaults() {
        let config: EngineConfig = serde_yaml::from_str(
            "zones:\n  - bl.example.com\nsources:\n  - http://x/list\n",
        )
        .unwrap();
        assert_eq!(config.zones, vec!["bl.example.com"]);
        assert_eq!(config.sources, vec!["http://x/list"]);
        assert_eq!(config.thread_count, 5);
        assert_eq!(config.probe_timeout_secs, 30);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = EngineConfig::load(Path::new("/nonexistent/blocker.yml")).unwrap();
        assert!(config.zones.is_empty());
    }
}
