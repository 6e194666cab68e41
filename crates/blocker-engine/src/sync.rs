//! Text-list synchronization: concurrent downloads, a persisted snapshot,
//! and a TTL-gated read-through cache.

use crate::config::EngineConfig;
use crate::runner::run_chunked;
use blocker_core::{BlockerError, Result, SourceSnapshot, SyncState};
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

const USER_AGENT: &str = concat!("blocker/", env!("CARGO_PKG_VERSION"));

/// Downloads configured text blocklist sources and serves the latest
/// snapshot through a freshness-checked cache.
///
/// The in-memory snapshot is the one piece of state shared between
/// concurrent readers and the sync writer; a single async mutex spans every
/// load-check-refresh cycle, so readers never observe a half-updated
/// snapshot and concurrent stale readers wait for the first in-flight sync
/// instead of duplicating it.
pub struct TextListSync {
    sources: Vec<String>,
    http: reqwest::Client,
    snapshot_path: PathBuf,
    ttl: Duration,
    parallelism: usize,
    timeout: Duration,
    cache: Mutex<Option<SyncState>>,
}

impl TextListSync {
    /// Create a synchronizer for the configured sources
    #[must_use]
    pub fn new(config: &EngineConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(config.http_timeout())
            .user_agent(USER_AGENT)
            .gzip(true)
            .build()
            .expect("failed to build HTTP client");

        Self {
            sources: config.sources.clone(),
            http,
            snapshot_path: config.snapshot_path.clone(),
            ttl: config.ttl(),
            parallelism: config.thread_count.max(1),
            timeout: config.sync_timeout(),
            cache: Mutex::new(None),
        }
    }

    /// Build a fresh snapshot from every configured source and persist it.
    ///
    /// Unreachable sources are skipped, not fatal. A persistence failure is
    /// returned as an error, but only after the fresh state has been
    /// installed in memory, so concurrent readers still see the new data.
    pub async fn sync(&self) -> Result<SyncState> {
        let mut cache = self.cache.lock().await;
        self.sync_locked(&mut cache).await
    }

    /// Return the current snapshot, loading it from disk on first read and
    /// re-syncing when it is absent, malformed, or older than the TTL.
    ///
    /// `force` always re-syncs.
    pub async fn get_data(&self, force: bool) -> Result<SyncState> {
        let mut cache = self.cache.lock().await;

        if cache.is_none() && !force {
            *cache = self.load().await;
        }

        let needs_sync = force
            || match cache.as_ref() {
                None => true,
                Some(state) => state.is_stale(self.ttl),
            };
        if needs_sync {
            match self.sync_locked(&mut cache).await {
                Ok(state) => return Ok(state),
                Err(e @ BlockerError::Persistence(_)) => {
                    // Fresh data is already installed in memory; keep serving it.
                    error!(error = %e, "failed to persist synced snapshot");
                }
                Err(e) => match cache.as_ref() {
                    Some(_) => warn!(error = %e, "re-sync failed; serving previous snapshot"),
                    None => return Err(e),
                },
            }
        }

        cache.clone().ok_or(BlockerError::DataUnavailable)
    }

    async fn sync_locked(&self, cache: &mut Option<SyncState>) -> Result<SyncState> {
        info!(sources = self.sources.len(), "syncing text blocklist sources");
        let data = tokio::time::timeout(self.timeout, self.download_all())
            .await
            .map_err(|_| BlockerError::Timeout(self.timeout.as_secs()))?;

        let state = SyncState::now(data);
        *cache = Some(state.clone());
        self.persist(&state).await?;
        Ok(state)
    }

    /// Download every source in concurrently-processed batches.
    ///
    /// The runner returns batches in no guaranteed order, so entries carry
    /// their source index and the snapshot is re-sorted to configured order.
    async fn download_all(&self) -> Vec<SourceSnapshot> {
        let indexed: Vec<(usize, String)> = self.sources.iter().cloned().enumerate().collect();
        let client = self.http.clone();

        let batches = run_chunked(indexed, self.parallelism, move |batch| {
            let client = client.clone();
            async move {
                let mut fetched = Vec::with_capacity(batch.len());
                for (index, url) in batch {
                    match fetch_source(&client, &url).await {
                        Ok(content) => {
                            info!(url, bytes = content.len(), "downloaded source");
                            fetched.push((index, SourceSnapshot::new(url, content)));
                        }
                        Err(e) => debug!(error = %e, "skipping source"),
                    }
                }
                fetched
            }
        })
        .await;

        let mut entries: Vec<(usize, SourceSnapshot)> = batches.into_iter().flatten().collect();
        entries.sort_by_key(|(index, _)| *index);
        entries.into_iter().map(|(_, snapshot)| snapshot).collect()
    }

    async fn persist(&self, state: &SyncState) -> Result<()> {
        let json = state
            .to_json()
            .map_err(|e| BlockerError::Persistence(e.to_string()))?;
        if let Some(parent) = self.snapshot_path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| BlockerError::Persistence(e.to_string()))?;
            }
        }
        tokio::fs::write(&self.snapshot_path, json)
            .await
            .map_err(|e| BlockerError::Persistence(e.to_string()))?;
        debug!(path = %self.snapshot_path.display(), "persisted snapshot");
        Ok(())
    }

    async fn load(&self) -> Option<SyncState> {
        let raw = tokio::fs::read_to_string(&self.snapshot_path).await.ok()?;
        info!(path = %self.snapshot_path.display(), "loading snapshot from disk");
        let state = SyncState::from_json(&raw);
        if state.is_none() {
            warn!(
                path = %self.snapshot_path.display(),
                "persisted snapshot is malformed; will re-sync"
            );
        }
        state
    }
}

/// Fetch one source body, decoding it lossily.
async fn fetch_source(client: &reqwest::Client, url: &str) -> Result<String> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| BlockerError::Download {
            url: url.to_string(),
            message: e.to_string(),
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(BlockerError::Download {
            url: url.to_string(),
            message: format!("unexpected status {status}"),
        });
    }

    let body = response.bytes().await.map_err(|e| BlockerError::Decode {
        url: url.to_string(),
        message: e.to_string(),
    })?;
    Ok(String::from_utf8_lossy(&body).into_owned())
}
