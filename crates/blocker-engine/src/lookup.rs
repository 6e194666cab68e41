//! Lookup orchestration: combines the DNSBL and text-list channels into a
//! single per-value report.

use crate::config::EngineConfig;
use crate::dnsbl::DnsblProber;
use crate::resolver::{NameLookup, SystemResolver};
use crate::sync::TextListSync;
use blocker_core::{BlockerError, LookupReport, MatchRecord, Result, SyncState};
use regex::Regex;
use std::sync::Arc;
use tracing::debug;

/// Checks values against DNS-based and text-based blocklists.
pub struct Blocker {
    prober: DnsblProber,
    sync: TextListSync,
}

impl Blocker {
    /// Create an engine using the host's standard DNS resolution
    #[must_use]
    pub fn new(config: &EngineConfig) -> Self {
        Self::with_resolver(config, Arc::new(SystemResolver::new()))
    }

    /// Create an engine with a custom forward-lookup implementation
    #[must_use]
    pub fn with_resolver(config: &EngineConfig, resolver: Arc<dyn NameLookup>) -> Self {
        Self {
            prober: DnsblProber::new(config, resolver),
            sync: TextListSync::new(config),
        }
    }

    /// Check each value against the selected channels.
    ///
    /// Every input value is present as a key in the report once any channel
    /// runs, even when nothing matched it. DNSBL results are appended only
    /// when at least one zone matched; text-list matching is exhaustive over
    /// every source, in snapshot order.
    ///
    /// Fails with [`BlockerError::InvalidArgument`] when no value is given
    /// or no channel is selected, and with [`BlockerError::DataUnavailable`]
    /// when the text-list channel is selected but no snapshot data is
    /// obtainable.
    pub async fn lookup(
        &self,
        values: &[&str],
        text_list: bool,
        dns_list: bool,
    ) -> Result<LookupReport> {
        if values.is_empty() || values.iter().any(|value| value.is_empty()) {
            return Err(BlockerError::InvalidArgument(
                "no value provided to lookup".to_string(),
            ));
        }
        if !text_list && !dns_list {
            return Err(BlockerError::InvalidArgument(
                "no lookup channel selected".to_string(),
            ));
        }

        let mut report = LookupReport::new();

        if dns_list {
            debug!("starting DNSBL lookups");
            for value in values {
                let result = self.prober.check(value).await;
                let matches = report.entry(value);
                if result.is_listed() {
                    matches.push(MatchRecord::Dnsbl(result));
                }
            }
            debug!("finished DNSBL lookups");
        }

        if text_list {
            let state = self.sync.get_data(false).await?;
            if state.is_empty() {
                return Err(BlockerError::DataUnavailable);
            }
            for value in values {
                let pattern = literal_pattern(value)?;
                let matches = report.entry(value);
                for snapshot in &state.data {
                    if pattern.is_match(&snapshot.content) {
                        matches.push(MatchRecord::TextSource(snapshot.url.clone()));
                    }
                }
            }
        }

        Ok(report)
    }

    /// Convenience wrapper for a single value
    pub async fn lookup_one(
        &self,
        value: &str,
        text_list: bool,
        dns_list: bool,
    ) -> Result<LookupReport> {
        self.lookup(&[value], text_list, dns_list).await
    }

    /// Ensure the text-list snapshot is current, returning it.
    ///
    /// Without `force` the snapshot is only re-downloaded when absent,
    /// malformed, or past its freshness window; `force` always re-syncs.
    pub async fn sync_text_lists(&self, force: bool) -> Result<SyncState> {
        self.sync.get_data(force).await
    }
}

/// Compile a lookup value into a literal word-boundary pattern.
///
/// Values are untrusted input: every regex metacharacter is escaped before
/// compiling, so `a.*evil` matches only the literal text `a.*evil`.
fn literal_pattern(value: &str) -> Result<Regex> {
    Regex::new(&format!(r"\b{}\b", regex::escape(value)))
        .map_err(|e| BlockerError::InvalidArgument(format!("unusable lookup value: {e}")))
}
