//! DNSBL probing: fans out concurrent existence queries against the
//! configured blocklist zones.

use crate::config::EngineConfig;
use crate::normalize::normalize;
use crate::resolver::{LookupFailure, NameLookup};
use blocker_core::DnsblResult;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

/// Probes a value against a set of DNSBL zones.
///
/// A zone reports an address as listed when the query name
/// `{reversed}.{zone}` resolves to any A record; NXDOMAIN means not listed.
/// Every other failure is treated as not listed as well — a flaky zone must
/// never fail the whole probe.
pub struct DnsblProber {
    zones: Vec<String>,
    resolver: Arc<dyn NameLookup>,
    max_in_flight: usize,
    timeout: Duration,
}

impl DnsblProber {
    /// Create a prober for the configured zones
    #[must_use]
    pub fn new(config: &EngineConfig, resolver: Arc<dyn NameLookup>) -> Self {
        Self {
            zones: config.zones.clone(),
            resolver,
            max_in_flight: config.max_in_flight.max(1),
            timeout: config.probe_timeout(),
        }
    }

    /// Check one value against every configured zone.
    ///
    /// Never fails: a value that cannot be normalized degrades to a result
    /// with a null `matched_on`, and zone-level failures degrade to
    /// not-listed. Result ordering in `sources` follows task completion and
    /// is not significant.
    pub async fn check(&self, value: &str) -> DnsblResult {
        let normalized = match normalize(value, self.resolver.as_ref()).await {
            Ok(normalized) => normalized,
            Err(e) => {
                warn!(value, error = %e, "could not normalize value for DNSBL probe");
                return DnsblResult::unresolved();
            }
        };

        let sources = self.probe_zones(&normalized).await;
        DnsblResult {
            matched_on: Some(normalized),
            sources,
        }
    }

    /// Query every zone concurrently and collect the positive ones.
    ///
    /// Each zone task returns its own verdict and the verdicts are merged
    /// after join; there is no shared accumulator. In-flight queries are
    /// bounded by a semaphore. Zones still pending when the overall deadline
    /// expires are counted as not listed and their tasks aborted.
    async fn probe_zones(&self, normalized: &str) -> Vec<String> {
        let semaphore = Arc::new(Semaphore::new(self.max_in_flight));
        let deadline = tokio::time::Instant::now() + self.timeout;

        let handles: Vec<JoinHandle<Option<String>>> = self
            .zones
            .iter()
            .map(|zone| {
                let semaphore = semaphore.clone();
                let resolver = self.resolver.clone();
                let query = format!("{normalized}.{zone}");
                let zone = zone.clone();
                tokio::spawn(async move {
                    let _permit = semaphore.acquire().await.ok()?;
                    match resolver.lookup_a(&query).await {
                        Ok(addrs) if !addrs.is_empty() => Some(zone),
                        Ok(_) => None,
                        Err(LookupFailure::NotFound) => {
                            debug!(query, "not listed");
                            None
                        }
                        Err(LookupFailure::Other(e)) => {
                            warn!(query, error = %e, "zone query failed; treating as not listed");
                            None
                        }
                    }
                })
            })
            .collect();

        let mut sources = Vec::new();
        let mut pending = handles.into_iter();
        for handle in pending.by_ref() {
            match tokio::time::timeout_at(deadline, handle).await {
                Ok(Ok(Some(zone))) => sources.push(zone),
                Ok(Ok(None)) => {}
                Ok(Err(e)) => warn!(error = %e, "zone probe task failed"),
                Err(_) => {
                    warn!(
                        timeout_secs = self.timeout.as_secs(),
                        "DNSBL probe deadline expired; pending zones counted as not listed"
                    );
                    break;
                }
            }
        }
        for orphan in pending {
            orphan.abort();
        }
        sources
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::mock::MapResolver;
    use std::collections::BTreeSet;
    use std::net::Ipv4Addr;

    fn config(zones: &[&str]) -> EngineConfig {
        EngineConfig {
            zones: zones.iter().map(ToString::to_string).collect(),
            ..EngineConfig::default()
        }
    }

    #[tokio::test]
    async fn test_listed_zones_are_collected() {
        let resolver = MapResolver::new()
            .answer("4.3.2.1.bl.example.com", &[Ipv4Addr::new(127, 0, 0, 2)])
            .answer("4.3.2.1.spam.example.net", &[Ipv4Addr::new(127, 0, 0, 1)]);
        let prober = DnsblProber::new(
            &config(&["bl.example.com", "spam.example.net", "clean.example.org"]),
            Arc::new(resolver),
        );

        let result = prober.check("1.2.3.4").await;
        assert_eq!(result.matched_on.as_deref(), Some("4.3.2.1"));
        let sources: BTreeSet<&str> = result.sources.iter().map(String::as_str).collect();
        assert_eq!(sources, BTreeSet::from(["bl.example.com", "spam.example.net"]));
    }

    #[tokio::test]
    async fn test_unlisted_address_yields_empty_sources() {
        // End-to-end scenario: zone unreachable for 10.0.0.1.
        let prober = DnsblProber::new(&config(&["bl.example.com"]), Arc::new(MapResolver::new()));
        let result = prober.check("10.0.0.1").await;
        assert_eq!(result.matched_on.as_deref(), Some("1.0.0.10"));
        assert!(result.sources.is_empty());
    }

    #[tokio::test]
    async fn test_zone_failure_fails_open() {
        let resolver = MapResolver::new()
            .failure("4.3.2.1.broken.example.com", "SERVFAIL")
            .answer("4.3.2.1.bl.example.com", &[Ipv4Addr::new(127, 0, 0, 2)]);
        let prober = DnsblProber::new(
            &config(&["broken.example.com", "bl.example.com"]),
            Arc::new(resolver),
        );

        let result = prober.check("1.2.3.4").await;
        assert_eq!(result.sources, vec!["bl.example.com"]);
    }

    #[tokio::test]
    async fn test_unresolvable_value_degrades_to_null_match() {
        let prober = DnsblProber::new(&config(&["bl.example.com"]), Arc::new(MapResolver::new()));
        let result = prober.check("nope.invalid").await;
        assert!(result.matched_on.is_none());
        assert!(result.sources.is_empty());
    }

    #[tokio::test]
    async fn test_hostname_values_resolve_before_probing() {
        let resolver = MapResolver::new()
            .answer("mail.example.com", &[Ipv4Addr::new(10, 0, 0, 1)])
            .answer("1.0.0.10.bl.example.com", &[Ipv4Addr::new(127, 0, 0, 2)]);
        let prober = DnsblProber::new(&config(&["bl.example.com"]), Arc::new(resolver));

        let result = prober.check("mail.example.com").await;
        assert_eq!(result.matched_on.as_deref(), Some("1.0.0.10"));
        assert_eq!(result.sources, vec!["bl.example.com"]);
    }

    #[tokio::test]
    async fn test_no_zones_configured() {
        let prober = DnsblProber::new(&config(&[]), Arc::new(MapResolver::new()));
        let result = prober.check("1.2.3.4").await;
        assert_eq!(result.matched_on.as_deref(), Some("4.3.2.1"));
        assert!(result.sources.is_empty());
    }
}
