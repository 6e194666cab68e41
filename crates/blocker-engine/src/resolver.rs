//! Forward-lookup seam over the host's standard DNS resolution.

use async_trait::async_trait;
use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::error::ResolveErrorKind;
use hickory_resolver::TokioAsyncResolver;
use std::net::Ipv4Addr;

/// Why a forward lookup produced no usable answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupFailure {
    /// The name does not exist (NXDOMAIN / no records).
    ///
    /// For DNSBL probes this is the expected outcome for the overwhelming
    /// majority of zones.
    NotFound,
    /// Any other resolver error (timeout, SERVFAIL, transport)
    Other(String),
}

impl std::fmt::Display for LookupFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound => f.write_str("name not found"),
            Self::Other(message) => f.write_str(message),
        }
    }
}

/// Forward A-record lookup capability
///
/// The production implementation delegates to the host resolver; tests
/// substitute an in-memory map.
#[async_trait]
pub trait NameLookup: Send + Sync {
    /// Resolve `name` to its IPv4 addresses
    async fn lookup_a(&self, name: &str) -> Result<Vec<Ipv4Addr>, LookupFailure>;
}

/// [`NameLookup`] backed by the host's configured resolver
pub struct SystemResolver {
    inner: TokioAsyncResolver,
}

impl Default for SystemResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemResolver {
    /// Create a resolver from the system configuration, falling back to the
    /// library defaults when no system configuration can be read
    #[must_use]
    pub fn new() -> Self {
        let inner = TokioAsyncResolver::tokio_from_system_conf().unwrap_or_else(|_| {
            TokioAsyncResolver::tokio(ResolverConfig::default(), ResolverOpts::default())
        });
        Self { inner }
    }
}

#[async_trait]
impl NameLookup for SystemResolver {
    async fn lookup_a(&self, name: &str) -> Result<Vec<Ipv4Addr>, LookupFailure> {
        match self.inner.ipv4_lookup(name).await {
            Ok(lookup) => Ok(lookup.iter().map(|a| a.0).collect()),
            Err(e) => match e.kind() {
                ResolveErrorKind::NoRecordsFound { .. } => Err(LookupFailure::NotFound),
                _ => Err(LookupFailure::Other(e.to_string())),
            },
        }
    }
}
