use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Outcome of probing one value against the configured DNSBL zones
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DnsblResult {
    /// Reversed query form the zones were probed with.
    ///
    /// `None` when the value could not be resolved or normalized.
    pub matched_on: Option<String>,

    /// Zones that reported the address as listed
    pub sources: Vec<String>,
}

impl DnsblResult {
    /// Result for a value that could not be normalized into a query form
    #[must_use]
    pub const fn unresolved() -> Self {
        Self {
            matched_on: None,
            sources: Vec::new(),
        }
    }

    /// Returns true if at least one zone reported the address as listed
    #[must_use]
    pub fn is_listed(&self) -> bool {
        !self.sources.is_empty()
    }
}

/// One match entry in a [`LookupReport`]
///
/// Serialized untagged: a DNSBL match renders as an object, a text-list
/// match as the bare source URL string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum MatchRecord {
    /// DNSBL probe outcome (recorded only when at least one zone matched)
    Dnsbl(DnsblResult),
    /// URL of a text-list source whose content matched the value
    TextSource(String),
}

/// Mapping from each submitted value to the ordered matches found for it
///
/// A value is always present as a key once any channel ran for it, even if
/// no source matched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct LookupReport(BTreeMap<String, Vec<MatchRecord>>);

impl LookupReport {
    /// Create an empty report
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Access the match list for a value, creating an empty entry if absent
    pub fn entry(&mut self, value: &str) -> &mut Vec<MatchRecord> {
        self.0.entry(value.to_string()).or_default()
    }

    /// Matches recorded for a value, if the value was looked up
    #[must_use]
    pub fn matches(&self, value: &str) -> Option<&[MatchRecord]> {
        self.0.get(value).map(Vec::as_slice)
    }

    /// Number of values in the report
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no value has been recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(value, matches)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Vec<MatchRecord>)> {
        self.0.iter()
    }
}

impl IntoIterator for LookupReport {
    type Item = (String, Vec<MatchRecord>);
    type IntoIter = std::collections::btree_map::IntoIter<String, Vec<MatchRecord>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
