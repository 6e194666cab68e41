//! Strongly-typed representations of lookup results and synced snapshots.

mod lookup;
mod snapshot;

pub use lookup::{DnsblResult, LookupReport, MatchRecord};
pub use snapshot::{SourceSnapshot, SyncState};
