//! Check whether a value appears on one or more reputation blocklists.
//!
//! Two independent channels are supported: DNS-based blocklists (DNSBL),
//! queried live per lookup, and text-based blocklists, synchronized
//! snapshots of remote plaintext sources searched locally.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use blocker::{Blocker, EngineConfig};
//!
//! #[tokio::main]
//! async fn main() -> blocker::Result<()> {
//!     let config = EngineConfig::load("blocker.yml".as_ref())?;
//!     let engine = Blocker::new(&config);
//!
//!     // Check both channels
//!     let report = engine.lookup_one("203.0.113.7", true, true).await?;
//!     println!("{}", serde_json::to_string_pretty(&report)?);
//!
//!     // Refresh the text-list snapshot
//!     engine.sync_text_lists(true).await?;
//!
//!     Ok(())
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/blocker/0.3.0")]

// Re-export core types
pub use blocker_core::*;

// Re-export the engine surface
pub use blocker_engine::{
    Blocker, DnsblProber, EngineConfig, LookupFailure, NameLookup, SystemResolver, TextListSync,
};

// Re-export runtime for convenience
pub use serde;
pub use serde_json;
pub use tokio;
