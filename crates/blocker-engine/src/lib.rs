//! Concurrent lookup-and-matching engine for reputation blocklists.
//!
//! Two independent detection channels feed one per-value report:
//!
//! - **DNSBL**: the value is normalized into reverse-query form and probed
//!   live against every configured blocklist zone.
//! - **Text lists**: remote plaintext sources are synchronized into a local
//!   snapshot with a one-day freshness window and searched with literal
//!   word-boundary patterns.
//!
//! # Example
//!
//! ```rust,ignore
//! use blocker_engine::{Blocker, EngineConfig};
//!
//! #[tokio::main]
//! async fn main() -> blocker_core::Result<()> {
//!     let config = EngineConfig::load("blocker.yml".as_ref())?;
//!     let engine = Blocker::new(&config);
//!
//!     let report = engine.lookup_one("203.0.113.7", true, true).await?;
//!     for (value, matches) in report.iter() {
//!         println!("{value}: {} matches", matches.len());
//!     }
//!     Ok(())
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/blocker-engine/0.3.0")]

mod config;
mod dnsbl;
mod lookup;
pub mod normalize;
mod resolver;
mod runner;
mod sync;

pub use config::EngineConfig;
pub use dnsbl::DnsblProber;
pub use lookup::Blocker;
pub use resolver::{LookupFailure, NameLookup, SystemResolver};
pub use runner::run_chunked;
pub use sync::TextListSync;
