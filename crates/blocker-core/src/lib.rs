//! Core types and error taxonomy for the blocker lookup engine.
//!
//! This crate provides the foundational types shared across the blocker
//! workspace:
//!
//! - **Types**: lookup reports, DNSBL results, and synced snapshots
//! - **Errors**: comprehensive error handling with [`BlockerError`]
//!
//! # Example
//!
//! ```rust,ignore
//! use blocker_core::{LookupReport, MatchRecord, Result};
//!
//! fn listed_anywhere(report: &LookupReport, value: &str) -> bool {
//!     report.matches(value).is_some_and(|m| !m.is_empty())
//! }
//! ```

#![doc(html_root_url = "https://docs.rs/blocker-core/0.3.0")]

mod error;
pub mod types;

pub use error::{BlockerError, Result};
pub use types::*;
