//! # reqtrail-logs
//!
//! Data model and query operations for hierarchical API request/response
//! logs.
//!
//! This crate provides:
//!
//! - [`LogEntry`] — A request/response record, optionally owning nested
//!   child operations (database calls, cache operations, downstream
//!   requests), forming an ordered forest of unbounded depth
//! - [`LogForest`] — The immutable forest with an id index, root-level
//!   search, and aggregate statistics
//! - [`SearchQuery`] — Normalized case-insensitive substring filtering over
//!   top-level entries
//! - [`ExpansionState`] / [`ViewState`] — Per-node expand/collapse flags and
//!   detail-view selection, owned by the presentation layer
//! - [`json`] — Pretty-printing for the drill-down payload panels
//! - [`sample_forest`] — An embedded demo forest
//!
//! The forest is read-only for the lifetime of a view: there are no create,
//! update, or delete operations on entries, and all transient state lives in
//! the view-state types rather than the tree.
//!
//! ## Example
//!
//! ```rust
//! use reqtrail_logs::{sample_forest, SearchQuery};
//!
//! let forest = sample_forest()?;
//! let hits = forest.search(&SearchQuery::new("POST"));
//! assert!(!hits.is_empty());
//!
//! for entry in hits {
//!     println!("{} {} ({} child ops)", entry.method.as_str(), entry.endpoint,
//!         entry.descendant_count());
//! }
//! # Ok::<(), reqtrail_logs::LogError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod forest;
pub mod json;
pub mod sample;
pub mod state;
pub mod types;

// Re-export main types
pub use error::{LogError, Result};
pub use forest::LogForest;
pub use json::{panel_title, pretty, PayloadKind};
pub use sample::sample_forest;
pub use state::{ExpansionState, ViewState};
pub use types::{
    LogEntry, LogEntryBuilder, LogId, Method, SearchQuery, StatusCategory, TIMESTAMP_FORMAT,
};
