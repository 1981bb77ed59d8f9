//! Data sources for the viewer.
//!
//! The forest is supplied wholesale at startup: either a JSON document from
//! disk (an array of log entries) or the embedded demo data. There is no
//! ingestion pipeline, watching, or streaming behind this — one read, one
//! immutable forest.

use std::fs;
use std::path::Path;

use anyhow::Context;
use reqtrail_logs::{sample_forest, LogEntry, LogForest};
use tracing::info;

/// Loads the forest from a file, or the embedded sample when no file is
/// given.
pub fn load_forest(path: Option<&Path>) -> anyhow::Result<LogForest> {
    let forest = match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading log file {}", path.display()))?;
            let roots: Vec<LogEntry> = serde_json::from_str(&text)
                .with_context(|| format!("parsing log file {}", path.display()))?;
            LogForest::from_roots(roots)
        }
        None => sample_forest().context("parsing embedded sample logs")?,
    };

    info!(
        roots = forest.root_count(),
        entries = forest.total_entries(),
        "loaded log forest"
    );
    Ok(forest)
}
