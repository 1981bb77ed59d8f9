//! Embedded demo forest.
//!
//! A fixed set of request logs (seven top-level requests with nested child
//! operations) so the viewer can run without any external data source. The
//! document is embedded at compile time and parsed on demand.

use crate::error::Result;
use crate::forest::LogForest;
use crate::types::LogEntry;

const SAMPLE_JSON: &str = include_str!("sample_logs.json");

/// Parses the embedded demo forest.
///
/// # Errors
///
/// Returns a serialization error if the embedded document is malformed;
/// the document is covered by tests, so this only fires on a broken build.
pub fn sample_forest() -> Result<LogForest> {
    let roots: Vec<LogEntry> = serde_json::from_str(SAMPLE_JSON)?;
    Ok(LogForest::from_roots(roots))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{LogId, Method, SearchQuery};

    fn forest() -> LogForest {
        sample_forest().expect("embedded sample parses")
    }

    #[test]
    fn sample_has_seven_roots() {
        let forest = forest();
        assert_eq!(forest.root_count(), 7);
        assert_eq!(forest.total_entries(), 35);
    }

    #[test]
    fn first_root_matches_reference_scenario() {
        let forest = forest();
        let root = forest.get(&LogId::new("1")).expect("root 1 exists");

        assert_eq!(root.endpoint, "/api/users/create");
        assert_eq!(root.method, Method::Post);
        assert_eq!(root.status, 201);
        // 3 direct children; the first and third each have 2 of their own.
        assert_eq!(root.child_count(), 3);
        assert_eq!(root.descendant_count(), 7);
    }

    #[test]
    fn reference_scenario_queries() {
        let forest = forest();

        let by_status = forest.search(&SearchQuery::new("201"));
        assert!(by_status.iter().any(|e| e.id.as_str() == "1"));

        // A child-only endpoint match never surfaces its root.
        let by_child_endpoint = forest.search(&SearchQuery::new("db.users"));
        assert!(by_child_endpoint.is_empty());
    }

    #[test]
    fn nested_entries_are_reachable_by_id() {
        let forest = forest();
        let deep = forest.get(&LogId::new("6-1-2")).expect("nested entry");
        assert_eq!(deep.endpoint, "network.tcp.connect");
        assert_eq!(deep.status, 500);
    }

    #[test]
    fn sample_covers_every_method() {
        let forest = forest();
        for method in [
            Method::Get,
            Method::Post,
            Method::Put,
            Method::Delete,
            Method::Patch,
        ] {
            assert!(
                forest.roots().iter().any(|root| root.method == method),
                "sample should contain a {} root",
                method.as_str()
            );
        }
    }
}
