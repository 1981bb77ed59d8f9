//! The immutable log forest and its query operations.
//!
//! This module provides:
//! - [`LogForest`] — Ordered forest of log entries with an id index
//! - Root-level search via [`SearchQuery`]
//! - Aggregate statistics for the list header

use std::collections::HashMap;

use tracing::debug;

use crate::types::{LogEntry, LogId, SearchQuery};

/// Path from a root to a nested entry: root index, then child indices.
type EntryPath = Vec<usize>;

/// An immutable, ordered forest of log entries.
///
/// The forest is supplied wholesale and never mutated; expansion flags,
/// selection, and other view state live outside it. An id index is built
/// once at construction so entries can be addressed by [`LogId`] without
/// re-walking the tree. Ids are expected to be globally unique; if the data
/// violates that, the first occurrence in document order (preorder, roots
/// first) wins and later duplicates are unreachable through [`Self::get`].
#[derive(Debug, Clone, Default)]
pub struct LogForest {
    roots: Vec<LogEntry>,
    index: HashMap<LogId, EntryPath>,
}

impl LogForest {
    /// Builds a forest from ordered root entries.
    #[must_use]
    pub fn from_roots(roots: Vec<LogEntry>) -> Self {
        let index = build_index(&roots);
        debug!(
            roots = roots.len(),
            entries = index.len(),
            "indexed log forest"
        );
        Self { roots, index }
    }

    /// Returns the top-level entries in display order.
    #[must_use]
    pub fn roots(&self) -> &[LogEntry] {
        &self.roots
    }

    /// Looks up an entry anywhere in the forest by id.
    ///
    /// Returns the first occurrence in document order if the id is
    /// duplicated.
    #[must_use]
    pub fn get(&self, id: &LogId) -> Option<&LogEntry> {
        let path = self.index.get(id)?;
        let (root, rest) = path.split_first()?;
        let mut node = self.roots.get(*root)?;
        for &child in rest {
            node = node.children.get(child)?;
        }
        Some(node)
    }

    /// Returns a node's children in display order.
    ///
    /// Empty for leaves and for ids not present in the forest.
    #[must_use]
    pub fn children(&self, id: &LogId) -> &[LogEntry] {
        self.get(id).map_or(&[], |entry| entry.children.as_slice())
    }

    /// Filters the top-level entries by query, preserving order.
    ///
    /// Only roots are searched; a child-only match does not surface its
    /// parent. Pure: the same forest and query always yield the same result.
    #[must_use]
    pub fn search(&self, query: &SearchQuery) -> Vec<&LogEntry> {
        self.roots.iter().filter(|entry| entry.matches(query)).collect()
    }

    /// Returns the number of top-level entries.
    #[must_use]
    pub fn root_count(&self) -> usize {
        self.roots.len()
    }

    /// Returns the number of direct children across all roots.
    #[must_use]
    pub fn direct_child_count(&self) -> usize {
        self.roots.iter().map(LogEntry::child_count).sum()
    }

    /// Returns the total number of entries in the forest, roots included.
    #[must_use]
    pub fn total_entries(&self) -> usize {
        self.roots
            .iter()
            .map(|root| 1 + root.descendant_count())
            .sum()
    }

    /// Returns true if the forest has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }
}

impl From<Vec<LogEntry>> for LogForest {
    fn from(roots: Vec<LogEntry>) -> Self {
        Self::from_roots(roots)
    }
}

/// Walks the forest with an explicit stack and records the path to the
/// first occurrence of every id.
fn build_index(roots: &[LogEntry]) -> HashMap<LogId, EntryPath> {
    let mut index = HashMap::new();
    let mut stack: Vec<(&LogEntry, EntryPath)> = Vec::new();

    // Pushed in reverse so the stack pops in document order.
    for (i, root) in roots.iter().enumerate().rev() {
        stack.push((root, vec![i]));
    }

    while let Some((entry, path)) = stack.pop() {
        for (i, child) in entry.children.iter().enumerate().rev() {
            let mut child_path = path.clone();
            child_path.push(i);
            stack.push((child, child_path));
        }
        index.entry(entry.id.clone()).or_insert(path);
    }

    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Method;
    use chrono::NaiveDateTime;
    use proptest::prelude::*;
    use serde_json::json;

    fn ts(raw: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(raw, crate::types::TIMESTAMP_FORMAT)
            .expect("valid test timestamp")
    }

    fn entry(id: &str, endpoint: &str, method: Method, status: u16) -> LogEntry {
        LogEntry {
            id: LogId::new(id),
            timestamp: ts("2025-01-15 14:32:18.234"),
            method,
            endpoint: endpoint.to_string(),
            status,
            duration_ms: 10,
            request: json!({}),
            response: json!({}),
            children: Vec::new(),
        }
    }

    fn entry_with_children(
        id: &str,
        endpoint: &str,
        method: Method,
        status: u16,
        children: Vec<LogEntry>,
    ) -> LogEntry {
        LogEntry {
            children,
            ..entry(id, endpoint, method, status)
        }
    }

    /// Two roots; the first has a nested child whose endpoint would match
    /// "db.users" if children were searched.
    fn small_forest() -> LogForest {
        let first = entry_with_children(
            "1",
            "/api/users/create",
            Method::Post,
            201,
            vec![
                entry_with_children(
                    "1-1",
                    "db.users.insert",
                    Method::Post,
                    201,
                    vec![entry("1-1-1", "db.transaction.begin", Method::Post, 200)],
                ),
                entry("1-2", "cache.set", Method::Post, 200),
            ],
        );
        let second = entry("2", "/api/products", Method::Get, 200);
        LogForest::from_roots(vec![first, second])
    }

    // ===========================================
    // Lookup Tests
    // ===========================================

    #[test]
    fn get_finds_roots_and_nested_entries() {
        let forest = small_forest();

        let root = forest.get(&LogId::new("1"));
        assert_eq!(root.map(|e| e.endpoint.as_str()), Some("/api/users/create"));

        let nested = forest.get(&LogId::new("1-1-1"));
        assert_eq!(
            nested.map(|e| e.endpoint.as_str()),
            Some("db.transaction.begin")
        );

        assert!(forest.get(&LogId::new("missing")).is_none());
    }

    #[test]
    fn children_by_id() {
        let forest = small_forest();

        let kids = forest.children(&LogId::new("1-1"));
        assert_eq!(kids.len(), 1);
        assert_eq!(kids[0].id.as_str(), "1-1-1");

        assert!(forest.children(&LogId::new("1-2")).is_empty());
        assert!(forest.children(&LogId::new("missing")).is_empty());
    }

    #[test]
    fn get_prefers_first_occurrence_of_duplicate_id() {
        let forest = LogForest::from_roots(vec![
            entry("dup", "/first", Method::Get, 200),
            entry("dup", "/second", Method::Get, 200),
        ]);

        let found = forest.get(&LogId::new("dup"));
        assert_eq!(found.map(|e| e.endpoint.as_str()), Some("/first"));
    }

    #[test]
    fn duplicate_id_nested_after_root_still_resolves_to_root() {
        let forest = LogForest::from_roots(vec![entry_with_children(
            "a",
            "/root",
            Method::Get,
            200,
            vec![entry("a", "/child", Method::Get, 200)],
        )]);

        let found = forest.get(&LogId::new("a"));
        assert_eq!(found.map(|e| e.endpoint.as_str()), Some("/root"));
    }

    // ===========================================
    // Search Tests
    // ===========================================

    #[test]
    fn search_empty_query_is_identity() {
        let forest = small_forest();
        let results = forest.search(&SearchQuery::new(""));
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].id.as_str(), "1");
        assert_eq!(results[1].id.as_str(), "2");

        let results = forest.search(&SearchQuery::new("   "));
        assert_eq!(results.len(), 2);
    }

    #[test]
    fn search_is_case_insensitive() {
        let forest = small_forest();
        let lower = forest.search(&SearchQuery::new("get"));
        let upper = forest.search(&SearchQuery::new("GET"));
        assert_eq!(lower.len(), 1);
        assert_eq!(lower[0].id, upper[0].id);
    }

    #[test]
    fn search_does_not_descend_into_children() {
        let forest = small_forest();
        // "db.users" only appears on a nested child of root "1".
        let results = forest.search(&SearchQuery::new("db.users"));
        assert!(results.is_empty());
    }

    #[test]
    fn search_status_is_substring_match() {
        let forest = LogForest::from_roots(vec![
            entry("a", "/a", Method::Get, 200),
            entry("b", "/b", Method::Get, 401),
            entry("c", "/c", Method::Get, 500),
            entry("d", "/d", Method::Get, 17),
        ]);

        let results = forest.search(&SearchQuery::new("0"));
        let ids: Vec<&str> = results.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn search_preserves_root_order() {
        let forest = LogForest::from_roots(vec![
            entry("z", "/api/z", Method::Get, 200),
            entry("m", "/api/m", Method::Get, 200),
            entry("a", "/api/a", Method::Get, 200),
        ]);

        let results = forest.search(&SearchQuery::new("api"));
        let ids: Vec<&str> = results.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["z", "m", "a"]);
    }

    #[test]
    fn search_no_match_is_empty_not_error() {
        let forest = small_forest();
        assert!(forest.search(&SearchQuery::new("nonexistent")).is_empty());
    }

    // ===========================================
    // Stats Tests
    // ===========================================

    #[test]
    fn forest_stats() {
        let forest = small_forest();
        assert_eq!(forest.root_count(), 2);
        // Root "1" has 2 direct children, root "2" none.
        assert_eq!(forest.direct_child_count(), 2);
        // 2 roots + 2 children + 1 grandchild.
        assert_eq!(forest.total_entries(), 5);
        assert!(!forest.is_empty());
    }

    #[test]
    fn empty_forest() {
        let forest = LogForest::default();
        assert!(forest.is_empty());
        assert_eq!(forest.total_entries(), 0);
        assert!(forest.search(&SearchQuery::new("anything")).is_empty());
    }

    // ===========================================
    // Property Tests
    // ===========================================

    fn arb_entry(id: usize) -> impl Strategy<Value = LogEntry> {
        (
            "[a-z/._-]{1,20}",
            prop_oneof![
                Just(Method::Get),
                Just(Method::Post),
                Just(Method::Put),
                Just(Method::Delete),
                Just(Method::Patch),
            ],
            0u16..1000,
        )
            .prop_map(move |(endpoint, method, status)| {
                entry(&format!("id-{id}"), &endpoint, method, status)
            })
    }

    fn arb_roots() -> impl Strategy<Value = Vec<LogEntry>> {
        (0usize..8).prop_flat_map(|len| (0..len).map(arb_entry).collect::<Vec<_>>())
    }

    proptest! {
        #[test]
        fn empty_query_returns_all_roots_in_order(roots in arb_roots()) {
            let forest = LogForest::from_roots(roots.clone());
            let results = forest.search(&SearchQuery::new(""));
            prop_assert_eq!(results.len(), roots.len());
            for (found, original) in results.iter().zip(&roots) {
                prop_assert_eq!(&found.id, &original.id);
            }
        }

        #[test]
        fn search_result_is_subsequence_of_roots(
            roots in arb_roots(),
            query in "[a-z0-9]{0,4}",
        ) {
            let forest = LogForest::from_roots(roots);
            let results = forest.search(&SearchQuery::new(&query));
            let all: Vec<&LogEntry> = forest.roots().iter().collect();

            // Every result appears in the root list, in the same relative order.
            let mut cursor = 0;
            for found in results {
                let pos = all[cursor..]
                    .iter()
                    .position(|root| std::ptr::eq(*root, found));
                prop_assert!(pos.is_some());
                cursor += pos.unwrap_or(0) + 1;
            }
        }

        #[test]
        fn search_is_deterministic(roots in arb_roots(), query in "[a-z0-9]{0,4}") {
            let forest = LogForest::from_roots(roots);
            let q = SearchQuery::new(&query);
            let first: Vec<&str> = forest.search(&q).iter().map(|e| e.id.as_str()).collect();
            let second: Vec<&str> = forest.search(&q).iter().map(|e| e.id.as_str()).collect();
            prop_assert_eq!(first, second);
        }
    }
}
