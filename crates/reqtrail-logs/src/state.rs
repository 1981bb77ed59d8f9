//! View state owned by the presentation layer.
//!
//! This module provides:
//! - [`ExpansionState`] — Per-node expand/collapse flags keyed by [`LogId`]
//! - [`ViewState`] — Detail-view selection that scopes expansion state
//!
//! None of this lives in [`crate::LogForest`]: the forest is immutable, and
//! every transient flag here is passed around explicitly rather than stored
//! as ambient global state.

use std::collections::HashSet;

use crate::types::LogId;

/// Per-node expansion flags for a rendered tree.
///
/// Every node defaults to collapsed. Toggling flips exactly one node's flag
/// and never touches ancestors, siblings, or descendants — collapsing a
/// parent hides its subtree but leaves descendant flags intact, so
/// re-expanding the parent restores the subtree exactly as it was.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionState {
    expanded: HashSet<LogId>,
}

impl ExpansionState {
    /// Creates a fresh state with every node collapsed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the node is currently expanded.
    #[must_use]
    pub fn is_expanded(&self, id: &LogId) -> bool {
        self.expanded.contains(id)
    }

    /// Flips one node's flag and returns its new state.
    pub fn toggle(&mut self, id: &LogId) -> bool {
        if self.expanded.remove(id) {
            false
        } else {
            self.expanded.insert(id.clone());
            true
        }
    }

    /// Collapses every node.
    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }

    /// Returns the number of expanded nodes.
    #[must_use]
    pub fn expanded_count(&self) -> usize {
        self.expanded.len()
    }
}

/// Detail-view selection state.
///
/// At most one top-level entry is open for detailed viewing at a time, and
/// expansion state is scoped to that selection: selecting a different entry
/// (or clearing the selection) drops all expansion flags, so a log always
/// reopens with its children collapsed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewState {
    selected: Option<LogId>,
    expansion: ExpansionState,
}

impl ViewState {
    /// Creates an empty view state with nothing selected.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens an entry for detailed viewing.
    ///
    /// Selecting an entry other than the current one resets all expansion
    /// state; re-selecting the already-open entry keeps it.
    pub fn select(&mut self, id: LogId) {
        if self.selected.as_ref() != Some(&id) {
            self.expansion.collapse_all();
        }
        self.selected = Some(id);
    }

    /// Closes the detail view and drops its expansion state.
    pub fn clear_selection(&mut self) {
        self.selected = None;
        self.expansion.collapse_all();
    }

    /// Returns the id of the open entry, if any.
    #[must_use]
    pub fn selected(&self) -> Option<&LogId> {
        self.selected.as_ref()
    }

    /// Returns the expansion flags for the open detail view.
    #[must_use]
    pub fn expansion(&self) -> &ExpansionState {
        &self.expansion
    }

    /// Returns the expansion flags for mutation.
    pub fn expansion_mut(&mut self) -> &mut ExpansionState {
        &mut self.expansion
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: &str) -> LogId {
        LogId::new(raw)
    }

    // ===========================================
    // ExpansionState Tests
    // ===========================================

    #[test]
    fn nodes_default_to_collapsed() {
        let state = ExpansionState::new();
        assert!(!state.is_expanded(&id("1-1")));
        assert_eq!(state.expanded_count(), 0);
    }

    #[test]
    fn toggle_flips_state() {
        let mut state = ExpansionState::new();
        assert!(state.toggle(&id("1-1")));
        assert!(state.is_expanded(&id("1-1")));
        assert!(!state.toggle(&id("1-1")));
        assert!(!state.is_expanded(&id("1-1")));
    }

    #[test]
    fn toggle_is_independent_per_node() {
        let mut state = ExpansionState::new();
        state.toggle(&id("parent"));
        state.toggle(&id("child-a"));

        // Toggling a sibling leaves the others untouched.
        state.toggle(&id("child-b"));
        assert!(state.is_expanded(&id("parent")));
        assert!(state.is_expanded(&id("child-a")));
        assert!(state.is_expanded(&id("child-b")));

        state.toggle(&id("child-b"));
        assert!(state.is_expanded(&id("parent")));
        assert!(state.is_expanded(&id("child-a")));
        assert!(!state.is_expanded(&id("child-b")));
    }

    #[test]
    fn descendant_flags_survive_ancestor_collapse() {
        let mut state = ExpansionState::new();
        state.toggle(&id("parent"));
        state.toggle(&id("child"));

        // Collapse the parent: the child flag must persist so re-expanding
        // the parent restores the subtree as it was.
        state.toggle(&id("parent"));
        assert!(!state.is_expanded(&id("parent")));
        assert!(state.is_expanded(&id("child")));

        state.toggle(&id("parent"));
        assert!(state.is_expanded(&id("child")));
    }

    #[test]
    fn collapse_all_clears_everything() {
        let mut state = ExpansionState::new();
        state.toggle(&id("a"));
        state.toggle(&id("b"));
        state.collapse_all();
        assert_eq!(state.expanded_count(), 0);
        assert!(!state.is_expanded(&id("a")));
    }

    // ===========================================
    // ViewState Tests
    // ===========================================

    #[test]
    fn selecting_a_different_entry_resets_expansion() {
        let mut view = ViewState::new();
        view.select(id("x"));
        view.expansion_mut().toggle(&id("x-1"));
        view.expansion_mut().toggle(&id("x-2"));
        assert_eq!(view.expansion().expanded_count(), 2);

        view.select(id("y"));
        assert_eq!(view.selected(), Some(&id("y")));
        assert_eq!(view.expansion().expanded_count(), 0);

        // Coming back to "x" yields the default collapsed state.
        view.select(id("x"));
        assert!(!view.expansion().is_expanded(&id("x-1")));
        assert!(!view.expansion().is_expanded(&id("x-2")));
    }

    #[test]
    fn reselecting_same_entry_keeps_expansion() {
        let mut view = ViewState::new();
        view.select(id("x"));
        view.expansion_mut().toggle(&id("x-1"));

        view.select(id("x"));
        assert!(view.expansion().is_expanded(&id("x-1")));
    }

    #[test]
    fn clearing_selection_drops_expansion() {
        let mut view = ViewState::new();
        view.select(id("x"));
        view.expansion_mut().toggle(&id("x-1"));

        view.clear_selection();
        assert!(view.selected().is_none());
        assert_eq!(view.expansion().expanded_count(), 0);
    }
}
