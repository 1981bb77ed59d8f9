//! Application state for the request-log viewer.

use reqtrail_logs::{json, LogEntry, LogForest, PayloadKind, SearchQuery, ViewState};
use tracing::warn;

/// How long the "Copied!" indicator stays visible, in ticks.
pub const COPIED_TICKS: u8 = 20;

/// Which layer currently receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    /// The searchable root list.
    #[default]
    List,
    /// The detail view of one selected log.
    Detail,
    /// A request/response JSON panel on top of the detail view.
    Json,
}

/// One visible row of the detail tree: an entry plus its nesting depth.
#[derive(Debug)]
pub struct DetailRow<'a> {
    pub entry: &'a LogEntry,
    pub depth: usize,
}

/// An open JSON panel.
#[derive(Debug)]
pub struct JsonPanel {
    pub title: String,
    pub kind: PayloadKind,
    pub text: String,
    pub scroll: u16,
    /// Remaining ticks for the "Copied!" indicator; 0 means hidden.
    pub copied_ticks: u8,
}

/// Main application state.
///
/// The forest is immutable; everything mutable here is view state — the
/// query string, list selection, the detail-view selection with its
/// expansion flags, and the JSON panel.
#[derive(Debug)]
pub struct App {
    /// Is the app running.
    pub running: bool,

    /// The immutable log forest.
    pub forest: LogForest,

    /// Input focus layer.
    pub focus: Focus,

    /// Raw search input.
    pub query: String,

    /// Selection index into the filtered root list.
    pub list_selected: usize,

    /// Detail-view selection and expansion flags.
    pub view: ViewState,

    /// Highlighted row among the visible detail rows.
    pub detail_row: usize,

    /// Open JSON panel, if any.
    pub json: Option<JsonPanel>,
}

impl App {
    pub fn new(forest: LogForest) -> Self {
        Self {
            running: true,
            forest,
            focus: Focus::List,
            query: String::new(),
            list_selected: 0,
            view: ViewState::new(),
            detail_row: 0,
            json: None,
        }
    }

    /// The normalized form of the current search input.
    pub fn search_query(&self) -> SearchQuery {
        SearchQuery::new(&self.query)
    }

    /// Roots matching the current query, in display order.
    ///
    /// Recomputed on demand; the filter is pure, so this is safe to call on
    /// every frame.
    pub fn filtered(&self) -> Vec<&LogEntry> {
        self.forest.search(&self.search_query())
    }

    pub fn push_query_char(&mut self, c: char) {
        self.query.push(c);
        self.list_selected = 0;
    }

    pub fn pop_query_char(&mut self) {
        self.query.pop();
        self.list_selected = 0;
    }

    pub fn clear_query(&mut self) {
        self.query.clear();
        self.list_selected = 0;
    }

    pub fn select_next(&mut self) {
        let len = self.filtered().len();
        if self.list_selected + 1 < len {
            self.list_selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.list_selected = self.list_selected.saturating_sub(1);
    }

    /// Opens the detail view for the highlighted root.
    ///
    /// Selecting a different root than last time drops all expansion state,
    /// so a log always opens with its children collapsed.
    pub fn open_detail(&mut self) {
        let Some(id) = self.filtered().get(self.list_selected).map(|e| e.id.clone()) else {
            return;
        };
        self.view.select(id);
        self.detail_row = 0;
        self.focus = Focus::Detail;
    }

    /// Closes the detail view.
    pub fn close_detail(&mut self) {
        self.view.clear_selection();
        self.detail_row = 0;
        self.focus = Focus::List;
    }

    /// The root currently open in the detail view.
    pub fn detail_root(&self) -> Option<&LogEntry> {
        self.view.selected().and_then(|id| self.forest.get(id))
    }

    /// Flattens the open root's subtree into visible rows.
    ///
    /// A preorder walk over the children that only descends into nodes
    /// whose expansion flag is set. The root itself is shown in the modal
    /// header, not as a row.
    pub fn visible_rows(&self) -> Vec<DetailRow<'_>> {
        let Some(root) = self.detail_root() else {
            return Vec::new();
        };

        let mut rows = Vec::new();
        let mut stack: Vec<(&LogEntry, usize)> =
            root.children.iter().rev().map(|c| (c, 0)).collect();

        while let Some((entry, depth)) = stack.pop() {
            let expanded = self.view.expansion().is_expanded(&entry.id);
            rows.push(DetailRow { entry, depth });
            if expanded {
                for child in entry.children.iter().rev() {
                    stack.push((child, depth + 1));
                }
            }
        }

        rows
    }

    pub fn detail_next(&mut self) {
        let len = self.visible_rows().len();
        if self.detail_row + 1 < len {
            self.detail_row += 1;
        }
    }

    pub fn detail_prev(&mut self) {
        self.detail_row = self.detail_row.saturating_sub(1);
    }

    /// Toggles expansion of the highlighted detail row.
    ///
    /// Only that row's flag changes; collapsing a row hides its subtree but
    /// keeps descendant flags, so re-expanding restores them.
    pub fn toggle_selected_row(&mut self) {
        let Some(id) = self
            .visible_rows()
            .get(self.detail_row)
            .map(|row| row.entry.id.clone())
        else {
            return;
        };
        self.view.expansion_mut().toggle(&id);

        // Collapsing may have shortened the visible list.
        let len = self.visible_rows().len();
        if self.detail_row >= len {
            self.detail_row = len.saturating_sub(1);
        }
    }

    /// Opens a JSON panel for the highlighted row (or the root itself when
    /// `of_root` is set or the root has no children).
    pub fn open_json(&mut self, kind: PayloadKind, of_root: bool) {
        let entry = if of_root {
            self.detail_root()
        } else {
            self.visible_rows()
                .get(self.detail_row)
                .map(|row| row.entry)
                .or_else(|| self.detail_root())
        };
        let Some(entry) = entry else { return };

        let payload = match kind {
            PayloadKind::Request => &entry.request,
            PayloadKind::Response => &entry.response,
        };
        let text = match json::pretty(payload) {
            Ok(text) => text,
            Err(err) => {
                warn!(%err, "failed to render payload");
                return;
            }
        };
        let title = json::panel_title(&entry.endpoint, kind);

        self.json = Some(JsonPanel {
            title,
            kind,
            text,
            scroll: 0,
            copied_ticks: 0,
        });
        self.focus = Focus::Json;
    }

    pub fn close_json(&mut self) {
        self.json = None;
        self.focus = Focus::Detail;
    }

    pub fn scroll_json_down(&mut self) {
        if let Some(panel) = &mut self.json {
            let max = panel.text.lines().count().saturating_sub(1);
            if usize::from(panel.scroll) < max {
                panel.scroll += 1;
            }
        }
    }

    pub fn scroll_json_up(&mut self) {
        if let Some(panel) = &mut self.json {
            panel.scroll = panel.scroll.saturating_sub(1);
        }
    }

    /// Marks the panel's text as copied.
    ///
    /// The indicator is cosmetic: it flips on here and decays on ticks,
    /// affecting nothing but the header label.
    pub fn copy_json(&mut self) {
        if let Some(panel) = &mut self.json {
            panel.copied_ticks = COPIED_TICKS;
        }
    }

    /// Periodic tick: decays the "Copied!" indicator.
    pub fn on_tick(&mut self) {
        if let Some(panel) = &mut self.json {
            panel.copied_ticks = panel.copied_ticks.saturating_sub(1);
        }
    }
}
