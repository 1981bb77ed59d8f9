//! UI rendering for the request-log viewer.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};
use reqtrail_logs::{LogEntry, Method, PayloadKind, StatusCategory, TIMESTAMP_FORMAT};

use crate::app::{App, Focus, JsonPanel};

/// Main UI rendering function.
pub fn draw(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title + search
            Constraint::Length(1), // Stats bar
            Constraint::Min(0),    // Log list
            Constraint::Length(3), // Footer
        ])
        .split(frame.area());

    draw_search(frame, app, chunks[0]);
    draw_stats(frame, app, chunks[1]);
    draw_list(frame, app, chunks[2]);
    draw_footer(frame, app, chunks[3]);

    if app.view.selected().is_some() {
        draw_detail(frame, app);
    }
    if let Some(panel) = &app.json {
        draw_json(frame, panel);
    }
}

fn draw_search(frame: &mut Frame, app: &App, area: Rect) {
    let cursor = if app.focus == Focus::List { "█" } else { "" };
    let line = Line::from(vec![
        Span::styled("Search: ", Style::default().fg(Color::DarkGray)),
        Span::raw(app.query.as_str()),
        Span::styled(cursor, Style::default().fg(Color::Gray)),
    ]);

    let paragraph = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Request Logs ")
            .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
    );
    frame.render_widget(paragraph, area);
}

fn draw_stats(frame: &mut Frame, app: &App, area: Rect) {
    let stats = format!(
        " {} parent logs   {} child operations   {} filtered",
        app.forest.root_count(),
        app.forest.direct_child_count(),
        app.filtered().len(),
    );
    let paragraph = Paragraph::new(stats).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

fn draw_list(frame: &mut Frame, app: &App, area: Rect) {
    let filtered = app.filtered();

    if filtered.is_empty() {
        let empty = Paragraph::new("\n\n  No logs found matching your search.")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = filtered.into_iter().map(list_row).collect();
    let list = List::new(items)
        .highlight_symbol("› ")
        .highlight_style(Style::default().add_modifier(Modifier::BOLD).bg(Color::Black));

    let mut state = ListState::default();
    state.select(Some(app.list_selected));
    frame.render_stateful_widget(list, area, &mut state);
}

fn list_row(entry: &LogEntry) -> ListItem<'_> {
    let mut spans = vec![
        Span::styled(
            format!("{:<44}", truncated(&entry.endpoint, 43)),
            Style::default().fg(Color::Blue),
        ),
        method_span(entry.method),
        Span::raw("  "),
        status_span(entry.status),
        Span::styled(
            format!("  {:>6}ms", entry.duration_ms),
            Style::default().fg(Color::Gray),
        ),
        Span::styled(
            format!("  id={:<6}", entry.id.as_str()),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            entry.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            Style::default().fg(Color::DarkGray),
        ),
    ];

    if entry.has_children() {
        let label = if entry.child_count() == 1 {
            "  [1 child operation]".to_string()
        } else {
            format!("  [{} child operations]", entry.child_count())
        };
        spans.push(Span::styled(label, Style::default().fg(Color::Cyan)));
    }

    ListItem::new(Line::from(spans))
}

fn draw_footer(frame: &mut Frame, app: &App, area: Rect) {
    let hints = match app.focus {
        Focus::List => "↑/↓ select   enter open   esc clear/quit   type to search",
        Focus::Detail => {
            "↑/↓ move   enter/space expand   r/s child payloads   R/S parent payloads   esc back"
        }
        Focus::Json => "↑/↓ scroll   y copy   esc back",
    };
    let paragraph = Paragraph::new(hints)
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn draw_detail(frame: &mut Frame, app: &App) {
    let Some(root) = app.detail_root() else { return };

    let area = centered_rect(86, 80, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Log Details ")
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Parent summary
            Constraint::Length(1), // Children heading
            Constraint::Min(0),    // Child rows
        ])
        .split(inner);

    let summary = Line::from(vec![
        Span::styled(
            root.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            Style::default().fg(Color::DarkGray),
        ),
        Span::raw("  "),
        method_span(root.method),
        Span::raw("  "),
        Span::raw(root.endpoint.as_str()),
        Span::raw("  "),
        status_span(root.status),
        Span::styled(
            format!("  {}ms", root.duration_ms),
            Style::default().fg(Color::Gray),
        ),
    ]);
    frame.render_widget(Paragraph::new(summary), chunks[0]);

    let heading = if root.has_children() {
        format!("Child Operations ({} total)", root.descendant_count())
    } else {
        "No child operations".to_string()
    };
    frame.render_widget(
        Paragraph::new(heading).style(Style::default().add_modifier(Modifier::BOLD)),
        chunks[1],
    );

    let rows = app.visible_rows();
    let items: Vec<ListItem> = rows
        .iter()
        .map(|row| {
            let expanded = app.view.expansion().is_expanded(&row.entry.id);
            detail_row_item(row.entry, row.depth, expanded)
        })
        .collect();

    let list = List::new(items)
        .highlight_symbol("› ")
        .highlight_style(Style::default().add_modifier(Modifier::BOLD).bg(Color::Black));

    let mut state = ListState::default();
    state.select(Some(app.detail_row));
    frame.render_stateful_widget(list, chunks[2], &mut state);
}

fn detail_row_item(entry: &LogEntry, depth: usize, expanded: bool) -> ListItem<'_> {
    let indent = "  ".repeat(depth);
    let arrow = if entry.has_children() {
        if expanded {
            "▼ "
        } else {
            "▶ "
        }
    } else {
        "  "
    };

    let mut spans = vec![
        Span::raw(indent),
        Span::styled(arrow, Style::default().fg(Color::Gray)),
        Span::styled(
            entry.timestamp.format("%H:%M:%S%.3f").to_string(),
            Style::default().fg(Color::DarkGray),
        ),
        Span::raw("  "),
        Span::raw(entry.endpoint.as_str()),
        Span::raw("  "),
        method_span(entry.method),
        Span::raw("  "),
        status_span(entry.status),
        Span::styled(
            format!("  {}ms", entry.duration_ms),
            Style::default().fg(Color::Gray),
        ),
    ];

    if entry.has_children() {
        spans.push(Span::styled(
            format!("  +{}", entry.child_count()),
            Style::default().fg(Color::Cyan),
        ));
    }

    ListItem::new(Line::from(spans))
}

fn draw_json(frame: &mut Frame, panel: &JsonPanel) {
    let area = centered_rect(76, 80, frame.area());
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", panel.title))
        .title_style(Style::default().add_modifier(Modifier::BOLD));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    let dot_color = match panel.kind {
        PayloadKind::Request => Color::Blue,
        PayloadKind::Response => Color::Green,
    };
    let copy_hint = if panel.copied_ticks > 0 {
        Span::styled("  ✔ Copied!", Style::default().fg(Color::Green))
    } else {
        Span::styled("  y: copy", Style::default().fg(Color::DarkGray))
    };
    let header = Line::from(vec![
        Span::styled("● ", Style::default().fg(dot_color)),
        Span::raw(panel.kind.as_str()),
        copy_hint,
    ]);
    frame.render_widget(Paragraph::new(header), chunks[0]);

    let body = Paragraph::new(panel.text.as_str()).scroll((panel.scroll, 0));
    frame.render_widget(body, chunks[1]);
}

fn method_span(method: Method) -> Span<'static> {
    Span::styled(
        format!("{:<6}", method.as_str()),
        Style::default()
            .fg(method_color(method))
            .add_modifier(Modifier::BOLD),
    )
}

fn status_span(status: u16) -> Span<'static> {
    Span::styled(
        format!("{status:<4}"),
        Style::default()
            .fg(status_color(StatusCategory::of(status)))
            .add_modifier(Modifier::BOLD),
    )
}

const fn method_color(method: Method) -> Color {
    match method {
        Method::Get => Color::Blue,
        Method::Post => Color::Green,
        Method::Put => Color::Yellow,
        Method::Delete => Color::Red,
        Method::Patch => Color::Magenta,
        Method::Other => Color::DarkGray,
    }
}

const fn status_color(category: StatusCategory) -> Color {
    match category {
        StatusCategory::Success => Color::Green,
        StatusCategory::Warning => Color::Yellow,
        StatusCategory::Error => Color::Red,
        StatusCategory::Info => Color::DarkGray,
    }
}

fn truncated(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let head: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{head}…")
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
