//! Event handling for the request-log viewer.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use reqtrail_logs::PayloadKind;

use crate::app::{App, Focus};

/// Application events.
#[derive(Debug)]
pub enum AppEvent {
    /// Terminal key press.
    Key(KeyEvent),
    /// Terminal resize.
    Resize(u16, u16),
    /// Tick for periodic updates.
    Tick,
}

/// Polls for the next terminal event, yielding a tick when idle.
pub fn next(tick_rate: Duration) -> anyhow::Result<AppEvent> {
    if event::poll(tick_rate)? {
        match event::read()? {
            Event::Key(key) => Ok(AppEvent::Key(key)),
            Event::Resize(w, h) => Ok(AppEvent::Resize(w, h)),
            _ => Ok(AppEvent::Tick),
        }
    } else {
        Ok(AppEvent::Tick)
    }
}

/// Handles keyboard input, dispatching on the focused layer.
pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.running = false;
        return;
    }

    match app.focus {
        Focus::List => handle_list_key(app, key),
        Focus::Detail => handle_detail_key(app, key),
        Focus::Json => handle_json_key(app, key),
    }
}

/// Root list: printable characters feed the search box.
fn handle_list_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            if app.query.is_empty() {
                app.running = false;
            } else {
                app.clear_query();
            }
        }
        KeyCode::Backspace => app.pop_query_char(),
        KeyCode::Up => app.select_prev(),
        KeyCode::Down => app.select_next(),
        KeyCode::Enter => app.open_detail(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.push_query_char(c);
        }
        _ => {}
    }
}

fn handle_detail_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.close_detail(),
        KeyCode::Up | KeyCode::Char('k') => app.detail_prev(),
        KeyCode::Down | KeyCode::Char('j') => app.detail_next(),
        KeyCode::Enter | KeyCode::Char(' ') => app.toggle_selected_row(),
        KeyCode::Char('r') => app.open_json(PayloadKind::Request, false),
        KeyCode::Char('s') => app.open_json(PayloadKind::Response, false),
        KeyCode::Char('R') => app.open_json(PayloadKind::Request, true),
        KeyCode::Char('S') => app.open_json(PayloadKind::Response, true),
        _ => {}
    }
}

fn handle_json_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.close_json(),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_json_up(),
        KeyCode::Down | KeyCode::Char('j') => app.scroll_json_down(),
        KeyCode::Char('y') | KeyCode::Char('c') => app.copy_json(),
        _ => {}
    }
}
