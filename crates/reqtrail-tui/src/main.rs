//! reqtrail-tui - Request log viewer
//!
//! Read-only terminal viewer for hierarchical API request/response logs.
//! The forest is loaded once at startup; everything after that is pure
//! view state.

mod app;
mod data;
mod events;
mod ui;

use std::io;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use app::App;
use events::AppEvent;

#[derive(Parser)]
#[command(name = "reqtrail-tui")]
#[command(about = "Request log viewer - browse hierarchical API request/response logs")]
#[command(version)]
struct Cli {
    /// JSON file holding an array of log entries; omit for the built-in sample
    #[arg(long)]
    file: Option<PathBuf>,

    /// UI tick interval in milliseconds
    #[arg(long, default_value = "100")]
    tick_ms: u64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logging goes to stderr so it never paints over the UI.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::from_default_env().add_directive("reqtrail_tui=info".parse()?))
        .init();

    let forest = data::load_forest(cli.file.as_deref())?;
    let app = App::new(forest);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, app, Duration::from_millis(cli.tick_ms));

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    mut app: App,
    tick_rate: Duration,
) -> anyhow::Result<()> {
    while app.running {
        terminal.draw(|frame| ui::draw(frame, &app))?;

        match events::next(tick_rate)? {
            AppEvent::Key(key) => events::handle_key(&mut app, key),
            AppEvent::Resize(_, _) => {
                // Terminal will redraw on the next pass
            }
            AppEvent::Tick => app.on_tick(),
        }
    }

    Ok(())
}
