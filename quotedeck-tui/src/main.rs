//! QuoteDeck TUI — single-screen stock quote dashboard.
//!
//! Panels, top to bottom:
//! 1. Input bar — symbol entry and period selector
//! 2. Metrics — last price, change, provider label, MA20/MA50, volume
//! 3. Chart — close-price line over the fetched history
//! 4. Data — raw price table, first 50 rows, scrollable
//! 5. Log — retry warnings, fallback notices, errors
//!
//! Fetches run synchronously on the main thread: one lookup per Enter press,
//! blocking through retry backoff until the resolver returns.

mod app;
mod input;
mod panels;
mod theme;

use std::io::{self, stdout};
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use quotedeck_core::{Config, Resolver};

use crate::app::AppState;
use crate::theme::Theme;

fn main() -> Result<()> {
    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    let config = Config::load(None)?;
    let mut app = AppState::new(Resolver::from_config(&config));

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    let theme = Theme::default();

    while app.running {
        terminal.draw(|frame| panels::draw(frame, app, &theme))?;

        // A requested fetch runs after the frame above, so the "fetching"
        // notice is on screen while the resolver blocks.
        if app.take_fetch_request() {
            app.run_fetch();
            continue;
        }

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key);
            }
        }
    }

    Ok(())
}
