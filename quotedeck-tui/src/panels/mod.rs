//! Dashboard layout and panels.
//!
//! Top to bottom: symbol/period input bar, metrics strip, close-price chart,
//! raw-data table (first 50 rows), status log.

pub mod chart;
pub mod metrics;
pub mod quote_table;
pub mod status_bar;

use ratatui::layout::{Constraint, Layout};
use ratatui::Frame;

use crate::app::AppState;
use crate::theme::Theme;

pub fn draw(frame: &mut Frame, app: &AppState, theme: &Theme) {
    let chunks = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(4),
        Constraint::Min(10),
        Constraint::Length(12),
        Constraint::Length(6),
    ])
    .split(frame.area());

    status_bar::render_input_bar(frame, chunks[0], app, theme);
    metrics::render(frame, chunks[1], app, theme);
    chart::render(frame, chunks[2], app, theme);
    quote_table::render(frame, chunks[3], app, theme);
    status_bar::render_log(frame, chunks[4], app, theme);
}
