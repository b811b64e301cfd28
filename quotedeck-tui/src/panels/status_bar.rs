//! Input bar (symbol + period + key hints) and the status log.

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::{AppState, StatusLevel};
use crate::theme::Theme;

pub fn render_input_bar(frame: &mut Frame, area: Rect, app: &AppState, theme: &Theme) {
    let cursor = if app.fetching { " " } else { "_" };
    let line = Line::from(vec![
        Span::styled("Symbol: ", Style::default().fg(theme.muted)),
        Span::styled(
            format!("{}{cursor}", app.symbol_input),
            Style::default()
                .fg(theme.text)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("   Period: ", Style::default().fg(theme.muted)),
        Span::styled(
            app.period.to_string(),
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            "   [Enter] fetch  [Tab] period  [↑/↓] scroll  [Esc] quit",
            Style::default().fg(theme.muted),
        ),
    ]);

    let title = if app.fetching {
        " QuoteDeck — fetching... "
    } else {
        " QuoteDeck "
    };

    frame.render_widget(
        Paragraph::new(line).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.accent))
                .title(title),
        ),
        area,
    );
}

pub fn render_log(frame: &mut Frame, area: Rect, app: &AppState, theme: &Theme) {
    let visible = area.height.saturating_sub(2) as usize;
    let start = app.log.len().saturating_sub(visible);

    let lines: Vec<Line> = app.log[start..]
        .iter()
        .map(|entry| {
            let color = match entry.level {
                StatusLevel::Info => theme.muted,
                StatusLevel::Warning => theme.warning,
                StatusLevel::Error => theme.negative,
            };
            Line::from(vec![
                Span::styled(
                    format!("{} ", entry.time.format("%H:%M:%S")),
                    Style::default().fg(theme.muted),
                ),
                Span::styled(entry.message.clone(), Style::default().fg(color)),
            ])
        })
        .collect();

    frame.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.muted))
                .title(" Log "),
        ),
        area,
    );
}
