//! Metrics strip: last price, change, provider label, MA20/MA50, volume.
//!
//! MA values render as "unavailable" when the history is shorter than the
//! window — they are never computed on a truncated window.

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::AppState;
use crate::theme::Theme;

pub fn render(frame: &mut Frame, area: Rect, app: &AppState, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent))
        .title(" Quote ");

    let (Some(quote), Some(metrics)) = (&app.quote, &app.metrics) else {
        frame.render_widget(
            Paragraph::new("no quote loaded").block(block),
            area,
        );
        return;
    };

    let change_color = if metrics.change < 0.0 {
        theme.negative
    } else {
        theme.positive
    };

    let lines = vec![
        Line::from(vec![
            Span::styled(
                format!("{} ", quote.symbol),
                Style::default()
                    .fg(theme.text)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("${:.2}  ", metrics.latest_close),
                Style::default()
                    .fg(theme.text)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("{:+.2} ({:+.2}%)", metrics.change, metrics.percent_change),
                Style::default().fg(change_color),
            ),
            Span::styled(
                format!("   source: {}", quote.source_label()),
                Style::default().fg(theme.muted),
            ),
        ]),
        Line::from(vec![
            Span::styled("MA20: ", Style::default().fg(theme.muted)),
            ma_span(metrics.ma20, theme),
            Span::styled("   MA50: ", Style::default().fg(theme.muted)),
            ma_span(metrics.ma50, theme),
            Span::styled("   Last volume: ", Style::default().fg(theme.muted)),
            Span::styled(
                metrics.last_volume.to_string(),
                Style::default().fg(theme.text),
            ),
        ]),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn ma_span(ma: Option<f64>, theme: &Theme) -> Span<'static> {
    match ma {
        Some(v) => Span::styled(format!("{v:.2}"), Style::default().fg(theme.text)),
        None => Span::styled("unavailable", Style::default().fg(theme.warning)),
    }
}
