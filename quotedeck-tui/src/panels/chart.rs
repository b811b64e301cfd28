//! Close-price line chart.
//!
//! The history is stored most-recent-first; the chart plots oldest to newest
//! left to right, with the date range on the x axis and a padded close range
//! on the y axis.

use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::symbols;
use ratatui::text::Span;
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph};
use ratatui::Frame;

use crate::app::AppState;
use crate::theme::Theme;

pub fn render(frame: &mut Frame, area: Rect, app: &AppState, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.accent))
        .title(" Close price ");

    let Some(quote) = &app.quote else {
        frame.render_widget(
            Paragraph::new("no data — enter a symbol and press Enter").block(block),
            area,
        );
        return;
    };

    // Oldest first for plotting.
    let closes: Vec<f64> = quote.history.closes().rev().collect();
    let points: Vec<(f64, f64)> = closes
        .iter()
        .enumerate()
        .map(|(i, &c)| (i as f64, c))
        .collect();

    let min = closes.iter().copied().fold(f64::INFINITY, f64::min);
    let max = closes.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    // Flat series still needs a non-zero band to render.
    let pad = ((max - min) * 0.05).max(0.01);
    let (y_lo, y_hi) = (min - pad, max + pad);

    let oldest = quote.history.bars().last().map(|b| b.date);
    let newest = quote.history.bars().first().map(|b| b.date);

    let dataset = Dataset::default()
        .name(quote.symbol.clone())
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(theme.positive))
        .data(&points);

    let x_labels = vec![
        Span::styled(
            oldest.map_or_else(String::new, |d| d.to_string()),
            Style::default().fg(theme.muted),
        ),
        Span::styled(
            newest.map_or_else(String::new, |d| d.to_string()),
            Style::default().fg(theme.muted),
        ),
    ];
    let y_labels = vec![
        Span::styled(format!("{y_lo:.2}"), Style::default().fg(theme.muted)),
        Span::styled(
            format!("{:.2}", (y_lo + y_hi) / 2.0),
            Style::default().fg(theme.muted),
        ),
        Span::styled(format!("{y_hi:.2}"), Style::default().fg(theme.muted)),
    ];

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .style(Style::default().fg(theme.muted))
                .bounds([0.0, (points.len().saturating_sub(1)).max(1) as f64])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(theme.muted))
                .bounds([y_lo, y_hi])
                .labels(y_labels),
        );

    frame.render_widget(chart, area);
}
