//! Raw-data table: the first 50 rows of the history, scrollable.

use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};
use ratatui::Frame;

use crate::app::{AppState, TABLE_ROW_CAP};
use crate::theme::Theme;

pub fn render(frame: &mut Frame, area: Rect, app: &AppState, theme: &Theme) {
    let Some(quote) = &app.quote else {
        frame.render_widget(
            Paragraph::new("").block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.muted))
                    .title(" Data "),
            ),
            area,
        );
        return;
    };

    let capped = quote.history.head(TABLE_ROW_CAP);
    let visible = area.height.saturating_sub(3) as usize;
    let start = app.table_scroll.min(capped.len().saturating_sub(1));
    let end = (start + visible).min(capped.len());

    let header = Row::new(
        ["date", "open", "high", "low", "close", "adj close", "volume", "div", "split"]
            .map(Cell::from),
    )
    .style(
        Style::default()
            .fg(theme.accent)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = capped[start..end]
        .iter()
        .map(|bar| {
            Row::new(vec![
                Cell::from(bar.date.to_string()),
                Cell::from(format!("{:.2}", bar.open)),
                Cell::from(format!("{:.2}", bar.high)),
                Cell::from(format!("{:.2}", bar.low)),
                Cell::from(format!("{:.2}", bar.close)),
                Cell::from(format!("{:.2}", bar.adj_close)),
                Cell::from(bar.volume.to_string()),
                Cell::from(format!("{:.2}", bar.dividend)),
                Cell::from(format!("{:.2}", bar.split)),
            ])
            .style(Style::default().fg(theme.text))
        })
        .collect();

    let widths = [
        Constraint::Length(11),
        Constraint::Length(9),
        Constraint::Length(9),
        Constraint::Length(9),
        Constraint::Length(9),
        Constraint::Length(10),
        Constraint::Length(12),
        Constraint::Length(6),
        Constraint::Length(6),
    ];

    let title = format!(
        " Data — rows {}-{} of {} ",
        start + 1,
        end,
        capped.len()
    );

    frame.render_widget(
        Table::new(rows, widths).header(header).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.muted))
                .title(title),
        ),
        area,
    );
}
