//! Message list pane

use crate::app::{App, Pane};
use crate::ui::formatters::{cell, format_received_at};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table};

pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let visible = app.visible_indices();

    let border_style = if app.focus == Pane::List {
        app.theme.border_focused
    } else {
        app.theme.border
    };
    let title = format!(" Messages ({}/{}) ", visible.len(), app.messages.len());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(title);

    if visible.is_empty() {
        let text = if app.messages.is_empty() {
            "No messages yet"
        } else {
            "No messages match the filter"
        };
        let empty = Paragraph::new(text)
            .style(app.theme.timestamp)
            .block(block)
            .alignment(Alignment::Center);
        frame.render_widget(empty, area);
        return;
    }

    let header = Row::new(vec!["Time", "Type", "Facility", "Patient", "Segs"])
        .style(app.theme.header)
        .height(1);

    let rows: Vec<Row> = visible
        .iter()
        .map(|&i| {
            let m = &app.messages[i];
            let base = if m.parse_error.is_some() {
                app.theme.error
            } else {
                app.theme.normal
            };
            let type_text = if m.parse_error.is_some() {
                format!("! {}", cell(&m.message_type, 10))
            } else {
                cell(&m.message_type, 12)
            };
            Row::new(vec![
                Cell::from(format_received_at(m.received_at)).style(app.theme.timestamp),
                Cell::from(type_text),
                Cell::from(cell(&m.sending_facility, 14)),
                Cell::from(cell(m.patient_label(), 22)),
                Cell::from(m.segment_count.to_string()).style(app.theme.value),
            ])
            .style(base)
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(8),
            Constraint::Length(12),
            Constraint::Length(14),
            Constraint::Min(14),
            Constraint::Length(4),
        ],
    )
    .header(header)
    .block(block)
    .row_highlight_style(app.theme.selected);

    // Autoscroll pins the viewport to the newest row (the top); the cursor
    // keeps following the selected message wherever it lands.
    if app.autoscroll {
        *app.list_state.offset_mut() = 0;
    }

    frame.render_stateful_widget(table, area, &mut app.list_state);
}
