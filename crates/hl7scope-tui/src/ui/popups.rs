//! Popup dialogs for help, search, and clear confirmation

use crate::app::{App, PopupType};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

/// Render popup overlay
pub fn render(frame: &mut Frame, app: &mut App, popup: &PopupType) {
    match popup {
        PopupType::Help => render_help_popup(frame, app),
        PopupType::Search => render_search_popup(frame, app),
        PopupType::ConfirmClear => render_confirm_clear_popup(frame, app),
        PopupType::ClearFailed(reason) => render_clear_failed_popup(frame, app, reason),
    }
}

/// Calculate centered popup area
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(area);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(popup_layout[1])[1]
}

/// Render help popup
fn render_help_popup(frame: &mut Frame, app: &App) {
    let area = centered_rect(60, 70, frame.area());

    // Clear the background
    frame.render_widget(Clear, area);

    let help_text = vec![
        Line::from(vec![Span::styled("Navigation", app.theme.header)]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  ↑/k     ", app.theme.value),
            Span::styled("Move up", app.theme.normal),
        ]),
        Line::from(vec![
            Span::styled("  ↓/j     ", app.theme.value),
            Span::styled("Move down", app.theme.normal),
        ]),
        Line::from(vec![
            Span::styled("  PgUp    ", app.theme.value),
            Span::styled("Page up", app.theme.normal),
        ]),
        Line::from(vec![
            Span::styled("  PgDn    ", app.theme.value),
            Span::styled("Page down", app.theme.normal),
        ]),
        Line::from(vec![
            Span::styled("  Home/End", app.theme.value),
            Span::styled(" Newest / oldest message", app.theme.normal),
        ]),
        Line::from(vec![
            Span::styled("  Tab     ", app.theme.value),
            Span::styled("Switch pane", app.theme.normal),
        ]),
        Line::from(""),
        Line::from(vec![Span::styled("Detail view", app.theme.header)]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  1/2/3   ", app.theme.value),
            Span::styled("Parsed / Raw / JSON", app.theme.normal),
        ]),
        Line::from(vec![
            Span::styled("  m       ", app.theme.value),
            Span::styled("Cycle detail mode", app.theme.normal),
        ]),
        Line::from(vec![
            Span::styled("  Enter   ", app.theme.value),
            Span::styled("Collapse/expand segment", app.theme.normal),
        ]),
        Line::from(""),
        Line::from(vec![Span::styled("Actions", app.theme.header)]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Space   ", app.theme.value),
            Span::styled("Pause/Resume live updates", app.theme.normal),
        ]),
        Line::from(vec![
            Span::styled("  a       ", app.theme.value),
            Span::styled("Toggle autoscroll", app.theme.normal),
        ]),
        Line::from(vec![
            Span::styled("  /       ", app.theme.value),
            Span::styled("Search messages", app.theme.normal),
        ]),
        Line::from(vec![
            Span::styled("  r       ", app.theme.value),
            Span::styled("Reload from collector", app.theme.normal),
        ]),
        Line::from(vec![
            Span::styled("  e       ", app.theme.value),
            Span::styled("Export messages to JSON", app.theme.normal),
        ]),
        Line::from(vec![
            Span::styled("  c       ", app.theme.value),
            Span::styled("Clear collector store", app.theme.normal),
        ]),
        Line::from(vec![
            Span::styled("  ?       ", app.theme.value),
            Span::styled("Show this help", app.theme.normal),
        ]),
        Line::from(vec![
            Span::styled("  q/Esc   ", app.theme.value),
            Span::styled("Quit / Close popup", app.theme.normal),
        ]),
    ];

    let paragraph = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(app.theme.border),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

/// Render search popup
fn render_search_popup(frame: &mut Frame, app: &App) {
    let area = centered_rect(60, 30, frame.area());

    // Clear the background
    frame.render_widget(Clear, area);

    let content = vec![
        Line::from(vec![
            Span::styled("Search: ", app.theme.normal),
            Span::styled(&app.search_input, app.theme.value),
            Span::styled("_", app.theme.header), // Cursor
        ]),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Matches type, facility, patient, control id and source",
            app.theme.timestamp,
        )]),
        Line::from(vec![Span::styled(
            "Applies as you type. Enter to close, Esc to revert",
            app.theme.timestamp,
        )]),
    ];

    let paragraph = Paragraph::new(content).block(
        Block::default()
            .title(" Search Messages ")
            .borders(Borders::ALL)
            .border_style(app.theme.border),
    );

    frame.render_widget(paragraph, area);
}

/// Render confirm clear popup
fn render_confirm_clear_popup(frame: &mut Frame, app: &App) {
    let area = centered_rect(50, 30, frame.area());

    // Clear the background
    frame.render_widget(Clear, area);

    let content = vec![
        Line::from(vec![Span::styled("Clear all messages?", app.theme.header)]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Stored: ", app.theme.normal),
            Span::styled(app.displayed_total.to_string(), app.theme.value),
        ]),
        Line::from(""),
        Line::from(vec![Span::styled(
            "This empties the collector's store for every client.",
            app.theme.warning,
        )]),
        Line::from(""),
        Line::from(vec![
            Span::styled("y/Enter", app.theme.value),
            Span::styled(" - Confirm   ", app.theme.normal),
            Span::styled("n/Esc", app.theme.value),
            Span::styled(" - Cancel", app.theme.normal),
        ]),
    ];

    let paragraph = Paragraph::new(content)
        .block(
            Block::default()
                .title(" Confirm Clear ")
                .borders(Borders::ALL)
                .border_style(app.theme.border),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

/// Render the clear-failed notice
fn render_clear_failed_popup(frame: &mut Frame, app: &App, reason: &str) {
    let area = centered_rect(50, 30, frame.area());

    // Clear the background
    frame.render_widget(Clear, area);

    let content = vec![
        Line::from(vec![Span::styled("Clear failed", app.theme.error)]),
        Line::from(""),
        Line::from(vec![Span::styled(reason, app.theme.normal)]),
        Line::from(""),
        Line::from(vec![Span::styled(
            "The collector's store was not cleared.",
            app.theme.warning,
        )]),
        Line::from(""),
        Line::from(vec![
            Span::styled("Enter/Esc", app.theme.value),
            Span::styled(" - Dismiss", app.theme.normal),
        ]),
    ];

    let paragraph = Paragraph::new(content)
        .block(
            Block::default()
                .title(" Error ")
                .borders(Borders::ALL)
                .border_style(app.theme.error),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}
