//! UI rendering module

mod detail;
pub mod formatters;
mod list;
mod popups;
pub mod theme;

use crate::app::{App, AppMode, LogLevel};
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

/// Render the entire UI
pub fn render(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::vertical([
        Constraint::Length(1), // Header
        Constraint::Min(0),    // Content
        Constraint::Length(1), // Status bar
    ])
    .split(frame.area());

    render_header(frame, app, chunks[0]);

    let content = Layout::horizontal([
        Constraint::Percentage(55), // Message list
        Constraint::Percentage(45), // Detail pane
    ])
    .split(chunks[1]);

    list::render(frame, app, content[0]);
    detail::render(frame, app, content[1]);

    render_status_bar(frame, app, chunks[2]);

    // Render popup if active
    if let AppMode::Popup(popup) = app.mode.clone() {
        popups::render(frame, app, &popup);
    }
}

/// Render the header bar
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::horizontal([
        Constraint::Min(24),    // Title + stream status
        Constraint::Length(44), // Counters
        Constraint::Length(12), // Time
    ])
    .split(area);

    let status_style = match app.stream_status {
        s if s.is_connected() => app.theme.connected,
        hl7scope_client::ConnectionStatus::Connecting => app.theme.connecting,
        _ => app.theme.disconnected,
    };
    let title = Line::from(vec![
        Span::styled("hl7scope ", app.theme.header),
        Span::styled("●", status_style),
        Span::styled(
            format!(" {}", app.stream_status.label()),
            app.theme.timestamp,
        ),
    ]);
    frame.render_widget(Paragraph::new(title), chunks[0]);

    // Counters from the last stats poll; totals fall back to local counts
    let counters = match &app.stats {
        Some(stats) => format!(
            "Msgs: {}  Conns: {}  Parse errors: {}",
            app.displayed_total, stats.active_connections, stats.parse_errors
        ),
        None => format!("Msgs: {}", app.displayed_total),
    };
    let counters = Paragraph::new(counters)
        .style(app.theme.normal)
        .alignment(Alignment::Right);
    frame.render_widget(counters, chunks[1]);

    // Clock honors the configured timezone
    let now = if app.config.use_utc {
        chrono::Utc::now().format("%H:%M:%S").to_string()
    } else {
        chrono::Local::now().format("%H:%M:%S").to_string()
    };
    let time = Paragraph::new(now)
        .style(app.theme.timestamp)
        .alignment(Alignment::Right);
    frame.render_widget(time, chunks[2]);
}

/// Render the status bar
fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::horizontal([
        Constraint::Percentage(45), // Left: help hints
        Constraint::Percentage(25), // Middle: stream state
        Constraint::Percentage(30), // Right: latest console entry
    ])
    .split(area);

    let help = "q:Quit ↑↓:Nav Tab:Pane /:Search Space:Pause c:Clear e:Export ?:Help";
    frame.render_widget(Paragraph::new(help).style(app.theme.normal), chunks[0]);

    let pause_indicator = if app.paused {
        format!("⏸ Paused ({} pending)", app.pending.len())
    } else {
        "● Live".to_string()
    };
    let filter_indicator = if app.applied_query.is_empty() {
        String::new()
    } else {
        format!("  filter: {}", formatters::truncate(&app.applied_query, 16))
    };
    let middle_style = if app.paused {
        app.theme.warning
    } else {
        app.theme.connected
    };
    frame.render_widget(
        Paragraph::new(format!("{}{}", pause_indicator, filter_indicator)).style(middle_style),
        chunks[1],
    );

    // Most recent console entry doubles as the notification area
    let (text, style) = match app.latest_log() {
        Some(entry) => {
            let style = match entry.level {
                LogLevel::Info => app.theme.normal,
                LogLevel::Warn => app.theme.warning,
                LogLevel::Error => app.theme.error,
            };
            (formatters::truncate(&entry.message, 48), style)
        }
        None => (String::new(), app.theme.normal),
    };
    let log = Paragraph::new(text)
        .style(style)
        .alignment(Alignment::Right);
    frame.render_widget(log, chunks[2]);
}
