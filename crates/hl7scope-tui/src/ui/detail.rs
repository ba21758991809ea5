//! Message detail pane: parsed segments, raw text, or JSON dump

use crate::app::{App, DetailMode, Pane};
use crate::ui::formatters::{format_received_at, sanitize};
use hl7scope_core::{split_raw_lines, MessageDetail};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Tabs, Wrap};

pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let border_style = if app.focus == Pane::Detail {
        app.theme.border_focused
    } else {
        app.theme.border
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(" Detail ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.selected_id.is_none() {
        let placeholder = Paragraph::new("Select a message")
            .style(app.theme.timestamp)
            .alignment(Alignment::Center);
        frame.render_widget(placeholder, inner);
        return;
    }

    let Some(detail) = app.selected_detail.clone() else {
        let loading = Paragraph::new("Loading…")
            .style(app.theme.timestamp)
            .alignment(Alignment::Center);
        frame.render_widget(loading, inner);
        return;
    };

    // Mode tabs, then the metadata header, then the mode-specific body
    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(4),
        Constraint::Min(0),
    ])
    .split(inner);

    render_mode_tabs(frame, app, chunks[0]);
    render_meta(frame, app, &detail, chunks[1]);

    match app.detail_mode {
        DetailMode::Parsed => render_parsed(frame, app, &detail, chunks[2]),
        DetailMode::Raw => render_raw(frame, app, &detail, chunks[2]),
        DetailMode::Json => render_json(frame, app, &detail, chunks[2]),
    }
}

fn render_mode_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<&str> = DetailMode::all().iter().map(|m| m.name()).collect();
    let selected = DetailMode::all()
        .iter()
        .position(|m| *m == app.detail_mode)
        .unwrap_or(0);

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(app.theme.tab_inactive)
        .highlight_style(app.theme.tab_active)
        .divider(" | ");
    frame.render_widget(tabs, area);
}

fn render_meta(frame: &mut Frame, app: &App, detail: &MessageDetail, area: Rect) {
    let mut lines = vec![
        Line::from(vec![
            Span::styled(sanitize(&detail.message_type), app.theme.header),
            Span::styled(
                format!("  v{}  {}", detail.version, format_received_at(detail.received_at)),
                app.theme.timestamp,
            ),
        ]),
        Line::from(vec![
            Span::styled("Patient: ", app.theme.normal),
            Span::styled(sanitize(detail.patient_label()), app.theme.value),
            Span::styled("  Control: ", app.theme.normal),
            Span::styled(sanitize(&detail.message_control_id), app.theme.value),
        ]),
        Line::from(vec![
            Span::styled(
                format!(
                    "{} @ {} → {} @ {}",
                    sanitize(&detail.sending_application),
                    sanitize(&detail.sending_facility),
                    sanitize(&detail.receiving_application),
                    sanitize(&detail.receiving_facility)
                ),
                app.theme.normal,
            ),
            Span::styled(format!("  from {}", detail.source_addr), app.theme.timestamp),
        ]),
    ];

    if let Some(err) = &detail.parse_error {
        // The parsed mode has no segment tree to offer for this message;
        // tell the operator the raw text is what they are looking at.
        let banner = if app.detail_mode == DetailMode::Parsed {
            format!("⚠ Parse error: {} (no segments, raw text shown)", sanitize(err))
        } else {
            format!("⚠ Parse error: {}", sanitize(err))
        };
        lines.push(Line::from(Span::styled(banner, app.theme.error)));
    }

    frame.render_widget(Paragraph::new(lines), area);
}

fn render_parsed(frame: &mut Frame, app: &mut App, detail: &MessageDetail, area: Rect) {
    // A message that failed parsing has no segment tree worth showing;
    // fall back to the raw text under the error banner.
    if detail.parse_error.is_some() || detail.segments.is_empty() {
        render_raw(frame, app, detail, area);
        return;
    }

    let focused = app.focus == Pane::Detail;
    let mut lines: Vec<Line> = Vec::new();
    let mut cursor_line = 0usize;

    for (i, segment) in detail.segments.iter().enumerate() {
        let key = app.collapse_key(detail, i);
        let collapsed = app.collapsed_segments.contains(&key);
        let marker = if collapsed { "▶" } else { "▼" };

        let mut header_style = app.theme.segment_name;
        if focused && i == app.segment_cursor {
            header_style = header_style.patch(app.theme.selected);
            cursor_line = lines.len();
        }
        lines.push(Line::from(Span::styled(
            format!(
                "{} {} ({} fields)",
                marker,
                sanitize(&segment.name),
                segment.fields.len()
            ),
            header_style,
        )));

        if collapsed {
            continue;
        }

        for field in &segment.fields {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:>2}: ", field.index), app.theme.timestamp),
                Span::styled(sanitize(&field.value), app.theme.normal),
            ]));
            if field.has_components() {
                for (ci, component) in segment_components(field) {
                    lines.push(Line::from(vec![
                        Span::styled(format!("      .{}: ", ci), app.theme.timestamp),
                        Span::styled(sanitize(component), app.theme.value),
                    ]));
                }
            }
        }
    }

    // Keep the cursor's segment header inside the viewport
    let height = area.height.max(1) as usize;
    let scroll = app.detail_scroll as usize;
    if cursor_line < scroll {
        app.detail_scroll = cursor_line as u16;
    } else if cursor_line >= scroll + height {
        app.detail_scroll = (cursor_line + 1 - height) as u16;
    }

    let body = Paragraph::new(lines).scroll((app.detail_scroll, 0));
    frame.render_widget(body, area);
}

fn segment_components(field: &hl7scope_core::Field) -> impl Iterator<Item = (usize, &str)> {
    field
        .components
        .iter()
        .enumerate()
        .map(|(i, c)| (i + 1, c.as_str()))
}

fn render_raw(frame: &mut Frame, app: &App, detail: &MessageDetail, area: Rect) {
    let lines: Vec<Line> = split_raw_lines(&detail.raw)
        .into_iter()
        .map(|line| {
            let clean = sanitize(line);
            // The first three characters of a raw line are its segment tag
            if clean.len() >= 3 && clean.is_char_boundary(3) {
                let (tag, rest) = clean.split_at(3);
                Line::from(vec![
                    Span::styled(tag.to_string(), app.theme.segment_name),
                    Span::styled(rest.to_string(), app.theme.normal),
                ])
            } else {
                Line::from(Span::styled(clean, app.theme.normal))
            }
        })
        .collect();

    let body = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .scroll((app.detail_scroll, 0));
    frame.render_widget(body, area);
}

fn render_json(frame: &mut Frame, app: &App, detail: &MessageDetail, area: Rect) {
    let text = serde_json::to_string_pretty(detail)
        .unwrap_or_else(|e| format!("JSON encoding failed: {}", e));

    let body = Paragraph::new(sanitize_multiline(&text))
        .style(app.theme.normal)
        .scroll((app.detail_scroll, 0));
    frame.render_widget(body, area);
}

/// Sanitize per line, preserving the line structure itself.
fn sanitize_multiline(text: &str) -> String {
    text.lines().map(sanitize).collect::<Vec<_>>().join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::App;
    use chrono::Utc;
    use hl7scope_client::CollectorClient;
    use hl7scope_config::{ClientConfig, TuiConfig};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn test_app() -> App {
        let client = CollectorClient::new(&ClientConfig::default()).unwrap();
        App::new(TuiConfig::default(), client)
    }

    fn unparsed_detail() -> MessageDetail {
        MessageDetail {
            id: "bad".to_string(),
            raw: "GARBAGE|no msh here".to_string(),
            received_at: Utc::now(),
            source_addr: "127.0.0.1:4000".to_string(),
            message_type: "UNKNOWN".to_string(),
            trigger_event: String::new(),
            message_control_id: String::new(),
            sending_application: String::new(),
            sending_facility: String::new(),
            receiving_application: String::new(),
            receiving_facility: String::new(),
            version: String::new(),
            segments: vec![],
            patient_name: None,
            patient_id: None,
            parse_error: Some("missing MSH segment".to_string()),
        }
    }

    fn rendered_text(app: &mut App) -> String {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|frame| render(frame, app, frame.area()))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn parse_error_banner_names_the_raw_fallback() {
        let mut app = test_app();
        app.selected_id = Some("bad".to_string());
        app.selected_detail = Some(unparsed_detail());

        let text = rendered_text(&mut app);
        assert!(text.contains("Parse error: missing MSH segment"));
        assert!(text.contains("raw text shown"));
        // No segment table for an unparsed message
        assert!(!text.contains("fields)"));
        assert!(text.contains("GARBAGE|no msh here"));
    }

    #[test]
    fn banner_drops_the_fallback_note_outside_parsed_mode() {
        let mut app = test_app();
        app.selected_id = Some("bad".to_string());
        app.selected_detail = Some(unparsed_detail());
        app.detail_mode = DetailMode::Raw;

        let text = rendered_text(&mut app);
        assert!(text.contains("Parse error: missing MSH segment"));
        assert!(!text.contains("raw text shown"));
    }
}
