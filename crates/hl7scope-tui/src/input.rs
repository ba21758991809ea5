//! Keyboard input handling

use crate::app::{App, AppMode, DetailMode, Pane, PopupType};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Dispatch a key press against the current mode.
pub fn handle_key(app: &mut App, key: KeyEvent) {
    // Ctrl-C always quits, popup or not
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.mode = AppMode::Quitting;
        return;
    }

    match app.mode.clone() {
        AppMode::Popup(popup) => handle_popup_key(app, &popup, key),
        AppMode::Running => handle_running_key(app, key),
        AppMode::Quitting => {}
    }
}

fn handle_popup_key(app: &mut App, popup: &PopupType, key: KeyEvent) {
    match popup {
        PopupType::Help => {
            app.mode = AppMode::Running;
        }
        PopupType::Search => handle_search_key(app, key),
        PopupType::ConfirmClear => match key.code {
            KeyCode::Char('y') | KeyCode::Enter => {
                app.clear_all();
                app.mode = AppMode::Running;
            }
            KeyCode::Char('n') | KeyCode::Esc | KeyCode::Char('q') => {
                app.mode = AppMode::Running;
            }
            _ => {}
        },
        PopupType::ClearFailed(_) => match key.code {
            KeyCode::Enter | KeyCode::Esc | KeyCode::Char('q') => {
                app.mode = AppMode::Running;
            }
            _ => {}
        },
    }
}

fn handle_search_key(app: &mut App, key: KeyEvent) {
    match key.code {
        // Enter applies whatever is typed without waiting out the debounce
        KeyCode::Enter => {
            app.applied_query = app.search_input.clone();
            app.mode = AppMode::Running;
        }
        // Esc closes the editor; the applied query stays in effect
        KeyCode::Esc => {
            app.search_input = app.applied_query.clone();
            app.mode = AppMode::Running;
        }
        KeyCode::Backspace => {
            app.search_input.pop();
            app.search_edited();
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.search_input.clear();
            app.search_edited();
        }
        KeyCode::Char(c) => {
            app.search_input.push(c);
            app.search_edited();
        }
        _ => {}
    }
}

fn handle_running_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.mode = AppMode::Quitting,
        KeyCode::Char('?') => app.mode = AppMode::Popup(PopupType::Help),
        KeyCode::Char('/') => app.mode = AppMode::Popup(PopupType::Search),
        KeyCode::Char('c') => app.mode = AppMode::Popup(PopupType::ConfirmClear),
        KeyCode::Char(' ') => app.toggle_pause(),
        KeyCode::Char('a') => app.autoscroll = !app.autoscroll,
        KeyCode::Char('e') => app.export(),
        KeyCode::Char('r') => app.reload(),
        KeyCode::Tab => {
            app.focus = match app.focus {
                Pane::List => Pane::Detail,
                Pane::Detail => Pane::List,
            };
        }
        KeyCode::Char('1') => app.detail_mode = DetailMode::Parsed,
        KeyCode::Char('2') => app.detail_mode = DetailMode::Raw,
        KeyCode::Char('3') => app.detail_mode = DetailMode::Json,
        KeyCode::Char('m') => app.detail_mode = app.detail_mode.next(),
        _ => match app.focus {
            Pane::List => handle_list_key(app, key),
            Pane::Detail => handle_detail_key(app, key),
        },
    }
}

fn handle_list_key(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => app.move_cursor(-1),
        KeyCode::Down | KeyCode::Char('j') => app.move_cursor(1),
        KeyCode::PageUp => app.move_cursor(-10),
        KeyCode::PageDown => app.move_cursor(10),
        KeyCode::Home => app.jump_cursor(false),
        KeyCode::End => app.jump_cursor(true),
        KeyCode::Enter => app.focus = Pane::Detail,
        _ => {}
    }
}

fn handle_detail_key(app: &mut App, key: KeyEvent) {
    match app.detail_mode {
        DetailMode::Parsed => match key.code {
            KeyCode::Up | KeyCode::Char('k') => app.move_segment_cursor(-1),
            KeyCode::Down | KeyCode::Char('j') => app.move_segment_cursor(1),
            KeyCode::Home => app.move_segment_cursor(isize::MIN / 2),
            KeyCode::End => app.move_segment_cursor(isize::MAX / 2),
            KeyCode::Enter => app.toggle_selected_segment(),
            _ => {}
        },
        DetailMode::Raw | DetailMode::Json => match key.code {
            KeyCode::Up | KeyCode::Char('k') => app.scroll_detail(-1),
            KeyCode::Down | KeyCode::Char('j') => app.scroll_detail(1),
            KeyCode::PageUp => app.scroll_detail(-10),
            KeyCode::PageDown => app.scroll_detail(10),
            KeyCode::Home => app.detail_scroll = 0,
            _ => {}
        },
    }
}
