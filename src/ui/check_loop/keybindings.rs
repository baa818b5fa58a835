use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::core::app::App;
use crate::ui::renderer::build_suggestion_lines;

const SCROLL_STEP: i16 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyResult {
    Exit,
    Handled,
    NotHandled,
}

/// Route one key press. An open alert is modal: only quitting and
/// dismissing get through.
pub fn handle_key_event(app: &mut App, key: KeyEvent) -> KeyResult {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    if ctrl && matches!(key.code, KeyCode::Char('c')) {
        return KeyResult::Exit;
    }

    if app.ui.alert().is_some() {
        return match key.code {
            KeyCode::Enter | KeyCode::Esc => {
                app.ui.dismiss_alert();
                KeyResult::Handled
            }
            _ => KeyResult::NotHandled,
        };
    }

    match key.code {
        KeyCode::Char('g') if ctrl => {
            app.trigger_check();
            KeyResult::Handled
        }
        KeyCode::F(5) => {
            app.trigger_check();
            KeyResult::Handled
        }
        KeyCode::Char('l') if ctrl => {
            app.ui.clear_input();
            KeyResult::Handled
        }
        KeyCode::PageUp => {
            let max = max_suggestion_scroll(app);
            app.ui.scroll_suggestions(-SCROLL_STEP, max);
            KeyResult::Handled
        }
        KeyCode::PageDown => {
            let max = max_suggestion_scroll(app);
            app.ui.scroll_suggestions(SCROLL_STEP, max);
            KeyResult::Handled
        }
        _ => {
            let changed = app.ui.apply_textarea_edit(|ta| ta.input(key));
            if changed {
                KeyResult::Handled
            } else {
                KeyResult::NotHandled
            }
        }
    }
}

/// Last scroll offset that still shows a suggestion line.
fn max_suggestion_scroll(app: &App) -> u16 {
    let lines = build_suggestion_lines(app.check.suggestions()).len();
    u16::try_from(lines.saturating_sub(1)).unwrap_or(u16::MAX)
}

pub(crate) fn sanitize_pasted_text(text: &str) -> String {
    let without_crlf = text.replace("\r\n", "\n");
    let without_cr = without_crlf.replace('\r', "\n");
    let expanded_tabs = without_cr.replace('\t', "    ");
    expanded_tabs
        .chars()
        .filter(|&c| c == '\n' || !c.is_control())
        .collect()
}

pub fn handle_paste(app: &mut App, text: &str) -> KeyResult {
    if app.ui.alert().is_some() {
        return KeyResult::NotHandled;
    }
    let sanitized = sanitize_pasted_text(text);
    if sanitized.is_empty() {
        return KeyResult::NotHandled;
    }
    app.ui.apply_textarea_edit(|ta| ta.insert_str(&sanitized));
    KeyResult::Handled
}
