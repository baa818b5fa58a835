use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders};
use tui_textarea::TextArea;

use crate::core::check::Notifier;
use crate::core::constants::INPUT_PLACEHOLDER;

/// Editor contents and the modal alert slot.
pub struct UiState {
    textarea: TextArea<'static>,
    alert: Option<String>,
    pub suggestion_scroll: u16,
    pub exit_requested: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self::new()
    }
}

impl UiState {
    pub fn new() -> Self {
        Self {
            textarea: build_textarea(Vec::new()),
            alert: None,
            suggestion_scroll: 0,
            exit_requested: false,
        }
    }

    pub fn textarea(&self) -> &TextArea<'static> {
        &self.textarea
    }

    pub fn get_input_text(&self) -> String {
        self.textarea.lines().join("\n")
    }

    pub fn set_input_text(&mut self, text: &str) {
        let lines = text.split('\n').map(str::to_string).collect();
        self.textarea = build_textarea(lines);
        self.textarea.move_cursor(tui_textarea::CursorMove::Bottom);
        self.textarea.move_cursor(tui_textarea::CursorMove::End);
    }

    pub fn clear_input(&mut self) {
        self.textarea = build_textarea(Vec::new());
    }

    pub fn apply_textarea_edit<F, R>(&mut self, f: F) -> R
    where
        F: FnOnce(&mut TextArea<'static>) -> R,
    {
        f(&mut self.textarea)
    }

    /// Move the suggestions viewport, keeping it within `0..=max_scroll`.
    pub fn scroll_suggestions(&mut self, delta: i16, max_scroll: u16) {
        self.suggestion_scroll = self
            .suggestion_scroll
            .saturating_add_signed(delta)
            .min(max_scroll);
    }

    pub fn alert(&self) -> Option<&str> {
        self.alert.as_deref()
    }

    pub fn dismiss_alert(&mut self) {
        self.alert = None;
    }
}

impl Notifier for UiState {
    fn report(&mut self, message: &str) {
        self.alert = Some(message.to_string());
    }
}

fn build_textarea(lines: Vec<String>) -> TextArea<'static> {
    let mut textarea = if lines.is_empty() {
        TextArea::default()
    } else {
        TextArea::new(lines)
    };
    textarea.set_placeholder_text(INPUT_PLACEHOLDER);
    textarea.set_placeholder_style(Style::default().fg(Color::DarkGray));
    textarea.set_cursor_line_style(Style::default());
    textarea.set_cursor_style(Style::default().add_modifier(Modifier::REVERSED));
    textarea.set_block(
        Block::default()
            .borders(Borders::ALL)
            .title("Text (Ctrl+G to check, Ctrl+L to clear, Ctrl+C to quit)"),
    );
    textarea
}
