//! Application state for the interactive checker.
//!
//! [`App`] joins the editor ([`UiState`]) with the check lifecycle
//! ([`CheckState`]). The event loop owns it through an `AppHandle`, triggers
//! checks from key presses, and feeds completions back in with
//! [`App::apply_completion`].

pub mod ui_state;

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::core::check::{
    spawn_check, CheckCompletion, CheckState, GrammarService, TriggerOutcome,
};

pub use ui_state::UiState;

pub struct App {
    pub ui: UiState,
    pub check: CheckState,
    pub language: String,
    service: Arc<dyn GrammarService>,
    completion_tx: mpsc::UnboundedSender<CheckCompletion>,
}

impl App {
    pub fn new(
        service: Arc<dyn GrammarService>,
        completion_tx: mpsc::UnboundedSender<CheckCompletion>,
        language: impl Into<String>,
    ) -> Self {
        Self {
            ui: UiState::new(),
            check: CheckState::new(),
            language: language.into(),
            service,
            completion_tx,
        }
    }

    /// Whether the trigger control is enabled.
    pub fn can_trigger_check(&self) -> bool {
        self.check.can_begin(&self.ui.get_input_text())
    }

    /// Start a check of the current editor text. Must be called from within
    /// a Tokio runtime.
    pub fn trigger_check(&mut self) -> TriggerOutcome {
        let text = self.ui.get_input_text();
        match self.check.begin(&text, &self.completion_tx) {
            Some(ticket) => {
                self.ui.suggestion_scroll = 0;
                spawn_check(Arc::clone(&self.service), ticket);
                TriggerOutcome::Started
            }
            None => TriggerOutcome::Rejected,
        }
    }

    /// Returns `true` when the completion changed what is on screen.
    pub fn apply_completion(&mut self, completion: CheckCompletion) -> bool {
        self.check.complete(completion, &mut self.ui)
    }
}
