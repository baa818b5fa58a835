//! Check-grammar request lifecycle.
//!
//! A check moves through `Idle -> Pending -> Idle`. [`CheckState::begin`]
//! applies the guard (non-empty trimmed text, nothing already pending), marks
//! the state busy, clears stale suggestions and hands out a [`CheckTicket`].
//! The ticket travels with the request task and reports back through a
//! channel exactly once: explicitly via [`CheckTicket::finish`], or from its
//! `Drop` impl if the task ends early. [`CheckState::complete`] applies that
//! report on the event loop side and always clears the busy flag.

use std::error::Error as StdError;
use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::mpsc;
use tracing::{debug, error};

use crate::core::constants::CHECK_FAILED_MESSAGE;

/// One grammar or style issue reported by the checking service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Suggestion {
    pub message: String,
    pub replacements: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_id: Option<String>,
}

impl Suggestion {
    pub fn new(message: impl Into<String>, replacements: Vec<String>) -> Self {
        Self {
            message: message.into(),
            replacements,
            short_message: None,
            offset: None,
            length: None,
            rule_id: None,
        }
    }

    /// Replacement candidates joined for display, or `None` when there are none.
    pub fn replacement_summary(&self) -> Option<String> {
        if self.replacements.is_empty() {
            None
        } else {
            Some(self.replacements.join(", "))
        }
    }
}

/// Errors that end a check without a suggestion list.
#[derive(Debug)]
pub enum CheckError {
    /// The request could not be built or sent, or the connection failed.
    Transport(reqwest::Error),
    /// The service answered with a non-success status.
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    /// The response body was not valid JSON.
    Parse(serde_json::Error),
    /// The request task ended without producing a result.
    Interrupted,
}

impl fmt::Display for CheckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckError::Transport(source) => write!(f, "request failed: {source}"),
            CheckError::Status { status, body } => {
                if body.trim().is_empty() {
                    write!(f, "service returned status {status}")
                } else {
                    write!(f, "service returned status {status}: {}", body.trim())
                }
            }
            CheckError::Parse(source) => write!(f, "failed to parse response: {source}"),
            CheckError::Interrupted => write!(f, "check ended before a response arrived"),
        }
    }
}

impl StdError for CheckError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            CheckError::Transport(source) => Some(source),
            CheckError::Parse(source) => Some(source),
            CheckError::Status { .. } | CheckError::Interrupted => None,
        }
    }
}

impl From<reqwest::Error> for CheckError {
    fn from(source: reqwest::Error) -> Self {
        CheckError::Transport(source)
    }
}

impl From<serde_json::Error> for CheckError {
    fn from(source: serde_json::Error) -> Self {
        CheckError::Parse(source)
    }
}

/// Something that can check text and return suggestions.
#[async_trait]
pub trait GrammarService: Send + Sync {
    async fn check(&self, text: &str) -> Result<Vec<Suggestion>, CheckError>;
}

/// User-facing failure reporting.
pub trait Notifier {
    fn report(&mut self, message: &str);
}

/// Result of a check delivered back to the owner of [`CheckState`].
#[derive(Debug)]
pub struct CheckCompletion {
    pub ticket_id: u64,
    pub result: Result<Vec<Suggestion>, CheckError>,
}

/// Whether a trigger started a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerOutcome {
    Started,
    Rejected,
}

/// Proof that a check is pending. Reports completion exactly once.
pub struct CheckTicket {
    id: u64,
    text: String,
    tx: mpsc::UnboundedSender<CheckCompletion>,
    reported: bool,
}

impl CheckTicket {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn finish(mut self, result: Result<Vec<Suggestion>, CheckError>) {
        self.send(result);
    }

    fn send(&mut self, result: Result<Vec<Suggestion>, CheckError>) {
        if self.reported {
            return;
        }
        self.reported = true;
        let _ = self.tx.send(CheckCompletion {
            ticket_id: self.id,
            result,
        });
    }
}

impl Drop for CheckTicket {
    fn drop(&mut self) {
        if !self.reported {
            debug!(ticket = self.id, "check ticket dropped without a result");
            self.send(Err(CheckError::Interrupted));
        }
    }
}

#[derive(Debug, Default)]
pub struct CheckState {
    suggestions: Vec<Suggestion>,
    pending: Option<u64>,
    next_ticket: u64,
}

impl CheckState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.suggestions
    }

    /// Guard for starting a check with `text`.
    pub fn can_begin(&self, text: &str) -> bool {
        !self.is_busy() && !text.trim().is_empty()
    }

    /// Enter the pending state, or return `None` without touching anything
    /// when the guard fails.
    pub fn begin(
        &mut self,
        text: &str,
        tx: &mpsc::UnboundedSender<CheckCompletion>,
    ) -> Option<CheckTicket> {
        if !self.can_begin(text) {
            return None;
        }

        self.next_ticket = self.next_ticket.wrapping_add(1);
        let id = self.next_ticket;
        self.pending = Some(id);
        self.suggestions.clear();
        debug!(ticket = id, chars = text.chars().count(), "check started");

        Some(CheckTicket {
            id,
            text: text.to_string(),
            tx: tx.clone(),
            reported: false,
        })
    }

    /// Apply a completion. Returns `false` when it does not belong to the
    /// pending check (already completed or never issued).
    pub fn complete<N: Notifier + ?Sized>(
        &mut self,
        completion: CheckCompletion,
        notifier: &mut N,
    ) -> bool {
        if self.pending != Some(completion.ticket_id) {
            debug!(
                ticket = completion.ticket_id,
                "ignoring completion for a check that is not pending"
            );
            return false;
        }
        self.pending = None;

        match completion.result {
            Ok(suggestions) => {
                debug!(
                    ticket = completion.ticket_id,
                    count = suggestions.len(),
                    "check succeeded"
                );
                self.suggestions = suggestions;
            }
            Err(err) => {
                error!(ticket = completion.ticket_id, error = %err, "grammar check failed");
                self.suggestions.clear();
                notifier.report(CHECK_FAILED_MESSAGE);
            }
        }
        true
    }
}

/// Run the request for `ticket` on the runtime. The ticket reports back even
/// if the service panics.
pub fn spawn_check(
    service: Arc<dyn GrammarService>,
    ticket: CheckTicket,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let result = service.check(ticket.text()).await;
        ticket.finish(result);
    })
}
