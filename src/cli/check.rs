//! TUI-less "check" command

use std::error::Error;
use std::io::{self, IsTerminal, Read};
use std::path::Path;
use std::sync::Arc;

use tokio::sync::mpsc;

use crate::api::LanguageToolClient;
use crate::core::check::{spawn_check, CheckState, GrammarService, Notifier, Suggestion};
use crate::core::config::CheckSettings;

/// Writes failure notices to stderr and remembers that it did.
#[derive(Default)]
pub struct StderrNotifier {
    pub reported: bool,
}

impl Notifier for StderrNotifier {
    fn report(&mut self, message: &str) {
        eprintln!("❌ {message}");
        self.reported = true;
    }
}

pub async fn run_check(
    text: Vec<String>,
    file: Option<&Path>,
    json: bool,
    settings: &CheckSettings,
) -> Result<(), Box<dyn Error>> {
    let input = read_input(text, file)?;
    let service = LanguageToolClient::new(&settings.api_url, &settings.language)?;

    let mut notifier = StderrNotifier::default();
    let Some(suggestions) = check_once(Arc::new(service), &input, &mut notifier).await else {
        eprintln!("Usage: gramcheck check <text>... | --file <path> | <stdin>");
        std::process::exit(1);
    };

    if notifier.reported {
        std::process::exit(1);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&suggestions)?);
    } else {
        print!("{}", format_suggestions(&input, &suggestions));
    }
    Ok(())
}

/// Run a single check through the same lifecycle the TUI uses. `None` means
/// the guard rejected the input.
pub async fn check_once<N: Notifier>(
    service: Arc<dyn GrammarService>,
    text: &str,
    notifier: &mut N,
) -> Option<Vec<Suggestion>> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut state = CheckState::new();
    let ticket = state.begin(text, &tx)?;
    drop(tx);

    spawn_check(service, ticket);
    if let Some(completion) = rx.recv().await {
        state.complete(completion, notifier);
    }
    Some(state.suggestions().to_vec())
}

fn read_input(text: Vec<String>, file: Option<&Path>) -> Result<String, Box<dyn Error>> {
    if let Some(path) = file {
        return Ok(std::fs::read_to_string(path)?);
    }
    if !text.is_empty() {
        return Ok(text.join(" "));
    }
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(String::new());
    }
    let mut buffer = String::new();
    stdin.lock().read_to_string(&mut buffer)?;
    Ok(buffer)
}

pub fn format_suggestions(input: &str, suggestions: &[Suggestion]) -> String {
    if suggestions.is_empty() {
        return "✅ No issues found.\n".to_string();
    }

    let mut out = String::new();
    for (index, suggestion) in suggestions.iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        let context = match (suggestion.offset, suggestion.length) {
            (Some(offset), Some(length)) => excerpt(input, offset, length),
            _ => None,
        };
        match context {
            Some(context) => out.push_str(&format!(
                "{}. Error: {} (\"{}\")\n",
                index + 1,
                suggestion.message,
                context
            )),
            None => out.push_str(&format!("{}. Error: {}\n", index + 1, suggestion.message)),
        }
        if let Some(summary) = suggestion.replacement_summary() {
            out.push_str(&format!("   Suggestion: {summary}\n"));
        }
    }
    out
}

/// Offsets from the service count UTF-16 code units.
fn excerpt(input: &str, offset: usize, length: usize) -> Option<String> {
    let units: Vec<u16> = input.encode_utf16().collect();
    let end = offset.checked_add(length)?;
    if end > units.len() || length == 0 {
        return None;
    }
    String::from_utf16(&units[offset..end]).ok()
}
