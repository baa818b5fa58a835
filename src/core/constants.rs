//! Shared constants used across the application

/// LanguageTool public check endpoint.
pub const DEFAULT_API_URL: &str = "https://api.languagetool.org/v2/check";

/// Locale tag sent with every check unless configured otherwise.
pub const DEFAULT_LANGUAGE: &str = "en-US";

/// The only failure text users ever see; details go to the log.
pub const CHECK_FAILED_MESSAGE: &str = "Failed to check grammar. Please try again.";

pub const APP_TITLE: &str = "Grammar Checker";
pub const INPUT_PLACEHOLDER: &str = "Write something here...";
pub const SUGGESTIONS_HEADING: &str = "Suggestions";
pub const TRIGGER_IDLE_LABEL: &str = "Check Grammar";
pub const TRIGGER_BUSY_LABEL: &str = "Checking...";

/// Environment variable holding the tracing filter when `--log` is active.
pub const LOG_FILTER_ENV: &str = "GRAMCHECK_LOG";
