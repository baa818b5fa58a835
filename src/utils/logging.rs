use std::error::Error;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::core::constants::LOG_FILTER_ENV;

/// Install the tracing subscriber. Without a log file nothing is installed,
/// so the TUI never has diagnostics written over it.
pub fn init_tracing(log_file: Option<&Path>) -> Result<(), Box<dyn Error>> {
    let Some(path) = log_file else {
        return Ok(());
    };

    let file = OpenOptions::new().create(true).append(true).open(path)?;

    tracing_subscriber::fmt()
        .with_env_filter(build_filter(std::env::var(LOG_FILTER_ENV).ok().as_deref()))
        .with_ansi(false)
        .with_target(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|err| -> Box<dyn Error> { err })
}

fn build_filter(directive: Option<&str>) -> EnvFilter {
    directive
        .and_then(|value| EnvFilter::try_new(value).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn no_log_file_is_a_no_op() {
        assert!(init_tracing(None).is_ok());
    }

    #[test]
    fn unwritable_log_path_is_an_error() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let path = temp_dir.path().join("missing-dir").join("gramcheck.log");
        assert!(init_tracing(Some(&path)).is_err());
    }

    #[test]
    fn missing_filter_defaults_to_info() {
        assert_eq!(build_filter(None).to_string(), "info");
    }
}
