use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::constants::{DEFAULT_API_URL, DEFAULT_LANGUAGE};

#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Config {
    /// Check endpoint (e.g., "https://api.languagetool.org/v2/check")
    pub api_url: Option<String>,
    /// Language tag sent with each check (e.g., "en-US", "de-DE", "auto")
    pub language: Option<String>,
}

/// Endpoint and language a session actually uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckSettings {
    pub api_url: String,
    pub language: String,
}

impl Config {
    /// Command-line overrides win over the file, which wins over built-ins.
    pub fn resolve(&self, api_url: Option<&str>, language: Option<&str>) -> CheckSettings {
        CheckSettings {
            api_url: api_url
                .or(self.api_url.as_deref())
                .unwrap_or(DEFAULT_API_URL)
                .to_string(),
            language: language
                .or(self.language.as_deref())
                .unwrap_or(DEFAULT_LANGUAGE)
                .to_string(),
        }
    }
}

/// Get a user-friendly display string for a path
/// Converts absolute paths to use ~ notation on Unix-like systems when possible
pub fn path_display<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();

    #[cfg(unix)]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let home_path = PathBuf::from(home);
            if let Ok(relative) = path.strip_prefix(&home_path) {
                return format!("~/{}", relative.display());
            }
        }
    }

    path.display().to_string()
}
