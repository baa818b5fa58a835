use crate::core::config::data::Config;
use crate::core::constants::{DEFAULT_API_URL, DEFAULT_LANGUAGE};

impl Config {
    pub fn print_all(&self) {
        println!("Current configuration:");
        match &self.api_url {
            Some(url) => println!("  api-url: {url}"),
            None => println!("  api-url: (unset, using {DEFAULT_API_URL})"),
        }
        match &self.language {
            Some(language) => println!("  language: {language}"),
            None => println!("  language: (unset, using {DEFAULT_LANGUAGE})"),
        }
    }
}
