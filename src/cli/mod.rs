//! Command-line interface parsing and handling
//!
//! This module handles parsing command-line arguments and executing the appropriate commands.

pub mod check;

use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::check::run_check;
use crate::core::config::Config;
use crate::ui::check_loop::run_tui;
use crate::utils::logging::init_tracing;

#[derive(Parser)]
#[command(name = "gramcheck")]
#[command(version)]
#[command(about = "A terminal grammar checker using the LanguageTool API")]
#[command(
    long_about = "gramcheck sends your text to a LanguageTool-compatible grammar checking \
service and lists the issues it reports, with suggested replacements.\n\n\
Configuration:\n\
  Use 'gramcheck set api-url <url>' or 'gramcheck set language <tag>' to change the defaults.\n\n\
Environment Variables:\n\
  GRAMCHECK_LOG     Tracing filter used with --log (defaults to info)\n\n\
Controls:\n\
  Type              Edit the text to check\n\
  Ctrl+G / F5       Check grammar\n\
  Ctrl+L            Clear the text\n\
  PageUp/PageDown   Scroll suggestions\n\
  Enter / Esc       Dismiss an error notice\n\
  Ctrl+C            Quit the application"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Check endpoint to use for this run
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Language tag to use for this run (e.g., en-US, de-DE, auto)
    #[arg(long, global = true, value_name = "TAG")]
    pub language: Option<String>,

    /// Write diagnostic logs to the specified file
    #[arg(short = 'l', long, global = true, value_name = "FILE")]
    pub log: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the interactive checker (default)
    Tui,
    /// Check text without the interface and print the suggestions
    Check {
        /// Text to check; read from stdin when omitted
        text: Vec<String>,
        /// Read the text from a file instead
        #[arg(short, long, conflicts_with = "text")]
        file: Option<PathBuf>,
        /// Print suggestions as JSON
        #[arg(long)]
        json: bool,
    },
    /// Set configuration values
    Set {
        /// Configuration key to set (api-url, language)
        key: Option<String>,
        /// Value to set for the key
        value: Option<String>,
    },
    /// Unset configuration values
    Unset {
        /// Configuration key to unset (api-url, language)
        key: String,
    },
}

pub fn main() -> Result<(), Box<dyn Error>> {
    tokio::runtime::Runtime::new()?.block_on(async_main())
}

async fn async_main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_tracing(args.log.as_deref())?;
    let api_url = args.api_url.as_deref();
    let language = args.language.as_deref();

    match args.command.unwrap_or(Commands::Tui) {
        Commands::Tui => {
            let settings = Config::load()?.resolve(api_url, language);
            run_tui(settings).await
        }
        Commands::Check { text, file, json } => {
            let settings = Config::load()?.resolve(api_url, language);
            run_check(text, file.as_deref(), json, &settings).await
        }
        Commands::Set { key, value } => {
            let mut config = Config::load()?;
            let (Some(key), Some(value)) = (key, value) else {
                config.print_all();
                return Ok(());
            };
            match apply_setting(&mut config, &key, Some(value.trim())) {
                Ok(message) => {
                    config.save()?;
                    println!("✅ {message}");
                }
                Err(message) => {
                    eprintln!("❌ {message}");
                    std::process::exit(1);
                }
            }
            Ok(())
        }
        Commands::Unset { key } => {
            let mut config = Config::load()?;
            match apply_setting(&mut config, &key, None) {
                Ok(message) => {
                    config.save()?;
                    println!("✅ {message}");
                }
                Err(message) => {
                    eprintln!("❌ {message}");
                    std::process::exit(1);
                }
            }
            Ok(())
        }
    }
}

/// Set (`Some`) or clear (`None`) a config key. Returns the message to show.
pub(crate) fn apply_setting(
    config: &mut Config,
    key: &str,
    value: Option<&str>,
) -> Result<String, String> {
    match (key, value) {
        ("api-url", Some(url)) => {
            let parsed = reqwest::Url::parse(url)
                .map_err(|err| format!("Invalid api-url '{url}': {err}"))?;
            if !matches!(parsed.scheme(), "http" | "https") {
                return Err(format!("Invalid api-url '{url}': expected an http(s) URL"));
            }
            config.api_url = Some(url.to_string());
            Ok(format!("Set api-url to: {url}"))
        }
        ("api-url", None) => {
            config.api_url = None;
            Ok("Unset api-url".to_string())
        }
        ("language", Some(language)) => {
            if language.is_empty() || language.chars().any(char::is_whitespace) {
                return Err(format!("Invalid language tag: '{language}'"));
            }
            config.language = Some(language.to_string());
            Ok(format!("Set language to: {language}"))
        }
        ("language", None) => {
            config.language = None;
            Ok("Unset language".to_string())
        }
        (other, _) => Err(format!("Unknown config key: {other}")),
    }
}
