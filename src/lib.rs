//! gramcheck is a terminal grammar checker backed by the LanguageTool HTTP API.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`api`] defines the LanguageTool wire payloads and the HTTP client that
//!   submits text for checking.
//! - [`core`] owns the check lifecycle (guard, busy flag, suggestion list),
//!   configuration, and the application state shared with the UI.
//! - [`ui`] renders the terminal interface and runs the interactive event loop.
//! - [`cli`] parses arguments and dispatches to the TUI, the TUI-less `check`
//!   command, or config editing.
//!
//! Runtime entrypoints live in the binary crate (`src/main.rs`) and route
//! through [`crate::cli::main`].

pub mod api;
pub mod cli;
pub mod core;
pub mod ui;
pub mod utils;
