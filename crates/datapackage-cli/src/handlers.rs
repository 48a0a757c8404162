//! Command handlers for CLI subcommands
//!
//! This module contains the implementation logic for each CLI subcommand.

mod columns;
mod completions;
mod config;
mod fmt;
mod utils;
mod validate;

pub use columns::handle_columns;
pub use completions::handle_completions;
pub use config::handle_config;
pub use fmt::handle_fmt;
pub use validate::handle_validate;
