//! Veritas CLI library.
//!
//! This library provides the presentation layer for the Veritas content
//! analyzer: configuration management, command execution, output
//! formatting and the interactive REPL.

pub mod attachment;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod repl;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
