//! Error types for the CLI application.

use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// SDK error
    #[error("SDK error: {0}")]
    Sdk(#[from] veritas_sdk::SdkError),

    /// Input rejected before dispatch
    #[error("{0} - {desc}", desc = .0.description())]
    Validation(#[from] veritas_analyzer::ValidationError),

    /// Analysis ended in the failed state
    #[error("{0}")]
    AnalysisFailed(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
