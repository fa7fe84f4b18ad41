//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};

/// Veritas CLI - Check the credibility of text, links and images.
#[derive(Debug, Parser)]
#[command(name = "veritas")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Analysis service base URL
    #[arg(short, long, global = true, env = "VERITAS_API_URL")]
    pub endpoint: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (score only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Analyze a piece of content
    Analyze(AnalyzeArgs),

    /// Check the analysis service health
    Health,

    /// Manage the configuration file
    Config(ConfigArgs),

    /// Enter interactive REPL mode
    Repl,
}

/// Arguments for the analyze command.
#[derive(Debug, Parser)]
pub struct AnalyzeArgs {
    #[command(subcommand)]
    pub target: AnalyzeTarget,
}

/// What to analyze.
#[derive(Debug, Subcommand)]
pub enum AnalyzeTarget {
    /// Analyze free text
    Text {
        /// Text to analyze
        text: Option<String>,

        /// Read the text from stdin
        #[arg(long)]
        stdin: bool,
    },

    /// Analyze a web page by URL
    Url {
        /// Address to analyze
        url: String,
    },

    /// Analyze an image file
    Image {
        /// Path to the image
        path: String,
    },

    /// Analyze a video file (not yet supported by the service)
    Video {
        /// Path to the video
        path: String,
    },
}

/// Arguments for configuration management.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Show the effective configuration
    Show,

    /// Set the analysis service URL
    SetEndpoint {
        /// Base URL (e.g., http://localhost:8000)
        url: String,
    },

    /// Set the request timeout
    SetTimeout {
        /// Timeout in seconds
        secs: u64,
    },
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}
