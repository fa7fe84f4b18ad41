//! Veritas CLI - Command-line interface for the Veritas content analyzer.

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use veritas_analyzer::Orchestrator;
use veritas_cli::commands;
use veritas_cli::repl;
use veritas_cli::{Cli, Command, Config, Formatter};

#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr, filtered by `RUST_LOG` (default `warn`).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> veritas_cli::Result<()> {
    let mut cli = Cli::parse();

    let config_path = match &cli.config {
        Some(path) => PathBuf::from(path),
        None => Config::path()?,
    };
    let mut config = Config::load_from(&config_path)?;

    let format = cli
        .format
        .map(Into::into)
        .unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);

    match cli.command.take() {
        None | Some(Command::Repl) => {
            repl::run_repl(&connect(&config, &cli)?, &config, &formatter).await?;
        }
        Some(Command::Analyze(args)) => {
            commands::execute_analyze(args, &connect(&config, &cli)?, &formatter).await?;
        }
        Some(Command::Health) => {
            commands::execute_health(&connect(&config, &cli)?, &formatter).await?;
        }
        Some(Command::Config(args)) => {
            commands::execute_config(args, &mut config, &config_path, &formatter).await?;
        }
    }

    Ok(())
}

/// Build the orchestrator, applying `--endpoint`/`VERITAS_API_URL` and `--timeout`.
fn connect(config: &Config, cli: &Cli) -> veritas_cli::Result<Orchestrator> {
    let client_config = config.client_config(cli.endpoint.as_deref(), cli.timeout)?;
    tracing::debug!(endpoint = client_config.endpoint(), "using analysis service");
    Ok(Orchestrator::from_config(client_config)?)
}
