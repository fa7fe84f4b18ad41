//! Config command implementation.

use crate::cli::{ConfigAction, ConfigArgs};
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use std::path::Path;
use veritas_sdk::ClientConfig;

/// Execute the config command, persisting changes to `path`.
pub async fn execute_config(
    args: ConfigArgs,
    config: &mut Config,
    path: &Path,
    formatter: &Formatter,
) -> Result<()> {
    match args.action {
        ConfigAction::Show => {
            println!("Config file: {}", path.display());
            println!("Endpoint:    {}", config.endpoint);
            println!("Timeout:     {}s", config.timeout_secs);
            println!("Format:      {:?}", config.settings.format);
            println!("Color:       {}", config.settings.color);
            if let Ok(url) = std::env::var("VERITAS_API_URL") {
                println!(
                    "{}",
                    formatter.info(&format!("VERITAS_API_URL overrides the endpoint: {}", url))
                );
            }
        }
        ConfigAction::SetEndpoint { url } => {
            let candidate = ClientConfig::new(url).with_timeout_secs(config.timeout_secs);
            candidate
                .validate()
                .map_err(|e| CliError::InvalidInput(e.to_string()))?;
            config.endpoint = candidate.endpoint().to_string();
            config.save_to(path)?;
            println!(
                "{}",
                formatter.success(&format!("Endpoint set to {}", config.endpoint))
            );
        }
        ConfigAction::SetTimeout { secs } => {
            if secs == 0 {
                return Err(CliError::InvalidInput(
                    "Timeout must be at least one second".to_string(),
                ));
            }
            config.timeout_secs = secs;
            config.save_to(path)?;
            println!("{}", formatter.success(&format!("Timeout set to {}s", secs)));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;

    #[tokio::test]
    async fn test_set_endpoint_persists_trimmed_url() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = Config::default();
        let formatter = Formatter::new(OutputFormat::Table, false);

        let args = ConfigArgs {
            action: ConfigAction::SetEndpoint {
                url: "https://api.example.com/".to_string(),
            },
        };
        execute_config(args, &mut config, &path, &formatter).await.unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.endpoint, "https://api.example.com");
    }

    #[tokio::test]
    async fn test_set_endpoint_rejects_bad_url() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = Config::default();
        let formatter = Formatter::new(OutputFormat::Table, false);

        let args = ConfigArgs {
            action: ConfigAction::SetEndpoint {
                url: "ftp://nope".to_string(),
            },
        };
        assert!(execute_config(args, &mut config, &path, &formatter).await.is_err());
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_zero_timeout_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = Config::default();
        let formatter = Formatter::new(OutputFormat::Table, false);

        let args = ConfigArgs {
            action: ConfigAction::SetTimeout { secs: 0 },
        };
        assert!(execute_config(args, &mut config, &path, &formatter).await.is_err());
        assert_eq!(config.timeout_secs, 30);
    }
}
