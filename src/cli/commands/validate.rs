//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Shotport configuration file.

use super::EXIT_CONFIG_ERROR;
use crate::config::load_config;
use crate::core::DestinationAvailability;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("Validating configuration file: {config_path}");
        println!();

        // load_config validates as part of loading
        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("Configuration is invalid");
                println!("   Error: {e}");
                return Ok(EXIT_CONFIG_ERROR);
            }
        };

        let availability = DestinationAvailability::probe(&config);

        println!("Configuration is valid");
        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!(
            "  Temporary Files: {} ({})",
            config.output.temp_dir.as_deref().unwrap_or("system temp dir"),
            config.output.format
        );
        println!(
            "  Retries: {} (backoff {} ms)",
            config.export.retries, config.export.retry_backoff_ms
        );

        match &config.document {
            Some(document) => println!(
                "  Document: {} via {} ({})",
                document.designation,
                document.executable,
                if availability.document { "available" } else { "unavailable" }
            ),
            None => println!("  Document: not configured"),
        }

        match &config.hosting {
            Some(hosting) => println!(
                "  Hosting: {} at {} ({})",
                hosting.designation,
                hosting.upload_url,
                if availability.hosting { "available" } else { "unavailable" }
            ),
            None => println!("  Hosting: not configured"),
        }
        println!();

        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_valid_config() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[application]\nlog_level = \"debug\"").unwrap();

        let code = ValidateArgs {}
            .execute(file.path().to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(code, 0);
    }

    #[tokio::test]
    async fn test_invalid_config() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[application]\nlog_level = \"loud\"").unwrap();

        let code = ValidateArgs {}
            .execute(file.path().to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(code, EXIT_CONFIG_ERROR);
    }
}
