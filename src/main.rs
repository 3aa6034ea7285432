// Shotport - Send captures to export destinations
// Copyright (c) 2025 Shotport Contributors
// Licensed under the MIT License

use shotport::cli::commands::EXIT_FATAL;
use shotport::cli::{Cli, Commands};
use shotport::config::LoggingConfig;
use shotport::logging::init_logging;
use clap::Parser;
use std::process;
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() {
    // Load environment variables from .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Console-only logging for the CLI
    let log_level = cli.log_level.as_deref().unwrap_or("info");
    let logging_config = LoggingConfig {
        local_enabled: false,
        ..Default::default()
    };
    let guard = match init_logging(log_level, &logging_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            process::exit(EXIT_FATAL);
        }
    };

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "Shotport starting");

    // Ctrl+C cancels the in-flight operation
    let cancel = CancellationToken::new();
    let signal_token = cancel.clone();
    tokio::spawn(async move {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};
            let mut sigterm = match signal(SignalKind::terminate()) {
                Ok(sigterm) => sigterm,
                Err(e) => {
                    tracing::error!(error = %e, "Failed to create SIGTERM handler");
                    if tokio::signal::ctrl_c().await.is_ok() {
                        signal_token.cancel();
                    }
                    return;
                }
            };

            tokio::select! {
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Received SIGINT (Ctrl+C), cancelling");
                }
                _ = sigterm.recv() => {
                    tracing::info!("Received SIGTERM, cancelling");
                }
            }
            signal_token.cancel();
        }

        #[cfg(not(unix))]
        {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            } else {
                tracing::info!("Received SIGINT (Ctrl+C), cancelling");
                signal_token.cancel();
            }
        }
    });

    let exit_code = match execute_command(&cli, cancel).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!(error = %e, "Command execution failed");
            eprintln!("Error: {e}");
            EXIT_FATAL
        }
    };

    drop(guard);
    process::exit(exit_code);
}

/// Execute the CLI command
async fn execute_command(cli: &Cli, cancel: CancellationToken) -> anyhow::Result<i32> {
    match &cli.command {
        Commands::List(args) => args.execute(&cli.config, cancel).await,
        Commands::Export(args) => args.execute(&cli.config, cancel).await,
        Commands::ValidateConfig(args) => args.execute(&cli.config).await,
        Commands::Init(args) => args.execute().await,
    }
}
