//! Export command implementation
//!
//! This module implements the `export` command, sending one image file to a
//! destination or to one of its open documents.

use super::{build_registry, EXIT_CONFIG_ERROR, EXIT_EXPORT_FAILED, EXIT_FATAL};
use crate::adapters::destination::{ExportContext, RefreshOutcome};
use crate::config::load_config;
use crate::core::PresentationContext;
use crate::domain::{Capture, Notification};
use clap::Args;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Image file to export
    pub file: String,

    /// Designation of the destination
    #[arg(short, long)]
    pub destination: String,

    /// Name of an open document to insert into (refreshes the destination first)
    #[arg(short, long)]
    pub target: Option<String>,

    /// Treat the image as edited, forcing a fresh temporary file
    #[arg(long)]
    pub modified: bool,

    /// Print the notification as JSON
    #[arg(long)]
    pub json: bool,
}

impl ExportArgs {
    /// Execute the export command
    pub async fn execute(&self, config_path: &str, cancel: CancellationToken) -> anyhow::Result<i32> {
        tracing::info!(file = %self.file, destination = %self.destination, "Starting export command");

        let config = match load_config(config_path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Configuration error: {e}");
                return Ok(EXIT_CONFIG_ERROR);
            }
        };

        let registry = match build_registry(&config) {
            Ok(registry) => registry,
            Err(e) => {
                eprintln!("Configuration error: {e}");
                return Ok(EXIT_CONFIG_ERROR);
            }
        };

        let capture = match Capture::open(&self.file) {
            Ok(capture) if self.modified => capture.mark_modified(),
            Ok(capture) => capture,
            Err(e) => {
                eprintln!("Could not open {}: {e}", self.file);
                return Ok(EXIT_FATAL);
            }
        };

        let ctx = ExportContext::new(PresentationContext::spawn());

        if self.target.is_some() {
            let Some(root) = registry.get(&self.destination) else {
                eprintln!("Unknown or unavailable destination: {}", self.destination);
                return Ok(EXIT_CONFIG_ERROR);
            };
            match root.refresh(&ctx, cancel.clone()).await {
                RefreshOutcome::Cancelled => {
                    println!("Export cancelled.");
                    return Ok(0);
                }
                RefreshOutcome::DiscoveryFailed(message) => {
                    eprintln!("Could not list open documents: {message}");
                    return Ok(EXIT_EXPORT_FAILED);
                }
                RefreshOutcome::Refreshed(_) | RefreshOutcome::Unsupported => {}
            }
        }

        let destination = match registry.resolve(&self.destination, self.target.as_deref()) {
            Ok(destination) => destination,
            Err(e) => {
                eprintln!("{e}");
                return Ok(EXIT_CONFIG_ERROR);
            }
        };

        let outcome = destination.export(&ctx, Arc::new(capture), cancel).await;
        ctx.presentation.shutdown();

        let Some(notification) = outcome else {
            println!("Export cancelled.");
            return Ok(0);
        };

        self.print(&notification)?;
        Ok(exit_code(&notification))
    }

    fn print(&self, notification: &Notification) -> anyhow::Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(notification)?);
            return Ok(());
        }

        println!("{}", notification.text());
        if let Some(link) = notification.link() {
            println!("  {link}");
        }
        if let Some(error) = notification.error_text() {
            println!("  Error: {error}");
        }
        Ok(())
    }
}

fn exit_code(notification: &Notification) -> i32 {
    if notification.is_success() {
        0
    } else {
        EXIT_EXPORT_FAILED
    }
}
