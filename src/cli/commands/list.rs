//! List command implementation
//!
//! Prints the available destinations and, with `--refresh`, the live
//! sub-targets of container destinations.

use super::{build_registry, EXIT_CONFIG_ERROR};
use crate::adapters::destination::{ExportContext, RefreshOutcome};
use crate::config::load_config;
use crate::core::PresentationContext;
use clap::Args;
use tokio_util::sync::CancellationToken;

/// Arguments for the list command
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Discover open documents of container destinations
    #[arg(long)]
    pub refresh: bool,
}

impl ListArgs {
    /// Execute the list command
    pub async fn execute(&self, config_path: &str, cancel: CancellationToken) -> anyhow::Result<i32> {
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

        if registry.destinations().is_empty() {
            println!("No destinations available.");
            return Ok(0);
        }

        let ctx = ExportContext::new(PresentationContext::spawn());

        for destination in registry.destinations() {
            println!(
                "{} [{}] {}",
                destination.designation(),
                destination.icon(),
                destination.display_text()
            );

            if !self.refresh {
                continue;
            }

            match destination.refresh(&ctx, cancel.clone()).await {
                RefreshOutcome::Refreshed(_) => {
                    for child in destination.children() {
                        println!("    {}", child.display_text());
                    }
                }
                RefreshOutcome::Unsupported => {}
                RefreshOutcome::Cancelled => {
                    println!("Refresh cancelled.");
                    break;
                }
                RefreshOutcome::DiscoveryFailed(message) => {
                    println!("    (could not list open documents: {message})");
                }
            }
        }

        ctx.presentation.shutdown();
        Ok(0)
    }
}
