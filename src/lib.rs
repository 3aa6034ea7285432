// Shotport - Send captures to export destinations
// Copyright (c) 2025 Shotport Contributors
// Licensed under the MIT License

//! # Shotport - Send captures to export destinations
//!
//! Shotport hands a captured image to one of several pluggable destinations
//! (a document application, an image hosting service) through one uniform
//! contract, and reports the outcome as a notification.
//!
//! ## Overview
//!
//! This library provides:
//! - **Destinations** behind the [`adapters::destination::Destination`] trait
//! - **Export orchestration** with payload reuse and one retry of failed transfers
//! - **Child discovery** of open documents, applied on a single presentation context
//! - **Notifications** describing the outcome of every export
//!
//! ## Architecture
//!
//! Shotport follows a layered architecture:
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (export pipeline, presentation context, registry)
//! - [`adapters`] - External integrations (document automation, image hosting, imaging)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use shotport::adapters::destination::ExportContext;
//! use shotport::adapters::imaging::TempFileMaterializer;
//! use shotport::config::load_config;
//! use shotport::core::{DestinationAvailability, DestinationRegistry, PresentationContext};
//! use shotport::domain::Capture;
//! use std::sync::Arc;
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("shotport.toml")?;
//!     let availability = DestinationAvailability::probe(&config);
//!     let materializer = Arc::new(TempFileMaterializer::from_config(&config.output));
//!     let registry = DestinationRegistry::from_config(&config, availability, materializer)?;
//!
//!     let ctx = ExportContext::new(PresentationContext::spawn());
//!     let capture = Arc::new(Capture::open("shot.png")?);
//!
//!     let writer = registry.resolve("Writer", None)?;
//!     if let Some(notification) = writer.export(&ctx, capture, CancellationToken::new()).await {
//!         println!("{}", notification.text());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Live Documents
//!
//! Refreshing a document destination lists the open documents and exposes
//! each one as a child destination:
//!
//! ```rust,no_run
//! use shotport::adapters::destination::{Destination, ExportContext, RefreshOutcome};
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example(writer: &dyn Destination, ctx: &ExportContext) {
//! match writer.refresh(ctx, CancellationToken::new()).await {
//!     RefreshOutcome::Refreshed(_) => {
//!         for child in writer.children() {
//!             println!("{}", child.display_text());
//!         }
//!     }
//!     RefreshOutcome::DiscoveryFailed(message) => eprintln!("{message}"),
//!     RefreshOutcome::Cancelled | RefreshOutcome::Unsupported => {}
//! }
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Shotport uses [`domain::ShotportError`] for setup errors. Export and refresh
//! never return errors: failures become Fail notifications or
//! [`adapters::destination::RefreshOutcome::DiscoveryFailed`].
//!
//! ## Logging
//!
//! Shotport uses structured logging with the `tracing` crate:
//!
//! ```rust,no_run
//! use tracing::{info, warn};
//!
//! info!(designation = "Writer", "Starting export");
//! warn!(designation = "Writer", attempt = 2, "Retrying transfer");
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
