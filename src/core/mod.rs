//! Core business logic for Shotport.
//!
//! # Modules
//!
//! - [`export`] - Payload selection, retry policy and the export orchestrator
//! - [`presentation`] - The single context owning presentation state
//! - [`availability`] - One-time probe of which destinations are usable
//! - [`registry`] - The set of active destinations
//!
//! # Export Workflow
//!
//! 1. **Probe**: decide once which configured destinations are available
//! 2. **Register**: build and initialize the available destinations
//! 3. **Refresh** (optional): discover live sub-targets of container destinations
//! 4. **Export**: pick the payload, transfer it with one retry, report a notification
//!
//! # Example
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
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("shotport.toml")?;
//! let availability = DestinationAvailability::probe(&config);
//! let materializer = Arc::new(TempFileMaterializer::from_config(&config.output));
//! let registry = DestinationRegistry::from_config(&config, availability, materializer)?;
//!
//! let ctx = ExportContext::new(PresentationContext::spawn());
//! let capture = Arc::new(Capture::open("shot.png")?);
//! let destination = registry.resolve("Writer", None)?;
//!
//! if let Some(notification) = destination.export(&ctx, capture, CancellationToken::new()).await {
//!     println!("{}", notification.text());
//! }
//! # Ok(())
//! # }
//! ```

pub mod availability;
pub mod export;
pub mod presentation;
pub mod registry;

pub use availability::DestinationAvailability;
pub use presentation::{ChildList, PresentationContext, PresentationScope};
pub use registry::DestinationRegistry;
