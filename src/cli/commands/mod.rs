//! CLI command implementations
//!
//! Exit codes: 0 success, 2 configuration error, 3 export failed, 5 fatal error.

pub mod export;
pub mod init;
pub mod list;
pub mod validate;

use crate::adapters::imaging::TempFileMaterializer;
use crate::config::ShotportConfig;
use crate::core::{DestinationAvailability, DestinationRegistry};
use std::sync::Arc;

/// Configuration error exit code
pub const EXIT_CONFIG_ERROR: i32 = 2;
/// The export produced a Fail notification
pub const EXIT_EXPORT_FAILED: i32 = 3;
/// Fatal error exit code
pub const EXIT_FATAL: i32 = 5;

/// Probes availability and builds the registry for a loaded configuration
pub(crate) fn build_registry(config: &ShotportConfig) -> crate::domain::Result<DestinationRegistry> {
    let availability = DestinationAvailability::probe(config);
    let materializer = Arc::new(TempFileMaterializer::from_config(&config.output));
    DestinationRegistry::from_config(config, availability, materializer)
}
