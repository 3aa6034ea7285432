//! Destination availability
//!
//! Whether each configured destination can be offered at all is decided once
//! at startup and never changes afterwards.

use crate::config::{DocumentConfig, HostingConfig, ShotportConfig};
use std::env;
use std::path::{Path, PathBuf};

/// Which destinations are usable for the lifetime of the process
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DestinationAvailability {
    /// The document application is enabled and installed
    pub document: bool,

    /// The image hosting service is enabled and its upload URL is valid
    pub hosting: bool,
}

impl DestinationAvailability {
    /// Probes the environment for every configured destination
    pub fn probe(config: &ShotportConfig) -> Self {
        let availability = Self {
            document: config.document.as_ref().is_some_and(document_available),
            hosting: config.hosting.as_ref().is_some_and(hosting_available),
        };
        tracing::info!(
            document = availability.document,
            hosting = availability.hosting,
            "Destination availability probed"
        );
        availability
    }

    /// Every destination available, for callers that did their own probing
    pub fn all() -> Self {
        Self {
            document: true,
            hosting: true,
        }
    }
}

fn document_available(config: &DocumentConfig) -> bool {
    if !config.enabled {
        return false;
    }
    let found = resolve_executable(&config.executable);
    if found.is_none() {
        tracing::warn!(executable = %config.executable, "Document application not found");
    }
    found.is_some()
}

fn hosting_available(config: &HostingConfig) -> bool {
    config.enabled
        && url::Url::parse(&config.upload_url)
            .map(|url| matches!(url.scheme(), "http" | "https"))
            .unwrap_or(false)
}

/// Finds an executable by path, or by name on `PATH`
pub fn resolve_executable(executable: &str) -> Option<PathBuf> {
    let candidate = Path::new(executable);
    if executable.trim().is_empty() {
        return None;
    }
    if candidate.is_absolute() || candidate.components().count() > 1 {
        return candidate.is_file().then(|| candidate.to_path_buf());
    }

    let paths = env::var_os("PATH")?;
    env::split_paths(&paths)
        .map(|dir| dir.join(candidate))
        .find(|path| path.is_file())
}
