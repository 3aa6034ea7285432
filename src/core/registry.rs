//! Destination registry
//!
//! Builds the active destinations from configuration and looks them up by
//! designation.

use crate::adapters::destination::Destination;
use crate::adapters::document::{CommandAutomation, DocumentDestination, DocumentProfile};
use crate::adapters::hosting::HostingDestination;
use crate::adapters::imaging::CaptureMaterializer;
use crate::adapters::language::TemplateLanguage;
use crate::config::ShotportConfig;
use crate::core::availability::DestinationAvailability;
use crate::core::export::{ExportOrchestrator, OutputSettings, RetryPolicy};
use crate::domain::{Result, ShotportError};
use std::sync::Arc;

/// The destinations offered to the user
pub struct DestinationRegistry {
    destinations: Vec<Arc<dyn Destination>>,
    availability: DestinationAvailability,
}

impl DestinationRegistry {
    /// Builds and initializes every available destination
    ///
    /// Destinations that are configured but unavailable are skipped.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a destination cannot be built.
    pub fn from_config(
        config: &ShotportConfig,
        availability: DestinationAvailability,
        materializer: Arc<dyn CaptureMaterializer>,
    ) -> Result<Self> {
        let orchestrator = ExportOrchestrator::new(
            materializer,
            RetryPolicy::from_config(&config.export),
            Arc::new(TemplateLanguage::new(config.language.clone())),
        );
        let output = OutputSettings::from_config(&config.output)?;

        let mut destinations: Vec<Arc<dyn Destination>> = Vec::new();

        if let Some(document) = &config.document {
            if availability.document {
                let automation = Arc::new(CommandAutomation::from_config(document));
                let profile =
                    DocumentProfile::from_config(document, automation, orchestrator.clone(), output)?;
                destinations.push(Arc::new(DocumentDestination::new(profile)));
            } else {
                tracing::info!(designation = %document.designation, "Document destination unavailable");
            }
        }

        if let Some(hosting) = &config.hosting {
            if availability.hosting {
                destinations.push(Arc::new(HostingDestination::from_config(
                    hosting,
                    orchestrator.clone(),
                )?));
            } else {
                tracing::info!(designation = %hosting.designation, "Hosting destination unavailable");
            }
        }

        Ok(Self::with_destinations(destinations, availability))
    }

    /// Registry over the given destinations, initializing each of them
    pub fn with_destinations(
        destinations: Vec<Arc<dyn Destination>>,
        availability: DestinationAvailability,
    ) -> Self {
        for destination in &destinations {
            destination.initialize();
            tracing::debug!(
                designation = %destination.designation(),
                display_text = %destination.display_text(),
                "Destination registered"
            );
        }
        Self {
            destinations,
            availability,
        }
    }

    pub fn destinations(&self) -> &[Arc<dyn Destination>] {
        &self.destinations
    }

    pub fn availability(&self) -> DestinationAvailability {
        self.availability
    }

    /// Finds a top-level destination by designation
    pub fn get(&self, designation: &str) -> Option<Arc<dyn Destination>> {
        self.destinations
            .iter()
            .find(|d| d.designation().as_str() == designation)
            .cloned()
    }

    /// Finds a destination, or one of its current children by display text
    ///
    /// # Errors
    ///
    /// Returns a validation error if no such destination or child exists.
    pub fn resolve(&self, designation: &str, child: Option<&str>) -> Result<Arc<dyn Destination>> {
        let destination = self.get(designation).ok_or_else(|| {
            ShotportError::Validation(format!("Unknown or unavailable destination: {designation}"))
        })?;

        let Some(name) = child else {
            return Ok(destination);
        };

        destination
            .children()
            .into_iter()
            .find(|c| c.display_text() == name)
            .ok_or_else(|| {
                ShotportError::Validation(format!(
                    "{designation} has no open target named '{name}'"
                ))
            })
    }
}
