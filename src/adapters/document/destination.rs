//! Document destination
//!
//! The root destination creates a new document for every export. Refreshing
//! it discovers the documents currently open in the application and exposes
//! each one as a leaf child that inserts into that document.

use crate::adapters::destination::{Destination, ExportContext, RefreshOutcome};
use crate::adapters::document::automation::DocumentAutomation;
use crate::config::DocumentConfig;
use crate::core::export::{
    ExportOrchestrator, ExportRequest, OutputSettings, Transfer, TransferReceipt,
};
use crate::core::presentation::ChildList;
use crate::domain::{Capture, Designation, Icon, Notification, Result, ShotportError, TransferError};
use async_trait::async_trait;
use std::path::Path;
use std::sync::{Arc, OnceLock, PoisonError, RwLock};
use tokio_util::sync::CancellationToken;

/// What an export through a document destination does
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentTarget {
    /// Create a new document, optionally from a template and with a style
    NewDocument {
        template: Option<String>,
        style: Option<String>,
    },
    /// Insert into the open document with this name
    Existing(String),
}

/// Configuration shared by a root document destination and its leaves
#[derive(Clone)]
pub struct DocumentProfile {
    pub designation: Designation,
    pub automation: Arc<dyn DocumentAutomation>,
    pub orchestrator: ExportOrchestrator,
    pub output: OutputSettings,
    pub template: Option<String>,
    pub style: Option<String>,
}

impl DocumentProfile {
    /// Builds the profile from the `[document]` section
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the designation is invalid.
    pub fn from_config(
        config: &DocumentConfig,
        automation: Arc<dyn DocumentAutomation>,
        orchestrator: ExportOrchestrator,
        output: OutputSettings,
    ) -> Result<Self> {
        let designation = Designation::new(config.designation.as_str())
            .map_err(|e| ShotportError::Configuration(format!("document.designation: {e}")))?;
        Ok(Self {
            designation,
            automation,
            orchestrator,
            output,
            template: config.template.clone(),
            style: config.style.clone(),
        })
    }
}

/// Export destination backed by a document application
pub struct DocumentDestination {
    profile: DocumentProfile,
    live_name: Option<String>,
    binding: OnceLock<DocumentTarget>,
    display_text: RwLock<String>,
    children: ChildList,
}

impl DocumentDestination {
    /// Root destination, exporting into a new document
    pub fn new(profile: DocumentProfile) -> Self {
        let display_text = profile.designation.to_string();
        Self {
            profile,
            live_name: None,
            binding: OnceLock::new(),
            display_text: RwLock::new(display_text),
            children: ChildList::new(),
        }
    }

    fn leaf(profile: DocumentProfile, live_name: String) -> Self {
        Self {
            display_text: RwLock::new(live_name.clone()),
            live_name: Some(live_name),
            ..Self::new(profile)
        }
    }

    pub fn profile(&self) -> &DocumentProfile {
        &self.profile
    }

    /// The bound export behavior, if initialized
    pub fn target(&self) -> Option<&DocumentTarget> {
        self.binding.get()
    }

    fn bound_target(&self) -> &DocumentTarget {
        self.binding.get_or_init(|| match &self.live_name {
            Some(name) => DocumentTarget::Existing(name.clone()),
            None => DocumentTarget::NewDocument {
                template: self.profile.template.clone(),
                style: self.profile.style.clone(),
            },
        })
    }
}

/// Builds the leaf destination for one open document
///
/// The leaf shares the parent's designation, displays the document name and
/// exports into that document.
pub fn leaf_destination(parent: &DocumentProfile, live_name: &str) -> Arc<dyn Destination> {
    let leaf = DocumentDestination::leaf(parent.clone(), live_name.to_string());
    leaf.initialize();
    Arc::new(leaf)
}

#[async_trait]
impl Destination for DocumentDestination {
    fn designation(&self) -> &Designation {
        &self.profile.designation
    }

    fn display_text(&self) -> String {
        self.display_text
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn icon(&self) -> Icon {
        Icon::Document
    }

    fn initialize(&self) {
        if self.binding.get().is_some() {
            return;
        }
        self.bound_target();

        if self.live_name.is_none() {
            let text = self
                .profile
                .orchestrator
                .localizer()
                .export_to(&self.profile.designation);
            *self
                .display_text
                .write()
                .unwrap_or_else(PoisonError::into_inner) = text;
        }
    }

    async fn export(
        &self,
        _ctx: &ExportContext,
        capture: Arc<Capture>,
        cancel: CancellationToken,
    ) -> Option<Notification> {
        self.initialize();
        let transfer = DocumentTransfer {
            automation: Arc::clone(&self.profile.automation),
            target: self.bound_target().clone(),
        };
        let request = ExportRequest::new(
            self.profile.designation.clone(),
            capture,
            self.profile.output,
        );
        self.profile
            .orchestrator
            .export(request, &transfer, &cancel)
            .await
    }

    fn children(&self) -> Vec<Arc<dyn Destination>> {
        self.children.snapshot().iter().cloned().collect()
    }

    async fn refresh(&self, ctx: &ExportContext, cancel: CancellationToken) -> RefreshOutcome {
        if self.live_name.is_some() {
            return RefreshOutcome::Unsupported;
        }

        let designation = &self.profile.designation;

        let children = self.children.clone();
        if let Err(e) = ctx.presentation.run(move |scope| children.clear(scope)).await {
            tracing::error!(designation = %designation, error = %e, "Could not clear children");
            return RefreshOutcome::DiscoveryFailed(e.to_string());
        }

        if cancel.is_cancelled() {
            tracing::debug!(designation = %designation, "Refresh cancelled");
            return RefreshOutcome::Cancelled;
        }

        let automation = Arc::clone(&self.profile.automation);
        let listing = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::debug!(designation = %designation, "Refresh cancelled during discovery");
                return RefreshOutcome::Cancelled;
            }
            listing = tokio::task::spawn_blocking(move || automation.list_live_target_names()) => listing,
        };

        let mut names = match listing {
            Ok(Ok(names)) => names,
            Ok(Err(e)) => {
                tracing::warn!(designation = %designation, error = %e, "Listing open documents failed");
                return RefreshOutcome::DiscoveryFailed(e.to_string());
            }
            Err(e) => {
                tracing::error!(designation = %designation, error = %e, "Discovery task failed");
                return RefreshOutcome::DiscoveryFailed(format!("Discovery task failed: {e}"));
            }
        };

        // Byte order: uppercase names sort before lowercase ones
        names.sort();

        let leaves: Vec<Arc<dyn Destination>> = names
            .iter()
            .map(|name| leaf_destination(&self.profile, name))
            .collect();
        let count = leaves.len();

        let children = self.children.clone();
        let installed = ctx
            .presentation
            .run(move |scope| {
                if cancel.is_cancelled() {
                    return false;
                }
                children.replace(scope, leaves);
                true
            })
            .await;

        match installed {
            Ok(true) => {
                tracing::info!(designation = %designation, count, "Open documents refreshed");
                RefreshOutcome::Refreshed(count)
            }
            Ok(false) => {
                tracing::debug!(designation = %designation, "Refresh cancelled before children were installed");
                RefreshOutcome::Cancelled
            }
            Err(e) => {
                tracing::error!(designation = %designation, error = %e, "Could not install children");
                RefreshOutcome::DiscoveryFailed(e.to_string())
            }
        }
    }
}

/// Transfer bound to one document target
struct DocumentTransfer {
    automation: Arc<dyn DocumentAutomation>,
    target: DocumentTarget,
}

#[async_trait]
impl Transfer for DocumentTransfer {
    async fn transfer(&self, payload: &Path) -> std::result::Result<TransferReceipt, TransferError> {
        let automation = Arc::clone(&self.automation);
        let target = self.target.clone();
        let payload = payload.to_path_buf();

        tokio::task::spawn_blocking(move || match &target {
            DocumentTarget::Existing(name) => {
                automation.insert_into_existing_target(name, &payload)
            }
            DocumentTarget::NewDocument { template, style } => {
                automation.insert_into_new_target(&payload, template.as_deref(), style.as_deref())
            }
        })
        .await
        .map_err(|e| TransferError::Automation(format!("Automation task failed: {e}")))??;

        Ok(TransferReceipt::delivered())
    }
}
