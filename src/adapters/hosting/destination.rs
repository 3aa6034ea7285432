//! Image hosting destination
//!
//! Uploads the capture and reports the published link in the notification.

use crate::adapters::destination::{Destination, ExportContext};
use crate::adapters::hosting::client::HostingClient;
use crate::config::HostingConfig;
use crate::core::export::{
    ExportOrchestrator, ExportRequest, OutputSettings, Transfer, TransferReceipt,
};
use crate::domain::{Capture, Designation, Icon, Notification, Result, ShotportError, TransferError};
use async_trait::async_trait;
use std::path::Path;
use std::sync::{Arc, OnceLock};
use tokio_util::sync::CancellationToken;

/// Export destination uploading to an image hosting service
pub struct HostingDestination {
    designation: Designation,
    client: Arc<HostingClient>,
    orchestrator: ExportOrchestrator,
    output: OutputSettings,
    use_page_link: bool,
    display_text: OnceLock<String>,
}

impl HostingDestination {
    pub fn new(
        designation: Designation,
        client: Arc<HostingClient>,
        orchestrator: ExportOrchestrator,
        output: OutputSettings,
        use_page_link: bool,
    ) -> Self {
        Self {
            designation,
            client,
            orchestrator,
            output,
            use_page_link,
            display_text: OnceLock::new(),
        }
    }

    /// Builds the destination from the `[hosting]` section
    ///
    /// # Errors
    ///
    /// Returns a configuration error for an invalid designation or upload
    /// format, or if the HTTP client cannot be built.
    pub fn from_config(config: &HostingConfig, orchestrator: ExportOrchestrator) -> Result<Self> {
        let designation = Designation::new(config.designation.as_str())
            .map_err(|e| ShotportError::Configuration(format!("hosting.designation: {e}")))?;
        let output = OutputSettings::parse(&config.upload_format, config.upload_jpeg_quality)?;
        let client = Arc::new(HostingClient::new(config)?);
        Ok(Self::new(
            designation,
            client,
            orchestrator,
            output,
            config.use_page_link,
        ))
    }
}

#[async_trait]
impl Destination for HostingDestination {
    fn designation(&self) -> &Designation {
        &self.designation
    }

    fn display_text(&self) -> String {
        self.display_text
            .get()
            .cloned()
            .unwrap_or_else(|| self.designation.to_string())
    }

    fn icon(&self) -> Icon {
        Icon::Upload
    }

    fn initialize(&self) {
        self.display_text
            .get_or_init(|| self.orchestrator.localizer().upload_to(&self.designation));
    }

    async fn export(
        &self,
        _ctx: &ExportContext,
        capture: Arc<Capture>,
        cancel: CancellationToken,
    ) -> Option<Notification> {
        self.initialize();
        let transfer = HostingTransfer {
            client: Arc::clone(&self.client),
            title: capture.title().to_string(),
            use_page_link: self.use_page_link,
        };
        let request = ExportRequest::new(self.designation.clone(), capture, self.output);
        self.orchestrator.export(request, &transfer, &cancel).await
    }
}

struct HostingTransfer {
    client: Arc<HostingClient>,
    title: String,
    use_page_link: bool,
}

#[async_trait]
impl Transfer for HostingTransfer {
    async fn transfer(&self, payload: &Path) -> std::result::Result<TransferReceipt, TransferError> {
        let name = payload
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let hosted = self.client.upload(payload, &self.title, &name).await?;
        tracing::info!(id = %hosted.id, link = %hosted.link, "Image uploaded");

        let link = if self.use_page_link {
            hosted.page_link
        } else {
            hosted.link
        };
        Ok(TransferReceipt::with_link(link))
    }
}
