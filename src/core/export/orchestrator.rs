//! Export orchestrator - drives a single export to exactly one notification
//!
//! The orchestrator picks the payload file, runs the destination's transfer
//! under the retry policy and folds the outcome into a [`Notification`].
//! Nothing raised by the materializer or the transfer crosses [`ExportOrchestrator::export`].

use crate::adapters::imaging::CaptureMaterializer;
use crate::adapters::language::Localizer;
use crate::core::export::payload::{OutputSettings, PayloadSource};
use crate::core::export::retry::RetryPolicy;
use crate::core::export::transfer::{Transfer, TransferReceipt};
use crate::domain::{Capture, Designation, Notification, ShotportError, TransferError};
use std::path::PathBuf;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// One export to perform
#[derive(Debug, Clone)]
pub struct ExportRequest {
    /// Designation of the destination, used in messages
    pub designation: Designation,

    /// The capture to export
    pub capture: Arc<Capture>,

    /// Encoding used if the capture has to be written to a temporary file
    pub output: OutputSettings,
}

impl ExportRequest {
    pub fn new(designation: Designation, capture: Arc<Capture>, output: OutputSettings) -> Self {
        Self {
            designation,
            capture,
            output,
        }
    }
}

/// Why an export ended without a delivered payload
#[derive(Debug)]
enum ExportFailure {
    Materialization(ShotportError),
    Transfer(TransferError),
}

impl ExportFailure {
    /// Message surfaced as the notification's error text
    fn message(&self) -> String {
        match self {
            ExportFailure::Materialization(e) => e.to_string(),
            ExportFailure::Transfer(e) => e.to_string(),
        }
    }
}

/// Turns export requests into notifications
///
/// Holds no per-export state and can be shared between concurrent exports.
#[derive(Clone)]
pub struct ExportOrchestrator {
    materializer: Arc<dyn CaptureMaterializer>,
    retry: RetryPolicy,
    localizer: Arc<dyn Localizer>,
}

impl ExportOrchestrator {
    /// Create a new export orchestrator
    pub fn new(
        materializer: Arc<dyn CaptureMaterializer>,
        retry: RetryPolicy,
        localizer: Arc<dyn Localizer>,
    ) -> Self {
        Self {
            materializer,
            retry,
            localizer,
        }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    pub fn localizer(&self) -> &Arc<dyn Localizer> {
        &self.localizer
    }

    /// Execute one export
    ///
    /// Returns `None` when `cancel` fires before the export completes;
    /// cancellation is not a failure and produces no notification. Otherwise
    /// returns a Success or Fail notification.
    pub async fn export(
        &self,
        request: ExportRequest,
        transfer: &dyn Transfer,
        cancel: &CancellationToken,
    ) -> Option<Notification> {
        if cancel.is_cancelled() {
            tracing::debug!(designation = %request.designation, "Export cancelled before start");
            return None;
        }

        crate::log_export_start!(request.designation, request.capture.title());

        let outcome = tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                tracing::info!(designation = %request.designation, "Export cancelled");
                return None;
            }
            outcome = self.deliver(&request, transfer) => outcome,
        };

        let notification = match outcome {
            Ok(receipt) => {
                let text = self.localizer.exported_to(&request.designation);
                match receipt.link {
                    Some(link) => {
                        Notification::success_with_link(request.designation.clone(), text, link)
                    }
                    None => Notification::success(request.designation.clone(), text),
                }
            }
            Err(failure) => {
                match &failure {
                    ExportFailure::Materialization(e) => tracing::error!(
                        designation = %request.designation,
                        error = %e,
                        "Could not write capture to a temporary file"
                    ),
                    ExportFailure::Transfer(e) => tracing::error!(
                        designation = %request.designation,
                        attempts = self.retry.max_attempts(),
                        error = %e,
                        "Transfer failed"
                    ),
                }
                Notification::fail(
                    request.designation.clone(),
                    self.localizer.export_failed(&request.designation),
                    failure.message(),
                )
            }
        };

        crate::log_export_outcome!(notification);
        Some(notification)
    }

    async fn deliver(
        &self,
        request: &ExportRequest,
        transfer: &dyn Transfer,
    ) -> Result<TransferReceipt, ExportFailure> {
        let payload = self
            .payload_path(request)
            .await
            .map_err(ExportFailure::Materialization)?;

        tracing::debug!(
            designation = %request.designation,
            payload = %payload.display(),
            "Transferring payload"
        );

        let payload = payload.as_path();
        self.retry
            .run(request.designation.as_str(), move |_| transfer.transfer(payload))
            .await
            .map_err(ExportFailure::Transfer)
    }

    /// Picks the payload file, materializing the capture at most once
    async fn payload_path(&self, request: &ExportRequest) -> crate::domain::Result<PathBuf> {
        match PayloadSource::decide(&request.capture) {
            PayloadSource::Reuse(path) => {
                tracing::debug!(path = %path.display(), "Reusing capture file");
                Ok(path)
            }
            PayloadSource::Materialize => {
                let materializer = Arc::clone(&self.materializer);
                let capture = Arc::clone(&request.capture);
                let settings = request.output;
                tokio::task::spawn_blocking(move || {
                    materializer.save_temporary_file(&capture, &settings)
                })
                .await
                .map_err(|e| {
                    ShotportError::Materialization(format!("Materialization task failed: {e}"))
                })?
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::language::TemplateLanguage;
    use crate::domain::CaptureDetails;
    use async_trait::async_trait;
    use image::{DynamicImage, RgbaImage};
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct FixedMaterializer {
        calls: AtomicUsize,
        result: std::result::Result<PathBuf, String>,
    }

    impl CaptureMaterializer for FixedMaterializer {
        fn save_temporary_file(
            &self,
            _capture: &Capture,
            _settings: &OutputSettings,
        ) -> crate::domain::Result<PathBuf> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result.clone().map_err(ShotportError::Materialization)
        }
    }

    struct RecordingTransfer {
        paths: Mutex<Vec<PathBuf>>,
        failures: Vec<&'static str>,
    }

    #[async_trait]
    impl Transfer for RecordingTransfer {
        async fn transfer(&self, payload: &Path) -> Result<TransferReceipt, TransferError> {
            let attempt = {
                let mut paths = self.paths.lock().unwrap();
                paths.push(payload.to_path_buf());
                paths.len()
            };
            match self.failures.get(attempt - 1) {
                Some(message) => Err(TransferError::Automation(message.to_string())),
                None => Ok(TransferReceipt::delivered()),
            }
        }
    }

    fn orchestrator(materializer: Arc<FixedMaterializer>) -> ExportOrchestrator {
        ExportOrchestrator::new(
            materializer,
            RetryPolicy::transient_once(),
            Arc::new(TemplateLanguage::default()),
        )
    }

    fn request(capture: Capture) -> ExportRequest {
        ExportRequest::new(
            Designation::new("Writer").unwrap(),
            Arc::new(capture),
            OutputSettings::default(),
        )
    }

    fn capture() -> Capture {
        Capture::new(
            DynamicImage::ImageRgba8(RgbaImage::new(1, 1)),
            CaptureDetails::new("shot"),
        )
    }

    fn materializer(result: std::result::Result<PathBuf, String>) -> Arc<FixedMaterializer> {
        Arc::new(FixedMaterializer {
            calls: AtomicUsize::new(0),
            result,
        })
    }

    #[tokio::test]
    async fn test_materialization_failure_is_fail_notification() {
        let materializer = materializer(Err("disk full".to_string()));
        let transfer = RecordingTransfer {
            paths: Mutex::new(Vec::new()),
            failures: vec![],
        };

        let notification = orchestrator(Arc::clone(&materializer))
            .export(request(capture()), &transfer, &CancellationToken::new())
            .await
            .unwrap();

        assert!(!notification.is_success());
        assert_eq!(notification.text(), "Writer export failed");
        assert!(notification.error_text().unwrap().contains("disk full"));
        assert_eq!(materializer.calls.load(Ordering::SeqCst), 1);
        assert!(transfer.paths.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_cancelled_before_start_returns_none() {
        let materializer = materializer(Ok(PathBuf::from("/tmp/shot.png")));
        let transfer = RecordingTransfer {
            paths: Mutex::new(Vec::new()),
            failures: vec![],
        };
        let cancel = CancellationToken::new();
        cancel.cancel();

        let notification = orchestrator(Arc::clone(&materializer))
            .export(request(capture()), &transfer, &cancel)
            .await;

        assert!(notification.is_none());
        assert_eq!(materializer.calls.load(Ordering::SeqCst), 0);
        assert!(transfer.paths.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_retry_reuses_materialized_path() {
        let materializer = materializer(Ok(PathBuf::from("/tmp/shot.png")));
        let transfer = RecordingTransfer {
            paths: Mutex::new(Vec::new()),
            failures: vec!["busy"],
        };

        let notification = orchestrator(Arc::clone(&materializer))
            .export(request(capture()), &transfer, &CancellationToken::new())
            .await
            .unwrap();

        assert!(notification.is_success());
        assert_eq!(materializer.calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            *transfer.paths.lock().unwrap(),
            vec![PathBuf::from("/tmp/shot.png"), PathBuf::from("/tmp/shot.png")]
        );
    }
}
