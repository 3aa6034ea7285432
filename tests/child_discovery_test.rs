//! Integration tests for discovering the open documents of a document destination
//!
//! These tests verify that:
//! - Children are sorted by byte order of their names
//! - Each child shares the parent's designation and shows its document name
//! - Cancellation leaves the children cleared and not repopulated
//! - A second refresh replaces the first set entirely, even when it overlaps
//! - Enumeration failures are reported distinctly

use image::{DynamicImage, RgbaImage};
use shotport::adapters::destination::{Destination, ExportContext, RefreshOutcome};
use shotport::adapters::document::{DocumentAutomation, DocumentDestination, DocumentProfile};
use shotport::adapters::imaging::TempFileMaterializer;
use shotport::adapters::language::TemplateLanguage;
use shotport::core::export::{ExportOrchestrator, OutputSettings, RetryPolicy};
use shotport::core::PresentationContext;
use shotport::domain::{Capture, CaptureDetails, Designation, TransferError};
use std::collections::VecDeque;
use std::path::Path;
use std::sync::{Arc, Barrier, Mutex};
use std::time::Duration;
use tempfile::TempDir;
use tokio_util::sync::CancellationToken;

/// Automation returning scripted listings and recording inserts
#[derive(Default)]
struct FakeAutomation {
    listings: Mutex<VecDeque<std::result::Result<Vec<String>, TransferError>>>,
    inserts: Mutex<Vec<String>>,
}

impl FakeAutomation {
    fn with_listings(listings: Vec<std::result::Result<Vec<&str>, &str>>) -> Arc<Self> {
        let listings = listings
            .into_iter()
            .map(|listing| {
                listing
                    .map(|names| names.into_iter().map(str::to_string).collect())
                    .map_err(|message| TransferError::Automation(message.to_string()))
            })
            .collect();
        Arc::new(Self {
            listings: Mutex::new(listings),
            inserts: Mutex::new(Vec::new()),
        })
    }
}

impl DocumentAutomation for FakeAutomation {
    fn insert_into_existing_target(
        &self,
        target: &str,
        _file: &Path,
    ) -> std::result::Result<(), TransferError> {
        self.inserts.lock().unwrap().push(format!("existing:{target}"));
        Ok(())
    }

    fn insert_into_new_target(
        &self,
        _file: &Path,
        _template: Option<&str>,
        _style: Option<&str>,
    ) -> std::result::Result<(), TransferError> {
        self.inserts.lock().unwrap().push("new".to_string());
        Ok(())
    }

    fn list_live_target_names(&self) -> std::result::Result<Vec<String>, TransferError> {
        self.listings
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

/// Automation whose listing is produced by a closure, for timing-sensitive tests
struct HookedAutomation<F> {
    list: F,
}

impl<F> DocumentAutomation for HookedAutomation<F>
where
    F: Fn() -> Vec<String> + Send + Sync,
{
    fn insert_into_existing_target(
        &self,
        _target: &str,
        _file: &Path,
    ) -> std::result::Result<(), TransferError> {
        Ok(())
    }

    fn insert_into_new_target(
        &self,
        _file: &Path,
        _template: Option<&str>,
        _style: Option<&str>,
    ) -> std::result::Result<(), TransferError> {
        Ok(())
    }

    fn list_live_target_names(&self) -> std::result::Result<Vec<String>, TransferError> {
        Ok((self.list)())
    }
}

fn hooked<F>(list: F) -> Arc<HookedAutomation<F>>
where
    F: Fn() -> Vec<String> + Send + Sync + 'static,
{
    Arc::new(HookedAutomation { list })
}

fn writer(automation: Arc<dyn DocumentAutomation>, dir: &Path) -> DocumentDestination {
    let profile = DocumentProfile {
        designation: Designation::new("Writer").unwrap(),
        automation,
        orchestrator: ExportOrchestrator::new(
            Arc::new(TempFileMaterializer::new(dir, "{id}")),
            RetryPolicy::transient_once(),
            Arc::new(TemplateLanguage::default()),
        ),
        output: OutputSettings::default(),
        template: None,
        style: None,
    };
    let destination = DocumentDestination::new(profile);
    destination.initialize();
    destination
}

fn context() -> ExportContext {
    ExportContext::new(PresentationContext::spawn())
}

fn names(destination: &DocumentDestination) -> Vec<String> {
    destination
        .children()
        .iter()
        .map(|child| child.display_text())
        .collect()
}

#[tokio::test]
async fn test_children_sorted_by_byte_order() {
    let dir = TempDir::new().unwrap();
    let automation = FakeAutomation::with_listings(vec![Ok(vec!["Report", "analysis", "Budget"])]);
    let writer = writer(automation, dir.path());

    let outcome = writer.refresh(&context(), CancellationToken::new()).await;

    assert_eq!(outcome, RefreshOutcome::Refreshed(3));
    assert_eq!(names(&writer), vec!["Budget", "Report", "analysis"]);
}

#[tokio::test]
async fn test_children_share_parent_designation() {
    let dir = TempDir::new().unwrap();
    let automation = FakeAutomation::with_listings(vec![Ok(vec!["Report", "analysis"])]);
    let writer = writer(automation, dir.path());

    writer.refresh(&context(), CancellationToken::new()).await;

    for child in writer.children() {
        assert_eq!(child.designation(), writer.designation());
        assert!(child.children().is_empty());
    }
    assert_eq!(writer.display_text(), "Export to Writer");
}

#[tokio::test]
async fn test_child_exports_into_its_document() {
    let dir = TempDir::new().unwrap();
    let automation = FakeAutomation::with_listings(vec![Ok(vec!["Report"])]);
    let writer = writer(automation.clone(), dir.path());
    let ctx = context();

    writer.refresh(&ctx, CancellationToken::new()).await;
    let report = writer.children().into_iter().next().unwrap();

    let capture = Arc::new(Capture::new(
        DynamicImage::ImageRgba8(RgbaImage::new(2, 2)),
        CaptureDetails::new("shot"),
    ));
    let notification = report
        .export(&ctx, capture.clone(), CancellationToken::new())
        .await
        .unwrap();
    assert!(notification.is_success());
    assert_eq!(notification.text(), "Exported to Writer");

    writer
        .export(&ctx, capture, CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(
        *automation.inserts.lock().unwrap(),
        vec!["existing:Report".to_string(), "new".to_string()]
    );
}

#[tokio::test]
async fn test_cancelled_refresh_does_not_populate() {
    let dir = TempDir::new().unwrap();
    let automation = FakeAutomation::with_listings(vec![
        Ok(vec!["Report"]),
        Ok(vec!["Budget", "Minutes"]),
    ]);
    let writer = writer(automation, dir.path());
    let ctx = context();

    writer.refresh(&ctx, CancellationToken::new()).await;
    assert_eq!(names(&writer), vec!["Report"]);

    let cancel = CancellationToken::new();
    cancel.cancel();
    let outcome = writer.refresh(&ctx, cancel).await;

    assert_eq!(outcome, RefreshOutcome::Cancelled);
    assert!(writer.children().is_empty());
}

#[tokio::test]
async fn test_sequential_refreshes_keep_only_latest_set() {
    let dir = TempDir::new().unwrap();
    let automation = FakeAutomation::with_listings(vec![
        Ok(vec!["Report", "analysis", "Budget"]),
        Ok(vec!["Minutes", "Agenda"]),
    ]);
    let writer = writer(automation, dir.path());
    let ctx = context();

    writer.refresh(&ctx, CancellationToken::new()).await;
    let outcome = writer.refresh(&ctx, CancellationToken::new()).await;

    assert_eq!(outcome, RefreshOutcome::Refreshed(2));
    assert_eq!(names(&writer), vec!["Agenda", "Minutes"]);
}

#[tokio::test]
async fn test_discovery_failure_is_reported() {
    let dir = TempDir::new().unwrap();
    let automation = FakeAutomation::with_listings(vec![
        Ok(vec!["Report"]),
        Err("application not responding"),
    ]);
    let writer = writer(automation, dir.path());
    let ctx = context();

    writer.refresh(&ctx, CancellationToken::new()).await;
    let outcome = writer.refresh(&ctx, CancellationToken::new()).await;

    assert_eq!(
        outcome,
        RefreshOutcome::DiscoveryFailed("application not responding".to_string())
    );
    assert!(writer.children().is_empty());
}

#[tokio::test]
async fn test_no_open_documents() {
    let dir = TempDir::new().unwrap();
    let automation = FakeAutomation::with_listings(vec![Ok(vec![])]);
    let writer = writer(automation, dir.path());

    let outcome = writer.refresh(&context(), CancellationToken::new()).await;

    assert_eq!(outcome, RefreshOutcome::Refreshed(0));
    assert!(writer.children().is_empty());
}

#[tokio::test]
async fn test_leaf_refresh_is_unsupported() {
    let dir = TempDir::new().unwrap();
    let automation = FakeAutomation::with_listings(vec![Ok(vec!["Report"])]);
    let writer = writer(automation, dir.path());
    let ctx = context();

    writer.refresh(&ctx, CancellationToken::new()).await;
    let leaf = writer.children().into_iter().next().unwrap();

    assert_eq!(
        leaf.refresh(&ctx, CancellationToken::new()).await,
        RefreshOutcome::Unsupported
    );
}

#[tokio::test]
async fn test_refresh_after_presentation_shutdown_fails() {
    let dir = TempDir::new().unwrap();
    let automation = FakeAutomation::with_listings(vec![Ok(vec!["Report"])]);
    let writer = writer(automation, dir.path());
    let ctx = context();
    ctx.presentation.shutdown();

    let outcome = writer.refresh(&ctx, CancellationToken::new()).await;

    assert!(outcome.is_failure());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_overlapping_refreshes_keep_one_complete_set() {
    let dir = TempDir::new().unwrap();
    let listings = Mutex::new(VecDeque::from([
        vec!["b".to_string(), "A".to_string()],
        vec!["D".to_string(), "C".to_string()],
    ]));
    // Both refreshes have cleared and are enumerating before either installs
    let gate = Barrier::new(2);
    let automation = hooked(move || {
        let names = listings.lock().unwrap().pop_front().unwrap_or_default();
        gate.wait();
        names
    });
    let writer = writer(automation, dir.path());
    let ctx = context();

    let (first, second) = tokio::join!(
        writer.refresh(&ctx, CancellationToken::new()),
        writer.refresh(&ctx, CancellationToken::new()),
    );

    assert_eq!(first, RefreshOutcome::Refreshed(2));
    assert_eq!(second, RefreshOutcome::Refreshed(2));
    let children = names(&writer);
    assert!(
        children == ["A", "b"] || children == ["C", "D"],
        "expected exactly one sorted set, got {children:?}"
    );
}

#[tokio::test]
async fn test_cancel_during_enumeration_installs_nothing() {
    let dir = TempDir::new().unwrap();
    let automation = hooked(|| {
        std::thread::sleep(Duration::from_millis(200));
        vec!["Report".to_string()]
    });
    let writer = writer(automation, dir.path());
    let ctx = context();

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        trigger.cancel();
    });

    let outcome = writer.refresh(&ctx, cancel).await;
    assert_eq!(outcome, RefreshOutcome::Cancelled);

    // The listing finishes in the background; its result must be discarded
    tokio::time::sleep(Duration::from_millis(300)).await;
    assert!(writer.children().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_cancel_before_install_installs_nothing() {
    let dir = TempDir::new().unwrap();
    let ctx = context();
    let cancel = CancellationToken::new();

    // Enumeration completes uncancelled, but a presentation job queued ahead
    // of the install cancels the refresh before the install runs
    let handle = tokio::runtime::Handle::current();
    let presentation = ctx.presentation.clone();
    let trigger = cancel.clone();
    let automation = hooked(move || {
        let presentation = presentation.clone();
        let trigger = trigger.clone();
        handle.spawn(async move {
            presentation
                .run(move |_| {
                    std::thread::sleep(Duration::from_millis(300));
                    trigger.cancel();
                })
                .await
        });
        std::thread::sleep(Duration::from_millis(50));
        vec!["Report".to_string()]
    });
    let writer = writer(automation, dir.path());

    let outcome = writer.refresh(&ctx, cancel.clone()).await;

    assert_eq!(outcome, RefreshOutcome::Cancelled);
    assert!(cancel.is_cancelled());
    assert!(writer.children().is_empty());
}
