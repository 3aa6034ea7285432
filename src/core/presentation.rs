//! Presentation context
//!
//! State shown to the user (the child lists of container destinations) is
//! owned by one scheduling context. Work runs anywhere, but every mutation of
//! that state is submitted as a job to a single consumer task and applied
//! there, in submission order.
//!
//! Mutating methods take a [`PresentationScope`], which only exists inside a
//! job, so code running elsewhere cannot write presentation state.

use crate::adapters::destination::Destination;
use crate::domain::{Result, ShotportError};
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::{mpsc, oneshot};
use tokio_util::sync::CancellationToken;

const QUEUE_CAPACITY: usize = 256;

type Job = Box<dyn FnOnce(&PresentationScope) + Send + 'static>;

/// Proof that the current code runs on the presentation context
pub struct PresentationScope {
    _private: (),
}

/// Handle to the single-consumer presentation job queue
///
/// Cloning the handle shares the same queue.
#[derive(Clone)]
pub struct PresentationContext {
    sender: mpsc::Sender<Job>,
    shutdown: CancellationToken,
}

impl PresentationContext {
    /// Starts the consumer task on the current tokio runtime
    pub fn spawn() -> Self {
        let (sender, mut receiver) = mpsc::channel::<Job>(QUEUE_CAPACITY);
        let shutdown = CancellationToken::new();
        let token = shutdown.clone();

        tokio::spawn(async move {
            let scope = PresentationScope { _private: () };
            loop {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => break,
                    job = receiver.recv() => match job {
                        Some(job) => job(&scope),
                        None => break,
                    },
                }
            }
            tracing::debug!("Presentation context stopped");
        });

        Self { sender, shutdown }
    }

    /// Runs `job` on the presentation context and returns its result
    ///
    /// # Errors
    ///
    /// Returns a presentation error if the context has shut down before the
    /// job ran.
    pub async fn run<F, R>(&self, job: F) -> Result<R>
    where
        F: FnOnce(&PresentationScope) -> R + Send + 'static,
        R: Send + 'static,
    {
        let (reply, result) = oneshot::channel();
        let job: Job = Box::new(move |scope| {
            // The caller may have stopped waiting
            let _ = reply.send(job(scope));
        });

        self.sender.send(job).await.map_err(|_| {
            ShotportError::Presentation("Presentation context is shut down".to_string())
        })?;

        result.await.map_err(|_| {
            ShotportError::Presentation("Presentation job was dropped".to_string())
        })
    }

    /// Stops the consumer; queued jobs that have not started are dropped
    pub fn shutdown(&self) {
        self.shutdown.cancel();
    }

    pub fn is_shut_down(&self) -> bool {
        self.shutdown.is_cancelled() || self.sender.is_closed()
    }
}

impl fmt::Debug for PresentationContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PresentationContext")
            .field("shut_down", &self.is_shut_down())
            .finish()
    }
}

/// Ordered child destinations of a container destination
///
/// Readers take a snapshot and never observe a partly written list. Writes
/// swap in a whole new list and require a [`PresentationScope`].
#[derive(Clone, Default)]
pub struct ChildList {
    items: Arc<RwLock<Arc<Vec<Arc<dyn Destination>>>>>,
}

impl ChildList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current children, in presentation order
    pub fn snapshot(&self) -> Arc<Vec<Arc<dyn Destination>>> {
        let items = self.items.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&items)
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }

    /// Removes every child
    pub fn clear(&self, _scope: &PresentationScope) {
        self.swap(Vec::new());
    }

    /// Replaces the children with exactly `children`, keeping their order
    ///
    /// Overlapping refreshes each install their own complete list; the last
    /// one to run wins.
    pub fn replace(&self, _scope: &PresentationScope, children: Vec<Arc<dyn Destination>>) {
        self.swap(children);
    }

    fn swap(&self, next: Vec<Arc<dyn Destination>>) {
        let mut items = self.items.write().unwrap_or_else(PoisonError::into_inner);
        *items = Arc::new(next);
    }
}

impl fmt::Debug for ChildList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<String> = self
            .snapshot()
            .iter()
            .map(|child| child.display_text())
            .collect();
        f.debug_list().entries(names).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::document::{leaf_destination, CommandAutomation, DocumentProfile};
    use crate::adapters::imaging::TempFileMaterializer;
    use crate::adapters::language::TemplateLanguage;
    use crate::core::export::{ExportOrchestrator, OutputSettings, RetryPolicy};
    use crate::domain::Designation;
    use std::sync::Mutex;

    fn test_profile() -> DocumentProfile {
        DocumentProfile {
            designation: Designation::new("Writer").unwrap(),
            automation: Arc::new(CommandAutomation::new(Vec::new(), Vec::new(), Vec::new())),
            orchestrator: ExportOrchestrator::new(
                Arc::new(TempFileMaterializer::default()),
                RetryPolicy::transient_once(),
                Arc::new(TemplateLanguage::default()),
            ),
            output: OutputSettings::default(),
            template: None,
            style: None,
        }
    }

    #[tokio::test]
    async fn test_run_returns_job_result() {
        let context = PresentationContext::spawn();
        let value = context.run(|_| 21 * 2).await.unwrap();
        assert_eq!(value, 42);
    }

    #[tokio::test]
    async fn test_jobs_run_in_submission_order() {
        let context = PresentationContext::spawn();
        let seen = Arc::new(Mutex::new(Vec::new()));

        for i in 0..10 {
            let seen = Arc::clone(&seen);
            context
                .run(move |_| seen.lock().unwrap().push(i))
                .await
                .unwrap();
        }

        assert_eq!(*seen.lock().unwrap(), (0..10).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn test_run_after_shutdown_fails() {
        let context = PresentationContext::spawn();
        context.shutdown();
        assert!(context.is_shut_down());

        // Give the consumer a chance to observe the cancellation
        tokio::task::yield_now().await;
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;

        let result = context.run(|_| ()).await;
        assert!(matches!(result, Err(ShotportError::Presentation(_))));
    }

    #[tokio::test]
    async fn test_empty_child_list() {
        let children = ChildList::new();
        assert!(children.is_empty());
        assert_eq!(children.len(), 0);
        assert_eq!(format!("{children:?}"), "[]");

        let context = PresentationContext::spawn();
        let shared = children.clone();
        context.run(move |scope| shared.clear(scope)).await.unwrap();
        assert!(children.is_empty());
    }

    #[tokio::test]
    async fn test_replace_installs_exactly_the_given_children() {
        let context = PresentationContext::spawn();
        let profile = test_profile();
        let children = ChildList::new();

        for names in [vec!["Agenda", "Minutes"], vec!["Budget"]] {
            let leaves: Vec<Arc<dyn Destination>> = names
                .iter()
                .map(|name| leaf_destination(&profile, name))
                .collect();
            let shared = children.clone();
            context
                .run(move |scope| shared.replace(scope, leaves))
                .await
                .unwrap();
        }

        assert_eq!(format!("{children:?}"), r#"["Budget"]"#);
        assert_eq!(children.len(), 1);
    }
}
