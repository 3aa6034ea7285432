//! Destination contract
//!
//! This module defines the trait every export target implements, so the
//! registry, the CLI and child discovery can work over any kind of target.

use crate::core::presentation::PresentationContext;
use crate::domain::{Capture, Designation, Icon, Notification};
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Context passed to export and refresh operations
#[derive(Debug, Clone)]
pub struct ExportContext {
    /// Where presentation state (child lists) is mutated
    pub presentation: PresentationContext,
}

impl ExportContext {
    pub fn new(presentation: PresentationContext) -> Self {
        Self { presentation }
    }
}

/// Outcome of refreshing a destination's children
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Children replaced by this many live sub-targets (possibly zero)
    Refreshed(usize),

    /// The refresh was cancelled; children were cleared but not repopulated
    Cancelled,

    /// The destination has no dynamic children
    Unsupported,

    /// Enumerating live sub-targets failed; children are empty
    DiscoveryFailed(String),
}

impl RefreshOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, RefreshOutcome::DiscoveryFailed(_))
    }
}

impl fmt::Display for RefreshOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RefreshOutcome::Refreshed(count) => write!(f, "{count} live target(s)"),
            RefreshOutcome::Cancelled => write!(f, "cancelled"),
            RefreshOutcome::Unsupported => write!(f, "no live targets supported"),
            RefreshOutcome::DiscoveryFailed(message) => write!(f, "discovery failed: {message}"),
        }
    }
}

/// An export target
///
/// Implementations bind their export behavior in [`Destination::initialize`];
/// [`Destination::export`] runs exactly that binding and never fails past its
/// boundary. Failures become Fail notifications, cancellation yields `None`.
#[async_trait]
pub trait Destination: Send + Sync {
    /// Stable identifier of the destination kind
    fn designation(&self) -> &Designation;

    /// Label shown to the user
    fn display_text(&self) -> String;

    fn icon(&self) -> Icon;

    /// One-time setup before first use
    ///
    /// Populates display metadata and binds the export behavior. Calling it
    /// again has no effect.
    fn initialize(&self);

    /// Exports `capture` to this destination
    ///
    /// Returns `None` only when `cancel` fired before the export completed.
    async fn export(
        &self,
        ctx: &ExportContext,
        capture: Arc<Capture>,
        cancel: CancellationToken,
    ) -> Option<Notification>;

    /// Current child destinations, in presentation order
    fn children(&self) -> Vec<Arc<dyn Destination>> {
        Vec::new()
    }

    /// Replaces the children with the current live sub-targets
    async fn refresh(&self, _ctx: &ExportContext, _cancel: CancellationToken) -> RefreshOutcome {
        RefreshOutcome::Unsupported
    }
}
