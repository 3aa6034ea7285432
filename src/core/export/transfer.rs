//! Transfer capability
//!
//! The target-specific step of an export: hand a payload file to the external
//! target. Implementations are bound to one destination instance, so a leaf
//! document transfer already knows its target name.

use crate::domain::TransferError;
use async_trait::async_trait;
use std::path::Path;

/// What a successful transfer reports back
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransferReceipt {
    /// Where the payload can be found now, for targets that publish it
    pub link: Option<String>,
}

impl TransferReceipt {
    /// Receipt for a transfer that produced no link
    pub fn delivered() -> Self {
        Self::default()
    }

    /// Receipt carrying a link to the published payload
    pub fn with_link(link: impl Into<String>) -> Self {
        Self {
            link: Some(link.into()),
        }
    }
}

/// Delivers a payload file to an external target
///
/// Must be safe to call again after a failure; the orchestrator retries
/// failed transfers.
#[async_trait]
pub trait Transfer: Send + Sync {
    /// Transfers the file at `payload`
    ///
    /// # Errors
    ///
    /// Returns the target's failure. Its display text is what the user sees.
    async fn transfer(&self, payload: &Path) -> Result<TransferReceipt, TransferError>;
}
