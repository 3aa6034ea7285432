//! Export pipeline
//!
//! This module provides the export logic shared by every destination:
//! - Payload selection and output settings
//! - The retry policy for transfers
//! - The transfer capability destinations implement
//! - The orchestrator turning one export into one notification

pub mod orchestrator;
pub mod payload;
pub mod retry;
pub mod transfer;

pub use orchestrator::{ExportOrchestrator, ExportRequest};
pub use payload::{ImageFormat, OutputSettings, PayloadSource};
pub use retry::RetryPolicy;
pub use transfer::{Transfer, TransferReceipt};
