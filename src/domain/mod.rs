//! Domain models and types for Shotport.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Identity** ([`Designation`], [`Icon`])
//! - **Input** ([`Capture`], [`CaptureDetails`])
//! - **Output** ([`Notification`], [`NotificationType`])
//! - **Error types** ([`ShotportError`], [`TransferError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! Fallible operations return [`Result<T, ShotportError>`]. The export and
//! refresh entry points are the exception: they never fail, and report
//! through a [`Notification`] instead.
//!
//! ```rust
//! use shotport::domain::{Designation, Notification};
//!
//! let source = Designation::new("Writer").unwrap();
//! let notification = Notification::fail(source, "Writer export failed", "document is locked");
//! assert_eq!(notification.error_text(), Some("document is locked"));
//! ```

pub mod capture;
pub mod errors;
pub mod ids;
pub mod notification;
pub mod result;

// Re-export commonly used types for convenience
pub use capture::{Capture, CaptureDetails};
pub use errors::{ShotportError, TransferError};
pub use ids::{Designation, Icon};
pub use notification::{Notification, NotificationSourceType, NotificationType};
pub use result::Result;
