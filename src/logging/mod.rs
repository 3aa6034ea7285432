//! Logging and observability
//!
//! Structured logging through `tracing`:
//! - Console output on stderr
//! - Optional JSON file output with rotation
//! - Level from configuration, overridable with `RUST_LOG`
//!
//! # Example
//!
//! ```no_run
//! use shotport::logging::init_logging;
//! use shotport::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{init_logging, LoggingGuard};

/// Log the start of an export
///
/// # Example
///
/// ```no_run
/// use shotport::log_export_start;
///
/// log_export_start!("Writer", "Quarterly report");
/// ```
#[macro_export]
macro_rules! log_export_start {
    ($designation:expr, $title:expr) => {
        tracing::info!(
            designation = %$designation,
            capture = %$title,
            "Starting export"
        );
    };
}

/// Log the outcome carried by a notification
///
/// # Example
///
/// ```no_run
/// use shotport::log_export_outcome;
/// use shotport::domain::{Designation, Notification};
///
/// let notification = Notification::success(Designation::new("Writer").unwrap(), "Exported to Writer");
/// log_export_outcome!(&notification);
/// ```
#[macro_export]
macro_rules! log_export_outcome {
    ($notification:expr) => {{
        let notification = &$notification;
        if notification.is_success() {
            tracing::info!(
                designation = %notification.source(),
                text = %notification.text(),
                "Export succeeded"
            );
        } else {
            tracing::warn!(
                designation = %notification.source(),
                text = %notification.text(),
                error = notification.error_text().unwrap_or_default(),
                "Export failed"
            );
        }
    }};
}

/// Log a retry attempt
///
/// # Example
///
/// ```no_run
/// use shotport::log_retry_attempt;
///
/// log_retry_attempt!(2, 2, "Document is busy");
/// ```
#[macro_export]
macro_rules! log_retry_attempt {
    ($attempt:expr, $max_attempts:expr, $reason:expr) => {
        tracing::warn!(
            attempt = $attempt,
            max_attempts = $max_attempts,
            reason = %$reason,
            "Retrying operation"
        );
    };
}
