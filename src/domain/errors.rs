//! Domain error types
//!
//! This module defines the error hierarchy for Shotport.
//! All errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main Shotport error type
///
/// This is the primary error type used throughout the library. Export and
/// refresh entry points never return it to their callers: failures there are
/// folded into a [`crate::domain::Notification`] or a
/// [`crate::adapters::destination::RefreshOutcome`].
#[derive(Debug, Error)]
pub enum ShotportError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The external target rejected or failed a transfer
    #[error("Transfer error: {0}")]
    Transfer(#[from] TransferError),

    /// Writing the capture to a temporary file failed
    #[error("Materialization error: {0}")]
    Materialization(String),

    /// The presentation context is gone or dropped a job
    #[error("Presentation context error: {0}")]
    Presentation(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Transfer-specific errors
///
/// Raised by a [`crate::core::export::Transfer`] implementation. The
/// `Automation` variant displays as the bare message reported by the target
/// application so it can be surfaced unchanged to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransferError {
    /// The target application's automation call failed
    #[error("{0}")]
    Automation(String),

    /// The HTTP request could not be sent or completed
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// The remote service answered with an error status
    #[error("Upload rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    /// The remote service answered with something we could not understand
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Reading the payload file failed
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<reqwest::Error> for TransferError {
    fn from(err: reqwest::Error) -> Self {
        if let Some(status) = err.status() {
            TransferError::Rejected {
                status: status.as_u16(),
                message: err.to_string(),
            }
        } else {
            TransferError::Http(err.to_string())
        }
    }
}

impl From<std::io::Error> for TransferError {
    fn from(err: std::io::Error) -> Self {
        TransferError::Io(err.to_string())
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for ShotportError {
    fn from(err: std::io::Error) -> Self {
        ShotportError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for ShotportError {
    fn from(err: serde_json::Error) -> Self {
        ShotportError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for ShotportError {
    fn from(err: toml::de::Error) -> Self {
        ShotportError::Configuration(format!("TOML parse error: {err}"))
    }
}

// Image errors reaching `?` come from encoding a payload file; `Capture::open`
// maps decoding failures of the input itself
impl From<image::ImageError> for ShotportError {
    fn from(err: image::ImageError) -> Self {
        ShotportError::Materialization(err.to_string())
    }
}
