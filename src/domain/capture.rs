//! Captured image plus metadata
//!
//! A [`Capture`] is owned by the caller. The export pipeline only reads it, or
//! writes a derived temporary file from it; it never mutates the capture.

use crate::domain::{Result, ShotportError};
use chrono::{DateTime, Utc};
use image::{DynamicImage, ImageError};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Descriptive metadata of a capture
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureDetails {
    /// Title of the capture (window title, user supplied name, ...)
    pub title: String,

    /// File the capture is already persisted to, if any
    pub filename: Option<PathBuf>,

    /// When the image was captured
    pub captured_at: DateTime<Utc>,
}

impl CaptureDetails {
    /// Creates details for a capture taken now and not yet saved
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            filename: None,
            captured_at: Utc::now(),
        }
    }

    /// Sets the capture time
    pub fn with_captured_at(mut self, captured_at: DateTime<Utc>) -> Self {
        self.captured_at = captured_at;
        self
    }
}

/// An in-memory image plus metadata to be exported
#[derive(Debug, Clone)]
pub struct Capture {
    details: CaptureDetails,
    image: Arc<DynamicImage>,
    modified: bool,
}

impl Capture {
    /// Creates a capture from an in-memory image
    pub fn new(image: DynamicImage, details: CaptureDetails) -> Self {
        Self {
            details,
            image: Arc::new(image),
            modified: false,
        }
    }

    /// Loads an image file as an unmodified capture backed by that file
    ///
    /// The file stem becomes the title.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be read and `Validation` if it is not
    /// a decodable image.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let image = image::open(path).map_err(|e| match e {
            ImageError::IoError(io) => {
                ShotportError::Io(format!("Cannot read {}: {io}", path.display()))
            }
            other => ShotportError::Validation(format!(
                "{} is not a supported image: {other}",
                path.display()
            )),
        })?;
        let title = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("capture")
            .to_string();

        Ok(Self::new(image, CaptureDetails::new(title)).with_filename(path))
    }

    /// Records the file the capture is persisted to
    pub fn with_filename(mut self, filename: impl Into<PathBuf>) -> Self {
        self.details.filename = Some(filename.into());
        self
    }

    /// Flags the capture as edited after it was persisted
    pub fn mark_modified(mut self) -> Self {
        self.modified = true;
        self
    }

    /// Returns the capture metadata
    pub fn details(&self) -> &CaptureDetails {
        &self.details
    }

    /// Returns the capture title
    pub fn title(&self) -> &str {
        &self.details.title
    }

    /// Returns the backing file, if the capture was persisted
    pub fn filename(&self) -> Option<&Path> {
        self.details.filename.as_deref()
    }

    /// Returns whether the image has unsaved edits
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Returns the image
    pub fn image(&self) -> &DynamicImage {
        &self.image
    }
}
