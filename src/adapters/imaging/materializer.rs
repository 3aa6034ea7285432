//! Temporary payload files
//!
//! Writes a capture to a fresh file so it can be handed to a destination.

use crate::config::OutputConfig;
use crate::core::export::payload::{ImageFormat, OutputSettings};
use crate::domain::{Capture, Result, ShotportError};
use image::codecs::jpeg::JpegEncoder;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Default file name pattern for temporary payloads
pub const DEFAULT_FILENAME_PATTERN: &str = "{title}_{timestamp}_{id}";

const MAX_TITLE_LEN: usize = 64;

/// Writes a capture to a temporary file in an accepted raster format
///
/// Called off the presentation context; implementations may block.
pub trait CaptureMaterializer: Send + Sync {
    /// Saves `capture` and returns the path of the new file
    ///
    /// # Errors
    ///
    /// Returns a materialization error if encoding or writing fails.
    fn save_temporary_file(&self, capture: &Capture, settings: &OutputSettings)
        -> Result<PathBuf>;
}

/// Materializer writing into a directory with a configurable file name
#[derive(Debug, Clone)]
pub struct TempFileMaterializer {
    directory: PathBuf,
    filename_pattern: String,
}

impl TempFileMaterializer {
    pub fn new(directory: impl Into<PathBuf>, filename_pattern: impl Into<String>) -> Self {
        Self {
            directory: directory.into(),
            filename_pattern: filename_pattern.into(),
        }
    }

    /// Builds the materializer from the `[output]` section
    ///
    /// Falls back to the system temporary directory when `temp_dir` is unset.
    pub fn from_config(config: &OutputConfig) -> Self {
        let directory = config
            .temp_dir
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(std::env::temp_dir);
        Self::new(directory, config.filename_pattern.clone())
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn file_name(&self, capture: &Capture, format: ImageFormat) -> String {
        let stem = self
            .filename_pattern
            .replace("{title}", &sanitize_title(capture.title()))
            .replace(
                "{timestamp}",
                &capture
                    .details()
                    .captured_at
                    .format("%Y-%m-%d_%H-%M-%S")
                    .to_string(),
            )
            .replace("{id}", &Uuid::new_v4().simple().to_string());
        format!("{stem}.{}", format.extension())
    }
}

impl Default for TempFileMaterializer {
    fn default() -> Self {
        Self::new(std::env::temp_dir(), DEFAULT_FILENAME_PATTERN)
    }
}

impl CaptureMaterializer for TempFileMaterializer {
    fn save_temporary_file(
        &self,
        capture: &Capture,
        settings: &OutputSettings,
    ) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.directory).map_err(|e| {
            ShotportError::Materialization(format!(
                "Failed to create directory {}: {e}",
                self.directory.display()
            ))
        })?;

        let path = self.directory.join(self.file_name(capture, settings.format));
        let image = capture.image();

        match settings.format {
            // JPEG has no alpha channel
            ImageFormat::Jpeg => {
                let rgb = image.to_rgb8();
                let file = File::create(&path).map_err(|e| {
                    ShotportError::Materialization(format!(
                        "Failed to create {}: {e}",
                        path.display()
                    ))
                })?;
                let mut writer = BufWriter::new(file);
                JpegEncoder::new_with_quality(&mut writer, settings.jpeg_quality)
                    .encode_image(&rgb)
                    .map_err(|e| {
                        ShotportError::Materialization(format!("Failed to encode JPEG: {e}"))
                    })?;
                writer.flush()?;
            }
            _ => {
                image
                    .to_rgba8()
                    .save_with_format(&path, settings.format.image_format())?;
            }
        }

        tracing::debug!(path = %path.display(), format = settings.format.extension(), "Capture materialized");
        Ok(path)
    }
}

/// Makes a capture title safe to use in a file name
pub fn sanitize_title(title: &str) -> String {
    let sanitized: String = title
        .trim()
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .take(MAX_TITLE_LEN)
        .collect();

    let sanitized = sanitized.trim_matches('_');
    if sanitized.is_empty() {
        "capture".to_string()
    } else {
        sanitized.to_string()
    }
}
