//! Payload file selection
//!
//! Decides whether a capture's existing file can be handed to a destination
//! as-is, or whether the capture must first be written to a temporary file.

use crate::config::OutputConfig;
use crate::domain::{Capture, Result, ShotportError};
use std::path::{Path, PathBuf};

/// File suffixes a destination is known to accept.
///
/// Matched case-sensitively against the end of the file name.
pub const ACCEPTED_SUFFIXES: [&str; 6] = [".png", ".gif", ".jpg", ".jpeg", ".tiff", ".bmp"];

/// Raster formats a capture can be written in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ImageFormat {
    #[default]
    Png,
    Gif,
    Jpeg,
    Tiff,
    Bmp,
}

impl ImageFormat {
    /// File extension written for this format
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Gif => "gif",
            ImageFormat::Jpeg => "jpg",
            ImageFormat::Tiff => "tiff",
            ImageFormat::Bmp => "bmp",
        }
    }

    /// Parses a configured format name or extension
    pub fn from_extension(ext: &str) -> Option<ImageFormat> {
        match ext.trim().trim_start_matches('.').to_lowercase().as_str() {
            "png" => Some(ImageFormat::Png),
            "gif" => Some(ImageFormat::Gif),
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "tiff" => Some(ImageFormat::Tiff),
            "bmp" => Some(ImageFormat::Bmp),
            _ => None,
        }
    }

    pub(crate) fn image_format(self) -> image::ImageFormat {
        match self {
            ImageFormat::Png => image::ImageFormat::Png,
            ImageFormat::Gif => image::ImageFormat::Gif,
            ImageFormat::Jpeg => image::ImageFormat::Jpeg,
            ImageFormat::Tiff => image::ImageFormat::Tiff,
            ImageFormat::Bmp => image::ImageFormat::Bmp,
        }
    }
}

/// How a capture is written when it has to be materialized
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutputSettings {
    /// Encoding of the temporary file
    pub format: ImageFormat,

    /// JPEG quality (1-100), ignored by other formats
    pub jpeg_quality: u8,
}

impl OutputSettings {
    /// Creates settings for the given format
    pub fn new(format: ImageFormat, jpeg_quality: u8) -> Self {
        Self {
            format,
            jpeg_quality: jpeg_quality.clamp(1, 100),
        }
    }

    /// Builds settings from the `[output]` section
    ///
    /// # Errors
    ///
    /// Returns a configuration error for an unknown format.
    pub fn from_config(config: &OutputConfig) -> Result<Self> {
        Self::parse(&config.format, config.jpeg_quality)
    }

    /// Builds settings from a format name and quality
    ///
    /// # Errors
    ///
    /// Returns a configuration error for an unknown format.
    pub fn parse(format: &str, jpeg_quality: u8) -> Result<Self> {
        let format = ImageFormat::from_extension(format).ok_or_else(|| {
            ShotportError::Configuration(format!("Unsupported image format: {format}"))
        })?;
        Ok(Self::new(format, jpeg_quality))
    }
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self::new(ImageFormat::Png, 80)
    }
}

/// Where the payload handed to a destination comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PayloadSource {
    /// The capture's own file, unchanged since capture and in an accepted format
    Reuse(PathBuf),
    /// The capture must be written to a temporary file first
    Materialize,
}

impl PayloadSource {
    /// Decides the payload source for a capture
    pub fn decide(capture: &Capture) -> Self {
        match capture.filename() {
            Some(path) if !capture.is_modified() && has_accepted_suffix(path) => {
                PayloadSource::Reuse(path.to_path_buf())
            }
            _ => PayloadSource::Materialize,
        }
    }
}

/// Returns true if the file name ends in one of [`ACCEPTED_SUFFIXES`]
pub fn has_accepted_suffix(path: &Path) -> bool {
    let name = path.to_string_lossy();
    ACCEPTED_SUFFIXES
        .iter()
        .any(|suffix| name.ends_with(suffix))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CaptureDetails;
    use image::{DynamicImage, RgbaImage};
    use test_case::test_case;

    fn capture() -> Capture {
        Capture::new(
            DynamicImage::ImageRgba8(RgbaImage::new(2, 2)),
            CaptureDetails::new("shot"),
        )
    }

    #[test_case("shot.png", true ; "png")]
    #[test_case("shot.gif", true ; "gif")]
    #[test_case("shot.jpg", true ; "jpg")]
    #[test_case("shot.jpeg", true ; "jpeg")]
    #[test_case("shot.tiff", true ; "tiff")]
    #[test_case("shot.bmp", true ; "bmp")]
    #[test_case("shot.tif", false ; "short tiff")]
    #[test_case("shot.webp", false ; "webp")]
    #[test_case("shot.PNG", false ; "uppercase")]
    #[test_case("png", false ; "no dot")]
    fn test_accepted_suffix(name: &str, expected: bool) {
        assert_eq!(has_accepted_suffix(Path::new(name)), expected);
    }

    #[test]
    fn test_unsaved_capture_is_materialized() {
        assert_eq!(PayloadSource::decide(&capture()), PayloadSource::Materialize);
    }

    #[test]
    fn test_unmodified_png_is_reused() {
        let capture = capture().with_filename("/captures/shot.png");
        assert_eq!(
            PayloadSource::decide(&capture),
            PayloadSource::Reuse(PathBuf::from("/captures/shot.png"))
        );
    }

    #[test]
    fn test_modified_png_is_materialized() {
        let capture = capture().with_filename("/captures/shot.png").mark_modified();
        assert_eq!(PayloadSource::decide(&capture), PayloadSource::Materialize);
    }

    #[test]
    fn test_unknown_format_is_materialized() {
        let capture = capture().with_filename("/captures/shot.webp");
        assert_eq!(PayloadSource::decide(&capture), PayloadSource::Materialize);
    }

    #[test]
    fn test_image_format_from_extension() {
        assert_eq!(ImageFormat::from_extension("PNG"), Some(ImageFormat::Png));
        assert_eq!(ImageFormat::from_extension(".jpeg"), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::from_extension("jpg"), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::from_extension("webp"), None);
        assert_eq!(ImageFormat::Jpeg.extension(), "jpg");
    }

    #[test]
    fn test_output_settings_from_config() {
        let config = OutputConfig {
            format: "bmp".to_string(),
            ..Default::default()
        };
        let settings = OutputSettings::from_config(&config).unwrap();
        assert_eq!(settings.format, ImageFormat::Bmp);

        assert!(OutputSettings::parse("svg", 80).is_err());
        assert_eq!(OutputSettings::parse("jpg", 0).unwrap().jpeg_quality, 1);
    }
}
