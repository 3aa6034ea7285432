//! Configuration schema types
//!
//! This module defines the configuration structure for Shotport.

use crate::config::SecretString;
use crate::core::export::payload::ImageFormat;
use crate::domain::Designation;
use serde::{Deserialize, Serialize};

/// Main Shotport configuration
///
/// This is the root configuration structure that maps to the TOML file.
/// Every section is optional; destinations without a section are not offered.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShotportConfig {
    /// Application-level settings
    #[serde(default)]
    pub application: ApplicationConfig,

    /// How temporary payload files are written
    #[serde(default)]
    pub output: OutputConfig,

    /// Export pipeline settings
    #[serde(default)]
    pub export: ExportConfig,

    /// Document application destination
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub document: Option<DocumentConfig>,

    /// Image hosting destination
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hosting: Option<HostingConfig>,

    /// Message templates
    #[serde(default)]
    pub language: LanguageConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ShotportConfig {
    /// Validates the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid
    pub fn validate(&self) -> Result<(), String> {
        self.application.validate()?;
        self.output.validate()?;
        self.export.validate()?;

        if let Some(ref document) = self.document {
            document.validate()?;
        }
        if let Some(ref hosting) = self.hosting {
            hosting.validate()?;
        }

        if let (Some(document), Some(hosting)) = (&self.document, &self.hosting) {
            if document.designation.trim() == hosting.designation.trim() {
                return Err(format!(
                    "document and hosting destinations share the designation '{}'",
                    document.designation
                ));
            }
        }

        self.language.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Application-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl ApplicationConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.log_level.as_str()) {
            return Err(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.log_level,
                valid_levels.join(", ")
            ));
        }
        Ok(())
    }
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Temporary payload file settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Format used when a capture has to be written out (png, jpg, gif, tiff, bmp)
    #[serde(default = "default_output_format")]
    pub format: String,

    /// JPEG quality (1-100)
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,

    /// Directory for temporary payload files (system temp dir when unset)
    #[serde(default)]
    pub temp_dir: Option<String>,

    /// File name pattern; supports {title}, {timestamp} and {id}
    #[serde(default = "default_filename_pattern")]
    pub filename_pattern: String,
}

impl OutputConfig {
    fn validate(&self) -> Result<(), String> {
        validate_format("output.format", &self.format)?;
        validate_jpeg_quality("output.jpeg_quality", self.jpeg_quality)?;

        if !self.filename_pattern.contains("{id}") {
            return Err(
                "output.filename_pattern must contain {id} so temporary files never collide"
                    .to_string(),
            );
        }
        if self.filename_pattern.contains(['/', '\\']) {
            return Err("output.filename_pattern must not contain path separators".to_string());
        }
        Ok(())
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_output_format(),
            jpeg_quality: default_jpeg_quality(),
            temp_dir: None,
            filename_pattern: default_filename_pattern(),
        }
    }
}

/// Export pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Extra attempts after a failed transfer
    #[serde(default = "default_retries")]
    pub retries: usize,

    /// Delay between attempts in milliseconds (0 = retry immediately)
    #[serde(default)]
    pub retry_backoff_ms: u64,
}

impl ExportConfig {
    fn validate(&self) -> Result<(), String> {
        if self.retries > 5 {
            return Err("export.retries must be <= 5".to_string());
        }
        if self.retry_backoff_ms > 60_000 {
            return Err("export.retry_backoff_ms must be <= 60000".to_string());
        }
        Ok(())
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            retries: default_retries(),
            retry_backoff_ms: 0,
        }
    }
}

/// Document application destination
///
/// The application is driven through external commands. Placeholders:
/// `{file}` (payload path), `{target}` (live document name),
/// `{template}` and `{style}` (optional; arguments using them are dropped
/// when the value is unset).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentConfig {
    /// Offer this destination at all
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Designation of the destination
    #[serde(default = "default_document_designation")]
    pub designation: String,

    /// Executable whose presence marks the application as installed
    pub executable: String,

    /// Prints one open document name per line
    pub list_command: Vec<String>,

    /// Inserts `{file}` into the open document `{target}`
    pub insert_existing_command: Vec<String>,

    /// Creates a new document containing `{file}`
    pub insert_new_command: Vec<String>,

    /// Template used for new documents
    #[serde(default)]
    pub template: Option<String>,

    /// Style applied to the inserted image in new documents
    #[serde(default)]
    pub style: Option<String>,
}

impl DocumentConfig {
    fn validate(&self) -> Result<(), String> {
        Designation::new(self.designation.as_str())
            .map_err(|e| format!("document.designation: {e}"))?;

        if self.executable.trim().is_empty() {
            return Err("document.executable cannot be empty".to_string());
        }

        if self.list_command.is_empty() {
            return Err("document.list_command cannot be empty".to_string());
        }

        require_placeholders(
            "document.insert_existing_command",
            &self.insert_existing_command,
            &["{file}", "{target}"],
        )?;
        require_placeholders(
            "document.insert_new_command",
            &self.insert_new_command,
            &["{file}"],
        )?;
        Ok(())
    }
}

/// Image hosting destination
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostingConfig {
    /// Offer this destination at all
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Designation of the destination
    #[serde(default = "default_hosting_designation")]
    pub designation: String,

    /// Upload endpoint
    #[serde(default = "default_upload_url")]
    pub upload_url: String,

    /// Base of the human-facing page link (`<page_base_url>/<id>`)
    #[serde(default = "default_page_base_url")]
    pub page_base_url: String,

    /// API client id
    /// Stored securely in memory and automatically zeroized on drop
    pub client_id: SecretString,

    /// Format used when the capture has to be written out for upload
    #[serde(default = "default_output_format")]
    pub upload_format: String,

    /// JPEG quality for uploads (1-100)
    #[serde(default = "default_jpeg_quality")]
    pub upload_jpeg_quality: u8,

    /// Report the page link instead of the direct image link
    #[serde(default)]
    pub use_page_link: bool,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl HostingConfig {
    fn validate(&self) -> Result<(), String> {
        use secrecy::ExposeSecret;

        Designation::new(self.designation.as_str())
            .map_err(|e| format!("hosting.designation: {e}"))?;

        validate_url("hosting.upload_url", &self.upload_url)?;
        validate_url("hosting.page_base_url", &self.page_base_url)?;

        if self.client_id.expose_secret().is_empty() {
            return Err("hosting.client_id cannot be empty".to_string());
        }

        validate_format("hosting.upload_format", &self.upload_format)?;
        validate_jpeg_quality("hosting.upload_jpeg_quality", self.upload_jpeg_quality)?;

        if self.timeout_seconds == 0 || self.timeout_seconds > 600 {
            return Err("hosting.timeout_seconds must be between 1 and 600".to_string());
        }
        Ok(())
    }
}

/// Message templates; `{destination}` is replaced by the designation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageConfig {
    /// Label of a container destination
    #[serde(default = "default_export_to")]
    pub export_to: String,

    /// Success message
    #[serde(default = "default_exported_to")]
    pub exported_to: String,

    /// Failure message
    #[serde(default = "default_export_failed")]
    pub export_failed: String,

    /// Label of an upload destination
    #[serde(default = "default_upload_to")]
    pub upload_to: String,
}

impl LanguageConfig {
    fn validate(&self) -> Result<(), String> {
        for (key, value) in [
            ("export_to", &self.export_to),
            ("exported_to", &self.exported_to),
            ("export_failed", &self.export_failed),
            ("upload_to", &self.upload_to),
        ] {
            if value.trim().is_empty() {
                return Err(format!("language.{key} cannot be empty"));
            }
        }
        Ok(())
    }
}

impl Default for LanguageConfig {
    fn default() -> Self {
        Self {
            export_to: default_export_to(),
            exported_to: default_exported_to(),
            export_failed: default_export_failed(),
            upload_to: default_upload_to(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable local file logging
    #[serde(default)]
    pub local_enabled: bool,

    /// Local log file path
    #[serde(default = "default_local_path")]
    pub local_path: String,

    /// Log rotation strategy
    #[serde(default = "default_local_rotation")]
    pub local_rotation: String,
}

impl LoggingConfig {
    fn validate(&self) -> Result<(), String> {
        let valid_rotations = ["daily", "hourly", "never"];
        if !valid_rotations.contains(&self.local_rotation.as_str()) {
            return Err(format!(
                "Invalid logging.local_rotation '{}'. Must be one of: {}",
                self.local_rotation,
                valid_rotations.join(", ")
            ));
        }

        if self.local_enabled && self.local_path.trim().is_empty() {
            return Err("logging.local_path cannot be empty when local logging is enabled".to_string());
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            local_enabled: false,
            local_path: default_local_path(),
            local_rotation: default_local_rotation(),
        }
    }
}

fn validate_format(key: &str, format: &str) -> Result<(), String> {
    if ImageFormat::from_extension(format).is_none() {
        return Err(format!(
            "Invalid {key} '{format}'. Must be one of: png, jpg, jpeg, gif, tiff, bmp"
        ));
    }
    Ok(())
}

fn validate_jpeg_quality(key: &str, quality: u8) -> Result<(), String> {
    if !(1..=100).contains(&quality) {
        return Err(format!("{key} must be between 1 and 100"));
    }
    Ok(())
}

fn validate_url(key: &str, value: &str) -> Result<(), String> {
    let url = url::Url::parse(value).map_err(|e| format!("Invalid {key} '{value}': {e}"))?;
    if url.scheme() != "https" && url.scheme() != "http" {
        return Err(format!("{key} must use http or https"));
    }
    Ok(())
}

fn require_placeholders(key: &str, command: &[String], placeholders: &[&str]) -> Result<(), String> {
    if command.is_empty() {
        return Err(format!("{key} cannot be empty"));
    }
    for placeholder in placeholders {
        if !command.iter().any(|arg| arg.contains(placeholder)) {
            return Err(format!("{key} must reference {placeholder}"));
        }
    }
    Ok(())
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_output_format() -> String {
    "png".to_string()
}

fn default_jpeg_quality() -> u8 {
    80
}

fn default_filename_pattern() -> String {
    "{title}_{timestamp}_{id}".to_string()
}

fn default_retries() -> usize {
    1
}

fn default_document_designation() -> String {
    "Writer".to_string()
}

fn default_hosting_designation() -> String {
    "Imgur".to_string()
}

fn default_upload_url() -> String {
    "https://api.imgur.com/3/image".to_string()
}

fn default_page_base_url() -> String {
    "https://imgur.com".to_string()
}

fn default_timeout_seconds() -> u64 {
    30
}

fn default_export_to() -> String {
    "Export to {destination}".to_string()
}

fn default_exported_to() -> String {
    "Exported to {destination}".to_string()
}

fn default_export_failed() -> String {
    "{destination} export failed".to_string()
}

fn default_upload_to() -> String {
    "Upload to {destination}".to_string()
}

fn default_local_path() -> String {
    "./logs".to_string()
}

fn default_local_rotation() -> String {
    "daily".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::secret_string;

    fn document_config() -> DocumentConfig {
        DocumentConfig {
            enabled: true,
            designation: "Writer".to_string(),
            executable: "soffice".to_string(),
            list_command: vec!["doc-bridge".to_string(), "list".to_string()],
            insert_existing_command: vec![
                "doc-bridge".to_string(),
                "insert".to_string(),
                "{target}".to_string(),
                "{file}".to_string(),
            ],
            insert_new_command: vec!["doc-bridge".to_string(), "new".to_string(), "{file}".to_string()],
            template: None,
            style: None,
        }
    }

    fn hosting_config() -> HostingConfig {
        HostingConfig {
            enabled: true,
            designation: default_hosting_designation(),
            upload_url: default_upload_url(),
            page_base_url: default_page_base_url(),
            client_id: secret_string("client-123".to_string()),
            upload_format: "png".to_string(),
            upload_jpeg_quality: 80,
            use_page_link: false,
            timeout_seconds: 30,
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = ShotportConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.document.is_none());
        assert!(config.hosting.is_none());
    }

    #[test]
    fn test_application_config_validation() {
        let mut config = ApplicationConfig::default();
        assert!(config.validate().is_ok());

        config.log_level = "invalid".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_output_config_validation() {
        let mut config = OutputConfig::default();
        assert!(config.validate().is_ok());

        config.format = "webp".to_string();
        assert!(config.validate().is_err());

        config.format = "jpeg".to_string();
        config.jpeg_quality = 0;
        assert!(config.validate().is_err());

        config.jpeg_quality = 90;
        config.filename_pattern = "{title}".to_string();
        assert!(config.validate().is_err());

        config.filename_pattern = "shots/{id}".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_export_config_validation() {
        let mut config = ExportConfig::default();
        assert_eq!(config.retries, 1);
        assert_eq!(config.retry_backoff_ms, 0);
        assert!(config.validate().is_ok());

        config.retries = 6;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_document_config_validation() {
        let mut config = document_config();
        assert!(config.validate().is_ok());

        config.insert_existing_command = vec!["doc-bridge".to_string(), "{file}".to_string()];
        let err = config.validate().unwrap_err();
        assert!(err.contains("{target}"));

        config = document_config();
        config.list_command.clear();
        assert!(config.validate().is_err());

        config = document_config();
        config.designation = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_hosting_config_validation() {
        let mut config = hosting_config();
        assert!(config.validate().is_ok());

        config.upload_url = "not a url".to_string();
        assert!(config.validate().is_err());

        config = hosting_config();
        config.upload_url = "ftp://example.com/upload".to_string();
        assert!(config.validate().is_err());

        config = hosting_config();
        config.client_id = secret_string(String::new());
        assert!(config.validate().is_err());

        config = hosting_config();
        config.timeout_seconds = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_duplicate_designations_rejected() {
        let mut hosting = hosting_config();
        hosting.designation = "Writer".to_string();
        let config = ShotportConfig {
            document: Some(document_config()),
            hosting: Some(hosting),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_logging_config_validation() {
        let mut config = LoggingConfig::default();
        assert!(!config.local_enabled);
        assert!(config.validate().is_ok());

        config.local_rotation = "weekly".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_values() {
        assert_eq!(default_log_level(), "info");
        assert_eq!(default_exported_to(), "Exported to {destination}");
        assert_eq!(default_export_failed(), "{destination} export failed");
        assert_eq!(default_filename_pattern(), "{title}_{timestamp}_{id}");
    }

    #[test]
    fn test_parse_minimal_toml() {
        let config: ShotportConfig = toml::from_str(
            r#"
[hosting]
client_id = "abc"
"#,
        )
        .unwrap();
        assert!(config.validate().is_ok());
        let hosting = config.hosting.unwrap();
        assert_eq!(hosting.designation, "Imgur");
        assert!(hosting.enabled);
        assert!(!hosting.use_page_link);
    }
}
