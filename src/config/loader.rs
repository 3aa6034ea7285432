//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::ShotportConfig;
use crate::config::secret_string;
use crate::domain::errors::ShotportError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into ShotportConfig
/// 4. Applies environment variable overrides (SHOTPORT_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - A referenced environment variable is not set
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use shotport::config::loader::load_config;
///
/// let config = load_config("shotport.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<ShotportConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ShotportError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        ShotportError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_config(&contents)
}

/// Parses configuration from TOML text, applying substitution, overrides and validation
///
/// # Errors
///
/// Same as [`load_config`], minus the file access.
pub fn parse_config(contents: &str) -> Result<ShotportConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: ShotportConfig = toml::from_str(&contents)
        .map_err(|e| ShotportError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        ShotportError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error listing every referenced environment variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| ShotportError::Other(format!("Invalid substitution pattern: {e}")))?;
    let mut lines = Vec::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    processed_line = processed_line.replace(&format!("${{{var_name}}}"), &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        lines.push(processed_line);
    }

    if !missing_vars.is_empty() {
        return Err(ShotportError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(lines.join("\n"))
}

/// Applies environment variable overrides using SHOTPORT_* prefix
///
/// Environment variables follow the pattern: SHOTPORT_<SECTION>_<KEY>
/// For example: SHOTPORT_OUTPUT_FORMAT, SHOTPORT_HOSTING_CLIENT_ID
fn apply_env_overrides(config: &mut ShotportConfig) {
    if let Ok(val) = std::env::var("SHOTPORT_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Output overrides
    if let Ok(val) = std::env::var("SHOTPORT_OUTPUT_FORMAT") {
        config.output.format = val;
    }
    if let Ok(val) = std::env::var("SHOTPORT_OUTPUT_JPEG_QUALITY") {
        if let Ok(quality) = val.parse() {
            config.output.jpeg_quality = quality;
        }
    }
    if let Ok(val) = std::env::var("SHOTPORT_OUTPUT_TEMP_DIR") {
        config.output.temp_dir = Some(val);
    }

    // Export overrides
    if let Ok(val) = std::env::var("SHOTPORT_EXPORT_RETRIES") {
        if let Ok(retries) = val.parse() {
            config.export.retries = retries;
        }
    }
    if let Ok(val) = std::env::var("SHOTPORT_EXPORT_RETRY_BACKOFF_MS") {
        if let Ok(backoff) = val.parse() {
            config.export.retry_backoff_ms = backoff;
        }
    }

    // Document overrides (only if the destination is configured)
    if let Some(ref mut document) = config.document {
        if let Ok(val) = std::env::var("SHOTPORT_DOCUMENT_ENABLED") {
            document.enabled = val.parse().unwrap_or(true);
        }
        if let Ok(val) = std::env::var("SHOTPORT_DOCUMENT_EXECUTABLE") {
            document.executable = val;
        }
    }

    // Hosting overrides (only if the destination is configured)
    if let Some(ref mut hosting) = config.hosting {
        if let Ok(val) = std::env::var("SHOTPORT_HOSTING_ENABLED") {
            hosting.enabled = val.parse().unwrap_or(true);
        }
        if let Ok(val) = std::env::var("SHOTPORT_HOSTING_UPLOAD_URL") {
            hosting.upload_url = val;
        }
        if let Ok(val) = std::env::var("SHOTPORT_HOSTING_CLIENT_ID") {
            hosting.client_id = secret_string(val);
        }
    }

    // Logging overrides
    if let Ok(val) = std::env::var("SHOTPORT_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("SHOTPORT_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
}
