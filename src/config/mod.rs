//! Configuration management for Shotport.
//!
//! This module provides TOML-based configuration loading, parsing, and validation.
//!
//! # Overview
//!
//! Shotport uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - Default values for optional settings
//! - Comprehensive validation
//! - Type-safe configuration structs
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Log level
//! - [`OutputConfig`] - Temporary payload file format and naming
//! - [`ExportConfig`] - Retry policy
//! - [`DocumentConfig`] - Document application destination (optional)
//! - [`HostingConfig`] - Image hosting destination (optional)
//! - [`LanguageConfig`] - Message templates
//! - [`LoggingConfig`] - Logging configuration
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [output]
//! format = "png"
//!
//! [document]
//! designation = "Writer"
//! executable = "soffice"
//! list_command = ["doc-bridge", "list"]
//! insert_existing_command = ["doc-bridge", "insert", "--document", "{target}", "{file}"]
//! insert_new_command = ["doc-bridge", "new", "{file}"]
//!
//! [hosting]
//! client_id = "${SHOTPORT_IMGUR_CLIENT_ID}"
//! use_page_link = true
//! ```
//!
//! # Validation
//!
//! ```rust,no_run
//! use shotport::config::load_config;
//!
//! match load_config("shotport.toml") {
//!     Ok(_config) => println!("Configuration valid"),
//!     Err(e) => eprintln!("Configuration error: {}", e),
//! }
//! ```

pub mod loader;
pub mod schema;
pub mod secret;

// Re-export commonly used types
pub use loader::{load_config, parse_config};
pub use schema::{
    ApplicationConfig, DocumentConfig, ExportConfig, HostingConfig, LanguageConfig,
    LoggingConfig, OutputConfig, ShotportConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
