//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Shotport using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// Shotport - send captures to export destinations
#[derive(Parser, Debug)]
#[command(name = "shotport")]
#[command(version, about, long_about = None)]
#[command(author = "Shotport Contributors")]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "shotport.toml", env = "SHOTPORT_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "SHOTPORT_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List available destinations
    List(commands::list::ListArgs),

    /// Export an image file to a destination
    Export(commands::export::ExportArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
