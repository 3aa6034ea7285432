//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use super::{EXIT_CONFIG_ERROR, EXIT_FATAL};
use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "shotport.toml")]
    pub output: String,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        if Path::new(&self.output).exists() && !self.force {
            println!("Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(EXIT_CONFIG_ERROR);
        }

        match fs::write(&self.output, Self::generate_config()) {
            Ok(_) => {
                println!("Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Point [document] at your document application's automation commands");
                println!("  2. Set SHOTPORT_IMGUR_CLIENT_ID in your environment or a .env file");
                println!("  3. Validate configuration: shotport validate-config");
                println!("  4. Export: shotport export shot.png --destination Writer");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("Failed to write configuration file");
                println!("   Error: {e}");
                Ok(EXIT_FATAL)
            }
        }
    }

    /// Generate the sample configuration
    fn generate_config() -> String {
        r#"# Shotport Configuration File

[application]
log_level = "info"

[output]
# Format of temporary files written when a capture cannot be sent as-is
format = "png"            # png | jpg | gif | tiff | bmp
jpeg_quality = 80
# temp_dir = "/tmp/shotport"
filename_pattern = "{title}_{timestamp}_{id}"

[export]
# Failed transfers are attempted once more
retries = 1
retry_backoff_ms = 0

[document]
designation = "Writer"
# Must exist (absolute path) or be found on PATH for the destination to be offered
executable = "soffice"
# Prints one open document name per line
list_command = ["doc-bridge", "list"]
insert_existing_command = ["doc-bridge", "insert", "--document", "{target}", "{file}"]
insert_new_command = ["doc-bridge", "new", "--template={template}", "--style={style}", "{file}"]
# template = "Report"
# style = "Figure"

[hosting]
designation = "Imgur"
upload_url = "https://api.imgur.com/3/image"
page_base_url = "https://imgur.com"
client_id = "${SHOTPORT_IMGUR_CLIENT_ID}"
upload_format = "png"
use_page_link = false
timeout_seconds = 30

[language]
export_to = "Export to {destination}"
exported_to = "Exported to {destination}"
export_failed = "{destination} export failed"
upload_to = "Upload to {destination}"

[logging]
local_enabled = false
local_path = "./logs"
local_rotation = "daily"  # daily | hourly | never
"#
        .to_string()
    }
}
