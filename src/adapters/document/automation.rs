//! Document application automation boundary
//!
//! The calls a document destination makes into the target application. They
//! are synchronous, may fail, and are safe to repeat after a failure.

use crate::config::DocumentConfig;
use crate::domain::TransferError;
use std::path::Path;
use std::process::{Command, Output};

/// Placeholder for the payload file path
pub const FILE_PLACEHOLDER: &str = "{file}";
/// Placeholder for the live document name
pub const TARGET_PLACEHOLDER: &str = "{target}";
/// Placeholder for the template of a new document
pub const TEMPLATE_PLACEHOLDER: &str = "{template}";
/// Placeholder for the style of a new document
pub const STYLE_PLACEHOLDER: &str = "{style}";

/// Automation of a document application
pub trait DocumentAutomation: Send + Sync {
    /// Inserts the image file into the open document named `target`
    fn insert_into_existing_target(&self, target: &str, file: &Path) -> Result<(), TransferError>;

    /// Creates a new document and inserts the image file into it
    fn insert_into_new_target(
        &self,
        file: &Path,
        template: Option<&str>,
        style: Option<&str>,
    ) -> Result<(), TransferError>;

    /// Names of the documents currently open in the application
    fn list_live_target_names(&self) -> Result<Vec<String>, TransferError>;
}

/// Automation through configured external commands
///
/// Each command is a program followed by its arguments. Arguments may contain
/// `{file}`, `{target}`, `{template}` and `{style}`. An argument referring to
/// an optional value that is not set is left out.
#[derive(Debug, Clone)]
pub struct CommandAutomation {
    list_command: Vec<String>,
    insert_existing_command: Vec<String>,
    insert_new_command: Vec<String>,
}

impl CommandAutomation {
    pub fn new(
        list_command: Vec<String>,
        insert_existing_command: Vec<String>,
        insert_new_command: Vec<String>,
    ) -> Self {
        Self {
            list_command,
            insert_existing_command,
            insert_new_command,
        }
    }

    pub fn from_config(config: &DocumentConfig) -> Self {
        Self::new(
            config.list_command.clone(),
            config.insert_existing_command.clone(),
            config.insert_new_command.clone(),
        )
    }

    fn run(&self, command: Vec<String>) -> Result<Output, TransferError> {
        let (program, args) = command.split_first().ok_or_else(|| {
            TransferError::Automation("No automation command configured".to_string())
        })?;

        tracing::debug!(program = %program, args = ?args, "Running automation command");

        let output = Command::new(program)
            .args(args)
            .output()
            .map_err(|e| TransferError::Automation(format!("Failed to run {program}: {e}")))?;

        if output.status.success() {
            return Ok(output);
        }

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let message = if stderr.is_empty() {
            format!("{program} exited with {}", output.status)
        } else {
            stderr
        };
        Err(TransferError::Automation(message))
    }
}

impl DocumentAutomation for CommandAutomation {
    fn insert_into_existing_target(&self, target: &str, file: &Path) -> Result<(), TransferError> {
        let file = file.to_string_lossy();
        let command = expand_command(
            &self.insert_existing_command,
            &[
                (FILE_PLACEHOLDER, Some(&*file)),
                (TARGET_PLACEHOLDER, Some(target)),
            ],
        );
        self.run(command).map(|_| ())
    }

    fn insert_into_new_target(
        &self,
        file: &Path,
        template: Option<&str>,
        style: Option<&str>,
    ) -> Result<(), TransferError> {
        let file = file.to_string_lossy();
        let command = expand_command(
            &self.insert_new_command,
            &[
                (FILE_PLACEHOLDER, Some(&*file)),
                (TEMPLATE_PLACEHOLDER, template),
                (STYLE_PLACEHOLDER, style),
            ],
        );
        self.run(command).map(|_| ())
    }

    fn list_live_target_names(&self) -> Result<Vec<String>, TransferError> {
        let output = self.run(self.list_command.clone())?;
        Ok(String::from_utf8_lossy(&output.stdout)
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }
}

/// Fills placeholders into a command template
///
/// Arguments mentioning a placeholder whose value is `None` are dropped.
pub fn expand_command(template: &[String], values: &[(&str, Option<&str>)]) -> Vec<String> {
    template
        .iter()
        .filter_map(|arg| {
            values
                .iter()
                .try_fold(arg.clone(), |arg, &(placeholder, value)| {
                    if !arg.contains(placeholder) {
                        return Some(arg);
                    }
                    value.map(|value| arg.replace(placeholder, value))
                })
        })
        .collect()
}
