//! Localized message templates
//!
//! The export pipeline only fills the destination designation into templates
//! supplied here.

use crate::config::LanguageConfig;
use crate::domain::Designation;

/// Placeholder replaced by the destination designation
pub const DESTINATION_PLACEHOLDER: &str = "{destination}";

/// Source of user-facing message text
pub trait Localizer: Send + Sync {
    /// Display text of a document destination, e.g. "Export to Writer"
    fn export_to(&self, designation: &Designation) -> String;

    /// Success text, e.g. "Exported to Writer"
    fn exported_to(&self, designation: &Designation) -> String;

    /// Failure text, e.g. "Writer export failed"
    fn export_failed(&self, designation: &Designation) -> String;

    /// Display text of an upload destination, e.g. "Upload to Imgur"
    fn upload_to(&self, designation: &Designation) -> String;
}

/// Localizer backed by the `[language]` configuration section
#[derive(Debug, Clone)]
pub struct TemplateLanguage {
    templates: LanguageConfig,
}

impl TemplateLanguage {
    pub fn new(templates: LanguageConfig) -> Self {
        Self { templates }
    }

    fn fill(template: &str, designation: &Designation) -> String {
        template.replace(DESTINATION_PLACEHOLDER, designation.as_str())
    }
}

impl Default for TemplateLanguage {
    fn default() -> Self {
        Self::new(LanguageConfig::default())
    }
}

impl Localizer for TemplateLanguage {
    fn export_to(&self, designation: &Designation) -> String {
        Self::fill(&self.templates.export_to, designation)
    }

    fn exported_to(&self, designation: &Designation) -> String {
        Self::fill(&self.templates.exported_to, designation)
    }

    fn export_failed(&self, designation: &Designation) -> String {
        Self::fill(&self.templates.export_failed, designation)
    }

    fn upload_to(&self, designation: &Designation) -> String {
        Self::fill(&self.templates.upload_to, designation)
    }
}
