//! Prompt template for discharge summaries.
//!
//! The template is plain text with a single `{{clinical_notes}}` variable,
//! using the same `{{key}}` syntax as the files under `config/prompts/`.
//! Substitution is one pass over the template: whatever the notes contain
//! (including `{{clinical_notes}}` itself) lands in the prompt verbatim.

use std::fs;
use std::path::Path;

use crate::error::AppError;

pub const NOTES_PLACEHOLDER: &str = "{{clinical_notes}}";

/// Built-in template. `config/prompts/discharge_summary.txt` ships a copy.
pub const DEFAULT_TEMPLATE: &str = "\
You are an expert medical documentation assistant.
Generate a comprehensive discharge summary based on these clinical notes.

CLINICAL NOTES:
{{clinical_notes}}

Generate a structured discharge summary with these sections:

### DISCHARGE SUMMARY
**Patient:** [Extract patient demographics]
**Diagnosis:** [Primary diagnosis]
**Hospital Course:** [Concise narrative of hospital stay and treatments]
**Discharge Medications:** [List with dosage and frequency]
**Follow-up:** [Appointments needed]
**Warning signs:** [When to seek emergency care]";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    text: String,
}

impl PromptTemplate {
    pub fn builtin() -> Self {
        Self { text: DEFAULT_TEMPLATE.to_string() }
    }

    /// Load an override template. Surrounding whitespace is trimmed, and
    /// the file must contain the notes placeholder.
    pub fn from_file(path: &Path) -> Result<Self, AppError> {
        let raw = fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("cannot read prompt template {}: {e}", path.display()))
        })?;
        let text = raw.trim();
        if !text.contains(NOTES_PLACEHOLDER) {
            return Err(AppError::Config(format!(
                "prompt template {} has no {NOTES_PLACEHOLDER} placeholder",
                path.display()
            )));
        }
        Ok(Self { text: text.to_string() })
    }

    /// [`from_file`](Self::from_file) when a path is configured, otherwise
    /// the built-in template.
    pub fn load(path: Option<&Path>) -> Result<Self, AppError> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::builtin()),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Substitute `notes` into the template, unchanged.
    pub fn render(&self, notes: &str) -> String {
        self.text.replace(NOTES_PLACEHOLDER, notes)
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self::builtin()
    }
}
