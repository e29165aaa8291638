//! Input checks run before any provider call.

use serde::Serialize;
use thiserror::Error;

/// Notes shorter than this (in characters) earn a [`InputSuggestion::TooShort`].
pub const MIN_DETAILED_CHARS: usize = 50;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Please enter clinical notes first!")]
    EmptyNotes,
}

/// Reject empty or whitespace-only notes. Accepted notes come back
/// untouched, without trimming.
pub fn validate_notes(notes: &str) -> Result<&str, InputError> {
    if notes.trim().is_empty() {
        return Err(InputError::EmptyNotes);
    }
    Ok(notes)
}

/// Advisory hints about the notes. They never block generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InputSuggestion {
    TooShort,
    MissingVitals,
    MissingMedications,
}

impl InputSuggestion {
    pub fn message(self) -> &'static str {
        match self {
            Self::TooShort => "Notes seem very short. Add more details for better summary.",
            Self::MissingVitals => "Consider adding vital signs for completeness.",
            Self::MissingMedications => "Consider adding medications or treatment information.",
        }
    }

    /// `TooShort` is a warning; the rest are hints.
    pub fn is_warning(self) -> bool {
        matches!(self, Self::TooShort)
    }
}

/// Suggestions for non-empty `notes`; an empty string gets none.
pub fn suggestions(notes: &str) -> Vec<InputSuggestion> {
    if notes.is_empty() {
        return Vec::new();
    }

    let lower = notes.to_lowercase();
    let mut out = Vec::new();
    if notes.chars().count() < MIN_DETAILED_CHARS {
        out.push(InputSuggestion::TooShort);
    }
    if !lower.contains("vitals") && !lower.contains("bp") {
        out.push(InputSuggestion::MissingVitals);
    }
    // "med" also covers "medication", "meds", "medicine".
    if !lower.contains("med") {
        out.push(InputSuggestion::MissingMedications);
    }
    out
}
