//! Discharge summary generation.
//!
//! - **prompt** — the fixed instruction template notes are substituted into.
//! - **validate** — empty-input rejection and advisory input suggestions.
//! - **service** — notes → prompt → provider → [`SummaryResult`].
//! - **export** — file name / MIME type for downloading a summary.

pub mod export;
pub mod prompt;
pub mod service;
pub mod validate;

pub use export::ExportFormat;
pub use prompt::PromptTemplate;
pub use service::{SummaryMetadata, SummaryResult, SummaryService, SummaryStatus};
pub use validate::{InputError, InputSuggestion};
