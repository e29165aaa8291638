//! Notes in, discharge summary out.
//!
//! [`SummaryService::generate`] is the single integration point with the
//! generation service. Provider failures never escape it: they become an
//! `Error: …` summary with zeroed metadata, so the caller always has
//! something to display.

use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::llm::{LlmProvider, LlmUsage};

use super::prompt::PromptTemplate;
use super::validate::{InputError, validate_notes};

/// Confidence reported for every successful summary. Fixed; not a model output.
pub const CONFIDENCE: f64 = 0.95;
/// `metadata.model` on failure.
pub const ERROR_MODEL: &str = "error";
/// Prefix of the summary text on failure.
pub const ERROR_PREFIX: &str = "Error: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryStatus {
    Ok,
    Error,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryMetadata {
    pub model: String,
    /// Wall-clock seconds for the provider call, rounded to 2 decimals.
    pub processing_time: f64,
    pub confidence: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<LlmUsage>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryResult {
    pub summary: String,
    pub metadata: SummaryMetadata,
    pub status: SummaryStatus,
}

impl SummaryResult {
    pub fn is_error(&self) -> bool {
        self.status == SummaryStatus::Error
    }

    fn failed(message: impl std::fmt::Display) -> Self {
        Self {
            summary: format!("{ERROR_PREFIX}{message}"),
            metadata: SummaryMetadata {
                model: ERROR_MODEL.to_string(),
                processing_time: 0.0,
                confidence: 0.0,
                usage: None,
            },
            status: SummaryStatus::Error,
        }
    }
}

/// Owns the provider (and with it the API key) plus the prompt template.
/// Cheap to share behind an `Arc`.
#[derive(Debug, Clone)]
pub struct SummaryService {
    provider: LlmProvider,
    template: PromptTemplate,
}

impl SummaryService {
    pub fn new(provider: LlmProvider, template: PromptTemplate) -> Self {
        Self { provider, template }
    }

    pub fn provider(&self) -> &LlmProvider {
        &self.provider
    }

    /// Generate a discharge summary from `notes`.
    ///
    /// Empty or whitespace-only notes are rejected before the provider is
    /// touched. Otherwise exactly one provider call is made and the outcome
    /// is folded into a [`SummaryResult`].
    pub async fn generate(&self, notes: &str) -> Result<SummaryResult, InputError> {
        let notes = validate_notes(notes)?;
        let request_id = Uuid::now_v7();
        let prompt = self.template.render(notes);

        debug!(%request_id, notes_len = notes.len(), prompt_len = prompt.len(), "rendered prompt");

        let started = Instant::now();
        match self.provider.complete(&prompt).await {
            Ok(resp) => {
                let processing_time = round_secs(started.elapsed().as_secs_f64());
                info!(
                    %request_id,
                    provider = self.provider.name(),
                    model = self.provider.model(),
                    processing_time,
                    summary_len = resp.text.len(),
                    "summary generated"
                );
                Ok(SummaryResult {
                    summary: resp.text,
                    metadata: SummaryMetadata {
                        model: self.provider.model().to_string(),
                        processing_time,
                        confidence: CONFIDENCE,
                        usage: resp.usage,
                    },
                    status: SummaryStatus::Ok,
                })
            }
            Err(e) => {
                warn!(%request_id, provider = self.provider.name(), error = %e, "summary generation failed");
                Ok(SummaryResult::failed(e))
            }
        }
    }
}

fn round_secs(secs: f64) -> f64 {
    (secs * 100.0).round() / 100.0
}
