//! LLM provider abstraction.
//!
//! `LlmProvider` is an enum over concrete provider implementations.
//! Add a new variant + module in `providers/` for each additional backend.
//!
//! Provider instances are immutable and cheap to clone.
//! The generation service is treated as an opaque, fallible
//! `prompt -> text` function: one request, no retry, text passed back as-is.

pub mod providers;

use serde::Serialize;
use thiserror::Error;

// ── Error ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("unknown provider: {0}")]
    UnknownProvider(String),
    #[error("missing API key for {0}: set GEMINI_API_KEY or LLM_API_KEY")]
    MissingApiKey(&'static str),
    #[error("{provider} does not support {operation}")]
    Unsupported {
        provider: &'static str,
        operation: &'static str,
    },
    #[error("provider request failed: {0}")]
    Request(String),
}

// ── Response ──────────────────────────────────────────────────────────────────

/// Token counts reported by the provider, when it reports any.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LlmUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

/// Provider reply: generated text (unmodified) plus optional usage.
#[derive(Debug, Clone)]
pub struct LlmResponse {
    pub text: String,
    pub usage: Option<LlmUsage>,
}

// ── Provider enum ─────────────────────────────────────────────────────────────

/// All available provider backends.
///
/// Enum dispatch avoids `dyn` trait objects and the `async-trait` dependency.
/// Adding a backend = new module + new variant + new match arms.
#[derive(Debug, Clone)]
pub enum LlmProvider {
    Dummy(providers::dummy::DummyProvider),
    Gemini(providers::gemini::GeminiProvider),
    OpenAiCompatible(providers::openai_compatible::OpenAiCompatibleProvider),
}

impl LlmProvider {
    /// Send `prompt` to the provider and return its text reply.
    pub async fn complete(&self, prompt: &str) -> Result<LlmResponse, ProviderError> {
        match self {
            LlmProvider::Dummy(p) => p.complete(prompt).await,
            LlmProvider::Gemini(p) => p.complete(prompt).await,
            LlmProvider::OpenAiCompatible(p) => p.complete(prompt).await,
        }
    }

    /// Short backend name, as written in `[llm] default`.
    pub fn name(&self) -> &'static str {
        match self {
            LlmProvider::Dummy(_) => "dummy",
            LlmProvider::Gemini(_) => "gemini",
            LlmProvider::OpenAiCompatible(_) => "openai",
        }
    }

    /// Model identifier requests are sent to.
    pub fn model(&self) -> &str {
        match self {
            LlmProvider::Dummy(_) => providers::dummy::DUMMY_MODEL,
            LlmProvider::Gemini(p) => p.model(),
            LlmProvider::OpenAiCompatible(p) => p.model(),
        }
    }

    /// Reachability probe. Does not generate anything.
    pub async fn ping(&self) -> Result<(), ProviderError> {
        match self {
            LlmProvider::Dummy(_) => Ok(()),
            LlmProvider::Gemini(p) => p.ping().await,
            LlmProvider::OpenAiCompatible(p) => p.ping().await,
        }
    }

    /// Models the backend can generate with. Only Gemini exposes a listing.
    pub async fn list_models(&self) -> Result<Vec<String>, ProviderError> {
        match self {
            LlmProvider::Dummy(_) => Ok(vec![providers::dummy::DUMMY_MODEL.to_string()]),
            LlmProvider::Gemini(p) => p.list_models().await,
            LlmProvider::OpenAiCompatible(_) => Err(ProviderError::Unsupported {
                provider: "openai",
                operation: "model listing",
            }),
        }
    }
}
