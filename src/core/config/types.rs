//! Public configuration types.
//!
//! These are the resolved, ready-to-use structs the rest of the crate
//! consumes. Raw TOML deserialization types live in `raw.rs`.

use std::path::PathBuf;

// ── HTTP ─────────────────────────────────────────────────────────────────────

/// HTTP listener configuration.
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Socket address to bind the axum listener to.
    pub bind: String,
}

// ── LLM ──────────────────────────────────────────────────────────────────────

/// Google Gemini (`generateContent`) provider configuration.
/// Populated from `[llm.gemini]` in the TOML.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API root, e.g. `https://generativelanguage.googleapis.com/v1beta`.
    pub api_base_url: String,
    /// Model name, inserted into the request path.
    pub model: String,
    /// Sampling temperature. `None` leaves the service default in place.
    pub temperature: Option<f32>,
    /// Per-request HTTP timeout in seconds.
    pub timeout_seconds: u64,
}

/// OpenAI / OpenAI-compatible provider configuration.
/// Populated from `[llm.openai]` in the TOML.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// Full chat completions endpoint URL.
    pub api_base_url: String,
    /// Model name passed in the request body.
    pub model: String,
    /// Sampling temperature (ignored for models that forbid it).
    pub temperature: f32,
    /// Per-request HTTP timeout in seconds.
    pub timeout_seconds: u64,
}

/// LLM provider selection plus per-provider settings.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Active provider: `"gemini"`, `"openai"` or `"dummy"`.
    pub provider: String,
    pub gemini: GeminiConfig,
    pub openai: OpenAiConfig,
}

// ── Summary ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default)]
pub struct SummaryConfig {
    /// Optional prompt template override. The built-in template is used
    /// when unset.
    pub prompt_file: Option<PathBuf>,
}

// ── Top-level ────────────────────────────────────────────────────────────────

/// Fully resolved application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub app_name: String,
    pub log_level: String,
    /// Append logs here instead of stderr.
    pub log_file: Option<PathBuf>,
    pub http: HttpConfig,
    pub llm: LlmConfig,
    /// From `GEMINI_API_KEY` / `LLM_API_KEY` env only, never TOML.
    pub llm_api_key: Option<String>,
    pub summary: SummaryConfig,
}
