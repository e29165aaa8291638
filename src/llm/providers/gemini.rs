//! Google Gemini provider (`models/{model}:generateContent`).
//!
//! Exposes `complete(&str) -> LlmResponse` like every other backend. All
//! Gemini wire types are private to this module. The key travels in the
//! `x-goog-api-key` header rather than the query string so it never shows
//! up in URLs or request logs.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, trace};

use crate::llm::{LlmResponse, LlmUsage, ProviderError};

const API_KEY_HEADER: &str = "x-goog-api-key";
const GENERATE_METHOD: &str = "generateContent";
const LIST_PAGE_SIZE: u32 = 1000;

// ── Public provider ───────────────────────────────────────────────────────────

/// Adapter for the Generative Language REST API.
///
/// Constructed once at startup, then cheaply cloned because
/// `reqwest::Client` is an `Arc` internally.
#[derive(Debug, Clone)]
pub struct GeminiProvider {
    client: Client,
    api_base_url: String,
    model: String,
    temperature: Option<f32>,
    api_key: Option<String>,
}

impl GeminiProvider {
    /// `api_base_url` is the API root (e.g. `.../v1beta`); the model path is
    /// appended per request. A `models/` prefix on `model` is accepted.
    pub fn new(
        api_base_url: String,
        model: String,
        temperature: Option<f32>,
        timeout_seconds: u64,
        api_key: Option<String>,
    ) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .map_err(|e| ProviderError::Request(format!("failed to build HTTP client: {e}")))?;

        let model = model.strip_prefix("models/").unwrap_or(&model).to_string();
        let api_base_url = api_base_url.trim_end_matches('/').to_string();

        Ok(Self { client, api_base_url, model, temperature, api_key })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn generate_url(&self) -> String {
        format!("{}/models/{}:{GENERATE_METHOD}", self.api_base_url, self.model)
    }

    fn models_url(&self) -> String {
        format!("{}/models", self.api_base_url)
    }

    fn key(&self) -> Result<&str, ProviderError> {
        self.api_key
            .as_deref()
            .ok_or(ProviderError::MissingApiKey("gemini"))
    }

    /// Lightweight reachability probe.
    ///
    /// Any HTTP response (including 4xx for a bad key) means the service is
    /// reachable. Only a transport-level failure counts as unreachable.
    /// Hard 5-second timeout regardless of the generation timeout.
    pub async fn ping(&self) -> Result<(), ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| ProviderError::Request(format!("failed to build ping client: {e}")))?;
        let mut req = client.get(self.models_url()).query(&[("pageSize", "1")]);
        if let Some(key) = &self.api_key {
            req = req.header(API_KEY_HEADER, key);
        }
        req.send()
            .await
            .map(|_| ())
            .map_err(|e| ProviderError::Request(format!("unreachable: {e}")))
    }

    /// One `generateContent` round-trip with `prompt` as the sole user turn.
    pub async fn complete(&self, prompt: &str) -> Result<LlmResponse, ProviderError> {
        let key = self.key()?;

        let payload = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: self.temperature.map(|temperature| GenerationConfig { temperature }),
        };

        debug!(
            model = %self.model,
            temperature = ?self.temperature,
            prompt_len = prompt.len(),
            "sending Gemini request"
        );
        if tracing::enabled!(tracing::Level::TRACE) {
            let json = serde_json::to_string_pretty(&payload)
                .unwrap_or_else(|e| format!("<serialization failed: {e}>"));
            trace!(payload = %json, "full Gemini request payload");
        }

        let response = self
            .client
            .post(self.generate_url())
            .header(API_KEY_HEADER, key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                error!(model = %self.model, error = %e, timeout = e.is_timeout(), "Gemini request failed (transport)");
                ProviderError::Request(e.to_string())
            })?;

        let response = check_status(response).await?;

        let parsed = response.json::<GenerateContentResponse>().await.map_err(|e| {
            error!(error = %e, "failed to deserialize Gemini response");
            ProviderError::Request(format!("failed to parse response body: {e}"))
        })?;

        if tracing::enabled!(tracing::Level::TRACE) {
            let json = serde_json::to_string_pretty(&parsed)
                .unwrap_or_else(|e| format!("<serialization failed: {e}>"));
            trace!(response = %json, "full Gemini response payload");
        }

        let response = into_llm_response(parsed)?;
        debug!(text_len = response.text.len(), "received Gemini response");
        Ok(response)
    }

    /// Names (without the `models/` prefix) of every model that supports
    /// `generateContent`, following pagination to the end.
    pub async fn list_models(&self) -> Result<Vec<String>, ProviderError> {
        let key = self.key()?;
        let mut names = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut req = self
                .client
                .get(self.models_url())
                .header(API_KEY_HEADER, key)
                .query(&[("pageSize", LIST_PAGE_SIZE.to_string())]);
            if let Some(token) = &page_token {
                req = req.query(&[("pageToken", token)]);
            }

            let response = req
                .send()
                .await
                .map_err(|e| ProviderError::Request(e.to_string()))?;
            let page = check_status(response)
                .await?
                .json::<ListModelsResponse>()
                .await
                .map_err(|e| ProviderError::Request(format!("failed to parse model list: {e}")))?;

            names.extend(generating_models(page.models));

            match page.next_page_token.filter(|t| !t.is_empty()) {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        debug!(count = names.len(), "listed Gemini models");
        Ok(names)
    }
}

// ── Response handling ─────────────────────────────────────────────────────────

/// Join the first candidate's text parts. Thought parts are skipped; the
/// text itself is passed through untouched.
fn into_llm_response(parsed: GenerateContentResponse) -> Result<LlmResponse, ProviderError> {
    let usage = parsed.usage_metadata.map(|u| LlmUsage {
        input_tokens: u.prompt_token_count,
        output_tokens: u.candidates_token_count,
    });

    let block_reason = parsed.prompt_feedback.and_then(|f| f.block_reason);
    let Some(candidate) = parsed.candidates.into_iter().next() else {
        let reason = block_reason
            .map(|r| format!("prompt blocked: {r}"))
            .unwrap_or_else(|| "no candidates in response".to_string());
        return Err(ProviderError::Request(reason));
    };

    let text: String = candidate
        .content
        .map(|c| c.parts)
        .unwrap_or_default()
        .into_iter()
        .filter(|p| !p.thought.unwrap_or(false))
        .filter_map(|p| p.text)
        .collect();

    if text.is_empty() {
        let reason = match candidate.finish_reason {
            Some(r) => format!("empty response (finish reason: {r})"),
            None => "empty or missing content in response".to_string(),
        };
        return Err(ProviderError::Request(reason));
    }

    Ok(LlmResponse { text, usage })
}

fn generating_models(models: Vec<ModelInfo>) -> impl Iterator<Item = String> {
    models
        .into_iter()
        .filter(|m| m.supported_generation_methods.iter().any(|g| g == GENERATE_METHOD))
        .map(|m| m.name.strip_prefix("models/").unwrap_or(&m.name).to_string())
}

/// Consume the response and return it if successful, or a structured error.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ProviderError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "<failed to read error body>".to_string());

    let message = error_message(status, &body);
    error!(%status, %message, "Gemini request returned HTTP error");
    Err(ProviderError::Request(message))
}

fn error_message(status: reqwest::StatusCode, body: &str) -> String {
    match serde_json::from_str::<ErrorEnvelope>(body) {
        Ok(env) => {
            let label = env.error.status.map(|s| format!(" [{s}]")).unwrap_or_default();
            format!("HTTP {status}{label}: {}", env.error.message)
        }
        Err(_) => format!("HTTP {status}: {body}"),
    }
}

// ── Private wire types ────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    thought: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u64,
    #[serde(default)]
    candidates_token_count: u64,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListModelsResponse {
    #[serde(default)]
    models: Vec<ModelInfo>,
    #[serde(default)]
    next_page_token: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModelInfo {
    name: String,
    #[serde(default)]
    supported_generation_methods: Vec<String>,
}

// Error envelope used by Google APIs.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
    #[serde(default)]
    status: Option<String>,
}
