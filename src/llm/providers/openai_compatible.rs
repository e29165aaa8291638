//! OpenAI-compatible chat completion provider (`/v1/chat/completions`).
//!
//! Covers OpenAI itself and local servers speaking the same protocol
//! (Ollama, LM Studio, vLLM…). The prompt is sent as a single user message;
//! wire types stay private to this module.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, trace};

use crate::llm::{LlmResponse, LlmUsage, ProviderError};

// ── Public provider ───────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct OpenAiCompatibleProvider {
    client: Client,
    api_base_url: String,
    model: String,
    temperature: f32,
    api_key: Option<String>,
}

impl OpenAiCompatibleProvider {
    /// Build a provider from config values and an optional API key.
    ///
    /// `api_key` is `None` for keyless local models. When present it is sent
    /// as `Authorization: Bearer <key>` on every request.
    pub fn new(
        api_base_url: String,
        model: String,
        temperature: f32,
        timeout_seconds: u64,
        api_key: Option<String>,
    ) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .map_err(|e| ProviderError::Request(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, api_base_url, model, temperature, api_key })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Sends a HEAD request to the endpoint. Any HTTP response (including
    /// 4xx) means the server is reachable.
    pub async fn ping(&self) -> Result<(), ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| ProviderError::Request(format!("failed to build ping client: {e}")))?;
        let mut req = client.head(&self.api_base_url);
        if let Some(key) = &self.api_key {
            req = req.bearer_auth(key);
        }
        req.send()
            .await
            .map(|_| ())
            .map_err(|e| ProviderError::Request(format!("unreachable: {e}")))
    }

    pub async fn complete(&self, prompt: &str) -> Result<LlmResponse, ProviderError> {
        // Some models (gpt-5 family) do not accept a temperature parameter.
        let temperature = if self.model.starts_with("gpt-5") {
            None
        } else {
            Some(self.temperature)
        };

        let payload = ChatCompletionRequest {
            model: &self.model,
            messages: vec![Message { role: "user", content: prompt }],
            temperature,
        };

        debug!(
            model = %payload.model,
            temperature = ?payload.temperature,
            prompt_len = prompt.len(),
            "sending chat completion request"
        );
        if tracing::enabled!(tracing::Level::TRACE) {
            let json = serde_json::to_string_pretty(&payload)
                .unwrap_or_else(|e| format!("<serialization failed: {e}>"));
            trace!(payload = %json, "full chat completion payload");
        }

        let mut req = self.client.post(&self.api_base_url).json(&payload);
        if let Some(key) = &self.api_key {
            req = req.bearer_auth(key);
        }

        let response = req.send().await.map_err(|e| {
            error!(url = %self.api_base_url, error = %e, "chat completion request failed (transport)");
            ProviderError::Request(e.to_string())
        })?;

        let parsed = check_status(response)
            .await?
            .json::<ChatCompletionResponse>()
            .await
            .map_err(|e| ProviderError::Request(format!("failed to parse response body: {e}")))?;

        let response = into_llm_response(parsed)?;
        debug!(text_len = response.text.len(), "received chat completion");
        Ok(response)
    }
}

// ── Response handling ─────────────────────────────────────────────────────────

/// First choice's content, untouched. Only an empty or missing choice is
/// an error; whitespace passes through like any other text.
fn into_llm_response(parsed: ChatCompletionResponse) -> Result<LlmResponse, ProviderError> {
    let usage = parsed.usage.map(|u| LlmUsage {
        input_tokens: u.prompt_tokens,
        output_tokens: u.completion_tokens,
    });

    match parsed.choices.into_iter().next().and_then(|c| c.message.content) {
        Some(text) if !text.is_empty() => Ok(LlmResponse { text, usage }),
        _ => Err(ProviderError::Request("empty or missing content in response".into())),
    }
}

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
    error!(%status, %message, "chat completion returned HTTP error");
    Err(ProviderError::Request(message))
}

fn error_message(status: reqwest::StatusCode, body: &str) -> String {
    let Ok(env) = serde_json::from_str::<ErrorEnvelope>(body) else {
        return format!("HTTP {status}: {body}");
    };
    let code = match env.error.code {
        Some(serde_json::Value::String(s)) => format!(" [code={s}]"),
        Some(serde_json::Value::Null) | None => String::new(),
        Some(other) => format!(" [code={other}]"),
    };
    format!("HTTP {status}{code}: {}", env.error.message)
}

// ── Private wire types ────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<UsageData>,
}

#[derive(Debug, Deserialize)]
struct UsageData {
    prompt_tokens: u64,
    completion_tokens: u64,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

// Error envelope used by OpenAI and compatible APIs.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
    #[serde(default)]
    code: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructs_provider() {
        let provider = OpenAiCompatibleProvider::new(
            "http://127.0.0.1:11434/v1/chat/completions".to_string(),
            "llama3".to_string(),
            0.2,
            5,
            None,
        )
        .unwrap();
        assert_eq!(provider.model(), "llama3");
    }

    #[test]
    fn request_carries_single_user_message() {
        let payload = ChatCompletionRequest {
            model: "gpt-4o-mini",
            messages: vec![Message { role: "user", content: "notes" }],
            temperature: None,
        };
        let v = serde_json::to_value(&payload).unwrap();
        assert_eq!(v["messages"].as_array().unwrap().len(), 1);
        assert_eq!(v["messages"][0]["content"], "notes");
        assert!(v.get("temperature").is_none());
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_request_error() {
        let provider = OpenAiCompatibleProvider::new(
            "http://127.0.0.1:1/v1/chat/completions".to_string(),
            "llama3".to_string(),
            0.2,
            2,
            None,
        )
        .unwrap();
        let err = provider.complete("notes").await.unwrap_err();
        assert!(matches!(err, ProviderError::Request(_)));
    }

    #[test]
    fn response_text_is_not_trimmed() {
        let parsed: ChatCompletionResponse = serde_json::from_value(serde_json::json!({
            "choices": [{ "message": { "content": "  summary\n" } }],
            "usage": { "prompt_tokens": 3, "completion_tokens": 4 }
        }))
        .unwrap();
        let resp = into_llm_response(parsed).unwrap();
        assert_eq!(resp.text, "  summary\n");
        assert_eq!(resp.usage, Some(LlmUsage { input_tokens: 3, output_tokens: 4 }));
    }

    #[test]
    fn empty_choice_is_error() {
        let parsed: ChatCompletionResponse =
            serde_json::from_value(serde_json::json!({ "choices": [{ "message": { "content": "" } }] }))
                .unwrap();
        assert!(into_llm_response(parsed).is_err());
    }

    #[test]
    fn whitespace_choice_passes_through() {
        let parsed: ChatCompletionResponse =
            serde_json::from_value(serde_json::json!({ "choices": [{ "message": { "content": " \n" } }] }))
                .unwrap();
        assert_eq!(into_llm_response(parsed).unwrap().text, " \n");
    }

    #[test]
    fn error_envelope_is_decoded() {
        let body = r#"{"error":{"message":"bad key","code":"invalid_api_key"}}"#;
        assert_eq!(
            error_message(reqwest::StatusCode::UNAUTHORIZED, body),
            "HTTP 401 Unauthorized [code=invalid_api_key]: bad key"
        );
        assert_eq!(
            error_message(reqwest::StatusCode::BAD_GATEWAY, "upstream down"),
            "HTTP 502 Bad Gateway: upstream down"
        );
    }
}
