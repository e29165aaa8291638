//! End-to-end tests against a mock Generative Language endpoint.
//!
//! Each test starts an axum server on an ephemeral port that imitates
//! `models/{model}:generateContent` and `models`, then points a real
//! `GeminiProvider` at it.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};
use tokio::net::TcpListener;

use discharge_assistant::llm::LlmProvider;
use discharge_assistant::llm::providers::gemini::GeminiProvider;
use discharge_assistant::summary::{PromptTemplate, SummaryService, SummaryStatus};

const KEY: &str = "test-key";

// ── mock server ──────────────────────────────────────────────────────────────

#[derive(Clone)]
enum Reply {
    Text(&'static str),
    Fail(StatusCode, Value),
}

struct Mock {
    reply: Reply,
    hits: AtomicUsize,
    last_body: Mutex<Option<Value>>,
    last_model: Mutex<Option<String>>,
}

async fn generate(
    State(mock): State<Arc<Mock>>,
    Path(target): Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    mock.hits.fetch_add(1, Ordering::SeqCst);
    *mock.last_body.lock().unwrap() = Some(body);
    *mock.last_model.lock().unwrap() = Some(target);

    if headers.get("x-goog-api-key").and_then(|v| v.to_str().ok()) != Some(KEY) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": { "code": 401, "message": "API key not valid", "status": "UNAUTHENTICATED" } })),
        )
            .into_response();
    }

    match &mock.reply {
        Reply::Text(text) => Json(json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": text }] },
                "finishReason": "STOP"
            }],
            "usageMetadata": { "promptTokenCount": 12, "candidatesTokenCount": 34 }
        }))
        .into_response(),
        Reply::Fail(status, body) => (*status, Json(body.clone())).into_response(),
    }
}

async fn list(Query(q): Query<std::collections::HashMap<String, String>>) -> Json<Value> {
    match q.get("pageToken").map(String::as_str) {
        None => Json(json!({
            "models": [
                { "name": "models/gemini-2.5-flash", "supportedGenerationMethods": ["generateContent", "countTokens"] },
                { "name": "models/text-embedding-004", "supportedGenerationMethods": ["embedContent"] }
            ],
            "nextPageToken": "page-2"
        })),
        Some(_) => Json(json!({
            "models": [
                { "name": "models/gemini-2.5-pro", "supportedGenerationMethods": ["generateContent"] }
            ]
        })),
    }
}

async fn spawn_mock(reply: Reply) -> (String, Arc<Mock>) {
    let mock = Arc::new(Mock {
        reply,
        hits: AtomicUsize::new(0),
        last_body: Mutex::new(None),
        last_model: Mutex::new(None),
    });
    let app = Router::new()
        .route("/v1beta/models", get(list))
        .route("/v1beta/models/{target}", post(generate))
        .with_state(mock.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}/v1beta"), mock)
}

fn service(base: &str, key: Option<&str>) -> SummaryService {
    let provider = GeminiProvider::new(
        base.to_string(),
        "models/gemini-2.5-flash".to_string(),
        None,
        5,
        key.map(str::to_string),
    )
    .unwrap();
    SummaryService::new(LlmProvider::Gemini(provider), PromptTemplate::builtin())
}

fn sent_prompt(mock: &Mock) -> String {
    let body = mock.last_body.lock().unwrap().clone().unwrap();
    body["contents"][0]["parts"][0]["text"].as_str().unwrap().to_string()
}

// ── generation ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn success_returns_text_unmodified() {
    let text = "  ### DISCHARGE SUMMARY\n**Patient:** 68M  \n\n";
    let (base, mock) = spawn_mock(Reply::Text(text)).await;

    let result = service(&base, Some(KEY)).generate("Patient: 68M with COPD").await.unwrap();

    assert_eq!(result.status, SummaryStatus::Ok);
    assert_eq!(result.summary, text);
    assert_eq!(result.metadata.model, "gemini-2.5-flash");
    assert_eq!(result.metadata.confidence, 0.95);
    let usage = result.metadata.usage.unwrap();
    assert_eq!((usage.input_tokens, usage.output_tokens), (12, 34));
    assert_eq!(mock.hits.load(Ordering::SeqCst), 1);
    assert_eq!(
        mock.last_model.lock().unwrap().as_deref(),
        Some("gemini-2.5-flash:generateContent")
    );
}

#[tokio::test]
async fn prompt_contains_notes_verbatim() {
    let (base, mock) = spawn_mock(Reply::Text("ok")).await;
    let notes = "Vitals: BP 145/82 — O2 88%\n  indented {{clinical_notes}} \"quoted\" <tag>";

    service(&base, Some(KEY)).generate(notes).await.unwrap();

    let prompt = sent_prompt(&mock);
    assert!(prompt.contains(notes));
    assert!(prompt.starts_with("You are an expert medical documentation assistant."));
    assert!(prompt.contains("### DISCHARGE SUMMARY"));
}

#[tokio::test]
async fn http_error_becomes_error_summary() {
    let (base, mock) = spawn_mock(Reply::Fail(
        StatusCode::BAD_REQUEST,
        json!({ "error": { "code": 400, "message": "Invalid model", "status": "INVALID_ARGUMENT" } }),
    ))
    .await;

    let result = service(&base, Some(KEY)).generate("notes").await.unwrap();

    assert_eq!(result.status, SummaryStatus::Error);
    assert!(result.summary.starts_with("Error:"), "{}", result.summary);
    assert!(result.summary.contains("INVALID_ARGUMENT"));
    assert!(result.summary.contains("Invalid model"));
    assert_eq!(result.metadata.model, "error");
    assert_eq!(result.metadata.processing_time, 0.0);
    assert_eq!(result.metadata.confidence, 0.0);
    assert_eq!(mock.hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn wrong_key_becomes_error_summary() {
    let (base, _mock) = spawn_mock(Reply::Text("unreachable")).await;

    let result = service(&base, Some("bad-key")).generate("notes").await.unwrap();

    assert!(result.is_error());
    assert!(result.summary.starts_with("Error:"));
    assert!(result.summary.contains("API key not valid"));
}

#[tokio::test]
async fn missing_key_fails_without_request() {
    let (base, mock) = spawn_mock(Reply::Text("unreachable")).await;

    let result = service(&base, None).generate("notes").await.unwrap();

    assert!(result.is_error());
    assert!(result.summary.starts_with("Error:"));
    assert_eq!(mock.hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn unreachable_service_becomes_error_summary() {
    // Bind then drop to get a port nothing listens on.
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let result = service(&format!("http://{addr}/v1beta"), Some(KEY))
        .generate("notes")
        .await
        .unwrap();

    assert!(result.summary.starts_with("Error:"));
    assert_eq!(result.metadata.model, "error");
}

#[tokio::test]
async fn blank_notes_make_no_request() {
    let (base, mock) = spawn_mock(Reply::Text("unreachable")).await;
    let svc = service(&base, Some(KEY));

    for notes in ["", " ", "\n\t  \r\n"] {
        assert!(svc.generate(notes).await.is_err());
    }
    assert_eq!(mock.hits.load(Ordering::SeqCst), 0);
}

// ── model listing ────────────────────────────────────────────────────────────

#[tokio::test]
async fn list_models_follows_pages_and_filters() {
    let (base, _mock) = spawn_mock(Reply::Text("unused")).await;
    let provider = service(&base, Some(KEY));

    let models = provider.provider().list_models().await.unwrap();

    assert_eq!(models, ["gemini-2.5-flash", "gemini-2.5-pro"]);
}

#[tokio::test]
async fn ping_reaches_mock() {
    let (base, _mock) = spawn_mock(Reply::Text("unused")).await;
    service(&base, Some(KEY)).provider().ping().await.unwrap();
}
