//! Axum handlers for `/api/*` routes.
//!
//! Every handler receives [`AppState`] via [`axum::extract::State`] and
//! answers with JSON, except `/api/export` which returns the file itself.

use std::time::Duration;

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::warn;

use crate::llm::ProviderError;
use crate::roi::{self, RoiInputs};
use crate::scenarios;
use crate::summary::validate::{self, InputSuggestion};
use crate::summary::ExportFormat;

use super::{AppState, download_response};

const MODELS_TIMEOUT: Duration = Duration::from_secs(15);

// ── Request / response types ──────────────────────────────────────────────────

#[derive(Deserialize)]
pub(super) struct NotesRequest {
    #[serde(default)]
    notes: String,
}

#[derive(Deserialize)]
pub(super) struct ExportRequest {
    summary: String,
    #[serde(default)]
    format: ExportFormat,
}

#[derive(Serialize)]
struct SuggestionBody {
    kind: InputSuggestion,
    message: &'static str,
    warning: bool,
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// Build a JSON error response body.
fn json_error(code: &str, msg: impl std::fmt::Display) -> Json<serde_json::Value> {
    Json(json!({ "error": code, "message": format!("{msg}") }))
}

// ── Handlers ──────────────────────────────────────────────────────────────────

/// GET /api/health
pub(super) async fn health(State(state): State<AppState>) -> Response {
    let provider = state.summaries.provider();
    Json(json!({
        "status": "ok",
        "app": state.app_name.to_string(),
        "provider": provider.name(),
        "model": provider.model(),
    }))
    .into_response()
}

/// GET /api/models — what the configured provider can generate with.
pub(super) async fn models(State(state): State<AppState>) -> Response {
    let provider = state.summaries.provider();
    match tokio::time::timeout(MODELS_TIMEOUT, provider.list_models()).await {
        Ok(Ok(models)) => Json(json!({
            "provider": provider.name(),
            "models": models,
        }))
        .into_response(),
        Ok(Err(e @ ProviderError::Unsupported { .. })) => {
            (StatusCode::NOT_IMPLEMENTED, json_error("unsupported", e)).into_response()
        }
        Ok(Err(e @ ProviderError::MissingApiKey(_))) => {
            (StatusCode::SERVICE_UNAVAILABLE, json_error("missing_api_key", e)).into_response()
        }
        Ok(Err(e)) => {
            warn!("model listing failed: {e}");
            (StatusCode::BAD_GATEWAY, json_error("provider", e)).into_response()
        }
        Err(_) => (
            StatusCode::GATEWAY_TIMEOUT,
            json_error("timeout", "model listing timed out"),
        )
            .into_response(),
    }
}

/// GET /api/scenarios
pub(super) async fn scenarios() -> Response {
    Json(scenarios::all()).into_response()
}

/// GET /api/roi
pub(super) async fn roi(Query(inputs): Query<RoiInputs>) -> Response {
    Json(roi::estimate(inputs)).into_response()
}

/// POST /api/suggestions
pub(super) async fn suggestions(Json(req): Json<NotesRequest>) -> Response {
    let suggestions: Vec<SuggestionBody> = validate::suggestions(&req.notes)
        .into_iter()
        .map(|kind| SuggestionBody {
            kind,
            message: kind.message(),
            warning: kind.is_warning(),
        })
        .collect();
    Json(json!({ "suggestions": suggestions })).into_response()
}

/// POST /api/summary
///
/// 200 with a `SummaryResult` whenever the notes are usable, including
/// when the provider failed (`status: "error"`). 422 for empty notes.
pub(super) async fn summary(
    State(state): State<AppState>,
    Json(req): Json<NotesRequest>,
) -> Response {
    match state.summaries.generate(&req.notes).await {
        Ok(result) => (StatusCode::OK, Json(result)).into_response(),
        Err(e) => (StatusCode::UNPROCESSABLE_ENTITY, json_error("empty_notes", e)).into_response(),
    }
}

/// POST /api/export
pub(super) async fn export(Json(req): Json<ExportRequest>) -> Response {
    download_response(req.summary, req.format)
}
