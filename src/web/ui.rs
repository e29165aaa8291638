//! HTML route handlers: the form page, its submit, and file download.

use axum::{
    Form,
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;

use crate::roi::{self, RoiInputs};
use crate::scenarios::{self, Scenario};
use crate::summary::ExportFormat;

use super::page::{self, Outcome, PageView};
use super::{AppState, download_response};

// ── Request types ─────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub(super) struct PageQuery {
    scenario: Option<String>,
    summaries_per_day: Option<i64>,
    physicians: Option<i64>,
}

#[derive(Deserialize)]
pub(super) struct GenerateForm {
    #[serde(default)]
    notes: String,
    scenario: Option<String>,
    summaries_per_day: Option<i64>,
    physicians: Option<i64>,
}

#[derive(Deserialize)]
pub(super) struct DownloadForm {
    summary: String,
    #[serde(default)]
    format: ExportFormat,
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn pick_scenario(id: Option<&str>) -> &'static Scenario {
    id.and_then(scenarios::find)
        .unwrap_or_else(scenarios::default_scenario)
}

fn page_view<'a>(
    state: &'a AppState,
    scenario: &'a Scenario,
    notes: &'a str,
    inputs: RoiInputs,
    outcome: Outcome<'a>,
) -> PageView<'a> {
    let provider = state.summaries.provider();
    PageView {
        app_name: &state.app_name,
        provider: provider.name(),
        model: provider.model(),
        scenario,
        notes,
        roi: roi::estimate(inputs),
        outcome,
    }
}

// ── Handlers ──────────────────────────────────────────────────────────────────

/// GET / — the form, preloaded with the chosen scenario's notes.
pub(super) async fn root(
    State(state): State<AppState>,
    Query(q): Query<PageQuery>,
) -> Html<String> {
    let scenario = pick_scenario(q.scenario.as_deref());
    let inputs = RoiInputs::from_raw(q.summaries_per_day, q.physicians);
    Html(page::render(&page_view(&state, scenario, scenario.notes, inputs, Outcome::Idle)))
}

/// POST /generate — validate, call the provider once, render the result.
pub(super) async fn generate(
    State(state): State<AppState>,
    Form(form): Form<GenerateForm>,
) -> Response {
    let scenario = pick_scenario(form.scenario.as_deref());
    let inputs = RoiInputs::from_raw(form.summaries_per_day, form.physicians);

    match state.summaries.generate(&form.notes).await {
        Ok(result) => {
            let view = page_view(&state, scenario, &form.notes, inputs, Outcome::Generated(&result));
            Html(page::render(&view)).into_response()
        }
        Err(e) => {
            let message = e.to_string();
            let view = page_view(&state, scenario, &form.notes, inputs, Outcome::Rejected(&message));
            (StatusCode::UNPROCESSABLE_ENTITY, Html(page::render(&view))).into_response()
        }
    }
}

/// POST /download — echo the summary back as an attachment.
///
/// Browsers submit textarea values with CRLF line breaks; the summary is
/// restored to the LF text the page was rendered from.
pub(super) async fn download(Form(form): Form<DownloadForm>) -> Response {
    download_response(form.summary.replace("\r\n", "\n"), form.format)
}
