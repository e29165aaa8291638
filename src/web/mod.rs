//! Axum HTTP surface — the HTML form plus a small JSON API.
//!
//! `WebServer::run()` drives the axum event loop until the
//! [`CancellationToken`] fires, then shuts down gracefully.
//!
//! ## URL layout
//!
//! ```text
//! GET  /                    form page (?scenario=, ?summaries_per_day=, ?physicians=)
//! POST /generate            form submit → result page
//! POST /download            form submit → summary as .txt / .md attachment
//! GET  /favicon.ico         → 204
//!
//! GET  /api/health
//! GET  /api/models          models the provider can generate with
//! GET  /api/scenarios
//! GET  /api/roi             ?summaries_per_day=&physicians=
//! POST /api/suggestions     { notes }
//! POST /api/summary         { notes }            → SummaryResult
//! POST /api/export          { summary, format }  → attachment
//! ```

mod api;
mod page;
mod ui;

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{HeaderValue, Response, StatusCode, header},
    response::IntoResponse,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::error::AppError;
use crate::summary::SummaryService;
use crate::summary::export::{ExportFormat, content_disposition, export_file_name};

// ── Shared request state ──────────────────────────────────────────────────────

/// Router state injected into every handler via [`axum::extract::State`].
///
/// Cheap to clone: all fields are reference-counted.
#[derive(Clone)]
pub struct AppState {
    /// Shown in the page title and health output.
    pub app_name: Arc<str>,
    pub summaries: Arc<SummaryService>,
}

impl AppState {
    pub fn new(app_name: impl Into<Arc<str>>, summaries: SummaryService) -> Self {
        Self {
            app_name: app_name.into(),
            summaries: Arc::new(summaries),
        }
    }
}

// ── WebServer ─────────────────────────────────────────────────────────────────

pub struct WebServer {
    bind_addr: String,
    state: AppState,
}

impl WebServer {
    pub fn new(bind_addr: impl Into<String>, state: AppState) -> Self {
        Self { bind_addr: bind_addr.into(), state }
    }

    /// Bind and serve until `shutdown` is cancelled.
    pub async fn run(self, shutdown: CancellationToken) -> Result<(), AppError> {
        let listener = TcpListener::bind(&self.bind_addr)
            .await
            .map_err(|e| AppError::Http(format!("bind failed on {}: {e}", self.bind_addr)))?;
        serve(listener, self.state, shutdown).await
    }
}

/// Serve on an already-bound listener. Split out so callers can bind port 0.
pub async fn serve(
    listener: TcpListener,
    state: AppState,
    shutdown: CancellationToken,
) -> Result<(), AppError> {
    let local_addr = listener.local_addr()?;
    info!(
        %local_addr,
        provider = state.summaries.provider().name(),
        model = state.summaries.provider().model(),
        "http server listening"
    );

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .map_err(|e| AppError::Http(format!("server error: {e}")))?;

    info!("http server shut down");
    Ok(())
}

// ── Router ────────────────────────────────────────────────────────────────────

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // API routes
        .route("/api/health",      get(api::health))
        .route("/api/models",      get(api::models))
        .route("/api/scenarios",   get(api::scenarios))
        .route("/api/roi",         get(api::roi))
        .route("/api/suggestions", post(api::suggestions))
        .route("/api/summary",     post(api::summary))
        .route("/api/export",      post(api::export))
        // UI routes
        .route("/favicon.ico", get(|| async { StatusCode::NO_CONTENT }))
        .route("/",            get(ui::root))
        .route("/generate",    post(ui::generate))
        .route("/download",    post(ui::download))
        .with_state(state)
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// The summary text as a timestamped file download.
pub(crate) fn download_response(summary: String, format: ExportFormat) -> axum::response::Response {
    let file_name = export_file_name(format, chrono::Local::now().naive_local());
    let Ok(disposition) = HeaderValue::from_str(&content_disposition(&file_name)) else {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    };

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, format.mime())
        .header(header::CONTENT_DISPOSITION, disposition)
        .body(Body::from(summary))
        .unwrap_or_else(|_| StatusCode::INTERNAL_SERVER_ERROR.into_response())
}
