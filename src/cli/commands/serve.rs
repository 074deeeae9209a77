//! HTTP API server for integration with other systems.
//!
//! Provides REST endpoints for conversion, rendering and export.

use crate::cli::{preflight, Output};
use crate::config::Settings;
use crate::error::{ArticleError, Result};
use crate::export::{build_document_today, export_filename};
use crate::orchestrator::{Conversion, Converter};
use crate::render::render;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

/// Shared application state.
struct AppState {
    settings: Settings,
    /// Held for the duration of a conversion; only one runs at a time.
    converting: Mutex<()>,
}

/// Build the API router.
pub fn router(settings: Settings) -> Router {
    let state = Arc::new(AppState {
        settings,
        converting: Mutex::new(()),
    });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/convert", post(convert))
        .route("/render", post(render_markdown))
        .route("/export", post(export_markdown))
        .layer(cors)
        .with_state(state)
}

/// Run the HTTP API server.
pub async fn run_serve(host: &str, port: u16, settings: Settings) -> anyhow::Result<()> {
    if let Err(e) = settings.check_credentials() {
        Output::warning(&format!("{} - /convert will fail until it is set.", e));
    }

    let app = router(settings);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    Output::header("yt-article API Server");
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    println!();
    println!("Endpoints:");
    Output::kv("Health", "GET  /health");
    Output::kv("Convert", "POST /convert");
    Output::kv("Render", "POST /render");
    Output::kv("Export", "POST /export");
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, app).await?;

    Ok(())
}

// === Request/Response Types ===

#[derive(Deserialize)]
struct ConvertRequest {
    /// YouTube URL or video ID
    input: String,
}

#[derive(Serialize)]
struct ConvertResponse {
    video_id: String,
    title: String,
    markdown: String,
    html: String,
}

#[derive(Deserialize)]
struct RenderRequest {
    markdown: String,
}

#[derive(Serialize)]
struct RenderResponse {
    html: String,
}

#[derive(Deserialize)]
struct ExportRequest {
    title: String,
    markdown: String,
}

#[derive(Serialize)]
struct ExportResponse {
    filename: String,
    document: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(ErrorResponse { error: message })).into_response()
}

/// HTTP status for a failed conversion.
fn error_status(err: &ArticleError) -> StatusCode {
    match err {
        ArticleError::InvalidReference(_) => StatusCode::BAD_REQUEST,
        ArticleError::MissingCredential(_) => StatusCode::PRECONDITION_FAILED,
        ArticleError::NoTranscript(_) => StatusCode::NOT_FOUND,
        ArticleError::TranscriptFetch { .. }
        | ArticleError::MalformedTranscript(_)
        | ArticleError::ModelApi { .. }
        | ArticleError::EmptyModelResponse(_)
        | ArticleError::Http(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

async fn run_conversion(state: &AppState, input: &str) -> Result<Conversion> {
    let video = preflight::prepare_conversion(input, &state.settings)?;
    let converter = Converter::new(&state.settings)?;
    converter.convert_video(&video, |_| {}).await
}

// === Handlers ===

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn convert(State(state): State<Arc<AppState>>, Json(req): Json<ConvertRequest>) -> Response {
    let Ok(_guard) = state.converting.try_lock() else {
        return error_response(
            StatusCode::CONFLICT,
            "A conversion is already running".to_string(),
        );
    };

    match run_conversion(&state, &req.input).await {
        Ok(conversion) => {
            info!("Converted {} ({})", conversion.video, conversion.title);
            let html = render(&conversion.markdown);
            Json(ConvertResponse {
                video_id: conversion.video.to_string(),
                title: conversion.title,
                markdown: conversion.markdown,
                html,
            })
            .into_response()
        }
        Err(e) => {
            warn!("Conversion failed: {}", e);
            error_response(error_status(&e), e.to_string())
        }
    }
}

async fn render_markdown(Json(req): Json<RenderRequest>) -> impl IntoResponse {
    Json(RenderResponse {
        html: render(&req.markdown),
    })
}

async fn export_markdown(Json(req): Json<ExportRequest>) -> impl IntoResponse {
    Json(ExportResponse {
        filename: export_filename(&req.title),
        document: build_document_today(&req.title, &req.markdown),
    })
}
