use crate::Result;
use crate::service::{AnalysisRequest, AnalysisResponse, ChatRequest, PulseService};
use crate::session::SessionKey;
use axum::body::Body;
use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use futures::{StreamExt, future};
use http::{HeaderMap, header};
use std::convert::Infallible;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub const WELCOME_MESSAGE: &str = "Welcome to the Pulse performance API";

/// Chat answers are streamed as plain text fragments under this type
pub const CHAT_CONTENT_TYPE: &str = "text/event-stream";

/// Build the API router over a service
pub fn router(service: PulseService) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/analyze", post(analyze))
        .route("/api/chat", post(chat))
        .route("/api/download-report", get(download_report))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

async fn index() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": WELCOME_MESSAGE }))
}

async fn analyze(
    State(service): State<PulseService>,
    headers: HeaderMap,
    Json(request): Json<AnalysisRequest>,
) -> Result<Json<AnalysisResponse>> {
    let key = SessionKey::from_headers(&headers);
    Ok(Json(service.analyze(&key, &request).await?))
}

async fn chat(
    State(service): State<PulseService>,
    headers: HeaderMap,
    Json(request): Json<ChatRequest>,
) -> Result<impl IntoResponse> {
    let key = SessionKey::from_headers(&headers);
    let chunks = service.chat(&key, &request.history).await?;

    // Chunks go out untouched; a failure after the first byte can only end the body
    let body = chunks
        .take_while(|chunk| {
            if let Err(e) = chunk {
                tracing::error!("Chat stream failed: {}", e);
            }
            future::ready(chunk.is_ok())
        })
        .map(|chunk| Ok::<_, Infallible>(chunk.unwrap_or_default()));

    Ok((
        [(header::CONTENT_TYPE, CHAT_CONTENT_TYPE)],
        Body::from_stream(body),
    ))
}

async fn download_report(State(service): State<PulseService>, headers: HeaderMap) -> Result<impl IntoResponse> {
    let key = SessionKey::from_headers(&headers);
    let download = service.download(&key).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/json".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename={}", download.filename),
            ),
        ],
        download.body,
    ))
}
