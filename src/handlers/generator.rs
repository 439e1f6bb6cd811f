use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{header, StatusCode},
    response::Response,
};
use std::sync::Arc;

use crate::AppState;

use super::ApiError;

/// Forward `POST /api/generate` to the upstream generator
pub async fn generate(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Response, ApiError> {
    forward(&state, "generate", body).await
}

/// Forward `POST /api/download` to the upstream generator
pub async fn download(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Response, ApiError> {
    forward(&state, "download", body).await
}

/// Relay the request body verbatim and hand back status, content type,
/// content disposition and body unchanged. Bodies carry the API key and are
/// never logged.
async fn forward(state: &AppState, endpoint: &str, body: Bytes) -> Result<Response, ApiError> {
    let upstream = state
        .config
        .upstream()
        .ok_or_else(|| ApiError::unavailable("No upstream generator configured (set UPSTREAM_URL)"))?;
    let url = format!("{}/api/{}", upstream.trim_end_matches('/'), endpoint);

    let resp = state
        .http
        .post(&url)
        .header("Content-Type", "application/json")
        .body(body.to_vec())
        .send()
        .await
        .map_err(|e| {
            tracing::warn!("Upstream {} unreachable: {}", url, e);
            ApiError::bad_gateway(format!("Generator unreachable: {}", e))
        })?;

    let status = StatusCode::from_u16(resp.status().as_u16()).unwrap_or(StatusCode::BAD_GATEWAY);
    tracing::info!("Forwarded /api/{} -> {}", endpoint, status);

    let mut builder = Response::builder().status(status);
    for name in [header::CONTENT_TYPE, header::CONTENT_DISPOSITION] {
        if let Some(value) = resp.headers().get(name.as_str()).and_then(|v| v.to_str().ok()) {
            builder = builder.header(name, value.to_string());
        }
    }

    let bytes = resp
        .bytes()
        .await
        .map_err(|e| ApiError::bad_gateway(format!("Generator response interrupted: {}", e)))?;

    builder
        .body(Body::from(bytes.to_vec()))
        .map_err(|e| ApiError::internal(e.to_string()))
}
