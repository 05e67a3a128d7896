use std::net::SocketAddr;

use axum::Json;
use axum::body::to_bytes;
use axum::extract::{ConnectInfo, Path, Request, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};
use vitrine_core::{Relayed, Resolution, SiteChrome, VitrineError, augment_events};

use crate::state::AppState;

/// Largest conversions payload accepted from the browser.
const MAX_EVENT_BODY: usize = 256 * 1024;

/// JSON error body with the status derived from the core error.
pub struct ApiError(pub VitrineError);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        match self.0 {
            VitrineError::Conversions { body, .. } => {
                (status, [(header::CONTENT_TYPE, "application/json")], body).into_response()
            }
            err => (status, Json(json!({ "error": err.to_string() }))).into_response(),
        }
    }
}

impl From<VitrineError> for ApiError {
    fn from(err: VitrineError) -> Self {
        ApiError(err)
    }
}

pub async fn healthz() -> &'static str {
    "ok"
}

pub async fn home(state: State<AppState>) -> Response {
    page(state, Path(String::new())).await
}

#[tracing::instrument(skip_all, fields(path = %path))]
pub async fn page(State(state): State<AppState>, Path(path): Path<String>) -> Response {
    match state.resolver.resolve_bundle(&path).await {
        Resolution::Found { view, .. } => Json(view).into_response(),
        Resolution::NotFound => {
            (StatusCode::NOT_FOUND, Json(json!({ "error": "not found", "path": format!("/{}", path) }))).into_response()
        }
        Resolution::Unavailable => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "error": "content unavailable", "path": format!("/{}", path) })),
        )
            .into_response(),
    }
}

#[tracing::instrument(skip_all)]
pub async fn chrome(State(state): State<AppState>) -> Json<SiteChrome> {
    Json(state.resolver.site_chrome().await)
}

/// First hop of `X-Forwarded-For`, then `X-Real-IP`, then the socket peer.
fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> Option<String> {
    let forwarded = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty());
    let real = headers.get("x-real-ip").and_then(|v| v.to_str().ok()).map(str::trim).filter(|v| !v.is_empty());

    forwarded.or(real).map(str::to_string).or_else(|| peer.map(|addr| addr.ip().to_string()))
}

#[tracing::instrument(skip_all)]
pub async fn conversions(State(state): State<AppState>, request: Request) -> Result<Response, ApiError> {
    if !state.conversions.config().is_configured() {
        tracing::error!("conversions endpoint called without pixel credentials");
        return Err(VitrineError::Config("Meta pixel id or access token is not configured".to_string()).into());
    }

    let peer = request.extensions().get::<ConnectInfo<SocketAddr>>().map(|info| info.0);
    let ip = client_ip(request.headers(), peer);
    let user_agent = request
        .headers()
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let bytes = to_bytes(request.into_body(), MAX_EVENT_BODY).await.map_err(|e| VitrineError::Conversions {
        status: 400,
        body: json!({ "error": e.to_string() }).to_string(),
    })?;
    let mut payload: Value = serde_json::from_slice(&bytes).map_err(|e| VitrineError::Conversions {
        status: 400,
        body: json!({ "error": format!("invalid JSON: {}", e) }).to_string(),
    })?;

    let count = augment_events(&mut payload, ip.as_deref(), user_agent.as_deref())?;
    tracing::debug!(count, "forwarding conversion events");

    let Relayed { status, content_type, body } = state.conversions.send(&payload).await?;
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::OK);
    let content_type = content_type.unwrap_or_else(|| "application/json".to_string());
    Ok((status, [(header::CONTENT_TYPE, content_type)], body).into_response())
}
