//! HTTP surface for the content layer.
//!
//! Hands resolved page bundles to the presentation layer as JSON and relays
//! browser conversion events to the Meta Conversions API.

pub mod config;
pub mod routes;
pub mod state;

use axum::Router;
use axum::http::Method;
use axum::routing::{get, post};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use config::ServerConfig;
pub use state::AppState;

pub fn app_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .route("/healthz", get(routes::healthz))
        .route("/api/pages", get(routes::home))
        .route("/api/pages/{*path}", get(routes::page))
        .route("/api/chrome", get(routes::chrome))
        .route("/api/conversions", post(routes::conversions))
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
