//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `POST /shorturls`             - Create a short link
//! - `GET  /shorturls`             - Summaries of every short link
//! - `GET  /shorturls/{shortcode}` - Full statistics for one short link
//! - `GET  /health`                - Health check: store, event queue
//! - `GET  /{shortcode}`           - Short link redirect
//! - anything else                 - JSON 404
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - Cross-origin access for browser front-ends
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{fallback_handler, health_handler, redirect_handler};
use crate::api::middleware::{cors, tracing};
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// `cors_allowed_origins` is passed to [`cors::layer`]; an empty list or `*`
/// allows every origin.
pub fn app_router(state: AppState, cors_allowed_origins: &[String]) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(routes(state, cors_allowed_origins))
}

/// All routes and middleware, without path normalization.
pub fn routes(state: AppState, cors_allowed_origins: &[String]) -> Router {
    Router::new()
        .merge(api::routes::shorturl_routes())
        .route("/health", get(health_handler))
        .route("/{shortcode}", get(redirect_handler))
        .fallback(fallback_handler)
        .with_state(state)
        .layer(cors::layer(cors_allowed_origins))
        .layer(tracing::layer())
}
