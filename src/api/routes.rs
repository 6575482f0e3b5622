//! API route configuration.

use crate::api::handlers::{shorten_handler, stats_handler, stats_list_handler};
use crate::state::AppState;
use axum::{Router, routing::get};

/// Short link management routes.
///
/// # Endpoints
///
/// - `POST /shorturls`             - Create a short link
/// - `GET  /shorturls`             - List every short link with its click count
/// - `GET  /shorturls/{shortcode}` - Full statistics for one short link
pub fn shorturl_routes() -> Router<AppState> {
    Router::new()
        .route("/shorturls", get(stats_list_handler).post(shorten_handler))
        .route("/shorturls/{shortcode}", get(stats_handler))
}
