//! Handler for requests that match no route.

use axum::http::Uri;
use serde_json::json;

use crate::error::AppError;

/// Answers unknown endpoints with a JSON 404 in the usual error envelope.
pub async fn fallback_handler(uri: Uri) -> AppError {
    AppError::not_found("Endpoint not found", json!({ "path": uri.path() }))
}
