//! Handler for short URL redirect.

use axum::{
    extract::{ConnectInfo, Path, State},
    http::HeaderMap,
    response::{IntoResponse, Redirect},
};
use std::net::SocketAddr;

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_info::click_metadata;

/// Redirects a shortcode to its original URL.
///
/// # Endpoint
///
/// `GET /{shortcode}`
///
/// # Request Flow
///
/// 1. Collect click metadata from headers and the peer address
/// 2. Resolve the shortcode, which records the click when the link is live
/// 3. Return 307 Temporary Redirect
///
/// # Errors
///
/// - 404 Not Found: shortcode was never registered
/// - 410 Gone: shortcode has expired
pub async fn redirect_handler(
    Path(shortcode): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Result<impl IntoResponse, AppError> {
    let metadata = click_metadata(&headers, addr, state.behind_proxy);

    let original_url = state.registry.resolve(&shortcode, metadata)?;

    Ok(Redirect::temporary(&original_url))
}
