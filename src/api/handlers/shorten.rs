//! Handler for short link creation.

use axum::{Json, extract::State, http::StatusCode};
use serde_json::{Value, json};
use tracing::info;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::application::services::{MAX_VALIDITY_MINUTES, MIN_VALIDITY_MINUTES};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link for a long URL.
///
/// # Endpoint
///
/// `POST /shorturls`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com/some/long/path",
///   "validity": 30,        // optional, minutes (1..=10080)
///   "shortcode": "abc123"  // optional, "" counts as absent
/// }
/// ```
///
/// # Response
///
/// **201 Created**
///
/// ```json
/// {
///   "shortLink": "http://localhost:3001/abc123",
///   "expiry": "2025-01-01T12:30:00Z"
/// }
/// ```
///
/// # Errors
///
/// - 400 Bad Request: missing or invalid URL, validity not a whole number in range,
///   malformed shortcode
/// - 409 Conflict: custom shortcode already in use
pub async fn shorten_handler(
    State(state): State<AppState>,
    Json(payload): Json<ShortenRequest>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    let url = payload.url.unwrap_or_default();
    let validity = match payload.validity {
        None | Some(Value::Null) => state.default_validity_minutes,
        Some(raw) => whole_minutes(&raw).ok_or_else(|| invalid_validity(raw))?,
    };
    let shortcode = payload.shortcode.as_deref().filter(|code| !code.is_empty());

    let created = state.registry.create(&url, validity, shortcode)?;

    info!(shortcode = %created.shortcode, "Short link created");

    Ok((
        StatusCode::CREATED,
        Json(ShortenResponse {
            short_link: created.short_link,
            expiry: created.expires_at,
        }),
    ))
}

/// Accepts integers and integral floats such as `30.0`.
fn whole_minutes(raw: &Value) -> Option<i64> {
    if let Some(minutes) = raw.as_i64() {
        return Some(minutes);
    }

    let minutes = raw.as_f64()?;
    (minutes.fract() == 0.0 && minutes.abs() < i64::MAX as f64).then_some(minutes as i64)
}

fn invalid_validity(raw: Value) -> AppError {
    AppError::bad_request(
        format!(
            "Validity must be a whole number of minutes between {} and {}",
            MIN_VALIDITY_MINUTES, MAX_VALIDITY_MINUTES
        ),
        json!({
            "field": "validity",
            "provided": raw,
            "min": MIN_VALIDITY_MINUTES,
            "max": MAX_VALIDITY_MINUTES,
        }),
    )
}
