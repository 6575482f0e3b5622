//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};
use chrono::Utc;

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: The event queue is closed
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "timestamp": "2025-01-01T12:00:00Z",
///   "uptimeSeconds": 42,
///   "checks": {
///     "store": { "status": "ok", "message": "3 short links" },
///     "eventQueue": { "status": "ok", "message": "Capacity: 10000" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let store_check = check_store(&state);
    let queue_check = check_event_queue(&state);

    let all_healthy = store_check.status == "ok" && queue_check.status == "ok";

    let now = Utc::now();
    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: now,
        uptime_seconds: (now - state.started_at).num_seconds(),
        checks: HealthChecks {
            store: store_check,
            event_queue: queue_check,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

fn check_store(state: &AppState) -> CheckStatus {
    CheckStatus {
        status: "ok".to_string(),
        message: Some(format!("{} short links", state.registry.len())),
    }
}

/// Checks if the registry event queue is still consumed.
fn check_event_queue(state: &AppState) -> CheckStatus {
    if state.event_sender.is_closed() {
        CheckStatus {
            status: "error".to_string(),
            message: Some("Event queue is closed".to_string()),
        }
    } else {
        CheckStatus {
            status: "ok".to_string(),
            message: Some(format!("Capacity: {}", state.event_sender.capacity())),
        }
    }
}
