//! HTTP error type and JSON error envelope.
//!
//! Every failed request is answered with:
//!
//! ```json
//! { "error": { "code": "not_found", "message": "...", "details": {} } }
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::domain::errors::RegistryError;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug)]
pub enum AppError {
    Validation { message: String, details: Value },
    NotFound { message: String, details: Value },
    Conflict { message: String, details: Value },
    Gone { message: String, details: Value },
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }
    pub fn gone(message: impl Into<String>, details: Value) -> Self {
        Self::Gone {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Gone { .. } => StatusCode::GONE,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_error_info(&self) -> ErrorInfo {
        let (code, message, details) = match self {
            AppError::Validation { message, details } => ("validation_error", message, details),
            AppError::NotFound { message, details } => ("not_found", message, details),
            AppError::Conflict { message, details } => ("conflict", message, details),
            AppError::Gone { message, details } => ("gone", message, details),
            AppError::Internal { message, details } => ("internal_error", message, details),
        };

        ErrorInfo {
            code,
            message: message.clone(),
            details: details.clone(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<RegistryError> for AppError {
    fn from(err: RegistryError) -> Self {
        let message = err.to_string();

        match err {
            RegistryError::InvalidUrl { reason } => {
                AppError::bad_request(message, json!({ "field": "url", "reason": reason }))
            }
            RegistryError::InvalidValidity { provided, min, max } => AppError::bad_request(
                message,
                json!({ "field": "validity", "provided": provided, "min": min, "max": max }),
            ),
            RegistryError::InvalidShortcode { shortcode } => AppError::bad_request(
                message,
                json!({ "field": "shortcode", "shortcode": shortcode }),
            ),
            RegistryError::ShortcodeTaken { shortcode } => {
                AppError::conflict(message, json!({ "shortcode": shortcode }))
            }
            RegistryError::NotFound { shortcode } => {
                AppError::not_found(message, json!({ "shortcode": shortcode }))
            }
            RegistryError::Expired {
                shortcode,
                expired_at,
            } => AppError::gone(
                message,
                json!({ "shortcode": shortcode, "expiredAt": expired_at }),
            ),
            RegistryError::ClickRecordingFailure { shortcode, .. } => {
                AppError::internal(message, json!({ "shortcode": shortcode }))
            }
            RegistryError::CodeSpaceExhausted { length } => {
                tracing::error!(length, "Shortcode space exhausted");
                AppError::internal(message, json!({ "length": length }))
            }
        }
    }
}
