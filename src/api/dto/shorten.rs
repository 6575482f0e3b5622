//! DTOs for the short link creation endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Request to create one short link.
///
/// `url` is optional at the JSON level so a missing field is reported as an
/// invalid URL rather than a deserialization failure.
#[derive(Debug, Deserialize)]
pub struct ShortenRequest {
    pub url: Option<String>,

    /// Validity in minutes; the configured default applies when absent or null.
    ///
    /// Kept as a raw JSON value so a fractional or non-numeric validity is a
    /// validation error instead of a deserialization failure.
    pub validity: Option<Value>,

    /// Caller-chosen shortcode; a random one is generated when absent or empty.
    pub shortcode: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortenResponse {
    pub short_link: String,
    pub expiry: DateTime<Utc>,
}
