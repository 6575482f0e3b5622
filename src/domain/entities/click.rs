//! Click entity representing a single redirect event.

use chrono::{DateTime, Utc};

/// Source recorded when a click carries no referrer.
pub const DIRECT_SOURCE: &str = "Direct";

/// A click recorded when a live shortcode is resolved.
///
/// Immutable once appended to its statistics entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickEvent {
    pub timestamp: DateTime<Utc>,
    /// Referrer of the request, or [`DIRECT_SOURCE`].
    pub source: String,
    /// Coarse location such as a country code or `"Local"`.
    pub location: Option<String>,
    pub user_agent: Option<String>,
    pub client_address: Option<String>,
}

impl ClickEvent {
    /// Builds a click from request metadata, defaulting an empty source to
    /// [`DIRECT_SOURCE`].
    pub fn from_metadata(metadata: ClickMetadata, timestamp: DateTime<Utc>) -> Self {
        let source = metadata
            .source
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DIRECT_SOURCE.to_string());

        Self {
            timestamp,
            source,
            location: metadata.location,
            user_agent: metadata.user_agent,
            client_address: metadata.client_address,
        }
    }
}

/// Request metadata captured by the transport layer for a redirect.
///
/// All fields are optional to handle missing headers gracefully.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClickMetadata {
    pub source: Option<String>,
    pub user_agent: Option<String>,
    pub client_address: Option<String>,
    pub location: Option<String>,
}

impl ClickMetadata {
    pub fn new(
        source: Option<&str>,
        user_agent: Option<&str>,
        client_address: Option<String>,
        location: Option<String>,
    ) -> Self {
        Self {
            source: source.map(|s| s.to_string()),
            user_agent: user_agent.map(|s| s.to_string()),
            client_address,
            location,
        }
    }
}
