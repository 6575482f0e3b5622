//! Error taxonomy of the shortcode registry core.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors produced by [`crate::application::services::Registry`] and
/// [`crate::application::services::StatisticsTracker`].
///
/// Validation variants are always returned before any state is mutated.
/// [`RegistryError::ClickRecordingFailure`] never leaves `resolve`; it is
/// logged and turned into an event instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("Invalid URL: {reason}")]
    InvalidUrl { reason: String },

    #[error("Validity must be between {min} and {max} minutes, got {provided}")]
    InvalidValidity { provided: i64, min: i64, max: i64 },

    #[error("Invalid shortcode '{shortcode}': must be 3-20 letters, digits, '-' or '_'")]
    InvalidShortcode { shortcode: String },

    #[error("Shortcode '{shortcode}' is already taken")]
    ShortcodeTaken { shortcode: String },

    #[error("Shortcode '{shortcode}' not found")]
    NotFound { shortcode: String },

    #[error("Shortcode '{shortcode}' expired at {expired_at}")]
    Expired {
        shortcode: String,
        expired_at: DateTime<Utc>,
    },

    #[error("Failed to record click for '{shortcode}': {reason}")]
    ClickRecordingFailure { shortcode: String, reason: String },

    #[error("No free shortcodes of length {length} remain")]
    CodeSpaceExhausted { length: usize },
}

impl RegistryError {
    pub fn not_found(shortcode: impl Into<String>) -> Self {
        Self::NotFound {
            shortcode: shortcode.into(),
        }
    }

    /// Short machine-readable name of the variant, used in events and metrics labels.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidUrl { .. } => "invalid_url",
            Self::InvalidValidity { .. } => "invalid_validity",
            Self::InvalidShortcode { .. } => "invalid_shortcode",
            Self::ShortcodeTaken { .. } => "shortcode_taken",
            Self::NotFound { .. } => "not_found",
            Self::Expired { .. } => "expired",
            Self::ClickRecordingFailure { .. } => "click_recording_failure",
            Self::CodeSpaceExhausted { .. } => "code_space_exhausted",
        }
    }
}
