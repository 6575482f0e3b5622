//! DTOs for the short link listing endpoint.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::domain::entities::LinkSummary;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkSummaryItem {
    pub shortcode: String,
    pub original_url: String,
    pub short_link: String,
    pub expiry: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub click_count: u64,
}

impl From<LinkSummary> for LinkSummaryItem {
    fn from(summary: LinkSummary) -> Self {
        Self {
            shortcode: summary.shortcode,
            original_url: summary.original_url,
            short_link: summary.short_link,
            expiry: summary.expires_at,
            created_at: summary.created_at,
            click_count: summary.click_count,
        }
    }
}
