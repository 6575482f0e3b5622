//! DTOs for detailed link statistics.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::clicks::ClickInfo;
use crate::domain::entities::StatisticsEntry;

/// Full statistics for one short link, including every recorded click.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub shortcode: String,
    pub original_url: String,
    pub short_link: String,
    pub created_at: DateTime<Utc>,
    pub expiry: DateTime<Utc>,
    pub click_count: u64,
    pub click_data: Vec<ClickInfo>,
}

impl From<StatisticsEntry> for StatsResponse {
    fn from(entry: StatisticsEntry) -> Self {
        Self {
            shortcode: entry.record.shortcode,
            original_url: entry.record.original_url,
            short_link: entry.record.short_link,
            created_at: entry.record.created_at,
            expiry: entry.record.expires_at,
            click_count: entry.click_count,
            click_data: entry.clicks.into_iter().map(ClickInfo::from).collect(),
        }
    }
}
