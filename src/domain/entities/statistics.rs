//! Read models returned by the statistics tracker.

use chrono::{DateTime, Utc};

use super::{ClickEvent, ShortcodeRecord};

/// Snapshot of a shortcode's full access history.
///
/// `click_count` always equals `clicks.len()`; clicks are in commit order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatisticsEntry {
    pub record: ShortcodeRecord,
    pub click_count: u64,
    pub clicks: Vec<ClickEvent>,
}

impl StatisticsEntry {
    pub fn new(record: ShortcodeRecord, clicks: Vec<ClickEvent>) -> Self {
        Self {
            record,
            click_count: clicks.len() as u64,
            clicks,
        }
    }
}

/// Per-shortcode summary used when listing everything, without click detail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkSummary {
    pub shortcode: String,
    pub original_url: String,
    pub short_link: String,
    pub expires_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub click_count: u64,
}

impl LinkSummary {
    pub fn from_record(record: &ShortcodeRecord, click_count: u64) -> Self {
        Self {
            shortcode: record.shortcode.clone(),
            original_url: record.original_url.clone(),
            short_link: record.short_link.clone(),
            expires_at: record.expires_at,
            created_at: record.created_at,
            click_count,
        }
    }
}
