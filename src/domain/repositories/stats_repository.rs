//! Repository trait for click statistics.

use chrono::{DateTime, Utc};

use crate::domain::entities::{ClickEvent, ClickMetadata, LinkSummary, StatisticsEntry};
use crate::domain::errors::RegistryError;

/// Result of appending a click: the stored event and the new total.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedClick {
    pub click: ClickEvent,
    pub click_count: u64,
}

/// Repository interface for per-shortcode access history.
///
/// # Implementations
///
/// - [`crate::infrastructure::memory::InMemoryStore`] - per-entry locked click logs
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
pub trait StatsRepository: Send + Sync {
    /// Appends a click to the shortcode's history and increments its count.
    ///
    /// `now` is the caller's clock reading. Implementations stamp the event
    /// with it, but never earlier than the previous event, so history stays
    /// ordered. Concurrent calls for one shortcode never lose an increment.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] if no entry exists for the shortcode.
    fn record_click(
        &self,
        shortcode: &str,
        metadata: ClickMetadata,
        now: DateTime<Utc>,
    ) -> Result<RecordedClick, RegistryError>;

    /// Returns a consistent snapshot of the record and its full click history.
    fn get_stats(&self, shortcode: &str) -> Option<StatisticsEntry>;

    /// Summaries of every entry, ordered by creation sequence.
    fn list_summaries(&self) -> Vec<LinkSummary>;
}
