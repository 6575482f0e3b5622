//! Click recording and statistics service.

use std::sync::Arc;

use crate::domain::clock::Clock;
use crate::domain::entities::{ClickMetadata, LinkSummary, StatisticsEntry};
use crate::domain::errors::RegistryError;
use crate::domain::events::{EventSink, RegistryEvent};
use crate::domain::repositories::{RecordedClick, StatsRepository};

/// Service owning per-shortcode access history.
///
/// Writes go through [`StatisticsTracker::record_click`], which the
/// [`super::Registry`] calls for every successful redirect. Reads return
/// owned snapshots and never mutate state.
pub struct StatisticsTracker<S: StatsRepository> {
    repository: Arc<S>,
    clock: Arc<dyn Clock>,
    events: Arc<dyn EventSink>,
}

impl<S: StatsRepository> StatisticsTracker<S> {
    /// Creates a new statistics tracker.
    pub fn new(repository: Arc<S>, clock: Arc<dyn Clock>, events: Arc<dyn EventSink>) -> Self {
        Self {
            repository,
            clock,
            events,
        }
    }

    /// Appends a click for `shortcode`, stamped with the current time.
    ///
    /// Atomic per shortcode: concurrent calls each add exactly one event and
    /// one to the count.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] if the shortcode has no statistics entry.
    pub fn record_click(
        &self,
        shortcode: &str,
        metadata: ClickMetadata,
    ) -> Result<RecordedClick, RegistryError> {
        self.repository
            .record_click(shortcode, metadata, self.clock.now())
    }

    /// Returns the full statistics of a shortcode, expired or not.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::NotFound`] if the shortcode was never registered.
    pub fn get_stats(&self, shortcode: &str) -> Result<StatisticsEntry, RegistryError> {
        let entry = self
            .repository
            .get_stats(shortcode)
            .ok_or_else(|| RegistryError::not_found(shortcode))?;

        self.events.emit(RegistryEvent::StatsRetrieved {
            shortcode: shortcode.to_string(),
            click_count: entry.click_count,
        });

        Ok(entry)
    }

    /// Lists a summary of every shortcode in creation order.
    pub fn list_all(&self) -> Vec<LinkSummary> {
        let summaries = self.repository.list_summaries();

        self.events.emit(RegistryEvent::Listed {
            count: summaries.len(),
        });

        summaries
    }
}
