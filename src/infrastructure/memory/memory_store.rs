//! In-memory implementation of the link and statistics repositories.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use parking_lot::RwLock;
use tracing::debug;

use crate::domain::entities::{
    ClickEvent, ClickMetadata, LinkSummary, NewShortcodeRecord, ShortcodeRecord, StatisticsEntry,
};
use crate::domain::errors::RegistryError;
use crate::domain::repositories::{LinkRepository, RecordedClick, StatsRepository};

/// A record together with its click history.
///
/// The record is immutable; only the click log changes, behind its own lock.
#[derive(Debug)]
struct StoredLink {
    record: ShortcodeRecord,
    clicks: RwLock<Vec<ClickEvent>>,
}

impl StoredLink {
    fn new(record: ShortcodeRecord) -> Self {
        Self {
            record,
            clicks: RwLock::new(Vec::new()),
        }
    }
}

/// Process-local store backing both [`LinkRepository`] and [`StatsRepository`].
///
/// - The shortcode map is a sharded [`DashMap`]; uniqueness is enforced with
///   its `entry` API, so check-and-insert is one step under the shard lock.
/// - Every link owns its click log behind a separate [`RwLock`]. Recording a
///   click locks only that log, so clicks on different shortcodes never
///   contend and the map's shard locks are never held while appending.
///
/// Nothing is ever removed; the store lives as long as the process.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    links: DashMap<String, Arc<StoredLink>>,
    /// Occupied codes per shortcode length.
    lengths: DashMap<usize, usize>,
    next_sequence: AtomicU64,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn get(&self, shortcode: &str) -> Option<Arc<StoredLink>> {
        self.links.get(shortcode).map(|entry| Arc::clone(entry.value()))
    }
}

impl LinkRepository for InMemoryStore {
    fn insert(&self, new_record: NewShortcodeRecord) -> Result<ShortcodeRecord, RegistryError> {
        match self.links.entry(new_record.shortcode.clone()) {
            Entry::Occupied(_) => Err(RegistryError::ShortcodeTaken {
                shortcode: new_record.shortcode,
            }),
            Entry::Vacant(slot) => {
                let sequence = self.next_sequence.fetch_add(1, Ordering::Relaxed);
                let record = new_record.into_record(sequence);
                slot.insert(Arc::new(StoredLink::new(record.clone())));
                *self.lengths.entry(record.shortcode.len()).or_insert(0) += 1;

                debug!(shortcode = %record.shortcode, sequence, "Record inserted");
                Ok(record)
            }
        }
    }

    fn find_by_shortcode(&self, shortcode: &str) -> Option<ShortcodeRecord> {
        self.get(shortcode).map(|link| link.record.clone())
    }

    fn exists(&self, shortcode: &str) -> bool {
        self.links.contains_key(shortcode)
    }

    fn count(&self) -> usize {
        self.links.len()
    }

    fn count_with_length(&self, length: usize) -> usize {
        self.lengths.get(&length).map_or(0, |count| *count)
    }
}

impl StatsRepository for InMemoryStore {
    fn record_click(
        &self,
        shortcode: &str,
        metadata: ClickMetadata,
        now: DateTime<Utc>,
    ) -> Result<RecordedClick, RegistryError> {
        let link = self
            .get(shortcode)
            .ok_or_else(|| RegistryError::not_found(shortcode))?;

        let mut clicks = link.clicks.write();
        let timestamp = clicks
            .last()
            .map_or(now, |previous| now.max(previous.timestamp));

        let click = ClickEvent::from_metadata(metadata, timestamp);
        clicks.push(click.clone());

        Ok(RecordedClick {
            click,
            click_count: clicks.len() as u64,
        })
    }

    fn get_stats(&self, shortcode: &str) -> Option<StatisticsEntry> {
        let link = self.get(shortcode)?;
        let clicks = link.clicks.read().clone();

        Some(StatisticsEntry::new(link.record.clone(), clicks))
    }

    fn list_summaries(&self) -> Vec<LinkSummary> {
        let links: Vec<Arc<StoredLink>> = self
            .links
            .iter()
            .map(|entry| Arc::clone(entry.value()))
            .collect();

        let mut summaries: Vec<(u64, LinkSummary)> = links
            .iter()
            .map(|link| {
                let click_count = link.clicks.read().len() as u64;
                (
                    link.record.sequence,
                    LinkSummary::from_record(&link.record, click_count),
                )
            })
            .collect();

        summaries.sort_by_key(|(sequence, _)| *sequence);
        summaries.into_iter().map(|(_, summary)| summary).collect()
    }
}
