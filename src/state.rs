//! Shared application state injected into every handler.

use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::application::services::{Registry, StatisticsTracker};
use crate::domain::events::RegistryEvent;
use crate::infrastructure::memory::InMemoryStore;

/// Registry backed by the in-memory store.
pub type AppRegistry = Registry<InMemoryStore, InMemoryStore>;

/// Statistics tracker backed by the in-memory store.
pub type AppStatisticsTracker = StatisticsTracker<InMemoryStore>;

#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<AppRegistry>,
    pub statistics: Arc<AppStatisticsTracker>,
    /// Sender side of the registry event queue, kept for health reporting.
    pub event_sender: mpsc::Sender<RegistryEvent>,
    pub default_validity_minutes: i64,
    pub behind_proxy: bool,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn new(
        registry: Arc<AppRegistry>,
        statistics: Arc<AppStatisticsTracker>,
        event_sender: mpsc::Sender<RegistryEvent>,
        default_validity_minutes: i64,
        behind_proxy: bool,
    ) -> Self {
        Self {
            registry,
            statistics,
            event_sender,
            default_validity_minutes,
            behind_proxy,
            started_at: Utc::now(),
        }
    }
}
