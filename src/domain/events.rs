//! Structured events emitted by the registry core.
//!
//! Core operations never write log lines themselves. They hand a
//! [`RegistryEvent`] to an [`EventSink`], and a separate consumer (see
//! [`crate::domain::event_worker`]) decides how to format and record it.

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Something noteworthy that happened inside the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryEvent {
    Created {
        shortcode: String,
        original_url: String,
        expires_at: DateTime<Utc>,
    },
    Accessed {
        shortcode: String,
        original_url: String,
        click_count: u64,
    },
    RedirectRefused {
        shortcode: String,
        expired_at: DateTime<Utc>,
    },
    ClickRecordingFailed {
        shortcode: String,
        reason: String,
    },
    StatsRetrieved {
        shortcode: String,
        click_count: u64,
    },
    Listed {
        count: usize,
    },
}

impl RegistryEvent {
    /// Stable event name, used as a log field and metrics label.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Created { .. } => "created",
            Self::Accessed { .. } => "accessed",
            Self::RedirectRefused { .. } => "redirect_refused",
            Self::ClickRecordingFailed { .. } => "click_recording_failed",
            Self::StatsRetrieved { .. } => "stats_retrieved",
            Self::Listed { .. } => "listed",
        }
    }
}

/// Receiver side of the event-emission contract.
///
/// Implementations must not block: `emit` is called while serving requests.
#[cfg_attr(test, mockall::automock)]
pub trait EventSink: Send + Sync {
    fn emit(&self, event: RegistryEvent);
}

/// Forwards events to a bounded channel drained by the event worker.
///
/// When the queue is full the event is dropped with a warning, so a slow
/// consumer never stalls redirects.
#[derive(Clone)]
pub struct ChannelEventSink {
    sender: mpsc::Sender<RegistryEvent>,
}

impl ChannelEventSink {
    pub fn new(sender: mpsc::Sender<RegistryEvent>) -> Self {
        Self { sender }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: RegistryEvent) {
        match self.sender.try_send(event) {
            Ok(()) => {}
            Err(mpsc::error::TrySendError::Full(event)) => {
                warn!(kind = event.kind(), "Event queue full, dropping event");
            }
            Err(mpsc::error::TrySendError::Closed(event)) => {
                debug!(kind = event.kind(), "Event queue closed, dropping event");
            }
        }
    }
}

/// A sink that discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullEventSink;

impl EventSink for NullEventSink {
    fn emit(&self, _event: RegistryEvent) {}
}
