//! Background consumer that turns registry events into log records.

use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::domain::events::RegistryEvent;

/// Drains the event queue until every sender is dropped.
///
/// Each event becomes one structured `tracing` record and bumps the
/// `shortcode_events_total` counter, labelled by event kind.
pub async fn run_event_worker(mut rx: mpsc::Receiver<RegistryEvent>) {
    while let Some(event) = rx.recv().await {
        metrics::counter!("shortcode_events_total", "kind" => event.kind()).increment(1);
        log_event(&event);
    }

    info!("Event queue closed, event worker stopping");
}

fn log_event(event: &RegistryEvent) {
    match event {
        RegistryEvent::Created {
            shortcode,
            original_url,
            expires_at,
        } => info!(
            %shortcode,
            %original_url,
            expiry = %expires_at.to_rfc3339(),
            "URL created"
        ),
        RegistryEvent::Accessed {
            shortcode,
            original_url,
            click_count,
        } => info!(%shortcode, %original_url, click_count, "URL accessed"),
        RegistryEvent::RedirectRefused {
            shortcode,
            expired_at,
        } => info!(
            %shortcode,
            expired_at = %expired_at.to_rfc3339(),
            "Redirect refused, shortcode expired"
        ),
        RegistryEvent::ClickRecordingFailed { shortcode, reason } => {
            warn!(%shortcode, %reason, "Click recording failed")
        }
        RegistryEvent::StatsRetrieved {
            shortcode,
            click_count,
        } => info!(%shortcode, click_count, "Statistics retrieved"),
        RegistryEvent::Listed { count } => info!(count, "All URLs retrieved"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[tokio::test]
    async fn test_worker_drains_queue_and_stops() {
        let (tx, rx) = mpsc::channel(16);
        let handle = tokio::spawn(run_event_worker(rx));

        tx.send(RegistryEvent::Created {
            shortcode: "abc123".to_string(),
            original_url: "https://example.com".to_string(),
            expires_at: Utc::now(),
        })
        .await
        .unwrap();
        tx.send(RegistryEvent::Listed { count: 1 }).await.unwrap();

        drop(tx);

        handle.await.unwrap();
    }
}
