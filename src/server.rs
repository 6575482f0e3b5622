//! HTTP server initialization and runtime setup.
//!
//! Builds the in-memory store and services, spawns the event worker and runs
//! the Axum server until a shutdown signal arrives.

use crate::application::services::{Registry, RegistrySettings, StatisticsTracker};
use crate::config::Config;
use crate::domain::clock::{Clock, SystemClock};
use crate::domain::event_worker::run_event_worker;
use crate::domain::events::{ChannelEventSink, EventSink, RegistryEvent};
use crate::infrastructure::memory::InMemoryStore;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Builds the application state for the given configuration.
///
/// Returns the state together with the receiving end of the event queue,
/// which the caller hands to [`run_event_worker`].
pub fn build_state(
    config: &Config,
    clock: Arc<dyn Clock>,
) -> (AppState, mpsc::Receiver<RegistryEvent>) {
    let (event_tx, event_rx) = mpsc::channel(config.event_queue_capacity);
    let events: Arc<dyn EventSink> = Arc::new(ChannelEventSink::new(event_tx.clone()));

    let store = Arc::new(InMemoryStore::new());

    let statistics = Arc::new(StatisticsTracker::new(
        store.clone(),
        clock.clone(),
        events.clone(),
    ));

    let registry = Arc::new(Registry::new(
        store,
        statistics.clone(),
        clock,
        events,
        RegistrySettings {
            base_url: config.base_url.clone(),
            generated_code_length: config.generated_code_length,
        },
    ));

    let state = AppState::new(
        registry,
        statistics,
        event_tx,
        config.default_validity_minutes,
        config.behind_proxy,
    );

    (state, event_rx)
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - In-memory store, registry and statistics tracker
/// - Background event worker
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - The listen address is invalid
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let (state, event_rx) = build_state(&config, Arc::new(SystemClock));

    tokio::spawn(run_event_worker(event_rx));
    tracing::info!("Event worker started");

    let app = app_router(state, &config.cors_allowed_origins);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");

    Ok(())
}

/// Completes on Ctrl-C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
