#![allow(dead_code)]

use axum::Router;
use axum::extract::ConnectInfo;
use axum_test::TestServer;
use chrono::{DateTime, TimeZone, Utc};
use shortcode_registry::config::Config;
use shortcode_registry::domain::clock::ManualClock;
use shortcode_registry::domain::events::RegistryEvent;
use shortcode_registry::server::build_state;
use shortcode_registry::state::AppState;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::mpsc;
use tower::Layer;

pub const BASE_URL: &str = "http://sho.rt";

pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap()
}

pub fn test_config() -> Config {
    Config {
        base_url: BASE_URL.to_string(),
        event_queue_capacity: 1_000,
        ..Config::default()
    }
}

pub struct TestContext {
    pub state: AppState,
    pub events: mpsc::Receiver<RegistryEvent>,
    pub clock: Arc<ManualClock>,
}

impl TestContext {
    /// Drains every event queued so far.
    pub fn drain_events(&mut self) -> Vec<RegistryEvent> {
        let mut drained = Vec::new();
        while let Ok(event) = self.events.try_recv() {
            drained.push(event);
        }
        drained
    }
}

pub fn create_test_state() -> TestContext {
    create_test_state_with(test_config())
}

pub fn create_test_state_with(config: Config) -> TestContext {
    let clock = Arc::new(ManualClock::new(start_time()));
    let (state, events) = build_state(&config, clock.clone());

    TestContext {
        state,
        events,
        clock,
    }
}

pub fn test_server(router: Router) -> TestServer {
    TestServer::new(router).unwrap()
}

pub fn peer_addr() -> SocketAddr {
    "127.0.0.1:12345".parse().unwrap()
}

#[derive(Clone)]
pub struct MockConnectInfoLayer {
    pub addr: SocketAddr,
}

impl Default for MockConnectInfoLayer {
    fn default() -> Self {
        Self { addr: peer_addr() }
    }
}

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService {
            inner,
            addr: self.addr,
        }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
    addr: SocketAddr,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        req.extensions_mut().insert(ConnectInfo(self.addr));
        self.inner.call(req)
    }
}
