//! # Shortcode Registry
//!
//! An in-memory URL shortener with expiring shortcodes and per-link click
//! statistics, built with Axum.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Core entities, repository traits, events and clock
//! - **Application Layer** ([`application`]) - Registry and statistics services
//! - **Infrastructure Layer** ([`infrastructure`]) - Concurrent in-memory store
//! - **API Layer** ([`api`]) - REST API handlers, DTOs, and middleware
//!
//! ## Features
//!
//! - Custom or randomly generated shortcodes, unique for the process lifetime
//! - Per-link validity between one minute and one week
//! - Atomic per-link click recording with referrer, user agent and coarse location
//! - Structured registry events consumed by a background worker
//!
//! ## Quick Start
//!
//! ```bash
//! export BASE_URL="http://localhost:3001"  # Optional
//! cargo run
//!
//! curl -X POST localhost:3001/shorturls \
//!   -H 'content-type: application/json' \
//!   -d '{"url":"https://example.com","validity":30,"shortcode":"abc123"}'
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{CreatedLink, Registry, StatisticsTracker};
    pub use crate::domain::clock::{Clock, ManualClock, SystemClock};
    pub use crate::domain::entities::{ClickEvent, ClickMetadata, LinkSummary, StatisticsEntry};
    pub use crate::domain::errors::RegistryError;
    pub use crate::error::AppError;
    pub use crate::infrastructure::memory::InMemoryStore;
    pub use crate::state::AppState;
}
