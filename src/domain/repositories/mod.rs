//! Repository trait definitions for the domain layer.
//!
//! These traits abstract storage behind the Repository pattern. The
//! production implementation lives in `crate::infrastructure::memory`.
//! Mock implementations are generated via `mockall` for service tests.
//!
//! Storage is in-memory, so every method is synchronous and returns in
//! bounded time.
//!
//! # Available Repositories
//!
//! - [`LinkRepository`] - Shortcode records and uniqueness
//! - [`StatsRepository`] - Click recording and statistics reads

pub mod link_repository;
pub mod stats_repository;

pub use link_repository::LinkRepository;
pub use stats_repository::{RecordedClick, StatsRepository};

#[cfg(test)]
pub use link_repository::MockLinkRepository;
#[cfg(test)]
pub use stats_repository::MockStatsRepository;
