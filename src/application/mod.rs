//! Application layer services implementing the registry's business logic.
//!
//! Services consume repository traits and expose the operations HTTP
//! handlers call.
//!
//! # Available Services
//!
//! - [`services::registry::Registry`] - Shortcode creation, lookup and redirect resolution
//! - [`services::statistics_tracker::StatisticsTracker`] - Click recording and statistics reads

pub mod services;
