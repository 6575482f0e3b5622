//! Data Transfer Objects for API requests and responses.
//!
//! All DTOs use Serde for JSON serialization with camelCase field names.

pub mod clicks;
pub mod health;
pub mod shorten;
pub mod stats;
pub mod stats_list;
