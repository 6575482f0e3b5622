//! Business logic services for the application layer.

pub mod registry;
pub mod statistics_tracker;

pub use registry::{
    CreatedLink, DEFAULT_VALIDITY_MINUTES, MAX_VALIDITY_MINUTES, MIN_VALIDITY_MINUTES, Registry,
    RegistrySettings,
};
pub use statistics_tracker::StatisticsTracker;
