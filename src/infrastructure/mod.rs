//! Infrastructure layer implementing the domain's storage contracts.
//!
//! # Modules
//!
//! - [`memory`] - Concurrent in-memory store for records and click history

pub mod memory;
