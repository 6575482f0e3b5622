//! In-memory repository implementations.
//!
//! State lives for the lifetime of the process; nothing is persisted.

mod memory_store;

pub use memory_store::InMemoryStore;
