//! Domain layer containing the registry's entities, contracts and events.
//!
//! The domain layer has no dependency on HTTP or storage details. Business
//! operations live in [`crate::application::services`].
//!
//! # Architecture
//!
//! - [`entities`] - Core data structures
//! - [`repositories`] - Storage trait definitions
//! - [`errors`] - Error taxonomy of the core
//! - [`clock`] - Injectable time source
//! - [`events`] - Structured events and the sink contract
//! - [`event_worker`] - Asynchronous event consumer
//!
//! # Event Flow
//!
//! 1. A service operation completes (or refuses) a request
//! 2. It emits a [`events::RegistryEvent`] through an [`events::EventSink`]
//! 3. [`events::ChannelEventSink`] queues it on a bounded channel
//! 4. [`event_worker::run_event_worker`] logs it and updates counters

pub mod clock;
pub mod entities;
pub mod errors;
pub mod event_worker;
pub mod events;
pub mod repositories;
