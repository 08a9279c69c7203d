//! Session use cases
//!
//! Each service owns its own subscription to the slice of shared state it
//! coordinates, keeps a read-mostly replica in a `watch` channel, and
//! writes back through the store port. Teardown is explicit: every service
//! carries a `CancellationToken` cancelled on shutdown or drop, which ends
//! its background tasks and releases their subscriptions.

pub mod motions;
pub mod session;
pub mod speaker_queue;
pub mod timer_engine;
