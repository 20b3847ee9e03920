//! Route table control plane library.
//!
//! Periodically pulls a route configuration from an external source, runs
//! it through a fixed preprocessing pipeline, validates and sorts it, and
//! publishes the result as an immutable, deterministically serialized
//! snapshot for concurrent readers.

// Core subsystems
pub mod config;
pub mod pipeline;
pub mod poller;
pub mod routes;
pub mod snapshot;
pub mod source;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::Config;
pub use lifecycle::Shutdown;
pub use poller::{Poller, PollerHandle};
pub use snapshot::SnapshotStore;
