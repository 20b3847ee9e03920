//! Snapshot publication subsystem.
//!
//! # Data Flow
//! ```text
//! Poller (single writer)
//!     → store.rs publish(routes) — serialize, tag, atomic swap
//!
//! Serving layer (many readers)
//!     → store.rs current() — Arc<Snapshot> with bytes + ETag
//! ```
//!
//! # Design Decisions
//! - Once a non-empty snapshot is published it is never replaced by an
//!   empty or absent state; failed cycles preserve the last good snapshot
//! - Readers and the writer never block each other

pub mod store;

pub use store::{Published, Snapshot, SnapshotStore};
