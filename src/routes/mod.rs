//! Route data model and content-level operations.
//!
//! # Data Flow
//! ```text
//! Fetched routes
//!     → validate.rs (drop reserved/disabled filter usage)
//!     → validate.rs (stable sort by id)
//!     → serialize.rs (canonical bytes)
//! ```
//!
//! # Design Decisions
//! - Routes are opaque payload beyond id and filter names
//! - One canonical byte form per logical route set (determinism feeds
//!   downstream ETag semantics)

pub mod serialize;
pub mod types;
pub mod validate;

pub use serialize::{serialize_routes, SerializeError};
pub use types::{Arg, Backend, Filter, Predicate, Route};
pub use validate::{sort_routes, validate_routes, DisabledFilters};
