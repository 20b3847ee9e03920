//! Configuration subsystem.
//!
//! # Data Flow
//! ```text
//! TOML file
//!     → loader.rs (read + parse)
//!     → validation.rs (semantic checks, all errors reported)
//!     → schema.rs types → runtime pipeline and poller construction
//! ```
//!
//! # Design Decisions
//! - Stage configuration is typed and validated once at startup with
//!   fail-fast errors, never coerced lazily per cycle

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{Config, ObservabilityConfig, PipelineConfig, PollerConfig, SourceConfig};
pub use validation::{validate_config, ValidationError};
