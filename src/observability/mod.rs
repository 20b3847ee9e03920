//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Poller produces:
//!     → logging.rs (structured log events)
//!     → metrics.rs (timestamp gauges, rejection counter)
//!     → one tracing span per poll cycle
//!
//! Consumers:
//!     → Log aggregation (stdout, JSON for machine parsing)
//!     → Metrics endpoint (Prometheus scrape)
//! ```
//!
//! # Design Decisions
//! - Metrics flow through an injected sink, not a hidden global
//! - Format/backend selection is a static registry resolved at startup

pub mod logging;
pub mod metrics;

pub use logging::{init_logging, LogFormat};
pub use metrics::{init_metrics, NoopMetrics, PollerMetrics, PrometheusMetrics};
