//! Poller metrics.
//!
//! # Responsibilities
//! - Expose the polling timestamp gauges and rejection counter
//! - Serve a Prometheus-compatible metrics endpoint
//!
//! # Metrics
//! - `routectl_polling_started_timestamp` (gauge): UNIX time when polling started
//! - `routectl_routes_initialized_timestamp` (gauge): UNIX time of the first stored routes
//! - `routectl_routes_updated_timestamp` (gauge): UNIX time of the last update
//! - `routectl_routes_rejected_total` (counter): routes dropped by validation
//!
//! # Design Decisions
//! - The poller takes an injected sink rather than writing to a global
//!   registry, so tests can observe recordings in isolation

use std::net::SocketAddr;
use std::time::{SystemTime, UNIX_EPOCH};

use metrics::{counter, describe_counter, describe_gauge, gauge};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Sink for the poller's observability counters and timestamps.
pub trait PollerMetrics: Send + Sync {
    /// Polling loop has started.
    fn polling_started(&self);
    /// First non-empty snapshot was stored.
    fn routes_initialized(&self);
    /// A snapshot was stored (the initial load counts as well).
    fn routes_updated(&self);
    /// Routes dropped by validation in one cycle.
    fn routes_rejected(&self, count: u64);
}

/// Prometheus-backed sink using the `metrics` facade.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrometheusMetrics;

impl PollerMetrics for PrometheusMetrics {
    fn polling_started(&self) {
        gauge!("routectl_polling_started_timestamp").set(unix_now());
    }

    fn routes_initialized(&self) {
        gauge!("routectl_routes_initialized_timestamp").set(unix_now());
    }

    fn routes_updated(&self) {
        gauge!("routectl_routes_updated_timestamp").set(unix_now());
    }

    fn routes_rejected(&self, count: u64) {
        counter!("routectl_routes_rejected_total").increment(count);
    }
}

/// Sink that drops everything, for callers that run without metrics.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMetrics;

impl PollerMetrics for NoopMetrics {
    fn polling_started(&self) {}
    fn routes_initialized(&self) {}
    fn routes_updated(&self) {}
    fn routes_rejected(&self, _count: u64) {}
}

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => {
            describe_gauge!(
                "routectl_polling_started_timestamp",
                "UNIX time when the routes polling has started"
            );
            describe_gauge!(
                "routectl_routes_initialized_timestamp",
                "UNIX time when the first routes were received and stored"
            );
            describe_gauge!(
                "routectl_routes_updated_timestamp",
                "UNIX time of the last routes update (initial load counts as well)"
            );
            describe_counter!(
                "routectl_routes_rejected_total",
                "Routes dropped by validation"
            );
            tracing::info!(address = %addr, "Metrics exporter listening");
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to install metrics exporter");
        }
    }
}

fn unix_now() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs_f64()
}
