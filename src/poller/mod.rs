//! Route table polling loop.
//!
//! # Data Flow
//! ```text
//! tick → fetch (DataClient) → pipeline stages → validate → sort
//!      → publish (SnapshotStore) or keep previous snapshot
//! ```
//!
//! # Design Decisions
//! - Every cycle runs to completion; cancellation is observed only
//!   between cycles, so a shutdown never leaves the store mid-mutation
//! - No condition inside a cycle is fatal; the fixed interval is the only
//!   retry cadence
//! - A cycle that outlasts the interval is followed immediately by the
//!   next one (the elapsed tick is consumed, not suppressed)

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::Instrument;

use crate::lifecycle::Shutdown;
use crate::observability::{NoopMetrics, PollerMetrics};
use crate::pipeline::Pipeline;
use crate::routes::{sort_routes, validate_routes, DisabledFilters, Route};
use crate::snapshot::SnapshotStore;
use crate::source::DataClient;

pub const LOG_POLLING_STARTED: &str = "starting polling";
pub const LOG_POLLING_STOPPED: &str = "polling stopped";
pub const LOG_ROUTES_FETCHING_FAILED: &str = "failed to fetch routes";
pub const LOG_ROUTES_EMPTY: &str = "received empty routes; ignoring";
pub const LOG_ROUTES_INITIALIZED: &str = "routes initialized";
pub const LOG_ROUTES_UPDATED: &str = "routes updated";

/// Periodically pulls the route set, runs it through the processing
/// pipeline and publishes the result to the snapshot store.
pub struct Poller {
    client: Box<dyn DataClient>,
    store: Arc<SnapshotStore>,
    interval: Duration,
    pipeline: Pipeline,
    disabled_filters: DisabledFilters,
    metrics: Arc<dyn PollerMetrics>,
}

/// Handle to a running poller: request cancellation and wait for the
/// loop to finish.
pub struct PollerHandle {
    shutdown: Shutdown,
    task: JoinHandle<()>,
}

impl PollerHandle {
    /// Request cancellation. Idempotent; the currently running cycle
    /// still completes in full.
    pub fn stop(&self) {
        self.shutdown.trigger();
    }

    /// Wait for the polling loop to exit.
    pub async fn join(self) {
        let _ = self.task.await;
    }
}

impl Poller {
    pub fn new(client: Box<dyn DataClient>, store: Arc<SnapshotStore>, interval: Duration) -> Self {
        Self {
            client,
            store,
            interval,
            pipeline: Pipeline::new(),
            disabled_filters: DisabledFilters::default(),
            metrics: Arc::new(NoopMetrics),
        }
    }

    pub fn with_pipeline(mut self, pipeline: Pipeline) -> Self {
        self.pipeline = pipeline;
        self
    }

    pub fn with_disabled_filters(mut self, disabled: DisabledFilters) -> Self {
        self.disabled_filters = disabled;
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<dyn PollerMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    /// Launch the polling loop on a background task.
    pub fn start(self) -> PollerHandle {
        let shutdown = Shutdown::new();
        let quit = shutdown.subscribe();
        let task = tokio::spawn(self.run(quit));
        PollerHandle { shutdown, task }
    }

    async fn run(self, mut quit: tokio::sync::broadcast::Receiver<()>) {
        tracing::info!(interval = ?self.interval, "{}", LOG_POLLING_STARTED);
        self.metrics.polling_started();

        let mut ticker = tokio::time::interval(self.interval);
        // The first interval tick completes immediately; the first cycle
        // below takes its place.
        ticker.tick().await;

        loop {
            self.poll_once().await;

            tokio::select! {
                _ = quit.recv() => {
                    tracing::info!("{}", LOG_POLLING_STOPPED);
                    return;
                }
                _ = ticker.tick() => {}
            }
        }
    }

    /// Run one full fetch-transform-publish cycle.
    pub async fn poll_once(&self) {
        let span = tracing::info_span!(
            "poll_routes",
            error = tracing::field::Empty,
            routes.initialized = tracing::field::Empty,
            routes.count = tracing::field::Empty,
            routes.bytes = tracing::field::Empty,
        );

        async {
            let fetched = self.client.load_all().await;

            match fetched {
                Err(e) => {
                    tracing::error!(error = %e, "{}", LOG_ROUTES_FETCHING_FAILED);
                    tracing::Span::current().record("error", true);
                }
                Ok(routes) => {
                    let routes = self.process(routes);
                    if routes.is_empty() {
                        tracing::error!("{}", LOG_ROUTES_EMPTY);
                        tracing::Span::current().record("error", true);
                    } else {
                        self.publish(&routes);
                    }
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Apply the configured pipeline stages, validate and sort.
    fn process(&self, routes: Vec<Route>) -> Vec<Route> {
        let routes = self.pipeline.apply(routes);

        let before = routes.len();
        let mut routes = validate_routes(routes, &self.disabled_filters);
        let rejected = before - routes.len();
        if rejected > 0 {
            self.metrics.routes_rejected(rejected as u64);
        }

        sort_routes(&mut routes);
        routes
    }

    fn publish(&self, routes: &[Route]) {
        let span = tracing::Span::current();

        match self.store.publish(routes) {
            Ok(published) => {
                if published.initialized {
                    tracing::info!(
                        count = routes.len(),
                        bytes = published.bytes,
                        "{}",
                        LOG_ROUTES_INITIALIZED
                    );
                    span.record("routes.initialized", true);
                    self.metrics.routes_initialized();
                } else {
                    tracing::info!(
                        count = routes.len(),
                        bytes = published.bytes,
                        "{}",
                        LOG_ROUTES_UPDATED
                    );
                }
                self.metrics.routes_updated();
                span.record("routes.count", routes.len() as u64);
                span.record("routes.bytes", published.bytes as u64);
            }
            Err(e) => {
                // Failed cycle: the previously published snapshot stays.
                tracing::error!(error = %e, "failed to serialize routes");
                span.record("error", true);
            }
        }
    }
}
