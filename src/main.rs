//! Route table control plane daemon.
//!
//! # Architecture Overview
//!
//! ```text
//!                 ┌──────────────────────────────────────────────┐
//!                 │                  ROUTECTL                     │
//!                 │                                               │
//!   Route source  │  ┌────────┐   ┌──────────┐   ┌────────────┐  │
//!   ──────────────┼─▶│ source │──▶│ pipeline │──▶│  validate  │  │
//!   (JSON file)   │  │ fetch  │   │  stages  │   │  + sort    │  │
//!                 │  └────────┘   └──────────┘   └─────┬──────┘  │
//!                 │       ▲                            │          │
//!                 │       │ tick                       ▼          │
//!                 │  ┌────┴───┐                 ┌────────────┐   │
//!                 │  │ poller │────────────────▶│  snapshot  │──┼──▶ readers
//!                 │  └────────┘    publish      │   store    │   │   (bytes + ETag)
//!                 │                             └────────────┘   │
//!                 └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;

use routectl::config::load_config;
use routectl::lifecycle::wait_for_signal;
use routectl::observability::{
    init_logging, init_metrics, NoopMetrics, PollerMetrics, PrometheusMetrics,
};
use routectl::routes::DisabledFilters;
use routectl::source::FileDataClient;
use routectl::{Poller, SnapshotStore};

#[derive(Parser)]
#[command(name = "routectl")]
#[command(about = "Route table poller and snapshot distributor", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "routectl.toml")]
    config: PathBuf,

    /// Override the poll interval in seconds.
    #[arg(long)]
    interval_secs: Option<u64>,

    /// Run a single poll cycle and exit.
    #[arg(long)]
    once: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = load_config(&cli.config)?;
    if let Some(secs) = cli.interval_secs {
        config.poller.interval_secs = secs;
    }

    init_logging(config.observability.log_format);

    tracing::info!(
        config = %cli.config.display(),
        source = %config.source.path,
        interval_secs = config.poller.interval_secs,
        "Configuration loaded"
    );

    let metrics: Arc<dyn PollerMetrics> = if config.observability.metrics_enabled {
        let addr = config.observability.metrics_address.parse()?;
        init_metrics(addr);
        Arc::new(PrometheusMetrics)
    } else {
        Arc::new(NoopMetrics)
    };

    let store = Arc::new(SnapshotStore::new());
    let client = FileDataClient::new(&config.source.path);

    let poller = Poller::new(
        Box::new(client),
        store.clone(),
        Duration::from_secs(config.poller.interval_secs),
    )
    .with_pipeline(config.pipeline.build())
    .with_disabled_filters(DisabledFilters::new(config.poller.disabled_filters.clone()))
    .with_metrics(metrics);

    if cli.once {
        poller.poll_once().await;
        match store.current() {
            Some(snapshot) => {
                tracing::info!(
                    bytes = snapshot.bytes().len(),
                    etag = %snapshot.etag(),
                    "Single cycle complete"
                );
            }
            None => tracing::warn!("Single cycle complete, no snapshot published"),
        }
        return Ok(());
    }

    let handle = poller.start();

    wait_for_signal().await;
    tracing::info!("Shutting down");

    handle.stop();
    handle.join().await;

    tracing::info!("Shutdown complete");
    Ok(())
}
