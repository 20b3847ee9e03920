//! Route data sources.
//!
//! The poller pulls the full route set from a single external source once
//! per cycle. The fetch may be slow or fail; both are cycle-local
//! conditions for the poller.

pub mod file;

use async_trait::async_trait;
use thiserror::Error;

use crate::routes::Route;

pub use file::FileDataClient;

/// Error returned by a data source fetch.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

/// Contract for the external route source.
///
/// One call returns the current full route set or an error; there is no
/// incremental protocol at this layer.
#[async_trait]
pub trait DataClient: Send + Sync {
    async fn load_all(&self) -> Result<Vec<Route>, SourceError>;
}
