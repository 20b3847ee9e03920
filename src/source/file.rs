//! File-backed route source.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::routes::Route;
use crate::source::{DataClient, SourceError};

/// Reads the full route set from a JSON document on disk.
///
/// The file holds an array of route objects. It is re-read on every fetch
/// so edits show up on the next poll cycle.
#[derive(Debug, Clone)]
pub struct FileDataClient {
    path: PathBuf,
}

impl FileDataClient {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl DataClient for FileDataClient {
    async fn load_all(&self) -> Result<Vec<Route>, SourceError> {
        let content = tokio::fs::read_to_string(&self.path).await?;
        let routes: Vec<Route> = serde_json::from_str(&content)?;
        Ok(routes)
    }
}
