//! Atomic snapshot storage.
//!
//! # Responsibilities
//! - Serialize an already-sorted route sequence into canonical bytes
//! - Derive the version tag (strong ETag) from those bytes
//! - Swap the readable snapshot atomically: readers see either the whole
//!   old snapshot or the whole new one
//!
//! # Design Decisions
//! - `arc_swap` for the published pointer: the single writer never blocks
//!   readers and readers never block the writer
//! - The first-initialization flag flips exactly once per store lifetime
//! - A failed serialization leaves the published snapshot untouched

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use arc_swap::ArcSwapOption;
use sha2::{Digest, Sha256};

use crate::routes::{serialize_routes, Route, SerializeError};

/// The published artifact: canonical bytes plus a content-derived version
/// tag. Immutable once constructed.
#[derive(Debug)]
pub struct Snapshot {
    bytes: Vec<u8>,
    etag: String,
}

impl Snapshot {
    /// Serialized canonical form of the route set.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Strong ETag over the canonical bytes. Identical logical content
    /// always yields the identical tag.
    pub fn etag(&self) -> &str {
        &self.etag
    }
}

/// Result of a successful publish.
#[derive(Debug, Clone, Copy)]
pub struct Published {
    /// Length of the serialized snapshot.
    pub bytes: usize,
    /// True only for the first non-empty publish in the store's lifetime.
    pub initialized: bool,
}

/// Holds the currently published snapshot. One writer (the poller),
/// unlimited concurrent readers.
#[derive(Debug, Default)]
pub struct SnapshotStore {
    current: ArcSwapOption<Snapshot>,
    initialized: AtomicBool,
}

impl SnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serialize `routes` and atomically replace the published snapshot.
    ///
    /// The caller is expected to pass an already validated, sorted
    /// sequence; this method does not reorder. On serialization failure
    /// the previously published snapshot remains readable.
    pub fn publish(&self, routes: &[Route]) -> Result<Published, SerializeError> {
        let bytes = serialize_routes(routes)?;
        let etag = strong_etag(&bytes);
        let size = bytes.len();

        self.current.store(Some(Arc::new(Snapshot { bytes, etag })));
        let first = if routes.is_empty() {
            false
        } else {
            !self.initialized.swap(true, Ordering::AcqRel)
        };

        Ok(Published {
            bytes: size,
            initialized: first,
        })
    }

    /// Current snapshot, if one was ever published. Lock-free; the
    /// returned view stays valid even if a publish lands concurrently.
    pub fn current(&self) -> Option<Arc<Snapshot>> {
        self.current.load_full()
    }

    /// Whether a non-empty snapshot was ever published.
    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }
}

fn strong_etag(bytes: &[u8]) -> String {
    use std::fmt::Write;

    let digest = Sha256::digest(bytes);
    let mut tag = String::with_capacity(2 + digest.len() * 2);
    tag.push('"');
    for byte in digest {
        let _ = write!(tag, "{:02x}", byte);
    }
    tag.push('"');
    tag
}
