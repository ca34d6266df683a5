//! Thread-safe holder for the current cluster index.
//!
//! `SharedClusterIndex` keeps an `Arc<ClusterIndex>` behind a
//! `parking_lot::RwLock`. Readers take a cheap snapshot and query it without
//! holding the lock; a rebuild happens outside the lock and only the final
//! pointer swap is exclusive.
//!
//! # Features
//!
//! Enable the `sync` feature to use this module (on by default):
//!
//! ```toml
//! [dependencies]
//! spatio-cluster = { version = "0.1", features = ["sync"] }
//! ```
//!
//! # Examples
//!
//! ```rust
//! use spatio_cluster::{BoundingBox, ClusterConfig, PointFeature, SharedClusterIndex};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let shared = SharedClusterIndex::empty(ClusterConfig::default())?;
//!
//! let points = vec![PointFeature::new(2.35, 48.85), PointFeature::new(2.36, 48.86)];
//! let handle = shared.rebuild_in_background(points, ClusterConfig::default());
//! handle.join().expect("rebuild thread panicked")?;
//!
//! let index = shared.current();
//! assert_eq!(index.clusters(BoundingBox::world(), 0.0)?.len(), 1);
//! # Ok(())
//! # }
//! ```

use crate::compute::cluster::ClusterIndex;
use crate::config::ClusterConfig;
use crate::error::Result;
use parking_lot::RwLock;
use spatio_cluster_types::point::PointFeature;
use std::sync::Arc;
use std::thread::{self, JoinHandle};

/// Shared, swappable reference to the latest successfully built index.
///
/// - Implements `Clone`; clones share the same slot
/// - `current()` never blocks on a rebuild in progress
/// - A failed rebuild leaves the previous index in place
#[derive(Clone, Debug)]
pub struct SharedClusterIndex {
    inner: Arc<RwLock<Arc<ClusterIndex>>>,
}

impl SharedClusterIndex {
    /// Wrap an already built index.
    pub fn new(index: ClusterIndex) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(index))),
        }
    }

    /// Start from an index over no points.
    pub fn empty(config: ClusterConfig) -> Result<Self> {
        Ok(Self::new(ClusterIndex::build(Vec::new(), config)?))
    }

    /// Snapshot of the current index. Stays valid after later rebuilds.
    pub fn current(&self) -> Arc<ClusterIndex> {
        self.inner.read().clone()
    }

    /// Replace the current index with an already built one.
    pub fn replace(&self, index: ClusterIndex) -> Arc<ClusterIndex> {
        let mut slot = self.inner.write();
        std::mem::replace(&mut *slot, Arc::new(index))
    }

    /// Build a new index and swap it in. On error the current index is kept.
    pub fn rebuild(&self, features: Vec<PointFeature>, config: ClusterConfig) -> Result<()> {
        match ClusterIndex::build(features, config) {
            Ok(index) => {
                self.replace(index);
                Ok(())
            }
            Err(e) => {
                log::warn!("Rebuild failed, keeping previous index: {}", e);
                Err(e)
            }
        }
    }

    /// Run [`rebuild`](Self::rebuild) on a worker thread.
    ///
    /// Readers keep seeing the previous index until the build completes;
    /// joining the handle reports the build result.
    pub fn rebuild_in_background(
        &self,
        features: Vec<PointFeature>,
        config: ClusterConfig,
    ) -> JoinHandle<Result<()>> {
        let shared = self.clone();
        thread::spawn(move || shared.rebuild(features, config))
    }
}
