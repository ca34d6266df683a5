//! Index builder for fluent configuration
//!
//! This module provides a builder for creating cluster indexes without
//! assembling a [`ClusterConfig`] by hand.

use crate::compute::cluster::ClusterIndex;
use crate::config::ClusterConfig;
use crate::error::Result;
use spatio_cluster_types::point::PointFeature;

/// Builder for [`ClusterIndex`] options.
///
/// ```rust
/// use spatio_cluster::{ClusterIndex, PointFeature};
///
/// let index = ClusterIndex::builder()
///     .radius(60.0)
///     .max_zoom(14)
///     .min_points(3)
///     .build(vec![PointFeature::new(10.0, 10.0)])?;
///
/// assert_eq!(index.config().max_zoom, 14);
/// # Ok::<(), spatio_cluster::ClusterError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ClusterIndexBuilder {
    config: ClusterConfig,
}

impl ClusterIndexBuilder {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge radius in pixels.
    pub fn radius(mut self, radius: f64) -> Self {
        self.config.radius = radius;
        self
    }

    pub fn min_zoom(mut self, min_zoom: u8) -> Self {
        self.config.min_zoom = min_zoom;
        self
    }

    pub fn max_zoom(mut self, max_zoom: u8) -> Self {
        self.config.max_zoom = max_zoom;
        self
    }

    pub fn min_points(mut self, min_points: usize) -> Self {
        self.config.min_points = min_points;
        self
    }

    /// Tile extent the radius is measured against.
    pub fn extent(mut self, extent: u32) -> Self {
        self.config.extent = extent;
        self
    }

    pub fn generate_id(mut self, generate_id: bool) -> Self {
        self.config.generate_id = generate_id;
        self
    }

    /// Replace all options at once.
    pub fn config(mut self, config: ClusterConfig) -> Self {
        self.config = config;
        self
    }

    /// Validate the options and points, then build the index.
    pub fn build(self, features: Vec<PointFeature>) -> Result<ClusterIndex> {
        ClusterIndex::build(features, self.config)
    }
}
