//! Multi-resolution point cluster index.
//!
//! Points are projected once into Web-Mercator unit space and clustered
//! level by level from `max_zoom` down to `min_zoom`. Every level is kept in
//! its own R*-tree, so a viewport query touches only the nodes it returns
//! plus a logarithmic traversal.
//!
//! ```rust
//! use spatio_cluster::{BoundingBox, ClusterConfig, ClusterIndex, PointFeature};
//!
//! let points = vec![
//!     PointFeature::new(0.0, 0.0),
//!     PointFeature::new(0.0001, 0.0),
//!     PointFeature::new(50.0, 50.0),
//! ];
//! let index = ClusterIndex::build(points, ClusterConfig::default().with_radius(75.0))?;
//!
//! let items = index.clusters(BoundingBox::world(), 16.0)?;
//! assert_eq!(items.len(), 2);
//!
//! let cluster = items.iter().find(|item| item.is_cluster()).unwrap();
//! assert_eq!(cluster.count(), 2);
//! assert_eq!(index.expansion_zoom(cluster.id())?, 16);
//! # Ok::<(), spatio_cluster::ClusterError>(())
//! ```

mod hierarchy;
mod ids;
mod level;
mod merge;
mod query;


use crate::builder::ClusterIndexBuilder;
use crate::compute::projection::{lat_y, lng_x, x_lng, y_lat};
use crate::compute::validation::validate_features;
use crate::config::ClusterConfig;
use crate::error::{ClusterError, Result};
use crate::types::{Cluster, ClusterId, ClusterItem, IndexStats, Leaf, LevelStats};
use geo::Point;
use ids::{ClusterIds, MAX_POINTS};
use level::{Level, Node};
use merge::{ClusterRecord, cluster_level};
use spatio_cluster_types::point::PointFeature;
use std::time::Instant;

/// Input sizes above this get a warning since every level holds up to N nodes.
const LARGE_INPUT_WARN_THRESHOLD: usize = 5_000_000;

/// Immutable cluster hierarchy over a fixed set of points.
///
/// Built once with [`ClusterIndex::build`]; all queries take `&self`, so a
/// single index can be shared between threads (for example behind an `Arc`)
/// without locking.
#[derive(Debug)]
pub struct ClusterIndex {
    config: ClusterConfig,
    features: Vec<PointFeature>,
    /// `levels[z - min_zoom]`, with one extra unclustered level at `max_zoom + 1`
    levels: Vec<Level>,
    /// Indexed by cluster creation sequence
    clusters: Vec<ClusterRecord>,
    ids: ClusterIds,
}

impl ClusterIndex {
    /// Start configuring an index with default options.
    pub fn builder() -> ClusterIndexBuilder {
        ClusterIndexBuilder::new()
    }

    /// Validate the input and build every zoom level.
    ///
    /// Fails with [`ClusterError::InvalidConfig`] for bad options and
    /// [`ClusterError::InvalidPoint`] if any coordinate is out of range; no
    /// partial index is ever returned.
    pub fn build(features: Vec<PointFeature>, config: ClusterConfig) -> Result<Self> {
        config.validate()?;
        validate_features(&features)?;
        if features.len() > MAX_POINTS {
            return Err(ClusterError::InvalidInput(format!(
                "Cannot cluster {} points; at most {} are supported",
                features.len(),
                MAX_POINTS
            )));
        }

        if features.len() > LARGE_INPUT_WARN_THRESHOLD {
            log::warn!(
                "Clustering {} points; memory use grows with point count times zoom levels",
                features.len()
            );
        }

        let start = Instant::now();
        let point_count = features.len();
        let ids = ClusterIds::for_build(&features, &config);

        let leaves: Vec<Node> = features
            .iter()
            .enumerate()
            .map(|(i, feature)| Node {
                x: lng_x(feature.lon()),
                y: lat_y(feature.lat()),
                id: ClusterId::new(i as u64),
                num_points: 1,
            })
            .collect();

        let level_count = usize::from(config.max_zoom - config.min_zoom) + 2;
        let mut levels = Vec::with_capacity(level_count);
        let mut clusters = Vec::new();
        let mut current = Level::new(config.max_zoom + 1, leaves);

        for zoom in (config.min_zoom..=config.max_zoom).rev() {
            let level_start = Instant::now();
            let nodes = cluster_level(&current, zoom, &config, &ids, &mut clusters);
            let next = Level::new(zoom, nodes);

            log::debug!(
                "z{}: {} nodes ({} clusters so far) in {:?}",
                zoom,
                next.len(),
                clusters.len(),
                level_start.elapsed()
            );

            levels.push(current);
            current = next;
        }
        levels.push(current);
        levels.reverse();

        log::info!(
            "Indexed {} points into {} clusters over zooms {}..={} in {:?}",
            point_count,
            clusters.len(),
            config.min_zoom,
            config.max_zoom,
            start.elapsed()
        );

        Ok(Self {
            config,
            features,
            levels,
            clusters,
            ids,
        })
    }

    pub fn config(&self) -> &ClusterConfig {
        &self.config
    }

    /// Number of input points.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Total number of clusters created across all zoom levels.
    pub fn cluster_count(&self) -> usize {
        self.clusters.len()
    }

    /// The input points, in their original order.
    pub fn features(&self) -> &[PointFeature] {
        &self.features
    }

    /// Whether `id` names a cluster produced by this index.
    pub fn contains_cluster(&self, id: ClusterId) -> bool {
        self.record(id).is_ok()
    }

    /// Node counts per zoom level, lowest zoom first.
    pub fn stats(&self) -> IndexStats {
        let point_count = self.features.len();
        let levels = self
            .levels
            .iter()
            .map(|level| LevelStats {
                zoom: level.zoom,
                nodes: level.len(),
                clusters: level
                    .nodes
                    .iter()
                    .filter(|node| node.id.get() as usize >= point_count)
                    .count(),
            })
            .collect();

        IndexStats {
            point_count,
            cluster_count: self.clusters.len(),
            levels,
        }
    }

    /// Level holding the clusters for `zoom`, clamped to `[min_zoom, max_zoom + 1]`.
    fn level_for_zoom(&self, zoom: f64) -> &Level {
        let min = f64::from(self.config.min_zoom);
        let max = f64::from(self.config.max_zoom) + 1.0;
        let z = zoom.floor().clamp(min, max) as u8;
        self.level_at(z)
    }

    fn level_at(&self, zoom: u8) -> &Level {
        &self.levels[usize::from(zoom - self.config.min_zoom)]
    }

    fn record(&self, id: ClusterId) -> Result<&ClusterRecord> {
        self.ids
            .sequence(id)
            .and_then(|seq| self.clusters.get(seq))
            .ok_or(ClusterError::UnknownCluster(id))
    }

    fn is_leaf(&self, node: &Node) -> bool {
        (node.id.get() as usize) < self.features.len()
    }

    fn leaf(&self, node: &Node) -> Leaf<'_> {
        let feature = &self.features[node.id.get() as usize];
        Leaf {
            id: node.id,
            point: feature.point,
            properties: &feature.properties,
        }
    }

    fn item(&self, node: &Node) -> ClusterItem<'_> {
        if self.is_leaf(node) {
            ClusterItem::Leaf(self.leaf(node))
        } else {
            ClusterItem::Cluster(Cluster {
                id: node.id,
                point: Point::new(x_lng(node.x), y_lat(node.y)),
                count: node.num_points,
            })
        }
    }
}
