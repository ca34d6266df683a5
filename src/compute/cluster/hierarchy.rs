//! Navigating the cluster tree: expansion zoom, children and leaves.

use super::ClusterIndex;
use super::merge::ClusterRecord;
use crate::compute::projection::{x_lng, y_lat};
use crate::error::Result;
use crate::types::{ClusterId, ClusterItem, Leaf};
use geo::Point;

impl ClusterIndex {
    /// Smallest zoom at which cluster `id` breaks apart, capped at `max_zoom`.
    ///
    /// A cluster first appears at the highest zoom where its members were
    /// still within the radius, so it splits one zoom above that. Clusters
    /// that still hold together at `max_zoom` report `max_zoom`.
    ///
    /// Fails with [`ClusterError::UnknownCluster`](crate::ClusterError::UnknownCluster)
    /// for leaf ids and ids this index never produced.
    pub fn expansion_zoom(&self, id: ClusterId) -> Result<u8> {
        let record = self.record(id)?;
        Ok(record.zoom.saturating_add(1).min(self.config.max_zoom))
    }

    /// Cluster position together with its expansion zoom, the pair needed to
    /// drive a camera transition when the cluster is clicked.
    pub fn expansion_target(&self, id: ClusterId) -> Result<(Point, u8)> {
        let record = self.record(id)?;
        let node = &self.level_at(record.zoom).nodes[record.slot];
        let point = Point::new(x_lng(node.x), y_lat(node.y));
        Ok((point, self.expansion_zoom(id)?))
    }

    /// The clusters and points one zoom level up that merged into `id`.
    pub fn children(&self, id: ClusterId) -> Result<Vec<ClusterItem<'_>>> {
        let record = self.record(id)?;
        let level = self.level_at(record.zoom + 1);
        Ok(record
            .children
            .iter()
            .map(|&slot| self.item(&level.nodes[slot]))
            .collect())
    }

    /// Original points under `id`, depth first in child order.
    ///
    /// Skips the first `offset` leaves and returns at most `limit`; pass
    /// `usize::MAX` to fetch all of them.
    pub fn leaves(&self, id: ClusterId, limit: usize, offset: usize) -> Result<Vec<Leaf<'_>>> {
        let record = self.record(id)?;
        let mut leaves = Vec::new();
        if limit > 0 {
            let mut skipped = 0;
            self.append_leaves(record, limit, offset, &mut skipped, &mut leaves);
        }
        Ok(leaves)
    }

    fn append_leaves<'a>(
        &'a self,
        record: &ClusterRecord,
        limit: usize,
        offset: usize,
        skipped: &mut usize,
        leaves: &mut Vec<Leaf<'a>>,
    ) {
        let level = self.level_at(record.zoom + 1);
        for &slot in &record.children {
            let node = &level.nodes[slot];

            if self.is_leaf(node) {
                if *skipped < offset {
                    *skipped += 1;
                } else {
                    leaves.push(self.leaf(node));
                }
            } else if *skipped + node.num_points <= offset {
                // whole subtree falls before the requested page
                *skipped += node.num_points;
            } else if let Ok(child) = self.record(node.id) {
                self.append_leaves(child, limit, offset, skipped, leaves);
            }

            if leaves.len() >= limit {
                return;
            }
        }
    }
}
