//! Greedy merge pass that derives one zoom level from the level above it.

use super::ids::ClusterIds;
use super::level::{Level, Node};
use crate::compute::projection::{wrap_x, wrapped_dx};
use crate::config::ClusterConfig;
use smallvec::SmallVec;

/// Where a cluster was created and which nodes of the level above merged into it.
#[derive(Debug, Clone)]
pub(crate) struct ClusterRecord {
    /// Zoom level the cluster first appears at
    pub zoom: u8,
    /// Position in that level's nodes
    pub slot: usize,
    /// Slots in level `zoom + 1`
    pub children: SmallVec<[usize; 8]>,
}

/// Cluster the nodes of `prev` (level `zoom + 1`) into the nodes of level `zoom`.
///
/// Nodes are visited in ascending slot order. Each node not yet claimed
/// claims every unclaimed neighbour within the zoom's radius; if the group
/// holds at least `min_points` points a new cluster is emitted at the
/// point-weighted centroid, otherwise the node and its neighbours pass
/// through unchanged. The new cluster takes the id for sequence
/// `records.len()`.
pub(crate) fn cluster_level(
    prev: &Level,
    zoom: u8,
    config: &ClusterConfig,
    ids: &ClusterIds,
    records: &mut Vec<ClusterRecord>,
) -> Vec<Node> {
    let radius = config.radius_at(zoom);
    let mut claimed = vec![false; prev.len()];
    let mut next = Vec::with_capacity(prev.len());

    for slot in 0..prev.len() {
        if claimed[slot] {
            continue;
        }
        claimed[slot] = true;

        let node = prev.nodes[slot];
        let neighbors: SmallVec<[usize; 16]> = prev
            .within(node.x, node.y, radius)
            .into_iter()
            .filter(|&s| !claimed[s])
            .collect();

        let num_points = node.num_points
            + neighbors
                .iter()
                .map(|&s| prev.nodes[s].num_points)
                .sum::<usize>();

        for &s in &neighbors {
            claimed[s] = true;
        }

        if neighbors.is_empty() || num_points < config.min_points {
            next.push(node);
            next.extend(neighbors.iter().map(|&s| prev.nodes[s]));
            continue;
        }

        let mut wx = node.x * node.num_points as f64;
        let mut wy = node.y * node.num_points as f64;
        let mut children = SmallVec::with_capacity(neighbors.len() + 1);
        children.push(slot);

        for &s in &neighbors {
            let neighbor = prev.nodes[s];
            // unwrap relative to the seed so groups straddling 180° average correctly
            let x = node.x + wrapped_dx(node.x, neighbor.x);
            wx += x * neighbor.num_points as f64;
            wy += neighbor.y * neighbor.num_points as f64;
            children.push(s);
        }

        let mut cx = wx / num_points as f64;
        if !(0.0..=1.0).contains(&cx) {
            cx = wrap_x(cx);
        }

        let id = ids.cluster_id(records.len());
        records.push(ClusterRecord {
            zoom,
            slot: next.len(),
            children,
        });
        next.push(Node {
            x: cx,
            y: wy / num_points as f64,
            id,
            num_points,
        });
    }

    next
}
