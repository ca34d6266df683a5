//! One zoom level of the cluster index: its nodes and an R*-tree over them.

use crate::types::ClusterId;
use rstar::{AABB, Point as RstarPoint, RTree};

/// A cluster or unclustered point stored at one zoom level, in projected
/// unit coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Node {
    pub x: f64,
    pub y: f64,
    pub id: ClusterId,
    pub num_points: usize,
}

/// Position of a node for R*-tree indexing; `slot` points back into `Level::nodes`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct IndexedNode {
    pub x: f64,
    pub y: f64,
    pub slot: usize,
}

impl IndexedNode {
    /// A position-only value used as a query point or envelope corner.
    pub fn probe(x: f64, y: f64) -> Self {
        Self { x, y, slot: 0 }
    }
}

impl RstarPoint for IndexedNode {
    type Scalar = f64;
    const DIMENSIONS: usize = 2;

    fn generate(mut generator: impl FnMut(usize) -> Self::Scalar) -> Self {
        Self::probe(generator(0), generator(1))
    }

    fn nth(&self, index: usize) -> Self::Scalar {
        match index {
            0 => self.x,
            1 => self.y,
            _ => unreachable!(),
        }
    }

    fn nth_mut(&mut self, index: usize) -> &mut Self::Scalar {
        match index {
            0 => &mut self.x,
            1 => &mut self.y,
            _ => unreachable!(),
        }
    }
}

/// Nodes of one zoom level. Immutable once built.
#[derive(Debug)]
pub(crate) struct Level {
    pub zoom: u8,
    pub nodes: Vec<Node>,
    tree: RTree<IndexedNode>,
}

impl Level {
    pub fn new(zoom: u8, nodes: Vec<Node>) -> Self {
        let entries = nodes
            .iter()
            .enumerate()
            .map(|(slot, node)| IndexedNode {
                x: node.x,
                y: node.y,
                slot,
            })
            .collect();

        Self {
            zoom,
            nodes,
            tree: RTree::bulk_load(entries),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Slots of all nodes inside the rectangle, in ascending slot order.
    pub fn range(&self, min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Vec<usize> {
        let envelope = AABB::from_corners(
            IndexedNode::probe(min_x, min_y),
            IndexedNode::probe(max_x, max_y),
        );

        let mut slots: Vec<usize> = self
            .tree
            .locate_in_envelope(&envelope)
            .map(|entry| entry.slot)
            .collect();
        slots.sort_unstable();
        slots
    }

    /// Slots of all nodes within `radius` of `(x, y)`, measuring longitude
    /// distance the short way around the antimeridian. Ascending slot order.
    pub fn within(&self, x: f64, y: f64, radius: f64) -> Vec<usize> {
        let radius_2 = radius * radius;
        let mut slots: Vec<usize> = self
            .tree
            .locate_within_distance(IndexedNode::probe(x, y), radius_2)
            .map(|entry| entry.slot)
            .collect();

        // Copies of the query point shifted by one world width catch
        // neighbours on the other side of the antimeridian.
        let mut shifts = Vec::with_capacity(2);
        if x - radius < 0.0 {
            shifts.push(1.0);
        }
        if x + radius > 1.0 {
            shifts.push(-1.0);
        }
        for shift in shifts {
            slots.extend(
                self.tree
                    .locate_within_distance(IndexedNode::probe(x + shift, y), radius_2)
                    .map(|entry| entry.slot),
            );
        }

        slots.sort_unstable();
        slots.dedup();
        slots
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(x: f64, y: f64, id: u64) -> Node {
        Node {
            x,
            y,
            id: ClusterId::new(id),
            num_points: 1,
        }
    }

    #[test]
    fn test_range_is_sorted_and_inclusive() {
        let level = Level::new(
            3,
            vec![
                node(0.5, 0.5, 0),
                node(0.1, 0.1, 1),
                node(0.25, 0.25, 2),
                node(0.9, 0.9, 3),
            ],
        );

        assert_eq!(level.len(), 4);
        assert_eq!(level.range(0.1, 0.1, 0.5, 0.5), vec![0, 1, 2]);
        assert_eq!(level.range(0.25, 0.25, 0.25, 0.25), vec![2]);
        assert!(level.range(0.6, 0.0, 0.8, 0.2).is_empty());
    }

    #[test]
    fn test_within_radius() {
        let level = Level::new(
            0,
            vec![node(0.5, 0.5, 0), node(0.51, 0.5, 1), node(0.6, 0.5, 2)],
        );

        assert_eq!(level.within(0.5, 0.5, 0.02), vec![0, 1]);
        assert_eq!(level.within(0.5, 0.5, 0.2), vec![0, 1, 2]);
    }

    #[test]
    fn test_within_wraps_antimeridian() {
        let level = Level::new(
            0,
            vec![node(0.999, 0.5, 0), node(0.001, 0.5, 1), node(0.5, 0.5, 2)],
        );

        assert_eq!(level.within(0.999, 0.5, 0.01), vec![0, 1]);
        assert_eq!(level.within(0.001, 0.5, 0.01), vec![0, 1]);
    }

    #[test]
    fn test_empty_level() {
        let level = Level::new(5, Vec::new());
        assert_eq!(level.len(), 0);
        assert!(level.range(0.0, 0.0, 1.0, 1.0).is_empty());
        assert!(level.within(0.5, 0.5, 1.0).is_empty());
    }
}
