//! Result types returned by cluster queries.
//!
//! Items borrow leaf properties from the index that produced them, so a
//! result set lives no longer than its [`ClusterIndex`](crate::ClusterIndex).
use geo::Point;
use serde::{Deserialize, Serialize};
use spatio_cluster_types::point::Properties;
use std::fmt;

/// Identifier of a point or cluster within one index build.
///
/// Leaf ids are the input positions `0..N`. Cluster ids increase in
/// creation order and carry a tag of the build that produced them, so an
/// index rejects cluster ids handed out by an index over other points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClusterId(u64);

impl ClusterId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<u64> for ClusterId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl fmt::Display for ClusterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An aggregate of nearby points at a given zoom.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cluster {
    pub id: ClusterId,
    /// Member-weighted centroid
    pub point: Point,
    /// Number of original points under this cluster
    pub count: usize,
}

impl Cluster {
    /// Short label for the member count, e.g. `"950"`, `"1.2k"`, `"34k"`.
    pub fn abbreviated_count(&self) -> String {
        abbreviate_count(self.count)
    }
}

/// An original input point returned unclustered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Leaf<'a> {
    pub id: ClusterId,
    pub point: Point,
    pub properties: &'a Properties,
}

impl Leaf<'_> {
    /// Position of the point in the input sequence.
    pub fn index(&self) -> usize {
        self.id.get() as usize
    }
}

/// A query result: either a cluster or a single point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClusterItem<'a> {
    Cluster(Cluster),
    Leaf(Leaf<'a>),
}

impl<'a> ClusterItem<'a> {
    pub fn is_cluster(&self) -> bool {
        matches!(self, ClusterItem::Cluster(_))
    }

    pub fn id(&self) -> ClusterId {
        match self {
            ClusterItem::Cluster(c) => c.id,
            ClusterItem::Leaf(l) => l.id,
        }
    }

    pub fn point(&self) -> Point {
        match self {
            ClusterItem::Cluster(c) => c.point,
            ClusterItem::Leaf(l) => l.point,
        }
    }

    /// Member count; 1 for a leaf.
    pub fn count(&self) -> usize {
        match self {
            ClusterItem::Cluster(c) => c.count,
            ClusterItem::Leaf(_) => 1,
        }
    }

    /// Original properties, for leaves only.
    pub fn properties(&self) -> Option<&'a Properties> {
        match self {
            ClusterItem::Cluster(_) => None,
            ClusterItem::Leaf(l) => Some(l.properties),
        }
    }

    pub fn as_cluster(&self) -> Option<&Cluster> {
        match self {
            ClusterItem::Cluster(c) => Some(c),
            ClusterItem::Leaf(_) => None,
        }
    }

    pub fn as_leaf(&self) -> Option<&Leaf<'a>> {
        match self {
            ClusterItem::Cluster(_) => None,
            ClusterItem::Leaf(l) => Some(l),
        }
    }
}

/// Format a member count the way map labels show it.
///
/// ```
/// use spatio_cluster::types::abbreviate_count;
///
/// assert_eq!(abbreviate_count(999), "999");
/// assert_eq!(abbreviate_count(1_250), "1.3k");
/// assert_eq!(abbreviate_count(34_499), "34k");
/// ```
pub fn abbreviate_count(count: usize) -> String {
    if count >= 10_000 {
        format!("{}k", (count as f64 / 1000.0).round() as u64)
    } else if count >= 1000 {
        let tenths = (count as f64 / 100.0).round() / 10.0;
        format!("{}k", tenths)
    } else {
        count.to_string()
    }
}

/// An item positioned inside an XYZ tile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileFeature<'a> {
    pub item: ClusterItem<'a>,
    /// Tile-local x in `[0, extent]`, slightly outside for padded neighbours
    pub x: i64,
    pub y: i64,
}

/// Contents of one XYZ tile.
#[derive(Debug, Clone, PartialEq)]
pub struct Tile<'a> {
    pub z: u8,
    pub x: u32,
    pub y: u32,
    pub features: Vec<TileFeature<'a>>,
}

/// Size of one zoom level of the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelStats {
    pub zoom: u8,
    /// Clusters plus unclustered points stored at this zoom
    pub nodes: usize,
    pub clusters: usize,
}

/// Summary of an index build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    pub point_count: usize,
    pub cluster_count: usize,
    pub levels: Vec<LevelStats>,
}
