//! Hierarchical point clustering for interactive maps.
//!
//! Build a [`ClusterIndex`] once from a set of points, then ask it which
//! clusters are visible for a viewport and zoom, and at which zoom a clicked
//! cluster falls apart.
//!
//! ```rust
//! use spatio_cluster::{BoundingBox, ClusterIndex, PointFeature};
//!
//! let points = vec![
//!     PointFeature::new(-74.0060, 40.7128).with_property("name", "New York"),
//!     PointFeature::new(-73.9352, 40.7306).with_property("name", "Brooklyn"),
//!     PointFeature::new(2.3522, 48.8566).with_property("name", "Paris"),
//! ];
//!
//! let index = ClusterIndex::builder().radius(60.0).max_zoom(16).build(points)?;
//! let visible = index.clusters(BoundingBox::world(), 2.0)?;
//! assert_eq!(visible.len(), 2);
//!
//! let nyc = visible.iter().find(|item| item.is_cluster()).unwrap();
//! let zoom = index.expansion_zoom(nyc.id())?;
//! assert!(zoom > 2);
//! # Ok::<(), spatio_cluster::ClusterError>(())
//! ```

pub mod builder;
pub mod compute;
pub mod config;
pub mod error;
pub mod types;

#[cfg(feature = "sync")]
pub mod sync;

pub use builder::ClusterIndexBuilder;
pub use compute::cluster::ClusterIndex;
pub use config::ClusterConfig;
pub use error::{ClusterError, Result};

pub use geo::Point;

pub use spatio_cluster_types::bbox::BoundingBox;
pub use spatio_cluster_types::point::{PointFeature, Properties};

pub use types::{
    Cluster, ClusterId, ClusterItem, IndexStats, Leaf, LevelStats, Tile, TileFeature,
};

#[cfg(feature = "geojson")]
pub use compute::geojson::{items_to_feature_collection, points_from_geojson};

#[cfg(feature = "sync")]
pub use sync::SharedClusterIndex;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{ClusterConfig, ClusterError, ClusterIndex, ClusterIndexBuilder, Result};

    pub use crate::{BoundingBox, Point, PointFeature, Properties};

    pub use crate::{Cluster, ClusterId, ClusterItem, Leaf};

    #[cfg(feature = "sync")]
    pub use crate::SharedClusterIndex;
}
