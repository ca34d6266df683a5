//! # spatio-cluster-types
//!
//! Core data types shared by the spatio-cluster engine and its callers.
//!
//! - **Point types**: `PointFeature`, `Properties`
//! - **Region types**: `BoundingBox`
//!
//! All types are serializable with Serde and built on top of the `geo` crate's
//! geometric primitives.
//!
//! ## Examples
//!
//! ```rust
//! use spatio_cluster_types::point::PointFeature;
//! use spatio_cluster_types::bbox::BoundingBox;
//!
//! let quake = PointFeature::new(-122.42, 37.77).with_property("mag", 4.2);
//! let bay_area = BoundingBox::new(-123.0, 37.0, -121.0, 38.5);
//! assert!(bay_area.contains(&quake.point));
//! ```

pub mod bbox;
pub mod point;

pub use bbox::BoundingBox;
pub use point::{PointFeature, Properties};
