//! Compute layer for clustering and queries.
//!
//! - Web-Mercator projection helpers
//! - Input validation
//! - The per-zoom cluster index and its queries
//! - GeoJSON interchange (feature `geojson`)

pub mod cluster;
pub mod projection;
pub mod validation;

#[cfg(feature = "geojson")]
pub mod geojson;

pub use cluster::ClusterIndex;
