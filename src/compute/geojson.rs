//! GeoJSON input and output for clustering.
//!
//! Input is a `FeatureCollection` of `Point` features. Output features carry
//! the properties map renderers filter and label on: `cluster`,
//! `cluster_id`, `point_count` and `point_count_abbreviated` for clusters,
//! and the original properties for leaves.

use crate::compute::cluster::ClusterIndex;
use crate::error::{ClusterError, Result};
use crate::types::ClusterItem;
use geojson::{Feature, FeatureCollection, GeoJson, Geometry, JsonObject, Value, feature::Id};
use serde_json::json;
use spatio_cluster_types::bbox::BoundingBox;
use spatio_cluster_types::point::PointFeature;

/// Parses GeoJSON text into clustering input.
///
/// Accepts a `FeatureCollection` or a single `Feature`; every feature must
/// have a `Point` geometry. Missing properties become an empty map.
///
/// ```
/// use spatio_cluster::compute::geojson::points_from_geojson;
///
/// let text = r#"{
///   "type": "FeatureCollection",
///   "features": [
///     { "type": "Feature", "geometry": { "type": "Point", "coordinates": [-122.4, 37.8] },
///       "properties": { "mag": 3 } }
///   ]
/// }"#;
/// let points = points_from_geojson(text).unwrap();
/// assert_eq!(points.len(), 1);
/// assert_eq!(points[0].lon(), -122.4);
/// ```
pub fn points_from_geojson(text: &str) -> Result<Vec<PointFeature>> {
    let geojson: GeoJson = text
        .parse()
        .map_err(|e| ClusterError::InvalidInput(format!("Failed to parse GeoJSON: {}", e)))?;

    match geojson {
        GeoJson::FeatureCollection(collection) => collection
            .features
            .into_iter()
            .enumerate()
            .map(|(i, feature)| point_from_feature(feature, i))
            .collect(),
        GeoJson::Feature(feature) => Ok(vec![point_from_feature(feature, 0)?]),
        GeoJson::Geometry(_) => Err(ClusterError::InvalidInput(
            "Expected a Feature or FeatureCollection, got a bare Geometry".to_string(),
        )),
    }
}

fn point_from_feature(feature: Feature, index: usize) -> Result<PointFeature> {
    let geometry = feature.geometry.ok_or_else(|| {
        ClusterError::InvalidInput(format!("Feature {} has no geometry", index))
    })?;

    match geometry.value {
        Value::Point(coords) => {
            if coords.len() < 2 {
                return Err(ClusterError::InvalidInput(format!(
                    "Feature {}: Point must have at least 2 coordinates",
                    index
                )));
            }
            Ok(PointFeature::new(coords[0], coords[1])
                .with_properties(feature.properties.unwrap_or_default()))
        }
        _ => Err(ClusterError::InvalidInput(format!(
            "Feature {}: geometry is not a Point",
            index
        ))),
    }
}

impl ClusterItem<'_> {
    /// Converts the item into a GeoJSON point feature.
    ///
    /// Clusters get their cluster id as feature id. Leaves get their input
    /// index as feature id only when `generate_id` is set.
    pub fn to_geojson_feature(&self, generate_id: bool) -> Feature {
        let point = self.point();
        let geometry = Geometry::new(Value::Point(vec![point.x(), point.y()]));

        let (id, properties) = match self {
            ClusterItem::Cluster(cluster) => {
                let mut properties = JsonObject::new();
                properties.insert("cluster".to_string(), json!(true));
                properties.insert("cluster_id".to_string(), json!(cluster.id.get()));
                properties.insert("point_count".to_string(), json!(cluster.count));
                properties.insert(
                    "point_count_abbreviated".to_string(),
                    json!(cluster.abbreviated_count()),
                );
                (Some(Id::Number(cluster.id.get().into())), properties)
            }
            ClusterItem::Leaf(leaf) => {
                let id = generate_id.then(|| Id::Number(leaf.id.get().into()));
                (id, leaf.properties.clone())
            }
        };

        Feature {
            bbox: None,
            geometry: Some(geometry),
            id,
            properties: Some(properties),
            foreign_members: None,
        }
    }
}

/// Wraps query results in a `FeatureCollection`.
pub fn items_to_feature_collection(items: &[ClusterItem<'_>], generate_id: bool) -> FeatureCollection {
    FeatureCollection {
        bbox: None,
        features: items
            .iter()
            .map(|item| item.to_geojson_feature(generate_id))
            .collect(),
        foreign_members: None,
    }
}

impl ClusterIndex {
    /// Builds an index straight from GeoJSON text.
    pub fn from_geojson(text: &str, config: crate::config::ClusterConfig) -> Result<Self> {
        Self::build(points_from_geojson(text)?, config)
    }

    /// [`clusters`](Self::clusters) rendered as a GeoJSON `FeatureCollection`.
    pub fn clusters_geojson(&self, bbox: BoundingBox, zoom: f64) -> Result<FeatureCollection> {
        let items = self.clusters(bbox, zoom)?;
        Ok(items_to_feature_collection(&items, self.config().generate_id))
    }
}
