use geo::Point;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Opaque attribute bag attached to every input point (category, magnitude, ...).
pub type Properties = Map<String, Value>;

/// An input record for clustering: a geographic position plus its properties.
///
/// Coordinates follow the `geo` convention of x = longitude and y = latitude,
/// both in degrees. A `PointFeature` is created once from a data source and is
/// never mutated by the clustering engine.
///
/// # Examples
///
/// ```
/// use spatio_cluster_types::point::PointFeature;
///
/// let feature = PointFeature::new(13.4050, 52.5200)
///     .with_property("name", "Berlin")
///     .with_property("mag", 3);
///
/// assert_eq!(feature.lon(), 13.4050);
/// assert_eq!(feature.property("name").and_then(|v| v.as_str()), Some("Berlin"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointFeature {
    /// Position (longitude, latitude)
    pub point: Point<f64>,
    /// Arbitrary key/value attributes carried through to leaf results
    #[serde(default)]
    pub properties: Properties,
}

impl PointFeature {
    /// Create a feature with no properties from longitude and latitude.
    pub fn new(lon: f64, lat: f64) -> Self {
        Self {
            point: Point::new(lon, lat),
            properties: Properties::new(),
        }
    }

    /// Create a feature from an existing `geo::Point` and property bag.
    pub fn from_point(point: Point<f64>, properties: Properties) -> Self {
        Self { point, properties }
    }

    /// Attach a single property, replacing any previous value under `key`.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Replace the whole property bag.
    pub fn with_properties(mut self, properties: Properties) -> Self {
        self.properties = properties;
        self
    }

    /// Longitude in degrees.
    pub fn lon(&self) -> f64 {
        self.point.x()
    }

    /// Latitude in degrees.
    pub fn lat(&self) -> f64 {
        self.point.y()
    }

    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }
}

impl From<Point<f64>> for PointFeature {
    fn from(point: Point<f64>) -> Self {
        Self::from_point(point, Properties::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_feature_creation() {
        let feature = PointFeature::new(-74.0060, 40.7128);
        assert_eq!(feature.lon(), -74.0060);
        assert_eq!(feature.lat(), 40.7128);
        assert!(feature.properties.is_empty());
    }

    #[test]
    fn test_with_property_overwrites() {
        let feature = PointFeature::new(0.0, 0.0)
            .with_property("mag", 1)
            .with_property("mag", 5.5);

        assert_eq!(feature.properties.len(), 1);
        assert_eq!(feature.property("mag"), Some(&json!(5.5)));
    }

    #[test]
    fn test_from_geo_point() {
        let feature: PointFeature = Point::new(2.3522, 48.8566).into();
        assert_eq!(feature.point, Point::new(2.3522, 48.8566));
        assert!(feature.property("missing").is_none());
    }

    #[test]
    fn test_serde_defaults_properties() {
        let json = r#"{"point":{"x":10.0,"y":20.0}}"#;
        let feature: PointFeature = serde_json::from_str(json).unwrap();
        assert_eq!(feature.lon(), 10.0);
        assert!(feature.properties.is_empty());
    }
}
