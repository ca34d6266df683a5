//! Validation for geographic coordinates.

use crate::error::{ClusterError, Result};
use geo::Point;
use spatio_cluster_types::point::PointFeature;

/// Validates a 2D point has valid longitude and latitude.
///
/// Longitude: [-180.0, 180.0], Latitude: [-90.0, 90.0]. The error reason is
/// returned as a plain message so callers can attach context.
///
/// # Examples
///
/// ```
/// use spatio_cluster::compute::validation::validate_geographic_point;
/// use geo::Point;
///
/// assert!(validate_geographic_point(&Point::new(-74.0060, 40.7128)).is_ok());
/// assert!(validate_geographic_point(&Point::new(200.0, 40.0)).is_err());
/// assert!(validate_geographic_point(&Point::new(-74.0, 95.0)).is_err());
/// ```
pub fn validate_geographic_point(point: &Point) -> std::result::Result<(), String> {
    let (x, y) = (point.x(), point.y());

    if !x.is_finite() {
        return Err(format!("Longitude must be finite, got: {}", x));
    }

    if !y.is_finite() {
        return Err(format!("Latitude must be finite, got: {}", y));
    }

    if !(-180.0..=180.0).contains(&x) {
        return Err(format!("Longitude out of range [-180.0, 180.0]: {}", x));
    }

    if !(-90.0..=90.0).contains(&y) {
        return Err(format!("Latitude out of range [-90.0, 90.0]: {}", y));
    }

    Ok(())
}

/// Validates every input feature, failing on the first bad coordinate.
///
/// ```
/// use spatio_cluster::compute::validation::validate_features;
/// use spatio_cluster::{ClusterError, PointFeature};
///
/// let features = vec![
///     PointFeature::new(-74.0, 40.7),
///     PointFeature::new(999.0, 40.0),
/// ];
///
/// let err = validate_features(&features).unwrap_err();
/// assert!(matches!(err, ClusterError::InvalidPoint { index: 1, .. }));
/// ```
pub fn validate_features(features: &[PointFeature]) -> Result<()> {
    for (index, feature) in features.iter().enumerate() {
        validate_geographic_point(&feature.point)
            .map_err(|reason| ClusterError::InvalidPoint { index, reason })?;
    }
    Ok(())
}

/// Validates a query zoom: must be finite and non-negative.
pub fn validate_zoom(zoom: f64) -> Result<()> {
    if !zoom.is_finite() {
        return Err(ClusterError::InvalidZoom(format!(
            "Zoom must be finite, got: {}",
            zoom
        )));
    }
    if zoom < 0.0 {
        return Err(ClusterError::InvalidZoom(format!(
            "Zoom must not be negative, got: {}",
            zoom
        )));
    }
    Ok(())
}
