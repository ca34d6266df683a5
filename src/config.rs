//! Clustering options.
//!
//! `ClusterConfig` is a plain serializable struct so it can be loaded from
//! JSON (or TOML with the `toml` feature) next to the rest of an
//! application's settings. Every loader runs [`ClusterConfig::validate`].
use crate::error::{ClusterError, Result};
use serde::de::Error;
use serde::{Deserialize, Serialize};

/// Highest zoom level the index accepts for `max_zoom`.
pub const MAX_SUPPORTED_ZOOM: u8 = 24;

/// Options controlling how points are grouped.
///
/// # Example
///
/// ```rust
/// use spatio_cluster::ClusterConfig;
///
/// let config = ClusterConfig::default().with_radius(75.0).with_max_zoom(14);
/// assert!(config.validate().is_ok());
///
/// let json = r#"{ "radius": 60, "max_zoom": 12 }"#;
/// let config = ClusterConfig::from_json(json).unwrap();
/// assert_eq!(config.min_points, 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClusterConfig {
    /// Merge radius in pixels, measured against `extent`
    #[serde(default = "ClusterConfig::default_radius")]
    pub radius: f64,

    /// Lowest zoom level that gets its own cluster level
    #[serde(default)]
    pub min_zoom: u8,

    /// Highest zoom level at which points are still clustered
    #[serde(default = "ClusterConfig::default_max_zoom")]
    pub max_zoom: u8,

    /// Minimum number of points needed to form a cluster
    #[serde(default = "ClusterConfig::default_min_points")]
    pub min_points: usize,

    /// Tile extent in pixels that `radius` is relative to
    #[serde(default = "ClusterConfig::default_extent")]
    pub extent: u32,

    /// Expose the input index as the feature id of leaf points in GeoJSON and tile output
    #[serde(default)]
    pub generate_id: bool,
}

impl ClusterConfig {
    const fn default_radius() -> f64 {
        40.0
    }

    const fn default_max_zoom() -> u8 {
        16
    }

    const fn default_min_points() -> usize {
        2
    }

    const fn default_extent() -> u32 {
        512
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_min_zoom(mut self, min_zoom: u8) -> Self {
        self.min_zoom = min_zoom;
        self
    }

    pub fn with_max_zoom(mut self, max_zoom: u8) -> Self {
        self.max_zoom = max_zoom;
        self
    }

    pub fn with_min_points(mut self, min_points: usize) -> Self {
        self.min_points = min_points;
        self
    }

    pub fn with_extent(mut self, extent: u32) -> Self {
        self.extent = extent;
        self
    }

    pub fn with_generate_id(mut self, generate_id: bool) -> Self {
        self.generate_id = generate_id;
        self
    }

    /// Merge radius at `zoom` in projected unit coordinates.
    pub(crate) fn radius_at(&self, zoom: u8) -> f64 {
        self.radius / (f64::from(self.extent) * 2f64.powi(i32::from(zoom)))
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(ClusterError::InvalidConfig(format!(
                "Radius must be a positive finite number, got: {}",
                self.radius
            )));
        }

        if self.max_zoom > MAX_SUPPORTED_ZOOM {
            return Err(ClusterError::InvalidConfig(format!(
                "Max zoom must be between 0 and {}, got: {}",
                MAX_SUPPORTED_ZOOM, self.max_zoom
            )));
        }

        if self.min_zoom > self.max_zoom {
            return Err(ClusterError::InvalidConfig(format!(
                "Min zoom {} is greater than max zoom {}",
                self.min_zoom, self.max_zoom
            )));
        }

        if self.min_points < 2 {
            return Err(ClusterError::InvalidConfig(format!(
                "Min points must be at least 2, got: {}",
                self.min_points
            )));
        }

        if self.extent == 0 {
            return Err(ClusterError::InvalidConfig(
                "Extent must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }

    /// Load configuration from JSON string
    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        let config: ClusterConfig = serde_json::from_str(json)?;
        if let Err(e) = config.validate() {
            return Err(serde_json::Error::custom(e));
        }
        Ok(config)
    }

    /// Save configuration as JSON string
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| {
            ClusterError::SerializationErrorWithContext(format!(
                "Failed to serialize config: {}",
                e
            ))
        })
    }

    /// Load configuration from TOML string (requires toml feature)
    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> std::result::Result<Self, toml::de::Error> {
        let config: ClusterConfig = toml::from_str(toml_str)?;
        if let Err(e) = config.validate() {
            return Err(toml::de::Error::custom(e));
        }
        Ok(config)
    }

    /// Save configuration as TOML string (requires toml feature)
    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            radius: Self::default_radius(),
            min_zoom: 0,
            max_zoom: Self::default_max_zoom(),
            min_points: Self::default_min_points(),
            extent: Self::default_extent(),
            generate_id: false,
        }
    }
}
