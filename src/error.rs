//! Error types for the clustering engine.

use crate::types::ClusterId;
use thiserror::Error;

/// Errors produced while building or querying a [`ClusterIndex`](crate::ClusterIndex).
///
/// Every variant is a local validation failure; none of them is retryable.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ClusterError {
    /// Rejected clustering options (radius, zoom range, minimum points, extent).
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// An input point with a non-finite or out-of-range coordinate.
    #[error("invalid point at index {index}: {reason}")]
    InvalidPoint { index: usize, reason: String },

    /// A zoom level (or tile address) that cannot be queried.
    #[error("invalid zoom: {0}")]
    InvalidZoom(String),

    /// A cluster id that this index did not produce.
    #[error("unknown cluster id {0}")]
    UnknownCluster(ClusterId),

    /// Malformed external input such as GeoJSON text.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("serialization error: {0}")]
    SerializationErrorWithContext(String),
}

pub type Result<T> = std::result::Result<T, ClusterError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ClusterError::InvalidPoint {
            index: 3,
            reason: "Latitude out of range [-90.0, 90.0]: 91".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid point at index 3: Latitude out of range [-90.0, 90.0]: 91"
        );

        let err = ClusterError::UnknownCluster(ClusterId::new(42));
        assert_eq!(err.to_string(), "unknown cluster id 42");
    }
}
