//! Web-Mercator projection into the unit square.
//!
//! Longitude -180..180 maps to x 0..1 and latitude maps to y 0..1 with y
//! growing southwards, matching XYZ tile addressing. At zoom `z` the world is
//! `extent * 2^z` pixels wide.

use std::f64::consts::PI;

/// Project a longitude (degrees) to x in `[0, 1]`.
pub fn lng_x(lng: f64) -> f64 {
    lng / 360.0 + 0.5
}

/// Project a latitude (degrees) to y in `[0, 1]`; poles are clamped.
pub fn lat_y(lat: f64) -> f64 {
    let sin = lat.to_radians().sin();
    let y = 0.5 - 0.25 * ((1.0 + sin) / (1.0 - sin)).ln() / PI;
    y.clamp(0.0, 1.0)
}

/// Inverse of [`lng_x`].
pub fn x_lng(x: f64) -> f64 {
    (x - 0.5) * 360.0
}

/// Inverse of [`lat_y`].
pub fn y_lat(y: f64) -> f64 {
    let y2 = (180.0 - y * 360.0).to_radians();
    (360.0 * y2.exp().atan() / PI) - 90.0
}

/// Wrap a projected x into `[0, 1)`.
pub fn wrap_x(x: f64) -> f64 {
    x.rem_euclid(1.0)
}

/// Shortest horizontal offset from `from` to `to`, going around the antimeridian if shorter.
pub fn wrapped_dx(from: f64, to: f64) -> f64 {
    let dx = to - from;
    if dx > 0.5 {
        dx - 1.0
    } else if dx < -0.5 {
        dx + 1.0
    } else {
        dx
    }
}

/// Screen distance in pixels between two projected positions at `zoom`.
///
/// ```
/// use spatio_cluster::compute::projection::{lat_y, lng_x, pixel_distance};
///
/// // One degree of longitude at the equator, zoom 0, 512px tiles
/// let d = pixel_distance((lng_x(0.0), lat_y(0.0)), (lng_x(1.0), lat_y(0.0)), 0, 512);
/// assert!((d - 512.0 / 360.0).abs() < 1e-9);
/// ```
pub fn pixel_distance(a: (f64, f64), b: (f64, f64), zoom: u8, extent: u32) -> f64 {
    let dx = wrapped_dx(a.0, b.0);
    let dy = b.1 - a.1;
    (dx * dx + dy * dy).sqrt() * f64::from(extent) * 2f64.powi(i32::from(zoom))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_projection_anchors() {
        assert_eq!(lng_x(-180.0), 0.0);
        assert_eq!(lng_x(0.0), 0.5);
        assert_eq!(lng_x(180.0), 1.0);
        assert!((lat_y(0.0) - 0.5).abs() < EPS);
        assert_eq!(lat_y(90.0), 0.0);
        assert_eq!(lat_y(-90.0), 1.0);
        // northern latitudes sit above the equator
        assert!(lat_y(45.0) < 0.5);
    }

    #[test]
    fn test_projection_inverts() {
        for lng in [-179.5, -74.006, 0.0, 13.405, 179.9] {
            assert!((x_lng(lng_x(lng)) - lng).abs() < EPS);
        }
        for lat in [-85.0, -33.86, 0.0, 40.7128, 85.0] {
            assert!((y_lat(lat_y(lat)) - lat).abs() < 1e-7);
        }
    }

    #[test]
    fn test_wrapped_dx() {
        assert!((wrapped_dx(0.1, 0.2) - 0.1).abs() < EPS);
        assert!((wrapped_dx(0.99, 0.01) - 0.02).abs() < EPS);
        assert!((wrapped_dx(0.01, 0.99) + 0.02).abs() < EPS);
        assert_eq!(wrap_x(1.0), 0.0);
        assert!((wrap_x(-0.25) - 0.75).abs() < EPS);
    }

    #[test]
    fn test_pixel_distance_across_antimeridian() {
        let a = (lng_x(179.9), lat_y(0.0));
        let b = (lng_x(-179.9), lat_y(0.0));
        let expected = 0.2 / 360.0 * 512.0;
        assert!((pixel_distance(a, b, 0, 512) - expected).abs() < 1e-9);
        assert!((pixel_distance(a, b, 3, 512) - expected * 8.0).abs() < 1e-9);
    }
}
