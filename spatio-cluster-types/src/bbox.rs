use geo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// A geographic bounding box in `[west, south, east, north]` order (degrees).
///
/// Unlike `geo::Rect`, the box may cross the antimeridian: when `west > east`
/// it covers longitudes from `west` eastwards through 180° and on to `east`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

impl BoundingBox {
    /// Create a new bounding box.
    ///
    /// # Examples
    ///
    /// ```
    /// use spatio_cluster_types::bbox::BoundingBox;
    ///
    /// let pacific = BoundingBox::new(170.0, -10.0, -170.0, 10.0);
    /// assert!(pacific.wraps_antimeridian());
    /// ```
    pub fn new(west: f64, south: f64, east: f64, north: f64) -> Self {
        Self {
            west,
            south,
            east,
            north,
        }
    }

    /// The whole world, `[-180, -90, 180, 90]`.
    pub fn world() -> Self {
        Self::new(-180.0, -90.0, 180.0, 90.0)
    }

    pub fn from_array(bbox: [f64; 4]) -> Self {
        Self::new(bbox[0], bbox[1], bbox[2], bbox[3])
    }

    pub fn to_array(&self) -> [f64; 4] {
        [self.west, self.south, self.east, self.north]
    }

    /// Build a non-wrapping box from a `geo::Rect`.
    pub fn from_rect(rect: Rect) -> Self {
        Self::new(rect.min().x, rect.min().y, rect.max().x, rect.max().y)
    }

    /// True when the box crosses the 180° meridian.
    pub fn wraps_antimeridian(&self) -> bool {
        let (_, eastern) = self.normalized_ranges();
        eastern.is_some()
    }

    /// True when the box has zero width and zero height.
    pub fn is_degenerate(&self) -> bool {
        self.west == self.east && self.south == self.north
    }

    /// Check whether a point falls inside the box, honouring antimeridian wrap.
    pub fn contains(&self, point: &Point) -> bool {
        let (first, second) = self.normalized_ranges();
        first.contains_plain(point) || second.is_some_and(|b| b.contains_plain(point))
    }

    fn contains_plain(&self, point: &Point) -> bool {
        point.x() >= self.west
            && point.x() <= self.east
            && point.y() >= self.south
            && point.y() <= self.north
    }

    /// Normalise longitudes into `[-180, 180]`, clamp latitudes into
    /// `[-90, 90]` and split a wrapping box into two non-wrapping ranges.
    ///
    /// Boxes spanning 360° or more of longitude collapse to the full
    /// longitude range. An edge on the antimeridian stays at `180` unless
    /// it was given as `-180`, so `[180, s, 180, n]` is a zero-width box on
    /// the meridian rather than the whole world. The second range, if any,
    /// is the western half (`[-180, east]`).
    ///
    /// Latitudes are not reordered: a box with `south > north` stays
    /// inverted and contains nothing.
    ///
    /// ```
    /// use spatio_cluster_types::bbox::BoundingBox;
    ///
    /// let (east_part, west_part) = BoundingBox::new(170.0, -10.0, -170.0, 10.0).normalized_ranges();
    /// assert_eq!(east_part.to_array(), [170.0, -10.0, 180.0, 10.0]);
    /// assert_eq!(west_part.unwrap().to_array(), [-180.0, -10.0, -170.0, 10.0]);
    /// ```
    pub fn normalized_ranges(&self) -> (BoundingBox, Option<BoundingBox>) {
        let south = self.south.clamp(-90.0, 90.0);
        let north = self.north.clamp(-90.0, 90.0);

        if self.east - self.west >= 360.0 {
            return (Self::new(-180.0, south, 180.0, north), None);
        }

        let west = wrap_edge(self.west);
        let east = wrap_edge(self.east);

        if west > east {
            (
                Self::new(west, south, 180.0, north),
                Some(Self::new(-180.0, south, east, north)),
            )
        } else {
            (Self::new(west, south, east, north), None)
        }
    }
}

impl From<[f64; 4]> for BoundingBox {
    fn from(bbox: [f64; 4]) -> Self {
        Self::from_array(bbox)
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::world()
    }
}

/// Wrap a longitude into `[-180, 180)`.
pub fn wrap_longitude(lon: f64) -> f64 {
    (lon + 180.0).rem_euclid(360.0) - 180.0
}

/// Like [`wrap_longitude`], but an edge east of -180 that lands on the
/// antimeridian maps to `180`.
fn wrap_edge(lon: f64) -> f64 {
    let wrapped = wrap_longitude(lon);
    if wrapped == -180.0 && lon > -180.0 {
        180.0
    } else {
        wrapped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_box_is_not_split() {
        let bbox = BoundingBox::new(-74.0, 40.7, -73.9, 40.8);
        let (first, second) = bbox.normalized_ranges();
        assert_eq!(first, bbox);
        assert!(second.is_none());
        assert!(!bbox.wraps_antimeridian());
    }

    #[test]
    fn test_world_box_keeps_180() {
        let (first, second) = BoundingBox::world().normalized_ranges();
        assert_eq!(first.to_array(), [-180.0, -90.0, 180.0, 90.0]);
        assert!(second.is_none());
    }

    #[test]
    fn test_overwide_box_collapses_to_world() {
        let (first, second) = BoundingBox::new(-200.0, -95.0, 200.0, 95.0).normalized_ranges();
        assert_eq!(first.to_array(), [-180.0, -90.0, 180.0, 90.0]);
        assert!(second.is_none());
    }

    #[test]
    fn test_out_of_range_longitudes_are_wrapped() {
        // 190 wraps to -170, 200 wraps to -160
        let (first, second) = BoundingBox::new(190.0, 0.0, 200.0, 10.0).normalized_ranges();
        assert_eq!(first.to_array(), [-170.0, 0.0, -160.0, 10.0]);
        assert!(second.is_none());
    }

    #[test]
    fn test_contains_across_antimeridian() {
        let bbox = BoundingBox::new(170.0, -10.0, -170.0, 10.0);
        assert!(bbox.contains(&Point::new(179.9, 0.0)));
        assert!(bbox.contains(&Point::new(-179.9, 0.0)));
        assert!(!bbox.contains(&Point::new(0.0, 0.0)));
        assert!(!bbox.contains(&Point::new(179.9, 20.0)));
    }

    #[test]
    fn test_degenerate_box() {
        let bbox = BoundingBox::new(5.0, 5.0, 5.0, 5.0);
        assert!(bbox.is_degenerate());
        assert!(!bbox.wraps_antimeridian());
        assert!(bbox.contains(&Point::new(5.0, 5.0)));
        assert!(!bbox.contains(&Point::new(5.0, 5.000001)));
    }

    #[test]
    fn test_zero_width_box_on_antimeridian() {
        let bbox = BoundingBox::new(180.0, 0.0, 180.0, 0.0);
        let (first, second) = bbox.normalized_ranges();
        assert_eq!(first.to_array(), [180.0, 0.0, 180.0, 0.0]);
        assert!(second.is_none());
        assert!(bbox.contains(&Point::new(180.0, 0.0)));
        assert!(!bbox.contains(&Point::new(0.0, 0.0)));
        assert!(!bbox.contains(&Point::new(-90.0, 0.0)));
    }

    #[test]
    fn test_west_edge_on_antimeridian_wraps() {
        let bbox = BoundingBox::new(180.0, -10.0, -170.0, 10.0);
        let (first, second) = bbox.normalized_ranges();
        assert_eq!(first.to_array(), [180.0, -10.0, 180.0, 10.0]);
        assert_eq!(second.unwrap().to_array(), [-180.0, -10.0, -170.0, 10.0]);
        assert!(bbox.contains(&Point::new(180.0, 0.0)));
        assert!(bbox.contains(&Point::new(-175.0, 0.0)));
        assert!(!bbox.contains(&Point::new(0.0, 0.0)));

        // -180 is still the western edge of the map
        let (first, second) = BoundingBox::new(-180.0, -10.0, -170.0, 10.0).normalized_ranges();
        assert_eq!(first.to_array(), [-180.0, -10.0, -170.0, 10.0]);
        assert!(second.is_none());
    }

    #[test]
    fn test_inverted_latitudes_contain_nothing() {
        let bbox = BoundingBox::new(-10.0, 10.0, 10.0, -10.0);
        let (first, _) = bbox.normalized_ranges();
        assert_eq!(first.to_array(), [-10.0, 10.0, 10.0, -10.0]);
        assert!(!bbox.contains(&Point::new(0.0, 0.0)));
    }

    #[test]
    fn test_wrap_longitude() {
        assert_eq!(wrap_longitude(0.0), 0.0);
        assert_eq!(wrap_longitude(180.0), -180.0);
        assert_eq!(wrap_longitude(-180.0), -180.0);
        assert_eq!(wrap_longitude(190.0), -170.0);
        assert_eq!(wrap_longitude(-190.0), 170.0);
    }
}
