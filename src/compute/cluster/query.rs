//! Viewport and tile queries.

use super::ClusterIndex;
use super::level::Level;
use crate::compute::projection::{lat_y, lng_x};
use crate::compute::validation::validate_zoom;
use crate::error::{ClusterError, Result};
use crate::types::{ClusterId, ClusterItem, Tile, TileFeature};
use rustc_hash::FxHashSet;
use spatio_cluster_types::bbox::BoundingBox;

impl ClusterIndex {
    /// Clusters and points visible inside `bbox` at `zoom`.
    ///
    /// Fractional zooms are floored. Zooms above `max_zoom` return the raw
    /// points; zooms below `min_zoom` use the `min_zoom` level. A bbox that
    /// crosses the antimeridian is queried as two ranges and merged without
    /// duplicates. Results are ordered by their position in the level, which
    /// is identical for identical inputs.
    ///
    /// Every returned item's own coordinate lies inside `bbox`. Points above
    /// the Mercator limit (about ±85.05°) share a projected row with the
    /// limit itself, so they are matched on their geographic coordinate.
    /// A bbox with `south > north` matches nothing.
    ///
    /// Fails with [`ClusterError::InvalidZoom`] for negative or non-finite zooms.
    pub fn clusters(&self, bbox: BoundingBox, zoom: f64) -> Result<Vec<ClusterItem<'_>>> {
        validate_zoom(zoom)?;
        let level = self.level_for_zoom(zoom);

        let (first, second) = bbox.normalized_ranges();
        if first.south > first.north {
            return Ok(Vec::new());
        }

        let mut items: Vec<ClusterItem<'_>> = self.range_items(level, first).collect();

        if let Some(second) = second {
            let mut seen: FxHashSet<ClusterId> = items.iter().map(|item| item.id()).collect();
            for item in self.range_items(level, second) {
                if seen.insert(item.id()) {
                    items.push(item);
                }
            }
        }

        log::trace!(
            "query z{} {:?}: {} items",
            level.zoom,
            bbox.to_array(),
            items.len()
        );

        Ok(items)
    }

    /// Items of XYZ tile `z/x/y` with tile-local integer coordinates.
    ///
    /// The tile is padded by the cluster radius so markers near an edge are
    /// present in both neighbouring tiles; the first and last tile columns
    /// also pick up items wrapped across the antimeridian. Returns `None` for
    /// an empty tile and [`ClusterError::InvalidZoom`] for an address outside
    /// the `2^z` grid.
    pub fn tile(&self, z: u8, x: u32, y: u32) -> Result<Option<Tile<'_>>> {
        let tiles = 1u64
            .checked_shl(u32::from(z))
            .filter(|&n| n <= u64::from(u32::MAX) + 1)
            .ok_or_else(|| ClusterError::InvalidZoom(format!("Tile zoom too large: {}", z)))?;
        if u64::from(x) >= tiles || u64::from(y) >= tiles {
            return Err(ClusterError::InvalidZoom(format!(
                "Tile {}/{}/{} is outside the {}x{} grid",
                z, x, y, tiles, tiles
            )));
        }

        let level = self.level_for_zoom(f64::from(z));
        let z2 = tiles as f64;
        let (xf, yf) = (f64::from(x), f64::from(y));
        let p = self.config.radius / f64::from(self.config.extent);
        let top = (yf - p) / z2;
        let bottom = (yf + 1.0 + p) / z2;

        let mut tile = Tile {
            z,
            x,
            y,
            features: Vec::new(),
        };

        let slots = level.range((xf - p) / z2, top, (xf + 1.0 + p) / z2, bottom);
        self.add_tile_features(level, &slots, xf, yf, z2, &mut tile);

        if x == 0 {
            let slots = level.range(1.0 - p / z2, top, 1.0, bottom);
            self.add_tile_features(level, &slots, z2, yf, z2, &mut tile);
        }
        if u64::from(x) == tiles - 1 {
            let slots = level.range(0.0, top, p / z2, bottom);
            self.add_tile_features(level, &slots, -1.0, yf, z2, &mut tile);
        }

        Ok(if tile.features.is_empty() {
            None
        } else {
            Some(tile)
        })
    }

    /// Items of `level` inside a non-wrapping `range`.
    fn range_items<'a>(
        &'a self,
        level: &'a Level,
        range: BoundingBox,
    ) -> impl Iterator<Item = ClusterItem<'a>> + 'a {
        range_slots(level, &range)
            .into_iter()
            .map(move |slot| self.item(&level.nodes[slot]))
            .filter(move |item| range.contains(&item.point()))
    }

    fn add_tile_features<'a>(
        &'a self,
        level: &Level,
        slots: &[usize],
        x: f64,
        y: f64,
        z2: f64,
        tile: &mut Tile<'a>,
    ) {
        let extent = f64::from(self.config.extent);
        for &slot in slots {
            let node = &level.nodes[slot];
            tile.features.push(TileFeature {
                item: self.item(node),
                x: (extent * (node.x * z2 - x)).round() as i64,
                y: (extent * (node.y * z2 - y)).round() as i64,
            });
        }
    }
}

fn range_slots(level: &Level, bbox: &BoundingBox) -> Vec<usize> {
    level.range(
        lng_x(bbox.west),
        lat_y(bbox.north),
        lng_x(bbox.east),
        lat_y(bbox.south),
    )
}
