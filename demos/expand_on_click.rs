//! Simulates the click-to-expand loop a map renderer would run: load a
//! GeoJSON feed, show clusters for the current camera, "click" the largest
//! cluster and move the camera to its expansion target until it splits into
//! single markers.

use spatio_cluster::prelude::*;
use spatio_cluster::points_from_geojson;

fn feed() -> String {
    let features: Vec<String> = (0..200)
        .map(|i| {
            let lon = 12.45 + (i % 20) as f64 * 0.002;
            let lat = 41.88 + (i / 20) as f64 * 0.002;
            format!(
                r#"{{"type":"Feature","geometry":{{"type":"Point","coordinates":[{},{}]}},"properties":{{"mag":{}}}}}"#,
                lon,
                lat,
                i % 9
            )
        })
        .collect();
    format!(
        r#"{{"type":"FeatureCollection","features":[{}]}}"#,
        features.join(",")
    )
}

fn main() -> Result<()> {
    env_logger::init();

    let index = ClusterIndex::build(points_from_geojson(&feed())?, ClusterConfig::default())?;

    let mut zoom = 1.4;
    let mut center = Point::new(0.0, 15.0);

    loop {
        let span = 180.0 / 2f64.powf(zoom);
        let viewport = BoundingBox::new(
            center.x() - span,
            center.y() - span / 2.0,
            center.x() + span,
            center.y() + span / 2.0,
        );
        let items = index.clusters(viewport, zoom)?;
        let collection = index.clusters_geojson(viewport, zoom)?;
        println!(
            "camera z{:.1} @ ({:.4}, {:.4}): {} markers, {} bytes of GeoJSON",
            zoom,
            center.x(),
            center.y(),
            items.len(),
            serde_json::to_string(&collection).map(|s| s.len()).unwrap_or(0)
        );

        let Some(target) = items
            .iter()
            .filter_map(|item| item.as_cluster())
            .max_by_key(|cluster| cluster.count)
        else {
            println!("no clusters left, all markers visible");
            break;
        };

        // a stale or leaf id would simply be skipped, like a missed click
        match index.expansion_target(target.id) {
            Ok((point, next_zoom)) => {
                println!(
                    "  click cluster {} ({} points) -> ease to z{}",
                    target.id, target.count, next_zoom
                );
                if f64::from(next_zoom) <= zoom {
                    println!("  cluster cannot expand further");
                    break;
                }
                center = point;
                zoom = f64::from(next_zoom);
            }
            Err(e) => {
                println!("  ignoring click: {}", e);
                break;
            }
        }
    }

    Ok(())
}
