use spatio_cluster::prelude::*;

fn main() -> Result<()> {
    env_logger::init();

    println!("spatio-cluster {} - getting started\n", spatio_cluster::VERSION);

    // A small fixed set of markers: several around San Francisco, a few elsewhere
    let mut points = Vec::new();
    for i in 0..40 {
        let lon = -122.45 + (i % 8) as f64 * 0.01;
        let lat = 37.75 + (i / 8) as f64 * 0.01;
        points.push(PointFeature::new(lon, lat).with_property("mag", i % 5));
    }
    points.push(PointFeature::new(-118.2437, 34.0522).with_property("mag", 6));
    points.push(PointFeature::new(139.6917, 35.6895).with_property("mag", 7));

    let index = ClusterIndex::builder()
        .radius(40.0)
        .max_zoom(16)
        .build(points)?;

    let stats = index.stats();
    println!(
        "Indexed {} points, {} clusters across {} zoom levels",
        stats.point_count,
        stats.cluster_count,
        stats.levels.len()
    );

    for zoom in [0.0, 4.0, 8.0, 12.0, 17.0] {
        let items = index.clusters(BoundingBox::new(-180.0, -85.0, 180.0, 85.0), zoom)?;
        let clusters = items.iter().filter(|item| item.is_cluster()).count();
        println!(
            "z{:>2}: {:>3} markers ({} clusters, {} points)",
            zoom,
            items.len(),
            clusters,
            items.len() - clusters
        );
    }

    println!();
    for item in index.clusters(BoundingBox::world(), 6.0)? {
        match item {
            ClusterItem::Cluster(cluster) => {
                let zoom = index.expansion_zoom(cluster.id)?;
                println!(
                    "cluster {} of {} at ({:.4}, {:.4}) expands at z{}",
                    cluster.id,
                    cluster.abbreviated_count(),
                    cluster.point.x(),
                    cluster.point.y(),
                    zoom
                );
            }
            ClusterItem::Leaf(leaf) => {
                println!(
                    "point {} at ({:.4}, {:.4}) mag={}",
                    leaf.id,
                    leaf.point.x(),
                    leaf.point.y(),
                    leaf.properties.get("mag").map(|m| m.to_string()).unwrap_or_default()
                );
            }
        }
    }

    Ok(())
}
