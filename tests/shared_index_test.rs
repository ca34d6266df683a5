use spatio_cluster::{BoundingBox, ClusterConfig, ClusterIndex, PointFeature, SharedClusterIndex};
use std::thread;

fn cities() -> Vec<PointFeature> {
    vec![
        PointFeature::new(-74.0060, 40.7128),
        PointFeature::new(-73.9352, 40.7306),
        PointFeature::new(2.3522, 48.8566),
        PointFeature::new(139.6917, 35.6895),
    ]
}

#[test]
fn test_rebuild_swaps_index() {
    let shared = SharedClusterIndex::empty(ClusterConfig::default()).unwrap();
    assert!(shared.current().is_empty());

    shared.rebuild(cities(), ClusterConfig::default()).unwrap();
    assert_eq!(shared.current().len(), 4);
}

#[test]
fn test_failed_rebuild_keeps_previous_index() {
    let index = ClusterIndex::build(cities(), ClusterConfig::default()).unwrap();
    let shared = SharedClusterIndex::new(index);

    let mut bad = cities();
    bad.push(PointFeature::new(0.0, -91.0));
    assert!(shared.rebuild(bad, ClusterConfig::default()).is_err());
    assert!(
        shared
            .rebuild(cities(), ClusterConfig::default().with_radius(-1.0))
            .is_err()
    );

    let current = shared.current();
    assert_eq!(current.len(), 4);
    assert_eq!(current.clusters(BoundingBox::world(), 17.0).unwrap().len(), 4);
}

#[test]
fn test_old_snapshot_survives_rebuild() {
    let shared = SharedClusterIndex::new(
        ClusterIndex::build(cities(), ClusterConfig::default()).unwrap(),
    );
    let snapshot = shared.current();

    shared
        .rebuild(vec![PointFeature::new(0.0, 0.0)], ClusterConfig::default())
        .unwrap();

    assert_eq!(snapshot.len(), 4);
    assert_eq!(snapshot.clusters(BoundingBox::world(), 0.0).unwrap().len(), 3);
    assert_eq!(shared.current().len(), 1);
}

#[test]
fn test_background_rebuild_with_concurrent_readers() {
    let shared = SharedClusterIndex::new(
        ClusterIndex::build(cities(), ClusterConfig::default()).unwrap(),
    );

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let shared = shared.clone();
            thread::spawn(move || {
                for _ in 0..100 {
                    let index = shared.current();
                    let items = index.clusters(BoundingBox::world(), 2.0).unwrap();
                    let total: usize = items.iter().map(|i| i.count()).sum();
                    assert_eq!(total, index.len());
                }
            })
        })
        .collect();

    let many: Vec<PointFeature> = (0..2_000)
        .map(|i| PointFeature::new(-170.0 + (i % 100) as f64 * 3.4, -60.0 + (i / 100) as f64 * 6.0))
        .collect();
    let builder = shared.rebuild_in_background(many, ClusterConfig::default());

    builder.join().unwrap().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }

    assert_eq!(shared.current().len(), 2_000);
}
