use spatio_cluster::{
    BoundingBox, ClusterConfig, ClusterError, ClusterId, ClusterIndex, PointFeature,
};

/// Test 1: Large dataset stress test
#[test]
fn test_large_dataset_build() {
    let _ = env_logger::builder().is_test(true).try_init();

    // 20K points on a jittered grid (keeping it reasonable for CI)
    let points: Vec<PointFeature> = (0..20_000)
        .map(|i| {
            let lon = -170.0 + (i % 200) as f64 * 1.7 + (i % 7) as f64 * 0.01;
            let lat = -80.0 + (i / 200) as f64 * 1.6;
            PointFeature::new(lon, lat)
        })
        .collect();

    let index = ClusterIndex::build(points, ClusterConfig::default()).expect("Build failed");
    let items = index
        .clusters(BoundingBox::world(), 0.0)
        .expect("Query failed");
    let total: usize = items.iter().map(|i| i.count()).sum();
    assert_eq!(total, 20_000);
    assert!(items.len() < 1_000);
}

/// Test 2: Extreme coordinate values
#[test]
fn test_extreme_coordinates() {
    let points = vec![
        PointFeature::new(0.0, 90.0),
        PointFeature::new(0.0, -90.0),
        PointFeature::new(180.0, 0.0),
        PointFeature::new(-180.0, 0.0),
    ];

    let index = ClusterIndex::build(points, ClusterConfig::default())
        .expect("Boundary coordinates are valid");

    // Should handle these without panic
    let items = index
        .clusters(BoundingBox::world(), 17.0)
        .expect("Query failed");
    assert_eq!(items.len(), 4);

    // 180 and -180 are the same meridian
    let items = index.clusters(BoundingBox::world(), 0.0).unwrap();
    let total: usize = items.iter().map(|i| i.count()).sum();
    assert_eq!(total, 4);
    assert!(items.iter().any(|i| i.is_cluster()));
}

/// Test 3: Coincident points never split
#[test]
fn test_coincident_points() {
    let points = vec![PointFeature::new(12.5, 41.9); 25];
    let index = ClusterIndex::build(points, ClusterConfig::default().with_max_zoom(20)).unwrap();

    let items = index.clusters(BoundingBox::world(), 20.0).unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].count(), 25);
    assert_eq!(index.expansion_zoom(items[0].id()).unwrap(), 20);

    let raw = index.clusters(BoundingBox::world(), 21.0).unwrap();
    assert_eq!(raw.len(), 25);
}

/// Test 4: Single point
#[test]
fn test_single_point() {
    let index = ClusterIndex::build(vec![PointFeature::new(1.0, 1.0)], ClusterConfig::default())
        .unwrap();
    for zoom in 0..=17 {
        let items = index.clusters(BoundingBox::world(), f64::from(zoom)).unwrap();
        assert_eq!(items.len(), 1);
        assert!(!items[0].is_cluster());
    }
    assert_eq!(index.cluster_count(), 0);
}

/// Test 5: Max zoom zero
#[test]
fn test_max_zoom_zero() {
    let points = vec![PointFeature::new(0.0, 0.0), PointFeature::new(0.01, 0.0)];
    let index = ClusterIndex::build(points, ClusterConfig::default().with_max_zoom(0)).unwrap();

    let items = index.clusters(BoundingBox::world(), 0.0).unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(index.expansion_zoom(items[0].id()).unwrap(), 0);
    assert_eq!(index.clusters(BoundingBox::world(), 1.0).unwrap().len(), 2);
}

/// Test 6: Huge radius folds everything into one cluster
#[test]
fn test_huge_radius() {
    let points = vec![
        PointFeature::new(-150.0, 60.0),
        PointFeature::new(150.0, -60.0),
        PointFeature::new(0.0, 0.0),
    ];
    let index = ClusterIndex::build(points, ClusterConfig::default().with_radius(2_000.0)).unwrap();
    let items = index.clusters(BoundingBox::world(), 0.0).unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].count(), 3);
}

/// Test 7: Out of range bbox values are normalised
#[test]
fn test_bbox_normalisation() {
    let points = vec![PointFeature::new(-170.0, 5.0), PointFeature::new(100.0, 5.0)];
    let index = ClusterIndex::build(points, ClusterConfig::default()).unwrap();

    // 190..200 is -170..-160 after wrapping
    let items = index
        .clusters(BoundingBox::new(185.0, 0.0, 200.0, 10.0), 10.0)
        .unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].point().x(), -170.0);

    // wider than the world
    let items = index
        .clusters(BoundingBox::new(-400.0, -100.0, 400.0, 100.0), 10.0)
        .unwrap();
    assert_eq!(items.len(), 2);
}

/// Test 8: Query-time errors do not poison the index
#[test]
fn test_errors_are_recoverable() {
    let index = ClusterIndex::build(vec![PointFeature::new(3.0, 3.0)], ClusterConfig::default())
        .unwrap();

    assert!(matches!(
        index.clusters(BoundingBox::world(), -3.0),
        Err(ClusterError::InvalidZoom(_))
    ));
    assert!(index.expansion_zoom(ClusterId::new(0)).is_err());
    assert_eq!(index.clusters(BoundingBox::world(), 3.0).unwrap().len(), 1);
}
