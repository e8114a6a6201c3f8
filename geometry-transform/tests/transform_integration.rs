//! Tests d'intégration : reprojection de géométries et de fichiers GeoJSON
//!
//! Exécution:
//! ```bash
//! cargo test -p geometry-transform --test transform_integration
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use geometry_transform::export::{read_feature_collection, reproject_file, ReprojectOptions};
use geometry_transform::{
    CoordinateSystem, GeometryTransformer, LiteMapper, SmartMapper, TransformError,
    TransformStatus, DEFAULT_MAX_DEPTH,
};
use simple_features::{
    BoundingBox, CompoundCurve, CurvePolygon, Geometry, GeometryCollection, GeometryType,
    LineString, Point, Polygon, PolyhedralSurface, Tin, Triangle,
};

const HALF_WORLD: f64 = 20037508.342789244;
const MAX_LATITUDE: f64 = 85.0511287798066;

fn points_of(geometry: &Geometry) -> Vec<Point> {
    let mut points = Vec::new();
    geometry.for_each_point(&mut |p| points.push(*p));
    points
}

fn ring_z(coords: &[(f64, f64, f64)]) -> LineString {
    LineString::from_points(
        coords
            .iter()
            .map(|&(x, y, z)| Point::new_z(x, y, z))
            .collect(),
    )
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "geometry-transform-it-{}-{}",
        name,
        std::process::id()
    ));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn test_half_world_ring_to_geodetic() {
    let transformer = GeometryTransformer::from_epsg(3857, 4326).unwrap();
    let ring = LineString::from_points(vec![
        Point::new(-HALF_WORLD, -HALF_WORLD),
        Point::new(HALF_WORLD, -HALF_WORLD),
        Point::new(HALF_WORLD, HALF_WORLD),
        Point::new(-HALF_WORLD, HALF_WORLD),
        Point::new(-HALF_WORLD, -HALF_WORLD),
    ]);

    let result = transformer.transform_line_string(&ring).unwrap();
    let expected = [
        (-180.0, -MAX_LATITUDE),
        (180.0, -MAX_LATITUDE),
        (180.0, MAX_LATITUDE),
        (-180.0, MAX_LATITUDE),
        (-180.0, -MAX_LATITUDE),
    ];
    for (point, (lon, lat)) in result.points.iter().zip(expected) {
        assert!((point.x - lon).abs() < 1e-13, "{} != {}", point.x, lon);
        assert!((point.y - lat).abs() < 1e-13, "{} != {}", point.y, lat);
    }
}

#[test]
fn test_one_degree_point() {
    let transformer = GeometryTransformer::from_codes("EPSG", 3857, "EPSG", "4326").unwrap();
    let point = transformer
        .transform_point(&Point::new(111319.49079327357, 111325.14286638486))
        .unwrap();
    assert!((point.x - 1.0).abs() < 1e-13);
    assert!((point.y - 1.0).abs() < 1e-13);
}

#[test]
fn test_nested_collection_keeps_structure() {
    let mut inner = GeometryCollection::new(false, false);
    inner.add_geometry(LineString::from_points(vec![
        Point::new(0.0, 0.0),
        Point::new(111319.49079327357, 111325.14286638486),
    ]));
    let mut outer = GeometryCollection::new(false, false);
    outer.add_geometry(Point::new(111319.49079327357, 0.0));
    outer.add_geometry(inner);

    let transformer = GeometryTransformer::from_epsg(3857, 4326).unwrap();
    let result = transformer.transform_geometry(&outer.into()).unwrap();

    let Geometry::GeometryCollection(outer) = result else {
        panic!("Expected GeometryCollection");
    };
    assert_eq!(outer.num_geometries(), 2);
    assert_eq!(outer.geometries[0].geometry_type(), GeometryType::Point);
    let Geometry::GeometryCollection(inner) = &outer.geometries[1] else {
        panic!("Expected nested GeometryCollection");
    };
    let Geometry::LineString(line) = &inner.geometries[0] else {
        panic!("Expected LineString");
    };
    assert_eq!(line.num_points(), 2);
    assert!((line.points[1].x - 1.0).abs() < 1e-13);
}

#[test]
fn test_lambert93_tin_round_trip_keeps_z() {
    let mut tin = Tin::new(true, false);
    tin.add_polygon(Polygon::from_rings(vec![ring_z(&[
        (913250.0, 6458120.0, 210.0),
        (913310.0, 6458122.0, 214.5),
        (913305.0, 6458190.0, 219.0),
        (913250.0, 6458120.0, 210.0),
    ])]));
    let geometry = Geometry::from(tin);

    let forward = GeometryTransformer::from_epsg(2154, 4326).unwrap();
    let geodetic = forward.transform_geometry(&geometry).unwrap();
    assert_eq!(geodetic.geometry_type(), GeometryType::Tin);
    assert!(geodetic.has_z());

    for point in points_of(&geodetic) {
        assert!((5.0..6.5).contains(&point.x), "longitude {}", point.x);
        assert!((44.5..45.5).contains(&point.y), "latitude {}", point.y);
    }

    let back = forward.inverse().transform_geometry(&geodetic).unwrap();
    for (original, result) in points_of(&geometry).iter().zip(points_of(&back)) {
        assert!((original.x - result.x).abs() < 1e-3);
        assert!((original.y - result.y).abs() < 1e-3);
        assert_eq!(original.z, result.z);
    }
}

#[test]
fn test_curve_polygon_between_projected_systems() {
    let mut exterior = CompoundCurve::new(false, false);
    exterior.add_segment(simple_features::CircularString::from_points(vec![
        Point::new(652000.0, 6862000.0),
        Point::new(652500.0, 6862500.0),
        Point::new(653000.0, 6862000.0),
    ]));
    exterior.add_segment(LineString::from_points(vec![
        Point::new(653000.0, 6862000.0),
        Point::new(652000.0, 6862000.0),
    ]));
    let mut polygon = CurvePolygon::new(false, false);
    polygon.add_ring(exterior);

    // Lambert-93 → Web Mercator, via WGS84
    let transformer = GeometryTransformer::from_epsg(2154, 3857).unwrap();
    let result = transformer.transform_curve_polygon(&polygon).unwrap();
    assert_eq!(result.rings.len(), 1);

    let geometry = Geometry::from(result);
    let points = points_of(&geometry);
    assert_eq!(points.len(), 5);
    for point in points {
        // Paris en Web Mercator
        assert!((250_000.0..270_000.0).contains(&point.x), "x {}", point.x);
        assert!((6_240_000.0..6_260_000.0).contains(&point.y), "y {}", point.y);
    }
}

#[test]
fn test_utm_surface_round_trip() {
    let mut surface = PolyhedralSurface::new(false, false);
    let ring = LineString::from_points(vec![
        Point::new(705000.0, 1615000.0),
        Point::new(710000.0, 1615000.0),
        Point::new(710000.0, 1620000.0),
        Point::new(705000.0, 1615000.0),
    ]);
    surface.add_polygon(Polygon::from_rings(vec![ring.clone()]));
    let triangle = Triangle::from_ring(ring);

    // UTM 20N (Martinique)
    let forward = GeometryTransformer::from_epsg(32620, 4326).unwrap();
    for geometry in [Geometry::from(surface), Geometry::from(triangle)] {
        let geodetic = forward.transform_geometry(&geometry).unwrap();
        assert_eq!(geodetic.geometry_type(), geometry.geometry_type());
        let back = forward.inverse().transform_geometry(&geodetic).unwrap();
        for (original, result) in points_of(&geometry).iter().zip(points_of(&back)) {
            assert!((original.x - result.x).abs() < 1e-3);
            assert!((original.y - result.y).abs() < 1e-3);
        }
    }
}

#[test]
fn test_bounding_box_recomputed_from_corners() {
    let transformer = GeometryTransformer::from_epsg(4326, 2154).unwrap();
    let bbox = transformer
        .transform_bounding_box(&BoundingBox::new(-5.0, 42.0, 8.0, 51.0))
        .unwrap();

    assert!(bbox.min_x < bbox.max_x);
    assert!(bbox.min_y < bbox.max_y);
    // Emprise de la métropole en Lambert-93
    assert!(bbox.min_x < 150_000.0 && bbox.max_x > 1_050_000.0);
    assert!(bbox.min_y < 6_150_000.0 && bbox.max_y > 7_100_000.0);
}

#[test]
fn test_unknown_system_is_configuration_error() {
    let result = GeometryTransformer::from_codes("EPSG", 3857, "EPSG", 999_999);
    assert!(matches!(
        result,
        Err(TransformError::Configuration { ref code, .. }) if code == "999999"
    ));
}

#[test]
fn test_smart_mapper_shared_across_transformers() {
    let mapper = Arc::new(SmartMapper::new());
    let wgs84 = Arc::new(CoordinateSystem::epsg(4326));
    let mercator = Arc::new(CoordinateSystem::epsg(3857));

    let forward = GeometryTransformer::with_shared_mapper(
        Arc::clone(&mercator),
        Arc::clone(&wgs84),
        Arc::clone(&mapper),
    );
    let point = forward
        .transform_point(&Point::new_zm(111319.49079327357, 111325.14286638486, 35.0, 7.0))
        .unwrap();
    assert!((point.x - 1.0).abs() < 1e-13);
    assert_eq!(point.z, Some(35.0));
    assert_eq!(point.m, Some(7.0));
    assert_eq!(Arc::strong_count(&mapper), 2);
}

#[test]
fn test_fixtures_reproject_to_wgs84() {
    let fixtures = glob::glob(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/*.geojson"))
        .unwrap()
        .filter_map(Result::ok)
        .collect::<Vec<_>>();
    assert!(!fixtures.is_empty(), "No fixtures found");

    let output_dir = scratch_dir("fixtures");
    let options = ReprojectOptions {
        mapper: Arc::new(LiteMapper),
        source: None,
        destination: Arc::new(CoordinateSystem::epsg(4326)),
        max_depth: DEFAULT_MAX_DEPTH,
        precision: Some(7),
    };

    for fixture in fixtures {
        let output = output_dir.join(fixture.file_name().unwrap());
        let mut report = reproject_file(&options, &fixture, &output).unwrap();
        report.finalize();
        assert_eq!(report.status, TransformStatus::Success, "{}", fixture.display());

        let input = read_feature_collection(&fixture).unwrap();
        let written = read_feature_collection(&output).unwrap();
        assert_eq!(input.features.len(), written.features.len());
        assert_eq!(
            report.features_transformed + report.features_without_geometry,
            written.features.len()
        );

        for feature in &written.features {
            let Some(geometry) = &feature.geometry else {
                continue;
            };
            let geometry = Geometry::try_from(geometry).unwrap();
            for point in points_of(&geometry) {
                assert!((-5.5..10.0).contains(&point.x), "longitude {}", point.x);
                assert!((41.0..51.5).contains(&point.y), "latitude {}", point.y);
            }
        }
    }

    std::fs::remove_dir_all(&output_dir).ok();
}
