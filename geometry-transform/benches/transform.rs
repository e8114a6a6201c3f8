//! Benchmarks pour la reprojection de géométries

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use geometry_transform::GeometryTransformer;
use simple_features::{Geometry, GeometryCollection, LineString, MultiPolygon, Point, Polygon};

/// Polygone régulier en Lambert-93 autour de Lyon
fn ring(points: usize, offset: f64) -> LineString {
    let mut coords: Vec<Point> = (0..points)
        .map(|i| {
            let angle = i as f64 / points as f64 * std::f64::consts::TAU;
            Point::new(842000.0 + offset + 500.0 * angle.cos(), 6519000.0 + 500.0 * angle.sin())
        })
        .collect();
    coords.push(coords[0]);
    LineString::from_points(coords)
}

fn multi_polygon(polygons: usize, points: usize) -> Geometry {
    let mut multi = MultiPolygon::new(false, false);
    for i in 0..polygons {
        multi.add_polygon(Polygon::from_rings(vec![ring(points, i as f64 * 1000.0)]));
    }
    multi.into()
}

fn bench_point(c: &mut Criterion) {
    let transformer = GeometryTransformer::from_epsg(3857, 4326).unwrap();
    let point = Point::new(261845.7, 6250566.7);

    c.bench_function("point_web_mercator_to_wgs84", |b| {
        b.iter(|| transformer.transform_point(black_box(&point)).unwrap())
    });
}

fn bench_multi_polygon(c: &mut Criterion) {
    let transformer = GeometryTransformer::from_epsg(2154, 4326).unwrap();

    let mut group = c.benchmark_group("multi_polygon_lambert93_to_wgs84");
    for polygons in [10usize, 100, 1000] {
        let geometry = multi_polygon(polygons, 64);
        group.throughput(Throughput::Elements(geometry.num_points() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(polygons),
            &geometry,
            |b, geometry| b.iter(|| transformer.transform_geometry(black_box(geometry)).unwrap()),
        );
    }
    group.finish();
}

fn bench_nested_collection(c: &mut Criterion) {
    let transformer = GeometryTransformer::from_epsg(2154, 3857).unwrap();

    let mut geometry = multi_polygon(4, 32);
    for _ in 0..32 {
        let mut collection = GeometryCollection::new(false, false);
        collection.add_geometry(geometry);
        collection.add_geometry(Point::new(842000.0, 6519000.0));
        geometry = collection.into();
    }

    c.bench_function("nested_collection_depth_32", |b| {
        b.iter(|| transformer.transform_geometry(black_box(&geometry)).unwrap())
    });
}

criterion_group!(benches, bench_point, bench_multi_polygon, bench_nested_collection);
criterion_main!(benches);
