//! Interop avec `geo` (geo-types, 2D uniquement)

use crate::{
    Geometry, GeometryCollection, GeometryError, LineString, MultiLineString, MultiPoint,
    MultiPolygon, Point, Polygon, Triangle,
};

fn point_from_coord(coord: ::geo::Coord<f64>) -> Point {
    Point::new(coord.x, coord.y)
}

fn line_from_geo(line: &::geo::LineString<f64>) -> LineString {
    LineString::from_points(line.0.iter().copied().map(point_from_coord).collect())
}

fn polygon_from_geo(polygon: &::geo::Polygon<f64>) -> Polygon {
    if polygon.exterior().0.is_empty() {
        return Polygon::new(false, false);
    }
    let rings = std::iter::once(polygon.exterior())
        .chain(polygon.interiors())
        .map(line_from_geo)
        .collect();
    Polygon::from_rings(rings)
}

impl From<&::geo::Geometry<f64>> for Geometry {
    fn from(geometry: &::geo::Geometry<f64>) -> Self {
        match geometry {
            ::geo::Geometry::Point(p) => Point::new(p.x(), p.y()).into(),
            ::geo::Geometry::Line(line) => {
                LineString::from_points(vec![point_from_coord(line.start), point_from_coord(line.end)])
                    .into()
            }
            ::geo::Geometry::LineString(line) => line_from_geo(line).into(),
            ::geo::Geometry::Polygon(polygon) => polygon_from_geo(polygon).into(),
            ::geo::Geometry::MultiPoint(multi) => {
                MultiPoint::from_points(multi.0.iter().map(|p| Point::new(p.x(), p.y())).collect())
                    .into()
            }
            ::geo::Geometry::MultiLineString(multi) => MultiLineString {
                has_z: false,
                has_m: false,
                line_strings: multi.0.iter().map(line_from_geo).collect(),
            }
            .into(),
            ::geo::Geometry::MultiPolygon(multi) => MultiPolygon {
                has_z: false,
                has_m: false,
                polygons: multi
                    .0
                    .iter()
                    .map(|polygon| polygon_from_geo(polygon).into())
                    .collect(),
            }
            .into(),
            ::geo::Geometry::GeometryCollection(collection) => GeometryCollection {
                has_z: false,
                has_m: false,
                geometries: collection.0.iter().map(Geometry::from).collect(),
            }
            .into(),
            ::geo::Geometry::Rect(rect) => polygon_from_geo(&rect.to_polygon()).into(),
            ::geo::Geometry::Triangle(triangle) => {
                let ring = [triangle.0, triangle.1, triangle.2, triangle.0]
                    .into_iter()
                    .map(point_from_coord)
                    .collect();
                Triangle::from_ring(LineString::from_points(ring)).into()
            }
        }
    }
}

fn coord_from_point(point: &Point) -> ::geo::Coord<f64> {
    ::geo::Coord {
        x: point.x,
        y: point.y,
    }
}

fn line_to_geo(line: &LineString) -> ::geo::LineString<f64> {
    ::geo::LineString::new(line.points.iter().map(coord_from_point).collect())
}

fn polygon_to_geo(polygon: &Polygon) -> ::geo::Polygon<f64> {
    match polygon.rings.split_first() {
        Some((exterior, interiors)) => {
            ::geo::Polygon::new(line_to_geo(exterior), interiors.iter().map(line_to_geo).collect())
        }
        None => ::geo::Polygon::new(::geo::LineString::new(Vec::new()), Vec::new()),
    }
}

impl TryFrom<&Geometry> for ::geo::Geometry<f64> {
    type Error = GeometryError;

    fn try_from(geometry: &Geometry) -> Result<Self, Self::Error> {
        let converted = match geometry {
            Geometry::Point(p) => ::geo::Geometry::Point(::geo::Point::new(p.x, p.y)),
            Geometry::LineString(line) => ::geo::Geometry::LineString(line_to_geo(line)),
            Geometry::Polygon(polygon) => ::geo::Geometry::Polygon(polygon_to_geo(polygon)),
            Geometry::Triangle(triangle) => {
                let ring = triangle
                    .exterior_ring()
                    .filter(|ring| ring.num_points() >= 3)
                    .ok_or_else(|| {
                        GeometryError::Conversion("triangle needs at least 3 points".to_string())
                    })?;
                ::geo::Geometry::Triangle(::geo::Triangle(
                    coord_from_point(&ring.points[0]),
                    coord_from_point(&ring.points[1]),
                    coord_from_point(&ring.points[2]),
                ))
            }
            Geometry::MultiPoint(multi) => ::geo::Geometry::MultiPoint(::geo::MultiPoint::new(
                multi
                    .points
                    .iter()
                    .map(|p| ::geo::Point::new(p.x, p.y))
                    .collect(),
            )),
            Geometry::MultiLineString(multi) => ::geo::Geometry::MultiLineString(
                ::geo::MultiLineString::new(multi.line_strings.iter().map(line_to_geo).collect()),
            ),
            Geometry::MultiPolygon(multi) => ::geo::Geometry::MultiPolygon(
                ::geo::MultiPolygon::new(
                    multi
                        .polygons
                        .iter()
                        .map(|surface| polygon_to_geo(surface.as_polygon()))
                        .collect(),
                ),
            ),
            Geometry::GeometryCollection(collection) => {
                let geometries = collection
                    .geometries
                    .iter()
                    .map(::geo::Geometry::try_from)
                    .collect::<Result<Vec<_>, _>>()?;
                ::geo::Geometry::GeometryCollection(::geo::GeometryCollection(geometries))
            }
            other => return Err(GeometryError::Unsupported(other.geometry_type())),
        };
        Ok(converted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CircularString, GeometryType};

    #[test]
    fn test_polygon_from_geo() {
        let polygon = ::geo::Polygon::new(
            ::geo::LineString::from(vec![(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 0.0)]),
            vec![::geo::LineString::from(vec![
                (1.0, 1.0),
                (2.0, 1.0),
                (2.0, 2.0),
                (1.0, 1.0),
            ])],
        );

        let geometry = Geometry::from(&::geo::Geometry::Polygon(polygon));
        match geometry {
            Geometry::Polygon(p) => {
                assert_eq!(p.num_rings(), 2);
                assert_eq!(p.exterior_ring().unwrap().num_points(), 4);
                assert!(!p.has_z);
            }
            other => panic!("Expected Polygon, got {:?}", other.geometry_type()),
        }
    }

    #[test]
    fn test_rect_and_triangle_from_geo() {
        let rect = ::geo::Rect::new(::geo::coord! { x: 0.0, y: 0.0 }, ::geo::coord! { x: 2.0, y: 1.0 });
        let geometry = Geometry::from(&::geo::Geometry::Rect(rect));
        assert_eq!(geometry.geometry_type(), GeometryType::Polygon);
        assert_eq!(geometry.num_points(), 5);

        let triangle = ::geo::Triangle(
            ::geo::coord! { x: 0.0, y: 0.0 },
            ::geo::coord! { x: 1.0, y: 0.0 },
            ::geo::coord! { x: 0.0, y: 1.0 },
        );
        let geometry = Geometry::from(&::geo::Geometry::Triangle(triangle));
        assert_eq!(geometry.geometry_type(), GeometryType::Triangle);
        assert_eq!(geometry.num_points(), 4);
    }

    #[test]
    fn test_to_geo_roundtrip_collection() {
        let mut collection = GeometryCollection::new(false, false);
        collection.add_geometry(Point::new(1.0, 2.0));
        collection.add_geometry(LineString::from_points(vec![
            Point::new(0.0, 0.0),
            Point::new(3.0, 4.0),
        ]));
        let geometry = Geometry::from(collection);

        let converted = ::geo::Geometry::try_from(&geometry).unwrap();
        let back = Geometry::from(&converted);
        assert_eq!(back, geometry);
    }

    #[test]
    fn test_curves_rejected() {
        let arc = Geometry::from(CircularString::from_points(vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(2.0, 0.0),
        ]));
        let result = ::geo::Geometry::try_from(&arc);
        assert!(matches!(
            result,
            Err(GeometryError::Unsupported(GeometryType::CircularString))
        ));
    }
}
