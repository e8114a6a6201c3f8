//! Interop avec `geojson`
//!
//! Une 3e ordonnée dans une position active `has_z`. Les surfaces
//! (Triangle, PolyhedralSurface, TIN) sont exportées en Polygon/MultiPolygon.

use geojson::{Position, Value};
use tracing::debug;

use crate::{
    Geometry, GeometryCollection, GeometryError, LineString, MultiLineString, MultiPoint,
    MultiPolygon, Point, Polygon, Surface,
};

fn check_position(position: &[f64]) -> Result<(), GeometryError> {
    if position.len() < 2 {
        return Err(GeometryError::invalid_position(format!(
            "expected at least 2 ordinates, got {}",
            position.len()
        )));
    }
    Ok(())
}

/// Dimension d'une valeur : celle de sa première position
fn value_has_z(value: &Value) -> bool {
    let first = match value {
        Value::Point(position) => Some(position),
        Value::MultiPoint(positions) | Value::LineString(positions) => positions.first(),
        Value::MultiLineString(lines) | Value::Polygon(lines) => lines.iter().flatten().next(),
        Value::MultiPolygon(polygons) => polygons.iter().flatten().flatten().next(),
        Value::GeometryCollection(members) => {
            return members.first().is_some_and(|m| value_has_z(&m.value))
        }
    };
    first.is_some_and(|p| p.len() > 2)
}

/// Point à la dimension du parent : z absent si la position est 2D
fn point_from_position(position: &[f64], has_z: bool) -> Result<Point, GeometryError> {
    check_position(position)?;
    if position.len() > 2 && !has_z {
        debug!("Mixed 2D/3D positions, dimension taken from the first position");
    }
    Ok(Point {
        z: position.get(2).copied().filter(|_| has_z),
        ..Point::with_flags(has_z, false, position[0], position[1])
    })
}

fn points_from_positions(positions: &[Position], has_z: bool) -> Result<Vec<Point>, GeometryError> {
    positions
        .iter()
        .map(|p| point_from_position(p, has_z))
        .collect()
}

fn line_from_positions(positions: &[Position], has_z: bool) -> Result<LineString, GeometryError> {
    Ok(LineString {
        has_z,
        has_m: false,
        points: points_from_positions(positions, has_z)?,
    })
}

fn polygon_from_positions(rings: &[Vec<Position>], has_z: bool) -> Result<Polygon, GeometryError> {
    let rings = rings
        .iter()
        .map(|ring| line_from_positions(ring, has_z))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Polygon {
        has_z,
        has_m: false,
        rings,
    })
}

/// Construit la géométrie avec une dimension imposée à tous les nœuds
fn geometry_from_value(value: &Value, has_z: bool) -> Result<Geometry, GeometryError> {
    let geometry = match value {
        Value::Point(position) => point_from_position(position, has_z)?.into(),
        Value::MultiPoint(positions) => MultiPoint {
            has_z,
            has_m: false,
            points: points_from_positions(positions, has_z)?,
        }
        .into(),
        Value::LineString(positions) => line_from_positions(positions, has_z)?.into(),
        Value::MultiLineString(lines) => MultiLineString {
            has_z,
            has_m: false,
            line_strings: lines
                .iter()
                .map(|line| line_from_positions(line, has_z))
                .collect::<Result<Vec<_>, _>>()?,
        }
        .into(),
        Value::Polygon(rings) => polygon_from_positions(rings, has_z)?.into(),
        Value::MultiPolygon(polygons) => MultiPolygon {
            has_z,
            has_m: false,
            polygons: polygons
                .iter()
                .map(|rings| polygon_from_positions(rings, has_z).map(Surface::from))
                .collect::<Result<Vec<_>, _>>()?,
        }
        .into(),
        Value::GeometryCollection(members) => GeometryCollection {
            has_z,
            has_m: false,
            geometries: members
                .iter()
                .map(|member| geometry_from_value(&member.value, has_z))
                .collect::<Result<Vec<_>, _>>()?,
        }
        .into(),
    };
    Ok(geometry)
}

impl TryFrom<&Value> for Geometry {
    type Error = GeometryError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        geometry_from_value(value, value_has_z(value))
    }
}

impl TryFrom<&geojson::Geometry> for Geometry {
    type Error = GeometryError;

    fn try_from(geometry: &geojson::Geometry) -> Result<Self, Self::Error> {
        Geometry::try_from(&geometry.value)
    }
}

fn position(point: &Point) -> Position {
    match (point.has_z, point.z) {
        (true, Some(z)) => vec![point.x, point.y, z],
        _ => vec![point.x, point.y],
    }
}

fn line_positions(line: &LineString) -> Vec<Position> {
    line.points.iter().map(position).collect()
}

fn polygon_positions(polygon: &Polygon) -> Vec<Vec<Position>> {
    polygon.rings.iter().map(line_positions).collect()
}

fn surfaces_positions(surfaces: &[Surface]) -> Vec<Vec<Vec<Position>>> {
    surfaces
        .iter()
        .map(|surface| polygon_positions(surface.as_polygon()))
        .collect()
}

impl TryFrom<&Geometry> for Value {
    type Error = GeometryError;

    fn try_from(geometry: &Geometry) -> Result<Self, Self::Error> {
        let value = match geometry {
            Geometry::Point(p) => Value::Point(position(p)),
            Geometry::LineString(line) => Value::LineString(line_positions(line)),
            Geometry::Polygon(polygon) => Value::Polygon(polygon_positions(polygon)),
            Geometry::Triangle(triangle) => Value::Polygon(polygon_positions(triangle)),
            Geometry::MultiPoint(multi) => {
                Value::MultiPoint(multi.points.iter().map(position).collect())
            }
            Geometry::MultiLineString(multi) => {
                Value::MultiLineString(multi.line_strings.iter().map(line_positions).collect())
            }
            Geometry::MultiPolygon(multi) => {
                Value::MultiPolygon(surfaces_positions(&multi.polygons))
            }
            Geometry::PolyhedralSurface(surface) => {
                Value::MultiPolygon(surfaces_positions(&surface.polygons))
            }
            Geometry::Tin(tin) => {
                Value::MultiPolygon(surfaces_positions(&tin.polygons))
            }
            Geometry::GeometryCollection(collection) => {
                let members = collection
                    .geometries
                    .iter()
                    .map(|g| Value::try_from(g).map(geojson::Geometry::new))
                    .collect::<Result<Vec<_>, _>>()?;
                Value::GeometryCollection(members)
            }
            other => return Err(GeometryError::Unsupported(other.geometry_type())),
        };
        Ok(value)
    }
}
