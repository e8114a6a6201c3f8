//! Types de géométries Simple Features
//!
//! Chaque nœud porte ses propres indicateurs `has_z` / `has_m`. Les sous-types
//! (CircularString, Triangle, TIN) sont des newtypes autour de leur type
//! général : le code générique reste réutilisable, le type précis est conservé.

use std::fmt;
use std::ops::{Deref, DerefMut};

use crate::BoundingBox;

/// Type de géométrie (tag de dispatch)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GeometryType {
    Point,
    LineString,
    CircularString,
    Polygon,
    Triangle,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    CompoundCurve,
    CurvePolygon,
    PolyhedralSurface,
    Tin,
    GeometryCollection,
    MultiCurve,
    MultiSurface,
}

impl GeometryType {
    /// Mot-clé WKT du type
    pub fn name(self) -> &'static str {
        match self {
            Self::Point => "POINT",
            Self::LineString => "LINESTRING",
            Self::CircularString => "CIRCULARSTRING",
            Self::Polygon => "POLYGON",
            Self::Triangle => "TRIANGLE",
            Self::MultiPoint => "MULTIPOINT",
            Self::MultiLineString => "MULTILINESTRING",
            Self::MultiPolygon => "MULTIPOLYGON",
            Self::CompoundCurve => "COMPOUNDCURVE",
            Self::CurvePolygon => "CURVEPOLYGON",
            Self::PolyhedralSurface => "POLYHEDRALSURFACE",
            Self::Tin => "TIN",
            Self::GeometryCollection => "GEOMETRYCOLLECTION",
            Self::MultiCurve => "MULTICURVE",
            Self::MultiSurface => "MULTISURFACE",
        }
    }
}

impl fmt::Display for GeometryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Point (x, y) avec z et m optionnels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub has_z: bool,
    pub has_m: bool,
    pub x: f64,
    pub y: f64,
    /// Élévation, significative uniquement si `has_z`
    pub z: Option<f64>,
    /// Mesure, significative uniquement si `has_m`
    pub m: Option<f64>,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self::with_flags(false, false, x, y)
    }

    pub fn new_z(x: f64, y: f64, z: f64) -> Self {
        Self {
            z: Some(z),
            ..Self::with_flags(true, false, x, y)
        }
    }

    pub fn new_m(x: f64, y: f64, m: f64) -> Self {
        Self {
            m: Some(m),
            ..Self::with_flags(false, true, x, y)
        }
    }

    pub fn new_zm(x: f64, y: f64, z: f64, m: f64) -> Self {
        Self {
            z: Some(z),
            m: Some(m),
            ..Self::with_flags(true, true, x, y)
        }
    }

    /// Crée un point avec des indicateurs explicites, sans valeur z/m
    pub fn with_flags(has_z: bool, has_m: bool, x: f64, y: f64) -> Self {
        Self {
            has_z,
            has_m,
            x,
            y,
            z: None,
            m: None,
        }
    }
}

/// LineString : suite ordonnée de points
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LineString {
    pub has_z: bool,
    pub has_m: bool,
    pub points: Vec<Point>,
}

impl LineString {
    pub fn new(has_z: bool, has_m: bool) -> Self {
        Self {
            has_z,
            has_m,
            points: Vec::new(),
        }
    }

    /// Construit depuis des points, les indicateurs sont ceux du premier point
    pub fn from_points(points: Vec<Point>) -> Self {
        let (has_z, has_m) = points.first().map_or((false, false), |p| (p.has_z, p.has_m));
        Self {
            has_z,
            has_m,
            points,
        }
    }

    pub fn add_point(&mut self, point: Point) {
        self.points.push(point);
    }

    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    pub fn point(&self, index: usize) -> Option<&Point> {
        self.points.get(index)
    }

    /// Vrai si le premier et le dernier point ont les mêmes x/y
    pub fn is_closed(&self) -> bool {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => first.x == last.x && first.y == last.y,
            _ => false,
        }
    }
}

/// CircularString : même représentation qu'une LineString, interprétée en arcs
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CircularString(pub LineString);

impl CircularString {
    pub fn new(has_z: bool, has_m: bool) -> Self {
        Self(LineString::new(has_z, has_m))
    }

    pub fn from_points(points: Vec<Point>) -> Self {
        Self(LineString::from_points(points))
    }

    pub fn into_inner(self) -> LineString {
        self.0
    }
}

impl Deref for CircularString {
    type Target = LineString;

    fn deref(&self) -> &LineString {
        &self.0
    }
}

impl DerefMut for CircularString {
    fn deref_mut(&mut self) -> &mut LineString {
        &mut self.0
    }
}

impl From<LineString> for CircularString {
    fn from(line: LineString) -> Self {
        Self(line)
    }
}

/// Polygon : le premier ring est l'extérieur
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Polygon {
    pub has_z: bool,
    pub has_m: bool,
    pub rings: Vec<LineString>,
}

impl Polygon {
    pub fn new(has_z: bool, has_m: bool) -> Self {
        Self {
            has_z,
            has_m,
            rings: Vec::new(),
        }
    }

    pub fn from_rings(rings: Vec<LineString>) -> Self {
        let (has_z, has_m) = rings.first().map_or((false, false), |r| (r.has_z, r.has_m));
        Self {
            has_z,
            has_m,
            rings,
        }
    }

    pub fn add_ring(&mut self, ring: LineString) {
        self.rings.push(ring);
    }

    pub fn num_rings(&self) -> usize {
        self.rings.len()
    }

    pub fn exterior_ring(&self) -> Option<&LineString> {
        self.rings.first()
    }

    pub fn interior_rings(&self) -> &[LineString] {
        self.rings.get(1..).unwrap_or(&[])
    }
}

/// Triangle : polygone à un seul ring (par convention)
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Triangle(pub Polygon);

impl Triangle {
    pub fn new(has_z: bool, has_m: bool) -> Self {
        Self(Polygon::new(has_z, has_m))
    }

    pub fn from_ring(ring: LineString) -> Self {
        Self(Polygon::from_rings(vec![ring]))
    }

    pub fn into_inner(self) -> Polygon {
        self.0
    }
}

impl Deref for Triangle {
    type Target = Polygon;

    fn deref(&self) -> &Polygon {
        &self.0
    }
}

impl DerefMut for Triangle {
    fn deref_mut(&mut self) -> &mut Polygon {
        &mut self.0
    }
}

impl From<Polygon> for Triangle {
    fn from(polygon: Polygon) -> Self {
        Self(polygon)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MultiPoint {
    pub has_z: bool,
    pub has_m: bool,
    pub points: Vec<Point>,
}

impl MultiPoint {
    pub fn new(has_z: bool, has_m: bool) -> Self {
        Self {
            has_z,
            has_m,
            points: Vec::new(),
        }
    }

    pub fn from_points(points: Vec<Point>) -> Self {
        let (has_z, has_m) = points.first().map_or((false, false), |p| (p.has_z, p.has_m));
        Self {
            has_z,
            has_m,
            points,
        }
    }

    pub fn add_point(&mut self, point: Point) {
        self.points.push(point);
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MultiLineString {
    pub has_z: bool,
    pub has_m: bool,
    pub line_strings: Vec<LineString>,
}

impl MultiLineString {
    pub fn new(has_z: bool, has_m: bool) -> Self {
        Self {
            has_z,
            has_m,
            line_strings: Vec::new(),
        }
    }

    pub fn add_line_string(&mut self, line: LineString) {
        self.line_strings.push(line);
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MultiPolygon {
    pub has_z: bool,
    pub has_m: bool,
    pub polygons: Vec<Surface>,
}

impl MultiPolygon {
    pub fn new(has_z: bool, has_m: bool) -> Self {
        Self {
            has_z,
            has_m,
            polygons: Vec::new(),
        }
    }

    pub fn add_polygon(&mut self, polygon: impl Into<Surface>) {
        self.polygons.push(polygon.into());
    }
}

/// Patch d'une surface polyédrique ou membre d'un MultiPolygon
#[derive(Debug, Clone, PartialEq)]
pub enum Surface {
    Polygon(Polygon),
    Triangle(Triangle),
}

impl Surface {
    pub fn geometry_type(&self) -> GeometryType {
        match self {
            Self::Polygon(_) => GeometryType::Polygon,
            Self::Triangle(_) => GeometryType::Triangle,
        }
    }

    /// Vue générale du patch
    pub fn as_polygon(&self) -> &Polygon {
        match self {
            Self::Polygon(polygon) => polygon,
            Self::Triangle(triangle) => &triangle.0,
        }
    }
}

impl From<Polygon> for Surface {
    fn from(polygon: Polygon) -> Self {
        Self::Polygon(polygon)
    }
}

impl From<Triangle> for Surface {
    fn from(triangle: Triangle) -> Self {
        Self::Triangle(triangle)
    }
}

/// Segment d'une CompoundCurve
#[derive(Debug, Clone, PartialEq)]
pub enum CurveSegment {
    LineString(LineString),
    CircularString(CircularString),
}

impl CurveSegment {
    pub fn geometry_type(&self) -> GeometryType {
        match self {
            Self::LineString(_) => GeometryType::LineString,
            Self::CircularString(_) => GeometryType::CircularString,
        }
    }

    /// Vue générale du segment
    pub fn as_line_string(&self) -> &LineString {
        match self {
            Self::LineString(line) => line,
            Self::CircularString(arc) => arc,
        }
    }
}

impl From<LineString> for CurveSegment {
    fn from(line: LineString) -> Self {
        Self::LineString(line)
    }
}

impl From<CircularString> for CurveSegment {
    fn from(arc: CircularString) -> Self {
        Self::CircularString(arc)
    }
}

/// CompoundCurve : segments contigus, droits ou circulaires
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompoundCurve {
    pub has_z: bool,
    pub has_m: bool,
    pub segments: Vec<CurveSegment>,
}

impl CompoundCurve {
    pub fn new(has_z: bool, has_m: bool) -> Self {
        Self {
            has_z,
            has_m,
            segments: Vec::new(),
        }
    }

    pub fn add_segment(&mut self, segment: impl Into<CurveSegment>) {
        self.segments.push(segment.into());
    }
}

/// Courbe pouvant servir de ring à un CurvePolygon ou de membre à une MultiCurve
#[derive(Debug, Clone, PartialEq)]
pub enum Curve {
    LineString(LineString),
    CircularString(CircularString),
    CompoundCurve(CompoundCurve),
}

impl Curve {
    pub fn geometry_type(&self) -> GeometryType {
        match self {
            Self::LineString(_) => GeometryType::LineString,
            Self::CircularString(_) => GeometryType::CircularString,
            Self::CompoundCurve(_) => GeometryType::CompoundCurve,
        }
    }
}

impl From<LineString> for Curve {
    fn from(line: LineString) -> Self {
        Self::LineString(line)
    }
}

impl From<CircularString> for Curve {
    fn from(arc: CircularString) -> Self {
        Self::CircularString(arc)
    }
}

impl From<CompoundCurve> for Curve {
    fn from(curve: CompoundCurve) -> Self {
        Self::CompoundCurve(curve)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct CurvePolygon {
    pub has_z: bool,
    pub has_m: bool,
    pub rings: Vec<Curve>,
}

impl CurvePolygon {
    pub fn new(has_z: bool, has_m: bool) -> Self {
        Self {
            has_z,
            has_m,
            rings: Vec::new(),
        }
    }

    pub fn add_ring(&mut self, ring: impl Into<Curve>) {
        self.rings.push(ring.into());
    }
}

/// PolyhedralSurface : patches polygonaux partageant des arêtes
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PolyhedralSurface {
    pub has_z: bool,
    pub has_m: bool,
    pub polygons: Vec<Surface>,
}

impl PolyhedralSurface {
    pub fn new(has_z: bool, has_m: bool) -> Self {
        Self {
            has_z,
            has_m,
            polygons: Vec::new(),
        }
    }

    pub fn add_polygon(&mut self, polygon: impl Into<Surface>) {
        self.polygons.push(polygon.into());
    }

    pub fn num_polygons(&self) -> usize {
        self.polygons.len()
    }
}

/// TIN : surface polyédrique dont les patches sont des triangles
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Tin(pub PolyhedralSurface);

impl Tin {
    pub fn new(has_z: bool, has_m: bool) -> Self {
        Self(PolyhedralSurface::new(has_z, has_m))
    }

    pub fn into_inner(self) -> PolyhedralSurface {
        self.0
    }
}

impl Deref for Tin {
    type Target = PolyhedralSurface;

    fn deref(&self) -> &PolyhedralSurface {
        &self.0
    }
}

impl DerefMut for Tin {
    fn deref_mut(&mut self) -> &mut PolyhedralSurface {
        &mut self.0
    }
}

impl From<PolyhedralSurface> for Tin {
    fn from(surface: PolyhedralSurface) -> Self {
        Self(surface)
    }
}

/// Collection hétérogène, éventuellement imbriquée
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GeometryCollection {
    pub has_z: bool,
    pub has_m: bool,
    pub geometries: Vec<Geometry>,
}

impl GeometryCollection {
    pub fn new(has_z: bool, has_m: bool) -> Self {
        Self {
            has_z,
            has_m,
            geometries: Vec::new(),
        }
    }

    pub fn add_geometry(&mut self, geometry: impl Into<Geometry>) {
        self.geometries.push(geometry.into());
    }

    pub fn num_geometries(&self) -> usize {
        self.geometries.len()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MultiCurve {
    pub has_z: bool,
    pub has_m: bool,
    pub curves: Vec<Curve>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MultiSurface {
    pub has_z: bool,
    pub has_m: bool,
    pub surfaces: Vec<Geometry>,
}

/// Géométrie Simple Features
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Geometry {
    Point(Point),
    LineString(LineString),
    CircularString(CircularString),
    Polygon(Polygon),
    Triangle(Triangle),
    MultiPoint(MultiPoint),
    MultiLineString(MultiLineString),
    MultiPolygon(MultiPolygon),
    CompoundCurve(CompoundCurve),
    CurvePolygon(CurvePolygon),
    PolyhedralSurface(PolyhedralSurface),
    Tin(Tin),
    GeometryCollection(GeometryCollection),
    MultiCurve(MultiCurve),
    MultiSurface(MultiSurface),
}

impl Geometry {
    /// Type le plus précis de la géométrie
    pub fn geometry_type(&self) -> GeometryType {
        match self {
            Self::Point(_) => GeometryType::Point,
            Self::LineString(_) => GeometryType::LineString,
            Self::CircularString(_) => GeometryType::CircularString,
            Self::Polygon(_) => GeometryType::Polygon,
            Self::Triangle(_) => GeometryType::Triangle,
            Self::MultiPoint(_) => GeometryType::MultiPoint,
            Self::MultiLineString(_) => GeometryType::MultiLineString,
            Self::MultiPolygon(_) => GeometryType::MultiPolygon,
            Self::CompoundCurve(_) => GeometryType::CompoundCurve,
            Self::CurvePolygon(_) => GeometryType::CurvePolygon,
            Self::PolyhedralSurface(_) => GeometryType::PolyhedralSurface,
            Self::Tin(_) => GeometryType::Tin,
            Self::GeometryCollection(_) => GeometryType::GeometryCollection,
            Self::MultiCurve(_) => GeometryType::MultiCurve,
            Self::MultiSurface(_) => GeometryType::MultiSurface,
        }
    }

    pub fn has_z(&self) -> bool {
        self.flags().0
    }

    pub fn has_m(&self) -> bool {
        self.flags().1
    }

    fn flags(&self) -> (bool, bool) {
        match self {
            Self::Point(g) => (g.has_z, g.has_m),
            Self::LineString(g) => (g.has_z, g.has_m),
            Self::CircularString(g) => (g.has_z, g.has_m),
            Self::Polygon(g) => (g.has_z, g.has_m),
            Self::Triangle(g) => (g.has_z, g.has_m),
            Self::MultiPoint(g) => (g.has_z, g.has_m),
            Self::MultiLineString(g) => (g.has_z, g.has_m),
            Self::MultiPolygon(g) => (g.has_z, g.has_m),
            Self::CompoundCurve(g) => (g.has_z, g.has_m),
            Self::CurvePolygon(g) => (g.has_z, g.has_m),
            Self::PolyhedralSurface(g) => (g.has_z, g.has_m),
            Self::Tin(g) => (g.has_z, g.has_m),
            Self::GeometryCollection(g) => (g.has_z, g.has_m),
            Self::MultiCurve(g) => (g.has_z, g.has_m),
            Self::MultiSurface(g) => (g.has_z, g.has_m),
        }
    }

    /// Nombre total de points, toutes profondeurs confondues
    pub fn num_points(&self) -> usize {
        let mut count = 0;
        self.for_each_point(&mut |_| count += 1);
        count
    }

    pub fn is_empty(&self) -> bool {
        self.num_points() == 0
    }

    /// Emprise x/y de la géométrie (None si vide)
    pub fn envelope(&self) -> Option<BoundingBox> {
        let mut envelope: Option<BoundingBox> = None;
        self.for_each_point(&mut |p| {
            envelope
                .get_or_insert(BoundingBox::new(p.x, p.y, p.x, p.y))
                .expand_to_include(p.x, p.y);
        });
        envelope
    }

    /// Parcourt tous les points dans l'ordre de la structure
    pub fn for_each_point<F: FnMut(&Point)>(&self, f: &mut F) {
        match self {
            Self::Point(p) => f(p),
            Self::LineString(line) => visit_points(&line.points, f),
            Self::CircularString(arc) => visit_points(&arc.points, f),
            Self::Polygon(polygon) => visit_rings(&polygon.rings, f),
            Self::Triangle(triangle) => visit_rings(&triangle.rings, f),
            Self::MultiPoint(multi) => visit_points(&multi.points, f),
            Self::MultiLineString(multi) => visit_rings(&multi.line_strings, f),
            Self::MultiPolygon(multi) => visit_polygons(&multi.polygons, f),
            Self::CompoundCurve(curve) => visit_segments(&curve.segments, f),
            Self::CurvePolygon(polygon) => {
                for ring in &polygon.rings {
                    visit_curve(ring, f);
                }
            }
            Self::PolyhedralSurface(surface) => visit_polygons(&surface.polygons, f),
            Self::Tin(tin) => visit_polygons(&tin.polygons, f),
            Self::GeometryCollection(collection) => {
                for geometry in &collection.geometries {
                    geometry.for_each_point(f);
                }
            }
            Self::MultiCurve(multi) => {
                for curve in &multi.curves {
                    visit_curve(curve, f);
                }
            }
            Self::MultiSurface(multi) => {
                for geometry in &multi.surfaces {
                    geometry.for_each_point(f);
                }
            }
        }
    }
}

fn visit_points<F: FnMut(&Point)>(points: &[Point], f: &mut F) {
    for point in points {
        f(point);
    }
}

fn visit_rings<F: FnMut(&Point)>(rings: &[LineString], f: &mut F) {
    for ring in rings {
        visit_points(&ring.points, f);
    }
}

fn visit_polygons<F: FnMut(&Point)>(polygons: &[Surface], f: &mut F) {
    for polygon in polygons {
        visit_rings(&polygon.as_polygon().rings, f);
    }
}

fn visit_segments<F: FnMut(&Point)>(segments: &[CurveSegment], f: &mut F) {
    for segment in segments {
        visit_points(&segment.as_line_string().points, f);
    }
}

fn visit_curve<F: FnMut(&Point)>(curve: &Curve, f: &mut F) {
    match curve {
        Curve::LineString(line) => visit_points(&line.points, f),
        Curve::CircularString(arc) => visit_points(&arc.points, f),
        Curve::CompoundCurve(compound) => visit_segments(&compound.segments, f),
    }
}

macro_rules! impl_from_node {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for Geometry {
                fn from(value: $variant) -> Self {
                    Geometry::$variant(value)
                }
            }
        )*
    };
}

impl_from_node!(
    Point,
    LineString,
    CircularString,
    Polygon,
    Triangle,
    MultiPoint,
    MultiLineString,
    MultiPolygon,
    CompoundCurve,
    CurvePolygon,
    PolyhedralSurface,
    Tin,
    GeometryCollection,
    MultiCurve,
    MultiSurface,
);

impl From<Surface> for Geometry {
    fn from(surface: Surface) -> Self {
        match surface {
            Surface::Polygon(polygon) => Geometry::Polygon(polygon),
            Surface::Triangle(triangle) => Geometry::Triangle(triangle),
        }
    }
}

impl From<Curve> for Geometry {
    fn from(curve: Curve) -> Self {
        match curve {
            Curve::LineString(line) => Geometry::LineString(line),
            Curve::CircularString(arc) => Geometry::CircularString(arc),
            Curve::CompoundCurve(compound) => Geometry::CompoundCurve(compound),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> LineString {
        LineString::from_points(vec![
            Point::new(0.0, 0.0),
            Point::new(10.0, 0.0),
            Point::new(10.0, 10.0),
            Point::new(0.0, 10.0),
            Point::new(0.0, 0.0),
        ])
    }

    #[test]
    fn test_point_constructors() {
        let p = Point::new_zm(1.0, 2.0, 3.0, 4.0);
        assert!(p.has_z && p.has_m);
        assert_eq!(p.z, Some(3.0));
        assert_eq!(p.m, Some(4.0));

        let p = Point::with_flags(true, false, 1.0, 2.0);
        assert!(p.has_z);
        assert_eq!(p.z, None);
    }

    #[test]
    fn test_flags_from_first_point() {
        let line = LineString::from_points(vec![Point::new_z(0.0, 0.0, 5.0), Point::new(1.0, 1.0)]);
        assert!(line.has_z);
        assert!(!line.has_m);
        assert!(!LineString::from_points(vec![]).has_z);
    }

    #[test]
    fn test_subtype_keeps_tag() {
        let arc = CircularString::from_points(vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(2.0, 0.0),
        ]);
        assert_eq!(arc.num_points(), 3);
        let geometry = Geometry::from(arc);
        assert_eq!(geometry.geometry_type(), GeometryType::CircularString);

        let triangle = Triangle::from_ring(square());
        assert_eq!(triangle.num_rings(), 1);
        assert_eq!(
            Geometry::from(triangle).geometry_type(),
            GeometryType::Triangle
        );
    }

    #[test]
    fn test_polygon_rings() {
        let mut polygon = Polygon::new(false, false);
        assert!(polygon.exterior_ring().is_none());
        assert!(polygon.interior_rings().is_empty());

        polygon.add_ring(square());
        polygon.add_ring(square());
        assert_eq!(polygon.exterior_ring().unwrap().num_points(), 5);
        assert_eq!(polygon.interior_rings().len(), 1);
        assert!(polygon.exterior_ring().unwrap().is_closed());
    }

    #[test]
    fn test_num_points_nested() {
        let mut compound = CompoundCurve::new(false, false);
        compound.add_segment(square());
        compound.add_segment(CircularString::from_points(vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 1.0),
            Point::new(2.0, 0.0),
        ]));

        let mut inner = GeometryCollection::new(false, false);
        inner.add_geometry(compound);

        let mut outer = GeometryCollection::new(false, false);
        outer.add_geometry(Point::new(5.0, 5.0));
        outer.add_geometry(inner);

        let geometry = Geometry::from(outer);
        assert_eq!(geometry.num_points(), 9);
        assert!(!geometry.is_empty());
    }

    #[test]
    fn test_envelope() {
        let mut multi = MultiPoint::new(false, false);
        multi.add_point(Point::new(-3.0, 4.0));
        multi.add_point(Point::new(7.0, -1.0));

        let bbox = Geometry::from(multi).envelope().unwrap();
        assert_eq!(bbox, BoundingBox::new(-3.0, -1.0, 7.0, 4.0));

        let empty = Geometry::from(GeometryCollection::new(false, false));
        assert!(empty.envelope().is_none());
        assert!(empty.is_empty());
    }

    #[test]
    fn test_geometry_type_names() {
        assert_eq!(GeometryType::Tin.to_string(), "TIN");
        assert_eq!(GeometryType::CircularString.to_string(), "CIRCULARSTRING");
        assert_eq!(GeometryType::GeometryCollection.name(), "GEOMETRYCOLLECTION");
    }

    #[test]
    fn test_surface_patches_keep_subtype() {
        let mut tin = Tin::new(false, false);
        tin.add_polygon(Triangle::from_ring(square()));
        tin.add_polygon(Polygon::from_rings(vec![square()]));

        assert_eq!(tin.num_polygons(), 2);
        assert_eq!(tin.polygons[0].geometry_type(), GeometryType::Triangle);
        assert_eq!(tin.polygons[1].geometry_type(), GeometryType::Polygon);
        assert_eq!(tin.polygons[0].as_polygon().num_rings(), 1);
        assert_eq!(Geometry::from(tin).num_points(), 10);
    }
}
