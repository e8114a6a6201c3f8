//! Parcours récursif des variantes de géométrie
//!
//! Chaque variante est reconstruite à l'identique (type, ordre des enfants,
//! drapeaux z/m) à partir de ses enfants transformés. Un échec sur un enfant
//! fait échouer toute la géométrie, aucun résultat partiel n'est produit.

use simple_features::{
    CircularString, CompoundCurve, Curve, CurvePolygon, CurveSegment, Geometry,
    GeometryCollection, LineString, MultiLineString, MultiPoint, MultiPolygon, Polygon,
    PolyhedralSurface, Surface, Tin, Triangle,
};
use tracing::trace;

use super::GeometryTransformer;
use crate::error::{Result, TransformError};
use crate::mapper::CoordinateMapper;

impl<M: CoordinateMapper> GeometryTransformer<M> {
    /// Projette une géométrie quelconque
    ///
    /// MultiCurve et MultiSurface ne sont pas transformables.
    pub fn transform_geometry(&self, geometry: &Geometry) -> Result<Geometry> {
        self.transform_at_depth(geometry, 0)
    }

    fn transform_at_depth(&self, geometry: &Geometry, depth: usize) -> Result<Geometry> {
        if depth > self.max_depth {
            return Err(TransformError::DepthLimitExceeded {
                limit: self.max_depth,
            });
        }
        trace!(geometry_type = %geometry.geometry_type(), depth, "Transforming geometry");

        let transformed = match geometry {
            Geometry::Point(p) => Geometry::Point(self.transform_point(p)?),
            Geometry::LineString(line) => Geometry::LineString(self.transform_line_string(line)?),
            Geometry::CircularString(arc) => {
                Geometry::CircularString(self.transform_circular_string(arc)?)
            }
            Geometry::Polygon(polygon) => Geometry::Polygon(self.transform_polygon(polygon)?),
            Geometry::Triangle(triangle) => Geometry::Triangle(self.transform_triangle(triangle)?),
            Geometry::MultiPoint(multi) => Geometry::MultiPoint(self.transform_multi_point(multi)?),
            Geometry::MultiLineString(multi) => {
                Geometry::MultiLineString(self.transform_multi_line_string(multi)?)
            }
            Geometry::MultiPolygon(multi) => {
                Geometry::MultiPolygon(self.transform_multi_polygon(multi)?)
            }
            Geometry::CompoundCurve(curve) => {
                Geometry::CompoundCurve(self.transform_compound_curve(curve)?)
            }
            Geometry::CurvePolygon(polygon) => {
                Geometry::CurvePolygon(self.transform_curve_polygon(polygon)?)
            }
            Geometry::PolyhedralSurface(surface) => {
                Geometry::PolyhedralSurface(self.transform_polyhedral_surface(surface)?)
            }
            Geometry::Tin(tin) => Geometry::Tin(self.transform_tin(tin)?),
            Geometry::GeometryCollection(collection) => {
                Geometry::GeometryCollection(self.transform_collection_at_depth(collection, depth)?)
            }
            other => return Err(TransformError::UnsupportedGeometry(other.geometry_type())),
        };
        Ok(transformed)
    }

    pub fn transform_line_string(&self, line: &LineString) -> Result<LineString> {
        Ok(LineString {
            has_z: line.has_z,
            has_m: line.has_m,
            points: self.transform_points(&line.points)?,
        })
    }

    /// Les points de contrôle des arcs sont projetés comme des sommets
    pub fn transform_circular_string(&self, arc: &CircularString) -> Result<CircularString> {
        self.transform_line_string(arc).map(CircularString)
    }

    pub fn transform_polygon(&self, polygon: &Polygon) -> Result<Polygon> {
        let rings = polygon
            .rings
            .iter()
            .map(|ring| self.transform_line_string(ring))
            .collect::<Result<Vec<_>>>()?;
        Ok(Polygon {
            has_z: polygon.has_z,
            has_m: polygon.has_m,
            rings,
        })
    }

    pub fn transform_triangle(&self, triangle: &Triangle) -> Result<Triangle> {
        self.transform_polygon(triangle).map(Triangle)
    }

    pub fn transform_multi_point(&self, multi: &MultiPoint) -> Result<MultiPoint> {
        Ok(MultiPoint {
            has_z: multi.has_z,
            has_m: multi.has_m,
            points: self.transform_points(&multi.points)?,
        })
    }

    pub fn transform_multi_line_string(&self, multi: &MultiLineString) -> Result<MultiLineString> {
        let line_strings = multi
            .line_strings
            .iter()
            .map(|line| self.transform_line_string(line))
            .collect::<Result<Vec<_>>>()?;
        Ok(MultiLineString {
            has_z: multi.has_z,
            has_m: multi.has_m,
            line_strings,
        })
    }

    /// Une face reste un Polygon ou un Triangle
    fn transform_surface(&self, surface: &Surface) -> Result<Surface> {
        Ok(match surface {
            Surface::Polygon(polygon) => Surface::Polygon(self.transform_polygon(polygon)?),
            Surface::Triangle(triangle) => Surface::Triangle(self.transform_triangle(triangle)?),
        })
    }

    pub fn transform_multi_polygon(&self, multi: &MultiPolygon) -> Result<MultiPolygon> {
        let polygons = multi
            .polygons
            .iter()
            .map(|surface| self.transform_surface(surface))
            .collect::<Result<Vec<_>>>()?;
        Ok(MultiPolygon {
            has_z: multi.has_z,
            has_m: multi.has_m,
            polygons,
        })
    }

    fn transform_curve_segment(&self, segment: &CurveSegment) -> Result<CurveSegment> {
        Ok(match segment {
            CurveSegment::LineString(line) => {
                CurveSegment::LineString(self.transform_line_string(line)?)
            }
            CurveSegment::CircularString(arc) => {
                CurveSegment::CircularString(self.transform_circular_string(arc)?)
            }
        })
    }

    /// Chaque segment garde sa nature (droit ou circulaire)
    pub fn transform_compound_curve(&self, curve: &CompoundCurve) -> Result<CompoundCurve> {
        let segments = curve
            .segments
            .iter()
            .map(|segment| self.transform_curve_segment(segment))
            .collect::<Result<Vec<_>>>()?;
        Ok(CompoundCurve {
            has_z: curve.has_z,
            has_m: curve.has_m,
            segments,
        })
    }

    fn transform_curve(&self, curve: &Curve) -> Result<Curve> {
        Ok(match curve {
            Curve::LineString(line) => Curve::LineString(self.transform_line_string(line)?),
            Curve::CircularString(arc) => {
                Curve::CircularString(self.transform_circular_string(arc)?)
            }
            Curve::CompoundCurve(compound) => {
                Curve::CompoundCurve(self.transform_compound_curve(compound)?)
            }
        })
    }

    /// Les rings peuvent mêler LineString, CircularString et CompoundCurve
    pub fn transform_curve_polygon(&self, polygon: &CurvePolygon) -> Result<CurvePolygon> {
        let rings = polygon
            .rings
            .iter()
            .map(|ring| self.transform_curve(ring))
            .collect::<Result<Vec<_>>>()?;
        Ok(CurvePolygon {
            has_z: polygon.has_z,
            has_m: polygon.has_m,
            rings,
        })
    }

    pub fn transform_polyhedral_surface(
        &self,
        surface: &PolyhedralSurface,
    ) -> Result<PolyhedralSurface> {
        let polygons = surface
            .polygons
            .iter()
            .map(|patch| self.transform_surface(patch))
            .collect::<Result<Vec<_>>>()?;
        Ok(PolyhedralSurface {
            has_z: surface.has_z,
            has_m: surface.has_m,
            polygons,
        })
    }

    pub fn transform_tin(&self, tin: &Tin) -> Result<Tin> {
        self.transform_polyhedral_surface(tin).map(Tin)
    }

    /// Projette une collection, membres imbriqués compris
    pub fn transform_geometry_collection(
        &self,
        collection: &GeometryCollection,
    ) -> Result<GeometryCollection> {
        self.transform_collection_at_depth(collection, 0)
    }

    fn transform_collection_at_depth(
        &self,
        collection: &GeometryCollection,
        depth: usize,
    ) -> Result<GeometryCollection> {
        let geometries = collection
            .geometries
            .iter()
            .map(|member| self.transform_at_depth(member, depth + 1))
            .collect::<Result<Vec<_>>>()?;
        Ok(GeometryCollection {
            has_z: collection.has_z,
            has_m: collection.has_m,
            geometries,
        })
    }
}
