//! # simple-features
//!
//! Modèle de géométries OGC Simple Features avec courbes et surfaces.
//!
//! ## Features
//!
//! - Tous les types usuels (Point → MultiPolygon, GeometryCollection)
//! - Courbes : CircularString, CompoundCurve, CurvePolygon
//! - Surfaces : Triangle, PolyhedralSurface, TIN
//! - Indicateurs `has_z` / `has_m` portés par chaque nœud
//! - Conversions vers/depuis `geo` et `geojson`
//!
//! ## Usage
//!
//! ```rust
//! use simple_features::{Geometry, GeometryType, LineString, Point};
//!
//! let line = LineString::from_points(vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)]);
//! let geometry = Geometry::from(line);
//!
//! assert_eq!(geometry.geometry_type(), GeometryType::LineString);
//! assert_eq!(geometry.num_points(), 2);
//! ```

pub mod bbox;
pub mod convert;
pub mod error;
pub mod types;

pub use bbox::BoundingBox;
pub use error::GeometryError;
pub use types::{
    CircularString, CompoundCurve, Curve, CurvePolygon, CurveSegment, Geometry,
    GeometryCollection, GeometryType, LineString, MultiCurve, MultiLineString, MultiPoint,
    MultiPolygon, MultiSurface, Point, Polygon, PolyhedralSurface, Surface, Tin, Triangle,
};
