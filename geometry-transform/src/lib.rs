//! # geometry-transform
//!
//! Reprojection de géométries Simple Features entre systèmes de coordonnées.
//!
//! ## Features
//!
//! - Tous les types de géométries, courbes et surfaces comprises (TIN, CurvePolygon...)
//! - Conservation de la structure, des indicateurs z/m et des mesures
//! - Projections intégrées : WGS84, Web Mercator, Lambert-93, UTM
//! - Autres systèmes via PROJ (feature `proj`)
//! - Reprojection de fichiers GeoJSON en parallèle avec rapport
//!
//! ## Usage
//!
//! ```rust
//! use geometry_transform::GeometryTransformer;
//! use simple_features::Point;
//!
//! let transformer = GeometryTransformer::from_epsg(4326, 3857).unwrap();
//! let point = transformer.transform_point(&Point::new(2.3522, 48.8566)).unwrap();
//! assert!((point.x - 261_845.7).abs() < 1.0);
//! ```
//!
//! ## Usage CLI
//!
//! ```bash
//! geometry-transform reproject --path ./parcelles.geojson --output ./out.geojson --to EPSG:4326
//! geometry-transform reproject --path ./folder/ --output ./out/ --config lambert93-to-wgs84
//! geometry-transform bbox --from EPSG:4326 --to EPSG:3857 -- -180,-85,180,85
//! geometry-transform point 2.35 48.85 --from EPSG:4326 --to EPSG:2154
//! ```

pub mod config;
pub mod crs;
pub mod error;
pub mod export;
pub mod mapper;
pub mod report;
pub mod transform;

pub use config::Config;
pub use crs::{BuiltinRegistry, CoordinateSystem, CrsCode, CrsRegistry};
pub use error::TransformError;
pub use mapper::{Coordinate, CoordinateMapper, LiteMapper, SmartMapper};
pub use report::{TransformReport, TransformStatus};
pub use transform::{GeometryTransformer, DEFAULT_MAX_DEPTH};
