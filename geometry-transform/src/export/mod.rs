//! Export GeoJSON reprojeté

pub mod geojson;

pub use self::geojson::{
    declared_crs, read_feature_collection, reproject_feature_collection, reproject_file,
    reproject_geometry, write_feature_collection, ReprojectOptions,
};
