//! Mapper intelligent : mapper léger en priorité, fallback sur PROJ
//!
//! Utilise automatiquement la meilleure option disponible.

use crate::crs::{BuiltinRegistry, CoordinateSystem, CrsCode, CrsRegistry};
use crate::error::Result;
#[cfg(not(feature = "proj"))]
use crate::error::TransformError;
use crate::mapper::{Coordinate, CoordinateMapper, LiteMapper};

/// Mapper intelligent
///
/// Essaie d'abord [`LiteMapper`] (pure Rust), puis PROJ si le feature `proj`
/// est activé.
#[derive(Default)]
pub struct SmartMapper {
    lite: LiteMapper,
    #[cfg(feature = "proj")]
    proj: super::ProjMapper,
}

impl SmartMapper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Description du backend retenu pour un couple de systèmes
    pub fn description(source: &CoordinateSystem, destination: &CoordinateSystem) -> &'static str {
        if source == destination {
            "identity (no reprojection)"
        } else if LiteMapper::supports(source, destination) {
            "lite (pure Rust)"
        } else if cfg!(feature = "proj") {
            "proj (PROJ library)"
        } else {
            "unsupported"
        }
    }
}

impl CoordinateMapper for SmartMapper {
    fn map_coordinate(
        &self,
        source: &CoordinateSystem,
        destination: &CoordinateSystem,
        coordinate: Coordinate,
    ) -> Result<Coordinate> {
        if LiteMapper::supports(source, destination) {
            return self.lite.map_coordinate(source, destination, coordinate);
        }

        #[cfg(feature = "proj")]
        let mapped = self.proj.map_coordinate(source, destination, coordinate);

        #[cfg(not(feature = "proj"))]
        let mapped = Err(TransformError::unsupported_projection(source, destination));

        mapped
    }
}

impl CrsRegistry for SmartMapper {
    fn lookup(&self, authority: &str, code: &CrsCode) -> Option<CoordinateSystem> {
        let builtin = BuiltinRegistry.lookup(authority, code);

        #[cfg(feature = "proj")]
        let builtin = builtin.or_else(|| self.proj.lookup(authority, code));

        builtin
    }
}
