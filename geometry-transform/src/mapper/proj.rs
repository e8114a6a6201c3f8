//! Projection via PROJ
//!
//! Ce module est disponible uniquement avec le feature `proj`.

use std::collections::HashMap;
use std::sync::Mutex;

use ::proj::Proj;
use tracing::debug;

use crate::crs::{CoordinateSystem, CrsCode, CrsRegistry};
use crate::error::{Result, TransformError};
use crate::mapper::{Coordinate, CoordinateMapper};

/// Mapper adossé à la bibliothèque PROJ
///
/// Une transformation PROJ est créée à la première utilisation de chaque
/// couple (source, destination) puis conservée.
#[derive(Default)]
pub struct ProjMapper {
    cache: Mutex<HashMap<(String, String), Proj>>,
}

impl ProjMapper {
    pub fn new() -> Self {
        Self::default()
    }

    fn with_proj<T>(
        &self,
        source: &CoordinateSystem,
        destination: &CoordinateSystem,
        f: impl FnOnce(&Proj) -> Result<T>,
    ) -> Result<T> {
        let mut cache = self
            .cache
            .lock()
            .map_err(|_| TransformError::projection("PROJ cache lock poisoned"))?;

        let key = (source.to_string(), destination.to_string());
        if !cache.contains_key(&key) {
            let proj = Proj::new_known_crs(&key.0, &key.1, None).map_err(|e| {
                TransformError::ProjCreate(format!("{} → {}: {}", key.0, key.1, e))
            })?;
            debug!(source = %key.0, destination = %key.1, "PROJ transformation created");
            cache.insert(key.clone(), proj);
        }

        match cache.get(&key) {
            Some(proj) => f(proj),
            None => Err(TransformError::unsupported_projection(source, destination)),
        }
    }
}

impl CoordinateMapper for ProjMapper {
    fn map_coordinate(
        &self,
        source: &CoordinateSystem,
        destination: &CoordinateSystem,
        coordinate: Coordinate,
    ) -> Result<Coordinate> {
        if source == destination {
            return Ok(coordinate);
        }

        self.with_proj(source, destination, |proj| {
            let (x, y) = proj
                .convert((coordinate.x, coordinate.y))
                .map_err(|e| TransformError::projection(e.to_string()))?;
            Ok(Coordinate::new(x, y))
        })
    }
}

impl CrsRegistry for ProjMapper {
    fn lookup(&self, authority: &str, code: &CrsCode) -> Option<CoordinateSystem> {
        let system = CoordinateSystem::new(authority, code.clone());
        Proj::new(&system.to_string()).ok().map(|_| system)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wgs84_to_web_mercator() {
        let mapper = ProjMapper::new();
        let c = mapper
            .map_coordinate(
                &CoordinateSystem::epsg(4326),
                &CoordinateSystem::epsg(3857),
                Coordinate::new(2.35, 48.85),
            )
            .unwrap();
        assert!((c.x - 261600.0).abs() < 1000.0, "x={}", c.x);
    }

    #[test]
    fn test_lookup() {
        let mapper = ProjMapper::new();
        assert!(mapper.lookup("EPSG", &CrsCode::Numeric(27572)).is_some());
        assert!(mapper.lookup("EPSG", &CrsCode::Numeric(1)).is_none());
    }
}
