//! Projection de coordonnées entre deux systèmes
//!
//! Le [`CoordinateMapper`] est le collaborateur numérique du transformateur :
//! il ne voit que des tuples `(x, y[, z])`, jamais de géométries.

pub mod lite;
#[cfg(feature = "proj")]
pub mod proj;
mod smart;

pub use lite::LiteMapper;
#[cfg(feature = "proj")]
pub use self::proj::ProjMapper;
pub use smart::SmartMapper;

use simple_features::BoundingBox;

use crate::crs::CoordinateSystem;
use crate::error::{Result, TransformError};

/// Coordonnée échangée avec le mapper
///
/// `z` vaut `None` quand l'entrée n'a pas d'altitude ou quand le mapper
/// n'en calcule pas : l'altitude d'origine est alors conservée.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
    pub z: Option<f64>,
}

impl Coordinate {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: None }
    }

    pub fn new_z(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z: Some(z) }
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// Projette des coordonnées d'un système source vers un système destination
pub trait CoordinateMapper {
    /// Projette une coordonnée
    fn map_coordinate(
        &self,
        source: &CoordinateSystem,
        destination: &CoordinateSystem,
        coordinate: Coordinate,
    ) -> Result<Coordinate>;

    /// Projette une emprise en projetant ses quatre coins
    ///
    /// L'emprise retournée est recalculée sur les coins projetés, min ≤ max.
    fn map_bounds(
        &self,
        source: &CoordinateSystem,
        destination: &CoordinateSystem,
        bounds: &BoundingBox,
    ) -> Result<BoundingBox> {
        let mut corners = [(0.0, 0.0); 4];
        for (slot, (x, y)) in corners.iter_mut().zip(bounds.corners()) {
            let mapped = self.map_coordinate(source, destination, Coordinate::new(x, y))?;
            *slot = (mapped.x, mapped.y);
        }
        BoundingBox::from_corners(&corners)
            .ok_or_else(|| TransformError::projection("bounding box has no corners"))
    }
}

impl<M: CoordinateMapper + ?Sized> CoordinateMapper for &M {
    fn map_coordinate(
        &self,
        source: &CoordinateSystem,
        destination: &CoordinateSystem,
        coordinate: Coordinate,
    ) -> Result<Coordinate> {
        (**self).map_coordinate(source, destination, coordinate)
    }

    fn map_bounds(
        &self,
        source: &CoordinateSystem,
        destination: &CoordinateSystem,
        bounds: &BoundingBox,
    ) -> Result<BoundingBox> {
        (**self).map_bounds(source, destination, bounds)
    }
}
