//! Transformateur de géométries entre deux systèmes de coordonnées
//!
//! Un [`GeometryTransformer`] est immuable : il associe un système source,
//! un système destination et un [`CoordinateMapper`]. Chaque opération
//! retourne une nouvelle géométrie de même type, structure et drapeaux
//! z/m que l'entrée ; seules les coordonnées x/y sont projetées.

mod geometry;

use std::sync::Arc;

use simple_features::{BoundingBox, Point};
use tracing::debug;

use crate::crs::{BuiltinRegistry, CoordinateSystem, CrsCode, CrsRegistry, EPSG};
use crate::error::Result;
use crate::mapper::{Coordinate, CoordinateMapper, LiteMapper};

/// Profondeur maximale d'imbrication des collections
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Transformation d'un système source vers un système destination
#[derive(Debug)]
pub struct GeometryTransformer<M = LiteMapper> {
    source: Arc<CoordinateSystem>,
    destination: Arc<CoordinateSystem>,
    mapper: Arc<M>,
    max_depth: usize,
}

impl<M> Clone for GeometryTransformer<M> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            destination: Arc::clone(&self.destination),
            mapper: Arc::clone(&self.mapper),
            max_depth: self.max_depth,
        }
    }
}

impl GeometryTransformer<LiteMapper> {
    /// Crée un transformateur utilisant le mapper léger
    pub fn new(source: Arc<CoordinateSystem>, destination: Arc<CoordinateSystem>) -> Self {
        Self::with_mapper(source, destination, LiteMapper)
    }

    /// Source donnée, destination résolue dans le registre intégré
    pub fn from_system_and_code(
        source: Arc<CoordinateSystem>,
        authority: &str,
        code: impl Into<CrsCode>,
    ) -> Result<Self> {
        let destination = BuiltinRegistry.resolve(authority, code)?;
        Ok(Self::new(source, destination))
    }

    /// Source résolue dans le registre intégré, destination donnée
    pub fn from_code_and_system(
        authority: &str,
        code: impl Into<CrsCode>,
        destination: Arc<CoordinateSystem>,
    ) -> Result<Self> {
        let source = BuiltinRegistry.resolve(authority, code)?;
        Ok(Self::new(source, destination))
    }

    /// Source et destination résolues dans le registre intégré
    pub fn from_codes(
        source_authority: &str,
        source_code: impl Into<CrsCode>,
        destination_authority: &str,
        destination_code: impl Into<CrsCode>,
    ) -> Result<Self> {
        Self::from_codes_in(
            &BuiltinRegistry,
            LiteMapper,
            source_authority,
            source_code,
            destination_authority,
            destination_code,
        )
    }

    /// Raccourci EPSG → EPSG
    pub fn from_epsg(source: u32, destination: u32) -> Result<Self> {
        Self::from_codes(EPSG, source, EPSG, destination)
    }
}

impl<M: CoordinateMapper> GeometryTransformer<M> {
    /// Crée un transformateur avec un mapper choisi
    pub fn with_mapper(
        source: Arc<CoordinateSystem>,
        destination: Arc<CoordinateSystem>,
        mapper: M,
    ) -> Self {
        Self::with_shared_mapper(source, destination, Arc::new(mapper))
    }

    /// Crée un transformateur partageant un mapper existant
    pub fn with_shared_mapper(
        source: Arc<CoordinateSystem>,
        destination: Arc<CoordinateSystem>,
        mapper: Arc<M>,
    ) -> Self {
        debug!(
            source = %source,
            destination = %destination,
            "Geometry transformer created"
        );
        Self {
            source,
            destination,
            mapper,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Résout les deux systèmes dans un registre quelconque
    pub fn from_codes_in<R: CrsRegistry>(
        registry: &R,
        mapper: M,
        source_authority: &str,
        source_code: impl Into<CrsCode>,
        destination_authority: &str,
        destination_code: impl Into<CrsCode>,
    ) -> Result<Self> {
        let source = registry.resolve(source_authority, source_code)?;
        let destination = registry.resolve(destination_authority, destination_code)?;
        Ok(Self::with_mapper(source, destination, mapper))
    }

    /// Copie d'un transformateur existant (mêmes systèmes, même mapper)
    pub fn from_transformer(transformer: &Self) -> Self {
        transformer.clone()
    }

    /// Limite la profondeur d'imbrication acceptée
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn source(&self) -> &Arc<CoordinateSystem> {
        &self.source
    }

    pub fn destination(&self) -> &Arc<CoordinateSystem> {
        &self.destination
    }

    pub fn mapper(&self) -> &M {
        &self.mapper
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Transformateur inverse : destination → source, même mapper
    pub fn inverse(&self) -> Self {
        debug!(
            source = %self.destination,
            destination = %self.source,
            "Inverse geometry transformer created"
        );
        Self {
            source: Arc::clone(&self.destination),
            destination: Arc::clone(&self.source),
            mapper: Arc::clone(&self.mapper),
            max_depth: self.max_depth,
        }
    }

    /// Projette une emprise via ses quatre coins
    ///
    /// Délègue à [`CoordinateMapper::map_bounds`], qui garantit min ≤ max
    /// même si la projection inverse l'ordre des axes.
    pub fn transform_bounding_box(&self, bbox: &BoundingBox) -> Result<BoundingBox> {
        self.mapper
            .map_bounds(&self.source, &self.destination, bbox)
    }

    /// Projette une coordonnée brute
    pub fn transform_coordinate(&self, coordinate: Coordinate) -> Result<Coordinate> {
        self.mapper
            .map_coordinate(&self.source, &self.destination, coordinate)
    }

    /// Projette un point
    ///
    /// Le z projeté remplace l'original seulement si le mapper en produit un ;
    /// m est recopié tel quel.
    pub fn transform_point(&self, from: &Point) -> Result<Point> {
        let z = if from.has_z { from.z } else { None };
        let mapped = self.transform_coordinate(Coordinate {
            x: from.x,
            y: from.y,
            z,
        })?;

        Ok(Point {
            has_z: from.has_z,
            has_m: from.has_m,
            x: mapped.x,
            y: mapped.y,
            z: if from.has_z { mapped.z.or(from.z) } else { None },
            m: if from.has_m { from.m } else { None },
        })
    }

    /// Projette une suite de points, dans l'ordre
    pub fn transform_points(&self, from: &[Point]) -> Result<Vec<Point>> {
        from.iter().map(|p| self.transform_point(p)).collect()
    }
}
