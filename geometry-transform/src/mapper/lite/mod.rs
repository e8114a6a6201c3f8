//! Reprojection légère en Rust pur (sans dépendances externes)
//!
//! Toute projection passe par les coordonnées géographiques :
//! source → (lon, lat) en radians → destination.
//!
//! Systèmes supportés, dans les deux sens :
//! - WGS84 (EPSG:4326), degrés
//! - Web Mercator (EPSG:3857, alias 3785 et 900913)
//! - Lambert 93 (EPSG:2154)
//! - UTM WGS84 zones 1 à 60 nord (EPSG:32601-32660) et sud (EPSG:32701-32760)

mod ellipsoid;
mod lambert;
mod mercator;
mod utm;

pub use ellipsoid::Ellipsoid;
pub use mercator::WEB_MERCATOR_MAX_LAT;

use crate::crs::CoordinateSystem;
use crate::error::{Result, TransformError};
use crate::mapper::{Coordinate, CoordinateMapper};

/// Point en coordonnées géographiques (radians)
#[derive(Debug, Clone, Copy)]
pub struct Geographic {
    /// Longitude en radians
    pub lon: f64,
    /// Latitude en radians
    pub lat: f64,
}

impl Geographic {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Convertit en degrés
    pub fn to_degrees(self) -> (f64, f64) {
        (self.lon.to_degrees(), self.lat.to_degrees())
    }

    /// Crée depuis des degrés
    pub fn from_degrees(lon_deg: f64, lat_deg: f64) -> Self {
        Self {
            lon: lon_deg.to_radians(),
            lat: lat_deg.to_radians(),
        }
    }
}

/// Projection connue du mapper léger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteProjection {
    /// Longitude/latitude en degrés
    Geographic,
    WebMercator,
    Lambert93,
    Utm { zone: u32, south: bool },
}

impl LiteProjection {
    /// Projection associée à un code EPSG (alias compris)
    pub fn from_epsg(epsg: u32) -> Option<Self> {
        match epsg {
            4326 => Some(Self::Geographic),
            3857 | 3785 | 900913 => Some(Self::WebMercator),
            2154 => Some(Self::Lambert93),
            32601..=32660 => Some(Self::Utm {
                zone: epsg - 32600,
                south: false,
            }),
            32701..=32760 => Some(Self::Utm {
                zone: epsg - 32700,
                south: true,
            }),
            _ => None,
        }
    }

    pub fn from_system(system: &CoordinateSystem) -> Option<Self> {
        system.epsg_code().and_then(Self::from_epsg)
    }

    /// Code EPSG canonique
    pub fn epsg(&self) -> u32 {
        match *self {
            Self::Geographic => 4326,
            Self::WebMercator => 3857,
            Self::Lambert93 => 2154,
            Self::Utm { zone, south: false } => 32600 + zone,
            Self::Utm { zone, south: true } => 32700 + zone,
        }
    }

    pub fn name(&self) -> String {
        match *self {
            Self::Geographic => "WGS 84".to_string(),
            Self::WebMercator => "WGS 84 / Pseudo-Mercator".to_string(),
            Self::Lambert93 => "RGF93 v1 / Lambert-93".to_string(),
            Self::Utm { zone, south } => {
                format!("WGS 84 / UTM zone {}{}", zone, if south { 'S' } else { 'N' })
            }
        }
    }

    /// Système canonique nommé
    pub fn coordinate_system(&self) -> CoordinateSystem {
        CoordinateSystem::epsg(self.epsg()).with_name(self.name())
    }

    /// Convertit les coordonnées de la projection en géographique
    fn to_geographic(self, x: f64, y: f64) -> Result<Geographic> {
        match self {
            Self::Geographic => Ok(Geographic::from_degrees(x, y)),
            Self::WebMercator => mercator::web_mercator_to_geographic(x, y),
            Self::Lambert93 => lambert::lambert93_to_geographic(x, y),
            Self::Utm { zone, south } => utm::utm_to_geographic(x, y, zone, south),
        }
    }

    /// Convertit les coordonnées géographiques vers la projection
    fn project(self, geo: Geographic) -> Result<(f64, f64)> {
        match self {
            Self::Geographic => Ok(geo.to_degrees()),
            Self::WebMercator => mercator::geographic_to_web_mercator(geo),
            Self::Lambert93 => lambert::geographic_to_lambert93(geo),
            Self::Utm { zone, south } => utm::geographic_to_utm(geo, zone, south),
        }
    }
}

/// Mapper en Rust pur couvrant les systèmes de [`LiteProjection`]
///
/// Ne calcule jamais d'altitude : `z` est rendu à `None` et l'appelant
/// conserve l'altitude d'origine.
#[derive(Debug, Clone, Copy, Default)]
pub struct LiteMapper;

impl LiteMapper {
    /// Vérifie si la reprojection est supportée
    pub fn supports(source: &CoordinateSystem, destination: &CoordinateSystem) -> bool {
        source == destination
            || (LiteProjection::from_system(source).is_some()
                && LiteProjection::from_system(destination).is_some())
    }
}

impl CoordinateMapper for LiteMapper {
    fn map_coordinate(
        &self,
        source: &CoordinateSystem,
        destination: &CoordinateSystem,
        coordinate: Coordinate,
    ) -> Result<Coordinate> {
        if source == destination {
            return Ok(coordinate);
        }

        let (Some(from), Some(to)) = (
            LiteProjection::from_system(source),
            LiteProjection::from_system(destination),
        ) else {
            return Err(TransformError::unsupported_projection(source, destination));
        };

        // Étape 1: Source → Géographique
        let geo = from.to_geographic(coordinate.x, coordinate.y)?;
        // Étape 2: Géographique → Destination
        let (x, y) = to.project(geo)?;

        Ok(Coordinate::new(x, y))
    }
}
