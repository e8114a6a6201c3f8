//! Types d'erreurs pour le crate geometry-transform

use simple_features::{GeometryError, GeometryType};
use thiserror::Error;

use crate::crs::CoordinateSystem;

/// Erreurs pouvant survenir lors de la construction ou de l'application d'une transformation
#[derive(Debug, Error)]
pub enum TransformError {
    /// Système de coordonnées introuvable dans le registre
    #[error("Unknown coordinate system: {authority}:{code}")]
    Configuration { authority: String, code: String },

    /// Définition textuelle de système illisible
    #[error("Invalid coordinate system definition: {0}")]
    InvalidCrs(String),

    /// Variante hors de l'ensemble transformable
    #[error("Unsupported geometry type: {0}")]
    UnsupportedGeometry(GeometryType),

    /// Imbrication de collections trop profonde
    #[error("Geometry nesting exceeds the depth limit of {limit}")]
    DepthLimitExceeded { limit: usize },

    /// Aucune projection disponible entre les deux systèmes
    #[error("No projection available from {from} to {to}")]
    UnsupportedProjection { from: String, to: String },

    /// Échec numérique de la projection (coordonnée hors domaine, etc.)
    #[error("Projection failed: {reason}")]
    Projection { reason: String },

    /// Erreur du modèle de géométries (conversion GeoJSON, etc.)
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// Création de la transformation PROJ impossible
    #[cfg(feature = "proj")]
    #[error("Failed to create PROJ transformation: {0}")]
    ProjCreate(String),
}

impl TransformError {
    /// Crée une erreur de projection avec contexte
    pub fn projection(reason: impl Into<String>) -> Self {
        Self::Projection {
            reason: reason.into(),
        }
    }

    /// Crée une erreur de couple de systèmes non supporté
    pub fn unsupported_projection(from: &CoordinateSystem, to: &CoordinateSystem) -> Self {
        Self::UnsupportedProjection {
            from: from.to_string(),
            to: to.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, TransformError>;
