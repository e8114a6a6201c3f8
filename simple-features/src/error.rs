//! Types d'erreurs pour le crate simple-features

use thiserror::Error;

use crate::GeometryType;

/// Erreurs de construction ou de conversion de géométries
#[derive(Debug, Error)]
pub enum GeometryError {
    /// Conversion impossible vers/depuis un autre modèle
    #[error("Geometry conversion error: {0}")]
    Conversion(String),

    /// Position invalide (moins de 2 ordonnées, etc.)
    #[error("Invalid position: {reason}")]
    InvalidPosition { reason: String },

    /// Type sans équivalent dans le modèle cible
    #[error("Unsupported geometry type for this format: {0}")]
    Unsupported(GeometryType),
}

impl GeometryError {
    /// Crée une erreur de position invalide
    pub fn invalid_position(reason: impl Into<String>) -> Self {
        Self::InvalidPosition {
            reason: reason.into(),
        }
    }
}
