//! Configuration de la reprojection
//!
//! Ordre de priorité croissante : preset embarqué, fichier JSON,
//! variables d'environnement, options de la ligne de commande.

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::crs::CoordinateSystem;
use crate::transform::DEFAULT_MAX_DEPTH;

pub const ENV_SOURCE: &str = "GEOMETRY_TRANSFORM_SOURCE";
pub const ENV_DESTINATION: &str = "GEOMETRY_TRANSFORM_DESTINATION";
pub const ENV_MAX_DEPTH: &str = "GEOMETRY_TRANSFORM_MAX_DEPTH";
pub const ENV_PRECISION: &str = "GEOMETRY_TRANSFORM_PRECISION";

/// Presets disponibles
pub const PRESETS: &[&str] = &[
    "web-mercator-to-wgs84",
    "wgs84-to-web-mercator",
    "lambert93-to-wgs84",
];

/// Configuration principale
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Système source (`EPSG:3857` ou URN OGC)
    #[serde(default)]
    pub source: Option<String>,

    /// Système destination
    #[serde(default)]
    pub destination: Option<String>,

    /// Profondeur maximale d'imbrication des collections
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Nombre de décimales conservées en sortie (pas d'arrondi si absent)
    #[serde(default)]
    pub precision: Option<u8>,

    /// Nombre de threads rayon (défaut: nombre de cœurs)
    #[serde(default)]
    pub jobs: Option<usize>,
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: None,
            destination: None,
            max_depth: DEFAULT_MAX_DEPTH,
            precision: None,
            jobs: None,
        }
    }
}

impl Config {
    /// Charge une configuration depuis un fichier
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        serde_json::from_str(&content).context("Failed to parse config JSON")
    }

    /// Charge une configuration depuis un preset embarqué
    pub fn from_preset(preset: &str) -> Result<Self> {
        match preset {
            "web-mercator-to-wgs84" => {
                Self::load_embedded(include_str!("presets/web-mercator-to-wgs84.json"))
            }
            "wgs84-to-web-mercator" => {
                Self::load_embedded(include_str!("presets/wgs84-to-web-mercator.json"))
            }
            "lambert93-to-wgs84" => {
                Self::load_embedded(include_str!("presets/lambert93-to-wgs84.json"))
            }
            _ => bail!("Unknown preset: {}. Use: {}", preset, PRESETS.join(", ")),
        }
    }

    fn load_embedded(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse embedded config")
    }

    /// Surcharge par les variables d'environnement du processus
    pub fn apply_env(&mut self) -> Result<()> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Surcharge par une source de variables quelconque
    pub fn apply_env_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(source) = lookup(ENV_SOURCE) {
            self.source = Some(source);
        }
        if let Some(destination) = lookup(ENV_DESTINATION) {
            self.destination = Some(destination);
        }
        if let Some(max_depth) = lookup(ENV_MAX_DEPTH) {
            self.max_depth = max_depth
                .trim()
                .parse()
                .context(format!("Invalid {}: {}", ENV_MAX_DEPTH, max_depth))?;
        }
        if let Some(precision) = lookup(ENV_PRECISION) {
            self.precision = Some(
                precision
                    .trim()
                    .parse()
                    .context(format!("Invalid {}: {}", ENV_PRECISION, precision))?,
            );
        }
        Ok(())
    }

    /// Système source résolu
    pub fn source_system(&self) -> Result<CoordinateSystem> {
        parse_system(self.source.as_deref(), "source")
    }

    /// Système destination résolu
    pub fn destination_system(&self) -> Result<CoordinateSystem> {
        parse_system(self.destination.as_deref(), "destination")
    }
}

fn parse_system(value: Option<&str>, role: &str) -> Result<CoordinateSystem> {
    let Some(value) = value else {
        bail!("No {} coordinate system configured", role);
    };
    value
        .parse()
        .context(format!("Invalid {} coordinate system", role))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_presets() {
        for preset in PRESETS {
            let config = Config::from_preset(preset).unwrap();
            assert!(config.source_system().is_ok(), "{}", preset);
            assert!(config.destination_system().is_ok(), "{}", preset);
            assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
        }

        let config = Config::from_preset("lambert93-to-wgs84").unwrap();
        assert_eq!(config.source_system().unwrap(), CoordinateSystem::epsg(2154));
        assert!(Config::from_preset("unknown").is_err());
    }

    #[test]
    fn test_defaults_from_partial_json() {
        let config: Config = serde_json::from_str(r#"{"source": "EPSG:3857"}"#).unwrap();
        assert_eq!(config.source.as_deref(), Some("EPSG:3857"));
        assert_eq!(config.destination, None);
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(config.precision, None);
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            (ENV_DESTINATION, "urn:ogc:def:crs:EPSG::4326"),
            (ENV_MAX_DEPTH, "16"),
            (ENV_PRECISION, " 5 "),
        ]
        .into_iter()
        .collect();

        let mut config = Config::from_preset("wgs84-to-web-mercator").unwrap();
        config
            .apply_env_from(|key| vars.get(key).map(|v| v.to_string()))
            .unwrap();

        assert_eq!(config.source.as_deref(), Some("EPSG:4326"));
        assert_eq!(config.destination_system().unwrap(), CoordinateSystem::epsg(4326));
        assert_eq!(config.max_depth, 16);
        assert_eq!(config.precision, Some(5));
    }

    #[test]
    fn test_env_invalid_number() {
        let mut config = Config::default();
        let result = config.apply_env_from(|key| {
            (key == ENV_MAX_DEPTH).then(|| "deep".to_string())
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_system() {
        let config = Config::default();
        let err = config.source_system().unwrap_err();
        assert!(err.to_string().contains("source"));
    }
}
