//! Systèmes de coordonnées et registre de résolution
//!
//! Un système est identifié par un couple autorité/code (`EPSG:3857`).
//! Le registre intégré couvre les systèmes que [`LiteMapper`](crate::mapper::LiteMapper)
//! sait projeter.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::Arc;

use crate::error::{Result, TransformError};
use crate::mapper::lite::LiteProjection;

/// Autorité EPSG
pub const EPSG: &str = "EPSG";

const OGC_URN_PREFIX: &str = "urn:ogc:def:crs:";

/// Code d'un système dans son autorité (numérique ou textuel)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CrsCode {
    Numeric(u32),
    Text(String),
}

impl fmt::Display for CrsCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Numeric(code) => write!(f, "{}", code),
            Self::Text(code) => f.write_str(code),
        }
    }
}

impl From<u32> for CrsCode {
    fn from(code: u32) -> Self {
        Self::Numeric(code)
    }
}

impl From<&str> for CrsCode {
    fn from(code: &str) -> Self {
        Self::Text(code.trim().to_string())
    }
}

impl From<String> for CrsCode {
    fn from(code: String) -> Self {
        Self::from(code.as_str())
    }
}

/// Système de coordonnées résolu
///
/// L'égalité ne porte que sur l'autorité et le code, le nom est informatif.
#[derive(Debug, Clone)]
pub struct CoordinateSystem {
    authority: String,
    code: String,
    name: String,
}

impl CoordinateSystem {
    /// Crée un système (l'autorité est normalisée en majuscules)
    pub fn new(authority: &str, code: impl Into<CrsCode>) -> Self {
        Self {
            authority: authority.trim().to_ascii_uppercase(),
            code: code.into().to_string(),
            name: String::new(),
        }
    }

    /// Crée un système EPSG
    pub fn epsg(code: u32) -> Self {
        Self::new(EPSG, code)
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn authority(&self) -> &str {
        &self.authority
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Code EPSG numérique, si le système relève de l'autorité EPSG
    pub fn epsg_code(&self) -> Option<u32> {
        if self.authority == EPSG {
            self.code.parse().ok()
        } else {
            None
        }
    }

    /// Forme URN OGC (`urn:ogc:def:crs:EPSG::3857`)
    pub fn urn(&self) -> String {
        format!("{}{}::{}", OGC_URN_PREFIX, self.authority, self.code)
    }
}

impl PartialEq for CoordinateSystem {
    fn eq(&self, other: &Self) -> bool {
        self.authority == other.authority && self.code == other.code
    }
}

impl Eq for CoordinateSystem {}

impl Hash for CoordinateSystem {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.authority.hash(state);
        self.code.hash(state);
    }
}

impl fmt::Display for CoordinateSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.authority, self.code)
    }
}

impl FromStr for CoordinateSystem {
    type Err = TransformError;

    /// Accepte `AUTH:CODE` et `urn:ogc:def:crs:AUTH:[version]:CODE`
    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let invalid = || TransformError::InvalidCrs(s.to_string());

        let (authority, code) = match s.get(..OGC_URN_PREFIX.len()) {
            Some(prefix) if prefix.eq_ignore_ascii_case(OGC_URN_PREFIX) => {
                let rest = &s[OGC_URN_PREFIX.len()..];
                let (authority, tail) = rest.split_once(':').ok_or_else(invalid)?;
                let code = tail.rsplit(':').next().ok_or_else(invalid)?;
                (authority, code)
            }
            _ => s.split_once(':').ok_or_else(invalid)?,
        };

        if authority.trim().is_empty() || code.trim().is_empty() {
            return Err(invalid());
        }
        Ok(Self::new(authority, code))
    }
}

/// Source de résolution autorité/code → système
pub trait CrsRegistry {
    /// Recherche un système, `None` si inconnu
    fn lookup(&self, authority: &str, code: &CrsCode) -> Option<CoordinateSystem>;

    /// Résout un système ou échoue avec une erreur de configuration
    fn resolve(&self, authority: &str, code: impl Into<CrsCode>) -> Result<Arc<CoordinateSystem>>
    where
        Self: Sized,
    {
        let code = code.into();
        self.lookup(authority, &code)
            .map(Arc::new)
            .ok_or_else(|| TransformError::Configuration {
                authority: authority.to_string(),
                code: code.to_string(),
            })
    }
}

/// Registre des systèmes projetables sans dépendance externe
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinRegistry;

impl BuiltinRegistry {
    /// Liste des systèmes connus, alias exclus
    pub fn known_systems() -> Vec<CoordinateSystem> {
        [4326, 3857, 2154]
            .into_iter()
            .chain(32601..=32660)
            .chain(32701..=32760)
            .filter_map(|code| LiteProjection::from_epsg(code).map(|p| p.coordinate_system()))
            .collect()
    }
}

impl CrsRegistry for BuiltinRegistry {
    fn lookup(&self, authority: &str, code: &CrsCode) -> Option<CoordinateSystem> {
        if !authority.trim().eq_ignore_ascii_case(EPSG) {
            return None;
        }
        let epsg = match code {
            CrsCode::Numeric(code) => *code,
            CrsCode::Text(code) => code.parse().ok()?,
        };
        LiteProjection::from_epsg(epsg).map(|p| p.coordinate_system())
    }
}
