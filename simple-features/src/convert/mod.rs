//! Conversions vers/depuis les modèles de l'écosystème (`geo`, `geojson`)
//!
//! Ces modèles ne connaissent ni les courbes ni les mesures : les types
//! courbes sont refusés, la valeur m est perdue à l'export.

mod geo_interop;
mod geojson_interop;
