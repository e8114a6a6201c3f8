//! Projection Web Mercator (EPSG:3857)
//!
//! Aussi connu sous le nom de Pseudo-Mercator ou Spherical Mercator.
//! Modèle sphérique de rayon égal au demi-grand axe WGS84. Aucune
//! troncature de latitude : les pôles sont rejetés plutôt que déplacés.

use super::ellipsoid::Ellipsoid;
use super::Geographic;
use crate::error::{Result, TransformError};

/// Latitude maximale représentable (carré de 2×20037508.34 m de côté)
pub const WEB_MERCATOR_MAX_LAT: f64 = 85.0511287798066;

/// Convertit coordonnées géographiques vers Web Mercator (EPSG:3857)
pub fn geographic_to_web_mercator(geo: Geographic) -> Result<(f64, f64)> {
    let r = Ellipsoid::WGS84.a;

    // X = R * longitude
    let x = r * geo.lon;

    // Y = R * ln(tan(π/4 + lat/2))
    let y = r * (std::f64::consts::FRAC_PI_4 + geo.lat / 2.0).tan().ln();

    if geo.lat.abs() >= std::f64::consts::FRAC_PI_2 || !x.is_finite() || !y.is_finite() {
        return Err(TransformError::projection(format!(
            "latitude {:.6}° cannot be represented in Web Mercator",
            geo.lat.to_degrees()
        )));
    }
    Ok((x, y))
}

/// Convertit Web Mercator vers coordonnées géographiques
pub fn web_mercator_to_geographic(x: f64, y: f64) -> Result<Geographic> {
    let r = Ellipsoid::WGS84.a;

    // Longitude = x / R
    let lon = x / r;

    // Latitude = 2 * atan(exp(y/R)) - π/2
    let lat = 2.0 * (y / r).exp().atan() - std::f64::consts::FRAC_PI_2;

    Ok(Geographic::new(lon, lat))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paris_to_web_mercator() {
        // Paris: 2.35°E, 48.85°N
        let geo = Geographic::from_degrees(2.35, 48.85);
        let (x, y) = geographic_to_web_mercator(geo).unwrap();

        // X ≈ 261600, Y ≈ 6250000
        assert!((x - 261600.0).abs() < 1000.0, "x={}", x);
        assert!((y - 6250000.0).abs() < 10000.0, "y={}", y);
    }

    #[test]
    fn test_roundtrip() {
        let geo = Geographic::from_degrees(2.35, 48.85);
        let (x, y) = geographic_to_web_mercator(geo).unwrap();
        let (lon, lat) = web_mercator_to_geographic(x, y).unwrap().to_degrees();

        assert!((lon - 2.35).abs() < 1e-12, "lon={}", lon);
        assert!((lat - 48.85).abs() < 1e-12, "lat={}", lat);
    }

    #[test]
    fn test_no_clamping() {
        let geo = Geographic::from_degrees(0.0, 89.0);
        let (_, y) = geographic_to_web_mercator(geo).unwrap();
        assert!(y > 20037508.34 * 1.5, "y={}", y);
    }

    #[test]
    fn test_half_world_corner() {
        let (lon, lat) = web_mercator_to_geographic(20037508.342789244, 20037508.342789244)
            .unwrap()
            .to_degrees();
        assert!((lon - 180.0).abs() < 1e-9, "lon={}", lon);
        assert!((lat - WEB_MERCATOR_MAX_LAT).abs() < 1e-9, "lat={}", lat);
    }

    #[test]
    fn test_pole_rejected() {
        let geo = Geographic::from_degrees(0.0, 90.0);
        assert!(matches!(
            geographic_to_web_mercator(geo),
            Err(TransformError::Projection { .. })
        ));
    }
}
