//! Définitions des ellipsoïdes

/// Ellipsoïde de révolution défini par son demi-grand axe et son aplatissement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipsoid {
    /// Demi-grand axe (rayon équatorial) en mètres
    pub a: f64,
    /// Aplatissement
    pub f: f64,
}

impl Ellipsoid {
    /// WGS84 (GPS, UTM, Web Mercator)
    pub const WGS84: Ellipsoid = Ellipsoid {
        a: 6378137.0,
        f: 1.0 / 298.257223563,
    };

    /// GRS80 (RGF93, Lambert 93)
    /// Note: quasi identique à WGS84, différence < 0.1mm
    pub const GRS80: Ellipsoid = Ellipsoid {
        a: 6378137.0,
        f: 1.0 / 298.257222101,
    };

    /// Demi-petit axe (rayon polaire) en mètres
    pub fn b(&self) -> f64 {
        self.a * (1.0 - self.f)
    }

    /// Première excentricité au carré
    pub fn e2(&self) -> f64 {
        2.0 * self.f - self.f * self.f
    }

    /// Première excentricité
    pub fn e(&self) -> f64 {
        self.e2().sqrt()
    }

    /// Deuxième excentricité au carré
    pub fn ep2(&self) -> f64 {
        let e2 = self.e2();
        e2 / (1.0 - e2)
    }

    /// Grande normale : rayon de courbure dans le premier vertical
    pub fn grande_normale(&self, lat: f64) -> f64 {
        self.a / (1.0 - self.e2() * lat.sin().powi(2)).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wgs84_constants() {
        let wgs84 = Ellipsoid::WGS84;
        assert!((wgs84.e() - 0.0818191908426215).abs() < 1e-15);
        assert!((wgs84.b() - 6356752.314245179).abs() < 1e-6);
    }

    #[test]
    fn test_grs80_close_to_wgs84() {
        assert!((Ellipsoid::GRS80.e() - 0.0818191910428158).abs() < 1e-15);
        assert!((Ellipsoid::GRS80.b() - Ellipsoid::WGS84.b()).abs() < 1e-3);
    }
}
