//! Emprise rectangulaire alignée sur les axes

/// Bounding box (min_x, min_y, max_x, max_y)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Enveloppe d'un ensemble de coins, quel que soit leur ordre
    ///
    /// Garantit `min <= max` sur les deux axes (les NaN sont ignorés tant
    /// qu'au moins une valeur finie existe).
    pub fn from_corners(corners: &[(f64, f64)]) -> Option<Self> {
        let (first, rest) = corners.split_first()?;
        let mut bbox = Self::new(first.0, first.1, first.0, first.1);
        for &(x, y) in rest {
            bbox.expand_to_include(x, y);
        }
        Some(bbox)
    }

    /// Les 4 coins : (min,min), (max,min), (max,max), (min,max)
    pub fn corners(&self) -> [(f64, f64); 4] {
        [
            (self.min_x, self.min_y),
            (self.max_x, self.min_y),
            (self.max_x, self.max_y),
            (self.min_x, self.max_y),
        ]
    }

    pub fn expand_to_include(&mut self, x: f64, y: f64) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_corners_normalizes() {
        let bbox = BoundingBox::from_corners(&[(5.0, -2.0), (-1.0, 8.0), (3.0, 3.0)]).unwrap();
        assert_eq!(bbox, BoundingBox::new(-1.0, -2.0, 5.0, 8.0));
        assert!(BoundingBox::from_corners(&[]).is_none());
    }

    #[test]
    fn test_corners_order() {
        let bbox = BoundingBox::new(0.0, 1.0, 2.0, 3.0);
        assert_eq!(
            bbox.corners(),
            [(0.0, 1.0), (2.0, 1.0), (2.0, 3.0), (0.0, 3.0)]
        );
        assert_eq!(bbox.width(), 2.0);
        assert_eq!(bbox.height(), 2.0);
        assert!(bbox.contains(1.0, 2.0));
        assert!(!bbox.contains(3.0, 2.0));
    }
}
