//! Axis-aligned bounds used to frame bodies.

use glam::{Mat4, Vec3};

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl BoundingBox {
    /// Box from its corners.
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Inverted box that any point will grow.
    pub fn empty() -> Self {
        Self::new(Vec3::INFINITY, Vec3::NEG_INFINITY)
    }

    /// Smallest box around `points`; empty when there are none.
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Self {
        points
            .into_iter()
            .fold(Self::empty(), |bbox, p| Self::new(bbox.min.min(p), bbox.max.max(p)))
    }

    /// Midpoint of the box.
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Full extents.
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Radius of the enclosing sphere around [`Self::center`].
    pub fn radius(&self) -> f32 {
        self.size().length() * 0.5
    }

    /// Box enclosing both.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        Self::new(self.min.min(other.min), self.max.max(other.max))
    }

    /// Box around the eight transformed corners.
    pub fn transform(&self, transform: &Mat4) -> BoundingBox {
        let (lo, hi) = (self.min, self.max);
        Self::from_points((0..8).map(|i| {
            let corner = Vec3::new(
                if i & 1 == 0 { lo.x } else { hi.x },
                if i & 2 == 0 { lo.y } else { hi.y },
                if i & 4 == 0 { lo.z } else { hi.z },
            );
            transform.transform_point3(corner)
        }))
    }

    /// False for an empty box.
    pub fn is_valid(&self) -> bool {
        self.min.cmple(self.max).all()
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extruded_rectangle_bounds() {
        assert!(!BoundingBox::empty().is_valid());
        assert!(!BoundingBox::from_points([]).is_valid());

        let bbox = BoundingBox::from_points([
            Vec3::new(60.0, 0.0, 0.0),
            Vec3::new(0.0, 40.0, 30.0),
        ]);
        assert!(bbox.is_valid());
        assert_eq!(bbox.size(), Vec3::new(60.0, 40.0, 30.0));
        assert_eq!(bbox.center(), Vec3::new(30.0, 20.0, 15.0));
    }

    #[test]
    fn test_radius() {
        let bbox = BoundingBox::new(Vec3::splat(-1.0), Vec3::splat(1.0));
        assert!((bbox.radius() - 3.0_f32.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn test_union() {
        let a = BoundingBox::new(Vec3::splat(-1.0), Vec3::ZERO);
        let b = BoundingBox::new(Vec3::ZERO, Vec3::splat(1.0));
        let u = a.union(&b);
        assert_eq!(u.min, Vec3::splat(-1.0));
        assert_eq!(u.max, Vec3::splat(1.0));
    }

    #[test]
    fn test_transform() {
        let bbox = BoundingBox::new(Vec3::ZERO, Vec3::ONE);
        let moved = bbox.transform(&Mat4::from_translation(Vec3::new(5.0, 0.0, 0.0)));
        assert_eq!(moved.min, Vec3::new(5.0, 0.0, 0.0));
        assert_eq!(moved.max, Vec3::new(6.0, 1.0, 1.0));

        let turned = bbox.transform(&Mat4::from_rotation_z(std::f32::consts::FRAC_PI_2));
        assert!((turned.min.x + 1.0).abs() < 1e-6);
        assert!((turned.max.y - 1.0).abs() < 1e-6);
    }
}
