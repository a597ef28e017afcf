//! Sketch Profiles
//!
//! Parametric 2D profiles (rectangle, circle) placed on a sketch plane.
//! A profile only describes the outline; turning it into kernel wires and
//! faces is the job of the [`CadKernel`](crate::kernel::CadKernel).

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::kernel::{CadError, CadResult};

/// A plane in 3D space that a profile is drawn on
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SketchPlane {
    /// Origin of the plane (profile coordinate (0, 0))
    pub origin: Vec3,
    /// Plane normal (normalized)
    pub normal: Vec3,
    /// Local X direction (normalized, perpendicular to the normal)
    pub x_axis: Vec3,
}

impl SketchPlane {
    /// Create a plane, normalizing the axes and making `x_axis` orthogonal to `normal`
    pub fn new(origin: Vec3, normal: Vec3, x_axis: Vec3) -> Self {
        let normal = normal.normalize();
        let x_axis = (x_axis - normal * x_axis.dot(normal)).normalize();
        Self {
            origin,
            normal,
            x_axis,
        }
    }

    /// The XY plane at the world origin
    pub fn xy() -> Self {
        Self::new(Vec3::ZERO, Vec3::Z, Vec3::X)
    }

    /// The XZ plane at the world origin
    pub fn xz() -> Self {
        Self::new(Vec3::ZERO, Vec3::Y, Vec3::Z)
    }

    /// The YZ plane at the world origin
    pub fn yz() -> Self {
        Self::new(Vec3::ZERO, Vec3::X, Vec3::Y)
    }

    /// A plane through `origin` whose normal is `direction`.
    ///
    /// The local X axis is chosen from the world axes so that it is never
    /// parallel to the normal.
    pub fn perpendicular_to(origin: Vec3, direction: Vec3) -> Self {
        let normal = direction.normalize();
        let reference = if normal.z.abs() < 0.9 { Vec3::Z } else { Vec3::X };
        let x_axis = reference.cross(normal).normalize();
        Self::new(origin, normal, x_axis)
    }

    /// Local Y direction
    pub fn y_axis(&self) -> Vec3 {
        self.normal.cross(self.x_axis)
    }

    /// Map a point in plane coordinates to world space
    pub fn to_world(&self, point: Vec2) -> Vec3 {
        self.origin + self.x_axis * point.x + self.y_axis() * point.y
    }
}

impl Default for SketchPlane {
    fn default() -> Self {
        Self::xy()
    }
}

/// Shape of a parametric profile
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ProfileShape {
    /// Axis-aligned rectangle with one corner at the plane origin
    Rectangle { width: f32, height: f32 },
    /// Circle centered at the plane origin
    Circle { radius: f32 },
}

impl ProfileShape {
    /// Check that all dimensions are finite and strictly positive
    pub fn validate(&self) -> CadResult<()> {
        let check = |name: &str, value: f32| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(CadError::InvalidProfile(format!(
                    "{} must be positive, got {}",
                    name, value
                )))
            }
        };

        match *self {
            ProfileShape::Rectangle { width, height } => {
                check("Width", width)?;
                check("Height", height)
            }
            ProfileShape::Circle { radius } => check("Radius", radius),
        }
    }

    /// Outline of the shape in plane coordinates.
    ///
    /// Rectangles return their four corners counter-clockwise starting at the
    /// origin. Circles are approximated with `segments` points.
    pub fn outline(&self, segments: u32) -> Vec<Vec2> {
        match *self {
            ProfileShape::Rectangle { width, height } => vec![
                Vec2::ZERO,
                Vec2::new(width, 0.0),
                Vec2::new(width, height),
                Vec2::new(0.0, height),
            ],
            ProfileShape::Circle { radius } => {
                let segments = segments.max(3);
                (0..segments)
                    .map(|i| {
                        let angle = (i as f32 / segments as f32) * std::f32::consts::TAU;
                        Vec2::new(angle.cos() * radius, angle.sin() * radius)
                    })
                    .collect()
            }
        }
    }

    /// Human readable description used in log messages
    pub fn describe(&self) -> String {
        match *self {
            ProfileShape::Rectangle { width, height } => {
                format!("Rectangle: {} x {}", width, height)
            }
            ProfileShape::Circle { radius } => format!("Circle Radius: {}", radius),
        }
    }
}

/// A closed profile on a sketch plane
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Shape and dimensions
    pub shape: ProfileShape,
    /// Plane the shape lies on
    pub plane: SketchPlane,
}

impl Profile {
    /// Create a validated profile
    pub fn new(shape: ProfileShape, plane: SketchPlane) -> CadResult<Self> {
        shape.validate()?;
        Ok(Self { shape, plane })
    }

    /// Outline points in world space
    pub fn world_outline(&self, segments: u32) -> Vec<Vec3> {
        self.shape
            .outline(segments)
            .into_iter()
            .map(|p| self.plane.to_world(p))
            .collect()
    }
}

/// Rectangle profile on the XY plane spanning (0, 0) to (width, height)
pub fn make_rectangle_sketch(width: f32, height: f32) -> CadResult<Profile> {
    Profile::new(ProfileShape::Rectangle { width, height }, SketchPlane::xy())
}

/// Circle profile on the XY plane centered at the origin
pub fn make_circle_sketch(radius: f32) -> CadResult<Profile> {
    Profile::new(ProfileShape::Circle { radius }, SketchPlane::xy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_rectangle_corners() {
        let profile = make_rectangle_sketch(60.0, 40.0).unwrap();
        let points = profile.world_outline(0);
        assert_eq!(points.len(), 4);
        assert_eq!(points[0], Vec3::ZERO);
        assert_eq!(points[1], Vec3::new(60.0, 0.0, 0.0));
        assert_eq!(points[2], Vec3::new(60.0, 40.0, 0.0));
        assert_eq!(points[3], Vec3::new(0.0, 40.0, 0.0));
    }

    #[test]
    fn test_circle_outline_radius() {
        let profile = make_circle_sketch(25.0).unwrap();
        for p in profile.world_outline(32) {
            assert_relative_eq!(p.length(), 25.0, epsilon = 1e-4);
            assert_relative_eq!(p.z, 0.0);
        }
    }

    #[test]
    fn test_invalid_dimensions() {
        assert!(make_rectangle_sketch(0.0, 10.0).is_err());
        assert!(make_rectangle_sketch(10.0, -1.0).is_err());
        assert!(make_circle_sketch(f32::NAN).is_err());
    }

    #[test]
    fn test_perpendicular_plane() {
        let plane = SketchPlane::perpendicular_to(Vec3::ZERO, Vec3::Y);
        assert_relative_eq!(plane.normal.dot(plane.x_axis), 0.0, epsilon = 1e-6);
        assert_relative_eq!(plane.normal.dot(plane.y_axis()), 0.0, epsilon = 1e-6);
        assert_relative_eq!(plane.normal.y, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_xz_plane_mapping() {
        let plane = SketchPlane::xz();
        let p = plane.to_world(Vec2::new(1.0, 2.0));
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-6);
    }
}
