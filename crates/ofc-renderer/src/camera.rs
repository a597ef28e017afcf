//! Orbit camera for the modeling viewport
//!
//! The camera is described by its orbit (target, yaw, pitch, distance) in a
//! Z-up world. The eye position is derived from the orbit on demand.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use crate::constants::camera as constants;

/// Camera uniform buffer data
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    /// Combined view-projection matrix
    pub view_proj: [[f32; 4]; 4],
    /// View matrix
    pub view: [[f32; 4]; 4],
    /// Projection matrix
    pub proj: [[f32; 4]; 4],
    /// Eye position (w = 1)
    pub eye: [f32; 4],
}

/// Orbit camera (Z up)
#[derive(Debug, Clone)]
pub struct Camera {
    /// Orbit center
    pub target: Vec3,
    /// Angle around Z from +X, radians
    pub yaw: f32,
    /// Elevation above the XY plane, radians
    pub pitch: f32,
    /// Distance from target
    pub distance: f32,
    /// Vertical field of view in radians
    pub fov: f32,
    /// Viewport aspect ratio
    pub aspect: f32,
    /// Near clipping plane
    pub near: f32,
    /// Far clipping plane
    pub far: f32,
    /// Pan speed per pixel relative to distance
    pub pan_scale: f32,
    /// Fraction of the distance covered per zoom unit
    pub zoom_scale: f32,
}

impl Camera {
    /// Camera looking at the origin from the default orbit
    pub fn new(aspect: f32) -> Self {
        Self {
            target: Vec3::ZERO,
            yaw: constants::DEFAULT_YAW_DEGREES.to_radians(),
            pitch: constants::DEFAULT_PITCH_DEGREES.to_radians(),
            distance: constants::DEFAULT_DISTANCE,
            fov: constants::DEFAULT_FOV_DEGREES.to_radians(),
            aspect,
            near: constants::DEFAULT_NEAR,
            far: constants::DEFAULT_FAR,
            pan_scale: constants::PAN_SCALE,
            zoom_scale: constants::ZOOM_SCALE,
        }
    }

    /// Eye position derived from the orbit
    pub fn eye(&self) -> Vec3 {
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        self.target + self.distance * Vec3::new(cos_pitch * cos_yaw, cos_pitch * sin_yaw, sin_pitch)
    }

    /// Update aspect ratio
    pub fn update_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    /// Rotate around the target
    pub fn orbit(&mut self, delta_yaw: f32, delta_pitch: f32) {
        self.yaw = (self.yaw + delta_yaw).rem_euclid(std::f32::consts::TAU);
        self.pitch = (self.pitch + delta_pitch).clamp(
            constants::MIN_PITCH_DEGREES.to_radians(),
            constants::MAX_PITCH_DEGREES.to_radians(),
        );
    }

    /// Move the target in the view plane by a screen-space delta in pixels
    pub fn pan(&mut self, delta_x: f32, delta_y: f32) {
        let forward = (self.target - self.eye()).normalize_or_zero();
        let right = forward.cross(Vec3::Z).normalize_or_zero();
        let up = right.cross(forward);

        let scale = self.distance * self.pan_scale;
        self.target += (up * delta_y - right * delta_x) * scale;
    }

    /// Move towards (positive) or away from (negative) the target
    pub fn zoom(&mut self, delta: f32) {
        self.distance = (self.distance * (1.0 - delta * self.zoom_scale))
            .clamp(constants::MIN_DISTANCE, constants::MAX_DISTANCE);
    }

    /// Set field of view in degrees (10 to 120)
    pub fn set_fov_degrees(&mut self, fov_degrees: f32) {
        self.fov = fov_degrees.clamp(10.0, 120.0).to_radians();
    }

    /// Set near and far planes, keeping far beyond near
    pub fn set_clip_planes(&mut self, near: f32, far: f32) {
        self.near = near.max(0.001);
        self.far = far.max(self.near + 1.0);
    }

    /// Center on a bounding sphere with some margin
    pub fn fit_all(&mut self, center: Vec3, radius: f32) {
        self.target = center;
        self.distance = (radius * constants::FIT_ALL_MULTIPLIER).max(1.0);
    }

    /// Look down the Z axis
    pub fn set_top_view(&mut self) {
        self.yaw = -std::f32::consts::FRAC_PI_2;
        self.pitch = constants::MAX_PITCH_DEGREES.to_radians();
    }

    /// Look along +Y at the XZ plane
    pub fn set_front_view(&mut self) {
        self.yaw = -std::f32::consts::FRAC_PI_2;
        self.pitch = 0.0;
    }

    /// Look along -X at the YZ plane
    pub fn set_side_view(&mut self) {
        self.yaw = 0.0;
        self.pitch = 0.0;
    }

    /// View matrix
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.target, Vec3::Z)
    }

    /// Projection matrix
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    /// Uniform data for the shaders
    pub fn uniform(&self) -> CameraUniform {
        let view = self.view_matrix();
        let proj = self.projection_matrix();

        CameraUniform {
            view_proj: (proj * view).to_cols_array_2d(),
            view: view.to_cols_array_2d(),
            proj: proj.to_cols_array_2d(),
            eye: self.eye().extend(1.0).to_array(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_initial_distance() {
        let camera = Camera::new(1.5);
        assert_relative_eq!(
            (camera.eye() - camera.target).length(),
            constants::DEFAULT_DISTANCE,
            epsilon = 1e-3
        );
        assert!(camera.eye().z > 0.0);
    }

    #[test]
    fn test_orbit_clamps_pitch() {
        let mut camera = Camera::new(1.0);
        camera.orbit(0.0, 10.0);
        assert_relative_eq!(camera.pitch, 89.0_f32.to_radians(), epsilon = 1e-6);
        camera.orbit(0.0, -20.0);
        assert_relative_eq!(camera.pitch, -89.0_f32.to_radians(), epsilon = 1e-6);
    }

    #[test]
    fn test_fit_all() {
        let mut camera = Camera::new(1.0);
        camera.fit_all(Vec3::new(30.0, 20.0, 15.0), 40.0);
        assert_eq!(camera.target, Vec3::new(30.0, 20.0, 15.0));
        assert_relative_eq!(camera.distance, 100.0);
        assert_relative_eq!(
            (camera.eye() - camera.target).length(),
            100.0,
            epsilon = 1e-3
        );

        camera.fit_all(Vec3::ZERO, 0.0);
        assert_relative_eq!(camera.distance, 1.0);
    }

    #[test]
    fn test_zoom_clamps_distance() {
        let mut camera = Camera::new(1.0);
        for _ in 0..200 {
            camera.zoom(5.0);
        }
        assert!(camera.distance >= constants::MIN_DISTANCE);
    }

    #[test]
    fn test_pan_moves_target_only() {
        let mut camera = Camera::new(1.0);
        let distance = camera.distance;
        camera.pan(10.0, 0.0);
        assert_ne!(camera.target, Vec3::ZERO);
        assert_relative_eq!(camera.target.z, 0.0, epsilon = 1e-5);
        assert_relative_eq!(camera.distance, distance);
    }

    #[test]
    fn test_standard_views() {
        let mut camera = Camera::new(1.0);

        camera.set_front_view();
        let dir = (camera.eye() - camera.target).normalize();
        assert_relative_eq!(dir.y, -1.0, epsilon = 1e-5);

        camera.set_side_view();
        let dir = (camera.eye() - camera.target).normalize();
        assert_relative_eq!(dir.x, 1.0, epsilon = 1e-5);

        camera.set_top_view();
        assert!((camera.eye() - camera.target).normalize().z > 0.99);
    }
}
