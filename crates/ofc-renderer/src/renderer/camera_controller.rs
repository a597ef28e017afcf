//! Camera state and its GPU uniform.

use wgpu::util::DeviceExt;

use crate::camera::Camera;
use crate::config::CameraConfig;

use super::gpu_resources;

/// Owns the camera and the buffer the shaders read it from.
pub struct CameraController {
    camera: Camera,
    buffer: wgpu::Buffer,
    bind_group_layout: wgpu::BindGroupLayout,
    orbit_sensitivity: f32,
}

impl CameraController {
    /// Create a new camera controller.
    pub fn new(device: &wgpu::Device, width: u32, height: u32, config: &CameraConfig) -> Self {
        let mut camera = Camera::new(aspect(width, height));
        apply_camera_config(&mut camera, config);

        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[camera.uniform()]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let bind_group_layout = gpu_resources::create_camera_bind_group_layout(device);

        Self {
            camera,
            buffer,
            bind_group_layout,
            orbit_sensitivity: config.orbit_sensitivity,
        }
    }

    /// Get the camera.
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Get the camera mutably.
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Camera uniform buffer.
    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    /// Camera bind group layout (group 0 of every pipeline).
    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout
    }

    /// Radians of orbit per pixel of drag.
    pub fn orbit_sensitivity(&self) -> f32 {
        self.orbit_sensitivity
    }

    /// Update the aspect ratio after a resize.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.camera.update_aspect(aspect(width, height));
    }

    /// Upload the current camera state.
    pub fn update_uniform(&self, queue: &wgpu::Queue) {
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[self.camera.uniform()]));
    }

    /// Apply camera settings.
    pub fn apply_config(&mut self, config: &CameraConfig) {
        apply_camera_config(&mut self.camera, config);
        self.orbit_sensitivity = config.orbit_sensitivity;
    }
}

fn apply_camera_config(camera: &mut Camera, config: &CameraConfig) {
    camera.set_fov_degrees(config.fov_degrees);
    camera.set_clip_planes(config.near_plane, config.far_plane);
    camera.pan_scale = config.pan_sensitivity;
    camera.zoom_scale = config.zoom_sensitivity;
}

fn aspect(width: u32, height: u32) -> f32 {
    width.max(1) as f32 / height.max(1) as f32
}
