//! Directional light for the renderer.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use wgpu::util::DeviceExt;

use crate::config::LightingConfig;
use crate::pipeline::uniform_bind_group;
use crate::sub_renderers::MeshRenderer;

/// Light uniform buffer data
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct LightUniform {
    /// Direction towards the light (w unused).
    pub direction: [f32; 4],
    /// Light color (rgb) and intensity (a).
    pub color: [f32; 4],
    /// Ambient color (rgb) and strength (a).
    pub ambient: [f32; 4],
}

impl LightUniform {
    /// Build uniform data from a lighting config.
    ///
    /// A zero or non-finite direction falls back to straight down the Z axis.
    pub fn from_config(config: &LightingConfig) -> Self {
        let dir = Vec3::from(config.direction);
        let dir = if dir.is_finite() {
            dir.try_normalize().unwrap_or(Vec3::Z)
        } else {
            Vec3::Z
        };
        let [r, g, b] = config.color;
        let [ar, ag, ab] = config.ambient_color;
        Self {
            direction: [dir.x, dir.y, dir.z, 0.0],
            color: [r, g, b, config.intensity.max(0.0)],
            ambient: [ar, ag, ab, config.ambient_strength.clamp(0.0, 1.0)],
        }
    }
}

/// Manages the light uniform and its bind group.
pub struct LightingSystem {
    uniform: LightUniform,
    light_buffer: wgpu::Buffer,
    light_bind_group: wgpu::BindGroup,
}

impl LightingSystem {
    /// Create a new lighting system.
    pub fn new(device: &wgpu::Device, mesh_renderer: &MeshRenderer, config: &LightingConfig) -> Self {
        let uniform = LightUniform::from_config(config);
        let light_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Light Buffer"),
            contents: bytemuck::cast_slice(&[uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let light_bind_group = uniform_bind_group(
            device,
            mesh_renderer.light_bind_group_layout(),
            &light_buffer,
            "Light",
        );

        Self {
            uniform,
            light_buffer,
            light_bind_group,
        }
    }

    /// Current uniform values.
    pub fn uniform(&self) -> &LightUniform {
        &self.uniform
    }

    /// Bind group for the main pass.
    pub fn light_bind_group(&self) -> &wgpu::BindGroup {
        &self.light_bind_group
    }

    /// Upload a new lighting configuration.
    pub fn apply_config(&mut self, queue: &wgpu::Queue, config: &LightingConfig) {
        self.uniform = LightUniform::from_config(config);
        queue.write_buffer(&self.light_buffer, 0, bytemuck::cast_slice(&[self.uniform]));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_uniform_normalizes_direction() {
        let uniform = LightUniform::from_config(&LightingConfig {
            direction: [0.0, 3.0, 4.0],
            ..LightingConfig::default()
        });
        assert_relative_eq!(uniform.direction[1], 0.6);
        assert_relative_eq!(uniform.direction[2], 0.8);
    }

    #[test]
    fn test_uniform_degenerate_direction() {
        let uniform = LightUniform::from_config(&LightingConfig {
            direction: [0.0, 0.0, 0.0],
            ambient_strength: 4.0,
            ..LightingConfig::default()
        });
        assert_eq!(uniform.direction, [0.0, 0.0, 1.0, 0.0]);
        assert_eq!(uniform.ambient[3], 1.0);
    }
}
