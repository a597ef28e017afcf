//! Grid renderer

use wgpu::util::DeviceExt;

use crate::config::GridConfig;
use crate::pipeline::{Primitive, ViewportTargets, build_pipeline, uniform_bind_group};
use crate::vertex::PositionColorVertex;

/// Grid renderer for the XY ground plane.
pub struct GridRenderer {
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    vertex_count: u32,
    bind_group: wgpu::BindGroup,
}

impl GridRenderer {
    /// Creates a new grid renderer.
    pub fn new(
        device: &wgpu::Device,
        targets: &ViewportTargets,
        camera_bind_group_layout: &wgpu::BindGroupLayout,
        camera_buffer: &wgpu::Buffer,
        config: &GridConfig,
    ) -> Self {
        let pipeline = build_pipeline(
            device,
            targets,
            "Grid",
            include_str!("../shaders/grid.wgsl"),
            &[camera_bind_group_layout],
            PositionColorVertex::layout(),
            Primitive::Lines,
        );

        let vertices = generate_grid_vertices(config);
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Grid Vertex Buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let bind_group =
            uniform_bind_group(device, camera_bind_group_layout, camera_buffer, "Grid Camera");

        Self {
            pipeline,
            vertex_buffer,
            vertex_count: vertices.len() as u32,
            bind_group,
        }
    }

    /// Rebuild the grid geometry after a configuration change.
    pub fn rebuild(&mut self, device: &wgpu::Device, config: &GridConfig) {
        let vertices = generate_grid_vertices(config);
        self.vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Grid Vertex Buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        self.vertex_count = vertices.len() as u32;
    }

    /// Number of line vertices currently uploaded.
    pub fn vertex_count(&self) -> u32 {
        self.vertex_count
    }

    /// Draw the grid.
    pub fn render(&self, render_pass: &mut wgpu::RenderPass<'_>) {
        if self.vertex_count == 0 {
            return;
        }
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.bind_group, &[]);
        render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        render_pass.draw(0..self.vertex_count, 0..1);
    }
}

/// Generate line-list vertices for the grid described by `config`.
///
/// Lines through the origin use the axis colors.
pub fn generate_grid_vertices(config: &GridConfig) -> Vec<PositionColorVertex> {
    let size = config.size;
    let spacing = config.spacing;
    if !(size > 0.0 && spacing > 0.0 && size.is_finite() && spacing.is_finite()) {
        return Vec::new();
    }

    let half_count = (size / spacing).floor() as i32;
    let mut vertices = Vec::with_capacity(((half_count * 2 + 1) * 4) as usize);

    for i in -half_count..=half_count {
        let offset = i as f32 * spacing;

        // Line parallel to X
        let color = if i == 0 {
            config.x_axis_color
        } else {
            config.line_color
        };
        vertices.push(PositionColorVertex {
            position: [-size, offset, 0.0],
            color,
        });
        vertices.push(PositionColorVertex {
            position: [size, offset, 0.0],
            color,
        });

        // Line parallel to Y
        let color = if i == 0 {
            config.y_axis_color
        } else {
            config.line_color
        };
        vertices.push(PositionColorVertex {
            position: [offset, -size, 0.0],
            color,
        });
        vertices.push(PositionColorVertex {
            position: [offset, size, 0.0],
            color,
        });
    }

    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_vertex_count() {
        let config = GridConfig {
            size: 100.0,
            spacing: 10.0,
            ..GridConfig::default()
        };
        // 21 positions per direction, 2 lines each, 2 vertices per line
        assert_eq!(generate_grid_vertices(&config).len(), 21 * 4);
    }

    #[test]
    fn test_axis_lines_colored() {
        let config = GridConfig::default();
        let vertices = generate_grid_vertices(&config);

        let x_axis = vertices
            .iter()
            .filter(|v| v.position[1] == 0.0 && v.position[0].abs() == config.size)
            .all(|v| v.color == config.x_axis_color);
        assert!(x_axis);

        let y_axis = vertices
            .iter()
            .filter(|v| v.position[0] == 0.0 && v.position[1].abs() == config.size)
            .all(|v| v.color == config.y_axis_color);
        assert!(y_axis);
    }

    #[test]
    fn test_invalid_spacing_yields_no_lines() {
        let config = GridConfig {
            spacing: 0.0,
            ..GridConfig::default()
        };
        assert!(generate_grid_vertices(&config).is_empty());
    }
}
