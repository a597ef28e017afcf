//! Lit mesh renderer for modeled bodies

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use wgpu::util::DeviceExt;

use crate::pipeline::{
    Primitive, ViewportTargets, build_pipeline, uniform_bind_group, uniform_layout,
};
use crate::scene::BoundingBox;
use crate::vertex::MeshVertex;

/// Per-body uniform data
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct MeshInstance {
    /// Model transformation matrix.
    pub model: [[f32; 4]; 4],
    /// Instance color (RGBA).
    pub color: [f32; 4],
}

impl MeshInstance {
    /// Create an instance.
    pub fn new(transform: Mat4, color: [f32; 4]) -> Self {
        Self {
            model: transform.to_cols_array_2d(),
            color,
        }
    }
}

/// Expand an indexed triangle mesh into one vertex per triangle corner.
///
/// Missing per-vertex normals fall back to the face normal. Out-of-range
/// indices and a trailing partial triangle are skipped. Vertex colors are
/// white; the body tint lives in [`MeshInstance::color`].
pub fn build_vertices(
    mesh_vertices: &[[f32; 3]],
    mesh_normals: &[[f32; 3]],
    mesh_indices: &[u32],
) -> Vec<MeshVertex> {
    let mut vertices = Vec::with_capacity(mesh_indices.len());

    for chunk in mesh_indices.chunks_exact(3) {
        let Some(corners) = chunk
            .iter()
            .map(|&i| mesh_vertices.get(i as usize).copied())
            .collect::<Option<Vec<_>>>()
        else {
            continue;
        };

        let [p0, p1, p2] = [corners[0], corners[1], corners[2]].map(Vec3::from);
        let face_normal = (p1 - p0).cross(p2 - p0).normalize_or_zero().to_array();

        for (&idx, &position) in chunk.iter().zip(&corners) {
            let normal = mesh_normals
                .get(idx as usize)
                .copied()
                .unwrap_or(face_normal);
            vertices.push(MeshVertex {
                position,
                normal,
                color: [1.0, 1.0, 1.0, 1.0],
            });
        }
    }

    vertices
}

/// GPU mesh data
pub struct MeshData {
    /// Vertex buffer containing the expanded triangles.
    pub vertex_buffer: wgpu::Buffer,
    /// Number of vertices to draw.
    pub vertex_count: u32,
    /// Instance data (transform, color).
    pub instance: MeshInstance,
    /// GPU buffer for instance data.
    pub instance_buffer: wgpu::Buffer,
    /// World-space bounds of the mesh.
    pub bounds: BoundingBox,
}

impl MeshData {
    /// Create mesh data from vertex/normal/index arrays
    pub fn from_arrays(
        device: &wgpu::Device,
        mesh_vertices: &[[f32; 3]],
        mesh_normals: &[[f32; 3]],
        mesh_indices: &[u32],
        transform: Mat4,
        color: [f32; 4],
    ) -> Self {
        let vertices = build_vertices(mesh_vertices, mesh_normals, mesh_indices);

        tracing::debug!(
            "MeshData created: {} input vertices, {} GPU vertices",
            mesh_vertices.len(),
            vertices.len()
        );

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Body Vertex Buffer"),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });

        let instance = MeshInstance::new(transform, color);
        let instance_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Body Instance Buffer"),
            contents: bytemuck::cast_slice(&[instance]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bounds = BoundingBox::from_points(vertices.iter().map(|v| Vec3::from(v.position)))
            .transform(&transform);

        Self {
            vertex_buffer,
            vertex_count: vertices.len() as u32,
            instance,
            instance_buffer,
            bounds,
        }
    }
}

/// Mesh renderer with a single directional light
pub struct MeshRenderer {
    pipeline: wgpu::RenderPipeline,
    camera_bind_group: wgpu::BindGroup,
    instance_bind_group_layout: wgpu::BindGroupLayout,
    light_bind_group_layout: wgpu::BindGroupLayout,
}

impl MeshRenderer {
    /// Creates a new mesh renderer.
    pub fn new(
        device: &wgpu::Device,
        targets: &ViewportTargets,
        camera_bind_group_layout: &wgpu::BindGroupLayout,
        camera_buffer: &wgpu::Buffer,
    ) -> Self {
        let camera_bind_group =
            uniform_bind_group(device, camera_bind_group_layout, camera_buffer, "Mesh Camera");

        let instance_bind_group_layout = uniform_layout(
            device,
            wgpu::ShaderStages::VERTEX_FRAGMENT,
            "Mesh Instance",
        );
        let light_bind_group_layout =
            uniform_layout(device, wgpu::ShaderStages::FRAGMENT, "Light");

        let pipeline = build_pipeline(
            device,
            targets,
            "Mesh",
            include_str!("../shaders/mesh.wgsl"),
            &[
                camera_bind_group_layout,
                &instance_bind_group_layout,
                &light_bind_group_layout,
            ],
            MeshVertex::layout(),
            Primitive::Surfaces,
        );

        Self {
            pipeline,
            camera_bind_group,
            instance_bind_group_layout,
            light_bind_group_layout,
        }
    }

    /// Layout for the light uniform (group 2).
    pub fn light_bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.light_bind_group_layout
    }

    /// Create the per-body bind group for an instance buffer.
    pub fn create_instance_bind_group(
        &self,
        device: &wgpu::Device,
        mesh: &MeshData,
    ) -> wgpu::BindGroup {
        uniform_bind_group(
            device,
            &self.instance_bind_group_layout,
            &mesh.instance_buffer,
            "Mesh Instance",
        )
    }

    /// Draw one body.
    pub fn render(
        &self,
        render_pass: &mut wgpu::RenderPass<'_>,
        mesh: &MeshData,
        instance_bind_group: &wgpu::BindGroup,
        light_bind_group: &wgpu::BindGroup,
    ) {
        if mesh.vertex_count == 0 {
            return;
        }
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
        render_pass.set_bind_group(1, instance_bind_group, &[]);
        render_pass.set_bind_group(2, light_bind_group, &[]);
        render_pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
        render_pass.draw(0..mesh.vertex_count, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUAD: [[f32; 3]; 4] = [
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [1.0, 1.0, 0.0],
        [0.0, 1.0, 0.0],
    ];

    #[test]
    fn test_build_vertices_expands_triangles() {
        let vertices = build_vertices(&QUAD, &[], &[0, 1, 2, 0, 2, 3]);
        assert_eq!(vertices.len(), 6);
        // Face normal fallback for a CCW quad on XY
        assert!(vertices.iter().all(|v| v.normal == [0.0, 0.0, 1.0]));
        assert_eq!(vertices[4].position, [1.0, 1.0, 0.0]);
    }

    #[test]
    fn test_build_vertices_prefers_vertex_normals() {
        let normals = [[0.0, 0.0, -1.0]; 4];
        let vertices = build_vertices(&QUAD, &normals, &[0, 1, 2]);
        assert!(vertices.iter().all(|v| v.normal == [0.0, 0.0, -1.0]));
    }

    #[test]
    fn test_build_vertices_skips_bad_triangles() {
        let vertices = build_vertices(&QUAD, &[], &[0, 1, 9, 0, 2, 3, 1]);
        assert_eq!(vertices.len(), 3);
    }

    #[test]
    fn test_instance_layout_matches_shader() {
        // mat4 + vec4, 16-byte aligned for the uniform
        assert_eq!(std::mem::size_of::<MeshInstance>(), 80);
    }
}
