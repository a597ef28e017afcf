//! Vertex formats shared by the sub-renderers

use bytemuck::{Pod, Zeroable};

/// Grid line vertex.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct PositionColorVertex {
    /// World position.
    pub position: [f32; 3],
    /// RGB color.
    pub color: [f32; 3],
}

impl PositionColorVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

    /// Buffer layout matching `grid.wgsl`.
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Body vertex. Triangles are expanded, so every corner carries its own normal.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    /// Position in body space.
    pub position: [f32; 3],
    /// Unit normal.
    pub normal: [f32; 3],
    /// RGBA color, multiplied with the instance tint.
    pub color: [f32; 4],
}

impl MeshVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x4];

    /// Buffer layout matching `mesh.wgsl`.
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strides() {
        assert_eq!(PositionColorVertex::layout().array_stride, 24);
        assert_eq!(MeshVertex::layout().array_stride, 40);
        assert_eq!(MeshVertex::layout().attributes[2].offset, 24);
    }
}
