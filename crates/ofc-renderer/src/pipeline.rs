//! Pipeline and uniform helpers shared by the sub-renderers

use crate::constants::viewport::DEPTH_FORMAT;

/// Attachments of the offscreen viewport every pipeline draws into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportTargets {
    /// Color attachment format (the egui texture format).
    pub color: wgpu::TextureFormat,
    /// Depth attachment format.
    pub depth: wgpu::TextureFormat,
    /// MSAA sample count, 1 when disabled.
    pub sample_count: u32,
}

impl ViewportTargets {
    /// Targets for a color format with the standard depth format.
    pub fn new(color: wgpu::TextureFormat, sample_count: u32) -> Self {
        Self {
            color,
            depth: DEPTH_FORMAT,
            sample_count: sample_count.max(1),
        }
    }

    /// Whether a resolve target is needed.
    pub fn is_multisampled(&self) -> bool {
        self.sample_count > 1
    }
}

/// Kind of geometry a pipeline rasterizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    /// Line list with alpha blending (grid, faded with distance).
    Lines,
    /// Opaque triangle list drawn from both sides (solid bodies).
    Surfaces,
}

impl Primitive {
    fn topology(self) -> wgpu::PrimitiveTopology {
        match self {
            Primitive::Lines => wgpu::PrimitiveTopology::LineList,
            Primitive::Surfaces => wgpu::PrimitiveTopology::TriangleList,
        }
    }

    fn blend(self) -> wgpu::BlendState {
        match self {
            Primitive::Lines => wgpu::BlendState::ALPHA_BLENDING,
            Primitive::Surfaces => wgpu::BlendState::REPLACE,
        }
    }
}

/// Build a `vs_main`/`fs_main` pipeline from WGSL source.
pub fn build_pipeline(
    device: &wgpu::Device,
    targets: &ViewportTargets,
    label: &str,
    shader_source: &str,
    bind_group_layouts: &[&wgpu::BindGroupLayout],
    vertex_layout: wgpu::VertexBufferLayout<'_>,
    primitive: Primitive,
) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some(&format!("{label} Shader")),
        source: wgpu::ShaderSource::Wgsl(shader_source.into()),
    });

    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some(&format!("{label} Pipeline Layout")),
        bind_group_layouts,
        push_constant_ranges: &[],
    });

    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(&format!("{label} Pipeline")),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            buffers: &[vertex_layout],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format: targets.color,
                blend: Some(primitive.blend()),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        // Swept faces may come out with either winding, so nothing is culled
        primitive: wgpu::PrimitiveState {
            topology: primitive.topology(),
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: targets.depth,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: Default::default(),
            bias: Default::default(),
        }),
        multisample: wgpu::MultisampleState {
            count: targets.sample_count,
            ..Default::default()
        },
        multiview: None,
        cache: None,
    })
}

/// Layout with one uniform buffer at binding 0.
pub fn uniform_layout(
    device: &wgpu::Device,
    visibility: wgpu::ShaderStages,
    label: &str,
) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some(&format!("{label} Bind Group Layout")),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
    })
}

/// Bind a whole uniform buffer to a [`uniform_layout`] layout.
pub fn uniform_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    buffer: &wgpu::Buffer,
    label: &str,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(&format!("{label} Bind Group")),
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: buffer.as_entire_binding(),
        }],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_targets_sample_count() {
        let targets = ViewportTargets::new(wgpu::TextureFormat::Bgra8UnormSrgb, 0);
        assert_eq!(targets.sample_count, 1);
        assert!(!targets.is_multisampled());
        assert_eq!(targets.depth, DEPTH_FORMAT);

        let targets = ViewportTargets::new(wgpu::TextureFormat::Bgra8UnormSrgb, 4);
        assert!(targets.is_multisampled());
    }

    #[test]
    fn test_primitive_state() {
        assert_eq!(Primitive::Lines.topology(), wgpu::PrimitiveTopology::LineList);
        assert_eq!(Primitive::Surfaces.blend(), wgpu::BlendState::REPLACE);
    }
}
