//! The single main pass: clear, grid, bodies.

use crate::sub_renderers::{GridRenderer, MeshRenderer};

use super::{BodyManager, LightingSystem};

/// Everything the main pass reads.
pub struct MainPassParams<'a> {
    /// Draw the ground grid.
    pub show_grid: bool,
    /// Light bind group source.
    pub lighting: &'a LightingSystem,
    /// Bodies to draw.
    pub bodies: &'a BodyManager,
    /// Grid pipeline.
    pub grid_renderer: &'a GridRenderer,
    /// Body pipeline.
    pub mesh_renderer: &'a MeshRenderer,
    /// Depth attachment.
    pub depth_view: &'a wgpu::TextureView,
    /// Multisampled color attachment; `None` renders straight to the target.
    pub msaa_view: Option<&'a wgpu::TextureView>,
    /// Background.
    pub clear_color: wgpu::Color,
}

/// Record the main pass into `encoder`, resolving into `view` under MSAA.
pub fn render_main_pass(
    encoder: &mut wgpu::CommandEncoder,
    view: &wgpu::TextureView,
    params: &MainPassParams<'_>,
) {
    let color_attachment = wgpu::RenderPassColorAttachment {
        view: params.msaa_view.unwrap_or(view),
        resolve_target: params.msaa_view.map(|_| view),
        ops: wgpu::Operations {
            load: wgpu::LoadOp::Clear(params.clear_color),
            store: wgpu::StoreOp::Store,
        },
        depth_slice: None,
    };

    let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
        label: Some("Viewport Pass"),
        color_attachments: &[Some(color_attachment)],
        depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
            view: params.depth_view,
            depth_ops: Some(wgpu::Operations {
                load: wgpu::LoadOp::Clear(1.0),
                store: wgpu::StoreOp::Discard,
            }),
            stencil_ops: None,
        }),
        timestamp_writes: None,
        occlusion_query_set: None,
    });

    if params.show_grid {
        params.grid_renderer.render(&mut pass);
    }

    let light = params.lighting.light_bind_group();
    for body in params.bodies.iter() {
        params
            .mesh_renderer
            .render(&mut pass, &body.data, &body.bind_group, light);
    }
}
