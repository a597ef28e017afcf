//! Offscreen attachments and shared layouts.

use crate::pipeline::{ViewportTargets, uniform_layout};

/// Depth attachment sized to the viewport.
pub fn create_depth_texture(
    device: &wgpu::Device,
    targets: &ViewportTargets,
    width: u32,
    height: u32,
) -> (wgpu::Texture, wgpu::TextureView) {
    attachment(device, "Depth Texture", targets.depth, targets, width, height)
}

/// Multisampled color attachment, `None` when MSAA is off.
pub fn create_msaa_texture(
    device: &wgpu::Device,
    targets: &ViewportTargets,
    width: u32,
    height: u32,
) -> Option<(wgpu::Texture, wgpu::TextureView)> {
    targets
        .is_multisampled()
        .then(|| attachment(device, "MSAA Texture", targets.color, targets, width, height))
}

fn attachment(
    device: &wgpu::Device,
    label: &str,
    format: wgpu::TextureFormat,
    targets: &ViewportTargets,
    width: u32,
    height: u32,
) -> (wgpu::Texture, wgpu::TextureView) {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: targets.sample_count,
        dimension: wgpu::TextureDimension::D2,
        format,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    (texture, view)
}

/// Camera uniform layout (group 0 of every pipeline).
pub fn create_camera_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    uniform_layout(device, wgpu::ShaderStages::VERTEX_FRAGMENT, "Camera")
}
