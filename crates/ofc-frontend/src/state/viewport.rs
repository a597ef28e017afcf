//! Viewport rendering state

use std::sync::Arc;

use glam::Mat4;
use parking_lot::Mutex;
use uuid::Uuid;

use ofc_cad::TessellatedMesh;
use ofc_renderer::constants::body::SHAPE_COLOR;
use ofc_renderer::{BodyMesh, Renderer, RendererConfig};

/// Render texture for viewport
struct RenderTexture {
    #[allow(dead_code)]
    texture: wgpu::Texture,
    view: wgpu::TextureView,
    egui_texture_id: egui::TextureId,
    width: u32,
    height: u32,
}

/// Viewport rendering state
pub struct ViewportState {
    pub renderer: Renderer,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    render_texture: Option<RenderTexture>,
}

/// Viewport state shared between the app and action handlers
pub type SharedViewportState = Arc<Mutex<ViewportState>>;

impl ViewportState {
    /// Create a new viewport state
    pub fn new(
        device: wgpu::Device,
        queue: wgpu::Queue,
        format: wgpu::TextureFormat,
        config: &RendererConfig,
    ) -> Self {
        let renderer = Renderer::new(&device, format, 800, 600, config);
        Self {
            renderer,
            device,
            queue,
            render_texture: None,
        }
    }

    /// Ensure the render texture matches the requested size
    pub fn ensure_texture(
        &mut self,
        width: u32,
        height: u32,
        egui_renderer: &mut egui_wgpu::Renderer,
    ) -> egui::TextureId {
        let width = width.max(1);
        let height = height.max(1);

        if let Some(rt) = &self.render_texture
            && rt.width == width
            && rt.height == height
        {
            return rt.egui_texture_id;
        }

        if let Some(old) = self.render_texture.take() {
            egui_renderer.free_texture(&old.egui_texture_id);
        }

        let texture = self.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Viewport Render Texture"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: self.renderer.format(),
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        let egui_texture_id =
            egui_renderer.register_native_texture(&self.device, &view, wgpu::FilterMode::Linear);

        self.renderer.resize(&self.device, width, height);

        self.render_texture = Some(RenderTexture {
            texture,
            view,
            egui_texture_id,
            width,
            height,
        });
        egui_texture_id
    }

    /// Render the 3D scene to the texture
    pub fn render(&mut self) {
        let Some(ref rt) = self.render_texture else {
            return;
        };

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Viewport Render Encoder"),
            });

        self.renderer.render(&mut encoder, &rt.view, &self.queue);

        self.queue.submit(std::iter::once(encoder.finish()));
    }

    /// Replace whatever is displayed with `mesh` and frame it
    pub fn show_shape(&mut self, id: Uuid, mesh: &TessellatedMesh) {
        self.renderer.clear_bodies();
        self.renderer.add_body(
            &self.device,
            id,
            BodyMesh {
                vertices: &mesh.vertices,
                normals: &mesh.normals,
                indices: &mesh.indices,
            },
            Mat4::IDENTITY,
            SHAPE_COLOR,
        );
        self.renderer.fit_all();
        tracing::debug!(
            "Viewport shows {} triangles in {} body",
            mesh.triangle_count(),
            self.renderer.body_count()
        );
    }

    /// Empty the viewport
    pub fn clear_shapes(&mut self) {
        self.renderer.clear_bodies();
    }

    /// Frame the displayed shape
    pub fn fit_view(&mut self) {
        if !self.renderer.fit_all() {
            tracing::debug!("Nothing to frame");
        }
    }

    /// Push a renderer configuration to the GPU side
    pub fn apply_config(&mut self, config: &RendererConfig) {
        self.renderer.apply_config(&self.device, &self.queue, config);
    }
}
