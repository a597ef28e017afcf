//! Main renderer combining all sub-renderers.
//!
//! The renderer is composed of several specialized components:
//! - [`CameraController`]: Camera and its uniform buffer
//! - [`LightingSystem`]: Directional light uniform
//! - [`BodyManager`]: Modeled body meshes keyed by solid ID

mod body_manager;
mod camera_controller;
mod gpu_resources;
mod lighting_system;
mod render_pass;

pub use body_manager::{BodyManager, BodyMesh};
pub use camera_controller::CameraController;
pub use lighting_system::{LightUniform, LightingSystem};

use glam::Mat4;
use uuid::Uuid;

use crate::camera::Camera;
use crate::config::{CameraConfig, GridConfig, LightingConfig, RendererConfig, ViewportConfig};
use crate::pipeline::ViewportTargets;
use crate::scene::BoundingBox;
use crate::sub_renderers::{GridRenderer, MeshData, MeshRenderer};

use render_pass::{MainPassParams, render_main_pass};

/// Mesh entry with bind group.
pub struct MeshEntry {
    /// Mesh data including vertex buffer and instance data.
    pub data: MeshData,
    /// Bind group for instance-specific uniforms.
    pub bind_group: wgpu::BindGroup,
}

/// Main renderer for the modeling viewport.
pub struct Renderer {
    camera_controller: CameraController,
    lighting_system: LightingSystem,
    body_manager: BodyManager,

    #[allow(dead_code)] // Held for GPU resource lifetime
    depth_texture: wgpu::Texture,
    depth_view: wgpu::TextureView,
    #[allow(dead_code)] // Held for GPU resource lifetime
    msaa_texture: Option<wgpu::Texture>,
    msaa_view: Option<wgpu::TextureView>,

    grid_renderer: GridRenderer,
    mesh_renderer: MeshRenderer,

    show_grid: bool,
    clear_color: wgpu::Color,
    targets: ViewportTargets,
    width: u32,
    height: u32,
}

impl Renderer {
    /// Creates a new renderer for the given target format and size.
    pub fn new(
        device: &wgpu::Device,
        format: wgpu::TextureFormat,
        width: u32,
        height: u32,
        config: &RendererConfig,
    ) -> Self {
        let targets = ViewportTargets::new(format, config.viewport.effective_sample_count());
        let camera_controller = CameraController::new(device, width, height, &config.camera);

        let (depth_texture, depth_view) =
            gpu_resources::create_depth_texture(device, &targets, width, height);
        let (msaa_texture, msaa_view) =
            gpu_resources::create_msaa_texture(device, &targets, width, height).unzip();

        let grid_renderer = GridRenderer::new(
            device,
            &targets,
            camera_controller.bind_group_layout(),
            camera_controller.buffer(),
            &config.grid,
        );
        let mesh_renderer = MeshRenderer::new(
            device,
            &targets,
            camera_controller.bind_group_layout(),
            camera_controller.buffer(),
        );
        let lighting_system = LightingSystem::new(device, &mesh_renderer, &config.lighting);

        tracing::info!(
            "Renderer created: {}x{}, format {:?}, {}x MSAA",
            width,
            height,
            format,
            targets.sample_count
        );

        Self {
            camera_controller,
            lighting_system,
            body_manager: BodyManager::new(),
            depth_texture,
            depth_view,
            msaa_texture,
            msaa_view,
            grid_renderer,
            mesh_renderer,
            show_grid: config.grid.enabled,
            clear_color: config.viewport.clear_color(),
            targets,
            width,
            height,
        }
    }

    /// Resize render targets. Zero sizes are ignored.
    pub fn resize(&mut self, device: &wgpu::Device, width: u32, height: u32) {
        if width == 0 || height == 0 || (width == self.width && height == self.height) {
            return;
        }
        self.width = width;
        self.height = height;
        self.camera_controller.resize(width, height);

        let (depth_texture, depth_view) =
            gpu_resources::create_depth_texture(device, &self.targets, width, height);
        self.depth_texture = depth_texture;
        self.depth_view = depth_view;

        let (msaa_texture, msaa_view) =
            gpu_resources::create_msaa_texture(device, &self.targets, width, height).unzip();
        self.msaa_texture = msaa_texture;
        self.msaa_view = msaa_view;
    }

    /// Record the frame into `encoder`, targeting `view`.
    pub fn render(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        queue: &wgpu::Queue,
    ) {
        self.camera_controller.update_uniform(queue);

        let params = MainPassParams {
            show_grid: self.show_grid,
            lighting: &self.lighting_system,
            bodies: &self.body_manager,
            grid_renderer: &self.grid_renderer,
            mesh_renderer: &self.mesh_renderer,
            depth_view: &self.depth_view,
            msaa_view: self.msaa_view.as_ref(),
            clear_color: self.clear_color,
        };
        render_main_pass(encoder, view, &params);
    }

    // ========== Bodies ==========

    /// Upload a tessellated body, replacing any body with the same ID.
    pub fn add_body(
        &mut self,
        device: &wgpu::Device,
        id: Uuid,
        mesh: BodyMesh<'_>,
        transform: Mat4,
        color: [f32; 4],
    ) {
        self.body_manager
            .add(device, &self.mesh_renderer, id, mesh, transform, color);
    }

    /// Remove every body.
    pub fn clear_bodies(&mut self) {
        self.body_manager.clear();
    }

    /// Number of loaded bodies.
    pub fn body_count(&self) -> usize {
        self.body_manager.len()
    }

    /// Bounds of all loaded bodies.
    pub fn scene_bounds(&self) -> Option<BoundingBox> {
        self.body_manager.bounds()
    }

    /// Frame every loaded body. Returns false when there is nothing to frame.
    pub fn fit_all(&mut self) -> bool {
        match self.scene_bounds() {
            Some(bounds) => {
                self.camera_controller
                    .camera_mut()
                    .fit_all(bounds.center(), bounds.radius());
                true
            }
            None => false,
        }
    }

    // ========== Camera ==========

    /// Get the camera.
    pub fn camera(&self) -> &Camera {
        self.camera_controller.camera()
    }

    /// Get the camera mutably.
    pub fn camera_mut(&mut self) -> &mut Camera {
        self.camera_controller.camera_mut()
    }

    /// Orbit sensitivity in radians per pixel.
    pub fn orbit_sensitivity(&self) -> f32 {
        self.camera_controller.orbit_sensitivity()
    }

    // ========== Display ==========

    /// Whether the grid is drawn.
    pub fn show_grid(&self) -> bool {
        self.show_grid
    }

    /// Toggle the grid.
    pub fn set_show_grid(&mut self, show: bool) {
        self.show_grid = show;
    }

    /// Target texture format.
    pub fn format(&self) -> wgpu::TextureFormat {
        self.targets.color
    }

    // ========== Configuration ==========

    /// Apply a full renderer configuration.
    pub fn apply_config(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, config: &RendererConfig) {
        self.apply_grid_config(device, &config.grid);
        self.apply_viewport_config(&config.viewport);
        self.apply_lighting_config(queue, &config.lighting);
        self.apply_camera_config(&config.camera);
    }

    /// Apply grid settings.
    pub fn apply_grid_config(&mut self, device: &wgpu::Device, config: &GridConfig) {
        self.show_grid = config.enabled;
        self.grid_renderer.rebuild(device, config);
    }

    /// Apply viewport settings.
    ///
    /// The sample count is fixed at creation; a different value takes
    /// effect on the next start.
    pub fn apply_viewport_config(&mut self, config: &ViewportConfig) {
        self.clear_color = config.clear_color();
        if config.effective_sample_count() != self.targets.sample_count {
            tracing::info!("MSAA change will apply after restart");
        }
    }

    /// Apply lighting settings.
    pub fn apply_lighting_config(&mut self, queue: &wgpu::Queue, config: &LightingConfig) {
        self.lighting_system.apply_config(queue, config);
    }

    /// Apply camera settings.
    pub fn apply_camera_config(&mut self, config: &CameraConfig) {
        self.camera_controller.apply_config(config);
    }
}
