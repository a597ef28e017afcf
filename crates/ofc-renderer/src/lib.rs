//! wgpu renderer for the OpenFusionCAD viewport
//!
//! Draws a ground grid and the tessellated bodies produced by `ofc-cad`
//! with a single directional light, into an offscreen texture that the
//! frontend hands to egui.

pub mod camera;
pub mod config;
pub mod constants;
pub mod pipeline;
pub mod renderer;
pub mod scene;
pub mod sub_renderers;
pub mod vertex;

pub use camera::{Camera, CameraUniform};
pub use config::{
    CameraConfig, ColorScheme, GridConfig, LightingConfig, RendererConfig, ViewportConfig,
};
pub use renderer::{BodyManager, BodyMesh, CameraController, LightingSystem, MeshEntry, Renderer};
pub use scene::BoundingBox;
pub use vertex::{MeshVertex, PositionColorVertex};
