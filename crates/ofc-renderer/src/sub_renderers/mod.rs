//! Sub-renderers drawn by the main pass

mod grid;
mod mesh;

pub use grid::{GridRenderer, generate_grid_vertices};
pub use mesh::{MeshData, MeshInstance, MeshRenderer, build_vertices};
