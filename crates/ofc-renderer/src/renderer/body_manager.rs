//! Modeled body management.

use std::collections::HashMap;

use glam::Mat4;
use uuid::Uuid;

use crate::scene::BoundingBox;
use crate::sub_renderers::{MeshData, MeshRenderer};

use super::MeshEntry;

/// Tessellated geometry handed to the renderer.
pub struct BodyMesh<'a> {
    /// Vertex positions.
    pub vertices: &'a [[f32; 3]],
    /// Per-vertex normals (may be empty).
    pub normals: &'a [[f32; 3]],
    /// Triangle indices.
    pub indices: &'a [u32],
}

/// Manages body meshes keyed by solid ID.
#[derive(Default)]
pub struct BodyManager {
    bodies: HashMap<Uuid, MeshEntry>,
}

impl BodyManager {
    /// Create an empty manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Upload a body, replacing any existing body with the same ID.
    pub fn add(
        &mut self,
        device: &wgpu::Device,
        mesh_renderer: &MeshRenderer,
        id: Uuid,
        mesh: BodyMesh<'_>,
        transform: Mat4,
        color: [f32; 4],
    ) {
        let data = MeshData::from_arrays(
            device,
            mesh.vertices,
            mesh.normals,
            mesh.indices,
            transform,
            color,
        );
        let bind_group = mesh_renderer.create_instance_bind_group(device, &data);
        if self.bodies.insert(id, MeshEntry { data, bind_group }).is_some() {
            tracing::debug!("Replaced body {}", id);
        }
    }

    /// Remove every body.
    pub fn clear(&mut self) {
        self.bodies.clear();
    }

    /// Number of bodies.
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Returns true if no bodies are loaded.
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Iterate over loaded bodies.
    pub fn iter(&self) -> impl Iterator<Item = &MeshEntry> {
        self.bodies.values()
    }

    /// Combined bounds of every body, if any has geometry.
    pub fn bounds(&self) -> Option<BoundingBox> {
        self.bodies
            .values()
            .map(|entry| entry.data.bounds)
            .filter(BoundingBox::is_valid)
            .reduce(|acc, b| acc.union(&b))
    }
}
