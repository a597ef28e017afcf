//! Truck CAD Kernel Backend
//!
//! Pure Rust B-Rep kernel using the Truck library.
//!
//! Profiles become planar faces, which are then swept by `tsweep` (extrude,
//! sweep) or `rsweep` (revolve). Tessellation goes through truck-meshalgo.

use glam::{Vec2, Vec3};
use parking_lot::Mutex;
use std::collections::HashMap;
use uuid::Uuid;

use truck_meshalgo::prelude::*;
use truck_meshalgo::tessellation::MeshableShape;
use truck_modeling::{
    Face, InnerSpace, Point3, Rad, Shell, Solid as TruckSolid, Vector3, Vertex, Wire, builder,
};
use truck_polymesh::PolygonMesh;
use truck_topology::shell::ShellCondition;

use super::{Axis3D, CadError, CadKernel, CadResult, Solid, TessellatedMesh};
use crate::sketch::{Profile, ProfileShape, SketchPlane};

/// Points closer than this are treated as the same path point
const PATH_EPSILON: f32 = 1e-6;

/// Truck-based CAD kernel
pub struct TruckKernel {
    /// Storage for solid data (keyed by UUID)
    solids: Mutex<HashMap<Uuid, TruckSolid>>,
}

impl TruckKernel {
    /// Create a new Truck kernel
    pub fn new() -> Self {
        Self {
            solids: Mutex::new(HashMap::new()),
        }
    }

    /// Store a solid and return its handle
    fn store_solid(&self, solid: TruckSolid) -> Solid {
        let handle = Solid::new();
        self.solids.lock().insert(handle.id, solid);
        handle
    }

    /// Get a stored solid by ID
    fn get_solid(&self, id: Uuid) -> Option<TruckSolid> {
        self.solids.lock().get(&id).cloned()
    }

    /// Build the closed wire of a profile shape on a plane
    fn create_wire(&self, shape: &ProfileShape, plane: &SketchPlane) -> Wire {
        match *shape {
            ProfileShape::Rectangle { .. } => {
                let vertices: Vec<Vertex> = shape
                    .outline(0)
                    .into_iter()
                    .map(|p| builder::vertex(to_point(plane.to_world(p))))
                    .collect();

                // Create edges between consecutive vertices
                let n = vertices.len();
                let edges: Vec<_> = (0..n)
                    .map(|i| builder::line(&vertices[i], &vertices[(i + 1) % n]))
                    .collect();

                edges.into()
            }
            ProfileShape::Circle { radius } => {
                let start = builder::vertex(to_point(plane.to_world(Vec2::new(radius, 0.0))));
                builder::rsweep(
                    &start,
                    to_point(plane.origin),
                    to_vector(plane.normal),
                    Rad(std::f64::consts::TAU),
                )
            }
        }
    }

    /// Build the planar face of a profile shape
    fn create_face(&self, shape: &ProfileShape, plane: &SketchPlane) -> CadResult<Face> {
        shape.validate()?;
        let wire = self.create_wire(shape, plane);
        builder::try_attach_plane(&[wire])
            .map_err(|e| CadError::OperationFailed(format!("Failed to create face: {:?}", e)))
    }
}

impl Default for TruckKernel {
    fn default() -> Self {
        Self::new()
    }
}

impl CadKernel for TruckKernel {
    fn name(&self) -> &str {
        "truck"
    }

    fn is_available(&self) -> bool {
        true
    }

    fn extrude(&self, profile: &Profile, direction: Vec3, distance: f32) -> CadResult<Solid> {
        if !direction.is_finite() || direction.length() < PATH_EPSILON {
            return Err(CadError::InvalidParameter(
                "Extrusion direction must be non-zero".into(),
            ));
        }
        if !distance.is_finite() || distance <= 0.0 {
            return Err(CadError::InvalidParameter(format!(
                "Extrusion distance must be positive, got {}",
                distance
            )));
        }

        let mut face = self.create_face(&profile.shape, &profile.plane)?;
        let offset = direction.normalize() * distance;

        // Keep the bottom face pointing away from the extrusion
        if offset.dot(profile.plane.normal) < 0.0 {
            face.invert();
        }

        let solid = builder::tsweep(&face, to_vector(offset));
        tracing::debug!("truck: extruded {}", profile.shape.describe());

        Ok(self.store_solid(solid))
    }

    fn revolve(&self, profile: &Profile, axis: &Axis3D, angle: f32) -> CadResult<Solid> {
        if !angle.is_finite() || angle <= 0.0 {
            return Err(CadError::InvalidParameter(format!(
                "Revolve angle must be positive, got {}",
                angle
            )));
        }
        if !axis.direction.is_finite() || axis.direction.length() < 0.5 {
            return Err(CadError::InvalidParameter(
                "Revolve axis direction must be non-zero".into(),
            ));
        }

        let angle = angle.min(std::f32::consts::TAU);
        let face = self.create_face(&profile.shape, &profile.plane)?;

        let solid = builder::rsweep(
            &face,
            to_point(axis.origin),
            to_vector(axis.direction),
            Rad(angle as f64),
        );
        tracing::debug!(
            "truck: revolved {} by {:.1} deg",
            profile.shape.describe(),
            angle.to_degrees()
        );

        Ok(self.store_solid(solid))
    }

    fn sweep(&self, profile: &ProfileShape, path: &[Vec3]) -> CadResult<Solid> {
        if path.iter().any(|p| !p.is_finite()) {
            return Err(CadError::InvalidParameter(
                "Sweep path contains non-finite points".into(),
            ));
        }

        let mut points: Vec<Vec3> = Vec::with_capacity(path.len());
        for &p in path {
            if points
                .last()
                .is_none_or(|last: &Vec3| last.distance(p) > PATH_EPSILON)
            {
                points.push(p);
            }
        }
        if points.len() < 2 {
            return Err(CadError::InvalidParameter(
                "Sweep path needs at least two distinct points".into(),
            ));
        }

        let mut shells: Vec<Shell> = Vec::with_capacity(points.len() - 1);
        for segment in points.windows(2) {
            let (start, end) = (segment[0], segment[1]);
            let plane = SketchPlane::perpendicular_to(start, end - start);
            let face = self.create_face(profile, &plane)?;
            let piece = builder::tsweep(&face, to_vector(end - start));

            for shell in piece.into_boundaries() {
                if shell.shell_condition() != ShellCondition::Closed {
                    return Err(CadError::OperationFailed(
                        "Sweep segment did not produce a closed shell".into(),
                    ));
                }
                shells.push(shell);
            }
        }

        let solid = TruckSolid::try_new(shells)
            .map_err(|e| CadError::OperationFailed(format!("Failed to build sweep: {:?}", e)))?;
        tracing::debug!(
            "truck: swept {} along {} segment(s)",
            profile.describe(),
            points.len() - 1
        );

        Ok(self.store_solid(solid))
    }

    fn tessellate(&self, solid: &Solid, tolerance: f32) -> CadResult<TessellatedMesh> {
        if !tolerance.is_finite() || tolerance <= 0.0 {
            return Err(CadError::InvalidParameter(format!(
                "Tessellation tolerance must be positive, got {}",
                tolerance
            )));
        }

        let truck_solid = self
            .get_solid(solid.id)
            .ok_or(CadError::SolidNotFound(solid.id))?;
        let meshed = truck_solid.triangulation(tolerance as f64);

        let mut mesh = TessellatedMesh::new();
        for shell in meshed.boundaries().iter() {
            for face in shell.face_iter() {
                let maybe_mesh: Option<PolygonMesh> = face.surface();
                let Some(mut face_mesh) = maybe_mesh else {
                    continue;
                };
                if !face.orientation() {
                    face_mesh.invert();
                }
                append_polygon(&mut mesh, &face_mesh);
            }
        }

        if mesh.is_empty() {
            return Err(CadError::TessellationFailed(
                "Kernel produced no triangles".into(),
            ));
        }

        Ok(mesh)
    }

    fn release(&self, solid: &Solid) {
        self.solids.lock().remove(&solid.id);
    }

    fn solid_count(&self) -> usize {
        self.solids.lock().len()
    }
}

/// Append a face mesh as a flat triangle list with per-corner normals
fn append_polygon(mesh: &mut TessellatedMesh, polygon: &PolygonMesh) {
    let positions = polygon.positions();
    let normals = polygon.normals();

    for tri in polygon.tri_faces() {
        let corners = tri.map(|v| positions[v.pos]);
        let cross = (corners[1] - corners[0]).cross(corners[2] - corners[0]);
        let face_normal = if cross.magnitude2() > 1e-20 {
            cross.normalize()
        } else {
            Vector3::unit_z()
        };

        for (v, p) in tri.iter().zip(corners) {
            let n = v
                .nor
                .and_then(|i| <[Vector3]>::get(normals, i).copied())
                .unwrap_or(face_normal);
            mesh.indices.push(mesh.vertices.len() as u32);
            mesh.vertices.push([p.x as f32, p.y as f32, p.z as f32]);
            mesh.normals.push([n.x as f32, n.y as f32, n.z as f32]);
        }
    }
}

fn to_point(v: Vec3) -> Point3 {
    Point3::new(v.x as f64, v.y as f64, v.z as f64)
}

fn to_vector(v: Vec3) -> Vector3 {
    Vector3::new(v.x as f64, v.y as f64, v.z as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sketch::{make_circle_sketch, make_rectangle_sketch};
    use approx::assert_relative_eq;

    fn assert_closed(kernel: &TruckKernel, solid: &Solid) {
        let truck_solid = kernel.get_solid(solid.id).unwrap();
        for shell in truck_solid.boundaries() {
            assert_eq!(shell.shell_condition(), ShellCondition::Closed);
        }
    }

    #[test]
    fn test_extrude_rectangle() {
        let kernel = TruckKernel::new();
        let profile = make_rectangle_sketch(60.0, 40.0).unwrap();
        let solid = kernel.extrude(&profile, Vec3::Z, 30.0).unwrap();

        assert_eq!(kernel.solid_count(), 1);
        assert_closed(&kernel, &solid);

        let truck_solid = kernel.get_solid(solid.id).unwrap();
        assert_eq!(truck_solid.boundaries()[0].face_iter().count(), 6);

        let mesh = kernel.tessellate(&solid, 0.5).unwrap();
        assert!(!mesh.is_empty());
        assert_eq!(mesh.vertices.len(), mesh.normals.len());

        let (min, max) = mesh.bounds().unwrap();
        assert_relative_eq!(min.x, 0.0, epsilon = 1e-3);
        assert_relative_eq!(min.y, 0.0, epsilon = 1e-3);
        assert_relative_eq!(min.z, 0.0, epsilon = 1e-3);
        assert_relative_eq!(max.x, 60.0, epsilon = 1e-3);
        assert_relative_eq!(max.y, 40.0, epsilon = 1e-3);
        assert_relative_eq!(max.z, 30.0, epsilon = 1e-3);
    }

    #[test]
    fn test_extrude_circle() {
        let kernel = TruckKernel::new();
        let profile = make_circle_sketch(25.0).unwrap();
        let solid = kernel.extrude(&profile, Vec3::Z, 30.0).unwrap();
        assert_closed(&kernel, &solid);

        let mesh = kernel.tessellate(&solid, 0.1).unwrap();
        let (min, max) = mesh.bounds().unwrap();
        assert_relative_eq!(min.x, -25.0, epsilon = 0.5);
        assert_relative_eq!(max.y, 25.0, epsilon = 0.5);
        assert_relative_eq!(max.z, 30.0, epsilon = 1e-3);
    }

    #[test]
    fn test_extrude_rejects_bad_parameters() {
        let kernel = TruckKernel::new();
        let profile = make_rectangle_sketch(10.0, 10.0).unwrap();

        assert!(matches!(
            kernel.extrude(&profile, Vec3::ZERO, 10.0),
            Err(CadError::InvalidParameter(_))
        ));
        assert!(matches!(
            kernel.extrude(&profile, Vec3::Z, 0.0),
            Err(CadError::InvalidParameter(_))
        ));
        assert_eq!(kernel.solid_count(), 0);
    }

    #[test]
    fn test_revolve_offset_profile() {
        let kernel = TruckKernel::new();
        let profile = make_rectangle_sketch(10.0, 20.0).unwrap();
        let axis = Axis3D::new(Vec3::new(-5.0, 0.0, 0.0), Vec3::Y);
        let solid = kernel
            .revolve(&profile, &axis, std::f32::consts::TAU)
            .unwrap();
        assert_closed(&kernel, &solid);

        let mesh = kernel.tessellate(&solid, 0.5).unwrap();
        let (min, max) = mesh.bounds().unwrap();
        // Outer radius 15 around x = -5
        assert_relative_eq!(max.x, 10.0, epsilon = 0.5);
        assert_relative_eq!(min.x, -20.0, epsilon = 0.5);
        assert_relative_eq!(max.y, 20.0, epsilon = 1e-3);
    }

    #[test]
    fn test_revolve_about_profile_edge() {
        let kernel = TruckKernel::new();
        let profile = make_rectangle_sketch(60.0, 40.0).unwrap();
        let solid = kernel
            .revolve(&profile, &Axis3D::y(), std::f32::consts::TAU)
            .unwrap();

        let mesh = kernel.tessellate(&solid, 0.5).unwrap();
        let (min, max) = mesh.bounds().unwrap();
        assert_relative_eq!(min.x, -60.0, epsilon = 0.5);
        assert_relative_eq!(max.x, 60.0, epsilon = 0.5);
        assert_relative_eq!(min.y, 0.0, epsilon = 1e-3);
        assert_relative_eq!(max.y, 40.0, epsilon = 1e-3);
    }

    #[test]
    fn test_revolve_clamps_to_full_turn() {
        let kernel = TruckKernel::new();
        let profile = make_rectangle_sketch(10.0, 20.0).unwrap();
        let axis = Axis3D::new(Vec3::new(-5.0, 0.0, 0.0), Vec3::Y);

        let full = kernel
            .revolve(&profile, &axis, std::f32::consts::TAU)
            .unwrap();
        let over = kernel.revolve(&profile, &axis, 10.0).unwrap();

        let (full_min, full_max) = kernel.tessellate(&full, 0.5).unwrap().bounds().unwrap();
        let (over_min, over_max) = kernel.tessellate(&over, 0.5).unwrap().bounds().unwrap();
        assert!(full_min.abs_diff_eq(over_min, 1e-3));
        assert!(full_max.abs_diff_eq(over_max, 1e-3));
    }

    #[test]
    fn test_tessellated_normals_are_unit() {
        let kernel = TruckKernel::new();
        let profile = make_circle_sketch(25.0).unwrap();
        let solid = kernel.extrude(&profile, Vec3::Z, 30.0).unwrap();

        let mesh = kernel.tessellate(&solid, 0.5).unwrap();
        assert_eq!(mesh.vertices.len(), mesh.normals.len());
        for n in &mesh.normals {
            assert_relative_eq!(Vec3::from(*n).length(), 1.0, epsilon = 1e-3);
        }
    }

    #[test]
    fn test_revolve_rejects_non_positive_angle() {
        let kernel = TruckKernel::new();
        let profile = make_rectangle_sketch(10.0, 10.0).unwrap();
        assert!(matches!(
            kernel.revolve(&profile, &Axis3D::y(), 0.0),
            Err(CadError::InvalidParameter(_))
        ));
        assert!(matches!(
            kernel.revolve(&profile, &Axis3D::y(), -1.0),
            Err(CadError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_sweep_straight_path() {
        let kernel = TruckKernel::new();
        let shape = ProfileShape::Circle { radius: 5.0 };
        let solid = kernel
            .sweep(&shape, &[Vec3::ZERO, Vec3::new(0.0, 100.0, 0.0)])
            .unwrap();
        assert_closed(&kernel, &solid);

        let mesh = kernel.tessellate(&solid, 0.1).unwrap();
        let (min, max) = mesh.bounds().unwrap();
        assert_relative_eq!(min.y, 0.0, epsilon = 1e-3);
        assert_relative_eq!(max.y, 100.0, epsilon = 1e-3);
        assert_relative_eq!(max.x, 5.0, epsilon = 0.2);
        assert_relative_eq!(max.z, 5.0, epsilon = 0.2);
    }

    #[test]
    fn test_sweep_polyline_path() {
        let kernel = TruckKernel::new();
        let shape = ProfileShape::Rectangle {
            width: 2.0,
            height: 2.0,
        };
        let path = [
            Vec3::ZERO,
            Vec3::new(0.0, 0.0, 10.0),
            Vec3::new(0.0, 0.0, 10.0),
            Vec3::new(10.0, 0.0, 10.0),
        ];
        let solid = kernel.sweep(&shape, &path).unwrap();

        let truck_solid = kernel.get_solid(solid.id).unwrap();
        assert_eq!(truck_solid.boundaries().len(), 2);
    }

    #[test]
    fn test_sweep_rejects_degenerate_path() {
        let kernel = TruckKernel::new();
        let shape = ProfileShape::Circle { radius: 5.0 };
        assert!(matches!(
            kernel.sweep(&shape, &[Vec3::ONE, Vec3::ONE]),
            Err(CadError::InvalidParameter(_))
        ));
        assert!(matches!(
            kernel.sweep(&shape, &[Vec3::ZERO]),
            Err(CadError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_tessellate_released_solid() {
        let kernel = TruckKernel::new();
        let profile = make_rectangle_sketch(10.0, 10.0).unwrap();
        let solid = kernel.extrude(&profile, Vec3::Z, 10.0).unwrap();

        kernel.release(&solid);
        assert_eq!(kernel.solid_count(), 0);
        assert!(matches!(
            kernel.tessellate(&solid, 0.5),
            Err(CadError::SolidNotFound(id)) if id == solid.id
        ));
    }
}
