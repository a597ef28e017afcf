//! Kernel interface
//!
//! The editor never touches B-Rep data directly: it asks the kernel for a
//! solid, gets a [`Solid`] handle back, and later asks for triangles.

use glam::Vec3;
use thiserror::Error;
use uuid::Uuid;

use crate::sketch::{Profile, ProfileShape};

/// Error type for CAD kernel operations
#[derive(Debug, Clone, Error)]
pub enum CadError {
    #[error("Invalid profile: {0}")]
    InvalidProfile(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Operation failed: {0}")]
    OperationFailed(String),

    #[error("Tessellation failed: {0}")]
    TessellationFailed(String),

    #[error("Solid not found: {0}")]
    SolidNotFound(Uuid),

    #[error("Kernel not available: {0}")]
    KernelNotAvailable(String),

    #[error("File I/O error: {0}")]
    FileIo(String),

    #[error("STL export failed: {0}")]
    StlExport(String),
}

/// Result type for CAD operations
pub type CadResult<T> = Result<T, CadError>;

/// Triangle soup produced by [`CadKernel::tessellate`]
///
/// `vertices` and `normals` run in parallel; `indices` holds three entries
/// per triangle.
#[derive(Debug, Clone, Default)]
pub struct TessellatedMesh {
    pub vertices: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

impl TessellatedMesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Axis-aligned bounds as (min, max), `None` for an empty mesh
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let mut points = self.vertices.iter().copied().map(Vec3::from);
        let first = points.next()?;
        Some(points.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p))))
    }

    /// Triangles as corner positions; triangles with a bad index are skipped
    pub fn triangles(&self) -> impl Iterator<Item = [Vec3; 3]> + '_ {
        let corner = |i: u32| self.vertices.get(i as usize).copied().map(Vec3::from);
        self.indices
            .chunks_exact(3)
            .filter_map(move |t| Some([corner(t[0])?, corner(t[1])?, corner(t[2])?]))
    }
}

/// Handle to a solid owned by a kernel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Solid {
    pub id: Uuid,
}

impl Solid {
    /// Handle with a fresh ID
    pub fn new() -> Self {
        Self { id: Uuid::new_v4() }
    }
}

impl Default for Solid {
    fn default() -> Self {
        Self::new()
    }
}

/// Rotation axis for revolve
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Axis3D {
    pub origin: Vec3,
    /// Unit direction
    pub direction: Vec3,
}

impl Axis3D {
    /// Axis through `origin`; `direction` is normalized
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    pub fn x() -> Self {
        Self::new(Vec3::ZERO, Vec3::X)
    }

    pub fn y() -> Self {
        Self::new(Vec3::ZERO, Vec3::Y)
    }

    pub fn z() -> Self {
        Self::new(Vec3::ZERO, Vec3::Z)
    }
}

impl Default for Axis3D {
    fn default() -> Self {
        Self::y()
    }
}

/// A B-Rep backend.
///
/// Solids stay inside the kernel; callers hold [`Solid`] handles and
/// [`release`](CadKernel::release) them once they are no longer displayed.
pub trait CadKernel: Send + Sync {
    /// Backend name for logs
    fn name(&self) -> &str;

    fn is_available(&self) -> bool;

    /// Sweep the profile face along `direction` by `distance`
    fn extrude(&self, profile: &Profile, direction: Vec3, distance: f32) -> CadResult<Solid>;

    /// Rotate the profile face about `axis` by `angle` radians (at most one turn)
    fn revolve(&self, profile: &Profile, axis: &Axis3D, angle: f32) -> CadResult<Solid>;

    /// Move `profile` along a polyline, kept perpendicular to each segment
    fn sweep(&self, profile: &ProfileShape, path: &[Vec3]) -> CadResult<Solid>;

    /// Triangulate a solid; smaller `tolerance` gives more triangles
    fn tessellate(&self, solid: &Solid, tolerance: f32) -> CadResult<TessellatedMesh>;

    /// Drop the kernel data behind a handle
    fn release(&self, solid: &Solid);

    /// Number of live solids
    fn solid_count(&self) -> usize;
}

/// Kernel used when no backend is compiled in; every operation fails
#[derive(Debug, Default)]
pub struct NullKernel;

impl NullKernel {
    fn unavailable<T>() -> CadResult<T> {
        Err(CadError::KernelNotAvailable(
            "built without a CAD backend".into(),
        ))
    }
}

impl CadKernel for NullKernel {
    fn name(&self) -> &str {
        "null"
    }

    fn is_available(&self) -> bool {
        false
    }

    fn extrude(&self, _: &Profile, _: Vec3, _: f32) -> CadResult<Solid> {
        Self::unavailable()
    }

    fn revolve(&self, _: &Profile, _: &Axis3D, _: f32) -> CadResult<Solid> {
        Self::unavailable()
    }

    fn sweep(&self, _: &ProfileShape, _: &[Vec3]) -> CadResult<Solid> {
        Self::unavailable()
    }

    fn tessellate(&self, _: &Solid, _: f32) -> CadResult<TessellatedMesh> {
        Self::unavailable()
    }

    fn release(&self, _: &Solid) {}

    fn solid_count(&self) -> usize {
        0
    }
}

/// Truck when the `truck` feature is on, otherwise [`NullKernel`]
pub fn default_kernel() -> Box<dyn CadKernel> {
    #[cfg(feature = "truck")]
    {
        Box::new(super::TruckKernel::new())
    }

    #[cfg(not(feature = "truck"))]
    {
        Box::new(NullKernel)
    }
}
