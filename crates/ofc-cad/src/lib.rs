//! CAD Kernel Abstraction and Model Operations
//!
//! This crate provides:
//! - An abstract CAD kernel trait with a Truck (pure Rust B-Rep) backend
//! - Rectangle and circle sketch profiles on sketch planes
//! - Extrude, revolve and sweep operations driven by the editor inputs
//! - A list of saved sketches with RON persistence
//! - STL export of tessellated shapes

pub mod export;
pub mod feature;
pub mod kernel;
pub mod library;
pub mod sketch;

// Re-exports for convenience
pub use export::write_stl;
pub use feature::{
    FeatureError, FeatureResult, ModelingOptions, Operation, PARAM_RANGE, SketchMode, SketchParam,
    SketchParams, build_shape, build_solid, extrude_sketch, make_sweep, revolve_sketch,
};
pub use kernel::{
    Axis3D, CadError, CadKernel, CadResult, NullKernel, Solid, TessellatedMesh, default_kernel,
};
#[cfg(feature = "truck")]
pub use kernel::TruckKernel;
pub use library::{LibraryError, RecordShape, SavedSketch, SketchLibrary, SketchRecord};
pub use sketch::{
    Profile, ProfileShape, SketchPlane, make_circle_sketch, make_rectangle_sketch,
};
