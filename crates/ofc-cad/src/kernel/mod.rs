//! CAD kernel abstraction
//!
//! The kernel owns the B-Rep solids. Everything above it works with
//! [`Solid`] handles and [`TessellatedMesh`] output.

mod traits;
#[cfg(feature = "truck")]
mod truck;

pub use traits::*;
#[cfg(feature = "truck")]
pub use truck::TruckKernel;
