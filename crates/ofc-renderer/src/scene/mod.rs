//! Scene helpers

mod bounds;

pub use bounds::BoundingBox;
