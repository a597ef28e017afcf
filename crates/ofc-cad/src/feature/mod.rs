//! Feature Operations
//!
//! Turns the sketch parameters of the editor into a solid: build the profile
//! for the current mode, then extrude, revolve or sweep it through the kernel.

use std::ops::RangeInclusive;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::kernel::{Axis3D, CadError, CadKernel, Solid, TessellatedMesh};
use crate::sketch::{Profile, ProfileShape, make_circle_sketch, make_rectangle_sketch};

/// Feature-related errors
#[derive(Debug, Clone, Error)]
pub enum FeatureError {
    #[error("CAD kernel error: {0}")]
    CadError(#[from] CadError),
}

/// Result type for feature operations
pub type FeatureResult<T> = Result<T, FeatureError>;

/// Allowed range for every dimension input
pub const PARAM_RANGE: RangeInclusive<u32> = 1..=500;

/// Which profile the sketch draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SketchMode {
    #[default]
    Rectangle,
    Circle,
}

impl SketchMode {
    /// All modes in button order
    pub const ALL: [SketchMode; 2] = [SketchMode::Rectangle, SketchMode::Circle];

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            SketchMode::Rectangle => "Rectangle",
            SketchMode::Circle => "Circle",
        }
    }
}

/// How the profile becomes a solid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Operation {
    #[default]
    Extrude,
    Revolve,
    Sweep,
}

impl Operation {
    /// All operations in button order
    pub const ALL: [Operation; 3] = [Operation::Extrude, Operation::Revolve, Operation::Sweep];

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            Operation::Extrude => "Extrude",
            Operation::Revolve => "Revolve",
            Operation::Sweep => "Sweep",
        }
    }
}

/// One of the integer dimension inputs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SketchParam {
    Width,
    Height,
    Radius,
    Depth,
}

impl SketchParam {
    /// All inputs in panel order
    pub const ALL: [SketchParam; 4] = [
        SketchParam::Width,
        SketchParam::Height,
        SketchParam::Radius,
        SketchParam::Depth,
    ];

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            SketchParam::Width => "Width",
            SketchParam::Height => "Height",
            SketchParam::Radius => "Radius",
            SketchParam::Depth => "Depth",
        }
    }
}

/// Tuning for the model operations that the editor does not expose as inputs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelingOptions {
    /// Revolve angle in degrees
    pub revolve_angle_deg: f32,
    /// Revolve axis
    pub revolve_axis: Axis3D,
    /// Radius of the circular sweep profile
    pub sweep_radius: f32,
    /// Length of the straight sweep path along +Y
    pub sweep_length: f32,
    /// Tessellation tolerance for display
    pub tessellation_tolerance: f32,
}

impl Default for ModelingOptions {
    fn default() -> Self {
        Self {
            revolve_angle_deg: 360.0,
            revolve_axis: Axis3D::y(),
            sweep_radius: 5.0,
            sweep_length: 100.0,
            tessellation_tolerance: 0.1,
        }
    }
}

/// The editor inputs: mode, operation and the four dimensions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SketchParams {
    pub mode: SketchMode,
    pub operation: Operation,
    pub width: u32,
    pub height: u32,
    pub radius: u32,
    pub depth: u32,
}

impl Default for SketchParams {
    fn default() -> Self {
        Self {
            mode: SketchMode::Rectangle,
            operation: Operation::Extrude,
            width: 60,
            height: 40,
            radius: 25,
            depth: 30,
        }
    }
}

impl SketchParams {
    /// Read a dimension
    pub fn get(&self, param: SketchParam) -> u32 {
        match param {
            SketchParam::Width => self.width,
            SketchParam::Height => self.height,
            SketchParam::Radius => self.radius,
            SketchParam::Depth => self.depth,
        }
    }

    /// Set a dimension, clamped to [`PARAM_RANGE`]
    pub fn set(&mut self, param: SketchParam, value: u32) {
        let value = value.clamp(*PARAM_RANGE.start(), *PARAM_RANGE.end());
        match param {
            SketchParam::Width => self.width = value,
            SketchParam::Height => self.height = value,
            SketchParam::Radius => self.radius = value,
            SketchParam::Depth => self.depth = value,
        }
    }

    /// Profile of the current mode
    pub fn profile(&self) -> FeatureResult<Profile> {
        let profile = match self.mode {
            SketchMode::Rectangle => make_rectangle_sketch(self.width as f32, self.height as f32)?,
            SketchMode::Circle => make_circle_sketch(self.radius as f32)?,
        };
        Ok(profile)
    }
}

/// Extrude a profile along +Z by `depth`
pub fn extrude_sketch(kernel: &dyn CadKernel, profile: &Profile, depth: f32) -> FeatureResult<Solid> {
    Ok(kernel.extrude(profile, Vec3::Z, depth)?)
}

/// Revolve a profile about the configured axis by the configured angle
pub fn revolve_sketch(
    kernel: &dyn CadKernel,
    profile: &Profile,
    options: &ModelingOptions,
) -> FeatureResult<Solid> {
    Ok(kernel.revolve(
        profile,
        &options.revolve_axis,
        options.revolve_angle_deg.to_radians(),
    )?)
}

/// Sweep a small circle along a straight path from the origin along +Y
pub fn make_sweep(kernel: &dyn CadKernel, options: &ModelingOptions) -> FeatureResult<Solid> {
    let shape = ProfileShape::Circle {
        radius: options.sweep_radius,
    };
    let path = [Vec3::ZERO, Vec3::Y * options.sweep_length];
    Ok(kernel.sweep(&shape, &path)?)
}

/// Build the solid for the current parameters.
///
/// Sweep ignores the mode and the dimension inputs.
pub fn build_solid(
    kernel: &dyn CadKernel,
    params: &SketchParams,
    options: &ModelingOptions,
) -> FeatureResult<Solid> {
    if params.operation == Operation::Sweep {
        let solid = make_sweep(kernel, options)?;
        tracing::info!("Sweep created");
        return Ok(solid);
    }

    let profile = params.profile()?;
    tracing::info!("{}", profile.shape.describe());

    let solid = match params.operation {
        Operation::Revolve => {
            let solid = revolve_sketch(kernel, &profile, options)?;
            tracing::info!("Revolved shape");
            solid
        }
        _ => {
            let solid = extrude_sketch(kernel, &profile, params.depth as f32)?;
            tracing::info!("Extruded shape");
            solid
        }
    };

    Ok(solid)
}

/// Build and tessellate the solid for the current parameters.
///
/// The kernel keeps the solid; on tessellation failure it is released again.
pub fn build_shape(
    kernel: &dyn CadKernel,
    params: &SketchParams,
    options: &ModelingOptions,
) -> FeatureResult<(Solid, TessellatedMesh)> {
    let solid = build_solid(kernel, params, options)?;
    match kernel.tessellate(&solid, options.tessellation_tolerance) {
        Ok(mesh) => Ok((solid, mesh)),
        Err(e) => {
            kernel.release(&solid);
            Err(e.into())
        }
    }
}
