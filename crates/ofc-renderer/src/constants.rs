//! Renderer defaults
//!
//! Lengths are in model units (millimetres in the editor).

/// Ground grid
pub mod grid {
    /// Half-extent of the grid along X and Y
    pub const DEFAULT_SIZE: f32 = 100.0;
    /// Distance between lines
    pub const DEFAULT_SPACING: f32 = 10.0;
    /// Gray
    pub const LINE_COLOR: [f32; 3] = [0.3, 0.3, 0.3];
    /// Red
    pub const X_AXIS_COLOR: [f32; 3] = [0.8, 0.2, 0.2];
    /// Green
    pub const Y_AXIS_COLOR: [f32; 3] = [0.2, 0.8, 0.2];
}

/// Orbit camera
pub mod camera {
    /// Vertical field of view
    pub const DEFAULT_FOV_DEGREES: f32 = 40.0;
    /// Near clip plane
    pub const DEFAULT_NEAR: f32 = 0.1;
    /// Far clip plane
    pub const DEFAULT_FAR: f32 = 100000.0;
    /// Distance from the target before the first fit
    pub const DEFAULT_DISTANCE: f32 = 200.0;
    /// Initial yaw
    pub const DEFAULT_YAW_DEGREES: f32 = 45.0;
    /// Initial pitch
    pub const DEFAULT_PITCH_DEGREES: f32 = 30.0;
    /// Pitch stays just short of the poles so the Z-up basis never flips
    pub const MIN_PITCH_DEGREES: f32 = -89.0;
    /// Upper pitch limit
    pub const MAX_PITCH_DEGREES: f32 = 89.0;
    /// Pan speed per pixel, scaled by distance
    pub const PAN_SCALE: f32 = 0.002;
    /// Fraction of the distance per zoom step
    pub const ZOOM_SCALE: f32 = 0.1;
    /// Radians per pixel of drag
    pub const ORBIT_SCALE: f32 = 0.005;
    /// Closest zoom
    pub const MIN_DISTANCE: f32 = 0.1;
    /// Farthest zoom
    pub const MAX_DISTANCE: f32 = 10000.0;
    /// Camera distance as a multiple of the framed bounding radius
    pub const FIT_ALL_MULTIPLIER: f32 = 2.5;
}

/// Offscreen viewport
pub mod viewport {
    /// MSAA samples when enabled
    pub const SAMPLE_COUNT: u32 = 4;
    /// Depth attachment format
    pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;
}

/// Modeled bodies
pub mod body {
    /// Every drawn shape is shown in pure blue
    pub const SHAPE_COLOR: [f32; 4] = [0.0, 0.0, 1.0, 1.0];
}
