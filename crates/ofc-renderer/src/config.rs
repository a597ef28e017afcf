//! Renderer settings
//!
//! Every section deserializes with defaults for missing fields, so config
//! files written by older builds keep loading.

use serde::{Deserialize, Serialize};

use crate::constants;

/// Background and grid palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColorScheme {
    /// Dark background, gray grid.
    #[default]
    Dark,
    /// Light background, pale grid.
    Light,
}

impl ColorScheme {
    /// Viewport clear color (RGBA).
    pub fn background(self) -> [f32; 4] {
        match self {
            ColorScheme::Dark => [0.15, 0.15, 0.18, 1.0],
            ColorScheme::Light => [0.92, 0.92, 0.94, 1.0],
        }
    }

    /// Color of regular grid lines (RGB).
    pub fn grid_line(self) -> [f32; 3] {
        match self {
            ColorScheme::Dark => constants::grid::LINE_COLOR,
            ColorScheme::Light => [0.7, 0.7, 0.7],
        }
    }
}

/// Ground grid in the XY plane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Draw the grid.
    pub enabled: bool,
    /// Half-extent along X and Y.
    pub size: f32,
    /// Distance between lines.
    pub spacing: f32,
    /// Regular line color (RGB).
    pub line_color: [f32; 3],
    /// Color of the line along X (RGB).
    pub x_axis_color: [f32; 3],
    /// Color of the line along Y (RGB).
    pub y_axis_color: [f32; 3],
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            size: constants::grid::DEFAULT_SIZE,
            spacing: constants::grid::DEFAULT_SPACING,
            line_color: ColorScheme::Dark.grid_line(),
            x_axis_color: constants::grid::X_AXIS_COLOR,
            y_axis_color: constants::grid::Y_AXIS_COLOR,
        }
    }
}

/// Offscreen viewport target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// Clear color (RGBA).
    pub background_color: [f32; 4],
    /// Requested MSAA samples; see [`Self::effective_sample_count`].
    pub msaa_sample_count: u32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            background_color: ColorScheme::Dark.background(),
            msaa_sample_count: constants::viewport::SAMPLE_COUNT,
        }
    }
}

impl ViewportConfig {
    /// Sample count the pipelines are built with.
    ///
    /// Only 1 and 4 are guaranteed by every backend, anything else falls
    /// back to 1.
    pub fn effective_sample_count(&self) -> u32 {
        match self.msaa_sample_count {
            4 => 4,
            _ => 1,
        }
    }

    /// Background as a wgpu clear color.
    pub fn clear_color(&self) -> wgpu::Color {
        let [r, g, b, a] = self.background_color.map(f64::from);
        wgpu::Color { r, g, b, a }
    }
}

/// Single directional light plus ambient term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    /// Direction towards the light (normalized on upload).
    pub direction: [f32; 3],
    /// Light color (RGB).
    pub color: [f32; 3],
    /// Diffuse multiplier.
    pub intensity: f32,
    /// Ambient color (RGB).
    pub ambient_color: [f32; 3],
    /// Ambient multiplier, 0 to 1.
    pub ambient_strength: f32,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            direction: [0.5, -0.7, 1.0],
            color: [1.0; 3],
            intensity: 1.0,
            ambient_color: [1.0; 3],
            ambient_strength: 0.3,
        }
    }
}

/// Projection and mouse sensitivity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    /// Near clip distance.
    pub near_plane: f32,
    /// Far clip distance.
    pub far_plane: f32,
    /// Pan speed multiplier.
    pub pan_sensitivity: f32,
    /// Zoom speed multiplier.
    pub zoom_sensitivity: f32,
    /// Radians of orbit per dragged pixel.
    pub orbit_sensitivity: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        use constants::camera::*;
        Self {
            fov_degrees: DEFAULT_FOV_DEGREES,
            near_plane: DEFAULT_NEAR,
            far_plane: DEFAULT_FAR,
            pan_sensitivity: PAN_SCALE,
            zoom_sensitivity: ZOOM_SCALE,
            orbit_sensitivity: ORBIT_SCALE,
        }
    }
}

/// All renderer settings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    /// Grid settings.
    pub grid: GridConfig,
    /// Viewport settings.
    pub viewport: ViewportConfig,
    /// Lighting settings.
    pub lighting: LightingConfig,
    /// Camera settings.
    pub camera: CameraConfig,
}

impl RendererConfig {
    /// Recolor background and grid lines. Grid layout and MSAA are kept.
    pub fn set_color_scheme(&mut self, scheme: ColorScheme) {
        self.viewport.background_color = scheme.background();
        self.grid.line_color = scheme.grid_line();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_scheme_keeps_grid_layout() {
        let mut config = RendererConfig::default();
        config.grid.enabled = false;
        config.grid.size = 42.0;
        config.viewport.msaa_sample_count = 1;

        config.set_color_scheme(ColorScheme::Light);
        assert_eq!(config.viewport.background_color, [0.92, 0.92, 0.94, 1.0]);
        assert!(!config.grid.enabled);
        assert_eq!(config.grid.size, 42.0);
        assert_eq!(config.viewport.msaa_sample_count, 1);

        config.set_color_scheme(ColorScheme::Dark);
        assert_eq!(config.grid.line_color, constants::grid::LINE_COLOR);
    }

    #[test]
    fn test_effective_sample_count() {
        let mut viewport = ViewportConfig::default();
        assert_eq!(viewport.effective_sample_count(), 4);
        viewport.msaa_sample_count = 8;
        assert_eq!(viewport.effective_sample_count(), 1);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config: RendererConfig = ron::from_str("(grid: (spacing: 5.0))").unwrap();
        assert_eq!(config.grid.spacing, 5.0);
        assert_eq!(config.grid.size, constants::grid::DEFAULT_SIZE);
        assert_eq!(config.camera, CameraConfig::default());
    }
}
