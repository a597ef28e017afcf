//! UI theme

use egui::{Color32, CornerRadius, Stroke, Visuals};

use crate::config::{SharedConfig, UiTheme};

/// Accent used for selected mode and operation buttons
const ACCENT: Color32 = Color32::from_rgb(66, 133, 244);

/// Apply the configured theme to the egui context
pub fn apply_theme(ctx: &egui::Context, config: &SharedConfig) {
    let theme = config.read().config().ui.theme;
    ctx.set_visuals(visuals(theme));
}

/// Visuals for a theme
pub fn visuals(theme: UiTheme) -> Visuals {
    let mut v = match theme {
        UiTheme::Dark => {
            let mut v = Visuals::dark();
            v.panel_fill = Color32::from_rgb(32, 33, 36);
            v.extreme_bg_color = Color32::from_rgb(24, 25, 27);
            v
        }
        UiTheme::Light => Visuals::light(),
    };

    v.selection.bg_fill = ACCENT.gamma_multiply(0.6);
    v.selection.stroke = Stroke::new(1.0, ACCENT);
    v.hyperlink_color = ACCENT;
    for widget in [
        &mut v.widgets.inactive,
        &mut v.widgets.hovered,
        &mut v.widgets.active,
    ] {
        widget.corner_radius = CornerRadius::same(4);
    }
    v.window_corner_radius = CornerRadius::same(6);
    v
}
