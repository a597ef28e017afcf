//! 3D Viewport panel

use ofc_renderer::Renderer;

use crate::state::{AppAction, SharedAppState, SharedViewportState};

/// Scroll delta to zoom factor
const SCROLL_ZOOM_SCALE: f32 = 0.01;

/// Standard camera orientations offered in the toolbar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StandardView {
    Top,
    Front,
    Side,
}

impl StandardView {
    const ALL: [StandardView; 3] = [StandardView::Top, StandardView::Front, StandardView::Side];

    fn label(self) -> &'static str {
        match self {
            StandardView::Top => "Top",
            StandardView::Front => "Front",
            StandardView::Side => "Side",
        }
    }

    fn apply(self, renderer: &mut Renderer) {
        let camera = renderer.camera_mut();
        match self {
            StandardView::Top => camera.set_top_view(),
            StandardView::Front => camera.set_front_view(),
            StandardView::Side => camera.set_side_view(),
        }
    }
}

/// Viewport panel: toolbar on top, rendered image below
#[derive(Default)]
pub struct ViewportPanel;

impl ViewportPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fallback when no wgpu render state exists
    pub fn ui_placeholder(&mut self, ui: &mut egui::Ui) {
        let size = ui.available_size();
        let (rect, _) = ui.allocate_exact_size(size, egui::Sense::hover());
        ui.painter()
            .rect_filled(rect, 0.0, ui.visuals().extreme_bg_color);
        ui.painter().text(
            rect.center(),
            egui::Align2::CENTER_CENTER,
            "3D viewport unavailable (no wgpu device)",
            egui::FontId::proportional(16.0),
            ui.visuals().weak_text_color(),
        );
    }

    pub fn ui(
        &mut self,
        ui: &mut egui::Ui,
        app_state: &SharedAppState,
        render_state: &egui_wgpu::RenderState,
        viewport_state: &SharedViewportState,
    ) {
        self.toolbar(ui, app_state, viewport_state);

        let size = ui.available_size();
        if size.x < 1.0 || size.y < 1.0 {
            return;
        }

        let mut state = viewport_state.lock();
        let texture_id = {
            let mut egui_renderer = render_state.renderer.write();
            state.ensure_texture(size.x as u32, size.y as u32, &mut egui_renderer)
        };
        state.render();

        let response = ui.add(
            egui::Image::new(egui::load::SizedTexture::new(texture_id, size))
                .sense(egui::Sense::click_and_drag()),
        );
        handle_camera_input(ui, &response, &mut state.renderer);
    }

    fn toolbar(
        &self,
        ui: &mut egui::Ui,
        app_state: &SharedAppState,
        viewport_state: &SharedViewportState,
    ) {
        ui.horizontal(|ui| {
            ui.label("View:");
            for view in StandardView::ALL {
                if ui.button(view.label()).clicked() {
                    view.apply(&mut viewport_state.lock().renderer);
                }
            }
            if ui.button("Fit All").clicked() {
                app_state.lock().queue_action(AppAction::FitView);
            }

            ui.separator();

            let mut state = viewport_state.lock();
            let mut show_grid = state.renderer.show_grid();
            if ui.checkbox(&mut show_grid, "Grid").changed() {
                state.renderer.set_show_grid(show_grid);
            }
        });
    }
}

/// Right or middle drag orbits, shift + middle drag pans, scroll zooms
fn handle_camera_input(ui: &egui::Ui, response: &egui::Response, renderer: &mut Renderer) {
    let sensitivity = renderer.orbit_sensitivity();
    let delta = response.drag_delta();
    let shift = ui.input(|i| i.modifiers.shift);

    let middle = response.dragged_by(egui::PointerButton::Middle);
    let right = response.dragged_by(egui::PointerButton::Secondary);
    if middle && shift {
        renderer.camera_mut().pan(delta.x, delta.y);
    } else if middle || right {
        renderer
            .camera_mut()
            .orbit(-delta.x * sensitivity, delta.y * sensitivity);
    }

    if response.hovered() {
        let scroll = ui.input(|i| i.smooth_scroll_delta.y);
        if scroll != 0.0 {
            renderer.camera_mut().zoom(scroll * SCROLL_ZOOM_SCALE);
        }
    }
}
