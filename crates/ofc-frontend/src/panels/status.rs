//! Status line and warning window

use crate::state::SharedAppState;

/// Bottom status bar
pub fn render_status_bar(ctx: &egui::Context, app_state: &SharedAppState) {
    egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
        let state = app_state.lock();
        ui.horizontal(|ui| {
            ui.label(&state.status);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.weak(format!("{} saved", state.library.len()));
            });
        });
    });
}

/// Modal warning, dismissed with OK
pub fn render_error_dialog(ctx: &egui::Context, app_state: &SharedAppState) {
    let Some(message) = app_state.lock().error_dialog.clone() else {
        return;
    };

    let mut dismissed = false;
    egui::Window::new("Warning")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .show(ctx, |ui| {
            ui.label(&message);
            ui.add_space(8.0);
            if ui.button("OK").clicked() {
                dismissed = true;
            }
        });

    if dismissed {
        app_state.lock().dismiss_error();
    }
}
