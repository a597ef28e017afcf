//! Menu bar rendering

use crate::config::UiTheme;
use crate::state::{AppAction, SharedAppState};

/// Menu actions handled by the app itself rather than the action queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    SetTheme(UiTheme),
    ResetSettings,
}

/// Render the menu bar and return any triggered action
pub fn render_menu_bar(
    ctx: &egui::Context,
    app_state: &SharedAppState,
    current_theme: UiTheme,
) -> Option<MenuAction> {
    let mut menu_action = None;

    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("Open Sketch List...").clicked() {
                    if let Some(path) = rfd::FileDialog::new()
                        .add_filter("Sketch list", &["ron"])
                        .pick_file()
                    {
                        app_state.lock().queue_action(AppAction::LoadLibrary(path));
                    }
                    ui.close();
                }
                if ui.button("Save Sketch List...").clicked() {
                    let current = app_state.lock().library_path.clone();
                    let mut dialog = rfd::FileDialog::new().add_filter("Sketch list", &["ron"]);
                    dialog = match current.as_ref().and_then(|p| p.file_name()) {
                        Some(name) => dialog.set_file_name(name.to_string_lossy()),
                        None => dialog.set_file_name("sketches.ron"),
                    };
                    if let Some(path) = dialog.save_file() {
                        app_state.lock().queue_action(AppAction::SaveLibrary(path));
                    }
                    ui.close();
                }
                ui.separator();
                let has_shape = app_state.lock().current.is_some();
                if ui
                    .add_enabled(has_shape, egui::Button::new("Export STL..."))
                    .clicked()
                {
                    if let Some(path) = rfd::FileDialog::new()
                        .add_filter("STL files", &["stl"])
                        .set_file_name("shape.stl")
                        .save_file()
                    {
                        app_state.lock().queue_action(AppAction::ExportStl(path));
                    }
                    ui.close();
                }
                ui.separator();
                if ui.button("Exit").clicked() {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("View", |ui| {
                if ui.button("Fit All").clicked() {
                    app_state.lock().queue_action(AppAction::FitView);
                    ui.close();
                }
                if ui.button("Redraw").clicked() {
                    app_state.lock().queue_action(AppAction::DrawShape);
                    ui.close();
                }
                ui.separator();
                ui.label("Theme");
                for (theme, label) in [(UiTheme::Dark, "Dark"), (UiTheme::Light, "Light")] {
                    if ui.radio(current_theme == theme, label).clicked() {
                        menu_action = Some(MenuAction::SetTheme(theme));
                        ui.close();
                    }
                }
            });

            ui.menu_button("Settings", |ui| {
                if ui.button("Reset to Defaults").clicked() {
                    menu_action = Some(MenuAction::ResetSettings);
                    ui.close();
                }
            });
        });
    });

    menu_action
}
