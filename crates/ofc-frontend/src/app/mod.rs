//! Main application module

mod menu;

use std::sync::Arc;

use parking_lot::Mutex;

use ofc_cad::{CadKernel, default_kernel};

use crate::actions::{ActionContext, dispatch_action};
use crate::config::{ConfigManager, SharedConfig};
use crate::panels::{ControlsPanel, ViewportPanel, render_error_dialog, render_status_bar};
use crate::state::{AppAction, SharedAppState, SharedViewportState, ViewportState, create_shared_state};
use crate::theme;

pub use menu::{MenuAction, render_menu_bar};

/// Main application
pub struct SketchEditorApp {
    app_state: SharedAppState,
    viewport_state: Option<SharedViewportState>,
    kernel: Box<dyn CadKernel>,
    config: SharedConfig,
    controls_panel: ControlsPanel,
    viewport_panel: ViewportPanel,
}

impl SketchEditorApp {
    /// Create a new app
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let config = ConfigManager::load().into_shared();
        theme::apply_theme(&cc.egui_ctx, &config);

        let kernel = default_kernel();
        if kernel.is_available() {
            tracing::info!("Using CAD kernel: {}", kernel.name());
        } else {
            tracing::warn!("CAD kernel '{}' is not available", kernel.name());
        }

        // Create viewport state if WGPU is available
        let viewport_state = cc.wgpu_render_state.as_ref().map(|render_state| {
            let renderer_config = config.read().config().renderer.clone();
            Arc::new(Mutex::new(ViewportState::new(
                render_state.device.clone(),
                render_state.queue.clone(),
                render_state.target_format,
                &renderer_config,
            )))
        });
        if viewport_state.is_none() {
            tracing::warn!("No wgpu render state, the viewport is disabled");
        }

        let app_state = create_shared_state();
        // The shape is drawn once at startup
        app_state.lock().queue_action(AppAction::DrawShape);

        Self {
            app_state,
            viewport_state,
            kernel,
            config,
            controls_panel: ControlsPanel::new(),
            viewport_panel: ViewportPanel::new(),
        }
    }

    /// Process pending actions
    fn process_actions(&mut self) {
        let actions = self.app_state.lock().take_pending_actions();
        let ctx = ActionContext::new(
            &self.app_state,
            &self.viewport_state,
            self.kernel.as_ref(),
            &self.config,
        );

        for action in actions {
            dispatch_action(action, &ctx);
        }
    }

    fn handle_menu_action(&mut self, ctx: &egui::Context, action: MenuAction) {
        let renderer_config = {
            let mut config = self.config.write();
            match action {
                MenuAction::SetTheme(ui_theme) => {
                    let app_config = config.config_mut();
                    app_config.ui.theme = ui_theme;
                    app_config.renderer.set_color_scheme(ui_theme.color_scheme());
                }
                MenuAction::ResetSettings => config.reset_to_defaults(),
            }
            if let Err(e) = config.save() {
                tracing::error!("Failed to save config: {}", e);
            }
            config.config().renderer.clone()
        };

        theme::apply_theme(ctx, &self.config);
        if let Some(viewport_state) = &self.viewport_state {
            viewport_state.lock().apply_config(&renderer_config);
        }
    }
}

impl eframe::App for SketchEditorApp {
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        self.process_actions();

        let current_theme = self.config.read().config().ui.theme;
        if let Some(menu_action) = render_menu_bar(ctx, &self.app_state, current_theme) {
            self.handle_menu_action(ctx, menu_action);
        }

        render_status_bar(ctx, &self.app_state);

        let controls_width = self.config.read().config().ui.controls_width;
        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(controls_width)
            .show(ctx, |ui| {
                self.controls_panel.ui(ui, &self.app_state);
            });

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                match (frame.wgpu_render_state(), &self.viewport_state) {
                    (Some(render_state), Some(viewport_state)) => {
                        self.viewport_panel
                            .ui(ui, &self.app_state, render_state, viewport_state);
                    }
                    _ => self.viewport_panel.ui_placeholder(ui),
                }
            });

        render_error_dialog(ctx, &self.app_state);

        // Actions queued this frame run at the start of the next one
        if self.app_state.lock().has_pending_actions() {
            ctx.request_repaint();
        }
    }
}
