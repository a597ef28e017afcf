//! Action handling module
//!
//! Actions are queued in AppState by the panels and processed once per frame.

mod file;
mod library;
mod model;

use ofc_cad::CadKernel;

use crate::config::SharedConfig;
use crate::state::{AppAction, SharedAppState, SharedViewportState};

pub use file::handle_file_action;
pub use library::handle_library_action;
pub use model::{draw_shape, handle_model_action};

/// Context for action handlers
pub struct ActionContext<'a> {
    pub app_state: &'a SharedAppState,
    pub viewport_state: &'a Option<SharedViewportState>,
    pub kernel: &'a dyn CadKernel,
    pub config: &'a SharedConfig,
}

impl<'a> ActionContext<'a> {
    pub fn new(
        app_state: &'a SharedAppState,
        viewport_state: &'a Option<SharedViewportState>,
        kernel: &'a dyn CadKernel,
        config: &'a SharedConfig,
    ) -> Self {
        Self {
            app_state,
            viewport_state,
            kernel,
            config,
        }
    }
}

/// Dispatch an action to the appropriate handler
pub fn dispatch_action(action: AppAction, ctx: &ActionContext) {
    tracing::debug!("Dispatching {:?}", action);
    match action {
        AppAction::SetMode(_)
        | AppAction::SetOperation(_)
        | AppAction::SetParam { .. }
        | AppAction::DrawShape
        | AppAction::FitView => {
            handle_model_action(action, ctx);
        }

        AppAction::SaveSketch | AppAction::LoadSketch(_) => {
            handle_library_action(action, ctx);
        }

        AppAction::ExportStl(_) | AppAction::SaveLibrary(_) | AppAction::LoadLibrary(_) => {
            handle_file_action(action, ctx);
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use ofc_cad::CadKernel;

    use crate::config::{ConfigManager, SharedConfig};
    use crate::state::{SharedAppState, SharedViewportState, create_shared_state};

    use super::{ActionContext, dispatch_action};
    use crate::state::AppAction;

    /// Headless harness: real kernel, no viewport
    pub struct Harness {
        pub app_state: SharedAppState,
        pub viewport_state: Option<SharedViewportState>,
        pub kernel: Box<dyn CadKernel>,
        pub config: SharedConfig,
    }

    impl Harness {
        pub fn new() -> Self {
            Self {
                app_state: create_shared_state(),
                viewport_state: None,
                kernel: ofc_cad::default_kernel(),
                config: ConfigManager::in_memory().into_shared(),
            }
        }

        pub fn run(&self, action: AppAction) {
            let ctx = ActionContext::new(
                &self.app_state,
                &self.viewport_state,
                self.kernel.as_ref(),
                &self.config,
            );
            dispatch_action(action, &ctx);
        }
    }
}
