//! Saved sketch actions

use ofc_cad::LibraryError;

use crate::state::AppAction;

use super::{ActionContext, draw_shape};

/// Handle sketch save and load actions
pub fn handle_library_action(action: AppAction, ctx: &ActionContext) {
    match action {
        AppAction::SaveSketch => {
            let mut state = ctx.app_state.lock();
            let params = state.params;
            let name = state.library.save(&params).name.clone();
            tracing::info!("Saved {}", name);
            state.set_status(format!("Saved {}", name));
        }
        AppAction::LoadSketch(name) => {
            let result = {
                let mut state = ctx.app_state.lock();
                let mut params = state.params;
                let result = state.library.apply(&name, &mut params);
                if result.is_ok() {
                    state.params = params;
                }
                result
            };

            match result {
                Ok(()) => {
                    tracing::info!("Loaded {}", name);
                    draw_shape(ctx);
                }
                Err(LibraryError::NotFound(_)) => {
                    tracing::warn!("Sketch not found: {}", name);
                    ctx.app_state.lock().show_error("Sketch not found.");
                }
                Err(e) => {
                    tracing::error!("Failed to load sketch {}: {}", name, e);
                    ctx.app_state.lock().show_error(e.to_string());
                }
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use ofc_cad::{Operation, SketchMode, SketchParam};

    use crate::actions::test_support::Harness;
    use crate::state::AppAction;

    #[test]
    fn test_save_names_entries() {
        let harness = Harness::new();
        harness.run(AppAction::SaveSketch);
        harness.run(AppAction::SaveSketch);

        let state = harness.app_state.lock();
        let names: Vec<_> = state
            .library
            .sketches()
            .iter()
            .map(|s| s.name.as_str())
            .collect();
        assert_eq!(names, ["Sketch 1", "Sketch 2"]);
        assert_eq!(state.status, "Saved Sketch 2");
    }

    #[test]
    fn test_load_restores_params_and_redraws() {
        let harness = Harness::new();
        harness.run(AppAction::SetParam {
            param: SketchParam::Radius,
            value: 12,
        });
        harness.app_state.lock().params.mode = SketchMode::Circle;
        harness.run(AppAction::SaveSketch);

        harness.app_state.lock().params.mode = SketchMode::Rectangle;
        harness.run(AppAction::SetOperation(Operation::Revolve));
        harness.run(AppAction::LoadSketch("Sketch 1".into()));

        let state = harness.app_state.lock();
        assert_eq!(state.params.mode, SketchMode::Circle);
        assert_eq!(state.params.radius, 12);
        assert_eq!(state.params.operation, Operation::Extrude);
        assert!(state.current.is_some());
        assert!(state.error_dialog.is_none());
    }

    #[test]
    fn test_load_missing_shows_warning() {
        let harness = Harness::new();
        harness.run(AppAction::DrawShape);
        let before = harness.app_state.lock().params;

        harness.run(AppAction::LoadSketch("Sketch 9".into()));

        let state = harness.app_state.lock();
        assert_eq!(state.error_dialog.as_deref(), Some("Sketch not found."));
        assert_eq!(state.params, before);
        assert!(state.current.is_some());
    }
}
