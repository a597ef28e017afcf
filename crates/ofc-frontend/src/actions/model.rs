//! Shape building actions

use ofc_cad::{Operation, SketchMode, SketchParams, build_shape};

use crate::state::{AppAction, CurrentShape};

use super::ActionContext;

/// Handle mode, operation, input and draw actions
pub fn handle_model_action(action: AppAction, ctx: &ActionContext) {
    match action {
        AppAction::SetMode(mode) => {
            ctx.app_state.lock().params.mode = mode;
            draw_shape(ctx);
        }
        AppAction::SetOperation(operation) => {
            ctx.app_state.lock().params.operation = operation;
            draw_shape(ctx);
        }
        AppAction::SetParam { param, value } => {
            ctx.app_state.lock().params.set(param, value);
        }
        AppAction::DrawShape => draw_shape(ctx),
        AppAction::FitView => {
            if let Some(viewport_state) = ctx.viewport_state {
                viewport_state.lock().fit_view();
            }
        }
        _ => {}
    }
}

/// Clear the viewport and rebuild the shape from the current inputs.
///
/// On failure the viewport stays empty and the status line carries the error.
pub fn draw_shape(ctx: &ActionContext) {
    tracing::info!("Drawing shape...");

    let params = {
        let mut state = ctx.app_state.lock();
        if let Some(previous) = state.take_current() {
            ctx.kernel.release(&previous.solid);
        }
        state.params
    };
    if let Some(viewport_state) = ctx.viewport_state {
        viewport_state.lock().clear_shapes();
    }

    let options = ctx.config.read().config().modeling.clone();

    match build_shape(ctx.kernel, &params, &options) {
        Ok((solid, mesh)) => {
            tracing::info!(
                "Displaying shape {} ({} triangles)",
                solid.id,
                mesh.triangle_count()
            );
            if let Some(viewport_state) = ctx.viewport_state {
                viewport_state.lock().show_shape(solid.id, &mesh);
            }
            let mut state = ctx.app_state.lock();
            state.set_status(shape_summary(&params));
            state.current = Some(CurrentShape { solid, mesh });
        }
        Err(e) => {
            tracing::error!("Failed to build shape: {}", e);
            ctx.app_state
                .lock()
                .set_status(format!("Failed to build shape: {}", e));
        }
    }
}

/// Status line text for a successful draw
fn shape_summary(params: &SketchParams) -> String {
    match params.operation {
        Operation::Sweep => String::from("Sweep"),
        operation => {
            let profile = match params.mode {
                SketchMode::Rectangle => format!("Rectangle {} x {}", params.width, params.height),
                SketchMode::Circle => format!("Circle r{}", params.radius),
            };
            format!("{}: {}", operation.label(), profile)
        }
    }
}

#[cfg(test)]
mod tests {
    use ofc_cad::SketchParam;

    use super::*;
    use crate::actions::test_support::Harness;

    #[test]
    fn test_startup_draw_builds_box() {
        let harness = Harness::new();
        harness.run(AppAction::DrawShape);

        let state = harness.app_state.lock();
        let current = state.current.as_ref().expect("shape drawn");
        let (min, max) = current.mesh.bounds().unwrap();
        assert!(min.x.abs() < 1e-3 && (max.x - 60.0).abs() < 1e-3);
        assert!((max.y - 40.0).abs() < 1e-3);
        assert!((max.z - 30.0).abs() < 1e-3);
        assert_eq!(state.status, "Extrude: Rectangle 60 x 40");
    }

    #[test]
    fn test_set_param_does_not_redraw() {
        let harness = Harness::new();
        harness.run(AppAction::SetParam {
            param: SketchParam::Width,
            value: 120,
        });

        let state = harness.app_state.lock();
        assert_eq!(state.params.width, 120);
        assert!(state.current.is_none());
    }

    #[test]
    fn test_set_param_clamps() {
        let harness = Harness::new();
        harness.run(AppAction::SetParam {
            param: SketchParam::Depth,
            value: 900,
        });
        assert_eq!(harness.app_state.lock().params.depth, 500);
    }

    #[test]
    fn test_set_mode_redraws() {
        let harness = Harness::new();
        harness.run(AppAction::SetMode(SketchMode::Circle));

        let state = harness.app_state.lock();
        assert_eq!(state.params.mode, SketchMode::Circle);
        let current = state.current.as_ref().expect("shape drawn");
        let (min, max) = current.mesh.bounds().unwrap();
        assert!((max.x - 25.0).abs() < 0.5 && (min.x + 25.0).abs() < 0.5);
        assert_eq!(state.status, "Extrude: Circle r25");
    }

    #[test]
    fn test_set_operation_revolve_redraws() {
        let harness = Harness::new();
        harness.run(AppAction::SetOperation(Operation::Revolve));

        let state = harness.app_state.lock();
        assert_eq!(state.params.operation, Operation::Revolve);
        let current = state.current.as_ref().expect("shape drawn");
        let (min, max) = current.mesh.bounds().unwrap();
        assert!((min.x + 60.0).abs() < 0.5 && (max.x - 60.0).abs() < 0.5);
        assert!((max.y - 40.0).abs() < 1e-3);
        assert_eq!(state.status, "Revolve: Rectangle 60 x 40");
    }

    #[test]
    fn test_sweep_ignores_mode() {
        let harness = Harness::new();
        harness.run(AppAction::SetOperation(Operation::Sweep));

        let state = harness.app_state.lock();
        let current = state.current.as_ref().expect("shape drawn");
        let (_, max) = current.mesh.bounds().unwrap();
        assert!((max.y - 100.0).abs() < 1e-3);
        assert_eq!(state.status, "Sweep");
    }

    #[test]
    fn test_redraw_releases_previous_solid() {
        let harness = Harness::new();
        harness.run(AppAction::DrawShape);
        harness.run(AppAction::DrawShape);
        harness.run(AppAction::SetOperation(Operation::Sweep));
        assert_eq!(harness.kernel.solid_count(), 1);
    }

    #[test]
    fn test_failed_draw_leaves_viewport_empty() {
        let mut harness = Harness::new();
        harness.kernel = Box::new(ofc_cad::NullKernel);
        harness.run(AppAction::DrawShape);

        let state = harness.app_state.lock();
        assert!(state.current.is_none());
        assert!(state.status.starts_with("Failed to build shape"));
    }
}
