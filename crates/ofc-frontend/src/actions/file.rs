//! File actions: STL export and sketch list persistence

use ofc_cad::{SketchLibrary, write_stl};

use crate::state::AppAction;

use super::ActionContext;

/// Handle file-related actions
pub fn handle_file_action(action: AppAction, ctx: &ActionContext) {
    match action {
        AppAction::ExportStl(path) => {
            let mut state = ctx.app_state.lock();
            let result = state
                .current
                .as_ref()
                .map(|current| write_stl(&current.mesh, &path));
            match result {
                None => state.show_error("Nothing to export. Draw a shape first."),
                Some(Ok(())) => state.set_status(format!("Exported {}", path.display())),
                Some(Err(e)) => {
                    tracing::error!("Failed to export STL: {}", e);
                    state.show_error(format!("Failed to export STL: {}", e));
                }
            }
        }
        AppAction::SaveLibrary(path) => {
            let mut state = ctx.app_state.lock();
            match state.library.save_to_file(&path) {
                Ok(()) => {
                    tracing::info!("Saved {} sketches to {:?}", state.library.len(), path);
                    state.set_status(format!("Saved sketches to {}", path.display()));
                    state.library_path = Some(path);
                }
                Err(e) => {
                    tracing::error!("Failed to save sketches: {}", e);
                    state.show_error(format!("Failed to save sketches: {}", e));
                }
            }
        }
        AppAction::LoadLibrary(path) => match SketchLibrary::load_from_file(&path) {
            Ok(library) => {
                tracing::info!("Loaded {} sketches from {:?}", library.len(), path);
                let mut state = ctx.app_state.lock();
                state.set_status(format!("Loaded {} sketches", library.len()));
                state.library = library;
                state.library_path = Some(path);
            }
            Err(e) => {
                tracing::error!("Failed to load sketches: {}", e);
                ctx.app_state
                    .lock()
                    .show_error(format!("Failed to load sketches: {}", e));
            }
        },
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use crate::actions::test_support::Harness;
    use crate::state::AppAction;

    #[test]
    fn test_export_without_shape() {
        let harness = Harness::new();
        let dir = tempfile::tempdir().unwrap();
        harness.run(AppAction::ExportStl(dir.path().join("out.stl")));

        let state = harness.app_state.lock();
        assert!(state.error_dialog.is_some());
        assert!(!dir.path().join("out.stl").exists());
    }

    #[test]
    fn test_export_after_draw() {
        let harness = Harness::new();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("box.stl");

        harness.run(AppAction::DrawShape);
        harness.run(AppAction::ExportStl(path.clone()));

        assert!(harness.app_state.lock().error_dialog.is_none());
        assert!(std::fs::metadata(&path).unwrap().len() > 84);
    }

    #[test]
    fn test_library_round_trip() {
        let harness = Harness::new();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sketches.ron");

        harness.run(AppAction::SaveSketch);
        harness.run(AppAction::SaveSketch);
        harness.run(AppAction::SaveLibrary(path.clone()));

        let other = Harness::new();
        other.run(AppAction::LoadLibrary(path.clone()));

        let state = other.app_state.lock();
        assert_eq!(state.library.len(), 2);
        assert_eq!(state.library_path.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn test_load_library_missing_file() {
        let harness = Harness::new();
        harness.run(AppAction::SaveSketch);
        harness.run(AppAction::LoadLibrary("/nonexistent/sketches.ron".into()));

        let state = harness.app_state.lock();
        assert!(state.error_dialog.is_some());
        assert_eq!(state.library.len(), 1);
    }
}
