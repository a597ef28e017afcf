//! Application state module

mod viewport;

pub use viewport::{SharedViewportState, ViewportState};

use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;

use ofc_cad::{Operation, SketchLibrary, SketchMode, SketchParam, SketchParams, Solid, TessellatedMesh};

/// Actions that can be performed on the app state
#[derive(Debug, Clone, PartialEq)]
pub enum AppAction {
    /// Switch the profile type and redraw
    SetMode(SketchMode),
    /// Switch the model operation and redraw
    SetOperation(Operation),
    /// Change a dimension input (no redraw)
    SetParam { param: SketchParam, value: u32 },
    /// Rebuild the shape from the current inputs
    DrawShape,
    /// Store the current inputs in the sketch list
    SaveSketch,
    /// Load a saved sketch by name and redraw
    LoadSketch(String),
    /// Write the displayed shape to an STL file
    ExportStl(PathBuf),
    /// Write the sketch list to a file
    SaveLibrary(PathBuf),
    /// Replace the sketch list with a file's contents
    LoadLibrary(PathBuf),
    /// Frame the displayed shape
    FitView,
}

/// Shape currently shown in the viewport
pub struct CurrentShape {
    pub solid: Solid,
    pub mesh: TessellatedMesh,
}

/// Application state
pub struct AppState {
    /// Editor inputs
    pub params: SketchParams,
    /// Saved sketches
    pub library: SketchLibrary,
    /// File the sketch list was last saved to or loaded from
    pub library_path: Option<PathBuf>,
    /// Displayed shape, if the last draw succeeded
    pub current: Option<CurrentShape>,
    /// Status line text
    pub status: String,
    /// Message shown in a modal warning window
    pub error_dialog: Option<String>,
    /// Pending actions
    pending_actions: Vec<AppAction>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            params: SketchParams::default(),
            library: SketchLibrary::new(),
            library_path: None,
            current: None,
            status: String::from("Ready"),
            error_dialog: None,
            pending_actions: Vec::new(),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an action for the next frame
    pub fn queue_action(&mut self, action: AppAction) {
        self.pending_actions.push(action);
    }

    /// Take all pending actions
    pub fn take_pending_actions(&mut self) -> Vec<AppAction> {
        std::mem::take(&mut self.pending_actions)
    }

    pub fn has_pending_actions(&self) -> bool {
        !self.pending_actions.is_empty()
    }

    pub fn set_status(&mut self, status: impl Into<String>) {
        self.status = status.into();
    }

    /// Show a warning window
    pub fn show_error(&mut self, message: impl Into<String>) {
        let message = message.into();
        self.status = message.clone();
        self.error_dialog = Some(message);
    }

    pub fn dismiss_error(&mut self) {
        self.error_dialog = None;
    }

    /// Forget the displayed shape, returning it so the caller can release it
    pub fn take_current(&mut self) -> Option<CurrentShape> {
        self.current.take()
    }
}

/// Thread-safe shared state
pub type SharedAppState = Arc<Mutex<AppState>>;

/// Create a new shared state
pub fn create_shared_state() -> SharedAppState {
    Arc::new(Mutex::new(AppState::new()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_actions_are_drained() {
        let mut state = AppState::new();
        state.queue_action(AppAction::DrawShape);
        state.queue_action(AppAction::SaveSketch);
        assert!(state.has_pending_actions());

        let actions = state.take_pending_actions();
        assert_eq!(actions, vec![AppAction::DrawShape, AppAction::SaveSketch]);
        assert!(!state.has_pending_actions());
    }

    #[test]
    fn test_show_error_sets_status() {
        let mut state = AppState::new();
        state.show_error("Sketch not found.");
        assert_eq!(state.status, "Sketch not found.");
        assert_eq!(state.error_dialog.as_deref(), Some("Sketch not found."));
        state.dismiss_error();
        assert!(state.error_dialog.is_none());
    }

    #[test]
    fn test_defaults_match_editor() {
        let state = AppState::new();
        assert_eq!(state.params, SketchParams::default());
        assert!(state.library.is_empty());
        assert!(state.current.is_none());
    }
}
