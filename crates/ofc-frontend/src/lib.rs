//! Sketch Manager Editor
//!
//! egui application that builds rectangle and circle profiles, turns them
//! into solids with the CAD kernel (extrude, revolve, sweep) and shows the
//! result in a wgpu viewport.

pub mod actions;
pub mod app;
pub mod config;
pub mod panels;
pub mod state;
pub mod theme;

// Re-exports for convenience
pub use app::SketchEditorApp;
pub use config::{AppConfig, ConfigManager, SharedConfig};
pub use state::{AppAction, AppState, SharedAppState};
