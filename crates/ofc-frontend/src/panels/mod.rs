//! UI panels

mod controls;
mod status;
mod viewport;

pub use controls::ControlsPanel;
pub use status::{render_error_dialog, render_status_bar};
pub use viewport::ViewportPanel;
