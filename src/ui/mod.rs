//! # User Interface
//!
//! Dear ImGui integration for the viewer.
//!
//! - [`UiManager`] - ImGui context, winit platform glue and wgpu renderer
//! - [`ImguiPanel`] - [`ParameterPanel`](crate::strategy::ParameterPanel) drawing sliders
//! - [`geometry_editor_window`] - the editor's parameter window
//!
//! Input is offered to the UI first; camera controls only see events the UI
//! did not capture.

pub mod manager;
pub mod panel;

// Re-export main types
pub use manager::UiManager;
pub use panel::{geometry_editor_window, ImguiPanel};
