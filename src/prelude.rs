//! # primview Prelude
//!
//! Commonly used types in one import.
//!
//! ```no_run
//! use primview::prelude::*;
//!
//! fn main() -> primview::Result<()> {
//!     primview::init_logging();
//!     PrimviewApp::new(Scenario::GeometryEditor(PrimitiveKind::Cone), ViewerConfig::from_env())?.run()
//! }
//! ```

// Application and configuration
pub use crate::app::{PrimviewApp, Scenario};
pub use crate::config::ViewerConfig;
pub use crate::error::{Result, ViewerError};

// Geometry and strategies
pub use crate::gfx::geometry::{GeometryData, LineData};
pub use crate::strategy::{
    GeometryParameters, GeometryStrategy, ParameterPanel, ParameterSpec, Primitive, PrimitiveKind,
};

// Scene graph
pub use crate::gfx::scene::{
    DirectionalLight, Drawable, Fog, GeometryBuffers, Material, Node, Scene, SceneComposer,
};

// Viewport
pub use crate::gfx::camera::{CameraSettings, PerspectiveCamera};
pub use crate::viewport::{Container, RenderSurface, ViewportBuilder, ViewportController};

// Common external types
pub use cgmath::Vector3;
pub use std::time::Duration;
