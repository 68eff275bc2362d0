//! GPU resource management
//!
//! Render targets and the global uniform bindings shared by every pipeline.

pub mod global_bindings;
pub mod texture_resource;

// Re-export main types
pub use global_bindings::{GlobalBindings, GlobalUniformContent, LightUniform, MAX_LIGHTS};
pub use texture_resource::TextureResource;
