//! WGPU utility functions and helpers

pub mod binding_types;
pub mod uniform_buffer;

pub use binding_types::{single_uniform_bind_group, single_uniform_layout};
pub use uniform_buffer::UniformBuffer;
