//! Core rendering functionality
//!
//! Handles render pipelines, GPU geometry storage and frame rendering.

pub mod buffer_pool;
pub mod pipeline_manager;
pub mod render_engine;
pub mod render_pass_ext;
pub mod vertex;

// Re-export main types
pub use buffer_pool::{DrawUniform, GpuBufferPool, GpuGeometry};
pub use pipeline_manager::{PipelineConfig, PipelineManager};
pub use render_engine::RenderEngine;
pub use vertex::Vertex3D;
