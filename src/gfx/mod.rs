//! # Graphics Module
//!
//! Everything between parameter values and pixels.
//!
//! - **Geometry** ([`geometry`]) - CPU-side primitives, wireframes and helper line sets
//! - **Scene** ([`scene`]) - nodes, materials, lights and the model composer
//! - **Camera** ([`camera`]) - perspective camera and orbit controls
//! - **Rendering** ([`rendering`]) - wgpu engine, pipelines and the GPU buffer pool
//! - **Resources** ([`resources`]) - global uniforms, depth and MSAA targets
//!
//! Geometry and scene code never touch the GPU directly; uploads go through
//! the [`GeometryBuffers`](scene::GeometryBuffers) seam so both can be tested
//! without a device.

pub mod camera;
pub mod geometry;
pub mod rendering;
pub mod resources;
pub mod scene;

// Re-export commonly used types
pub use camera::PerspectiveCamera;
pub use rendering::render_engine::RenderEngine;
