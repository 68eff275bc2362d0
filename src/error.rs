//! Error types for the primview viewer
//!
//! Every failure here is an environment precondition that the viewer cannot
//! recover from. Callers propagate these to `main` and exit.

use thiserror::Error;

/// Errors raised while setting up or driving the viewer
#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[error("failed to create drawing surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no compatible GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to open GPU device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("surface frame unavailable: {0}")]
    Frame(wgpu::SurfaceError),

    #[error("failed to build render pipelines: {0}")]
    Pipeline(String),

    #[error("viewport is missing its {0}")]
    MissingViewportPart(&'static str),
}

pub type Result<T> = std::result::Result<T, ViewerError>;
