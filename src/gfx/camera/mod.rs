pub mod orbit_controls;
pub mod perspective;

// Re-export main types
pub use orbit_controls::{OrbitBounds, OrbitControls};
pub use perspective::{CameraSettings, CameraUniform, PerspectiveCamera, OPENGL_TO_WGPU_MATRIX};
