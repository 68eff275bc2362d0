// src/lib.rs
//! primview
//!
//! A small wgpu viewer for procedurally generated primitives. Ships two
//! scenarios: a spinning cube, and a geometry editor where a circle, box or
//! cone is rebuilt live from slider values and drawn with a wireframe on top.

pub mod app;
pub mod config;
pub mod error;
pub mod gfx;
pub mod prelude;
pub mod scenarios;
pub mod strategy;
pub mod ui;
pub mod viewport;
pub mod wgpu_utils;

// Re-export main types for convenience
pub use app::{PrimviewApp, Scenario};
pub use config::ViewerConfig;
pub use error::{Result, ViewerError};

/// Installs `env_logger`, defaulting to `info` for this crate
///
/// `RUST_LOG` overrides the default as usual. Safe to call more than once.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("warn,primview=info"),
    )
    .try_init();
}

/// Opens a window running `scenario` with configuration from the environment
pub fn run(scenario: Scenario) -> Result<()> {
    PrimviewApp::new(scenario, ViewerConfig::from_env())?.run()
}
