//! # Viewport
//!
//! Owns the camera and the render surface, follows the container's size and
//! runs the per-frame lifecycle.
//!
//! ## Usage
//!
//! ```no_run
//! use primview::viewport::{resize_channel, ViewportBuilder};
//!
//! // let (notifier, subscription) = resize_channel();
//! // let viewport = ViewportBuilder::new()
//! //     .surface(render_engine)
//! //     .container(window.clone())
//! //     .resize_events(subscription)
//! //     .build()?;
//! ```

pub mod controller;
pub mod resize;
pub mod surface;

pub use controller::{SceneUpdate, ViewportBuilder, ViewportController};
pub use resize::{resize_channel, ResizeNotifier, ResizeSubscription};
pub use surface::{Container, RenderSurface};
