//! # Scene
//!
//! A flat list of named nodes, each owning one or two drawables, plus the
//! lights and fog they are rendered with. GPU memory sits behind the
//! [`GeometryBuffers`] seam so the scene itself stays plain data.
//!
//! ## Key Components
//!
//! - [`Scene`] - nodes, directional lights, optional fog
//! - [`Node`] / [`RenderableGroup`] - named drawables with a transform
//! - [`Material`] - Phong surfaces and basic lines
//! - [`SceneComposer`] - swaps the editable model in and out of the scene

pub mod buffers;
pub mod composer;
pub mod material;
pub mod node;
pub mod scene;

pub use buffers::{GeometryBuffers, GeometryHandle};
pub use composer::SceneComposer;
pub use material::{hex_to_linear, Material};
pub use node::{Drawable, Node, NodeKind, RenderableGroup, Transform};
pub use scene::{DirectionalLight, Fog, Scene};
