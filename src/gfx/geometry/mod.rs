//! # Procedural Geometry Generation
//!
//! CPU-side geometry for the viewer: filled primitives, wireframe outlines
//! derived from them, and the line sets used by scene helpers.
//!
//! ## Supported Primitives
//!
//! - **Circle**: flat disc or sector with configurable angular span
//! - **Box**: rectangular prism with independent segment counts per axis
//! - **Cone / Cylinder**: open or capped, with configurable angular span
//!
//! ## Usage
//!
//! ```rust
//! use primview::gfx::geometry::{generate_circle, LineData};
//!
//! let disc = generate_circle(1.0, 32, 0.0, std::f32::consts::TAU);
//! assert_eq!(disc.vertex_count(), 34);
//!
//! let outline = LineData::wireframe(&disc);
//! assert_eq!(outline.segment_count(), 64);
//! ```

pub mod helpers;
pub mod primitives;
pub mod wireframe;

pub use helpers::{generate_axes, generate_grid};
pub use primitives::*;

use crate::gfx::rendering::vertex::Vertex3D;

/// Represents generated geometry data ready for GPU upload
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryData {
    /// Vertex positions (x, y, z)
    pub vertices: Vec<[f32; 3]>,
    /// Texture coordinates (u, v)
    pub tex_coords: Vec<[f32; 2]>,
    /// Normal vectors (x, y, z)
    pub normals: Vec<[f32; 3]>,
    /// Triangle indices (counter-clockwise winding)
    pub indices: Vec<u32>,
}

impl GeometryData {
    /// Create a new empty geometry data structure
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            tex_coords: Vec::new(),
            normals: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Get the number of vertices in this geometry
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of triangles in this geometry
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub(crate) fn push_vertex(&mut self, position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) {
        self.vertices.push(position);
        self.normals.push(normal);
        self.tex_coords.push(uv);
    }

    /// Interleaves positions and normals into the renderer's vertex format
    pub fn to_vertices(&self) -> Vec<Vertex3D> {
        self.vertices
            .iter()
            .enumerate()
            .map(|(i, &position)| Vertex3D {
                position,
                normal: self.normals.get(i).copied().unwrap_or([0.0, 0.0, 1.0]),
                color: [1.0, 1.0, 1.0],
            })
            .collect()
    }
}

impl Default for GeometryData {
    fn default() -> Self {
        Self::new()
    }
}

/// Line-list geometry: every consecutive index pair is one segment
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LineData {
    pub vertices: Vec<[f32; 3]>,
    /// Per-vertex colors in linear RGB; empty means "use the material color"
    pub colors: Vec<[f32; 3]>,
    pub indices: Vec<u32>,
}

impl LineData {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn segment_count(&self) -> usize {
        self.indices.len() / 2
    }

    pub(crate) fn push_segment(&mut self, a: [f32; 3], b: [f32; 3], color_a: [f32; 3], color_b: [f32; 3]) {
        let base = self.vertices.len() as u32;
        self.vertices.push(a);
        self.vertices.push(b);
        self.colors.push(color_a);
        self.colors.push(color_b);
        self.indices.push(base);
        self.indices.push(base + 1);
    }

    pub fn to_vertices(&self) -> Vec<Vertex3D> {
        self.vertices
            .iter()
            .enumerate()
            .map(|(i, &position)| Vertex3D {
                position,
                normal: [0.0, 0.0, 0.0],
                color: self.colors.get(i).copied().unwrap_or([1.0, 1.0, 1.0]),
            })
            .collect()
    }
}
