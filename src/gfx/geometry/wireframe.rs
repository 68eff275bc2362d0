//! Wireframe derivation
//!
//! Turns a triangle mesh into a line list containing every unique edge once.
//! Edges are compared by vertex position rather than by index, so meshes
//! that duplicate vertices along seams (a full circle, the edges of a box)
//! still produce a single line per visible edge.

use std::collections::HashSet;

use super::{GeometryData, LineData};

type PositionKey = [i32; 3];

/// Positions that agree to four decimal places are the same point
const WELD_PRECISION: f32 = 1.0e4;

fn position_key(p: [f32; 3]) -> PositionKey {
    p.map(|c| (c * WELD_PRECISION).round() as i32)
}

impl LineData {
    /// Builds the wireframe of `geometry`
    ///
    /// The result shares the source vertex positions; its indices reference
    /// the first vertex seen at each end of an edge.
    pub fn wireframe(geometry: &GeometryData) -> LineData {
        let mut seen: HashSet<(PositionKey, PositionKey)> = HashSet::new();
        let mut indices = Vec::new();

        for triangle in geometry.indices.chunks_exact(3) {
            for (start, end) in [
                (triangle[0], triangle[1]),
                (triangle[1], triangle[2]),
                (triangle[2], triangle[0]),
            ] {
                let a = position_key(geometry.vertices[start as usize]);
                let b = position_key(geometry.vertices[end as usize]);
                if a == b {
                    continue;
                }

                let key = if a < b { (a, b) } else { (b, a) };
                if seen.insert(key) {
                    indices.push(start);
                    indices.push(end);
                }
            }
        }

        LineData {
            vertices: geometry.vertices.clone(),
            colors: Vec::new(),
            indices,
        }
    }
}
