//! Rectangular prism primitive with per-axis subdivision

use super::{bind_sliders, GeometryParameters, GeometryStrategy, ParameterPanel, ParameterSpec};
use crate::gfx::geometry::{generate_box, GeometryData};

const WIDTH: usize = 0;
const HEIGHT: usize = 1;
const DEPTH: usize = 2;
const WIDTH_SEGMENTS: usize = 3;
const HEIGHT_SEGMENTS: usize = 4;
const DEPTH_SEGMENTS: usize = 5;

#[derive(Debug, Clone)]
pub struct CuboidStrategy {
    params: GeometryParameters,
}

impl Default for CuboidStrategy {
    fn default() -> Self {
        Self {
            params: GeometryParameters::new(vec![
                ParameterSpec::new("width", 1.0, 0.1, 10.0, 0.01),
                ParameterSpec::new("height", 1.0, 0.1, 10.0, 0.01),
                ParameterSpec::new("depth", 1.0, 0.1, 10.0, 0.01),
                ParameterSpec::new("widthSegments", 1.0, 1.0, 10.0, 1.0),
                ParameterSpec::new("heightSegments", 1.0, 1.0, 10.0, 1.0),
                ParameterSpec::new("depthSegments", 1.0, 1.0, 10.0, 1.0),
            ]),
        }
    }
}

impl GeometryStrategy for CuboidStrategy {
    fn name(&self) -> &'static str {
        "Box"
    }

    fn parameters(&self) -> &GeometryParameters {
        &self.params
    }

    fn parameters_mut(&mut self) -> &mut GeometryParameters {
        &mut self.params
    }

    fn create_geometry(&self) -> GeometryData {
        generate_box(
            self.params[WIDTH].value,
            self.params[HEIGHT].value,
            self.params[DEPTH].value,
            self.params[WIDTH_SEGMENTS].value as u32,
            self.params[HEIGHT_SEGMENTS].value as u32,
            self.params[DEPTH_SEGMENTS].value as u32,
        )
    }

    fn bind_editor(
        &mut self,
        panel: &mut dyn ParameterPanel,
        on_change: &mut dyn FnMut(&dyn GeometryStrategy),
    ) {
        bind_sliders(self, panel, on_change);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_a_unit_cube() {
        let geometry = CuboidStrategy::default().create_geometry();
        assert_eq!(geometry.vertex_count(), 24);
        assert_eq!(geometry.triangle_count(), 12);
    }

    #[test]
    fn segment_counts_subdivide_faces() {
        let mut cuboid = CuboidStrategy::default();
        for name in ["widthSegments", "heightSegments", "depthSegments"] {
            if let Some(spec) = cuboid.parameters_mut().get_mut(name) {
                spec.set(2.0);
            }
        }

        let geometry = cuboid.create_geometry();
        assert_eq!(geometry.vertex_count(), 6 * 9);
        assert_eq!(geometry.triangle_count(), 6 * 8);
    }
}
