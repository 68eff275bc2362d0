//! Cone primitive
//!
//! Apex at +height/2 on the Y axis, capped base, optional angular span.

use super::{bind_sliders, GeometryParameters, GeometryStrategy, ParameterPanel, ParameterSpec};
use crate::gfx::geometry::{generate_cone, GeometryData};

const RADIUS: usize = 0;
const HEIGHT: usize = 1;
const RADIAL_SEGMENTS: usize = 2;
const HEIGHT_SEGMENTS: usize = 3;
const THETA_START: usize = 4;
const THETA_LENGTH: usize = 5;

#[derive(Debug, Clone)]
pub struct ConeStrategy {
    params: GeometryParameters,
}

impl Default for ConeStrategy {
    fn default() -> Self {
        Self {
            params: GeometryParameters::new(vec![
                ParameterSpec::new("radius", 1.0, 0.1, 2.0, 0.01),
                ParameterSpec::new("height", 1.0, 0.1, 3.0, 0.01),
                ParameterSpec::new("radialSegments", 32.0, 3.0, 64.0, 1.0),
                ParameterSpec::new("heightSegments", 1.0, 1.0, 16.0, 1.0),
                ParameterSpec::new("thetaStart", 0.0, 0.0, 360.0, 0.1),
                ParameterSpec::new("thetaLength", 360.0, 0.0, 360.0, 0.1),
            ]),
        }
    }
}

impl GeometryStrategy for ConeStrategy {
    fn name(&self) -> &'static str {
        "Cone"
    }

    fn parameters(&self) -> &GeometryParameters {
        &self.params
    }

    fn parameters_mut(&mut self) -> &mut GeometryParameters {
        &mut self.params
    }

    fn create_geometry(&self) -> GeometryData {
        generate_cone(
            self.params[RADIUS].value,
            self.params[HEIGHT].value,
            self.params[RADIAL_SEGMENTS].value as u32,
            self.params[HEIGHT_SEGMENTS].value as u32,
            self.params[THETA_START].value.to_radians(),
            self.params[THETA_LENGTH].value.to_radians(),
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
    fn apex_sits_on_the_axis() {
        let geometry = ConeStrategy::default().create_geometry();
        let apex = geometry.vertices[0];
        assert_eq!(apex[0], 0.0);
        assert!((apex[1] - 0.5).abs() < 1e-6);
        assert_eq!(apex[2], 0.0);
    }

    #[test]
    fn height_rows_add_rings() {
        let mut cone = ConeStrategy::default();
        let flat = cone.create_geometry().vertex_count();
        if let Some(rows) = cone.parameters_mut().get_mut("heightSegments") {
            rows.set(3.0);
        }
        assert_eq!(cone.create_geometry().vertex_count(), flat + 2 * 33);
    }
}
