//! Disc primitive: radius, segment count and angular span

use super::{bind_sliders, GeometryParameters, GeometryStrategy, ParameterPanel, ParameterSpec};
use crate::gfx::geometry::{generate_circle, GeometryData};

const RADIUS: usize = 0;
const SEGMENTS: usize = 1;
const THETA_START: usize = 2;
const THETA_LENGTH: usize = 3;

/// Flat disc or sector; angles are edited in degrees
#[derive(Debug, Clone)]
pub struct CircleStrategy {
    params: GeometryParameters,
}

impl Default for CircleStrategy {
    fn default() -> Self {
        Self {
            params: GeometryParameters::new(vec![
                ParameterSpec::new("radius", 1.0, 0.1, 1.0, 0.01),
                ParameterSpec::new("segments", 32.0, 1.0, 64.0, 1.0),
                ParameterSpec::new("thetaStart", 0.0, 0.0, 360.0, 0.1),
                ParameterSpec::new("thetaLength", 360.0, 0.0, 360.0, 0.1),
            ]),
        }
    }
}

impl GeometryStrategy for CircleStrategy {
    fn name(&self) -> &'static str {
        "Circle"
    }

    fn parameters(&self) -> &GeometryParameters {
        &self.params
    }

    fn parameters_mut(&mut self) -> &mut GeometryParameters {
        &mut self.params
    }

    fn create_geometry(&self) -> GeometryData {
        generate_circle(
            self.params[RADIUS].value,
            self.params[SEGMENTS].value as u32,
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
