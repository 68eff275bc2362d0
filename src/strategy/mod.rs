//! # Geometry Strategies
//!
//! A strategy owns a set of bounded parameters, turns them into geometry on
//! demand, and knows how to present them on a parameter panel. The set of
//! strategies is closed: [`Primitive`] enumerates every shape the editor can
//! show, so adding one is a compile-checked change.
//!
//! ## Usage
//!
//! ```rust
//! use primview::strategy::{GeometryStrategy, Primitive, PrimitiveKind};
//!
//! let circle = Primitive::new(PrimitiveKind::Circle);
//! let geometry = circle.create_geometry();
//! assert!(geometry.vertex_count() > 0);
//! ```

pub mod circle;
pub mod cone;
pub mod cuboid;
pub mod parameters;

use std::fmt;
use std::str::FromStr;

pub use circle::CircleStrategy;
pub use cone::ConeStrategy;
pub use cuboid::CuboidStrategy;
pub use parameters::{GeometryParameters, ParameterSpec};

use crate::gfx::geometry::GeometryData;

/// Something that can present a bounded numeric control
///
/// Implementations must leave `spec` inside its range, normally by calling
/// [`ParameterSpec::quantize`] after an edit.
pub trait ParameterPanel {
    /// Shows one slider and returns true when the user changed its value
    fn slider(&mut self, spec: &mut ParameterSpec) -> bool;
}

/// Pluggable provider of a geometry and its editable parameters
pub trait GeometryStrategy {
    /// Display name, also used as the panel title
    fn name(&self) -> &'static str;

    fn parameters(&self) -> &GeometryParameters;

    fn parameters_mut(&mut self) -> &mut GeometryParameters;

    /// Builds geometry from the current parameters
    ///
    /// Parameters are always in range, so this cannot fail.
    fn create_geometry(&self) -> GeometryData;

    /// Registers one slider per parameter on `panel`
    ///
    /// Each edited parameter is updated in place, then `on_change` is invoked
    /// once with the strategy in its new state.
    fn bind_editor(
        &mut self,
        panel: &mut dyn ParameterPanel,
        on_change: &mut dyn FnMut(&dyn GeometryStrategy),
    );
}

/// Shared slider loop used by every concrete strategy
pub(crate) fn bind_sliders<S: GeometryStrategy>(
    strategy: &mut S,
    panel: &mut dyn ParameterPanel,
    on_change: &mut dyn FnMut(&dyn GeometryStrategy),
) {
    for index in 0..strategy.parameters().len() {
        if panel.slider(&mut strategy.parameters_mut()[index]) {
            on_change(&*strategy);
        }
    }
}

/// Names of the available primitives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    Circle,
    Box,
    Cone,
}

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; 3] = [PrimitiveKind::Circle, PrimitiveKind::Box, PrimitiveKind::Cone];

    pub fn as_str(self) -> &'static str {
        match self {
            PrimitiveKind::Circle => "circle",
            PrimitiveKind::Box => "box",
            PrimitiveKind::Cone => "cone",
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a primitive name is not recognised
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown primitive '{0}' (expected one of: circle, box, cone)")]
pub struct ParsePrimitiveError(pub String);

impl FromStr for PrimitiveKind {
    type Err = ParsePrimitiveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        PrimitiveKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == wanted)
            .ok_or_else(|| ParsePrimitiveError(s.to_string()))
    }
}

/// Every strategy the editor can host
#[derive(Debug, Clone)]
pub enum Primitive {
    Circle(CircleStrategy),
    Cuboid(CuboidStrategy),
    Cone(ConeStrategy),
}

impl Primitive {
    /// Creates the strategy for `kind` with its default parameters
    pub fn new(kind: PrimitiveKind) -> Self {
        match kind {
            PrimitiveKind::Circle => Primitive::Circle(CircleStrategy::default()),
            PrimitiveKind::Box => Primitive::Cuboid(CuboidStrategy::default()),
            PrimitiveKind::Cone => Primitive::Cone(ConeStrategy::default()),
        }
    }

    pub fn kind(&self) -> PrimitiveKind {
        match self {
            Primitive::Circle(_) => PrimitiveKind::Circle,
            Primitive::Cuboid(_) => PrimitiveKind::Box,
            Primitive::Cone(_) => PrimitiveKind::Cone,
        }
    }

    fn inner(&self) -> &dyn GeometryStrategy {
        match self {
            Primitive::Circle(s) => s,
            Primitive::Cuboid(s) => s,
            Primitive::Cone(s) => s,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn GeometryStrategy {
        match self {
            Primitive::Circle(s) => s,
            Primitive::Cuboid(s) => s,
            Primitive::Cone(s) => s,
        }
    }
}

impl GeometryStrategy for Primitive {
    fn name(&self) -> &'static str {
        self.inner().name()
    }

    fn parameters(&self) -> &GeometryParameters {
        self.inner().parameters()
    }

    fn parameters_mut(&mut self) -> &mut GeometryParameters {
        self.inner_mut().parameters_mut()
    }

    fn create_geometry(&self) -> GeometryData {
        self.inner().create_geometry()
    }

    fn bind_editor(
        &mut self,
        panel: &mut dyn ParameterPanel,
        on_change: &mut dyn FnMut(&dyn GeometryStrategy),
    ) {
        self.inner_mut().bind_editor(panel, on_change);
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::{ParameterPanel, ParameterSpec};

    /// Panel that applies queued edits by parameter name, one frame at a time
    #[derive(Default)]
    pub struct ScriptedPanel {
        pub edits: Vec<(&'static str, f32)>,
        pub shown: Vec<&'static str>,
    }

    impl ScriptedPanel {
        pub fn with_edit(name: &'static str, value: f32) -> Self {
            Self {
                edits: vec![(name, value)],
                shown: Vec::new(),
            }
        }
    }

    impl ParameterPanel for ScriptedPanel {
        fn slider(&mut self, spec: &mut ParameterSpec) -> bool {
            self.shown.push(spec.name);
            match self.edits.iter().position(|(name, _)| *name == spec.name) {
                Some(i) => {
                    let (_, value) = self.edits.remove(i);
                    spec.set(value);
                    true
                }
                None => false,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::ScriptedPanel;
    use super::*;
    use rand::Rng;

    #[test]
    fn kinds_parse_case_insensitively() {
        assert_eq!("circle".parse::<PrimitiveKind>(), Ok(PrimitiveKind::Circle));
        assert_eq!(" BOX ".parse::<PrimitiveKind>(), Ok(PrimitiveKind::Box));
        assert_eq!("Cone".parse::<PrimitiveKind>(), Ok(PrimitiveKind::Cone));
        assert!("torus".parse::<PrimitiveKind>().is_err());
    }

    #[test]
    fn primitive_round_trips_its_kind() {
        for kind in PrimitiveKind::ALL {
            assert_eq!(Primitive::new(kind).kind(), kind);
        }
    }

    #[test]
    fn every_in_bounds_parameter_set_produces_vertices() {
        let mut rng = rand::rng();

        for kind in PrimitiveKind::ALL {
            let mut primitive = Primitive::new(kind);
            for _ in 0..200 {
                for spec in primitive.parameters_mut().iter_mut() {
                    let value = rng.random_range(spec.min..=spec.max);
                    spec.set(value);
                }
                assert!(primitive.parameters().iter().all(ParameterSpec::in_bounds));

                let geometry = primitive.create_geometry();
                assert!(geometry.vertex_count() > 0, "{kind} produced no vertices");
                let count = geometry.vertex_count() as u32;
                assert!(geometry.indices.iter().all(|&i| i < count));
            }
        }
    }

    #[test]
    fn bound_editor_shows_every_parameter() {
        let mut primitive = Primitive::new(PrimitiveKind::Box);
        let mut panel = ScriptedPanel::default();
        let mut changes = 0;

        primitive.bind_editor(&mut panel, &mut |_| changes += 1);

        assert_eq!(changes, 0);
        assert_eq!(
            panel.shown,
            vec!["width", "height", "depth", "widthSegments", "heightSegments", "depthSegments"]
        );
    }

    #[test]
    fn edit_mutates_before_notifying() {
        let mut primitive = Primitive::new(PrimitiveKind::Circle);
        let mut panel = ScriptedPanel::with_edit("radius", 0.5);
        let mut seen = Vec::new();

        primitive.bind_editor(&mut panel, &mut |strategy| {
            seen.push(strategy.parameters().value("radius"));
        });

        assert_eq!(seen, vec![Some(0.5)]);
        assert_eq!(primitive.parameters().value("radius"), Some(0.5));
    }

    #[test]
    fn out_of_range_edit_is_clamped_by_the_panel() {
        let mut primitive = Primitive::new(PrimitiveKind::Circle);
        let mut panel = ScriptedPanel::with_edit("segments", 500.0);

        primitive.bind_editor(&mut panel, &mut |_| {});

        assert_eq!(primitive.parameters().value("segments"), Some(64.0));
    }
}
