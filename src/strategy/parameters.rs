//! Bounded numeric parameters edited through the parameter panel

use std::ops::{Index, IndexMut};

/// One editable value with its slider range
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSpec {
    pub name: &'static str,
    pub value: f32,
    pub min: f32,
    pub max: f32,
    pub step: f32,
}

impl ParameterSpec {
    pub fn new(name: &'static str, value: f32, min: f32, max: f32, step: f32) -> Self {
        let mut spec = Self {
            name,
            value,
            min,
            max,
            step,
        };
        spec.quantize();
        spec
    }

    /// Clamps the value into `[min, max]` and snaps it to the step grid.
    ///
    /// Panels call this after every edit; strategies rely on it and never
    /// validate values themselves.
    pub fn quantize(&mut self) {
        let mut value = self.value.clamp(self.min, self.max);
        if self.step > 0.0 {
            let snapped = self.min + ((value - self.min) / self.step).round() * self.step;
            // values already on the grid are kept bit-exact
            if (snapped - value).abs() > self.step * 1.0e-3 {
                value = snapped;
            }
        }
        self.value = value.clamp(self.min, self.max);
    }

    /// Sets a new value through the same clamp-and-snap path a panel uses
    pub fn set(&mut self, value: f32) {
        self.value = value;
        self.quantize();
    }

    /// True when the step is whole so the control can show an integer
    pub fn is_integral(&self) -> bool {
        self.step >= 1.0 && self.step.fract() == 0.0 && self.min.fract() == 0.0
    }

    pub fn in_bounds(&self) -> bool {
        self.value >= self.min && self.value <= self.max
    }
}

/// Ordered set of parameters owned by one strategy
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GeometryParameters {
    specs: Vec<ParameterSpec>,
}

impl GeometryParameters {
    pub fn new(specs: Vec<ParameterSpec>) -> Self {
        Self { specs }
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&ParameterSpec> {
        self.specs.iter().find(|spec| spec.name == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut ParameterSpec> {
        self.specs.iter_mut().find(|spec| spec.name == name)
    }

    pub fn value(&self, name: &str) -> Option<f32> {
        self.get(name).map(|spec| spec.value)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ParameterSpec> {
        self.specs.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, ParameterSpec> {
        self.specs.iter_mut()
    }
}

impl Index<usize> for GeometryParameters {
    type Output = ParameterSpec;

    fn index(&self, index: usize) -> &ParameterSpec {
        &self.specs[index]
    }
}

impl IndexMut<usize> for GeometryParameters {
    fn index_mut(&mut self, index: usize) -> &mut ParameterSpec {
        &mut self.specs[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantize_clamps_into_range() {
        let mut spec = ParameterSpec::new("radius", 1.0, 0.1, 1.0, 0.01);
        spec.set(4.0);
        assert_eq!(spec.value, 1.0);
        spec.set(-3.0);
        assert!((spec.value - 0.1).abs() < 1e-6);
    }

    #[test]
    fn quantize_snaps_to_step() {
        let mut spec = ParameterSpec::new("segments", 32.0, 1.0, 64.0, 1.0);
        spec.set(12.6);
        assert_eq!(spec.value, 13.0);
        assert!(spec.is_integral());

        let fine = ParameterSpec::new("thetaStart", 0.0, 0.0, 360.0, 0.1);
        assert!(!fine.is_integral());
    }

    #[test]
    fn constructor_repairs_out_of_range_defaults() {
        let spec = ParameterSpec::new("width", 50.0, 0.1, 10.0, 0.01);
        assert!(spec.in_bounds());
        assert!((spec.value - 10.0).abs() < 1e-4);
    }

    #[test]
    fn lookup_by_name_and_index() {
        let mut params = GeometryParameters::new(vec![
            ParameterSpec::new("width", 1.0, 0.1, 10.0, 0.01),
            ParameterSpec::new("height", 2.0, 0.1, 10.0, 0.01),
        ]);

        assert_eq!(params.len(), 2);
        assert_eq!(params.value("height"), Some(2.0));
        assert_eq!(params.value("depth"), None);
        assert_eq!(params[0].name, "width");

        if let Some(spec) = params.get_mut("width") {
            spec.set(3.0);
        }
        assert_eq!(params[0].value, 3.0);
    }
}
