//! Parameter panel backed by ImGui sliders

use imgui::{Condition, SliderFlags, Ui};

use crate::strategy::{GeometryStrategy, ParameterPanel, ParameterSpec};

/// printf-style format showing as many decimals as `step` needs
pub fn display_format(step: f32) -> String {
    let decimals = if step >= 1.0 {
        0
    } else {
        (-step.log10()).ceil().max(0.0) as usize
    };
    format!("%.{}f", decimals)
}

/// [`ParameterPanel`] drawing one ImGui slider per parameter
pub struct ImguiPanel<'ui> {
    ui: &'ui Ui,
}

impl<'ui> ImguiPanel<'ui> {
    pub fn new(ui: &'ui Ui) -> Self {
        Self { ui }
    }
}

impl ParameterPanel for ImguiPanel<'_> {
    fn slider(&mut self, spec: &mut ParameterSpec) -> bool {
        let before = spec.value;

        let moved = if spec.is_integral() {
            let mut value = spec.value.round() as i32;
            let moved = self
                .ui
                .slider_config(spec.name, spec.min as i32, spec.max as i32)
                .flags(SliderFlags::ALWAYS_CLAMP)
                .build(&mut value);
            if moved {
                spec.value = value as f32;
            }
            moved
        } else {
            self.ui
                .slider_config(spec.name, spec.min, spec.max)
                .display_format(display_format(spec.step))
                .flags(SliderFlags::ALWAYS_CLAMP)
                .build(&mut spec.value)
        };

        if !moved {
            return false;
        }
        spec.quantize();
        spec.value != before
    }
}

/// Window with one slider per parameter of `strategy`
///
/// `on_change` runs once for every edited parameter, after the edit.
pub fn geometry_editor_window(
    ui: &Ui,
    strategy: &mut dyn GeometryStrategy,
    on_change: &mut dyn FnMut(&dyn GeometryStrategy),
) {
    let display_size = ui.io().display_size;
    if display_size[0] <= 0.0 || display_size[1] <= 0.0 {
        return;
    }

    ui.window(strategy.name())
        .position([display_size[0] - 20.0, 20.0], Condition::FirstUseEver)
        .position_pivot([1.0, 0.0])
        .always_auto_resize(true)
        .collapsible(true)
        .build(|| {
            strategy.bind_editor(&mut ImguiPanel::new(ui), on_change);
            ui.separator();
            ui.text_disabled("drag: rotate / right drag: pan / wheel: zoom");
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_follows_step_precision() {
        assert_eq!(display_format(1.0), "%.0f");
        assert_eq!(display_format(0.1), "%.1f");
        assert_eq!(display_format(0.01), "%.2f");
    }
}
