//! Line sets for scene helpers (axes and ground grid)

use super::LineData;

/// Three axis lines from the origin, colored red (X), green (Y) and blue (Z)
///
/// Each line fades slightly toward its tip so direction is readable.
pub fn generate_axes(size: f32) -> LineData {
    let mut lines = LineData::default();

    lines.push_segment([0.0, 0.0, 0.0], [size, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 0.6, 0.0]);
    lines.push_segment([0.0, 0.0, 0.0], [0.0, size, 0.0], [0.0, 1.0, 0.0], [0.6, 1.0, 0.0]);
    lines.push_segment([0.0, 0.0, 0.0], [0.0, 0.0, size], [0.0, 0.0, 1.0], [0.0, 0.6, 1.0]);

    lines
}

/// Square grid on the XZ plane centered at the origin
///
/// # Arguments
/// * `size` - Side length of the grid
/// * `divisions` - Number of cells along each side
/// * `center_color` - Linear RGB color of the two center lines
/// * `line_color` - Linear RGB color of every other line
pub fn generate_grid(size: f32, divisions: u32, center_color: [f32; 3], line_color: [f32; 3]) -> LineData {
    let mut lines = LineData::default();

    let divisions = divisions.max(1);
    let center = divisions / 2;
    let step = size / divisions as f32;
    let half = size * 0.5;

    for i in 0..=divisions {
        let k = -half + i as f32 * step;
        let color = if i == center { center_color } else { line_color };

        lines.push_segment([-half, 0.0, k], [half, 0.0, k], color, color);
        lines.push_segment([k, 0.0, -half], [k, 0.0, half], color, color);
    }

    lines
}
