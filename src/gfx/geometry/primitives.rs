//! # Primitive Shape Generation
//!
//! Filled primitives with normals and texture coordinates. Layouts follow the
//! usual real-time conventions: Y up, counter-clockwise front faces, discs in
//! the XY plane facing +Z.

use super::GeometryData;

/// Generate a flat disc (or sector) in the XY plane
///
/// # Arguments
/// * `radius` - Disc radius
/// * `segments` - Number of triangular wedges, at least 3
/// * `theta_start` - Start angle in radians, measured from +X
/// * `theta_length` - Angular span in radians
///
/// A center vertex is followed by `segments + 1` rim vertices, so a full
/// circle repeats its first rim position at the seam.
pub fn generate_circle(radius: f32, segments: u32, theta_start: f32, theta_length: f32) -> GeometryData {
    let mut data = GeometryData::new();
    let segs = segments.max(3);

    data.push_vertex([0.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.5, 0.5]);

    for s in 0..=segs {
        let angle = theta_start + s as f32 / segs as f32 * theta_length;
        let (sin_a, cos_a) = angle.sin_cos();
        let x = radius * cos_a;
        let y = radius * sin_a;

        data.push_vertex(
            [x, y, 0.0],
            [0.0, 0.0, 1.0],
            [(cos_a + 1.0) * 0.5, (sin_a + 1.0) * 0.5],
        );
    }

    for i in 1..=segs {
        data.indices.extend_from_slice(&[i, i + 1, 0]);
    }

    data
}

/// Generate an axis-aligned box centered at the origin
///
/// Each face is an independent grid so normals stay sharp along the edges.
/// Segment counts below 1 are raised to 1.
pub fn generate_box(
    width: f32,
    height: f32,
    depth: f32,
    width_segments: u32,
    height_segments: u32,
    depth_segments: u32,
) -> GeometryData {
    let mut data = GeometryData::new();

    let ws = width_segments.max(1);
    let hs = height_segments.max(1);
    let ds = depth_segments.max(1);

    // (u axis, v axis, w axis, u dir, v dir, face width, face height, face depth, grid x, grid y)
    let faces = [
        (2, 1, 0, -1.0, -1.0, depth, height, width, ds, hs),   // +X
        (2, 1, 0, 1.0, -1.0, depth, height, -width, ds, hs),   // -X
        (0, 2, 1, 1.0, 1.0, width, depth, height, ws, ds),     // +Y
        (0, 2, 1, 1.0, -1.0, width, depth, -height, ws, ds),   // -Y
        (0, 1, 2, 1.0, -1.0, width, height, depth, ws, hs),    // +Z
        (0, 1, 2, -1.0, -1.0, width, height, -depth, ws, hs),  // -Z
    ];

    for (u, v, w, udir, vdir, face_w, face_h, face_d, grid_x, grid_y) in faces {
        build_plane(&mut data, [u, v, w], [udir, vdir], [face_w, face_h, face_d], grid_x, grid_y);
    }

    data
}

fn build_plane(
    data: &mut GeometryData,
    axes: [usize; 3],
    dirs: [f32; 2],
    size: [f32; 3],
    grid_x: u32,
    grid_y: u32,
) {
    let [u, v, w] = axes;
    let [width, height, depth] = size;

    let segment_width = width / grid_x as f32;
    let segment_height = height / grid_y as f32;
    let half_width = width * 0.5;
    let half_height = height * 0.5;
    let half_depth = depth * 0.5;
    let start = data.vertices.len() as u32;
    let row = grid_x + 1;

    for iy in 0..=grid_y {
        let y = iy as f32 * segment_height - half_height;
        for ix in 0..=grid_x {
            let x = ix as f32 * segment_width - half_width;

            let mut position = [0.0; 3];
            position[u] = x * dirs[0];
            position[v] = y * dirs[1];
            position[w] = half_depth;

            let mut normal = [0.0; 3];
            normal[w] = if depth > 0.0 { 1.0 } else { -1.0 };

            data.push_vertex(
                position,
                normal,
                [ix as f32 / grid_x as f32, 1.0 - iy as f32 / grid_y as f32],
            );
        }
    }

    for iy in 0..grid_y {
        for ix in 0..grid_x {
            let a = start + ix + row * iy;
            let b = start + ix + row * (iy + 1);
            let c = start + ix + 1 + row * (iy + 1);
            let d = start + ix + 1 + row * iy;

            data.indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }
}

/// Options for [`generate_cylinder`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CylinderOptions {
    pub radius_top: f32,
    pub radius_bottom: f32,
    pub height: f32,
    pub radial_segments: u32,
    pub height_segments: u32,
    pub open_ended: bool,
    pub theta_start: f32,
    pub theta_length: f32,
}

impl Default for CylinderOptions {
    fn default() -> Self {
        Self {
            radius_top: 1.0,
            radius_bottom: 1.0,
            height: 1.0,
            radial_segments: 32,
            height_segments: 1,
            open_ended: false,
            theta_start: 0.0,
            theta_length: std::f32::consts::TAU,
        }
    }
}

/// Generate a cylinder (or frustum) along the Y axis, centered at the origin
pub fn generate_cylinder(options: CylinderOptions) -> GeometryData {
    let mut data = GeometryData::new();

    let radial = options.radial_segments.max(3);
    let rows = options.height_segments.max(1);
    let half_height = options.height * 0.5;
    let slope = (options.radius_bottom - options.radius_top) / options.height;

    let mut grid: Vec<Vec<u32>> = Vec::with_capacity(rows as usize + 1);

    for y in 0..=rows {
        let v = y as f32 / rows as f32;
        let radius = v * (options.radius_bottom - options.radius_top) + options.radius_top;
        let mut row = Vec::with_capacity(radial as usize + 1);

        for x in 0..=radial {
            let u = x as f32 / radial as f32;
            let theta = u * options.theta_length + options.theta_start;
            let (sin_t, cos_t) = theta.sin_cos();

            let normal = normalize([sin_t, slope, cos_t]);
            row.push(data.vertices.len() as u32);
            data.push_vertex(
                [radius * sin_t, -v * options.height + half_height, radius * cos_t],
                normal,
                [u, 1.0 - v],
            );
        }

        grid.push(row);
    }

    for x in 0..radial as usize {
        for y in 0..rows as usize {
            let a = grid[y][x];
            let b = grid[y + 1][x];
            let c = grid[y + 1][x + 1];
            let d = grid[y][x + 1];

            // Rows that meet at a point would only produce zero-area triangles
            if options.radius_top > 0.0 || y != 0 {
                data.indices.extend_from_slice(&[a, b, d]);
            }
            if options.radius_bottom > 0.0 || y != rows as usize - 1 {
                data.indices.extend_from_slice(&[b, c, d]);
            }
        }
    }

    if !options.open_ended {
        if options.radius_top > 0.0 {
            generate_cap(&mut data, &options, radial, true);
        }
        if options.radius_bottom > 0.0 {
            generate_cap(&mut data, &options, radial, false);
        }
    }

    data
}

fn generate_cap(data: &mut GeometryData, options: &CylinderOptions, radial: u32, top: bool) {
    let radius = if top { options.radius_top } else { options.radius_bottom };
    let sign = if top { 1.0 } else { -1.0 };
    let y = options.height * 0.5 * sign;

    let center_start = data.vertices.len() as u32;
    for _ in 0..radial {
        data.push_vertex([0.0, y, 0.0], [0.0, sign, 0.0], [0.5, 0.5]);
    }

    let rim_start = data.vertices.len() as u32;
    for x in 0..=radial {
        let u = x as f32 / radial as f32;
        let theta = u * options.theta_length + options.theta_start;
        let (sin_t, cos_t) = theta.sin_cos();

        data.push_vertex(
            [radius * sin_t, y, radius * cos_t],
            [0.0, sign, 0.0],
            [cos_t * 0.5 + 0.5, sin_t * 0.5 * sign + 0.5],
        );
    }

    for x in 0..radial {
        let c = center_start + x;
        let i = rim_start + x;

        if top {
            data.indices.extend_from_slice(&[i, i + 1, c]);
        } else {
            data.indices.extend_from_slice(&[i + 1, i, c]);
        }
    }
}

/// Generate a cone along the Y axis with its apex at +height/2
pub fn generate_cone(
    radius: f32,
    height: f32,
    radial_segments: u32,
    height_segments: u32,
    theta_start: f32,
    theta_length: f32,
) -> GeometryData {
    generate_cylinder(CylinderOptions {
        radius_top: 0.0,
        radius_bottom: radius,
        height,
        radial_segments,
        height_segments,
        open_ended: false,
        theta_start,
        theta_length,
    })
}

fn normalize(v: [f32; 3]) -> [f32; 3] {
    let length = (v[0] * v[0] + v[1] * v[1] + v[2] * v[2]).sqrt();
    if length > 0.0 {
        [v[0] / length, v[1] / length, v[2] / length]
    } else {
        v
    }
}
