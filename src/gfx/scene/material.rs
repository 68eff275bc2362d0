//! Surface and line materials
//!
//! Colors are authored as `0xRRGGBB` sRGB hex and stored in linear space so
//! the shader can light them directly.

/// Converts one sRGB channel in `[0, 1]` to linear
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Converts a `0xRRGGBB` sRGB color to linear RGB
pub fn hex_to_linear(hex: u32) -> [f32; 3] {
    let channel = |shift: u32| srgb_to_linear(((hex >> shift) & 0xff) as f32 / 255.0);
    [channel(16), channel(8), channel(0)]
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    /// Lit by the scene's directional lights
    Phong {
        color: [f32; 3],
        opacity: f32,
        flat_shading: bool,
        double_sided: bool,
        shininess: f32,
    },
    /// Unlit lines
    LineBasic {
        color: [f32; 3],
        opacity: f32,
        vertex_colors: bool,
    },
}

impl Material {
    pub const DEFAULT_SHININESS: f32 = 30.0;

    pub fn phong(hex: u32) -> Self {
        Material::Phong {
            color: hex_to_linear(hex),
            opacity: 1.0,
            flat_shading: false,
            double_sided: false,
            shininess: Self::DEFAULT_SHININESS,
        }
    }

    pub fn line_basic(hex: u32) -> Self {
        Material::LineBasic {
            color: hex_to_linear(hex),
            opacity: 1.0,
            vertex_colors: false,
        }
    }

    /// Opacity below 1 makes the material blend and draw after opaque ones
    pub fn with_opacity(mut self, value: f32) -> Self {
        match &mut self {
            Material::Phong { opacity, .. } | Material::LineBasic { opacity, .. } => {
                *opacity = value.clamp(0.0, 1.0)
            }
        }
        self
    }

    pub fn with_flat_shading(mut self, enabled: bool) -> Self {
        if let Material::Phong { flat_shading, .. } = &mut self {
            *flat_shading = enabled;
        }
        self
    }

    pub fn with_double_sided(mut self, enabled: bool) -> Self {
        if let Material::Phong { double_sided, .. } = &mut self {
            *double_sided = enabled;
        }
        self
    }

    pub fn with_vertex_colors(mut self, enabled: bool) -> Self {
        if let Material::LineBasic { vertex_colors, .. } = &mut self {
            *vertex_colors = enabled;
        }
        self
    }

    pub fn color(&self) -> [f32; 3] {
        match self {
            Material::Phong { color, .. } | Material::LineBasic { color, .. } => *color,
        }
    }

    pub fn opacity(&self) -> f32 {
        match self {
            Material::Phong { opacity, .. } | Material::LineBasic { opacity, .. } => *opacity,
        }
    }

    pub fn is_transparent(&self) -> bool {
        self.opacity() < 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_conversion_hits_the_endpoints() {
        assert_eq!(hex_to_linear(0xffffff), [1.0, 1.0, 1.0]);
        assert_eq!(hex_to_linear(0x000000), [0.0, 0.0, 0.0]);

        let [r, g, b] = hex_to_linear(0x44aa88);
        assert!(r < g && b < g);
        // sRGB 0x44 is roughly 0.058 linear
        assert!((r - 0.0578).abs() < 1e-3);
    }

    #[test]
    fn builders_only_touch_their_own_variant() {
        let surface = Material::phong(0x156289)
            .with_flat_shading(true)
            .with_double_sided(true)
            .with_vertex_colors(true)
            .with_opacity(0.75);

        match surface {
            Material::Phong {
                flat_shading,
                double_sided,
                opacity,
                ..
            } => {
                assert!(flat_shading && double_sided);
                assert_eq!(opacity, 0.75);
            }
            Material::LineBasic { .. } => panic!("expected a phong material"),
        }
        assert!(surface.is_transparent());
        assert!(!Material::line_basic(0xffffff).is_transparent());
    }
}
