//! Global uniform bindings for camera, lights and fog
//!
//! Bound to slot 0 in every pipeline. The layout of [`GlobalUniformContent`]
//! MUST match `Globals` in `scene.wgsl` exactly.

use cgmath::{InnerSpace, Vector3};

use crate::{
    gfx::{
        camera::CameraUniform,
        scene::{DirectionalLight, Fog},
    },
    wgpu_utils::{single_uniform_bind_group, single_uniform_layout, UniformBuffer},
};

/// Lights beyond this count are ignored by the shader
pub const MAX_LIGHTS: usize = 4;

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightUniform {
    /// Unit vector pointing toward the light
    pub direction: [f32; 4],
    /// Color premultiplied by intensity
    pub color: [f32; 4],
}

impl From<&DirectionalLight> for LightUniform {
    fn from(light: &DirectionalLight) -> Self {
        let direction = if light.position.magnitude2() > 0.0 {
            light.position.normalize()
        } else {
            Vector3::unit_y()
        };
        let [r, g, b] = light.color;

        Self {
            direction: direction.extend(0.0).into(),
            color: [r * light.intensity, g * light.intensity, b * light.intensity, 1.0],
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlobalUniformContent {
    pub view_proj: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub eye: [f32; 4],
    pub lights: [LightUniform; MAX_LIGHTS],
    /// rgb, w = 1 when fog is enabled
    pub fog_color: [f32; 4],
    /// fog near, fog far, light count, encode srgb
    pub params: [f32; 4],
}

impl GlobalUniformContent {
    pub fn new(camera: &CameraUniform, lights: &[DirectionalLight], fog: Option<Fog>) -> Self {
        let mut packed = [LightUniform::default(); MAX_LIGHTS];
        for (slot, light) in packed.iter_mut().zip(lights) {
            *slot = light.into();
        }
        let light_count = lights.len().min(MAX_LIGHTS);

        let (fog_color, near, far) = match fog {
            Some(Fog { color, near, far }) => ([color[0], color[1], color[2], 1.0], near, far),
            None => ([0.0; 4], 0.0, 0.0),
        };

        Self {
            view_proj: camera.view_proj,
            view: camera.view,
            eye: camera.view_position,
            lights: packed,
            fog_color,
            params: [near, far, light_count as f32, 0.0],
        }
    }

    /// Asks the shader to encode sRGB itself, for non-sRGB surface formats
    pub fn with_srgb_encoding(mut self, enabled: bool) -> Self {
        self.params[3] = if enabled { 1.0 } else { 0.0 };
        self
    }
}

pub type GlobalUBO = UniformBuffer<GlobalUniformContent>;

/// Owns the global uniform buffer and its bind group
pub struct GlobalBindings {
    ubo: GlobalUBO,
    layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
}

impl GlobalBindings {
    pub fn new(device: &wgpu::Device) -> Self {
        let ubo = GlobalUBO::new(device);
        let layout = single_uniform_layout(
            device,
            wgpu::ShaderStages::VERTEX_FRAGMENT,
            "Globals Bind Group Layout",
        );
        let bind_group =
            single_uniform_bind_group(device, &layout, ubo.binding_resource(), "Global Bind Group");

        Self {
            ubo,
            layout,
            bind_group,
        }
    }

    pub fn update(&mut self, queue: &wgpu::Queue, content: GlobalUniformContent) {
        self.ubo.update_content(queue, content);
    }

    pub fn layout(&self) -> &wgpu::BindGroupLayout {
        &self.layout
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_size_is_a_multiple_of_sixteen() {
        assert_eq!(std::mem::size_of::<GlobalUniformContent>() % 16, 0);
        assert_eq!(std::mem::size_of::<LightUniform>(), 32);
    }

    #[test]
    fn lights_are_normalized_and_capped() {
        let light = DirectionalLight::new(Vector3::new(0.0, 200.0, 0.0), [1.0, 1.0, 1.0], 3.0);
        let lights = vec![light; 6];

        let content = GlobalUniformContent::new(&CameraUniform::default(), &lights, None);

        assert_eq!(content.params[2], MAX_LIGHTS as f32);
        let [x, y, z, w] = content.lights[0].direction;
        assert!(x.abs() < 1e-6 && (y - 1.0).abs() < 1e-6 && z.abs() < 1e-6 && w == 0.0);
        assert_eq!(content.lights[0].color, [3.0, 3.0, 3.0, 1.0]);
        assert_eq!(content.fog_color[3], 0.0);
    }

    #[test]
    fn fog_range_is_packed() {
        let fog = Fog {
            color: [0.0, 0.0, 0.0],
            near: 1.0,
            far: 3.5,
        };
        let content = GlobalUniformContent::new(&CameraUniform::default(), &[], Some(fog));
        assert_eq!(content.fog_color[3], 1.0);
        assert_eq!(&content.params[..3], &[1.0, 3.5, 0.0]);
    }
}
