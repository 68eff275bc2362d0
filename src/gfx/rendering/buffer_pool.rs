//! GPU storage for uploaded geometry
//!
//! Every upload gets its own vertex and index buffers plus a small uniform
//! buffer holding the model matrix and material of the drawable that uses it.

use std::collections::HashMap;
use std::sync::Arc;

use log::debug;
use wgpu::util::DeviceExt;

use super::vertex::Vertex3D;
use crate::gfx::scene::{Drawable, GeometryBuffers, GeometryHandle, Material};
use crate::wgpu_utils::{single_uniform_bind_group, single_uniform_layout, UniformBuffer};

/// Per-drawable shader data. MUST match `Draw` in `scene.wgsl`.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct DrawUniform {
    pub model: [[f32; 4]; 4],
    /// Linear rgb and opacity
    pub color: [f32; 4],
    /// shininess, flat shading, vertex colors, lit
    pub flags: [f32; 4],
}

impl DrawUniform {
    pub fn new(model: cgmath::Matrix4<f32>, material: &Material) -> Self {
        let flag = |on: bool| if on { 1.0 } else { 0.0 };
        let [r, g, b] = material.color();

        let flags = match *material {
            Material::Phong {
                flat_shading,
                shininess,
                ..
            } => [shininess, flag(flat_shading), 0.0, 1.0],
            Material::LineBasic { vertex_colors, .. } => [0.0, 0.0, flag(vertex_colors), 0.0],
        };

        Self {
            model: model.into(),
            color: [r, g, b, material.opacity()],
            flags,
        }
    }
}

/// Buffers behind one [`GeometryHandle`]
pub struct GpuGeometry {
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub index_count: u32,
    draw_uniform: UniformBuffer<DrawUniform>,
    pub draw_bind_group: wgpu::BindGroup,
}

pub struct GpuBufferPool {
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    draw_layout: wgpu::BindGroupLayout,
    entries: HashMap<GeometryHandle, GpuGeometry>,
    next_id: u64,
}

impl GpuBufferPool {
    pub fn new(device: Arc<wgpu::Device>, queue: Arc<wgpu::Queue>) -> Self {
        let draw_layout = single_uniform_layout(
            &device,
            wgpu::ShaderStages::VERTEX_FRAGMENT,
            "Draw Bind Group Layout",
        );

        Self {
            device,
            queue,
            draw_layout,
            entries: HashMap::new(),
            next_id: 0,
        }
    }

    /// Layout of the per-drawable bind group (slot 1)
    pub fn draw_layout(&self) -> &wgpu::BindGroupLayout {
        &self.draw_layout
    }

    pub fn get(&self, handle: GeometryHandle) -> Option<&GpuGeometry> {
        self.entries.get(&handle)
    }

    /// Writes the model matrix and material a drawable is rendered with
    pub fn prepare(&mut self, drawable: &Drawable, model: cgmath::Matrix4<f32>) {
        if let Some(entry) = self.entries.get_mut(&drawable.geometry) {
            entry
                .draw_uniform
                .update_content(&self.queue, DrawUniform::new(model, &drawable.material));
        }
    }
}

impl GeometryBuffers for GpuBufferPool {
    fn upload(&mut self, label: &str, vertices: &[Vertex3D], indices: &[u32]) -> GeometryHandle {
        let vertex_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{} Vertex Buffer", label)),
                contents: bytemuck::cast_slice(vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });
        let index_buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{} Index Buffer", label)),
                contents: bytemuck::cast_slice(indices),
                usage: wgpu::BufferUsages::INDEX,
            });

        let draw_uniform = UniformBuffer::<DrawUniform>::new(&self.device);
        let draw_bind_group = single_uniform_bind_group(
            &self.device,
            &self.draw_layout,
            draw_uniform.binding_resource(),
            &format!("{} Draw Bind Group", label),
        );

        let handle = GeometryHandle::new(self.next_id);
        self.next_id += 1;
        self.entries.insert(
            handle,
            GpuGeometry {
                vertex_buffer,
                index_buffer,
                index_count: indices.len() as u32,
                draw_uniform,
                draw_bind_group,
            },
        );

        handle
    }

    fn release(&mut self, handle: GeometryHandle) {
        if let Some(entry) = self.entries.remove(&handle) {
            entry.vertex_buffer.destroy();
            entry.index_buffer.destroy();
            entry.draw_uniform.buffer().destroy();
            debug!("released geometry #{}", handle.id());
        }
    }

    fn live_count(&self) -> usize {
        self.entries.len()
    }
}
