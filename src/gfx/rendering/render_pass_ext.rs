//! Drawing uploaded geometry with a render pass

use super::buffer_pool::GpuGeometry;

pub trait DrawGeometry {
    fn draw_geometry(&mut self, geometry: &GpuGeometry);
}

impl DrawGeometry for wgpu::RenderPass<'_> {
    fn draw_geometry(&mut self, geometry: &GpuGeometry) {
        if geometry.index_count == 0 {
            return;
        }
        self.set_bind_group(1, &geometry.draw_bind_group, &[]);
        self.set_vertex_buffer(0, geometry.vertex_buffer.slice(..));
        self.set_index_buffer(geometry.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        self.draw_indexed(0..geometry.index_count, 0, 0..1);
    }
}
