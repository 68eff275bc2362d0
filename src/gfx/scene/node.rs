//! Scene nodes and the drawables they own

use cgmath::{Matrix4, Rad, Vector3};

use super::buffers::{GeometryBuffers, GeometryHandle};
use super::material::Material;
use crate::gfx::geometry::{GeometryData, LineData};

/// Position, XYZ Euler rotation (radians) and uniform scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vector3<f32>,
    pub rotation: Vector3<f32>,
    pub scale: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vector3::new(0.0, 0.0, 0.0),
            rotation: Vector3::new(0.0, 0.0, 0.0),
            scale: 1.0,
        }
    }
}

impl Transform {
    /// Model matrix `T * Rx * Ry * Rz * S`
    pub fn matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.position)
            * Matrix4::from_angle_x(Rad(self.rotation.x))
            * Matrix4::from_angle_y(Rad(self.rotation.y))
            * Matrix4::from_angle_z(Rad(self.rotation.z))
            * Matrix4::from_scale(self.scale)
    }
}

/// One uploaded geometry paired with the material it is drawn with
#[derive(Debug, Clone, PartialEq)]
pub struct Drawable {
    pub geometry: GeometryHandle,
    pub material: Material,
    pub index_count: u32,
    pub vertex_count: u32,
}

impl Drawable {
    /// Uploads a triangle mesh
    pub fn mesh(
        label: &str,
        data: &GeometryData,
        material: Material,
        buffers: &mut dyn GeometryBuffers,
    ) -> Self {
        let geometry = buffers.upload(label, &data.to_vertices(), &data.indices);
        Self {
            geometry,
            material,
            index_count: data.indices.len() as u32,
            vertex_count: data.vertex_count() as u32,
        }
    }

    /// Uploads a line list
    pub fn lines(
        label: &str,
        data: &LineData,
        material: Material,
        buffers: &mut dyn GeometryBuffers,
    ) -> Self {
        let geometry = buffers.upload(label, &data.to_vertices(), &data.indices);
        Self {
            geometry,
            material,
            index_count: data.indices.len() as u32,
            vertex_count: data.vertex_count() as u32,
        }
    }
}

/// A filled surface with its wireframe drawn on top
#[derive(Debug, Clone, PartialEq)]
pub struct RenderableGroup {
    pub surface: Drawable,
    pub outline: Drawable,
}

#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    Mesh(Drawable),
    Lines(Drawable),
    Group(RenderableGroup),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub name: String,
    pub transform: Transform,
    pub visible: bool,
    pub kind: NodeKind,
}

impl Node {
    pub fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            name: name.into(),
            transform: Transform::default(),
            visible: true,
            kind,
        }
    }

    pub fn mesh(name: impl Into<String>, drawable: Drawable) -> Self {
        Self::new(name, NodeKind::Mesh(drawable))
    }

    pub fn lines(name: impl Into<String>, drawable: Drawable) -> Self {
        Self::new(name, NodeKind::Lines(drawable))
    }

    pub fn group(name: impl Into<String>, group: RenderableGroup) -> Self {
        Self::new(name, NodeKind::Group(group))
    }

    /// Every drawable owned by this node, in draw order
    pub fn drawables(&self) -> Vec<&Drawable> {
        match &self.kind {
            NodeKind::Mesh(drawable) | NodeKind::Lines(drawable) => vec![drawable],
            NodeKind::Group(group) => vec![&group.surface, &group.outline],
        }
    }

    /// Consumes the node and frees all of its GPU buffers
    pub fn release(self, buffers: &mut dyn GeometryBuffers) {
        for drawable in self.drawables() {
            buffers.release(drawable.geometry);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::geometry::generate_box;
    use crate::gfx::scene::buffers::testing::CountingBuffers;
    use cgmath::Vector4;

    #[test]
    fn transform_applies_scale_then_rotation_then_translation() {
        let transform = Transform {
            position: Vector3::new(1.0, 0.0, 0.0),
            rotation: Vector3::new(0.0, 0.0, std::f32::consts::FRAC_PI_2),
            scale: 2.0,
        };

        let moved = transform.matrix() * Vector4::new(1.0, 0.0, 0.0, 1.0);
        let expected = Vector4::new(1.0, 2.0, 0.0, 1.0);
        for i in 0..4 {
            assert!((moved[i] - expected[i]).abs() < 1e-5, "{moved:?}");
        }
    }

    #[test]
    fn releasing_a_group_frees_both_drawables() {
        let mut buffers = CountingBuffers::default();
        let cube = generate_box(1.0, 1.0, 1.0, 1, 1, 1);
        let outline = LineData::wireframe(&cube);

        let node = Node::group(
            "model",
            RenderableGroup {
                surface: Drawable::mesh("surface", &cube, Material::phong(0x156289), &mut buffers),
                outline: Drawable::lines("outline", &outline, Material::line_basic(0xffffff), &mut buffers),
            },
        );
        assert_eq!(buffers.live_count(), 2);
        assert_eq!(node.drawables()[0].index_count, 36);

        node.release(&mut buffers);
        assert_eq!(buffers.live_count(), 0);
    }
}
