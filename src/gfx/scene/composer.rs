//! Swaps the editable model in and out of the scene
//!
//! The composer owns the scene and a reserved node name. Each rebuild uploads
//! the strategy's geometry and its wireframe, detaches and releases whatever
//! group held the name before, then inserts the new group. The scene never
//! holds two groups under the reserved name.

use log::debug;

use super::buffers::GeometryBuffers;
use super::material::Material;
use super::node::{Drawable, Node, NodeKind, RenderableGroup};
use super::scene::Scene;
use crate::gfx::geometry::LineData;
use crate::strategy::GeometryStrategy;

pub struct SceneComposer {
    scene: Scene,
    group_name: String,
    surface_material: Material,
    outline_material: Material,
    rebuilds: usize,
}

impl SceneComposer {
    pub fn new(
        scene: Scene,
        group_name: impl Into<String>,
        surface_material: Material,
        outline_material: Material,
    ) -> Self {
        Self {
            scene,
            group_name: group_name.into(),
            surface_material,
            outline_material,
            rebuilds: 0,
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn group_name(&self) -> &str {
        &self.group_name
    }

    /// Number of completed rebuilds
    pub fn rebuild_count(&self) -> usize {
        self.rebuilds
    }

    /// The live group under the reserved name
    pub fn group(&self) -> Option<&RenderableGroup> {
        match &self.scene.find(&self.group_name)?.kind {
            NodeKind::Group(group) => Some(group),
            NodeKind::Mesh(_) | NodeKind::Lines(_) => None,
        }
    }

    /// Replaces the reserved group with fresh geometry from `strategy`
    pub fn rebuild(&mut self, strategy: &dyn GeometryStrategy, buffers: &mut dyn GeometryBuffers) {
        let geometry = strategy.create_geometry();
        let outline = LineData::wireframe(&geometry);

        let group = RenderableGroup {
            surface: Drawable::mesh(strategy.name(), &geometry, self.surface_material, buffers),
            outline: Drawable::lines(strategy.name(), &outline, self.outline_material, buffers),
        };

        if let Some(previous) = self.scene.remove(&self.group_name) {
            previous.release(buffers);
        }
        self.scene.add(Node::group(self.group_name.clone(), group));
        self.rebuilds += 1;

        debug!(
            "rebuilt '{}' from {}: {} vertices, {} triangles, {} edges ({} live buffers)",
            self.group_name,
            strategy.name(),
            geometry.vertex_count(),
            geometry.triangle_count(),
            outline.segment_count(),
            buffers.live_count()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::scene::buffers::testing::{BufferEvent, CountingBuffers};
    use crate::strategy::testing::ScriptedPanel;
    use crate::strategy::{Primitive, PrimitiveKind};

    const MODEL: &str = "myModel";

    fn composer() -> SceneComposer {
        SceneComposer::new(
            Scene::new(),
            MODEL,
            Material::phong(0x156289).with_opacity(0.75),
            Material::line_basic(0xffffff).with_opacity(0.8),
        )
    }

    #[test]
    fn first_rebuild_inserts_one_group() {
        let mut composer = composer();
        let mut buffers = CountingBuffers::default();

        composer.rebuild(&Primitive::new(PrimitiveKind::Circle), &mut buffers);

        assert_eq!(composer.scene().count_named(MODEL), 1);
        assert_eq!(composer.rebuild_count(), 1);
        assert_eq!(buffers.live_count(), 2);

        let group = composer.group().expect("group should exist");
        assert_eq!(group.surface.vertex_count, 34);
        assert_eq!(group.surface.index_count, 32 * 3);
        assert_eq!(group.outline.index_count, 64 * 2);
    }

    #[test]
    fn repeated_rebuilds_keep_exactly_one_group() {
        let mut composer = composer();
        let mut buffers = CountingBuffers::default();

        for kind in [PrimitiveKind::Box, PrimitiveKind::Cone, PrimitiveKind::Circle] {
            composer.rebuild(&Primitive::new(kind), &mut buffers);
            assert_eq!(composer.scene().count_named(MODEL), 1);
            assert_eq!(buffers.live_count(), 2);
        }
        assert_eq!(composer.scene().len(), 1);
    }

    #[test]
    fn other_nodes_survive_a_rebuild() {
        let mut composer = composer();
        let mut buffers = CountingBuffers::default();
        let axes = crate::gfx::geometry::generate_axes(10.0);
        let axes = Drawable::lines("axes", &axes, Material::line_basic(0xffffff), &mut buffers);
        composer.scene_mut().add(Node::lines("axes", axes));

        composer.rebuild(&Primitive::new(PrimitiveKind::Box), &mut buffers);
        composer.rebuild(&Primitive::new(PrimitiveKind::Box), &mut buffers);

        assert!(composer.scene().find("axes").is_some());
        assert_eq!(buffers.live_count(), 3);
    }

    #[test]
    fn identical_parameters_give_identical_counts() {
        let mut composer = composer();
        let mut buffers = CountingBuffers::default();
        let cone = Primitive::new(PrimitiveKind::Cone);

        composer.rebuild(&cone, &mut buffers);
        let first = composer.group().cloned().expect("group should exist");
        composer.rebuild(&cone, &mut buffers);
        let second = composer.group().cloned().expect("group should exist");

        assert_ne!(first.surface.geometry, second.surface.geometry);
        assert_eq!(first.surface.vertex_count, second.surface.vertex_count);
        assert_eq!(first.surface.index_count, second.surface.index_count);
        assert_eq!(first.outline.index_count, second.outline.index_count);
    }

    #[test]
    fn radius_edit_rebuilds_once_and_frees_the_old_group() {
        let mut composer = composer();
        let mut buffers = CountingBuffers::default();
        let mut circle = Primitive::new(PrimitiveKind::Circle);

        composer.rebuild(&circle, &mut buffers);
        let old = composer.group().cloned().expect("group should exist");
        buffers.log.clear();

        let mut panel = ScriptedPanel::with_edit("radius", 0.5);
        circle.bind_editor(&mut panel, &mut |strategy| composer.rebuild(strategy, &mut buffers));

        assert_eq!(composer.rebuild_count(), 2);
        assert_eq!(composer.scene().count_named(MODEL), 1);

        // new buffers are uploaded, then the old pair is released
        assert!(matches!(buffers.log[0], BufferEvent::Upload(..)));
        assert!(matches!(buffers.log[1], BufferEvent::Upload(..)));
        assert_eq!(
            buffers.releases(),
            vec![old.surface.geometry, old.outline.geometry]
        );
        assert!(!buffers.is_live(old.surface.geometry));
        assert!(!buffers.is_live(old.outline.geometry));

        let new = composer.group().expect("group should exist");
        assert!(buffers.is_live(new.surface.geometry));
        assert_eq!(new.surface.vertex_count, 34);
    }
}
