//! Scene setup for the two bundled scenarios

use std::time::Duration;

use cgmath::Vector3;
use log::info;

use crate::gfx::geometry::{generate_axes, generate_box, generate_grid};
use crate::gfx::scene::{
    hex_to_linear, DirectionalLight, Drawable, Fog, GeometryBuffers, Material, Node, Scene,
    SceneComposer,
};
use crate::strategy::GeometryStrategy;

/// Node name of the spinning cube
pub const CUBE_NODE: &str = "cube";

/// Reserved name of the editable group in the geometry editor
pub const MODEL_NODE: &str = "myModel";

const WHITE: u32 = 0xffffff;

/// One lit cube in front of the camera
pub fn spinning_cube_scene(buffers: &mut dyn GeometryBuffers) -> Scene {
    let mut scene = Scene::new();

    let cube = generate_box(1.0, 1.0, 1.0, 1, 1, 1);
    let drawable = Drawable::mesh(CUBE_NODE, &cube, Material::phong(0x44aa88), buffers);
    scene.add(Node::mesh(CUBE_NODE, drawable));

    scene.add_light(DirectionalLight::new(
        Vector3::new(-1.0, 2.0, 4.0),
        hex_to_linear(WHITE),
        1.0,
    ));

    info!("spinning cube scene ready");
    scene
}

/// Update hook turning the cube by one radian per second on X and Y
pub fn spin_cube(elapsed: Duration, scene: &mut Scene) {
    let angle = elapsed.as_secs_f32() % 360.0;
    if let Some(cube) = scene.find_mut(CUBE_NODE) {
        cube.transform.rotation.x = angle;
        cube.transform.rotation.y = angle;
    }
}

/// Fogged scene with helpers, three lights and the editable model
///
/// The model is built once from `strategy` before returning.
pub fn geometry_editor_scene(
    strategy: &dyn GeometryStrategy,
    buffers: &mut dyn GeometryBuffers,
) -> SceneComposer {
    let mut scene = Scene::new();
    scene.set_fog(Some(Fog {
        color: hex_to_linear(0x000000),
        near: 1.0,
        far: 3.5,
    }));

    for position in [
        Vector3::new(0.0, 200.0, 0.0),
        Vector3::new(100.0, 200.0, 100.0),
        Vector3::new(-100.0, -200.0, -100.0),
    ] {
        scene.add_light(DirectionalLight::new(position, hex_to_linear(WHITE), 3.0));
    }

    let helper_material = Material::line_basic(WHITE).with_vertex_colors(true);

    let axes = Drawable::lines("axes", &generate_axes(10.0), helper_material, buffers);
    scene.add(Node::lines("axes", axes));

    let grid = generate_grid(5.0, 20, hex_to_linear(WHITE), hex_to_linear(0x444444));
    let grid = Drawable::lines("grid", &grid, helper_material, buffers);
    scene.add(Node::lines("grid", grid));

    let surface = Material::phong(0x156289)
        .with_flat_shading(true)
        .with_double_sided(true)
        .with_opacity(0.75);
    let outline = Material::line_basic(WHITE).with_opacity(0.8);

    let mut composer = SceneComposer::new(scene, MODEL_NODE, surface, outline);
    composer.rebuild(strategy, buffers);

    info!("geometry editor scene ready with {}", strategy.name());
    composer
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::scene::buffers::testing::CountingBuffers;
    use crate::strategy::{Primitive, PrimitiveKind};

    #[test]
    fn cube_scene_has_one_mesh_and_one_light() {
        let mut buffers = CountingBuffers::default();
        let scene = spinning_cube_scene(&mut buffers);

        assert_eq!(scene.len(), 1);
        assert_eq!(scene.lights.len(), 1);
        assert!(scene.fog.is_none());
        assert_eq!(buffers.live_count(), 1);

        let cube = scene.find(CUBE_NODE).map(|node| node.drawables()[0].index_count);
        assert_eq!(cube, Some(36));
    }

    #[test]
    fn spin_sets_both_axes_from_elapsed_seconds() {
        let mut buffers = CountingBuffers::default();
        let mut scene = spinning_cube_scene(&mut buffers);

        spin_cube(Duration::from_millis(1500), &mut scene);
        let rotation = scene.find(CUBE_NODE).map(|node| node.transform.rotation);
        assert_eq!(rotation, Some(Vector3::new(1.5, 1.5, 0.0)));

        spin_cube(Duration::from_secs(361), &mut scene);
        let rotation = scene.find(CUBE_NODE).map(|node| node.transform.rotation.x);
        assert_eq!(rotation, Some(1.0));
    }

    #[test]
    fn editor_scene_holds_helpers_and_one_model() {
        let mut buffers = CountingBuffers::default();
        let composer = geometry_editor_scene(&Primitive::new(PrimitiveKind::Box), &mut buffers);
        let scene = composer.scene();

        assert_eq!(scene.lights.len(), 3);
        assert!(scene.lights.iter().all(|light| light.intensity == 3.0));
        assert_eq!(scene.fog.map(|fog| (fog.near, fog.far)), Some((1.0, 3.5)));
        assert!(scene.find("axes").is_some());
        assert!(scene.find("grid").is_some());
        assert_eq!(scene.count_named(MODEL_NODE), 1);
        // axes + grid + surface + outline
        assert_eq!(buffers.live_count(), 4);
    }

    #[test]
    fn editor_model_is_translucent_over_opaque_helpers() {
        let mut buffers = CountingBuffers::default();
        let composer = geometry_editor_scene(&Primitive::new(PrimitiveKind::Circle), &mut buffers);

        let group = composer.group().map(|g| (g.surface.material.opacity(), g.outline.material.opacity()));
        assert_eq!(group, Some((0.75, 0.8)));
    }
}
