//! Scattered spinning cubes: ten nodes sharing one cuboid shape and one
//! appearance, a point light circling the scene, and an orbit camera.
//! Hold space to spin every cube; drag to orbit; scroll to zoom.

use spinview::{
    config::ViewerConfig,
    data_structures::{
        appearance::Appearance,
        scene_graph::{PointLight, Scene},
        shape::Shape,
    },
};

fn main() {
    let mut scene = Scene::new();

    let cube = scene.add_shape(Shape::cuboid(1.0, 1.0, 1.0));
    let teal = scene.add_appearance(Appearance::new([0.2, 0.8, 0.7, 1.0]));

    // One shape, one appearance, ten transforms.
    let mut rng = rand::thread_rng();
    scene.scatter(cube, teal, 10, 5.0, &mut rng);

    scene.add_light(PointLight::new(
        spinview::Vector3::new(8.0, 10.0, 8.0),
        [1.0, 1.0, 1.0],
        1.0,
    ));

    let _ = spinview::flow::run(scene, ViewerConfig::default());
}
