use approx::assert_relative_eq;
use rand::SeedableRng;
use rand::rngs::StdRng;
use spinview::{
    KeyCode,
    context::InputState,
    data_structures::{
        appearance::Appearance,
        scene_graph::{Scene, Transformable},
        shape::Shape,
        transform::SPIN_STEP,
    },
};

fn ten_cubes(scene: &mut Scene) -> Vec<spinview::data_structures::scene_graph::NodeHandle> {
    let cube = scene.add_shape(Shape::cuboid(1.0, 1.0, 1.0));
    let style = scene.add_appearance(Appearance::default());
    let mut rng = StdRng::seed_from_u64(11);
    scene.scatter(cube, style, 10, 5.0, &mut rng)
}

#[test]
fn flag_down_leaves_every_rotation_unchanged() {
    let mut scene = Scene::new();
    let nodes = ten_cubes(&mut scene);
    let before: Vec<_> = nodes
        .iter()
        .map(|handle| scene.node(*handle).transform.clone())
        .collect();

    let input = InputState::new(KeyCode::Space);
    scene.advance(&input, SPIN_STEP);

    for (handle, transform) in nodes.iter().zip(before) {
        assert_eq!(scene.node(*handle).transform, transform);
    }
}

#[test]
fn flag_up_adds_the_same_fixed_increment_to_all() {
    let mut scene = Scene::new();
    let nodes = ten_cubes(&mut scene);

    let mut input = InputState::new(KeyCode::Space);
    input.on_key(KeyCode::Space, true);
    scene.advance(&input, SPIN_STEP);

    for handle in nodes {
        assert_relative_eq!(scene.node(handle).transform.yaw(), SPIN_STEP, epsilon = 1e-6);
    }
}

#[test]
fn non_spinning_nodes_are_skipped() {
    let mut scene = Scene::new();
    let cube = scene.add_shape(Shape::cuboid(1.0, 1.0, 1.0));
    let style = scene.add_appearance(Appearance::default());
    let spinner = scene.spawn(cube, style);
    let scenery = scene.spawn(cube, style);
    scene.node_mut(scenery).spins = false;

    let mut input = InputState::new(KeyCode::Space);
    input.on_key(KeyCode::Space, true);
    scene.advance(&input, SPIN_STEP);

    assert_relative_eq!(scene.node(spinner).transform.yaw(), SPIN_STEP, epsilon = 1e-6);
    assert_relative_eq!(scene.node(scenery).transform.yaw(), 0.0, epsilon = 1e-6);
}

#[test]
fn only_the_designated_key_sets_the_flag() {
    let mut input = InputState::new(KeyCode::Space);
    assert!(!input.spinning());

    input.on_key(KeyCode::KeyA, true);
    assert!(!input.spinning());

    input.on_key(KeyCode::Space, true);
    assert!(input.spinning());
}

#[test]
fn any_key_release_clears_the_flag() {
    let mut input = InputState::new(KeyCode::Space);
    input.on_key(KeyCode::Space, true);
    assert!(input.spinning());

    // A key that never set the flag still clears it.
    input.on_key(KeyCode::KeyA, false);
    assert!(!input.spinning());

    input.on_key(KeyCode::Space, true);
    input.on_key(KeyCode::Space, false);
    assert!(!input.spinning());
}

#[test]
fn hundred_held_frames_accumulate_five_radians() {
    let mut scene = Scene::new();
    let nodes = ten_cubes(&mut scene);
    let positions_before: Vec<_> = nodes
        .iter()
        .map(|handle| scene.node(*handle).position())
        .collect();

    let mut input = InputState::new(KeyCode::Space);
    input.on_key(KeyCode::Space, true);
    for _ in 0..100 {
        scene.advance(&input, SPIN_STEP);
    }

    for (handle, position) in nodes.iter().zip(positions_before) {
        let node = scene.node(*handle);
        assert_relative_eq!(node.transform.yaw(), 5.0, epsilon = 1e-3);
        assert_eq!(node.position(), position);
    }
}
