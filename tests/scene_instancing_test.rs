use spinview::data_structures::{
    appearance::Appearance,
    scene_graph::{Scene, Transformable},
    shape::Shape,
};

use rand::SeedableRng;
use rand::rngs::StdRng;

#[test]
fn one_shape_one_appearance_many_nodes() {
    let mut scene = Scene::new();
    let cube = scene.add_shape(Shape::cuboid(1.0, 1.0, 1.0));
    let style = scene.add_appearance(Appearance::new([0.9, 0.2, 0.2, 1.0]));

    let mut rng = StdRng::seed_from_u64(7);
    let nodes = scene.scatter(cube, style, 10, 5.0, &mut rng);

    assert_eq!(nodes.len(), 10);
    assert_eq!(scene.node_count(), 10);
    // Shape and appearance construction is independent of the node count.
    assert_eq!(scene.shape_count(), 1);
    assert_eq!(scene.appearance_count(), 1);
    for handle in &nodes {
        assert_eq!(scene.node(*handle).shape, cube);
        assert_eq!(scene.node(*handle).appearance, style);
    }
}

#[test]
fn appearance_count_tracks_styles_not_nodes() {
    let mut scene = Scene::new();
    let cube = scene.add_shape(Shape::cuboid(1.0, 1.0, 1.0));
    let red = scene.add_appearance(Appearance::new([1.0, 0.0, 0.0, 1.0]));
    let blue = scene.add_appearance(Appearance::new([0.0, 0.0, 1.0, 1.0]));

    let mut rng = StdRng::seed_from_u64(7);
    scene.scatter(cube, red, 50, 5.0, &mut rng);
    scene.scatter(cube, blue, 50, 5.0, &mut rng);

    assert_eq!(scene.node_count(), 100);
    assert_eq!(scene.shape_count(), 1);
    assert_eq!(scene.appearance_count(), 2);
}

#[test]
fn scatter_zero_nodes_is_fine() {
    let mut scene = Scene::new();
    let cube = scene.add_shape(Shape::cuboid(1.0, 1.0, 1.0));
    let style = scene.add_appearance(Appearance::default());

    let mut rng = StdRng::seed_from_u64(7);
    let nodes = scene.scatter(cube, style, 0, 5.0, &mut rng);

    assert!(nodes.is_empty());
    assert_eq!(scene.node_count(), 0);
    assert_eq!(scene.shape_count(), 1);
    assert!(scene.batches().is_empty());
}

#[test]
fn scatter_positions_stay_within_bound() {
    let mut scene = Scene::new();
    let cube = scene.add_shape(Shape::cuboid(1.0, 1.0, 1.0));
    let style = scene.add_appearance(Appearance::default());

    let mut rng = StdRng::seed_from_u64(42);
    let nodes = scene.scatter(cube, style, 200, 5.0, &mut rng);

    for handle in nodes {
        let position = scene.node(handle).position();
        assert!(position.x.abs() <= 5.0);
        assert!(position.y.abs() <= 5.0);
        assert!(position.z.abs() <= 5.0);
    }
}

#[test]
fn shared_appearance_mutation_is_visible_to_all_referents() {
    let mut scene = Scene::new();
    let cube = scene.add_shape(Shape::cuboid(1.0, 1.0, 1.0));
    let style = scene.add_appearance(Appearance::new([1.0, 1.0, 1.0, 1.0]));
    let a = scene.spawn(cube, style);
    let b = scene.spawn(cube, style);

    scene.appearance_mut(style).color = [0.0, 1.0, 0.0, 1.0];

    let via_a = scene.appearance(scene.node(a).appearance).color;
    let via_b = scene.appearance(scene.node(b).appearance).color;
    assert_eq!(via_a, [0.0, 1.0, 0.0, 1.0]);
    assert_eq!(via_b, [0.0, 1.0, 0.0, 1.0]);
}

#[test]
fn nodes_sharing_shape_and_appearance_form_one_batch() {
    let mut scene = Scene::new();
    let cube = scene.add_shape(Shape::cuboid(1.0, 1.0, 1.0));
    let sphere = scene.add_shape(Shape::uv_sphere(1.0, 8, 6));
    let style = scene.add_appearance(Appearance::default());

    let mut rng = StdRng::seed_from_u64(7);
    scene.scatter(cube, style, 10, 5.0, &mut rng);
    scene.scatter(sphere, style, 3, 5.0, &mut rng);

    let batches = scene.batches();
    assert_eq!(batches.len(), 2);
    assert_eq!(batches[0].instances.len(), 10);
    assert_eq!(batches[1].instances.len(), 3);
}
