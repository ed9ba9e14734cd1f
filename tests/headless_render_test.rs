#![cfg(feature = "integration-tests")]

use rand::SeedableRng;
use rand::rngs::StdRng;
use spinview::{
    data_structures::{appearance::Appearance, scene_graph::Scene, shape::Shape},
    render::BatchRenderer,
};

async fn headless_device() -> (wgpu::Device, wgpu::Queue) {
    let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
        backends: wgpu::Backends::PRIMARY,
        ..Default::default()
    });
    let adapter = instance
        .request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::default(),
            compatible_surface: None,
            force_fallback_adapter: false,
        })
        .await
        .expect("no adapter available");
    adapter
        .request_device(&wgpu::DeviceDescriptor {
            label: None,
            required_features: wgpu::Features::empty(),
            required_limits: wgpu::Limits::default(),
            memory_hints: Default::default(),
            trace: wgpu::Trace::Off,
        })
        .await
        .expect("no device available")
}

#[test]
fn prepare_uploads_each_shape_once_and_reuses_buffers() {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let (device, queue) = runtime.block_on(headless_device());

    let mut scene = Scene::new();
    let cube = scene.add_shape(Shape::cuboid(1.0, 1.0, 1.0));
    let sphere = scene.add_shape(Shape::uv_sphere(1.0, 16, 12));
    let red = scene.add_appearance(Appearance::new([1.0, 0.0, 0.0, 1.0]));
    let blue = scene.add_appearance(Appearance::new([0.0, 0.0, 1.0, 1.0]));

    let mut rng = StdRng::seed_from_u64(3);
    scene.scatter(cube, red, 10, 5.0, &mut rng);
    scene.scatter(cube, blue, 4, 5.0, &mut rng);
    scene.scatter(sphere, red, 2, 5.0, &mut rng);

    let mut renderer = BatchRenderer::new();
    renderer.prepare(&device, &queue, &scene);

    // Two distinct meshes, three (shape, appearance) batches.
    assert_eq!(renderer.mesh_count(), 2);
    assert_eq!(renderer.batch_count(), 3);

    // A second pass with the same scene rewrites in place.
    renderer.prepare(&device, &queue, &scene);
    assert_eq!(renderer.mesh_count(), 2);
    assert_eq!(renderer.batch_count(), 3);

    // Growing a batch forces a larger buffer but no new meshes.
    scene.scatter(cube, red, 20, 5.0, &mut rng);
    renderer.prepare(&device, &queue, &scene);
    assert_eq!(renderer.mesh_count(), 2);
    assert_eq!(renderer.batch_count(), 3);
}
