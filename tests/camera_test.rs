use approx::assert_relative_eq;
use cgmath::{Deg, EuclideanSpace, Point3, Rad};
use instant::Duration;
use spinview::camera::{Camera, OrbitController, Projection};

#[test]
fn resize_updates_the_aspect_ratio() {
    let mut projection = Projection::new(800, 600, Deg(45.0), 0.1, 500.0);
    assert_relative_eq!(projection.aspect(), 800.0 / 600.0);

    projection.resize(1920, 1080);
    assert_relative_eq!(projection.aspect(), 1920.0 / 1080.0);

    // Narrow portrait surfaces are fine too.
    projection.resize(300, 900);
    assert_relative_eq!(projection.aspect(), 300.0 / 900.0);
}

#[test]
fn camera_stays_on_the_orbit_sphere() {
    let mut camera = Camera::new((0.0, 0.0, 0.0), Rad(0.0), Rad(0.0));
    let mut controller = OrbitController::new((0.0, 0.0, 0.0), 20.0, 0.005, 10.0);

    controller.handle_mouse(120.0, -40.0);
    for _ in 0..30 {
        controller.update(&mut camera, Duration::from_millis(16));
    }

    let offset = camera.position - Point3::origin();
    let radius = (offset.x * offset.x + offset.y * offset.y + offset.z * offset.z).sqrt();
    assert_relative_eq!(radius, controller.distance(), epsilon = 1e-4);
}

#[test]
fn pending_drag_input_eases_out() {
    let mut camera = Camera::new((0.0, 0.0, 0.0), Rad(0.0), Rad(0.0));
    let mut controller = OrbitController::new((0.0, 0.0, 0.0), 20.0, 0.005, 10.0);

    controller.handle_mouse(200.0, 0.0);
    let (initial, _) = controller.pending();
    assert!(initial > 0.0);

    controller.update(&mut camera, Duration::from_millis(16));
    let (after_one, _) = controller.pending();
    assert!(after_one < initial);
    assert!(after_one > 0.0);

    for _ in 0..200 {
        controller.update(&mut camera, Duration::from_millis(16));
    }
    let (after_many, _) = controller.pending();
    assert!(after_many.abs() < 1e-5);
}

#[test]
fn zoom_is_clamped_to_the_distance_range() {
    let mut camera = Camera::new((0.0, 0.0, 0.0), Rad(0.0), Rad(0.0));

    let mut controller = OrbitController::new((0.0, 0.0, 0.0), 20.0, 0.005, 10.0);
    let zoom_in = winit::event::WindowEvent::MouseWheel {
        device_id: winit::event::DeviceId::dummy(),
        delta: winit::event::MouseScrollDelta::LineDelta(0.0, 10_000.0),
        phase: winit::event::TouchPhase::Moved,
    };
    controller.handle_window_events(&zoom_in);
    for _ in 0..200 {
        controller.update(&mut camera, Duration::from_millis(16));
    }
    assert_relative_eq!(controller.distance(), 1.0, epsilon = 1e-3);

    let mut controller = OrbitController::new((0.0, 0.0, 0.0), 20.0, 0.005, 10.0);
    let zoom_out = winit::event::WindowEvent::MouseWheel {
        device_id: winit::event::DeviceId::dummy(),
        delta: winit::event::MouseScrollDelta::LineDelta(0.0, -10_000.0),
        phase: winit::event::TouchPhase::Moved,
    };
    controller.handle_window_events(&zoom_out);
    for _ in 0..200 {
        controller.update(&mut camera, Duration::from_millis(16));
    }
    assert_relative_eq!(controller.distance(), 500.0, epsilon = 1e-3);
}
