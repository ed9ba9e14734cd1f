//! Camera, projection, and the orbit control helper.
//!
//! The camera is a free position plus yaw/pitch; the [`OrbitController`]
//! drives it around a fixed target from pointer drag and scroll input.
//! Pointer deltas are accumulated as pending rotation and consumed a damped
//! fraction per tick, so the motion eases out over a few frames instead of
//! stopping dead with the pointer.

use cgmath::{InnerSpace, Matrix4, Point3, Rad, Vector3, perspective};
use instant::Duration;
use winit::event::{MouseScrollDelta, WindowEvent};

/// wgpu clip space covers z in 0..1 while cgmath produces OpenGL's -1..1.
#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: Matrix4<f32> = Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.0,
    0.0, 0.0, 0.5, 1.0,
);

/// Viewer pose: position plus yaw/pitch viewing angles.
#[derive(Clone, Debug)]
pub struct Camera {
    pub position: Point3<f32>,
    pub yaw: Rad<f32>,
    pub pitch: Rad<f32>,
}

impl Camera {
    pub fn new<V: Into<Point3<f32>>, Y: Into<Rad<f32>>, P: Into<Rad<f32>>>(
        position: V,
        yaw: Y,
        pitch: P,
    ) -> Self {
        Self {
            position: position.into(),
            yaw: yaw.into(),
            pitch: pitch.into(),
        }
    }

    pub fn calc_matrix(&self) -> Matrix4<f32> {
        let (sin_pitch, cos_pitch) = self.pitch.0.sin_cos();
        let (sin_yaw, cos_yaw) = self.yaw.0.sin_cos();

        Matrix4::look_to_rh(
            self.position,
            Vector3::new(cos_pitch * cos_yaw, sin_pitch, cos_pitch * sin_yaw).normalize(),
            Vector3::unit_y(),
        )
    }
}

/// Perspective projection parameters for the drawing surface.
#[derive(Clone, Debug)]
pub struct Projection {
    aspect: f32,
    fovy: Rad<f32>,
    znear: f32,
    zfar: f32,
}

impl Projection {
    pub fn new<F: Into<Rad<f32>>>(width: u32, height: u32, fovy: F, znear: f32, zfar: f32) -> Self {
        Self {
            aspect: width as f32 / height as f32,
            fovy: fovy.into(),
            znear,
            zfar,
        }
    }

    /// Track a resized drawing surface. The new aspect ratio is picked up by
    /// the very next frame.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.aspect = width as f32 / height as f32;
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn calc_matrix(&self) -> Matrix4<f32> {
        OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar)
    }
}

/// Camera data in the layout the shaders expect.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    view_position: [f32; 4],
    view_proj: [[f32; 4]; 4],
}

impl CameraUniform {
    pub fn new() -> Self {
        use cgmath::SquareMatrix;
        Self {
            view_position: [0.0; 4],
            view_proj: Matrix4::identity().into(),
        }
    }

    pub fn update_view_proj(&mut self, camera: &Camera, projection: &Projection) {
        self.view_position = camera.position.to_homogeneous().into();
        self.view_proj = (projection.calc_matrix() * camera.calc_matrix()).into();
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

/// Pointer-driven orbit around a fixed target, with damped easing.
///
/// Drag deltas land in `pending_*` and are consumed one damped tick at a
/// time by [`update`](Self::update), which also re-derives the camera pose.
/// The controller is a black box to the frame loop: the loop only calls
/// `update` once per tick.
#[derive(Clone, Debug)]
pub struct OrbitController {
    target: Point3<f32>,
    distance: f32,
    yaw: Rad<f32>,
    pitch: Rad<f32>,
    pending_yaw: f32,
    pending_pitch: f32,
    pending_zoom: f32,
    sensitivity: f32,
    damping: f32,
}

impl OrbitController {
    const MIN_DISTANCE: f32 = 1.0;
    const MAX_DISTANCE: f32 = 500.0;
    // Keep the pitch off the poles so the up vector stays valid.
    const MAX_PITCH: f32 = std::f32::consts::FRAC_PI_2 - 0.01;

    pub fn new<T: Into<Point3<f32>>>(
        target: T,
        distance: f32,
        sensitivity: f32,
        damping: f32,
    ) -> Self {
        Self {
            target: target.into(),
            distance,
            yaw: Rad(std::f32::consts::FRAC_PI_2),
            pitch: Rad(0.5),
            pending_yaw: 0.0,
            pending_pitch: 0.0,
            pending_zoom: 0.0,
            sensitivity,
            damping,
        }
    }

    /// Accumulate a pointer drag delta. Called from the input handlers while
    /// the orbit button is held.
    pub fn handle_mouse(&mut self, dx: f64, dy: f64) {
        self.pending_yaw += dx as f32 * self.sensitivity;
        self.pending_pitch += dy as f32 * self.sensitivity;
    }

    pub fn handle_window_events(&mut self, event: &WindowEvent) {
        if let WindowEvent::MouseWheel { delta, .. } = event {
            self.pending_zoom += match delta {
                MouseScrollDelta::LineDelta(_, scroll) => *scroll * 2.0,
                MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 20.0,
            };
        }
    }

    /// Advance the helper's internal state by one tick and write the
    /// resulting pose into `camera`.
    pub fn update(&mut self, camera: &mut Camera, dt: Duration) {
        let blend = 1.0 - (-self.damping * dt.as_secs_f32()).exp();

        let yaw_step = self.pending_yaw * blend;
        let pitch_step = self.pending_pitch * blend;
        let zoom_step = self.pending_zoom * blend;
        self.pending_yaw -= yaw_step;
        self.pending_pitch -= pitch_step;
        self.pending_zoom -= zoom_step;

        self.yaw += Rad(yaw_step);
        self.pitch = Rad(
            (self.pitch.0 + pitch_step).clamp(-Self::MAX_PITCH, Self::MAX_PITCH),
        );
        self.distance =
            (self.distance - zoom_step).clamp(Self::MIN_DISTANCE, Self::MAX_DISTANCE);

        let (sin_pitch, cos_pitch) = self.pitch.0.sin_cos();
        let (sin_yaw, cos_yaw) = self.yaw.0.sin_cos();
        let offset = Vector3::new(cos_pitch * cos_yaw, sin_pitch, cos_pitch * sin_yaw);
        camera.position = self.target + offset * self.distance;
        // Face back toward the target
        camera.yaw = Rad(self.yaw.0 + std::f32::consts::PI);
        camera.pitch = Rad(-self.pitch.0);
    }

    pub fn target(&self) -> Point3<f32> {
        self.target
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Remaining unconsumed drag input, for observing the easing state.
    pub fn pending(&self) -> (f32, f32) {
        (self.pending_yaw, self.pending_pitch)
    }
}
