//! Compiled-in viewer configuration.

use winit::keyboard::KeyCode;

use crate::data_structures::transform::SPIN_STEP;

/// Plain key/value configuration for the viewer: camera constants, clear
/// colour, and the spin behaviour. There is no configuration file; callers
/// override fields on [`ViewerConfig::default`] before starting the loop.
#[derive(Clone, Debug)]
pub struct ViewerConfig {
    /// Vertical field of view in degrees.
    pub fov_deg: f32,
    pub znear: f32,
    pub zfar: f32,
    /// Background colour the frame is cleared with.
    pub clear_colour: wgpu::Color,
    /// Point the orbit camera circles around.
    pub orbit_target: [f32; 3],
    /// Starting distance of the camera from the target.
    pub orbit_distance: f32,
    /// Radians of orbit per pixel of pointer drag.
    pub orbit_sensitivity: f32,
    /// Easing rate for the orbit controller; higher snaps faster.
    pub orbit_damping: f32,
    /// Radians added about Y per frame step while the spin key is held.
    pub spin_step: f32,
    /// The one key that sets the spin flag. Releasing any key clears it.
    pub spin_key: KeyCode,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            fov_deg: 45.0,
            znear: 0.1,
            zfar: 500.0,
            clear_colour: wgpu::Color {
                r: 0.1,
                g: 0.1,
                b: 0.12,
                a: 1.0,
            },
            orbit_target: [0.0, 0.0, 0.0],
            orbit_distance: 20.0,
            orbit_sensitivity: 0.005,
            orbit_damping: 10.0,
            spin_step: SPIN_STEP,
            spin_key: KeyCode::Space,
        }
    }
}
