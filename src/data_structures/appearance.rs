//! Shading parameters applied to a shape when drawn.

/// Colour and reflectance parameters shared by all nodes referencing the
/// same handle.
///
/// Appearances live in the scene's arena. Mutating one through
/// [`Scene::appearance_mut`](crate::data_structures::scene_graph::Scene::appearance_mut)
/// affects every referencing node on the very next frame; this sharing is
/// intentional.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Appearance {
    /// Base colour as linear RGBA.
    pub color: [f32; 4],
    /// Specular highlight exponent.
    pub shininess: f32,
}

impl Appearance {
    pub fn new(color: [f32; 4]) -> Self {
        Self {
            color,
            ..Default::default()
        }
    }
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            color: [1.0, 1.0, 1.0, 1.0],
            shininess: 32.0,
        }
    }
}
