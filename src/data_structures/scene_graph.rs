//! Scene arena and drawable node organisation.
//!
//! The scene owns three arenas: shapes, appearances, and the drawable nodes
//! referencing them by handle. Many nodes may share one shape and one
//! appearance; only the transform is per-node. This sharing is the point:
//! when the same visual style repeats, the number of distinct shapes and
//! appearances stays far below the node count.

use std::collections::HashMap;

use rand::Rng;

use crate::{
    context::InputState,
    data_structures::{
        appearance::Appearance,
        shape::Shape,
        transform::{NodeRaw, Transform},
    },
};

/// Index of a [`Shape`] in the scene arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ShapeHandle(pub(crate) usize);

/// Index of an [`Appearance`] in the scene arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AppearanceHandle(pub(crate) usize);

/// Index of a [`DrawableNode`] in the scene arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeHandle(pub(crate) usize);

/// Capability interface for everything in the scene that has a pose.
///
/// Implemented by drawable nodes and lights alike, so callers can move and
/// rotate scene entities without caring which variant they hold.
pub trait Transformable {
    fn transform(&self) -> &Transform;

    fn transform_mut(&mut self) -> &mut Transform;

    fn position(&self) -> cgmath::Vector3<f32> {
        self.transform().position
    }

    fn set_position(&mut self, position: cgmath::Vector3<f32>) {
        self.transform_mut().position = position;
    }

    fn rotation(&self) -> cgmath::Quaternion<f32> {
        self.transform().rotation
    }

    fn set_rotation(&mut self, rotation: cgmath::Quaternion<f32>) {
        self.transform_mut().rotation = rotation;
    }

    fn scale(&self) -> cgmath::Vector3<f32> {
        self.transform().scale
    }

    fn set_scale(&mut self, scale: cgmath::Vector3<f32>) {
        self.transform_mut().scale = scale;
    }
}

/// A positioned instance combining one shape and one appearance.
///
/// The shape and appearance references are fixed once attached; the
/// transform is mutable. Nodes with `spins` set receive the fixed angular
/// increment each frame step while the spin key is held.
#[derive(Clone, Debug)]
pub struct DrawableNode {
    pub shape: ShapeHandle,
    pub appearance: AppearanceHandle,
    pub transform: Transform,
    pub spins: bool,
}

impl Transformable for DrawableNode {
    fn transform(&self) -> &Transform {
        &self.transform
    }

    fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }
}

/// A point light. Only the first light in the scene feeds the shading
/// uniform; additional lights are drawn as markers but do not shade.
#[derive(Clone, Debug)]
pub struct PointLight {
    pub transform: Transform,
    pub color: [f32; 3],
    pub intensity: f32,
}

impl PointLight {
    pub fn new(position: cgmath::Vector3<f32>, color: [f32; 3], intensity: f32) -> Self {
        Self {
            transform: position.into(),
            color,
            intensity,
        }
    }
}

impl Transformable for PointLight {
    fn transform(&self) -> &Transform {
        &self.transform
    }

    fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }
}

/// One instanced draw: every node sharing `shape` and `appearance`, with
/// their per-node records already packed for the GPU.
pub struct InstanceBatch {
    pub shape: ShapeHandle,
    pub appearance: AppearanceHandle,
    pub instances: Vec<NodeRaw>,
}

/// The render graph: arenas of shapes, appearances, drawable nodes, and
/// lights considered for drawing each frame.
#[derive(Default)]
pub struct Scene {
    shapes: Vec<Shape>,
    appearances: Vec<Appearance>,
    nodes: Vec<DrawableNode>,
    lights: Vec<PointLight>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a shape. Call once per distinct visual form, then share the
    /// handle across nodes.
    pub fn add_shape(&mut self, shape: Shape) -> ShapeHandle {
        self.shapes.push(shape);
        ShapeHandle(self.shapes.len() - 1)
    }

    /// Register an appearance. Call once per distinct visual style.
    pub fn add_appearance(&mut self, appearance: Appearance) -> AppearanceHandle {
        self.appearances.push(appearance);
        AppearanceHandle(self.appearances.len() - 1)
    }

    pub fn add_light(&mut self, light: PointLight) -> usize {
        self.lights.push(light);
        self.lights.len() - 1
    }

    /// Attach a new drawable node referencing existing shape and appearance
    /// handles. New nodes spin by default; clear
    /// [`DrawableNode::spins`] for static scenery.
    pub fn spawn(&mut self, shape: ShapeHandle, appearance: AppearanceHandle) -> NodeHandle {
        self.nodes.push(DrawableNode {
            shape,
            appearance,
            transform: Transform::default(),
            spins: true,
        });
        NodeHandle(self.nodes.len() - 1)
    }

    /// Attach `amount` nodes sharing one shape and one appearance, each at a
    /// uniformly random position within `[-bound, bound]` on every axis.
    ///
    /// Only the transform is per-node; no shape or appearance data is
    /// duplicated no matter how large `amount` is.
    pub fn scatter<R: Rng>(
        &mut self,
        shape: ShapeHandle,
        appearance: AppearanceHandle,
        amount: usize,
        bound: f32,
        rng: &mut R,
    ) -> Vec<NodeHandle> {
        (0..amount)
            .map(|_| {
                let handle = self.spawn(shape, appearance);
                self.nodes[handle.0].transform.position = cgmath::Vector3::new(
                    rng.gen_range(-bound..=bound),
                    rng.gen_range(-bound..=bound),
                    rng.gen_range(-bound..=bound),
                );
                handle
            })
            .collect()
    }

    pub fn shape(&self, handle: ShapeHandle) -> &Shape {
        &self.shapes[handle.0]
    }

    pub fn appearance(&self, handle: AppearanceHandle) -> &Appearance {
        &self.appearances[handle.0]
    }

    /// Mutate a shared appearance. The change is visible to every node
    /// referencing the handle on the next frame.
    pub fn appearance_mut(&mut self, handle: AppearanceHandle) -> &mut Appearance {
        &mut self.appearances[handle.0]
    }

    pub fn node(&self, handle: NodeHandle) -> &DrawableNode {
        &self.nodes[handle.0]
    }

    pub fn node_mut(&mut self, handle: NodeHandle) -> &mut DrawableNode {
        &mut self.nodes[handle.0]
    }

    pub fn nodes(&self) -> &[DrawableNode] {
        &self.nodes
    }

    pub fn nodes_mut(&mut self) -> &mut [DrawableNode] {
        &mut self.nodes
    }

    pub fn lights(&self) -> &[PointLight] {
        &self.lights
    }

    pub fn lights_mut(&mut self) -> &mut [PointLight] {
        &mut self.lights
    }

    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    pub fn appearance_count(&self) -> usize {
        self.appearances.len()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// One frame step of animation state.
    ///
    /// While the spin key is held, every spinning node is rotated about Y by
    /// the same fixed increment; with the key up this is a no-op. Called by
    /// the event loop once per display refresh, before the draw is
    /// submitted.
    pub fn advance(&mut self, input: &InputState, step: f32) {
        if !input.spinning() {
            return;
        }
        for node in self.nodes.iter_mut().filter(|node| node.spins) {
            node.transform.spin_y(step);
        }
    }

    /// Pack the scene into per-(shape, appearance) instance batches, in
    /// first-use order. One batch becomes one instanced draw call.
    pub fn batches(&self) -> Vec<InstanceBatch> {
        let mut order: Vec<InstanceBatch> = Vec::new();
        let mut index: HashMap<(usize, usize), usize> = HashMap::new();
        for node in &self.nodes {
            let key = (node.shape.0, node.appearance.0);
            let appearance = &self.appearances[node.appearance.0];
            let raw = node.transform.to_raw(appearance.color, appearance.shininess);
            match index.get(&key) {
                Some(&at) => order[at].instances.push(raw),
                None => {
                    index.insert(key, order.len());
                    order.push(InstanceBatch {
                        shape: node.shape,
                        appearance: node.appearance,
                        instances: vec![raw],
                    });
                }
            }
        }
        order
    }
}
