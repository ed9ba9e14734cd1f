//! spinview
//!
//! A lightweight, cross-platform instancing-oriented 3D scene viewer
//! focused on native and WASM compatibility. The crate exposes a small
//! surface for building a scene out of shared shapes and appearances,
//! scattering many drawable nodes over them, and running a self-sustaining
//! frame loop with an orbit camera and a hold-key-to-spin animation step.
//!
//! High-level modules
//! - `camera`: camera types, orbit controller and uniforms for view/projection
//! - `config`: compiled-in viewer constants
//! - `context`: central GPU and window context that owns device/queue/pipelines
//! - `data_structures`: scene data models (shapes, appearances, transforms)
//! - `flow`: the application event loop and per-frame step
//! - `pipelines`: definitions for the scene and light render pipelines
//! - `render`: batching for efficient instanced draws
//!

pub mod camera;
pub mod config;
pub mod context;
pub mod data_structures;
pub mod flow;
pub mod pipelines;
pub mod render;

// Re-exports commonly used types for convenience in downstream code.
pub use cgmath::*;
pub use wgpu::Color;
pub use winit::dpi::PhysicalPosition;
pub use winit::event::DeviceEvent;
pub use winit::event::WindowEvent;
pub use winit::keyboard::KeyCode;
