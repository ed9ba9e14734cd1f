//! Engine data structures: shapes, appearances, transforms, and the scene.
//!
//! This module contains the core data types for scene representation:
//!
//! - `shape` contains procedural mesh geometry definitions
//! - `appearance` contains the shared shading parameters
//! - `transform` holds per-node transformation and the GPU instance record
//! - `scene_graph` is the arena of shapes, appearances, nodes, and lights
//! - `texture` contains the GPU depth texture wrapper

pub mod appearance;
pub mod scene_graph;
pub mod shape;
pub mod texture;
pub mod transform;
