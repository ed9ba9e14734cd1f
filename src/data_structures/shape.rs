//! Procedural shape geometry.
//!
//! A [`Shape`] is plain vertex/index data defining a visual form,
//! independent of any appearance. Shapes live in the scene's arena and are
//! referenced by handle from drawable nodes; the renderer uploads each
//! distinct shape to the GPU exactly once, no matter how many nodes
//! reference it.

use std::f32::consts::{PI, TAU};

/// Trait for anything with a GPU vertex buffer layout.
pub trait Vertex {
    fn desc() -> wgpu::VertexBufferLayout<'static>;
}

/// A single mesh vertex: position and normal.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ShapeVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex for ShapeVertex {
    fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<ShapeVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }
}

/// Geometry for one visual form.
///
/// Shapes are CPU-side data only; GPU buffers are created and cached by the
/// renderer. This keeps scene construction and the frame-step logic fully
/// testable without a graphics device.
#[derive(Clone, Debug)]
pub struct Shape {
    pub name: String,
    pub vertices: Vec<ShapeVertex>,
    pub indices: Vec<u32>,
}

impl Shape {
    pub fn new(name: &str, vertices: Vec<ShapeVertex>, indices: Vec<u32>) -> Self {
        Self {
            name: name.to_string(),
            vertices,
            indices,
        }
    }

    /// An axis-aligned box centred on the origin with per-face normals.
    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        let (x, y, z) = (width / 2.0, height / 2.0, depth / 2.0);
        // 4 vertices per face so each face gets a flat normal
        let faces: [([f32; 3], [[f32; 3]; 4]); 6] = [
            (
                [0.0, 0.0, 1.0],
                [[-x, -y, z], [x, -y, z], [x, y, z], [-x, y, z]],
            ),
            (
                [0.0, 0.0, -1.0],
                [[x, -y, -z], [-x, -y, -z], [-x, y, -z], [x, y, -z]],
            ),
            (
                [1.0, 0.0, 0.0],
                [[x, -y, z], [x, -y, -z], [x, y, -z], [x, y, z]],
            ),
            (
                [-1.0, 0.0, 0.0],
                [[-x, -y, -z], [-x, -y, z], [-x, y, z], [-x, y, -z]],
            ),
            (
                [0.0, 1.0, 0.0],
                [[-x, y, z], [x, y, z], [x, y, -z], [-x, y, -z]],
            ),
            (
                [0.0, -1.0, 0.0],
                [[-x, -y, -z], [x, -y, -z], [x, -y, z], [-x, -y, z]],
            ),
        ];
        let mut vertices = Vec::with_capacity(24);
        let mut indices = Vec::with_capacity(36);
        for (normal, corners) in faces {
            let base = vertices.len() as u32;
            for position in corners {
                vertices.push(ShapeVertex { position, normal });
            }
            indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
        }
        Self::new("cuboid", vertices, indices)
    }

    /// A flat rectangle in the XZ plane, facing up.
    pub fn plane(width: f32, depth: f32) -> Self {
        let (x, z) = (width / 2.0, depth / 2.0);
        let normal = [0.0, 1.0, 0.0];
        let vertices = vec![
            ShapeVertex {
                position: [-x, 0.0, z],
                normal,
            },
            ShapeVertex {
                position: [x, 0.0, z],
                normal,
            },
            ShapeVertex {
                position: [x, 0.0, -z],
                normal,
            },
            ShapeVertex {
                position: [-x, 0.0, -z],
                normal,
            },
        ];
        let indices = vec![0, 1, 2, 0, 2, 3];
        Self::new("plane", vertices, indices)
    }

    /// A UV sphere centred on the origin.
    ///
    /// `segments` is the subdivision count around Y, `rings` from pole to
    /// pole. Both are clamped to a minimum of 3.
    pub fn uv_sphere(radius: f32, segments: u32, rings: u32) -> Self {
        let segments = segments.max(3);
        let rings = rings.max(3);
        let mut vertices = Vec::new();
        let mut indices = Vec::new();
        for ring in 0..=rings {
            let phi = PI * ring as f32 / rings as f32;
            let (sin_phi, cos_phi) = phi.sin_cos();
            for segment in 0..=segments {
                let theta = TAU * segment as f32 / segments as f32;
                let (sin_theta, cos_theta) = theta.sin_cos();
                let normal = [sin_phi * cos_theta, cos_phi, sin_phi * sin_theta];
                vertices.push(ShapeVertex {
                    position: [normal[0] * radius, normal[1] * radius, normal[2] * radius],
                    normal,
                });
            }
        }
        let stride = segments + 1;
        for ring in 0..rings {
            for segment in 0..segments {
                let a = ring * stride + segment;
                let b = a + stride;
                indices.extend_from_slice(&[a, b, a + 1, a + 1, b, b + 1]);
            }
        }
        Self::new("uv_sphere", vertices, indices)
    }
}
