//! Frame batching and instanced draw submission.
//!
//! [`BatchRenderer`] bridges the CPU-side scene and the GPU: each distinct
//! shape is uploaded once and cached, and every (shape, appearance) batch
//! gets one instance buffer holding the per-node records. Buffers are
//! reused across frames and only recreated when a batch outgrows its
//! capacity.

use std::collections::HashMap;

use wgpu::util::DeviceExt;

use crate::data_structures::{
    scene_graph::{AppearanceHandle, Scene, ShapeHandle},
    shape::Shape,
};

/// Vertex and index buffers for one uploaded shape.
pub struct GpuMesh {
    pub name: String,
    pub vertex_buffer: wgpu::Buffer,
    pub index_buffer: wgpu::Buffer,
    pub num_elements: u32,
}

impl GpuMesh {
    pub fn upload(device: &wgpu::Device, shape: &Shape) -> Self {
        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Vertex Buffer", shape.name)),
            contents: bytemuck::cast_slice(&shape.vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Index Buffer", shape.name)),
            contents: bytemuck::cast_slice(&shape.indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        Self {
            name: shape.name.clone(),
            vertex_buffer,
            index_buffer,
            num_elements: shape.indices.len() as u32,
        }
    }
}

struct InstanceBuffer {
    buffer: wgpu::Buffer,
    capacity: usize,
    amount: u32,
}

type BatchKey = (ShapeHandle, AppearanceHandle);

/// GPU-side cache of meshes and instance buffers, refreshed once per frame.
#[derive(Default)]
pub struct BatchRenderer {
    meshes: HashMap<ShapeHandle, GpuMesh>,
    instances: HashMap<BatchKey, InstanceBuffer>,
    order: Vec<BatchKey>,
}

impl BatchRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Upload any not-yet-seen shapes and write the current per-node records
    /// into the batch instance buffers.
    pub fn prepare(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, scene: &Scene) {
        let batches = scene.batches();
        self.order.clear();
        for batch in &batches {
            self.meshes
                .entry(batch.shape)
                .or_insert_with(|| GpuMesh::upload(device, scene.shape(batch.shape)));

            let key = (batch.shape, batch.appearance);
            let contents: &[u8] = bytemuck::cast_slice(&batch.instances);
            match self.instances.get_mut(&key) {
                Some(entry) if entry.capacity >= batch.instances.len() => {
                    queue.write_buffer(&entry.buffer, 0, contents);
                    entry.amount = batch.instances.len() as u32;
                }
                _ => {
                    let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                        label: Some("Instance Buffer"),
                        contents,
                        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                    });
                    self.instances.insert(
                        key,
                        InstanceBuffer {
                            buffer,
                            capacity: batch.instances.len(),
                            amount: batch.instances.len() as u32,
                        },
                    );
                }
            }
            self.order.push(key);
        }
    }

    /// Record one instanced draw per prepared batch. The scene pipeline and
    /// both bind groups must match the layouts used at pipeline creation.
    pub fn draw<'pass>(
        &'pass self,
        render_pass: &mut wgpu::RenderPass<'pass>,
        camera_bind_group: &'pass wgpu::BindGroup,
        light_bind_group: &'pass wgpu::BindGroup,
    ) {
        for key in &self.order {
            let (mesh, instances) = match (self.meshes.get(&key.0), self.instances.get(key)) {
                (Some(mesh), Some(instances)) => (mesh, instances),
                _ => continue,
            };
            if instances.amount == 0 {
                log::warn!("you attempted to render a batch with zero instances");
                continue;
            }
            render_pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
            render_pass.set_vertex_buffer(1, instances.buffer.slice(..));
            render_pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            render_pass.set_bind_group(0, camera_bind_group, &[]);
            render_pass.set_bind_group(1, light_bind_group, &[]);
            render_pass.draw_indexed(0..mesh.num_elements, 0, 0..instances.amount);
        }
    }

    /// Number of distinct shape meshes resident on the GPU.
    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    /// Number of live (shape, appearance) instance buffers.
    pub fn batch_count(&self) -> usize {
        self.order.len()
    }
}
