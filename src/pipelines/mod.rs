//! Render pipeline definitions.
//!
//! Two pipelines cover the whole viewer: `scene` draws the instanced,
//! lit geometry batches and `light` draws the emissive light marker.

pub mod light;
pub mod scene;

/// The compiled pipelines, built once at context creation and reused for
/// every frame.
pub struct Pipelines {
    pub scene: wgpu::RenderPipeline,
    pub light: wgpu::RenderPipeline,
}

impl Pipelines {
    pub fn new(
        device: &wgpu::Device,
        config: &wgpu::SurfaceConfiguration,
        camera_bind_group_layout: &wgpu::BindGroupLayout,
        light_bind_group_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        Self {
            scene: scene::mk_scene_pipeline(
                device,
                config,
                camera_bind_group_layout,
                light_bind_group_layout,
            ),
            light: light::mk_light_pipeline(
                device,
                config,
                camera_bind_group_layout,
                light_bind_group_layout,
            ),
        }
    }
}
