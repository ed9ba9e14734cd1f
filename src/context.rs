//! Central GPU and window context.
//!
//! [`Context`] owns the surface, device, queue, camera and light resources,
//! and the compiled pipelines. It also carries the small input-state
//! holders the event loop writes into: the spin flag and the mouse button
//! state for orbit drags.

use std::sync::Arc;

use wgpu::util::DeviceExt;
use winit::{keyboard::KeyCode, window::Window};

use crate::{
    camera::{Camera, CameraUniform, OrbitController, Projection},
    config::ViewerConfig,
    data_structures::{shape::Shape, texture},
    pipelines::{
        Pipelines,
        light::{LightResources, LightUniform},
    },
    render::GpuMesh,
};

/// Which mouse button is currently held.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MouseButtonState {
    Left,
    Right,
    None,
}

/// Pointer state used by the orbit controller plumbing.
#[derive(Debug)]
pub struct MouseState {
    pub coords: winit::dpi::PhysicalPosition<f64>,
    pub pressed: MouseButtonState,
}

impl Default for MouseState {
    fn default() -> Self {
        Self {
            coords: (0.0, 0.0).into(),
            pressed: MouseButtonState::None,
        }
    }
}

/// The spin flag: level-triggered, no edge semantics.
///
/// Pressing the one designated key raises the flag; releasing ANY key
/// lowers it, including keys that never raised it. The frame step reads the
/// flag at its start; the winit handlers are the only writers. Everything
/// runs on one thread, so no synchronisation is needed.
#[derive(Clone, Debug)]
pub struct InputState {
    spin_key: KeyCode,
    spinning: bool,
}

impl InputState {
    pub fn new(spin_key: KeyCode) -> Self {
        Self {
            spin_key,
            spinning: false,
        }
    }

    /// Feed one keyboard event, as (key, is-pressed).
    pub fn on_key(&mut self, key: KeyCode, pressed: bool) {
        if pressed {
            if key == self.spin_key {
                self.spinning = true;
            }
        } else {
            self.spinning = false;
        }
    }

    pub fn spinning(&self) -> bool {
        self.spinning
    }
}

/// Camera plus its GPU-side uniform resources.
#[derive(Debug)]
pub struct CameraResources {
    pub camera: Camera,
    pub controller: OrbitController,
    pub uniform: CameraUniform,
    pub buffer: wgpu::Buffer,
    pub bind_group: wgpu::BindGroup,
    pub bind_group_layout: wgpu::BindGroupLayout,
}

pub struct Context {
    pub(crate) window: Arc<Window>,
    pub(crate) depth_texture: texture::Texture,
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub camera: CameraResources,
    pub projection: Projection,
    pub light: LightResources,
    pub pipelines: Pipelines,
    pub clear_colour: wgpu::Color,
    pub mouse: MouseState,
}

impl Context {
    pub async fn new(window: Arc<Window>, viewer: &ViewerConfig) -> anyhow::Result<Self> {
        let size = window.inner_size();

        // The instance is a handle to our GPU
        log::info!("WGPU setup");
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            #[cfg(not(target_arch = "wasm32"))]
            backends: wgpu::Backends::PRIMARY,
            #[cfg(target_arch = "wasm32")]
            backends: wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;
        log::info!("device and queue");
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: None,
                required_features: wgpu::Features::empty(),
                // WebGL doesn't support all of wgpu's features, so if
                // we're building for the web we'll have to disable some.
                required_limits: if cfg!(target_arch = "wasm32") {
                    wgpu::Limits::downlevel_webgl2_defaults()
                } else {
                    wgpu::Limits::default()
                },
                memory_hints: Default::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;

        log::info!("surface");
        let surface_caps = surface.get_capabilities(&adapter);
        // The shaders assume an Srgb surface texture; on a non-Srgb surface
        // all colours would come out darker.
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(surface_caps.formats[0]);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width,
            height: size.height,
            present_mode: surface_caps.present_modes[0],
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };

        let camera = Camera::new((0.0, 5.0, 20.0), cgmath::Deg(-90.0), cgmath::Deg(-15.0));
        let projection = Projection::new(
            config.width,
            config.height,
            cgmath::Deg(viewer.fov_deg),
            viewer.znear,
            viewer.zfar,
        );
        let controller = OrbitController::new(
            viewer.orbit_target,
            viewer.orbit_distance,
            viewer.orbit_sensitivity,
            viewer.orbit_damping,
        );

        let mut camera_uniform = CameraUniform::new();
        camera_uniform.update_view_proj(&camera, &projection);

        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Camera Buffer"),
            contents: bytemuck::cast_slice(&[camera_uniform]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let camera_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
                label: Some("camera_bind_group_layout"),
            });

        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &camera_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
            label: Some("camera_bind_group"),
        });

        let camera = CameraResources {
            camera,
            controller,
            uniform: camera_uniform,
            buffer: camera_buffer,
            bind_group: camera_bind_group,
            bind_group_layout: camera_bind_group_layout,
        };

        let depth_texture = texture::Texture::create_depth_texture(
            &device,
            [config.width, config.height],
            "depth_texture",
        );

        let marker = GpuMesh::upload(&device, &Shape::uv_sphere(1.0, 16, 12));
        let light = LightResources::new(
            LightUniform::new([8.0, 10.0, 8.0], [1.0, 1.0, 1.0]),
            Some(marker),
            &device,
        );

        let pipelines = Pipelines::new(
            &device,
            &config,
            &camera.bind_group_layout,
            &light.bind_group_layout,
        );

        Ok(Self {
            window,
            depth_texture,
            surface,
            device,
            queue,
            config,
            camera,
            projection,
            light,
            pipelines,
            clear_colour: viewer.clear_colour,
            mouse: MouseState::default(),
        })
    }
}
