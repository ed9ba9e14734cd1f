//! Application event loop and the per-frame step.
//!
//! The loop is self-sustaining: every frame re-requests a redraw before
//! doing any work, so one step runs per display refresh for the lifetime of
//! the process. Each step advances the orbit helper by one tick, applies
//! the spin increment to the scene while the spin key is held, and submits
//! the frame.
//!
//! # Lifecycle Flow
//!
//! Each frame follows this pattern:
//! 1. Re-arm by requesting the next redraw
//! 2. Advance the camera controller by one damped tick
//! 3. Step the scene (spin increment while the flag is held)
//! 4. Pack instance batches and upload changed buffers
//! 5. Record the render pass and present

use std::sync::Arc;

use cgmath::Rotation3;
use instant::{Duration, Instant};
use winit::{
    application::ApplicationHandler,
    event::{DeviceEvent, DeviceId, KeyEvent, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::PhysicalKey,
    window::Window,
};

use crate::{
    config::ViewerConfig,
    context::{Context, InputState, MouseButtonState},
    data_structures::{scene_graph::Scene, texture::Texture},
    render::BatchRenderer,
};

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Application state bundle: GPU context, scene, input flag, and renderer.
pub struct AppState {
    pub(crate) ctx: Context,
    scene: Scene,
    input: InputState,
    renderer: BatchRenderer,
    viewer: ViewerConfig,
    is_surface_configured: bool,
}

impl AppState {
    async fn new(window: Arc<Window>, scene: Scene, viewer: ViewerConfig) -> Self {
        let ctx = Context::new(window, &viewer).await;
        let ctx = match ctx {
            Ok(ctx) => ctx,
            Err(e) => panic!(
                "App initialization failed. Cannot create the main context: {}",
                e
            ),
        };
        let input = InputState::new(viewer.spin_key);
        Self {
            ctx,
            scene,
            input,
            renderer: BatchRenderer::new(),
            viewer,
            is_surface_configured: false,
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.ctx.config.width = width;
            self.ctx.config.height = height;
            self.is_surface_configured = true;
            self.ctx.projection.resize(width, height);
            self.ctx
                .surface
                .configure(&self.ctx.device, &self.ctx.config);
            self.ctx.depth_texture = Texture::create_depth_texture(
                &self.ctx.device,
                [self.ctx.config.width, self.ctx.config.height],
                "depth_texture",
            );
        }
    }

    /// One full frame: update animation state, then draw.
    fn frame(&mut self, dt: Duration) -> Result<(), wgpu::SurfaceError> {
        // Re-arm before doing any work so the loop keeps itself alive.
        self.ctx.window.request_redraw();

        // Rendering requires the surface to be configured
        if !self.is_surface_configured {
            return Ok(());
        }

        // Camera helper tick
        self.ctx
            .camera
            .controller
            .update(&mut self.ctx.camera.camera, dt);
        self.ctx
            .camera
            .uniform
            .update_view_proj(&self.ctx.camera.camera, &self.ctx.projection);
        self.ctx.queue.write_buffer(
            &self.ctx.camera.buffer,
            0,
            bytemuck::cast_slice(&[self.ctx.camera.uniform]),
        );

        // Conditional state changes: spin while the key is held
        self.scene.advance(&self.input, self.viewer.spin_step);

        // The light slowly circles the scene
        if let Some(light) = self.scene.lights_mut().first_mut() {
            let old_position = light.transform.position;
            light.transform.position = cgmath::Quaternion::from_axis_angle(
                cgmath::Vector3::unit_y(),
                cgmath::Deg(20.0 * dt.as_secs_f32()),
            ) * old_position;
        }
        self.ctx.light.sync(&self.ctx.queue, self.scene.lights());

        self.renderer
            .prepare(&self.ctx.device, &self.ctx.queue, &self.scene);

        let output = self.ctx.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder: wgpu::CommandEncoder =
            self.ctx
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("Render Encoder"),
                });
        {
            let mut render_pass: wgpu::RenderPass<'_> =
                encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Render Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Clear(self.ctx.clear_colour),
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                        view: &self.ctx.depth_texture.view,
                        depth_ops: Some(wgpu::Operations {
                            load: wgpu::LoadOp::Clear(1.0),
                            store: wgpu::StoreOp::Store,
                        }),
                        stencil_ops: None,
                    }),
                    occlusion_query_set: None,
                    timestamp_writes: None,
                });

            // Actual rendering:
            if let Some(marker) = &self.ctx.light.marker {
                render_pass.set_pipeline(&self.ctx.pipelines.light);
                render_pass.set_vertex_buffer(0, marker.vertex_buffer.slice(..));
                render_pass
                    .set_index_buffer(marker.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                render_pass.set_bind_group(0, &self.ctx.camera.bind_group, &[]);
                render_pass.set_bind_group(1, &self.ctx.light.bind_group, &[]);
                render_pass.draw_indexed(0..marker.num_elements, 0, 0..1);
            }

            render_pass.set_pipeline(&self.ctx.pipelines.scene);
            self.renderer.draw(
                &mut render_pass,
                &self.ctx.camera.bind_group,
                &self.ctx.light.bind_group,
            );
        }

        self.ctx.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}

pub struct App {
    #[cfg(not(target_arch = "wasm32"))]
    async_runtime: tokio::runtime::Runtime,
    proxy: winit::event_loop::EventLoopProxy<ViewerEvent>,
    state: Option<AppState>,
    // Holds the scene and config until the window exists. We use Option to
    // `take()` it after use.
    pending: Option<(Scene, ViewerConfig)>,
    last_time: Instant,
}

impl App {
    fn new(event_loop: &EventLoop<ViewerEvent>, scene: Scene, viewer: ViewerConfig) -> Self {
        let proxy = event_loop.create_proxy();
        #[cfg(not(target_arch = "wasm32"))]
        let async_runtime = tokio::runtime::Runtime::new().unwrap();
        Self {
            #[cfg(not(target_arch = "wasm32"))]
            async_runtime,
            proxy,
            state: None,
            pending: Some((scene, viewer)),
            last_time: Instant::now(),
        }
    }
}

pub(crate) enum ViewerEvent {
    #[allow(dead_code)]
    Initialized(Box<AppState>),
}

impl ApplicationHandler<ViewerEvent> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        #[allow(unused_mut)]
        let mut window_attributes = Window::default_attributes();

        #[cfg(target_arch = "wasm32")]
        {
            use wasm_bindgen::JsCast;
            use winit::platform::web::WindowAttributesExtWebSys;

            const CANVAS_ID: &str = "canvas";

            let window = web_sys::window().unwrap_throw();
            let document = window.document().unwrap_throw();
            let canvas = document.get_element_by_id(CANVAS_ID).unwrap_throw();
            let html_canvas_element = canvas.unchecked_into();
            window_attributes = window_attributes.with_canvas(Some(html_canvas_element));
        }

        let window = Arc::new(event_loop.create_window(window_attributes).unwrap());

        let (scene, viewer) = self.pending.take().unwrap();
        let init_future = AppState::new(window, scene, viewer);

        #[cfg(not(target_arch = "wasm32"))]
        {
            let app_state = self.async_runtime.block_on(init_future);
            self.state = Some(app_state);
        }

        #[cfg(target_arch = "wasm32")]
        {
            let proxy = self.proxy.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let app_state = init_future.await;
                assert!(
                    proxy
                        .send_event(ViewerEvent::Initialized(Box::new(app_state)))
                        .is_ok()
                );
            });
        }
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: ViewerEvent) {
        match event {
            ViewerEvent::Initialized(state) => {
                // This is the message from our wasm `spawn_local`
                self.state = Some(*state);

                // Trigger a resize and redraw now that we are initialized
                let app_state = self.state.as_mut().unwrap();
                let size = app_state.ctx.window.inner_size();
                app_state.resize(size.width, size.height);
                app_state.ctx.window.request_redraw();
            }
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        let state = match &mut self.state {
            Some(state) => state,
            None => return,
        };
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            if let MouseButtonState::Left = state.ctx.mouse.pressed {
                state.ctx.camera.controller.handle_mouse(dx, dy);
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: WindowEvent,
    ) {
        let state = match &mut self.state {
            Some(state) => state,
            None => return,
        };

        // general stuff
        state.ctx.camera.controller.handle_window_events(&event);

        if let WindowEvent::CursorMoved {
            device_id: _,
            position,
        } = event
        {
            state.ctx.mouse.coords = position;
        };

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(size) => state.resize(size.width, size.height),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(code),
                        state: key_state,
                        ..
                    },
                ..
            } => state.input.on_key(code, key_state.is_pressed()),
            WindowEvent::RedrawRequested => {
                let dt = self.last_time.elapsed();
                self.last_time = Instant::now();

                match state.frame(dt) {
                    Ok(_) => (),
                    // Reconfigure the surface if it's lost or outdated
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        let size = state.ctx.window.inner_size();
                        state.resize(size.width, size.height);
                    }
                    Err(e) => {
                        log::error!("Unable to render {}", e);
                    }
                }
            }
            WindowEvent::MouseInput {
                state: button_state,
                button,
                ..
            } => match (button, button_state.is_pressed()) {
                (MouseButton::Left, true) => state.ctx.mouse.pressed = MouseButtonState::Left,
                (MouseButton::Right, true) => state.ctx.mouse.pressed = MouseButtonState::Right,
                (_, false) => state.ctx.mouse.pressed = MouseButtonState::None,
                _ => (),
            },
            _ => {}
        }
    }
}

/// Start the viewer: open a window, initialise the GPU context, and run the
/// frame loop until the window is closed.
pub fn run(scene: Scene, viewer: ViewerConfig) -> anyhow::Result<()> {
    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Err(e) = env_logger::try_init() {
            println!("Warning: Could not initialize logger: {}", e);
        };
    }

    #[cfg(target_arch = "wasm32")]
    {
        console_log::init_with_level(log::Level::Info).unwrap_throw();
    }

    let event_loop: EventLoop<ViewerEvent> = EventLoop::with_user_event().build()?;

    let mut app = App::new(&event_loop, scene, viewer);

    event_loop.run_app(&mut app)?;

    Ok(())
}
