//! Marcher - ray-marching viewer
//!
//! Draws one full-screen quad and lets the on-disk fragment shader do the
//! ray-marching, with a free-fly camera and frame-time statistics.

use std::path::Path;
use std::time::Instant;

use winit::{
    application::ApplicationHandler,
    event::{DeviceEvent, DeviceId, ElementState, MouseButton, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::WindowId,
};

use marcher::config::AppConfig;
use marcher::systems::WindowSystem;
use marcher_input::CameraController;
use marcher_math::Vec3;
use marcher_render::{viewport_scale, Camera, FrameStats, QuadPipeline, RenderContext, Uniforms};

/// Main application state
struct App {
    config: AppConfig,
    window_sys: Option<WindowSystem>,
    render_context: Option<RenderContext>,
    pipeline: Option<QuadPipeline>,
    camera: Camera,
    controller: CameraController,
    stats: FrameStats,
    /// Aspect-ratio scale uniform, kept across minimize
    scale: [f32; 2],
    last_frame: Instant,
}

impl App {
    fn new() -> Self {
        let config = AppConfig::load().unwrap_or_else(|e| {
            log::warn!("Failed to load config: {}. Using defaults.", e);
            AppConfig::default()
        });

        let camera = Camera::new(Vec3::from(config.camera.start_position));

        let controller = CameraController::new()
            .with_move_speed(config.input.move_speed)
            .with_mouse_sensitivity(config.input.mouse_sensitivity)
            .with_smoothing_half_life(config.input.smoothing_half_life)
            .with_smoothing(config.input.smoothing_enabled);

        Self {
            config,
            window_sys: None,
            render_context: None,
            pipeline: None,
            camera,
            controller,
            stats: FrameStats::new(),
            scale: [1.0, 1.0],
            last_frame: Instant::now(),
        }
    }

    fn cursor_captured(&self) -> bool {
        self.window_sys
            .as_ref()
            .map(|w| w.is_cursor_captured())
            .unwrap_or(false)
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window_sys.is_none() {
            let window_sys = WindowSystem::create(event_loop, &self.config.window)
                .unwrap_or_else(|e| panic!("{}", e));

            let render_context = pollster::block_on(RenderContext::with_vsync(
                window_sys.window().clone(),
                self.config.window.vsync,
            ))
            .unwrap_or_else(|e| panic!("{}", e));

            let pipeline = QuadPipeline::new(
                &render_context.device,
                render_context.config.format,
                Path::new(&self.config.shader.vertex_path),
                Path::new(&self.config.shader.fragment_path),
            )
            .unwrap_or_else(|e| panic!("{}", e));

            if let Some(scale) =
                viewport_scale(render_context.size.width, render_context.size.height)
            {
                self.scale = scale;
            }

            log::info!(
                "Surface ready: {}x{} {:?}",
                render_context.size.width,
                render_context.size.height,
                render_context.config.format
            );

            self.last_frame = Instant::now();
            self.window_sys = Some(window_sys);
            self.render_context = Some(render_context);
            self.pipeline = Some(pipeline);
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }

            WindowEvent::Resized(physical_size) => {
                if let Some(ctx) = &mut self.render_context {
                    ctx.resize(physical_size);
                }
                if let Some(scale) = viewport_scale(physical_size.width, physical_size.height) {
                    self.scale = scale;
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key {
                    if event.state == ElementState::Pressed {
                        match key {
                            KeyCode::Escape => {
                                // Escape releases cursor first, then exits if pressed again
                                if self.cursor_captured() {
                                    if let Some(w) = &mut self.window_sys {
                                        w.release_cursor();
                                    }
                                } else {
                                    event_loop.exit();
                                }
                                return;
                            }
                            KeyCode::KeyR => {
                                self.camera.reset();
                                log::info!("Camera reset to starting position");
                            }
                            KeyCode::KeyF => {
                                if let Some(w) = &self.window_sys {
                                    w.toggle_fullscreen();
                                }
                            }
                            KeyCode::KeyG => {
                                let enabled = self.controller.toggle_smoothing();
                                log::info!(
                                    "Input smoothing: {}",
                                    if enabled { "ON" } else { "OFF" }
                                );
                            }
                            _ => {}
                        }
                    }
                    self.controller.process_keyboard(key, event.state);
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                // Left click toggles capture; a second click restores the cursor
                if state == ElementState::Pressed && button == MouseButton::Left {
                    if let Some(w) = &mut self.window_sys {
                        w.toggle_cursor_capture();
                    }
                }
            }

            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let dt = (now - self.last_frame).as_secs_f32();
                self.last_frame = now;

                // Input -> camera, then integrate one frame of movement
                let captured = self.cursor_captured();
                self.controller.update(&mut self.camera, dt, captured);
                self.camera.advance(dt);

                if let (Some(ctx), Some(pipeline)) = (&self.render_context, &self.pipeline) {
                    let uniforms = Uniforms {
                        scale: self.scale,
                        cam_pos: self.camera.position.to_array(),
                        cam_look: self.camera.forward().to_array(),
                        ..Uniforms::default()
                    };
                    pipeline.update_uniforms(&ctx.queue, &uniforms);

                    let output = match ctx.surface.get_current_texture() {
                        Ok(output) => output,
                        Err(wgpu::SurfaceError::Lost) => {
                            if let Some(ctx) = &mut self.render_context {
                                ctx.resize(ctx.size);
                            }
                            if let Some(w) = &self.window_sys {
                                w.request_redraw();
                            }
                            return;
                        }
                        Err(wgpu::SurfaceError::OutOfMemory) => {
                            log::error!("GPU out of memory");
                            event_loop.exit();
                            return;
                        }
                        Err(e) => {
                            log::warn!("Surface error: {:?}", e);
                            return;
                        }
                    };

                    let view = output
                        .texture
                        .create_view(&wgpu::TextureViewDescriptor::default());

                    let mut encoder =
                        ctx.device
                            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                                label: Some("Frame Encoder"),
                            });

                    pipeline.render(&mut encoder, &view);

                    ctx.queue.submit(std::iter::once(encoder.finish()));
                    output.present();
                }

                // Frame-time line goes to stdout, matching the classic harness
                if let Some(report) = self.stats.tick(dt) {
                    println!("{}", report);
                }

                if let Some(w) = &self.window_sys {
                    w.request_redraw();
                }
            }

            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta } = event {
            self.controller.process_mouse_motion(delta.0, delta.1);
        }
    }
}

fn main() {
    env_logger::init();
    log::info!("Starting marcher");

    let event_loop = EventLoop::new().expect("Failed to create event loop");
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new();
    event_loop.run_app(&mut app).expect("Event loop error");
}
