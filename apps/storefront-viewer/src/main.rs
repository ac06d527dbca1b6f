mod overlay;
mod state;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use egui::Context as EguiContext;
use glam::Vec2;
use state::{touch_pointer, AppState, MOUSE_POINTER};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use storefront_assets::FsTextureSource;
use storefront_common::{DeviceClassPreference, ShopConfig, StorefrontSettings};
use storefront_controller::{DeviceClass, DeviceHints};
use storefront_render_wgpu::WgpuRenderer;
use storefront_store::{public_config_or_default, FileConfigStore};
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta, TouchPhase, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::window::{Window, WindowId};

/// Pixels of trackpad scroll equivalent to one wheel line.
const PIXELS_PER_LINE: f32 = 50.0;

#[derive(Parser)]
#[command(name = "storefront-viewer", about = "Walk through a 3D shop")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// YAML settings file
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Shop data directory (overrides settings)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Movement bounds profile (overrides settings)
    #[arg(long, value_enum)]
    device_class: Option<DeviceArg>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum DeviceArg {
    Auto,
    Constrained,
    Desktop,
}

impl From<DeviceArg> for DeviceClassPreference {
    fn from(arg: DeviceArg) -> Self {
        match arg {
            DeviceArg::Auto => DeviceClassPreference::Auto,
            DeviceArg::Constrained => DeviceClassPreference::Constrained,
            DeviceArg::Desktop => DeviceClassPreference::Desktop,
        }
    }
}

/// What the viewer needs before a window exists.
struct Launch {
    settings: StorefrontSettings,
    config: ShopConfig,
}

struct GpuApp {
    launch: Launch,
    state: Option<AppState>,
    window: Option<Arc<Window>>,
    surface: Option<wgpu::Surface<'static>>,
    device: Option<wgpu::Device>,
    queue: Option<wgpu::Queue>,
    config: Option<wgpu::SurfaceConfiguration>,
    renderer: Option<WgpuRenderer>,
    egui_ctx: EguiContext,
    egui_winit: Option<egui_winit::State>,
    egui_renderer: Option<egui_wgpu::Renderer>,
    last_frame: Instant,
    /// Last cursor position in logical pixels.
    cursor: Vec2,
}

impl GpuApp {
    fn new(launch: Launch) -> Self {
        Self {
            launch,
            state: None,
            window: None,
            surface: None,
            device: None,
            queue: None,
            config: None,
            renderer: None,
            egui_ctx: EguiContext::default(),
            egui_winit: None,
            egui_renderer: None,
            last_frame: Instant::now(),
            cursor: Vec2::ZERO,
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(format!("{} - Storefront", self.launch.config.shop_name))
            .with_inner_size(PhysicalSize::new(1280u32, 720));
        let window = Arc::new(event_loop.create_window(attrs)?);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window.clone())?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .context("no suitable GPU adapter")?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("storefront_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))?;

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or(surface_caps.formats.first())
            .copied()
            .context("surface reports no formats")?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let renderer = WgpuRenderer::new(&device, &queue, surface_format, config.width, config.height);

        let egui_winit = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&device, surface_format, None, 1, false);

        let logical = logical_size(&window);
        let hints = DeviceHints {
            screen_width: logical.x,
            has_touch: false,
            user_agent: None,
        };
        let device_class = DeviceClass::resolve(self.launch.settings.device_class, &hints);
        let source = Arc::new(FsTextureSource::new("."));
        self.state = Some(AppState::new(
            &self.launch.settings,
            self.launch.config.clone(),
            device_class,
            logical,
            source,
        ));

        tracing::info!(
            "GPU initialized with {} backend",
            adapter.get_info().backend.to_str()
        );

        self.window = Some(window);
        self.surface = Some(surface);
        self.device = Some(device);
        self.queue = Some(queue);
        self.config = Some(config);
        self.renderer = Some(renderer);
        self.egui_winit = Some(egui_winit);
        self.egui_renderer = Some(egui_renderer);
        self.last_frame = Instant::now();
        Ok(())
    }

    fn redraw(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32().min(0.1);
        self.last_frame = now;

        let (
            Some(state),
            Some(window),
            Some(surface),
            Some(device),
            Some(queue),
            Some(config),
            Some(renderer),
            Some(egui_winit),
            Some(egui_renderer),
        ) = (
            &mut self.state,
            &self.window,
            &self.surface,
            &self.device,
            &self.queue,
            &self.config,
            &mut self.renderer,
            &mut self.egui_winit,
            &mut self.egui_renderer,
        )
        else {
            return;
        };

        for handle in state.update(dt) {
            if let Some(texture) = state.loader.texture(handle) {
                renderer.upload_texture(device, queue, handle, texture);
            }
        }

        let output = match surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                surface.configure(device, config);
                return;
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                return;
            }
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        renderer.render(
            device,
            queue,
            &view,
            &state.scene,
            state.loader.cache(),
            &state.render_view(),
        );

        let raw_input = egui_winit.take_egui_input(window);
        let mut action = overlay::OverlayAction::default();
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            action = overlay::draw(ctx, state);
        });
        egui_winit.handle_platform_output(window, full_output.platform_output);
        if action.enter {
            state.enter();
        }

        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [config.width, config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            egui_renderer.update_texture(device, queue, *id, image_delta);
        }
        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("egui_encoder"),
        });
        egui_renderer.update_buffers(device, queue, &mut encoder, &paint_jobs, &screen_descriptor);
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            egui_renderer.render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            egui_renderer.free_texture(id);
        }

        output.present();
        window.request_redraw();
    }

    fn logical_position(&self, physical: Vec2) -> Vec2 {
        let scale = self.window.as_ref().map_or(1.0, |w| w.scale_factor() as f32);
        physical / scale
    }
}

fn logical_size(window: &Window) -> Vec2 {
    let size = window.inner_size().to_logical::<f32>(window.scale_factor());
    Vec2::new(size.width, size.height)
}

/// Releases and focus loss must always reach the input state, even over the overlay.
fn is_release(event: &WindowEvent) -> bool {
    matches!(
        event,
        WindowEvent::MouseInput {
            state: ElementState::Released,
            ..
        } | WindowEvent::Touch(winit::event::Touch {
            phase: TouchPhase::Ended | TouchPhase::Cancelled,
            ..
        }) | WindowEvent::KeyboardInput {
            event: KeyEvent {
                state: ElementState::Released,
                ..
            },
            ..
        } | WindowEvent::Focused(false)
    )
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init(event_loop) {
            tracing::error!("failed to start viewer: {e:#}");
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let (Some(egui_winit), Some(window)) = (&mut self.egui_winit, &self.window) {
            let response = egui_winit.on_window_event(window, &event);
            if response.consumed && !is_release(&event) {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let (Some(surface), Some(device), Some(config)) =
                    (&self.surface, &self.device, &mut self.config)
                {
                    config.width = new_size.width.max(1);
                    config.height = new_size.height.max(1);
                    surface.configure(device, config);
                    if let Some(renderer) = &mut self.renderer {
                        renderer.resize(device, config.width, config.height);
                    }
                }
                if let (Some(window), Some(state)) = (&self.window, &mut self.state) {
                    state.resize(logical_size(window));
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: key_state,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                if let Some(state) = &mut self.state {
                    state.handle_key(&format!("{key:?}"), key_state == ElementState::Pressed);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                let pos = self.logical_position(Vec2::new(position.x as f32, position.y as f32));
                self.cursor = pos;
                if let Some(state) = &mut self.state {
                    state.pointer_move(MOUSE_POINTER, pos);
                }
            }
            WindowEvent::MouseInput {
                button: MouseButton::Left,
                state: btn_state,
                ..
            } => {
                let Some(state) = &mut self.state else { return };
                match btn_state {
                    ElementState::Pressed => state.pointer_down(MOUSE_POINTER, self.cursor),
                    ElementState::Released => state.pointer_up(MOUSE_POINTER),
                }
            }
            WindowEvent::Touch(touch) => {
                let pos = self.logical_position(Vec2::new(
                    touch.location.x as f32,
                    touch.location.y as f32,
                ));
                let Some(state) = &mut self.state else { return };
                let id = touch_pointer(touch.id);
                match touch.phase {
                    TouchPhase::Started => state.pointer_down(id, pos),
                    TouchPhase::Moved => state.pointer_move(id, pos),
                    TouchPhase::Ended | TouchPhase::Cancelled => state.pointer_up(id),
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let amount = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(p) => p.y as f32 / PIXELS_PER_LINE,
                };
                if let Some(state) = &mut self.state {
                    state.scroll(amount);
                }
            }
            WindowEvent::Focused(false) => {
                if let Some(state) = &mut self.state {
                    tracing::debug!("focus lost; releasing held input");
                    state.release_all();
                }
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    let mut settings = StorefrontSettings::load_or_default(cli.settings.as_deref())
        .context("loading settings")?;
    if let Some(dir) = cli.data_dir {
        settings.data_dir = dir;
    }
    if let Some(class) = cli.device_class {
        settings.device_class = class.into();
    }

    tracing::info!("storefront-viewer starting");

    let config = match FileConfigStore::open(&settings.data_dir, &settings.admin_token) {
        Ok(store) => public_config_or_default(&store),
        Err(e) => {
            tracing::warn!(error = %e, "config store unavailable; using demo config");
            ShopConfig::default()
        }
    };

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(Launch { settings, config });
    event_loop.run_app(&mut app)?;

    Ok(())
}
