use std::sync::Arc;
use std::time::Instant;

use log::{error, info};
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::{DeviceEvent, DeviceId, ElementState, KeyEvent, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowAttributes, WindowId},
};

use crate::config::ViewerConfig;
use crate::error::{Result, ViewerError};
use crate::gfx::{
    camera::OrbitControls,
    rendering::RenderEngine,
    scene::{Scene, SceneComposer},
};
use crate::scenarios::{geometry_editor_scene, spin_cube, spinning_cube_scene};
use crate::strategy::{GeometryStrategy, Primitive, PrimitiveKind};
use crate::ui::{geometry_editor_window, UiManager};
use crate::viewport::{resize_channel, ResizeNotifier, ViewportBuilder, ViewportController};

/// Which scene the viewer opens with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    SpinningCube,
    GeometryEditor(PrimitiveKind),
}

pub struct PrimviewApp {
    event_loop: EventLoop<()>,
    app_state: AppState,
}

struct AppState {
    scenario: Scenario,
    config: ViewerConfig,
    running: Option<Running>,
    error: Option<ViewerError>,
}

/// Everything that exists once the window is up
struct Running {
    window: Arc<Window>,
    viewport: ViewportController<RenderEngine, Arc<Window>>,
    ui: UiManager,
    resize: ResizeNotifier,
    content: Content,
    started: Instant,
}

enum Content {
    Cube(Scene),
    Editor {
        strategy: Primitive,
        composer: SceneComposer,
        controls: OrbitControls,
    },
}

impl PrimviewApp {
    /// Creates the event loop; the window opens once [`PrimviewApp::run`] starts it
    pub fn new(scenario: Scenario, config: ViewerConfig) -> Result<Self> {
        let event_loop = EventLoop::new()?;

        Ok(Self {
            event_loop,
            app_state: AppState {
                scenario,
                config,
                running: None,
                error: None,
            },
        })
    }

    /// Runs until the window closes or a fatal error occurs
    pub fn run(mut self) -> Result<()> {
        info!("starting {:?}", self.app_state.scenario);
        self.event_loop.set_control_flow(ControlFlow::Poll);
        self.event_loop.run_app(&mut self.app_state)?;

        match self.app_state.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl AppState {
    fn start(&self, event_loop: &ActiveEventLoop) -> Result<Running> {
        let attributes = WindowAttributes::default()
            .with_title(self.config.title.clone())
            .with_inner_size(LogicalSize::new(self.config.width, self.config.height));
        let window = Arc::new(event_loop.create_window(attributes)?);

        let (width, height) = window.inner_size().into();
        let engine = pollster::block_on(RenderEngine::new(
            window.clone(),
            width,
            height,
            window.scale_factor(),
            &self.config,
        ))?;

        let ui = UiManager::new(
            engine.device(),
            engine.queue(),
            engine.surface_format(),
            &window,
        );

        let (resize, subscription) = resize_channel();
        let mut builder = ViewportBuilder::new()
            .surface(engine)
            .container(window.clone())
            .resize_events(subscription);
        if self.scenario == Scenario::SpinningCube {
            builder = builder.on_update(spin_cube);
        }
        let mut viewport = builder.build()?;

        let content = match self.scenario {
            Scenario::SpinningCube => {
                Content::Cube(spinning_cube_scene(viewport.surface_mut().buffers_mut()))
            }
            Scenario::GeometryEditor(kind) => {
                let strategy = Primitive::new(kind);
                let composer = geometry_editor_scene(&strategy, viewport.surface_mut().buffers_mut());
                Content::Editor {
                    controls: OrbitControls::from_camera(viewport.camera()),
                    strategy,
                    composer,
                }
            }
        };

        Ok(Running {
            window,
            viewport,
            ui,
            resize,
            content,
            started: Instant::now(),
        })
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, e: ViewerError) {
        error!("{}", e);
        self.error = Some(e);
        event_loop.exit();
    }

    fn toggle_vsync(&mut self) {
        self.config.vsync = !self.config.vsync;
        if let Some(running) = self.running.as_mut() {
            running.viewport.surface_mut().set_vsync(self.config.vsync);
        }
        info!("vsync {}", if self.config.vsync { "on" } else { "off" });
    }
}

impl Running {
    /// UI pass, parameter rebuilds, then one viewport frame
    fn redraw(&mut self) -> Result<()> {
        let elapsed = self.started.elapsed();

        match &mut self.content {
            Content::Cube(scene) => self.viewport.frame(elapsed, scene, None),
            Content::Editor {
                strategy,
                composer,
                controls,
            } => {
                controls.apply(self.viewport.camera_mut());

                let buffers = self.viewport.surface_mut().buffers_mut();
                self.ui.update_logic(&self.window, |ui| {
                    geometry_editor_window(ui, strategy, &mut |edited: &dyn GeometryStrategy| {
                        composer.rebuild(edited, &mut *buffers)
                    });
                });

                self.viewport
                    .frame(elapsed, composer.scene_mut(), Some(&mut self.ui))
            }
        }
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.running.is_some() {
            return;
        }

        match self.start(event_loop) {
            Ok(running) => self.running = Some(running),
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, window_id: WindowId, event: WindowEvent) {
        let Some(running) = self.running.as_mut() else {
            return;
        };

        // UI sees input first
        let captured = running.ui.handle_input(&running.window, window_id, &event);

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key_code),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } if !captured => match key_code {
                KeyCode::Escape => event_loop.exit(),
                KeyCode::KeyV => self.toggle_vsync(),
                _ => (),
            },
            WindowEvent::Resized(_) => running.resize.notify(),
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                running.viewport.surface_mut().set_scale_factor(scale_factor);
                running.resize.notify();
            }
            WindowEvent::RedrawRequested => {
                if let Err(e) = running.redraw() {
                    self.fail(event_loop, e);
                }
            }
            other => {
                if let Content::Editor { controls, .. } = &mut running.content {
                    // a drag that started in the scene keeps its release
                    if !captured || controls.is_dragging() {
                        controls.process_window_event(&other);
                    }
                }
            }
        }
    }

    fn device_event(&mut self, _event_loop: &ActiveEventLoop, _device_id: DeviceId, event: DeviceEvent) {
        let Some(running) = self.running.as_mut() else {
            return;
        };

        if let Content::Editor { controls, .. } = &mut running.content {
            controls.process_device_event(&event);
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(running) = self.running.as_ref() {
            running.window.request_redraw();
        }
    }
}
