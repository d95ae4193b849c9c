//! Tornado Sim entry point
//!
//! Sets up logging, settings, and the HUD font, then runs the winit event
//! loop with the simulation loop driving each redraw.

use std::process::ExitCode;
use std::sync::Arc;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::window::{Window, WindowId};

use tornado_sim::consts::{CANVAS_HEIGHT, CANVAS_WIDTH};
use tornado_sim::platform::{FrameClock, command_for_key, load_text_renderer};
use tornado_sim::renderer::{FramePresenter, TextRenderer};
use tornado_sim::sim::Command;
use tornado_sim::{PlatformError, Settings, SimulationLoop};

const WINDOW_TITLE: &str = "Tornado Simulator";

struct App {
    sim: SimulationLoop,
    text: TextRenderer,
    clock: FrameClock,
    pending: Vec<Command>,
    window: Option<Arc<Window>>,
    presenter: Option<FramePresenter>,
    /// Fatal error that ended the loop
    error: Option<PlatformError>,
}

impl App {
    fn new(settings: &Settings, text: TextRenderer) -> Self {
        Self {
            sim: SimulationLoop::new(settings),
            text,
            clock: FrameClock::new(settings.effective_fps()),
            pending: Vec::new(),
            window: None,
            presenter: None,
            error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: PlatformError) {
        self.error = Some(error);
        self.sim.stop();
        event_loop.exit();
    }

    fn init_window(&mut self, event_loop: &ActiveEventLoop) -> Result<(), PlatformError> {
        let window_attrs = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(LogicalSize::new(CANVAS_WIDTH, CANVAS_HEIGHT))
            .with_resizable(false);

        let window = Arc::new(event_loop.create_window(window_attrs)?);
        let presenter = pollster::block_on(FramePresenter::new(
            window.clone(),
            CANVAS_WIDTH,
            CANVAS_HEIGHT,
        ))?;

        self.window = Some(window);
        self.presenter = Some(presenter);
        Ok(())
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let dt = self.clock.tick();
        let Some(frame) = self.sim.frame(dt, self.pending.drain(..), Some(&mut self.text)) else {
            event_loop.exit();
            return;
        };
        let Some(presenter) = self.presenter.as_mut() else {
            return;
        };

        match presenter.present(frame) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost, reconfiguring");
                presenter.reconfigure();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("GPU out of memory");
                self.sim.stop();
                event_loop.exit();
            }
            Err(e) => log::warn!("Present error: {:?}", e),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            if let Err(e) = self.init_window(event_loop) {
                self.fail(event_loop, e);
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                self.sim.stop();
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                if let Some(presenter) = &mut self.presenter {
                    presenter.resize(size.width, size.height);
                }
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed || event.repeat {
                    return;
                }
                if let PhysicalKey::Code(code) = event.physical_key {
                    if let Some(command) = command_for_key(code) {
                        self.pending.push(command);
                    }
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let deadline = self.clock.next_deadline();
        if std::time::Instant::now() >= deadline {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(deadline));
    }
}

fn run(settings: &Settings) -> Result<(), PlatformError> {
    let text = load_text_renderer(settings.font_path.as_deref())?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(settings, text);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Tornado Sim starting...");

    let settings = Settings::load();
    match run(&settings) {
        Ok(()) => {
            log::info!("Tornado Sim stopped");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("Fatal: {}", e);
            ExitCode::FAILURE
        }
    }
}
