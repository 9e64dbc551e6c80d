//! Gorgon scene demo: a title screen and a stopwatch scene driven by a winit event loop.
//!
//! Run with `--config <file.json>` to load a [`ManagerConfig`].

use std::path::PathBuf;
use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::KeyCode,
    window::{Window, WindowId},
};

use gorgon::core::{
    input::{InputState, KEY_PRESSED},
    logging,
    time::FrameClock,
    UVec2,
};
use gorgon::scene::{ManagerConfig, Scene, SceneContext, SceneId, SceneManager};

const TITLE: SceneId = SceneId(0);
const STOPWATCH: SceneId = SceneId(1);

/// Scenes draw by retitling the window
type Target = Arc<Window>;

struct TitleScene {
    base_title: String,
    blink_ms: u32,
}

impl Scene<Target> for TitleScene {
    fn requires_key_input(&self) -> bool {
        true
    }

    fn activate(&mut self, _ctx: &mut SceneContext) {
        self.blink_ms = 0;
        log::info!("Title screen: Enter to start, Escape to quit");
    }

    fn update(&mut self, _ctx: &mut SceneContext, delta_ms: u32) {
        self.blink_ms = (self.blink_ms + delta_ms) % 1000;
    }

    fn render(&mut self, _ctx: &mut SceneContext, window: &mut Target) {
        let prompt = if self.blink_ms < 500 { "press Enter" } else { "" };
        window.set_title(&format!("{} - {}", self.base_title, prompt));
    }

    fn key_event(&mut self, ctx: &mut SceneContext, key: KeyCode, amount: f32) {
        if amount != KEY_PRESSED {
            return;
        }
        match key {
            KeyCode::Enter => ctx.switch_scene(STOPWATCH),
            KeyCode::Escape => ctx.quit(),
            _ => {}
        }
    }
}

struct StopwatchScene {
    elapsed_ms: u64,
    laps: u32,
}

impl Scene<Target> for StopwatchScene {
    fn requires_key_input(&self) -> bool {
        true
    }

    fn first_activation(&mut self, ctx: &mut SceneContext) {
        log::info!("Stopwatch ready at {}x{}: Space for a lap, Escape to go back", ctx.size().x, ctx.size().y);
    }

    fn activate(&mut self, _ctx: &mut SceneContext) {
        self.elapsed_ms = 0;
        self.laps = 0;
    }

    fn deactivate(&mut self, _ctx: &mut SceneContext) {
        log::info!("Stopwatch stopped at {:.1}s after {} laps", self.elapsed_ms as f64 / 1000.0, self.laps);
    }

    fn update(&mut self, _ctx: &mut SceneContext, delta_ms: u32) {
        self.elapsed_ms += u64::from(delta_ms);
    }

    fn render(&mut self, _ctx: &mut SceneContext, window: &mut Target) {
        window.set_title(&format!("Stopwatch {:.1}s - lap {}", self.elapsed_ms as f64 / 1000.0, self.laps));
    }

    fn key_event(&mut self, ctx: &mut SceneContext, key: KeyCode, amount: f32) {
        if amount != KEY_PRESSED {
            return;
        }
        match key {
            KeyCode::Space => self.laps += 1,
            KeyCode::Escape => ctx.switch_scene(TITLE),
            _ => {}
        }
    }
}

fn build_manager(window: Target, config: ManagerConfig) -> gorgon::Result<SceneManager<Target>> {
    let base_title = config.window.title.clone();
    let mut manager = SceneManager::new(window, config);

    manager.register(TITLE, TitleScene { base_title, blink_ms: 0 })?;
    manager.register(STOPWATCH, StopwatchScene { elapsed_ms: 0, laps: 0 })?;
    manager.events_mut().register(|event| log::debug!("{:?}", event));
    manager.switch_scene(TITLE)?;

    Ok(manager)
}

struct App {
    config: ManagerConfig,
    manager: Option<SceneManager<Target>>,
    input: InputState,
    clock: FrameClock,
}

impl App {
    fn new(config: ManagerConfig) -> Self {
        Self {
            config,
            manager: None,
            input: InputState::new(),
            clock: FrameClock::new(),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.manager.is_some() {
            return;
        }

        let settings = &self.config.window;
        let window_attrs = Window::default_attributes()
            .with_title(settings.title.clone())
            .with_inner_size(PhysicalSize::new(settings.width, settings.height));

        let window = match event_loop.create_window(window_attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        match build_manager(window.clone(), self.config.clone()) {
            Ok(manager) => {
                self.manager = Some(manager);
                self.clock = FrameClock::new();
                window.request_redraw();
            }
            Err(e) => {
                log::error!("Failed to set up scenes: {}", e);
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let Some(manager) = self.manager.as_mut() else {
            return;
        };

        if let Some((key, amount)) = self.input.process_event(&event) {
            if let Err(e) = manager.handle_key(key, amount) {
                log::error!("Key event failed: {}", e);
            }
        }

        match event {
            WindowEvent::CloseRequested => manager.quit(),
            WindowEvent::Resized(size) => manager.resize(UVec2::new(size.width, size.height)),
            WindowEvent::RedrawRequested => {
                self.clock.tick();
                if let Err(e) = manager.step(self.clock.delta_millis()) {
                    log::error!("Frame failed: {}", e);
                    manager.quit();
                }
                manager.target().request_redraw();
            }
            _ => {}
        }

        if !manager.is_quitting() {
            return;
        }

        if let Some(mut manager) = self.manager.take() {
            if let Err(e) = manager.switch_scene(SceneId::NONE) {
                log::error!("Failed to deactivate scenes: {}", e);
            }
            log::info!("Final state:\n{}", manager.status().to_json());
            log::info!("Ran {} frames, last fps {:.1}", self.clock.frame_count(), self.clock.fps());
        }
        event_loop.exit();
    }
}

fn parse_config_arg(args: &[String]) -> Option<PathBuf> {
    args.windows(2)
        .find(|pair| pair[0] == "--config")
        .map(|pair| PathBuf::from(&pair[1]))
}

fn main() {
    logging::init();
    log::info!("Gorgon scene demo starting...");

    let args: Vec<String> = std::env::args().collect();
    let config = match parse_config_arg(&args) {
        Some(path) => match ManagerConfig::load(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("Could not load {}: {}", path.display(), e);
                return;
            }
        },
        None => ManagerConfig::new("Gorgon Scene Demo", UVec2::new(640, 360)),
    };

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            log::error!("Failed to create event loop: {}", e);
            return;
        }
    };

    let mut app = App::new(config);
    if let Err(e) = event_loop.run_app(&mut app) {
        log::error!("Event loop error: {}", e);
    }
}
