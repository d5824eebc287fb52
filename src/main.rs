//! Sortwave - Sorting algorithms you can watch and hear
//!
//! Every swap redraws the bars and sounds a tone pitched by the bar's height.

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use sortwave::audio::AudioSystem;
use sortwave::cli::Args;
use sortwave::controller::{Controller, TickOutcome};
use sortwave::emitter::{BarRenderer, Cadence, Silent, TonePlayer};
use sortwave::engine::Algorithm;
use sortwave::params::{BarConfig, RecordingConfig, RenderConfig, ToneConfig};
use sortwave::recording;
use sortwave::rendering::{BarLayout, FrameState, RenderError, RenderSystem};

const TITLE: &str = "Sortwave";

/// Key-triggered controller action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Sort(Algorithm),
    Shuffle,
    Cancel,
    WiderBars,
    NarrowerBars,
    Quit,
}

fn action_for(key: KeyCode) -> Option<Action> {
    let action = match key {
        KeyCode::Digit1 => Action::Sort(Algorithm::Selection),
        KeyCode::Digit2 => Action::Sort(Algorithm::DoubleSelection),
        KeyCode::Digit3 => Action::Sort(Algorithm::Quick),
        KeyCode::Digit4 => Action::Sort(Algorithm::Merge),
        KeyCode::Digit5 => Action::Sort(Algorithm::Heap),
        KeyCode::Digit6 => Action::Sort(Algorithm::Bogo),
        KeyCode::Digit7 => Action::Sort(Algorithm::AmericanFlag),
        KeyCode::KeyS => Action::Shuffle,
        KeyCode::KeyC => Action::Cancel,
        KeyCode::Equal | KeyCode::NumpadAdd => Action::WiderBars,
        KeyCode::Minus | KeyCode::NumpadSubtract => Action::NarrowerBars,
        KeyCode::Escape => Action::Quit,
        _ => return None,
    };
    Some(action)
}

/// Main application state
struct App {
    // Window and rendering
    window: Option<Arc<Window>>,
    render_system: Option<RenderSystem>,
    frame: FrameState,

    // Playback
    controller: Controller,
    audio: Box<dyn TonePlayer>,

    // Configuration
    render_config: RenderConfig,

    /// Notification shown in the title and when it expires
    notice: Option<Instant>,

    failed: bool,
}

impl App {
    fn new(controller: Controller, audio: Box<dyn TonePlayer>, render_config: RenderConfig) -> Self {
        let frame = FrameState::new(controller.bars().as_slice());

        Self {
            window: None,
            render_system: None,
            frame,
            controller,
            audio,
            render_config,
            notice: None,
            failed: false,
        }
    }

    fn handle_action(&mut self, action: Action, event_loop: &ActiveEventLoop) {
        let result = match action {
            Action::Sort(algorithm) => self.controller.start(algorithm),
            Action::Shuffle => self.controller.shuffle(),
            Action::Cancel => {
                self.controller.cancel();
                Ok(())
            }
            Action::WiderBars => {
                let width = self.controller.config().bar_width + 1;
                self.controller.apply_bar_width(width)
            }
            Action::NarrowerBars => {
                let width = self.controller.config().bar_width.saturating_sub(1);
                self.controller.apply_bar_width(width)
            }
            Action::Quit => {
                event_loop.exit();
                Ok(())
            }
        };
        // Rejections also arrive as notifications, shown below
        if let Err(err) = result {
            log::debug!("{:?} rejected: {}", action, err);
        }
        self.frame.draw(self.controller.bars().as_slice(), None);
        self.show_notifications();
    }

    fn show_notifications(&mut self) {
        let Some(note) = self.controller.drain_notifications().pop() else {
            return;
        };
        if let Some(window) = &self.window {
            window.set_title(&format!("{} | {}", TITLE, note.message));
        }
        self.notice = Some(Instant::now() + self.render_config.notification_duration);
    }

    fn expire_notice(&mut self, now: Instant) {
        if self.notice.is_some_and(|until| until <= now) {
            self.notice = None;
            if let Some(window) = &self.window {
                window.set_title(TITLE);
            }
        }
    }

    /// Advance playback and render a single frame
    fn render_frame(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        if let TickOutcome::Finished(job) =
            self.controller
                .tick(now, &mut self.frame, self.audio.as_mut())
        {
            log::debug!("{} done", job);
        }
        self.expire_notice(now);

        let Some(render_system) = self.render_system.as_mut() else {
            return;
        };

        if self.frame.take_dirty() {
            let config = self.controller.config();
            let layout = BarLayout {
                canvas_width: config.canvas_width,
                canvas_height: config.canvas_height,
                bar_width: config.bar_width,
            };
            let rects = layout.rects(
                &self.frame.bars,
                self.controller.bars().max_value(),
                self.frame.highlight,
            );
            render_system.update_bars(&rects, &self.render_config.palette);
        }

        match render_system.render() {
            Ok(()) => {}
            Err(err @ RenderError::Frame(wgpu::SurfaceError::OutOfMemory)) => {
                log::error!("Render error: {}", err);
                self.failed = true;
                event_loop.exit();
            }
            Err(err) => {
                log::warn!("Skipped frame: {}", err);
                render_system.reconfigure();
            }
        }
    }
}

impl ApplicationHandler for App {
    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }

    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return; // Already initialized
        }

        // Create window
        let window_attributes = Window::default_attributes()
            .with_title(TITLE)
            .with_inner_size(PhysicalSize::new(
                self.render_config.window_width,
                self.render_config.window_height,
            ));

        let window = match event_loop.create_window(window_attributes) {
            Ok(window) => Arc::new(window),
            Err(err) => {
                log::error!("Failed to create window: {}", err);
                self.failed = true;
                event_loop.exit();
                return;
            }
        };

        // Initialize rendering system
        let render_system = match pollster::block_on(RenderSystem::new(
            Arc::clone(&window),
            &self.render_config.palette,
        )) {
            Ok(render_system) => render_system,
            Err(err) => {
                log::error!("{}", err);
                self.failed = true;
                event_loop.exit();
                return;
            }
        };

        log::info!("Keys: 1-7 sort, S shuffle, C cancel, +/- bar width, Esc quit");

        self.window = Some(window);
        self.render_system = Some(render_system);
        self.frame.draw(self.controller.bars().as_slice(), None);
        self.show_notifications();
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _window_id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(key),
                        repeat: false,
                        ..
                    },
                ..
            } => {
                if let Some(action) = action_for(key) {
                    self.handle_action(action, event_loop);
                }
            }
            WindowEvent::Resized(size) => {
                if size.width == 0 || size.height == 0 {
                    return;
                }
                if let Some(render_system) = self.render_system.as_mut() {
                    render_system.resize(size.width, size.height);
                }
                let config = self.controller.config();
                if (config.canvas_width, config.canvas_height) != (size.width, size.height) {
                    self.controller.resize(size.width, size.height);
                    self.frame.draw(self.controller.bars().as_slice(), None);
                }
            }
            WindowEvent::RedrawRequested => self.render_frame(event_loop),
            _ => {}
        }
    }
}

fn run_window(args: &Args) -> ExitCode {
    let controller = Controller::new(args.bar_config(), Cadence::Paced(args.pacing()), args.seed);

    let audio: Box<dyn TonePlayer> = if args.mute {
        Box::new(Silent)
    } else {
        match AudioSystem::new(ToneConfig::default()) {
            Ok(audio) => Box::new(audio),
            Err(err) => {
                log::warn!("{}; continuing without sound", err);
                Box::new(Silent)
            }
        }
    };

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(err) => {
            log::error!("Failed to create event loop: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let mut app = App::new(controller, audio, args.render_config());
    if let Err(err) = event_loop.run_app(&mut app) {
        log::error!("Event loop error: {}", err);
        return ExitCode::FAILURE;
    }

    if app.failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn run_recording(args: &Args, config: &RecordingConfig) -> ExitCode {
    let result = recording::record(
        config,
        args.bar_config(),
        args.pacing(),
        ToneConfig::default(),
        args.render_config().palette,
        args.parse_algorithm(),
        args.seed,
    );

    match result {
        Ok(summary) => {
            log::info!(
                "Wrote {} frames to {}",
                summary.frames,
                config.frames_dir().display()
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("Recording failed: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    if let Err(err) = BarConfig::validate_bar_width(args.bar_width) {
        log::error!("{}", err);
        return ExitCode::FAILURE;
    }

    match args.recording_config() {
        Some(config) => run_recording(&args, &config),
        None => run_window(&args),
    }
}
