//! Skyflap entry point
//!
//! Handles platform-specific initialization and starts the frame driver.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, TouchEvent};

    use skyflap::platform::web::{BrowserScheduler, DomDisplay};
    use skyflap::renderer::{Palette, RenderState};
    use skyflap::sim::GameSession;
    use skyflap::{FrameDriver, Settings, Tuning};

    /// Widest the canvas is displayed, in CSS pixels
    const MAX_DISPLAY_WIDTH: f64 = 800.0;

    /// Game instance holding the driver and player preferences
    struct Game {
        driver: FrameDriver<BrowserScheduler, RenderState, DomDisplay>,
        settings: Settings,
    }

    impl Game {
        fn on_frame(&mut self, time: f64) {
            self.driver.on_frame(time);
            let fps = self.settings.show_fps.then(|| self.driver.fps());
            self.driver.display_mut().show_fps(fps);
        }

        /// Save the settings and push them into the session and renderer
        fn apply_settings(&mut self) {
            self.settings.save();
            let pool = self.settings.background_pool();
            self.driver.session_mut().resize_background(pool);

            let renderer = self.driver.renderer_mut();
            renderer.palette = Palette::for_contrast(self.settings.high_contrast);
            renderer.disc_segments = self.settings.quality.disc_segments();
            self.driver.present();
        }

        fn toggle_high_contrast(&mut self) {
            self.settings.high_contrast = !self.settings.high_contrast;
            self.apply_settings();
            log::info!("High contrast: {}", self.settings.high_contrast);
        }

        fn cycle_quality(&mut self) {
            let quality = self.settings.cycle_quality();
            self.apply_settings();
            log::info!("Quality: {}", quality.as_str());
        }

        fn toggle_background(&mut self) {
            self.settings.background = !self.settings.background;
            self.apply_settings();
            log::info!("Background: {}", self.settings.background);
        }

        fn toggle_reduced_motion(&mut self) {
            self.settings.reduced_motion = !self.settings.reduced_motion;
            self.apply_settings();
            log::info!("Reduced motion: {}", self.settings.reduced_motion);
        }

        fn toggle_fps(&mut self) {
            self.settings.show_fps = !self.settings.show_fps;
            self.settings.save();
            if !self.settings.show_fps {
                self.driver.display_mut().show_fps(None);
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Skyflap starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let settings = Settings::load();
        let mut tuning = Tuning::default();
        settings.apply_to(&mut tuning);

        // Initialize WebGPU (falls back to WebGL)
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let mut render_state =
            RenderState::new(surface, &adapter, canvas.width(), canvas.height(), tuning.clone())
                .await;
        render_state.palette = Palette::for_contrast(settings.high_contrast);
        render_state.disc_segments = settings.quality.disc_segments();

        let seed = js_sys::Date::now() as u64;
        let (scheduler, frame_callback) = BrowserScheduler::new();
        let driver = FrameDriver::new(
            GameSession::with_tuning(seed, tuning),
            scheduler,
            render_state,
            DomDisplay::new(&document),
        );
        let game = Rc::new(RefCell::new(Game { driver, settings }));

        log::info!("Game initialized with seed: {}", seed);

        {
            let game = game.clone();
            *frame_callback.borrow_mut() = Some(Closure::new(move |time: f64| {
                game.borrow_mut().on_frame(time);
            }));
        }

        setup_input_handlers(&canvas, game.clone());
        setup_resize(&canvas);

        // Initial draw; frames start on the first activate
        game.borrow_mut().driver.present();

        log::info!("Skyflap ready - press space or tap to start");
    }

    /// Scale the canvas to the window width, keeping its aspect ratio
    fn resize_canvas(canvas: &HtmlCanvasElement) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let inner_width = window
            .inner_width()
            .ok()
            .and_then(|w| w.as_f64())
            .unwrap_or(MAX_DISPLAY_WIDTH);
        let display_width = MAX_DISPLAY_WIDTH.min(inner_width - 40.0).max(1.0);
        let scale = display_width / canvas.width() as f64;

        let style = canvas.style();
        let _ = style.set_property("width", &format!("{}px", display_width));
        let _ = style.set_property("height", &format!("{}px", canvas.height() as f64 * scale));
    }

    fn setup_resize(canvas: &HtmlCanvasElement) {
        resize_canvas(canvas);

        let window = web_sys::window().unwrap();
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            resize_canvas(&canvas);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Keyboard
        {
            let game = game.clone();
            let document = web_sys::window().unwrap().document().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                match event.code().as_str() {
                    "Space" => {
                        event.prevent_default(); // Prevent page scrolling
                        if !event.repeat() {
                            game.borrow_mut().driver.activate();
                        }
                    }
                    "KeyH" => game.borrow_mut().toggle_high_contrast(),
                    "KeyF" => game.borrow_mut().toggle_fps(),
                    "KeyQ" => game.borrow_mut().cycle_quality(),
                    "KeyB" => game.borrow_mut().toggle_background(),
                    "KeyM" => game.borrow_mut().toggle_reduced_motion(),
                    _ => {}
                }
            });
            let _ = document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default(); // Prevent default touch behaviors
                game.borrow_mut().driver.activate();
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use skyflap::Tuning;

    env_logger::init();
    log::info!("Skyflap (native) starting...");
    log::info!("Native mode runs a headless autopilot - run with `trunk serve` for the web version");

    let tuning = match std::env::args().nth(1) {
        Some(path) => match headless::load_tuning(&path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path);
                tuning
            }
            Err(e) => {
                log::error!("Could not load tuning from {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => Tuning::default(),
    };

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    let summary = headless::run(seed, tuning, headless::MAX_FRAMES);
    println!(
        "Seed {}: {} frames, score {}{}",
        seed,
        summary.frames,
        summary.score,
        summary
            .crash
            .map(|c| format!(", ended by {:?}", c))
            .unwrap_or_default()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use skyflap::driver::ManualScheduler;
    use skyflap::sim::{Avatar, BackgroundEntity, CrashCause, GameSession, Obstacle, autopilot};
    use skyflap::{FrameDriver, FrameOutcome, Renderer, ScoreDisplay, Tuning};

    /// Ten minutes at 60 Hz
    pub const MAX_FRAMES: u64 = 36_000;

    pub struct Summary {
        pub frames: u64,
        pub score: u64,
        pub crash: Option<CrashCause>,
    }

    /// Renderer that only counts frames
    #[derive(Default)]
    struct NullRenderer {
        frames: u64,
    }

    impl Renderer for NullRenderer {
        fn draw_frame(&mut self, _: &Avatar, _: &[Obstacle], _: &[BackgroundEntity]) {
            self.frames += 1;
        }
    }

    /// Display that logs score changes
    #[derive(Default)]
    struct LogDisplay {
        last: Option<(u64, bool)>,
    }

    impl ScoreDisplay for LogDisplay {
        fn show_score(&mut self, score: u64, is_game_over: bool) {
            if self.last != Some((score, is_game_over)) {
                log::debug!("Score: {}{}", score, if is_game_over { " (game over)" } else { "" });
                self.last = Some((score, is_game_over));
            }
        }
    }

    pub fn load_tuning(path: &str) -> Result<Tuning, Box<dyn std::error::Error>> {
        let json = std::fs::read_to_string(path)?;
        Ok(Tuning::from_json(&json)?)
    }

    /// Play one run with the autopilot, pumping frames by hand
    pub fn run(seed: u64, tuning: Tuning, max_frames: u64) -> Summary {
        let mut driver = FrameDriver::new(
            GameSession::with_tuning(seed, tuning),
            ManualScheduler::default(),
            NullRenderer::default(),
            LogDisplay::default(),
        );
        driver.activate();

        let mut frames = 0;
        let mut crash = None;
        while frames < max_frames && driver.scheduler_mut().take_request() {
            if autopilot::wants_flap(driver.session()) {
                driver.activate();
            }
            let outcome = driver.on_frame(frames as f64 * 1000.0 / 60.0);
            frames += 1;
            if let FrameOutcome::Ended(cause) = outcome {
                crash = Some(cause);
            }
        }

        log::info!(
            "Headless run drew {} frames",
            driver.renderer_mut().frames
        );
        Summary {
            frames,
            score: driver.session().score,
            crash,
        }
    }
}
