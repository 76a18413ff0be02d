//! Ledge Runner entry point
//!
//! Handles platform-specific initialization and runs the game loop. The
//! native build has no window; it plays a scripted run headlessly.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

use ledge_runner::sim::GameEvent;

fn log_event(event: &GameEvent) {
    match event {
        GameEvent::LevelComplete { level } => log::info!("Level {} complete", level),
        GameEvent::GameOver { score, level } => {
            log::info!("Game over on level {} with {} points", level, score)
        }
        GameEvent::Reset => log::info!("New game"),
        other => log::debug!("{:?}", other),
    }
}

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, MouseEvent, Window};

    use ledge_runner::platform::{Action, Command, FpsCounter, HudStats, InputState, Notification};
    use ledge_runner::renderer::{Background, RenderState, SceneAssets, SpriteSheet, build_scene};
    use ledge_runner::sim::Simulation;
    use ledge_runner::{Settings, Tuning};

    /// Game instance holding all state
    struct Game {
        sim: Simulation,
        input: InputState,
        fps: FpsCounter,
        settings: Settings,
        background: Background,
        sprite: Option<SpriteSheet>,
        render_state: Option<RenderState>,
        document: Document,
        // Last notification pushed to the DOM
        notification: Option<Notification>,
    }

    impl Game {
        fn new(tuning: Tuning, settings: Settings, document: Document) -> Self {
            let sprite = SpriteSheet::runner();
            if sprite.is_none() {
                log::warn!("Sprite sheet unavailable, drawing placeholder");
            }
            Self {
                sim: Simulation::new(tuning),
                input: InputState::new(),
                fps: FpsCounter::default(),
                background: Background::new(&settings),
                settings,
                sprite,
                render_state: None,
                document,
                notification: None,
            }
        }

        /// Run simulation steps for this frame
        fn update(&mut self, time: f64) {
            let input = self.input.tick_input();
            for event in self.sim.frame(time, &input) {
                super::log_event(&event);
            }

            self.fps.record(time);
        }

        fn handle_command(&mut self, command: Command) {
            match command {
                Command::Acknowledge => {
                    if self.sim.acknowledge() {
                        log::info!("Resuming (level {})", self.sim.state().level);
                    }
                }
                Command::Reset => {
                    self.sim.reset();
                    self.input.clear();
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let Some(render_state) = self.render_state.as_mut() else {
                return;
            };

            let assets = SceneAssets {
                background: &self.background,
                sprite: self.sprite.as_ref(),
                settings: &self.settings,
            };
            let vertices = build_scene(&self.sim.snapshot(), &assets);

            match render_state.render(&vertices) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost) => {
                    render_state.resize(render_state.size.0, render_state.size.1);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&mut self) {
            let stats = HudStats::from_state(self.sim.state());
            set_text(&self.document, "score", &stats.score.to_string());
            set_text(&self.document, "lives", &stats.lives.to_string());
            set_text(&self.document, "level", &stats.level.to_string());
            if self.settings.show_fps {
                set_text(&self.document, "fps", &self.fps.fps().to_string());
            }

            let notification = Notification::for_phase(self.sim.phase());
            if notification == self.notification {
                return;
            }
            if let Some(el) = self.document.get_element_by_id("notification") {
                match notification {
                    Some(n) => {
                        el.set_text_content(Some(&n.message()));
                        let _ = el.set_attribute("class", "");
                    }
                    None => {
                        let _ = el.set_attribute("class", "hidden");
                    }
                }
            }
            self.notification = notification;
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    async fn init_renderer(
        canvas: HtmlCanvasElement,
        width: u32,
        height: u32,
    ) -> Result<RenderState, String> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas))
            .map_err(|e| e.to_string())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| e.to_string())?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        RenderState::new(surface, &adapter, width, height)
            .await
            .map_err(|e| e.to_string())
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Ledge Runner starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()
            .map_err(|_| "not a canvas")?;

        // Configuration embedded in the page
        let tuning = Tuning::load_or_default(canvas.get_attribute("data-tuning").as_deref());
        let settings = Settings::load_or_default(canvas.get_attribute("data-settings").as_deref());

        if let Some(el) = document.get_element_by_id("fps") {
            let class = if settings.show_fps { "" } else { "hidden" };
            let _ = el.set_attribute("class", class);
        }

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let game = Rc::new(RefCell::new(Game::new(tuning, settings, document.clone())));

        match init_renderer(canvas, width, height).await {
            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
            // Keep simulating; the HUD still works without a canvas
            Err(e) => log::error!("Rendering unavailable: {}", e),
        }

        setup_input_handlers(&window, &document, game.clone());
        setup_focus_handlers(&window, &document, game.clone());

        request_animation_frame(game);

        log::info!("Ledge Runner running!");
        Ok(())
    }

    fn setup_input_handlers(window: &Window, document: &Document, game: Rc<RefCell<Game>>) {
        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let code = event.code();
                if Action::from_key_code(&code).is_some() || Command::from_key_code(&code).is_some()
                {
                    // No page scrolling on arrows/space
                    event.prevent_default();
                }

                let mut g = game.borrow_mut();
                if let Some(command) = g.input.key_down(&code) {
                    if !event.repeat() {
                        g.handle_command(command);
                    }
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().input.key_up(&event.code());
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Clicking the notification dismisses it
        if let Some(el) = document.get_element_by_id("notification") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().handle_command(Command::Acknowledge);
            });
            let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_focus_handlers(window: &Window, document: &Document, game: Rc<RefCell<Game>>) {
        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    game.borrow_mut().input.clear();
                    log::debug!("Input cleared (tab hidden)");
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur: key-ups won't arrive while unfocused
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().input.clear();
                log::debug!("Input cleared (window blur)");
            });
            let _ = window
                .add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            g.update(time);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Startup failed: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use clap::Parser;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg32;

    use ledge_runner::consts::SIM_DT_MS;
    use ledge_runner::platform::{HudStats, InputState, Notification};
    use ledge_runner::renderer::{Background, SceneAssets, SpriteSheet, build_scene};
    use ledge_runner::settings::QualityPreset;
    use ledge_runner::sim::Simulation;
    use ledge_runner::{Settings, Tuning};

    /// Command line options for the headless run
    #[derive(Debug, Clone, PartialEq, Parser)]
    #[command(name = "ledge-runner", about = "Headless scripted run of Ledge Runner")]
    pub struct DemoOptions {
        /// Tuning JSON file
        #[arg(long = "tuning")]
        pub tuning_path: Option<String>,
        /// Settings JSON file
        #[arg(long = "settings")]
        pub settings_path: Option<String>,
        /// Quality preset applied over the settings (low, medium, high)
        #[arg(long)]
        pub quality: Option<QualityPreset>,
        /// Simulated seconds to run
        #[arg(long, default_value_t = 60)]
        pub seconds: u32,
        /// Seed for the scripted key presses
        #[arg(long, default_value_t = 1)]
        pub seed: u64,
    }

    fn read_file(path: Option<&str>) -> Option<String> {
        let path = path?;
        match std::fs::read_to_string(path) {
            Ok(text) => Some(text),
            Err(e) => {
                log::warn!("Could not read {}: {}", path, e);
                None
            }
        }
    }

    /// Mostly run right, with random jumps, shots and the odd retreat
    fn script_keys(rng: &mut Pcg32, input: &mut InputState) {
        if rng.random_bool(0.02) {
            input.key_up("ArrowRight");
            input.key_down("ArrowLeft");
        } else if rng.random_bool(0.05) {
            input.key_up("ArrowLeft");
            input.key_down("ArrowRight");
        }

        if rng.random_bool(0.04) {
            input.key_down("Space");
        } else {
            input.key_up("Space");
        }

        if rng.random_bool(0.08) {
            input.key_down("KeyZ");
            input.key_up("KeyZ");
        }
    }

    pub fn run(options: &DemoOptions) {
        let tuning = Tuning::load_or_default(read_file(options.tuning_path.as_deref()).as_deref());
        let mut settings =
            Settings::load_or_default(read_file(options.settings_path.as_deref()).as_deref());
        if let Some(quality) = options.quality {
            settings.apply_preset(quality);
        }

        let background = Background::new(&settings);
        let sprite = SpriteSheet::runner();
        let assets = SceneAssets {
            background: &background,
            sprite: sprite.as_ref(),
            settings: &settings,
        };

        let mut sim = Simulation::new(tuning);
        let mut input = InputState::new();
        let mut rng = Pcg32::seed_from_u64(options.seed);
        input.key_down("ArrowRight");

        let frames = options.seconds as u64 * 60;
        let mut vertex_total = 0usize;
        for frame in 0..frames {
            script_keys(&mut rng, &mut input);
            let tick_input = input.tick_input();

            for event in sim.frame(frame as f64 * SIM_DT_MS, &tick_input) {
                super::log_event(&event);
            }

            if let Some(notification) = Notification::for_phase(sim.phase()) {
                log::info!("{}", notification.message());
                sim.acknowledge();
            }

            vertex_total += build_scene(&sim.snapshot(), &assets).len();
        }

        let stats = HudStats::from_state(sim.state());
        println!(
            "Score: {}  Lives: {}  Level: {}",
            stats.score, stats.lives, stats.level
        );
        println!(
            "Average vertices per frame: {}",
            vertex_total / frames.max(1) as usize
        );
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use clap::Parser;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Ledge Runner (native) starting headless demo...");

    let options = demo::DemoOptions::parse();
    demo::run(&options);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
