//! Brick Breaker entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlButtonElement, HtmlCanvasElement, HtmlInputElement};

    use brick_breaker::audio::AudioManager;
    use brick_breaker::input::{InputState, KeyAction, name_is_valid};
    use brick_breaker::persistence::LocalStorage;
    use brick_breaker::renderer::{RenderState, VertexBatch, draw_frame};
    use brick_breaker::sim::{GamePhase, GameState, TickOutcome, tick};
    use brick_breaker::{HighScores, ScoreStore, Settings, Tuning, Viewport};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        input: InputState,
        audio: AudioManager,
        scores: HighScores<LocalStorage>,
        settings: Settings,
        batch: VertexBatch,
        render_state: Option<RenderState>,
        canvas: HtmlCanvasElement,
        document: Document,
    }

    impl Game {
        /// One display refresh: simulate, react, draw
        fn frame(&mut self) -> TickOutcome {
            let input = self.input.take_tick_input();
            let outcome = tick(&mut self.state, &input, &mut self.audio, &mut self.scores);
            if outcome.is_run_over() {
                self.update_high_scores();
            }

            draw_frame(&mut self.state, &mut self.batch);
            self.render();
            self.update_hud();
            outcome
        }

        /// Render the current frame
        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&self.batch) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        let (width, height) = render_state.size();
                        render_state.resize(width, height);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD text and menu visibility in the DOM
        fn update_hud(&self) {
            if let Some(el) = self.document.get_element_by_id("score") {
                el.set_text_content(Some(&self.state.score.to_string()));
            }
            if let Some(el) = self.document.get_element_by_id("lives") {
                el.set_text_content(Some(&self.state.lives.to_string()));
            }

            set_hidden(&self.document, "startMenu", self.state.phase != GamePhase::Start);
            set_hidden(&self.document, "pauseMenu", self.state.phase != GamePhase::Paused);
        }

        /// Rebuild the leaderboard list as `name: score` items
        fn update_high_scores(&self) {
            let Some(list) = self.document.get_element_by_id("highScoreList") else {
                return;
            };
            list.set_inner_html("");
            for entry in self.scores.load() {
                if let Ok(item) = self.document.create_element("li") {
                    item.set_text_content(Some(&entry.to_string()));
                    let _ = list.append_child(&item);
                }
            }
        }

        /// Match the canvas to the window and hard-reset the game
        fn fit_to_window(&mut self) {
            let viewport = window_viewport();
            let dpr = web_sys::window()
                .map(|w| w.device_pixel_ratio())
                .unwrap_or(1.0);
            let width = (viewport.width as f64 * dpr) as u32;
            let height = (viewport.height as f64 * dpr) as u32;
            self.canvas.set_width(width);
            self.canvas.set_height(height);
            if let Some(ref mut render_state) = self.render_state {
                render_state.resize(width, height);
            }
            self.state.resize(viewport);
        }
    }

    fn window_viewport() -> Viewport {
        let window = web_sys::window();
        let dim = |v: Option<JsValue>| v.and_then(|v| v.as_f64()).unwrap_or(0.0) as f32;
        let width = dim(window.as_ref().and_then(|w| w.inner_width().ok()));
        let height = dim(window.as_ref().and_then(|w| w.inner_height().ok()));
        Viewport::new(width, height)
    }

    fn set_hidden(document: &Document, id: &str, hidden: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let classes = el.class_list();
            let _ = if hidden {
                classes.add_1("hidden")
            } else {
                classes.remove_1("hidden")
            };
        }
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(log::Level::Info).is_err() {
            web_sys::console::warn_1(&"Logger already initialized".into());
        }

        log::info!("Brick Breaker starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let viewport = window_viewport();
        let seed = js_sys::Date::now() as u64;
        let settings = Settings::load(&LocalStorage);
        let mut state = GameState::new(Tuning::default(), viewport, seed);
        state.particles_enabled = settings.particles;
        let mut audio = AudioManager::new();
        audio.set_volume(settings.effective_volume());

        let game = Rc::new(RefCell::new(Game {
            state,
            input: InputState::new(),
            audio,
            scores: HighScores::open(LocalStorage),
            settings,
            batch: VertexBatch::new(),
            render_state: None,
            canvas: canvas.clone(),
            document: document.clone(),
        }));

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        match instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone())) {
            Ok(surface) => {
                let adapter = instance
                    .request_adapter(&wgpu::RequestAdapterOptions {
                        power_preference: wgpu::PowerPreference::HighPerformance,
                        compatible_surface: Some(&surface),
                        force_fallback_adapter: false,
                    })
                    .await;
                match adapter {
                    Ok(adapter) => {
                        log::info!("Using adapter: {:?}", adapter.get_info().name);
                        let (w, h) = (canvas.width(), canvas.height());
                        match RenderState::new(surface, &adapter, w, h).await {
                            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
                            Err(e) => log::error!("Failed to create device: {}", e),
                        }
                    }
                    Err(e) => log::error!("No suitable GPU adapter: {}", e),
                }
            }
            Err(e) => log::error!("Failed to create surface: {}", e),
        }

        game.borrow_mut().fit_to_window();
        game.borrow().update_high_scores();

        setup_input_handlers(game.clone())?;
        setup_menus(game.clone())?;
        setup_resize(game.clone())?;

        // Start game loop
        request_animation_frame(game);

        log::info!("Brick Breaker running!");
        Ok(())
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;

        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                match g.input.key_down(&event.key(), event.repeat()) {
                    KeyAction::Mute => {
                        let g = &mut *g;
                        g.settings.toggle_mute();
                        g.audio.set_volume(g.settings.effective_volume());
                        g.settings.save(&mut LocalStorage);
                    }
                    KeyAction::Left | KeyAction::Right => event.prevent_default(),
                    _ => {}
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Key up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                game.borrow_mut().input.key_up(&event.key());
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Window blur swallows key-up events
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().input.release_all();
            });
            window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_menus(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let document = game.borrow().document.clone();

        let name_input: HtmlInputElement = document
            .get_element_by_id("playerNameInput")
            .ok_or("no name input")?
            .dyn_into()?;
        let start_button: HtmlButtonElement = document
            .get_element_by_id("startButton")
            .ok_or("no start button")?
            .dyn_into()?;
        start_button.set_disabled(!name_is_valid(&name_input.value()));

        // Start stays disabled until a name is typed
        {
            let name_input_clone = name_input.clone();
            let start_button = start_button.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                start_button.set_disabled(!name_is_valid(&name_input_clone.value()));
            });
            name_input.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Start button
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let name = name_input.value();
                if !name_is_valid(&name) {
                    return;
                }
                let mut g = game.borrow_mut();
                // Browsers keep audio suspended until a user gesture
                g.audio.resume();
                g.state.start(name.trim());
            });
            start_button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Resume button
        if let Some(btn) = document.get_element_by_id("resumeButton") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().state.resume();
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_resize(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            game.borrow_mut().fit_to_window();
        });
        window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        let outcome = game.borrow_mut().frame();
        // alert() spins a nested event loop; handlers must be able to borrow the game
        if let Some(message) = outcome.notice() {
            if let Some(window) = web_sys::window() {
                let _ = window.alert_with_message(message);
            }
        }
        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().await
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Frames the headless run gives up after
#[cfg(not(target_arch = "wasm32"))]
const HEADLESS_MAX_FRAMES: u32 = 60 * 60 * 10;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use brick_breaker::Tuning;

    env_logger::init();
    log::info!("Brick Breaker (native) starting...");
    log::info!("Native mode runs a headless autopilot - use `trunk serve` for the web version");

    let tuning = match std::env::args().nth(1) {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(json) => Tuning::from_json(&json).unwrap_or_else(|e| {
                log::warn!("Bad tuning file {}: {}, using defaults", path, e);
                Tuning::default()
            }),
            Err(e) => {
                log::warn!("Cannot read {}: {}, using defaults", path, e);
                Tuning::default()
            }
        },
        None => Tuning::default(),
    };

    run_headless(tuning);
}

/// Play one run with the paddle chasing the ball and report how it went
#[cfg(not(target_arch = "wasm32"))]
fn run_headless(tuning: brick_breaker::Tuning) {
    use brick_breaker::audio::Silent;
    use brick_breaker::input::InputState;
    use brick_breaker::persistence::MemoryStorage;
    use brick_breaker::renderer::{VertexBatch, draw_frame};
    use brick_breaker::sim::{GameState, TickOutcome, tick};
    use brick_breaker::{HighScores, Viewport};

    let mut state = GameState::new(tuning, Viewport::new(800.0, 600.0), 1);
    let mut input = InputState::new();
    let mut scores = HighScores::open(MemoryStorage::new());
    let mut batch = VertexBatch::new();
    let bricks = state.bricks.bricks.len();

    state.start("autopilot");

    for frame in 0..HEADLESS_MAX_FRAMES {
        let dead_zone = state.paddle.speed / 2.0;
        input.steer_toward(state.paddle.center_x(), state.ball.pos.x, dead_zone);
        let outcome = tick(&mut state, &input.take_tick_input(), &mut Silent, &mut scores);
        draw_frame(&mut state, &mut batch);

        match outcome {
            TickOutcome::LifeLost { lives_left } => {
                log::info!("Frame {}: ball lost, {} lives left", frame, lives_left);
            }
            TickOutcome::GameOver { score } => {
                println!("Game over after {} frames with {} points", frame + 1, score);
                return;
            }
            TickOutcome::Won { score } => {
                println!("Cleared {} bricks in {} frames, {} points", bricks, frame + 1, score);
                return;
            }
            TickOutcome::Idle | TickOutcome::Continue => {}
        }
    }

    println!(
        "Stopped after {} frames: {} points, {} of {} bricks left, ball speed {:.2}",
        HEADLESS_MAX_FRAMES,
        state.score,
        state.bricks.alive_count(),
        bricks,
        state.ball.speed
    );
}
