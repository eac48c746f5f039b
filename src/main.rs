//! Sky Hopper entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, HtmlElement, KeyboardEvent};

    use sky_hopper::assets::SpriteKey;
    use sky_hopper::consts::*;
    use sky_hopper::platform::{Key, KeyValueStore, Keyboard, LocalStore, MemoryStore};
    use sky_hopper::renderer::{RenderState, scene};
    use sky_hopper::sim::{ArcadePhysics, GameEvent, GameState, tick};
    use sky_hopper::ui::{Hud, Label};
    use sky_hopper::{BestScore, Tuning};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        physics: ArcadePhysics,
        store: Box<dyn KeyValueStore>,
        render_state: Option<RenderState>,
        hud: Hud,
        keyboard: Keyboard,
        idle_mode: bool,
        accumulator: f32,
        last_time: f64,
    }

    impl Game {
        fn new(seed: u64, store: Box<dyn KeyValueStore>) -> Self {
            let tuning = Tuning::load(&store);
            let best = BestScore::load(&store);
            let physics = ArcadePhysics::new(tuning.gravity);
            let state = GameState::new(seed, tuning, best);
            let mut hud = Hud::new();
            hud.sync(&state);
            Self {
                state,
                physics,
                store,
                render_state: None,
                hud,
                keyboard: Keyboard::new(),
                idle_mode: false,
                accumulator: 0.0,
                last_time: 0.0,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = self.keyboard.snapshot(self.idle_mode);
                tick(
                    &mut self.state,
                    &input,
                    SIM_DT,
                    &mut self.physics,
                    &mut self.store,
                );
                self.accumulator -= SIM_DT;
                substeps += 1;
            }

            for event in self.state.drain_events() {
                match event {
                    GameEvent::NewBest { best } => log::info!("New best score: {}", best),
                    GameEvent::GameOver { score, best } => {
                        log::info!("Run ended at {} (best {})", score, best)
                    }
                    GameEvent::Landed { .. } | GameEvent::PlatformRecycled { .. } => {}
                }
            }

            self.hud.sync(&self.state);
        }

        /// Render the current frame
        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                let vertices = scene(&self.state);
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Mirror HUD labels into the DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let ids = ["hud-score", "hud-best", "hud-banner"];
            for (id, label) in ids.iter().zip(self.hud.labels()) {
                if let Some(el) = document
                    .get_element_by_id(id)
                    .and_then(|el| el.dyn_into::<HtmlElement>().ok())
                {
                    apply_label(&el, label);
                }
            }
        }
    }

    fn apply_label(el: &HtmlElement, label: &Label) {
        if el.text_content().as_deref() != Some(label.text.as_str()) {
            el.set_text_content(Some(&label.text));
        }
        let style = el.style();
        let _ = style.set_property("position", "absolute");
        let _ = style.set_property("left", &format!("{}px", label.x));
        let _ = style.set_property("top", &format!("{}px", label.y));
        let _ = style.set_property("font-size", &format!("{}px", label.font_px));
        let _ = style.set_property("color", label.color);
        let shift = -label.origin * 100.0;
        let _ = style.set_property("transform", &format!("translate({}%, {}%)", shift, shift));
        let _ = style.set_property("display", if label.visible { "block" } else { "none" });
    }

    fn open_store() -> Box<dyn KeyValueStore> {
        match LocalStore::open() {
            Ok(store) => Box::new(store),
            Err(e) => {
                log::warn!("{}, best score will not persist", e);
                Box::new(MemoryStore::new())
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Sky Hopper starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Fixed logical resolution, scaled for the display
        let dpr = window.device_pixel_ratio();
        let width = (VIEW_WIDTH as f64 * dpr) as u32;
        let height = (VIEW_HEIGHT as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, open_store())));
        log::info!("Game initialized with seed: {}", seed);
        for sprite in SpriteKey::ALL {
            log::debug!("Sprite '{}' from {}", sprite.key(), sprite.path());
        }

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        match instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
        {
            Ok(adapter) => {
                log::info!("Using adapter: {:?}", adapter.get_info().name);
                match RenderState::new(surface, &adapter, width, height).await {
                    Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
                    Err(e) => log::error!("Failed to create device: {}", e),
                }
            }
            Err(e) => log::error!("No graphics adapter: {}", e),
        }

        setup_input_handlers(game.clone());

        request_animation_frame(game);

        log::info!("Sky Hopper running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                if let Some(key) = Key::from_dom_key(&event.key()) {
                    event.prevent_default();
                    g.keyboard.press(key);
                }
                match event.key().as_str() {
                    "i" | "I" => {
                        g.idle_mode = !g.idle_mode;
                        log::info!("Idle mode: {}", g.idle_mode);
                    }
                    "r" | "R" if g.state.is_over() => {
                        // A new session is a fresh page
                        if let Some(window) = web_sys::window() {
                            let _ = window.location().reload();
                        }
                    }
                    _ => {}
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
                if let Some(key) = Key::from_dom_key(&event.key()) {
                    game.borrow_mut().keyboard.release(key);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur never delivers keyup
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().keyboard.release_all();
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Sky Hopper (native) starting...");
    log::info!("Native mode runs a headless demo - run with `trunk serve` for the web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(1);
    let summary = headless::run_demo(seed, 60 * 120);
    match serde_json::to_string_pretty(&summary) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to encode summary: {}", e),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use serde::Serialize;

    use sky_hopper::consts::SIM_DT;
    use sky_hopper::platform::MemoryStore;
    use sky_hopper::sim::{ArcadePhysics, GameEvent, GameState, TickInput, tick};
    use sky_hopper::{BestScore, Tuning};

    /// Outcome of a demo run
    #[derive(Debug, Serialize)]
    pub struct RunSummary {
        pub seed: u64,
        pub ticks: u64,
        pub score: u64,
        pub best: u64,
        pub recycled: usize,
        pub game_over: bool,
    }

    /// Let the autopilot play for up to `max_ticks`
    pub fn run_demo(seed: u64, max_ticks: u64) -> RunSummary {
        let mut store = MemoryStore::new();
        let tuning = Tuning::load(&store);
        let mut physics = ArcadePhysics::new(tuning.gravity);
        let mut state = GameState::new(seed, tuning, BestScore::load(&store));
        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };

        let mut recycled = 0;
        while state.time_ticks < max_ticks && !state.is_over() {
            tick(&mut state, &input, SIM_DT, &mut physics, &mut store);
            recycled += state
                .drain_events()
                .iter()
                .filter(|e| matches!(e, GameEvent::PlatformRecycled { .. }))
                .count();
        }

        RunSummary {
            seed,
            ticks: state.time_ticks,
            score: state.score,
            best: state.best.value(),
            recycled,
            game_over: state.is_over(),
        }
    }
}
