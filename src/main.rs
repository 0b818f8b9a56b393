//! Coin Catcher entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use coin_catcher::consts::*;
    use coin_catcher::renderer::{self, RenderState};
    use coin_catcher::sim::{GameEvent, GameState, TickInput, tick};
    use coin_catcher::tuning::Tuning;

    // Host-provided loss sink. The embedding page defines a global
    // `CatcherGameInterface` object; the binding is fallible so a page
    // without one only costs a warning.
    #[wasm_bindgen]
    extern "C" {
        #[wasm_bindgen(catch, js_namespace = CatcherGameInterface, js_name = onGameLoose)]
        fn on_game_loose(score: u32) -> Result<(), JsValue>;
    }

    /// Game instance holding all state
    struct Game {
        state: GameState,
        tuning: Tuning,
        render_state: Option<RenderState>,
        accumulator: f32,
        last_time: f64,
        input: TickInput,
        /// Canvas client width, for pointer-half normalization
        canvas_width: f32,
        /// The host loss sink fires exactly once per run
        loss_reported: bool,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            let tuning = Tuning::default();
            Self {
                state: GameState::new(seed, &tuning),
                tuning,
                render_state: None,
                accumulator: 0.0,
                last_time: 0.0,
                input: TickInput::default(),
                canvas_width: GAME_WIDTH,
                loss_reported: false,
            }
        }

        /// Run simulation ticks and report outcomes
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                tick(&mut self.state, &self.input, &self.tuning, SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;
            }

            for event in self.state.drain_events() {
                match event {
                    GameEvent::CoinCollected { score } => {
                        log::debug!("Coin collected, score {}", score);
                    }
                    GameEvent::GameLost { score } => {
                        log::info!("Game over with score {}", score);
                        if !self.loss_reported {
                            self.loss_reported = true;
                            if let Err(e) = on_game_loose(score) {
                                log::warn!("Loss sink unavailable: {:?}", e);
                            }
                        }
                    }
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                let vertices = renderer::scene(&self.state);
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        let (w, h) = render_state.size;
                        render_state.resize(w, h);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let window = web_sys::window().unwrap();
            let document = window.document().unwrap();

            if let Some(el) = document.get_element_by_id("score") {
                if self.state.game_over {
                    // The running score hides once the banner is up
                    let _ = el.set_attribute("class", "hidden");
                } else {
                    let _ = el.set_attribute("class", "");
                    el.set_text_content(Some(&format!("Score: {}", self.state.score)));
                }
            }

            if let Some(el) = document.get_element_by_id("game-over") {
                if self.state.game_over {
                    let _ = el.set_attribute("class", "");
                    el.set_text_content(Some(&format!(
                        "Game Over\nScore: {}",
                        self.state.score
                    )));
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Coin Catcher starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let client_w = canvas.client_width();
        let client_h = canvas.client_height();
        let width = (client_w as f64 * dpr) as u32;
        let height = (client_h as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        // Initialize game
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));
        game.borrow_mut().canvas_width = client_w as f32;

        log::info!("Game initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
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

        let render_state = RenderState::new(surface, &adapter, width, height).await;
        log::info!(
            "Viewport fitted: zoom {:.3}, offset {:?}",
            render_state.viewport.zoom,
            render_state.viewport.offset
        );
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(&canvas, game.clone());
        setup_resize_handler(&canvas, game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Coin Catcher running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Keyboard down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" => g.input.left = true,
                    "ArrowRight" => g.input.right = true,
                    "ArrowUp" => g.input.up = true,
                    "ArrowDown" => g.input.down = true,
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" => g.input.left = false,
                    "ArrowRight" => g.input.right = false,
                    "ArrowUp" => g.input.up = false,
                    "ArrowDown" => g.input.down = false,
                    _ => {}
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start/move: primary touch position decides the screen half
        for event_name in ["touchstart", "touchmove"] {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let mut g = game.borrow_mut();
                    let rect = canvas_clone.get_bounding_client_rect();
                    let x = touch.client_x() as f32 - rect.left() as f32;
                    g.canvas_width = rect.width() as f32;
                    g.input.pointer_down = true;
                    g.input.pointer_x = (x / g.canvas_width).clamp(0.0, 1.0);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch end
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if event.touches().length() == 0 {
                    game.borrow_mut().input.pointer_down = false;
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse acts as the primary pointer on desktop
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                g.canvas_width = canvas_clone.client_width() as f32;
                g.input.pointer_down = true;
                g.input.pointer_x =
                    (event.offset_x() as f32 / g.canvas_width).clamp(0.0, 1.0);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                if g.input.pointer_down {
                    g.input.pointer_x =
                        (event.offset_x() as f32 / canvas_clone.client_width() as f32)
                            .clamp(0.0, 1.0);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().input.pointer_down = false;
            });
            let _ = window
                .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize_handler(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let window = web_sys::window().unwrap();
            let dpr = window.device_pixel_ratio();
            let client_w = canvas.client_width();
            let client_h = canvas.client_height();
            let width = (client_w as f64 * dpr) as u32;
            let height = (client_h as f64 * dpr) as u32;
            canvas.set_width(width);
            canvas.set_height(height);

            let mut g = game.borrow_mut();
            g.canvas_width = client_w as f32;
            if let Some(ref mut render_state) = g.render_state {
                render_state.resize(width, height);
                log::debug!(
                    "Resized {}x{}, zoom {:.3}",
                    width,
                    height,
                    render_state.viewport.zoom
                );
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
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

            // Calculate delta time
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
    use coin_catcher::consts::SIM_DT;
    use coin_catcher::sim::{GameState, TickInput, tick};
    use coin_catcher::tuning::Tuning;

    env_logger::init();
    log::info!("Coin Catcher (native) starting...");
    log::info!("Native mode is a headless smoke run - use `trunk serve` for the web version");

    // Simulate two idle minutes and report what fell out of the sky
    let tuning = Tuning::default();
    let mut state = GameState::new(0xC01C47C4, &tuning);
    let input = TickInput::default();
    for _ in 0..(120 * 120) {
        tick(&mut state, &input, &tuning, SIM_DT);
        if state.game_over {
            break;
        }
    }
    log::info!(
        "Simulated {} ticks: {} live entities, bomb chance {:.2}, game_over={}",
        state.time_ticks,
        state.entities.len(),
        state.bomb_failure_chance,
        state.game_over
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
