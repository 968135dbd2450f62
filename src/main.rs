//! Backpacking Adventure entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent};

    use backpacking_adventure::audio::AudioManager;
    use backpacking_adventure::consts::*;
    use backpacking_adventure::renderer::build_scene;
    use backpacking_adventure::renderer::canvas::CanvasPainter;
    use backpacking_adventure::sim::{GameState, Key, KeyEvent, Sampler, TickInput, tick};
    use backpacking_adventure::{Settings, Tuning};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        settings: Settings,
        painter: CanvasPainter,
        audio: AudioManager,
        /// Particle color stream, owned by the renderer
        fx: Sampler,
        accumulator: f32,
        last_time: f64,
        input: TickInput,
    }

    impl Game {
        fn new(state: GameState, settings: Settings, ctx: CanvasRenderingContext2d) -> Self {
            Self {
                fx: state.fx_sampler(),
                audio: AudioManager::new(settings.clone()),
                painter: CanvasPainter::new(ctx),
                state,
                settings,
                accumulator: 0.0,
                last_time: 0.0,
                input: TickInput::default(),
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                if let Err(e) = tick(&mut self.state, &self.input) {
                    log::error!("Level generation failed: {}", e);
                }
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Key events apply exactly once
                self.input.clear();
            }

            for event in self.state.drain_events() {
                self.audio.handle_event(event);
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let cmds = build_scene(&self.state, &self.settings, &mut self.fx);
            if let Err(e) = self.painter.paint(&cmds) {
                log::warn!("Render error: {:?}", e);
            }
        }
    }

    fn map_key(key: &str) -> Option<Key> {
        match key {
            "ArrowLeft" => Some(Key::Left),
            "ArrowRight" => Some(Key::Right),
            " " => Some(Key::Action),
            _ => None,
        }
    }

    /// Optional tuning overrides embedded in the page as JSON
    fn load_tuning(document: &web_sys::Document) -> Tuning {
        let Some(json) = document
            .get_element_by_id("tuning")
            .and_then(|el| el.text_content())
        else {
            return Tuning::default();
        };
        match Tuning::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning overrides");
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning overrides: {}", e);
                Tuning::default()
            }
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no #canvas element")?
            .dyn_into()?;
        canvas.set_width(CANVAS_WIDTH as u32);
        canvas.set_height(CANVAS_HEIGHT as u32);
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("2d context unavailable")?
            .dyn_into()?;

        let seed = js_sys::Date::now() as u64;
        let tuning = load_tuning(&document);
        let state = GameState::with_tuning(seed, tuning)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        log::info!("Backpacking Adventure starting with seed {}", seed);

        let game = Rc::new(RefCell::new(Game::new(state, Settings::default(), ctx)));

        setup_input_handlers(game.clone())?;
        setup_focus_handlers(game.clone())?;
        request_animation_frame(game);
        Ok(())
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;

        for (kind, pressed) in [("keydown", true), ("keyup", false)] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let Some(key) = map_key(&event.key()) else {
                    return;
                };
                event.prevent_default();
                if pressed && event.repeat() {
                    return;
                }
                let mut g = game.borrow_mut();
                if pressed {
                    g.audio.resume();
                }
                g.input.push(KeyEvent { key, pressed });
            });
            window.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }

    /// Silence audio and drop held keys when the page loses focus
    fn setup_focus_handlers(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let hidden = document_clone.visibility_state() == web_sys::VisibilityState::Hidden;
                let mut g = game.borrow_mut();
                if g.settings.mute_on_blur {
                    g.audio.set_muted(hidden);
                }
            });
            document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            )?;
            closure.forget();
        }

        // Window blur (click outside)
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                g.input.push(KeyEvent {
                    key: Key::Left,
                    pressed: false,
                });
                g.input.push(KeyEvent {
                    key: Key::Right,
                    pressed: false,
                });
                if g.settings.mute_on_blur {
                    g.audio.set_muted(true);
                }
                log::info!("Window lost focus");
            });
            window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                game.borrow_mut().audio.set_muted(false);
            });
            window.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
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

            // Calculate delta time
            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);
            g.render();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

/// Scripted headless play-through
#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use backpacking_adventure::GenResult;
    use backpacking_adventure::sim::{GameEvent, GamePhase, GameState, Key, TickInput, tick};

    /// How far ahead of the feet a canyon triggers a jump
    const LOOKAHEAD: f32 = 15.0;

    /// Hold right, jump at canyon lips, continue after every camp
    pub fn autopilot(state: &GameState) -> TickInput {
        let mut input = TickInput::default();
        match state.phase {
            GamePhase::LevelComplete => return input.press(Key::Action),
            GamePhase::GameOver => return input,
            GamePhase::Playing => {}
        }
        let player = &state.player;
        if !player.is_right {
            input = input.press(Key::Right);
        }
        let canyon_ahead = state
            .level
            .canyons
            .spanning(player.world_x + LOOKAHEAD)
            .is_some();
        if canyon_ahead && !player.is_falling && !player.is_plummeting {
            input = input.press(Key::Action);
        }
        input
    }

    #[derive(Debug, Default)]
    pub struct Outcome {
        pub ticks: u64,
        pub levels_completed: u32,
        pub falls: u32,
        pub score: u32,
        pub game_over: bool,
    }

    pub fn run(seed: u64, max_ticks: u64) -> GenResult<Outcome> {
        let mut state = GameState::new(seed)?;
        let mut outcome = Outcome::default();

        while outcome.ticks < max_ticks {
            let input = autopilot(&state);
            tick(&mut state, &input)?;
            outcome.ticks += 1;

            for event in state.drain_events() {
                match event {
                    GameEvent::CampReached => outcome.levels_completed += 1,
                    GameEvent::FellIntoCanyon => outcome.falls += 1,
                    GameEvent::GameOver => outcome.game_over = true,
                    _ => {}
                }
                log::debug!("tick {}: {:?}", state.time_ticks, event);
            }
            if outcome.game_over {
                break;
            }
        }
        outcome.score = state.score;
        Ok(outcome)
    }

}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Backpacking Adventure (native) starting...");
    log::info!("Native mode runs a headless demo - serve the wasm build to play");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(12345);

    match demo::run(seed, 20_000) {
        Ok(outcome) => {
            println!(
                "seed {}: {} ticks, {} levels completed, {} falls, score {}{}",
                seed,
                outcome.ticks,
                outcome.levels_completed,
                outcome.falls,
                outcome.score,
                if outcome.game_over { ", game over" } else { "" }
            );
        }
        Err(e) => {
            log::error!("Demo run failed: {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
