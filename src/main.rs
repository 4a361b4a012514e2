//! Sarcastic Runner entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::KeyboardEvent;

    use sarcastic_runner::audio::{AudioManager, SoundEffect};
    use sarcastic_runner::consts::*;
    use sarcastic_runner::platform::{InputAction, apply_key_down, apply_key_up};
    use sarcastic_runner::renderer::CanvasRenderer;
    use sarcastic_runner::sim::{GameEvent, GameState, TickInput, tick};
    use sarcastic_runner::{HighScore, Settings};

    const QUIT_MESSAGE: &str = "Quit requested. Restarting to title.";

    /// Game instance holding all state
    struct Game {
        state: GameState,
        renderer: CanvasRenderer,
        audio: AudioManager,
        settings: Settings,
        accumulator: f32,
        last_time: f64,
        input: TickInput,
    }

    impl Game {
        fn new(seed: u64, renderer: CanvasRenderer) -> Self {
            let settings = Settings::load();
            let mut audio = AudioManager::new();
            audio.set_volume(settings.effective_sfx_volume());
            let high_score = HighScore::load();

            Self {
                state: GameState::new(seed, high_score.best),
                renderer,
                audio,
                settings,
                accumulator: 0.0,
                last_time: 0.0,
                input: TickInput::default(),
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            let dt = dt.min(MAX_FRAME_DT);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = self.input.clone();
                tick(&mut self.state, &input, SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.input.clear_one_shots();
            }

            self.handle_events();
        }

        /// React to what the simulation reported this frame
        fn handle_events(&mut self) {
            for event in self.state.drain_events() {
                if let Some(effect) = SoundEffect::for_event(&event) {
                    self.audio.play(effect);
                }

                match event {
                    GameEvent::NewHighScore(best) => HighScore::new(best).save(),
                    GameEvent::QuitAcknowledged => {
                        if let Some(window) = web_sys::window() {
                            let _ = window.alert_with_message(QUIT_MESSAGE);
                        }
                        // The alert swallows time; don't replay it as sim steps
                        self.accumulator = 0.0;
                    }
                    GameEvent::GameOver { score } => log::info!("Game over at {}", score),
                    GameEvent::Won { score } => log::info!("Secret win at {}", score),
                    GameEvent::Cinematic(phase) => log::debug!("Cinematic -> {:?}", phase),
                    GameEvent::Started => log::info!("Run started"),
                    GameEvent::Restarted => log::info!("Back to title"),
                    _ => {}
                }
            }
        }

        fn render(&self, time: f64) {
            self.renderer.render(&self.state, &self.settings, time);
        }

        fn key_down(&mut self, action: InputAction) {
            if action == InputAction::ToggleMute {
                self.settings.toggle_mute();
                self.audio.set_volume(self.settings.effective_sfx_volume());
                return;
            }
            apply_key_down(&mut self.input, self.state.phase, action);
        }

        fn key_up(&mut self, action: InputAction) {
            apply_key_up(&mut self.input, action);
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();

        log::info!("Sarcastic Runner starting...");

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        let renderer = CanvasRenderer::new(&document)?;

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, renderer)));

        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(&document, game.clone());
        request_animation_frame(game);

        Ok(())
    }

    fn setup_input_handlers(document: &web_sys::Document, game: Rc<RefCell<Game>>) {
        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.repeat() {
                    return;
                }
                let Some(action) = InputAction::from_code(&event.code()) else {
                    return;
                };
                if action.blocks_default() {
                    event.prevent_default();
                }
                game.borrow_mut().key_down(action);
            });
            let _ = document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(action) = InputAction::from_code(&event.code()) {
                    game.borrow_mut().key_up(action);
                }
            });
            let _ = document
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur: a held duck key never reports its release
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut g = game.borrow_mut();
                if g.state.player.ducking {
                    g.key_up(InputAction::Duck);
                }
            });
            if let Some(window) = web_sys::window() {
                let _ = window
                    .add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            }
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

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                0.0
            };
            g.last_time = time;

            g.update(dt);
            g.render(time);
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use sarcastic_runner::consts::SIM_DT;
    use sarcastic_runner::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

    /// Simulated seconds before the demo gives up on the bot dying
    const DEMO_SECONDS: f32 = 120.0;

    env_logger::init();
    log::info!("Sarcastic Runner (native) starting...");
    log::info!("Native mode has no display - running a headless autopilot demo");

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(42);
    let mut state = GameState::new(seed, 0);

    let mut input = TickInput {
        start: true,
        autopilot: true,
        ..Default::default()
    };

    let max_ticks = (DEMO_SECONDS / SIM_DT) as u32;
    for _ in 0..max_ticks {
        tick(&mut state, &input, SIM_DT);
        input.clear_one_shots();

        for event in state.drain_events() {
            match event {
                GameEvent::ObstacleSpawned { .. } => log::debug!("{:?}", event),
                GameEvent::Message(text) => log::info!("[{:.1}s] {}", state.time, text),
                other => log::info!("[{:.1}s] {:?}", state.time, other),
            }
        }

        if state.phase != GamePhase::Running {
            break;
        }
    }

    println!(
        "Seed {}: {:?} after {:.1}s with {} points (final level: {}, chaos: {})",
        seed,
        state.phase,
        state.time,
        state.points(),
        state.final_level,
        state.chaos
    );
}
