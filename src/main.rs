//! Coin Dash entry point
//!
//! Wires the deterministic simulation to the browser: canvas, keyboard and
//! button input, audio cues, and the requestAnimationFrame tick loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::KeyboardEvent;

    use coin_dash::audio::{AudioManager, SoundEffect};
    use coin_dash::render::CanvasPresenter;
    use coin_dash::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        input: TickInput,
        events: Vec<GameEvent>,
        presenter: Option<CanvasPresenter>,
        audio: AudioManager,
    }

    impl Game {
        fn new(seed: u64, presenter: Option<CanvasPresenter>) -> Self {
            Self {
                state: GameState::new(seed),
                input: TickInput::default(),
                events: Vec::new(),
                presenter,
                audio: AudioManager::new(),
            }
        }

        /// Run one tick, perform its side effects, draw, and report the phase
        fn frame(&mut self) -> GamePhase {
            self.events.clear();
            let input = self.input;
            tick(&mut self.state, &input, &mut self.events);
            // Inputs are one-shot; clear after processing
            self.input = TickInput::default();

            for event in &self.events {
                match event {
                    GameEvent::Jump => self.audio.play(SoundEffect::Jump),
                    GameEvent::CoinCollected => self.audio.play(SoundEffect::Coin),
                    GameEvent::GameOver => {
                        self.audio.play(SoundEffect::GameOver);
                        set_end_screen_visible(true);
                    }
                }
            }

            if let Some(presenter) = &self.presenter {
                presenter.draw(&self.state);
            }

            self.state.phase
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let presenter = CanvasPresenter::new(&document);
        if presenter.is_none() {
            log::warn!("canvas unavailable - running headless");
        }

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, presenter)));
        log::info!("Coin Dash starting with seed {seed}");

        setup_input_handlers(game.clone());
        setup_restart_button(game.clone());

        schedule_tick(game);
    }

    /// Request the next animation frame. The loop stops by simply not
    /// re-arming; there is no in-flight work to cancel.
    fn schedule_tick(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        let phase = game.borrow_mut().frame();
        // Ticking stops on game over; the restart button re-arms the loop
        if phase == GamePhase::Running {
            schedule_tick(game);
        }
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Keyboard: space, W, and up arrow all raise the same jump signal
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                match event.code().as_str() {
                    "Space" | "KeyW" | "ArrowUp" => {
                        let mut g = game.borrow_mut();
                        g.input.jump = true;
                        g.audio.resume();
                    }
                    _ => {}
                }
            });
            let _ = document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // On-screen jump button
        if let Some(btn) = document.get_element_by_id("jump-button") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut g = game.borrow_mut();
                g.input.jump = true;
                g.audio.resume();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        let document = web_sys::window()
            .expect("no window")
            .document()
            .expect("no document");

        if let Some(btn) = document.get_element_by_id("restart-button") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                {
                    let mut g = game.borrow_mut();
                    // Only meaningful on the end screen; the tick loop is
                    // parked there, so it must be re-armed below. A pending
                    // restart means the loop is already re-armed.
                    if g.state.phase != GamePhase::GameOver || g.input.restart {
                        return;
                    }
                    g.input.restart = true;
                }
                set_end_screen_visible(false);
                schedule_tick(game.clone());
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Toggle the `#game-over` overlay
    pub fn set_end_screen_visible(visible: bool) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        if let Some(el) = document.get_element_by_id("game-over") {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless smoke run: play a scripted session and report the outcome.
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use coin_dash::sim::{GamePhase, GameState, TickInput, tick};

    env_logger::init();
    log::info!("Coin Dash (native) starting - headless run");

    let mut state = GameState::new(0xC0FFEE);
    let mut events = Vec::new();

    // Jump periodically until an obstacle connects
    while state.phase == GamePhase::Running && state.time_ticks < 100_000 {
        let input = TickInput {
            jump: state.time_ticks % 40 == 0,
            restart: false,
        };
        events.clear();
        tick(&mut state, &input, &mut events);
    }

    println!(
        "headless run finished: {} points over {} ticks",
        state.score, state.time_ticks
    );
}
