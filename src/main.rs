//! Dazed Bird entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Element, HtmlInputElement};

    use dazed_bird::audio::{AudioManager, SoundEffect};
    use dazed_bird::consts::*;
    use dazed_bird::sim::{GameEvent, GamePhase, GameState, TickInput, Tuning, tick};
    use dazed_bird::{Settings, VolumeChannel, bestscore};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        input: TickInput,
        audio: AudioManager,
        settings: Settings,
        // Track phase for panel updates and music start/stop
        last_phase: GamePhase,
    }

    impl Game {
        fn new(seed: u64, tuning: Tuning, width: f32, height: f32) -> Self {
            let settings = Settings::load();
            let mut audio = AudioManager::new();
            audio.set_sfx_volume(settings.sfx_volume);
            audio.set_music_volume(settings.music_volume);

            let best = bestscore::load();
            Self {
                state: GameState::new(
                    seed,
                    tuning,
                    dazed_bird::sim::Viewport::new(width, height),
                    best,
                ),
                input: TickInput::default(),
                audio,
                settings,
                last_phase: GamePhase::Idle,
            }
        }

        /// Run one simulation frame and react to its signals
        fn update(&mut self) {
            let input = self.input;
            tick(&mut self.state, &input);
            // All inputs are one-shot
            self.input = TickInput::default();

            for event in self.state.drain_events() {
                match event {
                    GameEvent::Jumped => self.audio.play(SoundEffect::Flap),
                    GameEvent::Scored => self.audio.play(SoundEffect::Score),
                    GameEvent::GameOver => self.audio.play(SoundEffect::GameOver),
                    GameEvent::NewBestScore(best) => {
                        bestscore::save(best);
                        self.audio.play(SoundEffect::NewBest);
                    }
                }
            }

            let phase = self.state.phase;
            if phase != self.last_phase {
                match phase {
                    GamePhase::Entering | GamePhase::Playing => self.audio.start_music(),
                    GamePhase::Over | GamePhase::Idle => self.audio.stop_music(),
                    GamePhase::Paused => {}
                }
                self.last_phase = phase;
            }
        }

        /// Push the current state into the DOM
        fn render(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            // Bird position
            if let Some(bird) = document.get_element_by_id("bird") {
                let display = if self.state.bird.visible {
                    "block"
                } else {
                    "none"
                };
                let _ = bird.set_attribute(
                    "style",
                    &format!(
                        "display:{};left:{}px;top:{}px;width:{}px;height:{}px;",
                        display, BIRD_X, self.state.bird.y, BIRD_SIZE, BIRD_SIZE
                    ),
                );
            }

            // Pipes: rebuild the container each frame, two segments per pipe
            if let Some(pipes) = document.get_element_by_id("pipes") {
                let mut html = String::new();
                let viewport_h = self.state.viewport.height;
                for pipe in &self.state.pipes {
                    html.push_str(&format!(
                        "<div class=\"pipe pipe-top\" \
                         style=\"left:{}px;top:0;width:{}px;height:{}px;\"></div>",
                        pipe.x, PIPE_WIDTH, pipe.gap_y
                    ));
                    let lower_top = pipe.gap_bottom();
                    html.push_str(&format!(
                        "<div class=\"pipe pipe-bottom\" \
                         style=\"left:{}px;top:{}px;width:{}px;height:{}px;\"></div>",
                        pipe.x,
                        lower_top,
                        PIPE_WIDTH,
                        (viewport_h - lower_top).max(0.0)
                    ));
                }
                pipes.set_inner_html(&html);
            }

            // Score HUD
            if let Some(el) = document.get_element_by_id("score") {
                el.set_text_content(Some(&self.state.score.to_string()));
            }
            if let Some(el) = document.get_element_by_id("best-score") {
                el.set_text_content(Some(&self.state.best_score.to_string()));
            }

            // Panels per phase
            set_visible(&document, "menu-panel", self.state.phase == GamePhase::Idle);
            set_visible(
                &document,
                "pause-panel",
                self.state.phase == GamePhase::Paused,
            );
            let over = self.state.phase == GamePhase::Over;
            set_visible(&document, "game-over-panel", over);
            if over {
                if let Some(el) = document.get_element_by_id("final-score") {
                    el.set_text_content(Some(&self.state.score.to_string()));
                }
                if let Some(el) = document.get_element_by_id("final-best") {
                    el.set_text_content(Some(&self.state.best_score.to_string()));
                }
            }
        }
    }

    fn set_visible(document: &web_sys::Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let class = if visible { "panel" } else { "panel hidden" };
            let _ = el.set_attribute("class", class);
        }
    }

    /// Touch devices get the gentler physics profile
    fn detect_mobile(window: &web_sys::Window) -> bool {
        let ua = window.navigator().user_agent().unwrap_or_default();
        ["iPhone", "iPad", "iPod", "Android"]
            .iter()
            .any(|needle| ua.contains(needle))
    }

    fn playfield(document: &web_sys::Document) -> Option<Element> {
        document.get_element_by_id("game")
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Dazed Bird starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let field = playfield(&document).expect("no #game element");
        let width = field.client_width() as f32;
        let height = field.client_height() as f32;

        let mobile = detect_mobile(&window);
        let tuning = Tuning::for_device(mobile);
        log::info!(
            "Device class: {}",
            if mobile { "mobile" } else { "desktop" }
        );

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, tuning, width, height)));
        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(game.clone());
        setup_buttons(game.clone());
        setup_volume_sliders(game.clone());
        setup_auto_pause(game.clone());
        setup_resize(game.clone());

        // Reflect persisted volumes in the sliders
        {
            let g = game.borrow();
            set_slider(&document, "sound-volume", g.settings.sfx_volume);
            set_slider(&document, "music-volume", g.settings.music_volume);
        }

        // Start game loop
        request_animation_frame(game);

        log::info!("Dazed Bird running!");
    }

    fn set_slider(document: &web_sys::Document, id: &str, volume: f32) {
        if let Some(el) = document.get_element_by_id(id) {
            if let Ok(input) = el.dyn_into::<HtmlInputElement>() {
                input.set_value(&format!("{}", (volume * 100.0).round()));
            }
        }
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    " " | "ArrowUp" => {
                        event.prevent_default();
                        press(&mut g);
                    }
                    "Escape" | "p" | "P" => {
                        // Pause toggle in-game, back to the menu when over
                        g.input.pause = true;
                        g.input.menu = true;
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer press anywhere on the playfield
        if let Some(field) = playfield(&document) {
            {
                let game = game.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                    press(&mut game.borrow_mut());
                });
                let _ = field
                    .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
                closure.forget();
            }

            {
                let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::TouchEvent| {
                    event.prevent_default();
                    press(&mut game.borrow_mut());
                });
                let _ = field
                    .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    /// Primary press: start from the menu, flap in-game. Over and Paused
    /// keep their dedicated buttons so a stray tap cannot restart a run.
    fn press(g: &mut Game) {
        match g.state.phase {
            GamePhase::Idle => g.input.start = true,
            GamePhase::Entering | GamePhase::Playing => g.input.jump = true,
            GamePhase::Paused | GamePhase::Over => {}
        }
        g.audio.resume();
    }

    /// Wire a button to a one-shot input flag
    fn on_click(
        document: &web_sys::Document,
        id: &str,
        game: Rc<RefCell<Game>>,
        set: fn(&mut TickInput),
    ) {
        if let Some(btn) = document.get_element_by_id(id) {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut g = game.borrow_mut();
                set(&mut g.input);
                g.audio.resume();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        let document = web_sys::window().unwrap().document().unwrap();

        on_click(&document, "start-btn", game.clone(), |i| i.start = true);
        on_click(&document, "restart-btn", game.clone(), |i| i.start = true);
        on_click(&document, "menu-btn", game.clone(), |i| i.menu = true);
        on_click(&document, "pause-btn", game.clone(), |i| i.pause = true);
        on_click(&document, "resume-btn", game, |i| i.pause = true);
    }

    /// Wire a range slider to an audio channel
    fn on_volume_input(
        document: &web_sys::Document,
        id: &str,
        game: Rc<RefCell<Game>>,
        channel: VolumeChannel,
    ) {
        if let Some(el) = document.get_element_by_id(id) {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
                let Some(target) = event.target() else { return };
                let Ok(input) = target.dyn_into::<HtmlInputElement>() else {
                    return;
                };
                let Ok(raw) = input.value().parse::<f32>() else {
                    return;
                };
                let volume = raw / 100.0;

                let mut g = game.borrow_mut();
                g.settings.set_volume(channel, volume);
                match channel {
                    VolumeChannel::Sfx => g.audio.set_sfx_volume(volume),
                    VolumeChannel::Music => g.audio.set_music_volume(volume),
                }
                g.settings.save();
            });
            let _ = el.add_event_listener_with_callback("input", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_volume_sliders(game: Rc<RefCell<Game>>) {
        let document = web_sys::window().unwrap().document().unwrap();
        on_volume_input(&document, "sound-volume", game.clone(), VolumeChannel::Sfx);
        on_volume_input(&document, "music-volume", game, VolumeChannel::Music);
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut g = game.borrow_mut();
                    if g.state.phase == GamePhase::Playing {
                        g.input.pause = true;
                        log::info!("Auto-paused (tab hidden)");
                    }
                    if g.settings.mute_on_blur {
                        g.audio.set_muted(true);
                    }
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window regains focus: unmute
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().audio.set_muted(false);
            });
            let _ =
                window.add_event_listener_with_callback("focus", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let document = web_sys::window().unwrap().document().unwrap();
            if let Some(field) = playfield(&document) {
                let width = field.client_width() as f32;
                let height = field.client_height() as f32;
                game.borrow_mut().state.set_viewport(width, height);
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

    fn game_loop(game: Rc<RefCell<Game>>, _time: f64) {
        {
            let mut g = game.borrow_mut();
            g.update();
            g.render();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Dazed Bird (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    // Run a short scripted round as a sanity check
    println!("\nRunning simulation smoke test...");
    smoke_test();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn smoke_test() {
    use dazed_bird::sim::{GamePhase, GameState, TickInput, Tuning, Viewport, tick};

    let mut state = GameState::new(42, Tuning::desktop(), Viewport::new(800.0, 600.0), 0);
    tick(
        &mut state,
        &TickInput {
            start: true,
            ..Default::default()
        },
    );
    assert_eq!(state.phase, GamePhase::Entering);

    // Flap periodically until the run ends
    let mut frames = 0u32;
    while state.phase != GamePhase::Over && frames < 10_000 {
        let jump = frames % 25 == 0;
        tick(
            &mut state,
            &TickInput {
                jump,
                ..Default::default()
            },
        );
        frames += 1;
    }

    assert_eq!(state.phase, GamePhase::Over, "run should eventually end");
    println!(
        "✓ Simulation ran {} frames, final score {}",
        frames, state.score
    );
}
