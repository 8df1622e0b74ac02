//! Hue Drop entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, KeyboardEvent};

    use hue_drop::consts::SIM_DT;
    use hue_drop::game::Direction;
    use hue_drop::persistence::LocalStorageStore;
    use hue_drop::sim::{GameEvent, GamePhase, RestartKind};
    use hue_drop::{Game, Settings};

    /// Browser-side state around the game
    struct App {
        game: Game,
        last_time: f64,
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Hue Drop starting...");

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            log::error!("No document available");
            return;
        };

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let game = Game::new(settings, seed, Box::new(LocalStorageStore::default()));
        log::info!("Game initialized with seed: {}", game.state.seed);

        let app = Rc::new(RefCell::new(App {
            game,
            last_time: 0.0,
        }));

        setup_input_handlers(&document, app.clone());
        request_animation_frame(app);

        log::info!("Hue Drop running!");
    }

    fn handle_key_down(game: &mut Game, key: &str) -> bool {
        match key {
            "ArrowLeft" | "a" | "A" => game.press(Direction::Left),
            "ArrowRight" | "d" | "D" => game.press(Direction::Right),
            " " => game.request_color_change(),
            "p" | "P" => game.toggle_pause(),
            "r" | "R" => game.restart(RestartKind::Quick),
            "Escape" => game.restart(RestartKind::Full),
            "Enter" => {
                let difficulty = game.settings.default_difficulty;
                game.select_difficulty(difficulty.as_str());
            }
            "1" => {
                game.select_difficulty("easy");
            }
            "2" => {
                game.select_difficulty("medium");
            }
            "3" => {
                game.select_difficulty("hard");
            }
            _ => return false,
        }
        true
    }

    fn setup_input_handlers(document: &Document, app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };

        // Key down
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.repeat() {
                    return;
                }
                let mut app = app.borrow_mut();
                if handle_key_down(&mut app.game, &event.key()) {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut app = app.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" | "a" | "A" => app.game.release(Direction::Left),
                    "ArrowRight" | "d" | "D" => app.game.release(Direction::Right),
                    _ => {}
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Losing focus drops held keys
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                app.borrow_mut().game.release_all();
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Hidden tab pauses a running game
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                    return;
                };
                if document.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut app = app.borrow_mut();
                    app.game.release_all();
                    app.game.pause();
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut app = app.borrow_mut();

            // Calculate delta time
            let dt = if app.last_time > 0.0 {
                ((time - app.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            app.last_time = time;

            app.game.frame(dt);
            for event in app.game.drain_events() {
                log_event(&event);
            }
            if app.game.take_settings_changed() {
                app.game.settings.save();
            }
            update_hud(&app.game);
        }

        request_animation_frame(app);
    }

    fn log_event(event: &GameEvent) {
        match event {
            GameEvent::GameOver { final_score } => log::info!("Game over, score {}", final_score),
            GameEvent::Started(difficulty) => log::info!("Started on {}", difficulty.label()),
            other => log::debug!("{:?}", other),
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_visible(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    fn update_hud(game: &Game) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let hud = game.hud();

        set_text(&document, "score", &hud.score.to_string());
        set_text(&document, "high-score", &hud.high_score.to_string());
        set_text(&document, "lives", &format!("{} / {}", hud.lives, hud.max_lives));
        set_text(&document, "difficulty", hud.difficulty);
        set_text(
            &document,
            "target-color",
            &format!("#{:06x}", game.state.target_color.hex()),
        );

        set_visible(&document, "welcome", hud.phase == GamePhase::WelcomeScreen);
        set_visible(&document, "paused", hud.phase == GamePhase::Paused);
        set_visible(&document, "slow-motion", hud.slow_motion);
        set_visible(&document, "game-over", hud.phase == GamePhase::GameOver);
        if let Some(score) = hud.final_score {
            set_text(&document, "final-score", &score.to_string());
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

/// Headless scripted run for native builds
///
/// Usage: `hue-drop [easy|medium|hard] [seconds]`. Settings are read from
/// `HUE_DROP_SETTINGS` (default `hue_drop_settings.json`), the high score
/// lives in `hue_drop_high_score.json`.
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::path::PathBuf;

    use hue_drop::consts::SIM_DT;
    use hue_drop::game::Direction;
    use hue_drop::persistence::FileStore;
    use hue_drop::sim::{GameEvent, GamePhase};
    use hue_drop::{Game, Settings};

    env_logger::init();
    log::info!("Hue Drop (native) starting...");

    let mut args = std::env::args().skip(1);
    let settings_path = std::env::var_os("HUE_DROP_SETTINGS")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("hue_drop_settings.json"));
    let settings = Settings::load_from(&settings_path);

    let difficulty = args
        .next()
        .unwrap_or_else(|| settings.default_difficulty.as_str().to_string());
    let seconds: u32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(60);

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    let store = FileStore::new("hue_drop_high_score.json");
    let mut game = Game::new(settings, seed, Box::new(store));
    log::info!("Seed {}, high score {}", game.state.seed, game.high_score());

    if !game.select_difficulty(&difficulty) {
        let fallback = game.settings.default_difficulty;
        game.start(fallback);
    }
    if game.take_settings_changed() {
        game.settings.save_to(&settings_path);
    }

    // Sweep left and right, swapping color every few seconds
    let frames = seconds * 60;
    for frame in 0..frames {
        match frame % 240 {
            0 => {
                game.release(Direction::Left);
                game.press(Direction::Right);
            }
            120 => {
                game.release(Direction::Right);
                game.press(Direction::Left);
            }
            _ => {}
        }
        if frame % 180 == 90 {
            game.request_color_change();
        }

        game.frame(SIM_DT);

        for event in game.drain_events() {
            match event {
                GameEvent::GameOver { final_score } => {
                    log::info!("Game over after {} ticks, score {}", game.state.tick, final_score)
                }
                other => log::debug!("tick {}: {:?}", game.state.tick, other),
            }
        }
        if game.state.phase == GamePhase::GameOver {
            break;
        }
    }

    match serde_json::to_string_pretty(&game.hud()) {
        Ok(json) => println!("{}", json),
        Err(err) => log::warn!("Failed to serialize HUD: {}", err),
    }
}
