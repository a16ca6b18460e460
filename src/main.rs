//! Soul Dodge entry point
//!
//! In the browser this wires the canvas, DOM menus, keyboard and WebAudio to
//! the game and runs it off `requestAnimationFrame`. Natively it plays a
//! scripted headless session and logs how long the player survived.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent};

    use soul_dodge::audio::WebAudio;
    use soul_dodge::consts::{INTERNAL_HEIGHT, INTERNAL_WIDTH};
    use soul_dodge::platform::DomUi;
    use soul_dodge::renderer::CanvasSurface;
    use soul_dodge::{Game, GameConfig, Services, clamp};

    /// Largest integer upscale of the canvas
    const MAX_SCALE: f32 = 12.0;

    /// Everything the frame callback needs
    struct App {
        game: Game,
        surface: CanvasSurface,
        last_time: f64,
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Soul Dodge starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let mut surface = CanvasSurface::new(&canvas).expect("Failed to get 2d context");
        surface.load_images();

        let config = GameConfig::default();
        let services = Services::new(
            Box::new(WebAudio::new(config.settings.clone())),
            Box::new(DomUi::new(&document)),
        );
        let seed = js_sys::Date::now() as u64;
        let app = Rc::new(RefCell::new(App {
            game: Game::new(config, services, seed),
            surface,
            last_time: 0.0,
        }));

        setup_resize(canvas);
        setup_input_handlers(app.clone());
        request_animation_frame(app);

        log::info!("Soul Dodge running!");
    }

    /// Keep the canvas at the largest whole-number scale that fits the window
    fn setup_resize(canvas: HtmlCanvasElement) {
        let window = web_sys::window().expect("no window");

        let resize = move || {
            let Some(window) = web_sys::window() else {
                return;
            };
            let inner = |v: Result<JsValue, JsValue>| {
                v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32
            };
            let scale_x = (inner(window.inner_width()) / INTERNAL_WIDTH).floor();
            let scale_y = (inner(window.inner_height()) / INTERNAL_HEIGHT).floor();
            let scale = clamp(scale_x.min(scale_y), 1.0, MAX_SCALE);

            let style = canvas.style();
            let _ = style.set_property("width", &format!("{}px", INTERNAL_WIDTH * scale));
            let _ = style.set_property("height", &format!("{}px", INTERNAL_HEIGHT * scale));
        };
        resize();

        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| resize());
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_input_handlers(app: Rc<RefCell<App>>) {
        let window = web_sys::window().expect("no window");

        // Key down: bound keys never reach the page (no scrolling on arrows)
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if app.borrow_mut().game.key_down(&event.key()) {
                    event.prevent_default();
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if app.borrow_mut().game.key_up(&event.key()) {
                    event.prevent_default();
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Any pointer press counts as the gesture that unlocks audio
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::PointerEvent| {
                app.borrow_mut().game.gesture();
            });
            let _ = window
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur: keyup events are lost, so release everything
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                app.borrow_mut().game.release_all();
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
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
            let mut guard = app.borrow_mut();
            let App {
                game,
                surface,
                last_time,
            } = &mut *guard;

            let dt = if *last_time > 0.0 {
                ((time - *last_time) / 1000.0) as f32
            } else {
                0.0
            };
            *last_time = time;

            surface.begin_frame();
            game.frame(dt, surface);
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Soul Dodge (native) starting...");
    log::info!("Native mode is headless - serve the web build for the playable version");

    let config = match std::env::args().nth(1) {
        Some(path) => soul_dodge::GameConfig::load_or_default(path),
        None => soul_dodge::GameConfig::default(),
    };

    headless::run(config);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Scripted session: start a battle, skip the dialogue, then weave up and
/// down until the player falls or the time limit runs out.
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use soul_dodge::renderer::RecordingSurface;
    use soul_dodge::scene::SceneId;
    use soul_dodge::{Game, GameConfig};

    const FRAME_DT: f32 = 1.0 / 60.0;
    /// Give up after this much simulated time
    const TIME_LIMIT: f32 = 180.0;
    /// Seconds between direction changes while dodging
    const WEAVE_PERIOD: f32 = 0.75;

    pub fn run(config: GameConfig) {
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        let mut game = Game::headless(config, seed);
        let mut surface = RecordingSurface::new();

        let mut t = 0.0;
        let mut battle_time = 0.0;
        let mut frame = 0u64;
        let mut moving_up = true;
        game.key_down("ArrowUp");

        while t < TIME_LIMIT && game.active_scene() != Some(SceneId::Death) {
            // Tap confirm every few frames: starts the battle and pages through dialogue
            if frame % 4 == 0 {
                game.key_down("Enter");
            } else if frame % 4 == 2 {
                game.key_up("Enter");
            }

            if game.active_scene() == Some(SceneId::Battle) {
                battle_time += FRAME_DT;
                if battle_time % WEAVE_PERIOD < FRAME_DT {
                    let (release, press) = if moving_up {
                        ("ArrowUp", "ArrowDown")
                    } else {
                        ("ArrowDown", "ArrowUp")
                    };
                    game.key_up(release);
                    game.key_down(press);
                    moving_up = !moving_up;
                }
            }

            surface.clear();
            game.frame(FRAME_DT, &mut surface);
            t += FRAME_DT;
            frame += 1;
        }

        match game.active_scene() {
            Some(SceneId::Death) => {
                log::info!("Session over after {:.1}s ({} frames)", t, frame);
            }
            scene => log::info!(
                "Time limit reached in scene {:?} ({} frames)",
                scene,
                frame
            ),
        }
        log::info!("Last frame drew {} commands", surface.commands.len());
    }
}
