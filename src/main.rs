//! Present Catch entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, Document, Element, HtmlElement, KeyboardEvent, PointerEvent,
    };

    use present_catch::Settings;
    use present_catch::audio::AudioManager;
    use present_catch::consts::*;
    use present_catch::input::{KeyAction, PointerSample, drag_direction};
    use present_catch::sim::{GameState, RoundObserver, Side, Snapshot, Snowfield, tick};

    /// DOM view of the game: sprites, HUD and screen toggling
    struct DomPresenter {
        menu_screen: Option<Element>,
        game_screen: Option<Element>,
        final_score: Option<Element>,
        score: Option<Element>,
        santa: Option<HtmlElement>,
        present: Option<HtmlElement>,
        btn_left: Option<Element>,
        btn_right: Option<Element>,
        snow_ctx: Option<CanvasRenderingContext2d>,
    }

    impl DomPresenter {
        fn new(document: &Document) -> Self {
            let html = |id: &str| {
                document
                    .get_element_by_id(id)
                    .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            };
            let snow_ctx = document
                .get_element_by_id("snow")
                .and_then(|el| el.dyn_into::<web_sys::HtmlCanvasElement>().ok())
                .and_then(|canvas| canvas.get_context("2d").ok().flatten())
                .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok());
            if snow_ctx.is_none() {
                log::warn!("Snow canvas unavailable - snowfall disabled");
            }

            Self {
                menu_screen: document.get_element_by_id("menu-screen"),
                game_screen: document.get_element_by_id("game-screen"),
                final_score: document.get_element_by_id("final-score"),
                score: document.get_element_by_id("score"),
                santa: html("santa"),
                present: html("present"),
                btn_left: document.get_element_by_id("btn-left"),
                btn_right: document.get_element_by_id("btn-right"),
                snow_ctx,
            }
        }

        fn set_hidden(el: &Option<Element>, hidden: bool) {
            if let Some(el) = el {
                let _ = el.class_list().toggle_with_force("hidden", hidden);
            }
        }

        fn set_text(el: &Option<Element>, text: &str) {
            if let Some(el) = el {
                el.set_text_content(Some(text));
            }
        }

        /// Mirror held directions onto the on-screen buttons
        fn show_buttons(&self, left: bool, right: bool) {
            if let Some(btn) = &self.btn_left {
                let _ = btn.class_list().toggle_with_force("active", left);
            }
            if let Some(btn) = &self.btn_right {
                let _ = btn.class_list().toggle_with_force("active", right);
            }
        }

        fn render(&self, snapshot: &Snapshot) {
            if let Some(santa) = &self.santa {
                let _ = santa
                    .style()
                    .set_property("left", &format!("{}px", snapshot.character.x));
            }
            if let Some(present) = &self.present {
                let style = present.style();
                let _ = style.set_property("left", &format!("{}px", snapshot.object.x));
                let _ = style.set_property("top", &format!("{}px", snapshot.object.y));
            }
        }

        fn draw_snow(&self, snow: Option<&Snowfield>) {
            let Some(ctx) = &self.snow_ctx else { return };
            ctx.clear_rect(0.0, 0.0, ARENA_WIDTH as f64, ARENA_HEIGHT as f64);
            let Some(snow) = snow else { return };

            ctx.set_fill_style_str("rgba(255,255,255,0.9)");
            for flake in &snow.flakes {
                ctx.begin_path();
                let _ = ctx.arc(
                    flake.x as f64,
                    flake.y as f64,
                    flake.radius as f64,
                    0.0,
                    std::f64::consts::TAU,
                );
                ctx.fill();
            }
        }
    }

    impl RoundObserver for DomPresenter {
        fn on_catch(&mut self, score: u32) {
            Self::set_text(&self.score, &format!("PRESENTS: {}", score));
        }

        fn on_miss(&mut self, final_score: u32) {
            Self::set_text(
                &self.final_score,
                &format!("FINAL PRESENTS CAUGHT: {}", final_score),
            );
            Self::set_hidden(&self.final_score, false);
            Self::set_hidden(&self.menu_screen, false);
            Self::set_hidden(&self.game_screen, true);
        }

        fn on_round_start(&mut self) {
            Self::set_text(&self.score, "PRESENTS: 0");
            Self::set_hidden(&self.final_score, true);
            Self::set_hidden(&self.menu_screen, true);
            Self::set_hidden(&self.game_screen, false);
        }
    }

    /// Game instance holding all state
    struct Game {
        state: GameState,
        presenter: DomPresenter,
        audio: AudioManager,
        snow: Option<Snowfield>,
        settings: Settings,
        last_time: f64,
        /// Pointer currently dragging across the play area
        drag_pointer: Option<i32>,
        swipe_start: PointerSample,
    }

    impl Game {
        fn new(settings: Settings, presenter: DomPresenter, seed: u64) -> Self {
            let mut audio = AudioManager::new();
            audio.configure(&settings);
            let snow = settings
                .effective_snow()
                .then(|| Snowfield::new(seed.wrapping_add(1)));
            Self {
                state: GameState::with_config(seed, settings.round_config()),
                presenter,
                audio,
                snow,
                settings,
                last_time: 0.0,
                drag_pointer: None,
                swipe_start: PointerSample::default(),
            }
        }

        fn start(&mut self) {
            if self.state.start_round() {
                self.deliver_events();
            }
        }

        fn set_direction(&mut self, side: Side, pressed: bool) {
            self.state.set_direction(side, pressed);
            let input = self.state.input;
            self.presenter.show_buttons(input.left, input.right);
        }

        fn nudge(&mut self, dx: f32) {
            self.state.nudge(dx);
            self.presenter.render(&self.state.snapshot());
        }

        /// Hand pending events to the HUD and the audio player
        fn deliver_events(&mut self) {
            for event in self.state.drain_events() {
                event.dispatch(&mut self.presenter);
                event.dispatch(&mut self.audio);
            }
        }

        fn frame(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                (time - self.last_time) as f32
            } else {
                NOMINAL_FRAME_MS
            };
            self.last_time = time;

            tick(&mut self.state, dt);
            self.deliver_events();
            self.presenter.render(&self.state.snapshot());

            if let Some(snow) = &mut self.snow {
                snow.update();
            }
            self.presenter.draw_snow(self.snow.as_ref());
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Present Catch starting...");

        let window = web_sys::window().expect("No window");
        let document = window.document().expect("No document");

        let settings = Settings::load();
        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        log::info!("Game initialized with seed: {}", seed);

        let presenter = DomPresenter::new(&document);
        let game = Rc::new(RefCell::new(Game::new(settings, presenter, seed)));
        {
            let g = game.borrow();
            g.presenter.render(&g.state.snapshot());
        }

        setup_keyboard(game.clone());
        setup_buttons(&document, game.clone());
        setup_drag(&document, game.clone());
        setup_menu(&document, game.clone());
        setup_focus(game.clone());

        request_animation_frame(game);
        log::info!("Present Catch running!");
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };

        let g = game.clone();
        let keydown = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            let mut g = g.borrow_mut();
            match KeyAction::from_code(&event.code()) {
                Some(KeyAction::Move(side)) => {
                    g.set_direction(side, true);
                    event.prevent_default();
                }
                Some(KeyAction::Start) if !g.state.is_active() => g.start(),
                _ => {}
            }
        });
        let _ = window
            .add_event_listener_with_callback("keydown", keydown.as_ref().unchecked_ref());
        keydown.forget();

        let keyup = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            if let Some(KeyAction::Move(side)) = KeyAction::from_code(&event.code()) {
                game.borrow_mut().set_direction(side, false);
                event.prevent_default();
            }
        });
        let _ = window.add_event_listener_with_callback("keyup", keyup.as_ref().unchecked_ref());
        keyup.forget();
    }

    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        for (id, side) in [("btn-left", Side::Left), ("btn-right", Side::Right)] {
            let Some(btn) = document.get_element_by_id(id) else {
                continue;
            };

            let (g, b) = (game.clone(), btn.clone());
            let down = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                event.prevent_default();
                let _ = b.set_pointer_capture(event.pointer_id());
                g.borrow_mut().set_direction(side, true);
            });
            let _ = btn
                .add_event_listener_with_callback("pointerdown", down.as_ref().unchecked_ref());
            down.forget();

            let (g, b) = (game.clone(), btn.clone());
            let up = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                event.prevent_default();
                let _ = b.release_pointer_capture(event.pointer_id());
                g.borrow_mut().set_direction(side, false);
            });
            let _ = btn.add_event_listener_with_callback("pointerup", up.as_ref().unchecked_ref());
            up.forget();

            let g = game.clone();
            let cancel = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                event.prevent_default();
                g.borrow_mut().set_direction(side, false);
            });
            let _ = btn
                .add_event_listener_with_callback("pointercancel", cancel.as_ref().unchecked_ref());
            cancel.forget();

            // Sliding off the button with nothing pressed stops movement
            let g = game.clone();
            let leave = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                if event.pressure() == 0.0 || event.buttons() == 0 {
                    g.borrow_mut().set_direction(side, false);
                }
            });
            let _ = btn
                .add_event_listener_with_callback("pointerleave", leave.as_ref().unchecked_ref());
            leave.forget();
        }
    }

    /// Point an area-local x at the drag mapper
    fn apply_drag(game: &mut Game, area: &Element, client_x: i32) {
        let rect = area.get_bounding_client_rect();
        let local_x = (client_x as f64 - rect.left()) as f32;
        let input = drag_direction(local_x, rect.width() as f32);
        game.set_direction(Side::Left, input.left);
        game.set_direction(Side::Right, input.right);
    }

    fn now_ms() -> f64 {
        web_sys::window()
            .and_then(|w| w.performance())
            .map(|p| p.now())
            .unwrap_or_else(js_sys::Date::now)
    }

    fn setup_drag(document: &Document, game: Rc<RefCell<Game>>) {
        let Some(area) = document.get_element_by_id("game-area") else {
            log::warn!("No #game-area - drag and swipe disabled");
            return;
        };

        let (g, a) = (game.clone(), area.clone());
        let down = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
            let mut g = g.borrow_mut();
            g.swipe_start = PointerSample::new(
                now_ms(),
                event.client_x() as f32,
                event.client_y() as f32,
            );
            if event.is_primary() {
                g.drag_pointer = Some(event.pointer_id());
                apply_drag(&mut g, &a, event.client_x());
                let _ = a.set_pointer_capture(event.pointer_id());
            }
        });
        let _ = area.add_event_listener_with_callback("pointerdown", down.as_ref().unchecked_ref());
        down.forget();

        let (g, a) = (game.clone(), area.clone());
        let moved = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
            let mut g = g.borrow_mut();
            if g.drag_pointer != Some(event.pointer_id()) {
                return;
            }
            event.prevent_default();
            apply_drag(&mut g, &a, event.client_x());
        });
        let _ = area
            .add_event_listener_with_callback("pointermove", moved.as_ref().unchecked_ref());
        moved.forget();

        let (g, a) = (game.clone(), area.clone());
        let up = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
            let mut g = g.borrow_mut();
            let end =
                PointerSample::new(now_ms(), event.client_x() as f32, event.client_y() as f32);
            if let Some(dx) = g.swipe_start.swipe_to(&end) {
                g.nudge(dx);
            }
            if g.drag_pointer == Some(event.pointer_id()) {
                end_drag(&mut g, &a, event.pointer_id());
            }
        });
        let _ = area.add_event_listener_with_callback("pointerup", up.as_ref().unchecked_ref());
        up.forget();

        let a = area.clone();
        let cancel = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
            let mut g = game.borrow_mut();
            if g.drag_pointer == Some(event.pointer_id()) {
                end_drag(&mut g, &a, event.pointer_id());
            }
        });
        let _ = area
            .add_event_listener_with_callback("pointercancel", cancel.as_ref().unchecked_ref());
        cancel.forget();
    }

    fn end_drag(game: &mut Game, area: &Element, pointer_id: i32) {
        game.drag_pointer = None;
        game.state.input.clear();
        game.presenter.show_buttons(false, false);
        let _ = area.release_pointer_capture(pointer_id);
    }

    fn setup_menu(document: &Document, game: Rc<RefCell<Game>>) {
        for id in ["menu-screen", "start-text"] {
            let Some(el) = document.get_element_by_id(id) else {
                continue;
            };
            let g = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
                g.borrow_mut().start();
            });
            let _ = el
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_focus(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };

        let g = game.clone();
        let blur = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
            let mut g = g.borrow_mut();
            if g.settings.mute_on_blur {
                g.audio.set_blurred(true);
                log::info!("Muted (window blur)");
            }
        });
        let _ = window.add_event_listener_with_callback("blur", blur.as_ref().unchecked_ref());
        blur.forget();

        let focus = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
            game.borrow_mut().audio.set_blurred(false);
        });
        let _ = window.add_event_listener_with_callback("focus", focus.as_ref().unchecked_ref());
        focus.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        game.borrow_mut().frame(time);
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
    use present_catch::Settings;
    use present_catch::consts::NOMINAL_FRAME_MS;
    use present_catch::sim::{GameEvent, GameState, autopilot_input, tick};

    /// Give up on a round that somehow never ends
    const MAX_FRAMES: u32 = 60 * 60 * 30;

    env_logger::init();
    log::info!("Present Catch (native) starting...");
    log::info!(
        "Native mode runs a headless autoplay round - use `trunk serve` for the web version"
    );

    let settings = Settings::load();
    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .or(settings.seed)
        .unwrap_or(2024);

    let mut state = GameState::with_config(seed, settings.round_config());
    state.start_round();

    let mut frames = 0;
    while state.is_active() && frames < MAX_FRAMES {
        state.input = autopilot_input(&state);
        tick(&mut state, NOMINAL_FRAME_MS);
        frames += 1;

        for event in state.drain_events() {
            match event {
                GameEvent::Caught { score } if score % 10 == 0 => {
                    log::info!("{} presents caught ({} frames)", score, frames);
                }
                GameEvent::Missed { final_score } => {
                    println!("Seed {}: autopilot caught {} presents", seed, final_score);
                }
                _ => {}
            }
        }
    }

    if state.is_active() {
        println!(
            "Seed {}: autopilot still going after {} frames with {} presents",
            seed, frames, state.score
        );
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
