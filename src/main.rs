//! World Runner entry point
//!
//! The shell owns the outer mode machine (Idle -> Generating -> Ready ->
//! Playing -> GameOver), the DOM, and the animation-frame loop; all gameplay
//! lives behind the Engine.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlTextAreaElement};

    use world_runner::provider::FetchThemeProvider;
    use world_runner::render;
    use world_runner::sim::{GameEvent, Intent};
    use world_runner::{Engine, HighScore, Rank, Settings, Theme};

    /// Outer lifecycle; the engine only ever sees Playing
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Mode {
        Idle,
        Generating,
        Ready,
        Playing,
        GameOver,
    }

    const LOADING_LINES: [&str; 5] = [
        "Painting the horizons...",
        "Sourcing exotic glyphs...",
        "Laying out the lanes...",
        "Polishing the collectibles...",
        "Baking the world geometry...",
    ];

    const PROMPT_SUGGESTIONS: [&str; 4] = [
        "8-Bit Mushroom Kingdom",
        "Steampunk London Skies",
        "Inside a Computer Chip",
        "A Giant Candy Factory",
    ];

    struct App {
        mode: Mode,
        engine: Engine,
        theme: Option<Theme>,
        high: HighScore,
        settings: Settings,
        ctx: Option<web_sys::CanvasRenderingContext2d>,
        /// Bumped on every run start/stop; stale rAF callbacks bail out
        loop_generation: u32,
        generation_count: u32,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl App {
        fn new(high: HighScore, settings: Settings) -> Self {
            Self {
                mode: Mode::Idle,
                engine: Engine::new(),
                theme: None,
                high,
                settings,
                ctx: None,
                loop_generation: 0,
                generation_count: 0,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        fn track_fps(&mut self, time: f64) {
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;
            let oldest = self.frame_times[self.frame_index];
            if oldest > 0.0 {
                let elapsed = time - oldest;
                if elapsed > 0.0 {
                    self.fps = (60_000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Apply one engine event to the HUD (and the mode machine, for the
        /// terminal one)
        fn handle_event(&mut self, event: GameEvent) {
            match event {
                GameEvent::ScoreChanged { score } => {
                    set_text("#hud-score .hud-value", &score.to_string());
                    set_text(
                        "#hud-high .hud-value",
                        &score.max(self.high.best()).to_string(),
                    );
                }
                GameEvent::CoinCollected { coins } => {
                    set_text("#hud-coins .hud-value", &coins.to_string());
                }
                GameEvent::MultiplierIncreased { multiplier } => {
                    set_text("#hud-mult .hud-value", &format!("X{multiplier}"));
                }
                GameEvent::GameOver { score, coins } => self.finish_run(score, coins),
            }
        }

        fn finish_run(&mut self, score: u64, coins: u32) {
            let new_best = self.high.record(score);
            self.mode = Mode::GameOver;
            self.loop_generation += 1;

            set_text("#final-score", &score.to_string());
            set_text("#final-coins", &coins.to_string());
            set_text("#final-best", &self.high.best().to_string());
            set_text("#final-rank", Rank::for_score(score).as_str());
            if new_best {
                log::info!("new high score: {score}");
            }

            let pct = Rank::progress_percent(score);
            if let Some(bar) = document().get_element_by_id("rank-progress") {
                let _ = bar.set_attribute("style", &format!("width: {pct}%"));
            }

            show("game-over");
            hide("hud");
        }

        /// Fill the Ready card from the generated theme
        fn show_ready_card(&self, theme: &Theme) {
            set_text("#world-name", &theme.world_name);
            set_text("#world-desc", &theme.description);
            set_text("#hero-name", &theme.character.name);
            set_text("#hero-glyph", &theme.character.glyph);
            set_text("#best-score", &self.high.best().to_string());
        }
    }

    fn document() -> Document {
        web_sys::window().unwrap().document().unwrap()
    }

    fn set_text(selector: &str, text: &str) {
        if let Some(el) = document().query_selector(selector).ok().flatten() {
            el.set_text_content(Some(text));
        }
    }

    fn show(id: &str) {
        if let Some(el) = document().get_element_by_id(id) {
            let _ = el.set_attribute("class", "");
        }
    }

    fn hide(id: &str) {
        if let Some(el) = document().get_element_by_id(id) {
            let _ = el.set_attribute("class", "hidden");
        }
    }

    fn show_screen(mode: Mode) {
        for (id, visible) in [
            ("screen-idle", mode == Mode::Idle),
            ("screen-generating", mode == Mode::Generating),
            ("screen-ready", mode == Mode::Ready),
            ("hud", mode == Mode::Playing),
            ("game-over", mode == Mode::GameOver),
        ] {
            if visible {
                show(id);
            } else {
                hide(id);
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("World Runner starting...");

        let doc = document();

        // Hide loading indicator
        hide("loading");

        let canvas: HtmlCanvasElement = doc
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        canvas.set_width(world_runner::consts::GAME_WIDTH as u32);
        canvas.set_height(world_runner::consts::GAME_HEIGHT as u32);

        let ctx = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|obj| obj.dyn_into::<web_sys::CanvasRenderingContext2d>().ok())
            .expect("no 2d context");

        let high = HighScore::load();
        let settings = Settings::load();
        if !settings.show_fps {
            hide("hud-fps");
        }

        let mut app = App::new(high, settings);
        app.ctx = Some(ctx);
        let app = Rc::new(RefCell::new(app));

        setup_idle_screen(app.clone());
        setup_ready_screen(app.clone());
        setup_game_over_screen(app.clone());
        setup_keyboard(app.clone());

        show_screen(Mode::Idle);
        log::info!("World Runner ready");
    }

    fn setup_idle_screen(app: Rc<RefCell<App>>) {
        let doc = document();

        // Suggestion chips fill the prompt box
        for (i, suggestion) in PROMPT_SUGGESTIONS.iter().enumerate() {
            if let Some(chip) = doc.get_element_by_id(&format!("suggestion-{i}")) {
                chip.set_text_content(Some(suggestion));
                let text = suggestion.to_string();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                    if let Some(input) = prompt_input() {
                        input.set_value(&text);
                    }
                });
                let _ = chip
                    .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }

        if let Some(btn) = doc.get_element_by_id("forge-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                begin_generation(app.clone());
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn prompt_input() -> Option<HtmlTextAreaElement> {
        document()
            .get_element_by_id("prompt-input")?
            .dyn_into()
            .ok()
    }

    /// Idle -> Generating; only a non-empty prompt leaves Idle
    fn begin_generation(app: Rc<RefCell<App>>) {
        let prompt = match prompt_input() {
            Some(input) => input.value(),
            None => return,
        };
        let prompt = prompt.trim().to_string();
        if prompt.is_empty() {
            return;
        }

        {
            let mut a = app.borrow_mut();
            if a.mode != Mode::Idle {
                return;
            }
            a.mode = Mode::Generating;
            let line = LOADING_LINES[a.generation_count as usize % LOADING_LINES.len()];
            a.generation_count += 1;
            set_text("#loading-text", line);
        }
        hide("gen-error");
        show_screen(Mode::Generating);

        wasm_bindgen_futures::spawn_local(async move {
            let result = match FetchThemeProvider::from_document() {
                Ok(provider) => provider.generate(&prompt).await,
                Err(e) => Err(e),
            };

            let mut a = app.borrow_mut();
            if a.mode != Mode::Generating {
                // User left the screen while we were waiting
                return;
            }
            match result {
                Ok(theme) => {
                    log::info!("theme generated: {:?}", theme.world_name);
                    a.show_ready_card(&theme);
                    a.theme = Some(theme);
                    a.mode = Mode::Ready;
                    show_screen(Mode::Ready);
                }
                Err(e) => {
                    log::warn!("theme generation failed: {e}");
                    a.mode = Mode::Idle;
                    show_screen(Mode::Idle);
                    set_text("#gen-error", "That world refused to form. Try again?");
                    show("gen-error");
                }
            }
        });
    }

    fn setup_ready_screen(app: Rc<RefCell<App>>) {
        let doc = document();

        if let Some(btn) = doc.get_element_by_id("play-btn") {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                start_run(&app);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = doc.get_element_by_id("back-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut a = app.borrow_mut();
                a.theme = None;
                a.mode = Mode::Idle;
                show_screen(Mode::Idle);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_game_over_screen(app: Rc<RefCell<App>>) {
        let doc = document();

        if let Some(btn) = doc.get_element_by_id("restart-btn") {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                start_run(&app);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = doc.get_element_by_id("menu-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut a = app.borrow_mut();
                a.engine.stop();
                a.loop_generation += 1;
                a.theme = None;
                a.mode = Mode::Idle;
                show_screen(Mode::Idle);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// (Re-)enter Playing with a fresh run and a fresh seed
    fn start_run(app: &Rc<RefCell<App>>) {
        let generation = {
            let mut a = app.borrow_mut();
            let Some(theme) = a.theme.clone() else {
                log::warn!("start requested without a theme");
                return;
            };
            let seed = js_sys::Date::now() as u64;
            let fx = a.settings.fx();
            a.engine.set_fx(fx);
            a.engine.start(theme, seed);
            a.mode = Mode::Playing;
            a.loop_generation += 1;

            set_text("#hud-score .hud-value", "0");
            set_text("#hud-coins .hud-value", "0");
            set_text("#hud-mult .hud-value", "X1");
            set_text("#hud-high .hud-value", &a.high.best().to_string());

            a.loop_generation
        };
        show_screen(Mode::Playing);
        schedule_frame(app.clone(), generation);
    }

    fn setup_keyboard(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            let mut a = app.borrow_mut();
            if a.mode != Mode::Playing {
                return;
            }
            let intent = match event.key().as_str() {
                "ArrowLeft" | "a" => Some(Intent::LaneLeft),
                "ArrowRight" | "d" => Some(Intent::LaneRight),
                "ArrowUp" | " " | "w" => Some(Intent::Jump),
                "ArrowDown" | "s" => Some(Intent::Slide),
                _ => None,
            };
            if let Some(intent) = intent {
                event.prevent_default();
                a.engine.apply_intent(intent);
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn schedule_frame(app: Rc<RefCell<App>>, generation: u32) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            frame(app, generation, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// One update+render step per display refresh; a stale generation or a
    /// mode change means this callback is orphaned and must do nothing.
    fn frame(app: Rc<RefCell<App>>, generation: u32, time: f64) {
        {
            let mut a = app.borrow_mut();
            if a.loop_generation != generation || a.mode != Mode::Playing {
                return;
            }

            let events = a.engine.step();

            if let (Some(ctx), Some(state), Some(theme)) =
                (a.ctx.as_ref(), a.engine.state(), a.engine.theme())
            {
                render::render(ctx, state, theme);
            }

            a.track_fps(time);
            if a.settings.show_fps {
                let fps = a.fps;
                set_text("#hud-fps .hud-value", &fps.to_string());
            }

            for event in events {
                a.handle_event(event);
            }
            if a.mode != Mode::Playing {
                return;
            }
        }
        schedule_frame(app, generation);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_app::run().await;
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("World Runner (native) starting...");
    log::info!("The playable build targets wasm32; running a headless demo run instead");

    headless_demo();
}

/// Drive the simulation without a canvas: useful as a smoke test and for
/// profiling the tick loop.
#[cfg(not(target_arch = "wasm32"))]
fn headless_demo() {
    use world_runner::sim::{RunState, tick};
    use world_runner::theme::{
        AvoidKind, Behavior, Character, CollectibleArchetype, ObstacleArchetype, Palette, Theme,
    };

    let theme = Theme {
        world_name: "Demo Flats".into(),
        description: "A gray plain for smoke testing".into(),
        colors: Palette {
            primary: "#888888".into(),
            secondary: "#aaaaaa".into(),
            background: "#dddddd".into(),
            accent: "#4477ff".into(),
        },
        character: Character {
            name: "Probe".into(),
            glyph: "🤖".into(),
            description: "It runs so you don't have to".into(),
        },
        obstacles: vec![ObstacleArchetype {
            name: "Crate".into(),
            glyph: "📦".into(),
            behavior: Behavior::Static,
            kind: AvoidKind::Jump,
        }],
        collectibles: vec![CollectibleArchetype {
            name: "Bolt".into(),
            glyph: "🔩".into(),
            points: 10.0,
        }],
    };
    theme.validate().expect("demo theme is valid");

    let mut state = RunState::new(0xC0FFEE);
    while !state.over && state.frame < 100_000 {
        tick(&mut state, &theme);
    }

    println!(
        "demo run ended: frame={} score={} coins={} multiplier={}",
        state.frame, state.score, state.coins, state.multiplier
    );
}
