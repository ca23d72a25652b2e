//! Dino Dash entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlCanvasElement, HtmlElement, MouseEvent, TouchEvent};

    use dino_dash::Settings;
    use dino_dash::audio::AudioManager;
    use dino_dash::renderer::{RenderState, SceneStyle};
    use dino_dash::sim::{Session, TickInput, tick};
    use dino_dash::sinks::{UiSink, present};

    /// Nominal frame time used for the very first frame
    const FIRST_FRAME_MS: f64 = 1000.0 / 60.0;

    /// Overlay and HUD elements of the host page
    struct DomUi {
        overlay: Option<Element>,
        title: Option<Element>,
        game_over_img: Option<Element>,
        final_score: Option<Element>,
        score: Option<Element>,
        start_btn: Option<Element>,
    }

    impl DomUi {
        fn new(document: &Document) -> Self {
            Self {
                overlay: document.get_element_by_id("gameUI"),
                title: document.get_element_by_id("uiTitle"),
                game_over_img: document.get_element_by_id("gameOverImg"),
                final_score: document.get_element_by_id("uiScore"),
                score: document.get_element_by_id("scoreVal"),
                start_btn: document.query_selector(".btn").ok().flatten(),
            }
        }

        fn overlay_visible(&self) -> bool {
            self.overlay
                .as_ref()
                .is_some_and(|el| !el.class_list().contains("hidden"))
        }

        fn set_overlay(&self, visible: bool) {
            if let Some(el) = &self.overlay {
                let classes = el.class_list();
                let _ = if visible {
                    classes.remove_1("hidden")
                } else {
                    classes.add_1("hidden")
                };
            }
        }
    }

    fn set_text(el: &Option<Element>, text: &str) {
        if let Some(el) = el {
            el.set_text_content(Some(text));
        }
    }

    fn set_shown(el: &Option<Element>, shown: bool) {
        if let Some(el) = el.as_ref().and_then(|e| e.dyn_ref::<HtmlElement>()) {
            el.set_hidden(!shown);
        }
    }

    impl UiSink for DomUi {
        fn on_ready(&mut self) {
            set_text(&self.title, "Ready?");
            set_shown(&self.title, true);
            set_shown(&self.game_over_img, false);
            set_shown(&self.final_score, false);
            set_text(&self.start_btn, "Start Run");
            self.set_overlay(true);
        }

        fn on_started(&mut self) {
            set_shown(&self.game_over_img, false);
            set_shown(&self.final_score, false);
            self.set_overlay(false);
        }

        fn on_score_changed(&mut self, score: u32) {
            set_text(&self.score, &score.to_string());
        }

        fn on_game_over(&mut self, score: u32) {
            set_shown(&self.title, false);
            set_shown(&self.game_over_img, true);
            set_text(&self.final_score, &format!("Score: {score}"));
            set_shown(&self.final_score, true);
            set_text(&self.start_btn, "Try Again");
            self.set_overlay(true);
        }
    }

    /// Game instance holding all state
    struct Game {
        session: Session,
        render_state: Option<RenderState>,
        audio: AudioManager,
        ui: DomUi,
        input: TickInput,
        last_time: f64,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
        fps_el: Option<Element>,
    }

    impl Game {
        fn new(seed: u64, settings: &Settings, document: &Document) -> Self {
            let fps_el = document.get_element_by_id("fps");
            set_shown(&fps_el, settings.show_fps);
            Self {
                session: Session::new(seed),
                render_state: None,
                audio: AudioManager::new(settings),
                ui: DomUi::new(document),
                input: TickInput {
                    jump: false,
                    autopilot: settings.autopilot,
                },
                last_time: 0.0,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
                fps_el: if settings.show_fps { fps_el } else { None },
            }
        }

        /// Run one display frame of simulation
        fn update(&mut self, dt_ms: f64, time: f64) {
            tick(&mut self.session, &self.input, dt_ms);
            // Clear one-shot inputs after processing
            self.input.jump = false;

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Hand the frame to the render, audio and UI sinks
        fn render(&mut self) {
            present(
                &mut self.session,
                &mut self.render_state,
                &mut self.audio,
                &mut self.ui,
            );
            if let Some(el) = &self.fps_el {
                el.set_text_content(Some(&format!("{} FPS", self.fps)));
            }
        }

        fn queue_jump(&mut self) {
            if self.session.is_playing() {
                self.input.jump = true;
            }
        }
    }

    fn canvas_pixel_size(window: &web_sys::Window, canvas: &HtmlCanvasElement) -> (u32, u32) {
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        (width.max(1), height.max(1))
    }

    async fn init_renderer(
        canvas: &HtmlCanvasElement,
        width: u32,
        height: u32,
        style: SceneStyle,
    ) -> Result<RenderState, String> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| format!("Failed to create surface: {e}"))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| format!("Failed to get adapter: {e}"))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        RenderState::new(surface, &adapter, width, height, style)
            .await
            .map_err(|e| format!("Failed to create device: {e}"))
    }

    pub async fn run() -> Result<(), JsValue> {
        log::info!("Dino Dash starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let (width, height) = canvas_pixel_size(&window, &canvas);
        canvas.set_width(width);
        canvas.set_height(height);

        let settings = Settings::load();

        // Initialize game
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, &settings, &document)));
        log::info!("Game initialized with seed: {}", seed);

        // The game stays playable (overlay, audio, score) without a GPU
        let style = SceneStyle {
            reduced_motion: settings.reduced_motion,
        };
        match init_renderer(&canvas, width, height, style).await {
            Ok(render_state) => game.borrow_mut().render_state = Some(render_state),
            Err(e) => log::error!("{e}; rendering disabled"),
        }

        setup_keyboard(game.clone());
        setup_touch(&document, game.clone());
        setup_canvas_click(&canvas, game.clone());
        setup_start_button(&document, game.clone());
        setup_resize(&canvas, game.clone());

        // Start game loop
        request_animation_frame(game);

        log::info!("Dino Dash running!");
        Ok(())
    }

    fn setup_keyboard(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            let mut g = game.borrow_mut();
            match event.code().as_str() {
                "Space" => {
                    // Keep the page from scrolling
                    event.prevent_default();
                    g.queue_jump();
                }
                "KeyA" => {
                    g.input.autopilot = !g.input.autopilot;
                    log::info!("Autopilot: {}", g.input.autopilot);
                }
                _ => {}
            }
        });
        let _ =
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    /// Target element of an event, if any
    fn event_element(event: &web_sys::Event) -> Option<Element> {
        event.target()?.dyn_into::<Element>().ok()
    }

    fn is_on_button(el: &Element) -> bool {
        el.closest(".btn").ok().flatten().is_some()
    }

    fn setup_touch(document: &Document, game: Rc<RefCell<Game>>) {
        let options = web_sys::AddEventListenerOptions::new();
        options.set_passive(false);
        options.set_capture(true);

        // Touch start jumps, unless it lands on the button or the visible overlay
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                let mut g = game.borrow_mut();
                if let Some(el) = event_element(&event) {
                    let on_overlay = g.ui.overlay_visible()
                        && el.closest(".ui-overlay").ok().flatten().is_some();
                    if is_on_button(&el) || on_overlay {
                        return;
                    }
                }
                event.prevent_default();
                event.stop_propagation();
                g.queue_jump();
            });
            let _ = document.add_event_listener_with_callback_and_add_event_listener_options(
                "touchstart",
                closure.as_ref().unchecked_ref(),
                &options,
            );
            closure.forget();
        }

        // Suppress scrolling and synthetic clicks everywhere but the button
        for kind in ["touchmove", "touchend"] {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                if event_element(&event).is_some_and(|el| is_on_button(&el)) {
                    return;
                }
                event.prevent_default();
            });
            let _ = document.add_event_listener_with_callback_and_add_event_listener_options(
                kind,
                closure.as_ref().unchecked_ref(),
                &options,
            );
            closure.forget();
        }
    }

    fn setup_canvas_click(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            let mut g = game.borrow_mut();
            if g.session.is_playing() {
                event.prevent_default();
                g.queue_jump();
            }
        });
        let _ = canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_start_button(document: &Document, game: Rc<RefCell<Game>>) {
        let Some(btn) = document.query_selector(".btn").ok().flatten() else {
            log::warn!("No start button found");
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
            event.stop_propagation();
            let mut g = game.borrow_mut();
            // Browsers only allow audio after a user gesture
            g.audio.resume();
            g.input.jump = false;
            g.session.start();
        });
        let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_resize(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(window) = web_sys::window() else {
                return;
            };
            let (width, height) = canvas_pixel_size(&window, &canvas);
            canvas.set_width(width);
            canvas.set_height(height);
            if let Some(render_state) = game.borrow_mut().render_state.as_mut() {
                render_state.resize(width, height);
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
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
            let dt_ms = if g.last_time > 0.0 {
                time - g.last_time
            } else {
                FIRST_FRAME_MS
            };
            g.last_time = time;

            g.update(dt_ms, time);
            g.render();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }

    if let Err(e) = wasm_game::run().await {
        log::error!("Dino Dash failed to start: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::path::PathBuf;

    use dino_dash::sinks::{LogSink, present};
    use dino_dash::{Session, Settings, tick};

    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);
    let frames: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(3600);
    let settings_path = args.next().map(PathBuf::from);
    let settings = settings_path
        .as_deref()
        .map(|path| Settings::load_from(Some(path)));
    log::debug!("Settings: {settings:?}");

    log::info!("Dino Dash (native) starting: seed {seed}, {frames} frames");
    log::info!("Headless autopilot run - build for wasm32 to play in the browser");

    let mut session = Session::new(seed);
    let mut render = LogSink::default();
    let mut audio = LogSink::default();
    let mut ui = LogSink::default();
    let input = headless_input(settings.as_ref());
    if !input.autopilot {
        log::info!("Autopilot off - baseline run with no input");
    }
    // Headless clock runs at a fixed 60 Hz
    let dt_ms = 1000.0 / 60.0;
    let mut scores = Vec::new();

    session.start();
    for _ in 0..frames {
        if !session.is_playing() {
            scores.push(session.score());
            session.start();
        }
        tick(&mut session, &input, dt_ms);
        present(&mut session, &mut render, &mut audio, &mut ui);
    }
    if session.is_playing() {
        log::info!("Run {} still going after {frames} frames", session.run);
    }
    scores.push(session.score());
    log::debug!("Presented {} frames", render.frames);

    let best = scores.iter().copied().max().unwrap_or(0);
    println!("Runs: {}", scores.len());
    println!("Scores: {:?}", scores);
    println!("Best: {best}");
}

/// Input for the headless runner: autopilot unless a settings file turns it off
#[cfg(not(target_arch = "wasm32"))]
fn headless_input(settings: Option<&dino_dash::Settings>) -> dino_dash::TickInput {
    dino_dash::TickInput {
        jump: false,
        autopilot: settings.is_none_or(|s| s.autopilot),
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;
    use dino_dash::Settings;

    #[test]
    fn test_headless_input_follows_settings() {
        assert!(headless_input(None).autopilot);

        let off = Settings::from_json(r#"{ "autopilot": false }"#).unwrap();
        assert!(!headless_input(Some(&off)).autopilot);

        let on = Settings::from_json(r#"{ "autopilot": true }"#).unwrap();
        assert!(headless_input(Some(&on)).autopilot);
    }
}
