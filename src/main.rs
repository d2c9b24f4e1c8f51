//! Sky Blaster entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use sky_blaster::render::canvas::{CanvasSurface, SpriteSheet};
    use sky_blaster::sim::Playfield;
    use sky_blaster::{FrameOutcome, Session, Settings, Tuning};

    /// Game instance holding all state
    struct Game {
        session: Session,
        surface: CanvasSurface,
        settings: Settings,
        canvas: HtmlCanvasElement,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: Option<u32>,
    }

    impl Game {
        /// Track frame times for the FPS readout
        fn record_frame(&mut self, time: f64) {
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            // Oldest sample is the one we'll overwrite next
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = Some((60000.0 / elapsed).round() as u32);
                }
            }
        }

        /// Convert client coordinates to canvas coordinates
        fn to_canvas(&self, client_x: i32, client_y: i32) -> (f32, f32) {
            let rect = self.canvas.get_bounding_client_rect();
            (
                (client_x as f64 - rect.left()) as f32,
                (client_y as f64 - rect.top()) as f32,
            )
        }
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Sky Blaster starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or("no #gameCanvas element")?
            .dyn_into()?;

        // Fill the window; resizing later is not handled
        let width = window.inner_width()?.as_f64().unwrap_or(800.0);
        let height = window.inner_height()?.as_f64().unwrap_or(600.0);
        canvas.set_width(width as u32);
        canvas.set_height(height as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("2d context unavailable")?
            .dyn_into()?;

        let sprites = SpriteSheet::request()?;
        sprites.decode_all().await;

        let tuning = Tuning::load();
        let seed = js_sys::Date::now() as u64;
        let playfield = Playfield::new(width as f32, height as f32);
        let game = Rc::new(RefCell::new(Game {
            session: Session::new(playfield, tuning, seed),
            surface: CanvasSurface::new(ctx, sprites, width, height),
            settings: Settings::load(),
            canvas: canvas.clone(),
            frame_times: [0.0; 60],
            frame_index: 0,
            fps: None,
        }));

        setup_input_handlers(&canvas, game.clone())?;
        setup_fire_timer(game.clone(), tuning.fire_interval_ms)?;

        // Start game loop
        request_animation_frame(game);

        log::info!("Sky Blaster running!");
        Ok(())
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        // Touch move - drag the ship
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let mut g = game.borrow_mut();
                    let (x, y) = g.to_canvas(touch.client_x(), touch.client_y());
                    g.session.pointer_moved(x, y);
                }
            });
            canvas.add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Mouse move - same as touch, for desktop play
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut g = game.borrow_mut();
                let (x, y) = g.to_canvas(event.client_x(), event.client_y());
                g.session.pointer_moved(x, y);
            });
            canvas.add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Click - only meaningful on the game-over screen
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let restarted = {
                    let mut g = game.borrow_mut();
                    let (x, y) = g.to_canvas(event.client_x(), event.client_y());
                    g.session.click(x, y)
                };
                if restarted {
                    request_animation_frame(game.clone());
                }
            });
            canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Keyboard - display toggles
        {
            let window = web_sys::window().ok_or("no window")?;
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "f" | "F" => g.settings.toggle_fps(),
                    "h" | "H" => g.settings.toggle_hud(),
                    _ => return,
                }
                g.settings.save();
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    /// Auto-fire: runs for the life of the page; volleys are ignored while over
    fn setup_fire_timer(game: Rc<RefCell<Game>>, interval_ms: i32) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let closure = Closure::<dyn FnMut()>::new(move || {
            game.borrow_mut().session.fire_tick();
        });
        window.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            interval_ms,
        )?;
        closure.forget();
        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            log::error!("no window; frame loop stopped");
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        if let Err(e) = window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            log::error!("requestAnimationFrame failed: {:?}", e);
        }
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let outcome = {
            let mut g = game.borrow_mut();
            g.record_frame(time);
            let Game {
                session,
                surface,
                settings,
                fps,
                ..
            } = &mut *g;
            session.frame(surface, settings, *fps)
        };

        // Game over stops the loop; a restart click schedules it again
        if outcome == FrameOutcome::Continue {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Sky Blaster failed to start: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Sky Blaster (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);
    autopilot::run(seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless demo: a simple AI flies the ship until the run ends
#[cfg(not(target_arch = "wasm32"))]
mod autopilot {
    use sky_blaster::render::NullSurface;
    use sky_blaster::sim::Playfield;
    use sky_blaster::{FrameOutcome, Session, Settings, Tuning};

    /// Frames per auto-fire volley at 60 Hz (300 ms)
    const FRAMES_PER_VOLLEY: u64 = 18;
    /// Give up after ten minutes of simulated play
    const MAX_FRAMES: u64 = 60 * 60 * 10;

    pub fn run(seed: u64) {
        let playfield = Playfield::new(800.0, 600.0);
        let mut session = Session::new(playfield, Tuning::load(), seed);
        let settings = Settings::load();
        let mut surface = NullSurface;

        let mut frames = 0;
        while frames < MAX_FRAMES {
            if frames % FRAMES_PER_VOLLEY == 0 {
                session.fire_tick();
            }
            steer(&mut session, playfield);
            frames += 1;
            if session.frame(&mut surface, &settings, None) == FrameOutcome::Halt {
                break;
            }
        }

        let state = session.state();
        log::info!(
            "Autopilot finished after {} frames: score {}, lives {}, phase {:?}",
            frames,
            state.score(),
            state.lives(),
            session.phase()
        );
        println!("seed {seed}: score {} in {frames} frames", state.score());
    }

    /// Track the lowest enemy of either tier
    fn steer(session: &mut Session, playfield: Playfield) {
        let state = session.state();
        let target = state
            .enemies()
            .iter()
            .map(|e| (e.pos.y, e.pos.x + e.size.x / 2.0))
            .chain(
                state
                    .heavies()
                    .iter()
                    .map(|h| (h.pos.y, h.pos.x + h.size.x / 2.0)),
            )
            .max_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal))
            .map(|(_, x)| x);

        if let Some(x) = target {
            session.pointer_moved(x, playfield.height - 100.0);
        }
    }
}
