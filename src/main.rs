//! Math Breaker entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, TouchEvent};

    use mathbreak::consts::SIM_DT;
    use mathbreak::game::Game;
    use mathbreak::platform::storage::LocalScoreStore;
    use mathbreak::render;

    /// Shared loop state behind the engine handle.
    struct App {
        game: Game<LocalScoreStore>,
        ctx: CanvasRenderingContext2d,
        canvas: HtmlCanvasElement,
        last_time: f64,
        running: bool,
        /// Pending animation-frame handle, for cancellation on stop
        raf_id: Option<i32>,
    }

    impl App {
        fn frame(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                ((time - self.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            self.last_time = time;
            self.game.frame(dt);
            render::draw(&self.ctx, &self.game);
        }
    }

    /// The embedding handle: the surrounding page constructs one per
    /// mount, calls `start()`/`stop()`, and polls `state_json()` for its
    /// HUD. The loop object owns its own cancellation handle; no global
    /// timer state.
    #[wasm_bindgen]
    pub struct Engine {
        app: Rc<RefCell<App>>,
    }

    #[wasm_bindgen]
    impl Engine {
        /// Construct the engine on the canvas with the given element id.
        /// Fails fast when the canvas or its 2D context is unavailable.
        #[wasm_bindgen(constructor)]
        pub fn new(canvas_id: &str) -> Result<Engine, JsValue> {
            let window = web_sys::window().ok_or("no window")?;
            let document = window.document().ok_or("no document")?;
            let canvas: HtmlCanvasElement = document
                .get_element_by_id(canvas_id)
                .ok_or("canvas element not found")?
                .dyn_into()
                .map_err(|_| "element is not a canvas")?;

            let (width, height) = size_canvas(&window, &canvas);
            let ctx: CanvasRenderingContext2d = canvas
                .get_context("2d")
                .map_err(|_| "2d context unavailable")?
                .ok_or("2d context unavailable")?
                .dyn_into()
                .map_err(|_| "2d context unavailable")?;
            let dpr = window.device_pixel_ratio();
            let _ = ctx.scale(dpr, dpr);

            let game = Game::new(width, height, LocalScoreStore);
            log::info!("engine mounted on #{canvas_id} ({width}x{height})");

            let app = Rc::new(RefCell::new(App {
                game,
                ctx,
                canvas: canvas.clone(),
                last_time: 0.0,
                running: false,
                raf_id: None,
            }));

            setup_input_handlers(&canvas, app.clone());

            Ok(Engine { app })
        }

        /// Begin (or resume) the animation loop.
        pub fn start(&self) {
            {
                let mut app = self.app.borrow_mut();
                if app.running {
                    return;
                }
                app.running = true;
                app.last_time = 0.0;
            }
            schedule_loop(self.app.clone());
        }

        /// Stop the loop and cancel the pending animation callback; no
        /// partial frame side effects persist.
        pub fn stop(&self) {
            let mut app = self.app.borrow_mut();
            app.running = false;
            if let Some(id) = app.raf_id.take() {
                if let Some(window) = web_sys::window() {
                    let _ = window.cancel_animation_frame(id);
                }
            }
            log::info!("engine stopped");
        }

        /// Current session snapshot as JSON, for an external HUD.
        pub fn state_json(&self) -> String {
            let app = self.app.borrow();
            serde_json::to_string(&app.game.snapshot()).unwrap_or_else(|_| "{}".into())
        }

        /// React to an externally driven resize of the canvas element.
        pub fn resize(&self) {
            let window = match web_sys::window() {
                Some(w) => w,
                None => return,
            };
            let mut app = self.app.borrow_mut();
            let canvas = app.canvas.clone();
            let (width, height) = size_canvas(&window, &canvas);
            let dpr = window.device_pixel_ratio();
            let _ = app.ctx.reset_transform();
            let _ = app.ctx.scale(dpr, dpr);
            app.game.resize(width, height);
        }
    }

    /// Resize the backing store to DPR-scaled client size. Returns the
    /// logical (CSS pixel) dimensions the simulation runs in.
    fn size_canvas(window: &web_sys::Window, canvas: &HtmlCanvasElement) -> (f32, f32) {
        let dpr = window.device_pixel_ratio();
        let client_w = canvas.client_width().max(1) as f64;
        let client_h = canvas.client_height().max(1) as f64;
        canvas.set_width((client_w * dpr) as u32);
        canvas.set_height((client_h * dpr) as u32);
        (client_w as f32, client_h as f32)
    }

    fn schedule_loop(app: Rc<RefCell<App>>) {
        let cb: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
        let cb_handle = cb.clone();

        *cb.borrow_mut() = Some(Closure::new(move |time: f64| {
            let mut a = app.borrow_mut();
            if !a.running {
                a.raf_id = None;
                return;
            }
            a.frame(time);

            if let Some(window) = web_sys::window() {
                if let Some(closure) = cb_handle.borrow().as_ref() {
                    if let Ok(id) =
                        window.request_animation_frame(closure.as_ref().unchecked_ref())
                    {
                        a.raf_id = Some(id);
                    }
                }
            }
        }));

        if let Some(window) = web_sys::window() {
            if let Some(closure) = cb.borrow().as_ref() {
                if let Ok(id) = window.request_animation_frame(closure.as_ref().unchecked_ref()) {
                    app.borrow_mut().raf_id = Some(id);
                }
            }
        }
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        // Pointer move writes only a paddle target, consumed next tick
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                app.borrow_mut()
                    .game
                    .set_pointer_x(event.offset_x() as f32);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch drag
        {
            let app = app.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let rect = canvas_clone.get_bounding_client_rect();
                    let x = touch.client_x() as f32 - rect.left() as f32;
                    app.borrow_mut().game.set_pointer_x(x);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Tap acts as both pointer placement and click
        {
            let app = app.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut a = app.borrow_mut();
                if let Some(touch) = event.touches().get(0) {
                    let rect = canvas_clone.get_bounding_client_rect();
                    let x = touch.client_x() as f32 - rect.left() as f32;
                    a.game.set_pointer_x(x);
                }
                a.game.click();
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Click starts/restarts a run
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                app.borrow_mut().game.click();
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Escape (or P) toggles pause
        {
            let app = app.clone();
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                match event.key().as_str() {
                    "Escape" | "p" | "P" => app.borrow_mut().game.press_pause(),
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    pub fn init() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);
        log::info!("Math Breaker wasm module loaded");
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::init();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless smoke run: drives the controller for a few simulated seconds
/// and prints the resulting session snapshot.
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use mathbreak::consts::{FIELD_HEIGHT, FIELD_WIDTH, SIM_DT};
    use mathbreak::game::Game;
    use mathbreak::platform::storage::MemoryScoreStore;

    env_logger::init();
    log::info!("Math Breaker (native) starting headless smoke run");

    let mut game = Game::new(FIELD_WIDTH, FIELD_HEIGHT, MemoryScoreStore::new());
    game.click();

    // ~30 simulated seconds with the paddle chasing the ball
    for _ in 0..(30.0 / SIM_DT) as u32 {
        let ball_x = game.level().ball.pos.x;
        game.set_pointer_x(ball_x);
        game.frame(SIM_DT);
    }

    let snap = game.snapshot();
    println!(
        "status={:?} level={} lives={} score={} high={}",
        snap.status, snap.current_level, snap.lives, snap.total_score, snap.high_score
    );
}
