//! Motes entry point
//!
//! Wires the DOM to the frame driver on the web; runs a headless smoke
//! pass natively.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::collections::HashMap;
    use std::rc::{Rc, Weak};

    use glam::Vec2;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, FocusEvent, HtmlCanvasElement, MouseEvent, PointerEvent, Window,
    };

    use motes::consts::RESIZE_DEBOUNCE_MS;
    use motes::driver::{Driver, FrameHandle, Scheduler, TimerHandle};
    use motes::renderer::canvas::{CanvasSurface, configure_backing};
    use motes::settings::{DemoKind, Overrides};
    use motes::sim::{SimState, Viewport};

    type App = Driver<WebScheduler>;

    /// [`Scheduler`] backed by `requestAnimationFrame` / `setTimeout`.
    /// Callbacks re-enter the driver through a weak handle so the driver
    /// can own its scheduler without a reference cycle keeping it alive.
    pub struct WebScheduler {
        app: Weak<RefCell<App>>,
        ctx: CanvasRenderingContext2d,
        next_handle: u64,
        /// Live requests, by our handle id -> browser id
        frames: HashMap<u64, i32>,
        timers: HashMap<u64, i32>,
    }

    impl WebScheduler {
        fn new(app: Weak<RefCell<App>>, ctx: CanvasRenderingContext2d) -> Self {
            Self {
                app,
                ctx,
                next_handle: 0,
                frames: HashMap::new(),
                timers: HashMap::new(),
            }
        }

        fn finish_frame(&mut self, handle: FrameHandle) {
            self.frames.remove(&handle.0);
        }

        fn finish_timer(&mut self, handle: TimerHandle) {
            self.timers.remove(&handle.0);
        }
    }

    impl Scheduler for WebScheduler {
        fn request_frame(&mut self) -> FrameHandle {
            self.next_handle += 1;
            let handle = FrameHandle(self.next_handle);

            let app = self.app.clone();
            let ctx = self.ctx.clone();
            let closure = Closure::once(move |_time: f64| {
                if let Some(app) = app.upgrade() {
                    let mut app = app.borrow_mut();
                    app.scheduler_mut().finish_frame(handle);
                    let mut surface = CanvasSurface::new(ctx);
                    app.on_frame(handle, &mut surface);
                }
            });

            let id = web_sys::window()
                .and_then(|w| {
                    w.request_animation_frame(closure.as_ref().unchecked_ref())
                        .ok()
                })
                .unwrap_or(0);
            self.frames.insert(handle.0, id);
            closure.forget();
            handle
        }

        fn cancel_frame(&mut self, handle: FrameHandle) {
            if let Some(id) = self.frames.remove(&handle.0) {
                if let Some(window) = web_sys::window() {
                    _ = window.cancel_animation_frame(id);
                }
            }
        }

        fn set_timeout(&mut self, delay_ms: u32) -> TimerHandle {
            self.next_handle += 1;
            let handle = TimerHandle(self.next_handle);

            let app = self.app.clone();
            let closure = Closure::once(move || {
                if let Some(app) = app.upgrade() {
                    let mut app = app.borrow_mut();
                    app.scheduler_mut().finish_timer(handle);
                    app.on_reset_timer(handle);
                }
            });

            let id = web_sys::window()
                .and_then(|w| {
                    w.set_timeout_with_callback_and_timeout_and_arguments_0(
                        closure.as_ref().unchecked_ref(),
                        delay_ms as i32,
                    )
                    .ok()
                })
                .unwrap_or(0);
            self.timers.insert(handle.0, id);
            closure.forget();
            handle
        }

        fn clear_timeout(&mut self, handle: TimerHandle) {
            if let Some(id) = self.timers.remove(&handle.0) {
                if let Some(window) = web_sys::window() {
                    window.clear_timeout_with_handle(id);
                }
            }
        }
    }

    fn read_viewport(window: &Window) -> Viewport {
        let width = window
            .inner_width()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0) as f32;
        let height = window
            .inner_height()
            .ok()
            .and_then(|v| v.as_f64())
            .unwrap_or(0.0) as f32;
        let dpr = window.device_pixel_ratio().max(1.0) as f32;
        Viewport::with_dpr(width, height, dpr)
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).ok();
        log::info!("motes starting");

        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        // Pages without a canvas just have no demo on them
        let Some(element) = document.query_selector("canvas").ok().flatten() else {
            log::warn!("no <canvas> element; nothing to animate");
            return;
        };
        let Ok(canvas) = element.dyn_into::<HtmlCanvasElement>() else {
            return;
        };
        let Some(ctx) = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
        else {
            log::error!("could not acquire a 2d context");
            return;
        };

        let demo = canvas
            .get_attribute("data-demo")
            .and_then(|s| DemoKind::from_str(&s))
            .unwrap_or_default();
        let mut config = demo.config();
        if let Some(json) = canvas.get_attribute("data-config") {
            match serde_json::from_str::<Overrides>(&json) {
                Ok(overrides) => overrides.apply(&mut config),
                Err(e) => log::warn!("ignoring bad data-config: {e}"),
            }
        }

        let seed = js_sys::Date::now() as u64;
        log::info!(
            "demo {:?}: {} circles, seed {}",
            demo,
            config.count,
            seed
        );

        let app: Rc<RefCell<App>> = Rc::new_cyclic(|weak| {
            RefCell::new(Driver::new(
                SimState::new(config, seed),
                WebScheduler::new(weak.clone(), ctx.clone()),
                RESIZE_DEBOUNCE_MS,
            ))
        });

        let viewport = read_viewport(&window);
        configure_backing(&canvas, &ctx, viewport);
        app.borrow_mut().start(viewport);

        wire_events(&window, &canvas, &ctx, app);
    }

    /// One forgotten closure per listener; the closures' strong refs keep
    /// the driver alive for the lifetime of the page.
    fn wire_events(
        window: &Window,
        canvas: &HtmlCanvasElement,
        ctx: &CanvasRenderingContext2d,
        app: Rc<RefCell<App>>,
    ) {
        // Resize: backing store immediately, store rebuild debounced
        {
            let app = app.clone();
            let canvas = canvas.clone();
            let ctx = ctx.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if let Some(window) = web_sys::window() {
                    let viewport = read_viewport(&window);
                    configure_backing(&canvas, &ctx, viewport);
                    app.borrow_mut().on_resize(viewport);
                }
            });
            _ = window
                .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Click anywhere: rebuild the whole store against fresh bounds
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                if let Some(window) = web_sys::window() {
                    app.borrow_mut().on_reset_request(read_viewport(&window));
                }
            });
            _ = window.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer position, canvas-relative
        {
            let app = app.clone();
            let canvas = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let rect = canvas.get_bounding_client_rect();
                let pos = Vec2::new(
                    event.client_x() as f32 - rect.left() as f32,
                    event.client_y() as f32 - rect.top() as f32,
                );
                app.borrow_mut().on_pointer_move(pos);
            });
            _ = window
                .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer left the window entirely (relatedTarget is null)
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                if event.related_target().is_none() {
                    app.borrow_mut().on_pointer_leave();
                }
            });
            _ = window
                .add_event_listener_with_callback("mouseout", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window lost focus
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: FocusEvent| {
                app.borrow_mut().on_pointer_leave();
            });
            _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_app::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use motes::settings::DemoKind;
    use motes::sim::{SimState, Viewport, tick};

    env_logger::init();
    log::info!("motes (native) starting...");
    log::info!("the demos are web pages - build with trunk/wasm-pack for the real thing");

    // Headless smoke run: drop the gravity demo for a few seconds of frames
    let viewport = Viewport::new(800.0, 600.0);
    let mut state = SimState::new(DemoKind::Gravity.config(), 42);
    state.reset(viewport);
    for _ in 0..300 {
        tick(&mut state);
    }

    let settled = state
        .circles
        .iter()
        .filter(|c| c.pos.y + c.radius <= viewport.height + c.vel.y.abs())
        .count();
    println!(
        "{} / {} balls near or above the floor after 300 frames",
        settled,
        state.circles.len()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
