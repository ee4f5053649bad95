// Small browser helpers shared by the scenes.
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

/// Milliseconds from the page's monotonic clock, falling back to wall time.
pub fn now_ms() -> f64 {
    web_sys::window()
        .and_then(|w| w.performance())
        .map(|p| p.now())
        .unwrap_or_else(js_sys::Date::now)
}

/// A `setTimeout` that is cleared when dropped, so a scene that unmounts
/// never sees its callback fire.
pub struct Timeout {
    id: Option<i32>,
    _callback: Closure<dyn FnMut()>,
}

impl Timeout {
    pub fn new(ms: u32, f: impl FnOnce() + 'static) -> Self {
        let mut f = Some(f);
        let callback = Closure::wrap(Box::new(move || {
            if let Some(f) = f.take() {
                f();
            }
        }) as Box<dyn FnMut()>);
        let id = web_sys::window().and_then(|w| {
            w.set_timeout_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                ms as i32,
            )
            .ok()
        });
        Self { id, _callback: callback }
    }
}

impl Drop for Timeout {
    fn drop(&mut self) {
        if let (Some(id), Some(win)) = (self.id.take(), web_sys::window()) {
            win.clear_timeout_with_handle(id);
        }
    }
}

/// `setInterval` counterpart of [`Timeout`].
pub struct Interval {
    id: Option<i32>,
    _callback: Closure<dyn FnMut()>,
}

impl Interval {
    pub fn new(ms: u32, f: impl FnMut() + 'static) -> Self {
        let callback = Closure::wrap(Box::new(f) as Box<dyn FnMut()>);
        let id = web_sys::window().and_then(|w| {
            w.set_interval_with_callback_and_timeout_and_arguments_0(
                callback.as_ref().unchecked_ref(),
                ms as i32,
            )
            .ok()
        });
        Self { id, _callback: callback }
    }

    /// Stops further ticks. Safe to call from inside the tick itself, since the
    /// callback stays alive until the `Interval` is dropped.
    pub fn cancel(&mut self) {
        if let (Some(id), Some(win)) = (self.id.take(), web_sys::window()) {
            win.clear_interval_with_handle(id);
        }
    }
}

impl Drop for Interval {
    fn drop(&mut self) {
        self.cancel();
    }
}

type FrameCell = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// requestAnimationFrame loop. `tick` runs once per display refresh and
/// returns whether it wants another frame. Dropping the loop cancels it.
pub struct FrameLoop {
    raf_id: Rc<Cell<Option<i32>>>,
    closure: FrameCell,
}

impl FrameLoop {
    pub fn start(mut tick: impl FnMut() -> bool + 'static) -> Self {
        let raf_id = Rc::new(Cell::new(None));
        let closure: FrameCell = Rc::new(RefCell::new(None));
        let raf_id_loop = raf_id.clone();
        let closure_loop = closure.clone();
        *closure.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            raf_id_loop.set(None);
            if !tick() {
                return;
            }
            if let (Some(win), Some(cb)) = (web_sys::window(), closure_loop.borrow().as_ref()) {
                if let Ok(id) = win.request_animation_frame(cb.as_ref().unchecked_ref()) {
                    raf_id_loop.set(Some(id));
                }
            }
        }) as Box<dyn FnMut()>));
        if let (Some(win), Some(cb)) = (web_sys::window(), closure.borrow().as_ref()) {
            if let Ok(id) = win.request_animation_frame(cb.as_ref().unchecked_ref()) {
                raf_id.set(Some(id));
            }
        }
        Self { raf_id, closure }
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        if let (Some(id), Some(win)) = (self.raf_id.take(), web_sys::window()) {
            let _ = win.cancel_animation_frame(id);
        }
        // breaks the closure's reference to its own cell
        self.closure.borrow_mut().take();
    }
}

/// Converts a client position into percent-of-element coordinates.
pub fn percent_in_rect(client_x: f64, client_y: f64, rect: &web_sys::DomRect) -> (f64, f64) {
    let w = rect.width().max(1.0);
    let h = rect.height().max(1.0);
    (
        ((client_x - rect.left()) / w * 100.0).clamp(0.0, 100.0),
        ((client_y - rect.top()) / h * 100.0).clamp(0.0, 100.0),
    )
}
