//! Scoped browser timers. Each handle owns its JS callback and releases the
//! underlying `setInterval` / `setTimeout` registration when dropped.

use std::cell::Cell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::window;

fn ms(period_ms: u32) -> i32 {
    i32::try_from(period_ms).unwrap_or(i32::MAX)
}

/// Repeating timer.
pub struct Interval {
    handle: i32,
    cleared: Cell<bool>,
    _callback: Closure<dyn FnMut()>,
}

impl Interval {
    pub fn new(period_ms: u32, f: impl FnMut() + 'static) -> Result<Self, JsValue> {
        if period_ms == 0 {
            return Err(JsValue::from_str("interval period must be positive"));
        }
        let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
        let callback = Closure::wrap(Box::new(f) as Box<dyn FnMut()>);
        let handle = win.set_interval_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            ms(period_ms),
        )?;
        Ok(Self { handle, cleared: Cell::new(false), _callback: callback })
    }

    /// Stop the interval. Safe to call from inside its own callback and
    /// more than once; the browser registration is cleared exactly once.
    pub fn cancel(&self) {
        if self.cleared.replace(true) {
            return;
        }
        if let Some(w) = window() {
            w.clear_interval_with_handle(self.handle);
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cleared.get()
    }
}

impl Drop for Interval {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// One-shot timer. Dropping it before it fires cancels it.
pub struct Timeout {
    handle: i32,
    fired: Rc<Cell<bool>>,
    _callback: Closure<dyn FnMut()>,
}

impl Timeout {
    pub fn new(delay_ms: u32, f: impl FnOnce() + 'static) -> Result<Self, JsValue> {
        let win = window().ok_or_else(|| JsValue::from_str("no window"))?;
        let fired = Rc::new(Cell::new(false));
        let flag = fired.clone();
        let mut once = Some(f);
        let callback = Closure::wrap(Box::new(move || {
            flag.set(true);
            if let Some(f) = once.take() {
                f();
            }
        }) as Box<dyn FnMut()>);
        let handle = win.set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.as_ref().unchecked_ref(),
            ms(delay_ms),
        )?;
        Ok(Self { handle, fired, _callback: callback })
    }

    pub fn has_fired(&self) -> bool {
        self.fired.get()
    }
}

impl Drop for Timeout {
    fn drop(&mut self) {
        if self.fired.get() {
            return;
        }
        if let Some(w) = window() {
            w.clear_timeout_with_handle(self.handle);
        }
    }
}
