#![forbid(unsafe_code)]

//! `wasm-bindgen` exports for the pager.
//!
//! This module wraps [`super::runner_core::RunnerCore`] with JS-friendly types.
//! Only compiled on `wasm32` targets.

use js_sys::{Array, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use super::runner_core::RunnerCore;

fn console_error(msg: &str) {
    let global = js_sys::global();
    let Ok(console) = Reflect::get(&global, &"console".into()) else {
        return;
    };
    let Ok(error) = Reflect::get(&console, &"error".into()) else {
        return;
    };
    let Ok(error_fn) = error.dyn_into::<js_sys::Function>() else {
        return;
    };
    let _ = error_fn.call1(&console, &JsValue::from_str(msg));
}

fn install_panic_hook() {
    use std::sync::Once;

    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        std::panic::set_hook(Box::new(|info| {
            let msg = if let Some(loc) = info.location() {
                format!(
                    "panic at {}:{}:{}: {info}",
                    loc.file(),
                    loc.line(),
                    loc.column()
                )
            } else {
                format!("panic: {info}")
            };
            console_error(&msg);
        }));
    });
}

/// `window.innerHeight`, or `None` outside a window (workers, SSR shims).
fn window_inner_height() -> Option<f64> {
    let global = js_sys::global();
    Reflect::get(&global, &"innerHeight".into())
        .ok()
        .and_then(|v| v.as_f64())
}

/// Scroll pager bound to the page's wheel listener.
///
/// Host-driven: the page script forwards `wheel` events (calling
/// `preventDefault` when told to) and advances time from
/// `requestAnimationFrame`, applying `offset()` as a vertical translation and
/// rescheduling while `wantsFrame()` holds.
#[wasm_bindgen]
pub struct FolioPager {
    inner: RunnerCore,
}

#[wasm_bindgen(start)]
pub fn wasm_start() {
    install_panic_hook();
}

#[wasm_bindgen]
impl FolioPager {
    /// Mount a pager over the given section ids.
    #[wasm_bindgen(constructor)]
    pub fn new(sections: Vec<String>) -> Result<FolioPager, JsValue> {
        install_panic_hook();
        RunnerCore::new(sections)
            .map(|inner| Self { inner })
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Re-read the viewport height from `window.innerHeight`.
    fn sync_viewport(&mut self) {
        self.inner
            .set_viewport_height(window_inner_height().unwrap_or(0.0));
    }

    /// Forward a wheel event's `deltaY`. Returns whether to `preventDefault`.
    pub fn wheel(&mut self, dy: f64) -> bool {
        self.sync_viewport();
        self.inner.wheel(dy)
    }

    /// Forward a JSON-encoded input. Returns whether to `preventDefault`.
    #[cfg(feature = "input-parser")]
    #[wasm_bindgen(js_name = pushEncodedInput)]
    pub fn push_encoded_input(&mut self, json: &str) -> bool {
        self.sync_viewport();
        self.inner.push_encoded_input(json)
    }

    /// Advance the frame clock by `dt_ms` milliseconds.
    #[wasm_bindgen(js_name = advanceTime)]
    pub fn advance_time(&mut self, dt_ms: f64) {
        self.inner.advance_time_ms(dt_ms);
    }

    /// Navigate to a section index (clamped). Returns the resulting index.
    #[wasm_bindgen(js_name = requestPage)]
    pub fn request_page(&mut self, index: i32) -> u32 {
        self.sync_viewport();
        self.inner.request_page(i64::from(index)) as u32
    }

    /// Advance one section (the "scroll down" arrow).
    #[wasm_bindgen(js_name = nextPage)]
    pub fn next_page(&mut self) -> u32 {
        self.sync_viewport();
        self.inner.next_page() as u32
    }

    /// Live vertical offset in pixels.
    pub fn offset(&self) -> f64 {
        self.inner.offset()
    }

    /// Current section index.
    #[wasm_bindgen(js_name = currentIndex)]
    pub fn current_index(&self) -> u32 {
        self.inner.current_index() as u32
    }

    /// Current section id.
    #[wasm_bindgen(js_name = currentSection)]
    pub fn current_section(&self) -> String {
        self.inner.current_section()
    }

    /// Whether a transition is in flight (keep requesting frames while true).
    #[wasm_bindgen(js_name = isAnimating)]
    pub fn is_animating(&self) -> bool {
        self.inner.is_animating()
    }

    /// Whether the `requestAnimationFrame` loop should schedule another
    /// frame. Turns `false` for good once the pager is unmounted.
    #[wasm_bindgen(js_name = wantsFrame)]
    pub fn wants_frame(&self) -> bool {
        self.inner.wants_frame()
    }

    /// Stop animating and release the wheel listener.
    pub fn unmount(&mut self) -> bool {
        self.inner.unmount()
    }

    /// Drain accumulated log lines. Returns `Array<string>`.
    #[wasm_bindgen(js_name = takeLogs)]
    pub fn take_logs(&mut self) -> Array {
        let logs = self.inner.take_logs();
        let arr = Array::new();
        for log in logs {
            arr.push(&JsValue::from_str(&log));
        }
        arr
    }

    /// State summary as a JSON string.
    pub fn snapshot(&self) -> String {
        self.inner.snapshot_json()
    }
}
