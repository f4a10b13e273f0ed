// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `setTimeout` / `setInterval` wrappers.
//!
//! Fire-once timers are not cancellable: every delayed effect in the page
//! (reveal completion, intro cues, digit rolls) runs to completion once
//! scheduled. [`Interval`] clears itself on drop.

use alloc::boxed::Box;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

use unveil_core::time::Duration;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = "setTimeout")]
    fn set_timeout(callback: &JsValue, ms: i32) -> i32;

    #[wasm_bindgen(js_name = "setInterval")]
    fn set_interval(callback: &JsValue, ms: i32) -> i32;

    #[wasm_bindgen(js_name = "clearInterval")]
    fn clear_interval(id: i32);
}

/// Runs `f` once after `delay`.
pub fn after(delay: Duration, f: impl FnOnce() + 'static) {
    let callback = Closure::once_into_js(f);
    set_timeout(&callback, delay.as_timeout_ms());
}

/// A repeating timer, cleared when dropped.
pub struct Interval {
    id: i32,
    _closure: Closure<dyn FnMut()>,
}

impl Interval {
    /// Calls `f` every `period` until the returned value is dropped.
    pub fn new(period: Duration, f: impl FnMut() + 'static) -> Self {
        let closure = Closure::wrap(Box::new(f) as Box<dyn FnMut()>);
        let id = set_interval(closure.as_ref().unchecked_ref(), period.as_timeout_ms());
        Self {
            id,
            _closure: closure,
        }
    }
}

impl Drop for Interval {
    fn drop(&mut self) {
        clear_interval(self.id);
    }
}

impl core::fmt::Debug for Interval {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Interval").field("id", &self.id).finish_non_exhaustive()
    }
}
