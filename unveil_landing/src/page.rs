// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! State shared by every component of the page.

use alloc::boxed::Box;
use core::cell::RefCell;

use wasm_bindgen::JsCast as _;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::{Document, Event, EventTarget, Window};

use unveil_backend_web::ConsoleSink;
use unveil_core::profile::PerformanceProfile;
use unveil_core::trace::Tracer;
use unveil_core::tuning::{self, AnimationSettings};

/// The probed device and the settings resolved from it, plus diagnostics.
pub(crate) struct Page {
    pub(crate) window: Window,
    pub(crate) document: Document,
    pub(crate) profile: PerformanceProfile,
    pub(crate) settings: AnimationSettings,
    sink: RefCell<ConsoleSink>,
}

impl Page {
    pub(crate) fn new(window: Window, document: Document, profile: PerformanceProfile) -> Self {
        Self {
            window,
            document,
            settings: tuning::resolve(&profile),
            profile,
            sink: RefCell::new(ConsoleSink { reveals: false }),
        }
    }

    /// Runs `f` with a tracer on the console sink.
    ///
    /// Nested calls are dropped rather than panicking on the borrow.
    pub(crate) fn trace(&self, f: impl FnOnce(&mut Tracer<'_>)) {
        if let Ok(mut sink) = self.sink.try_borrow_mut() {
            let mut tracer = Tracer::new(&mut *sink);
            f(&mut tracer);
        }
    }

    /// Current vertical scroll offset.
    pub(crate) fn scroll_y(&self) -> f64 {
        self.window.scroll_y().unwrap_or(0.0)
    }
}

fn ready_state(document: &Document) -> Option<alloc::string::String> {
    js_sys::Reflect::get(document, &JsValue::from_str("readyState"))
        .ok()?
        .as_string()
}

/// Runs `f` once the document has been parsed.
pub(crate) fn when_ready(document: &Document, f: impl FnOnce() + 'static) {
    if ready_state(document).as_deref() == Some("loading") {
        let callback = Closure::once_into_js(f);
        let _ = document
            .add_event_listener_with_callback("DOMContentLoaded", callback.unchecked_ref());
    } else {
        f();
    }
}

/// Runs `f` once the page and its subresources have loaded.
pub(crate) fn when_loaded(window: &Window, document: &Document, f: impl FnOnce() + 'static) {
    if ready_state(document).as_deref() == Some("complete") {
        f();
    } else {
        let callback = Closure::once_into_js(f);
        let _ = window.add_event_listener_with_callback("load", callback.unchecked_ref());
    }
}

/// Adds an event listener that lives as long as the page.
pub(crate) fn listen(target: &EventTarget, event: &str, f: impl FnMut(Event) + 'static) {
    let callback = Closure::wrap(Box::new(f) as Box<dyn FnMut(Event)>);
    let _ = target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref());
    callback.forget();
}
