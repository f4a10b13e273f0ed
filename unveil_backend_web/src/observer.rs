// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! First-crossing viewport subscriptions.
//!
//! [`ViewportObserver::observe`] registers a one-shot callback that runs the
//! first time an element crosses its threshold, after which the element is
//! unobserved. Two strategies sit behind the same interface:
//!
//! - **Native**: one `IntersectionObserver` per distinct [`ObserveOptions`].
//!   Entries are matched to subscriptions through a data attribute on the
//!   element.
//! - **Polling**: when `IntersectionObserver` is unavailable, scroll and
//!   resize events schedule a single animation-frame poll that tests every
//!   pending element with [`ObserveOptions::crossed`].
//!
//! A subscription is removed from the table *before* its callback runs, so a
//! callback that observes more elements never sees a borrowed table.

use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::rc::{Rc, Weak};
use alloc::string::ToString as _;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};

use kurbo::Rect;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{
    Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit,
};

use unveil_core::reveal::ObserveOptions;

use crate::dom;
use crate::raf::request_frame;

const KEY_ATTR: &str = "data-unveil-observe";

/// Native ratios can land just under the requested threshold.
const RATIO_SLACK: f64 = 1e-3;

type EntriesClosure = Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>;

struct NativeObserver {
    options: ObserveOptions,
    observer: IntersectionObserver,
    _callback: EntriesClosure,
}

struct Subscription {
    element: HtmlElement,
    options: ObserveOptions,
    on_crossed: Box<dyn FnOnce()>,
}

struct Inner {
    native: bool,
    natives: RefCell<Vec<NativeObserver>>,
    subscriptions: RefCell<BTreeMap<u32, Subscription>>,
    next_key: Cell<u32>,
    poll_pending: Cell<bool>,
    listener: RefCell<Option<Closure<dyn FnMut()>>>,
}

/// One-shot viewport crossing subscriptions.
#[derive(Clone)]
pub struct ViewportObserver {
    inner: Rc<Inner>,
}

impl core::fmt::Debug for ViewportObserver {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ViewportObserver")
            .field("native", &self.inner.native)
            .field("pending", &self.pending())
            .finish_non_exhaustive()
    }
}

impl ViewportObserver {
    /// Creates an observer, using `IntersectionObserver` when the browser
    /// has it.
    #[must_use]
    pub fn new() -> Self {
        let native = dom::window().is_some_and(|win| {
            js_sys::Reflect::has(&win, &JsValue::from_str("IntersectionObserver"))
                .unwrap_or(false)
        });
        Self::with_strategy(native)
    }

    fn with_strategy(native: bool) -> Self {
        Self {
            inner: Rc::new(Inner {
                native,
                natives: RefCell::new(Vec::new()),
                subscriptions: RefCell::new(BTreeMap::new()),
                next_key: Cell::new(0),
                poll_pending: Cell::new(false),
                listener: RefCell::new(None),
            }),
        }
    }

    /// Whether the native observer is in use.
    #[must_use]
    pub fn is_native(&self) -> bool {
        self.inner.native
    }

    /// Number of elements still waiting for their first crossing.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.inner.subscriptions.borrow().len()
    }

    /// Runs `on_crossed` once, the first time `element` crosses `options`.
    pub fn observe(
        &self,
        element: &HtmlElement,
        options: ObserveOptions,
        on_crossed: impl FnOnce() + 'static,
    ) {
        let key = self.inner.next_key.get();
        self.inner.next_key.set(key.wrapping_add(1));
        let _ = element.set_attribute(KEY_ATTR, &key.to_string());
        self.inner.subscriptions.borrow_mut().insert(
            key,
            Subscription {
                element: element.clone(),
                options,
                on_crossed: Box::new(on_crossed),
            },
        );

        if self.inner.native
            && let Some(observer) = native_for(&self.inner, options)
        {
            observer.observe(element);
        } else {
            ensure_listener(&self.inner);
            schedule_poll(&self.inner);
        }
    }
}

impl Default for ViewportObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Inner {
    /// Removes and returns the subscription attached to `target`.
    fn take(&self, target: &Element) -> Option<Subscription> {
        let key: u32 = target.get_attribute(KEY_ATTR)?.parse().ok()?;
        let _ = target.remove_attribute(KEY_ATTR);
        self.subscriptions.borrow_mut().remove(&key)
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        for native in self.natives.get_mut().drain(..) {
            native.observer.disconnect();
        }
        if let Some(listener) = self.listener.get_mut().take()
            && let Some(win) = dom::window()
        {
            for event in ["scroll", "resize"] {
                let _ = win.remove_event_listener_with_callback(
                    event,
                    listener.as_ref().unchecked_ref(),
                );
            }
        }
    }
}

/// Returns the native observer for `options`, creating it on first use.
fn native_for(inner: &Rc<Inner>, options: ObserveOptions) -> Option<IntersectionObserver> {
    if let Some(existing) = inner.natives.borrow().iter().find(|n| n.options == options) {
        return Some(existing.observer.clone());
    }

    let weak: Weak<Inner> = Rc::downgrade(inner);
    let callback: EntriesClosure = Closure::wrap(Box::new(
        move |entries: js_sys::Array, observer: IntersectionObserver| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            for value in entries.iter() {
                let entry: IntersectionObserverEntry = value.unchecked_into();
                if !entry.is_intersecting()
                    || entry.intersection_ratio() + RATIO_SLACK < required_ratio(&entry, options)
                {
                    continue;
                }
                let target = entry.target();
                observer.unobserve(&target);
                if let Some(sub) = inner.take(&target) {
                    (sub.on_crossed)();
                }
            }
        },
    )
        as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(options.threshold));
    init.set_root_margin(&options.root_margin());
    let observer =
        IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init).ok()?;

    inner.natives.borrow_mut().push(NativeObserver {
        options,
        observer: observer.clone(),
        _callback: callback,
    });
    Some(observer)
}

/// The ratio `entry` must reach, relaxed for elements taller than the root
/// can show at `options.threshold`.
fn required_ratio(entry: &IntersectionObserverEntry, options: ObserveOptions) -> f64 {
    let Some(root) = entry.root_bounds() else {
        return options.threshold;
    };
    options.required_ratio(entry.bounding_client_rect().height(), root.height())
}

fn ensure_listener(inner: &Rc<Inner>) {
    if inner.listener.borrow().is_some() {
        return;
    }
    let Some(win) = dom::window() else {
        return;
    };
    let weak = Rc::downgrade(inner);
    let listener = Closure::wrap(Box::new(move || {
        if let Some(inner) = weak.upgrade() {
            schedule_poll(&inner);
        }
    }) as Box<dyn FnMut()>);
    for event in ["scroll", "resize"] {
        let _ = win.add_event_listener_with_callback(event, listener.as_ref().unchecked_ref());
    }
    *inner.listener.borrow_mut() = Some(listener);
}

/// Coalesces poll requests to one per animation frame.
fn schedule_poll(inner: &Rc<Inner>) {
    if inner.poll_pending.replace(true) {
        return;
    }
    let weak = Rc::downgrade(inner);
    request_frame(move |_| {
        if let Some(inner) = weak.upgrade() {
            poll(&inner);
        }
    });
}

fn poll(inner: &Rc<Inner>) {
    inner.poll_pending.set(false);
    let Some(win) = dom::window() else {
        return;
    };
    let width = win.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let height = win.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let viewport = Rect::new(0.0, 0.0, width, height);

    let crossed: Vec<u32> = inner
        .subscriptions
        .borrow()
        .iter()
        .filter(|(_, sub)| {
            let r = sub.element.get_bounding_client_rect();
            let rect = Rect::new(r.x(), r.y(), r.x() + r.width(), r.y() + r.height());
            sub.options.crossed(rect, viewport)
        })
        .map(|(key, _)| *key)
        .collect();

    for key in crossed {
        let sub = inner.subscriptions.borrow_mut().remove(&key);
        if let Some(sub) = sub {
            let _ = sub.element.remove_attribute(KEY_ATTR);
            (sub.on_crossed)();
        }
    }
}
