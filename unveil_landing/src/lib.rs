// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Landing page bootstrap.
//!
//! Probes the device once, resolves the animation settings and hands them to
//! every component:
//!
//! - at `DOMContentLoaded`: pre-hide the revealable elements, register the
//!   reveal categories, start the intro, the header reactor, the marquee and
//!   the lead form;
//! - at `load`: subscribe the reveals to the viewport and start the
//!   frame-health monitor.
//!
//! Build with:
//!
//! ```sh
//! wasm-pack build --target web unveil_landing
//! ```

#![no_std]
#![cfg_attr(
    not(target_arch = "wasm32"),
    allow(dead_code, reason = "this crate only runs in the browser")
)]

extern crate alloc;

mod counter;
mod form;
mod header;
mod intro;
mod marquee;
mod monitor;
mod page;
mod reveal;

use alloc::rc::Rc;

use wasm_bindgen::prelude::*;

use unveil_backend_web::{dom, probe};
use unveil_core::classes::{self, selector};
use unveil_core::profile::{PerformanceProfile, ScoringPolicy};
use unveil_core::trace::ProfileEvent;

use crate::page::Page;

/// Runs when the module is instantiated.
#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let window = web_sys::window().expect("no global window");
    let document = window.document().expect("no document");

    let profile = PerformanceProfile::from_signals(&probe(), &ScoringPolicy::standard());
    let page = Rc::new(Page::new(window, document, profile));
    page.trace(|t| {
        t.profile(&ProfileEvent {
            level: profile.level,
            score: profile.score,
            reduced_motion: profile.reduced_motion,
            platform_quirk: profile.platform_quirk,
        });
    });

    dom::add_root_class(&page.document, profile.level.class_name());
    if profile.reduced_motion {
        dom::add_root_class(&page.document, classes::REDUCED_MOTION);
    }
    for class in page.settings.effects.class_names() {
        dom::add_root_class(&page.document, class);
    }

    let ready = Rc::clone(&page);
    page::when_ready(&page.document, move || {
        for el in dom::query_all(&ready.document, selector::PRE_HIDDEN) {
            dom::set_style(&el, "visibility", "hidden");
            dom::set_style(&el, "opacity", "0");
        }
        let reveals = reveal::register(&ready);
        intro::start(&ready);
        header::install(&ready);
        marquee::install(&ready);
        form::install(&ready);

        let loaded = Rc::clone(&ready);
        page::when_loaded(&ready.window, &ready.document, move || {
            reveal::observe(&reveals);
            monitor::install(&loaded, reveals);
        });
    });

    Ok(())
}
