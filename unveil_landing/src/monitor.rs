// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame-drop watchdog.

use alloc::rc::Rc;
use core::cell::RefCell;

use unveil_backend_web::{RafLoop, RafLoopHandle, dom};
use unveil_core::classes;
use unveil_core::frame_health::{FrameHealthConfig, FrameHealthMonitor, FrameTick};
use unveil_core::trace::{DegradeEvent, FrameWindowEvent};

use crate::page::Page;
use crate::reveal::Reveals;

/// Samples every animation frame until the drop rate trips, then degrades the
/// page once and stops sampling.
///
/// The loop owns `reveals` for the rest of the page's life.
pub(crate) fn install(page: &Rc<Page>, reveals: Rc<Reveals>) {
    let mut monitor = FrameHealthMonitor::new(FrameHealthConfig::for_settings(&page.settings));
    let handle: Rc<RefCell<Option<RafLoopHandle>>> = Rc::new(RefCell::new(None));

    let page_cb = Rc::clone(page);
    let handle_cb = Rc::clone(&handle);
    let raf = RafLoop::new(move |tick: FrameTick| {
        let windows = monitor.windows_evaluated();
        let tripped = monitor.sample(tick.now);
        if monitor.windows_evaluated() != windows
            && let Some(report) = monitor.last_window()
        {
            page_cb.trace(|t| t.frame_window(&FrameWindowEvent { report, at: tick.now }));
        }

        let Some(degradation) = tripped else {
            return;
        };
        if let Some(handle) = handle_cb.borrow().as_ref() {
            handle.stop();
        }
        dom::add_root_class(&page_cb.document, classes::PERFORMANCE_DEGRADED);
        let degraded_duration = page_cb.settings.degraded_duration;
        let shortened = reveals.degrade(degraded_duration);
        page_cb.trace(|t| {
            t.degrade(&DegradeEvent {
                drop_rate: degradation.window.drop_rate,
                shortened,
                degraded_duration,
                at: tick.now,
            });
        });
    });
    *handle.borrow_mut() = Some(raf.handle());
    raf.start();

    // Keep the RafLoop alive; there is no graceful shutdown on the web.
    core::mem::forget(raf);
}
