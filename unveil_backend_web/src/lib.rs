// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Web backend for unveil.
//!
//! This crate provides integration with browser APIs:
//!
//! - [`now`]: `performance.now()` as a [`HostTime`]
//! - [`RafLoop`]: `requestAnimationFrame` tick source for the frame-health
//!   monitor, plus one-shot [`request_frame`]
//! - [`timer`]: `setTimeout` / `setInterval` wrappers
//! - [`ViewportObserver`]: first-crossing subscriptions backed by
//!   `IntersectionObserver`, with a scroll-polling fallback
//! - [`DomPresenter`]: mirrors reveal state onto elements
//! - [`probe`]: reads the platform signals for device scoring
//! - [`ConsoleSink`]: trace events to the browser console
//! - [`dom`]: small query and class helpers

#![no_std]

extern crate alloc;

mod console;
pub mod dom;
mod observer;
mod presenter;
mod probe;
mod raf;
pub mod timer;

pub use console::ConsoleSink;
pub use observer::ViewportObserver;
pub use presenter::DomPresenter;
pub use probe::probe;
pub use raf::{RafLoop, RafLoopHandle, request_frame};
pub use unveil_core::backend::Presenter;

use unveil_core::time::HostTime;

/// Returns the current host time from `performance.now()`.
///
/// The returned [`HostTime`] is in microsecond ticks.
#[must_use]
pub fn now() -> HostTime {
    HostTime::from_millis_f64(raf::performance_now())
}
