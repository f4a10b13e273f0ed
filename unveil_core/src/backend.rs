// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend contract for platform integrations.
//!
//! The engine splits platform-specific work into *backend* crates. A backend
//! provides:
//!
//! - **Time**: a `now() -> HostTime` free function reading the platform's
//!   monotonic clock.
//!
//! - **Tick source**: produces [`FrameTick`] values for the frame-health
//!   monitor (e.g. `requestAnimationFrame`). Not abstracted by a trait because
//!   setup and lifecycle are platform specific.
//!
//! - **Viewport observation**: reports the first threshold crossing of each
//!   registered element to [`RevealTracker::on_crossing`].
//!
//! - **Presenter**: implements the [`Presenter`] trait to mirror reveal state
//!   changes onto the platform's element tree.
//!
//! # Crate boundaries
//!
//! `unveil_core` owns the state machines, policies and this contract module.
//! Backend crates depend on `unveil_core` and provide platform glue. The page
//! crate depends on both and wires them together.
//!
//! [`FrameTick`]: crate::frame_health::FrameTick
//! [`RevealTracker::on_crossing`]: crate::reveal::RevealTracker::on_crossing

use crate::reveal::{RevealChanges, RevealTracker};

/// Applies reveal state changes to a platform-native element tree.
///
/// The DOM presenter implements this trait; tests use recording doubles.
///
/// # Reveal loop pseudocode
///
/// ```rust,ignore
/// fn on_crossed(id: TrackedId) {
///     if let Some(t) = tracker.on_crossing(id, now()) {
///         timer::after(t.complete_after, move || {
///             tracker.complete(t.id);
///             let changes = tracker.take_changes();
///             presenter.apply(&tracker, &changes);
///         });
///     }
///     let changes = tracker.take_changes();
///     presenter.apply(&tracker, &changes);
/// }
/// ```
pub trait Presenter {
    /// Applies `changes`, reading categories and states from `tracker` as
    /// needed.
    fn apply(&mut self, tracker: &RevealTracker, changes: &RevealChanges);
}
