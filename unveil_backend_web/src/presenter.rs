// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM reveal presenter.
//!
//! Mirrors [`RevealTracker`] state onto elements by applying the incremental
//! [`RevealChanges`]: registration writes the pre-animation pose, a reveal
//! clears it and adds `is-visible` on the next animation frame, completion
//! adds `animation-completed`. Elements that have left the document are
//! skipped.
//!
//! After [`DomPresenter::degrade`] every later reveal uses the degraded
//! duration, including reveals already waiting for their frame.
//!
//! [`RevealTracker`]: unveil_core::reveal::RevealTracker
//! [`RevealChanges`]: unveil_core::reveal::RevealChanges

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::cell::Cell;

use unveil_core::backend::Presenter;
use unveil_core::classes;
use unveil_core::reveal::{Entrance, RevealChanges, RevealTracker, TrackedId};
use unveil_core::time::Duration;
use unveil_core::tuning::AnimationSettings;
use web_sys::HtmlElement;

use crate::dom;
use crate::raf::request_frame;

/// Maps [`TrackedId`]s to live DOM elements.
pub struct DomPresenter {
    elements: Vec<Option<HtmlElement>>,
    /// Read by pending frame callbacks, so a degrade reaches them too.
    duration: Rc<Cell<Duration>>,
}

impl core::fmt::Debug for DomPresenter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DomPresenter")
            .field("elements_len", &self.elements.len())
            .field("duration", &self.duration.get())
            .finish_non_exhaustive()
    }
}

impl DomPresenter {
    /// Creates a presenter using the entrance duration from `settings`.
    #[must_use]
    pub fn new(settings: &AnimationSettings) -> Self {
        Self {
            elements: Vec::new(),
            duration: Rc::new(Cell::new(settings.duration)),
        }
    }

    /// Associates `el` with a tracked id. Call before applying the
    /// registration changes for `id`.
    pub fn bind(&mut self, id: TrackedId, el: HtmlElement) {
        let slot = id.index() as usize;
        if self.elements.len() <= slot {
            self.elements.resize_with(slot + 1, || None);
        }
        self.elements[slot] = Some(el);
    }

    /// Returns the element bound to `id`, if it is still in the document.
    #[must_use]
    pub fn get_element(&self, id: TrackedId) -> Option<&HtmlElement> {
        self.elements
            .get(id.index() as usize)
            .and_then(|slot| slot.as_ref())
            .filter(|el| el.is_connected())
    }

    /// Transition duration written by the next reveal.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration.get()
    }

    /// Switches every later reveal to `duration` and shortens the transition
    /// of each element in `ids`, the ones currently animating.
    ///
    /// Returns how many elements were updated.
    pub fn degrade(
        &mut self,
        ids: impl IntoIterator<Item = TrackedId>,
        duration: Duration,
    ) -> u32 {
        self.duration.set(duration);
        let css = duration.css();
        let mut count = 0;
        for id in ids {
            if let Some(el) = self.get_element(id) {
                dom::set_style(el, "transition-duration", &css);
                count += 1;
            }
        }
        count
    }
}

impl Presenter for DomPresenter {
    fn apply(&mut self, tracker: &RevealTracker, changes: &RevealChanges) {
        // 1. Pre-animation poses
        for &id in &changes.registered {
            if let (Some(el), Some(category)) = (self.get_element(id), tracker.category(id)) {
                for (property, value) in pose_properties(category.entrance()) {
                    dom::set_style(el, property, &value);
                }
            }
        }

        // 2. Reveals, on the next frame so the pose has been painted
        for t in &changes.revealed {
            let Some(el) = self.get_element(t.id).cloned() else {
                continue;
            };
            let duration = Rc::clone(&self.duration);
            let delay = t.delay;
            request_frame(move |_| {
                for property in POSE_PROPERTIES {
                    dom::clear_style(&el, property);
                }
                for (property, value) in &reveal_properties(duration.get(), delay) {
                    dom::set_style(&el, property, value);
                }
                dom::add_class(&el, classes::IS_VISIBLE);
            });
        }

        // 3. Completions
        for &id in &changes.completed {
            if let Some(el) = self.get_element(id) {
                dom::add_class(el, classes::ANIMATION_COMPLETED);
            }
        }
    }
}

/// Inline properties owned by the pre-animation pose.
const POSE_PROPERTIES: [&str; 3] = ["visibility", "opacity", "transform"];

/// Inline declarations of the pre-animation pose.
fn pose_properties(entrance: Entrance) -> Vec<(&'static str, String)> {
    let mut out = vec![
        ("visibility", String::from("hidden")),
        ("opacity", String::from("0")),
    ];
    if let Some(transform) = entrance.initial_transform() {
        out.push(("transform", transform));
    }
    out
}

/// Inline declarations written when an element is revealed.
fn reveal_properties(duration: Duration, delay: Duration) -> Vec<(&'static str, String)> {
    let mut out = vec![("transition-duration", duration.css())];
    if delay > Duration::ZERO {
        out.push(("transition-delay", delay.css()));
    }
    out
}
