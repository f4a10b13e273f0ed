// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Evidence carousel.
//!
//! The primary track is deep-cloned next to itself. The clone is taken out of
//! flow at the container's origin so both offsets share one coordinate space.

use alloc::rc::Rc;
use core::cell::RefCell;

use wasm_bindgen::JsCast as _;
use web_sys::{Event, HtmlElement};

use unveil_backend_web::timer::Interval;
use unveil_backend_web::{dom, now};
use unveil_core::classes::{self, selector};
use unveil_core::marquee::{self, Marquee, MarqueeConfig, MarqueeOffsets};
use unveil_core::trace::{MarqueeAction, MarqueeEvent};

use crate::page::{self, Page};

struct Tracks {
    page: Rc<Page>,
    marquee: RefCell<Marquee>,
    primary: HtmlElement,
    clone: HtmlElement,
    interval: RefCell<Option<Interval>>,
}

impl Tracks {
    fn write(&self, offsets: MarqueeOffsets) {
        dom::set_style(&self.primary, "transform", &marquee::translate_x_css(offsets.primary));
        dom::set_style(&self.clone, "transform", &marquee::translate_x_css(offsets.clone));
    }

    fn trace(&self, action: MarqueeAction) {
        let wraps = self.marquee.borrow().wraps();
        self.page.trace(|t| {
            t.marquee(&MarqueeEvent {
                action,
                wraps,
                at: now(),
            });
        });
    }
}

/// Starts the marquee, unless the user prefers reduced motion or the page
/// has no track.
pub(crate) fn install(page: &Rc<Page>) {
    if page.profile.reduced_motion {
        return;
    }
    let Some(container) = dom::query(&page.document, selector::MARQUEE) else {
        return;
    };
    let Some(primary) = dom::query_all_in(&container, selector::MARQUEE_TRACK)
        .into_iter()
        .next()
    else {
        return;
    };
    let Some(marquee) = Marquee::new(f64::from(primary.offset_width()), MarqueeConfig::standard())
    else {
        return;
    };
    let Some(clone) = clone_track(&primary) else {
        return;
    };
    dom::set_style(&container, "position", "relative");

    let tracks = Rc::new(Tracks {
        page: Rc::clone(page),
        marquee: RefCell::new(marquee),
        primary,
        clone,
        interval: RefCell::new(None),
    });
    tracks.write(tracks.marquee.borrow().offsets());
    arm(&tracks);
    tracks.trace(MarqueeAction::Started);

    let on_enter = Rc::clone(&tracks);
    page::listen(&container, "mouseenter", move |_event: Event| {
        on_enter.marquee.borrow_mut().pause();
        on_enter.interval.borrow_mut().take();
        on_enter.trace(MarqueeAction::Paused);
    });
    let on_leave = Rc::clone(&tracks);
    page::listen(&container, "mouseleave", move |_event: Event| {
        on_leave.marquee.borrow_mut().resume();
        arm(&on_leave);
        on_leave.trace(MarqueeAction::Resumed);
    });

    // The track reflows with the viewport; restart from the new width.
    let on_resize = Rc::clone(&tracks);
    page::listen(&page.window, "resize", move |_event: Event| {
        let width = f64::from(on_resize.primary.offset_width());
        let offsets = {
            let mut marquee = on_resize.marquee.borrow_mut();
            if (marquee.width() - width).abs() < 0.5 {
                return;
            }
            marquee.resize(width);
            marquee.offsets()
        };
        on_resize.write(offsets);
    });
}

fn clone_track(primary: &HtmlElement) -> Option<HtmlElement> {
    let clone: HtmlElement = primary.clone_node_with_deep(true).ok()?.dyn_into().ok()?;
    dom::add_class(&clone, classes::MARQUEE_CLONE);
    let _ = clone.set_attribute("aria-hidden", "true");
    for (property, value) in [("position", "absolute"), ("top", "0"), ("left", "0")] {
        dom::set_style(&clone, property, value);
    }
    let parent = primary.parent_node()?;
    parent
        .insert_before(&clone, primary.next_sibling().as_ref())
        .ok()?;
    Some(clone)
}

/// Replaces the tick interval; dropping the old one clears it.
fn arm(tracks: &Rc<Tracks>) {
    let period = tracks.marquee.borrow().config().interval;
    let weak = Rc::downgrade(tracks);
    let interval = Interval::new(period, move || {
        let Some(tracks) = weak.upgrade() else {
            return;
        };
        let offsets = tracks.marquee.borrow_mut().tick();
        if let Some(offsets) = offsets {
            tracks.write(offsets);
        }
    });
    *tracks.interval.borrow_mut() = Some(interval);
}
