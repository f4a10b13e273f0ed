// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hero intro: phones, price tags, counters, coins.
//!
//! Every cue is a fire-once timer. A cue schedules its follow-ups only when
//! the director accepts it, so the whole chain hangs off `Begin`.

use alloc::rc::Rc;
use core::cell::Cell;

use unveil_backend_web::{dom, now, timer};
use unveil_core::classes::{self, selector};
use unveil_core::digits::RollTimings;
use unveil_core::intro::{IntroCue, IntroDirector, IntroTimings};
use unveil_core::time::Duration;
use unveil_core::trace::IntroCueEvent;

use crate::counter;
use crate::page::Page;

struct Intro {
    page: Rc<Page>,
    director: Cell<IntroDirector>,
    timings: IntroTimings,
    roll: RollTimings,
}

/// Schedules the intro relative to now, paced for the device.
pub(crate) fn start(page: &Rc<Page>) {
    let intro = Rc::new(Intro {
        page: Rc::clone(page),
        director: Cell::new(IntroDirector::new()),
        timings: IntroTimings::for_settings(&page.settings),
        roll: RollTimings::for_settings(&page.settings),
    });
    for (cue, delay) in intro.timings.roots() {
        schedule(&intro, cue, delay);
    }
}

fn schedule(intro: &Rc<Intro>, cue: IntroCue, delay: Duration) {
    let intro = Rc::clone(intro);
    timer::after(delay, move || run(&intro, cue));
}

fn run(intro: &Rc<Intro>, cue: IntroCue) {
    let mut director = intro.director.get();
    let accepted = director.fire(cue);
    intro.director.set(director);

    let targets = if accepted { perform(intro, cue) } else { 0 };
    intro.page.trace(|t| {
        t.intro_cue(&IntroCueEvent {
            cue,
            stage: director.stage(),
            accepted,
            targets,
            at: now(),
        });
    });

    if accepted {
        for (next, delay) in intro.timings.follow_ups(cue) {
            schedule(intro, next, delay);
        }
    }
}

/// Applies the effects of `cue`; returns how many elements it touched.
fn perform(intro: &Intro, cue: IntroCue) -> u32 {
    let doc = &intro.page.document;
    let touched = match cue {
        IntroCue::Begin => add_to_first(intro, selector::PHONE_CONTAINER, classes::ANIMATE),
        IntroCue::FirstPhone => add_to_first(intro, selector::FIRST_PHONE, classes::SLIDE_ANIMATE),
        IntroCue::SecondPhone => {
            add_to_first(intro, selector::SECOND_PHONE, classes::SLIDE_ANIMATE)
        }
        IntroCue::PriceTags => add_to_all(intro, selector::PRICE_TAG, classes::ANIMATE),
        IntroCue::Counters => {
            let tags = dom::query_all(doc, selector::PRICE_TAG);
            for tag in &tags {
                counter::roll(&intro.page, tag, &intro.roll);
            }
            tags.len()
        }
        IntroCue::Coins => add_to_all(intro, selector::COIN, classes::STARTED),
        IntroCue::Settle => 0,
    };
    u32::try_from(touched).unwrap_or(u32::MAX)
}

fn add_to_first(intro: &Intro, selector: &str, class: &str) -> usize {
    match dom::query(&intro.page.document, selector) {
        Some(el) => {
            dom::add_class(&el, class);
            1
        }
        None => 0,
    }
}

fn add_to_all(intro: &Intro, selector: &str, class: &str) -> usize {
    let elements = dom::query_all(&intro.page.document, selector);
    for el in &elements {
        dom::add_class(el, class);
    }
    elements.len()
}
