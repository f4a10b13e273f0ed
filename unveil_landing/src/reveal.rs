// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll-triggered entrances.
//!
//! Every element of every [`Category`] is registered with the tracker and
//! bound to the presenter as soon as the document is parsed, so the first
//! paint already shows the pre-animation pose. Viewport subscriptions wait
//! for `load`, once images have settled the layout. Observer callbacks only
//! ever go through [`RevealTracker::on_crossing`], which is what keeps an
//! entrance from running twice.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use web_sys::HtmlElement;

use unveil_backend_web::{DomPresenter, Presenter as _, ViewportObserver, dom, now, timer};
use unveil_core::reveal::{Category, RevealState, RevealTracker, TrackedId};
use unveil_core::time::{Duration, HostTime};
use unveil_core::trace::RevealEvent;

use crate::page::Page;

/// Reveal state of the page.
pub(crate) struct Reveals {
    page: Rc<Page>,
    tracker: RefCell<RevealTracker>,
    presenter: RefCell<DomPresenter>,
    observer: ViewportObserver,
    /// Registered elements not yet handed to the observer.
    unobserved: RefCell<Vec<(TrackedId, HtmlElement)>>,
}

impl Reveals {
    /// Pushes pending tracker changes to the DOM.
    fn flush(&self) {
        let changes = self.tracker.borrow_mut().take_changes();
        if changes.is_empty() {
            return;
        }
        let tracker = self.tracker.borrow();
        self.presenter.borrow_mut().apply(&tracker, &changes);
    }

    /// Shortens every running entrance, and every later one, to `duration`;
    /// returns how many were running.
    pub(crate) fn degrade(&self, duration: Duration) -> u32 {
        let tracker = self.tracker.borrow();
        self.presenter
            .borrow_mut()
            .degrade(tracker.animating(), duration)
    }

    fn trace(&self, id: TrackedId, state: RevealState, delay: Duration, at: HostTime) {
        let Some(category) = self.tracker.borrow().category(id) else {
            return;
        };
        self.page.trace(|t| {
            t.reveal(&RevealEvent {
                id,
                category,
                state,
                at,
                delay,
            });
        });
    }
}

/// Registers every revealable element on the page and writes their poses.
pub(crate) fn register(page: &Rc<Page>) -> Rc<Reveals> {
    let reveals = Rc::new(Reveals {
        page: Rc::clone(page),
        tracker: RefCell::new(RevealTracker::new(&page.settings)),
        presenter: RefCell::new(DomPresenter::new(&page.settings)),
        observer: ViewportObserver::new(),
        unobserved: RefCell::new(Vec::new()),
    });

    for category in Category::ALL {
        for el in dom::query_all(&page.document, category.selector()) {
            let id = reveals.tracker.borrow_mut().register(category);
            reveals.presenter.borrow_mut().bind(id, el.clone());
            reveals.unobserved.borrow_mut().push((id, el));
        }
    }
    reveals.flush();
    reveals
}

/// Subscribes every registered element to the viewport observer.
pub(crate) fn observe(reveals: &Rc<Reveals>) {
    let pending = core::mem::take(&mut *reveals.unobserved.borrow_mut());
    for (id, el) in pending {
        let Some(category) = reveals.tracker.borrow().category(id) else {
            continue;
        };
        let weak = Rc::downgrade(reveals);
        reveals
            .observer
            .observe(&el, category.observe_options(), move || {
                if let Some(reveals) = weak.upgrade() {
                    on_crossed(&reveals, id);
                }
            });
    }
}

fn on_crossed(reveals: &Rc<Reveals>, id: TrackedId) {
    let at = now();
    let Some(transition) = reveals.tracker.borrow_mut().on_crossing(id, at) else {
        return;
    };
    reveals.trace(id, RevealState::Revealed, transition.delay, at);
    reveals.flush();

    let weak = Rc::downgrade(reveals);
    timer::after(transition.delay + transition.complete_after, move || {
        let Some(reveals) = weak.upgrade() else {
            return;
        };
        if reveals.tracker.borrow_mut().complete(id) {
            reveals.trace(id, RevealState::Completed, Duration::ZERO, now());
            reveals.flush();
        }
    });
}
