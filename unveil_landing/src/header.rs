// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Header classes driven by the scroll position.

use alloc::rc::Rc;
use core::cell::RefCell;

use web_sys::{Event, HtmlElement};

use unveil_backend_web::{dom, now, request_frame, timer};
use unveil_core::classes::{self, selector};
use unveil_core::scroll::{HeaderState, HeaderThresholds, ScrollReactor, ThrottleMode};
use unveil_core::trace::HeaderEvent;

use crate::page::{self, Page};

struct Header {
    page: Rc<Page>,
    element: HtmlElement,
    reactor: RefCell<ScrollReactor>,
}

/// Wires the header to scroll events and applies the initial state.
pub(crate) fn install(page: &Rc<Page>) {
    let Some(element) = dom::query(&page.document, selector::HEADER) else {
        return;
    };
    let reactor = ScrollReactor::new(
        HeaderThresholds::standard(),
        ThrottleMode::for_profile(&page.profile),
        section_bottom(page),
    );
    let header = Rc::new(Header {
        page: Rc::clone(page),
        element,
        reactor: RefCell::new(reactor),
    });
    flush(&header);

    let on_scroll = Rc::clone(&header);
    page::listen(&page.window, "scroll", move |_event: Event| {
        let (schedule, mode) = {
            let mut reactor = on_scroll.reactor.borrow_mut();
            (reactor.request(), reactor.mode())
        };
        if !schedule {
            return;
        }
        let header = Rc::clone(&on_scroll);
        match mode {
            ThrottleMode::AnimationFrame => request_frame(move |_| flush(&header)),
            ThrottleMode::Timer(delay) => timer::after(delay, move || flush(&header)),
        }
    });

    // Section geometry moves when images finish loading or the layout reflows.
    for event in ["load", "resize"] {
        let relayout = Rc::clone(&header);
        page::listen(&page.window, event, move |_event: Event| {
            let bottom = section_bottom(&relayout.page);
            relayout.reactor.borrow_mut().set_section_bottom(bottom);
        });
    }
}

/// Bottom edge of the first section, if the page uses the alternate header.
fn section_bottom(page: &Page) -> Option<f64> {
    dom::query(&page.document, selector::BOX_CONTENT)?;
    let main = dom::query(&page.document, selector::MAIN_SECTION)?;
    Some(f64::from(main.offset_top()) + f64::from(main.offset_height()))
}

fn flush(header: &Header) {
    let y = header.page.scroll_y();
    let Some(state) = header.reactor.borrow_mut().flush(y) else {
        return;
    };
    apply(&header.element, state);
    header.page.trace(|t| {
        t.header(&HeaderEvent {
            state,
            scroll_y: y,
            at: now(),
        });
    });
}

fn apply(element: &HtmlElement, state: HeaderState) {
    dom::set_class(element, classes::HEADER_HIDDEN, state.compact);
    if let Some(alternate) = state.alternate {
        dom::set_class(element, classes::HEADER_SCROLLED, alternate);
    }
}
