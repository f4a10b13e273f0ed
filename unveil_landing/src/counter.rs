// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Digit roller on the price tags.

use alloc::format;
use alloc::string::{String, ToString as _};
use alloc::vec;
use alloc::vec::Vec;

use wasm_bindgen::JsCast as _;
use web_sys::{Document, HtmlElement};

use unveil_backend_web::{dom, now, timer};
use unveil_core::classes::{self, selector};
use unveil_core::digits::{self, DigitStrip, GLYPH_HEIGHT_EM, RollTimings, STRIP_LEN};
use unveil_core::trace::DigitRollEvent;

use crate::page::Page;

/// Rebuilds and rolls every digit container inside `tag`.
///
/// Containers whose `data-target` is not a digit are left as they are.
pub(crate) fn roll(page: &Page, tag: &HtmlElement, timings: &RollTimings) {
    let containers = dom::query_all_in(tag, selector::DIGIT_CONTAINER);
    let targets: Vec<Option<u8>> = containers
        .iter()
        .map(|c| {
            let raw = c.get_attribute(classes::DIGIT_TARGET_ATTR).unwrap_or_default();
            digits::parse_target(&raw).ok()
        })
        .collect();

    let at = now();
    for (plan, container) in digits::plan_counter(&targets, timings)
        .into_iter()
        .zip(containers)
    {
        page.trace(|t| {
            t.digit_roll(&DigitRollEvent {
                position: u32::try_from(plan.position).unwrap_or(u32::MAX),
                target: plan.strip.map(|s| s.target()),
                start_delay: plan.start_delay,
                at,
            });
        });
        let Some(strip) = plan.strip else {
            continue;
        };
        let Some(glyphs) = build_strip(&page.document, &container) else {
            continue;
        };
        let transition = timings.transition_css();
        let roll_time = timings.roll;
        timer::after(plan.start_delay, move || {
            let transform = strip.transform_css();
            for glyph in &glyphs {
                dom::set_style(glyph, "transition", &transition);
                dom::set_style(glyph, "transform", &transform);
            }
            timer::after(roll_time, move || {
                for (index, glyph) in glyphs.iter().enumerate() {
                    if !strip.keeps(index) {
                        dom::set_style(glyph, "opacity", "0");
                    }
                }
            });
        });
    }
}

/// Replaces the container's content with a fresh glyph strip.
///
/// The container is only touched once every glyph exists, so the glyph at
/// position `i` is always strip index `i`.
fn build_strip(document: &Document, container: &HtmlElement) -> Option<Vec<HtmlElement>> {
    let glyphs = all_or_none(|index| {
        let glyph: HtmlElement = document.create_element("div").ok()?.dyn_into().ok()?;
        glyph.set_class_name(classes::DIGIT);
        glyph.set_text_content(Some(&DigitStrip::glyph(index).to_string()));
        for (property, value) in glyph_properties(index) {
            dom::set_style(&glyph, property, &value);
        }
        Some(glyph)
    })?;

    container.set_inner_html("");
    dom::set_style(container, "overflow", "hidden");
    dom::set_style(container, "position", "relative");
    for glyph in &glyphs {
        let _ = container.append_child(glyph);
    }
    Some(glyphs)
}

/// Builds one item per strip slot, or nothing if any slot fails.
fn all_or_none<T>(make: impl FnMut(usize) -> Option<T>) -> Option<Vec<T>> {
    (0..STRIP_LEN).map(make).collect()
}

/// Resting layout of glyph `index`; it inherits the tag's typography.
fn glyph_properties(index: usize) -> Vec<(&'static str, String)> {
    vec![
        ("position", String::from("absolute")),
        ("top", format!("{}em", DigitStrip::slot_top_em(index))),
        ("left", String::from("0")),
        ("width", String::from("100%")),
        ("height", format!("{GLYPH_HEIGHT_EM}em")),
        ("display", String::from("flex")),
        ("align-items", String::from("center")),
        ("justify-content", String::from("center")),
        ("font-size", String::from("inherit")),
        ("font-weight", String::from("inherit")),
        ("color", String::from("inherit")),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_failed_glyph_abandons_the_whole_strip() {
        let strip = all_or_none(|i| (i != 7).then_some(i));
        assert_eq!(strip, None);

        let strip = all_or_none(Some).expect("every slot builds");
        assert_eq!(strip.len(), STRIP_LEN);
        assert!(strip.iter().enumerate().all(|(pos, &i)| pos == i));
    }

    #[test]
    fn glyphs_stack_one_slot_apart() {
        let first = glyph_properties(0);
        let third = glyph_properties(2);
        assert_eq!(first[1], ("top", String::from("0em")));
        assert_eq!(third[1], ("top", String::from("2.4em")));
        assert_eq!(first[4], ("height", String::from("1.2em")));
    }
}
