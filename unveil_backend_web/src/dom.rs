// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Query and class helpers.
//!
//! Every helper tolerates missing targets: queries that fail or match nothing
//! return `None` or an empty list, and style or class writes are best effort.

use alloc::vec::Vec;

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, NodeList, Window};

/// The global window, if there is one.
#[must_use]
pub fn window() -> Option<Window> {
    web_sys::window()
}

/// The first element in `doc` matching `selector`.
#[must_use]
pub fn query(doc: &Document, selector: &str) -> Option<HtmlElement> {
    doc.query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into().ok())
}

/// Every element in `doc` matching `selector`, in document order.
#[must_use]
pub fn query_all(doc: &Document, selector: &str) -> Vec<HtmlElement> {
    doc.query_selector_all(selector)
        .map(|list| html_elements(&list))
        .unwrap_or_default()
}

/// Every descendant of `root` matching `selector`, in document order.
#[must_use]
pub fn query_all_in(root: &Element, selector: &str) -> Vec<HtmlElement> {
    root.query_selector_all(selector)
        .map(|list| html_elements(&list))
        .unwrap_or_default()
}

/// The element with the given id, cast to `T`.
#[must_use]
pub fn by_id<T: JsCast>(doc: &Document, id: &str) -> Option<T> {
    doc.get_element_by_id(id)?.dyn_into().ok()
}

fn html_elements(list: &NodeList) -> Vec<HtmlElement> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into().ok())
        .collect()
}

/// Adds `class` to `el`.
pub fn add_class(el: &Element, class: &str) {
    let _ = el.class_list().add_1(class);
}

/// Adds or removes `class` on `el`.
pub fn set_class(el: &Element, class: &str, on: bool) {
    let _ = el.class_list().toggle_with_force(class, on);
}

/// Sets an inline style property on `el`.
pub fn set_style(el: &HtmlElement, property: &str, value: &str) {
    let _ = el.style().set_property(property, value);
}

/// Removes an inline style property from `el`.
pub fn clear_style(el: &HtmlElement, property: &str) {
    let _ = el.style().remove_property(property);
}

/// Adds `class` to the document element (`<html>`).
pub fn add_root_class(doc: &Document, class: &str) {
    if let Some(root) = doc.document_element() {
        add_class(&root, class);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn by_id_casts_to_any_element_type() {
        let _: fn(&Document, &str) -> Option<HtmlElement> = by_id;
        let _: fn(&Document, &str) -> Option<Element> = by_id;
    }
}
