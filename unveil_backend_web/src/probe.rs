// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Capability probing.
//!
//! [`probe`] reads every platform signal the scoring policy uses. Each read is
//! independent and best effort: anything the browser does not expose, or that
//! throws, is reported as `None` and left to the policy's fallbacks.

use wasm_bindgen::JsCast as _;
use wasm_bindgen::JsValue;
use web_sys::{HtmlCanvasElement, Navigator, Window};

use unveil_core::profile::{NetworkTier, PlatformSignals};

use crate::dom;

/// Reads the platform signals of the current browser.
#[must_use]
pub fn probe() -> PlatformSignals {
    let Some(win) = dom::window() else {
        return PlatformSignals::default();
    };
    let nav = win.navigator();
    PlatformSignals {
        gpu: webgl_available(&win),
        device_memory_gb: get_f64(&nav, "deviceMemory").filter(|gb| *gb > 0.0),
        cores: cores_from(nav.hardware_concurrency()),
        network: effective_type(&nav).map(|t| NetworkTier::from_effective_type(&t)),
        reduced_motion: win
            .match_media("(prefers-reduced-motion: reduce)")
            .ok()
            .flatten()
            .map(|mql| mql.matches()),
        platform_quirk: nav.user_agent().ok().map(|ua| is_quirky_user_agent(&ua)),
    }
}

/// Tries a throwaway canvas for a WebGL context.
fn webgl_available(win: &Window) -> Option<bool> {
    let doc = win.document()?;
    let canvas: HtmlCanvasElement = doc.create_element("canvas").ok()?.dyn_into().ok()?;
    for kind in ["webgl", "experimental-webgl"] {
        match canvas.get_context(kind) {
            Ok(Some(_)) => return Some(true),
            Ok(None) => {}
            Err(_) => return None,
        }
    }
    Some(false)
}

fn get_f64(target: &JsValue, key: &str) -> Option<f64> {
    js_sys::Reflect::get(target, &JsValue::from_str(key))
        .ok()?
        .as_f64()
        .filter(|v| v.is_finite())
}

fn effective_type(nav: &Navigator) -> Option<alloc::string::String> {
    let connection = js_sys::Reflect::get(nav, &JsValue::from_str("connection")).ok()?;
    if connection.is_undefined() || connection.is_null() {
        return None;
    }
    js_sys::Reflect::get(&connection, &JsValue::from_str("effectiveType"))
        .ok()?
        .as_string()
}

/// Converts `navigator.hardwareConcurrency`; zero and garbage mean unknown.
fn cores_from(value: f64) -> Option<u32> {
    if value.is_finite() && value >= 1.0 && value <= f64::from(u32::MAX) {
        #[expect(
            clippy::cast_possible_truncation,
            clippy::cast_sign_loss,
            reason = "range checked above"
        )]
        let cores = value as u32;
        Some(cores)
    } else {
        None
    }
}

/// iOS browsers stall animation-frame callbacks during momentum scrolling.
fn is_quirky_user_agent(ua: &str) -> bool {
    ["iPhone", "iPad", "iPod"].iter().any(|device| ua.contains(device))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_counts() {
        assert_eq!(cores_from(8.0), Some(8));
        assert_eq!(cores_from(0.0), None);
        assert_eq!(cores_from(f64::NAN), None);
        assert_eq!(cores_from(-2.0), None);
    }

    #[test]
    fn ios_user_agents_are_quirky() {
        assert!(is_quirky_user_agent(
            "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) AppleWebKit/605.1.15"
        ));
        assert!(is_quirky_user_agent("Mozilla/5.0 (iPad; CPU OS 16_6 like Mac OS X)"));
        assert!(!is_quirky_user_agent(
            "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 Chrome/126.0"
        ));
    }
}
