// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Trace events to the browser console.

use alloc::format;
use alloc::string::String;

use unveil_core::trace::{
    DegradeEvent, DigitRollEvent, FrameWindowEvent, HeaderEvent, IntroCueEvent, MarqueeAction,
    MarqueeEvent, ProfileEvent, RevealEvent, TraceSink,
};
use wasm_bindgen::JsValue;

/// A [`TraceSink`] that logs one line per event with `console.debug`.
///
/// Reveal events are frequent on long pages; set `reveals` to `false` to
/// leave them out.
#[derive(Clone, Copy, Debug)]
pub struct ConsoleSink {
    /// Whether reveal events are logged.
    pub reveals: bool,
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self { reveals: true }
    }
}

fn emit(line: &str) {
    web_sys::console::debug_1(&JsValue::from_str(line));
}

impl TraceSink for ConsoleSink {
    fn on_profile(&mut self, e: &ProfileEvent) {
        emit(&profile_line(e));
    }

    fn on_reveal(&mut self, e: &RevealEvent) {
        if self.reveals {
            emit(&format!(
                "[unveil] {:?} {:?} -> {:?} (+{}ms)",
                e.category,
                e.id,
                e.state,
                e.delay.as_millis()
            ));
        }
    }

    fn on_intro_cue(&mut self, e: &IntroCueEvent) {
        emit(&intro_line(e));
    }

    fn on_digit_roll(&mut self, e: &DigitRollEvent) {
        let line = match e.target {
            Some(d) => format!(
                "[unveil] digit #{} -> {d} in {}ms",
                e.position,
                e.start_delay.as_millis()
            ),
            None => format!("[unveil] digit #{} has an invalid target, skipped", e.position),
        };
        emit(&line);
    }

    fn on_frame_window(&mut self, e: &FrameWindowEvent) {
        emit(&format!(
            "[unveil] frames: window {} dropped {}/{}",
            e.report.window_index, e.report.dropped, e.report.frames
        ));
    }

    fn on_degrade(&mut self, e: &DegradeEvent) {
        emit(&degrade_line(e));
    }

    fn on_marquee(&mut self, e: &MarqueeEvent) {
        let action = match e.action {
            MarqueeAction::Started => "started",
            MarqueeAction::Paused => "paused",
            MarqueeAction::Resumed => "resumed",
        };
        emit(&format!("[unveil] marquee {action} ({} wraps)", e.wraps));
    }

    fn on_header(&mut self, e: &HeaderEvent) {
        emit(&format!(
            "[unveil] header at y={}: compact={} alternate={:?}",
            e.scroll_y, e.state.compact, e.state.alternate
        ));
    }
}

fn profile_line(e: &ProfileEvent) -> String {
    let mut line = format!("[unveil] profile: {} (score {})", e.level.as_str(), e.score);
    if e.reduced_motion {
        line.push_str(", reduced motion");
    }
    if e.platform_quirk {
        line.push_str(", timer-throttled scroll");
    }
    line
}

fn intro_line(e: &IntroCueEvent) -> String {
    if e.accepted {
        format!(
            "[unveil] intro {} -> {:?} ({} targets)",
            e.cue.name(),
            e.stage,
            e.targets
        )
    } else {
        format!("[unveil] intro {} ignored", e.cue.name())
    }
}

fn degrade_line(e: &DegradeEvent) -> String {
    format!(
        "[unveil] degraded: drop rate {:.0}%, {} transitions shortened to {}",
        e.drop_rate * 100.0,
        e.shortened,
        e.degraded_duration.css()
    )
}
