// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] converts events from a [`RecorderSink`](super::recorder::RecorderSink)
//! into [Chrome Trace Event Format][spec] JSON and writes it to the given
//! writer. [`to_value`] returns the same array without serializing it.
//!
//! Every component gets its own `tid` so the viewer shows one row per
//! component.
//!
//! [spec]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use unveil_core::time::HostTime;

use crate::recorder::RecordedEvent;

const TID_PROFILE: u32 = 0;
const TID_REVEAL: u32 = 1;
const TID_INTRO: u32 = 2;
const TID_FRAMES: u32 = 3;
const TID_MARQUEE: u32 = 4;
const TID_HEADER: u32 = 5;

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
pub fn export(events: &[RecordedEvent], writer: &mut dyn Write) -> io::Result<()> {
    serde_json::to_writer_pretty(writer, &to_value(events))?;
    Ok(())
}

/// Converts recorded events to a JSON array of trace event objects.
#[must_use]
pub fn to_value(events: &[RecordedEvent]) -> Value {
    Value::Array(events.iter().map(event_json).collect())
}

fn event_json(recorded: &RecordedEvent) -> Value {
    match recorded {
        RecordedEvent::Profile(e) => json!({
            "ph": "i",
            "name": "Profile",
            "cat": "Prober",
            "ts": 0.0,
            "pid": 0,
            "tid": TID_PROFILE,
            "s": "g",
            "args": {
                "level": e.level.as_str(),
                "score": e.score,
                "reduced_motion": e.reduced_motion,
                "platform_quirk": e.platform_quirk,
            }
        }),
        RecordedEvent::Reveal(e) => json!({
            "ph": "i",
            "name": format!("{:?}", e.state),
            "cat": "Reveal",
            "ts": us(e.at),
            "pid": 0,
            "tid": TID_REVEAL,
            "s": "t",
            "args": {
                "id": e.id.index(),
                "category": format!("{:?}", e.category),
                "delay_ms": e.delay.as_millis(),
            }
        }),
        RecordedEvent::IntroCue(e) => json!({
            "ph": "i",
            "name": e.cue.name(),
            "cat": "Intro",
            "ts": us(e.at),
            "pid": 0,
            "tid": TID_INTRO,
            "s": "t",
            "args": {
                "stage": format!("{:?}", e.stage),
                "accepted": e.accepted,
                "targets": e.targets,
            }
        }),
        RecordedEvent::DigitRoll(e) => json!({
            "ph": "i",
            "name": "DigitRoll",
            "cat": "Intro",
            "ts": us(e.at),
            "pid": 0,
            "tid": TID_INTRO,
            "s": "t",
            "args": {
                "position": e.position,
                "target": e.target,
                "start_delay_ms": e.start_delay.as_millis(),
            }
        }),
        RecordedEvent::FrameWindow(e) => json!({
            "ph": "C",
            "name": "DropRate",
            "cat": "FrameHealth",
            "ts": us(e.at),
            "pid": 0,
            "tid": TID_FRAMES,
            "args": {
                "drop_rate": e.report.drop_rate,
            }
        }),
        RecordedEvent::Degrade(e) => json!({
            "ph": "i",
            "name": "Degrade",
            "cat": "FrameHealth",
            "ts": us(e.at),
            "pid": 0,
            "tid": TID_FRAMES,
            "s": "g",
            "args": {
                "drop_rate": e.drop_rate,
                "shortened": e.shortened,
                "degraded_duration_ms": e.degraded_duration.as_millis(),
            }
        }),
        RecordedEvent::Marquee(e) => json!({
            "ph": "i",
            "name": format!("Marquee{:?}", e.action),
            "cat": "Marquee",
            "ts": us(e.at),
            "pid": 0,
            "tid": TID_MARQUEE,
            "s": "t",
            "args": {
                "wraps": e.wraps,
            }
        }),
        RecordedEvent::Header(e) => json!({
            "ph": "i",
            "name": "Header",
            "cat": "Scroll",
            "ts": us(e.at),
            "pid": 0,
            "tid": TID_HEADER,
            "s": "t",
            "args": {
                "scroll_y": e.scroll_y,
                "compact": e.state.compact,
                "alternate": e.state.alternate,
            }
        }),
    }
}

fn us(t: HostTime) -> f64 {
    t.ticks() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::RecorderSink;
    use unveil_core::frame_health::WindowReport;
    use unveil_core::reveal::{Category, RevealState, RevealTracker};
    use unveil_core::time::Duration;
    use unveil_core::trace::{FrameWindowEvent, RevealEvent, TraceSink};
    use unveil_core::tuning::AnimationSettings;

    #[test]
    fn export_produces_valid_json() {
        let settings = AnimationSettings::for_level(unveil_core::profile::PerformanceLevel::Medium);
        let mut tracker = RevealTracker::new(&settings);
        let id = tracker.register(Category::QaItem);

        let mut rec = RecorderSink::new();
        rec.on_reveal(&RevealEvent {
            id,
            category: Category::QaItem,
            state: RevealState::Revealed,
            at: HostTime(2_000),
            delay: Duration::from_millis(100),
        });
        rec.on_frame_window(&FrameWindowEvent {
            report: WindowReport {
                window_index: 1,
                frames: 120,
                dropped: 60,
                drop_rate: 0.5,
            },
            at: HostTime(4_000),
        });

        let mut out = Vec::new();
        export(rec.events(), &mut out).unwrap();
        let json_str = String::from_utf8(out).unwrap();

        let parsed: Vec<Value> = serde_json::from_str(&json_str).unwrap();
        assert_eq!(parsed.len(), 2);

        assert_eq!(parsed[0]["ph"], "i");
        assert_eq!(parsed[0]["name"], "Revealed");
        assert_eq!(parsed[0]["ts"], 2000.0);
        assert_eq!(parsed[0]["args"]["delay_ms"], 100);

        assert_eq!(parsed[1]["ph"], "C");
        assert_eq!(parsed[1]["args"]["drop_rate"], 0.5);
    }

    #[test]
    fn export_empty_recording() {
        let mut out = Vec::new();
        export(&[], &mut out).unwrap();
        let json_str = String::from_utf8(out).unwrap();
        let parsed: Vec<Value> = serde_json::from_str(&json_str).unwrap();
        assert!(parsed.is_empty());
    }
}
