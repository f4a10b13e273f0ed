// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr). Host times
//! are printed in milliseconds.

use std::io::Write;

use unveil_core::time::HostTime;
use unveil_core::trace::{
    DegradeEvent, DigitRollEvent, FrameWindowEvent, HeaderEvent, IntroCueEvent, MarqueeAction,
    MarqueeEvent, ProfileEvent, RevealEvent, TraceSink,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns its writer.
    #[must_use]
    pub fn into_writer(self) -> W {
        self.writer
    }
}

fn ms(t: HostTime) -> f64 {
    t.ticks() as f64 / 1000.0
}

fn marquee_action(action: MarqueeAction) -> &'static str {
    match action {
        MarqueeAction::Started => "start",
        MarqueeAction::Paused => "pause",
        MarqueeAction::Resumed => "resume",
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_profile(&mut self, e: &ProfileEvent) {
        let _ = writeln!(
            self.writer,
            "[profile] level={} score={} reduced_motion={} quirk={}",
            e.level.as_str(),
            e.score,
            e.reduced_motion,
            e.platform_quirk,
        );
    }

    fn on_reveal(&mut self, e: &RevealEvent) {
        let _ = writeln!(
            self.writer,
            "[reveal] {:?} {:?} -> {:?} delay={}ms at {:.1}ms",
            e.id,
            e.category,
            e.state,
            e.delay.as_millis(),
            ms(e.at),
        );
    }

    fn on_intro_cue(&mut self, e: &IntroCueEvent) {
        let verdict = if e.accepted { "ok" } else { "IGNORED" };
        let _ = writeln!(
            self.writer,
            "[intro] {} stage={:?} targets={} {verdict} at {:.1}ms",
            e.cue.name(),
            e.stage,
            e.targets,
            ms(e.at),
        );
    }

    fn on_digit_roll(&mut self, e: &DigitRollEvent) {
        match e.target {
            Some(target) => {
                let _ = writeln!(
                    self.writer,
                    "[digit] #{} target={target} start=+{}ms",
                    e.position,
                    e.start_delay.as_millis(),
                );
            }
            None => {
                let _ = writeln!(self.writer, "[digit] #{} INVALID, untouched", e.position);
            }
        }
    }

    fn on_frame_window(&mut self, e: &FrameWindowEvent) {
        let _ = writeln!(
            self.writer,
            "[frames] window={} dropped={}/{} rate={:.2} at {:.1}ms",
            e.report.window_index,
            e.report.dropped,
            e.report.frames,
            e.report.drop_rate,
            ms(e.at),
        );
    }

    fn on_degrade(&mut self, e: &DegradeEvent) {
        let _ = writeln!(
            self.writer,
            "[degrade] rate={:.2} shortened={} to {}ms at {:.1}ms",
            e.drop_rate,
            e.shortened,
            e.degraded_duration.as_millis(),
            ms(e.at),
        );
    }

    fn on_marquee(&mut self, e: &MarqueeEvent) {
        let _ = writeln!(
            self.writer,
            "[marquee] {} wraps={} at {:.1}ms",
            marquee_action(e.action),
            e.wraps,
            ms(e.at),
        );
    }

    fn on_header(&mut self, e: &HeaderEvent) {
        let alternate = match e.state.alternate {
            Some(true) => "on",
            Some(false) => "off",
            None => "n/a",
        };
        let _ = writeln!(
            self.writer,
            "[header] y={:.0} compact={} alternate={alternate}",
            e.scroll_y, e.state.compact,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use unveil_core::intro::{IntroCue, IntroStage};
    use unveil_core::scroll::HeaderState;
    use unveil_core::time::Duration;

    fn output(sink: PrettyPrintSink<Vec<u8>>) -> String {
        String::from_utf8(sink.into_writer()).unwrap()
    }

    #[test]
    fn pretty_print_intro_cue() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_intro_cue(&IntroCueEvent {
            cue: IntroCue::Counters,
            stage: IntroStage::CountersRolling,
            accepted: true,
            targets: 3,
            at: HostTime(1_500_000),
        });
        let out = output(sink);
        assert_eq!(
            out,
            "[intro] counters stage=CountersRolling targets=3 ok at 1500.0ms\n"
        );
    }

    #[test]
    fn invalid_digit_is_called_out() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_digit_roll(&DigitRollEvent {
            position: 1,
            target: None,
            start_delay: Duration::from_millis(400),
            at: HostTime(0),
        });
        let out = output(sink);
        assert!(out.contains("INVALID"), "got: {out}");
    }

    #[test]
    fn header_without_section_prints_na() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_header(&HeaderEvent {
            state: HeaderState {
                compact: true,
                alternate: None,
            },
            scroll_y: 48.0,
            at: HostTime(0),
        });
        let out = output(sink);
        assert_eq!(out, "[header] y=48 compact=true alternate=n/a\n");
    }
}
