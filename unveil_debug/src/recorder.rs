// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory event recording.
//!
//! [`RecorderSink`] implements [`TraceSink`] and keeps every event, in
//! arrival order, as a [`RecordedEvent`]. Recordings feed
//! [`chrome::export`](crate::chrome::export) or assertions in tests.

use unveil_core::time::HostTime;
use unveil_core::trace::{
    DegradeEvent, DigitRollEvent, FrameWindowEvent, HeaderEvent, IntroCueEvent, MarqueeEvent,
    ProfileEvent, RevealEvent, TraceSink,
};

/// One recorded trace event.
#[derive(Clone, Copy, Debug)]
pub enum RecordedEvent {
    /// See [`TraceSink::on_profile`].
    Profile(ProfileEvent),
    /// See [`TraceSink::on_reveal`].
    Reveal(RevealEvent),
    /// See [`TraceSink::on_intro_cue`].
    IntroCue(IntroCueEvent),
    /// See [`TraceSink::on_digit_roll`].
    DigitRoll(DigitRollEvent),
    /// See [`TraceSink::on_frame_window`].
    FrameWindow(FrameWindowEvent),
    /// See [`TraceSink::on_degrade`].
    Degrade(DegradeEvent),
    /// See [`TraceSink::on_marquee`].
    Marquee(MarqueeEvent),
    /// See [`TraceSink::on_header`].
    Header(HeaderEvent),
}

impl RecordedEvent {
    /// Host time of the event, if it carries one.
    ///
    /// Profile events are emitted before the clock matters and have none.
    #[must_use]
    pub fn at(&self) -> Option<HostTime> {
        match self {
            Self::Profile(_) => None,
            Self::Reveal(e) => Some(e.at),
            Self::IntroCue(e) => Some(e.at),
            Self::DigitRoll(e) => Some(e.at),
            Self::FrameWindow(e) => Some(e.at),
            Self::Degrade(e) => Some(e.at),
            Self::Marquee(e) => Some(e.at),
            Self::Header(e) => Some(e.at),
        }
    }
}

/// A [`TraceSink`] that keeps every event in memory.
#[derive(Debug, Default)]
pub struct RecorderSink {
    events: Vec<RecordedEvent>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded events, oldest first.
    #[must_use]
    pub fn events(&self) -> &[RecordedEvent] {
        &self.events
    }

    /// Consumes the recorder and returns the recorded events.
    #[must_use]
    pub fn into_events(self) -> Vec<RecordedEvent> {
        self.events
    }

    /// Number of recorded events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Discards every recorded event.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl TraceSink for RecorderSink {
    fn on_profile(&mut self, e: &ProfileEvent) {
        self.events.push(RecordedEvent::Profile(*e));
    }

    fn on_reveal(&mut self, e: &RevealEvent) {
        self.events.push(RecordedEvent::Reveal(*e));
    }

    fn on_intro_cue(&mut self, e: &IntroCueEvent) {
        self.events.push(RecordedEvent::IntroCue(*e));
    }

    fn on_digit_roll(&mut self, e: &DigitRollEvent) {
        self.events.push(RecordedEvent::DigitRoll(*e));
    }

    fn on_frame_window(&mut self, e: &FrameWindowEvent) {
        self.events.push(RecordedEvent::FrameWindow(*e));
    }

    fn on_degrade(&mut self, e: &DegradeEvent) {
        self.events.push(RecordedEvent::Degrade(*e));
    }

    fn on_marquee(&mut self, e: &MarqueeEvent) {
        self.events.push(RecordedEvent::Marquee(*e));
    }

    fn on_header(&mut self, e: &HeaderEvent) {
        self.events.push(RecordedEvent::Header(*e));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use unveil_core::intro::{IntroCue, IntroDirector};
    use unveil_core::profile::PerformanceLevel;
    use unveil_core::trace::{MarqueeAction, Tracer};

    #[test]
    fn records_in_order_through_tracer() {
        let mut rec = RecorderSink::new();
        {
            let mut tracer = Tracer::new(&mut rec);
            tracer.profile(&ProfileEvent {
                level: PerformanceLevel::High,
                score: 9,
                reduced_motion: false,
                platform_quirk: false,
            });
            tracer.marquee(&MarqueeEvent {
                action: MarqueeAction::Started,
                wraps: 0,
                at: HostTime(10),
            });
        }
        assert_eq!(rec.len(), 2);
        assert!(matches!(rec.events()[0], RecordedEvent::Profile(_)));
        assert!(matches!(
            rec.events()[1],
            RecordedEvent::Marquee(MarqueeEvent {
                action: MarqueeAction::Started,
                ..
            })
        ));
        assert_eq!(rec.events()[0].at(), None);
        assert_eq!(rec.events()[1].at(), Some(HostTime(10)));
    }

    #[test]
    fn records_refused_intro_cues() {
        let mut director = IntroDirector::new();
        let mut rec = RecorderSink::new();
        for (i, cue) in [IntroCue::SecondPhone, IntroCue::Begin, IntroCue::Begin]
            .into_iter()
            .enumerate()
        {
            let accepted = director.fire(cue);
            rec.on_intro_cue(&IntroCueEvent {
                cue,
                stage: director.stage(),
                accepted,
                targets: 0,
                at: HostTime(i as u64),
            });
        }
        let accepted: Vec<bool> = rec
            .events()
            .iter()
            .map(|e| match e {
                RecordedEvent::IntroCue(e) => e.accepted,
                _ => unreachable!(),
            })
            .collect();
        assert_eq!(accepted, [false, true, false]);
    }

    #[test]
    fn clear_empties() {
        let mut rec = RecorderSink::new();
        rec.on_header(&HeaderEvent {
            state: unveil_core::scroll::HeaderState {
                compact: false,
                alternate: None,
            },
            scroll_y: 0.0,
            at: HostTime(0),
        });
        assert!(!rec.is_empty());
        rec.clear();
        assert!(rec.is_empty());
    }
}
