// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Diagnostics for the motion engine.
//!
//! This module provides a [`TraceSink`] trait with one method per event the
//! engine emits. All method bodies default to no-ops, so implementing only
//! the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing. When **on**, each
//! method performs a single `Option` branch before dispatching.
//!
//! No component's behavior depends on whether anything is listening.
//!
//! # Crate features
//!
//! - `trace` — enables the `Tracer` method bodies (one branch per call).

use crate::frame_health::WindowReport;
use crate::intro::{IntroCue, IntroStage};
use crate::profile::PerformanceLevel;
use crate::reveal::{Category, RevealState, TrackedId};
use crate::scroll::HeaderState;
use crate::time::{Duration, HostTime};

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted once, after the device has been probed and scored.
#[derive(Clone, Copy, Debug)]
pub struct ProfileEvent {
    /// Resulting level.
    pub level: PerformanceLevel,
    /// Raw score.
    pub score: i32,
    /// Reduced-motion preference.
    pub reduced_motion: bool,
    /// Platform quirk flag.
    pub platform_quirk: bool,
}

/// Emitted when an element changes reveal state.
#[derive(Clone, Copy, Debug)]
pub struct RevealEvent {
    /// The element.
    pub id: TrackedId,
    /// Its category.
    pub category: Category,
    /// The state it entered.
    pub state: RevealState,
    /// Host time of the change.
    pub at: HostTime,
    /// Stagger delay (zero unless `state` is `Revealed`).
    pub delay: Duration,
}

/// Emitted for every intro timer that fires.
#[derive(Clone, Copy, Debug)]
pub struct IntroCueEvent {
    /// The cue.
    pub cue: IntroCue,
    /// Stage after the cue.
    pub stage: IntroStage,
    /// Whether the director accepted the cue.
    pub accepted: bool,
    /// Elements the cue touched.
    pub targets: u32,
    /// Host time of the timer callback.
    pub at: HostTime,
}

/// Emitted when a digit container is planned.
#[derive(Clone, Copy, Debug)]
pub struct DigitRollEvent {
    /// Left-to-right position within the price tag.
    pub position: u32,
    /// Target digit, or `None` if the container was left untouched.
    pub target: Option<u8>,
    /// Delay before the roll starts.
    pub start_delay: Duration,
    /// Host time of planning.
    pub at: HostTime,
}

/// Emitted when the frame-health monitor completes a window.
#[derive(Clone, Copy, Debug)]
pub struct FrameWindowEvent {
    /// The window statistics.
    pub report: WindowReport,
    /// Host time of the last frame of the window.
    pub at: HostTime,
}

/// Emitted once, when the page degrades.
#[derive(Clone, Copy, Debug)]
pub struct DegradeEvent {
    /// Drop rate of the tripping window.
    pub drop_rate: f32,
    /// Number of in-flight entrances shortened.
    pub shortened: u32,
    /// Transition duration they were shortened to.
    pub degraded_duration: Duration,
    /// Host time of the trip.
    pub at: HostTime,
}

/// What happened to the marquee.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MarqueeAction {
    /// The interval was armed for the first time.
    Started,
    /// Pointer entered; the interval was cleared.
    Paused,
    /// Pointer left; the interval was re-armed.
    Resumed,
}

/// Emitted on marquee lifecycle changes.
#[derive(Clone, Copy, Debug)]
pub struct MarqueeEvent {
    /// The change.
    pub action: MarqueeAction,
    /// Track wraps so far.
    pub wraps: u64,
    /// Host time of the change.
    pub at: HostTime,
}

/// Emitted when the header classes change.
#[derive(Clone, Copy, Debug)]
pub struct HeaderEvent {
    /// New header state.
    pub state: HeaderState,
    /// Scroll offset that produced it.
    pub scroll_y: f64,
    /// Host time of the flush.
    pub at: HostTime,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from the engine.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called once with the device profile.
    fn on_profile(&mut self, e: &ProfileEvent) {
        _ = e;
    }

    /// Called on every reveal state change.
    fn on_reveal(&mut self, e: &RevealEvent) {
        _ = e;
    }

    /// Called for every intro cue.
    fn on_intro_cue(&mut self, e: &IntroCueEvent) {
        _ = e;
    }

    /// Called for every planned digit container.
    fn on_digit_roll(&mut self, e: &DigitRollEvent) {
        _ = e;
    }

    /// Called when a frame-health window completes.
    fn on_frame_window(&mut self, e: &FrameWindowEvent) {
        _ = e;
    }

    /// Called when the page degrades.
    fn on_degrade(&mut self, e: &DegradeEvent) {
        _ = e;
    }

    /// Called on marquee lifecycle changes.
    fn on_marquee(&mut self, e: &MarqueeEvent) {
        _ = e;
    }

    /// Called when the header classes change.
    fn on_header(&mut self, e: &HeaderEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

/// Generates a `Tracer` method that forwards to one `TraceSink` method.
macro_rules! forward {
    ($(#[$doc:meta])* $name:ident => $sink_method:ident($ty:ty)) => {
        $(#[$doc])*
        #[inline]
        pub fn $name(&mut self, e: &$ty) {
            #[cfg(feature = "trace")]
            if let Some(s) = &mut self.sink {
                s.$sink_method(e);
            }
            #[cfg(not(feature = "trace"))]
            {
                _ = e;
            }
        }
    };
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    forward!(
        /// Emits a [`ProfileEvent`].
        profile => on_profile(ProfileEvent)
    );
    forward!(
        /// Emits a [`RevealEvent`].
        reveal => on_reveal(RevealEvent)
    );
    forward!(
        /// Emits an [`IntroCueEvent`].
        intro_cue => on_intro_cue(IntroCueEvent)
    );
    forward!(
        /// Emits a [`DigitRollEvent`].
        digit_roll => on_digit_roll(DigitRollEvent)
    );
    forward!(
        /// Emits a [`FrameWindowEvent`].
        frame_window => on_frame_window(FrameWindowEvent)
    );
    forward!(
        /// Emits a [`DegradeEvent`].
        degrade => on_degrade(DegradeEvent)
    );
    forward!(
        /// Emits a [`MarqueeEvent`].
        marquee => on_marquee(MarqueeEvent)
    );
    forward!(
        /// Emits a [`HeaderEvent`].
        header => on_header(HeaderEvent)
    );
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
