// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame-drop monitoring and one-way degradation.
//!
//! The [`FrameHealthMonitor`] consumes animation-frame timestamps, counts the
//! intervals that overrun [`FRAME_BUDGET`], and evaluates the drop rate once
//! per window of [`FrameHealthConfig::window`] frames. The first window whose
//! rate exceeds the threshold trips the monitor and yields a
//! [`Degradation`]; after that the monitor ignores every further sample.
//! There is no recovery path.
//!
//! ```text
//!   sample(now) ──► interval ──► record_interval() ──► window full?
//!                                                        │
//!                                     drop_rate > threshold and not tripped
//!                                                        │
//!                                                        ▼
//!                                                  Some(Degradation)
//! ```

use crate::time::{Duration, HostTime};
use crate::tuning::AnimationSettings;

/// Nominal interval of a 60 Hz display.
pub const FRAME_BUDGET: Duration = Duration::from_micros(16_670);

/// One animation-frame callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameTick {
    /// Host time of the callback.
    pub now: HostTime,
    /// Monotonically increasing frame counter.
    pub frame_index: u64,
}

/// Configuration for the [`FrameHealthMonitor`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameHealthConfig {
    /// Number of intervals per evaluation window.
    pub window: u32,
    /// Intervals longer than this count as dropped.
    pub budget: Duration,
    /// Drop rate above which the monitor trips.
    pub drop_threshold: f32,
    /// Samples within this span of the first one are ignored, so page-load
    /// jank does not count against the device.
    pub grace: Duration,
}

impl FrameHealthConfig {
    /// Standard monitor configuration with the threshold from `settings`.
    #[must_use]
    pub const fn for_settings(settings: &AnimationSettings) -> Self {
        Self {
            window: 120,
            budget: FRAME_BUDGET,
            drop_threshold: settings.drop_threshold,
            grace: Duration::from_millis(2000),
        }
    }
}

/// Statistics of one completed evaluation window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WindowReport {
    /// 1-based index of the window.
    pub window_index: u32,
    /// Intervals in the window.
    pub frames: u32,
    /// Intervals that overran the budget.
    pub dropped: u32,
    /// `dropped / frames`.
    pub drop_rate: f32,
}

/// Returned exactly once, when the monitor trips.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Degradation {
    /// The window that tripped the monitor.
    pub window: WindowReport,
}

/// Rolling frame-drop counter with a one-way trip.
#[derive(Clone, Debug)]
pub struct FrameHealthMonitor {
    config: FrameHealthConfig,
    first_sample: Option<HostTime>,
    last_sample: Option<HostTime>,
    frames: u32,
    dropped: u32,
    windows_evaluated: u32,
    last_window: Option<WindowReport>,
    tripped: bool,
}

impl FrameHealthMonitor {
    /// Creates an idle monitor.
    #[must_use]
    pub const fn new(config: FrameHealthConfig) -> Self {
        Self {
            config,
            first_sample: None,
            last_sample: None,
            frames: 0,
            dropped: 0,
            windows_evaluated: 0,
            last_window: None,
            tripped: false,
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &FrameHealthConfig {
        &self.config
    }

    /// Feeds one animation-frame timestamp.
    pub fn sample(&mut self, now: HostTime) -> Option<Degradation> {
        if self.tripped {
            return None;
        }
        let first = *self.first_sample.get_or_insert(now);
        let previous = self.last_sample.replace(now)?;
        // Intervals that start inside the grace period are skipped.
        if previous.saturating_duration_since(first) < self.config.grace {
            return None;
        }
        self.record_interval(now.saturating_duration_since(previous))
    }

    /// Accounts one frame interval directly.
    pub fn record_interval(&mut self, interval: Duration) -> Option<Degradation> {
        if self.tripped {
            return None;
        }
        self.frames += 1;
        if interval > self.config.budget {
            self.dropped += 1;
        }
        if self.frames < self.config.window {
            return None;
        }

        self.windows_evaluated += 1;
        #[expect(
            clippy::cast_precision_loss,
            reason = "window sizes are far below f32's exact integer range"
        )]
        let drop_rate = self.dropped as f32 / self.frames as f32;
        let report = WindowReport {
            window_index: self.windows_evaluated,
            frames: self.frames,
            dropped: self.dropped,
            drop_rate,
        };
        self.last_window = Some(report);
        self.frames = 0;
        self.dropped = 0;

        if drop_rate > self.config.drop_threshold {
            self.tripped = true;
            Some(Degradation { window: report })
        } else {
            None
        }
    }

    /// Returns `true` once the monitor has tripped.
    #[must_use]
    pub const fn is_degraded(&self) -> bool {
        self.tripped
    }

    /// Number of completed windows.
    #[must_use]
    pub const fn windows_evaluated(&self) -> u32 {
        self.windows_evaluated
    }

    /// The most recently completed window, if any.
    #[must_use]
    pub const fn last_window(&self) -> Option<WindowReport> {
        self.last_window
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::PerformanceLevel;

    const GOOD: Duration = Duration::from_micros(16_000);
    const BAD: Duration = Duration::from_micros(40_000);

    fn monitor(level: PerformanceLevel) -> FrameHealthMonitor {
        FrameHealthMonitor::new(FrameHealthConfig::for_settings(
            &AnimationSettings::for_level(level),
        ))
    }

    #[test]
    fn trips_exactly_once() {
        let mut m = monitor(PerformanceLevel::High);
        let mut trips = 0;
        for i in 0..120 {
            let interval = if i < 70 { BAD } else { GOOD };
            if m.record_interval(interval).is_some() {
                trips += 1;
            }
        }
        assert_eq!(trips, 1);
        assert!(m.is_degraded());
        let w = m.last_window().unwrap();
        assert_eq!(w.dropped, 70);
        assert!((w.drop_rate - 70.0 / 120.0).abs() < 1e-6);

        for _ in 0..120 {
            assert!(m.record_interval(BAD).is_none(), "must not trip twice");
        }
        assert_eq!(m.windows_evaluated(), 1, "sampling stops after tripping");
    }

    #[test]
    fn healthy_windows_do_not_trip() {
        let mut m = monitor(PerformanceLevel::High);
        for i in 0..360 {
            // One in three frames dropped: 33% < 40%.
            let interval = if i % 3 == 0 { BAD } else { GOOD };
            assert!(m.record_interval(interval).is_none());
        }
        assert!(!m.is_degraded());
        assert_eq!(m.windows_evaluated(), 3);
    }

    #[test]
    fn rate_equal_to_threshold_does_not_trip() {
        let mut m = monitor(PerformanceLevel::Low);
        for i in 0..120 {
            let interval = if i < 60 { BAD } else { GOOD };
            assert!(m.record_interval(interval).is_none());
        }
        assert!(!m.is_degraded(), "exactly 50% is not above 50%");
    }

    #[test]
    fn exact_budget_is_not_a_drop() {
        let mut m = monitor(PerformanceLevel::High);
        for _ in 0..120 {
            m.record_interval(FRAME_BUDGET);
        }
        assert_eq!(m.last_window().unwrap().dropped, 0);
    }

    #[test]
    fn grace_period_is_ignored() {
        let mut m = monitor(PerformanceLevel::High);
        // Two seconds of terrible frames at 100 ms each.
        let mut t = HostTime(0);
        for _ in 0..20 {
            assert!(m.sample(t).is_none());
            t = t + Duration::from_millis(100);
        }
        assert_eq!(m.windows_evaluated(), 0);

        // Then 120 smooth frames.
        for _ in 0..121 {
            assert!(m.sample(t).is_none());
            t = t + GOOD;
        }
        assert_eq!(m.windows_evaluated(), 1);
        assert_eq!(m.last_window().unwrap().dropped, 0);
    }

    #[test]
    fn sampled_jank_after_grace_trips() {
        let mut m = monitor(PerformanceLevel::Medium);
        let mut t = HostTime(5_000);
        let mut tripped = None;
        // Warm up past the grace period with smooth frames.
        while t.saturating_duration_since(HostTime(5_000)) < Duration::from_millis(2000) {
            m.sample(t);
            t = t + GOOD;
        }
        for _ in 0..200 {
            if let Some(d) = m.sample(t) {
                tripped = Some(d);
            }
            t = t + BAD;
        }
        let d = tripped.expect("all-bad window trips");
        assert_eq!(d.window.window_index, 1);
        assert!(d.window.drop_rate > 0.45);
    }
}
