// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Header state derived from the scroll position.
//!
//! [`header_state`] is a pure function of the scroll offset and the cached
//! bottom edge of the first section. [`ScrollReactor`] wraps it with the
//! coalescing used by the scroll listener: any number of scroll events
//! between two flushes cost one recomputation, and a flush that produces the
//! state already on the page reports nothing.

use crate::profile::PerformanceProfile;
use crate::time::Duration;

/// Scroll thresholds of the header.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HeaderThresholds {
    /// The header compacts once the page is scrolled past this many pixels.
    pub compact_after: f64,
    /// The alternate style starts this many pixels before the first section
    /// ends.
    pub section_lead: f64,
}

impl HeaderThresholds {
    /// 35px compact threshold, 100px section lead.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            compact_after: 35.0,
            section_lead: 100.0,
        }
    }
}

impl Default for HeaderThresholds {
    fn default() -> Self {
        Self::standard()
    }
}

/// Derived header classes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HeaderState {
    /// `hidden` class.
    pub compact: bool,
    /// `scrolled` class, or `None` when the page has no section to measure
    /// and the class must be left alone.
    pub alternate: Option<bool>,
}

/// Computes the header state for scroll offset `y`.
#[must_use]
pub fn header_state(
    y: f64,
    section_bottom: Option<f64>,
    thresholds: &HeaderThresholds,
) -> HeaderState {
    HeaderState {
        compact: y > thresholds.compact_after,
        alternate: section_bottom.map(|bottom| y > bottom - thresholds.section_lead),
    }
}

/// How scroll events are coalesced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ThrottleMode {
    /// Flush on the next animation frame.
    AnimationFrame,
    /// Flush after a fixed timer; for platforms whose frame callbacks stall
    /// while scrolling.
    Timer(Duration),
}

impl ThrottleMode {
    /// Picks the mode for a device.
    #[must_use]
    pub const fn for_profile(profile: &PerformanceProfile) -> Self {
        if profile.platform_quirk {
            Self::Timer(Duration::from_millis(16))
        } else {
            Self::AnimationFrame
        }
    }
}

/// Coalescing scroll handler state.
#[derive(Clone, Debug)]
pub struct ScrollReactor {
    thresholds: HeaderThresholds,
    mode: ThrottleMode,
    section_bottom: Option<f64>,
    pending: bool,
    applied: Option<HeaderState>,
}

impl ScrollReactor {
    /// Creates a reactor; `section_bottom` is the first section's bottom edge
    /// in document coordinates, if the page has one.
    #[must_use]
    pub const fn new(
        thresholds: HeaderThresholds,
        mode: ThrottleMode,
        section_bottom: Option<f64>,
    ) -> Self {
        Self {
            thresholds,
            mode,
            section_bottom,
            pending: false,
            applied: None,
        }
    }

    /// The coalescing mode.
    #[must_use]
    pub const fn mode(&self) -> ThrottleMode {
        self.mode
    }

    /// Notes a scroll event. Returns `true` if the caller must schedule a
    /// flush; `false` if one is already pending.
    pub fn request(&mut self) -> bool {
        !core::mem::replace(&mut self.pending, true)
    }

    /// Whether a flush is scheduled.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending
    }

    /// Recomputes the header state at scroll offset `y`.
    ///
    /// Returns the state only if it differs from the one last returned.
    pub fn flush(&mut self, y: f64) -> Option<HeaderState> {
        self.pending = false;
        let state = header_state(y, self.section_bottom, &self.thresholds);
        if self.applied == Some(state) {
            return None;
        }
        self.applied = Some(state);
        Some(state)
    }

    /// Updates the cached section geometry, e.g. after a resize.
    pub fn set_section_bottom(&mut self, bottom: Option<f64>) {
        self.section_bottom = bottom;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{PlatformSignals, ScoringPolicy};

    fn reactor(section_bottom: Option<f64>) -> ScrollReactor {
        ScrollReactor::new(
            HeaderThresholds::standard(),
            ThrottleMode::AnimationFrame,
            section_bottom,
        )
    }

    #[test]
    fn compact_threshold_is_exclusive() {
        let t = HeaderThresholds::standard();
        assert!(!header_state(35.0, None, &t).compact);
        assert!(header_state(35.5, None, &t).compact);
        assert!(!header_state(0.0, None, &t).compact);
    }

    #[test]
    fn alternate_needs_a_section() {
        let t = HeaderThresholds::standard();
        assert_eq!(header_state(5_000.0, None, &t).alternate, None);
        assert_eq!(header_state(899.0, Some(1_000.0), &t).alternate, Some(false));
        assert_eq!(header_state(900.0, Some(1_000.0), &t).alternate, Some(false));
        assert_eq!(header_state(901.0, Some(1_000.0), &t).alternate, Some(true));
    }

    #[test]
    fn requests_coalesce() {
        let mut r = reactor(None);
        assert!(r.request());
        for _ in 0..50 {
            assert!(!r.request(), "only one flush may be pending");
        }
        assert!(r.is_pending());
        r.flush(10.0);
        assert!(!r.is_pending());
        assert!(r.request());
    }

    #[test]
    fn unchanged_state_is_not_reapplied() {
        let mut r = reactor(Some(1_000.0));
        let first = r.flush(0.0).unwrap();
        assert_eq!(
            first,
            HeaderState {
                compact: false,
                alternate: Some(false)
            }
        );
        assert!(r.flush(0.0).is_none());
        assert!(r.flush(20.0).is_none(), "still below every threshold");

        let compact = r.flush(40.0).unwrap();
        assert!(compact.compact);
        assert!(r.flush(400.0).is_none());

        let alternate = r.flush(950.0).unwrap();
        assert_eq!(alternate.alternate, Some(true));

        // Scrolling back to the top restores the initial state.
        assert_eq!(r.flush(0.0), Some(first));
    }

    #[test]
    fn section_geometry_updates() {
        let mut r = reactor(Some(1_000.0));
        assert_eq!(r.flush(950.0).unwrap().alternate, Some(true));
        r.set_section_bottom(Some(2_000.0));
        assert_eq!(r.flush(950.0).unwrap().alternate, Some(false));
    }

    #[test]
    fn quirky_platform_uses_timer() {
        let policy = ScoringPolicy::standard();
        let plain = PerformanceProfile::from_signals(&PlatformSignals::default(), &policy);
        assert_eq!(ThrottleMode::for_profile(&plain), ThrottleMode::AnimationFrame);

        let quirky = PerformanceProfile::from_signals(
            &PlatformSignals {
                platform_quirk: Some(true),
                ..PlatformSignals::default()
            },
            &policy,
        );
        assert_eq!(
            ThrottleMode::for_profile(&quirky),
            ThrottleMode::Timer(Duration::from_millis(16))
        );
    }
}
