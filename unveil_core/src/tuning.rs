// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Animation parameters per performance level.
//!
//! [`resolve`] is a total, pure function of the profile's level. Callers
//! resolve once at bootstrap and share the result with the reveal tracker,
//! the intro, the digit roller and the frame-health monitor.

use crate::classes;
use crate::profile::{PerformanceLevel, PerformanceProfile};
use crate::time::Duration;

/// Optional effects that can be switched off on weaker devices.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Effects {
    /// Cascade simultaneous reveals with a per-element delay.
    pub stagger: bool,
    /// Drop shadows on revealed panels.
    pub shadows: bool,
    /// Backdrop blur.
    pub blur: bool,
    /// 3D transforms (parallax, coin spin depth).
    pub depth: bool,
}

impl Effects {
    /// Every effect off.
    pub const NONE: Self = Self {
        stagger: false,
        shadows: false,
        blur: false,
        depth: false,
    };

    /// Every effect on.
    pub const ALL: Self = Self {
        stagger: true,
        shadows: true,
        blur: true,
        depth: true,
    };

    /// Document-root classes for the stylesheet effects that are on.
    ///
    /// Staggering is applied inline per element and has no class.
    pub fn class_names(self) -> impl Iterator<Item = &'static str> {
        [
            (self.shadows, classes::EFFECT_SHADOWS),
            (self.blur, classes::EFFECT_BLUR),
            (self.depth, classes::EFFECT_DEPTH),
        ]
        .into_iter()
        .filter_map(|(on, class)| on.then_some(class))
    }
}

/// Hand-tuned animation parameters for one [`PerformanceLevel`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationSettings {
    /// The level these settings were derived from.
    pub level: PerformanceLevel,
    /// Base transition duration.
    pub duration: Duration,
    /// Delay between consecutive items of a cascade.
    pub stagger_delay: Duration,
    /// Optional effects.
    pub effects: Effects,
    /// Frame drop rate above which the page degrades.
    pub drop_threshold: f32,
    /// Transition duration applied to in-flight animations after degrading.
    pub degraded_duration: Duration,
}

impl AnimationSettings {
    /// Returns the fixed parameter tuple for `level`.
    #[must_use]
    pub const fn for_level(level: PerformanceLevel) -> Self {
        match level {
            PerformanceLevel::Low => Self {
                level,
                duration: Duration::from_millis(400),
                stagger_delay: Duration::from_millis(50),
                effects: Effects::NONE,
                drop_threshold: 0.5,
                degraded_duration: Duration::from_millis(200),
            },
            PerformanceLevel::Medium => Self {
                level,
                duration: Duration::from_millis(800),
                stagger_delay: Duration::from_millis(100),
                effects: Effects {
                    stagger: true,
                    shadows: true,
                    blur: false,
                    depth: false,
                },
                drop_threshold: 0.45,
                degraded_duration: Duration::from_millis(300),
            },
            PerformanceLevel::High => Self {
                level,
                duration: Duration::from_millis(1200),
                stagger_delay: Duration::from_millis(150),
                effects: Effects::ALL,
                drop_threshold: 0.4,
                degraded_duration: Duration::from_millis(400),
            },
        }
    }

    /// Stagger delay for cascades, or zero when staggering is disabled.
    #[must_use]
    pub const fn effective_stagger(&self) -> Duration {
        if self.effects.stagger {
            self.stagger_delay
        } else {
            Duration::ZERO
        }
    }
}

/// Maps a profile to its animation settings.
#[must_use]
pub const fn resolve(profile: &PerformanceProfile) -> AnimationSettings {
    AnimationSettings::for_level(profile.level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{PlatformSignals, ScoringPolicy};
    use alloc::vec::Vec;

    #[test]
    fn resolve_is_pure() {
        let profile =
            PerformanceProfile::from_signals(&PlatformSignals::default(), &ScoringPolicy::standard());
        assert_eq!(resolve(&profile), resolve(&profile));
    }

    #[test]
    fn every_level_has_settings() {
        for level in [
            PerformanceLevel::Low,
            PerformanceLevel::Medium,
            PerformanceLevel::High,
        ] {
            let s = AnimationSettings::for_level(level);
            assert_eq!(s.level, level);
            assert!(s.degraded_duration < s.duration, "degrading must shorten");
            assert!(
                (0.4..=0.5).contains(&s.drop_threshold),
                "drop threshold out of range for {level:?}"
            );
        }
    }

    #[test]
    fn low_level_disables_effects_and_stagger() {
        let s = AnimationSettings::for_level(PerformanceLevel::Low);
        assert_eq!(s.effects, Effects::NONE);
        assert_eq!(s.effective_stagger(), Duration::ZERO);
    }

    #[test]
    fn effect_classes_follow_the_level() {
        let classes_for =
            |level| -> Vec<_> { AnimationSettings::for_level(level).effects.class_names().collect() };
        assert!(classes_for(PerformanceLevel::Low).is_empty());
        assert_eq!(classes_for(PerformanceLevel::Medium), [classes::EFFECT_SHADOWS]);
        assert_eq!(
            classes_for(PerformanceLevel::High),
            [classes::EFFECT_SHADOWS, classes::EFFECT_BLUR, classes::EFFECT_DEPTH]
        );
    }

    #[test]
    fn higher_levels_run_longer() {
        let low = AnimationSettings::for_level(PerformanceLevel::Low);
        let mid = AnimationSettings::for_level(PerformanceLevel::Medium);
        let high = AnimationSettings::for_level(PerformanceLevel::High);
        assert!(low.duration < mid.duration);
        assert!(mid.duration < high.duration);
        assert_eq!(high.effective_stagger(), Duration::from_millis(150));
    }
}
