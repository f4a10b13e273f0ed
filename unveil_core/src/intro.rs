// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The hero intro choreography.
//!
//! The intro is a fixed chain of timer cues:
//!
//! ```text
//!   ready ─500ms─► Begin ─┬─100ms──► FirstPhone
//!                         ├─300ms──► SecondPhone
//!                         ├─1300ms─► PriceTags ─200ms─► Counters
//!                         └─3000ms─► Coins ─1500ms─► Settle
//!   ready ─2500ms─► SecondPhone (fallback)
//! ```
//!
//! [`IntroTimings`] describes the chain; [`IntroDirector`] is the one-shot
//! guard the timer callbacks go through. Each cue runs at most once, the
//! stage only moves forward, and nothing runs after [`IntroStage::Done`].
//! The fallback hangs off document ready rather than `Begin`, so the second
//! phone still arrives if the chain never starts.

use alloc::vec::Vec;

use crate::profile::PerformanceLevel;
use crate::time::Duration;
use crate::tuning::AnimationSettings;

/// Coarse progress of the intro.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IntroStage {
    /// Waiting for the initial delay.
    NotStarted,
    /// Phones sliding in.
    PhonesIn,
    /// Price tags shown.
    TagsIn,
    /// Digit counters rolling.
    CountersRolling,
    /// Coins started.
    CoinsSpinning,
    /// Choreography finished.
    Done,
}

/// One beat of the intro.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum IntroCue {
    /// Adds `animate` to the phone container.
    Begin,
    /// Slides the first phone in.
    FirstPhone,
    /// Slides the second phone in.
    SecondPhone,
    /// Shows the price tags.
    PriceTags,
    /// Starts the digit roller on every price tag.
    Counters,
    /// Starts the coins.
    Coins,
    /// Marks the intro as finished.
    Settle,
}

impl IntroCue {
    /// Every cue in chain order.
    pub const ALL: [Self; 7] = [
        Self::Begin,
        Self::FirstPhone,
        Self::SecondPhone,
        Self::PriceTags,
        Self::Counters,
        Self::Coins,
        Self::Settle,
    ];

    /// The stage reached when this cue runs.
    #[must_use]
    pub const fn stage(self) -> IntroStage {
        match self {
            Self::Begin | Self::FirstPhone | Self::SecondPhone => IntroStage::PhonesIn,
            Self::PriceTags => IntroStage::TagsIn,
            Self::Counters => IntroStage::CountersRolling,
            Self::Coins => IntroStage::CoinsSpinning,
            Self::Settle => IntroStage::Done,
        }
    }

    /// Short lowercase name for diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Begin => "begin",
            Self::FirstPhone => "first-phone",
            Self::SecondPhone => "second-phone",
            Self::PriceTags => "price-tags",
            Self::Counters => "counters",
            Self::Coins => "coins",
            Self::Settle => "settle",
        }
    }

    /// Whether the cue only runs after [`IntroCue::Begin`]. The second phone
    /// has its own fallback timer and does not.
    #[must_use]
    pub const fn needs_begin(self) -> bool {
        !matches!(self, Self::Begin | Self::SecondPhone)
    }

    const fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

/// Delays of the intro chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct IntroTimings {
    /// From document ready to [`IntroCue::Begin`].
    pub start_after_ready: Duration,
    /// From `Begin` to [`IntroCue::FirstPhone`].
    pub first_phone: Duration,
    /// From `Begin` to [`IntroCue::SecondPhone`].
    pub second_phone: Duration,
    /// From `Begin` to [`IntroCue::PriceTags`]; covers the phones' slide.
    pub price_tags: Duration,
    /// From `PriceTags` to [`IntroCue::Counters`].
    pub counters_after_tags: Duration,
    /// From `Begin` to [`IntroCue::Coins`].
    pub coins: Duration,
    /// From `Coins` to [`IntroCue::Settle`].
    pub settle_after_coins: Duration,
    /// From document ready to the independent second-phone fallback.
    pub second_phone_fallback: Duration,
}

impl IntroTimings {
    /// The production timings.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            start_after_ready: Duration::from_millis(500),
            first_phone: Duration::from_millis(100),
            second_phone: Duration::from_millis(300),
            price_tags: Duration::from_millis(1300),
            counters_after_tags: Duration::from_millis(200),
            coins: Duration::from_millis(3000),
            settle_after_coins: Duration::from_millis(1500),
            second_phone_fallback: Duration::from_millis(2500),
        }
    }

    /// Timings for a device with `settings`.
    ///
    /// Levels with a base duration shorter than the medium level compress the
    /// whole chain in proportion; medium and high run [`standard`](Self::standard).
    #[must_use]
    pub const fn for_settings(settings: &AnimationSettings) -> Self {
        let standard = Self::standard();
        let reference = AnimationSettings::for_level(PerformanceLevel::Medium)
            .duration
            .ticks();
        let actual = settings.duration.ticks();
        if actual >= reference {
            return standard;
        }
        Self {
            start_after_ready: standard.start_after_ready.scaled(actual, reference),
            first_phone: standard.first_phone.scaled(actual, reference),
            second_phone: standard.second_phone.scaled(actual, reference),
            price_tags: standard.price_tags.scaled(actual, reference),
            counters_after_tags: standard.counters_after_tags.scaled(actual, reference),
            coins: standard.coins.scaled(actual, reference),
            settle_after_coins: standard.settle_after_coins.scaled(actual, reference),
            second_phone_fallback: standard.second_phone_fallback.scaled(actual, reference),
        }
    }

    /// Cues to schedule when `cue` runs, with their delays relative to it.
    #[must_use]
    pub fn follow_ups(&self, cue: IntroCue) -> Vec<(IntroCue, Duration)> {
        match cue {
            IntroCue::Begin => alloc::vec![
                (IntroCue::FirstPhone, self.first_phone),
                (IntroCue::SecondPhone, self.second_phone),
                (IntroCue::PriceTags, self.price_tags),
                (IntroCue::Coins, self.coins),
            ],
            IntroCue::PriceTags => alloc::vec![(IntroCue::Counters, self.counters_after_tags)],
            IntroCue::Coins => alloc::vec![(IntroCue::Settle, self.settle_after_coins)],
            _ => Vec::new(),
        }
    }

    /// Cues scheduled directly from document ready.
    #[must_use]
    pub fn roots(&self) -> [(IntroCue, Duration); 2] {
        [
            (IntroCue::Begin, self.start_after_ready),
            (IntroCue::SecondPhone, self.second_phone_fallback),
        ]
    }

    /// The whole chain flattened to offsets from document ready, sorted by
    /// time. The fallback appears as a second `SecondPhone` entry.
    #[must_use]
    pub fn timeline(&self) -> Vec<(Duration, IntroCue)> {
        let mut out = Vec::new();
        let mut stack: Vec<(Duration, IntroCue)> =
            self.roots().iter().map(|&(cue, at)| (at, cue)).collect();
        while let Some((at, cue)) = stack.pop() {
            out.push((at, cue));
            for (next, delay) in self.follow_ups(cue) {
                stack.push((at.saturating_add(delay), next));
            }
        }
        out.sort();
        out
    }
}

impl Default for IntroTimings {
    fn default() -> Self {
        Self::standard()
    }
}

/// One-shot guard for intro cues.
#[derive(Clone, Copy, Debug, Default)]
pub struct IntroDirector {
    stage: Option<IntroStage>,
    fired: u8,
}

impl IntroDirector {
    /// Creates a director that has not started.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            stage: None,
            fired: 0,
        }
    }

    /// Attempts to run `cue`.
    ///
    /// Returns `true` if the caller should perform the cue's effects. A cue
    /// is refused when it already ran or the intro is already done, and a
    /// cue that [needs `Begin`](IntroCue::needs_begin) is refused before it.
    pub fn fire(&mut self, cue: IntroCue) -> bool {
        if self.fired & cue.bit() != 0 || self.stage() == IntroStage::Done {
            return false;
        }
        if cue.needs_begin() && self.stage.is_none() {
            return false;
        }
        self.fired |= cue.bit();
        self.stage = Some(self.stage().max(cue.stage()));
        true
    }

    /// Current stage.
    #[must_use]
    pub fn stage(&self) -> IntroStage {
        self.stage.unwrap_or(IntroStage::NotStarted)
    }

    /// Whether `cue` has run.
    #[must_use]
    pub const fn has_fired(&self, cue: IntroCue) -> bool {
        self.fired & cue.bit() != 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_timeline() {
        let timeline = IntroTimings::standard().timeline();
        let ms: Vec<_> = timeline
            .iter()
            .map(|&(at, cue)| (at.as_millis(), cue))
            .collect();
        assert_eq!(
            ms,
            [
                (500, IntroCue::Begin),
                (600, IntroCue::FirstPhone),
                (800, IntroCue::SecondPhone),
                (1800, IntroCue::PriceTags),
                (2000, IntroCue::Counters),
                (2500, IntroCue::SecondPhone),
                (3500, IntroCue::Coins),
                (5000, IntroCue::Settle),
            ]
        );
    }

    #[test]
    fn low_level_compresses_the_chain() {
        let low = IntroTimings::for_settings(&AnimationSettings::for_level(PerformanceLevel::Low));
        let high =
            IntroTimings::for_settings(&AnimationSettings::for_level(PerformanceLevel::High));
        assert_eq!(high, IntroTimings::standard());
        assert_ne!(low, high);
        assert_eq!(low.start_after_ready, Duration::from_millis(250));
        assert_eq!(low.coins, Duration::from_millis(1500));
        assert_eq!(low.second_phone_fallback, Duration::from_millis(1250));

        // Same order of cues, just sooner.
        let cues = |t: IntroTimings| -> Vec<IntroCue> {
            t.timeline().into_iter().map(|(_, cue)| cue).collect()
        };
        assert_eq!(cues(low), cues(high));
    }

    #[test]
    fn running_the_timeline_fires_each_cue_once() {
        let mut director = IntroDirector::new();
        let mut ran = Vec::new();
        for (_, cue) in IntroTimings::standard().timeline() {
            if director.fire(cue) {
                ran.push(cue);
            }
        }
        assert_eq!(ran, IntroCue::ALL);
        assert_eq!(director.stage(), IntroStage::Done);
    }

    #[test]
    fn stage_never_moves_backwards() {
        let mut director = IntroDirector::new();
        assert!(director.fire(IntroCue::Begin));
        assert!(director.fire(IntroCue::PriceTags));
        assert_eq!(director.stage(), IntroStage::TagsIn);

        // A phone cue arriving after the tags still runs, without rewinding.
        assert!(director.fire(IntroCue::SecondPhone));
        assert_eq!(director.stage(), IntroStage::TagsIn);
    }

    #[test]
    fn cues_before_begin_are_refused() {
        let mut director = IntroDirector::new();
        assert!(!director.fire(IntroCue::Coins));
        assert_eq!(director.stage(), IntroStage::NotStarted);
        assert!(!director.has_fired(IntroCue::Coins));
        assert!(director.fire(IntroCue::Begin));
        assert!(director.fire(IntroCue::Coins));
    }

    #[test]
    fn fallback_runs_even_if_begin_never_did() {
        let mut director = IntroDirector::new();
        assert!(director.fire(IntroCue::SecondPhone));
        assert_eq!(director.stage(), IntroStage::PhonesIn);
        // A late Begin still starts the rest of the chain; the phone stays put.
        assert!(director.fire(IntroCue::Begin));
        assert!(!director.fire(IntroCue::SecondPhone));
        assert!(director.fire(IntroCue::PriceTags));
    }

    #[test]
    fn begin_is_not_restartable() {
        let mut director = IntroDirector::new();
        assert!(director.fire(IntroCue::Begin));
        assert!(!director.fire(IntroCue::Begin));
    }

    #[test]
    fn nothing_runs_after_done() {
        let mut director = IntroDirector::new();
        director.fire(IntroCue::Begin);
        director.fire(IntroCue::Settle);
        assert_eq!(director.stage(), IntroStage::Done);
        assert!(!director.fire(IntroCue::FirstPhone));
        assert!(!director.has_fired(IntroCue::FirstPhone));
    }

    #[test]
    fn fallback_alone_still_brings_in_the_second_phone() {
        let mut director = IntroDirector::new();
        director.fire(IntroCue::Begin);
        // The chained SecondPhone never arrived; the fallback does.
        assert!(director.fire(IntroCue::SecondPhone));
        assert!(director.has_fired(IntroCue::SecondPhone));
    }
}
