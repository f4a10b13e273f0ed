// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rolling-digit counter math.
//!
//! Each digit container gets a strip of [`STRIP_LEN`] glyphs cycling `0..9`
//! twice, stacked vertically one [`GLYPH_HEIGHT_EM`] apart. The roll is a
//! single transform applied to every glyph that lifts the chosen glyph into
//! the container's window. The chosen glyph is always taken from the second
//! cycle, so even a target of `0` travels a full turn.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use crate::time::Duration;
use crate::tuning::AnimationSettings;

/// Glyphs per strip.
pub const STRIP_LEN: usize = 20;

/// Height of one glyph slot in `em`.
pub const GLYPH_HEIGHT_EM: f64 = 1.2;

/// The chosen glyph index is never below this.
pub const MIN_TARGET_INDEX: usize = 10;

/// Timing of a counter roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RollTimings {
    /// Delay before the rightmost digit starts.
    pub base_delay: Duration,
    /// Additional delay per position to the left.
    pub per_position: Duration,
    /// Transition length; non-target glyphs are hidden after this.
    pub roll: Duration,
    /// CSS timing function of the roll.
    pub easing: &'static str,
}

impl RollTimings {
    /// The production timings.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            base_delay: Duration::from_millis(200),
            per_position: Duration::from_millis(200),
            roll: Duration::from_millis(800),
            easing: "cubic-bezier(0.25, 0.46, 0.45, 0.94)",
        }
    }

    /// Timings for a device with `settings`.
    ///
    /// The roll lasts the level's base duration, so [`standard`](Self::standard)
    /// is the medium level. Without the stagger effect every digit starts
    /// together.
    #[must_use]
    pub const fn for_settings(settings: &AnimationSettings) -> Self {
        let standard = Self::standard();
        Self {
            per_position: if settings.effects.stagger {
                standard.per_position
            } else {
                Duration::ZERO
            },
            roll: settings.duration,
            ..standard
        }
    }

    /// The `transition` value written on every glyph.
    #[must_use]
    pub fn transition_css(&self) -> String {
        format!(
            "transform {}s {}",
            self.roll.as_millis_f64() / 1000.0,
            self.easing
        )
    }
}

impl Default for RollTimings {
    fn default() -> Self {
        Self::standard()
    }
}

/// A `data-target` value that is not a single decimal digit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DigitTargetError {
    /// The attribute is missing or blank.
    Empty,
    /// The attribute parsed as something other than an integer.
    NotANumber(String),
    /// The integer is outside `0..=9`.
    OutOfRange(i64),
}

impl fmt::Display for DigitTargetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "digit target is empty"),
            Self::NotANumber(raw) => write!(f, "digit target {raw:?} is not a number"),
            Self::OutOfRange(n) => write!(f, "digit target {n} is outside 0..=9"),
        }
    }
}

impl core::error::Error for DigitTargetError {}

/// Parses a container's `data-target` attribute.
///
/// Surrounding whitespace is ignored.
pub fn parse_target(raw: &str) -> Result<u8, DigitTargetError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(DigitTargetError::Empty);
    }
    let n: i64 = trimmed
        .parse()
        .map_err(|_| DigitTargetError::NotANumber(String::from(trimmed)))?;
    u8::try_from(n)
        .ok()
        .filter(|d| *d <= 9)
        .ok_or(DigitTargetError::OutOfRange(n))
}

/// The generated glyph strip for one container.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DigitStrip {
    target: u8,
    chosen: usize,
}

impl DigitStrip {
    /// Builds the strip for `target`, or `None` if no glyph at or after
    /// [`MIN_TARGET_INDEX`] shows it.
    #[must_use]
    pub fn new(target: u8) -> Option<Self> {
        let chosen = (MIN_TARGET_INDEX..STRIP_LEN).find(|&i| Self::glyph(i) == target)?;
        Some(Self { target, chosen })
    }

    /// The digit shown by glyph `index`.
    #[must_use]
    pub const fn glyph(index: usize) -> u8 {
        const CYCLE: [u8; 10] = [0, 1, 2, 3, 4, 5, 6, 7, 8, 9];
        CYCLE[index % 10]
    }

    /// The target digit.
    #[must_use]
    pub const fn target(&self) -> u8 {
        self.target
    }

    /// Index of the glyph parked in the window.
    #[must_use]
    pub const fn chosen_index(&self) -> usize {
        self.chosen
    }

    /// Resting `top` of glyph `index`, in `em`.
    #[must_use]
    #[expect(clippy::cast_precision_loss, reason = "index is below STRIP_LEN")]
    pub fn slot_top_em(index: usize) -> f64 {
        index as f64 * GLYPH_HEIGHT_EM
    }

    /// Vertical translation applied to every glyph, in `em`.
    #[must_use]
    pub fn translate_em(&self) -> f64 {
        -Self::slot_top_em(self.chosen)
    }

    /// The `transform` written on every glyph.
    #[must_use]
    pub fn transform_css(&self) -> String {
        format!("translateY({}em)", self.translate_em())
    }

    /// Whether glyph `index` stays visible after the roll.
    #[must_use]
    pub const fn keeps(&self, index: usize) -> bool {
        index == self.chosen
    }
}

/// One container's planned roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DigitRoll {
    /// Left-to-right position of the container inside its price tag.
    pub position: usize,
    /// The strip, or `None` if the container's target was invalid.
    pub strip: Option<DigitStrip>,
    /// Delay before the transform is applied.
    pub start_delay: Duration,
}

/// Plans the rolls of a price tag's containers, given left to right.
///
/// The rightmost container starts first; each position to the left waits
/// one more [`RollTimings::per_position`].
#[must_use]
pub fn plan_counter(targets: &[Option<u8>], timings: &RollTimings) -> Vec<DigitRoll> {
    let n = targets.len();
    targets
        .iter()
        .enumerate()
        .map(|(position, target)| {
            let from_right = u32::try_from(n - 1 - position).unwrap_or(u32::MAX);
            DigitRoll {
                position,
                strip: target.and_then(DigitStrip::new),
                start_delay: timings.base_delay + timings.per_position * from_right,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chosen_index_is_in_second_cycle_and_shows_target() {
        for target in 0..=9 {
            let strip = DigitStrip::new(target).unwrap();
            assert!(strip.chosen_index() >= MIN_TARGET_INDEX);
            assert!(strip.chosen_index() < STRIP_LEN);
            assert_eq!(DigitStrip::glyph(strip.chosen_index()), target);
        }
    }

    #[test]
    fn out_of_range_target_has_no_strip() {
        assert!(DigitStrip::new(10).is_none());
        assert!(DigitStrip::new(255).is_none());
    }

    #[test]
    fn translation_parks_the_chosen_glyph() {
        let strip = DigitStrip::new(0).unwrap();
        assert_eq!(strip.chosen_index(), 10);
        assert!((strip.translate_em() + 12.0).abs() < 1e-9);
        let resting = DigitStrip::slot_top_em(strip.chosen_index()) + strip.translate_em();
        assert!(resting.abs() < 1e-9, "chosen glyph ends at the window top");
        assert!(strip.keeps(10));
        assert!(!strip.keeps(0));
    }

    #[test]
    fn strip_glyphs_cycle_twice() {
        let glyphs: Vec<_> = (0..STRIP_LEN).map(DigitStrip::glyph).collect();
        assert_eq!(&glyphs[..10], &glyphs[10..]);
        assert_eq!(glyphs[7], 7);
    }

    #[test]
    fn right_digit_starts_first() {
        // "90": the 0 is on the right.
        let plan = plan_counter(&[Some(9), Some(0)], &RollTimings::standard());
        assert_eq!(plan.len(), 2);
        assert_eq!(plan[1].start_delay, Duration::from_millis(200));
        assert_eq!(plan[0].start_delay, Duration::from_millis(400));
        assert!(plan[1].start_delay < plan[0].start_delay);
        assert_eq!(plan[0].strip.unwrap().chosen_index(), 19);
        assert_eq!(plan[1].strip.unwrap().chosen_index(), 10);
    }

    #[test]
    fn invalid_container_is_skipped_but_keeps_its_slot() {
        let plan = plan_counter(&[Some(1), None, Some(3)], &RollTimings::standard());
        assert!(plan[1].strip.is_none());
        assert_eq!(plan[0].start_delay, Duration::from_millis(600));
        assert_eq!(plan[2].start_delay, Duration::from_millis(200));
    }

    #[test]
    fn roll_follows_the_performance_level() {
        use crate::profile::PerformanceLevel;

        let low = RollTimings::for_settings(&AnimationSettings::for_level(PerformanceLevel::Low));
        let mid =
            RollTimings::for_settings(&AnimationSettings::for_level(PerformanceLevel::Medium));
        let high = RollTimings::for_settings(&AnimationSettings::for_level(PerformanceLevel::High));
        assert_eq!(mid, RollTimings::standard());
        assert_eq!(low.roll, Duration::from_millis(400));
        assert_eq!(high.roll, Duration::from_millis(1200));
        assert_ne!(low, high);

        // No stagger on low: every digit starts with the rightmost one.
        let plan = plan_counter(&[Some(1), Some(2), Some(3)], &low);
        assert!(plan.iter().all(|r| r.start_delay == Duration::from_millis(200)));
        assert_eq!(low.transition_css(), "transform 0.4s cubic-bezier(0.25, 0.46, 0.45, 0.94)");
    }

    #[test]
    fn empty_price_tag_plans_nothing() {
        assert!(plan_counter(&[], &RollTimings::standard()).is_empty());
    }

    #[test]
    fn parse_targets() {
        assert_eq!(parse_target("7"), Ok(7));
        assert_eq!(parse_target(" 0 "), Ok(0));
        assert_eq!(parse_target(""), Err(DigitTargetError::Empty));
        assert_eq!(parse_target("12"), Err(DigitTargetError::OutOfRange(12)));
        assert_eq!(parse_target("-1"), Err(DigitTargetError::OutOfRange(-1)));
        assert!(matches!(
            parse_target("x"),
            Err(DigitTargetError::NotANumber(_))
        ));
    }

    #[test]
    fn css_strings() {
        let t = RollTimings::standard();
        assert_eq!(
            t.transition_css(),
            "transform 0.8s cubic-bezier(0.25, 0.46, 0.45, 0.94)"
        );
        let strip = DigitStrip::new(5).unwrap();
        assert_eq!(strip.chosen_index(), 15);
        assert_eq!(strip.transform_css(), "translateY(-18em)");
    }
}
