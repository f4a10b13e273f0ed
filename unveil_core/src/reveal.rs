// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll-triggered reveal tracking.
//!
//! [`RevealTracker`] owns one [`RevealState`] per registered element and is
//! the only writer of those states. Each element moves strictly
//!
//! ```text
//!   Pending ──(first viewport crossing)──► Revealed ──(category delay)──► Completed
//! ```
//!
//! exactly once. A crossing is accepted only if the element is absent from
//! the visited set *and* still `Pending`; the viewport observer can deliver
//! an enter/leave/enter burst before any class write is visible, and both
//! checks have to agree before anything happens.
//!
//! Like a layer store, the tracker accumulates the effects of each operation
//! in a [`RevealChanges`] which a [`Presenter`](crate::backend::Presenter)
//! drains and applies to the DOM.

use alloc::collections::BTreeSet;
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use kurbo::Rect;

use crate::frame_health::FRAME_BUDGET;
use crate::time::{Duration, HostTime};
use crate::tuning::AnimationSettings;

/// A family of revealable elements sharing a selector and timing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Category {
    /// `.section-title`
    SectionTitle,
    /// `.recommend-item`
    RecommendItem,
    /// `.about`
    About,
    /// `.iphone-item`
    IphoneItem,
    /// `.evi-item`
    EvidenceItem,
    /// `.ad-panel`
    AdPanel,
    /// `.mobile-ad-panel`
    MobileAdPanel,
    /// `.step-item`
    StepItem,
    /// `.testimonial-card`
    TestimonialCard,
    /// `.qa-item`
    QaItem,
}

impl Category {
    /// Every category, in registration order.
    pub const ALL: [Self; 10] = [
        Self::SectionTitle,
        Self::RecommendItem,
        Self::About,
        Self::IphoneItem,
        Self::EvidenceItem,
        Self::AdPanel,
        Self::MobileAdPanel,
        Self::StepItem,
        Self::TestimonialCard,
        Self::QaItem,
    ];

    /// CSS selector matching elements of this category.
    #[must_use]
    pub const fn selector(self) -> &'static str {
        match self {
            Self::SectionTitle => ".section-title",
            Self::RecommendItem => ".recommend-item",
            Self::About => ".about",
            Self::IphoneItem => ".iphone-item",
            Self::EvidenceItem => ".evi-item",
            Self::AdPanel => ".ad-panel",
            Self::MobileAdPanel => ".mobile-ad-panel",
            Self::StepItem => ".step-item",
            Self::TestimonialCard => ".testimonial-card",
            Self::QaItem => ".qa-item",
        }
    }

    /// Time from reveal to the `animation-completed` marker.
    #[must_use]
    pub const fn completion_delay(self) -> Duration {
        match self {
            Self::SectionTitle | Self::About | Self::AdPanel | Self::MobileAdPanel => {
                Duration::from_millis(1500)
            }
            Self::StepItem => Duration::from_millis(1800),
            _ => Duration::from_millis(1200),
        }
    }

    /// Intersection threshold and root margin for this category.
    #[must_use]
    pub const fn observe_options(self) -> ObserveOptions {
        match self {
            Self::RecommendItem | Self::About | Self::TestimonialCard | Self::QaItem => {
                ObserveOptions::new(0.2, -30.0)
            }
            Self::IphoneItem | Self::EvidenceItem => ObserveOptions::new(0.15, -50.0),
            Self::SectionTitle | Self::AdPanel | Self::MobileAdPanel | Self::StepItem => {
                ObserveOptions::new(0.15, -30.0)
            }
        }
    }

    /// Pre-animation pose written at registration.
    #[must_use]
    pub const fn entrance(self) -> Entrance {
        match self {
            Self::RecommendItem | Self::TestimonialCard | Self::QaItem => Entrance::Rise(40.0),
            Self::IphoneItem | Self::EvidenceItem => Entrance::SlideFromRight(60.0),
            _ => Entrance::Fade,
        }
    }
}

/// How far an element must be inside the viewport before it is revealed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObserveOptions {
    /// Fraction of the element's area that must be visible.
    pub threshold: f64,
    /// Adjustment of the viewport's bottom edge in pixels. Negative values
    /// shrink the root so the trigger fires a little before the element is
    /// fully on screen.
    pub bottom_margin: f64,
}

impl ObserveOptions {
    /// Creates options from a threshold and a bottom root margin.
    #[must_use]
    pub const fn new(threshold: f64, bottom_margin: f64) -> Self {
        Self {
            threshold,
            bottom_margin,
        }
    }

    /// The `rootMargin` string for an `IntersectionObserver`.
    #[must_use]
    pub fn root_margin(&self) -> String {
        format!("0px 0px {}px 0px", self.bottom_margin)
    }

    /// Visible fraction an element of `element_height` needs inside a root of
    /// `root_height`.
    ///
    /// An element too tall to ever show `threshold` of itself only needs to
    /// intersect; the native observer reports no ratio between its
    /// configured thresholds, so a smaller cap would never be seen.
    #[must_use]
    pub fn required_ratio(&self, element_height: f64, root_height: f64) -> f64 {
        if element_height * self.threshold > root_height.max(0.0) {
            0.0
        } else {
            self.threshold
        }
    }

    /// Whether `element` crosses the threshold inside `viewport`, both in
    /// client coordinates.
    ///
    /// This is the geometric rule the polling fallback applies; it mirrors the
    /// native observer's `isIntersecting && intersectionRatio >= threshold`,
    /// relaxed by [`required_ratio`](Self::required_ratio) for tall elements.
    #[must_use]
    pub fn crossed(&self, element: Rect, viewport: Rect) -> bool {
        let root = Rect::new(
            viewport.x0,
            viewport.y0,
            viewport.x1,
            viewport.y1 + self.bottom_margin,
        );
        let area = element.area();
        if area <= 0.0 {
            return element.x0 >= root.x0
                && element.x0 <= root.x1
                && element.y0 >= root.y0
                && element.y0 <= root.y1;
        }
        let visible = element.intersect(root).area();
        visible > 0.0 && visible / area >= self.required_ratio(element.height(), root.height())
    }
}

/// Initial displacement applied before the reveal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Entrance {
    /// Opacity only.
    Fade,
    /// Starts the given number of pixels below its final position.
    Rise(f64),
    /// Starts the given number of pixels right of its final position.
    SlideFromRight(f64),
}

impl Entrance {
    /// CSS `transform` for the pre-animation pose, if any.
    #[must_use]
    pub fn initial_transform(self) -> Option<String> {
        match self {
            Self::Fade => None,
            Self::Rise(px) => Some(format!("translate3d(0, {px}px, 0)")),
            Self::SlideFromRight(px) => Some(format!("translate3d({px}px, 0, 0)")),
        }
    }
}

/// Lifecycle of a tracked element.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RevealState {
    /// Registered and hidden, waiting for a viewport crossing.
    Pending,
    /// Entrance animation started.
    Revealed,
    /// Entrance animation visually finished.
    Completed,
}

/// Handle to an element registered with a [`RevealTracker`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TrackedId(u32);

impl TrackedId {
    /// Returns the slot index of this handle.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for TrackedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TrackedId({})", self.0)
    }
}

/// One element's accepted `Pending → Revealed` transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RevealTransition {
    /// The element that was revealed.
    pub id: TrackedId,
    /// Transition delay from staggering (zero for the first of a burst).
    pub delay: Duration,
    /// When to call [`RevealTracker::complete`].
    pub complete_after: Duration,
}

/// Effects accumulated since the last [`RevealTracker::take_changes`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RevealChanges {
    /// Newly registered elements that need their pre-animation pose.
    pub registered: Vec<TrackedId>,
    /// Accepted reveals.
    pub revealed: Vec<RevealTransition>,
    /// Elements that reached [`RevealState::Completed`].
    pub completed: Vec<TrackedId>,
}

impl RevealChanges {
    /// Returns `true` if nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registered.is_empty() && self.revealed.is_empty() && self.completed.is_empty()
    }
}

#[derive(Clone, Copy, Debug)]
struct Entry {
    category: Category,
    state: RevealState,
}

/// Per-element reveal state machine with a visited-set guard.
#[derive(Debug)]
pub struct RevealTracker {
    entries: Vec<Entry>,
    visited: BTreeSet<TrackedId>,
    stagger: Duration,
    last_crossing: Option<HostTime>,
    burst_len: u32,
    changes: RevealChanges,
}

impl RevealTracker {
    /// Creates an empty tracker using the stagger from `settings`.
    #[must_use]
    pub fn new(settings: &AnimationSettings) -> Self {
        Self {
            entries: Vec::new(),
            visited: BTreeSet::new(),
            stagger: settings.effective_stagger(),
            last_crossing: None,
            burst_len: 0,
            changes: RevealChanges::default(),
        }
    }

    /// Registers an element of `category` in the `Pending` state.
    pub fn register(&mut self, category: Category) -> TrackedId {
        #[expect(
            clippy::cast_possible_truncation,
            reason = "a page never registers u32::MAX elements"
        )]
        let id = TrackedId(self.entries.len() as u32);
        self.entries.push(Entry {
            category,
            state: RevealState::Pending,
        });
        self.changes.registered.push(id);
        id
    }

    /// Handles a threshold crossing for `id` observed at `now`.
    ///
    /// Returns the accepted transition, or `None` if the element is unknown
    /// or was already revealed.
    pub fn on_crossing(&mut self, id: TrackedId, now: HostTime) -> Option<RevealTransition> {
        let entry = self.entries.get_mut(id.0 as usize)?;
        if self.visited.contains(&id) || entry.state != RevealState::Pending {
            return None;
        }
        self.visited.insert(id);
        entry.state = RevealState::Revealed;
        let complete_after = entry.category.completion_delay();

        // Crossings within one frame of each other form a cascade.
        let position = match self.last_crossing {
            Some(prev) if now.saturating_duration_since(prev) <= FRAME_BUDGET => {
                self.burst_len += 1;
                self.burst_len - 1
            }
            _ => {
                self.burst_len = 1;
                0
            }
        };
        self.last_crossing = Some(now);

        let transition = RevealTransition {
            id,
            delay: self.stagger * position,
            complete_after,
        };
        self.changes.revealed.push(transition);
        Some(transition)
    }

    /// Marks a revealed element as completed.
    ///
    /// Returns `false` (and changes nothing) unless the element is currently
    /// `Revealed`.
    pub fn complete(&mut self, id: TrackedId) -> bool {
        match self.entries.get_mut(id.0 as usize) {
            Some(entry) if entry.state == RevealState::Revealed => {
                entry.state = RevealState::Completed;
                self.changes.completed.push(id);
                true
            }
            _ => false,
        }
    }

    /// Returns the state of `id`.
    #[must_use]
    pub fn state(&self, id: TrackedId) -> Option<RevealState> {
        self.entries.get(id.0 as usize).map(|e| e.state)
    }

    /// Returns the category of `id`.
    #[must_use]
    pub fn category(&self, id: TrackedId) -> Option<Category> {
        self.entries.get(id.0 as usize).map(|e| e.category)
    }

    /// Elements whose entrance is running (revealed but not completed).
    pub fn animating(&self) -> impl Iterator<Item = TrackedId> + '_ {
        self.ids_in(RevealState::Revealed)
    }

    /// Elements currently in `state`.
    pub fn ids_in(&self, state: RevealState) -> impl Iterator<Item = TrackedId> + '_ {
        self.entries
            .iter()
            .enumerate()
            .filter(move |(_, e)| e.state == state)
            .map(|(i, _)| {
                #[expect(
                    clippy::cast_possible_truncation,
                    reason = "indices were created from u32 handles"
                )]
                let index = i as u32;
                TrackedId(index)
            })
    }

    /// Number of registered elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drains the accumulated changes.
    pub fn take_changes(&mut self) -> RevealChanges {
        core::mem::take(&mut self.changes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::PerformanceLevel;

    fn tracker(level: PerformanceLevel) -> RevealTracker {
        RevealTracker::new(&AnimationSettings::for_level(level))
    }

    #[test]
    fn registered_elements_start_pending() {
        let mut t = tracker(PerformanceLevel::Medium);
        let a = t.register(Category::QaItem);
        let b = t.register(Category::StepItem);
        assert_eq!(t.state(a), Some(RevealState::Pending));
        assert_eq!(t.category(b), Some(Category::StepItem));
        assert_eq!(t.take_changes().registered, [a, b]);
        assert!(t.take_changes().is_empty(), "changes are drained");
    }

    #[test]
    fn reveal_happens_once() {
        let mut t = tracker(PerformanceLevel::Medium);
        let id = t.register(Category::About);
        let first = t.on_crossing(id, HostTime(1_000)).expect("first crossing reveals");
        assert_eq!(first.complete_after, Duration::from_millis(1500));
        assert!(t.on_crossing(id, HostTime(2_000)).is_none());
        assert!(t.on_crossing(id, HostTime(500_000)).is_none());
        assert_eq!(t.take_changes().revealed.len(), 1);
    }

    #[test]
    fn repeated_crossings_in_one_burst_reveal_exactly_once() {
        let mut t = tracker(PerformanceLevel::High);
        let id = t.register(Category::EvidenceItem);
        let accepted: Vec<_> = (0..3)
            .filter_map(|i| t.on_crossing(id, HostTime(10 + i)))
            .collect();
        assert_eq!(accepted.len(), 1);
        assert_eq!(t.state(id), Some(RevealState::Revealed));
    }

    #[test]
    fn registration_alone_does_not_reveal() {
        let mut t = tracker(PerformanceLevel::High);
        let id = t.register(Category::EvidenceItem);
        let changes = t.take_changes();
        assert_eq!(changes.registered, [id]);
        assert!(changes.revealed.is_empty(), "poses are written before any crossing");
        assert_eq!(t.state(id), Some(RevealState::Pending));
        assert_eq!(t.animating().count(), 0);
    }

    #[test]
    fn completion_requires_reveal() {
        let mut t = tracker(PerformanceLevel::Medium);
        let id = t.register(Category::SectionTitle);
        assert!(!t.complete(id), "pending element cannot complete");
        assert_eq!(t.state(id), Some(RevealState::Pending));

        t.on_crossing(id, HostTime(0));
        assert!(t.complete(id));
        assert!(!t.complete(id), "completion is one-shot");
        assert_eq!(t.state(id), Some(RevealState::Completed));

        let changes = t.take_changes();
        assert_eq!(changes.completed, [id]);
    }

    #[test]
    fn completed_element_is_never_revealed_again() {
        let mut t = tracker(PerformanceLevel::Medium);
        let id = t.register(Category::TestimonialCard);
        t.on_crossing(id, HostTime(0));
        t.complete(id);
        assert!(t.on_crossing(id, HostTime(5_000_000)).is_none());
        assert_eq!(t.state(id), Some(RevealState::Completed));
    }

    #[test]
    fn unknown_id_is_ignored() {
        let mut t = tracker(PerformanceLevel::Low);
        let mut other = tracker(PerformanceLevel::Low);
        other.register(Category::QaItem);
        let foreign = other.register(Category::QaItem);
        assert!(t.on_crossing(foreign, HostTime(0)).is_none());
        assert!(!t.complete(foreign));
        assert_eq!(t.state(foreign), None);
    }

    #[test]
    fn transitions_are_monotonic_under_arbitrary_event_orders() {
        let mut t = tracker(PerformanceLevel::Medium);
        let ids: Vec<_> = (0..8)
            .map(|i| t.register(Category::ALL[i % Category::ALL.len()]))
            .collect();
        let mut previous: Vec<_> = ids.iter().map(|&id| t.state(id)).collect();
        let mut reveals = [0_u32; 8];

        // Small LCG so the sequence is deterministic.
        let mut seed: u32 = 0x1234_5678;
        for step in 0..400_u64 {
            seed = seed.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            let which = (seed >> 16) as usize % ids.len();
            let id = ids[which];
            if seed & 1 == 0 {
                if t.on_crossing(id, HostTime(step * 7_000)).is_some() {
                    reveals[which] += 1;
                }
            } else {
                t.complete(id);
            }

            for (i, &id) in ids.iter().enumerate() {
                let now = t.state(id);
                assert!(now >= previous[i], "state of {id:?} went backwards");
                previous[i] = now;
            }
        }
        assert!(reveals.iter().all(|&n| n <= 1), "revealed more than once: {reveals:?}");
    }

    #[test]
    fn simultaneous_crossings_are_staggered() {
        let mut t = tracker(PerformanceLevel::High);
        let a = t.register(Category::RecommendItem);
        let b = t.register(Category::RecommendItem);
        let c = t.register(Category::RecommendItem);
        let d = t.register(Category::RecommendItem);

        let now = HostTime(1_000_000);
        let ta = t.on_crossing(a, now).unwrap();
        let tb = t.on_crossing(b, now).unwrap();
        let tc = t.on_crossing(c, now + Duration::from_millis(5)).unwrap();
        assert_eq!(ta.delay, Duration::ZERO);
        assert_eq!(tb.delay, Duration::from_millis(150));
        assert_eq!(tc.delay, Duration::from_millis(300));

        // A crossing well after the burst starts a new one.
        let td = t.on_crossing(d, now + Duration::from_millis(500)).unwrap();
        assert_eq!(td.delay, Duration::ZERO);
    }

    #[test]
    fn low_level_does_not_stagger() {
        let mut t = tracker(PerformanceLevel::Low);
        let a = t.register(Category::QaItem);
        let b = t.register(Category::QaItem);
        t.on_crossing(a, HostTime(0));
        let tb = t.on_crossing(b, HostTime(0)).unwrap();
        assert_eq!(tb.delay, Duration::ZERO);
    }

    #[test]
    fn animating_lists_revealed_only() {
        let mut t = tracker(PerformanceLevel::Medium);
        let a = t.register(Category::QaItem);
        let b = t.register(Category::QaItem);
        let c = t.register(Category::QaItem);
        t.on_crossing(a, HostTime(0));
        t.on_crossing(b, HostTime(0));
        t.complete(b);
        let animating: Vec<_> = t.animating().collect();
        assert_eq!(animating, [a]);
        assert_eq!(t.ids_in(RevealState::Pending).collect::<Vec<_>>(), [c]);
    }

    #[test]
    fn completion_delays_by_category() {
        assert_eq!(
            Category::SectionTitle.completion_delay(),
            Duration::from_millis(1500)
        );
        assert_eq!(Category::About.completion_delay(), Duration::from_millis(1500));
        assert_eq!(Category::AdPanel.completion_delay(), Duration::from_millis(1500));
        assert_eq!(Category::StepItem.completion_delay(), Duration::from_millis(1800));
        assert_eq!(Category::QaItem.completion_delay(), Duration::from_millis(1200));
        assert_eq!(
            Category::EvidenceItem.completion_delay(),
            Duration::from_millis(1200)
        );
    }

    #[test]
    fn thresholds_stay_in_range() {
        for category in Category::ALL {
            let o = category.observe_options();
            assert!(
                (0.15..=0.2).contains(&o.threshold),
                "{category:?} threshold out of range"
            );
            assert!(o.bottom_margin < 0.0, "{category:?} margin must shrink the root");
        }
        assert_eq!(
            Category::IphoneItem.observe_options().root_margin(),
            "0px 0px -50px 0px"
        );
    }

    #[test]
    fn crossing_geometry_respects_margin_and_threshold() {
        let viewport = Rect::new(0.0, 0.0, 1200.0, 800.0);
        let opts = ObserveOptions::new(0.15, -30.0);

        // Entirely below the shrunken root.
        assert!(!opts.crossed(Rect::new(0.0, 780.0, 100.0, 880.0), viewport));
        // 30 of 100px inside the root (root bottom is 770).
        assert!(opts.crossed(Rect::new(0.0, 740.0, 100.0, 840.0), viewport));
        // 10 of 100px inside: below 15%.
        assert!(!opts.crossed(Rect::new(0.0, 760.0, 100.0, 860.0), viewport));
        // Scrolled past the top.
        assert!(!opts.crossed(Rect::new(0.0, -200.0, 100.0, -100.0), viewport));
        // Fully visible.
        assert!(opts.crossed(Rect::new(0.0, 100.0, 100.0, 200.0), viewport));
    }

    #[test]
    fn elements_taller_than_the_reach_of_their_threshold_reveal_on_intersection() {
        let viewport = Rect::new(0.0, 0.0, 1200.0, 800.0);
        let opts = ObserveOptions::new(0.15, -30.0);

        // 10000px tall: at most 770 / 10000 = 7.7% can ever be visible.
        assert!(opts.required_ratio(10_000.0, 770.0).abs() < 1e-12);
        assert!(opts.crossed(Rect::new(0.0, 700.0, 100.0, 10_700.0), viewport));
        assert!(opts.crossed(Rect::new(0.0, -5_000.0, 100.0, 5_000.0), viewport));
        // Still needs to intersect.
        assert!(!opts.crossed(Rect::new(0.0, 780.0, 100.0, 10_780.0), viewport));

        // An element that fits keeps its threshold.
        assert!((opts.required_ratio(1_000.0, 770.0) - 0.15).abs() < 1e-12);
    }

    #[test]
    fn entrance_transforms() {
        assert_eq!(Category::SectionTitle.entrance().initial_transform(), None);
        assert_eq!(
            Category::QaItem.entrance().initial_transform().as_deref(),
            Some("translate3d(0, 40px, 0)")
        );
        assert_eq!(
            Category::IphoneItem.entrance().initial_transform().as_deref(),
            Some("translate3d(60px, 0, 0)")
        );
    }
}
