// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The markup contract.
//!
//! Every selector the engine queries and every class name it toggles lives
//! here. The stylesheet keys its keyframes and transitions off these names, so
//! renaming any of them is a breaking change for the page.

/// Selectors consumed by the engine.
pub mod selector {
    /// Wrapper around both hero phones; gets [`ANIMATE`](super::ANIMATE) when
    /// the intro begins.
    pub const PHONE_CONTAINER: &str = ".coin-animation";
    /// First hero phone (slides in from the right).
    pub const FIRST_PHONE: &str = ".smartphone1";
    /// Second hero phone (slides in from the left).
    pub const SECOND_PHONE: &str = ".smartphone2";
    /// Price tags revealed after the phones.
    pub const PRICE_TAG: &str = ".price";
    /// Per-digit counter containers inside a price tag.
    pub const DIGIT_CONTAINER: &str = ".digit-container";
    /// Decorative coins started last.
    pub const COIN: &str = ".coin--animated";
    /// Page header.
    pub const HEADER: &str = "header";
    /// First content section; its bottom edge drives the alternate header.
    pub const MAIN_SECTION: &str = "main";
    /// Hero content box; the alternate header is only used when present.
    pub const BOX_CONTENT: &str = ".box-content";
    /// Marquee viewport.
    pub const MARQUEE: &str = ".marquee";
    /// Marquee track holding the items.
    pub const MARQUEE_TRACK: &str = ".marquee-track";
    /// Elements hidden at first paint before the tracker takes over.
    pub const PRE_HIDDEN: &str = ".float-up, .stagger-up, .slide-from-right, .step-float-up, \
                                  .testimonial-float-up, .qa-float-up, .mobile-ad-float-up";
}

/// Data attribute on a digit container holding its target digit.
pub const DIGIT_TARGET_ATTR: &str = "data-target";

/// Generic "start your animation" class.
pub const ANIMATE: &str = "animate";
/// Added to hero phones to slide them in.
pub const SLIDE_ANIMATE: &str = "slide-animate";
/// Added to coins to start spinning.
pub const STARTED: &str = "started";
/// Reveal marker.
pub const IS_VISIBLE: &str = "is-visible";
/// Reveal-finished marker.
pub const ANIMATION_COMPLETED: &str = "animation-completed";
/// Set on the document root when the user prefers reduced motion.
pub const REDUCED_MOTION: &str = "reduced-motion";
/// Set on the document root when drop shadows are enabled.
pub const EFFECT_SHADOWS: &str = "effect-shadows";
/// Set on the document root when backdrop blur is enabled.
pub const EFFECT_BLUR: &str = "effect-blur";
/// Set on the document root when 3D transforms are enabled.
pub const EFFECT_DEPTH: &str = "effect-depth";
/// Set on the document root once frame drops trip the degradation.
pub const PERFORMANCE_DEGRADED: &str = "performance-degraded";
/// Header past the compact threshold.
pub const HEADER_HIDDEN: &str = "hidden";
/// Header past the first section.
pub const HEADER_SCROLLED: &str = "scrolled";
/// Generated glyph inside a digit container.
pub const DIGIT: &str = "digit";
/// Marker on the generated duplicate marquee track.
pub const MARQUEE_CLONE: &str = "marquee-track--clone";
