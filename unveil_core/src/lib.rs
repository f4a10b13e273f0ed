// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! State machines and policies for landing-page motion.
//!
//! `unveil_core` holds everything about the page's motion that does not need
//! a browser: device scoring, animation tuning, the reveal state machine, the
//! frame-health trip-wire, the intro choreography, the digit roller, the
//! marquee and the header's scroll state. It is `no_std` compatible (with
//! `alloc`) and fully testable on the host.
//!
//! # Architecture
//!
//! ```text
//!   PlatformSignals ──► PerformanceProfile ──► tuning::resolve() ──► AnimationSettings
//!                                                                        │
//!          ┌─────────────────────┬──────────────────────┬────────────────┤
//!          ▼                     ▼                      ▼                ▼
//!   RevealTracker        FrameHealthMonitor      IntroDirector     digits::plan_counter
//!          │                     │                      │
//!          ▼                     ▼                      ▼
//!   RevealChanges ──► Presenter::apply()   Degradation   cue effects (backend glue)
//! ```
//!
//! **[`profile`]**: capability scoring and bucketing into a
//! [`PerformanceLevel`](profile::PerformanceLevel).
//!
//! **[`tuning`]**: the fixed parameter tuple per level.
//!
//! **[`reveal`]**: per-element `Pending → Revealed → Completed` tracking with
//! a visited-set guard and stagger bursts.
//!
//! **[`frame_health`]**: windowed frame-drop rate with a one-shot trip.
//!
//! **[`intro`]**: the hero choreography's cue chain and one-shot guard.
//!
//! **[`digits`]**: glyph strips and right-to-left start delays for the price
//! counter.
//!
//! **[`marquee`]**: constant-velocity wrap-around offsets.
//!
//! **[`scroll`]**: header state and scroll-event coalescing.
//!
//! **[`form`]**: lead-form decisions and the submission context.
//!
//! **[`classes`]**: the selectors and class names shared with the markup.
//!
//! **[`backend`]**: the [`Presenter`](backend::Presenter) trait that platform
//! backends implement.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types, with
//! the zero-overhead [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod backend;
pub mod classes;
pub mod digits;
pub mod form;
pub mod frame_health;
pub mod intro;
pub mod marquee;
pub mod profile;
pub mod reveal;
pub mod scroll;
pub mod time;
pub mod trace;
pub mod tuning;
