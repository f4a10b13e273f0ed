// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Constant-velocity looping marquee.
//!
//! Two copies of the same track move left by [`MarqueeConfig::velocity`] on
//! every timer tick. The primary starts at `0` and the clone one width to its
//! right. When a track's offset reaches `-width` it jumps forward by two
//! widths, landing exactly where the other copy's right edge is, so the seam
//! never shows. Both offsets stay in `(-width, width]`.

use alloc::format;
use alloc::string::String;

use crate::time::Duration;

/// Speed and cadence of the marquee.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarqueeConfig {
    /// Pixels moved per tick.
    pub velocity: f64,
    /// Timer interval between ticks.
    pub interval: Duration,
}

impl MarqueeConfig {
    /// 1px every 20ms.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            velocity: 1.0,
            interval: Duration::from_millis(20),
        }
    }
}

impl Default for MarqueeConfig {
    fn default() -> Self {
        Self::standard()
    }
}

/// Offsets of the two tracks, in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarqueeOffsets {
    /// The original track.
    pub primary: f64,
    /// The duplicated track.
    pub clone: f64,
}

/// Marquee state.
#[derive(Clone, Debug)]
pub struct Marquee {
    config: MarqueeConfig,
    width: f64,
    offsets: MarqueeOffsets,
    paused: bool,
    wraps: u64,
}

impl Marquee {
    /// Creates a marquee for a track `width` pixels wide.
    ///
    /// Returns `None` for a non-positive or non-finite width; such a track
    /// has nothing to scroll.
    #[must_use]
    pub fn new(width: f64, config: MarqueeConfig) -> Option<Self> {
        if !(width.is_finite() && width > 0.0) {
            return None;
        }
        Some(Self {
            config,
            width,
            offsets: MarqueeOffsets {
                primary: 0.0,
                clone: width,
            },
            paused: false,
            wraps: 0,
        })
    }

    /// Advances both tracks by one step.
    ///
    /// Returns the new offsets, or `None` while paused.
    pub fn tick(&mut self) -> Option<MarqueeOffsets> {
        if self.paused {
            return None;
        }
        let (width, velocity) = (self.width, self.config.velocity);
        let mut wraps = 0;
        for offset in [&mut self.offsets.primary, &mut self.offsets.clone] {
            let mut next = *offset - velocity;
            if next <= -width {
                next += 2.0 * width;
                wraps += 1;
            }
            *offset = next;
        }
        self.wraps += wraps;
        Some(self.offsets)
    }

    /// Stops ticking until [`resume`](Self::resume).
    pub fn pause(&mut self) {
        self.paused = true;
    }

    /// Resumes ticking.
    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Whether the marquee is paused.
    #[must_use]
    pub const fn is_paused(&self) -> bool {
        self.paused
    }

    /// Current offsets.
    #[must_use]
    pub const fn offsets(&self) -> MarqueeOffsets {
        self.offsets
    }

    /// Total wraps of both tracks so far.
    #[must_use]
    pub const fn wraps(&self) -> u64 {
        self.wraps
    }

    /// Track width in pixels.
    #[must_use]
    pub const fn width(&self) -> f64 {
        self.width
    }

    /// The configuration.
    #[must_use]
    pub const fn config(&self) -> &MarqueeConfig {
        &self.config
    }

    /// Adopts a new track width, restarting from the initial layout.
    ///
    /// Ignored for widths [`new`](Self::new) would reject.
    pub fn resize(&mut self, width: f64) {
        if width.is_finite() && width > 0.0 {
            self.width = width;
            self.offsets = MarqueeOffsets {
                primary: 0.0,
                clone: width,
            };
        }
    }
}

/// CSS `transform` for a horizontal offset.
#[must_use]
pub fn translate_x_css(offset: f64) -> String {
    format!("translateX({offset}px)")
}
