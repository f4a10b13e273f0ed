// Copyright 2026 the Unveil Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Device capability scoring.
//!
//! The web backend reads whatever platform signals it can into a
//! [`PlatformSignals`]; every field is optional because any of them may be
//! unsupported. [`PerformanceProfile::from_signals`] fills the gaps with the
//! [`ScoringPolicy`] fallbacks, scores the result and buckets it into a
//! [`PerformanceLevel`]. The profile is computed once and never mutated.
//!
//! ```text
//!   score = base
//!         + gpu                 (+2)
//!         + memory tier         (+0 / +1 / +2)
//!         + core count          (+0 / +1 / +2)
//!         + network tier        (-2 / -1 / 0)
//!
//!   score <= low  || reduced motion  -> Low
//!   score <= mid                     -> Medium
//!   otherwise                        -> High
//! ```

/// Coarse animation budget for the device.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PerformanceLevel {
    /// Minimal motion: short transitions, no optional effects.
    Low,
    /// Default motion.
    Medium,
    /// Full motion with every optional effect.
    High,
}

impl PerformanceLevel {
    /// Returns the lowercase level name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Returns the `performance-<level>` class applied to the document root.
    #[must_use]
    pub const fn class_name(self) -> &'static str {
        match self {
            Self::Low => "performance-low",
            Self::Medium => "performance-medium",
            Self::High => "performance-high",
        }
    }
}

/// Network quality as reported by `navigator.connection.effectiveType`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NetworkTier {
    /// `slow-2g`.
    Slow2g,
    /// `2g`.
    TwoG,
    /// `3g`.
    ThreeG,
    /// `4g` or anything better / unrecognized.
    Fast,
}

impl NetworkTier {
    /// Parses an `effectiveType` string. Unknown values are treated as fast.
    #[must_use]
    pub fn from_effective_type(value: &str) -> Self {
        match value {
            "slow-2g" => Self::Slow2g,
            "2g" => Self::TwoG,
            "3g" => Self::ThreeG,
            _ => Self::Fast,
        }
    }
}

/// Device memory bucket.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum MemoryTier {
    /// Under 4 GB.
    Low,
    /// 4 GB up to 8 GB.
    Mid,
    /// 8 GB or more.
    High,
}

impl MemoryTier {
    /// Buckets a `navigator.deviceMemory` value (gigabytes).
    #[must_use]
    pub fn from_gigabytes(gb: f64) -> Self {
        if gb >= 8.0 {
            Self::High
        } else if gb >= 4.0 {
            Self::Mid
        } else {
            Self::Low
        }
    }
}

/// Raw platform signals. `None` means the signal could not be read.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PlatformSignals {
    /// Whether a WebGL context could be created.
    pub gpu: Option<bool>,
    /// `navigator.deviceMemory` in gigabytes.
    pub device_memory_gb: Option<f64>,
    /// `navigator.hardwareConcurrency`.
    pub cores: Option<u32>,
    /// `navigator.connection.effectiveType`.
    pub network: Option<NetworkTier>,
    /// `(prefers-reduced-motion: reduce)` matched.
    pub reduced_motion: Option<bool>,
    /// The platform delivers unreliable frame callbacks while scrolling.
    pub platform_quirk: Option<bool>,
}

/// Weights, thresholds and fallbacks used to score a device.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScoringPolicy {
    /// Starting score before any signal is applied.
    pub base: i32,
    /// Added when a GPU context is available.
    pub gpu_bonus: i32,
    /// Added for [`MemoryTier::Mid`].
    pub memory_mid_bonus: i32,
    /// Added for [`MemoryTier::High`].
    pub memory_high_bonus: i32,
    /// Core count at which [`cores_mid_bonus`](Self::cores_mid_bonus) applies.
    pub cores_mid: u32,
    /// Core count at which [`cores_high_bonus`](Self::cores_high_bonus) applies.
    pub cores_high: u32,
    /// Added for a mid core count.
    pub cores_mid_bonus: i32,
    /// Added for a high core count.
    pub cores_high_bonus: i32,
    /// Added for [`NetworkTier::ThreeG`] (negative).
    pub network_3g_penalty: i32,
    /// Added for [`NetworkTier::TwoG`] and [`NetworkTier::Slow2g`] (negative).
    pub network_2g_penalty: i32,
    /// Scores at or below this are [`PerformanceLevel::Low`].
    pub low_threshold: i32,
    /// Scores at or below this (and above `low_threshold`) are
    /// [`PerformanceLevel::Medium`].
    pub mid_threshold: i32,
    /// Memory assumed when `deviceMemory` is unavailable.
    pub fallback_memory_gb: f64,
    /// Cores assumed when `hardwareConcurrency` is unavailable or zero.
    pub fallback_cores: u32,
}

impl ScoringPolicy {
    /// The tuned default policy.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            base: 5,
            gpu_bonus: 2,
            memory_mid_bonus: 1,
            memory_high_bonus: 2,
            cores_mid: 4,
            cores_high: 8,
            cores_mid_bonus: 1,
            cores_high_bonus: 2,
            network_3g_penalty: -1,
            network_2g_penalty: -2,
            low_threshold: 4,
            mid_threshold: 7,
            fallback_memory_gb: 4.0,
            fallback_cores: 4,
        }
    }

    /// Buckets a score. Reduced motion forces [`PerformanceLevel::Low`].
    #[must_use]
    pub const fn bucket(&self, score: i32, reduced_motion: bool) -> PerformanceLevel {
        if reduced_motion || score <= self.low_threshold {
            PerformanceLevel::Low
        } else if score <= self.mid_threshold {
            PerformanceLevel::Medium
        } else {
            PerformanceLevel::High
        }
    }

    fn memory_weight(&self, tier: MemoryTier) -> i32 {
        match tier {
            MemoryTier::Low => 0,
            MemoryTier::Mid => self.memory_mid_bonus,
            MemoryTier::High => self.memory_high_bonus,
        }
    }

    fn cores_weight(&self, cores: u32) -> i32 {
        if cores >= self.cores_high {
            self.cores_high_bonus
        } else if cores >= self.cores_mid {
            self.cores_mid_bonus
        } else {
            0
        }
    }

    fn network_weight(&self, network: NetworkTier) -> i32 {
        match network {
            NetworkTier::Slow2g | NetworkTier::TwoG => self.network_2g_penalty,
            NetworkTier::ThreeG => self.network_3g_penalty,
            NetworkTier::Fast => 0,
        }
    }
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self::standard()
    }
}

/// The immutable performance profile computed once at startup.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PerformanceProfile {
    /// Bucketed level.
    pub level: PerformanceLevel,
    /// Raw score before bucketing.
    pub score: i32,
    /// A GPU context is available.
    pub has_gpu: bool,
    /// Memory bucket.
    pub memory: MemoryTier,
    /// Logical core count.
    pub cores: u32,
    /// Network bucket.
    pub network: NetworkTier,
    /// The user asked for reduced motion.
    pub reduced_motion: bool,
    /// Frame callbacks are unreliable during scroll on this platform.
    pub platform_quirk: bool,
}

impl PerformanceProfile {
    /// Scores `signals` under `policy`, substituting fallbacks for missing
    /// signals.
    #[must_use]
    pub fn from_signals(signals: &PlatformSignals, policy: &ScoringPolicy) -> Self {
        let has_gpu = signals.gpu.unwrap_or(false);
        let memory_gb = signals
            .device_memory_gb
            .filter(|gb| gb.is_finite() && *gb > 0.0)
            .unwrap_or(policy.fallback_memory_gb);
        let memory = MemoryTier::from_gigabytes(memory_gb);
        let cores = signals
            .cores
            .filter(|&c| c > 0)
            .unwrap_or(policy.fallback_cores);
        let network = signals.network.unwrap_or(NetworkTier::Fast);
        let reduced_motion = signals.reduced_motion.unwrap_or(false);

        let mut score = policy.base;
        if has_gpu {
            score += policy.gpu_bonus;
        }
        score += policy.memory_weight(memory);
        score += policy.cores_weight(cores);
        score += policy.network_weight(network);

        Self {
            level: policy.bucket(score, reduced_motion),
            score,
            has_gpu,
            memory,
            cores,
            network,
            reduced_motion,
            platform_quirk: signals.platform_quirk.unwrap_or(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weak_device_on_2g_is_low() {
        let signals = PlatformSignals {
            gpu: Some(false),
            device_memory_gb: Some(2.0),
            cores: Some(2),
            network: Some(NetworkTier::TwoG),
            reduced_motion: Some(false),
            platform_quirk: None,
        };
        let profile = PerformanceProfile::from_signals(&signals, &ScoringPolicy::standard());
        // 5 + 0 (gpu) + 0 (memory) + 0 (cores) - 2 (2g) = 3
        assert_eq!(profile.score, 3);
        assert_eq!(profile.level, PerformanceLevel::Low);
    }

    #[test]
    fn unknown_signals_fall_back_to_mid_tier() {
        let profile =
            PerformanceProfile::from_signals(&PlatformSignals::default(), &ScoringPolicy::standard());
        assert_eq!(profile.memory, MemoryTier::Mid);
        assert_eq!(profile.cores, 4);
        assert_eq!(profile.network, NetworkTier::Fast);
        assert!(!profile.has_gpu);
        assert_eq!(profile.score, 7);
        assert_eq!(profile.level, PerformanceLevel::Medium);
    }

    #[test]
    fn zero_cores_uses_fallback() {
        let signals = PlatformSignals {
            cores: Some(0),
            ..PlatformSignals::default()
        };
        let profile = PerformanceProfile::from_signals(&signals, &ScoringPolicy::standard());
        assert_eq!(profile.cores, 4);
    }

    #[test]
    fn strong_device_is_high() {
        let signals = PlatformSignals {
            gpu: Some(true),
            device_memory_gb: Some(8.0),
            cores: Some(8),
            network: Some(NetworkTier::Fast),
            reduced_motion: Some(false),
            platform_quirk: Some(false),
        };
        let profile = PerformanceProfile::from_signals(&signals, &ScoringPolicy::standard());
        assert_eq!(profile.score, 11);
        assert_eq!(profile.level, PerformanceLevel::High);
    }

    #[test]
    fn bucket_boundaries() {
        let policy = ScoringPolicy::standard();
        assert_eq!(policy.bucket(4, false), PerformanceLevel::Low);
        assert_eq!(policy.bucket(5, false), PerformanceLevel::Medium);
        assert_eq!(policy.bucket(7, false), PerformanceLevel::Medium);
        assert_eq!(policy.bucket(8, false), PerformanceLevel::High);
        assert_eq!(policy.bucket(-10, false), PerformanceLevel::Low);
    }

    #[test]
    fn reduced_motion_overrides_score() {
        let policy = ScoringPolicy::standard();
        for score in [-3, 4, 5, 7, 8, 20] {
            assert_eq!(
                policy.bucket(score, true),
                PerformanceLevel::Low,
                "score {score} with reduced motion must be low"
            );
        }

        let signals = PlatformSignals {
            gpu: Some(true),
            device_memory_gb: Some(16.0),
            cores: Some(12),
            reduced_motion: Some(true),
            ..PlatformSignals::default()
        };
        let profile = PerformanceProfile::from_signals(&signals, &policy);
        assert_eq!(profile.level, PerformanceLevel::Low);
        assert!(profile.reduced_motion);
    }

    #[test]
    fn network_tiers_parse() {
        assert_eq!(NetworkTier::from_effective_type("slow-2g"), NetworkTier::Slow2g);
        assert_eq!(NetworkTier::from_effective_type("2g"), NetworkTier::TwoG);
        assert_eq!(NetworkTier::from_effective_type("3g"), NetworkTier::ThreeG);
        assert_eq!(NetworkTier::from_effective_type("4g"), NetworkTier::Fast);
        assert_eq!(NetworkTier::from_effective_type(""), NetworkTier::Fast);
    }

    #[test]
    fn memory_tiers() {
        assert_eq!(MemoryTier::from_gigabytes(0.5), MemoryTier::Low);
        assert_eq!(MemoryTier::from_gigabytes(4.0), MemoryTier::Mid);
        assert_eq!(MemoryTier::from_gigabytes(8.0), MemoryTier::High);
    }
}
