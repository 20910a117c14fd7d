//! Percentage-to-clock conversion.
//!
//! One full lifespan is one synthetic day. The elapsed fraction of that day is
//! broken down into hours, minutes and seconds by truncating at each step and
//! carrying only the fractional remainder forward.

use crate::interval::TimeInterval;
use crate::time::Timestamp;
use crate::types::PercentagePolicy;
use libm::trunc;

/// Hours in one synthetic day.
pub const HOURS_IN_DAY: f64 = 24.0;

/// Minutes in one synthetic hour.
pub const MINUTES_IN_HOUR: f64 = 60.0;

/// Seconds in one synthetic minute.
pub const SECONDS_IN_MINUTE: f64 = 60.0;

/// Positional breakdown of a life percentage.
///
/// For percentages in `[0, 1)`, `hours` is in `[0, 24)` and `minutes` and
/// `seconds` are in `[0, 60)`. Negative percentages give non-positive components.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClockDecomposition {
    /// Whole lifespans elapsed.
    pub days: i64,
    /// Remainder of `days`.
    pub days_fractional: f64,
    /// Whole synthetic hours into the current lifespan.
    pub hours: i64,
    /// Remainder of `hours`.
    pub hours_fractional: f64,
    /// Whole synthetic minutes into the current hour.
    pub minutes: i64,
    /// Remainder of `minutes`.
    pub minutes_fractional: f64,
    /// Whole synthetic seconds into the current minute.
    pub seconds: i64,
    /// Remainder of `seconds`.
    pub seconds_fractional: f64,
}

impl ClockDecomposition {
    /// Rebuilds the percentage this decomposition was taken from.
    pub fn to_percentage(&self) -> f64 {
        let seconds = self.seconds as f64 + self.seconds_fractional;
        let minutes = self.minutes as f64 + seconds / SECONDS_IN_MINUTE;
        let hours = self.hours as f64 + minutes / MINUTES_IN_HOUR;
        self.days as f64 + hours / HOURS_IN_DAY
    }
}

/// Exact length of `interval` in milliseconds.
#[inline]
pub fn compute_total_duration_ms(interval: &TimeInterval) -> i64 {
    interval.total_duration_ms()
}

/// Fraction of `interval` elapsed at `now`.
///
/// Values above 1.0 (past the end) are returned as-is. Values below zero are
/// returned as-is under [`PercentagePolicy::Unclamped`] and as exactly zero
/// under [`PercentagePolicy::ClampBeforeStart`].
pub fn life_percentage(interval: &TimeInterval, now: Timestamp, policy: PercentagePolicy) -> f64 {
    let elapsed = now.millis_since(interval.start());
    if elapsed < 0 && policy == PercentagePolicy::ClampBeforeStart {
        return 0.0;
    }
    elapsed as f64 / compute_total_duration_ms(interval) as f64
}

/// Breaks a life percentage into days, hours, minutes and seconds.
pub fn decompose(life_percentage: f64) -> ClockDecomposition {
    let days_raw = life_percentage;
    let days = trunc(days_raw);
    let days_fractional = days_raw - days;

    let hours_raw = days_fractional * HOURS_IN_DAY;
    let hours = trunc(hours_raw);
    let hours_fractional = hours_raw - hours;

    let minutes_raw = hours_fractional * MINUTES_IN_HOUR;
    let minutes = trunc(minutes_raw);
    let minutes_fractional = minutes_raw - minutes;

    let seconds_raw = minutes_fractional * SECONDS_IN_MINUTE;
    let seconds = trunc(seconds_raw);
    let seconds_fractional = seconds_raw - seconds;

    ClockDecomposition {
        days: days as i64,
        days_fractional,
        hours: hours as i64,
        hours_fractional,
        minutes: minutes as i64,
        minutes_fractional,
        seconds: seconds as i64,
        seconds_fractional,
    }
}

/// Age in whole years at `life_percentage` of a `mean_end_age` lifespan.
#[inline]
pub fn estimate_age(mean_end_age: u32, life_percentage: f64) -> i64 {
    trunc(mean_end_age as f64 * life_percentage) as i64
}

/// A resolved lifespan ready to be sampled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LifeClock {
    interval: TimeInterval,
    mean_end_age: Option<u32>,
    policy: PercentagePolicy,
}

impl LifeClock {
    /// Creates a clock over an explicit interval.
    pub fn new(interval: TimeInterval) -> Self {
        Self {
            interval,
            mean_end_age: None,
            policy: PercentagePolicy::default(),
        }
    }

    /// Sets the mean lifespan in years, enabling [`LifeClock::age_at`].
    pub fn with_mean_end_age(mut self, years: u32) -> Self {
        self.mean_end_age = Some(years);
        self
    }

    /// Sets the policy for instants before the start.
    pub fn with_policy(mut self, policy: PercentagePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// The resolved interval.
    #[inline]
    pub fn interval(&self) -> &TimeInterval {
        &self.interval
    }

    /// The mean lifespan in years, if configured.
    #[inline]
    pub fn mean_end_age(&self) -> Option<u32> {
        self.mean_end_age
    }

    /// The configured policy.
    #[inline]
    pub fn policy(&self) -> PercentagePolicy {
        self.policy
    }

    /// Life percentage at `now`.
    pub fn percentage_at(&self, now: Timestamp) -> f64 {
        life_percentage(&self.interval, now, self.policy)
    }

    /// Clock decomposition at `now`.
    pub fn decompose_at(&self, now: Timestamp) -> ClockDecomposition {
        decompose(self.percentage_at(now))
    }

    /// Estimated age at `now`. `None` without a mean lifespan.
    pub fn age_at(&self, now: Timestamp) -> Option<i64> {
        self.mean_end_age
            .map(|years| estimate_age(years, self.percentage_at(now)))
    }
}
