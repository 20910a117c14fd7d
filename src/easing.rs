//! Easing curves for the entrance animation.

use core::time::Duration;

/// Default length of the entrance animation.
pub const DEFAULT_ANIMATION_DURATION: Duration = Duration::from_secs(10);

/// How the entrance animation progresses from 00:00 to the current value.
///
/// Every curve maps 0.0 to 0.0 and 1.0 to 1.0, is monotonic, and clamps its
/// input to `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Easing {
    /// Constant speed.
    Linear,

    /// Cubic smoothstep: `3t² - 2t³`.
    SmoothStep,

    /// Exponential ease-in-out: very slow start and end, fast middle.
    #[default]
    EaseInOutExpo,
}

impl Easing {
    /// Applies the curve to `t`.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);

        match self {
            Easing::Linear => t,
            Easing::SmoothStep => t * t * (3.0 - 2.0 * t),
            Easing::EaseInOutExpo => {
                if t == 0.0 || t == 1.0 {
                    t
                } else if t < 0.5 {
                    libm::pow(2.0, 20.0 * t - 10.0) / 2.0
                } else {
                    (2.0 - libm::pow(2.0, -20.0 * t + 10.0)) / 2.0
                }
            }
        }
    }
}

/// A fixed-length entrance animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntranceAnimation {
    /// How long the animation runs.
    pub duration: Duration,

    /// Curve applied to linear progress.
    pub easing: Easing,
}

impl Default for EntranceAnimation {
    fn default() -> Self {
        Self {
            duration: DEFAULT_ANIMATION_DURATION,
            easing: Easing::default(),
        }
    }
}

impl EntranceAnimation {
    /// Creates an animation with the given duration and curve.
    pub fn new(duration: Duration, easing: Easing) -> Self {
        Self { duration, easing }
    }

    /// Eased progress after `elapsed_ms`, or `None` once the animation is over.
    ///
    /// A zero-length animation is over immediately.
    pub fn progress(&self, elapsed_ms: i64) -> Option<f64> {
        let duration_ms = i64::try_from(self.duration.as_millis()).unwrap_or(i64::MAX);
        if duration_ms == 0 || elapsed_ms > duration_ms {
            return None;
        }

        let progress = elapsed_ms.max(0) as f64 / duration_ms as f64;
        Some(self.easing.apply(progress))
    }
}
