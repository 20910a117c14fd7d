//! Life clock driver with mount/tick lifecycle and timing control.
//!
//! Provides [`LifeClockDriver`] which samples a [`TimeSource`], converts the
//! current instant to a [`ClockFace`] and pushes it to a [`ClockDisplay`].
//! The driver never sleeps; it tells its host when to call [`LifeClockDriver::tick`]
//! again through [`ServiceTiming`].

use crate::easing::EntranceAnimation;
use crate::engine::{LifeClock, decompose};
use crate::face::ClockFace;
use crate::time::{TimeSource, Timestamp};
use core::time::Duration;

/// Default cadence of the clock.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(1000);

/// Trait for abstracting the surface a clock face is drawn on.
///
/// Implement this for your output (terminal, LCD, test recorder, etc.).
pub trait ClockDisplay {
    /// Draws `face`, replacing whatever was shown before.
    ///
    /// Handle any output errors internally - this method cannot fail.
    fn render(&mut self, face: &ClockFace);
}

/// The lifecycle state of a driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriverState {
    /// Not attached to its display. Nothing is rendered.
    Unmounted,
    /// Entrance animation in progress.
    Animating,
    /// Regular once-per-tick updates with a blinking separator.
    Running,
}

/// When the driver needs to be ticked again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceTiming {
    /// Animation in progress. Tick again at your desired frame rate.
    Continuous,

    /// Regular clock. Tick again after the specified delay.
    Delay(Duration),
}

/// Errors that can occur during driver operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriverError {
    /// Operation called from an invalid state.
    InvalidState {
        /// Human-readable description of expected state(s), e.g. "Unmounted"
        expected: &'static str,
        /// The actual current state
        actual: DriverState,
    },
}

impl core::fmt::Display for DriverError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            DriverError::InvalidState { expected, actual } => {
                write!(
                    f,
                    "invalid state: expected {}, but driver is {:?}",
                    expected, actual
                )
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DriverError {}

/// What the driver draws and how often.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DriverOptions {
    /// Delay between regular ticks.
    pub tick_interval: Duration,
    /// Draw seconds after minutes.
    pub show_seconds: bool,
    /// Draw the estimated age (only when the clock has a mean lifespan).
    pub show_age: bool,
    /// Entrance animation to play on mount.
    pub animation: Option<EntranceAnimation>,
}

impl Default for DriverOptions {
    fn default() -> Self {
        Self {
            tick_interval: DEFAULT_TICK_INTERVAL,
            show_seconds: false,
            show_age: false,
            animation: None,
        }
    }
}

/// Drives a single clock display from a life clock and a time source.
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `D` - Display implementation type
/// * `T` - Time source implementation type
pub struct LifeClockDriver<'t, D: ClockDisplay, T: TimeSource> {
    display: D,
    time_source: &'t T,
    clock: LifeClock,
    options: DriverOptions,
    state: DriverState,
    mounted_at: Option<Timestamp>,
    separator_visible: bool,
    face: Option<ClockFace>,
}

impl<'t, D: ClockDisplay, T: TimeSource> LifeClockDriver<'t, D, T> {
    /// Creates an unmounted driver. Nothing is drawn until [`mount`](Self::mount).
    pub fn new(display: D, time_source: &'t T, clock: LifeClock) -> Self {
        Self::with_options(display, time_source, clock, DriverOptions::default())
    }

    /// Creates an unmounted driver with explicit options.
    pub fn with_options(
        display: D,
        time_source: &'t T,
        clock: LifeClock,
        options: DriverOptions,
    ) -> Self {
        Self {
            display,
            time_source,
            clock,
            options,
            state: DriverState::Unmounted,
            mounted_at: None,
            separator_visible: true,
            face: None,
        }
    }

    /// Attaches the driver and renders immediately.
    ///
    /// Must be called from `Unmounted` state.
    ///
    /// # Returns
    /// * `Ok(ServiceTiming)` - When to tick next
    /// * `Err` - Already mounted
    pub fn mount(&mut self) -> Result<ServiceTiming, DriverError> {
        if self.state != DriverState::Unmounted {
            return Err(DriverError::InvalidState {
                expected: "Unmounted",
                actual: self.state,
            });
        }

        let now = self.time_source.now();
        self.mounted_at = Some(now);
        self.separator_visible = true;
        self.face = None;
        self.state = if self.options.animation.is_some() {
            DriverState::Animating
        } else {
            DriverState::Running
        };

        log::debug!("clock mounted in {:?} state", self.state);
        Ok(self.refresh(now))
    }

    /// Advances the clock by one tick and renders if the face changed.
    ///
    /// While `Running`, toggles the separator. While `Animating`, renders the
    /// eased value and moves to `Running` once the animation is over.
    ///
    /// # Returns
    /// * `Ok(ServiceTiming::Continuous)` - Animation frame, tick at your frame rate
    /// * `Ok(ServiceTiming::Delay(duration))` - Regular clock, tick after this delay
    /// * `Err` - Not mounted
    pub fn tick(&mut self) -> Result<ServiceTiming, DriverError> {
        if self.state == DriverState::Unmounted {
            return Err(DriverError::InvalidState {
                expected: "Animating or Running",
                actual: self.state,
            });
        }

        if self.state == DriverState::Running {
            self.separator_visible = !self.separator_visible;
        }

        let now = self.time_source.now();
        Ok(self.refresh(now))
    }

    /// Replaces the life clock and re-renders at once if mounted.
    pub fn update_clock(&mut self, clock: LifeClock) -> Option<ServiceTiming> {
        self.clock = clock;
        log::debug!("clock inputs changed");

        if self.state == DriverState::Unmounted {
            return None;
        }
        let now = self.time_source.now();
        Some(self.refresh(now))
    }

    /// Detaches the driver. Further ticks are rejected until mounted again.
    pub fn unmount(&mut self) {
        if self.state != DriverState::Unmounted {
            log::debug!("clock unmounted");
        }
        self.state = DriverState::Unmounted;
        self.mounted_at = None;
    }

    /// Computes the face for `now`, renders it if it changed, and returns timing.
    fn refresh(&mut self, now: Timestamp) -> ServiceTiming {
        let mut percentage = self.clock.percentage_at(now);
        let mut timing = ServiceTiming::Delay(self.options.tick_interval);

        if self.state == DriverState::Animating {
            let elapsed = self.mounted_at.map_or(0, |mounted| now.millis_since(mounted));
            match self.options.animation.and_then(|a| a.progress(elapsed)) {
                Some(eased) => {
                    percentage *= eased;
                    timing = ServiceTiming::Continuous;
                }
                None => {
                    log::debug!("entrance animation finished after {} ms", elapsed);
                    self.state = DriverState::Running;
                }
            }
        }

        let decomposition = decompose(percentage);
        let mut face = ClockFace::new(&decomposition, self.separator_visible);
        if self.options.show_seconds {
            face = face.with_seconds(&decomposition);
        }
        if self.options.show_age {
            if let Some(years) = self.clock.mean_end_age() {
                face = face.with_age(crate::engine::estimate_age(years, percentage));
            }
        }

        if self.face.as_ref() != Some(&face) {
            log::trace!("render {}", face);
            self.display.render(&face);
            self.face = Some(face);
        }

        timing
    }

    /// Returns the current state of the driver.
    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Returns true if the driver is attached to its display.
    pub fn is_mounted(&self) -> bool {
        self.state != DriverState::Unmounted
    }

    /// Returns the last rendered face, if any.
    pub fn face(&self) -> Option<&ClockFace> {
        self.face.as_ref()
    }

    /// Returns the clock being displayed.
    pub fn clock(&self) -> &LifeClock {
        &self.clock
    }

    /// Returns the driver options.
    pub fn options(&self) -> &DriverOptions {
        &self.options
    }

    /// Returns a reference to the display.
    pub fn display(&self) -> &D {
        &self.display
    }

    /// Consumes the driver and returns its display.
    pub fn into_display(self) -> D {
        self.display
    }
}
