#![cfg_attr(not(feature = "std"), no_std)]
#![doc = include_str!("../README.md")]

//! # Core Concepts
//!
//! - **`TimeInterval`**: An immutable start/end pair with its length computed once
//! - **`DeadlineInput`**: How the end is given (`Age { years }` or `Date { end }`)
//! - **`LifeClock`**: A resolved lifespan plus the policy for instants before its start
//! - **`ClockDecomposition`**: The elapsed fraction broken into days, hours, minutes and seconds
//! - **`ClockFace`**: The two-digit fields and separator shown on one tick
//! - **`LifeClockDriver`**: Mounts onto a display, renders on every tick, blinks the separator
//! - **`ClockDisplay`**: Trait to implement for your output surface
//! - **`TimeSource`**: Trait to implement for your wall clock
//! - **`Easing`**: Curves for the optional entrance animation
//!
//! With the `std` feature the crate also provides the system clock, the
//! repeating [`ticker`], persisted settings in [`storage`], form validation in
//! [`settings`], and an ANSI [`terminal`] display.

// Re-export Srgb from palette for user convenience
pub use palette::Srgb;

pub mod time;
pub mod types;
pub mod interval;
pub mod engine;
pub mod easing;
pub mod face;
pub mod theme;
pub mod display;

#[cfg(feature = "std")]
pub mod settings;
#[cfg(feature = "std")]
pub mod storage;
#[cfg(feature = "std")]
pub mod terminal;
#[cfg(feature = "std")]
pub mod ticker;

pub use display::{
    ClockDisplay, DEFAULT_TICK_INTERVAL, DriverError, DriverOptions, DriverState, LifeClockDriver,
    ServiceTiming,
};
pub use easing::{Easing, EntranceAnimation};
pub use engine::{
    ClockDecomposition, LifeClock, compute_total_duration_ms, decompose, estimate_age,
    life_percentage,
};
pub use face::{ClockFace, format_clock_value};
pub use interval::{TimeInterval, add_years_to_date, deadline_years_between};
pub use theme::Theme;
pub use time::{TimeSource, Timestamp};
pub use types::{ClockError, DeadlineInput, DeadlineVariant, PercentagePolicy};

#[cfg(feature = "std")]
pub use time::SystemClock;
