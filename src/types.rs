//! Core types for describing a lifespan.

use chrono::NaiveDate;

/// How the end of a lifespan is specified.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeadlineInput {
    /// A number of calendar years added to the start date.
    Age {
        /// Years from the start date to the end date.
        years: u32,
    },

    /// An explicit end date.
    Date {
        /// The projected end date.
        end: NaiveDate,
    },
}

impl DeadlineInput {
    /// Returns which input mode this is.
    #[inline]
    pub fn variant(&self) -> DeadlineVariant {
        match self {
            DeadlineInput::Age { .. } => DeadlineVariant::Age,
            DeadlineInput::Date { .. } => DeadlineVariant::Date,
        }
    }
}

/// Discriminator for [`DeadlineInput`], as stored and as chosen in the settings form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "std", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "std", serde(rename_all = "lowercase"))]
pub enum DeadlineVariant {
    /// Deadline given in years.
    #[default]
    Age,

    /// Deadline given as a date.
    Date,
}

/// What to report when the current instant is before the start of the interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PercentagePolicy {
    /// Report the raw, negative fraction.
    #[default]
    Unclamped,

    /// Report exactly zero before the start. Values past the end are never clamped.
    ClampBeforeStart,
}

/// Lifespan construction errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockError {
    /// End is not strictly after start.
    NonPositiveDuration,

    /// Date arithmetic left the supported calendar range.
    DateOverflow,

    /// Years deadline of zero.
    InvalidYears,
}

impl core::fmt::Display for ClockError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ClockError::NonPositiveDuration => {
                write!(f, "end date must be after the start date")
            }
            ClockError::DateOverflow => {
                write!(f, "date is outside the supported calendar range")
            }
            ClockError::InvalidYears => {
                write!(f, "deadline years must be greater than 0")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ClockError {}
