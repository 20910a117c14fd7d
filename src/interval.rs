//! Resolved lifespans and calendar arithmetic.

use crate::time::Timestamp;
use crate::types::{ClockError, DeadlineInput};
use chrono::{Datelike, Months, NaiveDate};

/// Adds whole calendar years to a date, keeping month and day.
///
/// 29 February lands on 28 February when the target year is not a leap year.
/// Returns `None` if the result leaves chrono's calendar range.
pub fn add_years_to_date(date: NaiveDate, years: u32) -> Option<NaiveDate> {
    let months = years.checked_mul(12)?;
    date.checked_add_months(Months::new(months))
}

/// Whole calendar years from `start` to `end`, zero if `end` is not after `start`.
///
/// Counts the largest `n` with `add_years_to_date(start, n) <= end`, so it
/// inverts the year addition even when 29 February was clamped.
pub fn deadline_years_between(start: NaiveDate, end: NaiveDate) -> u32 {
    if end <= start {
        return 0;
    }

    let years = u32::try_from(end.year() - start.year()).unwrap_or(0);
    match add_years_to_date(start, years) {
        Some(date) if date <= end => years,
        _ => years.saturating_sub(1),
    }
}

/// An immutable start/end pair with its length computed once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeInterval {
    start: Timestamp,
    end: Timestamp,
    total_duration_ms: i64,
}

impl TimeInterval {
    /// Creates an interval from two instants.
    ///
    /// # Errors
    /// * `NonPositiveDuration` - `end` is not strictly after `start`
    pub fn new(start: Timestamp, end: Timestamp) -> Result<Self, ClockError> {
        let total_duration_ms = end.millis_since(start);
        if total_duration_ms <= 0 {
            return Err(ClockError::NonPositiveDuration);
        }

        Ok(Self {
            start,
            end,
            total_duration_ms,
        })
    }

    /// Creates an interval from a start instant and a length in milliseconds.
    pub fn from_duration(start: Timestamp, duration_ms: i64) -> Result<Self, ClockError> {
        let end = start
            .checked_add_millis(duration_ms)
            .ok_or(ClockError::DateOverflow)?;
        Self::new(start, end)
    }

    /// Resolves a start date and deadline into an interval.
    ///
    /// Both dates are taken at UTC midnight.
    ///
    /// # Errors
    /// * `InvalidYears` - an `Age` deadline of zero years
    /// * `DateOverflow` - the year addition leaves the calendar range
    /// * `NonPositiveDuration` - an explicit end date on or before the start
    pub fn resolve(start: NaiveDate, deadline: DeadlineInput) -> Result<Self, ClockError> {
        let end = match deadline {
            DeadlineInput::Age { years: 0 } => return Err(ClockError::InvalidYears),
            DeadlineInput::Age { years } => {
                add_years_to_date(start, years).ok_or(ClockError::DateOverflow)?
            }
            DeadlineInput::Date { end } => end,
        };

        Self::new(Timestamp::from_date(start), Timestamp::from_date(end))
    }

    /// Start of the interval.
    #[inline]
    pub fn start(&self) -> Timestamp {
        self.start
    }

    /// End of the interval.
    #[inline]
    pub fn end(&self) -> Timestamp {
        self.end
    }

    /// Length of the interval in milliseconds. Always positive.
    #[inline]
    pub fn total_duration_ms(&self) -> i64 {
        self.total_duration_ms
    }
}
