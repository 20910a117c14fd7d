//! Time abstraction for platform-agnostic wall-clock sampling.

use chrono::{NaiveDate, NaiveTime};

/// Milliseconds per day, without leap seconds.
pub const MILLIS_PER_DAY: i64 = 86_400_000;

/// A wall-clock instant as signed milliseconds since the Unix epoch (UTC).
///
/// Signed so that dates before 1970 and "now is before start" arithmetic
/// stay exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timestamp(i64);

impl Timestamp {
    /// The Unix epoch.
    pub const EPOCH: Self = Timestamp(0);

    /// Creates a timestamp from milliseconds since the Unix epoch.
    #[inline]
    pub const fn from_millis(millis: i64) -> Self {
        Timestamp(millis)
    }

    /// Returns milliseconds since the Unix epoch.
    #[inline]
    pub const fn as_millis(&self) -> i64 {
        self.0
    }

    /// Midnight UTC at the start of `date`.
    pub fn from_date(date: NaiveDate) -> Self {
        Timestamp(date.and_time(NaiveTime::default()).and_utc().timestamp_millis())
    }

    /// The calendar date (UTC) this timestamp falls on.
    pub fn date(&self) -> Option<NaiveDate> {
        chrono::DateTime::from_timestamp_millis(self.0).map(|dt| dt.date_naive())
    }

    /// Signed milliseconds from `earlier` to `self`. Negative if `earlier` is later.
    #[inline]
    pub const fn millis_since(&self, earlier: Self) -> i64 {
        self.0 - earlier.0
    }

    /// Adds milliseconds, returns None on overflow.
    pub fn checked_add_millis(self, millis: i64) -> Option<Self> {
        self.0.checked_add(millis).map(Timestamp)
    }
}

impl From<NaiveDate> for Timestamp {
    fn from(date: NaiveDate) -> Self {
        Timestamp::from_date(date)
    }
}

/// Trait for abstracting time sources.
pub trait TimeSource {
    /// Returns the current wall-clock instant.
    fn now(&self) -> Timestamp;
}

/// Time source backed by the system clock.
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

#[cfg(feature = "std")]
impl TimeSource for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp(chrono::Utc::now().timestamp_millis())
    }
}
