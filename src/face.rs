//! Clock face formatting.

use crate::engine::ClockDecomposition;
use core::fmt::Write;
use heapless::String;

/// A two-character clock field.
pub type ClockValue = String<2>;

/// Capacity of a fully rendered face: `HH:MM:SS` plus a space and an age.
pub const FACE_CAPACITY: usize = 32;

/// Formats a clock field as two characters.
///
/// Left-pads with a single `'0'` and keeps the last two characters, so values
/// of 100 and above keep only their last two digits: `104` becomes `"04"`.
pub fn format_clock_value(num: i64) -> ClockValue {
    let mut padded: String<24> = String::new();
    // i64 plus one padding character always fits in 24 bytes.
    let _ = write!(padded, "0{}", num);

    let tail = &padded[padded.len() - 2..];
    let mut value = ClockValue::new();
    let _ = value.push_str(tail);
    value
}

/// What the display shows on one tick.
///
/// Replaced as a whole on every render; never patched field by field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockFace {
    /// Two-character hours.
    pub hours: ClockValue,
    /// Two-character minutes.
    pub minutes: ClockValue,
    /// Two-character seconds, when enabled.
    pub seconds: Option<ClockValue>,
    /// Whether the separator is drawn on this tick.
    pub separator_visible: bool,
    /// Estimated age in years, when enabled.
    pub age: Option<i64>,
}

impl ClockFace {
    /// Builds a face from a decomposition.
    pub fn new(decomposition: &ClockDecomposition, separator_visible: bool) -> Self {
        Self {
            hours: format_clock_value(decomposition.hours),
            minutes: format_clock_value(decomposition.minutes),
            seconds: None,
            separator_visible,
            age: None,
        }
    }

    /// Includes seconds taken from `decomposition`.
    pub fn with_seconds(mut self, decomposition: &ClockDecomposition) -> Self {
        self.seconds = Some(format_clock_value(decomposition.seconds));
        self
    }

    /// Includes an age.
    pub fn with_age(mut self, age: i64) -> Self {
        self.age = Some(age);
        self
    }

    /// The separator character for this tick: `':'` or a blank placeholder.
    #[inline]
    pub fn separator(&self) -> char {
        if self.separator_visible { ':' } else { ' ' }
    }

    /// Renders the face into a fixed-capacity string.
    pub fn to_line(&self) -> String<FACE_CAPACITY> {
        let mut line = String::new();
        let _ = write!(line, "{}", self);
        line
    }
}

impl core::fmt::Display for ClockFace {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let separator = self.separator();
        write!(f, "{}{}{}", self.hours, separator, self.minutes)?;
        if let Some(seconds) = &self.seconds {
            write!(f, "{}{}", separator, seconds)?;
        }
        if let Some(age) = self.age {
            write!(f, " {}", age)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::decompose;

    #[test]
    fn pads_single_digits() {
        assert_eq!(format_clock_value(7).as_str(), "07");
        assert_eq!(format_clock_value(0).as_str(), "00");
    }

    #[test]
    fn keeps_two_digits() {
        assert_eq!(format_clock_value(13).as_str(), "13");
    }

    #[test]
    fn truncates_to_last_two_digits() {
        assert_eq!(format_clock_value(104).as_str(), "04");
        assert_eq!(format_clock_value(1999).as_str(), "99");
    }

    #[test]
    fn negative_values_keep_their_sign() {
        assert_eq!(format_clock_value(-2).as_str(), "-2");
        assert_eq!(format_clock_value(-12).as_str(), "12");
    }

    #[test]
    fn renders_blinking_separator() {
        let d = decompose(0.5);
        assert_eq!(ClockFace::new(&d, true).to_line().as_str(), "12:00");
        assert_eq!(ClockFace::new(&d, false).to_line().as_str(), "12 00");
    }

    #[test]
    fn renders_seconds_and_age() {
        let d = decompose(0.75);
        let face = ClockFace::new(&d, true).with_seconds(&d).with_age(57);
        assert_eq!(face.to_line().as_str(), "18:00:00 57");
    }
}
