//! Colour themes for rendered clock faces.
//!
//! Colours are `palette::Srgb` (0.0-1.0 range). Displays convert them to their
//! native format; [`AnsiColor`] does so for 24-bit terminals.

use palette::{FromColor, Hsv, Srgb};

/// Colours used to draw a clock face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    /// Hour, minute and second digits.
    pub digits: Srgb,
    /// The blinking separator.
    pub separator: Srgb,
    /// The age suffix.
    pub age: Srgb,
}

impl Default for Theme {
    /// Light digits for a dark background.
    fn default() -> Self {
        Self {
            digits: Srgb::new(0.93, 0.93, 0.93),
            separator: Srgb::new(0.62, 0.62, 0.62),
            age: Srgb::new(0.5, 0.5, 0.5),
        }
    }
}

impl Theme {
    /// Builds a theme around a single colour, dimming the secondary elements.
    pub fn from_color(color: Srgb) -> Self {
        let dim = |factor: f32| Srgb::new(color.red * factor, color.green * factor, color.blue * factor);
        Self {
            digits: color,
            separator: dim(0.7),
            age: dim(0.5),
        }
    }

    /// Builds a theme from a hue in degrees (full saturation and value).
    pub fn from_hue(hue: f32) -> Self {
        Self::from_color(hsv(hue, 1.0, 1.0))
    }
}

/// Creates an RGB color from HSV (Hue, Saturation, Value) components.
#[inline]
pub fn hsv(hue: f32, saturation: f32, value: f32) -> Srgb {
    Srgb::from_color(Hsv::new(hue, saturation, value))
}

/// A 24-bit ANSI foreground escape for a colour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnsiColor(pub Srgb);

/// Resets terminal colours.
pub const ANSI_RESET: &str = "\x1b[0m";

impl core::fmt::Display for AnsiColor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let rgb: Srgb<u8> = self.0.into_format();
        write!(f, "\x1b[38;2;{};{};{}m", rgb.red, rgb.green, rgb.blue)
    }
}
