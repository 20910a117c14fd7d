//! ANSI terminal display.

use crate::display::ClockDisplay;
use crate::face::ClockFace;
use crate::theme::{ANSI_RESET, AnsiColor, Theme};
use std::io::Write;

/// Draws clock faces on a single, repeatedly overwritten terminal line.
pub struct TerminalDisplay<W: Write> {
    out: W,
    theme: Theme,
    color: bool,
}

impl<W: Write> TerminalDisplay<W> {
    /// Creates a display writing colored output to `out`.
    pub fn new(out: W, theme: Theme) -> Self {
        Self {
            out,
            theme,
            color: true,
        }
    }

    /// Disables ANSI colors (plain text with carriage returns).
    pub fn without_color(mut self) -> Self {
        self.color = false;
        self
    }

    /// Consumes the display and returns the writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_face(&mut self, face: &ClockFace) -> std::io::Result<()> {
        // Return to the start of the line and clear it.
        write!(self.out, "\r\x1b[2K")?;

        if !self.color {
            write!(self.out, "{}", face)?;
            return self.out.flush();
        }

        let digits = AnsiColor(self.theme.digits);
        let separator = AnsiColor(self.theme.separator);
        let sep = face.separator();

        write!(self.out, "{}{}{}{}{}{}", digits, face.hours, separator, sep, digits, face.minutes)?;
        if let Some(seconds) = &face.seconds {
            write!(self.out, "{}{}{}{}", separator, sep, digits, seconds)?;
        }
        if let Some(age) = face.age {
            write!(self.out, " {}{}", AnsiColor(self.theme.age), age)?;
        }
        write!(self.out, "{}", ANSI_RESET)?;
        self.out.flush()
    }
}

impl<W: Write> ClockDisplay for TerminalDisplay<W> {
    fn render(&mut self, face: &ClockFace) {
        if let Err(err) = self.write_face(face) {
            log::warn!("failed to draw clock: {}", err);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::decompose;

    #[test]
    fn plain_output_overwrites_the_line() {
        let mut display = TerminalDisplay::new(Vec::new(), Theme::default()).without_color();
        let d = decompose(0.5);
        display.render(&ClockFace::new(&d, true));
        display.render(&ClockFace::new(&d, false));

        let out = String::from_utf8(display.into_inner()).unwrap();
        assert_eq!(out, "\r\x1b[2K12:00\r\x1b[2K12 00");
    }

    #[test]
    fn colored_output_resets_at_the_end() {
        let mut display = TerminalDisplay::new(Vec::new(), Theme::default());
        let d = decompose(0.25);
        display.render(&ClockFace::new(&d, true).with_age(19));

        let out = String::from_utf8(display.into_inner()).unwrap();
        assert!(out.contains("06"));
        assert!(out.contains("19"));
        assert!(out.ends_with(ANSI_RESET));
    }
}
