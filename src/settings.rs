//! Settings form model and validation.
//!
//! [`SettingsForm`] holds the raw text of each field as the user typed it.
//! [`SettingsForm::validate`] either produces [`Settings`] or reports every
//! offending field at once, so a prompt can show all messages together.

use crate::interval::TimeInterval;
use crate::storage::StoredConfig;
use crate::types::{ClockError, DeadlineInput, DeadlineVariant};
use chrono::NaiveDate;

/// Years pre-filled in a fresh form.
pub const DEFAULT_DEADLINE_YEARS: u32 = 76;

/// Format dates are shown in.
pub const DISPLAY_DATE_FORMAT: &str = "%d/%m/%Y";

/// Formats accepted when parsing a date field.
const ACCEPTED_DATE_FORMATS: [&str; 2] = [DISPLAY_DATE_FORMAT, "%Y-%m-%d"];

/// Validation messages.
pub mod messages {
    /// Start date field left blank.
    pub const START_EMPTY: &str = "Start date must not be empty";
    /// A date field did not parse.
    pub const INVALID_DATE: &str = "Invalid date";
    /// Start date after today.
    pub const START_IN_FUTURE: &str = "Start date must not be in the future";
    /// Years blank, not a number, or not positive.
    pub const YEARS_NOT_POSITIVE: &str = "Deadline years must be greater than 0";
    /// Deadline date field left blank.
    pub const DEADLINE_EMPTY: &str = "Deadline date must not be empty";
    /// Deadline date not after the start date.
    pub const DEADLINE_NOT_AFTER_START: &str = "Deadline date must be after the start date";
    /// Years too large for the calendar.
    pub const YEARS_OUT_OF_RANGE: &str = "Deadline years are out of range";
}

/// Raw field contents of the settings form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsForm {
    /// Start date text.
    pub start_date: String,
    /// Selected deadline input mode.
    pub variant: DeadlineVariant,
    /// Years text, used when `variant` is `Age`.
    pub deadline_years: String,
    /// Deadline date text, used when `variant` is `Date`.
    pub deadline_date: String,
}

impl Default for SettingsForm {
    fn default() -> Self {
        Self {
            start_date: String::new(),
            variant: DeadlineVariant::Age,
            deadline_years: DEFAULT_DEADLINE_YEARS.to_string(),
            deadline_date: String::new(),
        }
    }
}

/// Per-field validation messages. A `None` field passed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldErrors {
    /// Message for the start date field.
    pub start_date: Option<&'static str>,
    /// Message for the years field.
    pub deadline_years: Option<&'static str>,
    /// Message for the deadline date field.
    pub deadline_date: Option<&'static str>,
}

impl FieldErrors {
    /// True when no field failed.
    pub fn is_empty(&self) -> bool {
        self.start_date.is_none() && self.deadline_years.is_none() && self.deadline_date.is_none()
    }
}

impl core::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let fields = [
            ("start date", self.start_date),
            ("deadline years", self.deadline_years),
            ("deadline date", self.deadline_date),
        ];
        let mut first = true;
        for (name, message) in fields {
            if let Some(message) = message {
                if !first {
                    write!(f, "; ")?;
                }
                write!(f, "{}: {}", name, message)?;
                first = false;
            }
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

/// Validated settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    /// The start date.
    pub start_date: NaiveDate,
    /// The chosen deadline.
    pub deadline: DeadlineInput,
}

impl Settings {
    /// Resolves the settings into an interval.
    pub fn resolve(&self) -> Result<TimeInterval, ClockError> {
        TimeInterval::resolve(self.start_date, self.deadline)
    }
}

/// Parses a date in `DD/MM/YYYY` or `YYYY-MM-DD` form.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    ACCEPTED_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
}

impl SettingsForm {
    /// Pre-fills a form from stored settings.
    ///
    /// Both deadline fields are filled so switching the variant keeps a sensible value.
    pub fn from_config(config: &StoredConfig) -> Self {
        Self {
            start_date: config.start_date.format(DISPLAY_DATE_FORMAT).to_string(),
            variant: config.variant,
            deadline_years: config.deadline_years().to_string(),
            deadline_date: config
                .end_date()
                .map(|end| end.format(DISPLAY_DATE_FORMAT).to_string())
                .unwrap_or_default(),
        }
    }

    /// Validates every field against `today`.
    ///
    /// # Errors
    /// Returns all failing fields. Only the deadline field of the selected
    /// variant is checked.
    pub fn validate(&self, today: NaiveDate) -> Result<Settings, FieldErrors> {
        let mut errors = FieldErrors::default();

        let start_date = match self.start_date.trim() {
            "" => {
                errors.start_date = Some(messages::START_EMPTY);
                None
            }
            text => match parse_date(text) {
                None => {
                    errors.start_date = Some(messages::INVALID_DATE);
                    None
                }
                Some(date) if date > today => {
                    errors.start_date = Some(messages::START_IN_FUTURE);
                    None
                }
                Some(date) => Some(date),
            },
        };

        let deadline = match self.variant {
            DeadlineVariant::Age => match self.deadline_years.trim().parse::<u32>() {
                Ok(years) if years > 0 => Some(DeadlineInput::Age { years }),
                _ => {
                    errors.deadline_years = Some(messages::YEARS_NOT_POSITIVE);
                    None
                }
            },
            DeadlineVariant::Date => match self.deadline_date.trim() {
                "" => {
                    errors.deadline_date = Some(messages::DEADLINE_EMPTY);
                    None
                }
                text => match parse_date(text) {
                    Some(end) => Some(DeadlineInput::Date { end }),
                    None => {
                        errors.deadline_date = Some(messages::INVALID_DATE);
                        None
                    }
                },
            },
        };

        let (Some(start_date), Some(deadline)) = (start_date, deadline) else {
            return Err(errors);
        };

        let settings = Settings {
            start_date,
            deadline,
        };
        match settings.resolve() {
            Ok(_) => Ok(settings),
            Err(ClockError::NonPositiveDuration) => {
                errors.deadline_date = Some(messages::DEADLINE_NOT_AFTER_START);
                Err(errors)
            }
            Err(_) => {
                errors.deadline_years = Some(messages::YEARS_OUT_OF_RANGE);
                Err(errors)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> NaiveDate {
        ymd(2024, 6, 1)
    }

    #[test]
    fn parses_both_date_formats() {
        assert_eq!(parse_date("20/08/2002"), Some(ymd(2002, 8, 20)));
        assert_eq!(parse_date(" 2002-08-20 "), Some(ymd(2002, 8, 20)));
        assert_eq!(parse_date("31/02/2002"), None);
        assert_eq!(parse_date("yesterday"), None);
    }

    #[test]
    fn default_form_needs_a_start_date() {
        let errors = SettingsForm::default().validate(today()).unwrap_err();
        assert_eq!(errors.start_date, Some(messages::START_EMPTY));
        assert_eq!(errors.deadline_years, None);
    }

    #[test]
    fn valid_age_form() {
        let form = SettingsForm {
            start_date: "20/08/2002".into(),
            ..SettingsForm::default()
        };
        let settings = form.validate(today()).unwrap();
        assert_eq!(settings.deadline, DeadlineInput::Age { years: 76 });
    }

    #[test]
    fn reports_all_failing_fields() {
        let form = SettingsForm {
            start_date: "not a date".into(),
            deadline_years: "-3".into(),
            ..SettingsForm::default()
        };
        let errors = form.validate(today()).unwrap_err();
        assert_eq!(errors.start_date, Some(messages::INVALID_DATE));
        assert_eq!(errors.deadline_years, Some(messages::YEARS_NOT_POSITIVE));
    }

    #[test]
    fn rejects_future_start() {
        let form = SettingsForm {
            start_date: "02/06/2024".into(),
            ..SettingsForm::default()
        };
        let errors = form.validate(today()).unwrap_err();
        assert_eq!(errors.start_date, Some(messages::START_IN_FUTURE));
    }

    #[test]
    fn rejects_zero_years() {
        let form = SettingsForm {
            start_date: "2000-01-01".into(),
            deadline_years: "0".into(),
            ..SettingsForm::default()
        };
        let errors = form.validate(today()).unwrap_err();
        assert_eq!(errors.deadline_years, Some(messages::YEARS_NOT_POSITIVE));
    }

    #[test]
    fn date_variant_checks_only_the_date_field() {
        let form = SettingsForm {
            start_date: "2000-01-01".into(),
            variant: DeadlineVariant::Date,
            deadline_years: "garbage".into(),
            deadline_date: String::new(),
        };
        let errors = form.validate(today()).unwrap_err();
        assert_eq!(errors.deadline_date, Some(messages::DEADLINE_EMPTY));
        assert_eq!(errors.deadline_years, None);
    }

    #[test]
    fn rejects_deadline_on_or_before_start() {
        let form = SettingsForm {
            start_date: "2000-01-01".into(),
            variant: DeadlineVariant::Date,
            deadline_years: String::new(),
            deadline_date: "01/01/2000".into(),
        };
        let errors = form.validate(today()).unwrap_err();
        assert_eq!(errors.deadline_date, Some(messages::DEADLINE_NOT_AFTER_START));
    }

    #[test]
    fn errors_display_lists_fields() {
        let errors = FieldErrors {
            start_date: Some(messages::START_EMPTY),
            deadline_years: Some(messages::YEARS_NOT_POSITIVE),
            deadline_date: None,
        };
        assert_eq!(
            errors.to_string(),
            "start date: Start date must not be empty; deadline years: Deadline years must be greater than 0"
        );
    }
}
