//! Persisted clock settings.
//!
//! Settings live as one JSON blob under a single key of a [`KeyValueStore`].
//! Two shapes are read:
//!
//! ```json
//! {"variant": "age", "startDate": "2002-08-20", "durationMs": 2398377600000}
//! {"birthday": "2002-08-20", "meanDeathAge": 76}
//! ```
//!
//! Only the first shape is written. A blob that does not parse, or that
//! describes an empty lifespan, is discarded so the caller can prompt again.

use crate::engine::LifeClock;
use crate::interval::{TimeInterval, deadline_years_between};
use crate::settings::Settings;
use crate::time::Timestamp;
use crate::types::{ClockError, DeadlineInput, DeadlineVariant, PercentagePolicy};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Key the clock settings are stored under.
pub const CONFIG_KEY: &str = "config";

/// Date format used in stored blobs.
pub const STORED_DATE_FORMAT: &str = "%Y-%m-%d";

/// Errors from reading or writing a store.
#[derive(Debug)]
pub enum StorageError {
    /// The underlying store failed.
    Io(io::Error),
    /// Settings could not be encoded.
    Serialize(serde_json::Error),
}

impl core::fmt::Display for StorageError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            StorageError::Io(err) => write!(f, "storage I/O error: {}", err),
            StorageError::Serialize(err) => write!(f, "could not encode settings: {}", err),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Io(err) => Some(err),
            StorageError::Serialize(err) => Some(err),
        }
    }
}

impl From<io::Error> for StorageError {
    fn from(err: io::Error) -> Self {
        StorageError::Io(err)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        StorageError::Serialize(err)
    }
}

/// A string-keyed store of string values, like browser local storage.
pub trait KeyValueStore {
    /// Returns the value under `key`, if any.
    fn get(&self, key: &str) -> io::Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> io::Result<()>;

    /// Removes `key`. Removing a missing key is not an error.
    fn remove(&mut self, key: &str) -> io::Result<()>;
}

/// One `<key>.json` file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The directory this store writes to.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        match fs::read_to_string(self.path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path(key), value)
    }

    fn remove(&mut self, key: &str) -> io::Result<()> {
        match fs::remove_file(self.path(key)) {
            Err(err) if err.kind() != io::ErrorKind::NotFound => Err(err),
            _ => Ok(()),
        }
    }
}

/// In-memory store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> io::Result<()> {
        self.values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> io::Result<()> {
        self.values.remove(key);
        Ok(())
    }
}

/// The current stored shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CurrentConfig {
    variant: DeadlineVariant,
    start_date: String,
    duration_ms: i64,
}

/// The legacy stored shape: a birthday and a mean death age in years.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LegacyConfig {
    birthday: String,
    mean_death_age: u32,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AnyConfig {
    Current(CurrentConfig),
    Legacy(LegacyConfig),
}

/// Validated settings as read from a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoredConfig {
    /// Which input mode the user chose.
    pub variant: DeadlineVariant,
    /// The start date.
    pub start_date: NaiveDate,
    /// Lifespan length in milliseconds. Always positive.
    pub duration_ms: i64,
}

impl StoredConfig {
    /// Builds a config from validated settings.
    pub fn from_settings(settings: &Settings) -> Result<Self, ClockError> {
        let interval = settings.resolve()?;
        Ok(Self {
            variant: settings.deadline.variant(),
            start_date: settings.start_date,
            duration_ms: interval.total_duration_ms(),
        })
    }

    fn from_any(config: AnyConfig) -> Option<Self> {
        let parse = |s: &str| NaiveDate::parse_from_str(s, STORED_DATE_FORMAT).ok();

        let stored = match config {
            AnyConfig::Current(c) => Self {
                variant: c.variant,
                start_date: parse(&c.start_date)?,
                duration_ms: c.duration_ms,
            },
            AnyConfig::Legacy(c) => {
                let start_date = parse(&c.birthday)?;
                let interval = TimeInterval::resolve(
                    start_date,
                    DeadlineInput::Age {
                        years: c.mean_death_age,
                    },
                )
                .ok()?;
                Self {
                    variant: DeadlineVariant::Age,
                    start_date,
                    duration_ms: interval.total_duration_ms(),
                }
            }
        };

        // Rejects empty or negative lifespans.
        stored.interval().ok()?;
        Some(stored)
    }

    /// The resolved interval.
    pub fn interval(&self) -> Result<TimeInterval, ClockError> {
        TimeInterval::from_duration(Timestamp::from_date(self.start_date), self.duration_ms)
    }

    /// The end date, if representable.
    pub fn end_date(&self) -> Option<NaiveDate> {
        Timestamp::from_date(self.start_date)
            .checked_add_millis(self.duration_ms)?
            .date()
    }

    /// Whole years of the stored lifespan.
    pub fn deadline_years(&self) -> u32 {
        self.end_date()
            .map_or(0, |end| deadline_years_between(self.start_date, end))
    }

    /// The deadline as the user entered it.
    pub fn deadline(&self) -> Option<DeadlineInput> {
        match self.variant {
            DeadlineVariant::Age => Some(DeadlineInput::Age {
                years: self.deadline_years(),
            }),
            DeadlineVariant::Date => self.end_date().map(|end| DeadlineInput::Date { end }),
        }
    }

    /// A life clock over the stored lifespan.
    ///
    /// Age-based configs carry their mean lifespan so an age can be shown.
    pub fn to_clock(&self, policy: PercentagePolicy) -> Result<LifeClock, ClockError> {
        let clock = LifeClock::new(self.interval()?).with_policy(policy);
        Ok(match self.variant {
            DeadlineVariant::Age => clock.with_mean_end_age(self.deadline_years()),
            DeadlineVariant::Date => clock,
        })
    }

    /// Encodes the config in the current stored shape.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&CurrentConfig {
            variant: self.variant,
            start_date: self.start_date.format(STORED_DATE_FORMAT).to_string(),
            duration_ms: self.duration_ms,
        })
    }

    /// Decodes and validates a stored blob.
    pub fn from_json(json: &str) -> Option<Self> {
        let any: AnyConfig = serde_json::from_str(json).ok()?;
        Self::from_any(any)
    }
}

/// Reads the stored config.
///
/// A missing key yields `Ok(None)`. An unreadable or invalid blob is removed
/// and also yields `Ok(None)`.
pub fn load_config<S: KeyValueStore>(store: &mut S) -> Result<Option<StoredConfig>, StorageError> {
    let Some(json) = store.get(CONFIG_KEY)? else {
        log::debug!("no stored config");
        return Ok(None);
    };

    match StoredConfig::from_json(&json) {
        Some(config) => {
            log::debug!("loaded config starting {}", config.start_date);
            Ok(Some(config))
        }
        None => {
            log::warn!("discarding invalid stored config");
            store.remove(CONFIG_KEY)?;
            Ok(None)
        }
    }
}

/// Writes `settings` in the current stored shape and returns what was stored.
pub fn save_config<S: KeyValueStore>(
    store: &mut S,
    settings: &Settings,
) -> Result<StoredConfig, StorageError> {
    // Settings are validated before they get here; an empty lifespan is an
    // invalid-data I/O error rather than a silent no-op.
    let config = StoredConfig::from_settings(settings)
        .map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
    store.set(CONFIG_KEY, &config.to_json()?)?;
    log::debug!("saved config starting {}", config.start_date);
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn reads_current_shape() {
        let config = StoredConfig::from_json(
            r#"{"variant":"age","startDate":"2002-08-20","durationMs":2398377600000}"#,
        )
        .unwrap();
        assert_eq!(config.variant, DeadlineVariant::Age);
        assert_eq!(config.start_date, ymd(2002, 8, 20));
        assert_eq!(config.deadline_years(), 76);
        assert_eq!(config.end_date(), Some(ymd(2078, 8, 20)));
    }

    #[test]
    fn reads_legacy_shape() {
        let config =
            StoredConfig::from_json(r#"{"birthday":"2002-08-20","meanDeathAge":76}"#).unwrap();
        assert_eq!(config.duration_ms, 2_398_377_600_000);
        assert_eq!(config.deadline(), Some(DeadlineInput::Age { years: 76 }));
    }

    #[test]
    fn rejects_bad_blobs() {
        assert_eq!(StoredConfig::from_json("{}"), None);
        assert_eq!(StoredConfig::from_json("not json"), None);
        assert_eq!(
            StoredConfig::from_json(r#"{"variant":"age","startDate":"garbage","durationMs":1}"#),
            None
        );
        assert_eq!(
            StoredConfig::from_json(r#"{"variant":"date","startDate":"2000-01-01","durationMs":0}"#),
            None
        );
        assert_eq!(
            StoredConfig::from_json(r#"{"birthday":"2000-01-01","meanDeathAge":0}"#),
            None
        );
    }

    #[test]
    fn date_variant_has_no_mean_age() {
        let config = StoredConfig {
            variant: DeadlineVariant::Date,
            start_date: ymd(2000, 1, 1),
            duration_ms: crate::time::MILLIS_PER_DAY,
        };
        let clock = config.to_clock(PercentagePolicy::Unclamped).unwrap();
        assert_eq!(clock.mean_end_age(), None);
        assert_eq!(config.deadline(), Some(DeadlineInput::Date { end: ymd(2000, 1, 2) }));
    }

    #[test]
    fn written_json_uses_current_shape() {
        let config = StoredConfig {
            variant: DeadlineVariant::Date,
            start_date: ymd(2000, 1, 1),
            duration_ms: 42,
        };
        assert_eq!(
            config.to_json().unwrap(),
            r#"{"variant":"date","startDate":"2000-01-01","durationMs":42}"#
        );
    }
}
