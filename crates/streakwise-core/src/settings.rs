//! Per-user settings that shape streak evaluation

use crate::{HabitConfig, WeekStart};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid settings file: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SettingsError>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// A skipped day breaks the streak instead of being passed over
    pub skipped_breaks_streak: bool,
    /// Overrides each habit's own week start when set
    pub week_starts_on: Option<WeekStart>,
}

impl Settings {
    /// Load settings from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let settings = serde_json::from_str(&raw)?;
        debug!("Loaded settings from {:?}", path.as_ref());
        Ok(settings)
    }

    /// Load settings from the default location, or defaults if there is no file yet
    pub fn load_default() -> Result<Self> {
        let path = crate::settings_path();
        if !path.exists() {
            debug!("No settings at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Apply the user's week-start convention, if any, to a habit configuration
    pub fn apply(&self, habit: &mut HabitConfig) {
        if let Some(week_start) = self.week_starts_on {
            habit.week_starts_on = week_start;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_partial_settings_use_defaults() {
        let settings: Settings = serde_json::from_str(r#"{"weekStartsOn": "sunday"}"#).unwrap();
        assert_eq!(settings.week_starts_on, Some(WeekStart::Sunday));
        assert!(!settings.skipped_breaks_streak);

        let empty: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, Settings::default());
        assert_eq!(empty.week_starts_on, None);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"skippedBreaksStreak": true, "weekStartsOn": 0}}"#).unwrap();

        let settings = Settings::load(file.path()).unwrap();
        assert!(settings.skipped_breaks_streak);
        assert_eq!(settings.week_starts_on, Some(WeekStart::Sunday));
    }

    #[test]
    fn test_load_errors() {
        assert!(matches!(
            Settings::load("/nonexistent/streakwise/settings.json"),
            Err(SettingsError::Io(_))
        ));
    }

    #[test]
    fn test_apply_week_start() {
        let settings = Settings {
            skipped_breaks_streak: false,
            week_starts_on: Some(WeekStart::Sunday),
        };
        let mut habit = HabitConfig::weekly([0, 6]);
        settings.apply(&mut habit);
        assert_eq!(habit.week_starts_on, WeekStart::Sunday);
    }

    #[test]
    fn test_apply_keeps_habit_week_start_when_unset() {
        let mut habit = HabitConfig::weekly([0, 6]).starting_weeks_on(WeekStart::Sunday);
        Settings::default().apply(&mut habit);
        assert_eq!(habit.week_starts_on, WeekStart::Sunday);
    }

    #[test]
    fn test_load_invalid_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(Settings::load(file.path()), Err(SettingsError::Json(_))));
    }
}
