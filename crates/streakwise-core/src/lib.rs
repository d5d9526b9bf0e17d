//! Streakwise Core Library
//!
//! Provides the streak and statistics engine for recurring habits, plus the
//! settings, snapshot, and export plumbing used by the Streakwise CLI.

pub mod completion;
pub mod date;
mod de;
pub mod export;
pub mod period;
pub mod settings;
pub mod snapshot;
pub mod streak;
pub mod tracker;

pub use export::{ExportFormat, Exporter};
pub use period::PeriodStatus;
pub use settings::Settings;
pub use snapshot::{Habit, Snapshot};
pub use streak::{calculate_current_streak, calculate_streak_stats};
pub use tracker::{HabitReport, HabitSummary, Tracker};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One day's record for one habit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Checkin {
    pub date: NaiveDate,
    #[serde(default)]
    pub skipped: bool,
    /// Numeric progress for TARGET habits. Numeric strings are accepted and
    /// anything unparseable is read as 0.
    #[serde(default, deserialize_with = "de::lenient_number")]
    pub value: Option<f64>,
}

impl Checkin {
    pub fn done(date: NaiveDate) -> Self {
        Self {
            date,
            skipped: false,
            value: None,
        }
    }

    pub fn skip(date: NaiveDate) -> Self {
        Self {
            date,
            skipped: true,
            value: None,
        }
    }

    pub fn with_value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }
}

/// How often a habit is expected to be performed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FrequencyType {
    /// Every day
    Daily,
    /// On specific weekdays (see `HabitConfig::active_days`)
    Weekly,
    /// N completions per week or month, on any days
    Custom,
}

/// Period a CUSTOM habit's completion target applies to
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrequencyPeriod {
    #[default]
    Week,
    Month,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HabitType {
    /// Binary done / not done
    #[default]
    Simple,
    /// Done once the check-in value reaches `target_value`
    Target,
}

/// First day of the calendar week
///
/// Habit configurations carry the index form (`0` / `1`), user settings the
/// name form (`"sunday"` / `"monday"`); both deserialize.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "de::WeekStartRepr", rename_all = "lowercase")]
pub enum WeekStart {
    Sunday,
    #[default]
    Monday,
}

/// Scheduling configuration of a habit, as consumed by the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitConfig {
    pub frequency_type: FrequencyType,
    /// Completions required per period (CUSTOM only)
    #[serde(default = "de::one")]
    pub frequency_value: u32,
    #[serde(default)]
    pub frequency_period: FrequencyPeriod,
    /// Weekday numbers, 0=Sunday..6=Saturday (WEEKLY only)
    #[serde(default, deserialize_with = "de::null_as_empty")]
    pub active_days: Vec<u8>,
    #[serde(default)]
    pub habit_type: HabitType,
    #[serde(default, deserialize_with = "de::lenient_number")]
    pub target_value: Option<f64>,
    #[serde(default, deserialize_with = "de::date_or_timestamp")]
    pub created_at: Option<NaiveDate>,
    #[serde(default)]
    pub week_starts_on: WeekStart,
}

impl HabitConfig {
    pub fn daily() -> Self {
        Self {
            frequency_type: FrequencyType::Daily,
            frequency_value: 1,
            frequency_period: FrequencyPeriod::Week,
            active_days: Vec::new(),
            habit_type: HabitType::Simple,
            target_value: None,
            created_at: None,
            week_starts_on: WeekStart::Monday,
        }
    }

    pub fn weekly(active_days: impl Into<Vec<u8>>) -> Self {
        Self {
            frequency_type: FrequencyType::Weekly,
            active_days: active_days.into(),
            ..Self::daily()
        }
    }

    pub fn custom(times: u32, period: FrequencyPeriod) -> Self {
        Self {
            frequency_type: FrequencyType::Custom,
            frequency_value: times,
            frequency_period: period,
            ..Self::daily()
        }
    }

    pub fn with_target(mut self, target: f64) -> Self {
        self.habit_type = HabitType::Target;
        self.target_value = Some(target);
        self
    }

    pub fn created_on(mut self, date: NaiveDate) -> Self {
        self.created_at = Some(date);
        self
    }

    pub fn starting_weeks_on(mut self, week_start: WeekStart) -> Self {
        self.week_starts_on = week_start;
        self
    }

    /// Completions required per period; a zero value is treated as 1
    pub fn required_completions(&self) -> u32 {
        self.frequency_value.max(1)
    }
}

impl fmt::Display for HabitConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.frequency_type {
            FrequencyType::Daily => write!(f, "daily"),
            FrequencyType::Weekly => {
                const NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
                let days: Vec<&str> = self
                    .active_days
                    .iter()
                    .filter_map(|d| NAMES.get(*d as usize).copied())
                    .collect();
                write!(f, "weekly ({})", days.join("/"))
            }
            FrequencyType::Custom => {
                let period = match self.frequency_period {
                    FrequencyPeriod::Week => "week",
                    FrequencyPeriod::Month => "month",
                };
                write!(f, "{}x per {}", self.required_completions(), period)
            }
        }
    }
}

/// Full statistics for a habit (detail view)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakStats {
    pub current_streak: u32,
    pub longest_streak: u32,
    /// Percentage, 0-100
    pub completion_rate: u32,
    pub total_checkins: u32,
    pub total_expected_days: u32,
}

/// Get the config directory for Streakwise
pub fn config_dir() -> std::path::PathBuf {
    directories::ProjectDirs::from("com", "streakwise", "streakwise")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .unwrap_or_else(|| {
            directories::BaseDirs::new()
                .map(|d| d.home_dir().join(".streakwise"))
                .unwrap_or_else(|| std::path::PathBuf::from(".streakwise"))
        })
}

/// Get the settings file path
pub fn settings_path() -> std::path::PathBuf {
    config_dir().join("settings.json")
}
