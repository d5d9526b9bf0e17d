//! Read-only snapshot of habits and their check-in history
//!
//! A snapshot is a JSON document exported by the habit service:
//!
//! ```json
//! { "habits": [ { "id": "read", "name": "Read", "frequencyType": "DAILY",
//!                 "checkins": [ { "date": "2025-12-31" } ] } ] }
//! ```

use crate::{Checkin, HabitConfig};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::io::Read;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid snapshot: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Unknown habit: {0}")]
    UnknownHabit(String),
}

pub type Result<T> = std::result::Result<T, SnapshotError>;

/// A habit with its configuration and full check-in history
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub archived: bool,
    #[serde(flatten)]
    pub config: HabitConfig,
    #[serde(default)]
    pub checkins: Vec<Checkin>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    habits: Vec<Habit>,
}

impl Snapshot {
    #[cfg(test)]
    pub fn new(habits: Vec<Habit>) -> Self {
        Self { habits }
    }

    /// Open a snapshot file
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path.as_ref())?;
        let snapshot = Self::from_reader(std::io::BufReader::new(file))?;
        debug!(
            "Loaded {} habits from {:?}",
            snapshot.habits.len(),
            path.as_ref()
        );
        Ok(snapshot)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Active (non-archived) habits in file order
    pub fn habits(&self) -> impl Iterator<Item = &Habit> {
        self.habits.iter().filter(|h| !h.archived)
    }

    pub fn habit(&self, id: &str) -> Result<&Habit> {
        self.habits
            .iter()
            .find(|h| h.id == id)
            .ok_or_else(|| SnapshotError::UnknownHabit(id.to_string()))
    }

    /// Check-ins of a habit on or after `since` (all when `None`), newest first
    pub fn checkins(&self, id: &str, since: Option<NaiveDate>) -> Result<Vec<Checkin>> {
        let habit = self.habit(id)?;
        let mut checkins: Vec<Checkin> = habit
            .checkins
            .iter()
            .filter(|c| since.map_or(true, |since| c.date >= since))
            .cloned()
            .collect();
        checkins.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(checkins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FrequencyPeriod, FrequencyType, HabitType};

    const SNAPSHOT: &str = r#"{
        "habits": [
            {
                "id": "read",
                "name": "Read",
                "frequencyType": "DAILY",
                "createdAt": "2025-12-01",
                "checkins": [
                    {"date": "2025-12-29"},
                    {"date": "2025-12-31", "skipped": false, "value": null},
                    {"date": "2025-12-30", "skipped": true}
                ]
            },
            {
                "id": "gym",
                "name": "Gym",
                "frequencyType": "CUSTOM",
                "frequencyValue": 3,
                "frequencyPeriod": "week",
                "habitType": "TARGET",
                "targetValue": "45"
            },
            {
                "id": "old",
                "name": "Old",
                "archived": true,
                "frequencyType": "WEEKLY",
                "frequencyPeriod": "month",
                "activeDays": [1, 3]
            }
        ]
    }"#;

    fn snapshot() -> Snapshot {
        Snapshot::from_reader(SNAPSHOT.as_bytes()).unwrap()
    }

    #[test]
    fn test_parse_snapshot() {
        let snapshot = snapshot();
        let ids: Vec<&str> = snapshot.habits().map(|h| h.id.as_str()).collect();
        assert_eq!(ids, vec!["read", "gym"]);

        let gym = snapshot.habit("gym").unwrap();
        assert_eq!(gym.config.frequency_type, FrequencyType::Custom);
        assert_eq!(gym.config.frequency_value, 3);
        assert_eq!(gym.config.frequency_period, FrequencyPeriod::Week);
        assert_eq!(gym.config.habit_type, HabitType::Target);
        assert_eq!(gym.config.target_value, Some(45.0));
        assert!(gym.checkins.is_empty());

        let old = snapshot.habit("old").unwrap();
        assert!(old.archived);
        assert_eq!(old.config.active_days, vec![1, 3]);
    }

    #[test]
    fn test_checkins_newest_first_with_lookback() {
        let snapshot = snapshot();
        let all = snapshot.checkins("read", None).unwrap();
        let dates: Vec<String> = all.iter().map(|c| c.date.to_string()).collect();
        assert_eq!(dates, vec!["2025-12-31", "2025-12-30", "2025-12-29"]);

        let since = NaiveDate::from_ymd_opt(2025, 12, 30);
        assert_eq!(snapshot.checkins("read", since).unwrap().len(), 2);
    }

    #[test]
    fn test_unknown_habit() {
        assert!(matches!(
            snapshot().checkins("nope", None),
            Err(SnapshotError::UnknownHabit(id)) if id == "nope"
        ));
    }

    #[test]
    fn test_invalid_snapshot() {
        let bad = r#"{"habits": [{"id": "x", "name": "X", "frequencyType": "HOURLY"}]}"#;
        assert!(matches!(
            Snapshot::from_reader(bad.as_bytes()),
            Err(SnapshotError::Json(_))
        ));
    }
}
