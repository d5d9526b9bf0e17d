//! High-level streak API over a snapshot and user settings

use crate::period::PeriodKind;
use crate::snapshot::{Habit, Result, Snapshot};
use crate::streak::{calculate_current_streak, calculate_streak_stats, DAILY_LOOKBACK};
use crate::{HabitConfig, Settings, StreakStats};
use chrono::{Duration, NaiveDate};
use serde::Serialize;

/// One row of the habit list
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitSummary {
    pub id: String,
    pub name: String,
    pub schedule: String,
    pub current_streak: u32,
}

/// Full statistics for one habit
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HabitReport {
    pub id: String,
    pub name: String,
    #[serde(flatten)]
    pub stats: StreakStats,
}

pub struct Tracker<'a> {
    snapshot: &'a Snapshot,
    settings: &'a Settings,
}

impl<'a> Tracker<'a> {
    pub fn new(snapshot: &'a Snapshot, settings: &'a Settings) -> Self {
        Self { snapshot, settings }
    }

    fn config(&self, habit: &Habit) -> HabitConfig {
        let mut config = habit.config.clone();
        self.settings.apply(&mut config);
        config
    }

    /// Current streak of a habit, from the part of its history a streak walk can reach
    pub fn current_streak(&self, id: &str, today: NaiveDate) -> Result<u32> {
        let habit = self.snapshot.habit(id)?;
        let config = self.config(habit);
        let checkins = self
            .snapshot
            .checkins(id, Some(streak_horizon(&config, today)))?;

        Ok(calculate_current_streak(
            &checkins,
            &config,
            self.settings.skipped_breaks_streak,
            Some(today),
        ))
    }

    /// Full statistics of a habit
    pub fn stats(&self, id: &str, today: NaiveDate) -> Result<StreakStats> {
        let habit = self.snapshot.habit(id)?;
        let checkins = self.snapshot.checkins(id, None)?;

        Ok(calculate_streak_stats(
            &checkins,
            &self.config(habit),
            self.settings.skipped_breaks_streak,
            Some(today),
        ))
    }

    /// Current streaks of all active habits
    pub fn summaries(&self, today: NaiveDate) -> Result<Vec<HabitSummary>> {
        self.snapshot
            .habits()
            .map(|habit| {
                Ok(HabitSummary {
                    id: habit.id.clone(),
                    name: habit.name.clone(),
                    schedule: self.config(habit).to_string(),
                    current_streak: self.current_streak(&habit.id, today)?,
                })
            })
            .collect()
    }

    /// Full statistics of all active habits
    pub fn report(&self, today: NaiveDate) -> Result<Vec<HabitReport>> {
        self.snapshot
            .habits()
            .map(|habit| {
                Ok(HabitReport {
                    id: habit.id.clone(),
                    name: habit.name.clone(),
                    stats: self.stats(&habit.id, today)?,
                })
            })
            .collect()
    }
}

/// Oldest date a current-streak walk can look at
fn streak_horizon(config: &HabitConfig, today: NaiveDate) -> NaiveDate {
    match PeriodKind::for_habit(config) {
        Some(kind) => kind.back(today, kind.max_lookback() - 1),
        None => today - Duration::days(DAILY_LOOKBACK as i64 - 1),
    }
}
