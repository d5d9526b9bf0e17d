//! Week and month status for WEEKLY and CUSTOM habits

use crate::completion::{CheckinLog, DayOutcome};
use crate::date::{
    active_days_in_week, month_end, month_start, months_back, months_between, week_end,
    week_start, weeks_between,
};
use crate::{FrequencyPeriod, FrequencyType, HabitConfig, WeekStart};
use chrono::{Duration, NaiveDate};

/// Status of one week or month
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodStatus {
    Completed,
    Incomplete,
    /// Not concluded yet and still achievable: neither counts nor breaks
    Grace,
}

/// Unit a WEEKLY or CUSTOM habit is evaluated in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodKind {
    Week(WeekStart),
    Month,
}

impl PeriodKind {
    /// Period unit for a habit; `None` for DAILY habits
    pub fn for_habit(habit: &HabitConfig) -> Option<Self> {
        match (habit.frequency_type, habit.frequency_period) {
            (FrequencyType::Daily, _) => None,
            (FrequencyType::Custom, FrequencyPeriod::Month) => Some(PeriodKind::Month),
            _ => Some(PeriodKind::Week(habit.week_starts_on)),
        }
    }

    /// How far back a streak walk may go
    pub fn max_lookback(&self) -> u32 {
        match self {
            PeriodKind::Week(_) => 52,
            PeriodKind::Month => 12,
        }
    }

    pub fn start_of(&self, date: NaiveDate) -> NaiveDate {
        match self {
            PeriodKind::Week(starts_on) => week_start(date, *starts_on),
            PeriodKind::Month => month_start(date),
        }
    }

    pub fn end_of(&self, start: NaiveDate) -> NaiveDate {
        match self {
            PeriodKind::Week(_) => week_end(start),
            PeriodKind::Month => month_end(start),
        }
    }

    /// Start of the period `offset` periods before the one containing `date`
    pub fn back(&self, date: NaiveDate, offset: u32) -> NaiveDate {
        match self {
            PeriodKind::Week(_) => self.start_of(date) - Duration::weeks(offset as i64),
            PeriodKind::Month => months_back(date, offset),
        }
    }

    /// Period boundaries between the periods containing `earlier` and `later`
    pub fn between(&self, later: NaiveDate, earlier: NaiveDate) -> i64 {
        match self {
            PeriodKind::Week(starts_on) => weeks_between(later, earlier, *starts_on),
            PeriodKind::Month => months_between(later, earlier),
        }
    }
}

/// Status of a week for a habit scheduled on specific weekdays
///
/// A missed past active day makes the week incomplete no matter what else is
/// pending. An unfinished today or any future active day only puts the week
/// in grace.
pub fn weekly_status(
    week_start: NaiveDate,
    active_days: &[u8],
    log: &CheckinLog<'_>,
    today: NaiveDate,
) -> PeriodStatus {
    let days = active_days_in_week(week_start, active_days);
    if days.is_empty() {
        return PeriodStatus::Completed;
    }

    let mut has_grace = false;
    for day in days {
        if day > today {
            has_grace = true;
            continue;
        }

        let satisfied = log.outcome(day) != DayOutcome::Missed;
        if day == today {
            if !satisfied {
                has_grace = true;
            }
        } else if !satisfied {
            return PeriodStatus::Incomplete;
        }
    }

    if has_grace {
        PeriodStatus::Grace
    } else {
        PeriodStatus::Completed
    }
}

/// Status of a `[start, end]` period for a habit requiring `required`
/// completions in it
///
/// Skips never count here, whatever the skip policy.
fn quota_status(
    start: NaiveDate,
    end: NaiveDate,
    required: u32,
    log: &CheckinLog<'_>,
    today: NaiveDate,
) -> PeriodStatus {
    let completions = log.completions_between(start, end.min(today));

    if completions >= required {
        PeriodStatus::Completed
    } else if today < end {
        PeriodStatus::Grace
    } else {
        PeriodStatus::Incomplete
    }
}

/// Status of a week for a CUSTOM "N times per week" habit
pub fn custom_week_status(
    week_start: NaiveDate,
    required: u32,
    log: &CheckinLog<'_>,
    today: NaiveDate,
) -> PeriodStatus {
    quota_status(week_start, week_end(week_start), required, log, today)
}

/// Status of a calendar month for a CUSTOM "N times per month" habit
pub fn custom_month_status(
    month_start: NaiveDate,
    required: u32,
    log: &CheckinLog<'_>,
    today: NaiveDate,
) -> PeriodStatus {
    quota_status(month_start, month_end(month_start), required, log, today)
}

/// Status of the period starting at `start`, dispatched on the habit's schedule
pub fn period_status(
    habit: &HabitConfig,
    start: NaiveDate,
    log: &CheckinLog<'_>,
    today: NaiveDate,
) -> PeriodStatus {
    match (habit.frequency_type, habit.frequency_period) {
        (FrequencyType::Custom, FrequencyPeriod::Month) => {
            custom_month_status(start, habit.required_completions(), log, today)
        }
        (FrequencyType::Custom, FrequencyPeriod::Week) => {
            custom_week_status(start, habit.required_completions(), log, today)
        }
        _ => weekly_status(start, &habit.active_days, log, today),
    }
}
