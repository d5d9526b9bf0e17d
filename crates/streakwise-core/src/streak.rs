//! Current-streak and full-statistics calculators
//!
//! Both entry points are pure: they read only their arguments, and "today" is
//! passed in by the caller (falling back to the local date when absent).
//! DAILY habits are walked day by day, WEEKLY and CUSTOM habits period by
//! period, newest first.

use crate::completion::{CheckinLog, DayOutcome};
use crate::date::{active_days_in_week, days_between, local_today};
use crate::period::{period_status, PeriodKind, PeriodStatus};
use crate::{Checkin, FrequencyType, HabitConfig, StreakStats};
use chrono::NaiveDate;
use tracing::trace;

/// Maximum number of days a DAILY walk looks back
pub const DAILY_LOOKBACK: u32 = 365;

/// Calculate the running streak of a habit as of `today` (list view)
///
/// Counts days for DAILY habits, weeks or months for WEEKLY and CUSTOM ones.
pub fn calculate_current_streak(
    checkins: &[Checkin],
    habit: &HabitConfig,
    skipped_breaks_streak: bool,
    today: Option<NaiveDate>,
) -> u32 {
    if checkins.is_empty() {
        return 0;
    }

    let today = today.unwrap_or_else(local_today);
    let log = CheckinLog::new(checkins, habit, skipped_breaks_streak);

    match PeriodKind::for_habit(habit) {
        None => daily_streak(&log, today),
        Some(_) if has_no_schedule(habit) => 0,
        Some(kind) => periodic_streak(&log, habit, kind, today),
    }
}

/// Calculate current and longest streak plus completion rate (detail view)
///
/// The scan starts at the earlier of the habit's creation date and its
/// oldest check-in, so backfilled history is included.
pub fn calculate_streak_stats(
    checkins: &[Checkin],
    habit: &HabitConfig,
    skipped_breaks_streak: bool,
    today: Option<NaiveDate>,
) -> StreakStats {
    if checkins.is_empty() || has_no_schedule(habit) {
        return StreakStats::default();
    }

    let today = today.unwrap_or_else(local_today);
    let log = CheckinLog::new(checkins, habit, skipped_breaks_streak);
    let earliest = habit
        .created_at
        .into_iter()
        .chain(checkins.iter().map(|c| c.date))
        .min()
        .unwrap_or(today);

    match PeriodKind::for_habit(habit) {
        None => daily_stats(&log, today, earliest),
        Some(kind) => periodic_stats(&log, habit, kind, today, earliest),
    }
}

/// WEEKLY habits with no active days can never be satisfied
fn has_no_schedule(habit: &HabitConfig) -> bool {
    habit.frequency_type == FrequencyType::Weekly && habit.active_days.is_empty()
}

/// `today`, yesterday, the day before, ...
fn days_back(today: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    std::iter::successors(Some(today), |d| d.pred_opt())
}

fn daily_streak(log: &CheckinLog<'_>, today: NaiveDate) -> u32 {
    let mut streak = 0;

    for day in days_back(today).take(DAILY_LOOKBACK as usize) {
        match log.outcome(day) {
            DayOutcome::Completed => streak += 1,
            DayOutcome::Preserved => {}
            // Today is still actionable
            DayOutcome::Missed if day == today => {}
            DayOutcome::Missed => {
                trace!(%day, streak, "daily streak broken");
                break;
            }
        }
    }

    streak
}

fn periodic_streak(
    log: &CheckinLog<'_>,
    habit: &HabitConfig,
    kind: PeriodKind,
    today: NaiveDate,
) -> u32 {
    let mut streak = 0;

    for offset in 0..kind.max_lookback() {
        let start = kind.back(today, offset);
        match period_status(habit, start, log, today) {
            PeriodStatus::Completed => streak += 1,
            PeriodStatus::Grace => {}
            PeriodStatus::Incomplete => {
                trace!(%start, streak, "period streak broken");
                break;
            }
        }
    }

    streak
}

/// Streak counters for a newest-first walk
///
/// `current` follows the running streak until the first break is met, then
/// freezes; `longest` is the best run seen anywhere.
#[derive(Debug, Default)]
struct StreakTally {
    run: u32,
    current: u32,
    longest: u32,
    broken: bool,
}

impl StreakTally {
    fn extend(&mut self) {
        self.run += 1;
        if !self.broken {
            self.current = self.run;
        }
        self.longest = self.longest.max(self.run);
    }

    fn break_run(&mut self) {
        self.broken = true;
        self.run = 0;
    }
}

fn completion_rate(total_checkins: u32, total_expected: u32) -> u32 {
    if total_expected == 0 {
        return 0;
    }
    (100.0 * total_checkins as f64 / total_expected as f64).round() as u32
}

fn daily_stats(log: &CheckinLog<'_>, today: NaiveDate, earliest: NaiveDate) -> StreakStats {
    let window = (days_between(today, earliest) + 1).clamp(0, DAILY_LOOKBACK as i64);
    let mut tally = StreakTally::default();
    let mut total_checkins = 0;
    let mut total_expected_days = 0;

    for day in days_back(today).take(window as usize) {
        total_expected_days += 1;

        match log.outcome(day) {
            DayOutcome::Completed => {
                total_checkins += 1;
                tally.extend();
            }
            DayOutcome::Preserved => {}
            DayOutcome::Missed if day == today => {}
            DayOutcome::Missed => tally.break_run(),
        }
    }

    StreakStats {
        current_streak: tally.current,
        longest_streak: tally.longest,
        completion_rate: completion_rate(total_checkins, total_expected_days),
        total_checkins,
        total_expected_days,
    }
}

fn periodic_stats(
    log: &CheckinLog<'_>,
    habit: &HabitConfig,
    kind: PeriodKind,
    today: NaiveDate,
    earliest: NaiveDate,
) -> StreakStats {
    let window = (kind.between(today, earliest) + 1).clamp(0, kind.max_lookback() as i64);
    let mut tally = StreakTally::default();
    let mut total_checkins = 0;
    let mut total_expected_days = 0;

    for offset in 0..window as u32 {
        let start = kind.back(today, offset);
        let status = period_status(habit, start, log, today);

        if habit.frequency_type == FrequencyType::Weekly {
            for day in active_days_in_week(start, &habit.active_days) {
                if day > today || day < earliest {
                    continue;
                }
                total_expected_days += 1;
                if log.is_completed(day) {
                    total_checkins += 1;
                }
            }
        } else {
            let required = habit.required_completions();
            let from = start.max(earliest);
            let to = kind.end_of(start).min(today);
            let counted = log.completions_between(from, to).min(required);

            total_checkins += counted;
            // A pending period only contributes what it has achieved so far
            total_expected_days += if status == PeriodStatus::Grace {
                counted
            } else {
                required
            };
        }

        match status {
            PeriodStatus::Completed => tally.extend(),
            PeriodStatus::Grace => {}
            PeriodStatus::Incomplete => tally.break_run(),
        }
    }

    StreakStats {
        current_streak: tally.current,
        longest_streak: tally.longest,
        completion_rate: completion_rate(total_checkins, total_expected_days),
        total_checkins,
        total_expected_days,
    }
}
