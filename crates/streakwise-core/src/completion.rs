//! Per-day completion rules

use crate::{Checkin, HabitConfig, HabitType};
use chrono::NaiveDate;
use std::collections::HashMap;

/// Parse a numeric string, returning 0 for anything that is not a finite number
pub fn parse_or_zero(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}

fn or_zero(value: Option<f64>) -> f64 {
    value.filter(|n| n.is_finite()).unwrap_or(0.0)
}

/// Whether a check-in counts as an actual completion
///
/// A skip is never a completion, whatever the skip policy.
pub fn is_actually_completed(
    checkin: Option<&Checkin>,
    habit_type: HabitType,
    target_value: Option<f64>,
) -> bool {
    let Some(checkin) = checkin else {
        return false;
    };
    if checkin.skipped {
        return false;
    }

    match habit_type {
        HabitType::Simple => true,
        HabitType::Target => or_zero(checkin.value) >= or_zero(target_value),
    }
}

/// Whether a check-in is a skip that keeps the streak alive
pub fn is_skip_preserving_streak(checkin: Option<&Checkin>, skipped_breaks_streak: bool) -> bool {
    checkin.is_some_and(|c| c.skipped) && !skipped_breaks_streak
}

/// What a single day means for a streak
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayOutcome {
    Completed,
    /// Skipped under a non-breaking skip policy: neither counts nor breaks
    Preserved,
    Missed,
}

/// Check-ins of one habit keyed by date
///
/// When the input holds several records for the same date, the last one wins.
pub struct CheckinLog<'a> {
    by_date: HashMap<NaiveDate, &'a Checkin>,
    habit_type: HabitType,
    target_value: Option<f64>,
    skipped_breaks_streak: bool,
}

impl<'a> CheckinLog<'a> {
    pub fn new(checkins: &'a [Checkin], habit: &HabitConfig, skipped_breaks_streak: bool) -> Self {
        let by_date = checkins.iter().map(|c| (c.date, c)).collect();
        Self {
            by_date,
            habit_type: habit.habit_type,
            target_value: habit.target_value,
            skipped_breaks_streak,
        }
    }

    pub fn get(&self, date: NaiveDate) -> Option<&'a Checkin> {
        self.by_date.get(&date).copied()
    }

    pub fn is_completed(&self, date: NaiveDate) -> bool {
        is_actually_completed(self.get(date), self.habit_type, self.target_value)
    }

    pub fn outcome(&self, date: NaiveDate) -> DayOutcome {
        let checkin = self.get(date);
        if is_actually_completed(checkin, self.habit_type, self.target_value) {
            DayOutcome::Completed
        } else if is_skip_preserving_streak(checkin, self.skipped_breaks_streak) {
            DayOutcome::Preserved
        } else {
            DayOutcome::Missed
        }
    }

    /// Actual completions on the days of `[from, to]`
    pub fn completions_between(&self, from: NaiveDate, to: NaiveDate) -> u32 {
        if from > to {
            return 0;
        }
        from.iter_days()
            .take_while(|d| *d <= to)
            .filter(|d| self.is_completed(*d))
            .count() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, 31).unwrap()
    }

    #[test]
    fn test_parse_or_zero() {
        assert_eq!(parse_or_zero("12.5"), 12.5);
        assert_eq!(parse_or_zero(" 3 "), 3.0);
        assert_eq!(parse_or_zero(""), 0.0);
        assert_eq!(parse_or_zero("ten"), 0.0);
        assert_eq!(parse_or_zero("NaN"), 0.0);
        assert_eq!(parse_or_zero("inf"), 0.0);
    }

    #[test]
    fn test_simple_completion() {
        let done = Checkin::done(day());
        let skipped = Checkin::skip(day());

        assert!(!is_actually_completed(None, HabitType::Simple, None));
        assert!(is_actually_completed(Some(&done), HabitType::Simple, None));
        assert!(!is_actually_completed(Some(&skipped), HabitType::Simple, None));
    }

    #[test]
    fn test_target_completion() {
        let below = Checkin::done(day()).with_value(5.0);
        let exact = Checkin::done(day()).with_value(10.0);
        let missing = Checkin::done(day());

        assert!(!is_actually_completed(Some(&below), HabitType::Target, Some(10.0)));
        assert!(is_actually_completed(Some(&exact), HabitType::Target, Some(10.0)));
        assert!(!is_actually_completed(Some(&missing), HabitType::Target, Some(10.0)));
        // Missing target reads as 0, so any recorded value meets it
        assert!(is_actually_completed(Some(&missing), HabitType::Target, None));
    }

    #[test]
    fn test_skip_preservation() {
        let skipped = Checkin::skip(day());
        let done = Checkin::done(day());

        assert!(is_skip_preserving_streak(Some(&skipped), false));
        assert!(!is_skip_preserving_streak(Some(&skipped), true));
        assert!(!is_skip_preserving_streak(Some(&done), false));
        assert!(!is_skip_preserving_streak(None, false));
    }

    #[test]
    fn test_log_outcomes_and_duplicates() {
        let yesterday = day().pred_opt().unwrap();
        let checkins = vec![
            Checkin::done(day()).with_value(1.0),
            Checkin::done(day()).with_value(20.0),
            Checkin::skip(yesterday),
        ];
        let habit = HabitConfig::daily().with_target(10.0);

        let log = CheckinLog::new(&checkins, &habit, false);
        assert_eq!(log.outcome(day()), DayOutcome::Completed);
        assert_eq!(log.outcome(yesterday), DayOutcome::Preserved);
        assert_eq!(log.outcome(yesterday.pred_opt().unwrap()), DayOutcome::Missed);
        assert_eq!(log.completions_between(yesterday, day()), 1);
        assert_eq!(log.completions_between(day(), yesterday), 0);

        let strict = CheckinLog::new(&checkins, &habit, true);
        assert_eq!(strict.outcome(yesterday), DayOutcome::Missed);
    }
}
