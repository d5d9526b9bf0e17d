//! Calendar helpers and period windowing
//!
//! Everything here works on `NaiveDate`. A calendar date has no time of day,
//! so stepping across a daylight-saving change can never skip or repeat a day.

use crate::WeekStart;
use chrono::{Datelike, Duration, Local, NaiveDate};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DateError {
    #[error("Invalid date '{0}', expected YYYY-MM-DD")]
    Invalid(String),
}

pub type Result<T> = std::result::Result<T, DateError>;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT)
        .map_err(|_| DateError::Invalid(input.to_string()))
}

/// Format a date as `YYYY-MM-DD`
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Today's date on the local clock
///
/// Callers use this when the client did not send its own "today"; the engine
/// never reads the clock itself.
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Weekday number, 0=Sunday..6=Saturday
pub fn weekday_index(date: NaiveDate) -> u8 {
    date.weekday().num_days_from_sunday() as u8
}

/// First day of the calendar week containing `date`
///
/// With a Monday start, Sunday is the last day of its week and maps back to
/// the Monday six days earlier.
pub fn week_start(date: NaiveDate, starts_on: WeekStart) -> NaiveDate {
    let offset = match starts_on {
        WeekStart::Monday => date.weekday().num_days_from_monday(),
        WeekStart::Sunday => date.weekday().num_days_from_sunday(),
    };
    date - Duration::days(offset as i64)
}

/// Last day of the calendar week starting at `week_start`
pub fn week_end(week_start: NaiveDate) -> NaiveDate {
    week_start + Duration::days(6)
}

/// First day of the month containing `date`
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Last day of the month containing `date`
pub fn month_end(date: NaiveDate) -> NaiveDate {
    month_start(date) + Duration::days(days_in_month(date) as i64 - 1)
}

pub fn days_in_month(date: NaiveDate) -> u32 {
    let (year, month) = (date.year(), date.month());
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };

    match next {
        Some(next) => (next - month_start(date)).num_days() as u32,
        None => 31,
    }
}

/// Start of the month `count` months before the one containing `date`
pub fn months_back(date: NaiveDate, count: u32) -> NaiveDate {
    let start = month_start(date);
    start
        .checked_sub_months(chrono::Months::new(count))
        .unwrap_or(start)
}

/// Dates in `[week_start, week_start + 6]` whose weekday is in `active_days`, ascending
pub fn active_days_in_week(week_start: NaiveDate, active_days: &[u8]) -> Vec<NaiveDate> {
    week_start
        .iter_days()
        .take(7)
        .filter(|d| active_days.contains(&weekday_index(*d)))
        .collect()
}

/// Whole days from `earlier` to `later` (negative if `later` comes first)
pub fn days_between(later: NaiveDate, earlier: NaiveDate) -> i64 {
    (later - earlier).num_days()
}

/// Number of week boundaries between the weeks containing `earlier` and `later`
pub fn weeks_between(later: NaiveDate, earlier: NaiveDate, starts_on: WeekStart) -> i64 {
    days_between(week_start(later, starts_on), week_start(earlier, starts_on)) / 7
}

/// Number of month boundaries between the months containing `earlier` and `later`
pub fn months_between(later: NaiveDate, earlier: NaiveDate) -> i64 {
    let index = |d: NaiveDate| d.year() as i64 * 12 + d.month0() as i64;
    index(later) - index(earlier)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    #[test]
    fn test_parse_and_format() {
        assert_eq!(format_date(d("2025-12-31")), "2025-12-31");
        assert_eq!(parse_date(" 2024-02-29 ").unwrap(), d("2024-02-29"));
        assert!(parse_date("2025-02-30").is_err());
        assert!(parse_date("31/12/2025").is_err());
    }

    #[test]
    fn test_week_start_monday() {
        // Wed 31 Dec 2025
        assert_eq!(week_start(d("2025-12-31"), WeekStart::Monday), d("2025-12-29"));
        assert_eq!(week_start(d("2025-12-29"), WeekStart::Monday), d("2025-12-29"));
        // Sunday belongs to the week that began six days earlier
        assert_eq!(week_start(d("2025-12-28"), WeekStart::Monday), d("2025-12-22"));
    }

    #[test]
    fn test_week_start_sunday() {
        assert_eq!(week_start(d("2025-12-31"), WeekStart::Sunday), d("2025-12-28"));
        assert_eq!(week_start(d("2025-12-28"), WeekStart::Sunday), d("2025-12-28"));
        assert_eq!(week_start(d("2025-12-27"), WeekStart::Sunday), d("2025-12-21"));
    }

    #[test]
    fn test_month_bounds() {
        assert_eq!(month_start(d("2025-12-31")), d("2025-12-01"));
        assert_eq!(month_end(d("2025-12-05")), d("2025-12-31"));
        assert_eq!(month_end(d("2024-02-10")), d("2024-02-29"));
        assert_eq!(days_in_month(d("2025-02-10")), 28);
        assert_eq!(days_in_month(d("2025-04-01")), 30);
        assert_eq!(months_back(d("2025-01-15"), 1), d("2024-12-01"));
        assert_eq!(months_back(d("2025-03-31"), 13), d("2024-02-01"));
    }

    #[test]
    fn test_active_days_in_week() {
        let days = active_days_in_week(d("2025-12-29"), &[1, 3, 5]);
        assert_eq!(days, vec![d("2025-12-29"), d("2025-12-31"), d("2026-01-02")]);

        let weekend = active_days_in_week(d("2025-12-29"), &[0, 6]);
        assert_eq!(weekend, vec![d("2026-01-03"), d("2026-01-04")]);

        assert!(active_days_in_week(d("2025-12-29"), &[]).is_empty());
    }

    #[test]
    fn test_period_distances() {
        assert_eq!(days_between(d("2025-12-31"), d("2025-12-21")), 10);
        assert_eq!(weeks_between(d("2025-12-31"), d("2025-12-15"), WeekStart::Monday), 2);
        // Sunday 28 Dec still belongs to the previous Monday-start week
        assert_eq!(weeks_between(d("2025-12-29"), d("2025-12-28"), WeekStart::Monday), 1);
        assert_eq!(weeks_between(d("2025-12-29"), d("2025-12-28"), WeekStart::Sunday), 0);
        assert_eq!(months_between(d("2026-01-02"), d("2025-11-30")), 2);
        assert_eq!(months_between(d("2025-11-30"), d("2026-01-02")), -2);
    }
}
