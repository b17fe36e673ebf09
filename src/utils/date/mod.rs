// Date utility functions
// Calendar-correct date math shared by the expander, resolver and projections.
// Weeks run Sunday through Saturday.

use chrono::{Datelike, Duration, NaiveDate, NaiveTime};

use crate::error::{EngineError, EngineResult};
use crate::models::ui::{NavigationDirection, ViewType};

/// Wire format for calendar dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
/// Wire format for times of day.
pub const TIME_FORMAT: &str = "%H:%M";

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(value: &str) -> EngineResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|e| EngineError::InvalidDate(format!("'{}' is not a YYYY-MM-DD date ({})", value, e)))
}

/// Parse an `HH:MM` time of day.
pub fn parse_time(value: &str) -> EngineResult<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), TIME_FORMAT)
        .map_err(|e| EngineError::InvalidDate(format!("'{}' is not an HH:MM time ({})", value, e)))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn format_time(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

/// Signed number of calendar days from `a` to `b` (`b - a`).
pub fn days_between(a: NaiveDate, b: NaiveDate) -> i64 {
    b.signed_duration_since(a).num_days()
}

/// Shift a date by `n` days, saturating at the representable range.
pub fn add_days(date: NaiveDate, n: i64) -> NaiveDate {
    Duration::try_days(n)
        .and_then(|delta| date.checked_add_signed(delta))
        .unwrap_or(if n < 0 { NaiveDate::MIN } else { NaiveDate::MAX })
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` (1-12) of `year`; 0 for an invalid month.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// The same day-of-month `months` calendar months later (or earlier).
///
/// Returns `None` when that day does not exist in the target month, e.g.
/// Jan 31 + 1 month. Callers decide whether to skip or clamp.
pub fn add_months_exact(date: NaiveDate, months: i64) -> Option<NaiveDate> {
    let index = i64::from(date.year()) * 12 + i64::from(date.month0()) + months;
    let year = i32::try_from(index.div_euclid(12)).ok()?;
    let month = u32::try_from(index.rem_euclid(12)).ok()? + 1;
    NaiveDate::from_ymd_opt(year, month, date.day())
}

/// The same month and day `years` later; `None` for Feb 29 on a non-leap year.
pub fn add_years_exact(date: NaiveDate, years: i64) -> Option<NaiveDate> {
    let year = i32::try_from(i64::from(date.year()) + years).ok()?;
    NaiveDate::from_ymd_opt(year, date.month(), date.day())
}

/// First day of the month that is `months` away from the month of `date`.
pub(crate) fn first_of_month_offset(date: NaiveDate, months: i64) -> Option<NaiveDate> {
    add_months_exact(date.with_day(1)?, months)
}

/// Sunday-to-Saturday window containing `date`, both ends inclusive.
pub fn week_range(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let start = add_days(date, -i64::from(date.weekday().num_days_from_sunday()));
    (start, add_days(start, 6))
}

/// The seven dates of the week containing `date`, Sunday first.
pub fn week_dates(date: NaiveDate) -> [NaiveDate; 7] {
    let (start, _) = week_range(date);
    std::array::from_fn(|offset| add_days(start, offset as i64))
}

/// First and last day of the month containing `date`.
pub fn month_range(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let last_day = days_in_month(date.year(), date.month());
    let first = date.with_day(1).unwrap_or(date);
    let last = date.with_day(last_day).unwrap_or(date);
    (first, last)
}

/// Week rows covering the month of `date`, Sunday first.
///
/// Cells outside the month are `None`. Every row has exactly seven cells.
pub fn month_grid(date: NaiveDate) -> Vec<[Option<u32>; 7]> {
    let (first, last) = month_range(date);
    let mut weeks = Vec::with_capacity(6);
    let mut week = [None; 7];
    let mut column = first.weekday().num_days_from_sunday() as usize;

    for day in 1..=last.day() {
        week[column] = Some(day);
        column += 1;
        if column == 7 {
            weeks.push(week);
            week = [None; 7];
            column = 0;
        }
    }

    if column > 0 {
        weeks.push(week);
    }

    weeks
}

/// Move the reference date one view step backwards or forwards.
///
/// Week views move by seven days. Month views land on the first day of the
/// neighbouring month so that short months never shift the anchor.
pub fn navigate(date: NaiveDate, view: ViewType, direction: NavigationDirection) -> NaiveDate {
    let step: i64 = match direction {
        NavigationDirection::Previous => -1,
        NavigationDirection::Next => 1,
    };

    match view {
        ViewType::Week => add_days(date, 7 * step),
        ViewType::Month => first_of_month_offset(date, step).unwrap_or(date),
    }
}
