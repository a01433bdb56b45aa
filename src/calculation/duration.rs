//! Calendar duration arithmetic and display formatting.
//!
//! Contract lengths are shown as calendar spans ("1 year, 2 months, 3 days")
//! and leave lengths as day counts ("30 days").

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A calendar difference split into whole years, months and days.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarSpan {
    /// Whole years.
    pub years: u32,
    /// Remaining months (0-11).
    pub months: u32,
    /// Remaining days.
    pub days: u32,
}

impl CalendarSpan {
    /// Returns true when every component is zero.
    pub fn is_zero(&self) -> bool {
        self.years == 0 && self.months == 0 && self.days == 0
    }
}

/// Number of days in the month containing `date`.
fn days_in_month(date: NaiveDate) -> u32 {
    let (year, month) = (date.year(), date.month());
    let first_of_next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    first_of_next
        .and_then(|next| next.pred_opt())
        .map(|last| last.day())
        .unwrap_or(31)
}

/// Computes the calendar difference between two dates.
///
/// The order of the arguments does not matter. When the day of the later
/// date is smaller than the day of the earlier one, a month is borrowed
/// using the length of the earlier date's month.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use hr_admin::calculation::{CalendarSpan, calendar_diff};
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2025, 3, 4).unwrap();
/// assert_eq!(
///     calendar_diff(start, end),
///     CalendarSpan { years: 1, months: 2, days: 3 }
/// );
/// ```
pub fn calendar_diff(a: NaiveDate, b: NaiveDate) -> CalendarSpan {
    let (from, to) = if a <= b { (a, b) } else { (b, a) };

    let mut years = to.year() - from.year();
    let mut months = to.month() as i32 - from.month() as i32;
    let mut days = to.day() as i32 - from.day() as i32;

    if days < 0 {
        months -= 1;
        days += days_in_month(from) as i32;
    }
    if months < 0 {
        years -= 1;
        months += 12;
    }

    CalendarSpan {
        years: years.max(0) as u32,
        months: months.max(0) as u32,
        days: days.max(0) as u32,
    }
}

/// Number of days from `start` to `end`, counting both ends.
pub fn inclusive_days(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days() + 1
}

/// Returns `word` or its plural for the given count.
///
/// The singular is used only for a count of exactly one (or minus one).
///
/// # Examples
///
/// ```
/// use hr_admin::calculation::pluralize;
///
/// assert_eq!(pluralize("year", 1), "year");
/// assert_eq!(pluralize("day", 0), "days");
/// assert_eq!(pluralize("month", 7), "months");
/// ```
pub fn pluralize(word: &str, count: i64) -> String {
    if count.abs() == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}

/// Renders a calendar span, omitting zero-valued components.
///
/// # Examples
///
/// ```
/// use hr_admin::calculation::{CalendarSpan, format_duration};
///
/// let span = CalendarSpan { years: 1, months: 2, days: 3 };
/// assert_eq!(format_duration(span), "1 year, 2 months, 3 days");
///
/// let span = CalendarSpan { years: 0, months: 0, days: 5 };
/// assert_eq!(format_duration(span), "5 days");
/// ```
pub fn format_duration(span: CalendarSpan) -> String {
    [
        (span.years, "year"),
        (span.months, "month"),
        (span.days, "day"),
    ]
    .into_iter()
    .filter(|(value, _)| *value > 0)
    .map(|(value, unit)| format!("{} {}", value, pluralize(unit, i64::from(value))))
    .collect::<Vec<_>>()
    .join(", ")
}

/// Renders a day count, e.g. "1 day" or "0 days".
pub fn format_days(days: i64) -> String {
    format!("{} {}", days, pluralize("day", days))
}
