// --- File: crates/lessongrid_core/src/week.rs ---
//! Monday-anchored week navigation.
//!
//! All arithmetic is date-only (`NaiveDate`), so paging across a DST
//! transition can never drift the anchor off midnight.

use chrono::{Datelike, Duration, NaiveDate};

pub const DAY_NAMES: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// The Monday of the ISO week containing `date`.
pub fn week_start_of(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// The seven dates spanned by the week anchored at `week_start`.
pub fn week_dates(week_start: NaiveDate) -> [NaiveDate; 7] {
    std::array::from_fn(|i| week_start + Duration::days(i as i64))
}

/// Pages the anchor by whole weeks and re-normalizes onto a Monday, so a
/// drifted anchor can never compound.
pub fn shift_week(week_start: NaiveDate, delta_weeks: i64) -> NaiveDate {
    week_start_of(week_start + Duration::days(7 * delta_weeks))
}

/// Header label for a week, e.g. "June 2024".
pub fn month_year_label(week_start: NaiveDate) -> String {
    format!(
        "{} {}",
        MONTH_NAMES[week_start.month0() as usize],
        week_start.year()
    )
}

/// A day-of-month with its English ordinal suffix: "1st", "2nd", "11th", "23rd".
pub fn ordinal_day(date: NaiveDate) -> String {
    let day = date.day();
    let suffix = match day {
        4..=20 => "th",
        _ => match day % 10 {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        },
    };
    format!("{day}{suffix}")
}
