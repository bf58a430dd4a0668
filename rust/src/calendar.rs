//! Gregorian calendar helpers used for date bounds and age computation.

use chrono::{Datelike, Local, NaiveDate};

/// Days per month for a common year, January first.
pub const DAYS_IN_MONTH: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

pub const FEBRUARY: u32 = 2;

/// Gregorian leap year rule.
#[inline]
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` (1-based) of `year`, or `None` for a month outside 1..=12.
pub fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let days = *DAYS_IN_MONTH.get(month.checked_sub(1)? as usize)?;
    if month == FEBRUARY && is_leap_year(year) {
        Some(days + 1)
    } else {
        Some(days)
    }
}

/// Current date in the local time zone.
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Whether the (month, day) anniversary has occurred on or before `today` in today's year.
pub fn anniversary_passed(month: u32, day: u32, today: NaiveDate) -> bool {
    (month, day) <= (today.month(), today.day())
}

/// Completed years between `birth` and `today`. Negative when `birth` lies in the future.
pub fn age_in_years(birth: NaiveDate, today: NaiveDate) -> i32 {
    let years = today.year() - birth.year();
    if anniversary_passed(birth.month(), birth.day(), today) {
        years
    } else {
        years - 1
    }
}
