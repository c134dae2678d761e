use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

static MONTH_NAMES: &[&str] = &[
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

/// ISO-8601 week descriptor plus the Monday..Sunday window around a date.
///
/// The week number follows the ISO rule (the week containing the first
/// Thursday of the year is week 1), while `week_start`/`week_end` are
/// derived directly from the input date so the window always brackets it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekInfo {
    /// ISO week-numbering year; differs from the calendar year around
    /// January 1st.
    pub year: i32,
    pub week: u32,
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
}

pub fn week_info(date: NaiveDate) -> WeekInfo {
    let iso = date.iso_week();
    let week_start = date - Duration::days(date.weekday().num_days_from_monday() as i64);

    WeekInfo {
        year: iso.year(),
        week: iso.week(),
        week_start,
        week_end: week_start + Duration::days(6),
    }
}

/// Calendar month descriptor. `month` is 1-indexed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct MonthInfo {
    pub year: i32,
    pub month: u32,
    pub name: &'static str,
    pub month_start: NaiveDate,
    pub month_end: NaiveDate,
}

pub fn month_info(date: NaiveDate) -> MonthInfo {
    let year = date.year();
    let month = date.month();
    let month_start = NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(date);
    let next_month_start = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };

    MonthInfo {
        year,
        month,
        name: MONTH_NAMES[(month - 1) as usize],
        month_start,
        month_end: next_month_start
            .map(|d| d - Duration::days(1))
            .unwrap_or(date),
    }
}
