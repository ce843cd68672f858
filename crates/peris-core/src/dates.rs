//! Calendar arithmetic for forecast projection.
//!
//! Month and year shifts use roll-over overflow semantics: when the source
//! day does not exist in the target month, the surplus days spill into the
//! following month (Jan 31 + 1 month = Mar 3 in a non-leap year). The stored
//! ledgers were produced under these semantics, so forecast dates must keep
//! them rather than clamping to the end of the month.

use chrono::{Datelike, Duration, NaiveDate};

/// Shifts a date by a signed number of calendar months.
pub fn add_months(from: NaiveDate, months: i32) -> NaiveDate {
    let month_index = from.year() * 12 + from.month0() as i32 + months;
    let year = month_index.div_euclid(12);
    let month = month_index.rem_euclid(12) as u32 + 1;
    resolve_day(year, month, from.day())
}

/// Shifts a date by a signed number of calendar years.
pub fn add_years(from: NaiveDate, years: i32) -> NaiveDate {
    resolve_day(from.year() + years, from.month(), from.day())
}

fn resolve_day(year: i32, month: u32, day: u32) -> NaiveDate {
    let last = days_in_month(year, month);
    if day <= last {
        NaiveDate::from_ymd_opt(year, month, day).expect("day within month bounds")
    } else {
        NaiveDate::from_ymd_opt(year, month, last).expect("month has a last day")
            + Duration::days((day - last) as i64)
    }
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .expect("first of month is a valid date")
        .pred_opt()
        .expect("month boundary has a predecessor")
        .day()
}
