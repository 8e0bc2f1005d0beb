//! Calendar date and Julian Day conversion functions
//!
//! Civil dates on or after 1582-10-15 use the Gregorian calendar and earlier
//! dates the Julian calendar, so historical dates keep their recorded form.
//! Both directions follow the algorithm of Meeus, Astronomical Algorithms,
//! chapter 7, with the day count kept as an integer on the noon boundary.

use crate::constants::{DAY_S, GREGORIAN_START};

use super::{CivilDateTime, JulianDay};

/// True for leap years, Julian rule before 1582 and Gregorian rule after
pub fn is_leap_year(year: i32) -> bool {
    if year > 1582 {
        (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
    } else {
        year.rem_euclid(4) == 0
    }
}

/// Number of days in a month of the given year
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

/// Convert a civil date and time to a Julian Day
pub fn julian_day_from_civil(civil: &CivilDateTime) -> JulianDay {
    // January and February count as months 13 and 14 of the previous year
    let (year, month) = if civil.month <= 2 {
        (civil.year as i64 - 1, civil.month as i64 + 12)
    } else {
        (civil.year as i64, civil.month as i64)
    };

    let reform = if civil.is_gregorian() {
        let century = year.div_euclid(100);
        2 - century + century.div_euclid(4)
    } else {
        0
    };

    let day = (365.25 * (year + 4716) as f64).floor() as i64
        + (30.6001 * (month + 1) as f64).floor() as i64
        + civil.day as i64
        + reform
        - 1525;

    // `day` is the Julian day beginning at noon before the civil date
    JulianDay::new(day, 0.5 + civil.day_fraction())
}

/// Convert a Julian Day back to a civil date and time
pub fn civil_from_julian_day(jd: &JulianDay) -> CivilDateTime {
    let shifted = JulianDay::new(jd.day, jd.time + 0.5);
    let z = shifted.day;
    let fraction = shifted.time;

    let a = if z < GREGORIAN_START {
        z
    } else {
        let alpha = ((z as f64 - 1_867_216.25) / 36_524.25).floor() as i64;
        z + 1 + alpha - alpha.div_euclid(4)
    };
    let b = a + 1524;
    let c = ((b as f64 - 122.1) / 365.25).floor() as i64;
    let d = (365.25 * c as f64).floor() as i64;
    let e = ((b - d) as f64 / 30.6001).floor() as i64;

    let day = (b - d - (30.6001 * e as f64).floor() as i64) as u32;
    let month = (if e < 14 { e - 1 } else { e - 13 }) as u32;
    let year = (if month > 2 { c - 4716 } else { c - 4715 }) as i32;

    // Round to microseconds so 0.81 days does not print as 19:26:23.99999
    let seconds = ((fraction * DAY_S * 1e6).round() / 1e6).min(DAY_S - 1e-6);
    let hour = (seconds / 3600.0).floor();
    let minute = ((seconds - hour * 3600.0) / 60.0).floor();
    let second = seconds - hour * 3600.0 - minute * 60.0;

    CivilDateTime {
        year,
        month,
        day,
        hour: hour as u32,
        minute: minute as u32,
        second,
    }
}
