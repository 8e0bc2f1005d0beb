//! Time module for astronomical time calculations
//!
//! The position engine consumes time as a [`JulianDay`]: an integer day count
//! plus the elapsed fraction of that day. Days start at noon, so J2000.0
//! (2000-01-01 12:00 UT) is `{ day: 2451545, time: 0.0 }`. Keeping the two
//! parts apart preserves sub-second resolution that a single `f64` Julian
//! date loses at this magnitude.
//!
//! Civil dates enter through [`CivilDateTime`], converted by [`calendar`].
//! Sidereal time lives in [`sidereal`].

pub mod calendar;
pub mod sidereal;

use std::fmt;
use std::ops::Add;

use chrono::{Datelike, NaiveDateTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{DAYS_PER_CENTURY, HOURS_PER_DAY, J2000};

/// Error type for time operations
#[derive(Debug, Error)]
pub enum TimeError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid time of day: {0}")]
    InvalidTimeOfDay(String),
}

/// Result type for time operations
pub type Result<T> = std::result::Result<T, TimeError>;

/// A continuous day count split into whole days and the fraction of the day.
///
/// `day` counts Julian days starting at noon; `time` is always in `[0, 1)`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct JulianDay {
    pub day: i64,
    pub time: f64,
}

impl JulianDay {
    /// Build a Julian Day, carrying whole days out of `time`.
    pub fn new(day: i64, time: f64) -> Self {
        let carry = time.floor();
        Self {
            day: day + carry as i64,
            time: time - carry,
        }
    }

    /// The J2000.0 epoch, 2000-01-01 12:00 UT
    pub fn j2000() -> Self {
        Self::new(J2000 as i64, 0.0)
    }

    /// Split a single floating Julian date.
    pub fn from_jd(jd: f64) -> Self {
        Self::new(0, jd)
    }

    /// The Julian date as one floating value
    pub fn jd(&self) -> f64 {
        self.day as f64 + self.time
    }

    /// Days elapsed since J2000.0, computed without forming the full date
    pub fn days_since_j2000(&self) -> f64 {
        (self.day - J2000 as i64) as f64 + self.time
    }

    /// Julian centuries since J2000.0, the `T` of every polynomial model
    pub fn centuries_since_j2000(&self) -> f64 {
        self.days_since_j2000() / DAYS_PER_CENTURY
    }

    /// Hours elapsed since 0h UT of the civil day
    pub fn ut_hours(&self) -> f64 {
        (self.time + 0.5).fract() * HOURS_PER_DAY
    }

    /// 0h UT of the civil day containing this instant
    pub fn midnight(&self) -> Self {
        if self.time >= 0.5 {
            Self { day: self.day, time: 0.5 }
        } else {
            Self { day: self.day - 1, time: 0.5 }
        }
    }

    /// Day of the week of the civil day containing this instant
    pub fn weekday(&self) -> Weekday {
        // (jd + 1.5) mod 7 counts days from Sunday
        let index = (self.day as f64 + self.time + 1.5).floor() as i64;
        match index.rem_euclid(7) {
            0 => Weekday::Sun,
            1 => Weekday::Mon,
            2 => Weekday::Tue,
            3 => Weekday::Wed,
            4 => Weekday::Thu,
            5 => Weekday::Fri,
            _ => Weekday::Sat,
        }
    }

    /// Convert back to a civil date and time
    pub fn to_civil(&self) -> CivilDateTime {
        calendar::civil_from_julian_day(self)
    }
}

impl Add<f64> for JulianDay {
    type Output = Self;

    /// Add a (possibly negative) number of days
    fn add(self, days: f64) -> Self::Output {
        let whole = days.trunc();
        Self::new(self.day + whole as i64, self.time + (days - whole))
    }
}

impl fmt::Display for JulianDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "JD {:.6}", self.jd())
    }
}

/// A civil date and time in UT.
///
/// Dates before 1582-10-15 are read in the Julian calendar, later dates in
/// the Gregorian calendar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CivilDateTime {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: f64,
}

impl CivilDateTime {
    /// Build a validated civil date and time.
    pub fn new(
        year: i32,
        month: u32,
        day: u32,
        hour: u32,
        minute: u32,
        second: f64,
    ) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(TimeError::InvalidDate(format!("month {month} out of range")));
        }
        let last = calendar::days_in_month(year, month);
        if day == 0 || day > last {
            return Err(TimeError::InvalidDate(format!(
                "day {day} out of range for {year}-{month:02}"
            )));
        }
        if year == 1582 && month == 10 && (5..15).contains(&day) {
            return Err(TimeError::InvalidDate(format!(
                "1582-10-{day:02} was skipped by the Gregorian reform"
            )));
        }
        if hour >= 24 || minute >= 60 || !(0.0..60.0).contains(&second) {
            return Err(TimeError::InvalidTimeOfDay(format!(
                "{hour:02}:{minute:02}:{second}"
            )));
        }

        Ok(Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        })
    }

    /// Midnight UT of a civil date
    pub fn date(year: i32, month: u32, day: u32) -> Result<Self> {
        Self::new(year, month, day, 0, 0, 0.0)
    }

    /// True when the date falls in the Gregorian calendar
    pub fn is_gregorian(&self) -> bool {
        (self.year, self.month, self.day) >= (1582, 10, 15)
    }

    /// Elapsed fraction of the civil day
    pub fn day_fraction(&self) -> f64 {
        (self.hour as f64 + self.minute as f64 / 60.0 + self.second / 3600.0) / HOURS_PER_DAY
    }

    pub fn to_julian_day(&self) -> JulianDay {
        calendar::julian_day_from_civil(self)
    }
}

impl From<NaiveDateTime> for CivilDateTime {
    /// chrono counts proleptic Gregorian dates; values before the reform are
    /// taken over field by field and therefore read as Julian calendar dates.
    fn from(dt: NaiveDateTime) -> Self {
        let second = dt.second() as f64 + dt.nanosecond().min(999_999_999) as f64 * 1e-9;
        Self {
            year: dt.year(),
            month: dt.month(),
            day: dt.day(),
            hour: dt.hour(),
            minute: dt.minute(),
            second,
        }
    }
}

impl fmt::Display for CivilDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:06.3}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use chrono::NaiveDate;

    #[test]
    fn test_new_normalizes_fraction() {
        let jd = JulianDay::new(2451545, 1.25);
        assert_eq!(jd.day, 2451546);
        assert_abs_diff_eq!(jd.time, 0.25, epsilon = 1e-12);

        let jd = JulianDay::new(2451545, -0.25);
        assert_eq!(jd.day, 2451544);
        assert_abs_diff_eq!(jd.time, 0.75, epsilon = 1e-12);
    }

    #[test]
    fn test_j2000_centuries() {
        let jd = JulianDay::j2000();
        assert_eq!(jd.centuries_since_j2000(), 0.0);

        let later = JulianDay::new(2451545 + 36525, 0.0);
        assert_abs_diff_eq!(later.centuries_since_j2000(), 1.0, epsilon = 1e-15);
    }

    #[test]
    fn test_ut_hours_and_midnight() {
        // Noon
        let jd = JulianDay::j2000();
        assert_abs_diff_eq!(jd.ut_hours(), 12.0, epsilon = 1e-9);
        let midnight = jd.midnight();
        assert_eq!(midnight.day, 2451544);
        assert_abs_diff_eq!(midnight.time, 0.5, epsilon = 1e-15);

        // 18h UT is after midnight of the same civil day
        let evening = JulianDay::new(2451545, 0.25);
        assert_abs_diff_eq!(evening.ut_hours(), 18.0, epsilon = 1e-9);
        assert_eq!(evening.midnight(), midnight);

        // 03h UT on the next civil day
        let early = JulianDay::new(2451545, 0.625);
        assert_abs_diff_eq!(early.ut_hours(), 3.0, epsilon = 1e-9);
        assert_eq!(early.midnight(), JulianDay::new(2451545, 0.5));
    }

    #[test]
    fn test_weekday() {
        // 2000-01-01 was a Saturday
        assert_eq!(JulianDay::j2000().weekday(), Weekday::Sat);
        // 1954-06-30 was a Wednesday
        assert_eq!(JulianDay::from_jd(2434923.5).weekday(), Weekday::Wed);
    }

    #[test]
    fn test_add_days() {
        let jd = JulianDay::j2000() + 1.5;
        assert_eq!(jd.day, 2451546);
        assert_abs_diff_eq!(jd.time, 0.5, epsilon = 1e-12);

        let back = jd + -1.5;
        assert_eq!(back.day, 2451545);
        assert_abs_diff_eq!(back.time, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_civil_validation() {
        assert!(CivilDateTime::new(2024, 2, 29, 0, 0, 0.0).is_ok());
        assert!(CivilDateTime::new(2023, 2, 29, 0, 0, 0.0).is_err());
        assert!(CivilDateTime::new(1900, 2, 29, 0, 0, 0.0).is_err());
        // Julian calendar leap rule
        assert!(CivilDateTime::new(1500, 2, 29, 0, 0, 0.0).is_ok());
        assert!(CivilDateTime::new(1582, 10, 10, 0, 0, 0.0).is_err());
        assert!(CivilDateTime::new(2020, 13, 1, 0, 0, 0.0).is_err());
        assert!(CivilDateTime::new(2020, 1, 1, 24, 0, 0.0).is_err());
        assert!(CivilDateTime::new(2020, 1, 1, 0, 60, 0.0).is_err());
        assert!(CivilDateTime::new(2020, 1, 1, 0, 0, 60.0).is_err());
    }

    #[test]
    fn test_day_fraction() {
        let civil = CivilDateTime::new(1957, 10, 4, 19, 26, 24.0).unwrap();
        assert_abs_diff_eq!(civil.day_fraction(), 0.81, epsilon = 1e-12);
    }

    #[test]
    fn test_from_chrono() {
        let dt = NaiveDate::from_ymd_opt(2000, 1, 1)
            .unwrap()
            .and_hms_milli_opt(12, 30, 15, 500)
            .unwrap();
        let civil = CivilDateTime::from(dt);
        assert_eq!((civil.year, civil.month, civil.day), (2000, 1, 1));
        assert_eq!((civil.hour, civil.minute), (12, 30));
        assert_abs_diff_eq!(civil.second, 15.5, epsilon = 1e-9);
    }

    #[test]
    fn test_display() {
        let civil = CivilDateTime::new(2000, 1, 1, 12, 0, 0.0).unwrap();
        assert_eq!(civil.to_string(), "2000-01-01 12:00:00.000");
        assert_eq!(JulianDay::j2000().to_string(), "JD 2451545.000000");
    }
}
