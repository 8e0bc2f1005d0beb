//! # Angle Primitives
//!
//! Degree/hour/radian conversions, range normalization and the sexagesimal
//! (degrees-minutes-seconds, hours-minutes-seconds) representations used for
//! telescope displays and observer configuration.
//!
//! Range helpers keep their documented half-open interval exactly: a value
//! that rounds up to the upper bound wraps back to zero. Non-finite input is
//! passed through unchanged so undefined values stay undefined.
//!
//! ## Examples
//!
//! ```rust
//! use solarfield::coordinates::angle::{normalize_degrees, Sexagesimal};
//!
//! assert_eq!(normalize_degrees(-90.0), 270.0);
//!
//! let dms = Sexagesimal::from_decimal(-12.5);
//! assert_eq!((dms.whole, dms.minutes), (-12, 30));
//! assert!((dms.to_decimal() + 12.5).abs() < 1e-12);
//! ```

use serde::{Deserialize, Serialize};

use crate::constants::{DEG2RAD, DEG_PER_HOUR, HOURS_PER_DAY, RAD2DEG};

/// Wrap `value` into `[0, period)`.
fn wrap(value: f64, period: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let wrapped = value.rem_euclid(period);
    if wrapped >= period {
        0.0
    } else {
        wrapped
    }
}

/// Normalize an angle in degrees to `[0, 360)`.
pub fn normalize_degrees(degrees: f64) -> f64 {
    wrap(degrees, 360.0)
}

/// Normalize a time angle in hours to `[0, 24)`.
pub fn normalize_hours(hours: f64) -> f64 {
    wrap(hours, HOURS_PER_DAY)
}

pub fn degrees_to_radians(degrees: f64) -> f64 {
    degrees * DEG2RAD
}

pub fn radians_to_degrees(radians: f64) -> f64 {
    radians * RAD2DEG
}

pub fn degrees_to_hours(degrees: f64) -> f64 {
    degrees / DEG_PER_HOUR
}

pub fn hours_to_degrees(hours: f64) -> f64 {
    hours * DEG_PER_HOUR
}

pub fn radians_to_hours(radians: f64) -> f64 {
    degrees_to_hours(radians_to_degrees(radians))
}

pub fn hours_to_radians(hours: f64) -> f64 {
    degrees_to_radians(hours_to_degrees(hours))
}

/// Sine of an angle given in degrees
pub fn sin_deg(degrees: f64) -> f64 {
    degrees_to_radians(degrees).sin()
}

/// Cosine of an angle given in degrees
pub fn cos_deg(degrees: f64) -> f64 {
    degrees_to_radians(degrees).cos()
}

/// Tangent of an angle given in degrees
pub fn tan_deg(degrees: f64) -> f64 {
    degrees_to_radians(degrees).tan()
}

/// A value split into a whole part, minutes and seconds.
///
/// The same type serves degrees-minutes-seconds and hours-minutes-seconds.
/// The sign is carried by `whole`; `minutes` and `seconds` are always
/// non-negative. Because `-0` cannot be represented by an integer, values in
/// `(-1, 0)` also set `negative` so that the sign survives a round trip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sexagesimal {
    /// Whole degrees or hours, signed
    pub whole: i32,
    /// Minutes in `[0, 60)`
    pub minutes: u32,
    /// Seconds in `[0, 60)`
    pub seconds: f64,
    /// True when the represented value is negative
    pub negative: bool,
}

impl Sexagesimal {
    /// Build from components. A negative `whole` makes the value negative;
    /// `minutes` and `seconds` are magnitudes.
    pub fn new(whole: i32, minutes: u32, seconds: f64) -> Self {
        Self {
            whole,
            minutes,
            seconds: seconds.abs(),
            negative: whole < 0,
        }
    }

    /// Build a value whose sign is given explicitly, e.g. `-0° 30' 00"`.
    pub fn with_sign(negative: bool, whole: u32, minutes: u32, seconds: f64) -> Self {
        let whole = whole as i32;
        Self {
            whole: if negative { -whole } else { whole },
            minutes,
            seconds: seconds.abs(),
            negative,
        }
    }

    /// Split a decimal value into whole, minutes and seconds.
    pub fn from_decimal(value: f64) -> Self {
        let negative = value < 0.0;
        let magnitude = value.abs();

        let mut whole = magnitude.trunc();
        let mut minutes = ((magnitude - whole) * 60.0).trunc();
        let mut seconds = (magnitude - whole) * 3600.0 - minutes * 60.0;

        // Guard against 59.999.. rounding up into the next unit
        if seconds >= 60.0 {
            seconds -= 60.0;
            minutes += 1.0;
        }
        if seconds < 0.0 {
            seconds = 0.0;
        }
        if minutes >= 60.0 {
            minutes -= 60.0;
            whole += 1.0;
        }

        let whole = whole as i32;
        Self {
            whole: if negative { -whole } else { whole },
            minutes: minutes as u32,
            seconds,
            negative,
        }
    }

    /// Join the components back into a decimal value.
    pub fn to_decimal(&self) -> f64 {
        let magnitude =
            self.whole.unsigned_abs() as f64 + self.minutes as f64 / 60.0 + self.seconds / 3600.0;
        if self.negative || self.whole < 0 {
            -magnitude
        } else {
            magnitude
        }
    }
}

/// Floating hours to hours, minutes and seconds.
pub fn hours_to_hms(hours: f64) -> Sexagesimal {
    Sexagesimal::from_decimal(hours)
}

/// Hours, minutes and seconds to floating hours.
pub fn hms_to_hours(hours: i32, minutes: u32, seconds: f64) -> f64 {
    Sexagesimal::new(hours, minutes, seconds).to_decimal()
}

/// Floating degrees to degrees, minutes and seconds.
pub fn degrees_to_dms(degrees: f64) -> Sexagesimal {
    Sexagesimal::from_decimal(degrees)
}

/// Degrees, minutes and seconds to floating degrees.
pub fn dms_to_degrees(degrees: i32, minutes: u32, seconds: f64) -> f64 {
    Sexagesimal::new(degrees, minutes, seconds).to_decimal()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rstest::rstest;
    use std::f64::consts::PI;

    #[test]
    fn test_degree_to_radian_conversion() {
        assert_abs_diff_eq!(degrees_to_radians(180.0), PI, epsilon = 1e-15);
        assert_abs_diff_eq!(radians_to_degrees(PI / 4.0), 45.0, epsilon = 1e-13);
    }

    #[test]
    fn test_hour_conversions() {
        assert_abs_diff_eq!(degrees_to_hours(270.0), 18.0, epsilon = 1e-12);
        assert_abs_diff_eq!(hours_to_degrees(6.0), 90.0, epsilon = 1e-12);
        assert_abs_diff_eq!(radians_to_hours(PI), 12.0, epsilon = 1e-12);
        assert_abs_diff_eq!(hours_to_radians(12.0), PI, epsilon = 1e-12);
    }

    #[rstest]
    #[case(0.0, 0.0)]
    #[case(360.0, 0.0)]
    #[case(725.0, 5.0)]
    #[case(-90.0, 270.0)]
    #[case(-720.0, 0.0)]
    fn test_normalize_degrees(#[case] input: f64, #[case] expected: f64) {
        assert_abs_diff_eq!(normalize_degrees(input), expected, epsilon = 1e-10);
    }

    #[test]
    fn test_normalize_stays_in_half_open_range() {
        // Tiny negative values must not round up to the period itself
        let value = normalize_degrees(-1e-17);
        assert!((0.0..360.0).contains(&value));

        let value = normalize_hours(-1e-17);
        assert!((0.0..24.0).contains(&value));

        assert_abs_diff_eq!(normalize_hours(-1.5), 22.5, epsilon = 1e-12);
        assert_abs_diff_eq!(normalize_hours(49.0), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_normalize_passes_nan_through() {
        assert!(normalize_degrees(f64::NAN).is_nan());
        assert!(normalize_hours(f64::NAN).is_nan());
    }

    #[rstest]
    #[case(12.5822)]
    #[case(-12.5822)]
    #[case(0.25)]
    #[case(-0.25)]
    #[case(359.999)]
    #[case(-89.0001)]
    fn test_dms_round_trip(#[case] degrees: f64) {
        let dms = degrees_to_dms(degrees);
        assert!(dms.minutes < 60);
        assert!(dms.seconds >= 0.0 && dms.seconds < 60.0);
        assert_abs_diff_eq!(dms.to_decimal(), degrees, epsilon = 1e-9);
    }

    #[test]
    fn test_sign_lives_on_leading_component() {
        let dms = degrees_to_dms(-23.4392911);
        assert_eq!(dms.whole, -23);
        assert_eq!(dms.minutes, 26);
        assert_abs_diff_eq!(dms.seconds, 21.448, epsilon = 1e-3);

        let hms = hours_to_hms(-0.5);
        assert_eq!(hms.whole, 0);
        assert_eq!(hms.minutes, 30);
        assert!(hms.negative);
        assert_abs_diff_eq!(hms.to_decimal(), -0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_hms_to_hours() {
        assert_abs_diff_eq!(hms_to_hours(18, 45, 0.0), 18.75, epsilon = 1e-12);
        assert_abs_diff_eq!(hms_to_hours(-2, 30, 0.0), -2.5, epsilon = 1e-12);
        assert_abs_diff_eq!(dms_to_degrees(-2, 20, 14.0), -2.337_222_2, epsilon = 1e-6);

        let explicit = Sexagesimal::with_sign(true, 0, 20, 14.0);
        assert_abs_diff_eq!(explicit.to_decimal(), -0.337_222_2, epsilon = 1e-6);
    }

    #[test]
    fn test_degree_trig_helpers() {
        assert_abs_diff_eq!(sin_deg(30.0), 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(cos_deg(60.0), 0.5, epsilon = 1e-12);
        assert_abs_diff_eq!(tan_deg(45.0), 1.0, epsilon = 1e-12);
    }
}
