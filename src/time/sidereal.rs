//! Greenwich sidereal time
//!
//! Mean sidereal time is evaluated at 0h UT of the civil day from a cubic in
//! Julian centuries, then advanced by the elapsed UT scaled to the sidereal
//! rate. Apparent sidereal time adds the equation of the equinoxes
//! (nutation in longitude projected onto the equator).
//!
//! All results are hours in `[0, 24)`.

use crate::constants::{ASEC_PER_DEG, DEG_PER_HOUR, SIDEREAL_RATE};
use crate::coordinates::angle::{cos_deg, degrees_to_hours, normalize_degrees, normalize_hours};
use crate::nutationlib::obliquity_and_nutation;

use super::JulianDay;

/// Greenwich mean sidereal time at 0h UT of the day containing `jd`, hours
pub fn sidereal_time_at_midnight(jd: &JulianDay) -> f64 {
    let t = jd.midnight().centuries_since_j2000();
    let t2 = t * t;
    let theta = 100.460_618_37 + 36_000.770_053_608 * t + 0.000_387_933 * t2
        - t2 * t / 38_710_000.0;
    degrees_to_hours(normalize_degrees(theta))
}

/// Greenwich mean sidereal time, hours
pub fn mean_sidereal_time(jd: &JulianDay) -> f64 {
    normalize_hours(sidereal_time_at_midnight(jd) + SIDEREAL_RATE * jd.ut_hours())
}

/// Equation of the equinoxes, hours
pub fn equation_of_the_equinoxes(jd: &JulianDay) -> f64 {
    let on = obliquity_and_nutation(jd.centuries_since_j2000());
    on.nutation.longitude * cos_deg(on.obliquity) / DEG_PER_HOUR / ASEC_PER_DEG
}

/// Greenwich apparent sidereal time, hours
pub fn apparent_sidereal_time(jd: &JulianDay) -> f64 {
    normalize_hours(mean_sidereal_time(jd) + equation_of_the_equinoxes(jd))
}

/// Local sidereal time for a longitude in degrees, positive west of
/// Greenwich, hours
pub fn local_sidereal_time(greenwich_hours: f64, longitude: f64) -> f64 {
    normalize_hours(greenwich_hours - degrees_to_hours(longitude))
}
