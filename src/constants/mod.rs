//! Constants module for astronomical calculations

use std::f64::consts::PI;

// Time constants
/// J2000.0 epoch as Julian date
pub const J2000: f64 = 2_451_545.0;
/// Days in a Julian century
pub const DAYS_PER_CENTURY: f64 = 36_525.0;
/// Hours in a day
pub const HOURS_PER_DAY: f64 = 24.0;
/// Seconds in a day
pub const DAY_S: f64 = 86_400.0;
/// Ratio of sidereal to solar day length
pub const SIDEREAL_RATE: f64 = 1.002_737_909_35;

// Angles
/// Arcseconds in a degree
pub const ASEC_PER_DEG: f64 = 3_600.0;
/// Degrees to radians conversion factor
pub const DEG2RAD: f64 = PI / 180.0;
/// Radians to degrees conversion factor
pub const RAD2DEG: f64 = 180.0 / PI;
/// Degrees of rotation per hour of right ascension
pub const DEG_PER_HOUR: f64 = 15.0;

// Physics
/// Light travel time for one astronomical unit, in days
pub const LIGHT_TIME_DAYS_PER_AU: f64 = 0.005_775_518_3;
/// Constant of aberration in arcseconds
pub const ABERRATION_ASEC: f64 = 20.495_52;

// Series
/// Scale of the stored VSOP87 amplitudes (1e-8 radian or AU)
pub const VSOP87_SCALE: f64 = 1.0e8;
/// Julian centuries per VSOP87 time unit (a Julian millennium)
pub const CENTURIES_PER_MILLENNIUM: f64 = 10.0;

// Calendar constants
/// First day of Gregorian calendar in Julian day number (1582-10-15)
pub const GREGORIAN_START: i64 = 2_299_161;
