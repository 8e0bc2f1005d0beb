//! Coordinate value types
//!
//! Every type here is a plain value object. Undefined results are signalled
//! with NaN fields; use `is_valid()` rather than inspecting the numbers.

pub mod angle;
pub mod cartesian;

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use angle::{cos_deg, sin_deg};

pub use cartesian::RectangularCoordinates;

/// Position of a body relative to the Sun, ecliptic and mean equinox of date
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeliocentricCoordinates {
    /// Ecliptic longitude in degrees, `[0, 360)`
    pub lon: f64,
    /// Ecliptic latitude in degrees
    pub lat: f64,
    /// Distance from the Sun in AU
    pub radius: f64,
}

impl HeliocentricCoordinates {
    pub fn new(lon: f64, lat: f64, radius: f64) -> Self {
        Self { lon, lat, radius }
    }

    /// The sentinel returned for bodies without a series
    pub fn undefined() -> Self {
        Self::new(f64::NAN, f64::NAN, f64::NAN)
    }

    pub fn is_valid(&self) -> bool {
        self.lon.is_finite() && self.lat.is_finite() && self.radius.is_finite()
    }

    /// Cartesian position in AU along the ecliptic axes
    pub fn to_vector3(&self) -> Vector3<f64> {
        let cos_lat = cos_deg(self.lat);
        Vector3::new(
            self.radius * cos_lat * cos_deg(self.lon),
            self.radius * cos_lat * sin_deg(self.lon),
            self.radius * sin_deg(self.lat),
        )
    }
}

/// Earth-centered ecliptic direction in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeocentricCoordinates {
    /// Ecliptic longitude, `[0, 360)`
    pub lon: f64,
    /// Ecliptic latitude, `[-90, 90]`
    pub lat: f64,
}

impl GeocentricCoordinates {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    pub fn undefined() -> Self {
        Self::new(f64::NAN, f64::NAN)
    }

    pub fn is_valid(&self) -> bool {
        self.lon.is_finite() && self.lat.is_finite()
    }
}

/// Right ascension and declination
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquatorialCoordinates {
    /// Right ascension in hours, `[0, 24)`
    pub ra: f64,
    /// Declination in degrees, `[-90, 90]`
    pub dec: f64,
}

impl EquatorialCoordinates {
    pub fn new(ra: f64, dec: f64) -> Self {
        Self { ra, dec }
    }

    pub fn undefined() -> Self {
        Self::new(f64::NAN, f64::NAN)
    }

    pub fn is_valid(&self) -> bool {
        self.ra.is_finite() && self.dec.is_finite()
    }

    /// Right ascension in degrees
    pub fn ra_degrees(&self) -> f64 {
        angle::hours_to_degrees(self.ra)
    }
}

/// Azimuth and altitude for an observer on Earth
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HorizontalCoordinates {
    /// Azimuth in degrees measured from north through east, `[0, 360)`
    pub azimuth: f64,
    /// Altitude above the horizon in degrees, `[-90, 90]`
    pub altitude: f64,
}

impl HorizontalCoordinates {
    pub fn new(azimuth: f64, altitude: f64) -> Self {
        Self { azimuth, altitude }
    }

    /// Returned whenever the observer location is unknown
    pub fn undefined() -> Self {
        Self::new(f64::NAN, f64::NAN)
    }

    pub fn is_valid(&self) -> bool {
        self.azimuth.is_finite() && self.altitude.is_finite()
    }

    /// True when the body is above the mathematical horizon
    pub fn is_above_horizon(&self) -> bool {
        self.altitude > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_heliocentric_vector() {
        let hc = HeliocentricCoordinates::new(90.0, 0.0, 2.0);
        let v = hc.to_vector3();
        assert_abs_diff_eq!(v.x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(v.y, 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(v.z, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_validity_predicates() {
        assert!(HeliocentricCoordinates::new(1.0, 2.0, 3.0).is_valid());
        assert!(!HeliocentricCoordinates::undefined().is_valid());
        assert!(!GeocentricCoordinates::undefined().is_valid());
        assert!(EquatorialCoordinates::new(12.0, -5.0).is_valid());
        assert!(!EquatorialCoordinates::undefined().is_valid());
        assert!(!HorizontalCoordinates::undefined().is_valid());
        assert!(!HorizontalCoordinates::new(10.0, f64::INFINITY).is_valid());
    }

    #[test]
    fn test_ra_degrees() {
        let eq = EquatorialCoordinates::new(6.0, 0.0);
        assert_abs_diff_eq!(eq.ra_degrees(), 90.0, epsilon = 1e-12);
    }
}
