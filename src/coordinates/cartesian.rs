//! # Rectangular Coordinates
//!
//! Earth-centered, ecliptic-aligned Cartesian coordinates in AU. They are the
//! intermediate step between two heliocentric positions (target and Earth)
//! and the geocentric ecliptic direction of the target.
//!
//! ## Coordinate System Convention
//!
//! - **X-axis**: toward the mean equinox of date (ecliptic longitude 0°)
//! - **Y-axis**: toward ecliptic longitude 90°
//! - **Z-axis**: toward the north ecliptic pole
//!
//! ## Examples
//!
//! ```rust
//! use solarfield::coordinates::cartesian::RectangularCoordinates;
//! use solarfield::coordinates::HeliocentricCoordinates;
//!
//! let target = HeliocentricCoordinates::new(0.0, 0.0, 1.5);
//! let earth = HeliocentricCoordinates::new(180.0, 0.0, 1.0);
//!
//! let rect = RectangularCoordinates::between(&target, &earth);
//! assert!((rect.distance() - 2.5).abs() < 1e-12);
//! ```

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use super::angle::{normalize_degrees, radians_to_degrees};
use super::{GeocentricCoordinates, HeliocentricCoordinates};

/// Cartesian position in AU
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectangularCoordinates {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl RectangularCoordinates {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Every component undefined
    pub fn undefined() -> Self {
        Self::new(f64::NAN, f64::NAN, f64::NAN)
    }

    /// Position of `target` as seen from `origin`, both heliocentric.
    ///
    /// Each body is projected onto the ecliptic axes using its radius and the
    /// sine/cosine of its latitude and longitude, then the two are
    /// differenced axis by axis.
    pub fn between(target: &HeliocentricCoordinates, origin: &HeliocentricCoordinates) -> Self {
        Self::from_vector3(target.to_vector3() - origin.to_vector3())
    }

    pub fn from_vector3(v: Vector3<f64>) -> Self {
        Self::new(v.x, v.y, v.z)
    }

    pub fn to_vector3(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.z)
    }

    /// Distance from the origin, `sqrt(x² + y² + z²)`
    pub fn distance(&self) -> f64 {
        self.to_vector3().norm()
    }

    /// Ecliptic direction of the vector in degrees.
    ///
    /// Longitude comes from `atan2(y, x)` normalized to `[0, 360)`; latitude
    /// from `atan2(z, sqrt(x² + y²))`. A zero-length vector has no direction
    /// and yields undefined angles.
    pub fn to_ecliptic(&self) -> GeocentricCoordinates {
        let rho = self.x.hypot(self.y);
        if rho == 0.0 && self.z == 0.0 {
            return GeocentricCoordinates::undefined();
        }
        GeocentricCoordinates {
            lon: normalize_degrees(radians_to_degrees(self.y.atan2(self.x))),
            lat: radians_to_degrees(self.z.atan2(rho)),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_difference_of_opposite_bodies() {
        let target = HeliocentricCoordinates::new(90.0, 0.0, 5.0);
        let earth = HeliocentricCoordinates::new(270.0, 0.0, 1.0);
        let rect = RectangularCoordinates::between(&target, &earth);

        assert_abs_diff_eq!(rect.x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(rect.y, 6.0, epsilon = 1e-12);
        assert_abs_diff_eq!(rect.z, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(rect.distance(), 6.0, epsilon = 1e-12);

        let ecl = rect.to_ecliptic();
        assert_abs_diff_eq!(ecl.lon, 90.0, epsilon = 1e-10);
        assert_abs_diff_eq!(ecl.lat, 0.0, epsilon = 1e-10);
    }

    #[test]
    fn test_latitude_projection() {
        let target = HeliocentricCoordinates::new(0.0, 30.0, 2.0);
        let origin = HeliocentricCoordinates::new(0.0, 0.0, 0.0);
        let rect = RectangularCoordinates::between(&target, &origin);

        assert_abs_diff_eq!(rect.z, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(rect.x, 3f64.sqrt(), epsilon = 1e-12);
        assert_abs_diff_eq!(rect.to_ecliptic().lat, 30.0, epsilon = 1e-10);
    }

    #[test]
    fn test_negative_longitude_is_normalized() {
        let rect = RectangularCoordinates::new(0.0, -1.0, 0.0);
        assert_abs_diff_eq!(rect.to_ecliptic().lon, 270.0, epsilon = 1e-10);
    }

    #[test]
    fn test_zero_vector_has_no_direction() {
        let rect = RectangularCoordinates::new(0.0, 0.0, 0.0);
        assert_eq!(rect.distance(), 0.0);
        assert!(!rect.to_ecliptic().is_valid());
    }

    #[test]
    fn test_undefined_input_propagates() {
        let target = HeliocentricCoordinates::undefined();
        let earth = HeliocentricCoordinates::new(100.0, 0.0, 1.0);
        let rect = RectangularCoordinates::between(&target, &earth);
        assert!(!rect.is_valid());
        assert!(rect.distance().is_nan());
    }
}
