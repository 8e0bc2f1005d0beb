//! Low-precision solar position
//!
//! The Sun's geometric longitude from its mean longitude and equation of the
//! centre, refined by five small planetary and lunar perturbations, then
//! reduced to apparent place with a one-term nutation and aberration
//! correction. Good to about 0.01°.
//!
//! Right ascension and declination are taken directly from the apparent
//! longitude, the Sun's ecliptic latitude being negligible here.

use serde::{Deserialize, Serialize};

use crate::coordinates::angle::{
    cos_deg, normalize_degrees, normalize_hours, radians_to_degrees, radians_to_hours, sin_deg,
};
use crate::coordinates::{EquatorialCoordinates, GeocentricCoordinates};
use crate::nutationlib::obliquity_and_nutation;

/// Semi-major axis of the Earth's orbit in AU
const EARTH_SEMI_MAJOR_AXIS: f64 = 1.000_001_018;

/// Mean elements of the apparent solar orbit, degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolarGeometry {
    /// L₀, normalized
    pub mean_longitude: f64,
    /// M, normalized
    pub mean_anomaly: f64,
    pub eccentricity: f64,
    /// C
    pub equation_of_center: f64,
    /// ☉ = L₀ + C
    pub true_longitude: f64,
    /// v = M + C
    pub true_anomaly: f64,
}

impl SolarGeometry {
    pub fn at(t: f64) -> Self {
        let t2 = t * t;
        let mean_longitude = normalize_degrees(280.466_46 + 36_000.769_83 * t + 0.000_303_2 * t2);
        let mean_anomaly = normalize_degrees(357.529_11 + 35_999.050_29 * t - 0.000_153_7 * t2);
        let eccentricity = 0.016_708_634 - 0.000_042_037 * t - 0.000_000_126_7 * t2;

        let equation_of_center = (1.914_602 - 0.004_817 * t - 0.000_014 * t2)
            * sin_deg(mean_anomaly)
            + (0.019_993 - 0.000_101 * t) * sin_deg(2.0 * mean_anomaly)
            + 0.000_289 * sin_deg(3.0 * mean_anomaly);

        Self {
            mean_longitude,
            mean_anomaly,
            eccentricity,
            equation_of_center,
            true_longitude: mean_longitude + equation_of_center,
            true_anomaly: mean_anomaly + equation_of_center,
        }
    }

    /// Sun–Earth distance in AU
    pub fn radius_vector(&self) -> f64 {
        let e = self.eccentricity;
        EARTH_SEMI_MAJOR_AXIS * (1.0 - e * e) / (1.0 + e * cos_deg(self.true_anomaly))
    }
}

/// Periodic terms from Venus, Mars, Jupiter, the Moon and a long-period
/// argument, degrees
#[rustfmt::skip]
pub fn longitude_perturbation(t: f64) -> f64 {
    0.001_34 * cos_deg(351.52 +  22_518.442_8 * t)
        + 0.001_53 * cos_deg(253.14 +  45_036.885_7 * t)
        + 0.002_00 * cos_deg(157.23 +  32_964.467_3 * t)
        + 0.001_80 * sin_deg(297.85 + 445_267.111_7 * t)
        + 0.001_96 * sin_deg(252.08 +      20.19    * t)
}

/// Apparent place of the Sun
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolarPosition {
    /// Geometric longitude with perturbations, degrees `[0, 360)`
    pub true_longitude: f64,
    /// Longitude corrected for nutation and aberration, degrees `[0, 360)`
    pub apparent_longitude: f64,
    /// Obliquity used for the equatorial conversion, degrees
    pub obliquity: f64,
    /// Distance from the Earth, AU
    pub distance: f64,
    pub equatorial: EquatorialCoordinates,
}

impl SolarPosition {
    /// Apparent ecliptic direction; the latitude is taken as zero
    pub fn ecliptic(&self) -> GeocentricCoordinates {
        GeocentricCoordinates::new(self.apparent_longitude, 0.0)
    }
}

/// Apparent position of the Sun at `t` Julian centuries from J2000.0
pub fn sun_position(t: f64) -> SolarPosition {
    let geometry = SolarGeometry::at(t);
    let true_longitude = normalize_degrees(geometry.true_longitude + longitude_perturbation(t));

    let omega = 125.04 - 1_934.136 * t;
    let apparent_longitude = normalize_degrees(true_longitude - 0.005_69 - 0.004_78 * sin_deg(omega));
    // True obliquity plus the node term of the apparent place
    let obliquity = obliquity_and_nutation(t).obliquity + 0.002_56 * cos_deg(omega);

    let (sin_lambda, cos_lambda) = (sin_deg(apparent_longitude), cos_deg(apparent_longitude));
    let ra = normalize_hours(radians_to_hours((cos_deg(obliquity) * sin_lambda).atan2(cos_lambda)));
    let dec = radians_to_degrees((sin_deg(obliquity) * sin_lambda).asin());

    SolarPosition {
        true_longitude,
        apparent_longitude,
        obliquity,
        distance: geometry.radius_vector(),
        equatorial: EquatorialCoordinates::new(ra, dec),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    // 1992 October 13, 0h TD
    const T_1992_OCTOBER_13: f64 = -0.072_183_436;

    #[test]
    fn test_geometry_reference() {
        let g = SolarGeometry::at(T_1992_OCTOBER_13);
        assert_abs_diff_eq!(g.mean_longitude, 201.807_19, epsilon = 1e-4);
        assert_abs_diff_eq!(g.mean_anomaly, 278.993_97, epsilon = 1e-4);
        assert_abs_diff_eq!(g.eccentricity, 0.016_711_668, epsilon = 1e-9);
        assert_abs_diff_eq!(g.equation_of_center, -1.897_32, epsilon = 1e-4);
        assert_abs_diff_eq!(g.true_longitude, 199.909_88, epsilon = 1e-4);
        assert_abs_diff_eq!(g.radius_vector(), 0.997_66, epsilon = 1e-5);
    }

    #[test]
    fn test_position_reference() {
        let sun = sun_position(T_1992_OCTOBER_13);
        // 13h 13m 31.4s, −7° 47′ 06″
        assert_abs_diff_eq!(sun.equatorial.ra, 13.225_389, epsilon = 0.01);
        assert_abs_diff_eq!(sun.equatorial.dec, -7.785_07, epsilon = 0.01);
        assert_abs_diff_eq!(sun.distance, 0.997_66, epsilon = 1e-4);
        assert_abs_diff_eq!(sun.apparent_longitude, 199.906, epsilon = 0.01);
    }

    #[test]
    fn test_obliquity_includes_nutation() {
        let t = 0.0;
        let omega: f64 = 125.04;
        let sun = sun_position(t);
        let on = obliquity_and_nutation(t);
        assert_abs_diff_eq!(sun.obliquity, on.obliquity + 0.002_56 * cos_deg(omega), epsilon = 1e-12);
        assert_abs_diff_eq!(sun.obliquity, 23.436_216, epsilon = 1e-5);
    }

    #[test]
    fn test_j2000() {
        let sun = sun_position(0.0);
        assert_abs_diff_eq!(sun.equatorial.ra, 18.75, epsilon = 0.05);
        assert_abs_diff_eq!(sun.equatorial.dec, -23.0, epsilon = 0.1);
        assert_abs_diff_eq!(sun.distance, 0.9833, epsilon = 1e-3);
    }

    #[test]
    fn test_ranges_over_random_epochs() {
        let mut rng = StdRng::seed_from_u64(19);
        for _ in 0..500 {
            let sun = sun_position(rng.gen_range(-3.0..3.0));
            assert!((0.0..24.0).contains(&sun.equatorial.ra));
            assert!(sun.equatorial.dec.abs() < 23.5);
            assert!((0.98..1.02).contains(&sun.distance));
            assert!((0.0..360.0).contains(&sun.apparent_longitude));
        }
    }

    #[test]
    fn test_equinox_and_solstice_quadrants() {
        // Right ascension follows longitude quadrant by quadrant
        let sun = sun_position(0.0);
        let quadrant = (sun.apparent_longitude / 90.0).floor();
        assert_eq!((sun.equatorial.ra / 6.0).floor(), quadrant);
    }
}
