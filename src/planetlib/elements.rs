//! Mean orbital elements of the planets
//!
//! Each element is a cubic in Julian centuries from J2000.0, referred to the
//! mean ecliptic and equinox of date. Positions derived from them are
//! coarser than the VSOP87 series (under a degree for the outer planets,
//! hundredths of a degree for the inner ones) but need only a Kepler solve.

use serde::{Deserialize, Serialize};

use super::kepler::{solve_kepler, true_anomaly};
use super::Body;
use crate::coordinates::angle::{cos_deg, normalize_degrees, radians_to_degrees, sin_deg};
use crate::coordinates::HeliocentricCoordinates;
use crate::settings::EphemerisSettings;

/// Polynomial coefficients `[c0, c1, c2, c3]` for each element
struct ElementPolynomials {
    mean_longitude: [f64; 4],
    semi_major_axis: [f64; 4],
    eccentricity: [f64; 4],
    inclination: [f64; 4],
    ascending_node: [f64; 4],
    perihelion_longitude: [f64; 4],
}

#[rustfmt::skip]
static MERCURY: ElementPolynomials = ElementPolynomials {
    mean_longitude:       [252.250_906, 149_474.072_249_1,  0.000_303_50,     0.000_000_018],
    semi_major_axis:      [0.387_098_310, 0.0,              0.0,              0.0],
    eccentricity:         [0.205_631_75,  0.000_020_407,   -0.000_000_028_3, -0.000_000_000_18],
    inclination:          [7.004_986,     0.001_821_5,     -0.000_018_10,     0.000_000_056],
    ascending_node:       [48.330_893,    1.186_188_3,      0.000_175_42,     0.000_000_215],
    perihelion_longitude: [77.456_119,    1.556_477_6,      0.000_295_44,     0.000_000_009],
};

#[rustfmt::skip]
static VENUS: ElementPolynomials = ElementPolynomials {
    mean_longitude:       [181.979_801, 58_519.213_030_2,   0.000_310_14,     0.000_000_015],
    semi_major_axis:      [0.723_329_820, 0.0,              0.0,              0.0],
    eccentricity:         [0.006_771_92, -0.000_047_765,    0.000_000_098_1,  0.000_000_000_46],
    inclination:          [3.394_662,     0.001_003_7,     -0.000_000_88,    -0.000_000_007],
    ascending_node:       [76.679_920,    0.901_120_6,      0.000_406_18,    -0.000_000_093],
    perihelion_longitude: [131.563_703,   1.402_228_8,     -0.001_076_18,    -0.000_005_678],
};

// Earth's orbit is the reference plane: no inclination and no node.
#[rustfmt::skip]
static EARTH: ElementPolynomials = ElementPolynomials {
    mean_longitude:       [100.466_457, 36_000.769_827_8,   0.000_303_22,     0.000_000_020],
    semi_major_axis:      [1.000_001_018, 0.0,              0.0,              0.0],
    eccentricity:         [0.016_708_63, -0.000_042_037,   -0.000_000_126_7,  0.000_000_000_14],
    inclination:          [0.0,           0.0,              0.0,              0.0],
    ascending_node:       [f64::NAN,      0.0,              0.0,              0.0],
    perihelion_longitude: [102.937_348,   1.171_953_66,     0.000_456_88,    -0.000_000_018],
};

#[rustfmt::skip]
static MARS: ElementPolynomials = ElementPolynomials {
    mean_longitude:       [355.433_000, 19_141.696_447_1,   0.000_310_52,     0.000_000_016],
    semi_major_axis:      [1.523_679_342, 0.0,              0.0,              0.0],
    eccentricity:         [0.093_400_65,  0.000_090_484,   -0.000_000_080_6, -0.000_000_000_25],
    inclination:          [1.849_726,    -0.000_601_1,      0.000_012_76,    -0.000_000_007],
    ascending_node:       [49.588_093,    0.772_095_9,      0.000_015_57,     0.000_002_267],
    perihelion_longitude: [336.060_234,   1.841_044_9,      0.000_134_77,     0.000_000_536],
};

#[rustfmt::skip]
static JUPITER: ElementPolynomials = ElementPolynomials {
    mean_longitude:       [34.351_519,  3_036.302_774_8,    0.000_223_30,     0.000_000_037],
    semi_major_axis:      [5.202_603_209, 0.000_000_191_3,  0.0,              0.0],
    eccentricity:         [0.048_497_93,  0.000_163_225,   -0.000_000_471_4, -0.000_000_002_01],
    inclination:          [1.303_267,    -0.005_496_5,      0.000_004_66,    -0.000_000_002],
    ascending_node:       [100.464_407,   1.020_977_4,      0.000_403_15,     0.000_000_404],
    perihelion_longitude: [14.331_207,    1.612_635_2,      0.001_030_42,    -0.000_004_464],
};

#[rustfmt::skip]
static SATURN: ElementPolynomials = ElementPolynomials {
    mean_longitude:       [50.077_444,  1_223.511_068_6,    0.000_519_08,    -0.000_000_030],
    semi_major_axis:      [9.554_909_192, -0.000_002_139_0, 0.000_000_004,    0.0],
    eccentricity:         [0.055_548_14, -0.000_344_664_1, -0.000_000_643_6,  0.000_000_003_40],
    inclination:          [2.488_879,    -0.003_736_2,     -0.000_015_19,     0.000_000_087],
    ascending_node:       [113.665_503,   0.877_088_0,     -0.000_121_76,    -0.000_002_249],
    perihelion_longitude: [93.057_237,    1.963_761_3,      0.000_837_53,     0.000_004_928],
};

#[rustfmt::skip]
static URANUS: ElementPolynomials = ElementPolynomials {
    mean_longitude:       [314.055_005,   429.864_056_1,    0.000_303_90,     0.000_000_026],
    semi_major_axis:      [19.218_446_062, -0.000_000_037_2, 0.000_000_000_98, 0.0],
    eccentricity:         [0.046_381_22, -0.000_027_293,    0.000_000_078_9,  0.000_000_000_24],
    inclination:          [0.773_197,     0.000_774_4,      0.000_037_49,    -0.000_000_092],
    ascending_node:       [74.005_957,    0.521_127_8,      0.001_339_47,     0.000_018_484],
    perihelion_longitude: [173.005_291,   1.486_379_0,      0.000_214_06,     0.000_000_434],
};

#[rustfmt::skip]
static NEPTUNE: ElementPolynomials = ElementPolynomials {
    mean_longitude:       [304.348_665,   219.883_309_2,    0.000_308_82,     0.000_000_018],
    semi_major_axis:      [30.110_386_869, -0.000_000_166_3, 0.000_000_000_69, 0.0],
    eccentricity:         [0.009_455_75,  0.000_006_033,    0.0,             -0.000_000_000_05],
    inclination:          [1.769_953,    -0.009_308_2,     -0.000_007_08,     0.000_000_027],
    ascending_node:       [131.784_057,   1.102_203_9,      0.000_259_52,    -0.000_000_637],
    perihelion_longitude: [48.120_276,    1.426_295_7,      0.000_384_34,     0.000_000_020],
};

fn polynomials_for(body: Body) -> Option<&'static ElementPolynomials> {
    match body {
        Body::Mercury => Some(&MERCURY),
        Body::Venus => Some(&VENUS),
        Body::Earth => Some(&EARTH),
        Body::Mars => Some(&MARS),
        Body::Jupiter => Some(&JUPITER),
        Body::Saturn => Some(&SATURN),
        Body::Uranus => Some(&URANUS),
        Body::Neptune => Some(&NEPTUNE),
        Body::Sun | Body::Moon | Body::Pluto => None,
    }
}

fn evaluate(coefficients: &[f64; 4], t: f64) -> f64 {
    coefficients
        .iter()
        .rev()
        .fold(0.0, |acc, coefficient| acc * t + coefficient)
}

/// Mean orbital elements at one epoch. Angles in degrees, distances in AU.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitalElements {
    /// L
    pub mean_longitude: f64,
    /// a
    pub semi_major_axis: f64,
    /// e
    pub eccentricity: f64,
    /// i
    pub inclination: f64,
    /// Ω, undefined for the Earth
    pub ascending_node: f64,
    /// ϖ = Ω + ω
    pub perihelion_longitude: f64,
    /// M = L − ϖ
    pub mean_anomaly: f64,
    /// ω = ϖ − Ω, undefined for the Earth
    pub perihelion_argument: f64,
}

impl OrbitalElements {
    pub fn undefined() -> Self {
        Self {
            mean_longitude: f64::NAN,
            semi_major_axis: f64::NAN,
            eccentricity: f64::NAN,
            inclination: f64::NAN,
            ascending_node: f64::NAN,
            perihelion_longitude: f64::NAN,
            mean_anomaly: f64::NAN,
            perihelion_argument: f64::NAN,
        }
    }

    /// Elements of `body` at `t` Julian centuries from J2000.0.
    ///
    /// Angles are normalized to `[0, 360)`. The Sun and unsupported bodies
    /// have no orbit and give [`OrbitalElements::undefined`].
    pub fn for_body(body: Body, t: f64) -> Self {
        let Some(p) = polynomials_for(body) else {
            return Self::undefined();
        };

        let mean_longitude = normalize_degrees(evaluate(&p.mean_longitude, t));
        let inclination = normalize_degrees(evaluate(&p.inclination, t));
        let ascending_node = normalize_degrees(evaluate(&p.ascending_node, t));
        let perihelion_longitude = normalize_degrees(evaluate(&p.perihelion_longitude, t));

        Self {
            mean_longitude,
            semi_major_axis: evaluate(&p.semi_major_axis, t),
            eccentricity: evaluate(&p.eccentricity, t),
            inclination,
            ascending_node,
            perihelion_longitude,
            mean_anomaly: normalize_degrees(mean_longitude - perihelion_longitude),
            perihelion_argument: normalize_degrees(perihelion_longitude - ascending_node),
        }
    }

    /// True when the in-plane elements are defined. The node may still be
    /// undefined for an orbit lying in the ecliptic.
    pub fn is_valid(&self) -> bool {
        self.mean_longitude.is_finite()
            && self.semi_major_axis.is_finite()
            && self.eccentricity.is_finite()
            && self.perihelion_longitude.is_finite()
    }

    /// Heliocentric ecliptic position on the osculating ellipse.
    ///
    /// Orbits without an ascending node are taken to lie in the ecliptic,
    /// so the longitude is `ϖ + v` and the latitude zero.
    pub fn heliocentric_coordinates(&self, settings: &EphemerisSettings) -> HeliocentricCoordinates {
        if !self.is_valid() {
            return HeliocentricCoordinates::undefined();
        }

        let e = self.eccentricity;
        let eccentric_anomaly = solve_kepler(self.mean_anomaly, e, settings).eccentric_anomaly;
        let v = true_anomaly(eccentric_anomaly, e);
        let radius = self.semi_major_axis * (1.0 - e * cos_deg(eccentric_anomaly));

        if self.ascending_node.is_nan() {
            return HeliocentricCoordinates::new(
                normalize_degrees(self.perihelion_longitude + v),
                0.0,
                radius,
            );
        }

        let u = self.perihelion_argument + v;
        let in_plane = radians_to_degrees(
            (cos_deg(self.inclination) * sin_deg(u)).atan2(cos_deg(u)),
        );
        let lat = radians_to_degrees((sin_deg(self.inclination) * sin_deg(u)).asin());
        HeliocentricCoordinates::new(normalize_degrees(self.ascending_node + in_plane), lat, radius)
    }
}

/// Elements of `body` at `t` Julian centuries from J2000.0
pub fn orbital_elements(body: Body, t: f64) -> OrbitalElements {
    OrbitalElements::for_body(body, t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planetlib::vsop87;
    use approx::assert_abs_diff_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use rstest::rstest;

    fn angular_difference(a: f64, b: f64) -> f64 {
        let d = normalize_degrees(a - b);
        d.min(360.0 - d)
    }

    #[test]
    fn test_mercury_reference_elements() {
        // 2065 June 24, 0h TD
        let el = OrbitalElements::for_body(Body::Mercury, 0.654_770_704_997);
        assert_abs_diff_eq!(el.mean_longitude, 203.494_701, epsilon = 1e-5);
        assert_abs_diff_eq!(el.semi_major_axis, 0.387_098_310, epsilon = 1e-9);
        assert_abs_diff_eq!(el.eccentricity, 0.205_645_10, epsilon = 1e-8);
        assert_abs_diff_eq!(el.inclination, 7.006_171, epsilon = 1e-5);
        assert_abs_diff_eq!(el.ascending_node, 49.107_650, epsilon = 1e-5);
        assert_abs_diff_eq!(el.perihelion_longitude, 78.475_382, epsilon = 1e-5);
        assert_abs_diff_eq!(el.mean_anomaly, 125.019_320, epsilon = 1e-5);
    }

    #[test]
    fn test_earth_has_no_node() {
        for t in [-1.0, 0.0, 0.5] {
            let el = OrbitalElements::for_body(Body::Earth, t);
            assert_eq!(el.inclination, 0.0);
            assert!(el.ascending_node.is_nan());
            assert!(el.perihelion_argument.is_nan());
            assert!(el.is_valid());
        }
    }

    #[rstest]
    #[case(Body::Sun)]
    #[case(Body::Moon)]
    #[case(Body::Pluto)]
    fn test_bodies_without_elements(#[case] body: Body) {
        let el = orbital_elements(body, 0.0);
        assert!(!el.is_valid());
        assert!(el.mean_anomaly.is_nan());
        assert!(!el
            .heliocentric_coordinates(&EphemerisSettings::default())
            .is_valid());
    }

    #[test]
    fn test_angles_are_normalized() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let t = rng.gen_range(-5.0..5.0);
            for body in Body::SUPPORTED.into_iter().filter(Body::is_planet) {
                let el = OrbitalElements::for_body(body, t);
                let mut angles = vec![
                    el.mean_longitude,
                    el.inclination,
                    el.perihelion_longitude,
                    el.mean_anomaly,
                ];
                if body != Body::Earth {
                    angles.push(el.ascending_node);
                    angles.push(el.perihelion_argument);
                }
                for angle in angles {
                    assert!((0.0..360.0).contains(&angle), "{body} at {t}: {angle}");
                }
            }
        }
    }

    #[rstest]
    #[case(Body::Mercury, 0.01)]
    #[case(Body::Venus, 0.02)]
    #[case(Body::Earth, 0.02)]
    #[case(Body::Mars, 0.05)]
    #[case(Body::Jupiter, 0.3)]
    #[case(Body::Saturn, 1.0)]
    fn test_close_to_series_positions(#[case] body: Body, #[case] tolerance: f64) {
        let settings = EphemerisSettings::default();
        for t in [-0.8, -0.072_183_436, 0.0, 0.35] {
            let from_elements =
                OrbitalElements::for_body(body, t).heliocentric_coordinates(&settings);
            let from_series = vsop87::heliocentric_coordinates(body, t);
            assert!(
                angular_difference(from_elements.lon, from_series.lon) < tolerance,
                "{body} at {t}: {} vs {}",
                from_elements.lon,
                from_series.lon
            );
            assert_abs_diff_eq!(from_elements.lat, from_series.lat, epsilon = 0.05);
            assert_abs_diff_eq!(from_elements.radius, from_series.radius, epsilon = 0.05);
        }
    }
}
