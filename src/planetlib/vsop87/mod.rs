//! VSOP87D heliocentric series
//!
//! Each planet carries up to six tables per coordinate (orders 0 to 5). A
//! table is summed as `Σ A·cos(B + C·τ)` with `τ` in Julian millennia from
//! J2000.0, and the tables of one coordinate are recombined as a polynomial
//! in `τ`. Coefficients are stored scaled by 10⁸, in radians for the angles
//! and AU for the radius. Positions refer to the mean ecliptic and equinox
//! of date.
//!
//! The tables are abridged to the dominant terms (tens of arcseconds for the
//! inner planets).
//!
//! ```rust
//! use solarfield::planetlib::{vsop87, Body};
//!
//! let earth = vsop87::heliocentric_coordinates(Body::Earth, 0.0);
//! assert!((earth.radius - 0.983).abs() < 1e-3);
//!
//! assert!(!vsop87::heliocentric_coordinates(Body::Moon, 0.0).is_valid());
//! ```

mod earth;
mod jupiter;
mod mars;
mod mercury;
mod neptune;
mod saturn;
mod uranus;
mod venus;

use log::debug;

use super::Body;
use crate::constants::{CENTURIES_PER_MILLENNIUM, VSOP87_SCALE};
use crate::coordinates::angle::{normalize_degrees, radians_to_degrees};
use crate::coordinates::HeliocentricCoordinates;

/// How the amplitude column of a table is stored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmplitudeEncoding {
    /// The amplitude itself
    Linear,
    /// The square root of the amplitude; narrow float formats keep the large
    /// leading terms in range this way
    SquareRoot,
}

/// One periodic term `A·cos(B + C·τ)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesTerm {
    pub amplitude: f64,
    pub phase: f64,
    pub frequency: f64,
}

impl SeriesTerm {
    pub fn evaluate(&self, tau: f64) -> f64 {
        self.amplitude * (self.phase + self.frequency * tau).cos()
    }
}

/// A read-only table of `[A, B, C]` rows
#[derive(Debug, Clone, Copy)]
pub struct SeriesTable {
    encoding: AmplitudeEncoding,
    rows: &'static [[f64; 3]],
}

impl SeriesTable {
    pub const fn linear(rows: &'static [[f64; 3]]) -> Self {
        Self {
            encoding: AmplitudeEncoding::Linear,
            rows,
        }
    }

    pub const fn square_root(rows: &'static [[f64; 3]]) -> Self {
        Self {
            encoding: AmplitudeEncoding::SquareRoot,
            rows,
        }
    }

    pub fn encoding(&self) -> AmplitudeEncoding {
        self.encoding
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Terms with the amplitude decoded
    pub fn terms(&self) -> impl Iterator<Item = SeriesTerm> + '_ {
        self.rows.iter().map(move |&[a, b, c]| SeriesTerm {
            amplitude: match self.encoding {
                AmplitudeEncoding::Linear => a,
                AmplitudeEncoding::SquareRoot => a * a,
            },
            phase: b,
            frequency: c,
        })
    }

    /// Sum of every term at `tau`, in the table's scaled units
    pub fn evaluate(&self, tau: f64) -> f64 {
        self.terms().map(|term| term.evaluate(tau)).sum()
    }
}

/// Longitude, latitude and radius tables of one planet
#[derive(Debug)]
pub struct PlanetSeries {
    pub longitude: &'static [SeriesTable],
    pub latitude: &'static [SeriesTable],
    pub radius: &'static [SeriesTable],
}

/// `Σ table_k(τ)·τᵏ / 10⁸`
fn combine(tables: &[SeriesTable], tau: f64) -> f64 {
    let sum = tables
        .iter()
        .rev()
        .fold(0.0, |acc, table| acc * tau + table.evaluate(tau));
    sum / VSOP87_SCALE
}

impl PlanetSeries {
    /// Heliocentric position at `tau` Julian millennia from J2000.0
    pub fn evaluate(&self, tau: f64) -> HeliocentricCoordinates {
        HeliocentricCoordinates::new(
            normalize_degrees(radians_to_degrees(combine(self.longitude, tau))),
            radians_to_degrees(combine(self.latitude, tau)),
            combine(self.radius, tau),
        )
    }

    /// Total number of terms across all tables
    pub fn term_count(&self) -> usize {
        self.longitude
            .iter()
            .chain(self.latitude)
            .chain(self.radius)
            .map(SeriesTable::len)
            .sum()
    }
}

/// Series for `body`, if it has one
pub fn series_for(body: Body) -> Option<&'static PlanetSeries> {
    match body {
        Body::Mercury => Some(&mercury::MERCURY),
        Body::Venus => Some(&venus::VENUS),
        Body::Earth => Some(&earth::EARTH),
        Body::Mars => Some(&mars::MARS),
        Body::Jupiter => Some(&jupiter::JUPITER),
        Body::Saturn => Some(&saturn::SATURN),
        Body::Uranus => Some(&uranus::URANUS),
        Body::Neptune => Some(&neptune::NEPTUNE),
        Body::Sun | Body::Moon | Body::Pluto => None,
    }
}

/// Heliocentric ecliptic coordinates of `body` at `t` Julian centuries from
/// J2000.0.
///
/// The Sun sits at the origin. Bodies without a series give undefined
/// coordinates.
pub fn heliocentric_coordinates(body: Body, t: f64) -> HeliocentricCoordinates {
    if body == Body::Sun {
        return HeliocentricCoordinates::new(0.0, 0.0, 0.0);
    }
    match series_for(body) {
        Some(series) => series.evaluate(t / CENTURIES_PER_MILLENNIUM),
        None => {
            debug!("No heliocentric series for {body}");
            HeliocentricCoordinates::undefined()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use rstest::rstest;

    // 1992 October 13, 0h TD
    const T_1992_OCTOBER_13: f64 = -0.072_183_436;
    // 1992 December 20, 0h TD
    const T_1992_DECEMBER_20: f64 = -0.070_321_423;

    #[test]
    fn test_earth_reference_position() {
        let earth = heliocentric_coordinates(Body::Earth, T_1992_OCTOBER_13);
        assert_abs_diff_eq!(earth.lon, 19.907_372, epsilon = 1e-3);
        assert_abs_diff_eq!(earth.lat, -0.000_179, epsilon = 1e-4);
        assert_abs_diff_eq!(earth.radius, 0.997_607_75, epsilon = 1e-5);
    }

    #[test]
    fn test_venus_reference_position() {
        let venus = heliocentric_coordinates(Body::Venus, T_1992_DECEMBER_20);
        assert_abs_diff_eq!(venus.lon, 26.114_28, epsilon = 0.05);
        assert_abs_diff_eq!(venus.lat, -2.620_70, epsilon = 0.01);
        assert_abs_diff_eq!(venus.radius, 0.724_603, epsilon = 1e-4);
    }

    #[test]
    fn test_earth_near_one_au_at_j2000() {
        let earth = heliocentric_coordinates(Body::Earth, 0.0);
        assert_abs_diff_eq!(earth.radius, 0.983_3, epsilon = 1e-3);
        assert_abs_diff_eq!(earth.radius, 1.0, epsilon = 0.02);
    }

    #[test]
    fn test_sun_is_at_origin() {
        let sun = heliocentric_coordinates(Body::Sun, 0.3);
        assert_eq!(sun.radius, 0.0);
        assert!(sun.is_valid());
    }

    #[rstest]
    #[case(Body::Moon)]
    #[case(Body::Pluto)]
    fn test_unsupported_bodies_are_undefined(#[case] body: Body) {
        let position = heliocentric_coordinates(body, 0.0);
        assert!(position.lon.is_nan());
        assert!(position.lat.is_nan());
        assert!(position.radius.is_nan());
        assert!(series_for(body).is_none());
    }

    #[rstest]
    #[case(Body::Mercury, 0.30, 0.47)]
    #[case(Body::Venus, 0.71, 0.73)]
    #[case(Body::Earth, 0.98, 1.02)]
    #[case(Body::Mars, 1.38, 1.67)]
    #[case(Body::Jupiter, 4.94, 5.46)]
    #[case(Body::Saturn, 9.0, 10.1)]
    #[case(Body::Uranus, 18.2, 20.2)]
    #[case(Body::Neptune, 29.7, 30.4)]
    fn test_radius_stays_within_orbit(#[case] body: Body, #[case] min: f64, #[case] max: f64) {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..50 {
            let t = rng.gen_range(-2.0..2.0);
            let position = heliocentric_coordinates(body, t);
            assert!(
                (min..max).contains(&position.radius),
                "{body} at {t}: r = {}",
                position.radius
            );
            assert!((0.0..360.0).contains(&position.lon));
            assert!(position.lat.abs() < 8.0);
        }
    }

    #[test]
    fn test_square_root_amplitudes_are_decoded() {
        static ROWS: [[f64; 3]; 2] = [[3.0, 0.0, 0.0], [2.0, 1.0, 10.0]];
        let encoded = SeriesTable::square_root(&ROWS);
        let amplitudes: Vec<f64> = encoded.terms().map(|term| term.amplitude).collect();
        assert_eq!(amplitudes, vec![9.0, 4.0]);
        assert_eq!(encoded.encoding(), AmplitudeEncoding::SquareRoot);

        let tau: f64 = 0.25;
        let expected = 9.0 + 4.0 * (1.0 + 10.0 * tau).cos();
        assert_abs_diff_eq!(encoded.evaluate(tau), expected, epsilon = 1e-12);
        assert_abs_diff_eq!(
            SeriesTable::linear(&ROWS).evaluate(tau),
            3.0 + 2.0 * (1.0 + 10.0 * tau).cos(),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_every_planet_has_a_series() {
        for body in Body::SUPPORTED.into_iter().filter(Body::is_planet) {
            let series = series_for(body).unwrap();
            assert!(!series.longitude.is_empty());
            assert!(!series.latitude.is_empty());
            assert!(!series.radius.is_empty());
            assert!(series.longitude.len() <= 6);
            assert!(series.term_count() > 10);
        }
    }
}
