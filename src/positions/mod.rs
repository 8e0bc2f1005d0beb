//! Geocentric and apparent positions
//!
//! [`geocentric_position`] runs the light-time iteration: both the target
//! and the Earth are evaluated at the retarded epoch until that epoch stops
//! moving, then stellar aberration is removed from the resulting ecliptic
//! direction. [`solar_system_object`] is the aggregate query built on top of
//! it, adding nutation, the equatorial frame, the observer's horizon and the
//! apparent diameter. The Sun takes the shorter route through [`sun`].

pub mod sun;

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use crate::constants::{ABERRATION_ASEC, ASEC_PER_DEG, DAYS_PER_CENTURY, LIGHT_TIME_DAYS_PER_AU};
use crate::coordinates::angle::{cos_deg, normalize_degrees, sin_deg};
use crate::coordinates::{
    EquatorialCoordinates, GeocentricCoordinates, HorizontalCoordinates, RectangularCoordinates,
};
use crate::earthlib::ObserverLocation;
use crate::framelib::{ecliptic_to_equatorial, equatorial_to_horizontal};
use crate::nutationlib::{obliquity_and_nutation, ObliquityNutation};
use crate::planetlib::elements::OrbitalElements;
use crate::planetlib::{vsop87, Body};
use crate::settings::EphemerisSettings;
use crate::time::sidereal::apparent_sidereal_time;
use crate::time::JulianDay;

use sun::{sun_position, SolarGeometry};

/// Outcome of the light-time iteration for one body
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeocentricPosition {
    /// Ecliptic direction corrected for light time and aberration, degrees
    pub ecliptic: GeocentricCoordinates,
    /// Distance from the Earth at the retarded epoch, AU
    pub distance: f64,
    /// Light-time delay, days
    pub light_time: f64,
    /// Retarded epoch, Julian centuries from J2000.0
    pub t: f64,
    pub iterations: usize,
    pub converged: bool,
}

impl GeocentricPosition {
    pub fn undefined() -> Self {
        Self {
            ecliptic: GeocentricCoordinates::undefined(),
            distance: f64::NAN,
            light_time: f64::NAN,
            t: f64::NAN,
            iterations: 0,
            converged: false,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.ecliptic.is_valid() && self.distance.is_finite()
    }

    /// Obliquity and nutation at the retarded epoch
    pub fn obliquity_and_nutation(&self) -> ObliquityNutation {
        obliquity_and_nutation(self.t)
    }

    /// Ecliptic direction referred to the true equinox of date
    pub fn apparent_ecliptic(&self) -> GeocentricCoordinates {
        let on = self.obliquity_and_nutation();
        GeocentricCoordinates::new(
            normalize_degrees(self.ecliptic.lon + on.delta_psi_degrees()),
            self.ecliptic.lat,
        )
    }

    /// Apparent right ascension and declination
    pub fn equatorial(&self) -> EquatorialCoordinates {
        ecliptic_to_equatorial(&self.apparent_ecliptic(), self.obliquity_and_nutation().obliquity)
    }
}

/// Remove annual aberration from a geocentric ecliptic direction at `t`.
///
/// Uses the Sun's true longitude and the eccentricity and perihelion of the
/// Earth's orbit.
pub fn remove_aberration(ecliptic: &GeocentricCoordinates, t: f64) -> GeocentricCoordinates {
    let earth = OrbitalElements::for_body(Body::Earth, t);
    let sun_longitude = SolarGeometry::at(t).true_longitude;
    let (lambda, beta) = (ecliptic.lon, ecliptic.lat);
    let (e, perihelion) = (earth.eccentricity, earth.perihelion_longitude);
    let k = ABERRATION_ASEC;

    let d_lambda = (-k * cos_deg(sun_longitude - lambda) + e * k * cos_deg(perihelion - lambda))
        / cos_deg(beta)
        / ASEC_PER_DEG;
    let d_beta = -k
        * sin_deg(beta)
        * (sin_deg(sun_longitude - lambda) - e * sin_deg(perihelion - lambda))
        / ASEC_PER_DEG;

    GeocentricCoordinates::new(normalize_degrees(lambda - d_lambda), beta - d_beta)
}

/// Geocentric ecliptic position of `body` at `jd`, corrected for light time
/// and aberration.
///
/// The iteration stops once the retarded epoch moves less than
/// `settings.light_time_tolerance_days` or after
/// `settings.light_time_max_iterations` passes. A body without a series
/// gives [`GeocentricPosition::undefined`]. The Earth itself has distance
/// zero and no direction.
pub fn geocentric_position(
    body: Body,
    jd: &JulianDay,
    settings: &EphemerisSettings,
) -> GeocentricPosition {
    let t0 = jd.centuries_since_j2000();

    let mut light_time = 0.0;
    let mut last_t = f64::NAN;
    let mut t = t0;
    let mut rect = RectangularCoordinates::undefined();
    let mut distance = f64::NAN;
    let mut iterations = 0;
    let mut converged = false;

    while iterations < settings.light_time_max_iterations {
        t = t0 - light_time / DAYS_PER_CENTURY;
        iterations += 1;

        let target = vsop87::heliocentric_coordinates(body, t);
        if !target.is_valid() {
            debug!("{body} has no heliocentric position, leaving it undefined");
            return GeocentricPosition::undefined();
        }
        let earth = vsop87::heliocentric_coordinates(Body::Earth, t);

        rect = RectangularCoordinates::between(&target, &earth);
        distance = rect.distance();
        light_time = distance * LIGHT_TIME_DAYS_PER_AU;
        trace!("light-time iteration {iterations} for {body}: T = {t}, Δ = {distance} AU");

        if ((t - last_t) * DAYS_PER_CENTURY).abs() < settings.light_time_tolerance_days {
            converged = true;
            break;
        }
        last_t = t;
    }

    if !converged {
        warn!(
            "Light-time iteration for {body} stopped after {iterations} passes without converging"
        );
    }

    let ecliptic = rect.to_ecliptic();
    let ecliptic = if ecliptic.is_valid() {
        remove_aberration(&ecliptic, t)
    } else {
        ecliptic
    };

    GeocentricPosition {
        ecliptic,
        distance,
        light_time,
        t,
        iterations,
        converged,
    }
}

/// Everything known about one body for one instant and observer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolarSystemObject {
    pub body: Body,
    pub equatorial: EquatorialCoordinates,
    /// Undefined when the observer location is unknown
    pub horizontal: HorizontalCoordinates,
    /// Apparent diameter, arcminutes
    pub diameter: f64,
    /// Distance from the Earth, AU
    pub distance: f64,
}

impl SolarSystemObject {
    /// True when the equatorial position and the distance are defined
    pub fn is_valid(&self) -> bool {
        self.equatorial.is_valid() && self.distance.is_finite()
    }

    pub fn has_horizontal(&self) -> bool {
        self.horizontal.is_valid()
    }
}

/// Apparent position of `body` at `jd` as seen by `observer`
pub fn solar_system_object(
    body: Body,
    jd: &JulianDay,
    observer: &ObserverLocation,
    settings: &EphemerisSettings,
) -> SolarSystemObject {
    let (equatorial, distance) = if body == Body::Sun {
        let sun = sun_position(jd.centuries_since_j2000());
        (sun.equatorial, sun.distance)
    } else {
        let position = geocentric_position(body, jd, settings);
        (position.equatorial(), position.distance)
    };

    if !observer.is_known() {
        debug!("Observer location unknown, horizontal coordinates left undefined");
    }
    let horizontal = equatorial_to_horizontal(&equatorial, observer, apparent_sidereal_time(jd));

    SolarSystemObject {
        body,
        equatorial,
        horizontal,
        diameter: body.apparent_diameter(distance),
        distance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinates::angle::{dms_to_degrees, hms_to_hours};
    use crate::time::CivilDateTime;
    use approx::assert_abs_diff_eq;
    use rstest::rstest;

    fn jd(year: i32, month: u32, day: u32) -> JulianDay {
        CivilDateTime::date(year, month, day).unwrap().to_julian_day()
    }

    #[test]
    fn test_venus_apparent_position() {
        // 1992 December 20, 0h TD: 21h 04m 41.454s, −18° 53′ 16.84″
        let position = geocentric_position(Body::Venus, &jd(1992, 12, 20), &Default::default());
        assert!(position.converged);
        assert_abs_diff_eq!(position.distance, 0.910_845, epsilon = 1e-4);
        assert_abs_diff_eq!(position.light_time, 0.005_260_6, epsilon = 1e-6);

        let eq = position.equatorial();
        assert_abs_diff_eq!(eq.ra, hms_to_hours(21, 4, 41.454), epsilon = 0.002);
        assert_abs_diff_eq!(eq.dec, dms_to_degrees(-18, 53, 16.84), epsilon = 0.01);
    }

    #[test]
    fn test_converges_in_a_few_passes() {
        for body in Body::SUPPORTED.into_iter().filter(Body::is_planet) {
            let position = geocentric_position(body, &JulianDay::j2000(), &Default::default());
            assert!(position.converged, "{body}");
            assert!(position.iterations <= 5, "{body}: {}", position.iterations);
        }
    }

    #[test]
    fn test_iteration_cap() {
        let settings = EphemerisSettings {
            light_time_max_iterations: 1,
            ..Default::default()
        };
        let position = geocentric_position(Body::Mars, &JulianDay::j2000(), &settings);
        assert_eq!(position.iterations, 1);
        assert!(!position.converged);
        assert!(position.is_valid());
    }

    #[rstest]
    #[case(Body::Moon)]
    #[case(Body::Pluto)]
    fn test_unsupported_body_is_undefined(#[case] body: Body) {
        let position = geocentric_position(body, &JulianDay::j2000(), &Default::default());
        assert!(!position.is_valid());
        assert!(position.distance.is_nan());
        assert!(!position.equatorial().is_valid());

        let object = solar_system_object(
            body,
            &JulianDay::j2000(),
            &ObserverLocation::new(10.0, 10.0).unwrap(),
            &Default::default(),
        );
        assert!(!object.is_valid());
        assert!(object.diameter.is_nan());
        assert!(!object.has_horizontal());
    }

    #[test]
    fn test_earth_as_target() {
        let position = geocentric_position(Body::Earth, &JulianDay::j2000(), &Default::default());
        assert_eq!(position.distance, 0.0);
        assert!(!position.ecliptic.is_valid());

        let object = solar_system_object(
            Body::Earth,
            &JulianDay::j2000(),
            &ObserverLocation::new(0.0, 0.0).unwrap(),
            &Default::default(),
        );
        assert_eq!(object.distance, 0.0);
        assert!(!object.equatorial.is_valid());
        assert!(!object.horizontal.is_valid());
        assert!(object.diameter.is_nan());
    }

    #[test]
    fn test_sun_through_both_paths_agrees() {
        let jd = JulianDay::j2000();
        let series = geocentric_position(Body::Sun, &jd, &Default::default()).equatorial();
        let object = solar_system_object(Body::Sun, &jd, &ObserverLocation::unknown(), &Default::default());
        assert_abs_diff_eq!(series.ra, object.equatorial.ra, epsilon = 0.002);
        assert_abs_diff_eq!(series.dec, object.equatorial.dec, epsilon = 0.01);
    }

    #[test]
    fn test_aberration_is_bounded() {
        for step in 0..36 {
            let lon = step as f64 * 10.0;
            let ecliptic = GeocentricCoordinates::new(lon, 1.5);
            let corrected = remove_aberration(&ecliptic, 0.1);
            let dlon = normalize_degrees(corrected.lon - lon);
            assert!(dlon.min(360.0 - dlon) < 21.0 / 3600.0);
            assert!((corrected.lat - 1.5).abs() < 1.0 / 3600.0);
        }
    }

    #[test]
    fn test_observer_controls_horizontal() {
        let jd = jd(2024, 3, 20);
        let settings = EphemerisSettings::default();
        let unknown = solar_system_object(Body::Mars, &jd, &ObserverLocation::unknown(), &settings);
        assert!(unknown.is_valid());
        assert!(!unknown.has_horizontal());

        let observer = ObserverLocation::new(48.85, -2.35).unwrap();
        let known = solar_system_object(Body::Mars, &jd, &observer, &settings);
        assert!(known.has_horizontal());
        assert_eq!(known.equatorial, unknown.equatorial);
        assert!((0.0..360.0).contains(&known.horizontal.azimuth));
    }

    #[test]
    fn test_diameter_scales_with_distance() {
        let object = solar_system_object(
            Body::Jupiter,
            &JulianDay::j2000(),
            &ObserverLocation::unknown(),
            &Default::default(),
        );
        assert_abs_diff_eq!(
            object.diameter,
            197.146 / object.distance / 60.0,
            epsilon = 1e-12
        );
        assert!((0.5..0.9).contains(&object.diameter));
    }
}
