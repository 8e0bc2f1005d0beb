//! End-to-end checks of the position engine through the public API

use approx::assert_abs_diff_eq;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rstest::rstest;

use solarfield::coordinates::angle::{dms_to_degrees, hms_to_hours};
use solarfield::planetlib::vsop87;
use solarfield::time::sidereal::apparent_sidereal_time;
use solarfield::{Body, CivilDateTime, Ephemeris, JulianDay, OrbitalElements};

fn j2000_noon() -> CivilDateTime {
    CivilDateTime::new(2000, 1, 1, 12, 0, 0.0).unwrap()
}

#[test]
fn test_sun_at_j2000() {
    let jd = j2000_noon().to_julian_day();
    assert_eq!(jd, JulianDay::new(2_451_545, 0.0));

    let sun = Ephemeris::new().solar_system_object_at(Body::Sun, &j2000_noon());
    // Near 18h 45m, −23°
    assert_abs_diff_eq!(sun.equatorial.ra, 18.75, epsilon = 0.05);
    assert_abs_diff_eq!(sun.equatorial.dec, -23.0, epsilon = 0.1);
    assert_abs_diff_eq!(sun.diameter, 1919.26 / sun.distance / 60.0, epsilon = 1e-12);
    assert_abs_diff_eq!(sun.diameter, 32.53, epsilon = 0.05);
}

#[test]
fn test_earth_radius_at_j2000() {
    let earth = Ephemeris::new().heliocentric_coordinates(Body::Earth, &JulianDay::j2000());
    assert_abs_diff_eq!(earth.radius, 1.0, epsilon = 0.02);
    assert!(earth.lat.abs() < 0.001);
}

#[test]
fn test_venus_against_published_place() {
    // 1992 December 20, 0h: α = 21h 04m 41.454s, δ = −18° 53′ 16.84″
    let when = CivilDateTime::date(1992, 12, 20).unwrap();
    let venus = Ephemeris::new().solar_system_object_at(Body::Venus, &when);
    assert_abs_diff_eq!(venus.equatorial.ra, hms_to_hours(21, 4, 41.454), epsilon = 0.002);
    assert_abs_diff_eq!(venus.equatorial.dec, dms_to_degrees(-18, 53, 16.84), epsilon = 0.01);
    assert_abs_diff_eq!(venus.distance, 0.9108, epsilon = 1e-3);
}

#[rstest]
#[case(Body::Moon)]
#[case(Body::Pluto)]
fn test_unsupported_bodies_terminate_undefined(#[case] body: Body) {
    let mut ephemeris = Ephemeris::new();
    ephemeris.set_location_on_earth(40.0, 74.0).unwrap();
    let object = ephemeris.solar_system_object_at(body, &j2000_noon());

    assert!(!object.is_valid());
    assert!(object.equatorial.ra.is_nan());
    assert!(object.equatorial.dec.is_nan());
    assert!(object.horizontal.azimuth.is_nan());
    assert!(object.distance.is_nan());
    assert!(object.diameter.is_nan());
    assert!(!vsop87::heliocentric_coordinates(body, 0.0).is_valid());
}

#[test]
fn test_horizontal_defined_only_after_observer_set() {
    let mut ephemeris = Ephemeris::new();
    let when = CivilDateTime::new(2023, 8, 12, 22, 30, 0.0).unwrap();

    for body in Body::SUPPORTED.into_iter().filter(|b| *b != Body::Earth) {
        let object = ephemeris.solar_system_object_at(body, &when);
        assert!(object.is_valid(), "{body}");
        assert!(!object.has_horizontal(), "{body}");
    }

    ephemeris.set_location_on_earth(52.52, -13.40).unwrap();
    for body in Body::SUPPORTED.into_iter().filter(|b| *b != Body::Earth) {
        let object = ephemeris.solar_system_object_at(body, &when);
        assert!(object.has_horizontal(), "{body}");
    }
}

#[test]
fn test_sun_below_horizon_at_local_midnight() {
    let mut ephemeris = Ephemeris::new();
    ephemeris.set_location_on_earth(51.4779, 0.0).unwrap();

    let midnight = CivilDateTime::date(2021, 6, 21).unwrap();
    let sun = ephemeris.solar_system_object_at(Body::Sun, &midnight);
    assert!(!sun.horizontal.is_above_horizon());
    // Due north, at most about 15° down at midsummer
    let from_north = sun.horizontal.azimuth.min(360.0 - sun.horizontal.azimuth);
    assert!(from_north < 5.0, "azimuth {}", sun.horizontal.azimuth);
    assert!(sun.horizontal.altitude > -16.0);

    let noon = CivilDateTime::new(2021, 6, 21, 12, 0, 0.0).unwrap();
    let sun = ephemeris.solar_system_object_at(Body::Sun, &noon);
    // Transit altitude 90 − φ + δ
    assert_abs_diff_eq!(sun.horizontal.altitude, 90.0 - 51.4779 + 23.44, epsilon = 0.3);
}

#[test]
fn test_sun_transits_at_local_noon_west_of_greenwich() {
    let when = CivilDateTime::new(2021, 6, 21, 18, 0, 0.0).unwrap();
    let mut ephemeris = Ephemeris::new();

    // 90° W: local mean noon, the Sun is near the meridian
    ephemeris.set_location_on_earth(40.0, 90.0).unwrap();
    let sun = ephemeris.solar_system_object_at(Body::Sun, &when);
    assert!((sun.horizontal.azimuth - 180.0).abs() < 5.0, "azimuth {}", sun.horizontal.azimuth);
    assert_abs_diff_eq!(sun.horizontal.altitude, 90.0 - 40.0 + 23.44, epsilon = 0.3);

    // 90° E: local midnight
    ephemeris.set_location_on_earth(40.0, -90.0).unwrap();
    let sun = ephemeris.solar_system_object_at(Body::Sun, &when);
    assert!(!sun.horizontal.is_above_horizon());
}

#[test]
fn test_outputs_normalized_over_random_epochs() {
    let mut rng = StdRng::seed_from_u64(2024);
    let mut ephemeris = Ephemeris::new();

    for _ in 0..100 {
        ephemeris
            .set_location_on_earth(rng.gen_range(-89.0..89.0), rng.gen_range(-180.0..180.0))
            .unwrap();
        let jd = JulianDay::from_jd(rng.gen_range(2_415_020.0..2_488_070.0));

        for body in Body::SUPPORTED.into_iter().filter(|b| *b != Body::Earth) {
            let object = ephemeris.solar_system_object(body, &jd);
            assert!((0.0..24.0).contains(&object.equatorial.ra), "{body} ra");
            assert!((-90.0..=90.0).contains(&object.equatorial.dec), "{body} dec");
            assert!((0.0..360.0).contains(&object.horizontal.azimuth), "{body} az");
            assert!((-90.0..=90.0).contains(&object.horizontal.altitude), "{body} alt");
            assert!(object.distance > 0.0 && object.distance.is_finite());
            assert!(object.diameter > 0.0);
        }

        let gast = apparent_sidereal_time(&jd);
        assert!((0.0..24.0).contains(&gast));
    }
}

#[test]
fn test_orbital_elements_for_earth() {
    let mut rng = StdRng::seed_from_u64(9);
    let ephemeris = Ephemeris::new();
    for _ in 0..20 {
        let jd = JulianDay::from_jd(rng.gen_range(2_400_000.0..2_500_000.0));
        let earth: OrbitalElements = ephemeris.orbital_elements(Body::Earth, &jd);
        assert_eq!(earth.inclination, 0.0);
        assert!(earth.ascending_node.is_nan());
    }
}

#[test]
fn test_inner_planets_stay_near_the_sun() {
    // Greatest elongations: Mercury about 28°, Venus about 47°
    let ephemeris = Ephemeris::new();
    for day in (0..730).step_by(7) {
        let jd = JulianDay::from_jd(2_459_580.5 + day as f64);
        let sun = ephemeris.geocentric_position(Body::Sun, &jd).ecliptic;
        for (body, limit) in [(Body::Mercury, 28.5), (Body::Venus, 47.5)] {
            let planet = ephemeris.geocentric_position(body, &jd).ecliptic;
            let d = (planet.lon - sun.lon).rem_euclid(360.0);
            assert!(d.min(360.0 - d) < limit, "{body} on day {day}: {d}");
        }
    }
}
