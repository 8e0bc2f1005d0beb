//! Frame transforms between ecliptic, equatorial and horizontal coordinates
//!
//! Ecliptic and equatorial directions differ by a rotation about the
//! equinox axis through the obliquity. Horizontal coordinates additionally
//! need the observer's latitude and the local hour angle.
//!
//! Azimuth is measured from north through east.

use nalgebra::{Rotation3, Vector3};

use crate::coordinates::angle::{
    cos_deg, degrees_to_hours, degrees_to_radians, hours_to_degrees, normalize_degrees,
    radians_to_degrees, sin_deg, tan_deg,
};
use crate::coordinates::{EquatorialCoordinates, GeocentricCoordinates, HorizontalCoordinates};
use crate::earthlib::ObserverLocation;
use crate::time::sidereal::local_sidereal_time;

/// Rotation taking ecliptic axes onto equatorial axes
fn ecliptic_to_equatorial_rotation(obliquity: f64) -> Rotation3<f64> {
    Rotation3::from_axis_angle(&Vector3::x_axis(), degrees_to_radians(obliquity))
}

fn unit_vector(lon: f64, lat: f64) -> Vector3<f64> {
    let cos_lat = cos_deg(lat);
    Vector3::new(cos_lat * cos_deg(lon), cos_lat * sin_deg(lon), sin_deg(lat))
}

/// Longitude and latitude of a direction vector, degrees
fn spherical(v: &Vector3<f64>) -> (f64, f64) {
    let lon = normalize_degrees(radians_to_degrees(v.y.atan2(v.x)));
    let lat = radians_to_degrees(v.z.atan2(v.x.hypot(v.y)));
    (lon, lat)
}

/// Ecliptic longitude/latitude to right ascension (hours) and declination,
/// for an obliquity in degrees
pub fn ecliptic_to_equatorial(
    ecliptic: &GeocentricCoordinates,
    obliquity: f64,
) -> EquatorialCoordinates {
    if !ecliptic.is_valid() || !obliquity.is_finite() {
        return EquatorialCoordinates::undefined();
    }
    let v = ecliptic_to_equatorial_rotation(obliquity) * unit_vector(ecliptic.lon, ecliptic.lat);
    let (ra, dec) = spherical(&v);
    EquatorialCoordinates::new(degrees_to_hours(ra), dec)
}

/// Inverse of [`ecliptic_to_equatorial`]
pub fn equatorial_to_ecliptic(
    equatorial: &EquatorialCoordinates,
    obliquity: f64,
) -> GeocentricCoordinates {
    if !equatorial.is_valid() || !obliquity.is_finite() {
        return GeocentricCoordinates::undefined();
    }
    let v = ecliptic_to_equatorial_rotation(obliquity).inverse()
        * unit_vector(equatorial.ra_degrees(), equatorial.dec);
    let (lon, lat) = spherical(&v);
    GeocentricCoordinates::new(lon, lat)
}

/// Local hour angle in degrees, `[0, 360)`, west of the meridian
pub fn hour_angle(local_sidereal_hours: f64, right_ascension: f64) -> f64 {
    normalize_degrees(hours_to_degrees(local_sidereal_hours - right_ascension))
}

/// Azimuth and altitude of an equatorial position for an observer, given the
/// Greenwich apparent sidereal time in hours.
///
/// An unknown observer gives undefined coordinates.
pub fn equatorial_to_horizontal(
    equatorial: &EquatorialCoordinates,
    observer: &ObserverLocation,
    greenwich_sidereal_hours: f64,
) -> HorizontalCoordinates {
    if !observer.is_known() || !equatorial.is_valid() {
        return HorizontalCoordinates::undefined();
    }

    let lst = local_sidereal_time(greenwich_sidereal_hours, observer.longitude);
    let h = hour_angle(lst, equatorial.ra);
    let phi = observer.latitude;
    let dec = equatorial.dec;

    let azimuth = radians_to_degrees(
        sin_deg(h).atan2(cos_deg(h) * sin_deg(phi) - tan_deg(dec) * cos_deg(phi)),
    ) + 180.0;
    let sin_alt = sin_deg(phi) * sin_deg(dec) + cos_deg(phi) * cos_deg(dec) * cos_deg(h);
    let altitude = radians_to_degrees(sin_alt.clamp(-1.0, 1.0).asin());

    HorizontalCoordinates::new(normalize_degrees(azimuth), altitude)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinates::angle::{dms_to_degrees, hms_to_hours};
    use approx::assert_abs_diff_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_ecliptic_to_equatorial_reference() {
        // Pollux
        let ecliptic = GeocentricCoordinates::new(113.215_630, 6.684_170);
        let eq = ecliptic_to_equatorial(&ecliptic, 23.439_291_1);
        assert_abs_diff_eq!(eq.ra, hms_to_hours(7, 45, 18.946), epsilon = 1e-6);
        assert_abs_diff_eq!(eq.dec, dms_to_degrees(28, 1, 34.26), epsilon = 1e-5);
    }

    #[test]
    fn test_equatorial_round_trip() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..200 {
            let ecliptic =
                GeocentricCoordinates::new(rng.gen_range(0.0..360.0), rng.gen_range(-80.0..80.0));
            let obliquity = rng.gen_range(22.0..25.0);
            let eq = ecliptic_to_equatorial(&ecliptic, obliquity);
            assert!((0.0..24.0).contains(&eq.ra));
            assert!((-90.0..=90.0).contains(&eq.dec));

            let back = equatorial_to_ecliptic(&eq, obliquity);
            let dlon = normalize_degrees(back.lon - ecliptic.lon);
            assert!(dlon.min(360.0 - dlon) < 1e-9);
            assert_abs_diff_eq!(back.lat, ecliptic.lat, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_undefined_input_stays_undefined() {
        let eq = ecliptic_to_equatorial(&GeocentricCoordinates::undefined(), 23.4);
        assert!(!eq.is_valid());
        let eq = ecliptic_to_equatorial(&GeocentricCoordinates::new(10.0, 0.0), f64::NAN);
        assert!(!eq.is_valid());
    }

    #[test]
    fn test_horizontal_reference() {
        // Venus from the US Naval Observatory, 1987 April 10, 19h21m UT
        let observer = ObserverLocation::new(
            dms_to_degrees(38, 55, 17.0),
            dms_to_degrees(77, 3, 56.0),
        )
        .unwrap();
        let venus = EquatorialCoordinates::new(
            hms_to_hours(23, 9, 16.641),
            dms_to_degrees(-6, 43, 11.61),
        );
        let gast = hms_to_hours(8, 34, 56.853);

        let lst = local_sidereal_time(gast, observer.longitude);
        assert_abs_diff_eq!(hour_angle(lst, venus.ra), 64.352, epsilon = 1e-3);

        let horizontal = equatorial_to_horizontal(&venus, &observer, gast);
        assert_abs_diff_eq!(horizontal.azimuth, 248.0336, epsilon = 1e-3);
        assert_abs_diff_eq!(horizontal.altitude, 15.1249, epsilon = 1e-3);
    }

    #[test]
    fn test_unknown_observer_gives_undefined() {
        let eq = EquatorialCoordinates::new(5.0, 20.0);
        let horizontal = equatorial_to_horizontal(&eq, &ObserverLocation::unknown(), 3.0);
        assert!(horizontal.azimuth.is_nan());
        assert!(horizontal.altitude.is_nan());
    }

    #[test]
    fn test_object_on_meridian() {
        // Transiting object due south at altitude 90 − φ + δ
        let observer = ObserverLocation::new(40.0, 0.0).unwrap();
        let eq = EquatorialCoordinates::new(6.0, 10.0);
        let horizontal = equatorial_to_horizontal(&eq, &observer, 6.0);
        assert_abs_diff_eq!(horizontal.azimuth, 180.0, epsilon = 1e-9);
        assert_abs_diff_eq!(horizontal.altitude, 60.0, epsilon = 1e-9);
    }

    #[test]
    fn test_west_longitude_puts_object_east_of_meridian() {
        // 30° W: local sidereal time 4h, so an object at 6h has not yet transited
        let observer = ObserverLocation::new(40.0, 30.0).unwrap();
        let eq = EquatorialCoordinates::new(6.0, 10.0);
        let horizontal = equatorial_to_horizontal(&eq, &observer, 6.0);
        assert_abs_diff_eq!(horizontal.azimuth, 130.137_33, epsilon = 1e-4);
        assert_abs_diff_eq!(horizontal.altitude, 49.902_91, epsilon = 1e-4);

        // 30° E mirrors it about the meridian
        let observer = ObserverLocation::new(40.0, -30.0).unwrap();
        let mirrored = equatorial_to_horizontal(&eq, &observer, 6.0);
        assert_abs_diff_eq!(mirrored.azimuth, 360.0 - horizontal.azimuth, epsilon = 1e-9);
        assert_abs_diff_eq!(mirrored.altitude, horizontal.altitude, epsilon = 1e-9);
    }

    #[test]
    fn test_horizontal_ranges() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..500 {
            let observer =
                ObserverLocation::new(rng.gen_range(-89.0..89.0), rng.gen_range(-180.0..180.0))
                    .unwrap();
            let eq = EquatorialCoordinates::new(rng.gen_range(0.0..24.0), rng.gen_range(-89.0..89.0));
            let horizontal = equatorial_to_horizontal(&eq, &observer, rng.gen_range(0.0..24.0));
            assert!((0.0..360.0).contains(&horizontal.azimuth));
            assert!((-90.0..=90.0).contains(&horizontal.altitude));
        }
    }
}
