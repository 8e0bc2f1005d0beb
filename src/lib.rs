//! Solarfield: closed-form positions of the Sun and planets
//!
//! This crate computes apparent equatorial, ecliptic and horizontal
//! coordinates of the Sun and the eight major planets from truncated VSOP87
//! series, without any external ephemeris files. Light time, aberration and
//! nutation are applied; sidereal time links the sky to an observer on Earth.
//!
//! ```rust
//! use solarfield::{Body, CivilDateTime, Ephemeris};
//!
//! let mut ephemeris = Ephemeris::new();
//! let noon = CivilDateTime::new(2000, 1, 1, 12, 0, 0.0).unwrap();
//!
//! let sun = ephemeris.solar_system_object_at(Body::Sun, &noon);
//! assert!((sun.equatorial.ra - 18.75).abs() < 0.05);
//! assert!(!sun.has_horizontal());
//!
//! ephemeris.set_location_on_earth(51.4779, 0.0015).unwrap();
//! let sun = ephemeris.solar_system_object_at(Body::Sun, &noon);
//! assert!(sun.horizontal.altitude > 0.0);
//! ```
//!
//! Undefined results are NaN fields; every result type has an `is_valid()`
//! predicate. Errors are only raised at input boundaries (parsing names,
//! building dates and observer locations, loading settings).

use thiserror::Error;

pub mod constants;
pub mod coordinates;
pub mod earthlib;
pub mod framelib;
pub mod nutationlib;
pub mod planetlib;
pub mod positions;
pub mod settings;
pub mod time;

// Re-export commonly used types
pub use coordinates::angle::Sexagesimal;
pub use coordinates::{
    EquatorialCoordinates, GeocentricCoordinates, HeliocentricCoordinates, HorizontalCoordinates,
    RectangularCoordinates,
};
pub use earthlib::{LocationError, ObserverLocation};
pub use planetlib::elements::OrbitalElements;
pub use planetlib::{Body, PlanetError};
pub use positions::{GeocentricPosition, SolarSystemObject};
pub use settings::{EphemerisSettings, SettingsError};
pub use time::{CivilDateTime, JulianDay, TimeError};

/// Main error type for the solarfield library
#[derive(Debug, Error)]
pub enum SolarfieldError {
    #[error("Planet error: {0}")]
    Planet(#[from] PlanetError),

    #[error("Time error: {0}")]
    Time(#[from] TimeError),

    #[error("Location error: {0}")]
    Location(#[from] LocationError),

    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),
}

/// Result type for solarfield operations
pub type Result<T> = std::result::Result<T, SolarfieldError>;

/// Observer location and solver settings bundled for repeated queries.
///
/// Setters take `&mut self`; share an `Ephemeris` across threads only behind
/// your own synchronization.
#[derive(Debug, Clone, Default)]
pub struct Ephemeris {
    observer: ObserverLocation,
    settings: EphemerisSettings,
}

impl Ephemeris {
    /// No observer location and default settings
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(mut self, settings: EphemerisSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Load settings from a JSON document, see [`EphemerisSettings::from_json_str`]
    pub fn with_settings_json(self, json: &str) -> Result<Self> {
        Ok(self.with_settings(EphemerisSettings::from_json_str(json)?))
    }

    /// Set the observer from decimal degrees, longitude west-positive
    pub fn set_location_on_earth(&mut self, latitude: f64, longitude: f64) -> Result<()> {
        self.observer = ObserverLocation::new(latitude, longitude)?;
        Ok(())
    }

    /// Set the observer from degrees, minutes and seconds
    pub fn set_location_on_earth_dms(
        &mut self,
        latitude: Sexagesimal,
        longitude: Sexagesimal,
    ) -> Result<()> {
        self.observer = ObserverLocation::from_dms(latitude, longitude)?;
        Ok(())
    }

    /// Forget the observer location
    pub fn clear_location(&mut self) {
        self.observer = ObserverLocation::unknown();
    }

    pub fn observer(&self) -> &ObserverLocation {
        &self.observer
    }

    pub fn settings(&self) -> &EphemerisSettings {
        &self.settings
    }

    /// Apparent position of `body` at a Julian Day
    pub fn solar_system_object(&self, body: Body, jd: &JulianDay) -> SolarSystemObject {
        positions::solar_system_object(body, jd, &self.observer, &self.settings)
    }

    /// Apparent position of `body` at a civil date and time (UT)
    pub fn solar_system_object_at(&self, body: Body, when: &CivilDateTime) -> SolarSystemObject {
        self.solar_system_object(body, &when.to_julian_day())
    }

    /// Apparent position of a body given by name
    pub fn solar_system_object_named(&self, name: &str, jd: &JulianDay) -> Result<SolarSystemObject> {
        let body: Body = name.parse()?;
        Ok(self.solar_system_object(body, jd))
    }

    /// Geocentric position after light time and aberration
    pub fn geocentric_position(&self, body: Body, jd: &JulianDay) -> GeocentricPosition {
        positions::geocentric_position(body, jd, &self.settings)
    }

    /// Heliocentric ecliptic coordinates from the series
    pub fn heliocentric_coordinates(&self, body: Body, jd: &JulianDay) -> HeliocentricCoordinates {
        planetlib::vsop87::heliocentric_coordinates(body, jd.centuries_since_j2000())
    }

    /// Mean orbital elements
    pub fn orbital_elements(&self, body: Body, jd: &JulianDay) -> OrbitalElements {
        OrbitalElements::for_body(body, jd.centuries_since_j2000())
    }

    /// Local apparent sidereal time at the observer, hours. Undefined without
    /// an observer location.
    pub fn local_sidereal_time(&self, jd: &JulianDay) -> f64 {
        time::sidereal::local_sidereal_time(
            time::sidereal::apparent_sidereal_time(jd),
            self.observer.longitude,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_location_setters() {
        let mut ephemeris = Ephemeris::new();
        assert!(!ephemeris.observer().is_known());

        ephemeris.set_location_on_earth(45.0, 7.5).unwrap();
        assert!(ephemeris.observer().is_known());

        ephemeris
            .set_location_on_earth_dms(Sexagesimal::new(-33, 52, 7.7), Sexagesimal::new(-151, 12, 33.5))
            .unwrap();
        assert_abs_diff_eq!(ephemeris.observer().latitude, -33.868_806, epsilon = 1e-6);

        ephemeris.clear_location();
        assert!(!ephemeris.observer().is_known());
    }

    #[test]
    fn test_rejected_location_keeps_previous() {
        let mut ephemeris = Ephemeris::new();
        ephemeris.set_location_on_earth(10.0, 20.0).unwrap();
        let err = ephemeris.set_location_on_earth(100.0, 20.0).unwrap_err();
        assert!(matches!(err, SolarfieldError::Location(LocationError::InvalidLatitude(_))));
        assert_eq!(ephemeris.observer().latitude, 10.0);
    }

    #[test]
    fn test_named_lookup() {
        let ephemeris = Ephemeris::new();
        let jd = JulianDay::j2000();
        assert!(ephemeris.solar_system_object_named("mars", &jd).unwrap().is_valid());
        assert!(matches!(
            ephemeris.solar_system_object_named("Ceres", &jd),
            Err(SolarfieldError::Planet(PlanetError::NotFound(_)))
        ));
    }

    #[test]
    fn test_settings_json() {
        let ephemeris = Ephemeris::new()
            .with_settings_json(r#"{"light_time_max_iterations": 3}"#)
            .unwrap();
        assert_eq!(ephemeris.settings().light_time_max_iterations, 3);
        assert!(matches!(
            Ephemeris::new().with_settings_json(r#"{"kepler_tolerance": 0}"#),
            Err(SolarfieldError::Settings(_))
        ));
    }

    #[test]
    fn test_local_sidereal_time_needs_observer() {
        let mut ephemeris = Ephemeris::new();
        let jd = JulianDay::j2000();
        assert!(ephemeris.local_sidereal_time(&jd).is_nan());
        ephemeris.set_location_on_earth(0.0, 0.0).unwrap();
        let gast = time::sidereal::apparent_sidereal_time(&jd);
        assert_abs_diff_eq!(ephemeris.local_sidereal_time(&jd), gast, epsilon = 1e-12);

        ephemeris.set_location_on_earth(0.0, 15.0).unwrap();
        assert_abs_diff_eq!(
            ephemeris.local_sidereal_time(&jd),
            (gast - 1.0).rem_euclid(24.0),
            epsilon = 1e-12
        );
    }
}
