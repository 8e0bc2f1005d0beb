//! Observer location on the Earth's surface
//!
//! Horizontal coordinates need to know where the observer stands. The
//! location is a plain value handed to every call that needs it; until one is
//! set, [`ObserverLocation::unknown`] makes those calls return undefined
//! azimuth and altitude.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::coordinates::angle::Sexagesimal;

/// Error type for building an observer location
#[derive(Debug, Error, PartialEq)]
pub enum LocationError {
    #[error("Latitude {0}° is outside [-90, 90]")]
    InvalidLatitude(f64),

    #[error("Longitude {0}° is outside [-180, 180]")]
    InvalidLongitude(f64),
}

/// Geodetic latitude and longitude in decimal degrees.
///
/// Longitude is positive west of Greenwich, negative to the east.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObserverLocation {
    pub latitude: f64,
    pub longitude: f64,
}

impl Default for ObserverLocation {
    fn default() -> Self {
        Self::unknown()
    }
}

impl ObserverLocation {
    /// The unset location
    pub fn unknown() -> Self {
        Self {
            latitude: f64::NAN,
            longitude: f64::NAN,
        }
    }

    /// Location from decimal degrees, latitude north and longitude west
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, LocationError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(LocationError::InvalidLatitude(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(LocationError::InvalidLongitude(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Location from degrees, minutes and seconds
    pub fn from_dms(latitude: Sexagesimal, longitude: Sexagesimal) -> Result<Self, LocationError> {
        Self::new(latitude.to_decimal(), longitude.to_decimal())
    }

    pub fn is_known(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }
}
