//! Planetary ephemeris calculations module
//!
//! [`Body`] selects what to compute. Heliocentric positions come from the
//! truncated VSOP87 series in [`vsop87`]; [`elements`] holds the coarser
//! mean orbital elements and [`kepler`] the equation solver they need.

pub mod elements;
pub mod kepler;
pub mod vsop87;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for planetary calculations
#[derive(Debug, Error)]
pub enum PlanetError {
    #[error("Planet not found: {0}")]
    NotFound(String),
}

/// Enum representing the major solar system bodies
///
/// `Moon` and `Pluto` are recognised names but the engine has no model for
/// them; every position computed for them is undefined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Body {
    Sun,
    Mercury,
    Venus,
    Earth,
    Moon,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
}

impl Body {
    /// Every body the selector knows about
    pub const ALL: [Body; 11] = [
        Body::Sun,
        Body::Mercury,
        Body::Venus,
        Body::Earth,
        Body::Moon,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
        Body::Pluto,
    ];

    /// The bodies the engine can place
    pub const SUPPORTED: [Body; 9] = [
        Body::Sun,
        Body::Mercury,
        Body::Venus,
        Body::Earth,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
    ];

    /// Get the body's name as a string
    pub fn name(&self) -> &'static str {
        match self {
            Body::Sun => "Sun",
            Body::Mercury => "Mercury",
            Body::Venus => "Venus",
            Body::Earth => "Earth",
            Body::Moon => "Moon",
            Body::Mars => "Mars",
            Body::Jupiter => "Jupiter",
            Body::Saturn => "Saturn",
            Body::Uranus => "Uranus",
            Body::Neptune => "Neptune",
            Body::Pluto => "Pluto",
        }
    }

    pub fn is_supported(&self) -> bool {
        !matches!(self, Body::Moon | Body::Pluto)
    }

    /// True for the eight planets, which carry series and orbital elements
    pub fn is_planet(&self) -> bool {
        self.is_supported() && *self != Body::Sun
    }

    /// Apparent angular diameter at a distance of 1 AU, arcseconds.
    ///
    /// Undefined for the Earth and for unsupported bodies.
    pub fn diameter_at_one_au(&self) -> f64 {
        match self {
            Body::Sun => 1919.26,
            Body::Mercury => 6.728,
            Body::Venus => 16.688,
            Body::Mars => 9.364,
            Body::Jupiter => 197.146,
            Body::Saturn => 166.197,
            Body::Uranus => 70.476,
            Body::Neptune => 68.285,
            Body::Earth | Body::Moon | Body::Pluto => f64::NAN,
        }
    }

    /// Apparent angular diameter in arcminutes at `distance` AU
    pub fn apparent_diameter(&self, distance: f64) -> f64 {
        self.diameter_at_one_au() / distance / 60.0
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Body {
    type Err = PlanetError;

    /// Case-insensitive lookup by name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Body::ALL
            .iter()
            .copied()
            .find(|body| body.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| PlanetError::NotFound(s.to_string()))
    }
}
