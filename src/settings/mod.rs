//! Iteration tolerances and caps for the numeric solvers
//!
//! Both iterative parts of the engine (the Kepler solver and the light-time
//! loop) stop on an explicit tolerance and never run past a hard cap. The
//! defaults suit `f64`; a JSON document may override any subset of them.
//!
//! ```rust
//! use solarfield::settings::EphemerisSettings;
//!
//! let settings = EphemerisSettings::from_json_str(r#"{ "light_time_max_iterations": 4 }"#).unwrap();
//! assert_eq!(settings.light_time_max_iterations, 4);
//! assert_eq!(settings.kepler_max_iterations, 10);
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for loading settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid value for {name}: {reason}")]
    InvalidValue { name: &'static str, reason: String },
}

/// Numeric controls shared by every position computation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EphemerisSettings {
    /// Stop the Kepler solver once a Newton step is below this, radians
    pub kepler_tolerance: f64,
    pub kepler_max_iterations: usize,
    /// Stop the light-time loop once the retarded epoch moves less than
    /// this many days between iterations
    pub light_time_tolerance_days: f64,
    pub light_time_max_iterations: usize,
}

impl Default for EphemerisSettings {
    fn default() -> Self {
        Self {
            kepler_tolerance: 1e-12,
            kepler_max_iterations: 10,
            light_time_tolerance_days: 1e-9,
            light_time_max_iterations: 10,
        }
    }
}

impl EphemerisSettings {
    /// Load settings from JSON; missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check that tolerances are positive and caps allow at least one step
    pub fn validate(&self) -> Result<(), SettingsError> {
        check_tolerance("kepler_tolerance", self.kepler_tolerance)?;
        check_tolerance("light_time_tolerance_days", self.light_time_tolerance_days)?;
        check_cap("kepler_max_iterations", self.kepler_max_iterations)?;
        check_cap("light_time_max_iterations", self.light_time_max_iterations)?;
        Ok(())
    }
}

fn check_tolerance(name: &'static str, value: f64) -> Result<(), SettingsError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SettingsError::InvalidValue {
            name,
            reason: format!("{value} is not a positive tolerance"),
        })
    }
}

fn check_cap(name: &'static str, value: usize) -> Result<(), SettingsError> {
    if value > 0 {
        Ok(())
    } else {
        Err(SettingsError::InvalidValue {
            name,
            reason: "at least one iteration is required".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(EphemerisSettings::default().validate().is_ok());
    }

    #[test]
    fn test_empty_json_gives_defaults() {
        let settings = EphemerisSettings::from_json_str("{}").unwrap();
        assert_eq!(settings, EphemerisSettings::default());
    }

    #[test]
    fn test_partial_override() {
        let settings =
            EphemerisSettings::from_json_str(r#"{"kepler_tolerance": 1e-8, "kepler_max_iterations": 20}"#)
                .unwrap();
        assert_eq!(settings.kepler_tolerance, 1e-8);
        assert_eq!(settings.kepler_max_iterations, 20);
        assert_eq!(settings.light_time_max_iterations, 10);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            EphemerisSettings::from_json_str(r#"{"kepler_tolerance": -1.0}"#),
            Err(SettingsError::InvalidValue { name: "kepler_tolerance", .. })
        ));
        assert!(matches!(
            EphemerisSettings::from_json_str(r#"{"light_time_max_iterations": 0}"#),
            Err(SettingsError::InvalidValue { .. })
        ));
        assert!(matches!(
            EphemerisSettings::from_json_str("not json"),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn test_round_trip_json() {
        let settings = EphemerisSettings {
            light_time_tolerance_days: 1e-6,
            ..Default::default()
        };
        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(EphemerisSettings::from_json_str(&json).unwrap(), settings);
    }
}
