//! Kepler's equation `M = E − e·sin E`
//!
//! Newton iteration starting from `E₀ = M`. Angles cross the public API in
//! degrees; the iteration itself runs in radians.

use log::{trace, warn};

use crate::coordinates::angle::{degrees_to_radians, normalize_degrees, radians_to_degrees};
use crate::settings::EphemerisSettings;

/// Outcome of one solve
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeplerSolution {
    /// Eccentric anomaly E in degrees, not normalized
    pub eccentric_anomaly: f64,
    pub iterations: usize,
    /// False when the iteration cap was reached before the tolerance
    pub converged: bool,
}

/// Solve for the eccentric anomaly with explicit controls.
///
/// Stops when a Newton step is smaller than `settings.kepler_tolerance`
/// radians or after `settings.kepler_max_iterations` steps, returning the
/// last estimate either way.
pub fn solve_kepler(
    mean_anomaly: f64,
    eccentricity: f64,
    settings: &EphemerisSettings,
) -> KeplerSolution {
    let m = degrees_to_radians(mean_anomaly);
    let mut e_anomaly = m;
    let mut iterations = 0;
    let mut converged = false;

    while iterations < settings.kepler_max_iterations {
        let step = (m + eccentricity * e_anomaly.sin() - e_anomaly)
            / (1.0 - eccentricity * e_anomaly.cos());
        e_anomaly += step;
        iterations += 1;
        trace!("kepler iteration {iterations}: E = {e_anomaly}, step = {step:e}");

        if step.abs() < settings.kepler_tolerance {
            converged = true;
            break;
        }
        if !step.is_finite() {
            break;
        }
    }

    if !converged && e_anomaly.is_finite() {
        warn!(
            "Kepler solver stopped after {iterations} iterations (M = {mean_anomaly}°, e = {eccentricity})"
        );
    }

    KeplerSolution {
        eccentric_anomaly: radians_to_degrees(e_anomaly),
        iterations,
        converged,
    }
}

/// Eccentric anomaly in degrees with default solver settings
pub fn eccentric_anomaly(mean_anomaly: f64, eccentricity: f64) -> f64 {
    solve_kepler(mean_anomaly, eccentricity, &EphemerisSettings::default()).eccentric_anomaly
}

/// True anomaly in degrees `[0, 360)` from the eccentric anomaly in degrees
pub fn true_anomaly(eccentric_anomaly: f64, eccentricity: f64) -> f64 {
    let half = degrees_to_radians(eccentric_anomaly) / 2.0;
    let v = 2.0
        * ((1.0 + eccentricity).sqrt() * half.sin()).atan2((1.0 - eccentricity).sqrt() * half.cos());
    normalize_degrees(radians_to_degrees(v))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coordinates::angle::sin_deg;
    use approx::assert_abs_diff_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn residual(mean_anomaly: f64, eccentricity: f64, e_anomaly: f64) -> f64 {
        let m = e_anomaly - radians_to_degrees(eccentricity * sin_deg(e_anomaly));
        let diff = normalize_degrees(m - mean_anomaly);
        diff.min(360.0 - diff)
    }

    #[test]
    fn test_circular_orbit_is_identity() {
        let solution = solve_kepler(123.0, 0.0, &EphemerisSettings::default());
        assert!(solution.converged);
        assert_abs_diff_eq!(solution.eccentric_anomaly, 123.0, epsilon = 1e-10);
    }

    #[test]
    fn test_reference_value() {
        // M = 5°, e = 0.1 gives E = 5.554589°
        assert_abs_diff_eq!(eccentric_anomaly(5.0, 0.1), 5.554_589, epsilon = 1e-6);
    }

    #[test]
    fn test_converges_over_grid() {
        let settings = EphemerisSettings::default();
        for step in 0..10 {
            let e = step as f64 * 0.1;
            for m in (0..360).step_by(10) {
                let m = m as f64;
                let solution = solve_kepler(m, e, &settings);
                assert!(solution.iterations <= settings.kepler_max_iterations);
                assert!(
                    residual(m, e, solution.eccentric_anomaly) < 1e-4,
                    "M = {m}, e = {e}"
                );
            }
        }
    }

    #[test]
    fn test_random_inputs_converge() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..500 {
            let m = rng.gen_range(0.0..360.0);
            let e = rng.gen_range(0.0..0.9);
            let solution = solve_kepler(m, e, &EphemerisSettings::default());
            assert!(solution.converged);
            assert!(residual(m, e, solution.eccentric_anomaly) < 1e-8);
        }
    }

    #[test]
    fn test_cap_is_respected() {
        let settings = EphemerisSettings {
            kepler_max_iterations: 1,
            ..Default::default()
        };
        let solution = solve_kepler(10.0, 0.9, &settings);
        assert_eq!(solution.iterations, 1);
        assert!(!solution.converged);
        assert!(solution.eccentric_anomaly.is_finite());
    }

    #[test]
    fn test_nan_input_terminates() {
        let solution = solve_kepler(f64::NAN, 0.5, &EphemerisSettings::default());
        assert!(solution.eccentric_anomaly.is_nan());
        assert!(!solution.converged);
    }

    #[test]
    fn test_true_anomaly() {
        assert_abs_diff_eq!(true_anomaly(90.0, 0.0), 90.0, epsilon = 1e-10);
        assert_abs_diff_eq!(true_anomaly(180.0, 0.5), 180.0, epsilon = 1e-10);
        // Perihelion side runs ahead of the eccentric anomaly
        assert!(true_anomaly(30.0, 0.3) > 30.0);
    }
}
