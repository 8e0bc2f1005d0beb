//! Nutation and obliquity of the ecliptic
//!
//! A low-accuracy nutation series (about 0.5" in longitude and 0.1" in
//! obliquity) driven by five fundamental arguments: the mean longitudes of
//! the Sun and Moon, their mean anomalies and the longitude of the Moon's
//! ascending node. The series has thirteen terms in longitude and nine in
//! obliquity.

use serde::{Deserialize, Serialize};

use crate::constants::ASEC_PER_DEG;
use crate::coordinates::angle::{cos_deg, normalize_degrees, sin_deg};

/// Mean obliquity polynomial in arcseconds, lowest power of T first
const MEAN_OBLIQUITY_ASEC: [f64; 4] = [84_381.448, -46.8150, -0.000_59, 0.001_813];

/// Nutation series terms.
///
/// Each row: `[nLs, nLm, nMs, nMm, nΩ, S, S', C, C']`, giving
/// `Δψ += (S + S'·T)·sin(arg)` and `Δε += (C + C'·T)·cos(arg)` in arcseconds
/// with `arg = nLs·Ls + nLm·Lm + nMs·Ms + nMm·Mm + nΩ·Ω`.
#[rustfmt::skip]
static NUTATION_TERMS: [[f64; 9]; 13] = [
    // nLs  nLm  nMs  nMm   nΩ        S        S'       C        C'
    [  0.0, 0.0, 0.0, 0.0,  1.0, -17.1996, -0.01742, 9.2025,  0.00089],
    [  2.0, 0.0, 0.0, 0.0,  0.0,  -1.3187, -0.00016, 0.5736, -0.00031],
    [  0.0, 2.0, 0.0, 0.0,  0.0,  -0.2274,  0.0,     0.0977,  0.0],
    [  0.0, 0.0, 0.0, 0.0,  2.0,   0.2062,  0.0,    -0.0895,  0.0],
    [  0.0, 0.0, 1.0, 0.0,  0.0,   0.1426, -0.00034, 0.0,     0.0],
    [  0.0, 0.0, 0.0, 1.0,  0.0,   0.0712,  0.0,     0.0,     0.0],
    [  2.0, 0.0, 1.0, 0.0,  0.0,  -0.0517,  0.00012, 0.0224,  0.0],
    [  0.0, 2.0, 0.0, 0.0, -1.0,  -0.0386,  0.0,     0.0200,  0.0],
    [  0.0, 2.0, 0.0, 1.0,  0.0,  -0.0301,  0.0,     0.0129,  0.0],
    [  2.0, 0.0,-1.0, 0.0,  0.0,   0.0217,  0.0,    -0.0095,  0.0],
    [  2.0,-2.0, 0.0, 1.0,  0.0,  -0.0158,  0.0,     0.0,     0.0],
    [  2.0, 0.0, 0.0, 0.0, -1.0,   0.0129,  0.0,    -0.0070,  0.0],
    [  0.0, 2.0, 0.0,-1.0,  0.0,   0.0123,  0.0,     0.0,     0.0],
];

/// The five fundamental arguments in degrees, normalized.
///
/// Returns `[Ls, Lm, Ms, Mm, Ω]`.
pub fn fundamental_arguments(t: f64) -> [f64; 5] {
    let t2 = t * t;
    [
        normalize_degrees(280.4565 + 36_000.7698 * t + 0.000_303 * t2),
        normalize_degrees(218.3164 + 481_267.8812 * t - 0.001_599 * t2),
        normalize_degrees(357.5291 + 35_999.0503 * t - 0.000_154 * t2),
        normalize_degrees(134.9634 + 477_198.8675 * t + 0.008_721 * t2),
        normalize_degrees(125.0443 - 1_934.1363 * t + 0.002_070_8 * t2),
    ]
}

/// Nutation in longitude and obliquity, arcseconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Nutation {
    /// Δψ
    pub longitude: f64,
    /// Δε
    pub obliquity: f64,
}

/// Nutation in longitude and obliquity at `t` Julian centuries from J2000.0
pub fn nutation(t: f64) -> Nutation {
    let args = fundamental_arguments(t);

    let mut longitude = 0.0;
    let mut obliquity = 0.0;
    for row in NUTATION_TERMS.iter() {
        let arg: f64 = row[..5].iter().zip(args.iter()).map(|(n, a)| n * a).sum();
        longitude += (row[5] + row[6] * t) * sin_deg(arg);
        obliquity += (row[7] + row[8] * t) * cos_deg(arg);
    }

    Nutation {
        longitude,
        obliquity,
    }
}

/// Mean obliquity of the ecliptic ε₀ in degrees
pub fn mean_obliquity(t: f64) -> f64 {
    let asec = MEAN_OBLIQUITY_ASEC
        .iter()
        .rev()
        .fold(0.0, |acc, coefficient| acc * t + coefficient);
    asec / ASEC_PER_DEG
}

/// Obliquity of the ecliptic together with the nutation it includes
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObliquityNutation {
    /// Mean obliquity ε₀, degrees
    pub mean_obliquity: f64,
    /// True obliquity ε = ε₀ + Δε, degrees
    pub obliquity: f64,
    pub nutation: Nutation,
}

impl ObliquityNutation {
    /// Nutation in longitude converted to degrees
    pub fn delta_psi_degrees(&self) -> f64 {
        self.nutation.longitude / ASEC_PER_DEG
    }
}

/// True obliquity and nutation at `t` Julian centuries from J2000.0
pub fn obliquity_and_nutation(t: f64) -> ObliquityNutation {
    let nutation = nutation(t);
    let mean_obliquity = mean_obliquity(t);
    ObliquityNutation {
        mean_obliquity,
        obliquity: mean_obliquity + nutation.obliquity / ASEC_PER_DEG,
        nutation,
    }
}
