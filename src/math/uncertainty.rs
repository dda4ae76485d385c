//! Balance uncertainty arithmetic.
//!
//! A digital balance with scale division `d` quantizes every reading, adding
//! a uniform-distribution uncertainty of half-width `d/2`, i.e. a standard
//! uncertainty of `d / sqrt(12)`. Repeatability and quantization combine in
//! quadrature.

use crate::error::{AppError, EXIT_MIN_MASS_USAGE};

/// Repeatability combined with the resolution quantization term.
///
/// Returns `s` unchanged when resolution is excluded or `d` is absent.
pub fn effective_repeatability(s: f64, d: Option<f64>, include_resolution: bool) -> f64 {
    match d {
        Some(d) if include_resolution => s.hypot(d / 12.0_f64.sqrt()),
        _ => s,
    }
}

/// Combined balance standard uncertainty `sqrt(s^2 + (d/sqrt(12))^2)` (g).
pub fn balance_uncertainty(s: f64, d: f64) -> f64 {
    s.hypot(d / 12.0_f64.sqrt())
}

/// Minimum test mass `k * s_eff / r_rel` (g).
///
/// The quotient is undefined for a non-positive `r_rel`, and a non-positive
/// coverage factor has no metrological meaning; both are rejected.
pub fn minimum_mass(
    s: f64,
    d: Option<f64>,
    r_rel: f64,
    k: f64,
    include_resolution: bool,
) -> Result<f64, AppError> {
    if !(r_rel.is_finite() && r_rel > 0.0) {
        return Err(AppError::new(
            EXIT_MIN_MASS_USAGE,
            "Target relative uncertainty must be a positive number.",
        ));
    }
    if !(k.is_finite() && k > 0.0) {
        return Err(AppError::new(
            EXIT_MIN_MASS_USAGE,
            "Coverage factor must be a positive number.",
        ));
    }
    Ok(k * effective_repeatability(s, d, include_resolution) / r_rel)
}

/// Standard uncertainty (g) of a weight with the given MPE (mg), assuming a
/// rectangular distribution over the tolerance band.
pub fn rectangular_std_g(mpe_mg: f64) -> f64 {
    mpe_mg / 1000.0 / 3.0_f64.sqrt()
}
