// src/validation/mod.rs

//! Checks applied to register amplitudes after every gate.

use crate::core::{BellError, Result};
use num_complex::Complex;

/// Sum of squared magnitudes of `amplitudes`.
pub fn norm_sqr(amplitudes: &[Complex<f64>]) -> f64 {
    amplitudes.iter().map(|c| c.norm_sqr()).sum()
}

/// Checks that the amplitudes are normalized (sum of |c_i|² ≈ 1.0).
///
/// # Arguments
/// * `amplitudes` - The amplitudes to check.
/// * `tolerance` - Allowed deviation from 1.0 (e.g., 1e-9).
///
/// # Returns
/// * `Ok(())` if normalized within tolerance.
/// * `Err(BellError::Normalization)` otherwise. Non-finite amplitudes always fail.
pub fn check_normalization(amplitudes: &[Complex<f64>], tolerance: f64) -> Result<()> {
    let norm_sq = norm_sqr(amplitudes);
    if !norm_sq.is_finite() || (norm_sq - 1.0).abs() > tolerance {
        Err(BellError::Normalization {
            message: format!(
                "State vector normalization failed. Sum(|c_i|^2) = {} (Deviation > {})",
                norm_sq, tolerance
            ),
        })
    } else {
        Ok(())
    }
}

/// Checks that a probability lies in [0, 1] within `tolerance`.
pub fn check_probability(value: f64, tolerance: f64) -> Result<()> {
    if value.is_finite() && value >= -tolerance && value <= 1.0 + tolerance {
        Ok(())
    } else {
        Err(BellError::Normalization {
            message: format!("probability {} lies outside [0, 1]", value),
        })
    }
}
