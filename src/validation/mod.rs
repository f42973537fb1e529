// src/validation/mod.rs

//! Invariant checks on [`StateVector`]s.

use crate::core::{NORM_TOLERANCE, QuantumError, Result, StateVector};
use tracing::warn;

/// Checks that `sum |c_i|^2` is within `tolerance` of 1.0 (default 1e-9).
///
/// # Returns
/// * `Ok(())` if normalized within tolerance.
/// * `Err(QuantumError::NormDrift)` otherwise.
pub fn check_normalization(state: &StateVector, tolerance: Option<f64>) -> Result<()> {
    let tolerance = tolerance.unwrap_or(NORM_TOLERANCE);
    let norm_sqr = state.norm_sqr();
    if (norm_sqr - 1.0).abs() > tolerance {
        Err(QuantumError::NormDrift { norm_sqr, tolerance })
    } else {
        Ok(())
    }
}

/// Checks that every amplitude is finite and the state is normalized.
pub fn validate_state(state: &StateVector, norm_tolerance: Option<f64>) -> Result<()> {
    let tolerance = norm_tolerance.unwrap_or(NORM_TOLERANCE);
    if let Some(index) = state.amplitudes().iter().position(|c| !c.re.is_finite() || !c.im.is_finite()) {
        warn!(index, "non-finite amplitude in state vector");
        return Err(QuantumError::NormDrift { norm_sqr: f64::NAN, tolerance });
    }
    check_normalization(state, Some(tolerance))
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex;

    #[test]
    fn accepts_normalized_state() -> Result<()> {
        let state = StateVector::from_amplitudes(vec![Complex::new(0.6, 0.0), Complex::new(0.0, 0.8)])?;
        check_normalization(&state, None)?;
        validate_state(&state, None)
    }

    #[test]
    fn reports_drift() -> Result<()> {
        let state = StateVector::from_amplitudes(vec![Complex::new(0.6, 0.0), Complex::new(0.6, 0.0)])?;
        assert!(matches!(check_normalization(&state, None), Err(QuantumError::NormDrift { .. })));
        // A loose tolerance accepts it.
        check_normalization(&state, Some(0.5))
    }

    #[test]
    fn rejects_non_finite_amplitudes() -> Result<()> {
        let state = StateVector::from_amplitudes(vec![Complex::new(f64::NAN, 0.0), Complex::new(0.0, 0.0)])?;
        assert!(validate_state(&state, None).is_err());
        Ok(())
    }
}
