//! Least-squares fit of AoA error against SNR.
//!
//! The model y = a/√x + b is linear in its coefficients, so the fit is the
//! closed-form solution of the 2×2 normal equations.

use nalgebra::{Matrix2, Vector2};
use tracing::debug;

use crate::error::{BeamError, Result};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InverseSqrtFit {
    pub a: f64,
    pub b: f64,
}

impl InverseSqrtFit {
    pub fn evaluate(&self, x: f64) -> f64 {
        self.a / x.sqrt() + self.b
    }
}

pub fn fit_inverse_sqrt(x: &[f64], y: &[f64]) -> Result<InverseSqrtFit> {
    if x.len() != y.len() {
        return Err(BeamError::FitLengthMismatch {
            x: x.len(),
            y: y.len(),
        });
    }
    if x.len() < 2 {
        return Err(BeamError::TooFewFitPoints(x.len()));
    }
    if let Some(&bad) = x.iter().find(|x| !(**x > 0.)) {
        return Err(BeamError::NonPositiveFitAbscissa(bad));
    }

    // Design matrix columns are 1/√x and 1
    let mut normal = Matrix2::<f64>::zeros();
    let mut rhs = Vector2::<f64>::zeros();
    for (&xi, &yi) in x.iter().zip(y) {
        let row = Vector2::new(1. / xi.sqrt(), 1.);
        normal += row * row.transpose();
        rhs += row * yi;
    }

    let solution = normal.lu().solve(&rhs).ok_or(BeamError::SingularFit)?;
    if !solution.iter().all(|c| c.is_finite()) {
        return Err(BeamError::SingularFit);
    }

    let fit = InverseSqrtFit {
        a: solution[0],
        b: solution[1],
    };
    debug!(a = fit.a, b = fit.b, points = x.len(), "fitted a/sqrt(x) + b");

    Ok(fit)
}

/// SNR points (dB) of the reference measurement.
pub fn reference_snr_db() -> Vec<f64> {
    (0..10).map(|n| 10. + 50. * n as f64 / 9.).collect()
}

/// Measured AoA error (degrees) at each of `reference_snr_db`.
pub fn reference_error_deg() -> Vec<f64> {
    vec![
        0.01, 0.008, 0.007, 0.0065, 0.006, 0.0058, 0.0055, 0.0052, 0.005, 0.0048,
    ]
}
