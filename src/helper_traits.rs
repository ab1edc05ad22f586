use ndarray::Array1;
use num::complex::Complex64;

use crate::sweep::AngleSweep;

// A complex far-field response defined over observation angle (degrees off broadside).
pub trait AngularResponse {
    fn response(&self, theta_deg: f64) -> Complex64;

    fn response_many(&self, sweep: &AngleSweep) -> Array1<Complex64> {
        sweep.iter().map(|theta| self.response(theta)).collect()
    }
}
