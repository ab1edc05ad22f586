use std::f64::consts::PI;

use ndarray::Array1;
use num::complex::Complex64;

pub fn wavelength(speed_of_light: f64, f: f64) -> f64 {
    speed_of_light / f
}

// Field quantities, so 20 log10 rather than the 10 log10 used for power.
pub fn amplitude_decibels(x: f64) -> f64 {
    20. * x.log10()
}

pub fn amplitude_decibels_or_else(x: f64, or: f64) -> f64 {
    if x <= 0. || !x.is_finite() {
        or
    } else {
        amplitude_decibels(x)
    }
}

pub fn db_to_linear(x: f64) -> f64 {
    10f64.powf(x / 10.)
}

// Same as taking the argument of exp(i x), folded into (-π, π].
pub fn wrap_phase(x: f64) -> f64 {
    let wrapped = Complex64::from_polar(1., x).arg();
    // atan2 returns -π when the imaginary part rounds to -0
    if wrapped <= -PI {
        PI
    } else {
        wrapped
    }
}

pub fn to_degrees(radians: &Array1<f64>) -> Array1<f64> {
    radians.mapv(f64::to_degrees)
}

pub fn to_radians(degrees: &Array1<f64>) -> Array1<f64> {
    degrees.mapv(f64::to_radians)
}
