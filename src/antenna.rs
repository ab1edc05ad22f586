use std::f64::consts::PI;

use num::complex::Complex64;

use crate::{
    band::{ArrayGeometry, SignalBand},
    error::Result,
    helper_traits::AngularResponse,
    phase::ElementPhaseVector,
};

// A uniform linear array of isotropic unit-amplitude elements, each driven with its own
// steering phase. Its response is the array factor
//   AF(θ) = Σ_i exp(j (2π d sin θ i + φ_i))
// with d the element spacing in wavelengths of the band being radiated.
#[derive(Debug, Clone)]
pub struct SteeredArray {
    pub geometry: ArrayGeometry,
    pub band: SignalBand,
    phases: ElementPhaseVector,
}

impl SteeredArray {
    pub fn new(
        geometry: ArrayGeometry,
        band: SignalBand,
        phases: ElementPhaseVector,
    ) -> Result<SteeredArray> {
        phases.check_len(&geometry)?;
        Ok(SteeredArray {
            geometry,
            band,
            phases,
        })
    }
}

const i: Complex64 = Complex64::new(0., 1.);

impl AngularResponse for SteeredArray {
    fn response(&self, theta_deg: f64) -> Complex64 {
        let d = self.geometry.spacing_in(&self.band);
        let k = 2. * PI * d * theta_deg.to_radians().sin();

        self.phases
            .iter()
            .enumerate()
            .map(|(n, phi)| (i * (k * n as f64 + phi)).exp())
            .sum()
    }
}
