use std::{f64::consts::PI, ops::Index};

use ndarray::Array1;
use tracing::debug;

use crate::{
    band::{ArrayGeometry, SignalBand},
    error::{BeamError, Result},
    helper::{to_degrees, to_radians, wrap_phase},
};

/// Per-element phase in radians, element 0 first.
#[derive(Debug, Clone, PartialEq)]
pub struct ElementPhaseVector(Array1<f64>);

impl ElementPhaseVector {
    pub fn new(phases: Array1<f64>) -> ElementPhaseVector {
        ElementPhaseVector(phases)
    }

    pub fn from_degrees(degrees: &Array1<f64>) -> ElementPhaseVector {
        ElementPhaseVector(to_radians(degrees))
    }

    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }

    pub fn as_array(&self) -> &Array1<f64> {
        &self.0
    }

    pub fn to_degrees(&self) -> Array1<f64> {
        to_degrees(&self.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().copied()
    }

    pub(crate) fn check_len(&self, geometry: &ArrayGeometry) -> Result<()> {
        if self.len() != geometry.element_count() {
            return Err(BeamError::PhaseLengthMismatch {
                expected: geometry.element_count(),
                actual: self.len(),
            });
        }
        Ok(())
    }
}

impl Index<usize> for ElementPhaseVector {
    type Output = f64;

    fn index(&self, i: usize) -> &f64 {
        &self.0[i]
    }
}

impl From<Array1<f64>> for ElementPhaseVector {
    fn from(phases: Array1<f64>) -> Self {
        ElementPhaseVector(phases)
    }
}

/// Progressive phase of a plane wave arriving from `angle_of_arrival_deg`
/// off broadside, measured at each element of a uniform linear array. Element
/// 0 is the reference and always reads zero.
pub fn received_phase(
    geometry: &ArrayGeometry,
    band: &SignalBand,
    angle_of_arrival_deg: f64,
) -> ElementPhaseVector {
    let d = geometry.spacing_in(band);
    let step = 2. * PI * d * angle_of_arrival_deg.to_radians().sin();

    let phases = (0..geometry.element_count())
        .map(|i| step * i as f64)
        .collect::<Array1<f64>>();

    debug!(
        angle_of_arrival_deg,
        spacing_wavelengths = d,
        phases_deg = ?to_degrees(&phases),
        "received phase"
    );

    ElementPhaseVector(phases)
}

/// Steering phase for the transmit array given what the pilot array saw.
///
/// The same path delay is worth `transmit / pilot` times more phase at the
/// transmit frequency, and the sign flip conjugates it so the re-radiated
/// beam heads back toward the source. Results are wrapped into (-π, π].
pub fn conjugate_phase(
    received: &ElementPhaseVector,
    pilot: &SignalBand,
    transmit: &SignalBand,
) -> ElementPhaseVector {
    let ratio = transmit.freq() / pilot.freq();
    let phases = received.0.mapv(|x| wrap_phase(-ratio * x));

    debug!(ratio, phases_deg = ?to_degrees(&phases), "conjugate phase");

    ElementPhaseVector(phases)
}

#[cfg(test)]
mod test {
    use std::f64::consts::PI;

    use approx::assert_relative_eq;
    use ndarray::{array, Array1};
    use rand::{rngs::StdRng, Rng, SeedableRng};

    use super::{conjugate_phase, received_phase, ElementPhaseVector};
    use crate::band::{ArrayGeometry, SignalBand, SPEED_OF_LIGHT};

    fn bands() -> (SignalBand, SignalBand) {
        (
            SignalBand::new(SPEED_OF_LIGHT, 2.45e9).unwrap(),
            SignalBand::new(SPEED_OF_LIGHT, 5.8e9).unwrap(),
        )
    }

    #[test]
    fn reference_element_is_zero() {
        let (pilot, xmit) = bands();
        for count in [1, 2, 4, 17] {
            let geom = ArrayGeometry::from_wavelength_multiple(count, 1.3, &xmit).unwrap();
            for aoa in [-89., -30., -5., 0., 1., 5., 45., 90.] {
                assert_eq!(received_phase(&geom, &pilot, aoa)[0], 0.);
                assert_eq!(received_phase(&geom, &xmit, aoa)[0], 0.);
            }
        }
    }

    #[test]
    fn received_phase_is_linear_in_index() {
        let (pilot, xmit) = bands();
        let geom = ArrayGeometry::from_wavelength_multiple(4, 1.3, &xmit).unwrap();
        let phase = received_phase(&geom, &pilot, 5.);

        let step = 2. * PI * geom.spacing_in(&pilot) * 5f64.to_radians().sin();
        for i in 0..4 {
            assert_relative_eq!(phase[i], step * i as f64, max_relative = 1e-12);
        }
        // 1.3 λt at 2.45 GHz is about 0.549 pilot wavelengths, so one step is about 17.2°
        assert_relative_eq!(phase.to_degrees()[1], 17.23, epsilon = 0.01);
    }

    #[test]
    fn conjugate_scales_by_frequency_ratio() {
        let (pilot, xmit) = bands();
        let received = ElementPhaseVector::new(array![0., 0.1, 0.2, 0.3]);
        let conj = conjugate_phase(&received, &pilot, &xmit);

        let ratio = 5.8 / 2.45;
        for i in 0..4 {
            assert_relative_eq!(conj[i], -ratio * received[i], epsilon = 1e-12);
        }
    }

    #[test]
    fn conjugate_cancels_transmit_path_phase() {
        // Rescaling the pilot phase lands exactly on the negated transmit-band phase
        let (pilot, xmit) = bands();
        let geom = ArrayGeometry::from_wavelength_multiple(4, 1.3, &xmit).unwrap();
        let conj = conjugate_phase(&received_phase(&geom, &pilot, 5.), &pilot, &xmit);
        let at_xmit = received_phase(&geom, &xmit, 5.);

        for i in 0..4 {
            let residual = (conj[i] + at_xmit[i]).rem_euclid(2. * PI);
            assert!(residual < 1e-9 || 2. * PI - residual < 1e-9, "element {}", i);
        }
    }

    #[test]
    fn conjugate_always_wrapped() {
        let (pilot, xmit) = bands();
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..200 {
            let raw = (0..16)
                .map(|_| rng.gen_range(-1e6..1e6))
                .collect::<Array1<f64>>();
            let conj = conjugate_phase(&ElementPhaseVector::new(raw), &pilot, &xmit);
            for x in conj.iter() {
                assert!(x > -PI && x <= PI, "{} escaped (-π, π]", x);
            }
        }

        let edges = ElementPhaseVector::new(array![
            PI * 2.45 / 5.8,
            -PI * 2.45 / 5.8,
            0.,
            -0.,
            1e12,
            -1e12
        ]);
        for x in conjugate_phase(&edges, &pilot, &xmit).iter() {
            assert!(x > -PI && x <= PI, "{} escaped (-π, π]", x);
        }
    }
}
