use std::{collections::BTreeSet, f64::consts::PI};

use tracing::debug;

use crate::{
    band::SignalBand,
    error::{BeamError, Result},
    phase::ElementPhaseVector,
};

/// A rigid displacement of some elements along the line of sight.
#[derive(Debug, Clone, PartialEq)]
pub struct Deformation {
    pub elements: BTreeSet<usize>,
    // Meters
    pub shift: f64,
}

impl Deformation {
    pub fn new(elements: impl IntoIterator<Item = usize>, shift: f64) -> Deformation {
        Deformation {
            elements: elements.into_iter().collect(),
            shift,
        }
    }

    pub fn none() -> Deformation {
        Deformation {
            elements: BTreeSet::new(),
            shift: 0.,
        }
    }

    /// Extra phase picked up at `band` by an element moved `shift` meters.
    pub fn phase_error(&self, band: &SignalBand) -> f64 {
        2. * PI * band.in_wavelengths(self.shift)
    }

    pub fn apply(
        &self,
        phase: &ElementPhaseVector,
        band: &SignalBand,
    ) -> Result<ElementPhaseVector> {
        apply_deformation(phase, &self.elements, band, self.shift)
    }
}

/// Returns a copy of `phase` with the displacement error added to each of
/// `affected`. The input is left alone so it can still serve as the
/// undeformed reference.
pub fn apply_deformation(
    phase: &ElementPhaseVector,
    affected: &BTreeSet<usize>,
    band: &SignalBand,
    physical_shift: f64,
) -> Result<ElementPhaseVector> {
    let error = 2. * PI * band.in_wavelengths(physical_shift);
    let mut out = phase.as_array().clone();

    for &i in affected {
        if i >= out.len() {
            return Err(BeamError::ElementIndexOutOfRange {
                index: i,
                element_count: out.len(),
            });
        }
        out[i] += error;
    }

    debug!(
        phase_error_deg = error.to_degrees(),
        physical_shift, "applied deformation"
    );

    Ok(ElementPhaseVector::new(out))
}

#[cfg(test)]
mod test {
    use std::{collections::BTreeSet, f64::consts::PI};

    use approx::assert_relative_eq;
    use ndarray::array;

    use super::{apply_deformation, Deformation};
    use crate::{
        band::{SignalBand, SPEED_OF_LIGHT},
        error::BeamError,
        phase::ElementPhaseVector,
    };

    fn pilot() -> SignalBand {
        SignalBand::new(SPEED_OF_LIGHT, 2.45e9).unwrap()
    }

    #[test]
    fn empty_set_is_identity() {
        let phase = ElementPhaseVector::new(array![0., 0.3, 0.6, 0.9]);
        let out = apply_deformation(&phase, &BTreeSet::new(), &pilot(), 0.02).unwrap();
        assert_eq!(out, phase);

        let out = Deformation::none().apply(&phase, &pilot()).unwrap();
        assert_eq!(out, phase);
    }

    #[test]
    fn only_affected_elements_move() {
        let xmit = SignalBand::new(SPEED_OF_LIGHT, 5.8e9).unwrap();
        let phase = ElementPhaseVector::new(array![0., 0.3, 0.6, 0.9]);
        let deformation = Deformation::new([1, 2], 0.5 * xmit.wavelength());
        let out = deformation.apply(&phase, &pilot()).unwrap();

        // Half a transmit wavelength is 0.5 * 2.45 / 5.8 pilot wavelengths
        let error = PI * 2.45 / 5.8;
        assert_relative_eq!(deformation.phase_error(&pilot()), error, max_relative = 1e-12);
        assert_eq!(out[0], 0.);
        assert_relative_eq!(out[1], 0.3 + error, max_relative = 1e-12);
        assert_relative_eq!(out[2], 0.6 + error, max_relative = 1e-12);
        assert_eq!(out[3], 0.9);

        // Input untouched
        assert_eq!(phase, ElementPhaseVector::new(array![0., 0.3, 0.6, 0.9]));
    }

    #[test]
    fn repeated_index_moves_element_once() {
        let phase = ElementPhaseVector::new(array![0., 0.3, 0.6, 0.9]);
        let twice = Deformation::new([1, 1, 1], 0.01).apply(&phase, &pilot()).unwrap();
        let once = Deformation::new([1], 0.01).apply(&phase, &pilot()).unwrap();

        assert_eq!(twice, once);
        assert_relative_eq!(
            twice[1],
            0.3 + 2. * PI * pilot().in_wavelengths(0.01),
            max_relative = 1e-12
        );
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let phase = ElementPhaseVector::new(array![0., 0.3]);
        let affected = BTreeSet::from([0, 2]);
        let err = apply_deformation(&phase, &affected, &pilot(), 0.01).unwrap_err();
        assert!(matches!(
            err,
            BeamError::ElementIndexOutOfRange {
                index: 2,
                element_count: 2
            }
        ));
    }
}
