//! Side-by-side evaluation of a deformed array.
//!
//! Naming follows the measurement campaign: "without correction" steers with
//! the phases the deformed pilot array actually reported, "with correction"
//! steers with the undeformed reference, i.e. as if the displacement had
//! been measured and compensated. Neither path runs an active correction
//! algorithm.

use tracing::info;

use crate::{
    array_factor::{evaluate_pattern, FarFieldPattern},
    band::{ArrayGeometry, SignalBand},
    deformation::Deformation,
    error::Result,
    phase::{conjugate_phase, received_phase, ElementPhaseVector},
    sweep::AngleSweep,
};

/// Everything the pilot/transmit link needs for one run.
#[derive(Debug, Clone)]
pub struct RetrodirectiveLink {
    pub pilot: SignalBand,
    pub transmit: SignalBand,
    pub geometry: ArrayGeometry,
}

#[derive(Debug, Clone)]
pub struct CorrectionComparison {
    pub received_deformed: ElementPhaseVector,
    pub received_original: ElementPhaseVector,
    pub conjugate_without_correction: ElementPhaseVector,
    pub conjugate_with_correction: ElementPhaseVector,
    pub without_correction: FarFieldPattern,
    pub with_correction: FarFieldPattern,
}

impl CorrectionComparison {
    /// How far the uncompensated beam points from the compensated one, in
    /// degrees. `None` if either pattern is degenerate.
    pub fn steering_error(&self) -> Option<f64> {
        Some(self.without_correction.peak_angle()? - self.with_correction.peak_angle()?)
    }
}

impl RetrodirectiveLink {
    /// Phase received at the pilot array and the steering phase it yields at
    /// the transmit array, with no deformation involved.
    pub fn respond(&self, angle_of_arrival_deg: f64) -> (ElementPhaseVector, ElementPhaseVector) {
        let received = received_phase(&self.geometry, &self.pilot, angle_of_arrival_deg);
        let conjugate = conjugate_phase(&received, &self.pilot, &self.transmit);
        (received, conjugate)
    }

    pub fn transmit_pattern(
        &self,
        steering: &ElementPhaseVector,
        sweep: &AngleSweep,
    ) -> Result<FarFieldPattern> {
        evaluate_pattern(&self.geometry, &self.transmit, steering, sweep)
    }

    pub fn compare(
        &self,
        angle_of_arrival_deg: f64,
        deformation: &Deformation,
        sweep: &AngleSweep,
    ) -> Result<CorrectionComparison> {
        let received_original = received_phase(&self.geometry, &self.pilot, angle_of_arrival_deg);
        // The displacement is seen by the pilot array, so the error is in pilot wavelengths
        let received_deformed = deformation.apply(&received_original, &self.pilot)?;

        let conjugate_without_correction =
            conjugate_phase(&received_deformed, &self.pilot, &self.transmit);
        let conjugate_with_correction =
            conjugate_phase(&received_original, &self.pilot, &self.transmit);

        let without_correction = self.transmit_pattern(&conjugate_without_correction, sweep)?;
        let with_correction = self.transmit_pattern(&conjugate_with_correction, sweep)?;

        let comparison = CorrectionComparison {
            received_deformed,
            received_original,
            conjugate_without_correction,
            conjugate_with_correction,
            without_correction,
            with_correction,
        };

        info!(
            angle_of_arrival_deg,
            deformed_elements = ?deformation.elements,
            peak_without_correction = ?comparison.without_correction.peak_angle(),
            peak_with_correction = ?comparison.with_correction.peak_angle(),
            "compared deformed and compensated steering"
        );

        Ok(comparison)
    }
}
