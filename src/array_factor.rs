//! Far-field pattern synthesis.
//!
//! Gains are normalized to the peak of the sweep they were computed over, so
//! every pattern tops out at 0 dB. Two patterns can be compared in shape and
//! pointing, never in absolute gain.

use ndarray::Array1;
use tracing::{debug, warn};

use crate::{
    antenna::SteeredArray,
    array_ext::Peak,
    band::{ArrayGeometry, SignalBand},
    error::Result,
    helper::amplitude_decibels_or_else,
    helper_traits::AngularResponse,
    phase::ElementPhaseVector,
    sweep::AngleSweep,
};

// Peak magnitudes at or below this, per element, count as total cancellation.
const DEGENERATE_PEAK_PER_ELEMENT: f64 = 1e-12;

// Largest gain strictly below the peak
const TIED_PEAK_GAIN_DB: f64 = -f64::EPSILON;

/// Gain reported for nulls and for every angle of a degenerate pattern.
pub const NULL_GAIN_DB: f64 = f64::NEG_INFINITY;

#[derive(Debug, Clone, PartialEq)]
pub struct FarFieldPattern {
    angles_deg: Array1<f64>,
    gain_db: Array1<f64>,
    degenerate: bool,
}

impl FarFieldPattern {
    pub fn angles_deg(&self) -> &Array1<f64> {
        &self.angles_deg
    }

    pub fn gain_db(&self) -> &Array1<f64> {
        &self.gain_db
    }

    pub fn len(&self) -> usize {
        self.angles_deg.len()
    }

    pub fn is_empty(&self) -> bool {
        self.angles_deg.is_empty()
    }

    /// True when the array cancelled itself at every angle of the sweep and
    /// there was no peak to normalize against.
    pub fn is_degenerate(&self) -> bool {
        self.degenerate
    }

    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.angles_deg
            .iter()
            .copied()
            .zip(self.gain_db.iter().copied())
    }

    pub fn peak_index(&self) -> Option<usize> {
        self.gain_db.argmax_finite()
    }

    /// (angle, gain) of the main beam, `None` for a degenerate pattern.
    pub fn peak(&self) -> Option<(f64, f64)> {
        self.peak_index()
            .map(|n| (self.angles_deg[n], self.gain_db[n]))
    }

    pub fn peak_angle(&self) -> Option<f64> {
        self.peak().map(|(angle, _)| angle)
    }

    /// Half the angular width of the main lobe at `level_db` below the peak.
    /// A side that never drops below the level is measured to the sweep edge.
    pub fn main_lobe_half_width(&self, level_db: f64) -> Option<f64> {
        let peak = self.peak_index()?;
        let below = |n: &usize| !(self.gain_db[*n] >= level_db);

        let left = (0..peak).rev().find(below).unwrap_or(0);
        let right = (peak + 1..self.len()).find(below).unwrap_or(self.len() - 1);

        Some((self.angles_deg[right] - self.angles_deg[left]).abs() / 2.)
    }
}

/// Evaluates any angular response over `sweep` and normalizes it to 0 dB at
/// its own peak. `degenerate_below` is the magnitude at or under which the
/// whole sweep is treated as cancelled.
pub fn normalized_pattern<R: AngularResponse>(
    response: &R,
    sweep: &AngleSweep,
    degenerate_below: f64,
) -> FarFieldPattern {
    let angles_deg = sweep.angles();

    // Every magnitude has to be known before the peak is, so this can't stream
    let magnitude = response.response_many(sweep).mapv(|x| x.norm());
    let peak = magnitude.argmax_finite();

    match peak {
        Some(n) if magnitude[n] > degenerate_below => {
            let max = magnitude[n];
            let mut gain_db =
                magnitude.mapv(|x| amplitude_decibels_or_else(x / max, NULL_GAIN_DB));
            // Only the first peak sample reads 0 dB, ties sit just below it
            for (k, g) in gain_db.indexed_iter_mut() {
                if k == n {
                    *g = 0.;
                } else if *g >= 0. {
                    *g = TIED_PEAK_GAIN_DB;
                }
            }

            debug!(peak_angle = angles_deg[n], peak_magnitude = max, "pattern peak");

            FarFieldPattern {
                angles_deg,
                gain_db,
                degenerate: false,
            }
        }
        _ => {
            warn!(
                start = sweep.start(),
                stop = sweep.stop(),
                "array factor vanishes across the whole sweep, reporting {} dB",
                NULL_GAIN_DB
            );
            let gain_db = Array1::from_elem(angles_deg.len(), NULL_GAIN_DB);
            FarFieldPattern {
                angles_deg,
                gain_db,
                degenerate: true,
            }
        }
    }
}

/// Normalized far-field pattern of a uniform linear array radiating at `band`
/// with the given per-element steering phases.
pub fn evaluate_pattern(
    geometry: &ArrayGeometry,
    band: &SignalBand,
    phase: &ElementPhaseVector,
    sweep: &AngleSweep,
) -> Result<FarFieldPattern> {
    let array = SteeredArray::new(*geometry, *band, phase.clone())?;
    let floor = DEGENERATE_PEAK_PER_ELEMENT * geometry.element_count() as f64;

    Ok(normalized_pattern(&array, sweep, floor))
}
