//! Carrier bands and array geometry.
//!
//! The receive dipoles and the transmit patches share one physical element
//! spacing. What differs between the two bands is how many wavelengths that
//! spacing amounts to.

use crate::{
    error::{BeamError, Result},
    helper::wavelength,
};

// Rounded convention used by the link budget, not the CODATA value.
pub const SPEED_OF_LIGHT: f64 = 3e8;

/// A carrier frequency together with its free-space wavelength.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalBand {
    freq: f64,
    wavelength: f64,
}

impl SignalBand {
    pub fn new(speed_of_light: f64, freq: f64) -> Result<SignalBand> {
        if !(speed_of_light > 0.) {
            return Err(BeamError::NonPositiveSpeedOfLight(speed_of_light));
        }
        if !(freq > 0.) {
            return Err(BeamError::NonPositiveFrequency(freq));
        }
        Ok(SignalBand {
            freq,
            wavelength: wavelength(speed_of_light, freq),
        })
    }

    pub fn freq(&self) -> f64 {
        self.freq
    }

    pub fn wavelength(&self) -> f64 {
        self.wavelength
    }

    /// Expresses a physical length in units of this band's wavelength.
    pub fn in_wavelengths(&self, meters: f64) -> f64 {
        meters / self.wavelength
    }
}

/// A uniform linear array: `element_count` elements `spacing` meters apart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArrayGeometry {
    element_count: usize,
    spacing: f64,
}

impl ArrayGeometry {
    pub fn new(element_count: usize, spacing: f64) -> Result<ArrayGeometry> {
        if element_count == 0 {
            return Err(BeamError::EmptyArray);
        }
        if !(spacing > 0.) {
            return Err(BeamError::NonPositiveSpacing(spacing));
        }
        Ok(ArrayGeometry {
            element_count,
            spacing,
        })
    }

    /// Spacing given as `multiple` wavelengths of `band`, e.g. 1.3 λ at the
    /// transmit frequency.
    pub fn from_wavelength_multiple(
        element_count: usize,
        multiple: f64,
        band: &SignalBand,
    ) -> Result<ArrayGeometry> {
        ArrayGeometry::new(element_count, multiple * band.wavelength())
    }

    pub fn element_count(&self) -> usize {
        self.element_count
    }

    /// Physical spacing in meters, the same for every band.
    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    pub fn spacing_in(&self, band: &SignalBand) -> f64 {
        band.in_wavelengths(self.spacing)
    }
}

#[cfg(test)]
mod test {
    use approx::assert_relative_eq;

    use super::{ArrayGeometry, SignalBand, SPEED_OF_LIGHT};
    use crate::error::BeamError;

    #[test]
    fn spacing_is_band_independent() {
        let pilot = SignalBand::new(SPEED_OF_LIGHT, 2.45e9).unwrap();
        let xmit = SignalBand::new(SPEED_OF_LIGHT, 5.8e9).unwrap();
        let geom = ArrayGeometry::from_wavelength_multiple(4, 1.3, &xmit).unwrap();

        assert_relative_eq!(geom.spacing(), 1.3 * 3e8 / 5.8e9);
        assert_relative_eq!(geom.spacing_in(&xmit), 1.3, max_relative = 1e-12);
        assert_relative_eq!(
            geom.spacing_in(&pilot),
            1.3 * 2.45 / 5.8,
            max_relative = 1e-12
        );
        // Converting back to meters from either band lands on the same distance
        assert_relative_eq!(
            geom.spacing_in(&pilot) * pilot.wavelength(),
            geom.spacing_in(&xmit) * xmit.wavelength(),
            max_relative = 1e-12
        );
    }

    #[test]
    fn rejects_bad_inputs() {
        assert!(matches!(
            SignalBand::new(SPEED_OF_LIGHT, 0.),
            Err(BeamError::NonPositiveFrequency(_))
        ));
        assert!(matches!(
            SignalBand::new(SPEED_OF_LIGHT, -1e9),
            Err(BeamError::NonPositiveFrequency(_))
        ));
        assert!(matches!(
            SignalBand::new(0., 1e9),
            Err(BeamError::NonPositiveSpeedOfLight(_))
        ));
        assert!(matches!(ArrayGeometry::new(0, 0.1), Err(BeamError::EmptyArray)));
        assert!(matches!(
            ArrayGeometry::new(4, 0.),
            Err(BeamError::NonPositiveSpacing(_))
        ));
    }
}
