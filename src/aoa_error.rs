//! Closed-form angle-of-arrival error for a two-element interferometer.
//!
//! A phase measurement with standard deviation σφ on a baseline `d` maps to
//! an angular error of asin(λ σφ / 2π d). The phase noise model is the
//! simple σφ = 1/√SNR.

use std::f64::consts::PI;

use ndarray::Array1;

use crate::{
    band::SignalBand,
    error::{BeamError, Result},
    helper::db_to_linear,
};

pub fn phase_sigma(snr_linear: f64) -> Result<f64> {
    if !(snr_linear > 0.) {
        return Err(BeamError::NonPositiveSnr(snr_linear));
    }
    Ok(1. / snr_linear.sqrt())
}

pub fn aoa_error_deg(band: &SignalBand, baseline: f64, snr_linear: f64) -> Result<f64> {
    if !(baseline > 0.) {
        return Err(BeamError::NonPositiveBaseline(baseline));
    }
    let sigma_phi = phase_sigma(snr_linear)?;
    let argument = band.wavelength() * sigma_phi / (2. * PI * baseline);
    if argument > 1. {
        return Err(BeamError::AmbiguousBaseline {
            baseline,
            sigma_phi,
            argument,
        });
    }
    Ok(argument.asin().to_degrees())
}

#[derive(Debug, Clone, PartialEq)]
pub struct AoaErrorSeries {
    pub baseline: f64,
    pub snr_db: Array1<f64>,
    pub error_deg: Array1<f64>,
}

/// One error-vs-SNR curve per baseline over the same SNR points (dB).
pub fn aoa_error_curve(
    band: &SignalBand,
    baselines: &[f64],
    snr_db: &Array1<f64>,
) -> Result<Vec<AoaErrorSeries>> {
    baselines
        .iter()
        .map(|&baseline| {
            let error_deg = snr_db
                .iter()
                .map(|&x| aoa_error_deg(band, baseline, db_to_linear(x)))
                .collect::<Result<Array1<f64>>>()?;
            Ok(AoaErrorSeries {
                baseline,
                snr_db: snr_db.clone(),
                error_deg,
            })
        })
        .collect()
}

#[cfg(test)]
mod test {
    use approx::assert_relative_eq;
    use ndarray::Array1;

    use super::{aoa_error_curve, aoa_error_deg, phase_sigma};
    use crate::{
        band::{SignalBand, SPEED_OF_LIGHT},
        error::BeamError,
    };

    fn band() -> SignalBand {
        SignalBand::new(SPEED_OF_LIGHT, 2.45e9).unwrap()
    }

    #[test]
    fn one_metre_at_thirty_db() {
        // λ = 0.1224 m, σφ = 1/√1000
        let expected = (0.12244897959183673 / 1000f64.sqrt() / (2. * std::f64::consts::PI))
            .asin()
            .to_degrees();
        assert_relative_eq!(aoa_error_deg(&band(), 1., 1000.).unwrap(), expected);
        assert_relative_eq!(expected, 0.03531, epsilon = 1e-5);
    }

    #[test]
    fn longer_baselines_and_more_snr_help() {
        let snr_db = Array1::linspace(10., 60., 10);
        let curves = aoa_error_curve(&band(), &[1., 2.5, 5.], &snr_db).unwrap();

        assert_eq!(curves.len(), 3);
        for series in curves.iter() {
            assert_eq!(series.error_deg.len(), 10);
            for w in series.error_deg.windows(2) {
                assert!(w[1] < w[0]);
            }
        }
        for n in 0..10 {
            assert!(curves[1].error_deg[n] < curves[0].error_deg[n]);
            assert!(curves[2].error_deg[n] < curves[1].error_deg[n]);
        }
    }

    #[test]
    fn rejects_bad_inputs() {
        assert!(matches!(phase_sigma(0.), Err(BeamError::NonPositiveSnr(_))));
        assert!(matches!(
            aoa_error_deg(&band(), 0., 10.),
            Err(BeamError::NonPositiveBaseline(_))
        ));
        // A millimetre baseline can't resolve a 1 rad phase error at 12 cm wavelength
        assert!(matches!(
            aoa_error_deg(&band(), 1e-3, 1.),
            Err(BeamError::AmbiguousBaseline { .. })
        ));
    }
}
