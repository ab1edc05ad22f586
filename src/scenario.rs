//! Scenario configuration.
//!
//! Every value that enters the formulas comes from here, so two scenarios can
//! use different constants side by side. All fields default to the 2.45 GHz
//! pilot / 5.8 GHz transmit campaign, and a TOML file only needs to list what
//! it changes.

use std::path::Path;

use ndarray::Array1;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    band::{ArrayGeometry, SignalBand, SPEED_OF_LIGHT},
    comparison::RetrodirectiveLink,
    deformation::Deformation,
    error::{BeamError, Result},
    fit::{reference_error_deg, reference_snr_db},
    sweep::AngleSweep,
};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScenarioConfig {
    /// m/s
    pub speed_of_light: f64,
    /// Pilot (receive, dipole) carrier in Hz
    pub pilot_frequency_hz: f64,
    /// Transmit (patch) carrier in Hz
    pub transmit_frequency_hz: f64,
    /// Element spacing in transmit wavelengths
    pub spacing_multiple: f64,
    pub element_count: usize,
    pub angle_of_arrival_deg: f64,
    /// Incident angles listed in the phase table
    pub table_angles_deg: Vec<f64>,
    /// Element displacement in transmit wavelengths
    pub deformation_shift: f64,
    /// 0-based indices of the displaced elements
    pub deformed_elements: Vec<usize>,
    pub sweep: SweepConfig,
    pub aoa_error: AoaErrorConfig,
    pub fit: FitConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct SweepConfig {
    pub start_deg: f64,
    pub stop_deg: f64,
    pub count: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct AoaErrorConfig {
    pub frequency_hz: f64,
    /// Interferometer baselines in meters
    pub baselines: Vec<f64>,
    pub snr_start_db: f64,
    pub snr_stop_db: f64,
    pub snr_count: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct FitConfig {
    pub snr_db: Vec<f64>,
    pub error_deg: Vec<f64>,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        ScenarioConfig {
            speed_of_light: SPEED_OF_LIGHT,
            pilot_frequency_hz: 2.45e9,
            transmit_frequency_hz: 5.8e9,
            spacing_multiple: 1.3,
            element_count: 4,
            angle_of_arrival_deg: 5.,
            table_angles_deg: vec![1., 2., 5.],
            deformation_shift: 0.5,
            deformed_elements: vec![1, 2],
            sweep: SweepConfig::default(),
            aoa_error: AoaErrorConfig::default(),
            fit: FitConfig::default(),
        }
    }
}

impl Default for SweepConfig {
    fn default() -> Self {
        let sweep = AngleSweep::default();
        SweepConfig {
            start_deg: sweep.start(),
            stop_deg: sweep.stop(),
            count: sweep.count(),
        }
    }
}

impl Default for AoaErrorConfig {
    fn default() -> Self {
        AoaErrorConfig {
            frequency_hz: 2.45e9,
            baselines: vec![1., 2.5, 5.],
            snr_start_db: 10.,
            snr_stop_db: 60.,
            snr_count: 10,
        }
    }
}

impl Default for FitConfig {
    fn default() -> Self {
        FitConfig {
            snr_db: reference_snr_db(),
            error_deg: reference_error_deg(),
        }
    }
}

impl ScenarioConfig {
    pub fn from_toml_str(s: &str) -> Result<ScenarioConfig> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<ScenarioConfig> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        debug!(path = %path.display(), "loading scenario");
        ScenarioConfig::from_toml_str(&text)
    }
}

/// A validated scenario with typed bands, geometry and sweep.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub link: RetrodirectiveLink,
    pub angle_of_arrival_deg: f64,
    pub table_angles_deg: Vec<f64>,
    pub deformation: Deformation,
    pub sweep: AngleSweep,
    pub aoa_error_band: SignalBand,
    pub baselines: Vec<f64>,
    pub snr_db: Array1<f64>,
    pub fit_snr_db: Vec<f64>,
    pub fit_error_deg: Vec<f64>,
}

impl Scenario {
    pub fn build(config: &ScenarioConfig) -> Result<Scenario> {
        let c = config.speed_of_light;
        let pilot = SignalBand::new(c, config.pilot_frequency_hz)?;
        let transmit = SignalBand::new(c, config.transmit_frequency_hz)?;
        let geometry = ArrayGeometry::from_wavelength_multiple(
            config.element_count,
            config.spacing_multiple,
            &transmit,
        )?;

        if let Some(&index) = config
            .deformed_elements
            .iter()
            .find(|&&n| n >= config.element_count)
        {
            return Err(BeamError::ElementIndexOutOfRange {
                index,
                element_count: config.element_count,
            });
        }
        let deformation = Deformation::new(
            config.deformed_elements.iter().copied(),
            config.deformation_shift * transmit.wavelength(),
        );

        let sweep = AngleSweep::new(
            config.sweep.start_deg,
            config.sweep.stop_deg,
            config.sweep.count,
        )?;

        let aoa = &config.aoa_error;
        if aoa.snr_count == 0 {
            return Err(BeamError::Config("aoa_error.snr_count must be positive".into()));
        }
        let aoa_error_band = SignalBand::new(c, aoa.frequency_hz)?;
        let snr_db = Array1::linspace(aoa.snr_start_db, aoa.snr_stop_db, aoa.snr_count);

        if config.fit.snr_db.len() != config.fit.error_deg.len() {
            return Err(BeamError::FitLengthMismatch {
                x: config.fit.snr_db.len(),
                y: config.fit.error_deg.len(),
            });
        }

        Ok(Scenario {
            link: RetrodirectiveLink {
                pilot,
                transmit,
                geometry,
            },
            angle_of_arrival_deg: config.angle_of_arrival_deg,
            table_angles_deg: config.table_angles_deg.clone(),
            deformation,
            sweep,
            aoa_error_band,
            baselines: aoa.baselines.clone(),
            snr_db,
            fit_snr_db: config.fit.snr_db.clone(),
            fit_error_deg: config.fit.error_deg.clone(),
        })
    }
}
