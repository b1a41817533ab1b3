//! Adjustment states: monitor normalisation, wavelength/pixel adjustment
//! files, and the composite that bundles them for the reduction engine.

use crate::enums::{DetectorType, Instrument, RangeStepType};
use crate::states::transmission::StateCalculateTransmission;
use crate::validation::{Validate, ValidationErrors};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Monitor the scattering data is normalised against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateNormalizeToMonitor {
    pub incident_monitor: Option<i64>,
    pub default_incident_monitor: i64,
}

impl StateNormalizeToMonitor {
    pub fn for_instrument(instrument: Instrument) -> Self {
        let default_incident_monitor = match instrument {
            Instrument::Loq | Instrument::Sans2d | Instrument::Larmor => 2,
            Instrument::Zoom => 3,
            Instrument::NoInstrument => 1,
        };
        Self {
            incident_monitor: None,
            default_incident_monitor,
        }
    }
}

impl Validate for StateNormalizeToMonitor {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Some(monitor) = self.incident_monitor
            && monitor <= 0
        {
            errors.push("incident_monitor", "monitor numbers start at 1", monitor);
        }
        errors.into_result()
    }
}

/// Adjustment workspaces applied per wavelength bin and per pixel.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StateWavelengthAndPixelAdjustment {
    /// Flood/efficiency file per detector bank.
    pub adjustment_files: BTreeMap<DetectorType, String>,
    pub wavelength_low: Option<f64>,
    pub wavelength_step: Option<f64>,
    pub wavelength_high: Option<f64>,
    pub wavelength_step_type: RangeStepType,
}

impl Validate for StateWavelengthAndPixelAdjustment {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let (Some(low), Some(high)) = (self.wavelength_low, self.wavelength_high)
            && low > high
        {
            errors.push(
                "wavelength_low",
                "the lower wavelength bound must not exceed the upper bound",
                format_args!("{low} > {high}"),
            );
        }
        errors.into_result()
    }
}

/// Composite adjustment state handed to the reduction engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateAdjustment {
    pub calculate_transmission: StateCalculateTransmission,
    pub wavelength_and_pixel_adjustment: StateWavelengthAndPixelAdjustment,
    pub wide_angle_correction: bool,
}

impl StateAdjustment {
    pub fn for_instrument(instrument: Instrument) -> Self {
        Self {
            calculate_transmission: StateCalculateTransmission::for_instrument(instrument),
            wavelength_and_pixel_adjustment: StateWavelengthAndPixelAdjustment::default(),
            wide_angle_correction: false,
        }
    }
}

impl Validate for StateAdjustment {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Err(child) = self.calculate_transmission.validate() {
            errors.merge(child);
        }
        if let Err(child) = self.wavelength_and_pixel_adjustment.validate() {
            errors.merge(child);
        }
        errors.into_result()
    }
}
