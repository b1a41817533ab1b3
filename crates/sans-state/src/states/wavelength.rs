use crate::enums::RangeStepType;
use crate::validation::{Validate, ValidationErrors};
use serde::{Deserialize, Serialize};

/// Wavelength range the measured data is rebinned onto, in Angstrom.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StateWavelength {
    pub wavelength_low: Option<f64>,
    pub wavelength_step: Option<f64>,
    pub wavelength_high: Option<f64>,
    pub wavelength_step_type: RangeStepType,
}

impl Validate for StateWavelength {
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
        if let Some(step) = self.wavelength_step
            && step <= 0.0
        {
            errors.push("wavelength_step", "the wavelength step must be positive", step);
        }
        errors.into_result()
    }
}
