use crate::enums::RangeStepType;
use crate::validation::{Validate, ValidationErrors};
use serde::{Deserialize, Serialize};

/// Momentum-transfer conversion settings for 1-D and 2-D reductions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateConvertToQ {
    pub q_min: Option<f64>,
    pub q_max: Option<f64>,
    /// Rebin descriptor for the 1-D reduction, decoded from the user file's
    /// comma-separated binning string.
    pub q_1d_rebin_string: Option<String>,

    pub q_xy_max: Option<f64>,
    pub q_xy_step: Option<f64>,
    pub q_xy_step_type: Option<RangeStepType>,

    pub use_gravity: bool,
    pub gravity_extra_length: Option<f64>,
    pub q_resolution_collimation_length: Option<f64>,
    /// Sample aperture diameter, the `a2` term of the Q-resolution formula.
    pub q_resolution_a2: Option<f64>,
    pub radius_cutoff: f64,
    pub wavelength_cutoff: f64,
}

impl Default for StateConvertToQ {
    fn default() -> Self {
        Self {
            q_min: None,
            q_max: None,
            q_1d_rebin_string: None,
            q_xy_max: None,
            q_xy_step: None,
            q_xy_step_type: None,
            use_gravity: false,
            gravity_extra_length: None,
            q_resolution_collimation_length: None,
            q_resolution_a2: None,
            radius_cutoff: 0.0,
            wavelength_cutoff: 0.0,
        }
    }
}

impl Validate for StateConvertToQ {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let (Some(q_min), Some(q_max)) = (self.q_min, self.q_max)
            && q_min >= q_max
        {
            errors.push(
                "q_min",
                "q_min must be smaller than q_max",
                format_args!("{q_min} >= {q_max}"),
            );
        }
        if let Some(step) = self.q_xy_step
            && step <= 0.0
        {
            errors.push("q_xy_step", "the 2-D Q step must be positive", step);
        }
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_passes() {
        assert!(StateConvertToQ::default().validate().is_ok());
    }

    #[test]
    fn inverted_q_range_is_rejected() {
        let state = StateConvertToQ {
            q_min: Some(2.0),
            q_max: Some(1.0),
            ..StateConvertToQ::default()
        };
        assert!(state.validate().unwrap_err().contains_field("q_min"));
    }
}
