use crate::enums::ReductionMode;
use crate::validation::{Validate, ValidationErrors};
use serde::{Deserialize, Serialize};

/// Which detector bank(s) to reduce and how to merge them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateReductionMode {
    pub reduction_mode: ReductionMode,
    pub merge_scale: f64,
    pub merge_shift: f64,
    pub merge_fit_scale: bool,
    pub merge_fit_shift: bool,
}

impl Default for StateReductionMode {
    fn default() -> Self {
        Self {
            reduction_mode: ReductionMode::NotSet,
            merge_scale: 1.0,
            merge_shift: 0.0,
            merge_fit_scale: false,
            merge_fit_shift: false,
        }
    }
}

impl Validate for StateReductionMode {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.merge_scale == 0.0 {
            errors.push("merge_scale", "the merge scale must not be zero", 0.0);
        }
        errors.into_result()
    }
}
