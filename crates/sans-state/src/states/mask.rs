use crate::validation::{Validate, ValidationErrors};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Detector masking configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateMask {
    pub radius_min: Option<f64>,
    pub radius_max: Option<f64>,
    pub phi_min: f64,
    pub phi_max: f64,
    pub use_mask_phi_mirror: bool,
    pub mask_files: Vec<PathBuf>,
}

impl Default for StateMask {
    fn default() -> Self {
        Self {
            radius_min: None,
            radius_max: None,
            phi_min: -90.0,
            phi_max: 90.0,
            use_mask_phi_mirror: true,
            mask_files: Vec::new(),
        }
    }
}

impl Validate for StateMask {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let (Some(radius_min), Some(radius_max)) = (self.radius_min, self.radius_max)
            && radius_min > radius_max
        {
            errors.push(
                "radius_min",
                "the inner mask radius must not exceed the outer radius",
                format_args!("{radius_min} > {radius_max}"),
            );
        }
        if self.phi_min > self.phi_max {
            errors.push(
                "phi_min",
                "the lower phi bound must not exceed the upper bound",
                format_args!("{} > {}", self.phi_min, self.phi_max),
            );
        }
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inverted_radius_window_is_rejected() {
        let state = StateMask {
            radius_min: Some(0.2),
            radius_max: Some(0.1),
            ..StateMask::default()
        };
        assert!(state.validate().unwrap_err().contains_field("radius_min"));
    }
}
