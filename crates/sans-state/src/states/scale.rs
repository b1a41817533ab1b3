use crate::enums::SampleShape;
use crate::validation::{Validate, ValidationErrors};
use serde::{Deserialize, Serialize};

/// Absolute scale factor and sample geometry for the volume correction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StateScale {
    /// Scale applied to the rear detector data.
    pub scale: Option<f64>,
    pub shape: Option<SampleShape>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub thickness: Option<f64>,
}

impl Validate for StateScale {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        for (field, value) in [
            ("width", self.width),
            ("height", self.height),
            ("thickness", self.thickness),
        ] {
            if let Some(v) = value
                && v <= 0.0
            {
                errors.push(field, "sample dimensions must be positive", v);
            }
        }
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_positive_dimensions_are_rejected_together() {
        let state = StateScale {
            width: Some(0.0),
            thickness: Some(-1.0),
            ..StateScale::default()
        };
        let errors = state.validate().unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors.contains_field("width"));
        assert!(errors.contains_field("thickness"));
    }
}
