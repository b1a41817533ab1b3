use crate::validation::{Validate, ValidationErrors};
use serde::{Deserialize, Serialize};

/// Event-mode compatibility settings: whether event data is converted to
/// histograms up front, and the time binning used for the conversion.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StateCompatibility {
    pub use_compatibility_mode: bool,
    pub time_rebin_string: Option<String>,
}

impl Validate for StateCompatibility {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Some(rebin) = &self.time_rebin_string
            && rebin.is_empty()
        {
            errors.push(
                "time_rebin_string",
                "a time rebin string must not be empty when given",
                "\"\"",
            );
        }
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_passes() {
        assert!(StateCompatibility::default().validate().is_ok());
    }

    #[test]
    fn empty_rebin_string_is_rejected() {
        let state = StateCompatibility {
            use_compatibility_mode: true,
            time_rebin_string: Some(String::new()),
        };
        let errors = state.validate().unwrap_err();
        assert!(errors.contains_field("time_rebin_string"));
    }
}
