use crate::validation::{Validate, ValidationErrors};
use serde::{Deserialize, Serialize};

/// Event-time slices of the run, as matching start/end lists in seconds.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StateSliceEvent {
    pub start_time: Vec<f64>,
    pub end_time: Vec<f64>,
}

impl Validate for StateSliceEvent {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.start_time.len() != self.end_time.len() {
            errors.push(
                "start_time",
                "start and end time lists must have the same length",
                format_args!("{} vs {}", self.start_time.len(), self.end_time.len()),
            );
            return errors.into_result();
        }
        for (start, end) in self.start_time.iter().zip(&self.end_time) {
            if start > end {
                errors.push(
                    "start_time",
                    "a slice must start before it ends",
                    format_args!("{start} > {end}"),
                );
            }
        }
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mismatched_lists_are_rejected() {
        let state = StateSliceEvent {
            start_time: vec![0.0, 10.0],
            end_time: vec![5.0],
        };
        assert!(state.validate().is_err());
    }

    #[test]
    fn ordered_slices_pass() {
        let state = StateSliceEvent {
            start_time: vec![0.0, 10.0],
            end_time: vec![5.0, 20.0],
        };
        assert!(state.validate().is_ok());
    }
}
