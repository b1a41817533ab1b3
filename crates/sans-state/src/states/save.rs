use crate::validation::{Validate, ValidationErrors};
use serde::{Deserialize, Serialize};

/// Output file formats the reduced data can be written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SaveFormat {
    Nexus,
    CanSas,
    NxCanSas,
    Rkh,
    Csv,
}

/// How and where the reduced output is saved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateSave {
    pub user_specified_output_name: Option<String>,
    pub file_formats: Vec<SaveFormat>,
    /// Replace zero errors with a large value so fitting tools accept the file.
    pub zero_free_correction: bool,
}

impl Default for StateSave {
    fn default() -> Self {
        Self {
            user_specified_output_name: None,
            file_formats: Vec::new(),
            zero_free_correction: true,
        }
    }
}

impl Validate for StateSave {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Some(name) = &self.user_specified_output_name
            && name.is_empty()
        {
            errors.push(
                "user_specified_output_name",
                "an output name must not be empty when given",
                "\"\"",
            );
        }
        errors.into_result()
    }
}
