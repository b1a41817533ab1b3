use crate::enums::{Facility, Instrument};
use crate::validation::{Validate, ValidationErrors};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Period sentinel meaning "reduce every period of a multi-period run".
pub const ALL_PERIODS: usize = 0;

/// Identity of the measured runs and the instrument metadata resolved for
/// them. Populated from file metadata by an external provider; the
/// ingestion pipeline only reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateData {
    pub instrument: Instrument,
    pub facility: Facility,
    /// Run name of the sample scatter measurement, e.g. `SANS2D00022024`.
    pub sample_scatter: String,
    pub sample_scatter_run_number: u64,
    pub sample_scatter_period: usize,
    pub sample_transmission: Option<String>,
    pub sample_direct: Option<String>,
    pub can_scatter: Option<String>,
    pub can_transmission: Option<String>,
    pub can_direct: Option<String>,
    pub idf_file_path: Option<PathBuf>,
    pub ipf_file_path: Option<PathBuf>,
}

impl StateData {
    pub fn new(
        instrument: Instrument,
        facility: Facility,
        sample_scatter: impl Into<String>,
        sample_scatter_run_number: u64,
    ) -> Self {
        Self {
            instrument,
            facility,
            sample_scatter: sample_scatter.into(),
            sample_scatter_run_number,
            sample_scatter_period: ALL_PERIODS,
            sample_transmission: None,
            sample_direct: None,
            can_scatter: None,
            can_transmission: None,
            can_direct: None,
            idf_file_path: None,
            ipf_file_path: None,
        }
    }
}

impl Validate for StateData {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if self.sample_scatter.is_empty() {
            errors.push(
                "sample_scatter",
                "a sample scatter run must be specified",
                "\"\"",
            );
        }
        if self.instrument == Instrument::NoInstrument {
            errors.push(
                "instrument",
                "no instrument was resolved for the sample scatter run",
                self.instrument,
            );
        }
        errors.into_result()
    }
}
