//! Detector and monitor names as supplied by the external IDF/IPF lookup.
//!
//! The instrument definition files are parsed elsewhere; this crate only
//! consumes the resulting name lists when populating a move state.

use crate::enums::DetectorType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Full and short name of one detector bank, as listed in the IPF.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectorNames {
    pub name: String,
    pub short_name: String,
}

impl DetectorNames {
    pub fn new(name: impl Into<String>, short_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            short_name: short_name.into(),
        }
    }
}

/// Name lists returned by the instrument-definition lookup for one run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InstrumentDefinition {
    /// Bank names per detector type, from the IPF.
    pub detector_names: BTreeMap<DetectorType, DetectorNames>,
    /// Monitor names keyed by monitor number, from the IDF.
    pub monitor_names: BTreeMap<u8, String>,
}

impl InstrumentDefinition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_detector(mut self, bank: DetectorType, names: DetectorNames) -> Self {
        self.detector_names.insert(bank, names);
        self
    }

    pub fn with_monitor(mut self, number: u8, name: impl Into<String>) -> Self {
        self.monitor_names.insert(number, name.into());
        self
    }
}
