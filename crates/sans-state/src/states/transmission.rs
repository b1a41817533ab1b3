use crate::enums::Instrument;
use crate::validation::{Validate, ValidationErrors};
use serde::{Deserialize, Serialize};

/// Monitors used for the transmission calculation.
///
/// The defaults differ per instrument; a user file can override them with
/// `norm_monitor` / `trans_monitor`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateCalculateTransmission {
    pub incident_monitor: Option<i64>,
    pub transmission_monitor: Option<i64>,
    pub default_incident_monitor: i64,
    pub default_transmission_monitor: i64,
}

impl StateCalculateTransmission {
    pub fn for_instrument(instrument: Instrument) -> Self {
        let (default_incident_monitor, default_transmission_monitor) = match instrument {
            Instrument::Loq => (2, 3),
            Instrument::Sans2d => (2, 4),
            Instrument::Larmor => (2, 3),
            Instrument::Zoom => (3, 4),
            Instrument::NoInstrument => (1, 2),
        };
        Self {
            incident_monitor: None,
            transmission_monitor: None,
            default_incident_monitor,
            default_transmission_monitor,
        }
    }

    /// The monitor the reduction will actually normalise against.
    pub fn effective_incident_monitor(&self) -> i64 {
        self.incident_monitor.unwrap_or(self.default_incident_monitor)
    }

    pub fn effective_transmission_monitor(&self) -> i64 {
        self.transmission_monitor
            .unwrap_or(self.default_transmission_monitor)
    }
}

impl Validate for StateCalculateTransmission {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        for (field, value) in [
            ("incident_monitor", self.incident_monitor),
            ("transmission_monitor", self.transmission_monitor),
        ] {
            if let Some(monitor) = value
                && monitor <= 0
            {
                errors.push(field, "monitor numbers start at 1", monitor);
            }
        }
        errors.into_result()
    }
}
