use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The ISIS small-angle scattering instruments this state system supports.
///
/// `NoInstrument` is the sentinel used before file metadata has resolved a
/// real instrument; no builder variant exists for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Instrument {
    Loq,
    Sans2d,
    Larmor,
    Zoom,
    NoInstrument,
}

impl Instrument {
    pub fn as_str(&self) -> &'static str {
        match self {
            Instrument::Loq => "LOQ",
            Instrument::Sans2d => "SANS2D",
            Instrument::Larmor => "LARMOR",
            Instrument::Zoom => "ZOOM",
            Instrument::NoInstrument => "NO_INSTRUMENT",
        }
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Instrument {
    type Err = String;

    /// Parse an instrument name as it appears in user files (case-insensitive).
    /// The sentinel is deliberately not accepted as user input.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "LOQ" => Ok(Instrument::Loq),
            "SANS2D" => Ok(Instrument::Sans2d),
            "LARMOR" => Ok(Instrument::Larmor),
            "ZOOM" => Ok(Instrument::Zoom),
            _ => Err(format!("Unknown instrument: {}", s)),
        }
    }
}

/// Facility operating the instrument. Only ISIS instruments are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Facility {
    Isis,
}

impl Facility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Facility::Isis => "ISIS",
        }
    }
}

impl fmt::Display for Facility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The two physical detector banks on a SANS instrument.
///
/// LAB is the low-angle (rear) bank, HAB the high-angle (front) bank.
/// LARMOR and ZOOM only carry a low-angle bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DetectorType {
    Lab,
    Hab,
}

impl DetectorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DetectorType::Lab => "LAB",
            DetectorType::Hab => "HAB",
        }
    }
}

impl fmt::Display for DetectorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DetectorType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "LAB" | "REAR" => Ok(DetectorType::Lab),
            "HAB" | "FRONT" => Ok(DetectorType::Hab),
            _ => Err(format!("Unknown detector type: {}", s)),
        }
    }
}

/// Which detector bank(s) the reduction should produce output for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ReductionMode {
    /// Sentinel for "the user file did not select a detector".
    #[default]
    NotSet,
    Lab,
    Hab,
    Merged,
    All,
}

impl ReductionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReductionMode::NotSet => "NotSet",
            ReductionMode::Lab => "rear",
            ReductionMode::Hab => "front",
            ReductionMode::Merged => "merged",
            ReductionMode::All => "all",
        }
    }
}

impl fmt::Display for ReductionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ReductionMode {
    type Err = String;

    /// Parse a `selected_detector` value. Accepts both the bank spellings
    /// used in user files (rear/front) and the internal bank names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "REAR" | "LAB" => Ok(ReductionMode::Lab),
            "FRONT" | "HAB" => Ok(ReductionMode::Hab),
            "MERGED" => Ok(ReductionMode::Merged),
            "ALL" => Ok(ReductionMode::All),
            _ => Err(format!("Unknown reduction mode: {}", s)),
        }
    }
}

/// Step type of a binning range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RangeStepType {
    #[default]
    Lin,
    Log,
}

impl RangeStepType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RangeStepType::Lin => "Lin",
            RangeStepType::Log => "Log",
        }
    }
}

impl fmt::Display for RangeStepType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RangeStepType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "LIN" | "LINEAR" => Ok(RangeStepType::Lin),
            "LOG" | "LOGARITHMIC" => Ok(RangeStepType::Log),
            _ => Err(format!("Unknown range step type: {}", s)),
        }
    }
}

/// Canonical coordinate axis, used for the sample-offset direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
        };
        write!(f, "{}", s)
    }
}

/// Geometric shape of the sample, used for the volume scale correction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SampleShape {
    Cylinder,
    FlatPlate,
    Disc,
}

impl SampleShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            SampleShape::Cylinder => "Cylinder",
            SampleShape::FlatPlate => "FlatPlate",
            SampleShape::Disc => "Disc",
        }
    }
}

impl fmt::Display for SampleShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn instrument_parses_case_insensitively() {
        assert_eq!("sans2d".parse::<Instrument>().unwrap(), Instrument::Sans2d);
        assert_eq!(" LARMOR ".parse::<Instrument>().unwrap(), Instrument::Larmor);
        assert!("NONSENSE".parse::<Instrument>().is_err());
        assert!("NO_INSTRUMENT".parse::<Instrument>().is_err());
    }

    #[test]
    fn reduction_mode_accepts_bank_spellings() {
        assert_eq!("rear".parse::<ReductionMode>().unwrap(), ReductionMode::Lab);
        assert_eq!("front".parse::<ReductionMode>().unwrap(), ReductionMode::Hab);
        assert_eq!("all".parse::<ReductionMode>().unwrap(), ReductionMode::All);
        assert_eq!(ReductionMode::default(), ReductionMode::NotSet);
    }

    #[test]
    fn range_step_type_parses() {
        assert_eq!("Lin".parse::<RangeStepType>().unwrap(), RangeStepType::Lin);
        assert_eq!("Log".parse::<RangeStepType>().unwrap(), RangeStepType::Log);
        assert!("Quadratic".parse::<RangeStepType>().is_err());
    }
}
