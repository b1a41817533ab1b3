//! The typed configuration records, one per reduction-pipeline concern.

mod adjustment;
mod compatibility;
mod convert_to_q;
mod data;
mod mask;
mod move_detectors;
mod reduction;
mod save;
mod scale;
mod slice;
mod transmission;
mod wavelength;

pub use adjustment::{StateAdjustment, StateNormalizeToMonitor, StateWavelengthAndPixelAdjustment};
pub use compatibility::StateCompatibility;
pub use convert_to_q::StateConvertToQ;
pub use data::{ALL_PERIODS, StateData};
pub use mask::StateMask;
pub use move_detectors::{MoveInstrument, StateMove, StateMoveDetectors};
pub use reduction::StateReductionMode;
pub use save::{SaveFormat, StateSave};
pub use scale::StateScale;
pub use slice::StateSliceEvent;
pub use transmission::StateCalculateTransmission;
pub use wavelength::StateWavelength;
