pub mod all_states;
pub mod enums;
pub mod error;
pub mod instrument_info;
pub mod move_builder;
pub mod states;
pub mod validation;

pub use all_states::AllStates;
pub use enums::{
    Axis, DetectorType, Facility, Instrument, RangeStepType, ReductionMode, SampleShape,
};
pub use error::{Result, StateError};
pub use instrument_info::{DetectorNames, InstrumentDefinition};
pub use move_builder::{MoveBuilder, get_move_builder};
pub use states::{
    StateAdjustment, StateCalculateTransmission, StateCompatibility, StateConvertToQ, StateData,
    StateMask, StateMove, StateMoveDetectors, StateNormalizeToMonitor, StateReductionMode,
    StateSave, StateScale, StateSliceEvent, StateWavelength, StateWavelengthAndPixelAdjustment,
};
pub use validation::{Validate, ValidationErrors, ValidationFailure};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_state_serializes() {
        let state = StateMove::for_instrument(Instrument::Sans2d);
        let json = serde_json::to_string(&state).expect("serialize move state");
        let round: StateMove = serde_json::from_str(&json).expect("deserialize move state");
        assert_eq!(round.detectors.len(), 2);
        assert_eq!(round.sample_offset_direction, Axis::Z);
    }

    #[test]
    fn all_states_starts_empty() {
        let state = AllStates::default();
        assert!(state.data.is_none());
        assert!(state.validate().is_err());
    }
}
