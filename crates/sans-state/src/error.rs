use crate::validation::ValidationErrors;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StateError {
    /// A mandatory aggregate slot was never assigned.
    #[error("missing mandatory state slot: {slot}")]
    MissingSlot { slot: &'static str },

    /// A state entity failed validation; carries every failing field.
    #[error("invalid {slot} state: {errors}")]
    Invalid {
        slot: &'static str,
        errors: ValidationErrors,
    },

    /// No move builder variant exists for the instrument in the data state.
    #[error("no move builder for instrument {instrument}; data state: {data_info}")]
    UnsupportedInstrument {
        instrument: String,
        data_info: String,
    },
}

pub type Result<T> = std::result::Result<T, StateError>;
