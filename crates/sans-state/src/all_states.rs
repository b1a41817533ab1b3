//! The aggregate reduction state: one slot per sub-domain.

use crate::error::StateError;
use crate::states::{
    StateAdjustment, StateConvertToQ, StateData, StateMask, StateMove, StateNormalizeToMonitor,
    StateReductionMode, StateSave, StateScale, StateSliceEvent, StateWavelength,
};
use crate::validation::Validate;
use serde::{Deserialize, Serialize};

/// Everything the reduction engine needs for one run.
///
/// Constructed empty; slots are assigned during ingestion and building and
/// the whole aggregate is handed to the engine read-only. Every slot is
/// mandatory.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AllStates {
    pub data: Option<StateData>,
    pub move_state: Option<StateMove>,
    pub reduction: Option<StateReductionMode>,
    pub mask: Option<StateMask>,
    pub wavelength: Option<StateWavelength>,
    pub save: Option<StateSave>,
    pub scale: Option<StateScale>,
    pub adjustment: Option<StateAdjustment>,
    pub convert_to_q: Option<StateConvertToQ>,
    pub slice: Option<StateSliceEvent>,
    pub normalize_to_monitor: Option<StateNormalizeToMonitor>,
}

impl AllStates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate the aggregate in slot order.
    ///
    /// All slots are checked for presence first; the first unset slot fails
    /// before any entity validation runs. Entity failures are reported with
    /// the slot they occurred in, carrying the entity's full failure list.
    pub fn validate(&self) -> Result<(), StateError> {
        let data = require(&self.data, "data")?;
        let move_state = require(&self.move_state, "move")?;
        let reduction = require(&self.reduction, "reduction")?;
        let mask = require(&self.mask, "mask")?;
        let wavelength = require(&self.wavelength, "wavelength")?;
        let save = require(&self.save, "save")?;
        let scale = require(&self.scale, "scale")?;
        let adjustment = require(&self.adjustment, "adjustment")?;
        let convert_to_q = require(&self.convert_to_q, "convert_to_q")?;
        let slice = require(&self.slice, "slice")?;
        let normalize_to_monitor = require(&self.normalize_to_monitor, "normalize_to_monitor")?;

        check(data, "data")?;
        check(move_state, "move")?;
        check(reduction, "reduction")?;
        check(mask, "mask")?;
        check(wavelength, "wavelength")?;
        check(save, "save")?;
        check(scale, "scale")?;
        check(adjustment, "adjustment")?;
        check(convert_to_q, "convert_to_q")?;
        check(slice, "slice")?;
        check(normalize_to_monitor, "normalize_to_monitor")?;
        Ok(())
    }
}

fn require<'a, T>(slot: &'a Option<T>, name: &'static str) -> Result<&'a T, StateError> {
    slot.as_ref().ok_or(StateError::MissingSlot { slot: name })
}

fn check<T: Validate>(entity: &T, slot: &'static str) -> Result<(), StateError> {
    entity
        .validate()
        .map_err(|errors| StateError::Invalid { slot, errors })
}
