//! Per-instrument factory for validated [`StateMove`] values.
//!
//! Each instrument gets its own builder variant seeding the instrument's
//! physical defaults and consulting the externally supplied instrument
//! definition for detector and monitor names. Names are never set through
//! generic setters; see [`MoveBuilder::excluded_fields`].

use crate::enums::{DetectorType, Instrument};
use crate::error::{Result, StateError};
use crate::instrument_info::InstrumentDefinition;
use crate::states::{StateData, StateMove};
use crate::validation::Validate;

/// Millimetre to metre divisor used for positional user input.
const MM_TO_M: f64 = 1000.0;

/// Last LARMOR run recorded with positions in millimetres; later runs are
/// already in metres.
pub const LARMOR_MM_RUN_LIMIT: u64 = 2217;

/// Beam-centre search radius window (mm) for LOQ.
// TODO: the high-angle bank on LOQ prefers 96-750.
pub const LOQ_BEAM_CENTRE_RADIUS_MM: (f64, f64) = (96.0, 216.0);

/// Beam-centre search radius window (mm) for every other instrument.
pub const DEFAULT_BEAM_CENTRE_RADIUS_MM: (f64, f64) = (60.0, 280.0);

/// Fields that must never be populated from generic user input; they come
/// from the instrument definition instead.
const EXCLUDED_FIELDS: &[&str] = &["detector_name", "detector_name_short", "monitor_names"];

/// Monitors absent from the SANS2D setup.
const SANS2D_INVALID_MONITORS: &[&str] = &["monitor5", "monitor6", "monitor7", "monitor8"];

/// Monitors absent from the LARMOR and ZOOM setups. Both also lack the
/// high-angle bank their IPF still lists.
const LARMOR_ZOOM_INVALID_MONITORS: &[&str] = &[
    "monitor6",
    "monitor7",
    "monitor8",
    "monitor9",
    "monitor10",
];

/// Builder for one instrument's move state.
///
/// Obtain one through [`get_move_builder`]; the variant is selected by the
/// instrument recorded in the data state.
#[derive(Debug, Clone)]
pub struct MoveBuilder {
    state: StateMove,
    pos1_divisor: f64,
}

/// Select the builder variant for the instrument in `data_info`.
///
/// Fails with [`StateError::UnsupportedInstrument`] when no variant exists,
/// echoing the full data state for diagnosis. Defaults are never silently
/// substituted from another instrument.
pub fn get_move_builder(
    data_info: &StateData,
    instrument_definition: &InstrumentDefinition,
) -> Result<MoveBuilder> {
    match data_info.instrument {
        Instrument::Loq => Ok(MoveBuilder::for_loq(instrument_definition)),
        Instrument::Sans2d => Ok(MoveBuilder::for_sans2d(instrument_definition)),
        Instrument::Larmor => Ok(MoveBuilder::for_larmor(
            instrument_definition,
            data_info.sample_scatter_run_number,
        )),
        Instrument::Zoom => Ok(MoveBuilder::for_zoom(instrument_definition)),
        Instrument::NoInstrument => Err(StateError::UnsupportedInstrument {
            instrument: data_info.instrument.to_string(),
            data_info: format!("{data_info:?}"),
        }),
    }
}

impl MoveBuilder {
    fn for_loq(instrument_definition: &InstrumentDefinition) -> Self {
        let mut state = StateMove::for_instrument(Instrument::Loq);
        (state.beam_centre_radius_min_mm, state.beam_centre_radius_max_mm) =
            LOQ_BEAM_CENTRE_RADIUS_MM;
        apply_instrument_definition(&mut state, instrument_definition, &[], &[]);
        Self {
            state,
            pos1_divisor: MM_TO_M,
        }
    }

    fn for_sans2d(instrument_definition: &InstrumentDefinition) -> Self {
        let mut state = StateMove::for_instrument(Instrument::Sans2d);
        (state.beam_centre_radius_min_mm, state.beam_centre_radius_max_mm) =
            DEFAULT_BEAM_CENTRE_RADIUS_MM;
        apply_instrument_definition(
            &mut state,
            instrument_definition,
            &[],
            SANS2D_INVALID_MONITORS,
        );
        Self {
            state,
            pos1_divisor: MM_TO_M,
        }
    }

    fn for_larmor(instrument_definition: &InstrumentDefinition, run_number: u64) -> Self {
        let mut state = StateMove::for_instrument(Instrument::Larmor);
        (state.beam_centre_radius_min_mm, state.beam_centre_radius_max_mm) =
            DEFAULT_BEAM_CENTRE_RADIUS_MM;
        apply_instrument_definition(
            &mut state,
            instrument_definition,
            &[DetectorType::Hab],
            LARMOR_ZOOM_INVALID_MONITORS,
        );
        // The apparatus switched from mm to m after run 2217.
        let pos1_divisor = if run_number <= LARMOR_MM_RUN_LIMIT {
            MM_TO_M
        } else {
            1.0
        };
        Self { state, pos1_divisor }
    }

    fn for_zoom(instrument_definition: &InstrumentDefinition) -> Self {
        let mut state = StateMove::for_instrument(Instrument::Zoom);
        (state.beam_centre_radius_min_mm, state.beam_centre_radius_max_mm) =
            DEFAULT_BEAM_CENTRE_RADIUS_MM;
        apply_instrument_definition(
            &mut state,
            instrument_definition,
            &[DetectorType::Hab],
            LARMOR_ZOOM_INVALID_MONITORS,
        );
        Self {
            state,
            pos1_divisor: MM_TO_M,
        }
    }

    /// Field names this builder refuses to set generically.
    pub fn excluded_fields(&self) -> &'static [&'static str] {
        EXCLUDED_FIELDS
    }

    pub fn with_sample_offset(mut self, offset: f64) -> Self {
        self.state.sample_offset = offset;
        self
    }

    /// Set the translation corrections for one bank. Banks the instrument
    /// does not have are ignored; callers that must report an absent bank
    /// check `StateMove::detector` first.
    pub fn with_translation_correction(
        mut self,
        bank: DetectorType,
        x: f64,
        y: f64,
        z: f64,
    ) -> Self {
        if let Some(detector) = self.state.detector_mut(bank) {
            detector.x_translation_correction = x;
            detector.y_translation_correction = y;
            detector.z_translation_correction = z;
        }
        self
    }

    /// Convert a user-supplied first beam-centre coordinate to metres.
    pub fn convert_pos1(&self, value: f64) -> f64 {
        value / self.pos1_divisor
    }

    /// Convert a user-supplied second beam-centre coordinate to metres.
    pub fn convert_pos2(&self, value: f64) -> f64 {
        value / MM_TO_M
    }

    /// Validate the accumulated state and hand back an independent copy.
    /// The builder can build repeatedly; copies never alias each other.
    pub fn build(&self) -> Result<StateMove> {
        self.state
            .validate()
            .map_err(|errors| StateError::Invalid {
                slot: "move",
                errors,
            })?;
        Ok(self.state.clone())
    }
}

/// Copy detector and monitor names from the instrument definition onto the
/// move state, skipping banks and monitors the instrument does not have.
fn apply_instrument_definition(
    state: &mut StateMove,
    instrument_definition: &InstrumentDefinition,
    invalid_detector_types: &[DetectorType],
    invalid_monitor_names: &[&str],
) {
    for (bank, names) in &instrument_definition.detector_names {
        if invalid_detector_types.contains(bank) {
            continue;
        }
        if let Some(detector) = state.detector_mut(*bank) {
            detector.detector_name = Some(names.name.clone());
            detector.detector_name_short = Some(names.short_name.clone());
        }
    }
    for (number, name) in &instrument_definition.monitor_names {
        if invalid_monitor_names.contains(&name.as_str()) {
            continue;
        }
        state.monitor_names.insert(*number, name.clone());
    }
}
