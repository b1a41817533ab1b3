//! V1 user-file parser: walks the validated document and populates the
//! typed state entities.

use crate::error::{ParseError, Result};
use crate::schema::TomlSchemaValidator;
use sans_state::{
    DetectorType, Instrument, InstrumentDefinition, RangeStepType, ReductionMode, StateAdjustment,
    StateCalculateTransmission, StateCompatibility, StateConvertToQ, StateData, StateMask,
    StateMove, StateNormalizeToMonitor, StateReductionMode, StateSave, StateScale,
    StateSliceEvent, StateWavelength, StateWavelengthAndPixelAdjustment, get_move_builder,
};
use std::str::FromStr;
use toml::{Table, Value};
use tracing::debug;

const ONE_D_BINNING_KEY: &str = "binning.1d_reduction.binning";

/// Parses a V1 TOML user file into reduction sub-states.
///
/// The whole document is checked against the reference schema before any
/// state is populated; a single unrecognised key aborts ingestion. Every
/// recognised key is optional except `instrument.name`.
#[derive(Debug)]
pub struct TomlV1Parser {
    data_info: StateData,
    instrument: Instrument,
    move_state: StateMove,
    reduction_mode: StateReductionMode,
    scale: StateScale,
    wavelength: StateWavelength,
    convert_to_q: StateConvertToQ,
    calculate_transmission: StateCalculateTransmission,
}

impl TomlV1Parser {
    pub fn new(
        document: &Table,
        data_info: StateData,
        instrument_definition: &InstrumentDefinition,
    ) -> Result<Self> {
        TomlSchemaValidator::new(document).validate()?;
        debug!("user file keys validated against the V1 schema");

        let instrument = resolve_instrument(document)?;

        let mut parser = Self {
            instrument,
            move_state: get_move_builder(&data_info, instrument_definition)?.build()?,
            reduction_mode: StateReductionMode::default(),
            scale: StateScale::default(),
            wavelength: StateWavelength::default(),
            convert_to_q: StateConvertToQ::default(),
            calculate_transmission: StateCalculateTransmission::for_instrument(instrument),
            data_info,
        };

        parser.parse_instrument_configuration(document)?;
        parser.parse_detector_configuration(document)?;
        parser.parse_binning(document)?;
        debug!(instrument = %parser.instrument, "user file parsed");
        Ok(parser)
    }

    /// The instrument named by the user file itself.
    pub fn instrument(&self) -> Instrument {
        self.instrument
    }

    pub fn get_state_data(&self) -> &StateData {
        &self.data_info
    }

    pub fn get_state_move_detectors(&self) -> &StateMove {
        &self.move_state
    }

    pub fn get_state_reduction_mode(&self) -> &StateReductionMode {
        &self.reduction_mode
    }

    pub fn get_state_scale(&self) -> &StateScale {
        &self.scale
    }

    pub fn get_state_wavelength(&self) -> &StateWavelength {
        &self.wavelength
    }

    pub fn get_state_convert_to_q(&self) -> &StateConvertToQ {
        &self.convert_to_q
    }

    pub fn get_state_calculate_transmission(&self) -> &StateCalculateTransmission {
        &self.calculate_transmission
    }

    /// Not provided by the TOML ingestion path.
    pub fn get_state_adjustment(&self) -> Option<StateAdjustment> {
        None
    }

    /// Not provided by the TOML ingestion path.
    pub fn get_state_compatibility(&self) -> Option<StateCompatibility> {
        None
    }

    /// Not provided by the TOML ingestion path.
    pub fn get_state_mask_detectors(&self) -> Option<StateMask> {
        None
    }

    /// Not provided by the TOML ingestion path.
    pub fn get_state_normalize_to_monitor(&self) -> Option<StateNormalizeToMonitor> {
        None
    }

    /// Not provided by the TOML ingestion path.
    pub fn get_state_save(&self) -> Option<StateSave> {
        None
    }

    /// Not provided by the TOML ingestion path.
    pub fn get_state_slice_event(&self) -> Option<StateSliceEvent> {
        None
    }

    /// Not provided by the TOML ingestion path.
    pub fn get_state_wavelength_and_pixel_adjustment(
        &self,
    ) -> Option<StateWavelengthAndPixelAdjustment> {
        None
    }

    fn parse_instrument_configuration(&mut self, document: &Table) -> Result<()> {
        if let Some(monitor) = get_i64(document, &["instrument", "configuration", "norm_monitor"])?
        {
            self.calculate_transmission.incident_monitor = Some(monitor);
        }
        if let Some(monitor) =
            get_i64(document, &["instrument", "configuration", "trans_monitor"])?
        {
            self.calculate_transmission.transmission_monitor = Some(monitor);
        }

        self.convert_to_q.q_resolution_collimation_length =
            get_f64(document, &["instrument", "configuration", "collimation_length"])?;
        self.convert_to_q.gravity_extra_length =
            get_f64(document, &["instrument", "configuration", "gravity_extra_length"])?;
        self.convert_to_q.q_resolution_a2 = get_f64(
            document,
            &["instrument", "configuration", "sample_aperture_diameter"],
        )?;

        if let Some(offset) = get_f64(document, &["instrument", "configuration", "sample_offset"])?
        {
            self.move_state.sample_offset = offset;
        }
        Ok(())
    }

    fn parse_detector_configuration(&mut self, document: &Table) -> Result<()> {
        if let Some(scale) = get_f64(document, &["detector", "configuration", "rear_scale"])? {
            self.scale.scale = Some(scale);
        }

        if let Some(selected) =
            get_str(document, &["detector", "configuration", "selected_detector"])?
        {
            self.reduction_mode.reduction_mode =
                ReductionMode::from_str(selected).map_err(|message| ParseError::InvalidValue {
                    key: "detector.configuration.selected_detector".to_string(),
                    value: selected.to_string(),
                    message,
                })?;
        }

        // front_centre moves the high-angle bank, rear_centre the low-angle bank.
        self.update_translations(document, "front_centre", DetectorType::Hab)?;
        self.update_translations(document, "rear_centre", DetectorType::Lab)?;
        Ok(())
    }

    /// Apply a `{x, y, z}` centre block to one bank's translation
    /// corrections. A present block must be complete.
    fn update_translations(
        &mut self,
        document: &Table,
        key: &str,
        bank: DetectorType,
    ) -> Result<()> {
        let path = ["detector", "configuration", key];
        if lookup(document, &path).is_none() {
            return Ok(());
        }

        let x = require_f64(document, &["detector", "configuration", key, "x"])?;
        let y = require_f64(document, &["detector", "configuration", key, "y"])?;
        let z = require_f64(document, &["detector", "configuration", key, "z"])?;

        let detector =
            self.move_state
                .detector_mut(bank)
                .ok_or_else(|| ParseError::InvalidValue {
                    key: path.join("."),
                    value: bank.to_string(),
                    message: format!("the {} has no {bank} bank", self.data_info.instrument),
                })?;
        detector.x_translation_correction = x;
        detector.y_translation_correction = y;
        detector.z_translation_correction = z;
        Ok(())
    }

    fn parse_binning(&mut self, document: &Table) -> Result<()> {
        self.wavelength.wavelength_low =
            get_f64(document, &["binning", "wavelength", "start"])?;
        self.wavelength.wavelength_step =
            get_f64(document, &["binning", "wavelength", "step"])?;
        self.wavelength.wavelength_high =
            get_f64(document, &["binning", "wavelength", "stop"])?;
        if let Some(step_type) = get_str(document, &["binning", "wavelength", "type"])? {
            self.wavelength.wavelength_step_type = parse_step_type(
                step_type,
                "binning.wavelength.type",
            )?;
        }

        if let Some(one_d_binning) = get_str(document, &["binning", "1d_reduction", "binning"])? {
            let (q_min, q_rebin, q_max) = convert_1d_binning_string(one_d_binning)?;
            self.convert_to_q.q_min = Some(q_min);
            self.convert_to_q.q_1d_rebin_string = Some(q_rebin);
            self.convert_to_q.q_max = Some(q_max);
        }

        self.convert_to_q.q_xy_max = get_f64(document, &["binning", "2d_reduction", "stop"])?;
        self.convert_to_q.q_xy_step = get_f64(document, &["binning", "2d_reduction", "step"])?;
        if let Some(step_type) = get_str(document, &["binning", "2d_reduction", "type"])? {
            self.convert_to_q.q_xy_step_type = Some(parse_step_type(
                step_type,
                "binning.2d_reduction.type",
            )?);
        }
        Ok(())
    }
}

/// Resolve the mandatory `instrument.name` key.
fn resolve_instrument(document: &Table) -> Result<Instrument> {
    let value = lookup(document, &["instrument", "name"]).ok_or_else(|| ParseError::MissingKey {
        key: "instrument.name".to_string(),
    })?;
    let name = value.as_str().ok_or_else(|| ParseError::InvalidValue {
        key: "instrument.name".to_string(),
        value: value.to_string(),
        message: "expected a string".to_string(),
    })?;
    Instrument::from_str(name).map_err(|message| ParseError::InvalidValue {
        key: "instrument.name".to_string(),
        value: name.to_string(),
        message,
    })
}

/// Decode the 1-D reduction binning string.
///
/// Three tokens give `(low, step, high)`; five tokens embed a variable-step
/// rebin descriptor formed from the interior tokens. Anything else is
/// malformed.
fn convert_1d_binning_string(value: &str) -> Result<(f64, String, f64)> {
    let tokens: Vec<&str> = value.split(',').map(str::trim).collect();

    let number = |token: &str| -> Result<f64> {
        token.parse().map_err(|_| ParseError::InvalidValue {
            key: ONE_D_BINNING_KEY.to_string(),
            value: value.to_string(),
            message: format!("'{token}' is not a number"),
        })
    };

    match tokens.len() {
        3 => Ok((number(tokens[0])?, tokens[1].to_string(), number(tokens[2])?)),
        5 => Ok((
            number(tokens[0])?,
            tokens[1..4].join(","),
            number(tokens[4])?,
        )),
        _ => Err(ParseError::MalformedBinning {
            value: value.to_string(),
        }),
    }
}

fn parse_step_type(value: &str, key: &str) -> Result<RangeStepType> {
    RangeStepType::from_str(value).map_err(|message| ParseError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        message,
    })
}

/// Walk an ordered key path through nested tables. Missing keys anywhere
/// along the path, or a non-table where a table is needed, mean "absent".
fn lookup<'a>(table: &'a Table, path: &[&str]) -> Option<&'a Value> {
    let (first, rest) = path.split_first()?;
    let mut current = table.get(*first)?;
    for key in rest {
        current = current.as_table()?.get(*key)?;
    }
    Some(current)
}

fn get_f64(table: &Table, path: &[&str]) -> Result<Option<f64>> {
    match lookup(table, path) {
        None => Ok(None),
        Some(Value::Float(f)) => Ok(Some(*f)),
        Some(Value::Integer(i)) => Ok(Some(*i as f64)),
        Some(other) => Err(ParseError::InvalidValue {
            key: path.join("."),
            value: other.to_string(),
            message: "expected a number".to_string(),
        }),
    }
}

fn require_f64(table: &Table, path: &[&str]) -> Result<f64> {
    get_f64(table, path)?.ok_or_else(|| ParseError::MissingKey {
        key: path.join("."),
    })
}

fn get_i64(table: &Table, path: &[&str]) -> Result<Option<i64>> {
    match lookup(table, path) {
        None => Ok(None),
        Some(Value::Integer(i)) => Ok(Some(*i)),
        Some(other) => Err(ParseError::InvalidValue {
            key: path.join("."),
            value: other.to_string(),
            message: "expected an integer".to_string(),
        }),
    }
}

fn get_str<'a>(table: &'a Table, path: &[&str]) -> Result<Option<&'a str>> {
    match lookup(table, path) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(other) => Err(ParseError::InvalidValue {
            key: path.join("."),
            value: other.to_string(),
            message: "expected a string".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn any_three_token_string_decodes_to_its_bounds(
            low in -1.0e6..1.0e6f64,
            step in -1.0e6..1.0e6f64,
            high in -1.0e6..1.0e6f64,
        ) {
            let text = format!("{low},{step},{high}");
            let (decoded_low, rebin, decoded_high) =
                convert_1d_binning_string(&text).unwrap();
            prop_assert_eq!(decoded_low, low);
            prop_assert_eq!(rebin, format!("{step}"));
            prop_assert_eq!(decoded_high, high);
        }
    }

    #[test]
    fn three_token_binning_decodes() {
        let (low, rebin, high) = convert_1d_binning_string("1.0,0.1,2.0").unwrap();
        assert_eq!(low, 1.0);
        assert_eq!(rebin, "0.1");
        assert_eq!(high, 2.0);
    }

    #[test]
    fn five_token_binning_embeds_rebin_descriptor() {
        let (low, rebin, high) = convert_1d_binning_string("1.0, 0.1, 2.0, -0.2, 3.0").unwrap();
        assert_eq!(low, 1.0);
        assert_eq!(rebin, "0.1,2.0,-0.2");
        assert_eq!(high, 3.0);
    }

    #[test]
    fn four_token_binning_is_malformed() {
        match convert_1d_binning_string("1.0,0.1,2.0,3.0") {
            Err(ParseError::MalformedBinning { value }) => {
                assert_eq!(value, "1.0,0.1,2.0,3.0");
            }
            other => panic!("expected a malformed binning error, got {other:?}"),
        }
    }

    #[test]
    fn non_numeric_bound_is_rejected() {
        assert!(matches!(
            convert_1d_binning_string("a,0.1,2.0"),
            Err(ParseError::InvalidValue { .. })
        ));
    }

    #[test]
    fn lookup_stops_at_non_tables() {
        let document: Table =
            toml::from_str("instrument.name = \"LOQ\"").expect("test document is valid TOML");
        assert!(lookup(&document, &["instrument", "name"]).is_some());
        assert!(lookup(&document, &["instrument", "name", "deeper"]).is_none());
        assert!(lookup(&document, &["missing", "key"]).is_none());
    }
}
