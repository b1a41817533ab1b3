//! End-to-end parsing of V1 user-file documents.

use sans_ingest::{ParseError, TomlV1Parser};
use sans_state::{
    DetectorNames, DetectorType, Facility, Instrument, InstrumentDefinition, RangeStepType,
    ReductionMode, StateData,
};
use toml::Table;

fn instrument_definition() -> InstrumentDefinition {
    let mut definition = InstrumentDefinition::new()
        .with_detector(DetectorType::Lab, DetectorNames::new("rear-detector", "rear"))
        .with_detector(DetectorType::Hab, DetectorNames::new("front-detector", "front"));
    for number in 1..=4u8 {
        definition = definition.with_monitor(number, format!("monitor{number}"));
    }
    definition
}

fn data_info() -> StateData {
    StateData::new(Instrument::Sans2d, Facility::Isis, "SANS2D00022024", 22024)
}

fn document(text: &str) -> Table {
    toml::from_str(text).expect("test document is valid TOML")
}

/// Parse a document, filling in `instrument.name` when the test does not
/// care about it.
fn parse(mut document: Table) -> Result<TomlV1Parser, ParseError> {
    let instrument = document
        .entry("instrument")
        .or_insert_with(|| Table::new().into());
    if let Some(table) = instrument.as_table_mut()
        && !table.contains_key("name")
    {
        table.insert("name".to_string(), "LOQ".into());
    }
    TomlV1Parser::new(&document, data_info(), &instrument_definition())
}

#[test]
fn instrument_name_resolves_to_the_enum() {
    let parser = parse(document("instrument.name = \"SANS2D\"")).unwrap();
    assert_eq!(parser.instrument(), Instrument::Sans2d);

    let parser = parse(document("instrument.name = \"LARMOR\"")).unwrap();
    assert_eq!(parser.instrument(), Instrument::Larmor);
}

#[test]
fn unknown_instrument_fails_before_anything_else() {
    let err = parse(document("instrument.name = \"NONSENSE\"")).unwrap_err();
    assert!(matches!(err, ParseError::InvalidValue { ref key, .. } if key == "instrument.name"));
}

#[test]
fn missing_instrument_name_is_a_hard_failure() {
    let doc = document("instrument.configuration.sample_offset = 8.0");
    let err = TomlV1Parser::new(&doc, data_info(), &instrument_definition()).unwrap_err();
    assert!(matches!(err, ParseError::MissingKey { ref key } if key == "instrument.name"));
    assert_eq!(err.to_string(), "instrument.name is missing");
}

#[test]
fn unrecognised_keys_are_reported_together() {
    let err = parse(document(
        r#"
        [instrument]
        name = "LOQ"
        unknown_one = 1

        [binning]
        unknown_two = 2
        "#,
    ))
    .unwrap_err();
    match err {
        ParseError::UnrecognizedKeys { keys } => {
            assert_eq!(keys.len(), 2);
            assert!(keys.contains(&"instrument.unknown_one".to_string()));
            assert!(keys.contains(&"binning.unknown_two".to_string()));
        }
        other => panic!("expected unrecognised keys, got {other:?}"),
    }
}

#[test]
fn full_reference_document_parses() {
    let parser = parse(document(
        r#"
        [instrument]
        name = "SANS2D"

        [instrument.configuration]
        collimation_length = 4.0
        gravity_extra_length = 0.5
        norm_monitor = 1
        sample_aperture_diameter = 8.0
        sample_offset = 53.0
        trans_monitor = 4

        [detector.configuration]
        selected_detector = "rear"
        rear_scale = 0.074
        front_centre = { x = 1.0, y = 2.0, z = 3.0 }
        rear_centre = { x = 2.0, y = 3.0, z = 4.0 }

        [binning.wavelength]
        start = 1.75
        step = 0.125
        stop = 16.5
        type = "Lin"

        [binning.1d_reduction]
        binning = "1.0,0.1,2.0"

        [binning.2d_reduction]
        step = 0.002
        stop = 0.1
        type = "Lin"
        "#,
    ))
    .unwrap();

    assert_eq!(
        parser.get_state_calculate_transmission().incident_monitor,
        Some(1)
    );
    assert_eq!(
        parser.get_state_calculate_transmission().transmission_monitor,
        Some(4)
    );
    let convert_to_q = parser.get_state_convert_to_q();
    assert_eq!(convert_to_q.q_resolution_collimation_length, Some(4.0));
    assert_eq!(convert_to_q.gravity_extra_length, Some(0.5));
    assert_eq!(convert_to_q.q_resolution_a2, Some(8.0));
    assert_eq!(parser.get_state_move_detectors().sample_offset, 53.0);
    assert_eq!(parser.get_state_scale().scale, Some(0.074));
    assert_eq!(
        parser.get_state_reduction_mode().reduction_mode,
        ReductionMode::Lab
    );
}

#[test]
fn centre_blocks_map_onto_the_right_banks() {
    let parser = parse(document(
        r#"
        [detector.configuration]
        front_centre = { x = 1.0, y = 2.0, z = 3.0 }
        rear_centre = { x = 2.0, y = 3.0, z = 4.0 }
        "#,
    ))
    .unwrap();

    let state = parser.get_state_move_detectors();
    let hab = state.detector(DetectorType::Hab).unwrap();
    assert_eq!(
        (
            hab.x_translation_correction,
            hab.y_translation_correction,
            hab.z_translation_correction
        ),
        (1.0, 2.0, 3.0)
    );
    let lab = state.detector(DetectorType::Lab).unwrap();
    assert_eq!(
        (
            lab.x_translation_correction,
            lab.y_translation_correction,
            lab.z_translation_correction
        ),
        (2.0, 3.0, 4.0)
    );
}

#[test]
fn incomplete_centre_block_names_the_missing_axis() {
    let err = parse(document(
        "detector.configuration.front_centre = { x = 1.0, y = 2.0 }",
    ))
    .unwrap_err();
    assert!(matches!(
        err,
        ParseError::MissingKey { ref key } if key == "detector.configuration.front_centre.z"
    ));
}

#[test]
fn selected_detector_decodes_and_defaults() {
    let parser = parse(document("detector.configuration.selected_detector = \"all\"")).unwrap();
    assert_eq!(
        parser.get_state_reduction_mode().reduction_mode,
        ReductionMode::All
    );

    let parser = parse(document("detector.configuration.rear_scale = 1.0")).unwrap();
    assert_eq!(
        parser.get_state_reduction_mode().reduction_mode,
        ReductionMode::NotSet
    );
}

#[test]
fn wavelength_binning_decodes_both_step_types() {
    for (name, expected) in [("Lin", RangeStepType::Lin), ("Log", RangeStepType::Log)] {
        let parser = parse(document(&format!(
            r#"
            [binning.wavelength]
            start = 1.1
            step = 0.1
            stop = 2.2
            type = "{name}"
            "#
        )))
        .unwrap();
        let wavelength = parser.get_state_wavelength();
        assert_eq!(wavelength.wavelength_low, Some(1.1));
        assert_eq!(wavelength.wavelength_step, Some(0.1));
        assert_eq!(wavelength.wavelength_high, Some(2.2));
        assert_eq!(wavelength.wavelength_step_type, expected);
    }
}

#[test]
fn one_d_binning_string_populates_convert_to_q() {
    let parser = parse(document(
        "binning.1d_reduction.binning = \"1.0, 0.1, 2.0, -0.2, 3.0\"",
    ))
    .unwrap();
    let convert_to_q = parser.get_state_convert_to_q();
    assert_eq!(convert_to_q.q_min, Some(1.0));
    assert_eq!(convert_to_q.q_max, Some(3.0));
    assert_eq!(
        convert_to_q.q_1d_rebin_string.as_deref(),
        Some("0.1,2.0,-0.2")
    );
}

#[test]
fn four_token_binning_string_fails_with_the_offending_string() {
    let err = parse(document(
        "binning.1d_reduction.binning = \"1.0,0.1,2.0,3.0\"",
    ))
    .unwrap_err();
    match err {
        ParseError::MalformedBinning { value } => assert_eq!(value, "1.0,0.1,2.0,3.0"),
        other => panic!("expected a malformed binning error, got {other:?}"),
    }
    assert!(
        ParseError::MalformedBinning {
            value: "1,2,3,4".to_string()
        }
        .to_string()
        .contains("three or five comma separated binning values are needed")
    );
}

#[test]
fn wrong_typed_string_keys_are_rejected() {
    let cases = [
        (
            "detector.configuration.selected_detector = 5",
            "detector.configuration.selected_detector",
        ),
        ("binning.wavelength.type = 7", "binning.wavelength.type"),
        ("binning.2d_reduction.type = 7", "binning.2d_reduction.type"),
        (
            "binning.1d_reduction.binning = 5",
            "binning.1d_reduction.binning",
        ),
    ];
    for (text, expected_key) in cases {
        let err = parse(document(text)).unwrap_err();
        match err {
            ParseError::InvalidValue { ref key, ref message, .. } => {
                assert_eq!(key, expected_key);
                assert_eq!(message, "expected a string");
            }
            other => panic!("expected an invalid value for {expected_key}, got {other:?}"),
        }
    }
}

#[test]
fn two_d_binning_decodes() {
    let parser = parse(document(
        r#"
        [binning.2d_reduction]
        step = 1.0
        stop = 5.0
        type = "Lin"
        "#,
    ))
    .unwrap();
    let convert_to_q = parser.get_state_convert_to_q();
    assert_eq!(convert_to_q.q_xy_step, Some(1.0));
    assert_eq!(convert_to_q.q_xy_max, Some(5.0));
    assert_eq!(convert_to_q.q_xy_step_type, Some(RangeStepType::Lin));
}

#[test]
fn move_state_follows_metadata_not_the_document() {
    // The builder is keyed by the externally resolved instrument, even when
    // the document names a different one.
    let parser = parse(document("instrument.name = \"LOQ\"")).unwrap();
    assert_eq!(parser.get_state_data().instrument, Instrument::Sans2d);
    assert_eq!(parser.get_state_move_detectors().detectors.len(), 2);
}

#[test]
fn placeholder_accessors_return_nothing() {
    let parser = parse(document("instrument.name = \"LOQ\"")).unwrap();
    assert!(parser.get_state_adjustment().is_none());
    assert!(parser.get_state_compatibility().is_none());
    assert!(parser.get_state_mask_detectors().is_none());
    assert!(parser.get_state_normalize_to_monitor().is_none());
    assert!(parser.get_state_save().is_none());
    assert!(parser.get_state_slice_event().is_none());
    assert!(parser.get_state_wavelength_and_pixel_adjustment().is_none());
}
