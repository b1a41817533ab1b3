//! Reference schema for the V1 user file and the key validator.
//!
//! TOML itself has no schema mechanism, so the accepted key set is checked
//! here: both the reference schema and the candidate document are flattened
//! into dotted paths and every candidate path must appear in the reference.

use crate::error::{ParseError, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;
use toml::{Table, Value};

/// One node of the reference schema.
enum SchemaNode {
    /// A nested block of named sub-nodes.
    Map(BTreeMap<&'static str, SchemaNode>),
    /// A fixed family of alternative leaf field names, e.g. `{x, y, z}`
    /// under a position block.
    Group(&'static [&'static str]),
    /// A plain value-typed field.
    Leaf,
}

/// Every configuration path the V1 format accepts, exactly once.
fn reference_schema() -> SchemaNode {
    let instrument = SchemaNode::Map(BTreeMap::from([
        ("name", SchemaNode::Leaf),
        (
            "configuration",
            SchemaNode::Group(&[
                "collimation_length",
                "gravity_extra_length",
                "norm_monitor",
                "sample_aperture_diameter",
                "sample_offset",
                "trans_monitor",
            ]),
        ),
    ]));

    let detector = SchemaNode::Map(BTreeMap::from([(
        "configuration",
        SchemaNode::Map(BTreeMap::from([
            ("selected_detector", SchemaNode::Leaf),
            ("rear_scale", SchemaNode::Leaf),
            ("front_centre", SchemaNode::Group(&["x", "y", "z"])),
            ("rear_centre", SchemaNode::Group(&["x", "y", "z"])),
        ])),
    )]));

    let binning = SchemaNode::Map(BTreeMap::from([
        (
            "wavelength",
            SchemaNode::Group(&["start", "step", "stop", "type"]),
        ),
        ("1d_reduction", SchemaNode::Group(&["binning"])),
        ("2d_reduction", SchemaNode::Group(&["step", "stop", "type"])),
    ]));

    SchemaNode::Map(BTreeMap::from([
        ("instrument", instrument),
        ("detector", detector),
        ("binning", binning),
    ]))
}

fn flatten_schema(node: &SchemaNode, path: &str, out: &mut BTreeSet<String>) {
    match node {
        SchemaNode::Map(children) => {
            for (key, child) in children {
                flatten_schema(child, &join(path, key), out);
            }
        }
        SchemaNode::Group(names) => {
            for name in *names {
                out.insert(join(path, name));
            }
        }
        SchemaNode::Leaf => {
            out.insert(path.to_string());
        }
    }
}

fn flatten_table(table: &Table, path: &str, out: &mut BTreeSet<String>) {
    for (key, value) in table {
        let new_path = join(path, key);
        match value {
            Value::Table(child) => flatten_table(child, &new_path, out),
            _ => {
                out.insert(new_path);
            }
        }
    }
}

fn join(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}

fn reference_paths() -> &'static BTreeSet<String> {
    static PATHS: OnceLock<BTreeSet<String>> = OnceLock::new();
    PATHS.get_or_init(|| {
        let mut out = BTreeSet::new();
        flatten_schema(&reference_schema(), "", &mut out);
        out
    })
}

/// Checks a candidate document against the reference schema.
pub struct TomlSchemaValidator {
    candidate_paths: BTreeSet<String>,
}

impl TomlSchemaValidator {
    pub fn new(document: &Table) -> Self {
        let mut candidate_paths = BTreeSet::new();
        flatten_table(document, "", &mut candidate_paths);
        Self { candidate_paths }
    }

    /// Fails with the full sorted list of unrecognised paths, not just the
    /// first one.
    pub fn validate(&self) -> Result<()> {
        let reference = reference_paths();
        let unrecognised: Vec<String> = self
            .candidate_paths
            .iter()
            .filter(|path| !reference.contains(*path))
            .cloned()
            .collect();

        if unrecognised.is_empty() {
            Ok(())
        } else {
            Err(ParseError::UnrecognizedKeys { keys: unrecognised })
        }
    }
}
