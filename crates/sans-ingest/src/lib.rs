//! TOML user-file ingestion for the SANS reduction state system.
//!
//! A user file is a nested TOML document describing how a scattering
//! experiment should be reduced. Ingestion rejects any key outside the
//! reference schema, then populates typed `sans-state` entities from the
//! recognised paths. Missing recognised keys are fine and leave the
//! instrument defaults in place; unrecognised extra keys are fatal.

mod error;
mod parser;
mod reader;
mod schema;

pub use error::{ParseError, Result};
pub use parser::TomlV1Parser;
pub use reader::read_user_file;
pub use schema::TomlSchemaValidator;
