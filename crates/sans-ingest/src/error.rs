use sans_state::StateError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while ingesting a TOML user file.
#[derive(Debug, Error)]
pub enum ParseError {
    /// Failed to read the user file from disk.
    #[error("failed to read user file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The user file is not valid TOML.
    #[error("failed to parse user file {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// The document contains keys outside the reference schema. All
    /// offending keys are reported together.
    #[error("the following keys were not recognised: {}", keys.join(", "))]
    UnrecognizedKeys { keys: Vec<String> },

    /// A key the parser treats as mandatory is absent.
    #[error("{key} is missing")]
    MissingKey { key: String },

    /// A recognised key holds a value of the wrong type or spelling.
    #[error("invalid value for {key}: {message} (got {value})")]
    InvalidValue {
        key: String,
        value: String,
        message: String,
    },

    /// The 1-D reduction binning string has the wrong token count.
    #[error("three or five comma separated binning values are needed, got {value}")]
    MalformedBinning { value: String },

    #[error(transparent)]
    State(#[from] StateError),
}

pub type Result<T> = std::result::Result<T, ParseError>;
