use crate::error::{ParseError, Result};
use std::path::Path;
use toml::Table;
use tracing::debug;

/// Read a TOML user file into its raw document form.
pub fn read_user_file(path: &Path) -> Result<Table> {
    let contents = std::fs::read_to_string(path).map_err(|source| ParseError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let document: Table = toml::from_str(&contents).map_err(|source| ParseError::Toml {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), keys = document.len(), "read user file");
    Ok(document)
}
