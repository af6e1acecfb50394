//! Database schema definitions

use std::path::Path;
use crate::{Error, Result};

/// Built-in schema script, identical to the `schema.sql` shipped with the crate.
pub const DEFAULT_SCHEMA: &str = include_str!("../../schema.sql");

/// Read a schema script from disk
pub fn load_schema(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|source| Error::SchemaLoad {
        path: path.to_path_buf(),
        source,
    })
}
