//! Snapshot engine configuration
//!
//! Loaded from TOML; every key is optional and falls back to its default.
//!
//! ```toml
//! [snapshot]
//! max_depth = 10
//! ```

use serde::Deserialize;
use std::path::Path;

use crate::errors::{ExError, ExErrorKind, Result};

/// Deepest nesting level a finished good may reach below the root
pub const DEFAULT_MAX_DEPTH: usize = 10;

/// Engine settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SnapshotConfig {
    /// Maximum composite nesting depth (root is depth 0)
    pub max_depth: usize,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    snapshot: SnapshotConfig,
}

impl SnapshotConfig {
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Parse a TOML document with an optional `[snapshot]` table.
    ///
    /// # Errors
    ///
    /// `InvalidInput` if the document is not valid TOML or a value has the
    /// wrong type.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let file: ConfigFile = toml::from_str(raw).map_err(|e| {
            ExError::new(ExErrorKind::InvalidInput)
                .with_op("load_config")
                .with_message(format!("Invalid snapshot config: {}", e))
        })?;
        Ok(file.snapshot)
    }

    /// Read and parse a TOML config file.
    ///
    /// # Errors
    ///
    /// `Io` if the file cannot be read, `InvalidInput` if it does not parse.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| {
            ExError::new(ExErrorKind::Io)
                .with_op("load_config")
                .with_entity_id(path.display())
                .with_message(e.to_string())
        })?;
        Self::from_toml_str(&raw)
    }
}
