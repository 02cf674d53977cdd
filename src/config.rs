//! Pass configuration supplied by the host application

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::error::Result;

fn default_ledger_path() -> PathBuf {
    PathBuf::from("addonsync.txt")
}

fn default_descriptor_name() -> String {
    "modexport.cfg".to_string()
}

fn default_managed_extension() -> String {
    "modcfg".to_string()
}

/// Configuration for one synchronization pass.
///
/// The host resolves the source and destination roots before the pass
/// starts. The remaining fields default to the stock game layout and only
/// need overriding in tests or unusual installations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Root directory holding one subdirectory per source mod
    pub source_root: PathBuf,

    /// Root of the destination tree the synchronizer writes into
    pub dest_root: PathBuf,

    /// Location of the persisted ownership ledger
    #[serde(default = "default_ledger_path")]
    pub ledger_path: PathBuf,

    /// File name identifying a mod descriptor, matched case-insensitively
    #[serde(default = "default_descriptor_name")]
    pub descriptor_name: String,

    /// Extension of destination-side config files whose deletion should
    /// report a title
    #[serde(default = "default_managed_extension")]
    pub managed_extension: String,
}

impl SyncConfig {
    /// Create a configuration with default file names for the given roots
    #[must_use]
    pub fn new(source_root: impl Into<PathBuf>, dest_root: impl Into<PathBuf>) -> Self {
        Self {
            source_root: source_root.into(),
            dest_root: dest_root.into(),
            ledger_path: default_ledger_path(),
            descriptor_name: default_descriptor_name(),
            managed_extension: default_managed_extension(),
        }
    }

    /// Load a configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&text)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}
