//! Mod descriptor discovery and parsing
//!
//! Each managed source mod carries a descriptor file naming its display
//! title and the folder it installs into under the destination root.
//! Destination-side per-mod runtime configs use a second, nested layout
//! whose title is only read when labeling a deletion. The two formats are
//! genuinely different file types and stay separate parse paths.

use std::path::{Path, PathBuf};

use anyhow::Context;
use walkdir::WalkDir;

use crate::cfgnode::CfgNode;
use crate::error::Result;

/// Descriptor key holding the mod's display title
const TITLE_KEY: &str = "Title";
/// Descriptor key holding the destination folder name
const FOLDER_KEY: &str = "ModFolderName";
/// Outer node of a managed runtime config
const MODCFG_NODE: &str = "ModCFG";
/// Title key inside the `ModCFG` node
const MODCFG_TITLE_KEY: &str = "title";

/// Parsed mod descriptor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModDescriptor {
    /// Display title shown to the user when the mod changes
    pub title: Option<String>,

    /// Folder name under the destination root; `None` marks the source
    /// directory as not a managed mod
    pub mod_folder_name: Option<String>,
}

impl ModDescriptor {
    /// Parse a descriptor file.
    ///
    /// Both fields are optional in the file; the caller decides what an
    /// absent `ModFolderName` means.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn parse(path: &Path) -> Result<Self> {
        let node = CfgNode::load(path)
            .with_context(|| format!("Failed to parse descriptor: {}", path.display()))?;

        Ok(Self {
            title: node.value(TITLE_KEY).map(ToString::to_string),
            mod_folder_name: node.value(FOLDER_KEY).map(ToString::to_string),
        })
    }
}

/// Whether a path's file name case-insensitively matches the descriptor
/// file name
#[must_use]
pub fn is_descriptor(path: &Path, descriptor_name: &str) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.eq_ignore_ascii_case(descriptor_name))
}

/// Locate the descriptor file anywhere under a source mod directory.
///
/// The first match in traversal order wins. `None` means the directory is
/// not a managed mod and must be skipped wholesale.
///
/// # Errors
///
/// Returns an error if directory traversal fails.
pub fn find_descriptor(mod_dir: &Path, descriptor_name: &str) -> Result<Option<PathBuf>> {
    for entry in WalkDir::new(mod_dir).sort_by_file_name().follow_links(false) {
        let entry = entry
            .with_context(|| format!("Failed to walk mod directory: {}", mod_dir.display()))?;
        if entry.file_type().is_file() && is_descriptor(entry.path(), descriptor_name) {
            return Ok(Some(entry.into_path()));
        }
    }
    Ok(None)
}

/// Extract the display title from a managed runtime config file.
///
/// Used only to label a deletion in the change report, so every failure
/// mode (missing file, parse error, missing node, missing or empty key)
/// collapses to `None` rather than blocking the deletion itself.
#[must_use]
pub fn managed_config_title(path: &Path) -> Option<String> {
    let node = CfgNode::load(path).ok()?;
    let title = node.child(MODCFG_NODE)?.value(MODCFG_TITLE_KEY)?;
    if title.is_empty() {
        None
    } else {
        Some(title.to_string())
    }
}
