//! Source tree enumeration
//!
//! The source root holds one subdirectory per externally sourced mod,
//! identified by an opaque ID (the directory name, e.g. a workshop item
//! ID). Listings are sorted so logs and reports come out the same on every
//! platform; correctness never depends on ordering.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use walkdir::WalkDir;

use crate::error::Result;

/// One source mod directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModDir {
    /// Opaque identifier, taken from the directory name
    pub id: String,
    /// Path of the directory
    pub path: PathBuf,
}

/// List the mod directories under the source root.
///
/// Non-directory entries are ignored. A missing source root yields an
/// empty list: nothing is subscribed yet.
///
/// # Errors
///
/// Returns an error if the source root exists but cannot be listed.
pub fn mod_dirs(source_root: &Path) -> Result<Vec<ModDir>> {
    if !source_root.exists() {
        return Ok(Vec::new());
    }

    let entries = fs::read_dir(source_root)
        .with_context(|| format!("Failed to list source root: {}", source_root.display()))?;

    let mut dirs = Vec::new();
    for entry in entries {
        let entry = entry
            .with_context(|| format!("Failed to list source root: {}", source_root.display()))?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let Some(id) = entry.file_name().to_str().map(ToString::to_string) else {
            tracing::warn!("Skipping non-UTF-8 source directory: {}", path.display());
            continue;
        };
        dirs.push(ModDir { id, path });
    }

    dirs.sort_by(|a, b| a.id.cmp(&b.id));
    Ok(dirs)
}

/// Recursively list every file under a mod directory
///
/// # Errors
///
/// Returns an error if directory traversal fails.
pub fn files_under(mod_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(mod_dir).sort_by_file_name().follow_links(false) {
        let entry = entry
            .with_context(|| format!("Failed to walk mod directory: {}", mod_dir.display()))?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_mod_dirs_lists_only_directories() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("200")).unwrap();
        fs::create_dir(tmp.path().join("100")).unwrap();
        fs::write(tmp.path().join("stray.txt"), "not a mod").unwrap();

        let dirs = mod_dirs(tmp.path()).unwrap();

        let ids: Vec<&str> = dirs.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["100", "200"]);
    }

    #[test]
    fn test_mod_dirs_missing_root() {
        let tmp = TempDir::new().unwrap();
        let dirs = mod_dirs(&tmp.path().join("absent")).unwrap();
        assert!(dirs.is_empty());
    }

    #[test]
    fn test_mod_dirs_empty_root() {
        let tmp = TempDir::new().unwrap();
        let dirs = mod_dirs(tmp.path()).unwrap();
        assert!(dirs.is_empty());
    }

    #[test]
    fn test_files_under_recursive() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("a.txt"), "a").unwrap();
        let nested = tmp.path().join("data").join("deep");
        fs::create_dir_all(&nested).unwrap();
        fs::write(nested.join("b.txt"), "b").unwrap();

        let files = files_under(tmp.path()).unwrap();

        assert_eq!(files.len(), 2);
        assert!(files.iter().any(|p| p.ends_with("a.txt")));
        assert!(files.iter().any(|p| p.ends_with("data/deep/b.txt")));
    }

    #[test]
    fn test_files_under_skips_directories() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir(tmp.path().join("empty")).unwrap();

        let files = files_under(tmp.path()).unwrap();
        assert!(files.is_empty());
    }
}
