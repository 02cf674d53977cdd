//! File operations against the destination tree

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::Context;
use filetime::FileTime;

use crate::error::Result;

/// Executes copy and delete operations for the sync engine
#[derive(Debug, Default)]
pub struct FileOperationExecutor;

impl FileOperationExecutor {
    /// Create a new executor
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Copy a source file over its destination, overwriting.
    ///
    /// The destination parent directory is created when missing, and the
    /// source modification time is carried over so the pair compares as in
    /// sync on the next pass.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation, the copy, or the timestamp
    /// update fails.
    pub fn copy_file(&self, source: &Path, dest: &Path) -> Result<()> {
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        fs::copy(source, dest)
            .with_context(|| format!("Failed to copy {} to {}", source.display(), dest.display()))?;

        let metadata = fs::metadata(source)
            .with_context(|| format!("Failed to read metadata for: {}", source.display()))?;
        filetime::set_file_mtime(dest, FileTime::from_last_modification_time(&metadata))
            .with_context(|| {
                format!("Failed to set modification time on: {}", dest.display())
            })?;

        tracing::debug!("Copied {} => {}", source.display(), dest.display());
        Ok(())
    }

    /// Delete a destination file. Returns whether a file was actually
    /// deleted.
    ///
    /// A file that is already gone is tolerated: the caller is repairing a
    /// stale ledger entry, and dropping the entry is the repair.
    ///
    /// # Errors
    ///
    /// Returns an error on any filesystem failure other than the file
    /// being absent.
    pub fn remove_file(&self, dest: &Path) -> Result<bool> {
        match fs::remove_file(dest) {
            Ok(()) => {
                tracing::debug!("Deleted {}", dest.display());
                Ok(true)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e).with_context(|| format!("Failed to delete: {}", dest.display())),
        }
    }
}
