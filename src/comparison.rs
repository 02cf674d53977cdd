//! Modification-time comparison for change detection
//!
//! A destination file is in sync with its source exactly when their
//! modification timestamps are equal. "Newer-than" is deliberately not
//! used: drift in either direction re-copies, which is idempotent and
//! safe, at worst a spurious re-copy. A missing destination never
//! compares equal.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use std::time::SystemTime;

use anyhow::Context;

use crate::error::Result;

/// Timestamp comparator
pub struct TimestampComparator;

impl TimestampComparator {
    /// Get the modification time of a file
    ///
    /// # Errors
    ///
    /// Returns an error if file metadata cannot be read.
    pub fn modified(path: &Path) -> Result<SystemTime> {
        let metadata = fs::metadata(path)
            .with_context(|| format!("Failed to read metadata for: {}", path.display()))?;

        metadata
            .modified()
            .with_context(|| format!("Failed to get modification time for: {}", path.display()))
    }

    /// Check whether source and destination carry the same modification
    /// time. A missing destination is never in sync.
    ///
    /// # Errors
    ///
    /// Returns an error if the source metadata cannot be read, or the
    /// destination exists but its metadata cannot be read.
    pub fn in_sync(source: &Path, destination: &Path) -> Result<bool> {
        let source_time = Self::modified(source)?;

        let dest_time = match fs::metadata(destination) {
            Ok(metadata) => metadata.modified().with_context(|| {
                format!(
                    "Failed to get modification time for: {}",
                    destination.display()
                )
            })?,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(false),
            Err(e) => {
                return Err(e).with_context(|| {
                    format!("Failed to read metadata for: {}", destination.display())
                });
            }
        };

        Ok(source_time == dest_time)
    }
}
