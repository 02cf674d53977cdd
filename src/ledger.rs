//! Persisted ownership ledger
//!
//! The ledger is the set of destination-relative paths the synchronizer has
//! written and is responsible for cleaning up. It persists as a flat text
//! file, one path per line. A path is present exactly when the synchronizer
//! created or last updated that destination file and has not yet confirmed
//! its removal.

use std::collections::BTreeSet;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::Context;

use crate::error::Result;

/// Set of destination-relative paths owned by the synchronizer
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    entries: BTreeSet<String>,
    dirty: bool,
}

impl Ledger {
    /// Create an empty ledger
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a ledger from a line-delimited text file.
    ///
    /// Each non-empty line is one relative path; duplicate lines collapse.
    /// A missing file yields an empty ledger: there is no prior state the
    /// first time the synchronizer runs.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read.
    pub fn load(path: &Path) -> Result<Self> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::new()),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read ledger: {}", path.display()));
            }
        };

        let entries = text
            .lines()
            .filter(|line| !line.is_empty())
            .map(ToString::to_string)
            .collect();

        Ok(Self {
            entries,
            dirty: false,
        })
    }

    /// Persist the ledger, one path per line, replacing any previous file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save(&mut self, path: &Path) -> Result<()> {
        let mut text = String::new();
        for entry in &self.entries {
            text.push_str(entry);
            text.push('\n');
        }

        fs::write(path, text)
            .with_context(|| format!("Failed to write ledger: {}", path.display()))?;
        self.dirty = false;
        Ok(())
    }

    /// Whether the ledger holds the given relative path
    #[must_use]
    pub fn contains(&self, relative: &str) -> bool {
        self.entries.contains(relative)
    }

    /// Record a relative path; a path already present leaves the ledger
    /// unchanged
    pub fn insert(&mut self, relative: &str) {
        if self.entries.insert(relative.to_string()) {
            self.dirty = true;
        }
    }

    /// Drop a relative path from the ledger
    pub fn remove(&mut self, relative: &str) {
        if self.entries.remove(relative) {
            self.dirty = true;
        }
    }

    /// Iterate the entries in sorted order
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the ledger has no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the ledger changed since it was loaded or last saved
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }
}
