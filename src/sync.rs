//! One-way synchronization engine
//!
//! A pass runs in two phases. Phase 1 walks every source mod directory,
//! copies added or updated files into the destination tree, and records
//! every relative name it saw. Phase 2 deletes destination files the
//! ledger owns that no source supplied this pass, then drops them from
//! the ledger. The ledger is persisted only when it changed.

mod executor;
mod orchestrator;
mod reporting;

pub use orchestrator::SyncEngine;
pub use reporting::ChangeReporter;

/// Outcome of one synchronization pass
#[derive(Debug, Clone, Default)]
pub struct PassSummary {
    /// Files copied into the destination tree
    pub copied: usize,
    /// Files skipped because source and destination were in sync
    pub skipped: usize,
    /// Destination files deleted because their source disappeared
    pub deleted: usize,
    /// Source directories skipped because they are not managed mods
    pub unmanaged: usize,
    /// Distinct titles of mods affected this pass, in first-seen order
    pub changes: Vec<String>,
}

impl PassSummary {
    /// Total file operations performed
    #[must_use]
    pub const fn total_operations(&self) -> usize {
        self.copied + self.deleted
    }

    /// Whether the host should surface the change list to the user
    #[must_use]
    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }
}
