//! # addonsync
//!
//! One-way synchronizer for externally sourced mod directories.
//!
//! The crate mirrors a set of source mod directories (one per subscribed
//! workshop item) into the addons tree of the hosting game, remembers every
//! file it has written in a persisted ledger, and removes destination files
//! whose source has disappeared.
//!
//! The host application drives one pass at a time: [`SyncEngine::run`] loads
//! the ledger, reconciles additions and updates against every source mod,
//! reconciles deletions against the ledger, persists the ledger when it
//! changed, and returns a [`PassSummary`] carrying the affected mod titles
//! for display.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Core error types for the addonsync library
pub mod error {
    /// Result type alias using `anyhow::Error`
    pub type Result<T> = anyhow::Result<T>;
}

pub mod cfgnode;
pub mod comparison;
pub mod config;
pub mod descriptor;
pub mod ledger;
pub mod scanner;
pub mod sync;

pub use cfgnode::CfgNode;
pub use config::SyncConfig;
pub use descriptor::ModDescriptor;
pub use ledger::Ledger;
pub use sync::{ChangeReporter, PassSummary, SyncEngine};
