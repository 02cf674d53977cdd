//! Sync orchestration - the two-phase reconciliation pass

use std::collections::HashSet;
use std::path::Path;

use anyhow::Context;

use super::PassSummary;
use super::executor::FileOperationExecutor;
use super::reporting::ChangeReporter;
use crate::comparison::TimestampComparator;
use crate::config::SyncConfig;
use crate::descriptor::{self, ModDescriptor};
use crate::error::Result;
use crate::ledger::Ledger;
use crate::scanner::{self, ModDir};

/// Main sync engine.
///
/// One engine instance performs one pass: reconcile additions and updates
/// from every source mod, then reconcile deletions against the ledger,
/// then persist the ledger when it changed. Callers guarantee that a pass
/// runs to completion before another starts; the engine holds no global
/// state and takes no lock.
pub struct SyncEngine {
    config: SyncConfig,
    ledger: Ledger,
    /// Relative names supplied by some source this pass. Only complete
    /// once every source has been scanned, which is why deletions wait.
    present: HashSet<String>,
    reporter: ChangeReporter,
    executor: FileOperationExecutor,
}

impl SyncEngine {
    /// Create an engine for one pass
    #[must_use]
    pub fn new(config: SyncConfig) -> Self {
        Self {
            config,
            ledger: Ledger::new(),
            present: HashSet::new(),
            reporter: ChangeReporter::new(),
            executor: FileOperationExecutor::new(),
        }
    }

    /// Execute the pass.
    ///
    /// # Errors
    ///
    /// Filesystem failures abort the pass, except the absences each
    /// component tolerates (missing ledger, missing descriptor, missing
    /// deletion target). A partial pass is recoverable: the next pass
    /// re-derives everything from current source state.
    pub fn run(&mut self) -> Result<PassSummary> {
        tracing::info!(
            "Sync pass starting: {} => {}",
            self.config.source_root.display(),
            self.config.dest_root.display()
        );
        self.ledger = Ledger::load(&self.config.ledger_path)?;

        let mut summary = PassSummary::default();
        self.reconcile_sources(&mut summary)?;
        self.reconcile_deletions(&mut summary)?;

        if self.ledger.is_dirty() {
            self.ledger.save(&self.config.ledger_path)?;
        }
        summary.changes = self.reporter.flush();

        tracing::info!(
            "Sync pass finished: {} copied, {} skipped, {} deleted",
            summary.copied,
            summary.skipped,
            summary.deleted
        );
        Ok(summary)
    }

    /// Phase 1: bring the destination up to date with every source mod
    fn reconcile_sources(&mut self, summary: &mut PassSummary) -> Result<()> {
        for mod_dir in scanner::mod_dirs(&self.config.source_root)? {
            self.sync_mod(&mod_dir, summary)?;
        }
        Ok(())
    }

    fn sync_mod(&mut self, mod_dir: &ModDir, summary: &mut PassSummary) -> Result<()> {
        let Some(descriptor_path) =
            descriptor::find_descriptor(&mod_dir.path, &self.config.descriptor_name)?
        else {
            tracing::debug!("Skipping {}: no descriptor", mod_dir.id);
            summary.unmanaged += 1;
            return Ok(());
        };

        let parsed = ModDescriptor::parse(&descriptor_path)?;
        let Some(folder) = parsed.mod_folder_name else {
            tracing::debug!("Skipping {}: descriptor has no folder name", mod_dir.id);
            summary.unmanaged += 1;
            return Ok(());
        };
        tracing::info!("Mod {} installs into {}", mod_dir.id, folder);

        for file in scanner::files_under(&mod_dir.path)? {
            if descriptor::is_descriptor(&file, &self.config.descriptor_name) {
                continue;
            }

            let relative = relative_name(&folder, &mod_dir.path, &file)?;
            let dest = self.config.dest_root.join(&relative);

            self.present.insert(relative.clone());
            self.ledger.insert(&relative);

            if TimestampComparator::in_sync(&file, &dest)? {
                summary.skipped += 1;
                continue;
            }

            self.executor.copy_file(&file, &dest)?;
            summary.copied += 1;
            tracing::info!("Updated {}", relative);
            if let Some(title) = &parsed.title {
                self.reporter.report_changed(title);
            }
        }
        Ok(())
    }

    /// Phase 2: delete owned destination files no source supplies anymore.
    ///
    /// Runs strictly after every source was scanned: an earlier delete
    /// could destroy a relative name that a later-processed source still
    /// supplies.
    fn reconcile_deletions(&mut self, summary: &mut PassSummary) -> Result<()> {
        let stale: Vec<String> = self
            .ledger
            .iter()
            .filter(|entry| !self.present.contains(*entry))
            .map(ToString::to_string)
            .collect();

        for relative in stale {
            let dest = self.config.dest_root.join(&relative);

            if self.is_managed_config(&relative) {
                if let Some(title) = descriptor::managed_config_title(&dest) {
                    self.reporter.report_removed(&title);
                }
            }

            if self.executor.remove_file(&dest)? {
                summary.deleted += 1;
                tracing::info!("Removed {}", relative);
            }
            self.ledger.remove(&relative);
        }
        Ok(())
    }

    fn is_managed_config(&self, relative: &str) -> bool {
        Path::new(relative)
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case(self.config.managed_extension.as_str()))
    }
}

/// Destination-relative name for a file within a mod, forward-slash
/// separated on every platform
fn relative_name(folder: &str, mod_root: &Path, file: &Path) -> Result<String> {
    let within = file.strip_prefix(mod_root).with_context(|| {
        format!(
            "File {} is outside mod root {}",
            file.display(),
            mod_root.display()
        )
    })?;

    let mut name = String::from(folder);
    for component in within.components() {
        let part = component
            .as_os_str()
            .to_str()
            .with_context(|| format!("Non-UTF-8 path component in: {}", file.display()))?;
        name.push('/');
        name.push_str(part);
    }
    Ok(name)
}
