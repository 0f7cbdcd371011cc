// src/commands/clean_backups.rs
use crate::core::gate::Gate;
use crate::core::vault::Vault;
use crate::utils::dry_run_prefix;
use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Backups found in one pass over the vault.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BackupCleanup {
    pub deleted: Vec<PathBuf>,
    /// Backups whose original is gone; these are the only copy left.
    pub kept: Vec<PathBuf>,
    pub failed: Vec<PathBuf>,
}

impl BackupCleanup {
    #[inline]
    #[must_use]
    pub fn found(&self) -> usize {
        self.deleted.len() + self.kept.len() + self.failed.len()
    }
}

/// `note.md.bak` -> `note.md`.
fn original_path(backup: &Path, extension: &str) -> Option<PathBuf> {
    let name = backup.file_name()?.to_str()?;
    let stem = name.strip_suffix(extension)?.strip_suffix('.')?;
    if stem.is_empty() {
        return None;
    }
    Some(backup.with_file_name(stem))
}

/// Removes every backup whose original still sits next to it.
#[inline]
pub fn clean(vault: &Vault, gate: &Gate) -> BackupCleanup {
    let extension = &vault.config().backup_extension;
    let mut cleanup = BackupCleanup::default();
    if extension.is_empty() {
        return cleanup;
    }

    for backup in vault.walker().extensions([extension.as_str()]).files() {
        let relative = vault.relative(&backup).to_path_buf();
        let Some(original) = original_path(&backup, extension) else {
            continue;
        };
        if !original.is_file() {
            cleanup.kept.push(relative);
            continue;
        }
        match gate.remove(&backup) {
            Ok(_) => cleanup.deleted.push(relative),
            Err(err) => {
                warn!(path = %relative.display(), "{err:#}");
                cleanup.failed.push(relative);
            }
        }
    }
    cleanup
}

/// # Errors
///
/// Never fails as a whole; files that cannot be removed are listed.
#[inline]
pub fn run(vault: &Vault, gate: &Gate) -> Result<()> {
    let cleanup = clean(vault, gate);
    let prefix = dry_run_prefix(gate.is_dry_run());
    let verb = if gate.is_dry_run() { "would delete" } else { "deleted" };

    for path in &cleanup.deleted {
        println!("{prefix}{verb}: {}", path.display());
    }
    for path in &cleanup.kept {
        println!("kept (original missing): {}", path.display());
    }
    for path in &cleanup.failed {
        println!("failed: {}", path.display());
    }
    println!(
        "{prefix}Found {} backups: {} {verb}, {} kept, {} failed",
        cleanup.found(),
        cleanup.deleted.len(),
        cleanup.kept.len(),
        cleanup.failed.len()
    );
    Ok(())
}
