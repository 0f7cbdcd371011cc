// src/commands/migrate_calendar.rs
use crate::calendar::{AttachmentKind, CalendarKind, CalendarNote, classify, merge_content, unique_destination};
use crate::cli::MigrateCalendarArgs;
use crate::core::gate::Gate;
use crate::core::vault::Vault;
use crate::core::walker::Walker;
use crate::utils::dry_run_prefix;
use anyhow::{Context as _, Result, bail};
use chrono::{Local, NaiveDate};
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const ATTACHMENTS_MARKER: &str = "_attachments";

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ClassStats {
    pub processed: usize,
    pub created: usize,
    pub merged: usize,
    /// Destination already held the imported text.
    pub unchanged: usize,
    pub errors: usize,
}

/// Vault-relative paths touched by a migration, written out as JSON.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
pub struct Manifest {
    pub created: Vec<PathBuf>,
    pub modified: Vec<PathBuf>,
    pub attachments_copied: Vec<PathBuf>,
}

#[derive(Debug, Default, Clone)]
pub struct Migration {
    pub notes: BTreeMap<CalendarKind, ClassStats>,
    pub attachments: ClassStats,
    /// Top-level source entries that are neither calendar notes nor
    /// attachment folders.
    pub skipped: Vec<PathBuf>,
    pub manifest: Manifest,
    /// Attachment destinations handed out so far, so a dry run does not
    /// plan two copies onto the same name.
    taken: HashSet<PathBuf>,
}

enum Imported {
    Created(PathBuf),
    Merged(PathBuf),
    AlreadyPresent,
}

impl Migration {
    fn import_note(
        &mut self,
        vault: &Vault,
        gate: &Gate,
        source: &Path,
        note: &CalendarNote,
        today: NaiveDate,
    ) {
        let stats = self.notes.entry(note.kind).or_default();
        stats.processed += 1;

        match copy_or_merge(vault, gate, source, note, today) {
            Ok(Imported::Created(path)) => {
                stats.created += 1;
                self.manifest.created.push(path);
            }
            Ok(Imported::Merged(path)) => {
                stats.merged += 1;
                self.manifest.modified.push(path);
            }
            Ok(Imported::AlreadyPresent) => stats.unchanged += 1,
            Err(err) => {
                warn!(path = %source.display(), "{err:#}");
                stats.errors += 1;
            }
        }
    }

    fn import_attachments(&mut self, vault: &Vault, gate: &Gate, dir: &Path) {
        let attachments = &vault.config().attachments;

        for file in Walker::new(dir).files() {
            self.attachments.processed += 1;
            let Some(name) = file.file_name().map(|name| name.to_string_lossy().into_owned()) else {
                continue;
            };
            let kind = AttachmentKind::from_path(&file);
            let dest = unique_destination(&vault.resolve(kind.dir(attachments)), &name, &self.taken);
            self.taken.insert(dest.clone());

            match gate.copy(&file, &dest) {
                Ok(_) => {
                    self.attachments.created += 1;
                    self.manifest
                        .attachments_copied
                        .push(vault.relative(&dest).to_path_buf());
                }
                Err(err) => {
                    warn!(path = %file.display(), "{err:#}");
                    self.attachments.errors += 1;
                }
            }
        }
    }
}

fn copy_or_merge(
    vault: &Vault,
    gate: &Gate,
    source: &Path,
    note: &CalendarNote,
    today: NaiveDate,
) -> Result<Imported> {
    let calendar = &vault.config().calendar;
    let dest = vault
        .resolve(note.kind.dir(calendar))
        .join(&note.target_name);
    let relative = vault.relative(&dest).to_path_buf();

    if !dest.is_file() {
        gate.copy(source, &dest)?;
        return Ok(Imported::Created(relative));
    }

    let existing = fs::read_to_string(&dest)
        .with_context(|| format!("Failed to read {}", dest.display()))?;
    let imported = fs::read_to_string(source)
        .with_context(|| format!("Failed to read {}", source.display()))?;
    let source_name = source
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    match merge_content(&existing, &imported, &calendar.import_label, &source_name, today) {
        Some(merged) => {
            gate.update(&dest, &existing, &merged)?;
            Ok(Imported::Merged(relative))
        }
        None => {
            debug!(path = %relative.display(), "already imported");
            Ok(Imported::AlreadyPresent)
        }
    }
}

/// Imports the calendar notes at the top level of `source` and, unless
/// `skip_attachments` is set, the files in its `_attachments` folders.
///
/// # Errors
///
/// Returns an error if `source` is not a readable directory. Failures on
/// single files are counted per class.
#[inline]
pub fn migrate(
    vault: &Vault,
    gate: &Gate,
    source: &Path,
    skip_attachments: bool,
    today: NaiveDate,
) -> Result<Migration> {
    if !source.is_dir() {
        bail!("Source directory does not exist: {}", source.display());
    }

    let mut entries: Vec<PathBuf> = fs::read_dir(source)
        .with_context(|| format!("Failed to read source directory: {}", source.display()))?
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry.path()),
            Err(err) => {
                warn!(error = %err, "skipping unreadable entry");
                None
            }
        })
        .collect();
    entries.sort();

    let mut migration = Migration::default();
    for path in entries {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        if path.is_dir() {
            if name.contains(ATTACHMENTS_MARKER) && !skip_attachments {
                migration.import_attachments(vault, gate, &path);
            } else {
                migration.skipped.push(path);
            }
            continue;
        }

        match classify(&name) {
            Some(note) => migration.import_note(vault, gate, &path, &note, today),
            None => migration.skipped.push(path),
        }
    }
    Ok(migration)
}

/// # Errors
///
/// Returns an error if the source folder cannot be read or the manifest
/// cannot be written.
#[inline]
pub fn run(vault: &Vault, gate: &Gate, args: &MigrateCalendarArgs) -> Result<()> {
    let migration = migrate(
        vault,
        gate,
        &args.source,
        args.skip_attachments,
        Local::now().date_naive(),
    )?;
    let prefix = dry_run_prefix(gate.is_dry_run());

    for kind in CalendarKind::ALL {
        let stats = migration.notes.get(&kind).copied().unwrap_or_default();
        println!(
            "{prefix}{kind}: {} processed, {} created, {} merged, {} already imported, {} errors",
            stats.processed, stats.created, stats.merged, stats.unchanged, stats.errors
        );
    }
    println!(
        "{prefix}Attachments: {} processed, {} copied, {} errors",
        migration.attachments.processed, migration.attachments.created, migration.attachments.errors
    );
    if !migration.skipped.is_empty() {
        println!("Skipped {} entries that are not calendar notes", migration.skipped.len());
    }

    if let Some(path) = &args.manifest {
        if gate.is_dry_run() {
            println!("{prefix}Manifest not written: {}", path.display());
        } else {
            let json = serde_json::to_string_pretty(&migration.manifest)?;
            gate.create(path, &json)?;
            println!("Manifest written: {}", path.display());
        }
    }
    Ok(())
}
