// src/core/gate.rs
//! The only place that writes to the vault.
//!
//! Every mutation goes through [`Gate`]. In dry-run mode it logs what it
//! would do and leaves the filesystem untouched.

use anyhow::{Context as _, Result};
use std::ffi::OsString;
use std::fs::{self, File, Permissions};
use std::io::Write as _;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    Written,
    DryRun,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gate {
    dry_run: bool,
    backup_extension: Option<String>,
    preserve_mtime: bool,
}

impl Gate {
    #[inline]
    #[must_use]
    pub fn new(dry_run: bool) -> Self {
        Self {
            dry_run,
            backup_extension: Some("bak".to_owned()),
            preserve_mtime: false,
        }
    }

    /// Extension for backup copies; `None` disables backups.
    #[inline]
    #[must_use]
    pub fn backup_extension(mut self, extension: Option<String>) -> Self {
        self.backup_extension = extension;
        self
    }

    #[inline]
    #[must_use]
    pub const fn preserve_mtime(mut self, preserve: bool) -> Self {
        self.preserve_mtime = preserve;
        self
    }

    #[inline]
    #[must_use]
    pub const fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// `note.md` -> `note.md.bak`
    #[inline]
    #[must_use]
    pub fn backup_path(&self, path: &Path) -> Option<PathBuf> {
        let extension = self.backup_extension.as_deref()?;
        let mut name = OsString::from(path.as_os_str());
        name.push(".");
        name.push(extension);
        Some(PathBuf::from(name))
    }

    /// Replaces the content of an existing file, keeping a backup of the
    /// original and its permissions.
    ///
    /// # Errors
    ///
    /// Returns an error if the backup or the new content cannot be written.
    #[inline]
    pub fn update(&self, path: &Path, original: &str, content: &str) -> Result<Disposition> {
        if self.dry_run {
            info!(path = %path.display(), "would update");
            return Ok(Disposition::DryRun);
        }

        let metadata = fs::metadata(path)
            .with_context(|| format!("Failed to read metadata of {}", path.display()))?;

        if let Some(backup) = self.backup_path(path) {
            fs::write(&backup, original)
                .with_context(|| format!("Failed to write backup {}", backup.display()))?;
        }

        write_atomic(path, content.as_bytes(), Some(metadata.permissions()))?;

        if self.preserve_mtime {
            let modified = metadata.modified()?;
            File::options()
                .write(true)
                .open(path)
                .and_then(|file| file.set_modified(modified))
                .with_context(|| format!("Failed to restore mtime of {}", path.display()))?;
        }

        info!(path = %path.display(), "updated");
        Ok(Disposition::Written)
    }

    /// Writes a new file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if a directory or the file cannot be written.
    #[inline]
    pub fn create(&self, path: &Path, content: &str) -> Result<Disposition> {
        if self.dry_run {
            info!(path = %path.display(), "would create");
            return Ok(Disposition::DryRun);
        }

        create_parent(path)?;
        write_atomic(path, content.as_bytes(), None)?;
        info!(path = %path.display(), "created");
        Ok(Disposition::Written)
    }

    /// Copies a file, keeping its modification time.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be read or the target written.
    #[inline]
    pub fn copy(&self, from: &Path, to: &Path) -> Result<Disposition> {
        if self.dry_run {
            info!(from = %from.display(), to = %to.display(), "would copy");
            return Ok(Disposition::DryRun);
        }

        create_parent(to)?;
        fs::copy(from, to).with_context(|| {
            format!("Failed to copy {} to {}", from.display(), to.display())
        })?;
        let modified = fs::metadata(from)?.modified()?;
        File::options()
            .write(true)
            .open(to)
            .and_then(|file| file.set_modified(modified))
            .with_context(|| format!("Failed to set mtime of {}", to.display()))?;

        info!(from = %from.display(), to = %to.display(), "copied");
        Ok(Disposition::Written)
    }

    /// Deletes a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be removed.
    #[inline]
    pub fn remove(&self, path: &Path) -> Result<Disposition> {
        if self.dry_run {
            info!(path = %path.display(), "would remove");
            return Ok(Disposition::DryRun);
        }

        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
        info!(path = %path.display(), "removed");
        Ok(Disposition::Written)
    }
}

fn create_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
    }
    Ok(())
}

/// Writes through a temporary file in the same directory, then moves it over
/// `path` so readers never see a partial file.
fn write_atomic(path: &Path, content: &[u8], permissions: Option<Permissions>) -> Result<()> {
    let dir = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut temp = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;
    temp.write_all(content)?;
    if let Some(permissions) = permissions {
        temp.as_file().set_permissions(permissions)?;
    }
    temp.persist(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
