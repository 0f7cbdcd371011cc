// src/core/walker.rs
mod filter;

use crate::core::ignore::Patterns;
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

/// Lazy, deterministic traversal of the files in a vault.
///
/// Siblings are visited in file name order, so two walks over an unchanged
/// tree yield the same sequence. The root itself is never filtered.
#[derive(Debug, Clone)]
pub struct Walker {
    root: PathBuf,
    recursive: bool,
    extensions: Vec<String>,
    exclude_dirs: Vec<String>,
    ignore_patterns: Patterns,
}

impl Walker {
    #[inline]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            recursive: true,
            extensions: Vec::new(),
            exclude_dirs: Vec::new(),
            ignore_patterns: Patterns::new(),
        }
    }

    #[inline]
    #[must_use]
    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Only yields files with one of these extensions (case-insensitive,
    /// without the dot). No extensions means every file.
    #[inline]
    #[must_use]
    pub fn extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extensions = extensions
            .into_iter()
            .map(|ext| ext.as_ref().trim_start_matches('.').to_lowercase())
            .collect();
        self
    }

    #[inline]
    #[must_use]
    pub fn markdown(self) -> Self {
        self.extensions(["md"])
    }

    #[inline]
    #[must_use]
    pub fn exclude_dirs<I, S>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_dirs = dirs.into_iter().map(Into::into).collect();
        self
    }

    #[inline]
    #[must_use]
    pub fn ignore_patterns(mut self, patterns: Patterns) -> Self {
        self.ignore_patterns = patterns;
        self
    }

    /// The same walk rooted somewhere else, e.g. a subfolder of the vault.
    #[inline]
    #[must_use]
    pub fn with_root(&self, root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..self.clone()
        }
    }

    #[inline]
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Starts a new traversal. Unreadable entries are logged and skipped.
    #[inline]
    pub fn files(&self) -> impl Iterator<Item = PathBuf> + '_ {
        let max_depth = if self.recursive { usize::MAX } else { 1 };

        WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name()
            .max_depth(max_depth)
            .into_iter()
            .filter_entry(move |entry| {
                entry.depth() == 0
                    || !filter::should_exclude(
                        entry,
                        &self.root,
                        &self.exclude_dirs,
                        &self.ignore_patterns,
                    )
            })
            .filter_map(|result| match result {
                Ok(entry) => Some(entry),
                Err(err) => {
                    warn!(error = %err, "skipping unreadable entry");
                    None
                }
            })
            .filter(|entry| entry.file_type().is_file())
            .filter(move |entry| self.matches_extension(entry.path()))
            .map(walkdir::DirEntry::into_path)
    }

    fn matches_extension(&self, path: &Path) -> bool {
        if self.extensions.is_empty() {
            return true;
        }
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| {
                let ext = ext.to_lowercase();
                self.extensions.iter().any(|wanted| *wanted == ext)
            })
    }
}
